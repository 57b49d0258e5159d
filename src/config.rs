use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

use crate::model::city::FieldMapping;

const DEFAULT_CITIES_URL: &str = "https://api-v2.matias-api.com/api/ubl2.1/cities";

/// Where and how to reach the city catalogue.
#[derive(Clone, Debug)]
pub struct CityApiConfig {
    pub url: String,
    /// Extra request headers, added after the JSON accept/content-type pair.
    pub headers: Vec<(String, String)>,
    pub field_mapping: FieldMapping,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,
    pub log_dir: String,

    // Rate limiting
    pub rate_nomina_per_min: u32,
    pub rate_cities_per_min: u32,

    pub cities: CityApiConfig,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var_or(key, default)
        .parse()
        .with_context(|| format!("{key} must be a number"))
}

/// Parses `Name=value;Other-Name=value` pairs. Empty segments are skipped.
pub fn parse_header_list(raw: &str) -> Result<Vec<(String, String)>> {
    raw.split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = pair
                .split_once('=')
                .with_context(|| format!("header `{pair}` must look like Name=value"))?;
            Ok((name.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

impl CityApiConfig {
    pub fn from_env() -> Result<Self> {
        let mut headers = parse_header_list(&var_or("CITIES_HEADERS", ""))
            .context("CITIES_HEADERS is malformed")?;

        if let Ok(token) = env::var("CITIES_BEARER_TOKEN") {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        if let Ok(key) = env::var("CITIES_API_KEY") {
            headers.push(("X-API-Key".to_string(), key));
        }

        Ok(Self {
            url: var_or("CITIES_URL", DEFAULT_CITIES_URL),
            headers,
            field_mapping: FieldMapping {
                id_field: var_or("CITIES_ID_FIELD", "id"),
                name_field: var_or("CITIES_NAME_FIELD", "name_city"),
            },
            timeout_secs: parse_var("CITIES_TIMEOUT_SECS", "10")?,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080"),
            api_prefix: var_or("API_PREFIX", "/api"),
            log_dir: var_or("LOG_DIR", "logs"),

            rate_nomina_per_min: parse_var("RATE_NOMINA_PER_MIN", "600")?,
            rate_cities_per_min: parse_var("RATE_CITIES_PER_MIN", "60")?,

            cities: CityApiConfig::from_env()?,
        })
    }
}
