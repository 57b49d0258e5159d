use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

use crate::config::CityApiConfig;
use crate::error::CityLookupError;
use crate::model::city::{CityRecord, FieldMapping};

/// Client for the remote city catalogue. One attempt per call: no caching,
/// pagination or retries.
#[derive(Clone)]
pub struct CityClient {
    http: reqwest::Client,
    url: String,
    headers: HeaderMap,
    mapping: FieldMapping,
}

fn build_headers(extra: &[(String, String)]) -> Result<HeaderMap, CityLookupError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| CityLookupError::InvalidHeader(format!("{name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| CityLookupError::InvalidHeader(format!("{name}: {e}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

impl CityClient {
    pub fn new(config: &CityApiConfig) -> Result<Self, CityLookupError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CityLookupError::Network(e.to_string()))?;

        Ok(Self {
            http,
            url: config.url.clone(),
            headers: build_headers(&config.headers)?,
            mapping: config.field_mapping.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    #[instrument(name = "fetch_cities", skip(self), fields(url = %self.url))]
    pub async fn fetch_cities(&self) -> Result<Vec<CityRecord>, CityLookupError> {
        let response = self
            .http
            .get(&self.url)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "City lookup request failed");
                CityLookupError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "City lookup returned an error status");
            return Err(CityLookupError::Status(status.as_u16()));
        }

        let body: Value = response.json().await.map_err(|e| {
            error!(error = %e, "City lookup response is not JSON");
            CityLookupError::UnexpectedShape(format!("body is not JSON: {e}"))
        })?;

        let cities = map_cities(&body, &self.mapping)?;
        info!(count = cities.len(), "Cities loaded");
        Ok(cities)
    }

    /// Fetches once and reports what came back. Never fails: an unreachable
    /// API is reported as such.
    #[instrument(name = "check_city_api", skip(self))]
    pub async fn check_connection(&self) -> ConnectionReport {
        match self.fetch_cities().await {
            Ok(cities) => {
                if cities.is_empty() {
                    warn!("City API reachable but returned no cities");
                } else {
                    info!(count = cities.len(), sample = ?&cities[..cities.len().min(3)], "City API reachable");
                }
                ConnectionReport {
                    reachable: !cities.is_empty(),
                    city_count: cities.len(),
                    sample: cities.into_iter().take(3).collect(),
                    error: None,
                }
            }
            Err(e) => ConnectionReport {
                reachable: false,
                city_count: 0,
                sample: Vec::new(),
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConnectionReport {
    pub reachable: bool,
    pub city_count: usize,
    pub sample: Vec<CityRecord>,
    pub error: Option<String>,
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Maps `dataRecords.data` of an upstream response onto [`CityRecord`]s.
///
/// A missing path, a non-array, or a record without a scalar id or name is
/// rejected instead of yielding partial data.
pub fn map_cities(body: &Value, mapping: &FieldMapping) -> Result<Vec<CityRecord>, CityLookupError> {
    let records = body
        .pointer("/dataRecords/data")
        .ok_or_else(|| CityLookupError::UnexpectedShape("missing dataRecords.data".to_string()))?
        .as_array()
        .ok_or_else(|| {
            CityLookupError::UnexpectedShape("dataRecords.data is not an array".to_string())
        })?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| -> Result<CityRecord, CityLookupError> {
            let field = |name: &str| {
                record.get(name).and_then(scalar_to_string).ok_or_else(|| {
                    CityLookupError::UnexpectedShape(format!(
                        "record {index} has no usable `{name}` field"
                    ))
                })
            };
            Ok(CityRecord {
                id: field(&mapping.id_field)?,
                name: field(&mapping.name_field)?,
            })
        })
        .collect()
}
