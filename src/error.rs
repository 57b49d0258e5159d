use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

#[derive(Debug, Display)]
pub enum NominaError {
    #[display(fmt = "at least one employee is required to build a voucher")]
    NoEmployees,
    #[display(fmt = "unknown export format '{}', expected json or txt", _0)]
    UnknownFormat(String),
    #[display(fmt = "failed to serialize voucher: {}", _0)]
    Serialize(String),
}

impl std::error::Error for NominaError {}

impl ResponseError for NominaError {
    fn status_code(&self) -> StatusCode {
        match self {
            NominaError::NoEmployees | NominaError::UnknownFormat(_) => StatusCode::BAD_REQUEST,
            NominaError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

/// Failures of a single city lookup attempt. None of them is retried.
#[derive(Debug, Display)]
pub enum CityLookupError {
    #[display(fmt = "city lookup request failed: {}", _0)]
    Network(String),
    #[display(fmt = "city lookup returned HTTP status {}", _0)]
    Status(u16),
    #[display(fmt = "unexpected city lookup response: {}", _0)]
    UnexpectedShape(String),
    #[display(fmt = "invalid city lookup header: {}", _0)]
    InvalidHeader(String),
}

impl std::error::Error for CityLookupError {}

impl From<reqwest::Error> for CityLookupError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => CityLookupError::Status(status.as_u16()),
            None => CityLookupError::Network(e.to_string()),
        }
    }
}

impl ResponseError for CityLookupError {
    fn status_code(&self) -> StatusCode {
        match self {
            CityLookupError::InvalidHeader(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
