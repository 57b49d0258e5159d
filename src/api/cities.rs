use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};
use utoipa::{IntoParams, ToSchema};

use crate::cities::client::CityClient;
use crate::cities::control::CityField;

const LOAD_FAILED_NOTICE: &str =
    "Error al cargar las ciudades desde la API. Verifique la conexión.";

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct CitySelectQuery {
    /// Value currently typed or selected in the city field
    #[schema(example = "836")]
    pub current: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CitySelectResponse {
    /// `{"kind": "free_text", "value"}` or `{"kind": "select", "options", "value"}`
    #[schema(value_type = Object)]
    pub field: CityField,
    /// Set when the lookup failed and the field stayed as free text
    pub notice: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/cities",
    responses(
        (status = 200, body = Vec<crate::model::city::CityRecord>),
        (status = 502, description = "City API unreachable, failed or changed shape")
    ),
    tag = "Cities"
)]
pub async fn list_cities(client: web::Data<CityClient>) -> actix_web::Result<impl Responder> {
    let cities = client.fetch_cities().await?;
    Ok(HttpResponse::Ok().json(cities))
}

async fn rebuild(client: &CityClient, field: CityField) -> CitySelectResponse {
    match client.fetch_cities().await {
        Ok(cities) => CitySelectResponse {
            field: field.rehydrate(&cities),
            notice: None,
        },
        Err(e) => {
            error!(error = %e, url = client.url(), "Keeping city field as free text");
            CitySelectResponse {
                field,
                notice: Some(LOAD_FAILED_NOTICE.to_string()),
            }
        }
    }
}

/// Rebuilds a city field from the catalogue. A failed lookup is not an
/// HTTP error: the field comes back as free text with a notice.
#[utoipa::path(
    get,
    path = "/api/v1/cities/select",
    params(CitySelectQuery),
    responses(
        (status = 200, body = CitySelectResponse)
    ),
    tag = "Cities"
)]
#[instrument(name = "city_select", skip(client, query))]
pub async fn city_select(
    client: web::Data<CityClient>,
    query: web::Query<CitySelectQuery>,
) -> impl Responder {
    let field = CityField::FreeText {
        value: query.current.clone().unwrap_or_default(),
    };
    HttpResponse::Ok().json(rebuild(&client, field).await)
}

/// Reload button: a select goes back to free text, then is rebuilt from a
/// fresh lookup. Overlapping reloads are not serialised.
#[utoipa::path(
    post,
    path = "/api/v1/cities/reload",
    responses(
        (status = 200, body = CitySelectResponse)
    ),
    tag = "Cities"
)]
#[instrument(name = "city_reload", skip(client, body))]
pub async fn city_reload(
    client: web::Data<CityClient>,
    body: web::Json<CityField>,
) -> impl Responder {
    let field = body.into_inner().revert_to_text();
    HttpResponse::Ok().json(rebuild(&client, field).await)
}

#[utoipa::path(
    get,
    path = "/api/v1/cities/health",
    responses(
        (status = 200, body = crate::cities::client::ConnectionReport)
    ),
    tag = "Cities"
)]
pub async fn city_api_health(client: web::Data<CityClient>) -> impl Responder {
    HttpResponse::Ok().json(client.check_connection().await)
}
