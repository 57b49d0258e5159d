use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use tracing::{debug, info, instrument};
use utoipa::{IntoParams, ToSchema};

use crate::model::form::{EmployeeInput, VoucherHeader, VoucherRequest};
use crate::nomina::assembly::{GenerationClock, assemble};
use crate::nomina::derivation::live_calculation;
use crate::nomina::export::{ExportFormat, artifact};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct ExportQuery {
    /// `json` (default) or `txt`; both carry the same document
    #[schema(value_type = Option<ExportFormat>, example = "json")]
    #[param(value_type = Option<ExportFormat>, example = "json")]
    pub format: Option<String>,
}

/// Header a fresh form starts with: paid today, settling the current month.
#[utoipa::path(
    get,
    path = "/api/v1/nomina/defaults",
    responses(
        (status = 200, body = VoucherHeader)
    ),
    tag = "Nomina"
)]
pub async fn form_defaults() -> impl Responder {
    HttpResponse::Ok().json(VoucherHeader::for_month(GenerationClock::now().today))
}

#[utoipa::path(
    post,
    path = "/api/v1/nomina/calculations",
    request_body = EmployeeInput,
    responses(
        (status = 200, description = "Recalculated form fields", body = crate::nomina::derivation::LiveCalculation)
    ),
    tag = "Nomina"
)]
pub async fn live_calculations(body: web::Json<EmployeeInput>) -> impl Responder {
    HttpResponse::Ok().json(live_calculation(&body))
}

#[utoipa::path(
    post,
    path = "/api/v1/nomina/preview",
    request_body = VoucherRequest,
    responses(
        (status = 200, description = "Voucher document, or {employees: [...]} for several employees"),
        (status = 400, description = "No employees in the request")
    ),
    tag = "Nomina"
)]
#[instrument(name = "nomina_preview", skip(body), fields(employees = body.employees.len()))]
pub async fn preview_voucher(body: web::Json<VoucherRequest>) -> actix_web::Result<impl Responder> {
    let clock = GenerationClock::now();
    let header = body.header_or_month(clock.today);
    let doc = assemble(&header, &body.employees, &clock)?;
    debug!("Voucher preview assembled");
    Ok(HttpResponse::Ok().json(doc))
}

#[utoipa::path(
    post,
    path = "/api/v1/nomina/export",
    request_body = VoucherRequest,
    params(ExportQuery),
    responses(
        (status = 200, description = "Voucher file as an attachment"),
        (status = 400, description = "No employees in the request, or unknown format")
    ),
    tag = "Nomina"
)]
#[instrument(name = "nomina_export", skip(body, query), fields(employees = body.employees.len()))]
pub async fn export_voucher(
    body: web::Json<VoucherRequest>,
    query: web::Query<ExportQuery>,
) -> actix_web::Result<impl Responder> {
    let format = ExportFormat::from_query(query.format.as_deref())?;
    let clock = GenerationClock::now();

    let header = body.header_or_month(clock.today);
    let doc = assemble(&header, &body.employees, &clock)?;
    let artifact = artifact(&doc, &clock)?;
    let file_name = artifact.file_name(format);

    info!(file = %file_name, "Voucher exported");

    Ok(HttpResponse::Ok()
        .content_type(format.content_type())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file_name)],
        })
        .body(artifact.content))
}
