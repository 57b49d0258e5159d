use std::str::FromStr;
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::error::NominaError;
use crate::model::voucher::VoucherDocument;
use crate::nomina::assembly::GenerationClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ToSchema)]
#[derive(Display, EnumString)]
#[schema(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Txt,
}

impl ExportFormat {
    /// Reads the `format` query value; absent means JSON.
    pub fn from_query(value: Option<&str>) -> Result<Self, NominaError> {
        value.map_or(Ok(ExportFormat::default()), |v| {
            ExportFormat::from_str(v).map_err(|_| NominaError::UnknownFormat(v.to_string()))
        })
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Txt => "text/plain; charset=utf-8",
        }
    }
}

/// A generated file: same content under both extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name without extension.
    pub stem: String,
    pub content: String,
}

impl Artifact {
    pub fn file_name(&self, format: ExportFormat) -> String {
        format!("{}.{}", self.stem, format)
    }
}

/// `nomina_<first_name>_<first_surname>_<settlement_end_date>` for one
/// employee, `nomina_multiple_<today>` for a batch.
pub fn artifact_stem(doc: &VoucherDocument, clock: &GenerationClock) -> String {
    match doc {
        VoucherDocument::Single(v) => format!(
            "nomina_{}_{}_{}",
            v.employee.first_name, v.employee.first_surname, v.period.settlement_end_date
        ),
        VoucherDocument::Batch { .. } => format!("nomina_multiple_{}", clock.today_iso()),
    }
}

/// Pretty JSON with two-space indentation.
pub fn render(doc: &VoucherDocument) -> Result<String, NominaError> {
    serde_json::to_string_pretty(doc).map_err(|e| NominaError::Serialize(e.to_string()))
}

pub fn artifact(doc: &VoucherDocument, clock: &GenerationClock) -> Result<Artifact, NominaError> {
    Ok(Artifact {
        stem: artifact_stem(doc, clock),
        content: render(doc)?,
    })
}
