use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::numeric::RawField;

/// Form state of one employee section.
///
/// Every field is optional: numeric values may arrive as numbers or as the
/// raw text of an input, and anything missing falls back to the defaults
/// applied in [`crate::nomina`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct EmployeeInput {
    #[schema(value_type = Option<String>, example = "3000000")]
    pub salary: Option<RawField>,
    #[schema(value_type = Option<String>, example = "30")]
    pub worked_days: Option<RawField>,
    /// Overrides the computed worked salary when present.
    #[schema(value_type = Option<String>)]
    pub salary_worked: Option<RawField>,
    #[schema(value_type = Option<String>, example = "4")]
    pub health_percentage: Option<RawField>,
    #[schema(value_type = Option<String>, example = "4")]
    pub pension_percentage: Option<RawField>,
    /// Daytime overtime hours.
    #[schema(value_type = Option<String>, example = "0")]
    pub hed_amount: Option<RawField>,
    #[schema(value_type = Option<String>, example = "25")]
    pub hed_percentage: Option<RawField>,
    #[schema(value_type = Option<String>)]
    pub transportation_assistance: Option<RawField>,
    #[schema(value_type = Option<String>)]
    pub viatic_maintenance: Option<RawField>,
    #[schema(value_type = Option<String>)]
    pub viatic_non_salary: Option<RawField>,
    #[schema(value_type = Option<String>)]
    pub bonus_payment: Option<RawField>,
    #[schema(value_type = Option<String>)]
    pub commission: Option<RawField>,
    /// Salary-constitutive "other concepts" amount.
    #[schema(value_type = Option<String>)]
    pub concept_s: Option<RawField>,
    #[schema(value_type = Option<String>)]
    pub third_party_pay: Option<RawField>,
    #[schema(value_type = Option<String>)]
    pub other_deduction: Option<RawField>,

    #[schema(value_type = Option<String>, example = "1")]
    pub worker_type_id: Option<RawField>,
    #[schema(value_type = Option<String>, example = "1")]
    pub worker_subtype_id: Option<RawField>,
    #[schema(value_type = Option<String>, example = "1")]
    pub contract_type_id: Option<RawField>,
    #[schema(value_type = Option<String>, example = "45")]
    pub working_country_id: Option<RawField>,
    #[schema(value_type = Option<String>, example = "836")]
    pub work_city_id: Option<RawField>,

    pub worker_code: Option<String>,
    #[schema(example = "false")]
    pub high_risk_pension: Option<String>,
    #[schema(example = "1")]
    pub identity_document_id: Option<String>,
    #[schema(example = "1020304050")]
    pub document_number: Option<String>,
    #[schema(example = "Pérez")]
    pub first_surname: Option<String>,
    pub second_surname: Option<String>,
    #[schema(example = "Ana")]
    pub first_name: Option<String>,
    pub other_names: Option<String>,
    pub work_address: Option<String>,
    #[schema(example = "false")]
    pub integral_salary: Option<String>,
    #[schema(example = "1")]
    pub payment_method_id: Option<String>,
    #[schema(example = "31")]
    pub means_payment_id: Option<String>,
    pub bank: Option<String>,
    pub account_type: Option<String>,
    pub account_number: Option<String>,
}

/// Document and period fields shared by every employee of a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct VoucherHeader {
    #[schema(example = "18760000001")]
    pub resolution_number: Option<String>,
    #[schema(example = "27")]
    pub document_number: Option<String>,
    #[schema(example = "836")]
    pub generation_city_id: Option<String>,
    #[schema(example = "2026-01-31")]
    pub pay_day: Option<String>,
    #[schema(example = "2017-01-01")]
    pub date_entry: Option<String>,
    pub departure_date: Option<String>,
    #[schema(example = "2026-01-01")]
    pub settlement_start_date: Option<String>,
    #[schema(example = "2026-01-31")]
    pub settlement_end_date: Option<String>,
    #[schema(example = "30")]
    pub time_worked: Option<String>,
    #[schema(example = "2026-01-31")]
    pub generation_date: Option<String>,
    #[schema(example = "5")]
    pub period_id: Option<String>,
}

impl VoucherHeader {
    /// Header prefilled the way a fresh form starts: paid and generated
    /// today, settling the whole current month.
    pub fn for_month(today: NaiveDate) -> Self {
        let first_day = today.with_day(1).unwrap_or(today);
        let last_day = first_day
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(today);
        let iso = |d: NaiveDate| Some(d.format("%Y-%m-%d").to_string());

        Self {
            pay_day: iso(today),
            generation_date: iso(today),
            date_entry: Some("2017-01-01".to_string()),
            settlement_start_date: iso(first_day),
            settlement_end_date: iso(last_day),
            ..Self::default()
        }
    }
}

/// Request body shared by the nomina endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct VoucherRequest {
    /// Omitted: the header a fresh form starts with for the current month.
    #[serde(default)]
    pub header: Option<VoucherHeader>,
    #[serde(default)]
    pub employees: Vec<EmployeeInput>,
}

impl VoucherRequest {
    pub fn header_or_month(&self, today: NaiveDate) -> VoucherHeader {
        self.header
            .clone()
            .unwrap_or_else(|| VoucherHeader::for_month(today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_header_spans_the_current_month() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
        let header = VoucherHeader::for_month(today);

        assert_eq!(header.settlement_start_date.as_deref(), Some("2024-02-01"));
        assert_eq!(header.settlement_end_date.as_deref(), Some("2024-02-29"));
        assert_eq!(header.pay_day.as_deref(), Some("2024-02-14"));
        assert_eq!(header.generation_date.as_deref(), Some("2024-02-14"));
        assert_eq!(header.date_entry.as_deref(), Some("2017-01-01"));
        assert!(header.resolution_number.is_none());
    }

    #[test]
    fn employee_fields_accept_numbers_or_text() {
        let input: EmployeeInput = serde_json::from_value(serde_json::json!({
            "salary": 3000000,
            "worked_days": "30",
            "first_name": "Ana"
        }))
        .unwrap();

        assert_eq!(input.salary, Some(RawField::Number(3_000_000.0)));
        assert_eq!(input.worked_days, Some(RawField::Text("30".to_string())));
        assert_eq!(input.first_name.as_deref(), Some("Ana"));
        assert!(input.bank.is_none());
    }
}
