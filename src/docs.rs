use crate::api::cities::{CitySelectQuery, CitySelectResponse};
use crate::api::nomina::ExportQuery;
use crate::cities::client::ConnectionReport;
use crate::cities::control::{SelectControl, SelectOption};
use crate::model::city::{CityRecord, FieldMapping};
use crate::model::form::{EmployeeInput, VoucherHeader, VoucherRequest};
use crate::nomina::derivation::LiveCalculation;
use crate::nomina::export::ExportFormat;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nómina Electrónica Voucher API",
        version = "0.1.0",
        description = r#"
## Electronic payroll voucher builder

Turns payroll form state into the JSON document expected by the Colombian
**nómina electrónica** schema, and feeds city selection controls from a
remote city catalogue.

### 🔹 Key Features
- **Form defaults**
  - Header prefilled for the current month
- **Live calculations**
  - Health and pension deductions, salary for the days worked
- **Voucher preview**
  - One employee yields the voucher itself, several yield `{"employees": [...]}`
- **Export**
  - Same document as a `.json` or `.txt` attachment
- **Cities**
  - Fetch the catalogue, rebuild a city select, check the upstream API

### 📦 Conventions
- Money fields taken from the form are two-decimal strings (`"1500.00"`)
- Counts and totals are plain number strings (`"30"`, `"2760000"`)
- Missing or unreadable numbers fall back to documented defaults, never to errors

---
Built with **Rust**, **Actix Web** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::nomina::form_defaults,
        crate::api::nomina::live_calculations,
        crate::api::nomina::preview_voucher,
        crate::api::nomina::export_voucher,

        crate::api::cities::list_cities,
        crate::api::cities::city_select,
        crate::api::cities::city_reload,
        crate::api::cities::city_api_health
    ),
    components(
        schemas(
            EmployeeInput,
            VoucherHeader,
            VoucherRequest,
            LiveCalculation,
            ExportFormat,
            ExportQuery,
            CityRecord,
            FieldMapping,
            CitySelectQuery,
            CitySelectResponse,
            SelectControl,
            SelectOption,
            ConnectionReport
        )
    ),
    tags(
        (name = "Nomina", description = "Payroll voucher APIs"),
        (name = "Cities", description = "City lookup APIs"),
    )
)]
pub struct ApiDoc;
