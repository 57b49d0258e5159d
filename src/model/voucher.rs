//! Shape of the electronic payroll document.
//!
//! Field order follows the external schema and is preserved by serde.
//! Most leaf values are strings, as the schema expects.

use serde::Serialize;

use crate::utils::numeric::JsNumber;

#[derive(Debug, Clone, Serialize)]
pub struct PayrollVoucher {
    pub resolution_number: String,
    pub document_number: String,
    pub generation_city_id: String,
    pub worker_code: String,
    pub novelty: bool,
    pub pay_day: String,
    pub period: Period,
    pub general_information: GeneralInformation,
    pub notes: String,
    pub employee: VoucherEmployee,
    pub payment: Payment,
    pub earn: Earn,
    pub deductions: Deductions,
    pub rounding: String,
    pub total_earned: String,
    pub deductions_total: String,
    pub total_voucher: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Period {
    pub date_entry: String,
    pub departure_date: Option<String>,
    pub settlement_start_date: String,
    pub settlement_end_date: String,
    pub time_worked: String,
    pub generation_date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneralInformation {
    pub generation_date: String,
    pub generation_time: String,
    pub period_id: String,
    pub currency_id: String,
    pub trm: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoucherEmployee {
    pub worker_type_id: i64,
    pub worker_subtype_id: i64,
    pub high_risk_pension: String,
    pub identity_document_id: String,
    pub document_number: String,
    pub first_surname: String,
    pub second_surname: String,
    pub first_name: String,
    pub other_names: String,
    pub working_country_id: JsNumber,
    pub work_city_id: JsNumber,
    pub work_address: String,
    pub integral_salary: String,
    pub contract_type_id: i64,
    pub salary: String,
    pub worker_code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub payment_method_id: String,
    pub means_payment_id: String,
    pub bank: String,
    pub account_type: String,
    pub account_number: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Earn {
    pub basic: Basic,
    pub transport: Transport,
    #[serde(rename = "HEDs")]
    pub heds: Vec<OvertimeEntry>,
    #[serde(rename = "HENs")]
    pub hens: Vec<OvertimeEntry>,
    #[serde(rename = "HRNs")]
    pub hrns: Vec<OvertimeEntry>,
    #[serde(rename = "HEDDFs")]
    pub heddfs: Vec<OvertimeEntry>,
    #[serde(rename = "HRDDFs")]
    pub hrddfs: Vec<OvertimeEntry>,
    #[serde(rename = "HENDFs")]
    pub hendfs: Vec<OvertimeEntry>,
    #[serde(rename = "HRNDFs")]
    pub hrndfs: Vec<OvertimeEntry>,
    pub vacations: Vacations,
    pub bonus: Bonus,
    pub cesantias: Cesantias,
    pub incapacity: Vec<Incapacity>,
    pub licenses: Licenses,
    pub bonuses: Vec<BonusEntry>,
    pub assistances: Vec<AssistanceEntry>,
    pub legal_strikes: Vec<DatedAmount>,
    pub other_concepts: Vec<OtherConcept>,
    pub compensations: Vec<Compensation>,
    #[serde(rename = "bondEPCTVs")]
    pub bond_epctvs: Vec<BondEpctv>,
    pub commissions: Vec<CommissionEntry>,
    pub payments_third_party: Vec<ThirdPartyEarning>,
    pub advances: Vec<Advance>,
    pub endowment: String,
    pub sustaining_support: String,
    pub teleworking: String,
    pub withdrawal_bonus: String,
    pub indemnification: String,
    pub refund: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Basic {
    pub worked_days: String,
    pub salary_worked: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Transport {
    pub transportation_assistance: String,
    pub viatic_maintenance: String,
    pub viatic_non_salary_maintenance: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OvertimeEntry {
    pub start_time: String,
    pub final_hour: String,
    pub amount: String,
    pub percentage: String,
    pub payment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Vacations {
    pub common: DatedPayment,
    pub paid: AmountPayment,
}

/// Date range with an hour/day count and a payment.
#[derive(Debug, Clone, Serialize)]
pub struct DatedPayment {
    pub start_date: String,
    pub final_date: String,
    pub amount: String,
    pub payment: String,
}

/// Date range with a count only.
#[derive(Debug, Clone, Serialize)]
pub struct DatedAmount {
    pub start_date: String,
    pub final_date: String,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AmountPayment {
    pub amount: String,
    pub payment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Bonus {
    pub amount: String,
    pub payment: String,
    pub non_salary_payment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Cesantias {
    pub payment: String,
    pub percentage: String,
    pub interest_payment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Incapacity {
    pub start_date: String,
    pub final_date: String,
    pub amount: String,
    pub type_id: i64,
    pub payment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Licenses {
    #[serde(rename = "licenseMP")]
    pub license_mp: DatedPayment,
    #[serde(rename = "licenseR")]
    pub license_r: DatedPayment,
    #[serde(rename = "licenseNR")]
    pub license_nr: DatedAmount,
}

#[derive(Debug, Clone, Serialize)]
pub struct BonusEntry {
    #[serde(rename = "bonusS")]
    pub bonus_s: String,
    #[serde(rename = "bonusNS")]
    pub bonus_ns: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssistanceEntry {
    #[serde(rename = "assistanceS")]
    pub assistance_s: String,
    #[serde(rename = "assistanceNS")]
    pub assistance_ns: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OtherConcept {
    pub description: String,
    #[serde(rename = "conceptS")]
    pub concept_s: String,
    #[serde(rename = "conceptNS")]
    pub concept_ns: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Compensation {
    #[serde(rename = "compensationO")]
    pub compensation_o: String,
    #[serde(rename = "compensationE")]
    pub compensation_e: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BondEpctv {
    #[serde(rename = "paymentS")]
    pub payment_s: String,
    #[serde(rename = "paymentNS")]
    pub payment_ns: String,
    #[serde(rename = "payment_foodS")]
    pub payment_food_s: String,
    #[serde(rename = "payment_foodNS")]
    pub payment_food_ns: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommissionEntry {
    pub commission: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThirdPartyEarning {
    pub payment_third_party: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Advance {
    pub advance: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Deductions {
    pub health: PercentageDeduction,
    pub pension_fund: PercentageDeduction,
    #[serde(rename = "fundSP")]
    pub fund_sp: FundSp,
    pub trade_union: Vec<PercentageDeduction>,
    pub sanctions: Vec<Sanction>,
    pub libranzas: Vec<Libranza>,
    pub third_party_payment: Vec<ThirdPartyDeduction>,
    pub advances: Vec<Advance>,
    pub other_deductions: Vec<OtherDeduction>,
    pub voluntary_pension: String,
    pub retefuente: String,
    pub afc: String,
    pub cooperative: String,
    pub tax_embargo: String,
    pub complementary_plan: String,
    pub education: String,
    pub refund: String,
    pub debt: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PercentageDeduction {
    pub percentage: String,
    pub deduction: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FundSp {
    pub percentage: String,
    pub deduction: String,
    #[serde(rename = "percentageSub")]
    pub percentage_sub: String,
    #[serde(rename = "deductionSub")]
    pub deduction_sub: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sanction {
    #[serde(rename = "sanctionPublic")]
    pub sanction_public: String,
    #[serde(rename = "sanctionPriv")]
    pub sanction_priv: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Libranza {
    pub description: String,
    pub deduction: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThirdPartyDeduction {
    pub third_party_pay: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OtherDeduction {
    pub other_deduction: String,
}

/// What gets previewed and exported: a lone voucher, or a batch wrapper
/// once there is more than one employee.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum VoucherDocument {
    Single(Box<PayrollVoucher>),
    Batch { employees: Vec<PayrollVoucher> },
}
