use chrono::{NaiveDate, NaiveTime};

use crate::error::NominaError;
use crate::model::form::{EmployeeInput, VoucherHeader};
use crate::model::voucher::*;
use crate::nomina::derivation::{Amounts, DEFAULT_WORKING_COUNTRY_ID, Derivation, salary_worked};
use crate::utils::numeric::{
    JsNumber, fixed2, number_string, parse_int_or_default, parse_or_default,
};

const PLACEHOLDER_DATE: &str = "2021-12-31";
const PLACEHOLDER_DATETIME: &str = "2021-12-31T00:00:00";
const ZERO: &str = "0";
const ZERO_MONEY: &str = "0.00";

/// Colombian peso in the schema's currency table.
const CURRENCY_COP: &str = "272";

/// Date and time stamped into a generated voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationClock {
    pub today: NaiveDate,
    pub time: NaiveTime,
}

impl GenerationClock {
    pub fn now() -> Self {
        let now = chrono::Local::now();
        Self {
            today: now.date_naive(),
            time: now.time(),
        }
    }

    pub fn today_iso(&self) -> String {
        self.today.format("%Y-%m-%d").to_string()
    }

    fn time_hms(&self) -> String {
        self.time.format("%H:%M:%S").to_string()
    }
}

fn text_or(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

fn opt_text(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

fn overtime_placeholder() -> Vec<OvertimeEntry> {
    vec![OvertimeEntry {
        start_time: PLACEHOLDER_DATETIME.to_string(),
        final_hour: PLACEHOLDER_DATETIME.to_string(),
        amount: ZERO.to_string(),
        percentage: ZERO_MONEY.to_string(),
        payment: ZERO_MONEY.to_string(),
    }]
}

fn dated_payment() -> DatedPayment {
    DatedPayment {
        start_date: PLACEHOLDER_DATE.to_string(),
        final_date: PLACEHOLDER_DATE.to_string(),
        amount: ZERO.to_string(),
        payment: ZERO_MONEY.to_string(),
    }
}

fn dated_amount() -> DatedAmount {
    DatedAmount {
        start_date: PLACEHOLDER_DATE.to_string(),
        final_date: PLACEHOLDER_DATE.to_string(),
        amount: ZERO.to_string(),
    }
}

fn money_zero() -> String {
    ZERO_MONEY.to_string()
}

fn zero_percentage() -> PercentageDeduction {
    PercentageDeduction {
        percentage: money_zero(),
        deduction: money_zero(),
    }
}

fn build_earn(input: &EmployeeInput, a: &Amounts) -> Earn {
    let worked = parse_or_default(
        input.salary_worked.as_ref(),
        salary_worked(a.salary, a.worked_days).unwrap_or(a.salary),
    );

    Earn {
        basic: Basic {
            worked_days: number_string(a.worked_days),
            salary_worked: number_string(worked),
        },
        transport: Transport {
            transportation_assistance: number_string(a.transportation_assistance),
            viatic_maintenance: number_string(parse_or_default(
                input.viatic_maintenance.as_ref(),
                0.0,
            )),
            viatic_non_salary_maintenance: number_string(parse_or_default(
                input.viatic_non_salary.as_ref(),
                0.0,
            )),
        },
        heds: overtime_placeholder(),
        hens: overtime_placeholder(),
        hrns: overtime_placeholder(),
        heddfs: overtime_placeholder(),
        hrddfs: overtime_placeholder(),
        hendfs: overtime_placeholder(),
        hrndfs: overtime_placeholder(),
        vacations: Vacations {
            common: dated_payment(),
            paid: AmountPayment {
                amount: ZERO.to_string(),
                payment: money_zero(),
            },
        },
        bonus: Bonus {
            amount: ZERO.to_string(),
            payment: fixed2(a.bonus_payment),
            non_salary_payment: money_zero(),
        },
        cesantias: Cesantias {
            payment: ZERO.to_string(),
            percentage: money_zero(),
            interest_payment: money_zero(),
        },
        incapacity: vec![Incapacity {
            start_date: PLACEHOLDER_DATE.to_string(),
            final_date: PLACEHOLDER_DATE.to_string(),
            amount: ZERO.to_string(),
            type_id: 1,
            payment: money_zero(),
        }],
        licenses: Licenses {
            license_mp: dated_payment(),
            license_r: dated_payment(),
            license_nr: dated_amount(),
        },
        bonuses: vec![BonusEntry {
            bonus_s: fixed2(a.bonus_payment),
            bonus_ns: money_zero(),
        }],
        assistances: vec![AssistanceEntry {
            assistance_s: money_zero(),
            assistance_ns: money_zero(),
        }],
        legal_strikes: vec![dated_amount()],
        other_concepts: vec![OtherConcept {
            description: "Otros conceptos".to_string(),
            concept_s: fixed2(a.concept_s),
            concept_ns: money_zero(),
        }],
        compensations: vec![Compensation {
            compensation_o: money_zero(),
            compensation_e: money_zero(),
        }],
        bond_epctvs: vec![BondEpctv {
            payment_s: money_zero(),
            payment_ns: money_zero(),
            payment_food_s: money_zero(),
            payment_food_ns: money_zero(),
        }],
        commissions: vec![CommissionEntry {
            commission: fixed2(a.commission),
        }],
        payments_third_party: vec![ThirdPartyEarning {
            payment_third_party: money_zero(),
        }],
        advances: vec![Advance {
            advance: money_zero(),
        }],
        endowment: money_zero(),
        sustaining_support: money_zero(),
        teleworking: money_zero(),
        withdrawal_bonus: money_zero(),
        indemnification: money_zero(),
        refund: money_zero(),
    }
}

fn build_deductions(a: &Amounts, d: &Derivation) -> Deductions {
    Deductions {
        health: PercentageDeduction {
            percentage: number_string(a.health_percentage),
            deduction: number_string(d.health_deduction),
        },
        pension_fund: PercentageDeduction {
            percentage: number_string(a.pension_percentage),
            deduction: number_string(d.pension_deduction),
        },
        fund_sp: FundSp {
            percentage: money_zero(),
            deduction: money_zero(),
            percentage_sub: money_zero(),
            deduction_sub: money_zero(),
        },
        trade_union: vec![zero_percentage()],
        sanctions: vec![Sanction {
            sanction_public: money_zero(),
            sanction_priv: money_zero(),
        }],
        libranzas: vec![Libranza {
            description: String::new(),
            deduction: money_zero(),
        }],
        third_party_payment: vec![ThirdPartyDeduction {
            third_party_pay: fixed2(a.third_party_pay),
        }],
        advances: vec![Advance {
            advance: money_zero(),
        }],
        other_deductions: vec![OtherDeduction {
            other_deduction: fixed2(a.other_deduction),
        }],
        voluntary_pension: money_zero(),
        retefuente: money_zero(),
        afc: money_zero(),
        cooperative: money_zero(),
        tax_embargo: money_zero(),
        complementary_plan: money_zero(),
        education: money_zero(),
        refund: money_zero(),
        debt: money_zero(),
    }
}

/// Builds the voucher of one employee. Pure: the same inputs and clock
/// always produce the same document.
pub fn build_voucher(
    header: &VoucherHeader,
    input: &EmployeeInput,
    clock: &GenerationClock,
) -> PayrollVoucher {
    let amounts = Amounts::from_input(input);
    let derived = Derivation::compute(&amounts);
    let today = clock.today_iso();
    let generation_date = text_or(&header.generation_date, &today);
    let worker_code = text_or(&input.worker_code, "");

    PayrollVoucher {
        resolution_number: text_or(&header.resolution_number, "18760000001"),
        document_number: text_or(&header.document_number, "27"),
        generation_city_id: text_or(&header.generation_city_id, "1"),
        worker_code: worker_code.clone(),
        novelty: false,
        pay_day: text_or(&header.pay_day, &today),
        period: Period {
            date_entry: text_or(&header.date_entry, ""),
            departure_date: opt_text(&header.departure_date),
            settlement_start_date: text_or(&header.settlement_start_date, &today),
            settlement_end_date: text_or(&header.settlement_end_date, &today),
            time_worked: text_or(&header.time_worked, "30"),
            generation_date: generation_date.clone(),
        },
        general_information: GeneralInformation {
            generation_date,
            generation_time: clock.time_hms(),
            period_id: text_or(&header.period_id, "5"),
            currency_id: CURRENCY_COP.to_string(),
            trm: ZERO.to_string(),
        },
        notes: String::new(),
        employee: VoucherEmployee {
            worker_type_id: parse_int_or_default(input.worker_type_id.as_ref(), 1),
            worker_subtype_id: parse_int_or_default(input.worker_subtype_id.as_ref(), 1),
            high_risk_pension: text_or(&input.high_risk_pension, "false"),
            identity_document_id: text_or(&input.identity_document_id, "1"),
            document_number: text_or(&input.document_number, ""),
            first_surname: text_or(&input.first_surname, ""),
            second_surname: text_or(&input.second_surname, ""),
            first_name: text_or(&input.first_name, ""),
            other_names: text_or(&input.other_names, ""),
            working_country_id: JsNumber(parse_or_default(
                input.working_country_id.as_ref(),
                DEFAULT_WORKING_COUNTRY_ID,
            )),
            work_city_id: JsNumber(parse_or_default(input.work_city_id.as_ref(), 0.0)),
            work_address: text_or(&input.work_address, ""),
            integral_salary: text_or(&input.integral_salary, "false"),
            contract_type_id: parse_int_or_default(input.contract_type_id.as_ref(), 1),
            salary: number_string(amounts.salary),
            worker_code,
        },
        payment: Payment {
            payment_method_id: text_or(&input.payment_method_id, "1"),
            means_payment_id: text_or(&input.means_payment_id, "31"),
            bank: text_or(&input.bank, ""),
            account_type: text_or(&input.account_type, ""),
            account_number: text_or(&input.account_number, ""),
        },
        earn: build_earn(input, &amounts),
        deductions: build_deductions(&amounts, &derived),
        rounding: number_string(derived.rounding),
        total_earned: number_string(derived.total_earned),
        deductions_total: number_string(derived.total_deductions),
        total_voucher: number_string(derived.total_voucher),
    }
}

/// Assembles every employee independently; a single voucher is returned
/// bare, several are wrapped under `employees`.
pub fn assemble(
    header: &VoucherHeader,
    employees: &[EmployeeInput],
    clock: &GenerationClock,
) -> Result<VoucherDocument, NominaError> {
    let mut vouchers: Vec<PayrollVoucher> = employees
        .iter()
        .map(|e| build_voucher(header, e, clock))
        .collect();

    match vouchers.len() {
        0 => Err(NominaError::NoEmployees),
        1 => Ok(VoucherDocument::Single(Box::new(vouchers.remove(0)))),
        _ => Ok(VoucherDocument::Batch {
            employees: vouchers,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::numeric::RawField;
    use serde_json::{Value, json};

    fn clock() -> GenerationClock {
        GenerationClock {
            today: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            time: NaiveTime::from_hms_opt(9, 5, 7).unwrap(),
        }
    }

    fn employee(first_name: &str, salary: f64) -> EmployeeInput {
        EmployeeInput {
            first_name: Some(first_name.to_string()),
            first_surname: Some("Gómez".to_string()),
            salary: Some(RawField::Number(salary)),
            worked_days: Some("30".into()),
            ..Default::default()
        }
    }

    fn to_json(doc: &VoucherDocument) -> Value {
        serde_json::to_value(doc).unwrap()
    }

    #[test]
    fn single_employee_document_is_unwrapped() {
        let doc = assemble(&VoucherHeader::default(), &[employee("Ana", 3_000_000.0)], &clock())
            .unwrap();
        let json = to_json(&doc);

        assert!(json.get("employees").is_none());
        assert_eq!(json["employee"]["first_name"], "Ana");
        assert_eq!(json["deductions"]["health"]["deduction"], "120000");
        assert_eq!(json["deductions"]["pension_fund"]["deduction"], "120000");
        assert_eq!(json["earn"]["basic"]["salary_worked"], "3000000");
        assert_eq!(json["total_earned"], "3000000");
        assert_eq!(json["deductions_total"], "240000");
        assert_eq!(json["total_voucher"], "2760000");
        assert_eq!(json["rounding"], "0");
    }

    #[test]
    fn several_employees_are_wrapped() {
        let doc = assemble(
            &VoucherHeader::default(),
            &[employee("Ana", 3_000_000.0), employee("Luis", 1_500_000.0)],
            &clock(),
        )
        .unwrap();
        let json = to_json(&doc);

        let employees = json["employees"].as_array().unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0]["employee"]["first_name"], "Ana");
        assert_eq!(employees[1]["employee"]["first_name"], "Luis");
        assert_eq!(employees[1]["total_voucher"], "1380000");
    }

    #[test]
    fn no_employees_is_an_error() {
        let result = assemble(&VoucherHeader::default(), &[], &clock());
        assert!(matches!(result, Err(NominaError::NoEmployees)));
    }

    #[test]
    fn missing_fields_use_the_default_table() {
        let voucher = build_voucher(&VoucherHeader::default(), &EmployeeInput::default(), &clock());
        let json = serde_json::to_value(&voucher).unwrap();

        assert_eq!(json["resolution_number"], "18760000001");
        assert_eq!(json["document_number"], "27");
        assert_eq!(json["generation_city_id"], "1");
        assert_eq!(json["novelty"], false);
        assert_eq!(json["pay_day"], "2026-03-15");
        assert_eq!(json["period"]["departure_date"], Value::Null);
        assert_eq!(json["period"]["settlement_end_date"], "2026-03-15");
        assert_eq!(json["period"]["time_worked"], "30");
        assert_eq!(json["general_information"]["generation_time"], "09:05:07");
        assert_eq!(json["general_information"]["period_id"], "5");
        assert_eq!(json["general_information"]["currency_id"], "272");
        assert_eq!(json["employee"]["worker_type_id"], 1);
        assert_eq!(json["employee"]["contract_type_id"], 1);
        assert_eq!(json["employee"]["working_country_id"], 45);
        assert_eq!(json["employee"]["work_city_id"], 0);
        assert_eq!(json["employee"]["high_risk_pension"], "false");
        assert_eq!(json["employee"]["salary"], "0");
        assert_eq!(json["payment"]["means_payment_id"], "31");
        assert_eq!(json["earn"]["basic"]["worked_days"], "30");
        assert_eq!(json["earn"]["basic"]["salary_worked"], "0");
        assert_eq!(json["deductions"]["health"]["percentage"], "4");
    }

    #[test]
    fn input_sourced_money_fields_are_fixed_point() {
        let mut emp = employee("Ana", 2_000_000.0);
        emp.bonus_payment = Some("150000".into());
        emp.commission = Some(RawField::Number(2500.5));
        emp.concept_s = Some("10".into());
        emp.third_party_pay = Some("30000".into());
        emp.other_deduction = Some("1234.567".into());

        let json = serde_json::to_value(build_voucher(&VoucherHeader::default(), &emp, &clock()))
            .unwrap();

        assert_eq!(json["earn"]["bonus"]["payment"], "150000.00");
        assert_eq!(json["earn"]["bonuses"][0]["bonusS"], "150000.00");
        assert_eq!(json["earn"]["commissions"][0]["commission"], "2500.50");
        assert_eq!(json["earn"]["other_concepts"][0]["conceptS"], "10.00");
        assert_eq!(
            json["deductions"]["third_party_payment"][0]["third_party_pay"],
            "30000.00"
        );
        assert_eq!(
            json["deductions"]["other_deductions"][0]["other_deduction"],
            "1234.57"
        );
    }

    #[test]
    fn placeholder_sections_have_schema_shape() {
        let voucher = build_voucher(&VoucherHeader::default(), &EmployeeInput::default(), &clock());
        let json = serde_json::to_value(&voucher).unwrap();

        for key in ["HEDs", "HENs", "HRNs", "HEDDFs", "HRDDFs", "HENDFs", "HRNDFs"] {
            assert_eq!(
                json["earn"][key],
                json!([{
                    "start_time": "2021-12-31T00:00:00",
                    "final_hour": "2021-12-31T00:00:00",
                    "amount": "0",
                    "percentage": "0.00",
                    "payment": "0.00"
                }])
            );
        }
        assert_eq!(
            json["earn"]["licenses"]["licenseNR"],
            json!({"start_date": "2021-12-31", "final_date": "2021-12-31", "amount": "0"})
        );
        assert_eq!(json["earn"]["incapacity"][0]["type_id"], 1);
        assert_eq!(json["deductions"]["fundSP"]["deductionSub"], "0.00");
        assert_eq!(json["deductions"]["debt"], "0.00");
    }

    #[test]
    fn top_level_keys_follow_schema_order() {
        let voucher = build_voucher(&VoucherHeader::default(), &EmployeeInput::default(), &clock());
        let text = serde_json::to_string(&voucher).unwrap();

        let order = [
            "\"resolution_number\"",
            "\"novelty\"",
            "\"period\"",
            "\"general_information\"",
            "\"employee\"",
            "\"payment\"",
            "\"earn\"",
            "\"deductions\"",
            "\"rounding\"",
            "\"total_earned\"",
            "\"deductions_total\"",
            "\"total_voucher\"",
        ];
        let positions: Vec<usize> = order.iter().map(|k| text.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn explicit_salary_worked_overrides_computation() {
        let mut emp = employee("Ana", 3_000_000.0);
        emp.worked_days = Some("15".into());
        let json = serde_json::to_value(build_voucher(&VoucherHeader::default(), &emp, &clock()))
            .unwrap();
        assert_eq!(json["earn"]["basic"]["salary_worked"], "1500000");

        emp.salary_worked = Some("1400000".into());
        let json = serde_json::to_value(build_voucher(&VoucherHeader::default(), &emp, &clock()))
            .unwrap();
        assert_eq!(json["earn"]["basic"]["salary_worked"], "1400000");
    }
}
