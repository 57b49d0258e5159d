use serde::{Serialize, Serializer};
use utoipa::ToSchema;

use crate::model::form::EmployeeInput;
use crate::utils::numeric::{JsNumber, js_round, parse_or_default};

pub const DEFAULT_HEALTH_PERCENTAGE: f64 = 4.0;
pub const DEFAULT_PENSION_PERCENTAGE: f64 = 4.0;
pub const DEFAULT_HED_PERCENTAGE: f64 = 25.0;
pub const DEFAULT_WORKED_DAYS: f64 = 30.0;
pub const DEFAULT_WORKING_COUNTRY_ID: f64 = 45.0;

/// Scalar inputs of one employee after default substitution.
#[derive(Debug, Clone, PartialEq)]
pub struct Amounts {
    pub salary: f64,
    pub worked_days: f64,
    pub health_percentage: f64,
    pub pension_percentage: f64,
    pub hed_amount: f64,
    pub hed_percentage: f64,
    pub transportation_assistance: f64,
    pub bonus_payment: f64,
    pub commission: f64,
    pub concept_s: f64,
    pub third_party_pay: f64,
    pub other_deduction: f64,
}

impl Amounts {
    pub fn from_input(input: &EmployeeInput) -> Self {
        Self {
            salary: parse_or_default(input.salary.as_ref(), 0.0),
            worked_days: parse_or_default(input.worked_days.as_ref(), DEFAULT_WORKED_DAYS),
            health_percentage: parse_or_default(
                input.health_percentage.as_ref(),
                DEFAULT_HEALTH_PERCENTAGE,
            ),
            pension_percentage: parse_or_default(
                input.pension_percentage.as_ref(),
                DEFAULT_PENSION_PERCENTAGE,
            ),
            hed_amount: parse_or_default(input.hed_amount.as_ref(), 0.0),
            hed_percentage: parse_or_default(input.hed_percentage.as_ref(), DEFAULT_HED_PERCENTAGE),
            transportation_assistance: parse_or_default(
                input.transportation_assistance.as_ref(),
                0.0,
            ),
            bonus_payment: parse_or_default(input.bonus_payment.as_ref(), 0.0),
            commission: parse_or_default(input.commission.as_ref(), 0.0),
            concept_s: parse_or_default(input.concept_s.as_ref(), 0.0),
            third_party_pay: parse_or_default(input.third_party_pay.as_ref(), 0.0),
            other_deduction: parse_or_default(input.other_deduction.as_ref(), 0.0),
        }
    }
}

pub fn health_deduction(salary: f64, percentage: f64) -> f64 {
    js_round(salary * percentage / 100.0)
}

pub fn pension_deduction(salary: f64, percentage: f64) -> f64 {
    js_round(salary * percentage / 100.0)
}

/// Salary for the days actually worked, on a 30-day month.
/// `None` means "not computed": either value is missing or not positive.
pub fn salary_worked(salary: f64, worked_days: f64) -> Option<f64> {
    if salary > 0.0 && worked_days > 0.0 {
        Some(js_round(salary / 30.0 * worked_days))
    } else {
        None
    }
}

/// Daytime overtime pay on a 240-hour month.
///
/// Salary enters the product twice and the result is scaled by 1/1000.
/// Kept exactly as the form has always computed it.
pub fn hed_payment(salary: f64, hed_percentage: f64, hed_amount: f64) -> f64 {
    if hed_amount > 0.0 {
        js_round((salary / 240.0) * (hed_percentage / 100.0) * hed_amount * salary / 1000.0)
    } else {
        0.0
    }
}

/// Every derived quantity of one voucher.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    pub health_deduction: f64,
    pub pension_deduction: f64,
    pub hed_payment: f64,
    pub total_earned: f64,
    pub total_deductions: f64,
    pub total_voucher: f64,
    pub rounding: f64,
}

impl Derivation {
    pub fn compute(a: &Amounts) -> Self {
        let health_deduction = health_deduction(a.salary, a.health_percentage);
        let pension_deduction = pension_deduction(a.salary, a.pension_percentage);
        let hed_payment = hed_payment(a.salary, a.hed_percentage, a.hed_amount);

        let total_earned = a.salary
            + a.transportation_assistance
            + hed_payment
            + a.bonus_payment
            + a.commission
            + a.concept_s;
        let total_deductions =
            health_deduction + pension_deduction + a.third_party_pay + a.other_deduction;
        let total_voucher = total_earned - total_deductions;

        Self {
            health_deduction,
            pension_deduction,
            hed_payment,
            total_earned,
            total_deductions,
            total_voucher,
            // `%` keeps the dividend's sign, as the schema's rounding field expects
            rounding: js_round(total_voucher % 100.0),
        }
    }
}

/// Fields the form recalculates while the user types.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LiveCalculation {
    #[schema(value_type = f64, example = 120000)]
    pub health_deduction: JsNumber,
    #[schema(value_type = f64, example = 120000)]
    pub pension_deduction: JsNumber,
    /// Empty string while salary or worked days are missing.
    #[serde(serialize_with = "blank_when_none")]
    #[schema(value_type = String, example = "3000000")]
    pub salary_worked: Option<JsNumber>,
}

fn blank_when_none<S: Serializer>(value: &Option<JsNumber>, s: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(n) => s.serialize_str(&n.to_string()),
        None => s.serialize_str(""),
    }
}

/// Live recalculation reads worked days with no default, so a blank days
/// field leaves the worked salary blank.
pub fn live_calculation(input: &EmployeeInput) -> LiveCalculation {
    let salary = parse_or_default(input.salary.as_ref(), 0.0);
    let health = parse_or_default(input.health_percentage.as_ref(), DEFAULT_HEALTH_PERCENTAGE);
    let pension = parse_or_default(input.pension_percentage.as_ref(), DEFAULT_PENSION_PERCENTAGE);
    let worked_days = parse_or_default(input.worked_days.as_ref(), 0.0);

    LiveCalculation {
        health_deduction: JsNumber(health_deduction(salary, health)),
        pension_deduction: JsNumber(pension_deduction(salary, pension)),
        salary_worked: salary_worked(salary, worked_days).map(JsNumber),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::numeric::RawField;

    fn input(salary: f64, days: f64) -> EmployeeInput {
        EmployeeInput {
            salary: Some(RawField::Number(salary)),
            worked_days: Some(RawField::Number(days)),
            ..Default::default()
        }
    }

    #[test]
    fn reference_salary_yields_expected_totals() {
        let mut emp = input(3_000_000.0, 30.0);
        emp.health_percentage = Some("4".into());
        emp.pension_percentage = Some("4".into());

        let amounts = Amounts::from_input(&emp);
        let d = Derivation::compute(&amounts);

        assert_eq!(d.health_deduction, 120_000.0);
        assert_eq!(d.pension_deduction, 120_000.0);
        assert_eq!(salary_worked(amounts.salary, amounts.worked_days), Some(3_000_000.0));
        assert_eq!(d.total_earned, 3_000_000.0);
        assert_eq!(d.total_deductions, 240_000.0);
        assert_eq!(d.total_voucher, 2_760_000.0);
        assert_eq!(d.rounding, 0.0);
    }

    #[test]
    fn percentages_default_to_four() {
        for salary in [0.0, 1.0, 877_803.0, 1_300_000.0, 12_345_678.0] {
            let a = Amounts::from_input(&input(salary, 30.0));
            let d = Derivation::compute(&a);
            assert_eq!(d.health_deduction, js_round(salary * 0.04));
            assert_eq!(d.pension_deduction, js_round(salary * 0.04));
        }
    }

    #[test]
    fn salary_worked_is_blank_without_days_or_salary() {
        assert_eq!(salary_worked(0.0, 30.0), None);
        assert_eq!(salary_worked(1_000_000.0, 0.0), None);
        assert_eq!(salary_worked(1_000_000.0, 15.0), Some(500_000.0));
        assert_eq!(salary_worked(1_000_000.0, 7.0), Some(233_333.0));
    }

    #[test]
    fn overtime_formula_is_preserved() {
        assert_eq!(hed_payment(1_200_000.0, 25.0, 0.0), 0.0);
        // 1_200_000 / 240 * 0.25 * 10 * 1_200_000 / 1000
        assert_eq!(hed_payment(1_200_000.0, 25.0, 10.0), 15_000_000.0);

        let mut emp = input(1_200_000.0, 30.0);
        emp.hed_amount = Some("10".into());
        let a = Amounts::from_input(&emp);
        assert_eq!(a.hed_percentage, 25.0);
        assert_eq!(Derivation::compute(&a).hed_payment, 15_000_000.0);
    }

    #[test]
    fn voucher_total_is_earned_minus_deductions() {
        let mut emp = input(2_500_000.0, 30.0);
        emp.transportation_assistance = Some("162000".into());
        emp.bonus_payment = Some(RawField::Number(100_000.5));
        emp.commission = Some("75000".into());
        emp.concept_s = Some("12345".into());
        emp.third_party_pay = Some("50000".into());
        emp.other_deduction = Some("33333".into());

        let d = Derivation::compute(&Amounts::from_input(&emp));
        assert_eq!(d.total_voucher, d.total_earned - d.total_deductions);
        assert_eq!(d.total_earned, 2_849_345.5);
        assert_eq!(d.total_deductions, 283_333.0);
        assert_eq!(d.rounding, js_round(2_566_012.5 % 100.0));
    }

    #[test]
    fn negative_totals_keep_the_sign_in_rounding() {
        let mut emp = input(0.0, 30.0);
        emp.other_deduction = Some("250".into());
        let d = Derivation::compute(&Amounts::from_input(&emp));
        assert_eq!(d.total_voucher, -250.0);
        assert_eq!(d.rounding, -50.0);
    }

    #[test]
    fn live_calculation_serializes_blank_salary_worked() {
        let emp = EmployeeInput {
            salary: Some("1000000".into()),
            ..Default::default()
        };
        let live = live_calculation(&emp);
        let json = serde_json::to_value(&live).unwrap();

        assert_eq!(json["health_deduction"], 40000);
        assert_eq!(json["pension_deduction"], 40000);
        assert_eq!(json["salary_worked"], "");
    }
}
