//! Retirement, social and employer payroll contributions.
//!
//! Amounts are kept at full precision; rounding belongs to display.

use rust_decimal::Decimal;

use crate::config::ContributionRates;
use crate::models::{AuditStep, ContributionSet, clamp_amount};

/// The result of a contribution calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct ContributionResult {
    /// Every contribution line.
    pub contributions: ContributionSet,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes every contribution line.
///
/// Retirement lines use `gross_social`, the employer payroll tax uses
/// `gross_fiscal`, and the family-allowance and work-accident lines use the
/// fixed `capped_base` of the rates. The mutual insurance share is charged
/// once to each side.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::compute_contributions;
/// use payslip_engine::config::ContributionRates;
/// use rust_decimal::Decimal;
///
/// let set = compute_contributions(
///     Decimal::from(200_000),
///     Decimal::from(200_000),
///     Decimal::from(3_000),
///     &ContributionRates::default(),
/// );
/// assert_eq!(set.employee_retirement_general, Decimal::from(11_200));
/// assert_eq!(set.family_allowance, Decimal::from(4_900));
/// assert_eq!(set.mutual_insurance_total, Decimal::from(6_000));
/// ```
pub fn compute_contributions(
    gross_social: Decimal,
    gross_fiscal: Decimal,
    mutual_insurance_share: Decimal,
    rates: &ContributionRates,
) -> ContributionSet {
    let mutual = clamp_amount(mutual_insurance_share);

    ContributionSet {
        employee_retirement_general: gross_social * rates.employee_retirement_general,
        employee_retirement_cadre: gross_social * rates.employee_retirement_cadre,
        employer_retirement_general: gross_social * rates.employer_retirement_general,
        employer_retirement_cadre: gross_social * rates.employer_retirement_cadre,
        family_allowance: rates.capped_base * rates.family_allowance,
        work_accident: rates.capped_base * rates.work_accident,
        employer_payroll_tax: gross_fiscal * rates.employer_payroll_tax,
        mutual_insurance_employee: mutual,
        mutual_insurance_employer: mutual,
        mutual_insurance_total: mutual + mutual,
    }
}

/// Computes every contribution line and records the bases and rates used.
pub fn calculate_contributions(
    gross_social: Decimal,
    gross_fiscal: Decimal,
    mutual_insurance_share: Decimal,
    rates: &ContributionRates,
    step_number: u32,
) -> ContributionResult {
    let contributions =
        compute_contributions(gross_social, gross_fiscal, mutual_insurance_share, rates);

    let rates_json: serde_json::Map<String, serde_json::Value> = rates
        .named_rates()
        .into_iter()
        .map(|(name, rate)| (name.to_string(), rate.normalize().to_string().into()))
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "contributions".to_string(),
        rule_name: "Social Contributions".to_string(),
        input: serde_json::json!({
            "gross_social": gross_social.normalize().to_string(),
            "gross_fiscal": gross_fiscal.normalize().to_string(),
            "capped_base": rates.capped_base.normalize().to_string(),
            "mutual_insurance_share": contributions.mutual_insurance_employee.normalize().to_string(),
            "rates": rates_json
        }),
        output: serde_json::json!({
            "employee_retirement": contributions.employee_retirement().normalize().to_string(),
            "employer_retirement": contributions.employer_retirement().normalize().to_string(),
            "family_allowance": contributions.family_allowance.normalize().to_string(),
            "work_accident": contributions.work_accident.normalize().to_string(),
            "employer_payroll_tax": contributions.employer_payroll_tax.normalize().to_string(),
            "mutual_insurance_total": contributions.mutual_insurance_total.normalize().to_string()
        }),
        reasoning: format!(
            "Retirement on social gross {}: employee {}, employer {}; payroll tax on fiscal gross {}: {}; capped base {}: family allowance {}, work accident {}",
            gross_social.normalize(),
            contributions.employee_retirement().normalize(),
            contributions.employer_retirement().normalize(),
            gross_fiscal.normalize(),
            contributions.employer_payroll_tax.normalize(),
            rates.capped_base.normalize(),
            contributions.family_allowance.normalize(),
            contributions.work_accident.normalize()
        ),
    };

    ContributionResult {
        contributions,
        audit_step,
    }
}
