//! Payslip aggregation.
//!
//! Composes the gross figures from the inputs, runs the contribution, local
//! tax and income tax calculations, and totals everything into a
//! [`PayslipBreakdown`]. Pure and deterministic: the same inputs and
//! quotient always produce the same breakdown.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::StatutoryConfig;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, ContributionSet, FamilyQuotient, PayPeriodInputs,
    PayslipBreakdown, PayslipCalculation,
};

use super::contributions::{calculate_contributions, compute_contributions};
use super::income_tax::{calculate_income_tax, compute_income_tax};
use super::local_tax::{calculate_local_tax, compute_local_tax};

/// Warning code raised when manual deductions exceed the social gross.
pub const DEDUCTIONS_EXCEED_GROSS: &str = "DEDUCTIONS_EXCEED_GROSS";

/// A breakdown together with the audit steps and warnings that produced it.
#[derive(Debug, Clone)]
pub struct PayslipResult {
    /// The computed amounts.
    pub breakdown: PayslipBreakdown,
    /// One step per rule applied, in order.
    pub audit_steps: Vec<AuditStep>,
    /// Conditions worth surfacing that did not change the amounts.
    pub warnings: Vec<AuditWarning>,
}

/// Computes the breakdown without an audit trail.
///
/// This is the fast path used on every edit.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::compute_breakdown;
/// use payslip_engine::config::StatutoryConfig;
/// use payslip_engine::models::{FamilyQuotient, PayPeriodInputs};
/// use rust_decimal::Decimal;
///
/// let mut inputs = PayPeriodInputs::default();
/// inputs.remuneration.set_base_salary(Decimal::from(200_000));
///
/// let breakdown = compute_breakdown(&inputs, FamilyQuotient::single(), &StatutoryConfig::default());
/// assert_eq!(breakdown.gross_fiscal, Decimal::from(200_000));
/// assert_eq!(breakdown.income_tax, Decimal::from(21_250));
/// assert_eq!(breakdown.local_tax, Decimal::from(500));
/// ```
pub fn compute_breakdown(
    inputs: &PayPeriodInputs,
    quotient: FamilyQuotient,
    config: &StatutoryConfig,
) -> PayslipBreakdown {
    let gross_social = inputs.remuneration.gross_social();
    let gross_fiscal = inputs.remuneration.gross_fiscal();

    let contributions = compute_contributions(
        gross_social,
        gross_fiscal,
        inputs.deductions.mutual_insurance,
        config.contributions(),
    );
    let local_tax = compute_local_tax(gross_fiscal, config.local_tax());
    let income_tax = compute_income_tax(gross_fiscal, quotient, config.income_tax());

    assemble(
        inputs,
        gross_social,
        gross_fiscal,
        contributions,
        local_tax,
        income_tax,
    )
}

/// Computes the breakdown and records every step.
///
/// Produces exactly the same breakdown as [`compute_breakdown`].
pub fn compute_payslip(
    inputs: &PayPeriodInputs,
    quotient: FamilyQuotient,
    config: &StatutoryConfig,
) -> PayslipResult {
    let mut audit_steps = Vec::with_capacity(5);
    let mut warnings = Vec::new();
    let mut step_number: u32 = 1;

    let gross_social = inputs.remuneration.gross_social();
    let gross_fiscal = inputs.remuneration.gross_fiscal();
    let benefits_in_kind = gross_fiscal - gross_social;
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay".to_string(),
        input: serde_json::json!({
            "base_salary": inputs.remuneration.base_salary.normalize().to_string(),
            "above_scale_supplement": inputs.remuneration.above_scale_supplement.normalize().to_string(),
            "displacement_allowance": inputs.remuneration.displacement_allowance.normalize().to_string(),
            "other_allowances": inputs.remuneration.other_allowances.normalize().to_string(),
            "benefits_in_kind": benefits_in_kind.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_social": gross_social.normalize().to_string(),
            "gross_fiscal": gross_fiscal.normalize().to_string()
        }),
        reasoning: format!(
            "Social gross {} + benefits in kind {} = fiscal gross {}",
            gross_social.normalize(),
            benefits_in_kind.normalize(),
            gross_fiscal.normalize()
        ),
    });
    step_number += 1;

    let contribution_result = calculate_contributions(
        gross_social,
        gross_fiscal,
        inputs.deductions.mutual_insurance,
        config.contributions(),
        step_number,
    );
    audit_steps.push(contribution_result.audit_step);
    step_number += 1;

    let local_tax_result = calculate_local_tax(gross_fiscal, config.local_tax(), step_number);
    audit_steps.push(local_tax_result.audit_step);
    step_number += 1;

    let income_tax_result =
        calculate_income_tax(gross_fiscal, quotient, config.income_tax(), step_number);
    audit_steps.push(income_tax_result.audit_step);
    step_number += 1;

    let breakdown = assemble(
        inputs,
        gross_social,
        gross_fiscal,
        contribution_result.contributions,
        local_tax_result.tax,
        income_tax_result.tax,
    );

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross_social": breakdown.gross_social.normalize().to_string(),
            "total_non_statutory_deductions": breakdown.total_non_statutory_deductions.normalize().to_string(),
            "total_bonuses": breakdown.total_bonuses.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_before_bonuses": breakdown.net_before_bonuses.normalize().to_string(),
            "net_pay": breakdown.net_pay.normalize().to_string()
        }),
        reasoning: format!(
            "{} - {} deductions = {}; + {} bonuses = {} (statutory withholdings of {} shown, not subtracted)",
            breakdown.gross_social.normalize(),
            breakdown.total_non_statutory_deductions.normalize(),
            breakdown.net_before_bonuses.normalize(),
            breakdown.total_bonuses.normalize(),
            breakdown.net_pay.normalize(),
            breakdown.total_statutory_employee_withholdings.normalize()
        ),
    });

    if breakdown.net_before_bonuses < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: DEDUCTIONS_EXCEED_GROSS.to_string(),
            message: format!(
                "Manual deductions of {} exceed the social gross of {}",
                breakdown.total_non_statutory_deductions.normalize(),
                breakdown.gross_social.normalize()
            ),
            severity: "medium".to_string(),
        });
    }

    PayslipResult {
        breakdown,
        audit_steps,
        warnings,
    }
}

/// Computes a payslip and wraps it with identifiers, timing and the audit trace.
pub fn calculate_payslip(
    employee_id: &str,
    inputs: &PayPeriodInputs,
    quotient: FamilyQuotient,
    config: &StatutoryConfig,
) -> PayslipCalculation {
    let start_time = Instant::now();
    let result = compute_payslip(inputs, quotient, config);
    let duration_us = start_time.elapsed().as_micros() as u64;

    PayslipCalculation {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: employee_id.to_string(),
        family_quotient_parts: quotient.parts(),
        breakdown: result.breakdown,
        audit_trace: AuditTrace {
            steps: result.audit_steps,
            warnings: result.warnings,
            duration_us,
        },
    }
}

fn assemble(
    inputs: &PayPeriodInputs,
    gross_social: Decimal,
    gross_fiscal: Decimal,
    contributions: ContributionSet,
    local_tax: Decimal,
    income_tax: Decimal,
) -> PayslipBreakdown {
    let total_non_statutory_deductions = inputs.deductions.total();
    let net_before_bonuses = gross_social - total_non_statutory_deductions;
    let total_bonuses = inputs.bonuses.total();
    let net_pay = net_before_bonuses + total_bonuses;

    let total_statutory_employee_withholdings =
        contributions.employee_retirement() + local_tax + income_tax;
    let total_employee_withholdings =
        total_non_statutory_deductions + total_statutory_employee_withholdings;
    let total_employer_contributions = contributions.employer_retirement()
        + contributions.family_allowance
        + contributions.work_accident
        + contributions.mutual_insurance_employer
        + contributions.employer_payroll_tax;
    let total_contributions = total_employee_withholdings + total_employer_contributions;

    PayslipBreakdown {
        gross_social,
        gross_fiscal,
        contributions,
        local_tax,
        income_tax,
        total_non_statutory_deductions,
        total_statutory_employee_withholdings,
        total_employee_withholdings,
        total_employer_contributions,
        total_contributions,
        net_before_bonuses,
        total_bonuses,
        net_pay,
    }
}
