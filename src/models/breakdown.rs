//! Payslip breakdown and calculation envelope.
//!
//! [`PayslipBreakdown`] is the pure output of the aggregator and is compared
//! structurally by the reconciler, so it carries amounts only. The audit
//! trail, identifiers and timing live on [`PayslipCalculation`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::StatutoryOverrides;

/// Retirement, social and employer-only contributions for one payslip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSet {
    /// Employee general retirement contribution.
    pub employee_retirement_general: Decimal,
    /// Employee cadre retirement contribution.
    pub employee_retirement_cadre: Decimal,
    /// Employer general retirement contribution.
    pub employer_retirement_general: Decimal,
    /// Employer cadre retirement contribution.
    pub employer_retirement_cadre: Decimal,
    /// Employer family-allowance contribution, on the capped base.
    pub family_allowance: Decimal,
    /// Employer work-accident contribution, on the capped base.
    pub work_accident: Decimal,
    /// Employer payroll tax, on the fiscal gross.
    pub employer_payroll_tax: Decimal,
    /// Mutual insurance charged to the employee.
    pub mutual_insurance_employee: Decimal,
    /// Mutual insurance charged to the employer (equal to the employee share).
    pub mutual_insurance_employer: Decimal,
    /// Both mutual insurance shares together.
    pub mutual_insurance_total: Decimal,
}

impl ContributionSet {
    /// Employee retirement, general plus cadre.
    pub fn employee_retirement(&self) -> Decimal {
        self.employee_retirement_general + self.employee_retirement_cadre
    }

    /// Employer retirement, general plus cadre.
    pub fn employer_retirement(&self) -> Decimal {
        self.employer_retirement_general + self.employer_retirement_cadre
    }
}

/// The full breakdown of a payslip.
///
/// Always re-derivable from the inputs and the family quotient; never edited
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipBreakdown {
    /// Remuneration excluding benefits in kind.
    pub gross_social: Decimal,
    /// Social gross plus benefits in kind.
    pub gross_fiscal: Decimal,
    /// Contribution lines.
    pub contributions: ContributionSet,
    /// Flat local tax.
    pub local_tax: Decimal,
    /// Progressive income tax.
    pub income_tax: Decimal,
    /// Salary advance recovery, employee mutual share and cash advances.
    pub total_non_statutory_deductions: Decimal,
    /// Employee retirement, local tax and income tax.
    pub total_statutory_employee_withholdings: Decimal,
    /// Non-statutory deductions plus statutory employee withholdings.
    pub total_employee_withholdings: Decimal,
    /// Everything the employer pays on top of the gross.
    pub total_employer_contributions: Decimal,
    /// Employee withholdings plus employer contributions.
    pub total_contributions: Decimal,
    /// Social gross minus non-statutory deductions.
    pub net_before_bonuses: Decimal,
    /// Sum of all bonuses.
    pub total_bonuses: Decimal,
    /// Amount payable to the employee.
    ///
    /// Statutory withholdings are shown on the payslip but not subtracted
    /// here.
    pub net_pay: Decimal,
}

impl PayslipBreakdown {
    /// The statutory amounts of this breakdown in the shape of the form fields.
    pub fn statutory_overrides(&self) -> StatutoryOverrides {
        StatutoryOverrides {
            local_tax: self.local_tax,
            employer_payroll_tax: self.contributions.employer_payroll_tax,
            income_tax: self.income_tax,
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings never change the computed amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// A breakdown together with the context it was computed in.
///
/// This is what the display layer and the HTTP API hand out.
///
/// # Example
///
/// ```
/// use payslip_engine::models::{AuditTrace, PayslipBreakdown, PayslipCalculation};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let calculation = PayslipCalculation {
///     calculation_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     employee_id: "emp_001".to_string(),
///     family_quotient_parts: Decimal::ONE,
///     breakdown: PayslipBreakdown::default(),
///     audit_trace: AuditTrace {
///         steps: vec![],
///         warnings: vec![],
///         duration_us: 0,
///     },
/// };
/// assert_eq!(calculation.breakdown.net_pay, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipCalculation {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The employee the payslip is for.
    pub employee_id: String,
    /// The family quotient the income tax was computed with.
    pub family_quotient_parts: Decimal,
    /// The computed amounts.
    pub breakdown: PayslipBreakdown,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
