//! Configuration types for the statutory schedule.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML files of a schedule directory, and the assembled [`StatutoryConfig`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{IncomeTaxBracket, IncomeTaxTable, LocalTaxBracket, LocalTaxTable};

/// Metadata about the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    /// Short code identifying the schedule.
    pub code: String,
    /// The human-readable name of the schedule.
    pub name: String,
    /// The version or effective date of the schedule.
    pub version: String,
    /// Currency label appended to formatted amounts.
    pub currency: String,
}

impl Default for ScheduleMetadata {
    fn default() -> Self {
        Self {
            code: "STANDARD".to_string(),
            name: "Standard payroll schedule".to_string(),
            version: "builtin".to_string(),
            currency: "FCFA".to_string(),
        }
    }
}

/// Contribution rates, as fractions, and the fixed base of the capped
/// employer contributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRates {
    /// Employee general retirement, on the social gross.
    pub employee_retirement_general: Decimal,
    /// Employee cadre retirement, on the social gross.
    pub employee_retirement_cadre: Decimal,
    /// Employer general retirement, on the social gross.
    pub employer_retirement_general: Decimal,
    /// Employer cadre retirement, on the social gross.
    pub employer_retirement_cadre: Decimal,
    /// Employer payroll tax, on the fiscal gross.
    pub employer_payroll_tax: Decimal,
    /// Employer family allowance, on `capped_base`.
    pub family_allowance: Decimal,
    /// Employer work accident, on `capped_base`.
    pub work_accident: Decimal,
    /// Fixed base for the family-allowance and work-accident lines.
    ///
    /// Applied as is, whatever the employee's gross.
    pub capped_base: Decimal,
}

/// The fixed base of the family-allowance and work-accident contributions.
pub fn standard_capped_base() -> Decimal {
    Decimal::from(70_000)
}

impl Default for ContributionRates {
    fn default() -> Self {
        Self {
            employee_retirement_general: Decimal::new(56, 3),
            employee_retirement_cadre: Decimal::ZERO,
            employer_retirement_general: Decimal::new(84, 3),
            employer_retirement_cadre: Decimal::ZERO,
            employer_payroll_tax: Decimal::new(3, 2),
            family_allowance: Decimal::new(7, 2),
            work_accident: Decimal::new(1, 2),
            capped_base: standard_capped_base(),
        }
    }
}

impl ContributionRates {
    /// Named rates, for validation and audit output.
    pub fn named_rates(&self) -> [(&'static str, Decimal); 7] {
        [
            ("employee_retirement_general", self.employee_retirement_general),
            ("employee_retirement_cadre", self.employee_retirement_cadre),
            ("employer_retirement_general", self.employer_retirement_general),
            ("employer_retirement_cadre", self.employer_retirement_cadre),
            ("employer_payroll_tax", self.employer_payroll_tax),
            ("family_allowance", self.family_allowance),
            ("work_accident", self.work_accident),
        ]
    }
}

/// Structure of `schedule.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleFile {
    /// Schedule metadata, flattened at the top level of the file.
    #[serde(flatten)]
    pub metadata: ScheduleMetadata,
    /// Contribution rates.
    pub contributions: ContributionRates,
}

/// Structure of `income_tax.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomeTaxFile {
    /// Progressive brackets, in any order.
    pub brackets: Vec<IncomeTaxBracket>,
}

/// Structure of `local_tax.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalTaxFile {
    /// Flat brackets, in any order.
    pub brackets: Vec<LocalTaxBracket>,
    /// Amount due above every ceiling.
    pub top_amount: Decimal,
}

/// The complete statutory schedule used by the calculation layer.
///
/// `StatutoryConfig::default()` is the built-in standard schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatutoryConfig {
    metadata: ScheduleMetadata,
    contributions: ContributionRates,
    income_tax: IncomeTaxTable,
    local_tax: LocalTaxTable,
}

impl StatutoryConfig {
    /// Creates a new StatutoryConfig from its component parts.
    pub fn new(
        metadata: ScheduleMetadata,
        contributions: ContributionRates,
        income_tax: IncomeTaxTable,
        local_tax: LocalTaxTable,
    ) -> Self {
        Self {
            metadata,
            contributions,
            income_tax,
            local_tax,
        }
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    /// Returns the contribution rates.
    pub fn contributions(&self) -> &ContributionRates {
        &self.contributions
    }

    /// Returns the progressive income-tax table.
    pub fn income_tax(&self) -> &IncomeTaxTable {
        &self.income_tax
    }

    /// Returns the flat local-tax table.
    pub fn local_tax(&self) -> &LocalTaxTable {
        &self.local_tax
    }
}
