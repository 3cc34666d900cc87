//! Editable pay-period inputs.
//!
//! The inputs are a typed record with one substructure per section of the
//! payslip form. Every field has an explicit setter that clamps negative
//! amounts to zero, and every field deserializes leniently (see
//! [`lenient_amount`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::{lenient_amount, clamp_amount};
use super::EmployeeProfile;

/// Contractual remuneration for the period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Remuneration {
    /// Base salary.
    #[serde(deserialize_with = "lenient_amount")]
    pub base_salary: Decimal,
    /// Above-scale supplement paid on top of the base salary.
    #[serde(deserialize_with = "lenient_amount")]
    pub above_scale_supplement: Decimal,
    /// Displacement allowance.
    #[serde(deserialize_with = "lenient_amount")]
    pub displacement_allowance: Decimal,
    /// Any other allowance subject to contributions.
    #[serde(deserialize_with = "lenient_amount")]
    pub other_allowances: Decimal,
    /// Non-cash benefits. Taxable, but outside the social gross.
    #[serde(deserialize_with = "lenient_amount")]
    pub benefits_in_kind: Decimal,
}

impl Remuneration {
    /// Sets the base salary.
    pub fn set_base_salary(&mut self, amount: Decimal) {
        self.base_salary = clamp_amount(amount);
    }

    /// Sets the above-scale supplement.
    pub fn set_above_scale_supplement(&mut self, amount: Decimal) {
        self.above_scale_supplement = clamp_amount(amount);
    }

    /// Sets the displacement allowance.
    pub fn set_displacement_allowance(&mut self, amount: Decimal) {
        self.displacement_allowance = clamp_amount(amount);
    }

    /// Sets the other allowances.
    pub fn set_other_allowances(&mut self, amount: Decimal) {
        self.other_allowances = clamp_amount(amount);
    }

    /// Sets the benefits in kind.
    pub fn set_benefits_in_kind(&mut self, amount: Decimal) {
        self.benefits_in_kind = clamp_amount(amount);
    }

    /// Sum of every remuneration item except benefits in kind.
    pub fn gross_social(&self) -> Decimal {
        [
            self.base_salary,
            self.above_scale_supplement,
            self.displacement_allowance,
            self.other_allowances,
        ]
        .into_iter()
        .map(clamp_amount)
        .sum()
    }

    /// Social gross plus benefits in kind.
    pub fn gross_fiscal(&self) -> Decimal {
        self.gross_social() + clamp_amount(self.benefits_in_kind)
    }
}

/// Bonuses added after the net remuneration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bonuses {
    /// Transport bonus.
    #[serde(deserialize_with = "lenient_amount")]
    pub transport: Decimal,
    /// Meal bonus.
    #[serde(deserialize_with = "lenient_amount")]
    pub meal: Decimal,
    /// Seniority bonus.
    #[serde(deserialize_with = "lenient_amount")]
    pub seniority: Decimal,
    /// Responsibility bonus.
    #[serde(deserialize_with = "lenient_amount")]
    pub responsibility: Decimal,
    /// Any other bonus.
    #[serde(deserialize_with = "lenient_amount")]
    pub other: Decimal,
}

impl Bonuses {
    /// Sets the transport bonus.
    pub fn set_transport(&mut self, amount: Decimal) {
        self.transport = clamp_amount(amount);
    }

    /// Sets the meal bonus.
    pub fn set_meal(&mut self, amount: Decimal) {
        self.meal = clamp_amount(amount);
    }

    /// Sets the seniority bonus.
    pub fn set_seniority(&mut self, amount: Decimal) {
        self.seniority = clamp_amount(amount);
    }

    /// Sets the responsibility bonus.
    pub fn set_responsibility(&mut self, amount: Decimal) {
        self.responsibility = clamp_amount(amount);
    }

    /// Sets the other bonus.
    pub fn set_other(&mut self, amount: Decimal) {
        self.other = clamp_amount(amount);
    }

    /// Sum of all bonuses.
    pub fn total(&self) -> Decimal {
        [
            self.transport,
            self.meal,
            self.seniority,
            self.responsibility,
            self.other,
        ]
        .into_iter()
        .map(clamp_amount)
        .sum()
    }
}

/// Manual, non-statutory deductions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deductions {
    /// Recovery of a salary advance.
    #[serde(deserialize_with = "lenient_amount")]
    pub salary_advance_recovery: Decimal,
    /// Employee share of the mutual insurance. The employer pays the same amount.
    #[serde(deserialize_with = "lenient_amount")]
    pub mutual_insurance: Decimal,
    /// Cash advances paid during the period.
    #[serde(deserialize_with = "lenient_amount")]
    pub cash_advances: Decimal,
}

impl Deductions {
    /// Sets the salary advance recovery.
    pub fn set_salary_advance_recovery(&mut self, amount: Decimal) {
        self.salary_advance_recovery = clamp_amount(amount);
    }

    /// Sets the employee share of the mutual insurance.
    pub fn set_mutual_insurance(&mut self, amount: Decimal) {
        self.mutual_insurance = clamp_amount(amount);
    }

    /// Sets the cash advances.
    pub fn set_cash_advances(&mut self, amount: Decimal) {
        self.cash_advances = clamp_amount(amount);
    }

    /// Sum of all manual deductions.
    pub fn total(&self) -> Decimal {
        [
            self.salary_advance_recovery,
            self.mutual_insurance,
            self.cash_advances,
        ]
        .into_iter()
        .map(clamp_amount)
        .sum()
    }
}

/// Statutory amounts shown on the form.
///
/// Normally written by the reconciler after each recomputation; the user may
/// edit them, in which case the edit holds until the next recomputation that
/// produces a different breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatutoryOverrides {
    /// Local tax amount.
    #[serde(deserialize_with = "lenient_amount")]
    pub local_tax: Decimal,
    /// Employer payroll tax amount.
    #[serde(deserialize_with = "lenient_amount")]
    pub employer_payroll_tax: Decimal,
    /// Income tax amount.
    #[serde(deserialize_with = "lenient_amount")]
    pub income_tax: Decimal,
}

impl StatutoryOverrides {
    /// Sets the local tax.
    pub fn set_local_tax(&mut self, amount: Decimal) {
        self.local_tax = clamp_amount(amount);
    }

    /// Sets the employer payroll tax.
    pub fn set_employer_payroll_tax(&mut self, amount: Decimal) {
        self.employer_payroll_tax = clamp_amount(amount);
    }

    /// Sets the income tax.
    pub fn set_income_tax(&mut self, amount: Decimal) {
        self.income_tax = clamp_amount(amount);
    }
}

/// Everything the user can edit on a payslip for one pay period.
///
/// # Example
///
/// ```
/// use payslip_engine::models::{EmployeeProfile, PayPeriodInputs};
/// use rust_decimal::Decimal;
///
/// let mut employee = EmployeeProfile::new("emp_001");
/// employee.default_remuneration.set_base_salary(Decimal::new(200_000, 0));
///
/// let mut inputs = PayPeriodInputs::from_profile(&employee);
/// inputs.remuneration.set_benefits_in_kind(Decimal::new(10_000, 0));
///
/// assert_eq!(inputs.remuneration.gross_social(), Decimal::new(200_000, 0));
/// assert_eq!(inputs.remuneration.gross_fiscal(), Decimal::new(210_000, 0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayPeriodInputs {
    /// Contractual remuneration.
    pub remuneration: Remuneration,
    /// Bonuses.
    pub bonuses: Bonuses,
    /// Manual deductions.
    pub deductions: Deductions,
    /// Statutory amounts displayed on the form.
    pub statutory_overrides: StatutoryOverrides,
}

impl PayPeriodInputs {
    /// Starts a new payslip from the employee's default figures.
    ///
    /// Deductions and statutory amounts start at zero.
    pub fn from_profile(employee: &EmployeeProfile) -> Self {
        Self {
            remuneration: employee.default_remuneration.clone(),
            bonuses: employee.default_bonuses.clone(),
            deductions: Deductions::default(),
            statutory_overrides: StatutoryOverrides::default(),
        }
    }
}
