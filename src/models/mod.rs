//! Core data models for the payslip engine.
//!
//! This module contains the employee profile, the editable pay-period
//! inputs, the computed breakdown and the monetary helpers they share.

mod breakdown;
mod employee;
mod inputs;
mod money;
mod pay_period;

pub use breakdown::{
    AuditStep, AuditTrace, AuditWarning, ContributionSet, PayslipBreakdown, PayslipCalculation,
};
pub use employee::{EmployeeProfile, FamilyQuotient};
pub use inputs::{Bonuses, Deductions, PayPeriodInputs, Remuneration, StatutoryOverrides};
pub use money::{
    MAX_AMOUNT, clamp_amount, format_amount, format_currency, lenient_amount, parse_amount,
    round_to_unit,
};
pub use pay_period::{PayPeriod, PeriodKind};
