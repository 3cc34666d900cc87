//! Calculation logic for the payslip engine.
//!
//! This module contains the statutory bracket tables, the contribution
//! calculator, the local and progressive income tax calculations, and the
//! aggregator that assembles a full payslip breakdown.

mod contributions;
mod income_tax;
mod local_tax;
mod payslip;
mod tax_brackets;

pub use contributions::{ContributionResult, calculate_contributions, compute_contributions};
pub use income_tax::{IncomeTaxResult, calculate_income_tax, compute_income_tax};
pub use local_tax::{LocalTaxResult, calculate_local_tax, compute_local_tax};
pub use payslip::{
    DEDUCTIONS_EXCEED_GROSS, PayslipResult, calculate_payslip, compute_breakdown, compute_payslip,
};
pub use tax_brackets::{IncomeTaxBracket, IncomeTaxTable, LocalTaxBracket, LocalTaxTable};
