//! Flat local tax lookup.

use rust_decimal::Decimal;

use crate::models::AuditStep;

use super::tax_brackets::LocalTaxTable;

/// The result of a local-tax lookup, including the audit step.
#[derive(Debug, Clone)]
pub struct LocalTaxResult {
    /// The flat amount due.
    pub tax: Decimal,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Looks up the flat local tax due on `gross_fiscal`.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::{LocalTaxTable, compute_local_tax};
/// use rust_decimal::Decimal;
///
/// let table = LocalTaxTable::standard();
/// assert_eq!(compute_local_tax(Decimal::from(85_000), &table), Decimal::from(300));
/// assert_eq!(compute_local_tax(Decimal::from(85_001), &table), Decimal::from(400));
/// assert_eq!(compute_local_tax(Decimal::from(1_000_000), &table), Decimal::from(1_500));
/// ```
pub fn compute_local_tax(gross_fiscal: Decimal, table: &LocalTaxTable) -> Decimal {
    table
        .select(gross_fiscal)
        .map(|bracket| bracket.amount)
        .unwrap_or_else(|| table.top_amount())
}

/// Looks up the local tax and records which row applied.
pub fn calculate_local_tax(
    gross_fiscal: Decimal,
    table: &LocalTaxTable,
    step_number: u32,
) -> LocalTaxResult {
    let bracket = table.select(gross_fiscal);
    let tax = bracket
        .map(|bracket| bracket.amount)
        .unwrap_or_else(|| table.top_amount());

    let reasoning = match bracket {
        Some(bracket) => format!(
            "{} {} {}: flat {}",
            gross_fiscal.normalize(),
            if bracket.inclusive { "<=" } else { "<" },
            bracket.ceiling.normalize(),
            tax.normalize()
        ),
        None => format!(
            "{} above every ceiling: flat {}",
            gross_fiscal.normalize(),
            tax.normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "local_tax".to_string(),
        rule_name: "Local Tax".to_string(),
        input: serde_json::json!({
            "gross_fiscal": gross_fiscal.normalize().to_string()
        }),
        output: serde_json::json!({
            "ceiling": bracket.map(|b| b.ceiling.normalize().to_string()),
            "local_tax": tax.normalize().to_string()
        }),
        reasoning,
    };

    LocalTaxResult { tax, audit_step }
}
