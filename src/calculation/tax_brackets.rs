//! Income-tax and local-tax bracket tables.
//!
//! The standard tables are built into the crate; a configuration directory
//! can replace them (see [`crate::config::ConfigLoader`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the progressive income-tax schedule.
///
/// Applies to per-part income strictly above `lower_bound`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxBracket {
    /// Exclusive lower bound of per-part income.
    pub lower_bound: Decimal,
    /// Marginal rate, as a fraction (0.25 for 25%).
    pub rate: Decimal,
    /// Fixed amount subtracted after applying the rate.
    pub deduction: Decimal,
}

impl IncomeTaxBracket {
    fn new(lower_bound: i64, rate_percent: i64, deduction: i64) -> Self {
        Self {
            lower_bound: Decimal::from(lower_bound),
            rate: Decimal::new(rate_percent, 2),
            deduction: Decimal::from(deduction),
        }
    }
}

/// The progressive income-tax schedule, highest lower bound first.
///
/// Income at or below the lowest bound falls outside every bracket and is
/// taxed at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeTaxTable {
    brackets: Vec<IncomeTaxBracket>,
}

impl IncomeTaxTable {
    /// Builds a table, ordering the brackets by descending lower bound.
    pub fn new(mut brackets: Vec<IncomeTaxBracket>) -> Self {
        brackets.sort_by(|a, b| b.lower_bound.cmp(&a.lower_bound));
        Self { brackets }
    }

    /// The standard schedule.
    ///
    /// The 300 000 and 400 000 rows share a 35% rate with different
    /// deductions; both are kept as published.
    pub fn standard() -> Self {
        Self::new(vec![
            IncomeTaxBracket::new(500_000, 40, 118_750),
            IncomeTaxBracket::new(400_000, 35, 88_750),
            IncomeTaxBracket::new(300_000, 35, 78_750),
            IncomeTaxBracket::new(200_000, 30, 48_750),
            IncomeTaxBracket::new(150_000, 25, 28_750),
            IncomeTaxBracket::new(110_000, 20, 18_750),
            IncomeTaxBracket::new(80_000, 15, 11_000),
            IncomeTaxBracket::new(60_000, 10, 6_000),
            IncomeTaxBracket::new(50_000, 5, 2_500),
        ])
    }

    /// Returns the brackets, highest lower bound first.
    pub fn brackets(&self) -> &[IncomeTaxBracket] {
        &self.brackets
    }

    /// Selects the first bracket whose lower bound `per_part_income` exceeds.
    ///
    /// # Example
    ///
    /// ```
    /// use payslip_engine::calculation::IncomeTaxTable;
    /// use rust_decimal::Decimal;
    ///
    /// let table = IncomeTaxTable::standard();
    /// let bracket = table.select(Decimal::from(200_000)).unwrap();
    /// assert_eq!(bracket.lower_bound, Decimal::from(150_000));
    /// assert!(table.select(Decimal::from(50_000)).is_none());
    /// ```
    pub fn select(&self, per_part_income: Decimal) -> Option<&IncomeTaxBracket> {
        self.brackets
            .iter()
            .find(|bracket| per_part_income > bracket.lower_bound)
    }
}

impl Default for IncomeTaxTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// One row of the flat local-tax table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalTaxBracket {
    /// Upper bound of fiscal gross for this row.
    pub ceiling: Decimal,
    /// Whether income equal to the ceiling belongs to this row.
    pub inclusive: bool,
    /// Flat amount due.
    pub amount: Decimal,
}

impl LocalTaxBracket {
    fn new(ceiling: i64, inclusive: bool, amount: i64) -> Self {
        Self {
            ceiling: Decimal::from(ceiling),
            inclusive,
            amount: Decimal::from(amount),
        }
    }

    /// Returns true if `gross_fiscal` falls under this row's ceiling.
    pub fn covers(&self, gross_fiscal: Decimal) -> bool {
        if self.inclusive {
            gross_fiscal <= self.ceiling
        } else {
            gross_fiscal < self.ceiling
        }
    }
}

/// The flat local-tax table, lowest ceiling first, plus the amount due above
/// every ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalTaxTable {
    brackets: Vec<LocalTaxBracket>,
    top_amount: Decimal,
}

impl LocalTaxTable {
    /// Builds a table, ordering the rows by ascending ceiling.
    pub fn new(mut brackets: Vec<LocalTaxBracket>, top_amount: Decimal) -> Self {
        brackets.sort_by(|a, b| a.ceiling.cmp(&b.ceiling));
        Self {
            brackets,
            top_amount,
        }
    }

    /// The standard table: `<= 85 000 -> 300`, `<= 133 000 -> 400`,
    /// `< 1 000 000 -> 500`, otherwise `1 500`.
    pub fn standard() -> Self {
        Self::new(
            vec![
                LocalTaxBracket::new(85_000, true, 300),
                LocalTaxBracket::new(133_000, true, 400),
                LocalTaxBracket::new(1_000_000, false, 500),
            ],
            Decimal::from(1_500),
        )
    }

    /// Returns the rows, lowest ceiling first.
    pub fn brackets(&self) -> &[LocalTaxBracket] {
        &self.brackets
    }

    /// Returns the amount due above every ceiling.
    pub fn top_amount(&self) -> Decimal {
        self.top_amount
    }

    /// Selects the first row covering `gross_fiscal`, if any.
    pub fn select(&self, gross_fiscal: Decimal) -> Option<&LocalTaxBracket> {
        self.brackets
            .iter()
            .find(|bracket| bracket.covers(gross_fiscal))
    }
}

impl Default for LocalTaxTable {
    fn default() -> Self {
        Self::standard()
    }
}
