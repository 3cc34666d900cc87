//! Progressive income tax with family quotient.
//!
//! Fiscal gross is divided by the family quotient, the per-part income is
//! taxed against the bracket table, and the per-part tax is multiplied back
//! by the quotient and rounded to a whole currency unit.

use rust_decimal::Decimal;

use crate::models::{AuditStep, FamilyQuotient, round_to_unit};

use super::tax_brackets::{IncomeTaxBracket, IncomeTaxTable};

/// The result of an income-tax calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// The income tax due, in whole units.
    pub tax: Decimal,
    /// Fiscal gross divided by the family quotient.
    pub per_part_income: Decimal,
    /// Tax on one part, before multiplying back and rounding.
    pub tax_per_part: Decimal,
    /// The bracket applied, or `None` when income is below every bracket.
    pub bracket: Option<IncomeTaxBracket>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the income tax due on `gross_fiscal`.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::{IncomeTaxTable, compute_income_tax};
/// use payslip_engine::models::FamilyQuotient;
/// use rust_decimal::Decimal;
///
/// let table = IncomeTaxTable::standard();
/// let single = FamilyQuotient::single();
/// let couple = FamilyQuotient::new(Decimal::from(2)).unwrap();
///
/// assert_eq!(compute_income_tax(Decimal::from(200_000), single, &table), Decimal::from(21_250));
/// assert_eq!(compute_income_tax(Decimal::from(200_000), couple, &table), Decimal::from(8_000));
/// ```
pub fn compute_income_tax(
    gross_fiscal: Decimal,
    quotient: FamilyQuotient,
    table: &IncomeTaxTable,
) -> Decimal {
    let (_, tax_per_part, _) = per_part_tax(gross_fiscal, quotient, table);
    round_to_unit(tax_per_part * quotient.parts())
}

fn per_part_tax(
    gross_fiscal: Decimal,
    quotient: FamilyQuotient,
    table: &IncomeTaxTable,
) -> (Decimal, Decimal, Option<&IncomeTaxBracket>) {
    let per_part_income = gross_fiscal / quotient.parts();
    let bracket = table.select(per_part_income);

    let tax_per_part = match bracket {
        Some(bracket) => (per_part_income * bracket.rate - bracket.deduction).max(Decimal::ZERO),
        None => Decimal::ZERO,
    };

    (per_part_income, tax_per_part, bracket)
}

/// Computes the income tax and records how it was derived.
///
/// # Arguments
///
/// * `gross_fiscal` - Social gross plus benefits in kind
/// * `quotient` - The employee's family quotient
/// * `table` - The progressive bracket table
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_income_tax(
    gross_fiscal: Decimal,
    quotient: FamilyQuotient,
    table: &IncomeTaxTable,
    step_number: u32,
) -> IncomeTaxResult {
    let (per_part_income, tax_per_part, bracket) = per_part_tax(gross_fiscal, quotient, table);
    let tax = round_to_unit(tax_per_part * quotient.parts());

    let reasoning = match bracket {
        Some(bracket) => format!(
            "{} / {} parts = {} per part; bracket > {}: {} x {} - {} = {} per part; x {} parts = {}",
            gross_fiscal.normalize(),
            quotient.parts().normalize(),
            per_part_income.normalize(),
            bracket.lower_bound.normalize(),
            per_part_income.normalize(),
            bracket.rate.normalize(),
            bracket.deduction.normalize(),
            tax_per_part.normalize(),
            quotient.parts().normalize(),
            tax.normalize()
        ),
        None => format!(
            "{} / {} parts = {} per part; below every bracket, no income tax",
            gross_fiscal.normalize(),
            quotient.parts().normalize(),
            per_part_income.normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Progressive Income Tax".to_string(),
        input: serde_json::json!({
            "gross_fiscal": gross_fiscal.normalize().to_string(),
            "family_quotient_parts": quotient.parts().normalize().to_string()
        }),
        output: serde_json::json!({
            "per_part_income": per_part_income.normalize().to_string(),
            "bracket_lower_bound": bracket.map(|b| b.lower_bound.normalize().to_string()),
            "rate": bracket.map(|b| b.rate.normalize().to_string()),
            "deduction": bracket.map(|b| b.deduction.normalize().to_string()),
            "tax_per_part": tax_per_part.normalize().to_string(),
            "income_tax": tax.normalize().to_string()
        }),
        reasoning,
    };

    IncomeTaxResult {
        tax,
        per_part_income,
        tax_per_part,
        bracket: bracket.cloned(),
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn parts(s: &str) -> FamilyQuotient {
        FamilyQuotient::new(dec(s)).unwrap()
    }

    fn tax(gross: &str, quotient: &str) -> Decimal {
        compute_income_tax(dec(gross), parts(quotient), &IncomeTaxTable::standard())
    }

    #[test]
    fn test_single_part_200000_uses_25_percent_bracket() {
        let result = calculate_income_tax(
            dec("200000"),
            FamilyQuotient::single(),
            &IncomeTaxTable::standard(),
            1,
        );

        assert_eq!(result.tax, dec("21250"));
        assert_eq!(result.per_part_income, dec("200000"));
        let bracket = result.bracket.unwrap();
        assert_eq!(bracket.lower_bound, dec("150000"));
        assert_eq!(bracket.rate, dec("0.25"));
        assert_eq!(bracket.deduction, dec("28750"));
    }

    #[test]
    fn test_two_parts_halves_income_before_lookup() {
        let result = calculate_income_tax(
            dec("200000"),
            parts("2"),
            &IncomeTaxTable::standard(),
            1,
        );

        assert_eq!(result.per_part_income, dec("100000"));
        assert_eq!(result.bracket.unwrap().lower_bound, dec("80000"));
        assert_eq!(result.tax_per_part, dec("4000"));
        assert_eq!(result.tax, dec("8000"));
    }

    #[test]
    fn test_income_at_lowest_bound_is_untaxed() {
        assert_eq!(tax("50000", "1"), Decimal::ZERO);
        assert_eq!(tax("0", "1"), Decimal::ZERO);
    }

    #[test]
    fn test_every_bracket_on_a_single_part() {
        // (gross, expected): one value inside each bracket
        let cases = [
            ("55000", "250"),       // 5%:  2750 - 2500
            ("70000", "1000"),      // 10%: 7000 - 6000
            ("100000", "4000"),     // 15%: 15000 - 11000
            ("120000", "5250"),     // 20%: 24000 - 18750
            ("160000", "11250"),    // 25%: 40000 - 28750
            ("250000", "26250"),    // 30%: 75000 - 48750
            ("350000", "43750"),    // 35%: 122500 - 78750
            ("450000", "68750"),    // 35%: 157500 - 88750
            ("1000000", "281250"),  // 40%: 400000 - 118750
        ];
        for (gross, expected) in cases {
            assert_eq!(tax(gross, "1"), dec(expected), "gross {}", gross);
        }
    }

    #[test]
    fn test_tax_drops_when_crossing_a_bracket_boundary() {
        // The deductions are larger than bound x rate step, so the first unit
        // above each bound is taxed less than the bound itself.
        assert_eq!(tax("60000", "1"), dec("500"));
        assert_eq!(tax("60001", "1"), Decimal::ZERO);
        assert_eq!(tax("150000", "1"), dec("11250"));
        assert_eq!(tax("150001", "1"), dec("8750"));
    }

    #[test]
    fn test_fractional_quotient_rounds_to_whole_units() {
        // 250000 / 3 = 83333.33.. per part, 15% bracket:
        // 12500 - 11000 = 1500 per part, x 3 = 4500
        assert_eq!(tax("250000", "3"), dec("4500"));
        // 175000 / 1.5 = 116666.66.. per part, 20% bracket:
        // 23333.33.. - 18750 = 4583.33.. per part, x 1.5 = 6875
        assert_eq!(tax("175000", "1.5"), dec("6875"));
    }

    #[test]
    fn test_rounding_to_nearest_unit() {
        // 50001 -> 5%: 2500.05 - 2500 = 0.05 -> rounds to 0
        assert_eq!(tax("50001", "1"), Decimal::ZERO);
        // 50010 -> 2500.5 - 2500 = 0.5 -> rounds half away from zero to 1
        assert_eq!(tax("50010", "1"), Decimal::ONE);
    }

    #[test]
    fn test_audit_step_records_bracket() {
        let result = calculate_income_tax(
            dec("200000"),
            FamilyQuotient::single(),
            &IncomeTaxTable::standard(),
            4,
        );

        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.rule_id, "income_tax");
        assert_eq!(
            result.audit_step.output["bracket_lower_bound"].as_str().unwrap(),
            "150000"
        );
        assert_eq!(
            result.audit_step.output["income_tax"].as_str().unwrap(),
            "21250"
        );
        assert!(result.audit_step.reasoning.contains("bracket > 150000"));
    }

    #[test]
    fn test_audit_step_without_bracket() {
        let result = calculate_income_tax(
            dec("40000"),
            FamilyQuotient::single(),
            &IncomeTaxTable::standard(),
            1,
        );

        assert!(result.bracket.is_none());
        assert!(result.audit_step.output["bracket_lower_bound"].is_null());
        assert!(result.audit_step.reasoning.contains("no income tax"));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_tax_is_never_negative(gross in 0u64..5_000_000, quotient_tenths in 10u32..80) {
            let quotient = FamilyQuotient::new(Decimal::new(quotient_tenths as i64, 1)).unwrap();
            let tax = compute_income_tax(Decimal::from(gross), quotient, &IncomeTaxTable::standard());
            prop_assert!(tax >= Decimal::ZERO);
        }

        #[test]
        fn prop_tax_is_non_decreasing_within_a_bracket(a in 0u64..2_000_000, b in 0u64..2_000_000) {
            let table = IncomeTaxTable::standard();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let low = Decimal::from(low);
            let high = Decimal::from(high);

            let same_bracket = table.select(low).map(|b| b.lower_bound)
                == table.select(high).map(|b| b.lower_bound);
            prop_assume!(same_bracket);

            let single = FamilyQuotient::single();
            prop_assert!(
                compute_income_tax(low, single, &table) <= compute_income_tax(high, single, &table)
            );
        }

        #[test]
        fn prop_summary_and_audited_paths_agree(gross in 0u64..3_000_000, quotient in 1u32..6) {
            let table = IncomeTaxTable::standard();
            let quotient = FamilyQuotient::new(Decimal::from(quotient)).unwrap();
            let gross = Decimal::from(gross);

            prop_assert_eq!(
                compute_income_tax(gross, quotient, &table),
                calculate_income_tax(gross, quotient, &table, 1).tax
            );
        }
    }
}
