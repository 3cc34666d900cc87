//! Write-back of derived tax amounts into the editable inputs.
//!
//! Each input change moves the reconciler from [`ReconcilerState::Idle`] to
//! [`ReconcilerState::Recomputing`] and back. While recomputing it runs the
//! aggregator and compares the result with the breakdown it last wrote back.
//! Only a different breakdown writes the local tax and income tax into the
//! statutory fields, so a pass with no intervening edit writes nothing.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::compute_breakdown;
use crate::config::StatutoryConfig;
use crate::models::{FamilyQuotient, PayPeriodInputs, PayslipBreakdown};

/// Where the reconciler is in its cycle.
///
/// `Recomputing` is held only while [`DerivedStateReconciler::on_input_changed`]
/// runs; callers always observe `Idle` between passes. Both transitions are
/// emitted as `debug!` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilerState {
    /// Waiting for the next input change.
    Idle,
    /// Running the aggregator for the current inputs.
    Recomputing,
}

/// What a reconciliation pass did to the inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The breakdown matched the last one written back; inputs untouched.
    Unchanged,
    /// The statutory fields were overwritten with these amounts.
    WroteBack {
        /// Local tax written into the inputs.
        local_tax: Decimal,
        /// Income tax written into the inputs.
        income_tax: Decimal,
    },
}

/// Keeps the statutory fields of a payslip in step with its other inputs.
///
/// # Example
///
/// ```
/// use payslip_engine::config::StatutoryConfig;
/// use payslip_engine::models::{FamilyQuotient, PayPeriodInputs};
/// use payslip_engine::session::{DerivedStateReconciler, ReconcileOutcome};
/// use rust_decimal::Decimal;
///
/// let config = StatutoryConfig::default();
/// let mut inputs = PayPeriodInputs::default();
/// inputs.remuneration.set_base_salary(Decimal::from(200_000));
///
/// let mut reconciler = DerivedStateReconciler::new();
/// let first = reconciler.on_input_changed(&mut inputs, FamilyQuotient::single(), &config);
/// assert_eq!(
///     first,
///     ReconcileOutcome::WroteBack {
///         local_tax: Decimal::from(500),
///         income_tax: Decimal::from(21_250),
///     }
/// );
///
/// let second = reconciler.on_input_changed(&mut inputs, FamilyQuotient::single(), &config);
/// assert_eq!(second, ReconcileOutcome::Unchanged);
/// ```
#[derive(Debug, Clone)]
pub struct DerivedStateReconciler {
    state: ReconcilerState,
    last_written: Option<PayslipBreakdown>,
}

impl DerivedStateReconciler {
    /// Creates a reconciler that has written nothing yet.
    pub fn new() -> Self {
        Self {
            state: ReconcilerState::Idle,
            last_written: None,
        }
    }

    /// Creates a reconciler that treats `breakdown` as already written back.
    ///
    /// Used when resuming a saved payslip, whose statutory fields must be kept
    /// as stored until an edit changes the breakdown.
    pub fn primed(breakdown: PayslipBreakdown) -> Self {
        Self {
            state: ReconcilerState::Idle,
            last_written: Some(breakdown),
        }
    }

    /// Returns the current state, which is `Idle` outside a pass.
    pub fn state(&self) -> ReconcilerState {
        self.state
    }

    /// Returns the breakdown most recently written back.
    pub fn last_written(&self) -> Option<&PayslipBreakdown> {
        self.last_written.as_ref()
    }

    /// Recomputes the breakdown for `inputs` and writes the derived taxes back
    /// if it differs from the last one written.
    pub fn on_input_changed(
        &mut self,
        inputs: &mut PayPeriodInputs,
        quotient: FamilyQuotient,
        config: &StatutoryConfig,
    ) -> ReconcileOutcome {
        self.transition(ReconcilerState::Recomputing);
        let breakdown = compute_breakdown(inputs, quotient, config);

        let outcome = if self.last_written.as_ref() == Some(&breakdown) {
            debug!(net_pay = %breakdown.net_pay, "Breakdown unchanged, skipping write-back");
            ReconcileOutcome::Unchanged
        } else {
            inputs.statutory_overrides.local_tax = breakdown.local_tax;
            inputs.statutory_overrides.income_tax = breakdown.income_tax;
            debug!(
                local_tax = %breakdown.local_tax,
                income_tax = %breakdown.income_tax,
                "Wrote derived taxes back into inputs"
            );
            let outcome = ReconcileOutcome::WroteBack {
                local_tax: breakdown.local_tax,
                income_tax: breakdown.income_tax,
            };
            self.last_written = Some(breakdown);
            outcome
        };

        self.transition(ReconcilerState::Idle);
        outcome
    }

    fn transition(&mut self, next: ReconcilerState) {
        debug!(from = ?self.state, to = ?next, "Reconciler state changed");
        self.state = next;
    }
}

impl Default for DerivedStateReconciler {
    fn default() -> Self {
        Self::new()
    }
}
