//! A payslip editing session for one employee and one pay period.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::calculation::calculate_payslip;
use crate::config::StatutoryConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    EmployeeProfile, FamilyQuotient, PayPeriod, PayPeriodInputs, PayslipBreakdown,
    PayslipCalculation, StatutoryOverrides,
};

use super::directory::EmployeeDirectory;
use super::reconciler::{DerivedStateReconciler, ReconcileOutcome};
use super::store::{PayslipDraft, PayslipRecord, PayslipStore};

/// Owns the editable inputs of a payslip and keeps its breakdown current.
///
/// Every edit made through [`PayslipEditor::update`] or
/// [`PayslipEditor::set_family_quotient`] runs the reconciler before
/// returning, so [`PayslipEditor::breakdown`] always reflects the latest
/// inputs.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use payslip_engine::config::StatutoryConfig;
/// use payslip_engine::models::EmployeeProfile;
/// use payslip_engine::session::PayslipEditor;
/// use rust_decimal::Decimal;
///
/// let mut employee = EmployeeProfile::new("emp_001");
/// employee.default_remuneration.set_base_salary(Decimal::from(200_000));
///
/// let mut editor = PayslipEditor::new_payslip(employee, Arc::new(StatutoryConfig::default())).unwrap();
/// assert_eq!(editor.inputs().statutory_overrides.income_tax, Decimal::from(21_250));
///
/// editor.update(|inputs| inputs.bonuses.set_transport(Decimal::from(25_000)));
/// assert_eq!(editor.breakdown().net_pay, Decimal::from(225_000));
/// ```
#[derive(Debug, Clone)]
pub struct PayslipEditor {
    employee: EmployeeProfile,
    quotient: FamilyQuotient,
    inputs: PayPeriodInputs,
    breakdown: PayslipBreakdown,
    reconciler: DerivedStateReconciler,
    config: Arc<StatutoryConfig>,
    record_number: Option<u64>,
}

impl PayslipEditor {
    /// Looks up an employee and starts a new payslip from their defaults.
    pub fn open<D: EmployeeDirectory + ?Sized>(
        directory: &D,
        employee_id: &str,
        config: Arc<StatutoryConfig>,
    ) -> EngineResult<Self> {
        let employee = directory.find(employee_id)?;
        Self::new_payslip(employee, config)
    }

    /// Starts a new payslip from the employee's default figures.
    ///
    /// The breakdown is computed immediately and its taxes written into the
    /// statutory fields.
    pub fn new_payslip(employee: EmployeeProfile, config: Arc<StatutoryConfig>) -> EngineResult<Self> {
        let quotient = employee.validate()?;
        let inputs = PayPeriodInputs::from_profile(&employee);

        let mut editor = Self {
            employee,
            quotient,
            inputs,
            breakdown: PayslipBreakdown::default(),
            reconciler: DerivedStateReconciler::new(),
            config,
            record_number: None,
        };
        editor.reconcile();

        info!(
            employee_id = %editor.employee.id,
            quotient = %editor.quotient.parts(),
            "Opened new payslip"
        );
        Ok(editor)
    }

    /// Reopens a stored payslip.
    ///
    /// The stored inputs, statutory fields included, are restored verbatim.
    /// They are only overwritten once an edit changes the breakdown. Saving
    /// a resumed payslip updates the stored record under its number.
    ///
    /// Fails with [`EngineError::InvalidEmployee`] when the record belongs
    /// to another employee.
    pub fn resume(
        employee: EmployeeProfile,
        record: PayslipRecord,
        config: Arc<StatutoryConfig>,
    ) -> EngineResult<Self> {
        employee.validate()?;
        if record.employee_id != employee.id {
            return Err(EngineError::InvalidEmployee {
                field: "id".to_string(),
                message: format!("payslip belongs to employee {}", record.employee_id),
            });
        }
        let quotient = FamilyQuotient::new(record.family_quotient_parts)?;

        info!(
            employee_id = %employee.id,
            number = record.number,
            "Resumed stored payslip"
        );

        Ok(Self {
            employee,
            quotient,
            inputs: record.inputs,
            breakdown: record.breakdown.clone(),
            reconciler: DerivedStateReconciler::primed(record.breakdown),
            config,
            record_number: Some(record.number),
        })
    }

    /// Applies an edit to the inputs and reconciles.
    pub fn update<F>(&mut self, edit: F) -> ReconcileOutcome
    where
        F: FnOnce(&mut PayPeriodInputs),
    {
        edit(&mut self.inputs);
        self.reconcile()
    }

    /// Edits the statutory fields by hand without recomputing.
    ///
    /// The edit holds until a later change produces a different breakdown.
    pub fn override_statutory<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut StatutoryOverrides),
    {
        edit(&mut self.inputs.statutory_overrides);
        debug!(employee_id = %self.employee.id, "Statutory fields overridden");
    }

    /// Changes the family quotient for this payslip and reconciles.
    pub fn set_family_quotient(&mut self, parts: Decimal) -> EngineResult<ReconcileOutcome> {
        self.quotient = FamilyQuotient::new(parts)?;
        Ok(self.reconcile())
    }

    /// The employee this payslip is for.
    pub fn employee(&self) -> &EmployeeProfile {
        &self.employee
    }

    /// The family quotient in use.
    pub fn quotient(&self) -> FamilyQuotient {
        self.quotient
    }

    /// The current inputs.
    pub fn inputs(&self) -> &PayPeriodInputs {
        &self.inputs
    }

    /// The breakdown for the current inputs.
    pub fn breakdown(&self) -> &PayslipBreakdown {
        &self.breakdown
    }

    /// Recomputes the payslip with a full audit trace.
    pub fn calculation(&self) -> PayslipCalculation {
        calculate_payslip(&self.employee.id, &self.inputs, self.quotient, &self.config)
    }

    /// Number of the stored record this session edits, once saved or resumed.
    pub fn record_number(&self) -> Option<u64> {
        self.record_number
    }

    /// Stores the payslip and returns the numbered record.
    ///
    /// The first save of a new payslip takes the next number. Later saves,
    /// and saves of a resumed payslip, update that record in place.
    pub fn save<S: PayslipStore + ?Sized>(
        &mut self,
        store: &mut S,
        tenant_id: &str,
        period: PayPeriod,
    ) -> EngineResult<PayslipRecord> {
        let record = store.save(PayslipDraft {
            number: self.record_number,
            tenant_id: tenant_id.to_string(),
            employee_id: self.employee.id.clone(),
            period,
            family_quotient_parts: self.quotient.parts(),
            inputs: self.inputs.clone(),
            breakdown: self.breakdown.clone(),
        })?;
        self.record_number = Some(record.number);
        Ok(record)
    }

    fn reconcile(&mut self) -> ReconcileOutcome {
        let outcome = self
            .reconciler
            .on_input_changed(&mut self.inputs, self.quotient, &self.config);
        if let (ReconcileOutcome::WroteBack { .. }, Some(written)) =
            (&outcome, self.reconciler.last_written())
        {
            self.breakdown = written.clone();
        }
        outcome
    }
}
