//! Payslip editing sessions.
//!
//! A [`PayslipEditor`] owns the inputs of one payslip. It loads the employee
//! once from an [`EmployeeDirectory`], keeps the statutory fields in step
//! through the [`DerivedStateReconciler`] on every edit, and hands the
//! finished payslip to a [`PayslipStore`] on save.

mod directory;
mod editor;
mod reconciler;
mod store;

pub use directory::{EmployeeDirectory, InMemoryEmployeeDirectory};
pub use editor::PayslipEditor;
pub use reconciler::{DerivedStateReconciler, ReconcileOutcome, ReconcilerState};
pub use store::{InMemoryPayslipStore, PayslipDraft, PayslipRecord, PayslipStore};
