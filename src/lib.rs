//! Payslip computation engine.
//!
//! Turns the editable figures of a payslip (remuneration, bonuses, manual
//! deductions and the employee's family quotient) into a full breakdown:
//! social and fiscal gross, retirement and social contributions, employer
//! payroll tax, flat local tax, progressive income tax, and the aggregated
//! totals down to net pay.
//!
//! The computation in [`calculation`] is pure. The [`session`] module wraps it
//! in an editing session that writes the derived taxes back into the inputs
//! after every edit, and [`api`] serves it over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
