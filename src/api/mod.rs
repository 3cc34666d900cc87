//! HTTP API module for the payslip engine.
//!
//! This module exposes payslip computation over HTTP so that a client can
//! submit inputs and receive the breakdown with its audit trace.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ComputeRequest, EmployeeRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
