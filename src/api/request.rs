//! Request types for the payslip API.
//!
//! This module defines the JSON request structures for the
//! `/payslips/compute` endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{EmployeeProfile, PayPeriodInputs};

/// Request body for the `/payslips/compute` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeRequest {
    /// The employee the payslip is for.
    pub employee: EmployeeRequest,
    /// The editable payslip inputs. Missing sections default to zero.
    #[serde(default)]
    pub inputs: PayPeriodInputs,
}

/// Employee information in a compute request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub full_name: String,
    /// Household parts for the family quotient.
    #[serde(default = "default_parts")]
    pub family_quotient_parts: Decimal,
}

fn default_parts() -> Decimal {
    Decimal::ONE
}

impl From<EmployeeRequest> for EmployeeProfile {
    fn from(req: EmployeeRequest) -> Self {
        let mut employee = EmployeeProfile::new(req.id);
        employee.full_name = req.full_name;
        employee.family_quotient_parts = req.family_quotient_parts;
        employee
    }
}
