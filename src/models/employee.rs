//! Employee profile and family quotient.
//!
//! The profile is read-only to the engine: it is loaded once per editing
//! session and only used to pre-fill the editable inputs and to supply the
//! family quotient for the income tax.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{Bonuses, Remuneration};

/// The number of household parts fiscal gross pay is divided by before the
/// income-tax bracket lookup.
///
/// A quotient is always at least one part; the type cannot hold anything else.
///
/// # Example
///
/// ```
/// use payslip_engine::models::FamilyQuotient;
/// use rust_decimal::Decimal;
///
/// let quotient = FamilyQuotient::new(Decimal::new(25, 1)).unwrap();
/// assert_eq!(quotient.parts(), Decimal::new(25, 1));
///
/// assert!(FamilyQuotient::new(Decimal::ZERO).is_err());
/// assert_eq!(FamilyQuotient::clamped(Decimal::ZERO), FamilyQuotient::single());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct FamilyQuotient(Decimal);

impl FamilyQuotient {
    /// Validates a quotient, rejecting anything below one part.
    pub fn new(parts: Decimal) -> EngineResult<Self> {
        if parts < Decimal::ONE {
            return Err(EngineError::InvalidQuotient { value: parts });
        }
        Ok(Self(parts))
    }

    /// Builds a quotient, raising anything below one part to exactly one.
    pub fn clamped(parts: Decimal) -> Self {
        Self(parts.max(Decimal::ONE))
    }

    /// A single-part quotient.
    pub fn single() -> Self {
        Self(Decimal::ONE)
    }

    /// Returns the number of parts.
    pub fn parts(&self) -> Decimal {
        self.0
    }
}

impl Default for FamilyQuotient {
    fn default() -> Self {
        Self::single()
    }
}

impl TryFrom<Decimal> for FamilyQuotient {
    type Error = EngineError;

    fn try_from(parts: Decimal) -> EngineResult<Self> {
        Self::new(parts)
    }
}

impl From<FamilyQuotient> for Decimal {
    fn from(quotient: FamilyQuotient) -> Self {
        quotient.0
    }
}

fn default_quotient_parts() -> Decimal {
    Decimal::ONE
}

/// An employee as supplied by the employee directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name, used only by the surrounding application.
    #[serde(default)]
    pub full_name: String,
    /// Household parts for the income-tax family quotient.
    ///
    /// Kept as a raw decimal so that a bad record can still be loaded and
    /// reported; see [`EmployeeProfile::quotient`].
    #[serde(default = "default_quotient_parts")]
    pub family_quotient_parts: Decimal,
    /// Remuneration figures pre-filled into a new payslip.
    #[serde(default)]
    pub default_remuneration: Remuneration,
    /// Bonus figures pre-filled into a new payslip.
    #[serde(default)]
    pub default_bonuses: Bonuses,
}

impl EmployeeProfile {
    /// Creates a profile with a single-part quotient and no default pay.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: String::new(),
            family_quotient_parts: Decimal::ONE,
            default_remuneration: Remuneration::default(),
            default_bonuses: Bonuses::default(),
        }
    }

    /// Returns the validated family quotient.
    pub fn quotient(&self) -> EngineResult<FamilyQuotient> {
        FamilyQuotient::new(self.family_quotient_parts)
    }

    /// Checks the fields the engine relies on before a session opens.
    ///
    /// # Example
    ///
    /// ```
    /// use payslip_engine::models::EmployeeProfile;
    /// use rust_decimal::Decimal;
    ///
    /// let mut employee = EmployeeProfile::new("emp_001");
    /// assert!(employee.validate().is_ok());
    ///
    /// employee.family_quotient_parts = Decimal::ZERO;
    /// assert!(employee.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<FamilyQuotient> {
        if self.id.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "id".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        self.quotient()
    }
}
