//! Error types for the payslip engine.
//!
//! The computation path itself never fails: malformed amounts are coerced to
//! zero before they reach it. These errors cover the edges around it, such as
//! loading the statutory schedule, validating the family quotient, looking up
//! employees and persisting payslips.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the payslip engine.
///
/// # Example
///
/// ```
/// use payslip_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/schedule.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/schedule.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the offending value.
        message: String,
    },

    /// A family quotient below one part was supplied.
    #[error("Invalid family quotient {value}: must be at least 1")]
    InvalidQuotient {
        /// The rejected quotient.
        value: Decimal,
    },

    /// No employee with the given identifier exists in the directory.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The payslip store refused or failed to persist a record.
    #[error("Persistence error: {message}")]
    PersistenceError {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
