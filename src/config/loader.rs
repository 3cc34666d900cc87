//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a statutory
//! schedule from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::calculation::{IncomeTaxTable, LocalTaxTable};
use crate::error::{EngineError, EngineResult};
use crate::models::MAX_AMOUNT;

use super::types::{IncomeTaxFile, LocalTaxFile, ScheduleFile, StatutoryConfig};

/// Loads and validates a statutory schedule.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── schedule.yaml     # Metadata and contribution rates
/// ├── income_tax.yaml   # Progressive income-tax brackets
/// └── local_tax.yaml    # Flat local-tax brackets
/// ```
///
/// # Example
///
/// ```no_run
/// use payslip_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Loaded schedule: {}", loader.config().metadata().name);
/// # Ok::<(), payslip_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: StatutoryConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing, is not valid YAML, or holds
    /// values the engine cannot use (rates outside `[0, 1]`, bounds or amounts
    /// that are negative or above `MAX_AMOUNT`, an empty local-tax table).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let schedule = Self::load_yaml::<ScheduleFile>(&path.join("schedule.yaml"))?;
        let income_tax = Self::load_yaml::<IncomeTaxFile>(&path.join("income_tax.yaml"))?;
        let local_tax = Self::load_yaml::<LocalTaxFile>(&path.join("local_tax.yaml"))?;

        let config = StatutoryConfig::new(
            schedule.metadata,
            schedule.contributions,
            IncomeTaxTable::new(income_tax.brackets),
            LocalTaxTable::new(local_tax.brackets, local_tax.top_amount),
        );
        Self::validate(&config)?;

        info!(
            path = %path.display(),
            code = %config.metadata().code,
            version = %config.metadata().version,
            income_tax_brackets = config.income_tax().brackets().len(),
            "Loaded statutory schedule"
        );

        Ok(Self { config })
    }

    /// Wraps the built-in standard schedule.
    pub fn standard() -> Self {
        Self {
            config: StatutoryConfig::default(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Checks the assembled schedule for values the engine cannot use.
    pub fn validate(config: &StatutoryConfig) -> EngineResult<()> {
        for (name, rate) in config.contributions().named_rates() {
            Self::check_rate(name, rate)?;
        }
        Self::check_amount("capped_base", config.contributions().capped_base)?;

        for bracket in config.income_tax().brackets() {
            Self::check_rate("income tax rate", bracket.rate)?;
            Self::check_amount("income tax lower bound", bracket.lower_bound)?;
            Self::check_amount("income tax deduction", bracket.deduction)?;
        }

        if config.local_tax().brackets().is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "local tax table has no brackets".to_string(),
            });
        }
        for bracket in config.local_tax().brackets() {
            Self::check_amount("local tax ceiling", bracket.ceiling)?;
            Self::check_amount("local tax amount", bracket.amount)?;
        }
        Self::check_amount("local tax top amount", config.local_tax().top_amount())?;

        Ok(())
    }

    fn check_rate(name: &str, rate: Decimal) -> EngineResult<()> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(EngineError::InvalidConfig {
                message: format!("{} must be between 0 and 1, got {}", name, rate),
            });
        }
        Ok(())
    }

    fn check_amount(name: &str, amount: Decimal) -> EngineResult<()> {
        if amount < Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                message: format!("{} must not be negative, got {}", name, amount),
            });
        }
        if amount > MAX_AMOUNT {
            return Err(EngineError::InvalidConfig {
                message: format!("{} must not exceed {}, got {}", name, MAX_AMOUNT, amount),
            });
        }
        Ok(())
    }

    /// Returns the loaded schedule.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Consumes the loader, returning the schedule.
    pub fn into_config(self) -> StatutoryConfig {
        self.config
    }
}
