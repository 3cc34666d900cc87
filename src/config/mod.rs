//! Configuration loading for the payslip engine.
//!
//! The statutory schedule (contribution rates, the capped contribution base,
//! income-tax and local-tax brackets) is data. The built-in standard schedule
//! is `StatutoryConfig::default()`; a directory of YAML files can replace it.
//!
//! # Example
//!
//! ```no_run
//! use payslip_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap().into_config();
//! println!("Loaded schedule: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ContributionRates, IncomeTaxFile, LocalTaxFile, ScheduleFile, ScheduleMetadata,
    StatutoryConfig, standard_capped_base,
};
