//! Persistence of finished payslips.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriod, PayPeriodInputs, PayslipBreakdown, PeriodKind};

/// A payslip ready to be stored.
///
/// A draft without a number is stored as a new record. A draft carrying the
/// number of an existing record replaces that record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayslipDraft {
    /// Number of the record this draft replaces, if any.
    #[serde(default)]
    pub number: Option<u64>,
    /// Tenant (company) the payslip belongs to.
    pub tenant_id: String,
    /// Employee the payslip is for.
    pub employee_id: String,
    /// Pay period covered.
    pub period: PayPeriod,
    /// Family quotient the taxes were computed with.
    pub family_quotient_parts: Decimal,
    /// Inputs as edited, statutory fields included.
    pub inputs: PayPeriodInputs,
    /// Breakdown computed from the inputs.
    pub breakdown: PayslipBreakdown,
}

/// A stored payslip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayslipRecord {
    /// Sequential number, unique per tenant and period kind.
    pub number: u64,
    /// Tenant (company) the payslip belongs to.
    pub tenant_id: String,
    /// Employee the payslip is for.
    pub employee_id: String,
    /// Pay period covered.
    pub period: PayPeriod,
    /// Family quotient the taxes were computed with.
    pub family_quotient_parts: Decimal,
    /// Inputs as edited, statutory fields included.
    pub inputs: PayPeriodInputs,
    /// Breakdown computed from the inputs.
    pub breakdown: PayslipBreakdown,
    /// When the record was stored.
    pub saved_at: DateTime<Utc>,
}

/// Stores finished payslips and assigns their numbers.
pub trait PayslipStore {
    /// Stores a draft and returns the numbered record.
    ///
    /// A draft with a number overwrites the record with that number and
    /// keeps it; no new number is consumed.
    fn save(&mut self, draft: PayslipDraft) -> EngineResult<PayslipRecord>;

    /// Fetches a record by tenant, period kind and number.
    fn get(&self, tenant_id: &str, kind: PeriodKind, number: u64) -> Option<PayslipRecord>;

    /// Lists every record for an employee of a tenant, oldest first.
    fn list_for_employee(&self, tenant_id: &str, employee_id: &str) -> Vec<PayslipRecord>;

    /// Lists every record of a tenant whose period contains `date`.
    fn list_covering(&self, tenant_id: &str, date: NaiveDate) -> Vec<PayslipRecord>;
}

/// A payslip store held in memory.
///
/// Numbers start at 1 and increase by one for each save within a
/// `(tenant, period kind)` pair.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPayslipStore {
    records: Vec<PayslipRecord>,
    counters: HashMap<(String, PeriodKind), u64>,
}

impl InMemoryPayslipStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PayslipStore for InMemoryPayslipStore {
    fn save(&mut self, draft: PayslipDraft) -> EngineResult<PayslipRecord> {
        if draft.tenant_id.trim().is_empty() {
            return Err(EngineError::PersistenceError {
                message: "tenant id must not be empty".to_string(),
            });
        }
        if !draft.period.is_well_formed() {
            return Err(EngineError::PersistenceError {
                message: format!(
                    "pay period ends on {} before it starts on {}",
                    draft.period.end_date, draft.period.start_date
                ),
            });
        }

        let existing = match draft.number {
            Some(number) => {
                let index = self
                    .records
                    .iter()
                    .position(|r| {
                        r.tenant_id == draft.tenant_id
                            && r.period.kind == draft.period.kind
                            && r.number == number
                    })
                    .ok_or_else(|| EngineError::PersistenceError {
                        message: format!("no payslip numbered {} to update", number),
                    })?;
                if self.records[index].employee_id != draft.employee_id {
                    return Err(EngineError::PersistenceError {
                        message: format!(
                            "payslip {} belongs to employee {}",
                            number, self.records[index].employee_id
                        ),
                    });
                }
                Some((index, number))
            }
            None => None,
        };

        let number = match existing {
            Some((_, number)) => number,
            None => {
                let counter = self
                    .counters
                    .entry((draft.tenant_id.clone(), draft.period.kind))
                    .or_insert(0);
                *counter += 1;
                *counter
            }
        };

        let record = PayslipRecord {
            number,
            tenant_id: draft.tenant_id,
            employee_id: draft.employee_id,
            period: draft.period,
            family_quotient_parts: draft.family_quotient_parts,
            inputs: draft.inputs,
            breakdown: draft.breakdown,
            saved_at: Utc::now(),
        };

        info!(
            tenant_id = %record.tenant_id,
            employee_id = %record.employee_id,
            number = record.number,
            updated = existing.is_some(),
            net_pay = %record.breakdown.net_pay,
            "Payslip saved"
        );

        match existing {
            Some((index, _)) => self.records[index] = record.clone(),
            None => self.records.push(record.clone()),
        }
        Ok(record)
    }

    fn get(&self, tenant_id: &str, kind: PeriodKind, number: u64) -> Option<PayslipRecord> {
        self.records
            .iter()
            .find(|r| r.tenant_id == tenant_id && r.period.kind == kind && r.number == number)
            .cloned()
    }

    fn list_for_employee(&self, tenant_id: &str, employee_id: &str) -> Vec<PayslipRecord> {
        self.records
            .iter()
            .filter(|r| r.tenant_id == tenant_id && r.employee_id == employee_id)
            .cloned()
            .collect()
    }

    fn list_covering(&self, tenant_id: &str, date: NaiveDate) -> Vec<PayslipRecord> {
        self.records
            .iter()
            .filter(|r| r.tenant_id == tenant_id && r.period.contains_date(date))
            .cloned()
            .collect()
    }
}
