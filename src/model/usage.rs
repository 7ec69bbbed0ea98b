use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::benefit::Benefit;

/// Append-only record of a benefit being used. Snapshots the name and value
/// as the user saw them, so history survives resets and catalog changes.
/// Never updated or deleted by any engine in this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    pub id: Uuid,
    pub benefit_id: Uuid,
    pub card_id: Uuid,
    pub used_date: NaiveDate,
    pub amount_at_use: Option<f64>,
    pub currency_at_use: String,
    pub benefit_name_at_use: String,
}

/// Marks the benefit consumed for the current period and returns the ledger
/// record the caller appends to durable history.
pub fn record_usage(benefit: &mut Benefit, today: NaiveDate) -> UsageRecord {
    benefit.last_used_date = Some(today);
    UsageRecord {
        id: Uuid::new_v4(),
        benefit_id: benefit.id,
        card_id: benefit.card_id,
        used_date: today,
        amount_at_use: benefit.amount,
        currency_at_use: benefit.currency_code.clone(),
        benefit_name_at_use: benefit.name.clone(),
    }
}

/// Total value earned across the ledger, keyed by currency. Records without
/// an amount contribute nothing.
pub fn total_earned(records: &[UsageRecord]) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for record in records {
        if let Some(amount) = record.amount_at_use {
            *totals.entry(record.currency_at_use.clone()).or_default() += amount;
        }
    }
    totals
}
