//! Detects used benefits whose period has rolled over and makes them
//! available again.
//!
//! Resetting clears `last_used_date` and nothing else: never `is_active`,
//! never a usage record. Monthly and annual periods are calendar-aligned;
//! quarterly and semi-annual are rolling windows from the usage date.

use chrono::{Datelike, NaiveDate};
use tracing::debug;
use uuid::Uuid;

use crate::model::{Card, RecurrenceKind};
use crate::schedule::add_months;

/// Clears lapsed usage across all cards, returning the ids of the benefits
/// that were reset. Benefits without a reset period never auto-reset.
pub fn reset_lapsed_usage(cards: &mut [Card], today: NaiveDate) -> Vec<Uuid> {
    let mut reset_ids = Vec::new();
    for card in cards.iter_mut() {
        for benefit in card.benefits.iter_mut() {
            let (Some(used), Some(period)) = (benefit.last_used_date, benefit.reset_period) else {
                continue;
            };
            if usage_lapsed(used, period, today) {
                benefit.last_used_date = None;
                debug!(benefit = %benefit.id, period = period.label(), "usage period rolled over; benefit reset");
                reset_ids.push(benefit.id);
            }
        }
    }
    reset_ids
}

fn usage_lapsed(used: NaiveDate, period: RecurrenceKind, today: NaiveDate) -> bool {
    match period {
        RecurrenceKind::Monthly => (used.year(), used.month()) < (today.year(), today.month()),
        RecurrenceKind::Annual => used.year() < today.year(),
        RecurrenceKind::Quarterly => add_months(used, 3) < today,
        RecurrenceKind::SemiAnnual => add_months(used, 6) < today,
        RecurrenceKind::OneTime => false,
    }
}
