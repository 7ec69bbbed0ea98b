//! Read-only derivations over the card/benefit collection: the lists and
//! counts a host renders as reminder tabs and badges.
//!
//! The count functions reuse the exact calculators behind the list
//! functions, so a badge can never disagree with the list it summarizes.
//! Benefit-side derivations run the reset engine first, which is why they
//! take `&mut` — a just-reset benefit reappears immediately.

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::model::Card;
use crate::reset::reset_lapsed_usage;
use crate::schedule;

/// Inclusive window for [`near_expiry_count`], in days.
pub const NEAR_EXPIRY_WINDOW_DAYS: i64 = 5;

/// One row per card in the dues list.
#[derive(Debug, Clone)]
pub struct UpcomingDue {
    pub card_id: Uuid,
    pub card_name: String,
    pub due_date: NaiveDate,
    /// Negative once the due date has passed unpaid.
    pub days_until_due: i64,
}

/// One row per active, unused benefit in the expirations list.
#[derive(Debug, Clone)]
pub struct UpcomingBenefit {
    pub benefit_id: Uuid,
    pub card_id: Uuid,
    pub benefit_name: String,
    pub expiration_date: NaiveDate,
    pub days_until_expiration: i64,
}

/// Next unpaid due date for every card, soonest first. No lead-time filter:
/// the dues tab always shows one row per card, overdue included.
pub fn upcoming_dues(cards: &[Card], today: NaiveDate) -> Vec<UpcomingDue> {
    let mut rows: Vec<UpcomingDue> = cards
        .iter()
        .filter_map(|card| {
            let due = schedule::next_due_date(card.due_day, card.last_paid_through, today)?;
            Some(UpcomingDue {
                card_id: card.id,
                card_name: card.name.clone(),
                due_date: due,
                days_until_due: schedule::days_until(today, due),
            })
        })
        .collect();
    rows.sort_by_key(|row| (row.days_until_due, row.card_id));
    rows
}

/// Active, unused benefits with a computable, non-past expiration, soonest
/// first. Runs the reset engine before reading.
pub fn upcoming_benefits(cards: &mut [Card], today: NaiveDate) -> Vec<UpcomingBenefit> {
    reset_lapsed_usage(cards, today);
    let mut rows = Vec::new();
    for card in cards.iter() {
        for benefit in card.active_benefits() {
            if benefit.is_used() {
                continue;
            }
            let Some(expiration) = schedule::benefit_expiration(benefit, today) else {
                continue;
            };
            let days = schedule::days_until(today, expiration);
            if days < 0 {
                continue;
            }
            rows.push(UpcomingBenefit {
                benefit_id: benefit.id,
                card_id: card.id,
                benefit_name: benefit.name.clone(),
                expiration_date: expiration,
                days_until_expiration: days,
            });
        }
    }
    rows.sort_by_key(|row| (row.days_until_expiration, row.benefit_id));
    rows
}

/// Cards whose next unpaid due date, less the card's reminder lead, is on or
/// before today. At most one per card: only the nearest unpaid due counts.
pub fn overdue_count(cards: &[Card], today: NaiveDate) -> usize {
    cards
        .iter()
        .filter(|card| {
            schedule::next_due_date(card.due_day, card.last_paid_through, today)
                .map(|due| due - Duration::days(card.reminder_lead_days as i64) <= today)
                .unwrap_or(false)
        })
        .count()
}

/// Active, unused benefits expiring within `[today, today + window_days]`
/// inclusive. Runs the reset engine first, same as [`upcoming_benefits`].
pub fn near_expiry_count(cards: &mut [Card], today: NaiveDate, window_days: i64) -> usize {
    reset_lapsed_usage(cards, today);
    cards
        .iter()
        .flat_map(|card| card.active_benefits())
        .filter(|benefit| !benefit.is_used())
        .filter_map(|benefit| schedule::benefit_expiration(benefit, today))
        .filter(|expiration| {
            let days = schedule::days_until(today, *expiration);
            (0..=window_days).contains(&days)
        })
        .count()
}
