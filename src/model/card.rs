use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

use super::benefit::Benefit;

/// Days ahead of the due date a payment reminder fires unless overridden.
pub const DEFAULT_REMINDER_LEAD_DAYS: u32 = 5;

/// Sentinel `due_day` meaning "the last calendar day of each month".
pub const LAST_DAY_SENTINEL: u32 = 0;

/// A credit card with its payment schedule and attached benefits.
///
/// Deleting a card drops its benefits with it; usage records live outside the
/// card and survive (see [`super::usage`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub name: String,
    /// Display only; no validation beyond what the host UI enforces.
    pub last_four_digits: String,
    /// Day of month the payment is due: 1-31, or [`LAST_DAY_SENTINEL`].
    pub due_day: u32,
    #[serde(default)]
    pub color_hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    pub reminder_lead_days: u32,
    /// Set when the card was picked from the predefined catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predefined_card_id: Option<String>,
    /// Epoch for anniversary-relative schedules; falls back to `created_on`.
    #[serde(default)]
    pub anniversary_date: Option<NaiveDate>,
    pub created_on: NaiveDate,
    /// Payment watermark: every due date on or before this is paid.
    #[serde(default)]
    pub last_paid_through: Option<NaiveDate>,
    #[serde(default)]
    pub benefits: Vec<Benefit>,
}

impl Card {
    /// Creates a card due on `due_day` of each month. Rejects a `due_day`
    /// outside `0..=31` (`0` is the last-day-of-month sentinel).
    pub fn new(
        name: impl Into<String>,
        last_four_digits: impl Into<String>,
        due_day: u32,
        created_on: NaiveDate,
    ) -> Result<Self, CoreError> {
        if due_day > 31 {
            return Err(CoreError::InvalidCard(format!(
                "due day {due_day} is outside 0-31"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            last_four_digits: last_four_digits.into(),
            due_day,
            color_hex: String::new(),
            card_type: None,
            reminder_lead_days: DEFAULT_REMINDER_LEAD_DAYS,
            predefined_card_id: None,
            anniversary_date: None,
            created_on,
            last_paid_through: None,
            benefits: Vec::new(),
        })
    }

    pub fn is_last_day_of_month(&self) -> bool {
        self.due_day == LAST_DAY_SENTINEL
    }

    pub fn is_predefined(&self) -> bool {
        self.predefined_card_id.is_some()
    }

    /// The epoch for annual/quarterly/semi-annual schedules. The fallback to
    /// the creation date is deliberate and the only fallback in play.
    pub fn resolve_anniversary(&self) -> NaiveDate {
        self.anniversary_date.unwrap_or(self.created_on)
    }

    /// Records that everything due on or before `due_date` has been paid.
    /// The watermark only ever advances; marking an older due date paid
    /// after a newer one is a no-op.
    pub fn mark_paid_through(&mut self, due_date: NaiveDate) {
        match self.last_paid_through {
            Some(current) if current >= due_date => {}
            _ => self.last_paid_through = Some(due_date),
        }
    }

    pub fn add_benefit(&mut self, benefit: Benefit) -> Uuid {
        let id = benefit.id;
        self.benefits.push(benefit);
        id
    }

    pub fn benefit(&self, id: Uuid) -> Option<&Benefit> {
        self.benefits.iter().find(|benefit| benefit.id == id)
    }

    pub fn benefit_mut(&mut self, id: Uuid) -> Option<&mut Benefit> {
        self.benefits.iter_mut().find(|benefit| benefit.id == id)
    }

    pub fn active_benefits(&self) -> impl Iterator<Item = &Benefit> {
        self.benefits.iter().filter(|benefit| benefit.is_active)
    }

    pub fn has_custom_benefits(&self) -> bool {
        self.benefits.iter().any(|benefit| benefit.is_user_custom)
    }
}
