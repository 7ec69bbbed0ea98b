use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// Closed set of recurrence cadences. Catalog data uses the snake_case wire
/// form (`"semi_annual"`, `"one_time"`); unknown tags fail at the loading
/// boundary instead of falling through a default branch later.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceKind {
    Monthly,
    Annual,
    Quarterly,
    SemiAnnual,
    OneTime,
}

impl RecurrenceKind {
    pub fn label(&self) -> &'static str {
        match self {
            RecurrenceKind::Monthly => "Monthly",
            RecurrenceKind::Annual => "Annual",
            RecurrenceKind::Quarterly => "Quarterly",
            RecurrenceKind::SemiAnnual => "Semi-annual",
            RecurrenceKind::OneTime => "One-time",
        }
    }
}

/// A single perk attached to a card: a statement credit, membership, bonus
/// category, or similar.
///
/// A benefit is either catalog-derived (`is_from_catalog`, refreshed by
/// reconciliation while unused) or user-created (`is_user_custom`, never
/// touched by reconciliation). `last_used_date` marks it consumed for the
/// current period; only the reset engine clears it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Benefit {
    pub id: Uuid,
    pub card_id: Uuid,
    /// Links back to the catalog entry this benefit was derived from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predefined_benefit_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Free-form catalog vocabulary: "credit", "membership", "bonus", ...
    #[serde(default)]
    pub benefit_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub currency_code: String,
    pub recurrence: RecurrenceKind,
    /// Day of month, only meaningful for [`RecurrenceKind::Monthly`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_day: Option<u32>,
    /// Fixed date, only meaningful for [`RecurrenceKind::OneTime`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_time_date: Option<NaiveDate>,
    #[serde(default)]
    pub reminder_message: String,
    #[serde(default)]
    pub is_from_catalog: bool,
    #[serde(default)]
    pub is_user_custom: bool,
    pub is_active: bool,
    #[serde(default)]
    pub last_used_date: Option<NaiveDate>,
    /// Cadence at which a used benefit becomes available again, independent
    /// of the expiration cadence. `None` and `OneTime` never auto-reset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_period: Option<RecurrenceKind>,
}

impl Benefit {
    /// Creates a user-defined benefit. `monthly_day` outside 1-31 and a
    /// one-time recurrence without a date are rejected here so the
    /// calculators never see invalid static configuration.
    pub fn new_custom(
        card_id: Uuid,
        name: impl Into<String>,
        recurrence: RecurrenceKind,
        monthly_day: Option<u32>,
        one_time_date: Option<NaiveDate>,
    ) -> Result<Self, CoreError> {
        let name = name.into();
        if let Some(day) = monthly_day {
            if !(1..=31).contains(&day) {
                return Err(CoreError::InvalidBenefit(format!(
                    "monthly day {day} is outside 1-31"
                )));
            }
        }
        if recurrence == RecurrenceKind::OneTime && one_time_date.is_none() {
            return Err(CoreError::InvalidBenefit(format!(
                "one-time benefit '{name}' has no date"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            card_id,
            predefined_benefit_id: None,
            name,
            description: String::new(),
            category: String::new(),
            benefit_type: String::new(),
            amount: None,
            currency_code: "USD".to_string(),
            recurrence,
            monthly_day,
            one_time_date,
            reminder_message: String::new(),
            is_from_catalog: false,
            is_user_custom: true,
            is_active: true,
            last_used_date: None,
            reset_period: None,
        })
    }

    /// Catalog-derived and still following the catalog. Custom benefits and
    /// catalog benefits the user forked are outside reconciliation's reach.
    pub fn follows_catalog(&self) -> bool {
        self.is_from_catalog && !self.is_user_custom
    }

    pub fn is_used(&self) -> bool {
        self.last_used_date.is_some()
    }
}
