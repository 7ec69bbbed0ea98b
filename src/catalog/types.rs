use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::RecurrenceKind;

fn default_currency() -> String {
    "USD".to_string()
}

fn enabled_default() -> bool {
    true
}

/// Root of the catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub schema_version: String,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub predefined_cards: Vec<PredefinedCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredefinedCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub card_network: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub default_benefits: Vec<PredefinedBenefit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredefinedBenefit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub value: BenefitValue,
    pub reminder: ReminderSpec,
    #[serde(default)]
    pub usage_tracking: Option<UsageTracking>,
}

/// Monetary shape of a benefit. Bonus categories carry spend/reward caps;
/// some credits vary by month (`special_months`, keyed by month number).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitValue {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(rename = "type")]
    pub benefit_type: String,
    #[serde(default)]
    pub frequency: Option<RecurrenceKind>,
    #[serde(default)]
    pub validity_period: Option<String>,
    #[serde(default)]
    pub max_spend: Option<f64>,
    #[serde(default)]
    pub max_reward: Option<f64>,
    #[serde(default)]
    pub special_months: Option<HashMap<String, f64>>,
}

/// How and when a benefit reminder fires. Only the fields matching `kind`
/// are meaningful; the rest stay `None` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSpec {
    #[serde(rename = "type")]
    pub kind: RecurrenceKind,
    /// `"card_anniversary"` or an explicit date string.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Days before the anniversary to remind, for anniversary-relative kinds.
    #[serde(default)]
    pub days_before: Option<u32>,
    /// Day of month for monthly reminders.
    #[serde(default)]
    pub day_of_month: Option<u32>,
    /// Fixed date for one-time reminders.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub message: String,
    /// Named half-year windows for semi-annual reminders.
    #[serde(default)]
    pub periods: Option<Vec<HalfYearPeriod>>,
    #[serde(default)]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HalfYearPeriod {
    pub start_month: u32,
    pub end_month: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageTracking {
    #[serde(default = "enabled_default")]
    pub enabled: bool,
    pub reset_period: RecurrenceKind,
}
