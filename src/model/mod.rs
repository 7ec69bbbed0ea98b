//! Card and benefit domain models, persistence-friendly types, and helpers.

pub mod benefit;
pub mod card;
pub mod usage;

pub use benefit::{Benefit, RecurrenceKind};
pub use card::{Card, DEFAULT_REMINDER_LEAD_DAYS, LAST_DAY_SENTINEL};
pub use usage::{record_usage, total_earned, UsageRecord};
