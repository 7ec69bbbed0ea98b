//! Pure date arithmetic for due dates and benefit expirations.
//!
//! Every function here takes "today" explicitly and compares at calendar-day
//! granularity. Invalid static configuration (a day outside 1-31, a missing
//! one-time date) yields `None` rather than an error: absence is the
//! steady-state answer for "no applicable date".
//!
//! Two monthly semantics coexist on purpose and are kept as separate named
//! functions: [`next_monthly_occurrence`] (occurrence semantics, for
//! reminders pinned to a day of month) and [`monthly_expiration`] (month-end
//! semantics, for "use it by end of month" benefits). The same split exists
//! for annual schedules ([`annual_expiration`] is calendar-year,
//! [`annual_anniversary_due`] is anniversary-relative).

use chrono::{Datelike, Duration, NaiveDate};

use crate::model::{Benefit, Card, RecurrenceKind, LAST_DAY_SENTINEL};

/// Upper bound on the month scan in [`next_due_date`]; a watermark fifty
/// years out means the card has no meaningful next due date.
const MAX_DUE_SCAN_MONTHS: i32 = 600;

/// Last calendar day of the month: first day of the next month minus one.
/// Month-length constants are never hardcoded anywhere in this crate.
pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    first_next - Duration::days(1)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    last_day_of_month(year, month).day()
}

/// Day `day` of the given month, clamped into the month. Day 31 in April
/// yields April 30; it never overflows into the next month.
pub fn clamp_day(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| last_day_of_month(year, month))
}

/// Shifts a date by whole months, clamping the day into the target month
/// (Jan 31 plus one month is Feb 28/29).
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    clamp_day(year, month as u32, date.day())
}

/// Calendar-day difference, start-of-day to start-of-day. Negative when the
/// target is in the past.
pub fn days_until(today: NaiveDate, date: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// Occurrence semantics: the first date on or after `today` whose day of
/// month is `day` (clamped into shorter months), rolling to next month when
/// this month's has passed. `None` when `day` is outside 1-31.
pub fn next_monthly_occurrence(day: u32, today: NaiveDate) -> Option<NaiveDate> {
    if !(1..=31).contains(&day) {
        return None;
    }
    let candidate = clamp_day(today.year(), today.month(), day);
    if candidate >= today {
        Some(candidate)
    } else {
        let next = add_months(candidate, 1);
        Some(clamp_day(next.year(), next.month(), day))
    }
}

/// Expiration semantics: the last day of the current month. Evaluated on the
/// last day itself, that same day (boundary inclusive).
pub fn monthly_expiration(today: NaiveDate) -> NaiveDate {
    last_day_of_month(today.year(), today.month())
}

/// Dec 31 of the current year (calendar-year semantics, not
/// anniversary-relative).
pub fn annual_expiration(today: NaiveDate) -> NaiveDate {
    last_day_of_month(today.year(), 12)
}

/// Last day of the current quarter-end month (Mar/Jun/Sep/Dec).
pub fn quarterly_expiration(today: NaiveDate) -> NaiveDate {
    let quarter_end_month = ((today.month() - 1) / 3) * 3 + 3;
    last_day_of_month(today.year(), quarter_end_month)
}

/// Jun 30 while today is in the first half, else Dec 31.
pub fn semi_annual_expiration(today: NaiveDate) -> NaiveDate {
    let june_30 = last_day_of_month(today.year(), 6);
    if today <= june_30 {
        june_30
    } else {
        last_day_of_month(today.year(), 12)
    }
}

/// The fixed date itself while it has not passed; `None` afterwards. A
/// one-time benefit has no rollover.
pub fn one_time_expiration(date: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    if date >= today {
        Some(date)
    } else {
        None
    }
}

/// Due-style annual semantics: the last day of the anniversary's month this
/// year, rolling to next year once passed. Used for anniversary-relative
/// reminders, never for benefit expiration.
pub fn annual_anniversary_due(anniversary: NaiveDate, today: NaiveDate) -> NaiveDate {
    let this_year = last_day_of_month(today.year(), anniversary.month());
    if this_year >= today {
        this_year
    } else {
        last_day_of_month(today.year() + 1, anniversary.month())
    }
}

/// Next expiration for a benefit, dispatching on its recurrence kind.
/// `None` for a one-time benefit whose date is missing or already past.
pub fn benefit_expiration(benefit: &Benefit, today: NaiveDate) -> Option<NaiveDate> {
    match benefit.recurrence {
        RecurrenceKind::Monthly => Some(monthly_expiration(today)),
        RecurrenceKind::Annual => Some(annual_expiration(today)),
        RecurrenceKind::Quarterly => Some(quarterly_expiration(today)),
        RecurrenceKind::SemiAnnual => Some(semi_annual_expiration(today)),
        RecurrenceKind::OneTime => benefit
            .one_time_date
            .and_then(|date| one_time_expiration(date, today)),
    }
}

/// Next reminder occurrence for a benefit: the date a host notification
/// should anchor to. Monthly benefits pin to their day of month; annual ones
/// to the card anniversary; the rest share the expiration calculators.
pub fn benefit_reminder_occurrence(
    benefit: &Benefit,
    card: &Card,
    today: NaiveDate,
) -> Option<NaiveDate> {
    match benefit.recurrence {
        RecurrenceKind::Monthly => next_monthly_occurrence(benefit.monthly_day?, today),
        RecurrenceKind::Annual => Some(annual_anniversary_due(card.resolve_anniversary(), today)),
        RecurrenceKind::Quarterly => Some(quarterly_expiration(today)),
        RecurrenceKind::SemiAnnual => Some(semi_annual_expiration(today)),
        RecurrenceKind::OneTime => benefit
            .one_time_date
            .and_then(|date| one_time_expiration(date, today)),
    }
}

fn due_date_in_month(due_day: u32, year: i32, month: u32) -> NaiveDate {
    if due_day == LAST_DAY_SENTINEL {
        last_day_of_month(year, month)
    } else {
        clamp_day(year, month, due_day)
    }
}

/// First unpaid due date for a card, walking forward from the current month.
///
/// A candidate on or before the `last_paid_through` watermark is paid and
/// skipped. The first unpaid candidate is returned even when it is already
/// in the past: an unpaid due never silently disappears, only a recorded
/// payment advances past it. `None` when `due_day` is outside 0-31 or the
/// bounded scan is exhausted.
pub fn next_due_date(
    due_day: u32,
    last_paid_through: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<NaiveDate> {
    if due_day > 31 {
        return None;
    }
    for offset in 0..MAX_DUE_SCAN_MONTHS {
        let month = add_months(today.with_day(1).unwrap(), offset);
        let candidate = due_date_in_month(due_day, month.year(), month.month());
        if let Some(paid) = last_paid_through {
            if candidate <= paid {
                continue;
            }
        }
        return Some(candidate);
    }
    None
}

/// The reminder dates a host feeds its notification scheduler: one per
/// unpaid due date over the next `months` months, each shifted back by the
/// card's lead days, with dates already in the past dropped.
pub fn due_reminder_dates(card: &Card, today: NaiveDate, months: u32) -> Vec<NaiveDate> {
    if card.due_day > 31 {
        return Vec::new();
    }
    let mut dates = Vec::new();
    for offset in 0..months as i32 {
        let month = add_months(today.with_day(1).unwrap(), offset);
        let due = due_date_in_month(card.due_day, month.year(), month.month());
        if let Some(paid) = card.last_paid_through {
            if due <= paid {
                continue;
            }
        }
        let reminder = due - Duration::days(card.reminder_lead_days as i64);
        if reminder < today {
            continue;
        }
        dates.push(reminder);
    }
    dates
}
