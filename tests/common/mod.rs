#![allow(dead_code)]

use benefit_core::catalog::{
    BenefitValue, Catalog, PredefinedBenefit, PredefinedCard, ReminderSpec, UsageTracking,
};
use benefit_core::model::{Card, RecurrenceKind};
use chrono::NaiveDate;

pub fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn card(name: &str, due_day: u32) -> Card {
    Card::new(name, "1234", due_day, d(2024, 3, 10)).unwrap()
}

pub fn predefined_benefit(id: &str, kind: RecurrenceKind) -> PredefinedBenefit {
    PredefinedBenefit {
        id: id.to_string(),
        name: format!("{id} credit"),
        description: "Statement credit".to_string(),
        category: "Dining".to_string(),
        value: BenefitValue {
            amount: Some(10.0),
            currency: "USD".to_string(),
            benefit_type: "credit".to_string(),
            frequency: None,
            validity_period: None,
            max_spend: None,
            max_reward: None,
            special_months: None,
        },
        reminder: ReminderSpec {
            kind,
            start_date: None,
            days_before: None,
            day_of_month: match kind {
                RecurrenceKind::Monthly => Some(1),
                _ => None,
            },
            date: match kind {
                RecurrenceKind::OneTime => Some(d(2026, 12, 31)),
                _ => None,
            },
            message: "Use your credit".to_string(),
            periods: None,
            condition: None,
        },
        usage_tracking: Some(UsageTracking {
            enabled: true,
            reset_period: kind,
        }),
    }
}

pub fn predefined_card(id: &str, benefits: Vec<PredefinedBenefit>) -> PredefinedCard {
    PredefinedCard {
        id: id.to_string(),
        name: "Sample Gold".to_string(),
        issuer: "Sample Bank".to_string(),
        card_network: "Visa".to_string(),
        category: "Travel".to_string(),
        default_benefits: benefits,
    }
}

pub fn catalog(version: &str, cards: Vec<PredefinedCard>) -> Catalog {
    Catalog {
        schema_version: version.to_string(),
        last_updated: None,
        predefined_cards: cards,
    }
}
