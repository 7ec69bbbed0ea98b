mod common;

use benefit_core::model::{record_usage, total_earned, Card, RecurrenceKind};
use benefit_core::reconcile::{instantiate_benefits, reconcile_catalog};
use benefit_core::reminder::{near_expiry_count, overdue_count, upcoming_benefits, upcoming_dues};
use common::{catalog, d, predefined_benefit, predefined_card};

/// Walks the whole lifecycle the way a host application would: link a card
/// to the catalog, consume a benefit, take a catalog update, roll the period
/// over, and read the aggregations at each step.
#[test]
fn full_lifecycle() {
    benefit_core::init();

    let v1 = catalog(
        "1.0",
        vec![predefined_card(
            "sample_gold",
            vec![
                predefined_benefit("dining", RecurrenceKind::Monthly),
                predefined_benefit("lounge", RecurrenceKind::Annual),
            ],
        )],
    );

    let mut card = Card::new("Gold", "4242", 0, d(2025, 1, 5)).unwrap();
    card.predefined_card_id = Some("sample_gold".to_string());
    instantiate_benefits(&mut card, v1.card_by_id("sample_gold").unwrap());
    let mut cards = vec![card];

    // Mid-January: both benefits upcoming, the month-end due pending.
    let today = d(2025, 1, 20);
    assert_eq!(upcoming_benefits(&mut cards, today).len(), 2);
    let dues = upcoming_dues(&cards, today);
    assert_eq!(dues[0].due_date, d(2025, 1, 31));

    // Use the dining credit; the ledger records it and the list shrinks.
    let mut records = Vec::new();
    let dining_id = cards[0]
        .benefits
        .iter()
        .find(|b| b.predefined_benefit_id.as_deref() == Some("dining"))
        .unwrap()
        .id;
    let benefit = cards[0].benefit_mut(dining_id).unwrap();
    records.push(record_usage(benefit, today));
    assert_eq!(upcoming_benefits(&mut cards, today).len(), 1);
    assert_eq!(total_earned(&records).get("USD"), Some(&10.0));

    // A new catalog version drops the dining credit while it is in use: the
    // used benefit is frozen and survives the update untouched.
    let v2 = catalog(
        "2.0",
        vec![predefined_card(
            "sample_gold",
            vec![predefined_benefit("lounge", RecurrenceKind::Annual)],
        )],
    );
    assert!(v2.version_changed(Some("1.0")));
    let summaries = reconcile_catalog(&mut cards, &v2);
    assert_eq!(summaries.len(), 1);
    let dining = cards[0].benefit(dining_id).unwrap();
    assert!(dining.is_active);
    assert!(dining.is_used());

    // February: the monthly reset frees the dining credit, and the January
    // usage record is still intact.
    let february = d(2025, 2, 1);
    let rows = upcoming_benefits(&mut cards, february);
    assert!(rows.iter().any(|row| row.benefit_id == dining_id));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].used_date, d(2025, 1, 20));

    // February's month-end due is next; inside the five-day lead it counts
    // as overdue until the payment watermark moves past it.
    let dues = upcoming_dues(&cards, february);
    assert_eq!(dues[0].due_date, d(2025, 2, 28));
    assert_eq!(overdue_count(&cards, february), 0);
    assert_eq!(overdue_count(&cards, d(2025, 2, 25)), 1);
    cards[0].mark_paid_through(d(2025, 2, 28));
    assert_eq!(overdue_count(&cards, d(2025, 2, 25)), 0);
    let dues = upcoming_dues(&cards, d(2025, 2, 25));
    assert_eq!(dues[0].due_date, d(2025, 3, 31));

    // Nothing expires within the default window on February 1st.
    assert_eq!(near_expiry_count(&mut cards, february, 5), 0);
    // On the 24th the month-end expiration enters the five-day window.
    assert_eq!(near_expiry_count(&mut cards, d(2025, 2, 24), 5), 1);
}
