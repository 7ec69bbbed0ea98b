//! Merges a versioned catalog of predefined benefits into a card's local
//! benefit list without destroying user history.
//!
//! The rules, in order of precedence:
//! - custom benefits are never touched;
//! - a used benefit (`last_used_date` set) is frozen until it resets, so the
//!   record keeps describing what the user actually redeemed;
//! - retired catalog entries are deactivated, never deleted, which keeps
//!   usage-record references intact and lets an entry return later;
//! - missing optional catalog fields mean "keep the current value".
//!
//! Mutations are staged during a read-only scan and applied afterwards; a
//! bad catalog entry surfaces during staging, so a card either reconciles
//! fully or not at all. Running the same catalog twice is a no-op.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::catalog::{Catalog, PredefinedBenefit, PredefinedCard};
use crate::errors::CoreError;
use crate::model::{Benefit, Card, RecurrenceKind};

/// Per-card outcome of a reconciliation pass.
#[derive(Debug, Clone)]
pub struct ReconcileSummary {
    pub card_id: Uuid,
    pub added: usize,
    pub updated: usize,
    pub retired: usize,
}

impl ReconcileSummary {
    fn new(card_id: Uuid) -> Self {
        Self {
            card_id,
            added: 0,
            updated: 0,
            retired: 0,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.updated == 0 && self.retired == 0
    }
}

/// First-time materialization of a catalog entry's benefits onto a card,
/// used when the user links the card to a predefined one. Entries that fail
/// conversion are skipped with a warning; one bad benefit never blocks the
/// rest.
pub fn instantiate_benefits(card: &mut Card, entry: &PredefinedCard) -> usize {
    let mut added = 0;
    for predefined in &entry.default_benefits {
        match convert_benefit(predefined, card.id) {
            Ok(benefit) => {
                card.benefits.push(benefit);
                added += 1;
            }
            Err(err) => warn!(benefit = %predefined.id, %err, "skipping catalog benefit"),
        }
    }
    added
}

/// Reconciles one card against its catalog entry. Safe to call repeatedly
/// and with a partial catalog; see the module docs for the merge rules.
pub fn reconcile_card(
    card: &mut Card,
    entry: &PredefinedCard,
) -> Result<ReconcileSummary, CoreError> {
    let mut summary = ReconcileSummary::new(card.id);

    let local_ids: HashSet<String> = card
        .benefits
        .iter()
        .filter(|benefit| benefit.follows_catalog())
        .filter_map(|benefit| benefit.predefined_benefit_id.clone())
        .collect();

    let mut to_add = Vec::new();
    for predefined in &entry.default_benefits {
        if !local_ids.contains(&predefined.id) {
            to_add.push(convert_benefit(predefined, card.id)?);
        }
    }

    // Stage updates and retirements against a read snapshot, resolving
    // schedule parameters up front: a bad catalog entry fails the card
    // before any mutation lands, so the pass is all-or-nothing.
    enum Staged {
        Update {
            local: usize,
            remote: usize,
            monthly_day: Option<u32>,
            one_time_date: Option<NaiveDate>,
        },
        Retire {
            local: usize,
        },
    }
    let mut staged = Vec::new();
    for (index, benefit) in card.benefits.iter().enumerate() {
        if !benefit.follows_catalog() {
            continue;
        }
        let Some(predefined_id) = benefit.predefined_benefit_id.as_deref() else {
            continue;
        };
        if benefit.is_used() {
            // Frozen until the reset engine rolls the period over.
            continue;
        }
        match entry
            .default_benefits
            .iter()
            .position(|predefined| predefined.id == predefined_id)
        {
            Some(remote) => {
                let (monthly_day, one_time_date) =
                    resolve_schedule(&entry.default_benefits[remote])?;
                staged.push(Staged::Update {
                    local: index,
                    remote,
                    monthly_day,
                    one_time_date,
                });
            }
            None => staged.push(Staged::Retire { local: index }),
        }
    }

    for operation in staged {
        match operation {
            Staged::Update {
                local,
                remote,
                monthly_day,
                one_time_date,
            } => {
                apply_update(
                    &mut card.benefits[local],
                    &entry.default_benefits[remote],
                    monthly_day,
                    one_time_date,
                );
                summary.updated += 1;
            }
            Staged::Retire { local } => {
                let benefit = &mut card.benefits[local];
                if benefit.is_active {
                    benefit.is_active = false;
                    summary.retired += 1;
                }
            }
        }
    }

    summary.added = to_add.len();
    card.benefits.extend(to_add);

    debug!(
        card = %card.id,
        added = summary.added,
        updated = summary.updated,
        retired = summary.retired,
        "reconciled card against catalog entry"
    );
    Ok(summary)
}

/// Reconciles every catalog-linked card against a freshly fetched catalog.
/// A card that fails is logged and skipped; the rest proceed. Cards without
/// a catalog reference, or referencing an id the catalog no longer carries,
/// are left untouched.
pub fn reconcile_catalog(cards: &mut [Card], catalog: &Catalog) -> Vec<ReconcileSummary> {
    let mut summaries = Vec::new();
    for card in cards.iter_mut() {
        let Some(predefined_id) = card.predefined_card_id.as_deref() else {
            continue;
        };
        let Some(entry) = catalog.card_by_id(predefined_id) else {
            debug!(card = %card.id, catalog_card = predefined_id, "card not in catalog; skipping");
            continue;
        };
        match reconcile_card(card, entry) {
            Ok(summary) => summaries.push(summary),
            Err(err) => warn!(card = %card.id, %err, "reconcile failed; continuing with remaining cards"),
        }
    }
    summaries
}

/// Schedule parameters a catalog reminder resolves to for a local benefit.
fn resolve_schedule(
    predefined: &PredefinedBenefit,
) -> Result<(Option<u32>, Option<NaiveDate>), CoreError> {
    let reminder = &predefined.reminder;
    match reminder.kind {
        RecurrenceKind::Monthly => {
            let day = reminder.day_of_month.unwrap_or(1);
            if !(1..=31).contains(&day) {
                return Err(CoreError::InvalidBenefit(format!(
                    "catalog benefit {} has day of month {day}",
                    predefined.id
                )));
            }
            Ok((Some(day), None))
        }
        RecurrenceKind::OneTime => {
            let date = reminder.date.ok_or_else(|| {
                CoreError::InvalidBenefit(format!(
                    "catalog benefit {} is one-time but has no date",
                    predefined.id
                ))
            })?;
            Ok((None, Some(date)))
        }
        // Anniversary- and calendar-aligned kinds carry no extra parameters.
        _ => Ok((None, None)),
    }
}

fn convert_benefit(predefined: &PredefinedBenefit, card_id: Uuid) -> Result<Benefit, CoreError> {
    let (monthly_day, one_time_date) = resolve_schedule(predefined)?;
    Ok(Benefit {
        id: Uuid::new_v4(),
        card_id,
        predefined_benefit_id: Some(predefined.id.clone()),
        name: predefined.name.clone(),
        description: predefined.description.clone(),
        category: predefined.category.clone(),
        benefit_type: predefined.value.benefit_type.clone(),
        amount: predefined.value.amount,
        currency_code: predefined.value.currency.clone(),
        recurrence: predefined.reminder.kind,
        monthly_day,
        one_time_date,
        reminder_message: predefined.reminder.message.clone(),
        is_from_catalog: true,
        is_user_custom: false,
        is_active: true,
        last_used_date: None,
        reset_period: predefined
            .usage_tracking
            .as_ref()
            .map(|tracking| tracking.reset_period),
    })
}

fn apply_update(
    benefit: &mut Benefit,
    predefined: &PredefinedBenefit,
    monthly_day: Option<u32>,
    one_time_date: Option<NaiveDate>,
) {
    benefit.name = predefined.name.clone();
    benefit.description = predefined.description.clone();
    benefit.category = predefined.category.clone();
    benefit.benefit_type = predefined.value.benefit_type.clone();
    benefit.amount = predefined.value.amount;
    benefit.currency_code = predefined.value.currency.clone();
    benefit.recurrence = predefined.reminder.kind;
    benefit.monthly_day = monthly_day;
    benefit.one_time_date = one_time_date;
    benefit.reminder_message = predefined.reminder.message.clone();
    benefit.reset_period = predefined
        .usage_tracking
        .as_ref()
        .map(|tracking| tracking.reset_period);
}
