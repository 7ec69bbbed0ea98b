#![doc(test(attr(deny(warnings))))]

//! Benefit Core provides the due-date and benefit lifecycle engine behind a
//! credit-card tracker: recurrence date math, catalog reconciliation, usage
//! resets, and the reminder aggregations a host application turns into lists,
//! badges, and scheduled notifications.
//!
//! Every function takes "today" as an explicit parameter; nothing in this
//! crate reads a clock, performs I/O (beyond the optional catalog file
//! loader), or holds shared mutable state.

pub mod catalog;
pub mod errors;
pub mod model;
pub mod reconcile;
pub mod reminder;
pub mod reset;
pub mod schedule;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Benefit Core tracing initialized.");
    });
}
