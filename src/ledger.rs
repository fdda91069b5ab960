// ABOUTME: In-memory meal ledger mapping meal slots to ordered logged items
// ABOUTME: Add/remove plus on-demand O(n) macro totals; lives for one session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Macrolens Contributors

//! Meal ledger
//!
//! Per-session record of everything logged, keyed by [`MealSlot`] with
//! insertion order preserved (display order doubles as the positional index
//! for deletion). The ledger is created empty at session start and survives
//! repeated photo analyses - a new analysis never clears logged items.
//!
//! Totals are recomputed on demand instead of being cached incrementally:
//! logged-item counts are small, and a recompute leaves a single source of
//! truth, which keeps the add-then-remove round-trip exact.

use crate::errors::{AppError, AppResult};
use crate::models::{LoggedItem, Macros, MealSlot, NutritionRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Per-session meal ledger
///
/// Mutated only from the single event-processing task; each edit is one
/// atomic state transition. Dropping the ledger is the only clear-all:
/// session teardown is the owner dropping it, nothing else empties slots.
#[derive(Debug, Default)]
pub struct MealLedger {
    slots: BTreeMap<MealSlot, Vec<LoggedItem>>,
}

/// Read-only view of the ledger for the rendering surface
#[derive(Debug, Clone, Serialize)]
pub struct LedgerSnapshot {
    /// Items per slot in day order; empty slots included
    pub slots: Vec<(MealSlot, Vec<LoggedItem>)>,
    /// Element-wise totals over every item in every slot
    pub totals: Macros,
}

impl MealLedger {
    /// Create an empty ledger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot of `record` to `slot`
    ///
    /// No dedup on purpose: logging the same item twice means two servings
    /// were eaten. The stored item is a copy, never an alias into analysis
    /// state.
    pub fn add_item(&mut self, slot: MealSlot, record: &NutritionRecord) {
        let item = LoggedItem::snapshot(record);
        debug!(slot = slot.display_name(), food = %record.display_name, "logging item");
        self.slots.entry(slot).or_default().push(item);
    }

    /// Remove the item at `position` (0-based display order) from `slot`
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an out-of-range position; nothing is mutated.
    pub fn remove_item(&mut self, slot: MealSlot, position: usize) -> AppResult<LoggedItem> {
        let items = self.slots.entry(slot).or_default();
        if position >= items.len() {
            return Err(AppError::invalid_input(format!(
                "no item at position {position} in {} ({} logged)",
                slot.display_name(),
                items.len()
            )));
        }
        Ok(items.remove(position))
    }

    /// Items logged under `slot`, in insertion order
    #[must_use]
    pub fn items(&self, slot: MealSlot) -> &[LoggedItem] {
        self.slots.get(&slot).map_or(&[], Vec::as_slice)
    }

    /// Total number of logged items across all slots
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    /// True when nothing has been logged yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.values().all(Vec::is_empty)
    }

    /// Element-wise macro sum over every logged item in every slot
    ///
    /// O(total logged items), recomputed per call.
    #[must_use]
    pub fn totals(&self) -> Macros {
        self.slots
            .values()
            .flatten()
            .fold(Macros::ZERO, |acc, item| acc.add(item.record.totals))
    }

    /// Plain-data snapshot for the rendering surface
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            slots: MealSlot::ALL
                .iter()
                .map(|slot| (*slot, self.items(*slot).to_vec()))
                .collect(),
            totals: self.totals(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceKind;

    fn record(name: &str, macros: Macros) -> NutritionRecord {
        NutritionRecord {
            display_name: name.to_owned(),
            totals: macros,
            components: Vec::new(),
            source_kind: SourceKind::Database,
            summary: None,
        }
    }

    #[test]
    fn identical_items_both_persist() {
        let mut ledger = MealLedger::new();
        let pizza = record("Pizza", Macros::new(266.0, 11.0, 33.0, 10.0));
        ledger.add_item(MealSlot::Lunch, &pizza);
        ledger.add_item(MealSlot::Lunch, &pizza);
        assert_eq!(ledger.items(MealSlot::Lunch).len(), 2);
        assert_eq!(ledger.totals().calories, 532.0);
    }

    #[test]
    fn remove_out_of_range_reports_and_keeps_state() {
        let mut ledger = MealLedger::new();
        let pizza = record("Pizza", Macros::new(266.0, 11.0, 33.0, 10.0));
        ledger.add_item(MealSlot::Dinner, &pizza);
        assert!(ledger.remove_item(MealSlot::Dinner, 1).is_err());
        assert!(ledger.remove_item(MealSlot::Breakfast, 0).is_err());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn snapshot_lists_all_slots_in_day_order() {
        let ledger = MealLedger::new();
        let snap = ledger.snapshot();
        let order: Vec<MealSlot> = snap.slots.iter().map(|(slot, _)| *slot).collect();
        assert_eq!(order, MealSlot::ALL.to_vec());
        assert_eq!(snap.totals, Macros::ZERO);
    }
}
