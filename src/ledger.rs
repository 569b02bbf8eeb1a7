// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashSet;

use crate::db::Database;
use crate::error::Fallible;
use crate::scheduler;
use crate::types::attempt::Attempt;
use crate::types::date::Date;
use crate::types::item::Item;
use crate::types::item_id::ItemId;
use crate::types::quality::Quality;
use crate::types::review_state::ReviewState;
use crate::types::timestamp::Timestamp;

/// The append-only ledger of quiz attempts. Recording an attempt runs
/// the scheduler and persists the attempt and the new review state
/// together.
pub struct AttemptLedger {
    db: Database,
}

impl AttemptLedger {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Record an attempt. Fails with `UnknownItem` if the item does not
    /// exist; on any failure, nothing is written.
    pub fn record(&self, item_id: ItemId, quality: Quality, at: Timestamp) -> Fallible<Attempt> {
        let state = self.db.get_review_state(item_id)?;
        let new_state = scheduler::update(&state, quality, at.local_date());
        log::debug!(
            "{} q={} ef={:.2} ivl={}d due={}",
            &item_id.to_hex()[..8],
            quality,
            new_state.ease_factor,
            new_state.interval_days,
            new_state.due_date
        );
        let attempt = Attempt {
            item_id,
            quality,
            recorded_at: at,
        };
        self.db.record_attempt(&attempt, &new_state)?;
        Ok(attempt)
    }

    /// An item's attempts, oldest first.
    pub fn history(&self, item_id: ItemId) -> Fallible<Vec<Attempt>> {
        self.db.history(item_id)
    }

    /// The set of items due for review as of the given date.
    pub fn due_items(&self, as_of: Date) -> Fallible<HashSet<ItemId>> {
        self.db.due_items(as_of)
    }

    /// Items becoming due within the window after `as_of`.
    pub fn upcoming(&self, as_of: Date, within_days: i64) -> Fallible<Vec<(ItemId, Date)>> {
        self.db.upcoming(as_of, as_of.plus_days(within_days))
    }

    pub fn item(&self, item_id: ItemId) -> Fallible<Item> {
        self.db.get_item(item_id)
    }

    pub fn state(&self, item_id: ItemId) -> Fallible<ReviewState> {
        self.db.get_review_state(item_id)
    }

    /// Recompute an item's review state by folding the scheduler over
    /// its full attempt history. Always equals the stored state: the
    /// state has no side-channel beyond the ledger.
    pub fn replay_state(&self, item_id: ItemId) -> Fallible<ReviewState> {
        let item = self.db.get_item(item_id)?;
        let mut state = ReviewState::new(item.created_at().local_date());
        for attempt in self.history(item_id)? {
            state = scheduler::update(&state, attempt.quality, attempt.recorded_at.local_date());
        }
        Ok(state)
    }
}
