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

use crate::scheduler::INITIAL_EASE_FACTOR;
use crate::types::date::Date;

/// Scheduling state for one item. Created together with the item and
/// mutated only by the scheduler after an attempt.
#[derive(Clone, PartialEq, Debug)]
pub struct ReviewState {
    /// Multiplier controlling how quickly intervals grow. Never below 1.3.
    pub ease_factor: f64,
    /// The current review interval in days.
    pub interval_days: i64,
    /// The number of consecutive successful reviews.
    pub repetitions: u32,
    /// The date the item is next due.
    pub due_date: Date,
    /// The date of the most recent review, absent for a new item.
    pub last_reviewed: Option<Date>,
}

impl ReviewState {
    /// The state of an item that has never been reviewed. Due immediately.
    pub fn new(created: Date) -> Self {
        Self {
            ease_factor: INITIAL_EASE_FACTOR,
            interval_days: 0,
            repetitions: 0,
            due_date: created,
            last_reviewed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_new_state_is_due() {
        let created = Date::new(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        let state = ReviewState::new(created);
        assert_eq!(state.repetitions, 0);
        assert_eq!(state.interval_days, 0);
        assert_eq!(state.due_date, created);
        assert!(state.last_reviewed.is_none());
    }
}
