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

//! The SM-2 review scheduler. `update` is a pure function of the prior
//! state, the attempt's quality score, and the review date; persistence
//! belongs to the caller.

use crate::types::date::Date;
use crate::types::quality::Quality;
use crate::types::review_state::ReviewState;

/// The ease factor of an item that has never been reviewed.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// The floor below which an ease factor never drops.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// The interval after the first successful review, in days.
const FIRST_INTERVAL: i64 = 1;

/// The interval after the second successful review, in days.
const SECOND_INTERVAL: i64 = 6;

/// Compute the state following an attempt.
///
/// A failing score (below 3) resets the repetition count and puts the
/// item one day out. A passing score grows the interval: one day, six
/// days, then the previous interval times the updated ease factor.
pub fn update(state: &ReviewState, quality: Quality, today: Date) -> ReviewState {
    let q = quality.as_u8() as f64;
    let ease_factor = state.ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02));
    let ease_factor = ease_factor.max(MIN_EASE_FACTOR);
    let (repetitions, interval_days) = if quality.is_passing() {
        let repetitions = state.repetitions + 1;
        let interval_days = match repetitions {
            1 => FIRST_INTERVAL,
            2 => SECOND_INTERVAL,
            _ => (state.interval_days as f64 * ease_factor).round() as i64,
        };
        (repetitions, interval_days)
    } else {
        (0, FIRST_INTERVAL)
    };
    ReviewState {
        ease_factor,
        interval_days,
        repetitions,
        due_date: today.plus_days(interval_days),
        last_reviewed: Some(today),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::error::Fallible;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn state(ease_factor: f64, interval_days: i64, repetitions: u32) -> ReviewState {
        ReviewState {
            ease_factor,
            interval_days,
            repetitions,
            due_date: date(2026, 8, 1),
            last_reviewed: None,
        }
    }

    #[test]
    fn test_fresh_item_scored_five() -> Fallible<()> {
        let today = date(2026, 8, 1);
        let new = update(&ReviewState::new(today), Quality::new(5)?, today);
        assert_eq!(new.repetitions, 1);
        assert_eq!(new.interval_days, 1);
        assert_eq!(new.due_date, date(2026, 8, 2));
        assert_eq!(new.last_reviewed, Some(today));
        Ok(())
    }

    #[test]
    fn test_second_success_is_six_days() -> Fallible<()> {
        let today = date(2026, 8, 1);
        let new = update(&state(2.5, 1, 1), Quality::new(4)?, today);
        assert_eq!(new.repetitions, 2);
        assert_eq!(new.interval_days, 6);
        assert_eq!(new.due_date, date(2026, 8, 7));
        Ok(())
    }

    #[test]
    fn test_third_success_multiplies_by_new_ease() -> Fallible<()> {
        // Quality 5 lifts the ease factor from 2.5 to 2.6 before the
        // interval is computed: round(6 * 2.6) = 16.
        let today = date(2026, 8, 1);
        let new = update(&state(2.5, 6, 2), Quality::new(5)?, today);
        assert_eq!(new.repetitions, 3);
        assert!((new.ease_factor - 2.6).abs() < 1e-9);
        assert_eq!(new.interval_days, 16);
        assert_eq!(new.due_date, date(2026, 8, 17));
        Ok(())
    }

    #[test]
    fn test_failure_resets() -> Fallible<()> {
        let today = date(2026, 8, 1);
        for q in 0..3 {
            let new = update(&state(2.5, 120, 9), Quality::new(q)?, today);
            assert_eq!(new.repetitions, 0);
            assert_eq!(new.interval_days, 1);
            assert_eq!(new.due_date, date(2026, 8, 2));
        }
        Ok(())
    }

    #[test]
    fn test_ease_floor() -> Fallible<()> {
        let today = date(2026, 8, 1);
        let mut current = ReviewState::new(today);
        for _ in 0..10 {
            current = update(&current, Quality::new(0)?, today);
            assert!(current.ease_factor >= MIN_EASE_FACTOR);
        }
        assert!((current.ease_factor - MIN_EASE_FACTOR).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_ease_has_no_upper_bound() -> Fallible<()> {
        let today = date(2026, 8, 1);
        let new = update(&state(4.0, 6, 2), Quality::new(5)?, today);
        assert!((new.ease_factor - 4.1).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_quality_three_keeps_ease() -> Fallible<()> {
        // q=3: delta = 0.1 - 2 * (0.08 + 2 * 0.02) = -0.14.
        let today = date(2026, 8, 1);
        let new = update(&state(2.5, 1, 1), Quality::new(3)?, today);
        assert!((new.ease_factor - 2.36).abs() < 1e-9);
        assert_eq!(new.repetitions, 2);
        Ok(())
    }

    #[test]
    fn test_deterministic() -> Fallible<()> {
        let today = date(2026, 8, 1);
        let prior = state(2.17, 14, 4);
        let a = update(&prior, Quality::new(4)?, today);
        let b = update(&prior, Quality::new(4)?, today);
        assert_eq!(a, b);
        Ok(())
    }
}
