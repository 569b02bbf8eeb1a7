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

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::error::Fallible;
use crate::error::fail;
use crate::ledger::AttemptLedger;
use crate::types::date::Date;
use crate::types::item::Item;
use crate::types::quality::Quality;
use crate::types::quality::QualityPolicy;
use crate::types::timestamp::Timestamp;

/// One review session over the items due today. Each transition is
/// driven by a single submitted answer; abandoning the session writes
/// nothing for the item on screen.
pub struct QuizSession {
    ledger: AttemptLedger,
    policy: QualityPolicy,
    queue: VecDeque<Item>,
    state: SessionState,
    total: usize,
    answered: usize,
    correct: usize,
}

enum SessionState {
    /// An item is on screen, waiting for the user's selection.
    AwaitingAnswer { item: Item, options: Vec<String> },
    Complete,
}

/// The prompt and answer options for the item on screen.
pub struct Prompt<'a> {
    pub prompt: &'a str,
    pub options: &'a [String],
}

pub struct AnswerOutcome {
    pub correct: bool,
    pub quality: Quality,
    pub correct_answer: String,
}

impl QuizSession {
    /// Start a session over the items due as of `today`, optionally
    /// restricted to one topic. With nothing due, the session starts
    /// complete.
    pub fn start(
        ledger: AttemptLedger,
        policy: QualityPolicy,
        today: Date,
        topic: Option<&str>,
    ) -> Fallible<Self> {
        let due = ledger.due_items(today)?;
        let mut items = Vec::new();
        for item_id in due {
            let item = ledger.item(item_id)?;
            if topic.is_none_or(|t| item.topic() == t) {
                items.push(item);
            }
        }
        items.shuffle(&mut thread_rng());
        log::debug!("Starting session with {} due items.", items.len());
        let mut session = Self {
            ledger,
            policy,
            total: items.len(),
            queue: items.into(),
            state: SessionState::Complete,
            answered: 0,
            correct: 0,
        };
        session.advance();
        Ok(session)
    }

    /// The current prompt, or None once the session is complete.
    pub fn prompt(&self) -> Option<Prompt<'_>> {
        match &self.state {
            SessionState::AwaitingAnswer { item, options } => Some(Prompt {
                prompt: item.prompt(),
                options,
            }),
            SessionState::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, SessionState::Complete)
    }

    /// Score the selected answer, record it through the ledger, and
    /// advance to the next item. On a storage failure the session is
    /// left exactly where it was, so the same answer can be retried.
    pub fn submit_answer(&mut self, selected: &str, now: Timestamp) -> Fallible<AnswerOutcome> {
        let (item_id, correct_answer) = match &self.state {
            SessionState::AwaitingAnswer { item, .. } => {
                (item.id(), item.answer().to_string())
            }
            SessionState::Complete => return fail("the session is already complete."),
        };
        let correct = selected == correct_answer;
        let quality = self.policy.quality_for(correct);
        self.ledger.record(item_id, quality, now)?;
        self.answered += 1;
        if correct {
            self.correct += 1;
        }
        self.advance();
        Ok(AnswerOutcome {
            correct,
            quality,
            correct_answer,
        })
    }

    /// The number of items presented over the whole session.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn answered(&self) -> usize {
        self.answered
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    fn advance(&mut self) {
        self.state = match self.queue.pop_front() {
            Some(item) => {
                let options = shuffled_options(&item);
                SessionState::AwaitingAnswer { item, options }
            }
            None => SessionState::Complete,
        };
    }
}

/// The correct answer and the distractors, in randomized order.
fn shuffled_options(item: &Item) -> Vec<String> {
    let mut options: Vec<String> = Vec::with_capacity(item.distractors().len() + 1);
    options.push(item.answer().to_string());
    options.extend(item.distractors().iter().cloned());
    options.shuffle(&mut thread_rng());
    options
}
