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

use crate::types::item_id::Hasher;
use crate::types::item_id::ItemId;
use crate::types::timestamp::Timestamp;

/// A multiple-choice quiz item. Immutable once created: the id is the
/// hash of the content, so editing the text produces a different item.
#[derive(Clone, Debug)]
pub struct Item {
    /// The topic whose summary this item was generated from.
    topic: String,
    /// The prompt shown to the user.
    prompt: String,
    /// The correct answer.
    answer: String,
    /// The incorrect answer options.
    distractors: Vec<String>,
    created_at: Timestamp,
    /// The cached hash of the item's content.
    id: ItemId,
}

impl Item {
    pub fn new(
        topic: impl Into<String>,
        prompt: impl Into<String>,
        answer: impl Into<String>,
        distractors: Vec<String>,
        created_at: Timestamp,
    ) -> Self {
        let topic = topic.into();
        let prompt = prompt.into().trim().to_string();
        let answer = answer.into().trim().to_string();
        let id = hash_content(&topic, &prompt, &answer, &distractors);
        Self {
            topic,
            prompt,
            answer,
            distractors,
            created_at,
            id,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn distractors(&self) -> &[String] {
        &self.distractors
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

fn hash_content(topic: &str, prompt: &str, answer: &str, distractors: &[String]) -> ItemId {
    let mut hasher = Hasher::new();
    hasher.update(b"Item");
    hasher.update(topic.as_bytes());
    hasher.update(&[0]);
    hasher.update(prompt.as_bytes());
    hasher.update(&[0]);
    hasher.update(answer.as_bytes());
    for distractor in distractors {
        hasher.update(&[0]);
        hasher.update(distractor.as_bytes());
    }
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distractors() -> Vec<String> {
        vec!["Lyon".to_string(), "Marseille".to_string()]
    }

    #[test]
    fn test_same_content_same_id() {
        let now = Timestamp::now();
        let a = Item::new("france", "Capital of France?", "Paris", distractors(), now);
        let b = Item::new("france", "Capital of France?", "Paris", distractors(), now);
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_edit_creates_new_id() {
        let now = Timestamp::now();
        let a = Item::new("france", "Capital of France?", "Paris", distractors(), now);
        let b = Item::new("france", "Capital of France?", "Lyon", distractors(), now);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_prompt_is_trimmed() {
        let item = Item::new("t", "  What?  ", "This", Vec::new(), Timestamp::now());
        assert_eq!(item.prompt(), "What?");
    }
}
