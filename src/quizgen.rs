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

//! The quiz-generation capability. The ledger only needs the resulting
//! items to exist; how they are produced is opaque to the scheduler.

use rand::Rng;
use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::summarize::split_sentences;
use crate::types::item::Item;
use crate::types::timestamp::Timestamp;

/// Shortest sentence worth turning into a question, in words.
const MIN_SENTENCE_WORDS: usize = 8;

/// Longest sentence worth turning into a question, in words.
const MAX_SENTENCE_WORDS: usize = 40;

pub trait ItemGenerator {
    fn generate(
        &self,
        topic: &str,
        summary: &str,
        count: usize,
        created_at: Timestamp,
    ) -> Vec<Item>;
}

/// Fill-in-the-blank generator: takes a mid-length sentence, blanks out
/// one word, and samples distractors from the rest of the text.
pub struct ClozeGenerator {
    /// How many incorrect options to attach to each item.
    pub distractors: usize,
}

impl ItemGenerator for ClozeGenerator {
    fn generate(
        &self,
        topic: &str,
        summary: &str,
        count: usize,
        created_at: Timestamp,
    ) -> Vec<Item> {
        let mut rng = thread_rng();
        let mut sentences: Vec<String> = split_sentences(summary)
            .into_iter()
            .filter(|sentence| {
                let words = sentence.split_whitespace().count();
                (MIN_SENTENCE_WORDS..=MAX_SENTENCE_WORDS).contains(&words)
            })
            .collect();
        sentences.shuffle(&mut rng);

        let pool = distractor_pool(summary);
        let mut items = Vec::new();
        for sentence in sentences {
            if items.len() == count {
                break;
            }
            let words: Vec<&str> = sentence.split_whitespace().collect();
            // Blank a word away from the sentence edges.
            let blank = rng.gen_range(2..words.len() - 2);
            let answer = words[blank].trim_matches(|c: char| !c.is_alphanumeric());
            if answer.is_empty() {
                continue;
            }
            let mut prompt_words = words.clone();
            prompt_words[blank] = "____";
            let prompt = prompt_words.join(" ");
            let distractors = sample_distractors(&pool, answer, self.distractors, &mut rng);
            if distractors.is_empty() {
                continue;
            }
            items.push(Item::new(topic, prompt, answer, distractors, created_at));
        }
        items
    }
}

/// The unique alphabetic words of the text, candidates for wrong
/// answers.
fn distractor_pool(text: &str) -> Vec<String> {
    let mut pool: Vec<String> = text
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|word| word.len() > 3 && word.chars().all(char::is_alphabetic))
        .collect();
    pool.sort_unstable();
    pool.dedup();
    pool
}

fn sample_distractors(
    pool: &[String],
    answer: &str,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<String> {
    let candidates: Vec<&String> = pool
        .iter()
        .filter(|word| !word.eq_ignore_ascii_case(answer))
        .collect();
    candidates
        .choose_multiple(rng, count)
        .map(|word| word.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY: &str = "The mitochondria are the powerhouse of the living cell. \
        Plant cells have rigid walls made of tough cellulose fibers instead. \
        Ribosomes assemble proteins from amino acids inside every living cell.";

    fn generate() -> Vec<Item> {
        let generator = ClozeGenerator { distractors: 3 };
        generator.generate("biology", SUMMARY, 3, Timestamp::now())
    }

    #[test]
    fn test_generates_requested_count() {
        assert_eq!(generate().len(), 3);
    }

    #[test]
    fn test_prompt_contains_blank() {
        for item in generate() {
            assert!(item.prompt().contains("____"));
            assert_eq!(item.topic(), "biology");
        }
    }

    #[test]
    fn test_answer_fills_the_blank() {
        for item in generate() {
            let restored = item.prompt().replace("____", item.answer());
            // Every restored word appears in the source text.
            for word in restored.split_whitespace() {
                assert!(SUMMARY.contains(word.trim_matches(|c: char| !c.is_alphanumeric())));
            }
        }
    }

    #[test]
    fn test_distractors_exclude_answer() {
        for item in generate() {
            assert!(!item.distractors().is_empty());
            assert!(item.distractors().len() <= 3);
            for distractor in item.distractors() {
                assert!(!distractor.eq_ignore_ascii_case(item.answer()));
            }
        }
    }

    #[test]
    fn test_short_text_yields_nothing() {
        let generator = ClozeGenerator { distractors: 3 };
        let items = generator.generate("biology", "Too short.", 3, Timestamp::now());
        assert!(items.is_empty());
    }
}
