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

//! The summarization capability. The rest of the program treats this as
//! an opaque text-to-text service: the backend is chosen from the
//! config at startup, never at the call site.

use std::collections::HashMap;

use crate::config::SummarizerBackend;
use crate::config::SummarizerConfig;

pub trait Summarizer {
    fn summarize(&self, text: &str) -> String;
}

pub fn summarizer_for(config: &SummarizerConfig) -> Box<dyn Summarizer> {
    match config.backend {
        SummarizerBackend::Lead => Box::new(LeadSummarizer {
            max_sentences: config.max_sentences,
        }),
        SummarizerBackend::Frequency => Box::new(FrequencySummarizer {
            max_sentences: config.max_sentences,
        }),
    }
}

/// Takes the first N sentences of the text.
pub struct LeadSummarizer {
    pub max_sentences: usize,
}

impl Summarizer for LeadSummarizer {
    fn summarize(&self, text: &str) -> String {
        let sentences = split_sentences(text);
        if sentences.len() <= self.max_sentences {
            return text.trim().to_string();
        }
        sentences[..self.max_sentences].join(" ")
    }
}

/// Extractive summarizer: scores each sentence by the document-wide
/// frequency of its words, keeps the top N, and emits them in document
/// order.
pub struct FrequencySummarizer {
    pub max_sentences: usize,
}

impl Summarizer for FrequencySummarizer {
    fn summarize(&self, text: &str) -> String {
        let sentences = split_sentences(text);
        if sentences.len() <= self.max_sentences {
            return text.trim().to_string();
        }
        let frequencies = word_frequencies(text);
        let mut ranked: Vec<(usize, f64)> = sentences
            .iter()
            .enumerate()
            .map(|(index, sentence)| (index, sentence_score(sentence, &frequencies)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        let mut kept: Vec<usize> = ranked[..self.max_sentences]
            .iter()
            .map(|(index, _)| *index)
            .collect();
        kept.sort_unstable();
        kept.into_iter()
            .map(|index| sentences[index].clone())
            .collect::<Vec<String>>()
            .join(" ")
    }
}

/// Split text into sentences on terminal punctuation. Whitespace runs
/// are collapsed, so pasted notes with ragged line breaks behave.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
        if word.ends_with(['.', '!', '?']) {
            sentences.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }
    sentences
}

fn word_frequencies(text: &str) -> HashMap<String, usize> {
    let mut frequencies = HashMap::new();
    for word in significant_words(text) {
        *frequencies.entry(word).or_insert(0) += 1;
    }
    frequencies
}

fn sentence_score(sentence: &str, frequencies: &HashMap<String, usize>) -> f64 {
    let words: Vec<String> = significant_words(sentence).collect();
    if words.is_empty() {
        return 0.0;
    }
    let total: usize = words
        .iter()
        .map(|word| frequencies.get(word).copied().unwrap_or(0))
        .sum();
    total as f64 / words.len() as f64
}

/// Lowercased alphabetic words long enough to carry meaning. Short
/// function words are skipped in place of a stopword list.
fn significant_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|word| word.len() > 3 && word.chars().all(char::is_alphabetic))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Mitochondria produce energy. The cell wall protects plants. \
        Mitochondria contain their own genome. Energy production happens in mitochondria. \
        Ribosomes build proteins.";

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("One. Two!  Three?\nFour");
        assert_eq!(sentences, vec!["One.", "Two!", "Three?", "Four"]);
    }

    #[test]
    fn test_short_text_is_returned_whole() {
        let lead = LeadSummarizer { max_sentences: 5 };
        assert_eq!(lead.summarize("Just one sentence."), "Just one sentence.");
    }

    #[test]
    fn test_lead_takes_first_sentences() {
        let lead = LeadSummarizer { max_sentences: 2 };
        assert_eq!(
            lead.summarize(TEXT),
            "Mitochondria produce energy. The cell wall protects plants."
        );
    }

    #[test]
    fn test_frequency_keeps_document_order() {
        let summarizer = FrequencySummarizer { max_sentences: 2 };
        let summary = summarizer.summarize(TEXT);
        let sentences = split_sentences(&summary);
        assert_eq!(sentences.len(), 2);
        // Kept sentences appear in their original order.
        let first = TEXT.find(&sentences[0]).unwrap();
        let second = TEXT.find(&sentences[1]).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_frequency_prefers_repeated_terms() {
        let summarizer = FrequencySummarizer { max_sentences: 1 };
        let summary = summarizer.summarize(TEXT);
        // "Mitochondria" dominates the document; the kept sentence
        // mentions it.
        assert!(summary.to_lowercase().contains("mitochondria"));
    }
}
