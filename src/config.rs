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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::types::quality::Quality;
use crate::types::quality::QualityPolicy;

/// Settings from `studycoach.toml` in the workspace directory. Every
/// field is optional; a missing file means all defaults.
#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct Config {
    pub summarizer: SummarizerConfig,
    pub quiz: QuizConfig,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct SummarizerConfig {
    pub backend: SummarizerBackend,
    /// How many sentences a summary keeps.
    pub max_sentences: usize,
}

#[derive(Deserialize, Default, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum SummarizerBackend {
    /// First sentences of the text.
    Lead,
    /// Frequency-ranked sentences.
    #[default]
    Frequency,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct QuizConfig {
    /// How many items one generation pass produces.
    pub questions: usize,
    /// How many incorrect options accompany the correct answer.
    pub distractors: usize,
    pub correct_quality: u8,
    pub incorrect_quality: u8,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            backend: SummarizerBackend::default(),
            max_sentences: 5,
        }
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions: 5,
            distractors: 3,
            correct_quality: 5,
            incorrect_quality: 1,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// The correctness-to-quality mapping. Fails with `InvalidQuality`
    /// if the configured scores are out of range.
    pub fn quality_policy(&self) -> Fallible<QualityPolicy> {
        Ok(QualityPolicy {
            on_correct: Quality::new(self.quiz.correct_quality)?,
            on_incorrect: Quality::new(self.quiz.incorrect_quality)?,
        })
    }
}
