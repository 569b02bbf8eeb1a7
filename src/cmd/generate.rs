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

use crate::error::Fallible;
use crate::error::fail;
use crate::quizgen::ClozeGenerator;
use crate::quizgen::ItemGenerator;
use crate::types::timestamp::Timestamp;
use crate::workspace::Workspace;

/// Generate quiz items from a topic's stored summary and add them to
/// the database. Regenerating is harmless: items are content-addressed,
/// so duplicates are skipped.
pub fn generate_items(directory: Option<String>, topic: &str) -> Fallible<()> {
    let workspace = Workspace::open(directory)?;
    let note = match workspace.db.get_note(topic)? {
        Some(note) => note,
        None => return fail(format!("no saved notes for topic '{topic}'.")),
    };
    let generator = ClozeGenerator {
        distractors: workspace.config.quiz.distractors,
    };
    let mut items = generator.generate(
        topic,
        &note.summary,
        workspace.config.quiz.questions,
        Timestamp::now(),
    );
    if items.is_empty() {
        // A very short summary may not contain a usable sentence. Fall
        // back to the raw notes.
        items = generator.generate(
            topic,
            &note.raw_text,
            workspace.config.quiz.questions,
            Timestamp::now(),
        );
    }
    if items.is_empty() {
        return fail("the notes are too short to generate questions from.");
    }
    let mut added = 0;
    for item in &items {
        if workspace.db.insert_item(item)? {
            added += 1;
        }
    }
    println!("Generated {} questions for '{topic}' ({added} new).", items.len());
    Ok(())
}
