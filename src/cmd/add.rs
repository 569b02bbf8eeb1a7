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
use std::io::Read;

use crate::error::Fallible;
use crate::error::fail;
use crate::summarize::summarizer_for;
use crate::types::timestamp::Timestamp;
use crate::workspace::Workspace;

/// Read a topic's notes from a file or stdin, summarize them with the
/// configured backend, and save both.
pub fn add_notes(directory: Option<String>, topic: &str, file: Option<String>) -> Fallible<()> {
    let workspace = Workspace::open(directory)?;
    let text = match file {
        Some(path) => read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let text = text.trim();
    if text.is_empty() {
        return fail("no notes to save.");
    }
    if topic.trim().is_empty() {
        return fail("topic name must not be empty.");
    }
    let summarizer = summarizer_for(&workspace.config.summarizer);
    let summary = summarizer.summarize(text);
    workspace
        .db
        .upsert_note(topic, text, &summary, Timestamp::now())?;
    println!("Saved notes for '{topic}'.");
    println!();
    println!("{summary}");
    Ok(())
}
