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
use crate::workspace::Workspace;

pub fn print_topics(directory: Option<String>) -> Fallible<()> {
    let workspace = Workspace::open(directory)?;
    let topics = workspace.db.topics()?;
    if topics.is_empty() {
        println!("No topics saved.");
        return Ok(());
    }
    for topic in topics {
        match workspace.db.get_note(&topic)? {
            Some(note) => println!(
                "{}  (updated {})",
                note.topic,
                note.last_updated.local_date()
            ),
            None => println!("{topic}"),
        }
    }
    Ok(())
}
