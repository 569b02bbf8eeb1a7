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
use crate::ledger::AttemptLedger;
use crate::types::date::Date;
use crate::types::item::Item;
use crate::workspace::Workspace;

/// List the items due today and the reviews coming up in the window.
pub fn print_due(directory: Option<String>, days: i64) -> Fallible<()> {
    let workspace = Workspace::open(directory)?;
    let ledger = AttemptLedger::new(workspace.db.clone());
    let today = Date::today();

    let due_now = ledger.due_items(today)?;
    if due_now.is_empty() {
        println!("No items due today.");
    } else {
        println!("Due today ({}):", due_now.len());
        let mut items: Vec<Item> = Vec::new();
        for item_id in due_now {
            items.push(ledger.item(item_id)?);
        }
        items.sort_by(|a, b| {
            a.topic()
                .cmp(b.topic())
                .then_with(|| a.prompt().cmp(b.prompt()))
        });
        for item in items {
            println!("  [{}] {}", item.topic(), item.prompt());
        }
    }

    let upcoming = ledger.upcoming(today, days)?;
    if !upcoming.is_empty() {
        println!();
        println!("Upcoming (next {days} days):");
        for (item_id, due_date) in upcoming {
            let item = ledger.item(item_id)?;
            println!("  {due_date} [{}] {}", item.topic(), item.prompt());
        }
    }
    Ok(())
}
