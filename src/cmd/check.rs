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
use crate::ledger::AttemptLedger;
use crate::workspace::Workspace;

/// Run SQLite's integrity check, then verify that every item's stored
/// review state matches a replay of its attempt history.
pub fn check_database(directory: Option<String>) -> Fallible<()> {
    let workspace = Workspace::open(directory)?;
    let verdict = workspace.db.integrity_check()?;
    if verdict != "ok" {
        return fail(format!("integrity check failed: {verdict}"));
    }
    let ledger = AttemptLedger::new(workspace.db.clone());
    for item_id in workspace.db.item_ids()? {
        let stored = ledger.state(item_id)?;
        let replayed = ledger.replay_state(item_id)?;
        if stored != replayed {
            return fail(format!(
                "review state for item {} does not match its attempt history.",
                item_id
            ));
        }
    }
    println!("ok");
    Ok(())
}
