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

use crate::error::Error;
use crate::error::Fallible;
use crate::ledger::AttemptLedger;
use crate::session::QuizSession;
use crate::types::date::Date;
use crate::types::timestamp::Timestamp;
use crate::workspace::Workspace;

/// Run a review session over the items due today in the terminal.
pub fn drill(directory: Option<String>, topic: Option<String>) -> Fallible<()> {
    let workspace = Workspace::open(directory)?;
    let policy = workspace.config.quality_policy()?;
    let ledger = AttemptLedger::new(workspace.db.clone());
    let mut session = QuizSession::start(ledger, policy, Date::today(), topic.as_deref())?;
    if session.is_complete() {
        println!("No items due today.");
        return Ok(());
    }
    println!("{} items due.", session.total());

    loop {
        let (prompt, options) = match session.prompt() {
            Some(prompt) => (prompt.prompt.to_string(), prompt.options.to_vec()),
            None => break,
        };
        println!();
        println!("Q: {prompt}");
        for (index, option) in options.iter().enumerate() {
            println!("  {}) {option}", index + 1);
        }
        let selected = match read_selection(options.len())? {
            Some(index) => options[index].clone(),
            None => {
                // Abandoned: the item on screen is left unrecorded.
                println!("Session abandoned.");
                return Ok(());
            }
        };
        match session.submit_answer(&selected, Timestamp::now()) {
            Ok(outcome) => {
                log::debug!("Recorded quality {}.", outcome.quality);
                if outcome.correct {
                    println!("Correct!");
                } else {
                    println!("Incorrect. The answer is: {}", outcome.correct_answer);
                }
            }
            Err(Error::Storage(e)) => {
                log::error!("save failed: {e}");
                println!("Save failed, your answer was not recorded. Try again.");
            }
            Err(e) => return Err(e),
        }
    }

    println!();
    println!(
        "Session complete: {}/{} correct.",
        session.correct(),
        session.answered()
    );
    Ok(())
}

fn read_selection(count: usize) -> Fallible<Option<usize>> {
    loop {
        println!("Answer: (1-{count}, or q to quit)");
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        let input = input.trim();
        if input.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match input.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => return Ok(Some(n - 1)),
            _ => println!("Invalid input. Please enter a number between 1 and {count}."),
        }
    }
}
