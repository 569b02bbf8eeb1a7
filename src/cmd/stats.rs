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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;

use crate::error::Fallible;
use crate::stats::build_report;
use crate::workspace::Workspace;

#[derive(ValueEnum, Clone)]
pub enum StatsFormat {
    /// Human-readable output.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_stats(directory: Option<String>, format: StatsFormat) -> Fallible<()> {
    let workspace = Workspace::open(directory)?;
    let report = build_report(&workspace.db)?;
    match format {
        StatsFormat::Json => {
            let report_json = serde_json::to_string_pretty(&report)?;
            println!("{}", report_json);
        }
        StatsFormat::Text => {
            println!("Items: {}", report.item_count);
            println!("Attempts: {}", report.attempt_count);
            if !report.daily_averages.is_empty() {
                println!();
                println!("Daily average quality:");
                for daily in &report.daily_averages {
                    println!(
                        "  {}  {:.2} ({} attempts)",
                        daily.date, daily.average_quality, daily.attempt_count
                    );
                }
            }
            if !report.topic_strengths.is_empty() {
                println!();
                println!("Topic strengths (weakest first):");
                for topic in &report.topic_strengths {
                    println!(
                        "  {:.2}  {} ({} attempts)",
                        topic.average_quality, topic.topic, topic.attempt_count
                    );
                }
            }
        }
    }
    Ok(())
}
