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

use clap::Parser;

use crate::cmd::add::add_notes;
use crate::cmd::check::check_database;
use crate::cmd::drill::drill;
use crate::cmd::due::print_due;
use crate::cmd::generate::generate_items;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::cmd::topics::print_topics;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Summarize and save notes for a topic.
    Add {
        /// The topic the notes belong to.
        topic: String,
        /// Read the notes from this file instead of stdin.
        #[arg(long)]
        file: Option<String>,
        /// Optional path to the workspace directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Generate quiz items from a topic's summary.
    Generate {
        /// The topic to generate questions for.
        topic: String,
        /// Optional path to the workspace directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Review the items that are due today.
    Drill {
        /// Only drill items from this topic.
        #[arg(long)]
        topic: Option<String>,
        /// Optional path to the workspace directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// List due and upcoming reviews.
    Due {
        /// How many days ahead to look.
        #[arg(long, default_value_t = 7)]
        days: i64,
        /// Optional path to the workspace directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Print performance statistics.
    Stats {
        /// Output format.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
        /// Optional path to the workspace directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// List saved topics, most recently updated first.
    Topics {
        /// Optional path to the workspace directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Check the database for corruption.
    Check {
        /// Optional path to the workspace directory.
        #[arg(long)]
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Add {
            topic,
            file,
            directory,
        } => add_notes(directory, &topic, file),
        Command::Generate { topic, directory } => generate_items(directory, &topic),
        Command::Drill { topic, directory } => drill(directory, topic),
        Command::Due { days, directory } => print_due(directory, days),
        Command::Stats { format, directory } => print_stats(directory, format),
        Command::Topics { directory } => print_topics(directory),
        Command::Check { directory } => check_database(directory),
    }
}
