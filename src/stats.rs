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

//! Performance statistics computed from the attempt ledger. This module
//! only computes; rendering the numbers is the consumer's problem.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::db::AttemptRecord;
use crate::db::Database;
use crate::error::Fallible;
use crate::types::date::Date;
use crate::types::timestamp::Timestamp;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub item_count: usize,
    pub attempt_count: usize,
    /// Every attempt in order, the raw series behind any chart.
    pub performance_over_time: Vec<PerformancePoint>,
    /// Mean quality per calendar day.
    pub daily_averages: Vec<DailyAverage>,
    /// Mean quality per topic, weakest first.
    pub topic_strengths: Vec<TopicStrength>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePoint {
    pub recorded_at: Timestamp,
    pub topic: String,
    pub quality: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAverage {
    pub date: Date,
    pub average_quality: f64,
    pub attempt_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicStrength {
    pub topic: String,
    pub average_quality: f64,
    pub attempt_count: usize,
}

pub fn build_report(db: &Database) -> Fallible<Report> {
    let log = db.attempt_log()?;
    Ok(Report {
        item_count: db.item_count()?,
        attempt_count: log.len(),
        performance_over_time: performance_over_time(&log),
        daily_averages: daily_averages(&log),
        topic_strengths: topic_strengths(&log),
    })
}

fn performance_over_time(log: &[AttemptRecord]) -> Vec<PerformancePoint> {
    log.iter()
        .map(|record| PerformancePoint {
            recorded_at: record.recorded_at,
            topic: record.topic.clone(),
            quality: record.quality.as_u8(),
        })
        .collect()
}

fn daily_averages(log: &[AttemptRecord]) -> Vec<DailyAverage> {
    let mut by_day: BTreeMap<Date, (u64, usize)> = BTreeMap::new();
    for record in log {
        let entry = by_day.entry(record.recorded_at.local_date()).or_insert((0, 0));
        entry.0 += record.quality.as_u8() as u64;
        entry.1 += 1;
    }
    by_day
        .into_iter()
        .map(|(date, (sum, count))| DailyAverage {
            date,
            average_quality: sum as f64 / count as f64,
            attempt_count: count,
        })
        .collect()
}

fn topic_strengths(log: &[AttemptRecord]) -> Vec<TopicStrength> {
    let mut by_topic: BTreeMap<String, (u64, usize)> = BTreeMap::new();
    for record in log {
        let entry = by_topic.entry(record.topic.clone()).or_insert((0, 0));
        entry.0 += record.quality.as_u8() as u64;
        entry.1 += 1;
    }
    let mut strengths: Vec<TopicStrength> = by_topic
        .into_iter()
        .map(|(topic, (sum, count))| TopicStrength {
            topic,
            average_quality: sum as f64 / count as f64,
            attempt_count: count,
        })
        .collect();
    strengths.sort_by(|a, b| a.average_quality.total_cmp(&b.average_quality));
    strengths
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::ledger::AttemptLedger;
    use crate::types::item::Item;
    use crate::types::quality::Quality;

    use super::*;

    #[test]
    fn test_empty_report() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("studycoach.db");
        let db = Database::new(path.to_str().unwrap())?;
        let report = build_report(&db)?;
        assert_eq!(report.item_count, 0);
        assert_eq!(report.attempt_count, 0);
        assert!(report.performance_over_time.is_empty());
        assert!(report.daily_averages.is_empty());
        assert!(report.topic_strengths.is_empty());
        Ok(())
    }

    #[test]
    fn test_aggregates() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("studycoach.db");
        let db = Database::new(path.to_str().unwrap())?;
        db.upsert_note("strong", "text", "summary", Timestamp::now())?;
        db.upsert_note("weak", "text", "summary", Timestamp::now())?;
        let good = Item::new("strong", "An easy prompt?", "Yes", Vec::new(), Timestamp::now());
        let bad = Item::new("weak", "A hard prompt?", "No", Vec::new(), Timestamp::now());
        db.insert_item(&good)?;
        db.insert_item(&bad)?;
        let ledger = AttemptLedger::new(db.clone());
        ledger.record(good.id(), Quality::new(5)?, Timestamp::now())?;
        ledger.record(good.id(), Quality::new(4)?, Timestamp::now())?;
        ledger.record(bad.id(), Quality::new(1)?, Timestamp::now())?;

        let report = build_report(&db)?;
        assert_eq!(report.item_count, 2);
        assert_eq!(report.attempt_count, 3);
        assert_eq!(report.performance_over_time.len(), 3);

        // All three attempts happened today.
        assert_eq!(report.daily_averages.len(), 1);
        let daily = &report.daily_averages[0];
        assert_eq!(daily.attempt_count, 3);
        assert!((daily.average_quality - 10.0 / 3.0).abs() < 1e-9);

        // Weakest topic first.
        assert_eq!(report.topic_strengths.len(), 2);
        assert_eq!(report.topic_strengths[0].topic, "weak");
        assert!((report.topic_strengths[0].average_quality - 1.0).abs() < 1e-9);
        assert_eq!(report.topic_strengths[1].topic, "strong");
        assert!((report.topic_strengths[1].average_quality - 4.5).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_report_serializes_camel_case() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("studycoach.db");
        let db = Database::new(path.to_str().unwrap())?;
        let report = build_report(&db)?;
        let json = serde_json::to_string(&report)?;
        assert!(json.contains("attemptCount"));
        assert!(json.contains("topicStrengths"));
        Ok(())
    }
}
