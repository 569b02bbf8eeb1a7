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

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;

use crate::error::Error;
use crate::error::Fallible;
use crate::types::attempt::Attempt;
use crate::types::date::Date;
use crate::types::item::Item;
use crate::types::item_id::ItemId;
use crate::types::quality::Quality;
use crate::types::review_state::ReviewState;
use crate::types::timestamp::Timestamp;

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

/// A topic's notes: the raw text and its summary.
pub struct Note {
    pub topic: String,
    pub raw_text: String,
    pub summary: String,
    pub last_updated: Timestamp,
}

/// One attempt joined with the topic of the item it belongs to. Input to
/// the statistics report.
pub struct AttemptRecord {
    pub topic: String,
    pub quality: Quality,
    pub recorded_at: Timestamp,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        let conn = Arc::new(Mutex::new(conn));
        Ok(Self { conn })
    }

    /// Insert a topic's notes, replacing any previous version.
    pub fn upsert_note(
        &self,
        topic: &str,
        raw_text: &str,
        summary: &str,
        updated_at: Timestamp,
    ) -> Fallible<()> {
        let sql = "insert into notes (topic, raw_text, summary, last_updated) values (?, ?, ?, ?) on conflict (topic) do update set raw_text = excluded.raw_text, summary = excluded.summary, last_updated = excluded.last_updated;";
        let conn = self.acquire();
        conn.execute(sql, (topic, raw_text, summary, updated_at))?;
        Ok(())
    }

    pub fn get_note(&self, topic: &str) -> Fallible<Option<Note>> {
        let sql = "select topic, raw_text, summary, last_updated from notes where topic = ?;";
        let conn = self.acquire();
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([topic])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Note {
                topic: row.get(0)?,
                raw_text: row.get(1)?,
                summary: row.get(2)?,
                last_updated: row.get(3)?,
            }))
        } else {
            Ok(None)
        }
    }

    /// All topics, most recently updated first.
    pub fn topics(&self) -> Fallible<Vec<String>> {
        let mut topics = Vec::new();
        let conn = self.acquire();
        let mut stmt = conn.prepare("select topic from notes order by last_updated desc;")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            topics.push(row.get(0)?);
        }
        Ok(topics)
    }

    /// Add a new item and its initial review state in one transaction.
    ///
    /// Items are content-addressed, so inserting the same content twice
    /// is a no-op; returns whether a row was actually written.
    pub fn insert_item(&self, item: &Item) -> Fallible<bool> {
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        let exists: i64 = tx.query_row(
            "select count(*) from items where item_id = ?;",
            [item.id()],
            |row| row.get(0),
        )?;
        if exists > 0 {
            return Ok(false);
        }
        log::debug!("Adding new item: {}", item.id());
        let distractors = serde_json::to_string(item.distractors())?;
        tx.execute(
            "insert into items (item_id, topic, prompt, answer, distractors, created_at) values (?, ?, ?, ?, ?, ?);",
            (
                item.id(),
                item.topic(),
                item.prompt(),
                item.answer(),
                &distractors,
                item.created_at(),
            ),
        )?;
        let state = ReviewState::new(item.created_at().local_date());
        insert_review_state(&tx, item.id(), &state)?;
        tx.commit()?;
        Ok(true)
    }

    /// Get an item. Fails with `UnknownItem` if it does not exist.
    pub fn get_item(&self, item_id: ItemId) -> Fallible<Item> {
        let sql = "select topic, prompt, answer, distractors, created_at from items where item_id = ?;";
        let conn = self.acquire();
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([item_id])?;
        if let Some(row) = rows.next()? {
            let topic: String = row.get(0)?;
            let prompt: String = row.get(1)?;
            let answer: String = row.get(2)?;
            let distractors: String = row.get(3)?;
            let distractors: Vec<String> = serde_json::from_str(&distractors)?;
            let created_at: Timestamp = row.get(4)?;
            Ok(Item::new(topic, prompt, answer, distractors, created_at))
        } else {
            Err(Error::UnknownItem(item_id))
        }
    }

    /// Get an item's review state. Every item has exactly one, so a
    /// missing row means the item does not exist.
    pub fn get_review_state(&self, item_id: ItemId) -> Fallible<ReviewState> {
        let sql = "select ease_factor, interval_days, repetitions, due_date, last_reviewed from review_states where item_id = ?;";
        let conn = self.acquire();
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([item_id])?;
        if let Some(row) = rows.next()? {
            Ok(ReviewState {
                ease_factor: row.get(0)?,
                interval_days: row.get(1)?,
                repetitions: row.get(2)?,
                due_date: row.get(3)?,
                last_reviewed: row.get(4)?,
            })
        } else {
            Err(Error::UnknownItem(item_id))
        }
    }

    /// Persist an attempt and the review state it produced. One
    /// transaction: both writes or neither.
    pub fn record_attempt(&self, attempt: &Attempt, new_state: &ReviewState) -> Fallible<()> {
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        let updated = tx.execute(
            "update review_states set ease_factor = ?, interval_days = ?, repetitions = ?, due_date = ?, last_reviewed = ? where item_id = ?;",
            (
                new_state.ease_factor,
                new_state.interval_days,
                new_state.repetitions,
                new_state.due_date,
                new_state.last_reviewed,
                attempt.item_id,
            ),
        )?;
        if updated == 0 {
            // Dropping the transaction rolls it back.
            return Err(Error::UnknownItem(attempt.item_id));
        }
        tx.execute(
            "insert into attempts (item_id, quality, recorded_at) values (?, ?, ?);",
            (attempt.item_id, attempt.quality, attempt.recorded_at),
        )?;
        tx.commit()?;
        Ok(())
    }

    /// An item's attempts, oldest first. Fails with `UnknownItem` if the
    /// item does not exist.
    pub fn history(&self, item_id: ItemId) -> Fallible<Vec<Attempt>> {
        let conn = self.acquire();
        let exists: i64 = conn.query_row(
            "select count(*) from items where item_id = ?;",
            [item_id],
            |row| row.get(0),
        )?;
        if exists == 0 {
            return Err(Error::UnknownItem(item_id));
        }
        let sql = "select quality, recorded_at from attempts where item_id = ? order by recorded_at asc, attempt_id asc;";
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([item_id])?;
        let mut attempts = Vec::new();
        while let Some(row) = rows.next()? {
            attempts.push(Attempt {
                item_id,
                quality: row.get(0)?,
                recorded_at: row.get(1)?,
            });
        }
        Ok(attempts)
    }

    /// The set of items due for review: due date arrived, or never
    /// reviewed.
    pub fn due_items(&self, as_of: Date) -> Fallible<HashSet<ItemId>> {
        let mut due = HashSet::new();
        let conn = self.acquire();
        let sql = "select item_id from review_states where repetitions = 0 or due_date <= ?;";
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([as_of])?;
        while let Some(row) = rows.next()? {
            let item_id: ItemId = row.get(0)?;
            due.insert(item_id);
        }
        Ok(due)
    }

    /// Items becoming due after `as_of` but no later than `through`,
    /// soonest first.
    pub fn upcoming(&self, as_of: Date, through: Date) -> Fallible<Vec<(ItemId, Date)>> {
        let mut upcoming = Vec::new();
        let conn = self.acquire();
        let sql = "select item_id, due_date from review_states where due_date > ? and due_date <= ? order by due_date asc;";
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query((as_of, through))?;
        while let Some(row) = rows.next()? {
            let item_id: ItemId = row.get(0)?;
            let due_date: Date = row.get(1)?;
            upcoming.push((item_id, due_date));
        }
        Ok(upcoming)
    }

    /// All item ids in the database.
    pub fn item_ids(&self) -> Fallible<Vec<ItemId>> {
        let mut ids = Vec::new();
        let conn = self.acquire();
        let mut stmt = conn.prepare("select item_id from items;")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let item_id: ItemId = row.get(0)?;
            ids.push(item_id);
        }
        Ok(ids)
    }

    pub fn item_count(&self) -> Fallible<usize> {
        let conn = self.acquire();
        let count: i64 = conn.query_row("select count(*) from items;", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Every attempt joined with its item's topic, oldest first. Input
    /// to the statistics report.
    pub fn attempt_log(&self) -> Fallible<Vec<AttemptRecord>> {
        let mut records = Vec::new();
        let conn = self.acquire();
        let sql = "select i.topic, a.quality, a.recorded_at from attempts a join items i on i.item_id = a.item_id order by a.recorded_at asc, a.attempt_id asc;";
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            records.push(AttemptRecord {
                topic: row.get(0)?,
                quality: row.get(1)?,
                recorded_at: row.get(2)?,
            });
        }
        Ok(records)
    }

    /// Run SQLite's integrity check, returning its verdict string.
    pub fn integrity_check(&self) -> Fallible<String> {
        let conn = self.acquire();
        let verdict: String = conn.query_row("pragma integrity_check;", [], |row| row.get(0))?;
        Ok(verdict)
    }

    fn acquire(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }
}

fn insert_review_state(tx: &Transaction, item_id: ItemId, state: &ReviewState) -> Fallible<()> {
    let sql = "insert into review_states (item_id, ease_factor, interval_days, repetitions, due_date, last_reviewed) values (?, ?, ?, ?, ?, ?);";
    tx.execute(
        sql,
        (
            item_id,
            state.ease_factor,
            state.interval_days,
            state.repetitions,
            state.due_date,
            state.last_reviewed,
        ),
    )?;
    Ok(())
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["notes"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use tempfile::tempdir;

    use super::*;

    fn open_database() -> Fallible<(TempDir, Database)> {
        let dir = tempdir()?;
        let path = dir.path().join("studycoach.db");
        let db = Database::new(path.to_str().unwrap())?;
        Ok((dir, db))
    }

    fn sample_item(db: &Database) -> Fallible<Item> {
        db.upsert_note("geography", "France is in Europe.", "France.", Timestamp::now())?;
        let item = Item::new(
            "geography",
            "Capital of France?",
            "Paris",
            vec!["Lyon".to_string(), "Nice".to_string()],
            Timestamp::now(),
        );
        db.insert_item(&item)?;
        Ok(item)
    }

    #[test]
    fn test_schema_is_created_once() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("studycoach.db");
        let _ = Database::new(path.to_str().unwrap())?;
        // Reopening must not try to recreate the tables.
        let _ = Database::new(path.to_str().unwrap())?;
        Ok(())
    }

    #[test]
    fn test_note_upsert_replaces() -> Fallible<()> {
        let (_dir, db) = open_database()?;
        db.upsert_note("rome", "Old text.", "Old summary.", Timestamp::now())?;
        db.upsert_note("rome", "New text.", "New summary.", Timestamp::now())?;
        let note = db.get_note("rome")?.unwrap();
        assert_eq!(note.raw_text, "New text.");
        assert_eq!(note.summary, "New summary.");
        assert_eq!(db.topics()?, vec!["rome".to_string()]);
        Ok(())
    }

    #[test]
    fn test_missing_note() -> Fallible<()> {
        let (_dir, db) = open_database()?;
        assert!(db.get_note("nothing")?.is_none());
        Ok(())
    }

    #[test]
    fn test_item_roundtrip() -> Fallible<()> {
        let (_dir, db) = open_database()?;
        let item = sample_item(&db)?;
        let loaded = db.get_item(item.id())?;
        assert_eq!(loaded.id(), item.id());
        assert_eq!(loaded.prompt(), "Capital of France?");
        assert_eq!(loaded.answer(), "Paris");
        assert_eq!(loaded.distractors().len(), 2);
        Ok(())
    }

    #[test]
    fn test_insert_item_is_idempotent() -> Fallible<()> {
        let (_dir, db) = open_database()?;
        let item = sample_item(&db)?;
        assert!(!db.insert_item(&item)?);
        assert_eq!(db.item_count()?, 1);
        Ok(())
    }

    #[test]
    fn test_new_item_has_initial_state_and_is_due() -> Fallible<()> {
        let (_dir, db) = open_database()?;
        let item = sample_item(&db)?;
        let state = db.get_review_state(item.id())?;
        assert_eq!(state.repetitions, 0);
        assert!(state.last_reviewed.is_none());
        let due = db.due_items(Timestamp::now().local_date())?;
        assert!(due.contains(&item.id()));
        Ok(())
    }

    #[test]
    fn test_record_attempt_unknown_item() -> Fallible<()> {
        let (_dir, db) = open_database()?;
        let _ = sample_item(&db)?;
        let ghost = ItemId::hash_bytes(b"ghost");
        let attempt = Attempt {
            item_id: ghost,
            quality: Quality::new(5)?,
            recorded_at: Timestamp::now(),
        };
        let state = ReviewState::new(Timestamp::now().local_date());
        let result = db.record_attempt(&attempt, &state);
        assert!(matches!(result, Err(Error::UnknownItem(_))));
        // No partial write.
        assert!(db.attempt_log()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_record_attempt_updates_both_rows() -> Fallible<()> {
        let (_dir, db) = open_database()?;
        let item = sample_item(&db)?;
        let now = Timestamp::now();
        let today = now.local_date();
        let state = crate::scheduler::update(
            &db.get_review_state(item.id())?,
            Quality::new(5)?,
            today,
        );
        let attempt = Attempt {
            item_id: item.id(),
            quality: Quality::new(5)?,
            recorded_at: now,
        };
        db.record_attempt(&attempt, &state)?;
        let stored = db.get_review_state(item.id())?;
        assert_eq!(stored, state);
        let history = db.history(item.id())?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].quality, Quality::new(5)?);
        // One day out means not due tomorrow morning.
        assert!(!db.due_items(today)?.contains(&item.id()));
        assert!(db.due_items(today.plus_days(1))?.contains(&item.id()));
        Ok(())
    }

    #[test]
    fn test_history_unknown_item() -> Fallible<()> {
        let (_dir, db) = open_database()?;
        let ghost = ItemId::hash_bytes(b"ghost");
        assert!(matches!(db.history(ghost), Err(Error::UnknownItem(_))));
        Ok(())
    }

    #[test]
    fn test_upcoming_window() -> Fallible<()> {
        let (_dir, db) = open_database()?;
        let item = sample_item(&db)?;
        let now = Timestamp::now();
        let today = now.local_date();
        // Push the item six days out.
        let state = ReviewState {
            ease_factor: 2.5,
            interval_days: 6,
            repetitions: 2,
            due_date: today.plus_days(6),
            last_reviewed: Some(today),
        };
        let attempt = Attempt {
            item_id: item.id(),
            quality: Quality::new(4)?,
            recorded_at: now,
        };
        db.record_attempt(&attempt, &state)?;
        let upcoming = db.upcoming(today, today.plus_days(7))?;
        assert_eq!(upcoming, vec![(item.id(), today.plus_days(6))]);
        assert!(db.upcoming(today, today.plus_days(5))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_integrity_check() -> Fallible<()> {
        let (_dir, db) = open_database()?;
        assert_eq!(db.integrity_check()?, "ok");
        Ok(())
    }
}
