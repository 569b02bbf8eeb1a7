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

use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;

use crate::error::Error;
use crate::error::Fallible;

const MAX_QUALITY: u8 = 5;

/// A 0-5 rating of recall performance for one attempt. Scores below 3
/// count as failures.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Fallible<Self> {
        if value > MAX_QUALITY {
            return Err(Error::InvalidQuality(value));
        }
        Ok(Self(value))
    }

    pub fn as_u8(self) -> u8 {
        self.0
    }

    pub fn is_passing(self) -> bool {
        self.0 >= 3
    }
}

impl TryFrom<u8> for Quality {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Quality::new(value)
    }
}

impl ToSql for Quality {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0 as i64))
    }
}

impl FromSql for Quality {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw: u8 = FromSql::column_result(value)?;
        Quality::new(raw).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps answer correctness to a quality score. The defaults are the
/// coarse policy: a correct answer scores 5, an incorrect one scores 1.
#[derive(Clone, Copy, Debug)]
pub struct QualityPolicy {
    pub on_correct: Quality,
    pub on_incorrect: Quality,
}

impl QualityPolicy {
    pub fn quality_for(&self, correct: bool) -> Quality {
        if correct {
            self.on_correct
        } else {
            self.on_incorrect
        }
    }
}

impl Default for QualityPolicy {
    fn default() -> Self {
        Self {
            on_correct: Quality(5),
            on_incorrect: Quality(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_range() -> Fallible<()> {
        for value in 0..=5 {
            assert_eq!(Quality::new(value)?.as_u8(), value);
        }
        Ok(())
    }

    #[test]
    fn test_out_of_range() {
        let err = Quality::new(6).unwrap_err();
        assert!(matches!(err, Error::InvalidQuality(6)));
    }

    #[test]
    fn test_passing_threshold() -> Fallible<()> {
        assert!(!Quality::new(2)?.is_passing());
        assert!(Quality::new(3)?.is_passing());
        Ok(())
    }

    #[test]
    fn test_default_policy() {
        let policy = QualityPolicy::default();
        assert_eq!(policy.quality_for(true).as_u8(), 5);
        assert_eq!(policy.quality_for(false).as_u8(), 1);
    }
}
