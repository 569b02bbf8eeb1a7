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

use crate::types::item_id::ItemId;

pub type Fallible<T> = Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A quality score outside the 0-5 range.
    InvalidQuality(u8),
    /// A reference to an item that does not exist.
    UnknownItem(ItemId),
    /// A storage failure from the underlying database.
    Storage(rusqlite::Error),
    Io(std::io::Error),
    Json(serde_json::Error),
    Config(toml::de::Error),
    Report(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidQuality(q) => {
                write!(f, "error: invalid quality score: {q} (expected 0 to 5).")
            }
            Error::UnknownItem(id) => write!(f, "error: unknown item: {id}."),
            Error::Storage(e) => write!(f, "error: {e}"),
            Error::Io(e) => write!(f, "error: {e}"),
            Error::Json(e) => write!(f, "error: {e}"),
            Error::Config(e) => write!(f, "error: {e}"),
            Error::Report(msg) => write!(f, "error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::Storage(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e)
    }
}

/// Shorthand for returning a freeform error.
pub fn fail<T>(msg: impl Into<String>) -> Fallible<T> {
    Err(Error::Report(msg.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefix() {
        let err: Error = fail::<()>("directory does not exist.").unwrap_err();
        assert_eq!(err.to_string(), "error: directory does not exist.");
    }

    #[test]
    fn test_invalid_quality_display() {
        let err = Error::InvalidQuality(9);
        assert_eq!(
            err.to_string(),
            "error: invalid quality score: 9 (expected 0 to 5)."
        );
    }
}
