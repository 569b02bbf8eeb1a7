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

use std::env::current_dir;
use std::path::PathBuf;

use crate::config::Config;
use crate::db::Database;
use crate::error::Error;
use crate::error::Fallible;
use crate::error::fail;

const DB_FILE: &str = "studycoach.db";
const CONFIG_FILE: &str = "studycoach.toml";

/// A study workspace: the directory holding the database and config.
/// Commands receive this handle instead of reaching for globals.
pub struct Workspace {
    pub directory: PathBuf,
    pub config: Config,
    pub db: Database,
}

impl Workspace {
    pub fn open(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };

        let config = Config::load(&directory.join(CONFIG_FILE))?;

        let db_path: PathBuf = directory.join(DB_FILE);
        let db_path: &str = db_path
            .to_str()
            .ok_or_else(|| Error::Report("invalid path".to_string()))?;
        log::debug!("Opening database at {db_path}.");
        let db: Database = Database::new(db_path)?;

        Ok(Self {
            directory,
            config,
            db,
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_non_existent_directory() {
        let result = Workspace::open(Some("./derpherp".to_string()));
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
    }

    #[test]
    fn test_open_creates_database() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().to_str().unwrap().to_string();
        let workspace = Workspace::open(Some(path))?;
        assert!(workspace.directory.join(DB_FILE).exists());
        Ok(())
    }
}
