use super::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use crate::libs::error::StorageError;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "tomatobox.db";

/// An open, fully migrated SQLite connection.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database in the platform data directory.
    pub fn new() -> Result<Db, StorageError> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME).map_err(|e| StorageError::Open(e.to_string()))?;
        Self::open(&db_file_path)
    }

    pub fn open(path: &Path) -> Result<Db, StorageError> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Db, StorageError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(mut conn: Connection) -> Result<Db, StorageError> {
        init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }
}
