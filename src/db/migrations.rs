//! Versioned schema migrations.
//!
//! Every migration runs once, in version order, inside one transaction per
//! `run_migrations` call. Applied versions are recorded in the `migrations`
//! table, so opening an up-to-date database is a single `SELECT`.
//!
//! ## Features
//!
//! - **Version Tracking**: each applied migration is stored with its name and time
//! - **Automatic Application**: [`Db`](super::db::Db) runs pending migrations on open
//! - **Atomic Upgrades**: a failing migration rolls back the whole batch
//! - **History**: [`MigrationManager::get_migration_history`] lists what ran and when
//!
//! ## Schema Versions
//!
//! | Version | Name                 | Changes                                       |
//! |---------|----------------------|-----------------------------------------------|
//! | 1       | `create_core_tables` | `categories`, `tasks`, `work_sessions`        |
//! | 2       | `add_indices`        | session start time, task and parent lookups   |
//!
//! ## Adding a Migration
//!
//! Register it at the end of `register_migrations` with the next version
//! number. Applied migrations are never edited: an existing database would
//! keep the old shape while a fresh one gets the new.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tomatobox::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open_in_memory()?;
//! init_with_migrations(&mut conn)?;
//! assert_eq!(get_db_version(&conn)?, 2);
//! # Ok::<(), rusqlite::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use rusqlite::{params, Connection, Result, Transaction};

/// Bookkeeping table, created before any migration runs.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// One schema change.
#[derive(Debug, Clone)]
struct Migration {
    /// Ordering key, unique and increasing
    version: u32,
    /// Recorded in the `migrations` table
    name: &'static str,
    /// Applies the change inside the batch transaction
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of all schema migrations in version order.
///
/// Cheap to build: constructing one only collects function pointers. It is
/// meant for use while opening a connection, before the store hands it to
/// other threads.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: categories, tasks and work sessions
        self.add_migration(1, "create_core_tables", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS categories (
        id INTEGER NOT NULL PRIMARY KEY,
        name TEXT NOT NULL,
        parent_category_id INTEGER REFERENCES categories(id)
    )",
                [],
            )?;

            // category_id 0 is the "Uncategorized" sentinel and has no row,
            // so there is no foreign key on it.
            tx.execute(
                "CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER NOT NULL PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        category_id INTEGER NOT NULL DEFAULT 0,
        estimated_minutes INTEGER,
        due_at TIMESTAMP,
        priority TEXT NOT NULL DEFAULT 'MEDIUM',
        status TEXT NOT NULL DEFAULT 'NOT_STARTED',
        created_at TIMESTAMP NOT NULL,
        completed_at TIMESTAMP
    )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS work_sessions (
        id INTEGER NOT NULL PRIMARY KEY,
        task_id INTEGER,
        start_time TIMESTAMP NOT NULL,
        end_time TIMESTAMP,
        is_break_session BOOLEAN NOT NULL DEFAULT FALSE,
        duration INTEGER NOT NULL
    )",
                [],
            )?;
            Ok(())
        });

        // Version 2: indices for the daily-goal window and per-task lookups
        self.add_migration(2, "add_indices", |tx| {
            tx.execute("CREATE INDEX IF NOT EXISTS idx_work_sessions_start_time ON work_sessions(start_time)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_work_sessions_task_id ON work_sessions(task_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_category_id ON tasks(category_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_categories_parent ON categories(parent_category_id)", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every migration newer than the recorded schema version.
    ///
    /// ## Process
    ///
    /// 1. Creates the `migrations` table if needed
    /// 2. Reads the highest applied version
    /// 3. Runs the newer migrations in one transaction, recording each
    /// 4. Commits, or rolls everything back on the first failure
    ///
    /// ## Errors
    ///
    /// The first SQLite error from a migration, after it has been reported
    /// with [`Message::MigrationFailed`]. The schema is left at the old version.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database is up to date");
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;
        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            if let Err(e) = (migration.up)(&tx) {
                msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                return Err(e);
            }
            tx.execute("INSERT INTO migrations (version, name) VALUES (?1, ?2)", params![migration.version, migration.name])?;
        }
        tx.commit()?;

        Ok(())
    }

    /// Highest applied version, `0` for a fresh database.
    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i32 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Applied migrations as `(version, name, applied_at)`, oldest first.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;
        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(history)
    }

    /// Version the schema reaches once every registered migration has run.
    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }
}

/// Brings `conn` up to the latest schema.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

/// Current schema version of `conn`. Expects the `migrations` table to exist.
pub fn get_db_version(conn: &Connection) -> Result<u32> {
    MigrationManager::new().get_current_version(conn)
}

/// Whether `conn` is behind the latest schema.
pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    let current = manager.get_current_version(conn)?;
    Ok(current < manager.latest_version())
}
