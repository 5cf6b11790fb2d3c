pub mod models;
pub mod operations;
pub mod schema;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use log::{debug, info};

use crate::errors::{LiftlogError, Result};

/// Used when neither `--db` nor `DATABASE_URL` is given.
pub const DEFAULT_DB_PATH: &str = "workouts.db";

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const CONNECTION_PRAGMAS: &str = "PRAGMA journal_mode = WAL;
PRAGMA synchronous = FULL;
PRAGMA busy_timeout = 5000;";

/// Handle on the workout log database.
///
/// The connection lives as long as the `Store` and is closed when it is
/// dropped. Call [`Store::initialize`] once before any other operation.
pub struct Store {
    conn: SqliteConnection,
}

impl Store {
    /// Opens (creating if missing) the SQLite file at `path`.
    pub fn open(path: &str) -> Result<Self> {
        debug!("Opening workout database at {}", path);
        let mut conn = SqliteConnection::establish(path)?;
        conn.batch_execute(CONNECTION_PRAGMAS)?;
        Ok(Self { conn })
    }

    /// Private database that disappears with the handle.
    pub fn open_in_memory() -> Result<Self> {
        let conn = SqliteConnection::establish(":memory:")?;
        Ok(Self { conn })
    }

    /// Ensures the `workout_logs` table exists. Safe to call on every startup.
    pub fn initialize(&mut self) -> Result<()> {
        let applied = self
            .conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| LiftlogError::Migration(e.to_string()))?;

        if applied.is_empty() {
            debug!("Schema up to date");
        }
        for version in applied {
            info!("Applied migration {}", version);
        }
        Ok(())
    }
}
