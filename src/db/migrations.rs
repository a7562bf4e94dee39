//! Versioned schema migrations.
//!
//! Every migration has a version, a name and an `up` function. Applied
//! versions are recorded in the `migrations` table, so running the manager on
//! every startup only applies what is new. Pending migrations run inside one
//! transaction: either all of them land or none do.
//!
//! To change the schema, append a migration with the next version number in
//! [`MigrationManager::register_migrations`]. Never edit one that has shipped.

use crate::libs::error::StoreResult;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_info, msg_success};
use rusqlite::{params, Connection, OptionalExtension, Transaction};

const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// Creation order matters: students reference courses, attendance references both.
const CREATE_COURSES: &str = "
CREATE TABLE IF NOT EXISTS courses (
    course_id INTEGER PRIMARY KEY AUTOINCREMENT,
    course_name TEXT NOT NULL UNIQUE,
    course_code TEXT NOT NULL UNIQUE,
    description TEXT,
    duration_months INTEGER,
    fees REAL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const CREATE_STUDENTS: &str = "
CREATE TABLE IF NOT EXISTS students (
    student_id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    gender TEXT NOT NULL CHECK (gender IN ('Male', 'Female', 'Other')),
    dob DATE NOT NULL,
    email TEXT UNIQUE,
    phone TEXT,
    address TEXT,
    course_id INTEGER REFERENCES courses(course_id) ON DELETE SET NULL,
    admission_date DATE NOT NULL,
    photo_path TEXT,
    status TEXT NOT NULL DEFAULT 'Active' CHECK (status IN ('Active', 'Inactive', 'Graduated')),
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const CREATE_ATTENDANCE: &str = "
CREATE TABLE IF NOT EXISTS attendance (
    attendance_id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id TEXT NOT NULL REFERENCES students(student_id) ON DELETE CASCADE,
    course_id INTEGER NOT NULL REFERENCES courses(course_id) ON DELETE CASCADE,
    attendance_date DATE NOT NULL,
    status TEXT NOT NULL CHECK (status IN ('Present', 'Absent')),
    remarks TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (student_id, attendance_date)
)";

const CREATE_USERS: &str = "
CREATE TABLE IF NOT EXISTS users (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    full_name TEXT,
    role TEXT NOT NULL DEFAULT 'Staff' CHECK (role IN ('Admin', 'Staff')),
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// Tables created by version 1, in creation order.
pub const CORE_TABLES: [&str; 4] = ["courses", "students", "attendance", "users"];

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> rusqlite::Result<()>,
}

/// A row of the `migrations` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    pub version: u32,
    pub name: String,
    pub applied_at: String,
}

pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        self.add_migration(1, "create_core_tables", |tx| {
            tx.execute(CREATE_COURSES, [])?;
            tx.execute(CREATE_STUDENTS, [])?;
            tx.execute(CREATE_ATTENDANCE, [])?;
            tx.execute(CREATE_USERS, [])?;
            Ok(())
        });

        // Foreign-key columns and the date columns every report filters on.
        self.add_migration(2, "add_lookup_indices", |tx| {
            tx.execute("CREATE INDEX IF NOT EXISTS idx_students_course ON students(course_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_students_admission_date ON students(admission_date)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance(attendance_date)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_attendance_course ON attendance(course_id)", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> rusqlite::Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    /// Applies every registered migration newer than the recorded version.
    /// Returns how many were applied.
    pub fn run_migrations(&self, conn: &mut Connection) -> StoreResult<usize> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(0);
        }

        msg_info!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;
        for migration in &pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_debug!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e.into());
                }
            }
        }
        tx.commit()?;

        msg_success!(Message::AllMigrationsCompleted);
        Ok(pending.len())
    }

    /// Highest applied version; 0 for a fresh database.
    pub fn get_current_version(&self, conn: &Connection) -> StoreResult<u32> {
        let has_table = conn
            .query_row("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'migrations'", [], |_| Ok(()))
            .optional()?
            .is_some();
        if !has_table {
            return Ok(0);
        }

        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> StoreResult<bool> {
        if self.get_current_version(conn)? == 0 {
            return Ok(false);
        }
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;
        Ok(count > 0)
    }

    pub fn get_migration_history(&self, conn: &Connection) -> StoreResult<Vec<AppliedMigration>> {
        if self.get_current_version(conn)? == 0 {
            return Ok(Vec::new());
        }

        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;
        let history = stmt
            .query_map([], |row| {
                Ok(AppliedMigration {
                    version: row.get(0)?,
                    name: row.get(1)?,
                    applied_at: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_with_migrations(conn: &mut Connection) -> StoreResult<usize> {
    MigrationManager::new().run_migrations(conn)
}

pub fn get_db_version(conn: &Connection) -> StoreResult<u32> {
    MigrationManager::new().get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> StoreResult<bool> {
    let manager = MigrationManager::new();
    Ok(manager.get_current_version(conn)? < manager.latest_version())
}

pub fn get_migration_history(conn: &Connection) -> StoreResult<Vec<AppliedMigration>> {
    MigrationManager::new().get_migration_history(conn)
}
