use super::attendance::AttendanceRepo;
use super::courses::Courses;
use super::migrations::{self, AppliedMigration};
use super::stats::Stats;
use super::students::Students;
use super::users::Users;
use crate::libs::assets::Assets;
use crate::libs::error::StoreResult;
use crate::libs::messages::Message;
use crate::msg_debug;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

/// The single store connection for a session.
///
/// Repositories borrow it through the accessor methods; dropping the `Db`
/// closes the connection.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens (creating if absent) the database file with foreign keys enforced.
    /// Does not touch the schema.
    pub fn open(path: &Path) -> StoreResult<Db> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Private in-memory database with the full schema applied.
    pub fn open_in_memory() -> StoreResult<Db> {
        let mut db = Self::from_connection(Connection::open_in_memory()?)?;
        db.migrate()?;
        Ok(db)
    }

    fn from_connection(conn: Connection) -> StoreResult<Db> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        register_functions(&conn)?;
        Ok(Db { conn })
    }

    /// Startup routine: opens the store at `path`, brings the schema up to
    /// date and makes sure the asset directories exist. Safe to repeat.
    pub fn provision(path: &Path, assets: &Assets) -> StoreResult<Db> {
        let mut db = Self::open(path)?;
        db.migrate()?;
        assets.ensure()?;
        msg_debug!(Message::DbProvisioned(path.display().to_string()));
        Ok(db)
    }

    /// Applies pending migrations, returning how many ran.
    pub fn migrate(&mut self) -> StoreResult<usize> {
        migrations::init_with_migrations(&mut self.conn)
    }

    pub fn version(&self) -> StoreResult<u32> {
        migrations::get_db_version(&self.conn)
    }

    pub fn needs_migration(&self) -> StoreResult<bool> {
        migrations::needs_migration(&self.conn)
    }

    pub fn migration_history(&self) -> StoreResult<Vec<AppliedMigration>> {
        migrations::get_migration_history(&self.conn)
    }

    /// Names of the user tables and indices, sorted.
    pub fn schema_objects(&self, kind: &str) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = ?1 AND name NOT LIKE 'sqlite_%' ORDER BY name")?;
        let names = stmt.query_map([kind], |row| row.get(0))?.collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    pub fn courses(&self) -> Courses<'_> {
        Courses::new(&self.conn)
    }

    pub fn students(&self) -> Students<'_> {
        Students::new(&self.conn)
    }

    pub fn attendance(&self) -> AttendanceRepo<'_> {
        AttendanceRepo::new(&self.conn)
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(&self.conn)
    }

    pub fn stats(&self) -> Stats<'_> {
        Stats::new(&self.conn)
    }
}

/// SQL functions the queries rely on.
///
/// `fold(text)` lowercases with full Unicode case mapping; the built-in
/// `LIKE` only folds ASCII. NULL stays NULL.
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "fold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|text| text.to_lowercase())),
    )
}
