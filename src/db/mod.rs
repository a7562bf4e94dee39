//! Data access layer.
//!
//! [`db::Db`] owns the SQLite connection and hands out short-lived
//! repositories that borrow it:
//!
//! ```text
//! Db ──┬── courses()     Courses      course CRUD, enrollment counts
//!      ├── students()    Students     student CRUD, search, id generation
//!      ├── attendance()  AttendanceRepo  marks and per-day listings
//!      ├── users()       Users        accounts and authentication
//!      └── stats()       Stats        rates, range reports, dashboard
//! ```
//!
//! Writes return [`WriteOutcome`](crate::libs::outcome::WriteOutcome)s; reads
//! return [`StoreResult`](crate::libs::error::StoreResult).

pub mod attendance;
pub mod courses;
pub mod db;
pub mod migrations;
pub mod stats;
pub mod students;
pub mod users;

use crate::libs::error::StoreResult;
use crate::libs::messages::Message;
use crate::msg_warning;
use rusqlite::{Params, Row, Statement};

/// Runs `stmt` and maps every row, skipping (with a warning) rows whose stored
/// values do not convert into the record type. Any other error aborts.
pub(crate) fn collect_rows<T, P, F>(stmt: &mut Statement<'_>, params: P, kind: &str, map: F) -> StoreResult<Vec<T>>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut records = Vec::new();
    for row in stmt.query_map(params, map)? {
        match row {
            Ok(record) => records.push(record),
            Err(
                e @ (rusqlite::Error::FromSqlConversionFailure(..)
                | rusqlite::Error::InvalidColumnType(..)
                | rusqlite::Error::IntegralValueOutOfRange(..)),
            ) => {
                msg_warning!(Message::DbRowSkipped(kind.to_string(), e.to_string()));
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(records)
}
