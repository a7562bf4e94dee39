//! # Institute
//!
//! Records management for a small institute: students, courses, attendance
//! and staff accounts kept in a local SQLite store.
//!
//! - [`db`]: the data access layer. Schema migrations, repositories for each
//!   table, attendance statistics and the dashboard rollup.
//! - [`libs`]: record types, configuration, messages, export and terminal views.
//! - [`commands`]: the `institute` command-line front end.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use institute::db::db::Db;
//! use institute::libs::course::Course;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Db::open_in_memory()?;
//! let outcome = db.courses().add_course(&Course::new("Python", "PY101", None, Some(3), Some(1500.0)));
//! assert!(outcome.success);
//! let rate = db.stats().course_attendance_rate(1)?;
//! # let _ = rate;
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
