//! Command-line front end.
//!
//! Every subcommand except `init` opens the configured store (provisioning it
//! if needed) and works against that one connection until it returns.

pub mod attendance;
pub mod course;
pub mod export;
pub mod init;
pub mod stats;
pub mod student;
pub mod user;

use crate::db::db::Db;
use crate::libs::config::Config;
use crate::libs::course::Course;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::outcome::WriteOutcome;
use crate::{msg_debug, msg_error, msg_error_anyhow, msg_success, msg_warning};
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Provision the database and write the configuration")]
    Init(init::InitArgs),
    #[command(about = "Manage courses")]
    Course(course::CourseArgs),
    #[command(about = "Manage students")]
    Student(student::StudentArgs),
    #[command(about = "Mark and review attendance")]
    Attendance(attendance::AttendanceArgs),
    #[command(about = "Register, log in and reset passwords")]
    User(user::UserArgs),
    #[command(about = "Show the dashboard")]
    Stats,
    #[command(about = "Export students, courses or attendance to CSV, JSON or Excel")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(name = "institute", author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Course(args) => course::cmd(&open_store()?.1, args),
            Commands::Student(args) => {
                let (storage, db) = open_store()?;
                student::cmd(&db, &storage, args)
            }
            Commands::Attendance(args) => attendance::cmd(&open_store()?.1, args),
            Commands::User(args) => user::cmd(&open_store()?.1, args),
            Commands::Stats => stats::cmd(&open_store()?.1),
            Commands::Export(args) => export::cmd(&open_store()?.1, args),
        }
    }
}

/// Reads the configuration and opens the store it points at.
fn open_store() -> Result<(DataStorage, Db)> {
    let storage = DataStorage::new();
    let config = Config::read_from(&storage)?;
    msg_debug!(Message::ConfigLoaded);
    let db = config.open_db(&storage)?;
    Ok((storage, db))
}

/// Resolves a course given either its numeric id or its code.
pub(crate) fn find_course(db: &Db, identifier: &str) -> Result<Course> {
    let course = match identifier.parse::<i64>() {
        Ok(id) => db.courses().get_course_by_id(id)?,
        Err(_) => db.courses().get_course_by_code(identifier)?,
    };
    course.ok_or_else(|| msg_error_anyhow!(Message::CourseNotFound(identifier.to_string())))
}

/// Prints a write outcome; a committed write that matched no row is a warning.
pub(crate) fn report(outcome: WriteOutcome) {
    if !outcome.success {
        msg_error!(outcome.message);
    } else if outcome.is_noop() {
        msg_warning!(Message::NoRecordMatched);
    } else {
        msg_success!(outcome.message);
    }
}
