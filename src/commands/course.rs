use super::{find_course, report};
use crate::{
    db::db::Db,
    libs::{course::Course, formatter::format_rate, messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct CourseArgs {
    #[command(subcommand)]
    command: CourseCommand,
}

#[derive(Debug, Subcommand)]
enum CourseCommand {
    /// Add a course
    Add {
        name: String,
        code: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Duration in months
        #[arg(long)]
        duration: Option<i32>,
        #[arg(long)]
        fees: Option<f64>,
    },
    /// List courses with enrollment counts
    List,
    /// Show one course and its attendance rate
    Show {
        /// Course id or code
        course: String,
    },
    /// Change course fields; omitted fields keep their value
    Edit {
        /// Course id or code
        course: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        code: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        duration: Option<i32>,
        #[arg(long)]
        fees: Option<f64>,
    },
    /// Delete a course; its students stay, unassigned
    Delete {
        /// Course id or code
        course: String,
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(db: &Db, args: CourseArgs) -> Result<()> {
    match args.command {
        CourseCommand::Add {
            name,
            code,
            description,
            duration,
            fees,
        } => {
            let course = Course::new(&name, &code, description.as_deref(), duration, fees);
            report(db.courses().add_course(&course));
            Ok(())
        }
        CourseCommand::List => handle_list(db),
        CourseCommand::Show { course } => handle_show(db, &course),
        CourseCommand::Edit {
            course,
            name,
            code,
            description,
            duration,
            fees,
        } => {
            let mut existing = find_course(db, &course)?;
            let course_id = existing.course_id.unwrap_or_default();
            if let Some(name) = name {
                existing.course_name = name;
            }
            if let Some(code) = code {
                existing.course_code = code;
            }
            if description.is_some() {
                existing.description = description;
            }
            if duration.is_some() {
                existing.duration_months = duration;
            }
            if fees.is_some() {
                existing.fees = fees;
            }
            report(db.courses().update_course(course_id, &existing));
            Ok(())
        }
        CourseCommand::Delete { course, yes } => handle_delete(db, &course, yes),
    }
}

fn handle_list(db: &Db) -> Result<()> {
    let courses = db.courses().get_all_courses()?;
    if courses.is_empty() {
        msg_info!(Message::NoCoursesFound);
        return Ok(());
    }

    msg_print!(Message::CourseListHeader, true);
    View::courses(&courses);
    Ok(())
}

fn handle_show(db: &Db, identifier: &str) -> Result<()> {
    let course = find_course(db, identifier)?;
    let course_id = course.course_id.unwrap_or_default();
    let students = db.students().get_students_by_course(course_id)?;
    let rate = db.stats().course_attendance_rate(course_id)?;

    msg_print!(Message::CourseAttendanceRate(course.course_name.clone(), rate), true);
    if students.is_empty() {
        msg_info!(Message::NoStudentsInCourse(course.course_name));
    } else {
        View::students(&students);
    }
    tracing::debug!(course_id, rate = %format_rate(rate), "course shown");
    Ok(())
}

fn handle_delete(db: &Db, identifier: &str, yes: bool) -> Result<()> {
    let course = find_course(db, identifier)?;

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteCourse(course.course_name.clone()).to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    report(db.courses().delete_course(course.course_id.unwrap_or_default()));
    Ok(())
}
