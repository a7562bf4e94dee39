use super::{find_course, report};
use crate::{
    db::db::Db,
    libs::{
        attendance::{AttendanceMark, AttendanceStatus, RollCallMark},
        formatter::{format_date, parse_date, parse_range},
        messages::Message,
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, MultiSelect};

#[derive(Debug, Args)]
pub struct AttendanceArgs {
    #[command(subcommand)]
    command: AttendanceCommand,
}

#[derive(Debug, Subcommand)]
enum AttendanceCommand {
    /// Mark one student; a second mark for the same day replaces the first
    Mark {
        student_id: String,
        #[arg(value_enum)]
        status: AttendanceStatus,
        #[arg(short, long, default_value = "today")]
        date: String,
        /// Course id or code; defaults to the student's course
        #[arg(short, long)]
        course: Option<String>,
        #[arg(short, long)]
        remarks: Option<String>,
    },
    /// Mark every student of a course, Present unless listed as absent
    RollCall {
        /// Course id or code
        course: String,
        #[arg(short, long, default_value = "today")]
        date: String,
        /// Student ids to mark Absent
        #[arg(short, long, num_args = 1..)]
        absent: Vec<String>,
        /// Pick absentees from a list instead
        #[arg(short, long, conflicts_with = "absent")]
        select: bool,
    },
    /// Marks recorded on a day
    Show {
        #[arg(short, long, default_value = "today")]
        date: String,
        /// Course id or code
        #[arg(short, long)]
        course: Option<String>,
    },
    /// Marks in an inclusive date range, with the overall rate
    Report {
        start: String,
        #[arg(default_value = "today")]
        end: String,
    },
    /// Attendance rate of a student, a course or a day
    Rate {
        #[arg(long, conflicts_with_all = ["course", "date"])]
        student: Option<String>,
        /// Course id or code
        #[arg(long, conflicts_with = "date")]
        course: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn cmd(db: &Db, args: AttendanceArgs) -> Result<()> {
    match args.command {
        AttendanceCommand::Mark {
            student_id,
            status,
            date,
            course,
            remarks,
        } => handle_mark(db, &student_id, status, &date, course.as_deref(), remarks),
        AttendanceCommand::RollCall {
            course,
            date,
            absent,
            select,
        } => handle_roll_call(db, &course, &date, absent, select),
        AttendanceCommand::Show { date, course } => {
            let date = parse_date(&date)?;
            let course_id = match course.as_deref() {
                Some(course) => find_course(db, course)?.course_id,
                None => None,
            };
            let records = db.attendance().get_attendance_by_date(date, course_id)?;
            if records.is_empty() {
                msg_info!(Message::NoAttendanceFound);
                return Ok(());
            }
            msg_print!(Message::AttendanceHeader(format_date(&date)), true);
            View::attendance(&records);
            Ok(())
        }
        AttendanceCommand::Report { start, end } => {
            let (start, end) = parse_range(&start, &end)?;
            let rows = db.stats().attendance_in_range(start, end)?;
            if rows.is_empty() {
                msg_info!(Message::NoAttendanceFound);
                return Ok(());
            }
            msg_print!(Message::AttendanceRangeHeader(format_date(&start), format_date(&end)), true);
            View::attendance_report(&rows);
            let rate = db.stats().range_attendance_rate(start, end)?;
            msg_print!(Message::RangeAttendanceRate(format_date(&start), format_date(&end), rate));
            Ok(())
        }
        AttendanceCommand::Rate { student, course, date } => handle_rate(db, student, course, date),
    }
}

fn handle_mark(
    db: &Db,
    student_id: &str,
    status: AttendanceStatus,
    date: &str,
    course: Option<&str>,
    remarks: Option<String>,
) -> Result<()> {
    let date = parse_date(date)?;
    let course_id = match course {
        Some(course) => find_course(db, course)?.course_id,
        None => match db.students().get_student_by_id(student_id)? {
            Some(student) => student.course_id,
            None => {
                msg_error!(Message::StudentNotFound(student_id.to_string()));
                return Ok(());
            }
        },
    };
    let Some(course_id) = course_id else {
        msg_error!(Message::AttendanceError(format!("{} is not enrolled in a course", student_id)));
        return Ok(());
    };

    let mut mark = AttendanceMark::new(student_id, course_id, date, status);
    if let Some(remarks) = remarks.as_deref() {
        mark = mark.with_remarks(remarks);
    }
    report(db.attendance().mark_attendance(&mark));
    Ok(())
}

fn handle_roll_call(db: &Db, course: &str, date: &str, absent: Vec<String>, select: bool) -> Result<()> {
    let course = find_course(db, course)?;
    let course_id = course.course_id.unwrap_or_default();
    let date = parse_date(date)?;

    let students = db.students().get_students_by_course(course_id)?;
    if students.is_empty() {
        msg_info!(Message::NoStudentsInCourse(course.course_name));
        return Ok(());
    }

    let absent: Vec<String> = if select {
        let labels: Vec<String> = students.iter().map(|s| format!("{}  {}", s.student_id, s.full_name())).collect();
        MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::AttendanceHeader(format!("{} on {}", course.course_name, format_date(&date))).to_string())
            .items(&labels)
            .interact()?
            .into_iter()
            .map(|i| students[i].student_id.clone())
            .collect()
    } else {
        absent
    };

    let marks = students
        .iter()
        .map(|s| {
            let status = if absent.contains(&s.student_id) {
                AttendanceStatus::Absent
            } else {
                AttendanceStatus::Present
            };
            RollCallMark::new(&s.student_id, status)
        })
        .collect();

    let outcomes = db.attendance().mark_roll_call(course_id, date, marks);
    let total = outcomes.len();
    let mut saved = 0;
    for (student_id, outcome) in outcomes {
        if outcome.success {
            saved += 1;
        } else {
            msg_error!(format!("{}: {}", student_id, outcome.message));
        }
    }
    msg_success!(Message::RollCallSummary(saved, total));
    Ok(())
}

fn handle_rate(db: &Db, student: Option<String>, course: Option<String>, date: Option<String>) -> Result<()> {
    if let Some(student_id) = student {
        let rate = db.stats().student_attendance_rate(&student_id)?;
        msg_print!(Message::StudentAttendanceRate(student_id, rate));
    } else if let Some(course) = course {
        let course = find_course(db, &course)?;
        let rate = db.stats().course_attendance_rate(course.course_id.unwrap_or_default())?;
        msg_print!(Message::CourseAttendanceRate(course.course_name, rate));
    } else {
        let date = parse_date(date.as_deref().unwrap_or("today"))?;
        let rate = db.stats().date_attendance_rate(date)?;
        msg_print!(Message::DateAttendanceRate(format_date(&date), rate));
    }
    Ok(())
}
