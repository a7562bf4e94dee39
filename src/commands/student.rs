use super::{find_course, report};
use crate::{
    db::db::Db,
    libs::{
        config::Config,
        data_storage::DataStorage,
        error::StoreError,
        formatter::parse_date,
        messages::Message,
        student::{Gender, SearchField, Student, StudentStatus},
        view::View,
    },
    msg_bail_anyhow, msg_error, msg_error_anyhow, msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct StudentArgs {
    #[command(subcommand)]
    command: StudentCommand,
}

/// Editable student fields shared by `add` and `edit`.
#[derive(Debug, Args)]
struct StudentFields {
    #[arg(long)]
    gender: Option<Gender>,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    dob: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
    /// Course id or code
    #[arg(long)]
    course: Option<String>,
    /// Admission date (YYYY-MM-DD or 'today')
    #[arg(long)]
    admitted: Option<String>,
    /// Image to copy into the photos directory
    #[arg(long)]
    photo: Option<PathBuf>,
    #[arg(long)]
    status: Option<StudentStatus>,
}

#[derive(Debug, Subcommand)]
enum StudentCommand {
    /// Admit a student under the next free id
    Add {
        first_name: String,
        last_name: String,
        #[command(flatten)]
        fields: StudentFields,
    },
    /// List all students, newest admissions first
    List,
    /// Search by id, name, email or phone
    Search {
        term: String,
        #[arg(short, long, value_enum, default_value_t = SearchField::All)]
        field: SearchField,
    },
    /// Show one student with their attendance rate
    Show { student_id: String },
    /// Change student fields; omitted fields keep their value
    Edit {
        student_id: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        /// Remove the course assignment
        #[arg(long, conflicts_with = "course")]
        no_course: bool,
        #[command(flatten)]
        fields: StudentFields,
    },
    /// Delete a student and their attendance
    Delete {
        student_id: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the id the next admission would get
    NextId,
}

pub fn cmd(db: &Db, storage: &DataStorage, args: StudentArgs) -> Result<()> {
    match args.command {
        StudentCommand::Add {
            first_name,
            last_name,
            fields,
        } => handle_add(db, storage, &first_name, &last_name, fields),
        StudentCommand::List => {
            let students = db.students().get_all_students()?;
            if students.is_empty() {
                msg_info!(Message::NoStudentsFound);
                return Ok(());
            }
            msg_print!(Message::StudentListHeader, true);
            View::students(&students);
            Ok(())
        }
        StudentCommand::Search { term, field } => {
            let students = db.students().search_students(&term, field)?;
            if students.is_empty() {
                msg_info!(Message::NoStudentsFound);
                return Ok(());
            }
            msg_print!(Message::StudentSearchResults(term), true);
            View::students(&students);
            Ok(())
        }
        StudentCommand::Show { student_id } => {
            let Some(student) = db.students().get_student_by_id(&student_id)? else {
                msg_error!(Message::StudentNotFound(student_id));
                return Ok(());
            };
            let rate = db.stats().student_attendance_rate(&student.student_id)?;
            View::student_detail(&student, rate);
            Ok(())
        }
        StudentCommand::Edit {
            student_id,
            first_name,
            last_name,
            no_course,
            fields,
        } => handle_edit(db, storage, &student_id, first_name, last_name, no_course, fields),
        StudentCommand::Delete { student_id, yes } => {
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDeleteStudent(student_id.clone()).to_string())
                    .default(false)
                    .interact()?;
            if !confirmed {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            report(db.students().delete_student(&student_id));
            Ok(())
        }
        StudentCommand::NextId => {
            msg_print!(Message::StudentIdGenerated(db.students().next_student_id()?));
            Ok(())
        }
    }
}

fn handle_add(db: &Db, storage: &DataStorage, first_name: &str, last_name: &str, fields: StudentFields) -> Result<()> {
    let student_id = match db.students().next_student_id() {
        Err(StoreError::SequenceExhausted(year)) => msg_bail_anyhow!(Message::StudentIdSequenceExhausted(year)),
        other => other?,
    };
    let gender = fields
        .gender
        .ok_or_else(|| msg_error_anyhow!(Message::MissingStudentField("gender".to_string())))?;
    let dob = fields
        .dob
        .as_deref()
        .ok_or_else(|| msg_error_anyhow!(Message::MissingStudentField("dob".to_string())))
        .and_then(parse_date)?;
    let mut student = Student::new(&student_id, first_name, last_name, gender, dob);

    let photo = fields.photo.clone();
    apply_fields(db, &mut student, fields)?;

    let stored_photo = match photo {
        Some(source) => {
            let assets = Config::read_from(storage)?.assets(storage);
            let stored = assets.store_photo(&source, &student_id)?;
            student.photo_path = Some(stored.display().to_string());
            Some(stored)
        }
        None => None,
    };

    let outcome = db.students().add_student(&student);
    if !outcome.success {
        if let Some(path) = stored_photo {
            if let Err(e) = fs::remove_file(&path) {
                msg_warning!(Message::StudentPhotoCleanupFailed(path.display().to_string(), e.to_string()));
            }
        }
    } else {
        msg_info!(Message::StudentIdGenerated(student_id));
    }
    report(outcome);
    Ok(())
}

fn handle_edit(
    db: &Db,
    storage: &DataStorage,
    student_id: &str,
    first_name: Option<String>,
    last_name: Option<String>,
    no_course: bool,
    fields: StudentFields,
) -> Result<()> {
    let Some(mut student) = db.students().get_student_by_id(student_id)? else {
        msg_error!(Message::StudentNotFound(student_id.to_string()));
        return Ok(());
    };

    if let Some(first_name) = first_name {
        student.first_name = first_name;
    }
    if let Some(last_name) = last_name {
        student.last_name = last_name;
    }
    if let Some(gender) = fields.gender {
        student.gender = gender;
    }
    if let Some(dob) = fields.dob.as_deref() {
        student.dob = parse_date(dob)?;
    }
    if no_course {
        student.course_id = None;
    }
    // the current photo is only overwritten once the record update committed
    let photo = match fields.photo.clone() {
        Some(source) => {
            let assets = Config::read_from(storage)?.assets(storage);
            student.photo_path = Some(assets.photo_path(&source, student_id).display().to_string());
            Some((source, assets))
        }
        None => None,
    };
    apply_fields(db, &mut student, fields)?;

    let outcome = db.students().update_student(student_id, &student);
    if let (true, Some((source, assets))) = (outcome.success, photo) {
        let stored = assets.store_photo(&source, student_id)?;
        msg_info!(Message::StudentPhotoStored(stored.display().to_string()));
    }
    report(outcome);
    Ok(())
}

/// Copies the optional contact, course, admission and status fields onto `student`.
fn apply_fields(db: &Db, student: &mut Student, fields: StudentFields) -> Result<()> {
    if fields.email.is_some() {
        student.email = fields.email;
    }
    if fields.phone.is_some() {
        student.phone = fields.phone;
    }
    if fields.address.is_some() {
        student.address = fields.address;
    }
    if let Some(course) = fields.course.as_deref() {
        student.course_id = find_course(db, course)?.course_id;
    }
    if let Some(admitted) = fields.admitted.as_deref() {
        student.admission_date = parse_date(admitted)?;
    }
    if let Some(status) = fields.status {
        student.status = status;
    }
    Ok(())
}
