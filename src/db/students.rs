use super::collect_rows;
use crate::libs::error::StoreResult;
use crate::libs::messages::Message;
use crate::libs::outcome::{unique_violation, WriteOutcome};
use crate::libs::student::{like_pattern, SearchField, Student};
use crate::libs::student_id;
use chrono::{Datelike, Local};
use rusqlite::{params, Connection, OptionalExtension};

/// Student columns joined with the course name; `$tail` supplies WHERE/ORDER.
macro_rules! select_students {
    ($tail:literal) => {
        concat!(
            "SELECT s.student_id, s.first_name, s.last_name, s.gender, s.dob, s.email, s.phone, s.address, ",
            "s.course_id, s.admission_date, s.photo_path, s.status, c.course_name ",
            "FROM students s LEFT JOIN courses c ON s.course_id = c.course_id ",
            $tail
        )
    };
}

const INSERT_STUDENT: &str = "
    INSERT INTO students
        (student_id, first_name, last_name, gender, dob, email, phone, address, course_id, admission_date, photo_path, status)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
";
const UPDATE_STUDENT: &str = "
    UPDATE students SET
        first_name = ?2, last_name = ?3, gender = ?4, dob = ?5, email = ?6, phone = ?7,
        address = ?8, course_id = ?9, admission_date = ?10, photo_path = ?11, status = ?12
    WHERE student_id = ?1
";
const DELETE_STUDENT: &str = "DELETE FROM students WHERE student_id = ?1";
const SELECT_ALL_STUDENTS: &str = select_students!("ORDER BY s.admission_date DESC, s.student_id DESC");
const SELECT_STUDENT_BY_ID: &str = select_students!("WHERE s.student_id = ?1");
const SELECT_STUDENTS_BY_COURSE: &str = select_students!("WHERE s.course_id = ?1 ORDER BY s.student_id");
const SELECT_LAST_ID_OF_YEAR: &str = "SELECT student_id FROM students WHERE student_id GLOB ?1 ORDER BY student_id DESC LIMIT 1";

pub struct Students<'a> {
    conn: &'a Connection,
}

impl<'a> Students<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Inserts `student` under its caller-assigned id. `course_name` is ignored.
    pub fn add_student(&self, student: &Student) -> WriteOutcome {
        let result = self.conn.execute(
            INSERT_STUDENT,
            params![
                student.student_id,
                student.first_name,
                student.last_name,
                student.gender,
                student.dob,
                student.email,
                student.phone,
                student.address,
                student.course_id,
                student.admission_date,
                student.photo_path,
                student.status,
            ],
        );
        match result {
            Ok(affected) => {
                tracing::debug!(student_id = %student.student_id, "student inserted");
                WriteOutcome::ok(Message::StudentAdded, affected)
            }
            Err(e) => match unique_violation(&e) {
                Some(detail) => WriteOutcome::failed(Message::StudentDuplicate(detail)),
                None => WriteOutcome::failed(Message::StudentAddFailed(e.to_string())),
            },
        }
    }

    /// Overwrites every field except the id, which stays `student_id`.
    pub fn update_student(&self, student_id: &str, student: &Student) -> WriteOutcome {
        let result = self.conn.execute(
            UPDATE_STUDENT,
            params![
                student_id,
                student.first_name,
                student.last_name,
                student.gender,
                student.dob,
                student.email,
                student.phone,
                student.address,
                student.course_id,
                student.admission_date,
                student.photo_path,
                student.status,
            ],
        );
        match result {
            Ok(affected) => WriteOutcome::ok(Message::StudentUpdated, affected),
            Err(e) => WriteOutcome::failed(Message::StudentUpdateFailed(e.to_string())),
        }
    }

    /// Removes the student together with their attendance.
    pub fn delete_student(&self, student_id: &str) -> WriteOutcome {
        match self.conn.execute(DELETE_STUDENT, params![student_id]) {
            Ok(affected) => {
                tracing::debug!(student_id, affected, "student deleted");
                WriteOutcome::ok(Message::StudentDeleted, affected)
            }
            Err(e) => WriteOutcome::failed(Message::StudentDeleteFailed(e.to_string())),
        }
    }

    /// Newest admissions first.
    pub fn get_all_students(&self) -> StoreResult<Vec<Student>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_STUDENTS)?;
        collect_rows(&mut stmt, [], "student", Student::from_row)
    }

    /// Case-insensitive literal substring match of `term` against `field`.
    pub fn search_students(&self, term: &str, field: SearchField) -> StoreResult<Vec<Student>> {
        let sql = format!(
            "{}WHERE {} ORDER BY s.student_id",
            select_students!(""),
            field.predicate()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        collect_rows(&mut stmt, params![like_pattern(term)], "student", Student::from_row)
    }

    pub fn get_student_by_id(&self, student_id: &str) -> StoreResult<Option<Student>> {
        Ok(self.conn.query_row(SELECT_STUDENT_BY_ID, params![student_id], Student::from_row).optional()?)
    }

    pub fn get_students_by_course(&self, course_id: i64) -> StoreResult<Vec<Student>> {
        let mut stmt = self.conn.prepare(SELECT_STUDENTS_BY_COURSE)?;
        collect_rows(&mut stmt, params![course_id], "student", Student::from_row)
    }

    /// Next free id for the current year.
    pub fn next_student_id(&self) -> StoreResult<String> {
        self.next_student_id_for_year(Local::now().year())
    }

    /// One past the greatest well-formed `STU-<year>NNNN` id; ids of other
    /// shapes never influence the sequence.
    pub fn next_student_id_for_year(&self, year: i32) -> StoreResult<String> {
        let last: Option<String> = self
            .conn
            .query_row(SELECT_LAST_ID_OF_YEAR, params![student_id::glob_pattern(year)], |row| row.get(0))
            .optional()?;
        let next = student_id::next_after(last.as_deref(), year)?;
        tracing::debug!(year, last = ?last, next = %next, "generated student id");
        Ok(next)
    }
}
