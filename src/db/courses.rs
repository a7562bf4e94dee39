use super::collect_rows;
use crate::libs::course::{Course, CourseEnrollment};
use crate::libs::error::StoreResult;
use crate::libs::messages::Message;
use crate::libs::outcome::{unique_violation, WriteOutcome};
use rusqlite::{params, Connection, OptionalExtension};

const INSERT_COURSE: &str = "INSERT INTO courses (course_name, course_code, description, duration_months, fees) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_COURSE: &str = "UPDATE courses SET course_name = ?2, course_code = ?3, description = ?4, duration_months = ?5, fees = ?6 WHERE course_id = ?1";
const DELETE_COURSE: &str = "DELETE FROM courses WHERE course_id = ?1";
const SELECT_COURSES_WITH_COUNTS: &str = "
    SELECT c.course_id, c.course_name, c.course_code, c.description, c.duration_months, c.fees,
           COUNT(s.student_id) AS student_count
    FROM courses c
    LEFT JOIN students s ON c.course_id = s.course_id
    GROUP BY c.course_id
    ORDER BY c.course_name
";
const SELECT_COURSE_BY_ID: &str = "SELECT course_id, course_name, course_code, description, duration_months, fees FROM courses WHERE course_id = ?1";
const SELECT_COURSE_BY_CODE: &str = "SELECT course_id, course_name, course_code, description, duration_months, fees FROM courses WHERE course_code = ?1";

pub struct Courses<'a> {
    conn: &'a Connection,
}

impl<'a> Courses<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Inserts a course; a clashing name or code yields "Course already exists!".
    pub fn add_course(&self, course: &Course) -> WriteOutcome {
        let result = self.conn.execute(
            INSERT_COURSE,
            params![course.course_name, course.course_code, course.description, course.duration_months, course.fees],
        );
        match result {
            Ok(affected) => {
                tracing::debug!(id = self.conn.last_insert_rowid(), code = %course.course_code, "course inserted");
                WriteOutcome::ok(Message::CourseAdded, affected)
            }
            Err(e) if unique_violation(&e).is_some() => WriteOutcome::failed(Message::CourseAlreadyExists),
            Err(e) => WriteOutcome::failed(Message::CourseError(e.to_string())),
        }
    }

    /// Overwrites every editable field of course `course_id`.
    pub fn update_course(&self, course_id: i64, course: &Course) -> WriteOutcome {
        let result = self.conn.execute(
            UPDATE_COURSE,
            params![course_id, course.course_name, course.course_code, course.description, course.duration_months, course.fees],
        );
        match result {
            Ok(affected) => WriteOutcome::ok(Message::CourseUpdated, affected),
            Err(e) => WriteOutcome::failed(Message::CourseError(e.to_string())),
        }
    }

    /// Students of the course keep their record with the course cleared;
    /// its attendance rows go with it.
    pub fn delete_course(&self, course_id: i64) -> WriteOutcome {
        match self.conn.execute(DELETE_COURSE, params![course_id]) {
            Ok(affected) => {
                tracing::debug!(course_id, affected, "course deleted");
                WriteOutcome::ok(Message::CourseDeleted, affected)
            }
            Err(e) => WriteOutcome::failed(Message::CourseError(e.to_string())),
        }
    }

    /// Every course with its live enrollment count, ordered by name.
    pub fn get_all_courses(&self) -> StoreResult<Vec<CourseEnrollment>> {
        let mut stmt = self.conn.prepare(SELECT_COURSES_WITH_COUNTS)?;
        collect_rows(&mut stmt, [], "course", CourseEnrollment::from_row)
    }

    pub fn get_course_by_id(&self, course_id: i64) -> StoreResult<Option<Course>> {
        Ok(self.conn.query_row(SELECT_COURSE_BY_ID, params![course_id], Course::from_row).optional()?)
    }

    pub fn get_course_by_code(&self, course_code: &str) -> StoreResult<Option<Course>> {
        Ok(self.conn.query_row(SELECT_COURSE_BY_CODE, params![course_code], Course::from_row).optional()?)
    }
}
