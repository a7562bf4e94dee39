use super::collect_rows;
use crate::libs::attendance::{AttendanceMark, AttendanceRecord, RollCallMark};
use crate::libs::error::StoreResult;
use crate::libs::messages::Message;
use crate::libs::outcome::WriteOutcome;
use chrono::NaiveDate;
use rusqlite::{params, Connection};

/// (student, date) is unique; a repeat mark replaces status and remarks but
/// keeps the original course and row id.
const UPSERT_ATTENDANCE: &str = "
    INSERT INTO attendance (student_id, course_id, attendance_date, status, remarks)
    VALUES (?1, ?2, ?3, ?4, ?5)
    ON CONFLICT(student_id, attendance_date) DO UPDATE SET status = excluded.status, remarks = excluded.remarks
";
const SELECT_BY_DATE: &str = "
    SELECT a.attendance_id, a.student_id, a.course_id, a.attendance_date, a.status, a.remarks,
           s.first_name, s.last_name, c.course_name
    FROM attendance a
    JOIN students s ON a.student_id = s.student_id
    JOIN courses c ON a.course_id = c.course_id
    WHERE a.attendance_date = ?1
    ORDER BY a.student_id
";
const SELECT_BY_DATE_AND_COURSE: &str = "
    SELECT a.attendance_id, a.student_id, a.course_id, a.attendance_date, a.status, a.remarks,
           s.first_name, s.last_name, c.course_name
    FROM attendance a
    JOIN students s ON a.student_id = s.student_id
    JOIN courses c ON a.course_id = c.course_id
    WHERE a.attendance_date = ?1 AND a.course_id = ?2
    ORDER BY a.student_id
";

pub struct AttendanceRepo<'a> {
    conn: &'a Connection,
}

impl<'a> AttendanceRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn mark_attendance(&self, mark: &AttendanceMark) -> WriteOutcome {
        let result = self.conn.execute(
            UPSERT_ATTENDANCE,
            params![mark.student_id, mark.course_id, mark.date, mark.status, mark.remarks],
        );
        match result {
            Ok(affected) => {
                tracing::debug!(student_id = %mark.student_id, date = %mark.date, status = %mark.status, "attendance marked");
                WriteOutcome::ok(Message::AttendanceMarked, affected)
            }
            Err(e) => WriteOutcome::failed(Message::AttendanceError(e.to_string())),
        }
    }

    /// Marks every student of a roll call for `course_id` on `date`. Each mark
    /// commits on its own, so one failure does not undo the others.
    pub fn mark_roll_call(&self, course_id: i64, date: NaiveDate, marks: Vec<RollCallMark>) -> Vec<(String, WriteOutcome)> {
        marks
            .into_iter()
            .map(|entry| {
                let mark = entry.into_mark(course_id, date);
                let outcome = self.mark_attendance(&mark);
                (mark.student_id, outcome)
            })
            .collect()
    }

    /// Marks recorded on `date`, optionally only for one course.
    pub fn get_attendance_by_date(&self, date: NaiveDate, course_id: Option<i64>) -> StoreResult<Vec<AttendanceRecord>> {
        match course_id {
            Some(course_id) => {
                let mut stmt = self.conn.prepare(SELECT_BY_DATE_AND_COURSE)?;
                collect_rows(&mut stmt, params![date, course_id], "attendance", AttendanceRecord::from_row)
            }
            None => {
                let mut stmt = self.conn.prepare(SELECT_BY_DATE)?;
                collect_rows(&mut stmt, params![date], "attendance", AttendanceRecord::from_row)
            }
        }
    }
}
