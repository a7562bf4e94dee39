use super::text_enum::text_enum;
use chrono::NaiveDate;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

text_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
    pub enum AttendanceStatus {
        Present => "Present",
        Absent => "Absent",
    }
}

/// A single attendance mark to be written; the (student, date) pair is the key.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceMark {
    pub student_id: String,
    pub course_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

impl AttendanceMark {
    pub fn new(student_id: &str, course_id: i64, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            student_id: student_id.to_string(),
            course_id,
            date,
            status,
            remarks: None,
        }
    }

    pub fn with_remarks(mut self, remarks: &str) -> Self {
        self.remarks = Some(remarks.to_string());
        self
    }
}

/// One student's line in a roll call; course and date are shared by the call.
#[derive(Debug, Clone, PartialEq)]
pub struct RollCallMark {
    pub student_id: String,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

impl RollCallMark {
    pub fn new(student_id: &str, status: AttendanceStatus) -> Self {
        Self {
            student_id: student_id.to_string(),
            status,
            remarks: None,
        }
    }

    pub fn into_mark(self, course_id: i64, date: NaiveDate) -> AttendanceMark {
        AttendanceMark {
            student_id: self.student_id,
            course_id,
            date,
            status: self.status,
            remarks: self.remarks,
        }
    }
}

/// Stored attendance row joined with the student's name and the course name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRecord {
    pub attendance_id: i64,
    pub student_id: String,
    pub course_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub course_name: String,
}

impl AttendanceRecord {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            attendance_id: row.get("attendance_id")?,
            student_id: row.get("student_id")?,
            course_id: row.get("course_id")?,
            date: row.get("attendance_date")?,
            status: row.get("status")?,
            remarks: row.get("remarks")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            course_name: row.get("course_name")?,
        })
    }
}

/// Flattened attendance line used by range reports and exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceReportRow {
    pub student_id: String,
    pub student_name: String,
    pub course_name: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

impl AttendanceReportRow {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            student_id: row.get("student_id")?,
            student_name: row.get("student_name")?,
            course_name: row.get("course_name")?,
            date: row.get("attendance_date")?,
            status: row.get("status")?,
            remarks: row.get("remarks")?,
        })
    }
}
