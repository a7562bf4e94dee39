use rusqlite::Row;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Assigned by the store on insert.
    pub course_id: Option<i64>,
    pub course_name: String,
    pub course_code: String,
    pub description: Option<String>,
    pub duration_months: Option<i32>,
    pub fees: Option<f64>,
}

impl Course {
    pub fn new(name: &str, code: &str, description: Option<&str>, duration_months: Option<i32>, fees: Option<f64>) -> Self {
        Self {
            course_id: None,
            course_name: name.to_string(),
            course_code: code.to_string(),
            description: description.map(str::to_string),
            duration_months,
            fees,
        }
    }

    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            course_id: row.get("course_id")?,
            course_name: row.get("course_name")?,
            course_code: row.get("course_code")?,
            description: row.get("description")?,
            duration_months: row.get("duration_months")?,
            fees: row.get("fees")?,
        })
    }
}

/// A course together with the number of students currently referencing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseEnrollment {
    #[serde(flatten)]
    pub course: Course,
    pub student_count: i64,
}

impl CourseEnrollment {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            course: Course::from_row(row)?,
            student_count: row.get("student_count")?,
        })
    }
}
