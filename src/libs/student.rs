//! Student records and the closed set of searchable columns.

use super::text_enum::text_enum;
use chrono::{Local, NaiveDate};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

text_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
    pub enum Gender {
        Male => "Male",
        Female => "Female",
        Other => "Other",
    }
}

text_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
    pub enum StudentStatus {
        #[default]
        Active => "Active",
        Inactive => "Inactive",
        Graduated => "Graduated",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub dob: NaiveDate,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub course_id: Option<i64>,
    pub admission_date: NaiveDate,
    pub photo_path: Option<String>,
    pub status: StudentStatus,
    /// Joined from `courses` on reads; ignored on writes.
    pub course_name: Option<String>,
}

impl Student {
    /// New active student admitted today, with no contact details or course.
    pub fn new(student_id: &str, first_name: &str, last_name: &str, gender: Gender, dob: NaiveDate) -> Self {
        Self {
            student_id: student_id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            gender,
            dob,
            email: None,
            phone: None,
            address: None,
            course_id: None,
            admission_date: Local::now().date_naive(),
            photo_path: None,
            status: StudentStatus::Active,
            course_name: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            student_id: row.get("student_id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            gender: row.get("gender")?,
            dob: row.get("dob")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            address: row.get("address")?,
            course_id: row.get("course_id")?,
            admission_date: row.get("admission_date")?,
            photo_path: row.get("photo_path")?,
            status: row.get("status")?,
            course_name: row.get("course_name")?,
        })
    }
}

/// Column(s) a student search matches against.
///
/// The variants map to fixed column references; search terms are always bound
/// as parameters, so no caller-supplied text ever reaches the SQL itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SearchField {
    /// Student ID, first name, last name and email.
    #[default]
    All,
    StudentId,
    FirstName,
    LastName,
    Email,
    Phone,
}

impl SearchField {
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            SearchField::All => &["s.student_id", "s.first_name", "s.last_name", "s.email"],
            SearchField::StudentId => &["s.student_id"],
            SearchField::FirstName => &["s.first_name"],
            SearchField::LastName => &["s.last_name"],
            SearchField::Email => &["s.email"],
            SearchField::Phone => &["s.phone"],
        }
    }

    /// `WHERE` predicate matching `?1` against every column of this field.
    /// Both sides go through the connection's `fold` function, so case is
    /// ignored for every script, not only ASCII.
    pub(crate) fn predicate(&self) -> String {
        self.columns()
            .iter()
            .map(|column| format!("fold({}) LIKE fold(?1) ESCAPE '\\'", column))
            .collect::<Vec<_>>()
            .join(" OR ")
    }
}

/// Wraps `term` for a literal, case-insensitive substring `LIKE` match.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("john"), "%john%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn all_field_covers_identity_names_and_email() {
        let predicate = SearchField::All.predicate();
        assert_eq!(predicate.matches("LIKE fold(?1)").count(), 4);
        assert!(predicate.contains("fold(s.email) LIKE fold(?1)"));
        assert_eq!(SearchField::Phone.predicate(), "fold(s.phone) LIKE fold(?1) ESCAPE '\\'");
    }

    #[test]
    fn status_text_round_trips_through_from_str() {
        for status in StudentStatus::ALL {
            assert_eq!(status.as_str().parse::<StudentStatus>().unwrap(), *status);
        }
        assert!("active".parse::<StudentStatus>().is_err());
        assert_eq!(StudentStatus::default(), StudentStatus::Active);
    }
}
