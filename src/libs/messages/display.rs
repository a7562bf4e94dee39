//! Display implementation for application messages.
//!
//! Every user-facing string lives here, so the repositories, the command
//! handlers and the export layer all speak with the same voice. Write
//! outcomes carry these strings verbatim, which makes them suitable for
//! direct display by any front end.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === STUDENT MESSAGES ===
            Message::StudentAdded => "Student added successfully!".to_string(),
            Message::StudentUpdated => "Student updated successfully!".to_string(),
            Message::StudentDeleted => "Student deleted successfully!".to_string(),
            Message::StudentDuplicate(detail) => format!("Duplicate entry: {}", detail),
            Message::StudentAddFailed(error) => format!("Error adding student: {}", error),
            Message::StudentUpdateFailed(error) => format!("Error updating student: {}", error),
            Message::StudentDeleteFailed(error) => format!("Error deleting student: {}", error),
            Message::StudentNotFound(id) => format!("Student '{}' not found.", id),
            Message::StudentIdGenerated(id) => format!("Generated student ID {}", id),
            Message::StudentIdSequenceExhausted(year) => {
                format!("All 9999 student IDs for {} are taken; the sequence cannot be widened without breaking ordering.", year)
            }
            Message::StudentPhotoStored(path) => format!("Photo stored at {}", path),
            Message::StudentPhotoCleanupFailed(path, error) => format!("Could not remove copied photo {}: {}", path, error),
            Message::MissingStudentField(field) => format!("--{} is required when adding a student", field),
            Message::StudentListHeader => "Students:".to_string(),
            Message::StudentSearchResults(query) => format!("Students matching '{}':", query),
            Message::NoStudentsFound => "No students found.".to_string(),
            Message::ConfirmDeleteStudent(id) => format!("Delete student '{}' and all of their attendance?", id),

            // === COURSE MESSAGES ===
            Message::CourseAdded => "Course added successfully!".to_string(),
            Message::CourseUpdated => "Course updated successfully!".to_string(),
            Message::CourseDeleted => "Course deleted successfully!".to_string(),
            Message::CourseAlreadyExists => "Course already exists!".to_string(),
            Message::CourseError(error) => format!("Error: {}", error),
            Message::CourseNotFound(course) => format!("Course '{}' not found.", course),
            Message::CourseListHeader => "Courses:".to_string(),
            Message::NoCoursesFound => "No courses found.".to_string(),
            Message::ConfirmDeleteCourse(name) => {
                format!("Delete course '{}'? Enrolled students lose their course and its attendance is removed.", name)
            }

            // === ATTENDANCE MESSAGES ===
            Message::AttendanceMarked => "Attendance marked successfully!".to_string(),
            Message::AttendanceError(error) => format!("Error: {}", error),
            Message::AttendanceHeader(date) => format!("Attendance for {}", date),
            Message::AttendanceRangeHeader(start, end) => format!("Attendance from {} to {}", start, end),
            Message::NoAttendanceFound => "No attendance records found.".to_string(),
            Message::NoStudentsInCourse(course) => format!("No students are enrolled in '{}'.", course),
            Message::RollCallSummary(ok, total) => format!("Attendance saved for {} of {} student(s)", ok, total),
            Message::StudentAttendanceRate(id, rate) => format!("Attendance rate for {}: {:.2}%", id, rate),
            Message::CourseAttendanceRate(name, rate) => format!("Attendance rate for {}: {:.2}%", name, rate),
            Message::DateAttendanceRate(date, rate) => format!("Attendance rate on {}: {:.2}%", date, rate),
            Message::RangeAttendanceRate(start, end, rate) => format!("Attendance rate from {} to {}: {:.2}%", start, end, rate),

            // === USER MESSAGES ===
            Message::UserRegistered => "User registered successfully!".to_string(),
            Message::UserAlreadyExists => "Username or email already exists!".to_string(),
            Message::UserError(error) => format!("Error: {}", error),
            Message::PasswordUpdated => "Password updated successfully!".to_string(),
            Message::PasswordUpdateFailed(error) => format!("Error: {}", error),
            Message::EmailNotRegistered => "Email not registered".to_string(),
            Message::LoginSucceeded(name) => format!("Welcome {}", name),
            Message::LoginFailed => "Invalid credentials".to_string(),
            Message::AllFieldsRequired => "All fields required".to_string(),
            Message::PasswordsDoNotMatch => "Passwords do not match".to_string(),
            Message::PasswordTooShort(min) => format!("Password must be at least {} characters", min),
            Message::PromptPassword => "Password".to_string(),
            Message::PromptConfirmPassword => "Confirm password".to_string(),

            // === DASHBOARD MESSAGES ===
            Message::DashboardHeader => "Dashboard".to_string(),
            Message::StudentsByCourseHeader => "Students by course".to_string(),
            Message::MonthlyAdmissionsHeader => "Admissions over the last 12 months".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigLoaded => "Configuration loaded successfully".to_string(),
            Message::ConfigParseError => "Failed to parse configuration".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportingData(data, format) => format!("Exporting {} in {} format...", data, format),
            Message::ExportCompleted(path) => format!("Export completed successfully: {}", path),
            Message::NoDataToExport(data) => format!("No {} to export", data),

            // === DATABASE MESSAGES ===
            Message::DbConnectionFailed(error) => format!("Connection Error: {}", error),
            Message::DbProvisioned(path) => format!("Database ready at {}", path),
            Message::DbRowSkipped(entity, error) => format!("Skipping malformed {} row: {}", entity, error),
            Message::InvalidDate(value) => format!("Invalid date '{}'. Use 'today' or YYYY-MM-DD.", value),
            Message::InvalidDateRange(start, end) => format!("Start date {} is after end date {}", start, end),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::NoRecordMatched => "No matching record; nothing was changed".to_string(),
        };

        write!(f, "{}", text)
    }
}
