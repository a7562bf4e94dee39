//! Attendance rates, range reports and the dashboard rollup.

use super::collect_rows;
use crate::libs::attendance::AttendanceReportRow;
use crate::libs::dashboard::{CourseCount, DashboardStats, MonthCount};
use crate::libs::error::StoreResult;
use crate::libs::rate::{round2, AttendanceTally};
use chrono::{Local, Months, NaiveDate};
use rusqlite::{params, Connection, Params};

const TALLY: &str = "SELECT COUNT(*), COALESCE(SUM(CASE WHEN status = 'Present' THEN 1 ELSE 0 END), 0) FROM attendance";
const SELECT_RANGE_REPORT: &str = "
    SELECT a.student_id,
           s.first_name || ' ' || s.last_name AS student_name,
           c.course_name,
           a.attendance_date,
           a.status,
           a.remarks
    FROM attendance a
    JOIN students s ON a.student_id = s.student_id
    JOIN courses c ON a.course_id = c.course_id
    WHERE a.attendance_date BETWEEN ?1 AND ?2
    ORDER BY a.attendance_date, a.student_id
";
const COUNT_STUDENTS: &str = "SELECT COUNT(*) FROM students";
const COUNT_COURSES: &str = "SELECT COUNT(*) FROM courses";
const COUNT_ACTIVE_STUDENTS: &str = "SELECT COUNT(*) FROM students WHERE status = 'Active'";
const SELECT_STUDENTS_BY_COURSE: &str = "
    SELECT c.course_name, COUNT(s.student_id)
    FROM courses c
    LEFT JOIN students s ON c.course_id = s.course_id
    GROUP BY c.course_id, c.course_name
    ORDER BY c.course_name
";
const SELECT_MONTHLY_ADMISSIONS: &str = "
    SELECT strftime('%Y-%m', admission_date) AS month, COUNT(*)
    FROM students
    WHERE admission_date >= ?1
    GROUP BY month
    ORDER BY month
";

pub struct Stats<'a> {
    conn: &'a Connection,
}

impl<'a> Stats<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn tally<P: Params>(&self, filter: &str, params: P) -> StoreResult<AttendanceTally> {
        let sql = format!("{} {}", TALLY, filter);
        let tally = self.conn.query_row(&sql, params, |row| {
            Ok(AttendanceTally {
                total: row.get(0)?,
                present: row.get(1)?,
            })
        })?;
        Ok(tally)
    }

    /// Present percentage over all of the student's marks; 0 when unmarked.
    pub fn student_attendance_rate(&self, student_id: &str) -> StoreResult<f64> {
        Ok(self.tally("WHERE student_id = ?1", params![student_id])?.percentage())
    }

    pub fn course_attendance_rate(&self, course_id: i64) -> StoreResult<f64> {
        Ok(self.tally("WHERE course_id = ?1", params![course_id])?.percentage())
    }

    pub fn date_attendance_rate(&self, date: NaiveDate) -> StoreResult<f64> {
        Ok(self.tally("WHERE attendance_date = ?1", params![date])?.percentage())
    }

    /// Inclusive on both ends.
    pub fn range_attendance_rate(&self, start: NaiveDate, end: NaiveDate) -> StoreResult<f64> {
        Ok(self
            .tally("WHERE attendance_date BETWEEN ?1 AND ?2", params![start, end])?
            .percentage())
    }

    /// Every mark from `start` through `end`, ordered by date then student id.
    pub fn attendance_in_range(&self, start: NaiveDate, end: NaiveDate) -> StoreResult<Vec<AttendanceReportRow>> {
        let mut stmt = self.conn.prepare(SELECT_RANGE_REPORT)?;
        collect_rows(&mut stmt, params![start, end], "attendance", AttendanceReportRow::from_row)
    }

    pub fn dashboard_stats(&self) -> StoreResult<DashboardStats> {
        self.dashboard_stats_as_of(Local::now().date_naive())
    }

    /// Dashboard figures with the admissions window ending at `today`.
    pub fn dashboard_stats_as_of(&self, today: NaiveDate) -> StoreResult<DashboardStats> {
        let count = |sql: &str| self.conn.query_row(sql, [], |row| row.get::<_, i64>(0));

        let students_by_course = {
            let mut stmt = self.conn.prepare(SELECT_STUDENTS_BY_COURSE)?;
            collect_rows(&mut stmt, [], "course", |row| {
                Ok(CourseCount {
                    course_name: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
        };

        let cutoff = today.checked_sub_months(Months::new(12)).unwrap_or(NaiveDate::MIN);
        let monthly_admissions = {
            let mut stmt = self.conn.prepare(SELECT_MONTHLY_ADMISSIONS)?;
            collect_rows(&mut stmt, params![cutoff], "admissions", |row| {
                Ok(MonthCount {
                    month: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
        };

        let stats = DashboardStats {
            total_students: count(COUNT_STUDENTS)?,
            total_courses: count(COUNT_COURSES)?,
            active_students: count(COUNT_ACTIVE_STUDENTS)?,
            attendance_rate: round2(self.tally("", [])?.percentage()),
            students_by_course,
            monthly_admissions,
        };
        tracing::debug!(?cutoff, students = stats.total_students, courses = stats.total_courses, "dashboard computed");
        Ok(stats)
    }
}
