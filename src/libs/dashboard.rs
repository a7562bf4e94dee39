use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseCount {
    pub course_name: String,
    pub count: i64,
}

/// Admissions in one calendar month, `month` formatted `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_students: i64,
    pub total_courses: i64,
    pub active_students: i64,
    /// Overall Present percentage, rounded to 2 decimal places.
    pub attendance_rate: f64,
    /// Every course, including those with no students.
    pub students_by_course: Vec<CourseCount>,
    /// Trailing 12 months; months without admissions are absent.
    pub monthly_admissions: Vec<MonthCount>,
}
