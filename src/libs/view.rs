use super::attendance::{AttendanceRecord, AttendanceReportRow};
use super::course::CourseEnrollment;
use super::dashboard::DashboardStats;
use super::formatter::{format_date, format_fees, format_rate, or_na};
use super::student::Student;
use prettytable::{row, Table};

/// Terminal tables for command output.
pub struct View {}

impl View {
    pub fn students(students: &[Student]) {
        let mut table = Table::new();

        table.add_row(row!["STUDENT ID", "NAME", "GENDER", "DOB", "EMAIL", "PHONE", "COURSE", "ADMITTED", "STATUS"]);
        for s in students {
            table.add_row(row![
                s.student_id,
                s.full_name(),
                s.gender,
                format_date(&s.dob),
                s.email.as_deref().unwrap_or(""),
                s.phone.as_deref().unwrap_or(""),
                or_na(s.course_name.as_deref()),
                format_date(&s.admission_date),
                s.status
            ]);
        }
        table.printstd();
    }

    pub fn student_detail(student: &Student, attendance_rate: f64) {
        let mut table = Table::new();

        table.add_row(row!["Student ID", student.student_id]);
        table.add_row(row!["Name", student.full_name()]);
        table.add_row(row!["Gender", student.gender]);
        table.add_row(row!["DOB", format_date(&student.dob)]);
        table.add_row(row!["Email", student.email.as_deref().unwrap_or("")]);
        table.add_row(row!["Phone", student.phone.as_deref().unwrap_or("")]);
        table.add_row(row!["Address", student.address.as_deref().unwrap_or("")]);
        table.add_row(row!["Course", or_na(student.course_name.as_deref())]);
        table.add_row(row!["Admission Date", format_date(&student.admission_date)]);
        table.add_row(row!["Photo", student.photo_path.as_deref().unwrap_or("")]);
        table.add_row(row!["Status", student.status]);
        table.add_row(row!["Attendance", format_rate(attendance_rate)]);
        table.printstd();
    }

    pub fn courses(courses: &[CourseEnrollment]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "CODE", "NAME", "MONTHS", "FEES", "STUDENTS"]);
        for entry in courses {
            let c = &entry.course;
            table.add_row(row![
                c.course_id.unwrap_or(0),
                c.course_code,
                c.course_name,
                c.duration_months.map(|m| m.to_string()).unwrap_or_default(),
                format_fees(c.fees),
                entry.student_count
            ]);
        }
        table.printstd();
    }

    pub fn attendance(records: &[AttendanceRecord]) {
        let mut table = Table::new();

        table.add_row(row!["STUDENT ID", "NAME", "COURSE", "STATUS", "REMARKS"]);
        for r in records {
            table.add_row(row![
                r.student_id,
                format!("{} {}", r.first_name, r.last_name),
                r.course_name,
                r.status,
                r.remarks.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();
    }

    pub fn attendance_report(rows: &[AttendanceReportRow]) {
        let mut table = Table::new();

        table.add_row(row!["DATE", "STUDENT ID", "NAME", "COURSE", "STATUS", "REMARKS"]);
        for r in rows {
            table.add_row(row![
                format_date(&r.date),
                r.student_id,
                r.student_name,
                r.course_name,
                r.status,
                r.remarks.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();
    }

    pub fn dashboard(stats: &DashboardStats) {
        let mut totals = Table::new();
        totals.add_row(row!["Total Students", stats.total_students]);
        totals.add_row(row!["Active Students", stats.active_students]);
        totals.add_row(row!["Total Courses", stats.total_courses]);
        totals.add_row(row!["Attendance Rate", format_rate(stats.attendance_rate)]);
        totals.printstd();
    }

    pub fn students_by_course(stats: &DashboardStats) {
        let mut table = Table::new();
        table.add_row(row!["COURSE", "STUDENTS"]);
        for entry in &stats.students_by_course {
            table.add_row(row![entry.course_name, entry.count]);
        }
        table.printstd();
    }

    pub fn monthly_admissions(stats: &DashboardStats) {
        let mut table = Table::new();
        table.add_row(row!["MONTH", "ADMISSIONS"]);
        for entry in &stats.monthly_admissions {
            table.add_row(row![entry.month, entry.count]);
        }
        table.printstd();
    }
}
