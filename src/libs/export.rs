//! Spreadsheet and data-file export.
//!
//! Students, courses and attendance ranges can be written as CSV, pretty JSON
//! or an Excel workbook. All three read through the ordinary repository
//! queries; nothing here talks SQL.
//!
//! CSV and Excel share one tabular layout per dataset (sheet name, header
//! labels, cell values). JSON serializes the records themselves.

use crate::db::db::Db;
use crate::libs::attendance::AttendanceReportRow;
use crate::libs::course::CourseEnrollment;
use crate::libs::formatter::{format_date, or_na};
use crate::libs::messages::Message;
use crate::libs::student::Student;
use crate::{msg_bail_anyhow, msg_info, msg_success};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
            ExportFormat::Excel => "Excel",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportData {
    Students,
    Courses,
    /// Attendance marks within a date range.
    Attendance,
}

impl ExportData {
    pub fn name(&self) -> &'static str {
        match self {
            ExportData::Students => "students",
            ExportData::Courses => "courses",
            ExportData::Attendance => "attendance",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    fn opt_text(value: Option<&str>) -> Self {
        value.map_or(Cell::Empty, Cell::text)
    }

    fn opt_number(value: Option<f64>) -> Self {
        value.map_or(Cell::Empty, Cell::Number)
    }

    fn as_csv(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Number(number) => number.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// One dataset laid out as a sheet.
struct Sheet {
    name: &'static str,
    header_color: u32,
    headers: &'static [&'static str],
    rows: Vec<Vec<Cell>>,
}

const STUDENT_HEADERS: &[&str] = &[
    "Student ID",
    "First Name",
    "Last Name",
    "Gender",
    "DOB",
    "Email",
    "Phone",
    "Address",
    "Course",
    "Admission Date",
    "Status",
];
const COURSE_HEADERS: &[&str] = &["Course ID", "Name", "Code", "Description", "Duration (Months)", "Fees", "Students Enrolled"];
const ATTENDANCE_HEADERS: &[&str] = &["Student ID", "Student Name", "Course", "Date", "Status", "Remarks"];

fn students_sheet(students: &[Student]) -> Sheet {
    Sheet {
        name: "Students",
        header_color: 0x1F538D,
        headers: STUDENT_HEADERS,
        rows: students
            .iter()
            .map(|s| {
                vec![
                    Cell::text(&s.student_id),
                    Cell::text(&s.first_name),
                    Cell::text(&s.last_name),
                    Cell::text(s.gender.as_str()),
                    Cell::text(format_date(&s.dob)),
                    Cell::opt_text(s.email.as_deref()),
                    Cell::opt_text(s.phone.as_deref()),
                    Cell::opt_text(s.address.as_deref()),
                    Cell::text(or_na(s.course_name.as_deref())),
                    Cell::text(format_date(&s.admission_date)),
                    Cell::text(s.status.as_str()),
                ]
            })
            .collect(),
    }
}

fn courses_sheet(courses: &[CourseEnrollment]) -> Sheet {
    Sheet {
        name: "Courses",
        header_color: 0x14A085,
        headers: COURSE_HEADERS,
        rows: courses
            .iter()
            .map(|entry| {
                let c = &entry.course;
                vec![
                    Cell::opt_number(c.course_id.map(|id| id as f64)),
                    Cell::text(&c.course_name),
                    Cell::text(&c.course_code),
                    Cell::opt_text(c.description.as_deref()),
                    Cell::opt_number(c.duration_months.map(f64::from)),
                    Cell::opt_number(c.fees),
                    Cell::Number(entry.student_count as f64),
                ]
            })
            .collect(),
    }
}

fn attendance_sheet(rows: &[AttendanceReportRow]) -> Sheet {
    Sheet {
        name: "Attendance",
        header_color: 0xF39C12,
        headers: ATTENDANCE_HEADERS,
        rows: rows
            .iter()
            .map(|r| {
                vec![
                    Cell::text(&r.student_id),
                    Cell::text(&r.student_name),
                    Cell::text(&r.course_name),
                    Cell::text(format_date(&r.date)),
                    Cell::text(r.status.as_str()),
                    Cell::opt_text(r.remarks.as_deref()),
                ]
            })
            .collect(),
    }
}

pub struct Exporter {
    format: ExportFormat,
    data: ExportData,
    output_path: PathBuf,
}

impl Exporter {
    /// Without an explicit path the file is `<data>_<YYYYmmdd_HHMMSS>.<ext>`
    /// in the working directory.
    pub fn new(format: ExportFormat, data: ExportData, output_path: Option<PathBuf>) -> Self {
        let output_path = output_path.unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}_{}.{}",
                data.name(),
                Local::now().format("%Y%m%d_%H%M%S"),
                format.extension()
            ))
        });
        Self { format, data, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn data(&self) -> ExportData {
        self.data
    }

    /// Writes the dataset to the output file. `range` bounds attendance
    /// exports (inclusive) and is ignored for the other datasets. Refuses to
    /// write an empty file.
    pub fn export(&self, db: &Db, range: (NaiveDate, NaiveDate)) -> Result<()> {
        msg_info!(Message::ExportingData(self.data.name().to_string(), self.format.to_string()));

        match self.data {
            ExportData::Students => {
                let students = db.students().get_all_students()?;
                self.write(&students, students_sheet)?
            }
            ExportData::Courses => {
                let courses = db.courses().get_all_courses()?;
                self.write(&courses, courses_sheet)?
            }
            ExportData::Attendance => {
                let (start, end) = range;
                let rows = db.stats().attendance_in_range(start, end)?;
                self.write(&rows, attendance_sheet)?
            }
        }

        msg_success!(Message::ExportCompleted(self.output_path.display().to_string()));
        Ok(())
    }

    fn write<T: Serialize>(&self, records: &[T], layout: fn(&[T]) -> Sheet) -> Result<()> {
        if records.is_empty() {
            msg_bail_anyhow!(Message::NoDataToExport(self.data.name().to_string()));
        }
        match self.format {
            ExportFormat::Json => self.write_json(records),
            ExportFormat::Csv => self.write_csv(&layout(records)),
            ExportFormat::Excel => self.write_excel(&layout(records)),
        }
    }

    fn write_json<T: Serialize>(&self, records: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }

    fn write_csv(&self, sheet: &Sheet) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        wtr.write_record(sheet.headers)?;
        for row in &sheet.rows {
            wtr.write_record(row.iter().map(Cell::as_csv))?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn write_excel(&self, sheet: &Sheet) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name)?;

        let header_format = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(sheet.header_color))
            .set_align(FormatAlign::Center);

        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (i, cells) in sheet.rows.iter().enumerate() {
            let row = i as u32 + 1;
            for (col, cell) in cells.iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Text(text) => {
                        worksheet.write_string(row, col, text)?;
                    }
                    Cell::Number(number) => {
                        worksheet.write_number(row, col, *number)?;
                    }
                    Cell::Empty => {}
                }
            }
        }

        worksheet.autofit();
        workbook.save(&self.output_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::student::Gender;

    #[test]
    fn default_name_carries_dataset_and_extension() {
        let exporter = Exporter::new(ExportFormat::Excel, ExportData::Courses, None);
        let name = exporter.output_path().to_string_lossy().to_string();
        assert!(name.starts_with("courses_"));
        assert!(name.ends_with(".xlsx"));
        assert_eq!(exporter.data(), ExportData::Courses);
    }

    #[test]
    fn student_without_course_exports_na() {
        let student = Student::new("STU-20250001", "Asha", "Rao", Gender::Female, NaiveDate::from_ymd_opt(2004, 5, 17).unwrap());
        let sheet = students_sheet(&[student]);
        assert_eq!(sheet.rows[0].len(), STUDENT_HEADERS.len());
        assert_eq!(sheet.rows[0][8], Cell::text("N/A"));
        assert_eq!(sheet.rows[0][5], Cell::Empty);
    }
}
