#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use institute::db::db::Db;
    use institute::libs::assets::Assets;
    use institute::libs::attendance::{AttendanceMark, AttendanceStatus};
    use institute::libs::course::Course;
    use institute::libs::dashboard::{CourseCount, MonthCount};
    use institute::libs::student::{Gender, Student, StudentStatus};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct StatsTestContext {
        db: Db,
        _temp_dir: TempDir,
    }

    impl TestContext for StatsTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::provision(&temp_dir.path().join("institute.db"), &Assets::new(temp_dir.path().join("assets"))).unwrap();
            StatsTestContext { db, _temp_dir: temp_dir }
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add_course(db: &Db, name: &str, code: &str) -> i64 {
        assert!(db.courses().add_course(&Course::new(name, code, None, None, None)).success);
        db.courses().get_course_by_code(code).unwrap().unwrap().course_id.unwrap()
    }

    fn admit(db: &Db, id: &str, first: &str, last: &str, course_id: Option<i64>, admitted: NaiveDate) {
        let mut student = Student::new(id, first, last, Gender::Female, date(2004, 5, 17));
        student.course_id = course_id;
        student.admission_date = admitted;
        let outcome = db.students().add_student(&student);
        assert!(outcome.success, "{}", outcome.message);
    }

    fn mark(db: &Db, id: &str, course_id: i64, on: NaiveDate, status: AttendanceStatus) {
        assert!(db.attendance().mark_attendance(&AttendanceMark::new(id, course_id, on, status)).success);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_rates_are_zero_without_records(ctx: &mut StatsTestContext) {
        let stats = ctx.db.stats();
        assert_eq!(stats.student_attendance_rate("STU-20250001").unwrap(), 0.0);
        assert_eq!(stats.course_attendance_rate(1).unwrap(), 0.0);
        assert_eq!(stats.date_attendance_rate(date(2025, 3, 3)).unwrap(), 0.0);
        assert_eq!(stats.range_attendance_rate(date(2025, 1, 1), date(2025, 12, 31)).unwrap(), 0.0);
        assert_eq!(stats.dashboard_stats().unwrap().attendance_rate, 0.0);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_data_science_enrollment_flow(ctx: &mut StatsTestContext) {
        let before = ctx.db.stats().dashboard_stats().unwrap().total_students;

        let outcome = ctx
            .db
            .courses()
            .add_course(&Course::new("Data Science", "DS101", None, Some(6), Some(500.0)));
        assert!(outcome.success);
        let course_id = ctx.db.courses().get_course_by_code("DS101").unwrap().unwrap().course_id.unwrap();

        let id = ctx.db.students().next_student_id().unwrap();
        let mut student = Student::new(&id, "Nila", "Das", Gender::Female, date(2005, 8, 21));
        student.course_id = Some(course_id);
        assert!(ctx.db.students().add_student(&student).success);

        let today = date(2025, 4, 2);
        mark(&ctx.db, &id, course_id, today, AttendanceStatus::Present);
        assert_eq!(ctx.db.stats().student_attendance_rate(&id).unwrap(), 100.0);

        mark(&ctx.db, &id, course_id, today, AttendanceStatus::Absent);
        assert_eq!(ctx.db.stats().student_attendance_rate(&id).unwrap(), 0.0);

        let after = ctx.db.stats().dashboard_stats().unwrap();
        assert_eq!(after.total_students, before + 1);
        assert!(after.students_by_course.contains(&CourseCount {
            course_name: "Data Science".into(),
            count: 1,
        }));
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_course_date_and_range_rates(ctx: &mut StatsTestContext) {
        let python = add_course(&ctx.db, "Python", "PY101");
        let web = add_course(&ctx.db, "Web Design", "WD101");
        admit(&ctx.db, "STU-20250001", "Asha", "Rao", Some(python), date(2025, 1, 6));
        admit(&ctx.db, "STU-20250002", "Ravi", "Kumar", Some(python), date(2025, 1, 6));
        admit(&ctx.db, "STU-20250003", "Meera", "Iyer", Some(web), date(2025, 1, 6));

        mark(&ctx.db, "STU-20250001", python, date(2025, 3, 3), AttendanceStatus::Present);
        mark(&ctx.db, "STU-20250002", python, date(2025, 3, 3), AttendanceStatus::Absent);
        mark(&ctx.db, "STU-20250003", web, date(2025, 3, 3), AttendanceStatus::Present);
        mark(&ctx.db, "STU-20250001", python, date(2025, 3, 4), AttendanceStatus::Present);
        mark(&ctx.db, "STU-20250003", web, date(2025, 3, 10), AttendanceStatus::Absent);

        let stats = ctx.db.stats();
        assert!((stats.course_attendance_rate(python).unwrap() - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.course_attendance_rate(web).unwrap(), 50.0);
        assert!((stats.date_attendance_rate(date(2025, 3, 3)).unwrap() - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.date_attendance_rate(date(2025, 3, 4)).unwrap(), 100.0);
        assert_eq!(stats.student_attendance_rate("STU-20250001").unwrap(), 100.0);

        // both ends inclusive
        assert_eq!(stats.range_attendance_rate(date(2025, 3, 3), date(2025, 3, 4)).unwrap(), 75.0);
        assert_eq!(stats.range_attendance_rate(date(2025, 3, 4), date(2025, 3, 10)).unwrap(), 50.0);
        assert_eq!(stats.range_attendance_rate(date(2025, 3, 5), date(2025, 3, 9)).unwrap(), 0.0);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_range_report_orders_by_date_then_student(ctx: &mut StatsTestContext) {
        let python = add_course(&ctx.db, "Python", "PY101");
        admit(&ctx.db, "STU-20250001", "Asha", "Rao", Some(python), date(2025, 1, 6));
        admit(&ctx.db, "STU-20250002", "Ravi", "Kumar", Some(python), date(2025, 1, 6));

        mark(&ctx.db, "STU-20250002", python, date(2025, 3, 4), AttendanceStatus::Absent);
        mark(&ctx.db, "STU-20250001", python, date(2025, 3, 4), AttendanceStatus::Present);
        mark(&ctx.db, "STU-20250002", python, date(2025, 3, 3), AttendanceStatus::Present);
        mark(&ctx.db, "STU-20250001", python, date(2025, 3, 9), AttendanceStatus::Present);

        let rows = ctx.db.stats().attendance_in_range(date(2025, 3, 3), date(2025, 3, 4)).unwrap();
        let keys: Vec<_> = rows.iter().map(|r| (r.date, r.student_id.as_str())).collect();
        assert_eq!(
            keys,
            [
                (date(2025, 3, 3), "STU-20250002"),
                (date(2025, 3, 4), "STU-20250001"),
                (date(2025, 3, 4), "STU-20250002"),
            ]
        );
        assert_eq!(rows[0].student_name, "Ravi Kumar");
        assert_eq!(rows[0].course_name, "Python");
        assert_eq!(rows[2].status, AttendanceStatus::Absent);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_dashboard_rollup(ctx: &mut StatsTestContext) {
        let python = add_course(&ctx.db, "Python", "PY101");
        add_course(&ctx.db, "Art", "AR101");

        admit(&ctx.db, "STU-20240001", "Old", "Timer", Some(python), date(2024, 1, 10));
        admit(&ctx.db, "STU-20240002", "Edge", "Case", Some(python), date(2024, 6, 15));
        admit(&ctx.db, "STU-20250001", "Asha", "Rao", Some(python), date(2025, 3, 1));
        admit(&ctx.db, "STU-20250002", "Ravi", "Kumar", None, date(2025, 3, 20));
        admit(&ctx.db, "STU-20250003", "Meera", "Iyer", None, date(2025, 6, 1));

        let mut inactive = ctx.db.students().get_student_by_id("STU-20240001").unwrap().unwrap();
        inactive.status = StudentStatus::Inactive;
        assert!(ctx.db.students().update_student("STU-20240001", &inactive).success);

        mark(&ctx.db, "STU-20250001", python, date(2025, 3, 3), AttendanceStatus::Present);
        mark(&ctx.db, "STU-20240002", python, date(2025, 3, 3), AttendanceStatus::Present);
        mark(&ctx.db, "STU-20240001", python, date(2025, 3, 3), AttendanceStatus::Absent);

        let stats = ctx.db.stats().dashboard_stats_as_of(date(2025, 6, 15)).unwrap();
        assert_eq!(stats.total_students, 5);
        assert_eq!(stats.total_courses, 2);
        assert_eq!(stats.active_students, 4);
        assert_eq!(stats.attendance_rate, 66.67);
        assert_eq!(
            stats.students_by_course,
            vec![
                CourseCount {
                    course_name: "Art".into(),
                    count: 0,
                },
                CourseCount {
                    course_name: "Python".into(),
                    count: 3,
                },
            ]
        );
        assert_eq!(
            stats.monthly_admissions,
            vec![
                MonthCount {
                    month: "2024-06".into(),
                    count: 1,
                },
                MonthCount {
                    month: "2025-03".into(),
                    count: 2,
                },
                MonthCount {
                    month: "2025-06".into(),
                    count: 1,
                },
            ]
        );
    }
}
