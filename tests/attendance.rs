#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use institute::db::db::Db;
    use institute::libs::assets::Assets;
    use institute::libs::attendance::{AttendanceMark, AttendanceStatus, RollCallMark};
    use institute::libs::course::Course;
    use institute::libs::student::{Gender, Student};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct AttendanceTestContext {
        db: Db,
        python: i64,
        web: i64,
        _temp_dir: TempDir,
    }

    impl TestContext for AttendanceTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::provision(&temp_dir.path().join("institute.db"), &Assets::new(temp_dir.path().join("assets"))).unwrap();
            db.courses().add_course(&Course::new("Python", "PY101", None, None, None));
            db.courses().add_course(&Course::new("Web Design", "WD101", None, None, None));
            let python = db.courses().get_course_by_code("PY101").unwrap().unwrap().course_id.unwrap();
            let web = db.courses().get_course_by_code("WD101").unwrap().unwrap().course_id.unwrap();

            for (id, first, course) in [("STU-20250001", "Asha", python), ("STU-20250002", "Ravi", python), ("STU-20250003", "Meera", web)] {
                let mut student = Student::new(id, first, "Test", Gender::Other, NaiveDate::from_ymd_opt(2004, 5, 17).unwrap());
                student.course_id = Some(course);
                assert!(db.students().add_student(&student).success);
            }

            AttendanceTestContext {
                db,
                python,
                web,
                _temp_dir: temp_dir,
            }
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test_context(AttendanceTestContext)]
    #[test]
    fn test_second_mark_overwrites_first(ctx: &mut AttendanceTestContext) {
        let present = AttendanceMark::new("STU-20250001", ctx.python, day(3), AttendanceStatus::Present);
        let outcome = ctx.db.attendance().mark_attendance(&present);
        assert!(outcome.success);
        assert_eq!(outcome.message, "Attendance marked successfully!");

        let absent = AttendanceMark::new("STU-20250001", ctx.python, day(3), AttendanceStatus::Absent).with_remarks("sick");
        assert!(ctx.db.attendance().mark_attendance(&absent).success);

        let records = ctx.db.attendance().get_attendance_by_date(day(3), None).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, AttendanceStatus::Absent);
        assert_eq!(records[0].remarks.as_deref(), Some("sick"));
        assert_eq!(records[0].first_name, "Asha");
        assert_eq!(records[0].course_name, "Python");
    }

    #[test_context(AttendanceTestContext)]
    #[test]
    fn test_unknown_student_is_rejected(ctx: &mut AttendanceTestContext) {
        let mark = AttendanceMark::new("STU-20259999", ctx.python, day(3), AttendanceStatus::Present);
        let outcome = ctx.db.attendance().mark_attendance(&mark);
        assert!(!outcome.success);
        assert!(outcome.message.starts_with("Error"), "{}", outcome.message);
    }

    #[test_context(AttendanceTestContext)]
    #[test]
    fn test_roll_call_marks_each_student(ctx: &mut AttendanceTestContext) {
        let marks = vec![
            RollCallMark::new("STU-20250001", AttendanceStatus::Present),
            RollCallMark::new("STU-20250002", AttendanceStatus::Absent),
            RollCallMark::new("STU-20259999", AttendanceStatus::Present),
        ];
        let results = ctx.db.attendance().mark_roll_call(ctx.python, day(4), marks);

        assert_eq!(results.len(), 3);
        assert!(results[0].1.success);
        assert!(results[1].1.success);
        assert_eq!(results[2].0, "STU-20259999");
        assert!(!results[2].1.success);

        let records = ctx.db.attendance().get_attendance_by_date(day(4), Some(ctx.python)).unwrap();
        let statuses: Vec<_> = records.iter().map(|r| (r.student_id.as_str(), r.status)).collect();
        assert_eq!(
            statuses,
            [("STU-20250001", AttendanceStatus::Present), ("STU-20250002", AttendanceStatus::Absent)]
        );
    }

    #[test_context(AttendanceTestContext)]
    #[test]
    fn test_listing_filters_by_date_and_course(ctx: &mut AttendanceTestContext) {
        for (id, course) in [("STU-20250001", ctx.python), ("STU-20250003", ctx.web)] {
            let mark = AttendanceMark::new(id, course, day(5), AttendanceStatus::Present);
            assert!(ctx.db.attendance().mark_attendance(&mark).success);
        }
        let other_day = AttendanceMark::new("STU-20250002", ctx.python, day(6), AttendanceStatus::Present);
        assert!(ctx.db.attendance().mark_attendance(&other_day).success);

        assert_eq!(ctx.db.attendance().get_attendance_by_date(day(5), None).unwrap().len(), 2);

        let web_only = ctx.db.attendance().get_attendance_by_date(day(5), Some(ctx.web)).unwrap();
        assert_eq!(web_only.len(), 1);
        assert_eq!(web_only[0].student_id, "STU-20250003");
        assert_eq!(web_only[0].course_name, "Web Design");

        assert!(ctx.db.attendance().get_attendance_by_date(day(7), None).unwrap().is_empty());
    }

    #[test_context(AttendanceTestContext)]
    #[test]
    fn test_deleting_student_removes_their_attendance(ctx: &mut AttendanceTestContext) {
        let mark = AttendanceMark::new("STU-20250002", ctx.python, day(3), AttendanceStatus::Present);
        assert!(ctx.db.attendance().mark_attendance(&mark).success);

        assert!(ctx.db.students().delete_student("STU-20250002").success);
        assert!(ctx.db.attendance().get_attendance_by_date(day(3), None).unwrap().is_empty());
    }
}
