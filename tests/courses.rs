#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use institute::db::db::Db;
    use institute::libs::assets::Assets;
    use institute::libs::attendance::{AttendanceMark, AttendanceStatus};
    use institute::libs::course::Course;
    use institute::libs::student::{Gender, Student};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct CourseTestContext {
        db: Db,
        _temp_dir: TempDir,
    }

    impl TestContext for CourseTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::provision(&temp_dir.path().join("institute.db"), &Assets::new(temp_dir.path().join("assets"))).unwrap();
            CourseTestContext { db, _temp_dir: temp_dir }
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn enrolled(id: &str, course_id: i64) -> Student {
        let mut student = Student::new(id, "Asha", "Rao", Gender::Female, date(2004, 5, 17));
        student.course_id = Some(course_id);
        student
    }

    #[test_context(CourseTestContext)]
    #[test]
    fn test_course_crud(ctx: &mut CourseTestContext) {
        let courses = ctx.db.courses();

        let outcome = courses.add_course(&Course::new("Data Science", "DS101", None, Some(6), Some(500.0)));
        assert!(outcome.success);
        assert_eq!(outcome.message, "Course added successfully!");

        let course = courses.get_course_by_code("DS101").unwrap().unwrap();
        assert_eq!(course.course_name, "Data Science");
        assert_eq!(course.duration_months, Some(6));
        assert_eq!(course.fees, Some(500.0));
        assert_eq!(course.description, None);
        let course_id = course.course_id.unwrap();

        let mut changed = course.clone();
        changed.description = Some("Statistics and ML".into());
        changed.fees = Some(650.0);
        let outcome = courses.update_course(course_id, &changed);
        assert!(outcome.success);
        assert_eq!(outcome.affected, 1);

        let reread = courses.get_course_by_id(course_id).unwrap().unwrap();
        assert_eq!(reread.description.as_deref(), Some("Statistics and ML"));
        assert_eq!(reread.fees, Some(650.0));

        let outcome = courses.delete_course(course_id);
        assert!(outcome.success);
        assert!(courses.get_course_by_id(course_id).unwrap().is_none());
    }

    #[test_context(CourseTestContext)]
    #[test]
    fn test_duplicate_name_or_code_is_rejected(ctx: &mut CourseTestContext) {
        let courses = ctx.db.courses();
        assert!(courses.add_course(&Course::new("Python", "PY101", None, None, None)).success);

        let same_code = courses.add_course(&Course::new("Python Advanced", "PY101", None, None, None));
        assert!(!same_code.success);
        assert_eq!(same_code.message, "Course already exists!");

        let same_name = courses.add_course(&Course::new("Python", "PY102", None, None, None));
        assert!(!same_name.success);

        assert_eq!(courses.get_all_courses().unwrap().len(), 1);
    }

    #[test_context(CourseTestContext)]
    #[test]
    fn test_update_of_unknown_course_is_a_successful_noop(ctx: &mut CourseTestContext) {
        let outcome = ctx.db.courses().update_course(999, &Course::new("Ghost", "GH1", None, None, None));
        assert!(outcome.success);
        assert!(outcome.is_noop());

        let outcome = ctx.db.courses().delete_course(999);
        assert!(outcome.success);
        assert_eq!(outcome.affected, 0);
    }

    #[test_context(CourseTestContext)]
    #[test]
    fn test_listing_counts_students_and_orders_by_name(ctx: &mut CourseTestContext) {
        let courses = ctx.db.courses();
        courses.add_course(&Course::new("Web Design", "WD1", None, None, None));
        courses.add_course(&Course::new("Accounting", "AC1", None, None, None));
        let web = courses.get_course_by_code("WD1").unwrap().unwrap().course_id.unwrap();

        assert!(ctx.db.students().add_student(&enrolled("STU-20250001", web)).success);
        let mut second = enrolled("STU-20250002", web);
        second.email = Some("second@example.com".into());
        assert!(ctx.db.students().add_student(&second).success);

        let listing = courses.get_all_courses().unwrap();
        let names: Vec<_> = listing.iter().map(|c| c.course.course_name.as_str()).collect();
        assert_eq!(names, ["Accounting", "Web Design"]);
        assert_eq!(listing[0].student_count, 0);
        assert_eq!(listing[1].student_count, 2);
    }

    #[test_context(CourseTestContext)]
    #[test]
    fn test_delete_clears_students_and_cascades_attendance(ctx: &mut CourseTestContext) {
        ctx.db.courses().add_course(&Course::new("Data Science", "DS101", None, Some(6), Some(500.0)));
        let course_id = ctx.db.courses().get_course_by_code("DS101").unwrap().unwrap().course_id.unwrap();

        let ids = ["STU-20250001", "STU-20250002", "STU-20250003"];
        for (i, id) in ids.iter().enumerate() {
            let mut student = enrolled(id, course_id);
            student.email = Some(format!("s{}@example.com", i));
            assert!(ctx.db.students().add_student(&student).success);
            let mark = AttendanceMark::new(id, course_id, date(2025, 3, 3), AttendanceStatus::Present);
            assert!(ctx.db.attendance().mark_attendance(&mark).success);
        }

        let outcome = ctx.db.courses().delete_course(course_id);
        assert!(outcome.success);
        assert_eq!(outcome.affected, 1);

        for id in ids {
            let student = ctx.db.students().get_student_by_id(id).unwrap().unwrap();
            assert_eq!(student.course_id, None);
            assert_eq!(student.course_name, None);
        }
        let remaining: i64 = ctx
            .db
            .conn
            .query_row("SELECT COUNT(*) FROM attendance WHERE course_id = ?1", [course_id], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
