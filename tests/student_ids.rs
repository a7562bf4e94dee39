#[cfg(test)]
mod tests {
    use chrono::{Datelike, Local, NaiveDate};
    use institute::db::db::Db;
    use institute::libs::assets::Assets;
    use institute::libs::error::StoreError;
    use institute::libs::student::{Gender, Student};
    use std::collections::HashSet;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct StudentIdTestContext {
        db: Db,
        _temp_dir: TempDir,
    }

    impl TestContext for StudentIdTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::provision(&temp_dir.path().join("institute.db"), &Assets::new(temp_dir.path().join("assets"))).unwrap();
            StudentIdTestContext { db, _temp_dir: temp_dir }
        }
    }

    fn admit(db: &Db, id: &str) {
        let student = Student::new(id, "Ravi", "Kumar", Gender::Male, NaiveDate::from_ymd_opt(2003, 1, 9).unwrap());
        let outcome = db.students().add_student(&student);
        assert!(outcome.success, "{}", outcome.message);
    }

    #[test_context(StudentIdTestContext)]
    #[test]
    fn test_first_id_uses_current_year(ctx: &mut StudentIdTestContext) {
        let expected = format!("STU-{}0001", Local::now().year());
        assert_eq!(ctx.db.students().next_student_id().unwrap(), expected);
    }

    #[test_context(StudentIdTestContext)]
    #[test]
    fn test_generated_ids_increase_and_never_collide(ctx: &mut StudentIdTestContext) {
        let mut seen = HashSet::new();
        let mut previous = String::new();
        for _ in 0..25 {
            let id = ctx.db.students().next_student_id_for_year(2025).unwrap();
            assert!(id > previous, "{} should sort after {}", id, previous);
            assert!(seen.insert(id.clone()), "duplicate id {}", id);
            admit(&ctx.db, &id);
            previous = id;
        }
        assert_eq!(previous, "STU-20250025");
    }

    #[test_context(StudentIdTestContext)]
    #[test]
    fn test_sequence_continues_from_greatest_id_not_count(ctx: &mut StudentIdTestContext) {
        admit(&ctx.db, "STU-20250001");
        admit(&ctx.db, "STU-20250040");
        assert_eq!(ctx.db.students().next_student_id_for_year(2025).unwrap(), "STU-20250041");
    }

    #[test_context(StudentIdTestContext)]
    #[test]
    fn test_other_years_and_shapes_are_ignored(ctx: &mut StudentIdTestContext) {
        admit(&ctx.db, "STU-20240500");
        admit(&ctx.db, "STU-2025ABCD");
        admit(&ctx.db, "STU-202500077");
        admit(&ctx.db, "LEGACY-17");
        admit(&ctx.db, "STU-20250003");

        assert_eq!(ctx.db.students().next_student_id_for_year(2025).unwrap(), "STU-20250004");
        assert_eq!(ctx.db.students().next_student_id_for_year(2024).unwrap(), "STU-20240501");
        assert_eq!(ctx.db.students().next_student_id_for_year(2026).unwrap(), "STU-20260001");
    }

    #[test_context(StudentIdTestContext)]
    #[test]
    fn test_exhausted_year_is_an_error(ctx: &mut StudentIdTestContext) {
        admit(&ctx.db, "STU-20259999");
        let result = ctx.db.students().next_student_id_for_year(2025);
        assert!(matches!(result, Err(StoreError::SequenceExhausted(2025))), "{:?}", result);
    }
}
