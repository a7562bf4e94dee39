#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === STUDENT MESSAGES ===
    StudentAdded,
    StudentUpdated,
    StudentDeleted,
    StudentDuplicate(String),     // constraint detail
    StudentAddFailed(String),     // error
    StudentUpdateFailed(String),  // error
    StudentDeleteFailed(String),  // error
    StudentNotFound(String),      // student id
    StudentIdGenerated(String),   // student id
    StudentIdSequenceExhausted(i32), // year
    StudentPhotoStored(String),   // path
    StudentPhotoCleanupFailed(String, String), // path, error
    MissingStudentField(String),  // flag name
    StudentListHeader,
    StudentSearchResults(String), // query
    NoStudentsFound,
    ConfirmDeleteStudent(String), // student id

    // === COURSE MESSAGES ===
    CourseAdded,
    CourseUpdated,
    CourseDeleted,
    CourseAlreadyExists,
    CourseError(String), // error
    CourseNotFound(String),
    CourseListHeader,
    NoCoursesFound,
    ConfirmDeleteCourse(String), // course name

    // === ATTENDANCE MESSAGES ===
    AttendanceMarked,
    AttendanceError(String), // error
    AttendanceHeader(String), // date
    AttendanceRangeHeader(String, String), // start, end
    NoAttendanceFound,
    NoStudentsInCourse(String), // course name
    RollCallSummary(usize, usize), // succeeded, total
    StudentAttendanceRate(String, f64), // student id, rate
    CourseAttendanceRate(String, f64),  // course name, rate
    DateAttendanceRate(String, f64),    // date, rate
    RangeAttendanceRate(String, String, f64), // start, end, rate

    // === USER MESSAGES ===
    UserRegistered,
    UserAlreadyExists,
    UserError(String), // error
    PasswordUpdated,
    PasswordUpdateFailed(String), // error
    EmailNotRegistered,
    LoginSucceeded(String), // display name
    LoginFailed,
    AllFieldsRequired,
    PasswordsDoNotMatch,
    PasswordTooShort(usize), // minimum length
    PromptPassword,
    PromptConfirmPassword,

    // === DASHBOARD MESSAGES ===
    DashboardHeader,
    StudentsByCourseHeader,
    MonthlyAdmissionsHeader,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigLoaded,
    ConfigParseError,

    // === EXPORT MESSAGES ===
    ExportingData(String, String), // data type, format
    ExportCompleted(String),       // path
    NoDataToExport(String),        // data type

    // === DATABASE MESSAGES ===
    DbConnectionFailed(String), // error
    DbProvisioned(String),      // path
    DbRowSkipped(String, String), // entity, error
    InvalidDate(String),
    InvalidDateRange(String, String),

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseUpToDate,

    // === GENERAL MESSAGES ===
    OperationCancelled,
    NoRecordMatched,
}
