pub mod assignment_repository;
pub mod course_repository;
pub mod grade_repository;
pub mod registration_repository;
pub mod report_repository;
pub mod user_repository;

pub use assignment_repository::{
    AssignmentRecord, AssignmentRepository, SeaOrmAssignmentRepository,
};
pub use course_repository::{CourseRecord, CourseRepository, SeaOrmCourseRepository};
pub use grade_repository::{GradeRecord, GradeRepository, NewGrade, SeaOrmGradeRepository};
pub use registration_repository::{
    RegisteredCourse, RegistrationRepository, RosterRecord, SeaOrmRegistrationRepository,
};
pub use report_repository::{NewReport, ReportRecord, ReportRepository, SeaOrmReportRepository};
pub use user_repository::{
    DeanRecord, NewProfile, NewUser, Population, SeaOrmUserRepository, StudentRecord,
    TeacherRecord, UserRecord, UserRepository,
};
