pub mod course;
pub mod dean;
pub mod report;
pub mod student;
pub mod student_course;
pub mod student_grade;
pub mod teacher;
pub mod teacher_course;
pub mod user;
