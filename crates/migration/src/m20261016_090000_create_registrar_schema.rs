use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(string_len(Users::Id, 36).primary_key())
                    .col(string_len(Users::Username, 50).unique_key())
                    .col(string_len(Users::PasswordHash, 255))
                    .col(string_len(Users::Email, 255).unique_key())
                    .col(string_len(Users::FullName, 100))
                    // Role enum is represented in app code.
                    // 0=student, 1=teacher, 2=dean, 3=admin
                    .col(
                        small_integer(Users::Role)
                            .check(Expr::col(Users::Role).gte(0))
                            .check(Expr::col(Users::Role).lte(3)),
                    )
                    .col(date(Users::DateOfBirth))
                    .col(string_len_null(Users::Gender, 10))
                    .col(string_len(Users::Phone, 20))
                    .col(string_len(Users::Region, 100))
                    .col(string_len_null(Users::Zone, 100))
                    .col(timestamp(Users::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Users::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(string_len(Students::UserId, 36).primary_key())
                    .col(string_len(Students::StudentId, 20).unique_key())
                    .col(string_len(Students::RegistrationNumber, 50))
                    .col(string_len(Students::Department, 100))
                    .col(string_len(Students::AcademicYear, 9))
                    .col(timestamp(Students::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-students-user_id")
                            .from(Students::Table, Students::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(string_len(Teachers::UserId, 36).primary_key())
                    .col(string_len(Teachers::TeacherId, 20).unique_key())
                    .col(string_len(Teachers::EmployeeId, 50).unique_key())
                    .col(string_len(Teachers::Department, 100))
                    .col(string_len(Teachers::Qualification, 100))
                    .col(timestamp(Teachers::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-teachers-user_id")
                            .from(Teachers::Table, Teachers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Deans::Table)
                    .if_not_exists()
                    .col(string_len(Deans::UserId, 36).primary_key())
                    .col(string_len(Deans::DeanId, 20).unique_key())
                    .col(string_len(Deans::Department, 100))
                    .col(date(Deans::AppointmentDate))
                    .col(string_len(Deans::OfficeLocation, 100))
                    // 0=department dean, 1=college dean
                    .col(
                        small_integer(Deans::DeanType)
                            .check(Expr::col(Deans::DeanType).gte(0))
                            .check(Expr::col(Deans::DeanType).lte(1)),
                    )
                    .col(timestamp(Deans::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-deans-user_id")
                            .from(Deans::Table, Deans::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(string_len(Courses::Id, 36).primary_key())
                    .col(string_len(Courses::CourseCode, 20).unique_key())
                    .col(string_len(Courses::CourseName, 100))
                    .col(small_integer(Courses::Ects).default(0))
                    .col(
                        small_integer(Courses::CreditHours)
                            .check(Expr::col(Courses::CreditHours).gte(0))
                            .check(Expr::col(Courses::CreditHours).lte(30)),
                    )
                    .col(small_integer(Courses::LectureHours).default(0))
                    .col(small_integer(Courses::LabHours).default(0))
                    .col(small_integer(Courses::TutorialHours).default(0))
                    .col(string_len(Courses::Department, 100))
                    .col(
                        small_integer(Courses::YearOfStudy)
                            .check(Expr::col(Courses::YearOfStudy).gte(1))
                            .check(Expr::col(Courses::YearOfStudy).lte(5)),
                    )
                    .col(
                        small_integer(Courses::Semester)
                            .check(Expr::col(Courses::Semester).gte(1))
                            .check(Expr::col(Courses::Semester).lte(2)),
                    )
                    // Soft reference; prerequisites are listed, never enforced.
                    .col(string_len_null(Courses::Prerequisite, 20))
                    .col(timestamp(Courses::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Courses::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TeacherCourses::Table)
                    .if_not_exists()
                    .col(string_len(TeacherCourses::Id, 36).primary_key())
                    .col(string_len(TeacherCourses::TeacherId, 20))
                    .col(string_len(TeacherCourses::CourseCode, 20))
                    .col(small_integer(TeacherCourses::Semester))
                    .col(string_len(TeacherCourses::AcademicYear, 9))
                    .col(timestamp(TeacherCourses::AssignedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-teacher_courses-teacher_id")
                            .from(TeacherCourses::Table, TeacherCourses::TeacherId)
                            .to(Teachers::Table, Teachers::TeacherId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-teacher_courses-course_code")
                            .from(TeacherCourses::Table, TeacherCourses::CourseCode)
                            .to(Courses::Table, Courses::CourseCode)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_teacher_courses_assignment")
                    .table(TeacherCourses::Table)
                    .col(TeacherCourses::TeacherId)
                    .col(TeacherCourses::CourseCode)
                    .col(TeacherCourses::Semester)
                    .col(TeacherCourses::AcademicYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentCourseRegistrations::Table)
                    .if_not_exists()
                    .col(string_len(StudentCourseRegistrations::Id, 36).primary_key())
                    .col(string_len(StudentCourseRegistrations::StudentId, 20))
                    .col(string_len(StudentCourseRegistrations::CourseId, 36))
                    .col(
                        small_integer(StudentCourseRegistrations::Semester)
                            .check(Expr::col(StudentCourseRegistrations::Semester).gte(1))
                            .check(Expr::col(StudentCourseRegistrations::Semester).lte(2)),
                    )
                    .col(string_len(StudentCourseRegistrations::AcademicYear, 9))
                    .col(
                        timestamp(StudentCourseRegistrations::RegisteredAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(string_len_null(StudentCourseRegistrations::Grade, 3))
                    .col(double_null(StudentCourseRegistrations::Marks))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-registrations-student_id")
                            .from(
                                StudentCourseRegistrations::Table,
                                StudentCourseRegistrations::StudentId,
                            )
                            .to(Students::Table, Students::StudentId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-registrations-course_id")
                            .from(
                                StudentCourseRegistrations::Table,
                                StudentCourseRegistrations::CourseId,
                            )
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Duplicate registrations are absorbed by this index.
        manager
            .create_index(
                Index::create()
                    .name("uq_registrations_student_course_term")
                    .table(StudentCourseRegistrations::Table)
                    .col(StudentCourseRegistrations::StudentId)
                    .col(StudentCourseRegistrations::CourseId)
                    .col(StudentCourseRegistrations::Semester)
                    .col(StudentCourseRegistrations::AcademicYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_registrations_course_id")
                    .table(StudentCourseRegistrations::Table)
                    .col(StudentCourseRegistrations::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentGrades::Table)
                    .if_not_exists()
                    .col(string_len(StudentGrades::Id, 36).primary_key())
                    .col(string_len(StudentGrades::StudentId, 20))
                    .col(string_len(StudentGrades::CourseCode, 20))
                    .col(string_len(StudentGrades::TeacherId, 20))
                    .col(small_integer(StudentGrades::Semester))
                    .col(string_len(StudentGrades::AcademicYear, 9))
                    .col(double_null(StudentGrades::FinalExam))
                    .col(double_null(StudentGrades::MidExam))
                    .col(double_null(StudentGrades::Lab))
                    .col(double_null(StudentGrades::Quiz))
                    .col(double(StudentGrades::TotalMarks))
                    .col(string_len(StudentGrades::LetterGrade, 3))
                    .col(double(StudentGrades::GradePoint))
                    .col(text_null(StudentGrades::Comments))
                    .col(timestamp(StudentGrades::SubmittedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-student_grades-student_id")
                            .from(StudentGrades::Table, StudentGrades::StudentId)
                            .to(Students::Table, Students::StudentId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-student_grades-course_code")
                            .from(StudentGrades::Table, StudentGrades::CourseCode)
                            .to(Courses::Table, Courses::CourseCode)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-student_grades-teacher_id")
                            .from(StudentGrades::Table, StudentGrades::TeacherId)
                            .to(Teachers::Table, Teachers::TeacherId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_student_grades_entry")
                    .table(StudentGrades::Table)
                    .col(StudentGrades::StudentId)
                    .col(StudentGrades::CourseCode)
                    .col(StudentGrades::TeacherId)
                    .col(StudentGrades::Semester)
                    .col(StudentGrades::AcademicYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(string_len(Reports::Id, 36).primary_key())
                    .col(string_len(Reports::TeacherId, 20))
                    .col(string_len(Reports::ReportType, 50))
                    .col(string_len(Reports::Title, 200))
                    .col(text(Reports::Description))
                    // 0=pending, 1=reviewed
                    .col(
                        small_integer(Reports::Status)
                            .default(0)
                            .check(Expr::col(Reports::Status).gte(0))
                            .check(Expr::col(Reports::Status).lte(1)),
                    )
                    .col(timestamp(Reports::SubmittedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reports-teacher_id")
                            .from(Reports::Table, Reports::TeacherId)
                            .to(Teachers::Table, Teachers::TeacherId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reports_teacher_id")
                    .table(Reports::Table)
                    .col(Reports::TeacherId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(StudentGrades::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(StudentCourseRegistrations::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TeacherCourses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Deans::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    Email,
    FullName,
    Role,
    DateOfBirth,
    Gender,
    Phone,
    Region,
    Zone,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    UserId,
    StudentId,
    RegistrationNumber,
    Department,
    AcademicYear,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Teachers {
    Table,
    UserId,
    TeacherId,
    EmployeeId,
    Department,
    Qualification,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Deans {
    Table,
    UserId,
    DeanId,
    Department,
    AppointmentDate,
    OfficeLocation,
    DeanType,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    CourseCode,
    CourseName,
    Ects,
    CreditHours,
    LectureHours,
    LabHours,
    TutorialHours,
    Department,
    YearOfStudy,
    Semester,
    Prerequisite,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TeacherCourses {
    Table,
    Id,
    TeacherId,
    CourseCode,
    Semester,
    AcademicYear,
    AssignedAt,
}

#[derive(DeriveIden)]
enum StudentCourseRegistrations {
    Table,
    Id,
    StudentId,
    CourseId,
    Semester,
    AcademicYear,
    RegisteredAt,
    Grade,
    Marks,
}

#[derive(DeriveIden)]
enum StudentGrades {
    Table,
    Id,
    StudentId,
    CourseCode,
    TeacherId,
    Semester,
    AcademicYear,
    FinalExam,
    MidExam,
    Lab,
    Quiz,
    TotalMarks,
    LetterGrade,
    GradePoint,
    Comments,
    SubmittedAt,
}

#[derive(DeriveIden)]
enum Reports {
    Table,
    Id,
    TeacherId,
    ReportType,
    Title,
    Description,
    Status,
    SubmittedAt,
}
