use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_grades")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub student_id: String,
    pub course_code: String,
    pub teacher_id: String,
    pub semester: i16,
    pub academic_year: String,
    pub final_exam: Option<f64>,
    pub mid_exam: Option<f64>,
    pub lab: Option<f64>,
    pub quiz: Option<f64>,
    pub total_marks: f64,
    pub letter_grade: String,
    pub grade_point: f64,
    pub comments: Option<String>,
    pub submitted_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::StudentId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
