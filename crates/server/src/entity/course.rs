use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub course_code: String,
    pub course_name: String,
    pub ects: i16,
    pub credit_hours: i16,
    pub lecture_hours: i16,
    pub lab_hours: i16,
    pub tutorial_hours: i16,
    pub department: String,
    pub year_of_study: i16,
    pub semester: i16,
    pub prerequisite: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::student_course::Entity")]
    Registrations,
}

impl Related<super::student_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Registrations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
