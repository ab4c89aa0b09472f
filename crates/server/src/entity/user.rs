use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    #[sea_orm(unique)]
    pub email: String,
    pub full_name: String,
    pub role: i16,
    pub date_of_birth: Date,
    pub gender: Option<String>,
    pub phone: String,
    pub region: String,
    pub zone: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::student::Entity")]
    Student,
    #[sea_orm(has_one = "super::teacher::Entity")]
    Teacher,
    #[sea_orm(has_one = "super::dean::Entity")]
    Dean,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::dean::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dean.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
