//! 考试实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub exam_type: String,
    pub academic_year: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::exam_schedules::Entity")]
    Schedules,
}

impl Related<super::exam_schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exam(self) -> crate::models::exams::entities::Exam {
        use crate::models::exams::entities::{Exam, ExamStatus, ExamType};
        use crate::utils::dates::from_timestamp;

        Exam {
            id: self.id,
            name: self.name,
            exam_type: self
                .exam_type
                .parse::<ExamType>()
                .unwrap_or(ExamType::UnitTest),
            academic_year: self.academic_year,
            start_date: super::stored_date(&self.start_date),
            end_date: super::stored_date(&self.end_date),
            status: self
                .status
                .parse::<ExamStatus>()
                .unwrap_or(ExamStatus::Scheduled),
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
