//! 成绩构成实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "mark_distributions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub exam_id: i64,
    pub subject_id: i64,
    pub pass_percentage: f64,
    /// JSON: `[{"name": "...", "max_marks": 0.0, "weightage": 0.0}]`
    #[sea_orm(column_type = "Text")]
    pub components: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exams::Entity",
        from = "Column::ExamId",
        to = "super::exams::Column::Id"
    )]
    Exam,
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_distribution(self) -> crate::models::exams::entities::MarkDistribution {
        use crate::utils::dates::from_timestamp;

        crate::models::exams::entities::MarkDistribution {
            id: self.id,
            exam_id: self.exam_id,
            subject_id: self.subject_id,
            pass_percentage: self.pass_percentage,
            components: serde_json::from_str(&self.components).unwrap_or_default(),
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
