//! 考试成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub exam_id: i64,
    pub subject_id: i64,
    /// JSON: `[{"name": "...", "obtained": 0.0}]`
    #[sea_orm(column_type = "Text")]
    pub marks: String,
    pub is_absent: bool,
    pub total_obtained: f64,
    pub total_max: f64,
    pub percentage: f64,
    pub grade: String,
    pub grade_point: f64,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::exams::Entity",
        from = "Column::ExamId",
        to = "super::exams::Column::Id"
    )]
    Exam,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_result(self) -> crate::models::exams::entities::ExamResult {
        use crate::models::exams::entities::{ExamResult, ResultStatus};
        use crate::utils::dates::from_timestamp;

        ExamResult {
            id: self.id,
            student_id: self.student_id,
            exam_id: self.exam_id,
            subject_id: self.subject_id,
            marks: serde_json::from_str(&self.marks).unwrap_or_default(),
            is_absent: self.is_absent,
            total_obtained: self.total_obtained,
            total_max: self.total_max,
            percentage: self.percentage,
            grade: self.grade,
            grade_point: self.grade_point,
            status: self
                .status
                .parse::<ResultStatus>()
                .unwrap_or(ResultStatus::Fail),
            remarks: self.remarks,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
