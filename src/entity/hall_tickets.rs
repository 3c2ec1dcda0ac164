//! 准考证实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "hall_tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    #[sea_orm(unique)]
    pub ticket_number: String,
    pub status: String,
    pub remarks: Option<String>,
    pub issued_by: Option<i64>,
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
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_hall_ticket(self) -> crate::models::hall_tickets::HallTicket {
        use crate::models::hall_tickets::{HallTicket, HallTicketStatus};
        use crate::utils::dates::from_timestamp;

        HallTicket {
            id: self.id,
            exam_id: self.exam_id,
            student_id: self.student_id,
            ticket_number: self.ticket_number,
            status: self
                .status
                .parse::<HallTicketStatus>()
                .unwrap_or(HallTicketStatus::Issued),
            remarks: self.remarks,
            issued_by: self.issued_by,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
