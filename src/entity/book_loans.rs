//! 借阅记录实体

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "book_loans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub book_id: i64,
    pub student_id: i64,
    pub issue_date: String,
    pub due_date: String,
    pub return_date: Option<String>,
    pub fine_amount: f64,
    /// issued | returned，逾期在读取时计算
    pub status: String,
    pub issued_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::books::Entity",
        from = "Column::BookId",
        to = "super::books::Column::Id"
    )]
    Book,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::books::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_loan(self, today: NaiveDate) -> crate::models::library::BookLoan {
        use crate::models::library::{BookLoan, loan_status};
        use crate::utils::dates::from_timestamp;

        let due_date = super::stored_date(&self.due_date);
        let return_date = self.return_date.as_deref().map(super::stored_date);

        BookLoan {
            id: self.id,
            book_id: self.book_id,
            student_id: self.student_id,
            issue_date: super::stored_date(&self.issue_date),
            due_date,
            return_date,
            fine_amount: self.fine_amount,
            status: loan_status(return_date.is_some(), due_date, today),
            issued_by: self.issued_by,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
