//! 学生费用实体

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub fee_structure_id: Option<i64>,
    pub title: String,
    pub amount: f64,
    pub discount_amount: f64,
    pub fine_amount: f64,
    pub paid_amount: f64,
    pub balance_amount: f64,
    pub payment_status: String,
    pub due_date: String,
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
        belongs_to = "super::fee_structures::Entity",
        from = "Column::FeeStructureId",
        to = "super::fee_structures::Column::Id"
    )]
    FeeStructure,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::fee_structures::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeeStructure.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务模型，并按 `today` 刷新缴费状态（未结清的费用可能已逾期）
    pub fn into_fee(self, today: NaiveDate) -> crate::models::fees::entities::Fee {
        use crate::models::fees::derive::{FeeFigures, derive_fee};
        use crate::models::fees::entities::{Fee, PaymentStatus};
        use crate::utils::dates::from_timestamp;

        let due_date = super::stored_date(&self.due_date);
        let figures = FeeFigures {
            amount: self.amount,
            discount: self.discount_amount,
            fine: self.fine_amount,
            paid: self.paid_amount,
        };
        let (balance_amount, payment_status) = derive_fee(figures, due_date, today)
            .unwrap_or_else(|_| {
                (
                    self.balance_amount,
                    self.payment_status
                        .parse::<PaymentStatus>()
                        .unwrap_or(PaymentStatus::Pending),
                )
            });

        Fee {
            id: self.id,
            student_id: self.student_id,
            fee_structure_id: self.fee_structure_id,
            title: self.title,
            amount: self.amount,
            discount_amount: self.discount_amount,
            fine_amount: self.fine_amount,
            paid_amount: self.paid_amount,
            balance_amount,
            payment_status,
            due_date,
            remarks: self.remarks,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
