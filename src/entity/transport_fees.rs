//! 交通费实体

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transport_fees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub vehicle_id: i64,
    pub period: String,
    pub amount: f64,
    pub paid_amount: f64,
    pub balance_amount: f64,
    pub payment_status: String,
    pub due_date: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vehicles::Entity",
        from = "Column::VehicleId",
        to = "super::vehicles::Column::Id"
    )]
    Vehicle,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::vehicles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_transport_fee(self, today: NaiveDate) -> crate::models::transport::TransportFee {
        use crate::models::fees::derive::{FeeFigures, derive_fee};
        use crate::models::fees::entities::PaymentStatus;
        use crate::models::transport::TransportFee;
        use crate::utils::dates::from_timestamp;

        let due_date = super::stored_date(&self.due_date);
        let (balance_amount, payment_status) =
            derive_fee(FeeFigures::new(self.amount, self.paid_amount), due_date, today)
                .unwrap_or_else(|_| {
                    (
                        self.balance_amount,
                        self.payment_status
                            .parse::<PaymentStatus>()
                            .unwrap_or(PaymentStatus::Pending),
                    )
                });

        TransportFee {
            id: self.id,
            student_id: self.student_id,
            vehicle_id: self.vehicle_id,
            period: self.period,
            amount: self.amount,
            paid_amount: self.paid_amount,
            balance_amount,
            payment_status,
            due_date,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
