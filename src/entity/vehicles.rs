//! 车辆实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub registration_number: String,
    pub vehicle_type: String,
    pub capacity: i32,
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
    pub route_name: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transport_fees::Entity")]
    TransportFees,
}

impl Related<super::transport_fees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransportFees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_vehicle(self) -> crate::models::transport::Vehicle {
        use crate::models::transport::{Vehicle, VehicleStatus, VehicleType};
        use crate::utils::dates::from_timestamp;

        Vehicle {
            id: self.id,
            registration_number: self.registration_number,
            vehicle_type: self
                .vehicle_type
                .parse::<VehicleType>()
                .unwrap_or(VehicleType::Bus),
            capacity: self.capacity,
            driver_name: self.driver_name,
            driver_phone: self.driver_phone,
            route_name: self.route_name,
            status: self
                .status
                .parse::<VehicleStatus>()
                .unwrap_or(VehicleStatus::Active),
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
