//! 校车与交通费

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::PaginationQuery;
use crate::models::fees::entities::PaymentStatus;
use crate::utils::validate::{require_text, validate_phone};

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/transport.ts")]
    pub enum VehicleType {
        Bus => "bus",
        Van => "van",
        Car => "car",
    }
}

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/transport.ts")]
    pub enum VehicleStatus {
        Active => "active",
        Maintenance => "maintenance",
        Retired => "retired",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/transport.ts")]
pub struct Vehicle {
    pub id: i64,
    pub registration_number: String,
    pub vehicle_type: VehicleType,
    pub capacity: i32,
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
    pub route_name: Option<String>,
    pub status: VehicleStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 交通费：与学费使用同一套余额/状态推导，无折扣和罚金
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/transport.ts")]
pub struct TransportFee {
    pub id: i64,
    pub student_id: i64,
    pub vehicle_id: i64,
    pub period: String,
    pub amount: f64,
    pub paid_amount: f64,
    pub balance_amount: f64,
    pub payment_status: PaymentStatus,
    pub due_date: NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/transport.ts")]
pub struct CreateVehicleRequest {
    pub registration_number: String,
    pub vehicle_type: VehicleType,
    pub capacity: i32,
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
    pub route_name: Option<String>,
}

impl CreateVehicleRequest {
    pub fn validate(&self) -> Result<(), String> {
        require_text(&self.registration_number, "registration_number", 20)?;
        validate_capacity(self.capacity)?;
        if let Some(phone) = self.driver_phone.as_deref() {
            validate_phone(phone).map_err(str::to_string)?;
        }
        Ok(())
    }
}

pub fn validate_capacity(capacity: i32) -> Result<(), String> {
    if capacity <= 0 {
        return Err("capacity must be greater than 0".to_string());
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/transport.ts")]
pub struct UpdateVehicleRequest {
    pub registration_number: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub capacity: Option<i32>,
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
    pub route_name: Option<String>,
    pub status: Option<VehicleStatus>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/transport.ts")]
pub struct CreateTransportFeeRequest {
    pub student_id: i64,
    pub vehicle_id: i64,
    pub period: String,
    pub amount: f64,
    #[serde(default)]
    pub paid_amount: f64,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/transport.ts")]
pub struct UpdateTransportFeeRequest {
    pub vehicle_id: Option<i64>,
    pub period: Option<String>,
    pub amount: Option<f64>,
    pub paid_amount: Option<f64>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/transport.ts")]
pub struct VehicleListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<VehicleStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/transport.ts")]
pub struct TransportFeeListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub student_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub status: Option<PaymentStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct TransportFeeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub status: Option<PaymentStatus>,
    pub student_ids: Option<Vec<i64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_request_validation() {
        let mut req = CreateVehicleRequest {
            registration_number: "KA-01-AB-1234".to_string(),
            vehicle_type: VehicleType::Bus,
            capacity: 40,
            driver_name: Some("Ravi".to_string()),
            driver_phone: Some("+91 98450 12345".to_string()),
            route_name: Some("North Loop".to_string()),
        };
        assert!(req.validate().is_ok());
        req.capacity = 0;
        assert!(req.validate().is_err());
        req.capacity = 10;
        req.driver_phone = Some("123".to_string());
        assert!(req.validate().is_err());
    }
}
