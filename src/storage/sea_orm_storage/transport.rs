//! 校车与交通费存储操作

use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

use super::{SeaOrmStorage, db_err, fetch_page, now_ts};
use crate::entity::stored_date;
use crate::entity::transport_fees::{self, Entity as TransportFees};
use crate::entity::vehicles::{self, Entity as Vehicles};
use crate::errors::{ErpError, Result};
use crate::models::{
    PaginatedResponse,
    common::normalize_page,
    fees::{
        derive::{FeeFigures, derive_fee},
        entities::PaymentStatus,
    },
    transport::{
        CreateTransportFeeRequest, CreateVehicleRequest, TransportFee, TransportFeeListQuery,
        UpdateTransportFeeRequest, UpdateVehicleRequest, Vehicle, VehicleListParams,
        VehicleStatus, validate_capacity,
    },
};
use crate::utils::dates::format_date;
use crate::utils::validate::{normalize_phone, validate_phone};
use crate::utils::{escape_like_pattern, round2};

impl SeaOrmStorage {
    pub async fn create_vehicle_impl(&self, req: CreateVehicleRequest) -> Result<Vehicle> {
        req.validate().map_err(ErpError::validation)?;

        let now = now_ts();
        let model = vehicles::ActiveModel {
            registration_number: Set(req.registration_number.trim().to_uppercase()),
            vehicle_type: Set(req.vehicle_type.to_string()),
            capacity: Set(req.capacity),
            driver_name: Set(req.driver_name),
            driver_phone: Set(req.driver_phone.map(|p| normalize_phone(&p))),
            route_name: Set(req.route_name),
            status: Set(VehicleStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create vehicle"))?;

        Ok(result.into_vehicle())
    }

    pub async fn get_vehicle_by_id_impl(&self, id: i64) -> Result<Option<Vehicle>> {
        let result = Vehicles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query vehicle"))?;

        Ok(result.map(|m| m.into_vehicle()))
    }

    pub async fn list_vehicles_impl(
        &self,
        params: VehicleListParams,
    ) -> Result<PaginatedResponse<Vehicle>> {
        let mut select = Vehicles::find();

        if let Some(status) = params.status {
            select = select.filter(vehicles::Column::Status.eq(status.as_str()));
        }
        if let Some(ref search) = params.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(vehicles::Column::RegistrationNumber.contains(&escaped))
                    .add(vehicles::Column::RouteName.contains(&escaped))
                    .add(vehicles::Column::DriverName.contains(&escaped)),
            );
        }

        select = select.order_by_asc(vehicles::Column::RegistrationNumber);

        fetch_page(
            &self.db,
            select,
            params.pagination.bounds(),
            "Failed to list vehicles",
            |m| m.into_vehicle(),
        )
        .await
    }

    pub async fn update_vehicle_impl(
        &self,
        id: i64,
        update: UpdateVehicleRequest,
    ) -> Result<Option<Vehicle>> {
        if self.get_vehicle_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = vehicles::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(registration) = update.registration_number {
            model.registration_number = Set(registration.trim().to_uppercase());
        }
        if let Some(vehicle_type) = update.vehicle_type {
            model.vehicle_type = Set(vehicle_type.to_string());
        }
        if let Some(capacity) = update.capacity {
            validate_capacity(capacity).map_err(ErpError::validation)?;
            model.capacity = Set(capacity);
        }
        if let Some(driver_name) = update.driver_name {
            model.driver_name = Set(Some(driver_name));
        }
        if let Some(phone) = update.driver_phone {
            validate_phone(&phone).map_err(ErpError::validation)?;
            model.driver_phone = Set(Some(normalize_phone(&phone)));
        }
        if let Some(route) = update.route_name {
            model.route_name = Set(Some(route));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update vehicle"))?;

        self.get_vehicle_by_id_impl(id).await
    }

    pub async fn delete_vehicle_impl(&self, id: i64) -> Result<bool> {
        let result = Vehicles::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete vehicle"))?;

        Ok(result.rows_affected > 0)
    }

    /// 退役车辆不能再分配学生
    async fn require_assignable_vehicle(&self, vehicle_id: i64) -> Result<()> {
        let vehicle = self
            .get_vehicle_by_id_impl(vehicle_id)
            .await?
            .ok_or_else(|| ErpError::validation(format!("Vehicle {vehicle_id} does not exist")))?;
        if vehicle.status == VehicleStatus::Retired {
            return Err(ErpError::validation(format!(
                "Vehicle {} is retired",
                vehicle.registration_number
            )));
        }
        Ok(())
    }

    pub async fn create_transport_fee_impl(
        &self,
        req: CreateTransportFeeRequest,
        today: NaiveDate,
    ) -> Result<TransportFee> {
        self.require_assignable_vehicle(req.vehicle_id).await?;
        if req.period.trim().is_empty() {
            return Err(ErpError::validation("period must not be empty"));
        }

        let figures = FeeFigures::new(round2(req.amount), round2(req.paid_amount));
        let (balance, status) =
            derive_fee(figures, req.due_date, today).map_err(ErpError::validation)?;

        let now = now_ts();
        let model = transport_fees::ActiveModel {
            student_id: Set(req.student_id),
            vehicle_id: Set(req.vehicle_id),
            period: Set(req.period.trim().to_string()),
            amount: Set(figures.amount),
            paid_amount: Set(figures.paid),
            balance_amount: Set(balance),
            payment_status: Set(status.to_string()),
            due_date: Set(format_date(req.due_date)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create transport fee"))?;

        Ok(result.into_transport_fee(today))
    }

    pub async fn get_transport_fee_by_id_impl(
        &self,
        id: i64,
        today: NaiveDate,
    ) -> Result<Option<TransportFee>> {
        let result = TransportFees::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query transport fee"))?;

        Ok(result.map(|m| m.into_transport_fee(today)))
    }

    pub async fn list_transport_fees_impl(
        &self,
        query: TransportFeeListQuery,
        today: NaiveDate,
    ) -> Result<PaginatedResponse<TransportFee>> {
        let mut select = TransportFees::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(transport_fees::Column::StudentId.eq(student_id));
        }
        if let Some(vehicle_id) = query.vehicle_id {
            select = select.filter(transport_fees::Column::VehicleId.eq(vehicle_id));
        }
        if let Some(ref ids) = query.student_ids {
            select = select.filter(transport_fees::Column::StudentId.is_in(ids.clone()));
        }
        if let Some(status) = query.status {
            let due = format_date(today);
            let paid = PaymentStatus::Paid.as_str();
            select = match status {
                PaymentStatus::Paid => select.filter(transport_fees::Column::PaymentStatus.eq(paid)),
                PaymentStatus::Overdue => select
                    .filter(transport_fees::Column::PaymentStatus.ne(paid))
                    .filter(transport_fees::Column::DueDate.lt(due)),
                other => select
                    .filter(transport_fees::Column::PaymentStatus.eq(other.as_str()))
                    .filter(transport_fees::Column::DueDate.gte(due)),
            };
        }

        select = select
            .order_by_asc(transport_fees::Column::DueDate)
            .order_by_asc(transport_fees::Column::Id);

        fetch_page(
            &self.db,
            select,
            normalize_page(query.page, query.size),
            "Failed to list transport fees",
            |m| m.into_transport_fee(today),
        )
        .await
    }

    pub async fn update_transport_fee_impl(
        &self,
        id: i64,
        update: UpdateTransportFeeRequest,
        today: NaiveDate,
    ) -> Result<Option<TransportFee>> {
        let Some(existing) = TransportFees::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query transport fee"))?
        else {
            return Ok(None);
        };

        if let Some(vehicle_id) = update.vehicle_id
            && vehicle_id != existing.vehicle_id
        {
            self.require_assignable_vehicle(vehicle_id).await?;
        }

        let due_date = update
            .due_date
            .unwrap_or_else(|| stored_date(&existing.due_date));
        let figures = FeeFigures::new(
            round2(update.amount.unwrap_or(existing.amount)),
            round2(update.paid_amount.unwrap_or(existing.paid_amount)),
        );
        let (balance, status) = derive_fee(figures, due_date, today).map_err(ErpError::validation)?;

        let mut model = transport_fees::ActiveModel {
            id: Set(id),
            amount: Set(figures.amount),
            paid_amount: Set(figures.paid),
            balance_amount: Set(balance),
            payment_status: Set(status.to_string()),
            due_date: Set(format_date(due_date)),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(vehicle_id) = update.vehicle_id {
            model.vehicle_id = Set(vehicle_id);
        }
        if let Some(period) = update.period {
            model.period = Set(period.trim().to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update transport fee"))?;

        self.get_transport_fee_by_id_impl(id, today).await
    }

    pub async fn delete_transport_fee_impl(&self, id: i64) -> Result<bool> {
        let result = TransportFees::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete transport fee"))?;

        Ok(result.rows_affected > 0)
    }
}
