pub mod transport_fees;
pub mod vehicles;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::transport::{
    CreateTransportFeeRequest, CreateVehicleRequest, TransportFeeListParams,
    UpdateTransportFeeRequest, UpdateVehicleRequest, VehicleListParams,
};
use crate::storage::Storage;

pub struct TransportService {
    storage: Option<Arc<dyn Storage>>,
}

impl TransportService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_vehicles(
        &self,
        params: VehicleListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        vehicles::list_vehicles(self, params, request).await
    }

    pub async fn create_vehicle(
        &self,
        req: CreateVehicleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        vehicles::create_vehicle(self, req, request).await
    }

    pub async fn get_vehicle(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        vehicles::get_vehicle(self, id, request).await
    }

    pub async fn update_vehicle(
        &self,
        id: i64,
        update: UpdateVehicleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        vehicles::update_vehicle(self, id, update, request).await
    }

    pub async fn delete_vehicle(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        vehicles::delete_vehicle(self, id, request).await
    }

    pub async fn list_fees(
        &self,
        params: TransportFeeListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        transport_fees::list_fees(self, params, request).await
    }

    pub async fn create_fee(
        &self,
        req: CreateTransportFeeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        transport_fees::create_fee(self, req, request).await
    }

    pub async fn get_fee(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        transport_fees::get_fee(self, id, request).await
    }

    pub async fn update_fee(
        &self,
        id: i64,
        update: UpdateTransportFeeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        transport_fees::update_fee(self, id, update, request).await
    }

    pub async fn delete_fee(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        transport_fees::delete_fee(self, id, request).await
    }
}
