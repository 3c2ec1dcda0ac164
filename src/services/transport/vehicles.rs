use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TransportService;
use crate::models::transport::{CreateVehicleRequest, UpdateVehicleRequest, VehicleListParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found_response};

const NOT_FOUND: &str = "Vehicle not found";

pub async fn list_vehicles(
    service: &TransportService,
    params: VehicleListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.list_vehicles(params).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Vehicle list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn create_vehicle(
    service: &TransportService,
    req: CreateVehicleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.create_vehicle(req).await {
        Ok(vehicle) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(vehicle, "Vehicle created successfully"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_vehicle(
    service: &TransportService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.get_vehicle_by_id(id).await {
        Ok(Some(vehicle)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            vehicle,
            "Vehicle retrieved successfully",
        ))),
        Ok(None) => Ok(not_found_response(ErrorCode::VehicleNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_vehicle(
    service: &TransportService,
    id: i64,
    update: UpdateVehicleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.update_vehicle(id, update).await {
        Ok(Some(vehicle)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            vehicle,
            "Vehicle updated successfully",
        ))),
        Ok(None) => Ok(not_found_response(ErrorCode::VehicleNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_vehicle(
    service: &TransportService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.delete_vehicle(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Vehicle deleted successfully"))),
        Ok(false) => Ok(not_found_response(ErrorCode::VehicleNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}
