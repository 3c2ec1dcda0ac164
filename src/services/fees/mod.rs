pub mod payments;
pub mod structures;
pub mod student_fees;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::fees::requests::{
    CreateFeeRequest, CreateFeeStructureRequest, CreatePaymentRequest, FeeListParams,
    FeeSummaryParams, UpdateFeeRequest, UpdateFeeStructureRequest,
};
use crate::models::school::SchoolListParams;
use crate::storage::Storage;

pub struct FeeService {
    storage: Option<Arc<dyn Storage>>,
}

impl FeeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    /// 收费标准
    pub async fn list_structures(
        &self,
        params: SchoolListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        structures::list_structures(self, params, request).await
    }

    pub async fn create_structure(
        &self,
        req: CreateFeeStructureRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        structures::create_structure(self, req, request).await
    }

    pub async fn get_structure(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        structures::get_structure(self, id, request).await
    }

    pub async fn update_structure(
        &self,
        id: i64,
        update: UpdateFeeStructureRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        structures::update_structure(self, id, update, request).await
    }

    pub async fn delete_structure(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        structures::delete_structure(self, id, request).await
    }

    /// 学生费用
    pub async fn list_fees(
        &self,
        params: FeeListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student_fees::list_fees(self, params, request).await
    }

    pub async fn create_fee(
        &self,
        req: CreateFeeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student_fees::create_fee(self, req, request).await
    }

    pub async fn get_fee(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        student_fees::get_fee(self, id, request).await
    }

    pub async fn update_fee(
        &self,
        id: i64,
        update: UpdateFeeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student_fees::update_fee(self, id, update, request).await
    }

    pub async fn delete_fee(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        student_fees::delete_fee(self, id, request).await
    }

    pub async fn fee_summary(
        &self,
        params: FeeSummaryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student_fees::fee_summary(self, params, request).await
    }

    /// 缴费
    pub async fn record_payment(
        &self,
        fee_id: i64,
        req: CreatePaymentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        payments::record_payment(self, fee_id, req, request).await
    }

    pub async fn list_payments(
        &self,
        fee_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        payments::list_payments(self, fee_id, request).await
    }
}
