use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::FeeService;
use crate::config::AppConfig;
use crate::errors::ErpError;
use crate::middlewares::RequireJWT;
use crate::models::fees::requests::CreatePaymentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, in_scope, not_found_response, student_scope};
use crate::utils::today;

fn payment_rejected(msg: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::PaymentRejected, msg))
}

/// 登记缴费，收款人为当前用户，收据前缀取自配置
pub async fn record_payment(
    service: &FeeService,
    fee_id: i64,
    req: CreatePaymentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = req.validate() {
        return Ok(payment_rejected(msg));
    }

    let storage = service.get_storage(request)?;
    let received_by = RequireJWT::extract_user_id(request);
    let prefix = &AppConfig::get().school.receipt_prefix;

    match storage
        .record_payment(fee_id, req, received_by, prefix, today())
        .await
    {
        Ok(Some(receipt)) => {
            info!(
                "Payment {} of {:.2} recorded for fee {}",
                receipt.payment.receipt_number, receipt.payment.amount, fee_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(receipt, "Payment recorded successfully")))
        }
        Ok(None) => Ok(not_found_response(ErrorCode::FeeNotFound, "Fee not found")),
        Err(ErpError::Validation(msg)) => Ok(payment_rejected(msg)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn list_payments(
    service: &FeeService,
    fee_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let scope = match student_scope(&storage, request).await {
        Ok(scope) => scope,
        Err(e) => return Ok(error_response(&e)),
    };

    match storage.get_fee_by_id(fee_id, today()).await {
        Ok(Some(fee)) if in_scope(&scope, fee.student_id) => {}
        Ok(_) => return Ok(not_found_response(ErrorCode::FeeNotFound, "Fee not found")),
        Err(e) => return Ok(error_response(&e)),
    }

    match storage.list_payments(fee_id).await {
        Ok(payments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            payments,
            "Payment list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
