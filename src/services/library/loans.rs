use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::LibraryService;
use crate::middlewares::RequireJWT;
use crate::models::library::{IssueBookRequest, LoanListParams, LoanListQuery, ReturnBookRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, in_scope, not_found_response, student_scope};
use crate::utils::today;

const NOT_FOUND: &str = "Loan not found";

pub async fn list_loans(
    service: &LibraryService,
    params: LoanListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student_ids = match student_scope(&storage, request).await {
        Ok(scope) => scope,
        Err(e) => return Ok(error_response(&e)),
    };

    let query = LoanListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        student_id: params.student_id,
        book_id: params.book_id,
        open_only: params.open_only.unwrap_or(false),
        student_ids,
    };

    match storage.list_loans(query, today()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Loan list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn issue_book(
    service: &LibraryService,
    req: IssueBookRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let issued_by = RequireJWT::extract_user_id(request);

    match storage
        .issue_book(req, service.loan_policy(), issued_by, today())
        .await
    {
        Ok(loan) => {
            info!(
                "Book {} issued to student {}, due {}",
                loan.book_id, loan.student_id, loan.due_date
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(loan, "Book issued successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_loan(
    service: &LibraryService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let scope = match student_scope(&storage, request).await {
        Ok(scope) => scope,
        Err(e) => return Ok(error_response(&e)),
    };

    match storage.get_loan_by_id(id, today()).await {
        Ok(Some(loan)) if in_scope(&scope, loan.student_id) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(loan, "Loan retrieved successfully")))
        }
        Ok(_) => Ok(not_found_response(ErrorCode::LoanNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

/// 归还，未指定归还日期时取当天
pub async fn return_book(
    service: &LibraryService,
    loan_id: i64,
    req: ReturnBookRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let today = today();
    let return_date = req.return_date.unwrap_or(today);

    match storage
        .return_book(loan_id, return_date, service.loan_policy(), today)
        .await
    {
        Ok(Some(loan)) => Ok(HttpResponse::Ok().json(ApiResponse::success(loan, "Book returned successfully"))),
        Ok(None) => Ok(not_found_response(ErrorCode::LoanNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}
