use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LibraryService;
use crate::models::library::{BookListParams, CreateBookRequest, UpdateBookRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found_response};

const NOT_FOUND: &str = "Book not found";

pub async fn list_books(
    service: &LibraryService,
    params: BookListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.list_books(params).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Book list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn create_book(
    service: &LibraryService,
    req: CreateBookRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.create_book(req).await {
        Ok(book) => Ok(HttpResponse::Created().json(ApiResponse::success(book, "Book created successfully"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_book(
    service: &LibraryService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.get_book_by_id(id).await {
        Ok(Some(book)) => Ok(HttpResponse::Ok().json(ApiResponse::success(book, "Book retrieved successfully"))),
        Ok(None) => Ok(not_found_response(ErrorCode::BookNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_book(
    service: &LibraryService,
    id: i64,
    update: UpdateBookRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.update_book(id, update).await {
        Ok(Some(book)) => Ok(HttpResponse::Ok().json(ApiResponse::success(book, "Book updated successfully"))),
        Ok(None) => Ok(not_found_response(ErrorCode::BookNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_book(
    service: &LibraryService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.delete_book(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Book deleted successfully"))),
        Ok(false) => Ok(not_found_response(ErrorCode::BookNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}
