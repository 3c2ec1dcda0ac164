pub mod books;
pub mod loans;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::library::{
    BookListParams, CreateBookRequest, IssueBookRequest, LoanListParams, LoanPolicy,
    ReturnBookRequest, UpdateBookRequest,
};
use crate::storage::Storage;

pub struct LibraryService {
    storage: Option<Arc<dyn Storage>>,
}

impl LibraryService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub(crate) fn loan_policy(&self) -> LoanPolicy {
        let library = &AppConfig::get().library;
        LoanPolicy {
            loan_days: library.loan_days,
            fine_per_day: library.fine_per_day,
            max_active_loans: library.max_active_loans,
        }
    }

    pub async fn list_books(
        &self,
        params: BookListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        books::list_books(self, params, request).await
    }

    pub async fn create_book(
        &self,
        req: CreateBookRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        books::create_book(self, req, request).await
    }

    pub async fn get_book(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        books::get_book(self, id, request).await
    }

    pub async fn update_book(
        &self,
        id: i64,
        update: UpdateBookRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        books::update_book(self, id, update, request).await
    }

    pub async fn delete_book(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        books::delete_book(self, id, request).await
    }

    pub async fn list_loans(
        &self,
        params: LoanListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        loans::list_loans(self, params, request).await
    }

    pub async fn issue_book(
        &self,
        req: IssueBookRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        loans::issue_book(self, req, request).await
    }

    pub async fn get_loan(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        loans::get_loan(self, id, request).await
    }

    pub async fn return_book(
        &self,
        loan_id: i64,
        req: ReturnBookRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        loans::return_book(self, loan_id, req, request).await
    }
}
