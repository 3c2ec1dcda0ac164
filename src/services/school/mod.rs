pub mod classes;
pub mod subjects;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::school::{
    CreateClassRequest, CreateSubjectRequest, SchoolListParams, UpdateClassRequest,
    UpdateSubjectRequest,
};
use crate::storage::Storage;

pub struct SchoolService {
    storage: Option<Arc<dyn Storage>>,
}

impl SchoolService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_classes(
        &self,
        params: SchoolListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        classes::list_classes(self, params, request).await
    }

    pub async fn create_class(
        &self,
        req: CreateClassRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        classes::create_class(self, req, request).await
    }

    pub async fn get_class(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        classes::get_class(self, id, request).await
    }

    pub async fn update_class(
        &self,
        id: i64,
        update: UpdateClassRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        classes::update_class(self, id, update, request).await
    }

    pub async fn delete_class(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        classes::delete_class(self, id, request).await
    }

    pub async fn list_subjects(
        &self,
        params: SchoolListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::list_subjects(self, params, request).await
    }

    pub async fn create_subject(
        &self,
        req: CreateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::create_subject(self, req, request).await
    }

    pub async fn get_subject(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        subjects::get_subject(self, id, request).await
    }

    pub async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::update_subject(self, id, update, request).await
    }

    pub async fn delete_subject(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        subjects::delete_subject(self, id, request).await
    }
}
