//! 证书签发、查询与吊销

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use crate::middlewares::RequireJWT;
use crate::models::certificates::{
    CertificateListParams, CertificateListQuery, IssueCertificateRequest,
    RevokeCertificateRequest, UpdateCertificateRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    error_response, in_scope, not_found_response, student_scope, validation_response,
};
use crate::storage::Storage;
use crate::utils::today;

const NOT_FOUND: &str = "Certificate not found";

pub struct CertificateService {
    storage: Option<Arc<dyn Storage>>,
}

impl CertificateService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_certificates(
        &self,
        params: CertificateListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let student_ids = match student_scope(&storage, request).await {
            Ok(scope) => scope,
            Err(e) => return Ok(error_response(&e)),
        };

        let query = CertificateListQuery {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            student_id: params.student_id,
            certificate_type: params.certificate_type,
            status: params.status,
            student_ids,
        };

        match storage.list_certificates(query).await {
            Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                page,
                "Certificate list retrieved successfully",
            ))),
            Err(e) => Ok(error_response(&e)),
        }
    }

    /// 编号按类型和年份顺延
    pub async fn issue_certificate(
        &self,
        req: IssueCertificateRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let issued_by = RequireJWT::extract_user_id(request);

        match storage.issue_certificate(req, issued_by, today()).await {
            Ok(certificate) => {
                info!("Certificate {} issued", certificate.certificate_number);
                Ok(HttpResponse::Created().json(ApiResponse::success(
                    certificate,
                    "Certificate issued successfully",
                )))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn get_certificate(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let scope = match student_scope(&storage, request).await {
            Ok(scope) => scope,
            Err(e) => return Ok(error_response(&e)),
        };

        match storage.get_certificate_by_id(id).await {
            Ok(Some(certificate)) if in_scope(&scope, certificate.student_id) => Ok(
                HttpResponse::Ok().json(ApiResponse::success(
                    certificate,
                    "Certificate retrieved successfully",
                )),
            ),
            Ok(_) => Ok(not_found_response(ErrorCode::CertificateNotFound, NOT_FOUND)),
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn update_certificate(
        &self,
        id: i64,
        update: UpdateCertificateRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        match storage.update_certificate(id, update).await {
            Ok(Some(certificate)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                certificate,
                "Certificate updated successfully",
            ))),
            Ok(None) => Ok(not_found_response(ErrorCode::CertificateNotFound, NOT_FOUND)),
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn revoke_certificate(
        &self,
        id: i64,
        req: RevokeCertificateRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = req.validate() {
            return Ok(validation_response(msg));
        }

        let storage = self.get_storage(request)?;
        match storage.revoke_certificate(id, req.reason).await {
            Ok(Some(certificate)) => {
                info!("Certificate {} revoked", certificate.certificate_number);
                Ok(HttpResponse::Ok().json(ApiResponse::success(
                    certificate,
                    "Certificate revoked successfully",
                )))
            }
            Ok(None) => Ok(not_found_response(ErrorCode::CertificateNotFound, NOT_FOUND)),
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn delete_certificate(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        match storage.delete_certificate(id).await {
            Ok(true) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success_empty("Certificate deleted successfully"))),
            Ok(false) => Ok(not_found_response(ErrorCode::CertificateNotFound, NOT_FOUND)),
            Err(e) => Ok(error_response(&e)),
        }
    }
}
