pub mod crud;
pub mod results;
pub mod schedules;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::exams::requests::{
    CreateExamRequest, CreateScheduleRequest, ExamListParams, ExamSummaryParams,
    RecordResultRequest, ResultListParams, UpdateExamRequest, UpdateResultRequest,
    UpsertMarkDistributionRequest,
};
use crate::storage::Storage;

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_exams(
        &self,
        params: ExamListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::list_exams(self, params, request).await
    }

    pub async fn create_exam(
        &self,
        req: CreateExamRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::create_exam(self, req, request).await
    }

    pub async fn get_exam(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        crud::get_exam(self, id, request).await
    }

    pub async fn update_exam(
        &self,
        id: i64,
        update: UpdateExamRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::update_exam(self, id, update, request).await
    }

    pub async fn delete_exam(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        crud::delete_exam(self, id, request).await
    }

    /// 考试日程
    pub async fn list_schedules(
        &self,
        exam_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        schedules::list_schedules(self, exam_id, request).await
    }

    pub async fn create_schedule(
        &self,
        exam_id: i64,
        req: CreateScheduleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        schedules::create_schedule(self, exam_id, req, request).await
    }

    pub async fn delete_schedule(
        &self,
        exam_id: i64,
        schedule_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        schedules::delete_schedule(self, exam_id, schedule_id, request).await
    }

    /// 成绩构成
    pub async fn list_distributions(
        &self,
        exam_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        schedules::list_distributions(self, exam_id, request).await
    }

    pub async fn upsert_distribution(
        &self,
        exam_id: i64,
        req: UpsertMarkDistributionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        schedules::upsert_distribution(self, exam_id, req, request).await
    }

    /// 成绩
    pub async fn list_results(
        &self,
        exam_id: i64,
        params: ResultListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        results::list_results(self, exam_id, params, request).await
    }

    pub async fn record_result(
        &self,
        exam_id: i64,
        req: RecordResultRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        results::record_result(self, exam_id, req, request).await
    }

    pub async fn get_result(
        &self,
        exam_id: i64,
        result_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        results::get_result(self, exam_id, result_id, request).await
    }

    pub async fn update_result(
        &self,
        exam_id: i64,
        result_id: i64,
        update: UpdateResultRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        results::update_result(self, exam_id, result_id, update, request).await
    }

    pub async fn delete_result(
        &self,
        exam_id: i64,
        result_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        results::delete_result(self, exam_id, result_id, request).await
    }

    pub async fn student_summary(
        &self,
        exam_id: i64,
        params: ExamSummaryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        results::student_summary(self, exam_id, params, request).await
    }
}
