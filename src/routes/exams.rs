use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequirePermission};
use crate::models::exams::requests::{
    CreateExamRequest, CreateScheduleRequest, ExamListParams, ExamSummaryParams,
    RecordResultRequest, ResultListParams, UpdateExamRequest, UpdateResultRequest,
    UpsertMarkDistributionRequest,
};
use crate::permissions::{Action, Module};
use crate::services::ExamService;
use crate::utils::{SafeIDI64, SafeSubIDI64};

static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

pub async fn list_exams(
    req: HttpRequest,
    query: web::Query<ExamListParams>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_exams(query.into_inner(), &req).await
}

pub async fn create_exam(
    req: HttpRequest,
    body: web::Json<CreateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.create_exam(body.into_inner(), &req).await
}

pub async fn get_exam(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.get_exam(id.0, &req).await
}

pub async fn update_exam(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.update_exam(id.0, body.into_inner(), &req).await
}

pub async fn delete_exam(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_exam(id.0, &req).await
}

pub async fn list_schedules(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_schedules(id.0, &req).await
}

pub async fn create_schedule(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<CreateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .create_schedule(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_schedule(
    req: HttpRequest,
    id: SafeIDI64,
    schedule_id: SafeSubIDI64,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_schedule(id.0, schedule_id.0, &req).await
}

pub async fn list_distributions(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_distributions(id.0, &req).await
}

pub async fn upsert_distribution(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpsertMarkDistributionRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .upsert_distribution(id.0, body.into_inner(), &req)
        .await
}

pub async fn list_results(
    req: HttpRequest,
    id: SafeIDI64,
    query: web::Query<ResultListParams>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .list_results(id.0, query.into_inner(), &req)
        .await
}

pub async fn record_result(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<RecordResultRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .record_result(id.0, body.into_inner(), &req)
        .await
}

pub async fn student_summary(
    req: HttpRequest,
    id: SafeIDI64,
    query: web::Query<ExamSummaryParams>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .student_summary(id.0, query.into_inner(), &req)
        .await
}

pub async fn get_result(
    req: HttpRequest,
    id: SafeIDI64,
    result_id: SafeSubIDI64,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.get_result(id.0, result_id.0, &req).await
}

pub async fn update_result(
    req: HttpRequest,
    id: SafeIDI64,
    result_id: SafeSubIDI64,
    body: web::Json<UpdateResultRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .update_result(id.0, result_id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_result(
    req: HttpRequest,
    id: SafeIDI64,
    result_id: SafeSubIDI64,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_result(id.0, result_id.0, &req).await
}

pub fn configure_exam_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/exams")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_exams)
                            .wrap(RequirePermission::view(Module::Exams)),
                    )
                    .route(
                        web::post()
                            .to(create_exam)
                            .wrap(RequirePermission::new(Module::Exams, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_exam)
                            .wrap(RequirePermission::view(Module::Exams)),
                    )
                    .route(
                        web::put()
                            .to(update_exam)
                            .wrap(RequirePermission::new(Module::Exams, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_exam)
                            .wrap(RequirePermission::new(Module::Exams, Action::Delete)),
                    ),
            )
            // 考试日程
            .service(
                web::resource("/{id}/schedules")
                    .route(
                        web::get()
                            .to(list_schedules)
                            .wrap(RequirePermission::view(Module::Exams)),
                    )
                    .route(
                        web::post()
                            .to(create_schedule)
                            .wrap(RequirePermission::new(Module::Exams, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}/schedules/{sub_id}").route(
                    web::delete()
                        .to(delete_schedule)
                        .wrap(RequirePermission::new(Module::Exams, Action::Delete)),
                ),
            )
            // 分值构成
            .service(
                web::resource("/{id}/distributions")
                    .route(
                        web::get()
                            .to(list_distributions)
                            .wrap(RequirePermission::view(Module::Exams)),
                    )
                    .route(
                        web::put()
                            .to(upsert_distribution)
                            .wrap(RequirePermission::new(Module::Exams, Action::Update)),
                    ),
            )
            // 成绩
            .service(
                web::resource("/{id}/results")
                    .route(
                        web::get()
                            .to(list_results)
                            .wrap(RequirePermission::view(Module::Results)),
                    )
                    .route(
                        web::post()
                            .to(record_result)
                            .wrap(RequirePermission::new(Module::Results, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}/results/summary").route(
                    web::get()
                        .to(student_summary)
                        .wrap(RequirePermission::view(Module::Results)),
                ),
            )
            .service(
                web::resource("/{id}/results/{sub_id}")
                    .route(
                        web::get()
                            .to(get_result)
                            .wrap(RequirePermission::view(Module::Results)),
                    )
                    .route(
                        web::put()
                            .to(update_result)
                            .wrap(RequirePermission::new(Module::Results, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_result)
                            .wrap(RequirePermission::new(Module::Results, Action::Delete)),
                    ),
            ),
    );
}
