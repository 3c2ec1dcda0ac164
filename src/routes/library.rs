use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequirePermission};
use crate::models::library::{
    BookListParams, CreateBookRequest, IssueBookRequest, LoanListParams, ReturnBookRequest,
    UpdateBookRequest,
};
use crate::permissions::{Action, Module};
use crate::services::LibraryService;
use crate::utils::SafeIDI64;

static LIBRARY_SERVICE: Lazy<LibraryService> = Lazy::new(LibraryService::new_lazy);

pub async fn list_books(
    req: HttpRequest,
    query: web::Query<BookListParams>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.list_books(query.into_inner(), &req).await
}

pub async fn create_book(
    req: HttpRequest,
    body: web::Json<CreateBookRequest>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.create_book(body.into_inner(), &req).await
}

pub async fn get_book(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.get_book(id.0, &req).await
}

pub async fn update_book(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateBookRequest>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.update_book(id.0, body.into_inner(), &req).await
}

pub async fn delete_book(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.delete_book(id.0, &req).await
}

pub async fn list_loans(
    req: HttpRequest,
    query: web::Query<LoanListParams>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.list_loans(query.into_inner(), &req).await
}

pub async fn issue_book(
    req: HttpRequest,
    body: web::Json<IssueBookRequest>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.issue_book(body.into_inner(), &req).await
}

pub async fn get_loan(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.get_loan(id.0, &req).await
}

pub async fn return_book(
    req: HttpRequest,
    id: SafeIDI64,
    body: Option<web::Json<ReturnBookRequest>>,
) -> ActixResult<HttpResponse> {
    let body = body.map(web::Json::into_inner).unwrap_or_default();
    LIBRARY_SERVICE.return_book(id.0, body, &req).await
}

pub fn configure_library_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/library")
            .wrap(RequireJWT)
            .service(
                web::resource("/books")
                    .route(
                        web::get()
                            .to(list_books)
                            .wrap(RequirePermission::view(Module::Library)),
                    )
                    .route(
                        web::post()
                            .to(create_book)
                            .wrap(RequirePermission::new(Module::Library, Action::Create)),
                    ),
            )
            .service(
                web::resource("/books/{id}")
                    .route(
                        web::get()
                            .to(get_book)
                            .wrap(RequirePermission::view(Module::Library)),
                    )
                    .route(
                        web::put()
                            .to(update_book)
                            .wrap(RequirePermission::new(Module::Library, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_book)
                            .wrap(RequirePermission::new(Module::Library, Action::Delete)),
                    ),
            )
            .service(
                web::resource("/loans")
                    .route(
                        web::get()
                            .to(list_loans)
                            .wrap(RequirePermission::view(Module::Library)),
                    )
                    .route(
                        web::post()
                            .to(issue_book)
                            .wrap(RequirePermission::new(Module::Library, Action::Create)),
                    ),
            )
            .service(
                web::resource("/loans/{id}").route(
                    web::get()
                        .to(get_loan)
                        .wrap(RequirePermission::view(Module::Library)),
                ),
            )
            .service(
                web::resource("/loans/{id}/return").route(
                    web::post()
                        .to(return_book)
                        .wrap(RequirePermission::new(Module::Library, Action::Update)),
                ),
            ),
    );
}
