use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::forms::holidays::HolidayForm;
use crate::query::{QueryCache, QueryClient, ToastBuffer};
use crate::repository::api::ApiRepository;
use crate::routes::{RedirectTarget, base_context, flash_outcome, redirect, render_template};
use crate::services::holidays::{self as holidays_service, HOLIDAYS_PATH};

#[get("/holidays")]
pub async fn show_holidays(
    req: HttpRequest,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let data = holidays_service::load_holidays_page(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        req.query_string(),
    )
    .await;

    let mut context = base_context(&flash_messages, toasts.take(), "holidays");
    context.insert("data", &data);

    render_template(&tera, "holidays/index.html", &context)
}

#[post("/holidays/create")]
pub async fn create_holiday(
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    web::Form(form): web::Form<HolidayForm>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result =
        holidays_service::create_holiday(repo.get_ref(), QueryClient::new(&cache, &toasts), form)
            .await;
    flash_outcome(&toasts, result, "create a holiday");
    redirect(target.or(HOLIDAYS_PATH))
}

#[post("/holidays/{holiday_id}/update")]
pub async fn update_holiday(
    holiday_id: web::Path<i64>,
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    web::Form(form): web::Form<HolidayForm>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result = holidays_service::update_holiday(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        holiday_id.into_inner(),
        form,
    )
    .await;
    flash_outcome(&toasts, result, "update a holiday");
    redirect(target.or(HOLIDAYS_PATH))
}

#[post("/holidays/{holiday_id}/delete")]
pub async fn delete_holiday(
    holiday_id: web::Path<i64>,
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result = holidays_service::delete_holiday(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        holiday_id.into_inner(),
    )
    .await;
    flash_outcome(&toasts, result, "delete a holiday");
    redirect(target.or(HOLIDAYS_PATH))
}
