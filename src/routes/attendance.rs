use actix_multipart::form::MultipartForm;
use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::forms::upload::UploadSpreadsheetForm;
use crate::query::{QueryCache, QueryClient, ToastBuffer};
use crate::repository::api::ApiRepository;
use crate::routes::{RedirectTarget, base_context, flash_outcome, redirect, render_template};
use crate::services::attendance::{self as attendance_service, ATTENDANCE_PATH};

#[get("/attendance")]
pub async fn show_attendance(
    req: HttpRequest,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let data = attendance_service::load_attendance_page(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        req.query_string(),
    )
    .await;

    let mut context = base_context(&flash_messages, toasts.take(), "attendance");
    context.insert("data", &data);

    render_template(&tera, "attendance/index.html", &context)
}

#[post("/attendance/upload")]
pub async fn upload_punches(
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    MultipartForm(form): MultipartForm<UploadSpreadsheetForm>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result =
        attendance_service::upload_punches(repo.get_ref(), QueryClient::new(&cache, &toasts), form)
            .await;
    flash_outcome(&toasts, result, "upload punch data");
    redirect(target.or(ATTENDANCE_PATH))
}
