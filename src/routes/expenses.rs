use actix_multipart::form::MultipartForm;
use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::forms::expenses::ExpenseForm;
use crate::forms::upload::UploadSpreadsheetForm;
use crate::query::{QueryCache, QueryClient, ToastBuffer};
use crate::repository::api::ApiRepository;
use crate::routes::{
    RedirectTarget, base_context, flash_outcome, redirect, render_template, today,
};
use crate::services::expenses::{self as expenses_service, EXPENSES_PATH};

#[get("/expenses")]
pub async fn show_expenses(
    req: HttpRequest,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let data = expenses_service::load_expenses_page(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        req.query_string(),
        today(),
    )
    .await;

    let mut context = base_context(&flash_messages, toasts.take(), "expenses");
    context.insert("data", &data);

    render_template(&tera, "expenses/index.html", &context)
}

#[post("/expenses/create")]
pub async fn create_expense(
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    web::Form(form): web::Form<ExpenseForm>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result =
        expenses_service::create_expense(repo.get_ref(), QueryClient::new(&cache, &toasts), form)
            .await;
    flash_outcome(&toasts, result, "create an expense");
    redirect(target.or(EXPENSES_PATH))
}

#[post("/expenses/{expense_id}/update")]
pub async fn update_expense(
    expense_id: web::Path<i64>,
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    web::Form(form): web::Form<ExpenseForm>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result = expenses_service::update_expense(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        expense_id.into_inner(),
        form,
    )
    .await;
    flash_outcome(&toasts, result, "update an expense");
    redirect(target.or(EXPENSES_PATH))
}

#[post("/expenses/{expense_id}/delete")]
pub async fn delete_expense(
    expense_id: web::Path<i64>,
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result = expenses_service::delete_expense(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        expense_id.into_inner(),
    )
    .await;
    flash_outcome(&toasts, result, "delete an expense");
    redirect(target.or(EXPENSES_PATH))
}

#[post("/expenses/upload")]
pub async fn upload_expenses(
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    MultipartForm(form): MultipartForm<UploadSpreadsheetForm>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result =
        expenses_service::upload_expenses(repo.get_ref(), QueryClient::new(&cache, &toasts), form)
            .await;
    flash_outcome(&toasts, result, "upload expenses");
    redirect(target.or(EXPENSES_PATH))
}
