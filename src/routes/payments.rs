use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::forms::payments::RecordPaymentForm;
use crate::query::{QueryCache, QueryClient, ToastBuffer};
use crate::repository::api::ApiRepository;
use crate::routes::{
    RedirectTarget, base_context, flash_outcome, redirect, render_template, today,
};
use crate::services::payments::{self as payments_service, PAYMENTS_PATH};

#[get("/payments")]
pub async fn show_payments(
    req: HttpRequest,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let data = payments_service::load_payments_page(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        req.query_string(),
        today(),
    )
    .await;

    let mut context = base_context(&flash_messages, toasts.take(), "payments");
    context.insert("data", &data);

    render_template(&tera, "payments/index.html", &context)
}

/// Records a payment from the pending list or from a member's page.
#[post("/payments/record")]
pub async fn record_payment(
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    web::Form(form): web::Form<RecordPaymentForm>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result =
        payments_service::record_payment(repo.get_ref(), QueryClient::new(&cache, &toasts), form)
            .await;
    flash_outcome(&toasts, result, "record a payment");
    redirect(target.or(PAYMENTS_PATH))
}
