use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::forms::partners::PartnerForm;
use crate::query::{QueryCache, QueryClient, ToastBuffer};
use crate::repository::api::ApiRepository;
use crate::routes::{RedirectTarget, base_context, flash_outcome, redirect, render_template};
use crate::services::partners::{self as partners_service, PARTNERS_PATH};

#[get("/partners")]
pub async fn show_partners(
    req: HttpRequest,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let data = partners_service::load_partners_page(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        req.query_string(),
    )
    .await;

    let mut context = base_context(&flash_messages, toasts.take(), "partners");
    context.insert("data", &data);

    render_template(&tera, "partners/index.html", &context)
}

#[post("/partners/create")]
pub async fn create_partner(
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    web::Form(form): web::Form<PartnerForm>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result =
        partners_service::create_partner(repo.get_ref(), QueryClient::new(&cache, &toasts), form)
            .await;
    flash_outcome(&toasts, result, "create a partner");
    redirect(target.or(PARTNERS_PATH))
}

#[post("/partners/{partner_id}/update")]
pub async fn update_partner(
    partner_id: web::Path<i64>,
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    web::Form(form): web::Form<PartnerForm>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result = partners_service::update_partner(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        partner_id.into_inner(),
        form,
    )
    .await;
    flash_outcome(&toasts, result, "update a partner");
    redirect(target.or(PARTNERS_PATH))
}

#[post("/partners/{partner_id}/delete")]
pub async fn delete_partner(
    partner_id: web::Path<i64>,
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result = partners_service::delete_partner(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        partner_id.into_inner(),
    )
    .await;
    flash_outcome(&toasts, result, "delete a partner");
    redirect(target.or(PARTNERS_PATH))
}
