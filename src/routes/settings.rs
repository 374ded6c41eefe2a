use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::forms::settings::SettingForm;
use crate::query::{QueryCache, QueryClient, ToastBuffer};
use crate::repository::api::ApiRepository;
use crate::routes::{RedirectTarget, base_context, flash_outcome, redirect, render_template};
use crate::services::settings::{self as settings_service, SETTINGS_PATH};

#[get("/settings")]
pub async fn show_settings(
    req: HttpRequest,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let data = settings_service::load_settings_page(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        req.query_string(),
    )
    .await;

    let mut context = base_context(&flash_messages, toasts.take(), "settings");
    context.insert("data", &data);

    render_template(&tera, "settings/index.html", &context)
}

#[post("/settings/create")]
pub async fn create_setting(
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    web::Form(form): web::Form<SettingForm>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result =
        settings_service::create_setting(repo.get_ref(), QueryClient::new(&cache, &toasts), form)
            .await;
    flash_outcome(&toasts, result, "create a setting");
    redirect(target.or(SETTINGS_PATH))
}

#[post("/settings/{setting_id}/update")]
pub async fn update_setting(
    setting_id: web::Path<i64>,
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    web::Form(form): web::Form<SettingForm>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result = settings_service::update_setting(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        setting_id.into_inner(),
        form,
    )
    .await;
    flash_outcome(&toasts, result, "update a setting");
    redirect(target.or(SETTINGS_PATH))
}

/// Ends a setting's validity without deleting its history.
#[post("/settings/{setting_id}/deactivate")]
pub async fn deactivate_setting(
    setting_id: web::Path<i64>,
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result = settings_service::deactivate_setting(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        setting_id.into_inner(),
    )
    .await;
    flash_outcome(&toasts, result, "deactivate a setting");
    redirect(target.or(SETTINGS_PATH))
}

#[post("/settings/{setting_id}/delete")]
pub async fn delete_setting(
    setting_id: web::Path<i64>,
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result = settings_service::delete_setting(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        setting_id.into_inner(),
    )
    .await;
    flash_outcome(&toasts, result, "delete a setting");
    redirect(target.or(SETTINGS_PATH))
}
