use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::dto::whatsapp::WhatsAppPrefill;
use crate::forms::whatsapp::WhatsAppForm;
use crate::query::{QueryCache, QueryClient, ToastBuffer};
use crate::repository::api::ApiRepository;
use crate::routes::{RedirectTarget, base_context, flash_outcome, redirect, render_template};
use crate::services::whatsapp::{WHATSAPP_PATH, load_whatsapp_page, send_whatsapp};

/// Message form, optionally prefilled from the query string (e.g. from a
/// member row's "message" link).
#[get("/whatsapp")]
pub async fn show_whatsapp(
    prefill: web::Query<WhatsAppPrefill>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = load_whatsapp_page(prefill.into_inner());

    let mut context = base_context(&flash_messages, Vec::new(), "whatsapp");
    context.insert("data", &data);

    render_template(&tera, "whatsapp/index.html", &context)
}

#[post("/whatsapp/send")]
pub async fn send_message(
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    web::Form(form): web::Form<WhatsAppForm>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result = send_whatsapp(repo.get_ref(), QueryClient::new(&cache, &toasts), form).await;
    flash_outcome(&toasts, result, "send a WhatsApp message");
    redirect(target.or(WHATSAPP_PATH))
}
