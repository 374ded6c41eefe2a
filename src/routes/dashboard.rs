use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::query::{QueryCache, QueryClient, ToastBuffer};
use crate::repository::api::ApiRepository;
use crate::routes::{base_context, render_template};
use crate::services::dashboard::load_dashboard;

#[get("/")]
pub async fn show_dashboard(
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let data = load_dashboard(repo.get_ref(), QueryClient::new(&cache, &toasts)).await;

    let mut context = base_context(&flash_messages, toasts.take(), "dashboard");
    context.insert("cards", &data.cards);

    render_template(&tera, "dashboard/index.html", &context)
}
