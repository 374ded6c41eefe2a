use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::query::{QueryCache, QueryClient, ToastBuffer};
use crate::repository::api::ApiRepository;
use crate::routes::{base_context, render_template, today};
use crate::services::birthdays::load_birthdays_page;

#[get("/birthdays")]
pub async fn show_birthdays(
    req: HttpRequest,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let data = load_birthdays_page(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        req.query_string(),
        today(),
    )
    .await;

    let mut context = base_context(&flash_messages, toasts.take(), "birthdays");
    context.insert("data", &data);

    render_template(&tera, "birthdays/index.html", &context)
}
