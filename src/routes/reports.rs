use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::query::{QueryCache, QueryClient, ToastBuffer};
use crate::repository::api::ApiRepository;
use crate::routes::{base_context, flash_outcome, redirect, render_template, today};
use crate::services::reports::{self as reports_service, REPORTS_PATH};

fn attachment(file_name: String) -> ContentDisposition {
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(file_name)],
    }
}

/// Back to the report the export was requested from.
fn report_href(query: &str) -> String {
    if query.is_empty() {
        REPORTS_PATH.to_string()
    } else {
        format!("{REPORTS_PATH}?{query}")
    }
}

#[get("/reports")]
pub async fn show_reports(
    req: HttpRequest,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let data = reports_service::load_reports_page(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        req.query_string(),
        today(),
    )
    .await;

    let mut context = base_context(&flash_messages, toasts.take(), "reports");
    context.insert("data", &data);

    render_template(&tera, "reports/index.html", &context)
}

#[get("/reports/export.csv")]
pub async fn export_report_csv(
    req: HttpRequest,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result = reports_service::export_report_csv(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        req.query_string(),
        today(),
    )
    .await;

    match result {
        Ok(export) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(attachment(export.file_name))
            .body(export.bytes),
        Err(err) => {
            flash_outcome(&toasts, Err(err), "export the report");
            redirect(&report_href(req.query_string()))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InactiveExportParams {
    pub days: Option<u32>,
    pub format: Option<String>,
}

/// Passes the API's Excel or PDF file through with its content type.
#[get("/reports/inactive/export")]
pub async fn export_inactive_members(
    params: web::Query<InactiveExportParams>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
) -> impl Responder {
    let params = params.into_inner();
    let toasts = ToastBuffer::new();
    let result = reports_service::export_inactive_members(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        params.days,
        params.format.as_deref(),
    )
    .await;

    match result {
        Ok(download) => {
            let file_name = download.file_name.unwrap_or_else(|| {
                let extension = match params.format.as_deref() {
                    Some("pdf") => "pdf",
                    _ => "xlsx",
                };
                format!("inactive-members.{extension}")
            });
            HttpResponse::Ok()
                .content_type(download.content_type)
                .insert_header(attachment(file_name))
                .body(download.bytes)
        }
        Err(err) => {
            flash_outcome(&toasts, Err(err), "export inactive members");
            redirect(&report_href("filter=inactive"))
        }
    }
}
