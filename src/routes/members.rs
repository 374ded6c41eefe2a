use actix_multipart::form::MultipartForm;
use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};
use uuid::Uuid;

use crate::domain::member::Member;
use crate::dto::members::{MEMBER_DEFAULTS, MemberFilter};
use crate::forms::members::MemberForm;
use crate::forms::upload::UploadSpreadsheetForm;
use crate::listing::live::{LiveOutcome, LiveSessions};
use crate::listing::url;
use crate::query::{QueryCache, QueryClient, ToastBuffer};
use crate::repository::api::ApiRepository;
use crate::routes::{
    RedirectTarget, base_context, flash_outcome, redirect, render_template, today,
};
use crate::services::ServiceError;
use crate::services::members::{self as members_service, MEMBERS_PATH};

/// Live search sessions of the members list, keyed by the cookie session's id.
pub type MemberLiveSessions = LiveSessions<MemberFilter, Member>;

const LIVE_SESSION_KEY: &str = "live_id";

#[get("/members")]
pub async fn show_members(
    req: HttpRequest,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let data = members_service::load_members_page(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        req.query_string(),
        today(),
    )
    .await;

    let mut context = base_context(&flash_messages, toasts.take(), "members");
    context.insert("data", &data);

    render_template(&tera, "members/index.html", &context)
}

/// Id of the browser's live search session, assigned on first use.
fn live_session_id(session: &Session) -> String {
    match session.get::<String>(LIVE_SESSION_KEY) {
        Ok(Some(id)) => id,
        Ok(None) | Err(_) => {
            let id = Uuid::new_v4().to_string();
            if let Err(err) = session.insert(LIVE_SESSION_KEY, &id) {
                log::warn!("Failed to store the live search session id: {err}");
            }
            id
        }
    }
}

/// One keystroke of the members search box.
///
/// Answers `204 No Content` when a newer keystroke or a tab switch made this
/// request obsolete, and the table fragment otherwise.
#[get("/members/live")]
pub async fn live_members(
    req: HttpRequest,
    session: Session,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    live: web::Data<MemberLiveSessions>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (shown, extras) = url::decode(req.query_string(), MEMBER_DEFAULTS);
    let term = shown.search_term.clone();
    let search = live.session(&live_session_id(&session));

    let toasts = ToastBuffer::new();
    let client = QueryClient::new(&cache, &toasts);
    let outcome = search
        .search(&shown, &term, |state| {
            members_service::fetch_members(repo.get_ref(), client, state)
        })
        .await;

    match outcome {
        LiveOutcome::Superseded | LiveOutcome::Stale => HttpResponse::NoContent().finish(),
        LiveOutcome::Ready { state, page } => {
            let data = members_service::members_view(&state, &extras, page, today());
            let mut context = Context::new();
            context.insert("data", &data);
            context.insert("alerts", &toasts.take());
            render_template(&tera, "members/_table.html", &context)
        }
    }
}

#[get("/members/{member_id}")]
pub async fn show_member(
    member_id: web::Path<i64>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result = members_service::load_member_detail(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        member_id.into_inner(),
        today(),
    )
    .await;

    match result {
        Ok(data) => {
            let mut context = base_context(&flash_messages, toasts.take(), "members");
            context.insert("data", &data);
            render_template(&tera, "members/detail.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Member not found").send();
            redirect(MEMBERS_PATH)
        }
        Err(err) => {
            flash_outcome(&toasts, Err(err), "load the member");
            redirect(MEMBERS_PATH)
        }
    }
}

#[get("/members/{member_id}/punches")]
pub async fn show_member_punches(
    member_id: web::Path<i64>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let member_id = member_id.into_inner();
    let toasts = ToastBuffer::new();
    let result = members_service::load_punch_summary(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        member_id,
    )
    .await;

    match result {
        Ok(data) => {
            let mut context = base_context(&flash_messages, toasts.take(), "members");
            context.insert("data", &data);
            render_template(&tera, "members/punches.html", &context)
        }
        Err(err) => {
            flash_outcome(&toasts, Err(err), "load the punch summary");
            redirect(&format!("{MEMBERS_PATH}/{member_id}"))
        }
    }
}

#[post("/members/create")]
pub async fn create_member(
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    web::Form(form): web::Form<MemberForm>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result =
        members_service::create_member(repo.get_ref(), QueryClient::new(&cache, &toasts), form)
            .await;
    flash_outcome(&toasts, result, "create a member");
    redirect(target.or(MEMBERS_PATH))
}

#[post("/members/{member_id}/update")]
pub async fn update_member(
    member_id: web::Path<i64>,
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    web::Form(form): web::Form<MemberForm>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result = members_service::update_member(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        member_id.into_inner(),
        form,
    )
    .await;
    flash_outcome(&toasts, result, "update a member");
    redirect(target.or(MEMBERS_PATH))
}

#[post("/members/upload")]
pub async fn upload_members(
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    MultipartForm(form): MultipartForm<UploadSpreadsheetForm>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result =
        members_service::upload_members(repo.get_ref(), QueryClient::new(&cache, &toasts), form)
            .await;
    flash_outcome(&toasts, result, "upload members");
    redirect(target.or(MEMBERS_PATH))
}

#[post("/members/access-file/upload")]
pub async fn upload_access_file(
    target: web::Query<RedirectTarget>,
    repo: web::Data<ApiRepository>,
    cache: web::Data<QueryCache>,
    MultipartForm(form): MultipartForm<UploadSpreadsheetForm>,
) -> impl Responder {
    let toasts = ToastBuffer::new();
    let result = members_service::upload_access_file(
        repo.get_ref(),
        QueryClient::new(&cache, &toasts),
        form,
    )
    .await;
    flash_outcome(&toasts, result, "upload the access file");
    redirect(target.or(MEMBERS_PATH))
}
