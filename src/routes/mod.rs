//! Actix handlers, one module per screen, plus the helpers they share.
//!
//! Every page handler builds a fresh [`ToastBuffer`] for its request and
//! runs its service through a [`QueryClient`] over the process-wide cache.
//! Toasts raised while loading a page are shown on that page; toasts raised
//! by a mutation are forwarded as flash messages to the page the browser is
//! redirected to.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::query::{Toast, ToastBuffer, ToastLevel};
use crate::services::{ServiceError, ServiceResult};

pub mod attendance;
pub mod birthdays;
pub mod dashboard;
pub mod expenses;
pub mod holidays;
pub mod members;
pub mod partners;
pub mod payments;
pub mod reports;
pub mod settings;
pub mod whatsapp;

/// Maps a flash level to the Bootstrap alert class of the base template.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

fn toast_level_to_str(level: ToastLevel) -> &'static str {
    match level {
        ToastLevel::Error => "danger",
        ToastLevel::Warning => "warning",
        ToastLevel::Success => "success",
        ToastLevel::Info => "info",
    }
}

/// Context shared by every full page: the alerts to show and the active
/// navigation entry.
///
/// `toasts` are the ones raised while loading this page; they follow the
/// flash messages carried over from the previous request.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    toasts: Vec<Toast>,
    current_page: &str,
) -> Context {
    let mut alerts: Vec<(String, &'static str)> = flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect();
    alerts.extend(
        toasts
            .into_iter()
            .map(|toast| (toast.message, toast_level_to_str(toast.level))),
    );

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Today on the dashboard host's clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `?next=` of a mutating request: where to send the browser afterwards.
#[derive(Debug, Default, Deserialize)]
pub struct RedirectTarget {
    pub next: Option<String>,
}

/// Absolute path on this site. Browsers read `/\\host` like `//host`, so
/// backslashes and control characters are refused anywhere in the path.
fn is_site_path(next: &str) -> bool {
    next.starts_with('/')
        && !next.starts_with("//")
        && !next.chars().any(|c| c == '\\' || c.is_control())
}

impl RedirectTarget {
    /// The requested location when it stays on this site, `fallback` otherwise.
    pub fn or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.next.as_deref() {
            Some(next) if is_site_path(next) => next,
            _ => fallback,
        }
    }
}

fn flash(toast: Toast) {
    let message = match toast.level {
        ToastLevel::Success => FlashMessage::success(toast.message),
        ToastLevel::Info => FlashMessage::info(toast.message),
        ToastLevel::Warning => FlashMessage::warning(toast.message),
        ToastLevel::Error => FlashMessage::error(toast.message),
    };
    message.send();
}

/// Forwards the outcome of a mutation to the next page.
///
/// API failures were toasted by the query client already; errors raised
/// before the call reached the API become a toast here.
pub fn flash_outcome(toasts: &ToastBuffer, result: ServiceResult<()>, action: &str) {
    match result {
        Ok(()) => {}
        Err(ServiceError::Repository(err)) => {
            log::error!("Failed to {action}: {err}");
        }
        Err(ServiceError::Form(message)) => {
            log::warn!("Rejected input while trying to {action}: {message}");
            FlashMessage::error(message).send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("The requested record no longer exists").send();
        }
        Err(err) => {
            log::error!("Failed to {action}: {err}");
            FlashMessage::error(err.to_string()).send();
        }
    }
    toasts.take().into_iter().for_each(flash);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_level_to_str_mappings() {
        assert_eq!(alert_level_to_str(&Level::Error), "danger");
        assert_eq!(alert_level_to_str(&Level::Warning), "warning");
        assert_eq!(alert_level_to_str(&Level::Success), "success");
        assert_eq!(alert_level_to_str(&Level::Info), "info");
        assert_eq!(alert_level_to_str(&Level::Debug), "info");
    }

    #[test]
    fn redirect_target_stays_on_site() {
        let target = |next: &str| RedirectTarget {
            next: Some(next.to_string()),
        };
        assert_eq!(
            target("/members?filter=paid").or("/members"),
            "/members?filter=paid"
        );
        assert_eq!(target("//evil.example").or("/members"), "/members");
        assert_eq!(target("https://evil.example").or("/members"), "/members");
        assert_eq!(target("/\\evil.example/phish").or("/members"), "/members");
        assert_eq!(target("/\t/evil.example").or("/members"), "/members");
        assert_eq!(RedirectTarget::default().or("/expenses"), "/expenses");
    }
}
