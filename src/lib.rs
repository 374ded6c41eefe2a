//! Server-rendered administration dashboard for the gym REST API.
//!
//! With only the `data` feature the crate exposes the network-free layer:
//! domain models, template DTOs, pagination and the list state machine.
//! The `server` feature adds the HTTP repository, the query client,
//! services, routes and [`run`].

pub mod domain;
pub mod dto;
pub mod listing;
pub mod pagination;

#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod query;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use server::{configure, run};

#[cfg(feature = "server")]
mod server {
    use actix_files::Files;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::dto::members::MEMBER_DEFAULTS;
    use crate::models::config::ServerConfig;
    use crate::query::QueryCache;
    use crate::repository::api::ApiRepository;
    use crate::routes::attendance::{show_attendance, upload_punches};
    use crate::routes::birthdays::show_birthdays;
    use crate::routes::dashboard::show_dashboard;
    use crate::routes::expenses::{
        create_expense, delete_expense, show_expenses, update_expense, upload_expenses,
    };
    use crate::routes::holidays::{create_holiday, delete_holiday, show_holidays, update_holiday};
    use crate::routes::members::{
        MemberLiveSessions, create_member, live_members, show_member, show_member_punches,
        show_members, update_member, upload_access_file, upload_members,
    };
    use crate::routes::partners::{create_partner, delete_partner, show_partners, update_partner};
    use crate::routes::payments::{record_payment, show_payments};
    use crate::routes::reports::{export_inactive_members, export_report_csv, show_reports};
    use crate::routes::settings::{
        create_setting, deactivate_setting, delete_setting, show_settings, update_setting,
    };
    use crate::routes::whatsapp::{send_message, show_whatsapp};

    /// Registers every dashboard route. `/members/live` precedes
    /// `/members/{member_id}` so that it is not taken for an id.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.service(show_dashboard)
            .service(show_members)
            .service(live_members)
            .service(create_member)
            .service(upload_members)
            .service(upload_access_file)
            .service(show_member)
            .service(show_member_punches)
            .service(update_member)
            .service(show_payments)
            .service(record_payment)
            .service(show_expenses)
            .service(create_expense)
            .service(upload_expenses)
            .service(update_expense)
            .service(delete_expense)
            .service(show_attendance)
            .service(upload_punches)
            .service(show_reports)
            .service(export_report_csv)
            .service(export_inactive_members)
            .service(show_holidays)
            .service(create_holiday)
            .service(update_holiday)
            .service(delete_holiday)
            .service(show_partners)
            .service(create_partner)
            .service(update_partner)
            .service(delete_partner)
            .service(show_settings)
            .service(create_setting)
            .service(update_setting)
            .service(deactivate_setting)
            .service(delete_setting)
            .service(show_birthdays)
            .service(show_whatsapp)
            .service(send_message);
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let repo = ApiRepository::new(&server_config.api_base_url, server_config.api_timeout())
            .map_err(|e| std::io::Error::other(format!("Failed to build the API client: {e}")))?;
        log::info!("Using the gym API at {}", repo.base_url());

        // Shared by every worker so that invalidation reaches all of them.
        let cache = web::Data::new(QueryCache::new(server_config.query_cache_ttl()));
        let live = web::Data::new(MemberLiveSessions::new(
            MEMBER_DEFAULTS,
            server_config.search_debounce(),
        ));

        // Keys and stores for sessions and flash messages.
        let secret_key = Key::from(server_config.secret.as_bytes());

        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);

        HttpServer::new(move || {
            App::new()
                .wrap(message_framework.clone())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                        .cookie_secure(false) // set to true in prod
                        .cookie_domain(Some(server_config.domain.clone()))
                        .build(),
                )
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .configure(configure)
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(repo.clone()))
                .app_data(cache.clone())
                .app_data(live.clone())
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
