use std::time::Duration;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::{FlashMessagesFramework, Level, storage::CookieMessageStore};
use rockgym_dashboard::configure;
use rockgym_dashboard::dto::members::MEMBER_DEFAULTS;
use rockgym_dashboard::query::QueryCache;
use rockgym_dashboard::repository::ApiRepository;
use rockgym_dashboard::routes::alert_level_to_str;
use rockgym_dashboard::routes::members::MemberLiveSessions;
use serde_json::json;
use tera::Tera;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &[u8] = b"a-test-secret-that-is-long-enough-to-sign-session-and-flash-cookies!!";

macro_rules! dashboard_app {
    ($server:expr) => {{
        let key = Key::from(SECRET);
        let store = CookieMessageStore::builder(key.clone()).build();
        let flash = FlashMessagesFramework::builder(store).build();
        let repo = ApiRepository::new(
            format!("{}/rockgymapp/api", $server.uri()),
            Duration::from_secs(5),
        )
        .unwrap();
        test::init_service(
            App::new()
                .wrap(flash)
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), key)
                        .cookie_secure(false)
                        .build(),
                )
                .configure(configure)
                .app_data(web::Data::new(Tera::new("templates/**/*").unwrap()))
                .app_data(web::Data::new(repo))
                .app_data(web::Data::new(QueryCache::default()))
                .app_data(web::Data::new(MemberLiveSessions::new(
                    MEMBER_DEFAULTS,
                    Duration::ZERO,
                ))),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn dashboard_renders_cards_even_when_endpoints_fail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rockgymapp/api/members/paid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [{"id": 1}],
            "total": 42
        })))
        .mount(&server)
        .await;
    let app = dashboard_app!(server);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Paid Members"));
    assert!(body.contains("42"));
    assert!(body.contains("Unpaid Members"));
}

#[actix_web::test]
async fn created_member_returns_to_the_list_it_came_from() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rockgymapp/api/members"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    let app = dashboard_app!(server);

    let req = test::TestRequest::post()
        .uri("/members/create?next=%2Fmembers%3Ffilter%3Dpaid")
        .set_form([
            ("id", "12"),
            ("name", "Asha"),
            ("contact_no", "9876543210"),
            ("doj", "2025-11-01"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/members?filter=paid");
}

#[actix_web::test]
async fn foreign_redirect_targets_are_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rockgymapp/api/partners/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let app = dashboard_app!(server);

    let req = test::TestRequest::post()
        .uri("/partners/4/delete?next=%2F%2Fevil.example")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/partners");
}

#[actix_web::test]
async fn backslash_redirect_targets_are_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rockgymapp/api/holidays/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let app = dashboard_app!(server);

    let req = test::TestRequest::post()
        .uri("/holidays/2/delete?next=%2F%5Cevil.example%2Fphish")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/holidays");
}

#[actix_web::test]
async fn invalid_form_never_reaches_the_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rockgymapp/api/holidays"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    let app = dashboard_app!(server);

    let req = test::TestRequest::post()
        .uri("/holidays/create")
        .set_form([("holiday_month_year", "not-a-month"), ("number_of_holidays", "2")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/holidays");
}

#[actix_web::test]
async fn live_search_renders_the_first_matching_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rockgymapp/api/members"))
        .and(query_param("search", "asha"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"id": 7, "name": "Asha Verma", "contactNo": "9876543210"}],
            "totalElements": 1,
            "totalPages": 1,
            "number": 0,
            "size": 10
        })))
        .expect(1)
        .mount(&server)
        .await;
    let app = dashboard_app!(server);

    let req = test::TestRequest::get()
        .uri("/members/live?page=3&search=asha")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("members-table"));
    assert!(body.contains("Asha Verma"));
    assert!(body.contains("search=asha"));
}

#[actix_web::test]
async fn unknown_member_redirects_back_to_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rockgymapp/api/members/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let app = dashboard_app!(server);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/members/99").to_request()).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/members");
}
