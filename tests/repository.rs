use std::time::Duration;

use rockgym_dashboard::domain::birthday::BirthdayWindow;
use rockgym_dashboard::domain::types::{MemberId, SettingId};
use rockgym_dashboard::listing::SortDirection;
use rockgym_dashboard::pagination::PageRequest;
use rockgym_dashboard::repository::errors::RepositoryError;
use rockgym_dashboard::repository::{
    ApiRepository, ExportFormat, MemberListQuery, MemberReader, MemberWriter, PaymentReader,
    ReportReader, SettingWriter, SortRequest, UploadFile,
};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, ApiRepository) {
    let server = MockServer::start().await;
    let repo = ApiRepository::new(format!("{}/rockgymapp/api", server.uri()), Duration::from_secs(5))
        .unwrap();
    (server, repo)
}

#[tokio::test]
async fn member_list_sends_paging_sort_and_search() {
    let (server, repo) = setup().await;
    Mock::given(method("GET"))
        .and(path("/rockgymapp/api/members"))
        .and(query_param("page", "2"))
        .and(query_param("size", "25"))
        .and(query_param("sortBy", "name"))
        .and(query_param("sortDir", "desc"))
        .and(query_param("isAdmin", "false"))
        .and(query_param("search", "asha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"id": 7, "name": "Asha", "contactNo": "9876543210"}],
            "totalElements": 51,
            "totalPages": 3,
            "number": 2,
            "size": 25
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = MemberListQuery::new(PageRequest::new(2, 25))
        .sort(SortRequest::new("name", SortDirection::Desc))
        .search("  asha ");
    let page = repo.list_members(&query).await.unwrap();

    assert_eq!(page.total_elements, 51);
    assert_eq!(page.current_page, 2);
    assert_eq!(page.items[0].name.as_deref(), Some("Asha"));
}

#[tokio::test]
async fn paid_total_is_never_below_the_list_length() {
    let (server, repo) = setup().await;
    Mock::given(method("GET"))
        .and(path("/rockgymapp/api/members/paid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [{"id": 1}, {"id": 2}],
            "total": null
        })))
        .mount(&server)
        .await;

    let (total, members) = repo.list_paid_members().await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(members.len(), 2);
}

#[tokio::test]
async fn missing_member_is_none() {
    let (server, repo) = setup().await;
    Mock::given(method("GET"))
        .and(path("/rockgymapp/api/members/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let member = repo.get_member(MemberId::new(404).unwrap()).await.unwrap();
    assert!(member.is_none());
}

#[tokio::test]
async fn server_message_is_kept_for_toasts() {
    let (server, repo) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/rockgymapp/api/settings/9/deactivate"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "Setting is already inactive"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = repo
        .deactivate_setting(SettingId::new(9).unwrap())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RepositoryError::Server {
            status: 409,
            message: Some("Setting is already inactive".into())
        }
    );
    assert_eq!(err.user_message(), "Setting is already inactive");
}

#[tokio::test]
async fn delete_uses_the_delete_verb() {
    let (server, repo) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/rockgymapp/api/settings/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    repo.delete_setting(SettingId::new(3).unwrap()).await.unwrap();
}

#[tokio::test]
async fn pending_payments_filter_by_date() {
    let (server, repo) = setup().await;
    Mock::given(method("GET"))
        .and(path("/rockgymapp/api/payments/pending"))
        .and(query_param("date", "2025-11-10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "employeeDetail": {"employeeId": 5, "employeeName": "Ravi"}, "dueDate": "2025-11-10", "amount": 600.0, "isAdmissionFee": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let date = chrono::NaiveDate::from_ymd_opt(2025, 11, 10);
    let pending = repo.list_pending_payments(date).await.unwrap();

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].kind(), "Admission");
    assert_eq!(pending[0].employee_detail.as_ref().map(|m| m.id), Some(5));
}

#[tokio::test]
async fn birthdays_hit_the_window_endpoint() {
    let (server, repo) = setup().await;
    Mock::given(method("GET"))
        .and(path("/rockgymapp/api/birthday/this-week"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 3, "dob": "1990-11-12"}])))
        .expect(1)
        .mount(&server)
        .await;

    let members = repo.list_birthdays(BirthdayWindow::ThisWeek).await.unwrap();
    assert_eq!(members[0].id, 3);
}

#[tokio::test]
async fn export_keeps_the_server_file_name() {
    let (server, repo) = setup().await;
    Mock::given(method("GET"))
        .and(path("/rockgymapp/api/report/export/inactive-members/pdf"))
        .and(query_param("days", "30"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/pdf")
                .insert_header("Content-Disposition", "attachment; filename=\"inactive_30.pdf\"")
                .set_body_bytes(b"%PDF-1.4".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let download = repo.export_inactive_members(30, ExportFormat::Pdf).await.unwrap();

    assert_eq!(download.content_type, "application/pdf");
    assert_eq!(download.file_name.as_deref(), Some("inactive_30.pdf"));
    assert_eq!(download.bytes, b"%PDF-1.4");
}

#[tokio::test]
async fn upload_forwards_the_file_part() {
    let (server, repo) = setup().await;
    Mock::given(method("POST"))
        .and(path("/rockgymapp/api/members/upload"))
        .and(header_exists("content-type"))
        .and(body_string_contains("name=\"file\"; filename=\"members.xlsx\""))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    repo.upload_members(UploadFile {
        file_name: "members.xlsx".into(),
        content_type: None,
        bytes: b"PK".to_vec(),
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn unreachable_api_is_a_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let repo = ApiRepository::new(
        format!("http://127.0.0.1:{port}/rockgymapp/api"),
        Duration::from_secs(1),
    )
    .unwrap();

    let err = repo.list_unpaid_members().await.unwrap_err();
    assert!(matches!(err, RepositoryError::Transport(_)), "{err:?}");
    assert!(!err.user_message().is_empty());
}
