//! Attendance, punch, inactivity and defaulter reports with CSV export.

use chrono::NaiveDate;

use crate::domain::dates::parse_date;
use crate::domain::types::MonthYear;
use crate::dto::list::ListView;
use crate::dto::reports::{
    INACTIVE_DAY_OPTIONS, REPORT_DEFAULTS, ReportFilter, ReportParams, ReportRow, ReportsPageData,
};
use crate::listing::{ExtraParams, ListFilter, PageState, url};
use crate::pagination::{PageRequest, PageResult};
use crate::query::{QueryClient, QueryKey, QueryOptions};
use crate::repository::errors::RepositoryResult;
use crate::repository::{Download, ExportFormat, PaymentReader, ReportReader};
use crate::services::{ServiceError, ServiceResult, load_list, paginate_locally};

pub const REPORTS_PATH: &str = "/reports";
pub const CSV_EXPORT_PATH: &str = "/reports/export.csv";
pub const INACTIVE_EXPORT_PATH: &str = "/reports/inactive/export";

const DEFAULT_INACTIVE_DAYS: u32 = 30;
/// Page size used to walk the whole defaulter list for an export.
const EXPORT_PAGE_SIZE: u32 = 100;

/// Resolved report inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportInputs {
    pub month: MonthYear,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: u32,
}

/// Reads `month`, `from`, `to` and `days`, defaulting to the current month,
/// today and 30 days. A reversed range is swapped.
pub fn report_inputs(extras: &ExtraParams, today: NaiveDate) -> ReportInputs {
    let month = extras
        .get("month")
        .and_then(|raw| MonthYear::from_input(raw).ok())
        .unwrap_or_else(|| MonthYear::containing(today));
    let from = extras.get("from").and_then(parse_date).unwrap_or(today);
    let to = extras.get("to").and_then(parse_date).unwrap_or(today);
    let (from, to) = if from > to { (to, from) } else { (from, to) };
    let days = extras
        .get("days")
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|days| *days > 0)
        .unwrap_or(DEFAULT_INACTIVE_DAYS);
    ReportInputs {
        month,
        from,
        to,
        days,
    }
}

fn input_key(report: ReportFilter, inputs: &ReportInputs) -> String {
    match report {
        ReportFilter::Attendance => inputs.month.to_string(),
        ReportFilter::LastPunch | ReportFilter::NoPunch => format!("{}..{}", inputs.from, inputs.to),
        ReportFilter::Inactive => inputs.days.to_string(),
        ReportFilter::Defaulters => String::new(),
    }
}

/// Whole (unpaged) rows of one of the list reports.
async fn fetch_rows<R>(
    repo: &R,
    client: QueryClient<'_>,
    report: ReportFilter,
    inputs: ReportInputs,
) -> RepositoryResult<Vec<ReportRow>>
where
    R: ReportReader + ?Sized,
{
    let key = QueryKey::new("reports")
        .with(report.as_str())
        .with(input_key(report, &inputs));
    let options = QueryOptions::default();
    let rows = match report {
        ReportFilter::Attendance => client
            .query(&key, options, || repo.attendance_report(inputs.month))
            .await
            .into_result()?
            .into_iter()
            .map(ReportRow::from)
            .collect(),
        ReportFilter::LastPunch => client
            .query(&key, options, || repo.last_punch_report(inputs.from, inputs.to))
            .await
            .into_result()?
            .into_iter()
            .map(ReportRow::from)
            .collect(),
        ReportFilter::NoPunch => client
            .query(&key, options, || repo.members_without_punch(inputs.from, inputs.to))
            .await
            .into_result()?
            .into_iter()
            .map(ReportRow::from)
            .collect(),
        ReportFilter::Inactive => client
            .query(&key, options, || repo.inactive_report(inputs.days))
            .await
            .into_result()?
            .into_iter()
            .map(ReportRow::from)
            .collect(),
        ReportFilter::Defaulters => Vec::new(),
    };
    Ok(rows)
}

async fn fetch_defaulters<R>(
    repo: &R,
    client: QueryClient<'_>,
    page: PageRequest,
) -> RepositoryResult<PageResult<ReportRow>>
where
    R: PaymentReader + ?Sized,
{
    let key = QueryKey::new("reports")
        .with(ReportFilter::Defaulters.as_str())
        .with(page.page)
        .with(page.size);
    let defaulters = client
        .query(&key, QueryOptions::default(), || repo.list_defaulters(page))
        .await
        .into_result()?;
    Ok(defaulters.map(ReportRow::from))
}

async fn fetch_report_page<R>(
    repo: &R,
    client: QueryClient<'_>,
    state: &PageState<ReportFilter>,
    inputs: ReportInputs,
) -> Option<PageResult<ReportRow>>
where
    R: ReportReader + PaymentReader + ?Sized,
{
    if state.filter.server_paged() {
        return fetch_defaulters(repo, client, state.page_request()).await.ok();
    }
    let rows = fetch_rows(repo, client, state.filter, inputs).await.ok()?;
    Some(paginate_locally(rows, state, ReportRow::matches))
}

fn export_href(path: &str, pairs: &[(&str, String)]) -> String {
    match serde_html_form::to_string(pairs) {
        Ok(query) if !query.is_empty() => format!("{path}?{query}"),
        _ => path.to_string(),
    }
}

pub async fn load_reports_page<R>(
    repo: &R,
    client: QueryClient<'_>,
    query: &str,
    today: NaiveDate,
) -> ReportsPageData
where
    R: ReportReader + PaymentReader + ?Sized,
{
    let (state, extras) = url::decode(query, REPORT_DEFAULTS);
    let inputs = report_inputs(&extras, today);
    let report = state.filter;

    let page = load_list(&state, |state| async move {
        fetch_report_page(repo, client, &state, inputs).await
    })
    .await;

    let inactive_export = |format: ExportFormat| {
        export_href(
            INACTIVE_EXPORT_PATH,
            &[("days", inputs.days.to_string()), ("format", format.as_str().to_string())],
        )
    };

    ReportsPageData {
        report,
        columns: report.columns(),
        list: ListView::build(REPORTS_PATH, &state, &extras, page),
        params: ReportParams {
            month: format!("{:04}-{:02}", inputs.month.year(), inputs.month.month()),
            month_label: inputs.month.label(),
            from: inputs.from.to_string(),
            to: inputs.to.to_string(),
            days: inputs.days,
        },
        day_options: INACTIVE_DAY_OPTIONS,
        csv_href: url::href(CSV_EXPORT_PATH, &state, &extras),
        excel_href: inactive_export(ExportFormat::Excel),
        pdf_href: inactive_export(ExportFormat::Pdf),
    }
}

/// CSV rendition of a report, named after the report and its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub fn write_csv(columns: &[&str], rows: &[ReportRow]) -> ServiceResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(columns)
        .map_err(|err| ServiceError::Export(err.to_string()))?;
    for row in rows {
        writer
            .write_record(&row.cells)
            .map_err(|err| ServiceError::Export(err.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|err| ServiceError::Export(err.to_string()))
}

/// Exports every row of the report described by `query`, ignoring paging but
/// keeping the search filter.
pub async fn export_report_csv<R>(
    repo: &R,
    client: QueryClient<'_>,
    query: &str,
    today: NaiveDate,
) -> ServiceResult<CsvExport>
where
    R: ReportReader + PaymentReader + ?Sized,
{
    let (state, extras) = url::decode(query, REPORT_DEFAULTS);
    let inputs = report_inputs(&extras, today);
    let report = state.filter;

    let mut rows = if report.server_paged() {
        let mut rows = Vec::new();
        let mut request = PageRequest::first(EXPORT_PAGE_SIZE);
        loop {
            let page = fetch_defaulters(repo, client, request).await?;
            let last = page.items.is_empty() || request.page + 1 >= page.total_pages;
            rows.extend(page.items);
            if last {
                break;
            }
            request = PageRequest::new(request.page + 1, EXPORT_PAGE_SIZE);
        }
        rows
    } else {
        fetch_rows(repo, client, report, inputs).await?
    };
    if let Some(term) = state.search() {
        rows.retain(|row| row.matches(term));
    }

    let suffix = input_key(report, &inputs).replace("..", "_to_");
    let file_name = if suffix.is_empty() {
        format!("{}-report.csv", report.as_str())
    } else {
        format!("{}-report-{suffix}.csv", report.as_str())
    };
    Ok(CsvExport {
        file_name,
        bytes: write_csv(report.columns(), &rows)?,
    })
}

/// Streams the API's Excel or PDF export of inactive members.
pub async fn export_inactive_members<R>(
    repo: &R,
    client: QueryClient<'_>,
    days: Option<u32>,
    format: Option<&str>,
) -> ServiceResult<Download>
where
    R: ReportReader + ?Sized,
{
    let format = format
        .and_then(ExportFormat::parse)
        .ok_or_else(|| ServiceError::Form("Unsupported export format".to_string()))?;
    let days = days.filter(|days| *days > 0).unwrap_or(DEFAULT_INACTIVE_DAYS);
    let key = QueryKey::new("reports").with("export").with(days).with(format.as_str());
    let download = client
        .query(&key, QueryOptions::default().uncached(), || {
            repo.export_inactive_members(days, format)
        })
        .await
        .into_result()?;
    Ok(download)
}


#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::attendance::InactiveMember;
    use crate::domain::report::Defaulter;
    use crate::query::{QueryCache, ToastBuffer};
    use crate::repository::mock::MockRepository;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 14).unwrap()
    }

    fn inactive(id: i64, name: &str) -> InactiveMember {
        InactiveMember {
            employee_id: id,
            employee_name: Some(name.to_string()),
            inactive_days_since_last_punch: Some(40),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn inactive_report_is_searched_and_paged_locally() {
        let mut repo = MockRepository::new();
        repo.expect_inactive_report()
            .with(eq(60))
            .times(1)
            .returning(|_| Ok(vec![inactive(1, "Asha"), inactive(2, "Ravi"), inactive(3, "Ravindra")]));
        let cache = QueryCache::default();
        let toasts = ToastBuffer::new();
        let client = QueryClient::new(&cache, &toasts);

        let data = load_reports_page(&repo, client, "filter=inactive&days=60&search=rav", today()).await;

        assert_eq!(data.list.total_elements, 2);
        assert_eq!(data.columns.len(), data.list.items[0].cells.len());
        assert_eq!(data.excel_href, "/reports/inactive/export?days=60&format=excel");
        assert_eq!(data.csv_href, "/reports/export.csv?filter=inactive&days=60&search=rav");
    }

    #[tokio::test]
    async fn defaulter_export_walks_every_page() {
        let mut repo = MockRepository::new();
        repo.expect_list_defaulters().times(2).returning(|page| {
            let items = if page.page == 0 {
                (1..=100)
                    .map(|id| Defaulter {
                        id,
                        ..Default::default()
                    })
                    .collect()
            } else {
                vec![Defaulter {
                    id: 101,
                    ..Default::default()
                }]
            };
            Ok(PageResult::new(items, 101, 2, page.page, page.size))
        });
        let cache = QueryCache::default();
        let toasts = ToastBuffer::new();
        let client = QueryClient::new(&cache, &toasts);

        let export = export_report_csv(&repo, client, "filter=defaulters&page=3", today())
            .await
            .unwrap();

        assert_eq!(export.file_name, "defaulters-report.csv");
        let text = String::from_utf8(export.bytes).unwrap();
        assert_eq!(text.lines().count(), 102);
    }

    #[tokio::test]
    async fn unknown_export_format_is_rejected_without_a_call() {
        let repo = MockRepository::new();
        let cache = QueryCache::default();
        let toasts = ToastBuffer::new();
        let client = QueryClient::new(&cache, &toasts);

        let result = export_inactive_members(&repo, client, Some(30), Some("docx")).await;
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
