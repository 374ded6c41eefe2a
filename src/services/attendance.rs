//! Punch search, inactive and active member tabs, and punch uploads.

use crate::domain::attendance::{ActivePeriod, InactivePeriod};
use crate::domain::dates::parse_date;
use crate::domain::types::MonthYear;
use crate::dto::attendance::{
    ATTENDANCE_DEFAULTS, AttendanceFilter, AttendancePageData, IdleRow, PeriodLink, PunchRow,
    PunchSearchForm,
};
use crate::dto::list::ListView;
use crate::forms::upload::UploadSpreadsheetForm;
use crate::listing::{ExtraParams, PageState, url};
use crate::query::{MutationOptions, QueryClient, QueryKey, QueryOptions};
use crate::repository::{AttendanceReader, AttendanceWriter, PunchCriteria, PunchSearchQuery, UploadFile};
use crate::services::{ServiceResult, list_key, load_list};

pub const ATTENDANCE_PATH: &str = "/attendance";

const NO_CRITERIA: &str = "Please select at least one filter";

/// Reads the punch search inputs. Month-year wins over year, which wins over
/// the id/name/date combination; `None` when every input is blank or invalid.
pub fn punch_criteria(extras: &ExtraParams) -> Option<PunchCriteria> {
    if let Some(month) = extras
        .get("month_year")
        .and_then(|raw| MonthYear::from_input(raw).ok())
    {
        return Some(PunchCriteria::MonthYear(month));
    }
    if let Some(year) = extras
        .get("year")
        .and_then(|raw| raw.trim().parse::<i32>().ok())
        .filter(|year| (1900..=9999).contains(year))
    {
        return Some(PunchCriteria::Year(year));
    }

    let employee_id = extras
        .get("employee_id")
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|id| *id > 0);
    let employee_name = extras.get("employee_name").map(str::to_string);
    let date = extras.get("date").and_then(parse_date);
    if employee_id.is_none() && employee_name.is_none() && date.is_none() {
        return None;
    }
    Some(PunchCriteria::Filters {
        employee_id,
        employee_name,
        date,
    })
}

/// `days` parameter of the inactive tab, 7 when absent or unknown.
pub fn inactive_period(extras: &ExtraParams) -> InactivePeriod {
    extras
        .get("days")
        .and_then(|raw| raw.parse::<u32>().ok())
        .and_then(|days| InactivePeriod::ALL.into_iter().find(|p| p.days() == days))
        .unwrap_or(InactivePeriod::Days7)
}

/// `period` parameter of the active tab, today when absent or unknown.
pub fn active_period(extras: &ExtraParams) -> ActivePeriod {
    extras
        .get("period")
        .and_then(|raw| ActivePeriod::ALL.into_iter().find(|p| p.as_str() == raw))
        .unwrap_or(ActivePeriod::Today)
}

fn criteria_key(criteria: &PunchCriteria) -> String {
    match criteria {
        PunchCriteria::MonthYear(month) => format!("month:{month}"),
        PunchCriteria::Year(year) => format!("year:{year}"),
        PunchCriteria::Filters {
            employee_id,
            employee_name,
            date,
        } => format!(
            "id:{}|name:{}|date:{}",
            employee_id.map(|id| id.to_string()).unwrap_or_default(),
            employee_name.as_deref().unwrap_or_default(),
            date.map(|date| date.to_string()).unwrap_or_default(),
        ),
    }
}

/// Period selector links; choosing a period goes back to the first page.
fn period_links(
    state: &PageState<AttendanceFilter>,
    extras: &ExtraParams,
    param: &str,
    choices: impl Iterator<Item = (String, String, bool)>,
) -> Vec<PeriodLink> {
    let mut first_page = state.clone();
    first_page.page = 0;
    choices
        .map(|(value, label, active)| {
            let mut extras = extras.clone();
            extras.set(param, value);
            PeriodLink {
                label,
                href: url::href(ATTENDANCE_PATH, &first_page, &extras),
                active,
            }
        })
        .collect()
}

pub async fn load_attendance_page<R>(repo: &R, client: QueryClient<'_>, query: &str) -> AttendancePageData
where
    R: AttendanceReader + ?Sized,
{
    let (state, extras) = url::decode(query, ATTENDANCE_DEFAULTS);
    let inactive = inactive_period(&extras);
    let active = active_period(&extras);
    let search = PunchSearchForm {
        employee_id: extras.get("employee_id").unwrap_or_default().to_string(),
        employee_name: extras.get("employee_name").unwrap_or_default().to_string(),
        date: extras.get("date").unwrap_or_default().to_string(),
        month_year: extras.get("month_year").unwrap_or_default().to_string(),
        year: extras.get("year").unwrap_or_default().to_string(),
    };

    let mut data = AttendancePageData {
        tab: state.filter,
        search,
        hint: None,
        punches: None,
        idle: None,
        periods: Vec::new(),
        inactive_period: inactive,
        active_period: active,
    };

    match state.filter {
        AttendanceFilter::Search => {
            let Some(criteria) = punch_criteria(&extras) else {
                data.hint = Some(NO_CRITERIA);
                data.punches = Some(ListView::build(ATTENDANCE_PATH, &state, &extras, Default::default()));
                return data;
            };
            let page = load_list(&state, |state| async move {
                let request = PunchSearchQuery {
                    criteria,
                    page: state.page_request(),
                };
                let key = list_key("attendance", &state).with(criteria_key(&request.criteria));
                client
                    .query(&key, QueryOptions::default(), || repo.search_punches(&request))
                    .await
                    .into_result()
                    .ok()
            })
            .await;
            data.punches = Some(ListView::build(ATTENDANCE_PATH, &state, &extras, page.map(PunchRow::from)));
        }
        AttendanceFilter::Inactive => {
            let page = load_list(&state, |state| async move {
                let key = list_key("attendance", &state).with(inactive.days());
                client
                    .query(&key, QueryOptions::default(), || {
                        repo.list_inactive_members(inactive, state.page_request())
                    })
                    .await
                    .into_result()
                    .ok()
            })
            .await;
            data.periods = period_links(
                &state,
                &extras,
                "days",
                InactivePeriod::ALL.into_iter().map(|period| {
                    (
                        period.days().to_string(),
                        format!("{} Days", period.days()),
                        period == inactive,
                    )
                }),
            );
            data.idle = Some(ListView::build(ATTENDANCE_PATH, &state, &extras, page.map(IdleRow::inactive)));
        }
        AttendanceFilter::Active => {
            let page = load_list(&state, |state| async move {
                let key = list_key("attendance", &state).with(active.as_str());
                client
                    .query(&key, QueryOptions::default(), || {
                        repo.list_active_members(active, state.page_request())
                    })
                    .await
                    .into_result()
                    .ok()
            })
            .await;
            data.periods = period_links(
                &state,
                &extras,
                "period",
                ActivePeriod::ALL.into_iter().map(|period| {
                    (
                        period.as_str().to_string(),
                        period.label().to_string(),
                        period == active,
                    )
                }),
            );
            data.idle = Some(ListView::build(ATTENDANCE_PATH, &state, &extras, page.map(IdleRow::active)));
        }
    }
    data
}

pub async fn upload_punches<R>(
    repo: &R,
    client: QueryClient<'_>,
    form: UploadSpreadsheetForm,
) -> ServiceResult<()>
where
    R: AttendanceWriter + ?Sized,
{
    let file = UploadFile::try_from(form)?;
    upload_punch_file(repo, client, file).await
}

pub async fn upload_punch_file<R>(repo: &R, client: QueryClient<'_>, file: UploadFile) -> ServiceResult<()>
where
    R: AttendanceWriter + ?Sized,
{
    client
        .mutate(
            |file: UploadFile| async move { repo.upload_punches(file).await },
            file,
            MutationOptions::new()
                .success("Punch data uploaded successfully!")
                .invalidate(QueryKey::new("attendance"))
                .invalidate(QueryKey::new("reports"))
                .invalidate(QueryKey::new("members"))
                .invalidate(QueryKey::new("dashboard")),
        )
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn extras(query: &str) -> ExtraParams {
        url::decode(query, ATTENDANCE_DEFAULTS).1
    }

    #[test]
    fn month_year_takes_precedence() {
        assert_eq!(
            punch_criteria(&extras("month_year=2025-11&year=2024&employee_id=3")),
            Some(PunchCriteria::MonthYear(MonthYear::new(11, 2025).unwrap()))
        );
        assert_eq!(
            punch_criteria(&extras("year=2024&employee_id=3")),
            Some(PunchCriteria::Year(2024))
        );
    }

    #[test]
    fn filters_combine_id_name_and_date() {
        assert_eq!(
            punch_criteria(&extras("employee_id=3&employee_name=Ravi&date=2025-11-02")),
            Some(PunchCriteria::Filters {
                employee_id: Some(3),
                employee_name: Some("Ravi".into()),
                date: NaiveDate::from_ymd_opt(2025, 11, 2),
            })
        );
        assert_eq!(punch_criteria(&extras("employee_id=abc&year=99")), None);
    }

    #[test]
    fn periods_fall_back_to_the_shortest_window() {
        assert_eq!(inactive_period(&extras("days=30")), InactivePeriod::Days30);
        assert_eq!(inactive_period(&extras("days=45")), InactivePeriod::Days7);
        assert_eq!(active_period(&extras("period=this-month")), ActivePeriod::ThisMonth);
        assert_eq!(active_period(&extras("period=yesterday")), ActivePeriod::Today);
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::attendance::InactiveMember;
    use crate::pagination::{PageRequest, PageResult};
    use crate::query::{QueryCache, Toast, ToastBuffer};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    #[tokio::test]
    async fn search_without_criteria_skips_the_api() {
        let repo = MockRepository::new();
        let cache = QueryCache::default();
        let toasts = ToastBuffer::new();
        let client = QueryClient::new(&cache, &toasts);

        let data = load_attendance_page(&repo, client, "").await;

        assert_eq!(data.hint, Some(NO_CRITERIA));
        assert!(data.punches.is_some_and(|list| list.items.is_empty()));
    }

    #[tokio::test]
    async fn inactive_tab_requests_the_chosen_window() {
        let mut repo = MockRepository::new();
        repo.expect_list_inactive_members()
            .with(eq(InactivePeriod::Days30), eq(PageRequest::new(1, 10)))
            .times(1)
            .returning(|_, page| {
                Ok(PageResult::new(
                    vec![InactiveMember {
                        employee_id: 4,
                        inactive_days_since_last_punch: Some(41),
                        ..Default::default()
                    }],
                    11,
                    2,
                    page.page,
                    page.size,
                ))
            });
        let cache = QueryCache::default();
        let toasts = ToastBuffer::new();
        let client = QueryClient::new(&cache, &toasts);

        let data = load_attendance_page(&repo, client, "filter=inactive&days=30&page=1").await;

        let idle = data.idle.unwrap();
        assert_eq!(idle.items[0].last_punch, "Never");
        assert_eq!(idle.items[0].days_idle, 41);
        let chosen: Vec<_> = data.periods.iter().filter(|p| p.active).collect();
        assert_eq!(chosen.len(), 1);
        assert_eq!(chosen[0].href, "/attendance?filter=inactive&days=30");
    }

    #[tokio::test]
    async fn upload_failure_shows_the_server_message() {
        let mut repo = MockRepository::new();
        repo.expect_upload_punches().times(1).returning(|_| {
            Err(RepositoryError::Server {
                status: 400,
                message: Some("Invalid file format".into()),
            })
        });
        let cache = QueryCache::default();
        let toasts = ToastBuffer::new();
        let client = QueryClient::new(&cache, &toasts);
        let file = UploadFile {
            file_name: "punches.xlsx".into(),
            content_type: None,
            bytes: vec![1, 2, 3],
        };

        assert!(upload_punch_file(&repo, client, file).await.is_err());
        assert_eq!(toasts.take(), vec![Toast::error("Invalid file format")]);
    }
}
