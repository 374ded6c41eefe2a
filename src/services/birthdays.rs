//! Birthdays today, this week and this month.

use chrono::NaiveDate;

use crate::domain::birthday::BirthdayWindow;
use crate::domain::member::Member;
use crate::dto::birthdays::{BIRTHDAY_DEFAULTS, BirthdayRow, BirthdaysPageData, WindowCount};
use crate::dto::list::ListView;
use crate::listing::{ListFilter, SortDirection, url};
use crate::pagination::PageResult;
use crate::query::{QueryClient, QueryKey, QueryOptions, QueryState};
use crate::repository::ReportReader;
use crate::services::paginate_locally;

pub const BIRTHDAYS_PATH: &str = "/birthdays";

async fn fetch_window<R>(repo: &R, client: QueryClient<'_>, window: BirthdayWindow) -> QueryState<Vec<Member>>
where
    R: ReportReader + ?Sized,
{
    client
        .query(
            &QueryKey::new("birthdays").with(window.as_str()),
            QueryOptions::default(),
            || repo.list_birthdays(window),
        )
        .await
}

fn sort_rows(rows: &mut [BirthdayRow], column: &str, dir: SortDirection) {
    rows.sort_by(|a, b| {
        let ordering = match column {
            "name" => a
                .member
                .name
                .as_deref()
                .map(str::to_lowercase)
                .cmp(&b.member.name.as_deref().map(str::to_lowercase)),
            _ => a
                .days_until
                .unwrap_or(i64::MAX)
                .cmp(&b.days_until.unwrap_or(i64::MAX)),
        };
        match dir {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// All three windows load concurrently; the tab counts come from them and
/// the active window fills the table.
pub async fn load_birthdays_page<R>(
    repo: &R,
    client: QueryClient<'_>,
    query: &str,
    today: NaiveDate,
) -> BirthdaysPageData
where
    R: ReportReader + ?Sized,
{
    let (state, extras) = url::decode(query, BIRTHDAY_DEFAULTS);

    let (day, week, month) = tokio::join!(
        fetch_window(repo, client, BirthdayWindow::Today),
        fetch_window(repo, client, BirthdayWindow::ThisWeek),
        fetch_window(repo, client, BirthdayWindow::ThisMonth),
    );
    let mut loaded = [
        (BirthdayWindow::Today, day.data),
        (BirthdayWindow::ThisWeek, week.data),
        (BirthdayWindow::ThisMonth, month.data),
    ];

    let counts = loaded
        .iter()
        .map(|(window, members)| WindowCount {
            window: window.as_str(),
            label: ListFilter::label(*window),
            count: members.as_ref().map(Vec::len),
        })
        .collect();

    let members = loaded
        .iter_mut()
        .find(|(window, _)| *window == state.filter)
        .and_then(|(_, members)| members.take());
    let page = match members {
        Some(members) => {
            let mut rows: Vec<BirthdayRow> = members
                .into_iter()
                .map(|member| BirthdayRow::new(member, today))
                .collect();
            sort_rows(&mut rows, &state.sort_by, state.sort_dir);
            paginate_locally(rows, &state, |row: &BirthdayRow, term: &str| row.member.matches(term))
        }
        None => PageResult::empty(state.size),
    };

    BirthdaysPageData {
        list: ListView::build(BIRTHDAYS_PATH, &state, &extras, page),
        counts,
    }
}
