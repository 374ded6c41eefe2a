//! Holiday months and their day counts.

use std::cmp::Ordering;

use crate::domain::holiday::{Holiday, HolidayTotals, NewHoliday};
use crate::domain::types::{HolidayId, MonthYear};
use crate::dto::holidays::{HOLIDAY_DEFAULTS, HolidayRow, HolidaysPageData};
use crate::dto::list::ListView;
use crate::forms::holidays::HolidayForm;
use crate::listing::{SortDirection, url};
use crate::query::{MutationOptions, QueryClient, QueryKey, QueryOptions};
use crate::repository::{HolidayReader, HolidayWriter};
use crate::services::{ServiceResult, contains_ci, paginate_locally};

pub const HOLIDAYS_PATH: &str = "/holidays";

fn month_of(holiday: &Holiday) -> Option<MonthYear> {
    holiday.holiday_month_year.as_deref()?.parse().ok()
}

/// Sorts by calendar month or by day count; unparsable months go last.
pub fn sort_holidays(holidays: &mut [Holiday], column: &str, dir: SortDirection) {
    holidays.sort_by(|a, b| {
        let ordering = match column {
            "days" => a.number_of_holidays.cmp(&b.number_of_holidays),
            _ => match (month_of(a), month_of(b)) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => return Ordering::Less,
                (None, Some(_)) => return Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        };
        match dir {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

pub async fn load_holidays_page<R>(repo: &R, client: QueryClient<'_>, query: &str) -> HolidaysPageData
where
    R: HolidayReader + ?Sized,
{
    let (state, mut extras) = url::decode(query, HOLIDAY_DEFAULTS);
    let editing_id = extras.get("edit").and_then(|raw| raw.parse::<i64>().ok());
    extras.remove("edit");

    let mut holidays = client
        .query(&QueryKey::new("holidays"), QueryOptions::default(), || repo.list_holidays())
        .await
        .data_or_default();
    sort_holidays(&mut holidays, &state.sort_by, state.sort_dir);

    let totals = HolidayTotals::from_holidays(&holidays);
    let editing = editing_id
        .and_then(|id| holidays.iter().find(|holiday| holiday.id == id))
        .cloned()
        .map(HolidayRow::from);
    let page = paginate_locally(holidays, &state, |holiday: &Holiday, term: &str| {
        contains_ci(holiday.holiday_month_year.as_deref(), term)
            || holiday.month_label().to_lowercase().contains(&term.to_lowercase())
    });

    HolidaysPageData {
        list: ListView::build(HOLIDAYS_PATH, &state, &extras, page.map(HolidayRow::from)),
        totals,
        editing,
    }
}

fn holiday_keys<'a>() -> MutationOptions<'a, ()> {
    MutationOptions::new().invalidate(QueryKey::new("holidays"))
}

pub async fn create_holiday<R>(repo: &R, client: QueryClient<'_>, form: HolidayForm) -> ServiceResult<()>
where
    R: HolidayWriter + ?Sized,
{
    let payload = NewHoliday::try_from(form)?;
    client
        .mutate(
            |holiday: NewHoliday| async move { repo.create_holiday(&holiday).await },
            payload,
            holiday_keys().success("Holiday created successfully!"),
        )
        .await?;
    Ok(())
}

pub async fn update_holiday<R>(
    repo: &R,
    client: QueryClient<'_>,
    holiday_id: i64,
    form: HolidayForm,
) -> ServiceResult<()>
where
    R: HolidayWriter + ?Sized,
{
    let id = HolidayId::new(holiday_id)?;
    let payload = NewHoliday::try_from(form)?;
    client
        .mutate(
            |holiday: NewHoliday| async move { repo.update_holiday(id, &holiday).await },
            payload,
            holiday_keys().success("Holiday updated successfully!"),
        )
        .await?;
    Ok(())
}

pub async fn delete_holiday<R>(repo: &R, client: QueryClient<'_>, holiday_id: i64) -> ServiceResult<()>
where
    R: HolidayWriter + ?Sized,
{
    let id = HolidayId::new(holiday_id)?;
    client
        .mutate(
            |id: HolidayId| async move { repo.delete_holiday(id).await },
            id,
            holiday_keys().success("Holiday deleted successfully!"),
        )
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holiday(id: i64, month: &str, days: u32) -> Holiday {
        Holiday {
            id,
            holiday_month_year: Some(month.to_string()),
            number_of_holidays: days,
        }
    }

    #[test]
    fn months_sort_chronologically_not_lexically() {
        let mut holidays = vec![
            holiday(1, "02-2026", 1),
            holiday(2, "11-2025", 3),
            holiday(3, "garbage", 9),
        ];
        sort_holidays(&mut holidays, "month", SortDirection::Asc);
        let ids: Vec<_> = holidays.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        sort_holidays(&mut holidays, "days", SortDirection::Desc);
        assert_eq!(holidays[0].id, 3);
    }
}
