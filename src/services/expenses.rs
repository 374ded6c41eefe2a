//! Expenses by year and month, with create, edit, delete and upload.

use chrono::{Datelike, NaiveDate};

use crate::domain::expense::NewExpense;
use crate::domain::types::ExpenseId;
use crate::dto::expenses::{EXPENSE_DEFAULTS, ExpenseRow, ExpensesPageData};
use crate::dto::list::ListView;
use crate::forms::expenses::ExpenseForm;
use crate::forms::upload::UploadSpreadsheetForm;
use crate::listing::{ExtraParams, url};
use crate::query::{MutationOptions, QueryClient, QueryKey, QueryOptions};
use crate::repository::{ExpenseListQuery, ExpenseReader, ExpenseWriter, UploadFile};
use crate::services::{ServiceResult, list_key, load_list};

pub const EXPENSES_PATH: &str = "/expenses";

/// Period filter of the expenses list, read from `year` and `month`.
///
/// Both default to the current month; `month=all` selects the whole year.
pub fn expense_period(extras: &mut ExtraParams, today: NaiveDate) -> (i32, Option<u32>) {
    let year = extras
        .get("year")
        .and_then(|raw| raw.parse::<i32>().ok())
        .filter(|year| (1900..=9999).contains(year))
        .unwrap_or(today.year());
    let month = match extras.get("month") {
        Some("all") => None,
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|month| (1..=12).contains(month))
            .or(Some(today.month())),
        None => Some(today.month()),
    };

    extras.set_unless_default("year", &year.to_string(), &today.year().to_string());
    match month {
        None => extras.set("month", "all"),
        Some(month) => extras.set_unless_default("month", &month.to_string(), &today.month().to_string()),
    }
    (year, month)
}

pub async fn load_expenses_page<R>(
    repo: &R,
    client: QueryClient<'_>,
    query: &str,
    today: NaiveDate,
) -> ExpensesPageData
where
    R: ExpenseReader + ?Sized,
{
    let (state, mut extras) = url::decode(query, EXPENSE_DEFAULTS);
    let (year, month) = expense_period(&mut extras, today);
    let editing_id = extras
        .get("edit")
        .and_then(|raw| raw.parse::<i64>().ok())
        .and_then(|id| ExpenseId::new(id).ok());

    let page = load_list(&state, |state| async move {
        let request = ExpenseListQuery {
            page: state.page_request(),
            year: Some(year),
            month,
        };
        let key = list_key("expenses", &state)
            .with(year)
            .with(month.map_or_else(|| "all".to_string(), |m| m.to_string()));
        client
            .query(&key, QueryOptions::default(), || repo.list_expenses(&request))
            .await
            .into_result()
            .ok()
    })
    .await;

    let editing = match editing_id {
        Some(id) => client
            .query(
                &QueryKey::new("expenses").with("detail").with(id),
                QueryOptions::default(),
                || repo.get_expense(id),
            )
            .await
            .data
            .flatten(),
        None => None,
    };
    extras.remove("edit");

    ExpensesPageData {
        list: ListView::build(EXPENSES_PATH, &state, &extras, page.map(ExpenseRow::from)),
        year,
        month,
        years: (today.year() - 2..=today.year() + 1).collect(),
        months: ExpensesPageData::month_options(month),
        editing,
    }
}

fn expense_keys<'a>() -> MutationOptions<'a, ()> {
    MutationOptions::new()
        .invalidate(QueryKey::new("expenses"))
        .invalidate(QueryKey::new("dashboard"))
}

pub async fn create_expense<R>(repo: &R, client: QueryClient<'_>, form: ExpenseForm) -> ServiceResult<()>
where
    R: ExpenseWriter + ?Sized,
{
    let payload = NewExpense::try_from(form)?;
    client
        .mutate(
            |expense: NewExpense| async move { repo.create_expense(&expense).await },
            payload,
            expense_keys().success("Expense created successfully!"),
        )
        .await?;
    Ok(())
}

pub async fn update_expense<R>(
    repo: &R,
    client: QueryClient<'_>,
    expense_id: i64,
    form: ExpenseForm,
) -> ServiceResult<()>
where
    R: ExpenseWriter + ?Sized,
{
    let id = ExpenseId::new(expense_id)?;
    let payload = NewExpense::try_from(form)?;
    client
        .mutate(
            |expense: NewExpense| async move { repo.update_expense(id, &expense).await },
            payload,
            expense_keys().success("Expense updated successfully!"),
        )
        .await?;
    Ok(())
}

pub async fn delete_expense<R>(repo: &R, client: QueryClient<'_>, expense_id: i64) -> ServiceResult<()>
where
    R: ExpenseWriter + ?Sized,
{
    let id = ExpenseId::new(expense_id)?;
    client
        .mutate(
            |id: ExpenseId| async move { repo.delete_expense(id).await },
            id,
            expense_keys().success("Expense deleted successfully!"),
        )
        .await?;
    Ok(())
}

pub async fn upload_expenses<R>(
    repo: &R,
    client: QueryClient<'_>,
    form: UploadSpreadsheetForm,
) -> ServiceResult<()>
where
    R: ExpenseWriter + ?Sized,
{
    let file = UploadFile::try_from(form)?;
    client
        .mutate(
            |file: UploadFile| async move { repo.upload_expenses(file).await },
            file,
            expense_keys().success("Expense records uploaded successfully!"),
        )
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 20).unwrap()
    }

    #[test]
    fn period_defaults_to_the_current_month() {
        let mut extras = ExtraParams::default();
        assert_eq!(expense_period(&mut extras, today()), (2025, Some(7)));
        assert_eq!(extras.iter().count(), 0);
    }

    #[test]
    fn whole_year_and_invalid_months() {
        let (_, mut extras) = url::decode("year=2024&month=all", EXPENSE_DEFAULTS);
        assert_eq!(expense_period(&mut extras, today()), (2024, None));
        assert_eq!(extras.get("month"), Some("all"));

        let (_, mut extras) = url::decode("month=13", EXPENSE_DEFAULTS);
        assert_eq!(expense_period(&mut extras, today()), (2025, Some(7)));
        assert_eq!(extras.get("month"), None);
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use super::*;
    use crate::domain::expense::Expense;
    use crate::pagination::PageResult;
    use crate::query::{QueryCache, Toast, ToastBuffer};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    #[tokio::test]
    async fn list_is_requested_for_the_selected_period() {
        let mut repo = MockRepository::new();
        repo.expect_list_expenses()
            .withf(|query| query.year == Some(2024) && query.month == Some(3) && query.page.page == 2)
            .times(1)
            .returning(|query| {
                Ok(PageResult::new(
                    vec![Expense {
                        id: 9,
                        amount: Some(2500.0),
                        ..Default::default()
                    }],
                    21,
                    3,
                    query.page.page,
                    10,
                ))
            });
        let cache = QueryCache::default();
        let toasts = ToastBuffer::new();
        let client = QueryClient::new(&cache, &toasts);
        let today = NaiveDate::from_ymd_opt(2025, 7, 20).unwrap();

        let data = load_expenses_page(&repo, client, "year=2024&month=3&page=2", today).await;

        assert_eq!(data.list.items[0].amount_label, "₹2,500");
        assert_eq!(data.list.total_elements, 21);
        assert!(data.months.iter().any(|m| m.selected && m.value == 3));
        assert_eq!(data.editing, None);
    }

    #[tokio::test]
    async fn failed_delete_toasts_and_keeps_the_cache() {
        let mut repo = MockRepository::new();
        repo.expect_delete_expense().times(1).returning(|_| {
            Err(RepositoryError::Server {
                status: 409,
                message: Some("Expense is linked to a settlement".into()),
            })
        });
        let cache = QueryCache::default();
        cache.insert(QueryKey::new("expenses"), 1u8);
        let toasts = ToastBuffer::new();
        let client = QueryClient::new(&cache, &toasts);

        assert!(delete_expense(&repo, client, 4).await.is_err());
        assert_eq!(cache.len(), 1);
        assert_eq!(
            toasts.take(),
            vec![Toast::error("Expense is linked to a settlement")]
        );
    }
}
