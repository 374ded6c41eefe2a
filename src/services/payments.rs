//! Pending payments and payment recording.

use chrono::NaiveDate;

use crate::domain::dates::parse_date;
use crate::domain::payment::NewPayment;
use crate::dto::list::ListView;
use crate::dto::payments::{PAYMENT_DEFAULTS, PaymentsPageData, PendingRow};
use crate::forms::payments::RecordPaymentForm;
use crate::listing::url;
use crate::query::{MutationOptions, QueryClient, QueryKey, QueryOptions};
use crate::repository::PaymentReader;
use crate::repository::PaymentWriter;
use crate::services::{ServiceResult, load_list, paginate_locally};

pub const PAYMENTS_PATH: &str = "/payments";

/// Pending payments due on the `date` parameter, today when absent or invalid.
pub async fn load_payments_page<R>(
    repo: &R,
    client: QueryClient<'_>,
    query: &str,
    today: NaiveDate,
) -> PaymentsPageData
where
    R: PaymentReader + ?Sized,
{
    let (state, mut extras) = url::decode(query, PAYMENT_DEFAULTS);
    let date = extras.get("date").and_then(parse_date).unwrap_or(today);
    if date == today {
        extras.remove("date");
    } else {
        extras.set("date", date.to_string());
    }

    let page = load_list(&state, |state| async move {
        let pending = client
            .query(
                &QueryKey::new("payments").with("pending").with(date),
                QueryOptions::default(),
                || repo.list_pending_payments(Some(date)),
            )
            .await
            .into_result()
            .ok()?;
        let rows = pending.into_iter().map(PendingRow::from).collect();
        Some(paginate_locally(rows, &state, |row: &PendingRow, term: &str| row.matches(term)))
    })
    .await;

    PaymentsPageData {
        list: ListView::build(PAYMENTS_PATH, &state, &extras, page),
        date,
        payment_modes: PaymentsPageData::payment_modes(),
    }
}

pub async fn record_payment<R>(
    repo: &R,
    client: QueryClient<'_>,
    form: RecordPaymentForm,
) -> ServiceResult<()>
where
    R: PaymentWriter + ?Sized,
{
    let payload = NewPayment::try_from(form)?;
    client
        .mutate(
            |payment: NewPayment| async move { repo.record_payment(&payment).await },
            payload,
            MutationOptions::new()
                .success("Payment recorded successfully!")
                .invalidate(QueryKey::new("payments"))
                .invalidate(QueryKey::new("members"))
                .invalidate(QueryKey::new("dashboard")),
        )
        .await?;
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::member::Member;
    use crate::domain::payment::PendingPayment;
    use crate::query::{QueryCache, Toast, ToastBuffer};
    use crate::repository::mock::MockRepository;

    fn pending(id: i64, name: &str) -> PendingPayment {
        PendingPayment {
            id: Some(id),
            employee_detail: Some(Member {
                id,
                name: Some(name.to_string()),
                ..Default::default()
            }),
            amount: Some(600.0),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn pending_list_is_fetched_for_the_chosen_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let mut repo = MockRepository::new();
        repo.expect_list_pending_payments()
            .with(eq(Some(date)))
            .times(1)
            .returning(|_| Ok((1..=12).map(|id| pending(id, "Member")).collect()));
        let cache = QueryCache::default();
        let toasts = ToastBuffer::new();
        let client = QueryClient::new(&cache, &toasts);
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        let data = load_payments_page(&repo, client, "date=2025-03-05&page=1", today).await;

        assert_eq!(data.date, date);
        assert_eq!(data.list.items.len(), 2);
        assert_eq!(data.list.items[0].amount_label, "₹600");
        assert_eq!(data.list.self_href, "/payments?date=2025-03-05&page=1");
    }

    #[tokio::test]
    async fn recording_clears_payment_and_member_caches() {
        let mut repo = MockRepository::new();
        repo.expect_record_payment()
            .withf(|payment| payment.employee_detail.id.get() == 3)
            .times(1)
            .returning(|_| Ok(()));
        let cache = QueryCache::default();
        cache.insert(QueryKey::new("payments").with("pending"), 1u8);
        cache.insert(QueryKey::new("members").with("unpaid"), 2u8);
        let toasts = ToastBuffer::new();
        let client = QueryClient::new(&cache, &toasts);

        let form = RecordPaymentForm {
            employee_id: 3,
            due_date: "2025-03-01".into(),
            paid_amount: 600.0,
            payment_mode: "Cash".into(),
            advance_in_months: 0,
            is_admission_fee: false,
            paid_on: String::new(),
        };
        record_payment(&repo, client, form).await.unwrap();

        assert!(cache.is_empty());
        assert_eq!(toasts.take(), vec![Toast::success("Payment recorded successfully!")]);
    }
}
