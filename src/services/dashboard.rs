//! Stat cards of the landing page.

use crate::domain::attendance::InactivePeriod;
use crate::dto::dashboard::{DashboardData, StatCard};
use crate::pagination::PageRequest;
use crate::query::{QueryClient, QueryKey, QueryOptions};
use crate::repository::{AttendanceReader, MemberListQuery, MemberReader, PaymentReader};

/// Fetches every card concurrently; each card stands alone and failures are
/// not toasted, the card shows a dash instead.
pub async fn load_dashboard<R>(repo: &R, client: QueryClient<'_>) -> DashboardData
where
    R: MemberReader + PaymentReader + AttendanceReader + ?Sized,
{
    let options = QueryOptions::default().silent();
    let one = PageRequest::first(1);
    let all_members = MemberListQuery::new(one);

    let paid_key = QueryKey::new("members").with("paid");
    let unpaid_key = QueryKey::new("members").with("unpaid");
    let pending_key = QueryKey::new("payments").with("pending").with("today");
    let inactive_key = QueryKey::new("dashboard").with("inactive-30");
    let total_key = QueryKey::new("dashboard").with("members-total");

    let (paid, unpaid, pending, unattended, members) = tokio::join!(
        client.query(&paid_key, options, || repo.list_paid_members()),
        client.query(&unpaid_key, options, || repo.list_unpaid_members()),
        client.query(&pending_key, options, || repo.list_pending_payments(None)),
        client.query(&inactive_key, options, || {
            repo.list_inactive_members(InactivePeriod::Days30, one)
        }),
        client.query(&total_key, options, || repo.list_members(&all_members)),
    );

    let unattended = match (unattended.data, members.data) {
        (Some(inactive), Some(members)) => {
            Some(format!("{}/{}", inactive.total_elements, members.total_elements))
        }
        _ => None,
    };

    DashboardData {
        cards: vec![
            StatCard {
                name: "Paid Members",
                value: paid.data.map(|(total, _)| total.to_string()),
                href: "/members?filter=paid",
                tone: "success",
            },
            StatCard {
                name: "Unpaid Members",
                value: unpaid.data.map(|(total, _)| total.to_string()),
                href: "/members?filter=unpaid",
                tone: "danger",
            },
            StatCard {
                name: "Pending Payments",
                value: pending.data.map(|list| list.len().to_string()),
                href: "/payments",
                tone: "warning",
            },
            StatCard {
                name: "Unattended Members",
                value: unattended,
                href: "/attendance?filter=inactive&days=30",
                tone: "info",
            },
        ],
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::member::Member;
    use crate::pagination::PageResult;
    use crate::query::{QueryCache, ToastBuffer};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    #[tokio::test]
    async fn a_failing_card_leaves_the_others_intact() {
        let mut repo = MockRepository::new();
        repo.expect_list_paid_members()
            .times(1)
            .returning(|| Ok((42, vec![Member::default()])));
        repo.expect_list_unpaid_members()
            .times(2)
            .returning(|| Err(RepositoryError::Transport("timeout".into())));
        repo.expect_list_pending_payments()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        repo.expect_list_inactive_members()
            .times(1)
            .returning(|_, page| Ok(PageResult::new(Vec::new(), 7, 7, 0, page.size)));
        repo.expect_list_members()
            .withf(|query| query.page.size == 1 && !query.is_admin)
            .times(1)
            .returning(|_| Ok(PageResult::new(vec![Member::default()], 120, 120, 0, 1)));
        let cache = QueryCache::default();
        let toasts = ToastBuffer::new();
        let client = QueryClient::new(&cache, &toasts);

        let data = load_dashboard(&repo, client).await;

        let values: Vec<_> = data.cards.iter().map(|card| card.value.clone()).collect();
        assert_eq!(
            values,
            vec![
                Some("42".to_string()),
                None,
                Some("0".to_string()),
                Some("7/120".to_string()),
            ]
        );
        assert!(toasts.take().is_empty());
    }
}
