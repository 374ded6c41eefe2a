//! Page loaders and mutations, one module per screen.
//!
//! Services are generic over the repository traits they need so that unit
//! tests can run them against `MockRepository`. Reads go through the
//! request's [`QueryClient`](crate::query::QueryClient), which owns caching,
//! retries and error toasts; services only decide what to fetch and how to
//! shape it for the templates.

use std::future::Future;

use thiserror::Error;

use crate::forms::FormError;
use crate::listing::{ListController, ListFilter, PageState};
use crate::pagination::PageResult;
use crate::query::QueryKey;
use crate::repository::errors::RepositoryError;

pub mod attendance;
pub mod birthdays;
pub mod dashboard;
pub mod expenses;
pub mod holidays;
pub mod members;
pub mod partners;
pub mod payments;
pub mod reports;
pub mod settings;
pub mod whatsapp;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    /// Rejected input, with a message fit for the user.
    #[error("{0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    /// A report could not be serialized for download.
    #[error("export failed: {0}")]
    Export(String),

    /// The API call failed. Its toast has already been raised.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Cache key of one list request: the scope followed by every part of the
/// state that parameterizes the query.
pub fn list_key<F: ListFilter>(scope: &'static str, state: &PageState<F>) -> QueryKey {
    state
        .query_parts()
        .into_iter()
        .fold(QueryKey::new(scope), |key, part| key.with(part))
}

/// Runs one fetch of the list described by `state` through a controller, so
/// that a failed fetch yields the same empty page a live search would show.
pub async fn load_list<F, T, Fut>(state: &PageState<F>, fetch: impl FnOnce(PageState<F>) -> Fut) -> PageResult<T>
where
    F: ListFilter,
    T: Clone,
    Fut: Future<Output = Option<PageResult<T>>>,
{
    let mut controller = ListController::new(state.clone());
    let ticket = controller.begin();
    let outcome = fetch(state.clone()).await;
    controller.complete(&ticket, outcome);
    controller
        .current()
        .cloned()
        .unwrap_or_else(|| PageResult::empty(state.size))
}

/// Pages a list the API returns whole: the settled search term filters it
/// first, then the requested page is cut out.
pub fn paginate_locally<F, T>(
    items: Vec<T>,
    state: &PageState<F>,
    matches: impl Fn(&T, &str) -> bool,
) -> PageResult<T>
where
    F: ListFilter,
{
    let items = match state.search() {
        Some(term) => items.into_iter().filter(|item| matches(item, term)).collect(),
        None => items,
    };
    PageResult::from_items(items, state.page_request())
}

/// Case-insensitive "contains" over optional text fields.
pub(crate) fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::ListEvent;
    use crate::listing::state::tests::DEFAULTS;

    #[test]
    fn local_pagination_searches_before_slicing() {
        let mut state = PageState::new(DEFAULTS);
        state.apply(ListEvent::SearchInput("1".into()));
        state.apply(ListEvent::SearchSettled);
        state.apply(ListEvent::ChangePageSize(5));

        let page = paginate_locally((1..=30u32).collect(), &state, |n, term| {
            n.to_string().contains(term)
        });

        // 1, 10..=19, 21
        assert_eq!(page.total_elements, 12);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, vec![1, 10, 11, 12, 13]);
    }

    #[test]
    fn list_keys_follow_the_state() {
        let mut state = PageState::new(DEFAULTS);
        state.apply(ListEvent::ChangePage(2));
        assert_eq!(list_key("members", &state).to_string(), "members/all/2/10/id/asc/");
        assert!(list_key("members", &state).starts_with(&QueryKey::new("members").with("all")));
    }

    #[tokio::test]
    async fn failed_fetch_yields_an_empty_page() {
        let state = PageState::new(DEFAULTS);
        let page: PageResult<u32> = load_list(&state, |_| async { None }).await;
        assert!(page.is_empty());
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.page_size, 10);
    }
}
