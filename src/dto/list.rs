//! Template-facing view of a list page: tabs, sortable headers, search box,
//! rows and the page control, all carrying links that preserve the URL state.

use serde::Serialize;

use crate::listing::url::{href, href_after, pagination_href};
use crate::listing::{ExtraParams, ListEvent, ListFilter, PageState};
use crate::pagination::{PageResult, PaginationView};

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TabLink {
    pub key: &'static str,
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SortLink {
    pub column: &'static str,
    pub href: String,
    pub active: bool,
    /// `asc`/`desc` on the active column.
    pub direction: Option<&'static str>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub total_elements: u64,
    pub filter: &'static str,
    pub tabs: Vec<TabLink>,
    pub sort: Vec<SortLink>,
    pub sort_by: String,
    pub sort_dir: &'static str,
    pub search: String,
    pub page_size: u32,
    /// Link to the current state, used as the redirect target of mutations.
    pub self_href: String,
    pub pagination: Option<PaginationView>,
}

impl<T> ListView<T> {
    pub fn build<F: ListFilter>(
        path: &str,
        state: &PageState<F>,
        extras: &ExtraParams,
        page: PageResult<T>,
    ) -> Self {
        let tabs = F::ALL
            .iter()
            .map(|&filter| TabLink {
                key: filter.as_str(),
                label: filter.label(),
                href: href_after(path, state, extras, ListEvent::SelectFilter(filter)),
                active: filter == state.filter,
            })
            .collect();

        let sort = state
            .defaults
            .sortable
            .iter()
            .map(|&column| {
                let active = column == state.sort_by;
                SortLink {
                    column,
                    href: href_after(
                        path,
                        state,
                        extras,
                        ListEvent::ToggleSort(column.to_string()),
                    ),
                    active,
                    direction: active.then(|| state.sort_dir.as_str()),
                }
            })
            .collect();

        let pagination = PaginationView::new(page.props(), pagination_href(path, state, extras));

        Self {
            total_elements: page.total_elements,
            items: page.items,
            filter: state.filter.as_str(),
            tabs,
            sort,
            sort_by: state.sort_by.clone(),
            sort_dir: state.sort_dir.as_str(),
            search: state.search_term.clone(),
            page_size: state.size,
            self_href: href(path, state, extras),
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::state::tests::{DEFAULTS, Tab};

    #[test]
    fn links_preserve_state() {
        let (state, extras) = crate::listing::url::decode("filter=unpaid&search=ravi", DEFAULTS);
        let page = PageResult::new(vec![1u32; 10], 23, 3, 0, 10);
        let view = ListView::build("/members", &state, &extras, page);

        assert_eq!(view.filter, "unpaid");
        assert!(view.tabs.iter().any(|tab| tab.active && tab.key == "unpaid"));
        let all = view.tabs.iter().find(|tab| tab.key == Tab::All.as_str()).unwrap();
        assert!(all.href.contains("search=ravi"));
        assert!(!all.href.contains("filter="));

        let pagination = view.pagination.unwrap();
        assert_eq!(pagination.summary, "Showing 1 to 10 of 23 results");
        assert_eq!(pagination.next.as_deref(), Some("/members?filter=unpaid&search=ravi&page=1"));
        assert_eq!(view.self_href, "/members?filter=unpaid&search=ravi");
    }

    #[test]
    fn single_page_has_no_control() {
        let (state, extras) = crate::listing::url::decode("", DEFAULTS);
        let view = ListView::build("/members", &state, &extras, PageResult::new(vec![1u32], 1, 1, 0, 10));
        assert!(view.pagination.is_none());
        assert_eq!(view.sort.len(), DEFAULTS.sortable.len());
    }
}
