//! Mirrors a [`PageState`] in the query string so list views survive reloads
//! and can be shared as links.
//!
//! Parameters equal to their default are left out. Values that do not parse
//! are ignored and the default is used instead.

use std::collections::BTreeMap;

use crate::listing::state::{ListDefaults, ListEvent, ListFilter, PageState, SortDirection};
use crate::pagination::PaginationIntent;

const FILTER: &str = "filter";
const PAGE: &str = "page";
const SIZE: &str = "size";
const SORT: &str = "sort";
const DIR: &str = "dir";
const SEARCH: &str = "search";

const RESERVED: [&str; 6] = [FILTER, PAGE, SIZE, SORT, DIR, SEARCH];

/// Page specific parameters such as `tab`, `year` or `date`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtraParams(BTreeMap<String, String>);

impl ExtraParams {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Stores a value; blank values remove the key.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let value = value.trim();
        if value.is_empty() {
            self.0.remove(key);
        } else {
            self.0.insert(key.to_string(), value.to_string());
        }
    }

    /// Stores a value unless it equals the page default.
    pub fn set_unless_default(&mut self, key: &str, value: &str, default: &str) {
        if value == default {
            self.0.remove(key);
        } else {
            self.set(key, value);
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// Rebuilds the list state from a raw query string.
pub fn decode<F: ListFilter>(query: &str, defaults: ListDefaults<F>) -> (PageState<F>, ExtraParams) {
    let pairs: Vec<(String, String)> = serde_html_form::from_str(query).unwrap_or_else(|err| {
        log::warn!("Ignoring malformed list query `{query}`: {err}");
        Vec::new()
    });

    let mut state = PageState::new(defaults);
    let mut extras = ExtraParams::default();
    for (key, value) in pairs {
        match key.as_str() {
            FILTER => {
                if let Some(filter) = F::parse(&value) {
                    state.filter = filter;
                }
            }
            PAGE => {
                if let Ok(page) = value.trim().parse::<u64>() {
                    state.page = page;
                }
            }
            SIZE => {
                if let Ok(size) = value.trim().parse::<u32>()
                    && size > 0
                {
                    state.size = size;
                }
            }
            SORT => {
                let column = value.trim();
                if !column.is_empty() && defaults.accepts_sort(column) {
                    state.sort_by = column.to_string();
                }
            }
            DIR => {
                if let Some(dir) = SortDirection::parse(&value) {
                    state.sort_dir = dir;
                }
            }
            SEARCH => {
                let term = value.trim().to_string();
                state.search_term = term.clone();
                state.debounced_search_term = term;
            }
            _ => extras.set(&key, value),
        }
    }
    (state, extras)
}

/// Query string for `state`, without the leading `?`. Empty when everything is default.
pub fn encode<F: ListFilter>(state: &PageState<F>, extras: &ExtraParams) -> String {
    let defaults = &state.defaults;
    let mut pairs: Vec<(&str, String)> = Vec::new();

    if state.filter != defaults.filter {
        pairs.push((FILTER, state.filter.as_str().to_string()));
    }
    for (key, value) in extras.iter() {
        if !RESERVED.contains(&key) {
            pairs.push((key, value.to_string()));
        }
    }
    if let Some(term) = state.search() {
        pairs.push((SEARCH, term.to_string()));
    }
    if state.sort_by != defaults.sort_by {
        pairs.push((SORT, state.sort_by.clone()));
    }
    if state.sort_dir != defaults.sort_dir {
        pairs.push((DIR, state.sort_dir.as_str().to_string()));
    }
    if state.page != 0 {
        pairs.push((PAGE, state.page.to_string()));
    }
    if state.size != defaults.page_size {
        pairs.push((SIZE, state.size.to_string()));
    }

    serde_html_form::to_string(&pairs).unwrap_or_else(|err| {
        log::error!("Failed to encode list query: {err}");
        String::new()
    })
}

/// `path` with the encoded state appended.
pub fn href<F: ListFilter>(path: &str, state: &PageState<F>, extras: &ExtraParams) -> String {
    let query = encode(state, extras);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// Link that leads to the state after `event`.
pub fn href_after<F: ListFilter>(
    path: &str,
    state: &PageState<F>,
    extras: &ExtraParams,
    event: ListEvent<F>,
) -> String {
    let mut next = state.clone();
    next.apply(event);
    href(path, &next, extras)
}

/// Link builder for the page control.
pub fn pagination_href<'a, F: ListFilter>(
    path: &'a str,
    state: &'a PageState<F>,
    extras: &'a ExtraParams,
) -> impl Fn(PaginationIntent) -> String + 'a {
    move |intent| {
        let event = match intent {
            PaginationIntent::Page(page) => ListEvent::ChangePage(page),
            PaginationIntent::PageSize(size) => ListEvent::ChangePageSize(size),
        };
        href_after(path, state, extras, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::state::tests::{DEFAULTS, Tab};

    #[test]
    fn defaults_encode_to_nothing() {
        let (state, extras) = decode::<Tab>("", DEFAULTS);
        assert_eq!(state, PageState::new(DEFAULTS));
        assert_eq!(encode(&state, &extras), "");
        assert_eq!(href("/members", &state, &extras), "/members");
    }

    #[test]
    fn state_round_trips_through_the_query_string() {
        let (state, extras) = decode::<Tab>(
            "filter=unpaid&page=2&size=25&sort=name&dir=desc&search=ravi+k&tab=manage",
            DEFAULTS,
        );
        assert_eq!(state.filter, Tab::Unpaid);
        assert_eq!(state.page, 2);
        assert_eq!(state.size, 25);
        assert_eq!(state.sort_by, "name");
        assert_eq!(state.sort_dir, SortDirection::Desc);
        assert_eq!(state.debounced_search_term, "ravi k");
        assert_eq!(extras.get("tab"), Some("manage"));

        let encoded = encode(&state, &extras);
        let (again, extras_again) = decode::<Tab>(&encoded, DEFAULTS);
        assert_eq!(again, state);
        assert_eq!(extras_again, extras);
    }

    #[test]
    fn garbage_values_fall_back_to_defaults() {
        let (state, _) = decode::<Tab>(
            "filter=everyone&page=-1&size=0&sort=password&dir=sideways",
            DEFAULTS,
        );
        assert_eq!(state, PageState::new(DEFAULTS));
    }

    #[test]
    fn pagination_links_keep_the_rest_of_the_state() {
        let (state, extras) = decode::<Tab>("filter=unpaid&page=1&tab=view", DEFAULTS);
        let link = pagination_href("/members", &state, &extras);
        assert_eq!(
            link(PaginationIntent::Page(0)),
            "/members?filter=unpaid&tab=view"
        );
        assert_eq!(
            link(PaginationIntent::PageSize(50)),
            "/members?filter=unpaid&tab=view&size=50"
        );
    }

    #[test]
    fn extras_skip_defaults() {
        let mut extras = ExtraParams::default();
        extras.set_unless_default("tab", "view", "view");
        assert_eq!(extras.get("tab"), None);
        extras.set_unless_default("tab", "manage", "view");
        assert_eq!(extras.get("tab"), Some("manage"));
        extras.set("year", "  ");
        assert_eq!(extras.get("year"), None);
    }
}
