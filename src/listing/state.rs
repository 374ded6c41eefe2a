//! Filter, sort, paging and search state of one list page.

use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;

use crate::pagination::{DEFAULT_PAGE_SIZE, PageRequest};

/// Mutually exclusive views of a list, e.g. the member tabs
/// `all | paid | unpaid | unattended | active | admins`.
///
/// Every filter maps to exactly one remote query.
pub trait ListFilter: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    /// Value used in URLs and cache keys.
    fn as_str(self) -> &'static str;

    /// Tab caption.
    fn label(self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.iter().copied().find(|filter| filter.as_str() == raw)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Initial values of a list page and the columns it may be sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListDefaults<F> {
    pub filter: F,
    pub page_size: u32,
    pub sort_by: &'static str,
    pub sort_dir: SortDirection,
    pub sortable: &'static [&'static str],
}

impl<F> ListDefaults<F> {
    pub const fn new(filter: F, sort_by: &'static str, sort_dir: SortDirection) -> Self {
        Self {
            filter,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by,
            sort_dir,
            sortable: &[],
        }
    }

    pub const fn sortable(mut self, columns: &'static [&'static str]) -> Self {
        self.sortable = columns;
        self
    }

    /// Unknown columns are rejected once a whitelist is configured.
    pub fn accepts_sort(&self, column: &str) -> bool {
        column == self.sort_by || self.sortable.is_empty() || self.sortable.contains(&column)
    }
}

/// User intents a list page reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListEvent<F> {
    SelectFilter(F),
    /// Click on a column header.
    ToggleSort(String),
    ChangePage(u64),
    ChangePageSize(u32),
    /// Raw keystroke; does not touch the query until it settles.
    SearchInput(String),
    /// The quiet period after the last keystroke elapsed.
    SearchSettled,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageState<F> {
    pub page: u64,
    pub size: u32,
    pub sort_by: String,
    pub sort_dir: SortDirection,
    pub filter: F,
    pub search_term: String,
    pub debounced_search_term: String,
    #[serde(skip)]
    pub defaults: ListDefaults<F>,
}

impl<F: ListFilter> PageState<F> {
    pub fn new(defaults: ListDefaults<F>) -> Self {
        Self {
            page: 0,
            size: defaults.page_size,
            sort_by: defaults.sort_by.to_string(),
            sort_dir: defaults.sort_dir,
            filter: defaults.filter,
            search_term: String::new(),
            debounced_search_term: String::new(),
            defaults,
        }
    }

    /// Applies an event and reports whether the query it describes changed.
    ///
    /// Any change of filter, sort, page size or settled search term sends the
    /// list back to its first page.
    pub fn apply(&mut self, event: ListEvent<F>) -> bool {
        let before = self.query_parts();
        match event {
            ListEvent::SelectFilter(filter) => {
                if filter != self.filter {
                    self.filter = filter;
                    self.page = 0;
                }
            }
            ListEvent::ToggleSort(column) => {
                if !self.defaults.accepts_sort(&column) {
                    return false;
                }
                if column == self.sort_by {
                    self.sort_dir = self.sort_dir.flipped();
                } else {
                    self.sort_by = column;
                    self.sort_dir = SortDirection::Asc;
                }
                self.page = 0;
            }
            ListEvent::ChangePage(page) => self.page = page,
            ListEvent::ChangePageSize(size) => {
                let size = if size == 0 { DEFAULT_PAGE_SIZE } else { size };
                if size != self.size {
                    self.size = size;
                    self.page = 0;
                }
            }
            ListEvent::SearchInput(term) => self.search_term = term,
            ListEvent::SearchSettled => {
                if self.debounced_search_term != self.search_term {
                    self.debounced_search_term = self.search_term.clone();
                    self.page = 0;
                }
            }
        }
        before != self.query_parts()
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }

    /// Settled search term, trimmed, or `None` when blank.
    pub fn search(&self) -> Option<&str> {
        Some(self.debounced_search_term.trim()).filter(|term| !term.is_empty())
    }

    /// Everything that parameterizes the remote query, in a stable order.
    pub fn query_parts(&self) -> Vec<String> {
        vec![
            self.filter.as_str().to_string(),
            self.page.to_string(),
            self.size.to_string(),
            self.sort_by.clone(),
            self.sort_dir.as_str().to_string(),
            self.debounced_search_term.trim().to_string(),
        ]
    }

    /// Direction a click on `column` would sort by.
    pub fn next_direction(&self, column: &str) -> SortDirection {
        if column == self.sort_by {
            self.sort_dir.flipped()
        } else {
            SortDirection::Asc
        }
    }
}
