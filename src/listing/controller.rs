//! Per-filter result sets of a list page and the tickets that keep late responses out.

use std::collections::HashMap;

use crate::listing::state::{ListEvent, ListFilter, PageState};
use crate::pagination::PageResult;

/// Handle of an in-flight fetch.
///
/// Remembers the generation of the state it was issued for, so a response
/// that arrives after the state moved on can be recognised and dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket<F> {
    generation: u64,
    filter: F,
    query: Vec<String>,
}

impl<F: Copy> FetchTicket<F> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn filter(&self) -> F {
        self.filter
    }

    /// Parts of the query this ticket was issued for.
    pub fn query(&self) -> &[String] {
        &self.query
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The state changed while the fetch was in flight.
    Discarded,
}

/// State plus the result sets of one list page.
///
/// Only the active filter's result set is ever kept: switching filters
/// drops everything fetched for the others.
#[derive(Debug)]
pub struct ListController<F, T> {
    state: PageState<F>,
    generation: u64,
    results: HashMap<F, PageResult<T>>,
}

impl<F: ListFilter, T> ListController<F, T> {
    pub fn new(state: PageState<F>) -> Self {
        Self {
            state,
            generation: 0,
            results: HashMap::new(),
        }
    }

    pub fn state(&self) -> &PageState<F> {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Feeds an event to the state, invalidating in-flight fetches when the
    /// query changes.
    pub fn apply(&mut self, event: ListEvent<F>) -> bool {
        let previous_filter = self.state.filter;
        let changed = self.state.apply(event);
        if changed {
            self.generation += 1;
        }
        if self.state.filter != previous_filter {
            let active = self.state.filter;
            self.results.retain(|filter, _| *filter == active);
        }
        changed
    }

    /// Starts a fetch for the current state.
    pub fn begin(&self) -> FetchTicket<F> {
        FetchTicket {
            generation: self.generation,
            filter: self.state.filter,
            query: self.state.query_parts(),
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket<F>) -> bool {
        ticket.generation == self.generation && ticket.filter == self.state.filter
    }

    /// Stores the outcome of a fetch, or drops it when the ticket is stale.
    ///
    /// `None` means the fetch failed; the active result set is then cleared
    /// to an empty page.
    pub fn complete(&mut self, ticket: &FetchTicket<F>, outcome: Option<PageResult<T>>) -> Completion {
        if !self.is_current(ticket) {
            log::debug!(
                "Discarding stale `{}` response (generation {} < {})",
                ticket.filter.as_str(),
                ticket.generation,
                self.generation
            );
            return Completion::Discarded;
        }
        let result = outcome.unwrap_or_else(|| PageResult::empty(self.state.size));
        self.results.insert(ticket.filter, result);
        Completion::Applied
    }

    /// Result set of the active filter, if one was fetched.
    pub fn current(&self) -> Option<&PageResult<T>> {
        self.results.get(&self.state.filter)
    }

    pub fn result_for(&self, filter: F) -> Option<&PageResult<T>> {
        self.results.get(&filter)
    }
}
