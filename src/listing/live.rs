//! Search-as-you-type sessions.
//!
//! Each browser session owns one [`LiveSearch`]: a list controller plus a
//! debouncer. Keystroke requests race each other; only the one that survives
//! the quiet period queries the API, and its result is dropped if the list
//! state moved on while the query was running.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::listing::controller::{Completion, ListController};
use crate::listing::debounce::Debouncer;
use crate::listing::state::{ListDefaults, ListEvent, ListFilter, PageState};
use crate::pagination::PageResult;

/// Sessions untouched for this long are dropped.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug)]
pub enum LiveOutcome<F, T> {
    /// A newer keystroke arrived during the quiet period.
    Superseded,
    /// The list state changed while the query was running.
    Stale,
    Ready {
        state: PageState<F>,
        page: PageResult<T>,
    },
}

#[derive(Debug)]
pub struct LiveSearch<F, T> {
    controller: Mutex<ListController<F, T>>,
    debouncer: Debouncer,
    last_seen: Mutex<Instant>,
}

impl<F: ListFilter, T: Clone> LiveSearch<F, T> {
    pub fn new(defaults: ListDefaults<F>, quiet: Duration) -> Self {
        Self {
            controller: Mutex::new(ListController::new(PageState::new(defaults))),
            debouncer: Debouncer::new(quiet),
            last_seen: Mutex::new(Instant::now()),
        }
    }

    fn controller(&self) -> MutexGuard<'_, ListController<F, T>> {
        self.controller.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn touch(&self) {
        *self.last_seen.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .elapsed()
    }

    pub fn state(&self) -> PageState<F> {
        self.controller().state().clone()
    }

    /// Brings filter, sort and page size in line with the page the browser shows.
    fn sync(controller: &mut ListController<F, T>, shown: &PageState<F>) {
        controller.apply(ListEvent::SelectFilter(shown.filter));
        if controller.state().sort_by != shown.sort_by {
            controller.apply(ListEvent::ToggleSort(shown.sort_by.clone()));
        }
        if controller.state().sort_by == shown.sort_by
            && controller.state().sort_dir != shown.sort_dir
        {
            controller.apply(ListEvent::ToggleSort(shown.sort_by.clone()));
        }
        controller.apply(ListEvent::ChangePageSize(shown.size));
    }

    /// Handles one keystroke.
    ///
    /// `shown` is the list state the browser displays, `term` the raw input.
    /// `fetch` runs only if this keystroke is the last one of its burst.
    pub async fn search<Fut>(
        &self,
        shown: &PageState<F>,
        term: &str,
        fetch: impl FnOnce(PageState<F>) -> Fut,
    ) -> LiveOutcome<F, T>
    where
        Fut: Future<Output = Option<PageResult<T>>>,
    {
        self.touch();
        let armed = {
            let mut controller = self.controller();
            Self::sync(&mut controller, shown);
            controller.apply(ListEvent::SearchInput(term.to_string()));
            self.debouncer.arm()
        };

        if !armed.settled().await {
            return LiveOutcome::Superseded;
        }

        let (ticket, state) = {
            let mut controller = self.controller();
            controller.apply(ListEvent::SearchSettled);
            (controller.begin(), controller.state().clone())
        };

        let outcome = fetch(state).await;

        let mut controller = self.controller();
        match controller.complete(&ticket, outcome) {
            Completion::Discarded => LiveOutcome::Stale,
            Completion::Applied => LiveOutcome::Ready {
                state: controller.state().clone(),
                page: controller.current().cloned().unwrap_or_default(),
            },
        }
    }

    /// Applies a non-search event, e.g. a tab click made while a query runs.
    pub fn apply(&self, event: ListEvent<F>) -> bool {
        self.touch();
        self.controller().apply(event)
    }
}

/// Live search sessions keyed by session id.
#[derive(Debug)]
pub struct LiveSessions<F, T> {
    sessions: DashMap<String, Arc<LiveSearch<F, T>>>,
    defaults: ListDefaults<F>,
    quiet: Duration,
    idle_timeout: Duration,
}

impl<F: ListFilter, T: Clone> LiveSessions<F, T> {
    pub fn new(defaults: ListDefaults<F>, quiet: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            defaults,
            quiet,
            idle_timeout: SESSION_IDLE_TIMEOUT,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Session for `id`, created on first use. Idle sessions are pruned on the way.
    pub fn session(&self, id: &str) -> Arc<LiveSearch<F, T>> {
        self.prune();
        let entry = self
            .sessions
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(LiveSearch::new(self.defaults, self.quiet)));
        Arc::clone(entry.value())
    }

    pub fn prune(&self) {
        let timeout = self.idle_timeout;
        self.sessions
            .retain(|_, session| session.idle_for() < timeout);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
