//! Per-page list state: filter tabs, sorting, paging, debounced search,
//! URL synchronization and stale response handling.

pub mod controller;
#[cfg(feature = "server")]
pub mod debounce;
#[cfg(feature = "server")]
pub mod live;
pub mod state;
pub mod url;

pub use controller::{Completion, FetchTicket, ListController};
pub use state::{ListDefaults, ListEvent, ListFilter, PageState, SortDirection};
pub use url::ExtraParams;
