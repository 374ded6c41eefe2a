//! Query and mutation wrapper shared by every screen.

pub mod cache;
pub mod client;
pub mod key;
pub mod notify;

pub use cache::QueryCache;
pub use client::{MutationOptions, QueryClient, QueryOptions, QueryState};
pub use key::QueryKey;
pub use notify::{Notifier, Toast, ToastBuffer, ToastLevel};
