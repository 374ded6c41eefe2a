//! Uniform policy around every remote call: caching, retry and toasts for
//! reads; success/error toasts and cache invalidation for writes.

use std::future::Future;

use crate::query::cache::QueryCache;
use crate::query::key::QueryKey;
use crate::query::notify::{Notifier, Toast};
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Automatic retries of a failed query.
pub const DEFAULT_QUERY_RETRY: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryOptions {
    pub retry: u32,
    /// Suppresses the error toast.
    pub silent: bool,
    /// Serve from and store into the cache.
    pub cache: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            retry: DEFAULT_QUERY_RETRY,
            silent: false,
            cache: true,
        }
    }
}

impl QueryOptions {
    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    pub fn retry(mut self, retry: u32) -> Self {
        self.retry = retry;
        self
    }

    pub fn uncached(mut self) -> Self {
        self.cache = false;
        self
    }
}

/// Outcome of a query: the data, or the error that replaced it.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub error: Option<RepositoryError>,
}

impl<T> QueryState<T> {
    pub fn ready(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: RepositoryError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn into_result(self) -> RepositoryResult<T> {
        match (self.data, self.error) {
            (Some(data), _) => Ok(data),
            (None, Some(error)) => Err(error),
            (None, None) => Err(RepositoryError::Unexpected("query produced no data".into())),
        }
    }
}

impl<T: Default> QueryState<T> {
    /// Data, or its empty value after a failure.
    pub fn data_or_default(self) -> T {
        self.data.unwrap_or_default()
    }
}

type SuccessHook<'a, R> = Box<dyn FnOnce(&R) + Send + 'a>;
type ErrorHook<'a> = Box<dyn FnOnce(&RepositoryError) + Send + 'a>;

/// Mutation behaviour. Mutations are never retried.
pub struct MutationOptions<'a, R> {
    pub silent: bool,
    pub success_message: Option<String>,
    /// Replaces the server's message in the error toast.
    pub error_message: Option<String>,
    /// Key prefixes dropped from the cache after success.
    pub invalidate: Vec<QueryKey>,
    pub on_success: Option<SuccessHook<'a, R>>,
    pub on_error: Option<ErrorHook<'a>>,
}

impl<R> Default for MutationOptions<'_, R> {
    fn default() -> Self {
        Self {
            silent: false,
            success_message: None,
            error_message: None,
            invalidate: Vec::new(),
            on_success: None,
            on_error: None,
        }
    }
}

impl<'a, R> MutationOptions<'a, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn invalidate(mut self, prefix: QueryKey) -> Self {
        self.invalidate.push(prefix);
        self
    }

    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    pub fn on_success(mut self, hook: impl FnOnce(&R) + Send + 'a) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    pub fn on_error(mut self, hook: impl FnOnce(&RepositoryError) + Send + 'a) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }
}

/// Per-request handle over the shared cache and the request's notifier.
#[derive(Clone, Copy)]
pub struct QueryClient<'a> {
    cache: &'a QueryCache,
    notifier: &'a dyn Notifier,
}

impl<'a> QueryClient<'a> {
    pub fn new(cache: &'a QueryCache, notifier: &'a dyn Notifier) -> Self {
        Self { cache, notifier }
    }

    pub fn cache(&self) -> &'a QueryCache {
        self.cache
    }

    pub fn notifier(&self) -> &'a dyn Notifier {
        self.notifier
    }

    pub async fn query<T, F, Fut>(
        &self,
        key: &QueryKey,
        options: QueryOptions,
        mut fetch: F,
    ) -> QueryState<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnMut() -> Fut,
        Fut: Future<Output = RepositoryResult<T>>,
    {
        if options.cache {
            if let Some(data) = self.cache.get::<T>(key) {
                log::debug!("Cache hit for {key}");
                return QueryState::ready(data);
            }
        }

        let mut attempt = 0;
        loop {
            match fetch().await {
                Ok(data) => {
                    if options.cache {
                        self.cache.insert(key.clone(), data.clone());
                    }
                    return QueryState::ready(data);
                }
                Err(err) if attempt < options.retry => {
                    attempt += 1;
                    log::warn!("Query {key} failed, retry {attempt}/{}: {err}", options.retry);
                }
                Err(err) => {
                    log::error!("Query {key} failed: {err}");
                    if !options.silent {
                        self.notifier.notify(Toast::error(err.user_message()));
                    }
                    return QueryState::failed(err);
                }
            }
        }
    }

    pub async fn mutate<P, R, F, Fut>(
        &self,
        fetch: F,
        payload: P,
        options: MutationOptions<'_, R>,
    ) -> RepositoryResult<R>
    where
        F: FnOnce(P) -> Fut,
        Fut: Future<Output = RepositoryResult<R>>,
    {
        match fetch(payload).await {
            Ok(result) => {
                if let Some(message) = options.success_message {
                    self.notifier.notify(Toast::success(message));
                }
                for prefix in &options.invalidate {
                    let dropped = self.cache.invalidate(prefix);
                    log::debug!("Invalidated {dropped} cached queries under {prefix}");
                }
                if let Some(hook) = options.on_success {
                    hook(&result);
                }
                Ok(result)
            }
            Err(err) => {
                log::error!("Mutation failed: {err}");
                if !options.silent {
                    let message = options
                        .error_message
                        .unwrap_or_else(|| err.user_message());
                    self.notifier.notify(Toast::error(message));
                }
                if let Some(hook) = options.on_error {
                    hook(&err);
                }
                Err(err)
            }
        }
    }
}
