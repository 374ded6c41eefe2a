//! Response envelopes of the list endpoints and their conversion to [`PageResult`].
//!
//! The gym API paginates in several different ways. Each envelope below
//! mirrors one of them and knows how to normalize itself, so that services
//! and templates only ever see a [`PageResult`].

use serde::Deserialize;

use crate::domain::dates::null_as_default;
use crate::pagination::{PageRequest, PageResult, lenient_page_size, lenient_u64};

fn default_size() -> u32 {
    crate::pagination::DEFAULT_PAGE_SIZE
}

/// Spring Data page: `{content, totalElements, totalPages, number, size}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct SpringPage<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<T>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_elements: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_pages: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub number: u64,
    #[serde(default = "default_size", deserialize_with = "lenient_page_size")]
    pub size: u32,
}

impl<T> SpringPage<T> {
    pub fn into_page_result(self) -> PageResult<T> {
        PageResult::new(
            self.content,
            self.total_elements,
            self.total_pages,
            self.number,
            self.size,
        )
    }
}

/// Page counters nested under `page` by the expenses endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub number: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_pages: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_elements: u64,
    #[serde(default = "default_size", deserialize_with = "lenient_page_size")]
    pub size: u32,
}

/// `{data: [...], page: {number, totalPages, totalElements, size}}`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct DataPage<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<T>,
    #[serde(default)]
    pub page: Option<PageMeta>,
}

impl<T> DataPage<T> {
    pub fn into_page_result(self, request: PageRequest) -> PageResult<T> {
        match self.page {
            Some(meta) => PageResult::new(
                self.data,
                meta.total_elements,
                meta.total_pages,
                meta.number,
                meta.size,
            ),
            None => PageResult::from_items(self.data, request),
        }
    }
}

/// Report page: `{employees, count, pageNumber, totalPages}`.
///
/// The rows arrive under `employees`, `list` or `data` depending on the
/// report. The page size is not echoed, so the requested one is used.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct CountedPage<T> {
    #[serde(
        default,
        rename = "employees",
        alias = "list",
        alias = "data",
        deserialize_with = "null_as_default"
    )]
    pub items: Vec<T>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page_number: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_pages: u64,
}

impl<T> CountedPage<T> {
    pub fn into_page_result(self, request: PageRequest) -> PageResult<T> {
        PageResult::new(
            self.items,
            self.count,
            self.total_pages,
            self.page_number,
            request.size,
        )
    }
}

/// Unpaginated `{list, total}` wrapper of the paid and unpaid member lists.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListTotal<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub list: Vec<T>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total: u64,
}

/// Unpaginated rows under `result` (attendance report) or `employees`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Rows<T> {
    #[serde(
        default,
        rename = "result",
        alias = "employees",
        deserialize_with = "null_as_default"
    )]
    pub rows: Vec<T>,
}
