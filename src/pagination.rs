//! Pagination envelope and the numbered page control shown under every table.

use serde::{Deserialize, Deserializer, Serialize};

/// Page size used when none (or nonsense) is supplied.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Choices of the "Show" selector.
pub const PAGE_SIZE_OPTIONS: [u32; 5] = [5, 10, 25, 50, 100];

/// Pages shown on each side of the current page.
const WINDOW_DELTA: i64 = 2;

/// Page the caller asked for, 0-based.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page: u64,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u64, size: u32) -> Self {
        Self {
            page,
            size: if size == 0 { DEFAULT_PAGE_SIZE } else { size },
        }
    }

    pub fn first(size: u32) -> Self {
        Self::new(0, size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// One page of a list, normalized from whatever envelope the endpoint uses.
///
/// `current_page` is 0-based and always below `total_pages` unless the list
/// is empty, in which case `total_pages` may be 0.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub page_size: u32,
}

impl<T> PageResult<T> {
    /// Builds a page from server-provided counters, repairing inconsistent ones.
    pub fn new(
        items: Vec<T>,
        total_elements: u64,
        total_pages: u64,
        current_page: u64,
        page_size: u32,
    ) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        if total_elements == 0 && items.is_empty() {
            return Self {
                items,
                total_elements: 0,
                total_pages,
                current_page: 0,
                page_size,
            };
        }
        let total_elements = total_elements.max(items.len() as u64);
        let total_pages = if total_pages == 0 {
            total_elements.div_ceil(u64::from(page_size))
        } else {
            total_pages
        };
        Self {
            items,
            total_elements,
            total_pages,
            current_page: current_page.min(total_pages.saturating_sub(1)),
            page_size,
        }
    }

    /// Empty result, used when a fetch fails or nothing was requested yet.
    pub fn empty(page_size: u32) -> Self {
        Self::new(Vec::new(), 0, 0, 0, page_size)
    }

    /// Slices a complete list into the requested page.
    ///
    /// Requests past the end land on the last page.
    pub fn from_items(all: Vec<T>, request: PageRequest) -> Self {
        let PageRequest {
            page,
            size: page_size,
        } = PageRequest::new(request.page, request.size);
        let total_elements = all.len() as u64;
        if total_elements == 0 {
            return Self::empty(page_size);
        }
        let total_pages = total_elements.div_ceil(u64::from(page_size));
        let current_page = page.min(total_pages - 1);
        let items = all
            .into_iter()
            .skip((current_page * u64::from(page_size)) as usize)
            .take(page_size as usize)
            .collect();
        Self {
            items,
            total_elements,
            total_pages,
            current_page,
            page_size,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            current_page: self.current_page,
            page_size: self.page_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn props(&self) -> PaginationProps {
        PaginationProps::new(
            self.current_page,
            self.total_pages,
            self.total_elements,
            self.page_size,
        )
    }
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self::empty(DEFAULT_PAGE_SIZE)
    }
}

/// Inputs of the page control.
///
/// Every field decodes leniently: anything that is not a non-negative number
/// falls back to `0` (or `10` for the page size), so a mangled query string
/// never breaks a page.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationProps {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub current_page: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_pages: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_elements: u64,
    #[serde(default = "default_page_size", deserialize_with = "lenient_page_size")]
    pub page_size: u32,
}

impl Default for PaginationProps {
    fn default() -> Self {
        Self {
            current_page: 0,
            total_pages: 0,
            total_elements: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationProps {
    pub fn new(current_page: u64, total_pages: u64, total_elements: u64, page_size: u32) -> Self {
        Self {
            current_page,
            total_pages,
            total_elements,
            page_size,
        }
        .sanitized()
    }

    /// Replaces a zero page size with the default.
    pub fn sanitized(self) -> Self {
        Self {
            page_size: if self.page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                self.page_size
            },
            ..self
        }
    }

    /// First item number on the page, 1-based.
    pub fn start_item(&self) -> u64 {
        self.current_page
            .saturating_mul(u64::from(self.page_size))
            .saturating_add(1)
    }

    /// Last item number on the page, never past the total.
    pub fn end_item(&self) -> u64 {
        self.current_page
            .saturating_add(1)
            .saturating_mul(u64::from(self.page_size))
            .min(self.total_elements)
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} results",
            self.start_item(),
            self.end_item(),
            self.total_elements
        )
    }
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Unsigned(u64),
    Float(f64),
    Text(String),
    #[allow(dead_code)]
    Other(serde::de::IgnoredAny),
}

impl Lenient {
    fn into_u64(self) -> Option<u64> {
        match self {
            Lenient::Unsigned(value) => Some(value),
            Lenient::Float(value) if value.is_finite() && value >= 0.0 => Some(value.trunc() as u64),
            Lenient::Text(text) => {
                let text = text.trim();
                text.parse::<u64>().ok().or_else(|| {
                    text.parse::<f64>()
                        .ok()
                        .filter(|value| value.is_finite() && *value >= 0.0)
                        .map(|value| value.trunc() as u64)
                })
            }
            _ => None,
        }
    }
}

/// Decodes a count, treating anything non-numeric as `0`.
pub fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Lenient::deserialize(deserializer)?
        .into_u64()
        .unwrap_or_default())
}

/// Decodes a page size, treating anything non-numeric or zero as the default.
pub fn lenient_page_size<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Lenient::deserialize(deserializer)?
        .into_u64()
        .and_then(|value| u32::try_from(value).ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE))
}

/// Page numbers to display, 1-based, with `None` standing for an ellipsis.
///
/// Page 1 and the last page are always present. The pages in between run
/// from `max(2, current_page - 2)` to `min(total_pages - 1, current_page + 2)`
/// where `current_page` is the 0-based index. Nothing is shown for a single
/// page.
pub fn visible_pages(current_page: u64, total_pages: u64) -> Vec<Option<u64>> {
    if total_pages <= 1 {
        return Vec::new();
    }
    let current = i64::try_from(current_page).unwrap_or(i64::MAX);
    let last = i64::try_from(total_pages).unwrap_or(i64::MAX);
    let low = current.saturating_sub(WINDOW_DELTA);
    let high = current.saturating_add(WINDOW_DELTA);

    let mut pages = vec![Some(1)];
    if low > 2 {
        pages.push(None);
    }
    let from = low.max(2);
    let to = high.min(last - 1);
    pages.extend((from..=to).map(|page| Some(page as u64)));
    if high < last - 1 {
        pages.push(None);
    }
    pages.push(Some(total_pages));
    pages
}

/// What a click on the control asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaginationIntent {
    /// Go to the 0-based page.
    Page(u64),
    /// Switch the page size; the list goes back to the first page.
    PageSize(u32),
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PageLink {
    /// 1-based label, `None` for an ellipsis.
    pub number: Option<u64>,
    pub href: Option<String>,
    pub active: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SizeOption {
    pub size: u32,
    pub href: String,
    pub selected: bool,
}

/// Everything the `pagination` template macro needs to draw the control.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_elements: u64,
    pub page_size: u32,
    pub start_item: u64,
    pub end_item: u64,
    pub summary: String,
    pub previous: Option<String>,
    pub next: Option<String>,
    pub pages: Vec<PageLink>,
    pub sizes: Vec<SizeOption>,
}

impl PaginationView {
    /// Builds the control, or `None` when there is at most one page.
    ///
    /// `href` turns an intent into the link that performs it.
    pub fn new(props: PaginationProps, href: impl Fn(PaginationIntent) -> String) -> Option<Self> {
        let props = props.sanitized();
        if props.total_pages <= 1 {
            return None;
        }
        let current = props.current_page;

        let previous = (current > 0).then(|| href(PaginationIntent::Page(current - 1)));
        let next =
            (current + 1 < props.total_pages).then(|| href(PaginationIntent::Page(current + 1)));

        let pages = visible_pages(current, props.total_pages)
            .into_iter()
            .map(|entry| match entry {
                Some(number) => PageLink {
                    number: Some(number),
                    href: Some(href(PaginationIntent::Page(number - 1))),
                    active: number - 1 == current,
                },
                None => PageLink {
                    number: None,
                    href: None,
                    active: false,
                },
            })
            .collect();

        let sizes = PAGE_SIZE_OPTIONS
            .into_iter()
            .map(|size| SizeOption {
                size,
                href: href(PaginationIntent::PageSize(size)),
                selected: size == props.page_size,
            })
            .collect();

        Some(Self {
            current_page: current,
            total_pages: props.total_pages,
            total_elements: props.total_elements,
            page_size: props.page_size,
            start_item: props.start_item(),
            end_item: props.end_item(),
            summary: props.summary(),
            previous,
            next,
            pages,
            sizes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn href(intent: PaginationIntent) -> String {
        match intent {
            PaginationIntent::Page(page) => format!("?page={page}"),
            PaginationIntent::PageSize(size) => format!("?size={size}"),
        }
    }

    #[test]
    fn window_around_an_early_page() {
        assert_eq!(
            visible_pages(4, 10),
            vec![
                Some(1),
                Some(2),
                Some(3),
                Some(4),
                Some(5),
                Some(6),
                None,
                Some(10)
            ]
        );
    }

    #[test]
    fn window_near_both_ends() {
        assert_eq!(visible_pages(0, 2), vec![Some(1), Some(2)]);
        assert_eq!(
            visible_pages(0, 10),
            vec![Some(1), Some(2), None, Some(10)]
        );
        assert_eq!(
            visible_pages(9, 10),
            vec![Some(1), None, Some(7), Some(8), Some(9), Some(10)]
        );
    }

    #[test]
    fn absurd_counters_do_not_overflow() {
        assert_eq!(
            visible_pages(i64::MAX as u64, 10),
            vec![Some(1), None, Some(10)]
        );
        let pages = visible_pages(u64::MAX, u64::MAX);
        assert_eq!(pages.first(), Some(&Some(1)));
        assert_eq!(pages.last(), Some(&Some(u64::MAX)));

        let props = PaginationProps::new(u64::MAX, u64::MAX, 7, 100);
        assert_eq!(props.start_item(), u64::MAX);
        assert_eq!(props.end_item(), 7);
    }

    #[test]
    fn window_properties_hold_for_every_position() {
        for total in 2..=40u64 {
            for current in 0..total {
                let pages = visible_pages(current, total);
                assert_eq!(pages.first(), Some(&Some(1)), "{current}/{total}");
                assert_eq!(pages.last(), Some(&Some(total)), "{current}/{total}");

                let numbers: Vec<u64> = pages.iter().flatten().copied().collect();
                assert!(
                    numbers.windows(2).all(|pair| pair[0] < pair[1]),
                    "not increasing at {current}/{total}: {pages:?}"
                );

                let gaps = pages.iter().filter(|page| page.is_none()).count();
                assert!(gaps <= 2, "too many ellipses at {current}/{total}");
                assert!(!pages.windows(2).any(|pair| pair[0].is_none() && pair[1].is_none()));
            }
        }
    }

    #[test]
    fn single_page_renders_nothing() {
        assert!(visible_pages(0, 1).is_empty());
        assert!(visible_pages(0, 0).is_empty());
        assert!(PaginationView::new(PaginationProps::new(0, 1, 4, 10), href).is_none());
    }

    #[test]
    fn non_numeric_props_fall_back_to_defaults() {
        let props: PaginationProps = serde_json::from_str(
            r#"{"currentPage": "abc", "totalPages": null, "totalElements": {"n": 1}, "pageSize": "NaN"}"#,
        )
        .unwrap();
        assert_eq!(props, PaginationProps::default());
        assert_eq!(props.page_size, 10);

        let props: PaginationProps = serde_json::from_str(r#"{"pageSize": 0}"#).unwrap();
        assert_eq!(props.page_size, 10);

        let props: PaginationProps =
            serde_html_form::from_str("currentPage=2&totalPages=5&pageSize=25").unwrap();
        assert_eq!(props.current_page, 2);
        assert_eq!(props.total_pages, 5);
        assert_eq!(props.page_size, 25);
    }

    #[test]
    fn summary_of_first_spring_page() {
        let page = PageResult::new((0..10).collect::<Vec<_>>(), 23, 3, 0, 10);
        let view = PaginationView::new(page.props(), href).unwrap();
        assert_eq!(view.summary, "Showing 1 to 10 of 23 results");

        let last = PaginationProps::new(2, 3, 23, 10);
        assert_eq!(last.summary(), "Showing 21 to 23 of 23 results");
    }

    #[test]
    fn intents_map_to_zero_based_pages() {
        let view = PaginationView::new(PaginationProps::new(0, 3, 23, 10), href).unwrap();
        assert_eq!(view.previous, None);
        assert_eq!(view.next.as_deref(), Some("?page=1"));
        let labels: Vec<_> = view
            .pages
            .iter()
            .map(|link| (link.number, link.href.clone(), link.active))
            .collect();
        assert_eq!(
            labels,
            vec![
                (Some(1), Some("?page=0".to_string()), true),
                (Some(2), Some("?page=1".to_string()), false),
                (Some(3), Some("?page=2".to_string()), false),
            ]
        );
        let sizes: Vec<u32> = view.sizes.iter().map(|option| option.size).collect();
        assert_eq!(sizes, PAGE_SIZE_OPTIONS.to_vec());
        assert!(view.sizes.iter().any(|option| option.size == 10 && option.selected));

        let last = PaginationView::new(PaginationProps::new(2, 3, 23, 10), href).unwrap();
        assert_eq!(last.next, None);
        assert_eq!(last.previous.as_deref(), Some("?page=1"));
    }

    #[test]
    fn client_side_slicing_clamps_to_the_last_page() {
        let page = PageResult::from_items((1..=23).collect::<Vec<_>>(), PageRequest::new(7, 10));
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, vec![21, 22, 23]);

        let empty = PageResult::from_items(Vec::<u8>::new(), PageRequest { page: 3, size: 0 });
        assert_eq!(empty.total_pages, 0);
        assert_eq!(empty.current_page, 0);
        assert_eq!(empty.page_size, 10);
    }
}
