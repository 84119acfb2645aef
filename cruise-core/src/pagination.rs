use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Pages shown on each side of the current page in the page bar.
pub const PAGE_WINDOW_DELTA: usize = 2;

/// Number of records per page. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    pub fn new(size: usize) -> CoreResult<Self> {
        if size == 0 {
            return Err(CoreError::ValidationError("page size must be greater than zero".to_string()));
        }
        Ok(Self(size))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = CoreError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

/// One page of a list plus the metadata for "showing X-Y of Z".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub current_page: usize,
    pub total_pages: usize,
    /// 1-based index of the first record on the page, 0 for an empty list.
    pub start_index: usize,
    pub end_index: usize,
    pub total_items: usize,
}

pub fn total_pages(total_items: usize, page_size: PageSize) -> usize {
    total_items.div_ceil(page_size.get())
}

/// Slices `list` to page `current_page` (1-based; 0 is read as 1). Pages past
/// the end yield an empty slice.
pub fn paginate<T>(list: &[T], page_size: PageSize, current_page: usize) -> Page<'_, T> {
    let size = page_size.get();
    let current_page = current_page.max(1);
    let total_items = list.len();

    let offset = (current_page - 1).saturating_mul(size);
    let end_index = current_page.saturating_mul(size).min(total_items);
    let items = if offset < total_items { &list[offset..end_index] } else { &list[..0] };

    Page {
        items,
        current_page,
        total_pages: total_pages(total_items, page_size),
        start_index: if total_items > 0 { offset.saturating_add(1) } else { 0 },
        end_index,
        total_items,
    }
}

/// Button in the page bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "camelCase")]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

/// Windowed page numbers: first and last page always, `delta` pages around
/// `current_page`, and an ellipsis where the window skips pages. Empty when
/// there is at most one page.
pub fn visible_pages(current_page: usize, total_pages: usize, delta: usize) -> Vec<PageLink> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let current = current_page.clamp(1, total_pages);
    let lower = current.saturating_sub(delta).max(2);
    let upper = (current + delta).min(total_pages - 1);

    let mut links = vec![PageLink::Page(1)];
    if current > delta + 2 {
        links.push(PageLink::Ellipsis);
    }

    links.extend((lower..=upper).map(PageLink::Page));

    if current + delta + 1 < total_pages {
        links.push(PageLink::Ellipsis);
    }
    links.push(PageLink::Page(total_pages));

    links
}

/// Page bar state: previous/next targets and the windowed links.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageControls {
    pub current_page: usize,
    pub total_pages: usize,
    pub previous: Option<usize>,
    pub next: Option<usize>,
    pub links: Vec<PageLink>,
}

impl PageControls {
    /// `None` when there is nothing to paginate.
    pub fn new(current_page: usize, total_pages: usize) -> Option<Self> {
        if total_pages <= 1 {
            return None;
        }

        let current_page = current_page.clamp(1, total_pages);
        Some(Self {
            current_page,
            total_pages,
            previous: (current_page > 1).then(|| current_page - 1),
            next: (current_page < total_pages).then(|| current_page + 1),
            links: visible_pages(current_page, total_pages, PAGE_WINDOW_DELTA),
        })
    }
}
