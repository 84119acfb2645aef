//! View model for the listing page.
//!
//! Everything a renderer needs is resolved here, so HTML and JSON surfaces
//! agree on texts, ranges and which controls exist.

use serde::Serialize;

use crate::fetch::{ErrorInfo, FetchState};
use crate::format::{format_count, format_date_range, format_price, format_rating, ItineraryPreview};
use crate::models::Cruise;
use crate::pagination::{paginate, Page, PageControls, PageSize};
use crate::sorting::{SortOrder, SORT_OPTIONS};

pub const ERROR_TITLE: &str = "Error loading cruises";
pub const LOADING_TEXT: &str = "Loading cruises...";
pub const EMPTY_TEXT: &str = "No cruises found";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ListingView {
    Error {
        title: &'static str,
        error: ErrorInfo,
    },
    Loading {
        message: &'static str,
    },
    Ready(Box<ResultsView>),
}

impl ListingView {
    pub fn is_error(&self) -> bool {
        matches!(self, ListingView::Error { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListingView::Loading { .. })
    }

    pub fn results(&self) -> Option<&ResultsView> {
        match self {
            ListingView::Ready(results) => Some(results),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsView {
    pub header: ListingHeader,
    pub sort: SortMenu,
    pub cards: Vec<CruiseCard>,
    /// Set when the current page has nothing to show.
    pub empty_message: Option<&'static str>,
    pub pagination: Option<PageControls>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingHeader {
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub start_index: usize,
    pub end_index: usize,
    /// "About 1,234 results (showing 11-20)"; absent when there are no results.
    pub summary: Option<String>,
}

impl ListingHeader {
    fn from_page<T>(page: &Page<'_, T>) -> Self {
        let summary = (page.total_items > 0).then(|| {
            let mut text = format!("About {} results", format_count(page.total_items));
            if page.total_pages > 1 {
                text.push_str(&format!(" (showing {}-{})", page.start_index, page.end_index));
            }
            text
        });

        Self {
            total_items: page.total_items,
            total_pages: page.total_pages,
            current_page: page.current_page,
            start_index: page.start_index,
            end_index: page.end_index,
            summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortMenu {
    pub active: SortOrder,
    pub label: String,
    pub options: Vec<SortMenuEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortMenuEntry {
    pub order: SortOrder,
    pub label: &'static str,
    pub active: bool,
}

impl SortMenu {
    pub fn new(active: SortOrder) -> Self {
        Self {
            active,
            label: active.label(),
            options: SORT_OPTIONS
                .iter()
                .map(|option| SortMenuEntry {
                    order: option.order,
                    label: option.label,
                    active: option.order == active,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CruiseCard {
    /// 1-based position in the sorted list.
    pub position: usize,
    pub name: String,
    pub region: String,
    pub duration: u32,
    pub duration_text: String,
    pub price: f64,
    pub price_text: String,
    pub rating_text: String,
    pub reviews: u64,
    pub date_range: String,
    pub itinerary: ItineraryPreview,
    pub ship_name: String,
    pub ship_image: Option<String>,
    pub line_name: String,
    pub line_logo: Option<String>,
}

impl CruiseCard {
    pub fn new(position: usize, cruise: &Cruise) -> Self {
        Self {
            position,
            name: cruise.name.clone(),
            region: cruise.region.clone(),
            duration: cruise.duration,
            duration_text: format!("{} nights", cruise.duration),
            price: cruise.price,
            price_text: format_price(cruise.price),
            rating_text: format_rating(cruise.ship.rating),
            reviews: cruise.ship.reviews,
            date_range: format_date_range(&cruise.departure_date, &cruise.return_date),
            itinerary: ItineraryPreview::new(&cruise.itinerary),
            ship_name: cruise.ship.name.clone(),
            ship_image: cruise.ship.image.clone(),
            line_name: cruise.ship.line.name.clone(),
            line_logo: cruise.ship.line.logo.clone(),
        }
    }
}

/// Resolves the render state in priority order: error, then loading, then the
/// sorted list (or its empty state).
pub fn compose(fetch: &FetchState, sorted: &[Cruise], sort: SortOrder, page_size: PageSize, current_page: usize) -> ListingView {
    if let Some(err) = fetch.error() {
        return ListingView::Error {
            title: ERROR_TITLE,
            error: ErrorInfo::from(err),
        };
    }

    if fetch.is_loading() {
        return ListingView::Loading { message: LOADING_TEXT };
    }

    let page = paginate(sorted, page_size, current_page);
    let cards: Vec<CruiseCard> = page
        .items
        .iter()
        .enumerate()
        .map(|(i, cruise)| CruiseCard::new(page.start_index + i, cruise))
        .collect();

    ListingView::Ready(Box::new(ResultsView {
        header: ListingHeader::from_page(&page),
        sort: SortMenu::new(sort),
        empty_message: cards.is_empty().then_some(EMPTY_TEXT),
        pagination: PageControls::new(page.current_page, page.total_pages),
        cards,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use crate::models::fixtures::numbered;
    use crate::sorting::sort_cruises;

    fn loaded(records: Vec<Cruise>) -> FetchState {
        let mut state = FetchState::new();
        let ticket = state.begin();
        state.complete(ticket, Ok(records));
        state
    }

    #[test]
    fn test_error_wins_over_everything() {
        let mut state = loaded(numbered(3));
        let ticket = state.begin();
        state.complete(ticket, Err(FetchError::Transport("connection refused".into())));

        let view = compose(&state, &numbered(3), SortOrder::default(), PageSize::default(), 1);
        assert!(view.is_error());
        assert!(!view.is_loading());
        assert!(view.results().is_none());
        match view {
            ListingView::Error { title, error } => {
                assert_eq!(title, ERROR_TITLE);
                assert!(error.message.contains("connection refused"));
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_loading_state() {
        let mut state = FetchState::new();
        state.begin();
        let view = compose(&state, &[], SortOrder::default(), PageSize::default(), 1);
        assert_eq!(view, ListingView::Loading { message: LOADING_TEXT });
    }

    #[test]
    fn test_empty_results() {
        let state = loaded(Vec::new());
        let view = compose(&state, &[], SortOrder::default(), PageSize::default(), 1);
        let results = view.results().expect("results view");

        assert_eq!(results.empty_message, Some(EMPTY_TEXT));
        assert!(results.cards.is_empty());
        assert!(results.pagination.is_none());
        assert!(results.header.summary.is_none());
    }

    #[test]
    fn test_header_and_cards() {
        let records = numbered(20);
        let state = loaded(records.clone());
        let sorted = sort_cruises(&records, SortOrder::default());

        let view = compose(&state, &sorted, SortOrder::default(), PageSize::default(), 2);
        let results = view.results().unwrap();

        assert_eq!(results.header.summary.as_deref(), Some("About 20 results (showing 11-20)"));
        assert_eq!(results.cards.len(), 10);
        assert_eq!(results.cards[0].position, 11);
        assert_eq!(results.cards[0].name, "cruise 11");
        assert_eq!(results.cards[0].price_text, "$1100");
        assert_eq!(results.pagination.as_ref().map(|p| p.current_page), Some(2));
        assert_eq!(results.sort.options.iter().filter(|o| o.active).count(), 1);
    }

    #[test]
    fn test_single_page_summary_has_no_range() {
        let records = numbered(4);
        let state = loaded(records.clone());
        let view = compose(&state, &records, SortOrder::default(), PageSize::default(), 1);
        let results = view.results().unwrap();
        assert_eq!(results.header.summary.as_deref(), Some("About 4 results"));
        assert!(results.pagination.is_none());
    }
}
