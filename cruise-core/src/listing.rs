use tracing::debug;

use crate::fetch::{FetchError, FetchOutcome, FetchState, FetchTicket};
use crate::models::Cruise;
use crate::normalize::normalize_cruises;
use crate::pagination::{total_pages, PageSize};
use crate::sorting::{sort_cruises, SortField, SortOrder};
use crate::view::{compose, ListingView};

pub const DEFAULT_ENDPOINT: &str = "/api/cruises";

#[derive(Debug, Clone, PartialEq)]
pub struct ListingSettings {
    pub endpoint: String,
    pub page_size: PageSize,
    /// Title-case names and trim itinerary stops after each fetch.
    pub normalize: bool,
    pub initial_sort: SortOrder,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: PageSize::default(),
            normalize: true,
            initial_sort: SortOrder::default(),
        }
    }
}

/// Inputs to the listing page: user actions plus fetch completions.
#[derive(Debug, Clone)]
pub enum ListingMessage {
    Mounted,
    EndpointChanged(String),
    FetchCompleted {
        ticket: FetchTicket,
        result: Result<Vec<Cruise>, FetchError>,
    },
    SortSelected(SortOrder),
    SortToggled(SortField),
    PageSelected(usize),
    NextPage,
    PreviousPage,
    Unmounted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub endpoint: String,
}

/// Side effect requested by [`ListingController::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingCommand {
    None,
    Fetch(FetchRequest),
}

/// State of one listing page instance.
///
/// Owns the fetch state, the sort selection and the current page. Every change
/// goes through [`update`](Self::update); network work is returned as a
/// [`ListingCommand`] for the caller to run.
#[derive(Debug)]
pub struct ListingController {
    settings: ListingSettings,
    endpoint: String,
    fetch: FetchState,
    sort: SortOrder,
    sorted: Vec<Cruise>,
    current_page: usize,
    mounted: bool,
    detached: bool,
}

impl ListingController {
    pub fn new(settings: ListingSettings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            sort: settings.initial_sort,
            settings,
            fetch: FetchState::new(),
            sorted: Vec::new(),
            current_page: 1,
            mounted: false,
            detached: false,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.sorted.len(), self.settings.page_size)
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    /// The collection in display order.
    pub fn sorted(&self) -> &[Cruise] {
        &self.sorted
    }

    pub fn update(&mut self, message: ListingMessage) -> ListingCommand {
        if self.detached {
            debug!("Listing detached, ignoring {}", message_name(&message));
            return ListingCommand::None;
        }

        match message {
            ListingMessage::Mounted => {
                if self.mounted {
                    return ListingCommand::None;
                }
                self.mounted = true;
                self.start_fetch()
            }
            ListingMessage::EndpointChanged(endpoint) => {
                if endpoint == self.endpoint {
                    return ListingCommand::None;
                }
                self.endpoint = endpoint;
                if self.mounted {
                    self.start_fetch()
                } else {
                    ListingCommand::None
                }
            }
            ListingMessage::FetchCompleted { ticket, result } => {
                self.land_fetch(ticket, result);
                ListingCommand::None
            }
            ListingMessage::SortSelected(order) => {
                self.select_sort(order);
                ListingCommand::None
            }
            ListingMessage::SortToggled(field) => {
                self.select_sort(self.sort.toggle(field));
                ListingCommand::None
            }
            ListingMessage::PageSelected(page) => {
                self.select_page(page);
                ListingCommand::None
            }
            ListingMessage::NextPage => {
                self.select_page(self.current_page.saturating_add(1));
                ListingCommand::None
            }
            ListingMessage::PreviousPage => {
                self.select_page(self.current_page.saturating_sub(1));
                ListingCommand::None
            }
            ListingMessage::Unmounted => {
                self.detached = true;
                self.fetch.cancel();
                ListingCommand::None
            }
        }
    }

    pub fn view(&self) -> ListingView {
        compose(&self.fetch, &self.sorted, self.sort, self.settings.page_size, self.current_page)
    }

    fn start_fetch(&mut self) -> ListingCommand {
        let ticket = self.fetch.begin();
        debug!("Fetching cruises from {} (ticket {})", self.endpoint, ticket.sequence());
        ListingCommand::Fetch(FetchRequest {
            ticket,
            endpoint: self.endpoint.clone(),
        })
    }

    fn land_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Cruise>, FetchError>) {
        let result = if self.settings.normalize {
            result.map(|cruises| normalize_cruises(&cruises))
        } else {
            result
        };

        match self.fetch.complete(ticket, result) {
            FetchOutcome::Loaded => {
                self.resort();
                self.current_page = 1;
            }
            FetchOutcome::Failed => {
                if let Some(err) = self.fetch.error() {
                    debug!("Fetch {} failed: {}", ticket.sequence(), err);
                }
            }
            FetchOutcome::Discarded => {
                debug!("Discarding stale fetch result (ticket {})", ticket.sequence());
            }
        }
    }

    /// A different selection re-sorts and returns to the first page.
    fn select_sort(&mut self, order: SortOrder) {
        if order == self.sort {
            return;
        }
        self.sort = order;
        self.resort();
        self.current_page = 1;
    }

    fn select_page(&mut self, page: usize) {
        let last = self.total_pages().max(1);
        self.current_page = page.clamp(1, last);
    }

    fn resort(&mut self) {
        self.sorted = match self.fetch.data() {
            Some(data) => sort_cruises(data, self.sort),
            None => Vec::new(),
        };
    }
}

fn message_name(message: &ListingMessage) -> &'static str {
    match message {
        ListingMessage::Mounted => "Mounted",
        ListingMessage::EndpointChanged(_) => "EndpointChanged",
        ListingMessage::FetchCompleted { .. } => "FetchCompleted",
        ListingMessage::SortSelected(_) => "SortSelected",
        ListingMessage::SortToggled(_) => "SortToggled",
        ListingMessage::PageSelected(_) => "PageSelected",
        ListingMessage::NextPage => "NextPage",
        ListingMessage::PreviousPage => "PreviousPage",
        ListingMessage::Unmounted => "Unmounted",
    }
}
