pub mod models;
pub mod normalize;
pub mod sorting;
pub mod pagination;
pub mod format;
pub mod fetch;
pub mod source;
pub mod view;
pub mod listing;

pub use models::{Cruise, CruiseResults, Ship, ShipLine};
pub use fetch::{FetchError, FetchState, FetchTicket};
pub use sorting::{SortDirection, SortField, SortOrder};
pub use pagination::{Page, PageLink, PageSize};
pub use source::CruiseSource;
pub use view::ListingView;
pub use listing::{ListingCommand, ListingController, ListingMessage, ListingSettings};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Unknown sort option: {0}")]
    UnknownSortOption(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
