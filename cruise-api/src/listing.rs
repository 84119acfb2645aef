use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use cruise_core::{ListingController, ListingMessage, ListingView, SortDirection, SortField, SortOrder};
use serde::Deserialize;

use crate::error::AppError;
use crate::render;
use crate::state::AppState;

/// `?page=2&sort=price&dir=desc`
#[derive(Debug, Deserialize, Default)]
pub struct ListingQuery {
    pub page: Option<usize>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

impl ListingQuery {
    /// UI messages equivalent to the query, applied after the initial fetch.
    /// Sort comes first so that an explicit page survives the sort reset.
    pub fn messages(&self, initial: SortOrder) -> Result<Vec<ListingMessage>, AppError> {
        let mut messages = Vec::new();

        if self.sort.is_some() || self.dir.is_some() {
            let field = match self.sort.as_deref() {
                Some(field) => field.parse::<SortField>()?,
                None => initial.field,
            };
            let direction = match self.dir.as_deref() {
                Some(dir) => dir.parse::<SortDirection>()?,
                None => SortDirection::Asc,
            };
            messages.push(ListingMessage::SortSelected(SortOrder::new(field, direction)));
        }

        if let Some(page) = self.page {
            messages.push(ListingMessage::PageSelected(page));
        }

        Ok(messages)
    }
}

async fn build_view(state: &AppState, query: &ListingQuery) -> Result<ListingView, AppError> {
    let messages = query.messages(state.listing.initial_sort)?;

    let mut controller = ListingController::new(state.listing.clone());
    state.driver.dispatch(&mut controller, ListingMessage::Mounted).await;
    for message in messages {
        state.driver.dispatch(&mut controller, message).await;
    }

    let view = controller.view();
    controller.update(ListingMessage::Unmounted);
    Ok(view)
}

/// GET /
/// Rendered listing page
pub async fn listing_page(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Html<String>, AppError> {
    let view = build_view(&state, &query).await?;
    Ok(Html(render::render_page(&view)))
}

/// GET /api/listing
/// Same view model as the page, as JSON
pub async fn listing_json(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ListingView>, AppError> {
    let view = build_view(&state, &query).await?;
    Ok(Json(view))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_to_messages() {
        let query = ListingQuery {
            page: Some(3),
            sort: Some("price".into()),
            dir: Some("desc".into()),
        };
        let messages = query.messages(SortOrder::default()).unwrap();
        assert_eq!(messages.len(), 2);
        assert!(matches!(
            messages[0],
            ListingMessage::SortSelected(SortOrder { field: SortField::Price, direction: SortDirection::Desc })
        ));
        assert!(matches!(messages[1], ListingMessage::PageSelected(3)));
    }

    #[test]
    fn test_direction_only_keeps_initial_field() {
        let query = ListingQuery { dir: Some("desc".into()), ..Default::default() };
        let messages = query.messages(SortOrder::default()).unwrap();
        assert!(matches!(
            messages[0],
            ListingMessage::SortSelected(SortOrder { field: SortField::DepartureDate, direction: SortDirection::Desc })
        ));
    }

    #[test]
    fn test_unknown_sort_is_rejected() {
        let query = ListingQuery { sort: Some("rating".into()), ..Default::default() };
        assert!(matches!(query.messages(SortOrder::default()), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_empty_query() {
        assert!(ListingQuery::default().messages(SortOrder::default()).unwrap().is_empty());
    }
}
