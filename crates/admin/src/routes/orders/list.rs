//! Orders list and counts handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Serialize;
use tracing::instrument;

use suriya_core::{CategoryCounts, EffectiveCategory};

use crate::{error::AppError, state::AppState};

use super::types::{OrderSummary, OrdersQuery};

/// Response for the orders list.
#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    /// Orders after the category filter.
    pub orders: Vec<OrderSummary>,
    /// Counts over the full (unfiltered) order set, for the filter chips.
    pub counts: CategoryCounts,
}

/// Parse the optional category filter.
fn parse_category(query: &OrdersQuery) -> Result<Option<EffectiveCategory>, AppError> {
    query
        .category
        .as_deref()
        .filter(|c| *c != "all")
        .map(|c| {
            c.parse::<EffectiveCategory>()
                .map_err(AppError::BadRequest)
        })
        .transpose()
}

/// Orders list: fetch, enrich with tracking, classify, filter.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<OrdersResponse>, AppError> {
    let filter = parse_category(&query)?;

    let orders = state.platform().list_orders().await?;
    let tracked = state.tracking().enrich(orders).await;

    let counts = CategoryCounts::tally(tracked.iter().map(crate::tracking::TrackedOrder::category));

    let orders = tracked
        .iter()
        .filter(|t| filter.is_none_or(|f| t.category() == f))
        .map(OrderSummary::from)
        .collect();

    Ok(Json(OrdersResponse { orders, counts }))
}

/// Per-category order counts for the filter chips.
#[instrument(skip(state))]
pub async fn counts(State(state): State<AppState>) -> Result<Json<CategoryCounts>, AppError> {
    let orders = state.platform().list_orders().await?;
    let tracked = state.tracking().enrich(orders).await;
    let counts = CategoryCounts::tally(tracked.iter().map(crate::tracking::TrackedOrder::category));
    Ok(Json(counts))
}
