//! Payments view handlers.
//!
//! The payments screen looks at the same orders as the orders screen but
//! classifies the money instead of the shipment, and flags rows a human
//! still needs to verify.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use suriya_core::{
    Order, OrderId, PaymentCategory, PaymentCounts, StatusSource, classify_payment,
    classify::needs_verification,
};

use crate::{error::AppError, state::AppState};

/// Query parameters for the payments list.
#[derive(Debug, Default, Deserialize)]
pub struct PaymentsQuery {
    /// Payment-category filter; absent means all orders.
    pub category: Option<String>,
}

/// Payment view for the admin list.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentSummary {
    /// Backend order ID.
    pub order_id: OrderId,
    /// Invoice or quotation number, depending on stage.
    pub reference: String,
    /// Customer display name.
    pub customer_name: String,
    /// Order total.
    pub total_amount: Decimal,
    /// Payment method key.
    pub payment_method: String,
    /// Derived payment category.
    pub category: PaymentCategory,
    /// Which status field decided the category.
    pub source: StatusSource,
    /// The raw status string that decided it.
    pub display_status: String,
    /// Whether this payment still needs manual verification.
    pub needs_verification: bool,
    /// Whether payment confirmation has already been sent.
    pub payment_confirmed: bool,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for PaymentSummary {
    fn from(order: &Order) -> Self {
        let classification = classify_payment(order);

        Self {
            order_id: order.order_id,
            reference: order.display_reference().to_string(),
            customer_name: order.customer_name(),
            total_amount: order.total_amount,
            payment_method: order.payment_method.clone(),
            category: classification.category,
            source: classification.source,
            display_status: classification.display_status,
            needs_verification: needs_verification(order),
            payment_confirmed: order.payment_confirmed,
            created_at: order.created_at,
        }
    }
}

/// Response for the payments list.
#[derive(Debug, Serialize)]
pub struct PaymentsResponse {
    /// Payments after the category filter.
    pub payments: Vec<PaymentSummary>,
    /// Counts over the full (unfiltered) order set, for the filter chips.
    pub counts: PaymentCounts,
}

/// Parse the optional category filter.
fn parse_category(query: &PaymentsQuery) -> Result<Option<PaymentCategory>, AppError> {
    query
        .category
        .as_deref()
        .filter(|c| *c != "all")
        .map(|c| c.parse::<PaymentCategory>().map_err(AppError::BadRequest))
        .transpose()
}

/// Payments list: fetch and classify by payment source precedence.
///
/// No tracking enrichment here - payment classification never looks at the
/// shipment.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PaymentsQuery>,
) -> Result<Json<PaymentsResponse>, AppError> {
    let filter = parse_category(&query)?;

    let orders = state.platform().list_orders().await?;

    let counts = PaymentCounts::tally(orders.iter().map(|o| classify_payment(o).category));

    let payments = orders
        .iter()
        .filter(|o| filter.is_none_or(|f| classify_payment(o).category == f))
        .map(PaymentSummary::from)
        .collect();

    Ok(Json(PaymentsResponse { payments, counts }))
}

/// Per-category payment counts for the filter chips.
#[instrument(skip(state))]
pub async fn counts(State(state): State<AppState>) -> Result<Json<PaymentCounts>, AppError> {
    let orders = state.platform().list_orders().await?;
    let counts = PaymentCounts::tally(orders.iter().map(|o| classify_payment(o).category));
    Ok(Json(counts))
}
