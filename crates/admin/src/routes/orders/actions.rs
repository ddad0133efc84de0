//! Single order action handlers.
//!
//! Every action re-fetches the order and re-derives its eligibility before
//! touching the backend; the frontend's own checks are advisory only.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use suriya_core::{
    OrderId, ThaiPostTracking,
    classify_order,
    eligibility::{can_cancel, can_confirm_payment, can_mark_completed, can_update_tracking},
};

use crate::{
    error::AppError,
    platform::{ConfirmPaymentRequest, OrderTransactionRecord, UpdateOrderStatusRequest},
    state::AppState,
};

use super::types::{ConfirmPaymentInput, TrackingInput};

/// Response for a successful action.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    /// Order the action applied to.
    pub order_id: OrderId,
    /// Raw order status after the action.
    pub order_status: String,
}

/// Assign a Thai Post tracking number to an order.
#[instrument(skip(state, input))]
pub async fn update_tracking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<TrackingInput>,
) -> Result<Json<ActionResponse>, AppError> {
    let tracking = ThaiPostTracking::parse(&input.tracking_number)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let order_id = OrderId::new(id);
    let order = state.platform().get_order(order_id).await?;

    let tracking_status = state.tracking().status_for(&order).await;
    let category = classify_order(&order, tracking_status);
    if !can_update_tracking(&order, category) {
        return Err(AppError::ActionNotAllowed(format!(
            "order {order_id} cannot take a tracking number in its current state"
        )));
    }

    state.platform().update_tracking(order_id, &tracking).await?;

    let order_status = order.order_status.clone();
    let mut snapshot = order;
    snapshot.tracking_number = Some(tracking.as_str().to_string());
    state
        .platform()
        .record_order_transaction(&OrderTransactionRecord { order: snapshot })
        .await;

    tracing::info!(order_id = %order_id, tracking = %tracking, "Tracking number assigned");

    Ok(Json(ActionResponse {
        order_id,
        order_status,
    }))
}

/// Send payment confirmation for an order.
#[instrument(skip(state, input))]
pub async fn confirm_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<ConfirmPaymentInput>,
) -> Result<Json<ActionResponse>, AppError> {
    let order_id = OrderId::new(id);
    let order = state.platform().get_order(order_id).await?;

    if !can_confirm_payment(&order) {
        return Err(AppError::ActionNotAllowed(format!(
            "payment for order {order_id} cannot be confirmed (already confirmed, tracked, or not yet paid)"
        )));
    }

    state
        .platform()
        .confirm_payment(&ConfirmPaymentRequest {
            order_id,
            notes: input.notes,
        })
        .await?;

    state
        .platform()
        .record_order_transaction(&OrderTransactionRecord {
            order: order.clone(),
        })
        .await;

    tracing::info!(order_id = %order_id, "Payment confirmation sent");

    Ok(Json(ActionResponse {
        order_id,
        order_status: order.order_status,
    }))
}

/// Mark a shipped order as completed.
#[instrument(skip(state))]
pub async fn mark_completed(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ActionResponse>, AppError> {
    let order_id = OrderId::new(id);
    let order = state.platform().get_order(order_id).await?;

    let tracking_status = state.tracking().status_for(&order).await;
    if !can_mark_completed(&order, tracking_status) {
        return Err(AppError::ActionNotAllowed(format!(
            "order {order_id} is not in a completable state"
        )));
    }

    state
        .platform()
        .update_order_status(&UpdateOrderStatusRequest {
            invoice_no: order.invoice_no.clone(),
            order_status: "completed".to_string(),
            tracking_number: order.tracking_number.clone(),
            notes: "Order marked as completed".to_string(),
        })
        .await?;

    state
        .platform()
        .record_order_transaction(&OrderTransactionRecord::after_status_change(
            order, "completed",
        ))
        .await;

    tracing::info!(order_id = %order_id, "Order marked as completed");

    Ok(Json(ActionResponse {
        order_id,
        order_status: "completed".to_string(),
    }))
}

/// Cancel an order.
#[instrument(skip(state))]
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ActionResponse>, AppError> {
    let order_id = OrderId::new(id);
    let order = state.platform().get_order(order_id).await?;

    let tracking_status = state.tracking().status_for(&order).await;
    let category = classify_order(&order, tracking_status);
    if !can_cancel(category) {
        return Err(AppError::ActionNotAllowed(format!(
            "order {order_id} is {category} and cannot be canceled"
        )));
    }

    state.platform().cancel_order(&order.invoice_no).await?;

    state
        .platform()
        .record_order_transaction(&OrderTransactionRecord::after_status_change(
            order, "cancelled",
        ))
        .await;

    tracing::info!(order_id = %order_id, "Order canceled");

    Ok(Json(ActionResponse {
        order_id,
        order_status: "cancelled".to_string(),
    }))
}
