//! Request and response bodies for the platform API.

use serde::{Deserialize, Serialize};
use suriya_core::{Order, OrderId};

/// Body for `PATCH /order/updateStatus`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateOrderStatusRequest {
    /// Invoice number identifying the order.
    pub invoice_no: String,
    /// New raw order status.
    pub order_status: String,
    /// Tracking number to keep alongside the status, if any.
    pub tracking_number: Option<String>,
    /// Free-text audit note.
    pub notes: String,
}

/// Body for `PATCH /order/{id}/tracking`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateTrackingRequest {
    /// Validated Thai Post tracking number.
    pub tracking_number: String,
}

/// Body for `PATCH /payment/order/status/{invoice_no}` (cancellation).
#[derive(Debug, Clone, Serialize)]
pub struct CancelOrderRequest {
    /// Always `cancelled`; the backend keys off this string.
    pub order_status: String,
    /// Free-text audit note.
    pub notes: String,
}

impl CancelOrderRequest {
    /// Standard admin cancellation body.
    #[must_use]
    pub fn by_admin() -> Self {
        Self {
            order_status: "cancelled".to_string(),
            notes: "Order canceled by admin".to_string(),
        }
    }
}

/// Body for `POST /order/confirmPayment`.
///
/// The backend marks the order confirmed and sends the customer email;
/// confirmation state lives server-side, not in this service.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmPaymentRequest {
    /// Order to confirm.
    pub order_id: OrderId,
    /// Optional verification note from the admin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body for `POST /order/orderTransaction`.
///
/// An append-only audit record the backend keeps per mutation. It wants the
/// order snapshot with the status the mutation just applied.
#[derive(Debug, Clone, Serialize)]
pub struct OrderTransactionRecord {
    /// Order snapshot after the mutation.
    #[serde(flatten)]
    pub order: Order,
}

impl OrderTransactionRecord {
    /// Snapshot an order with its post-mutation status.
    #[must_use]
    pub fn after_status_change(mut order: Order, order_status: &str) -> Self {
        order.order_status = order_status.to_string();
        Self { order }
    }
}

/// Generic acknowledgement the backend returns for mutations.
///
/// Some endpoints answer `{}`; an absent `success` field means the 2xx
/// status is the whole answer.
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    /// Whether the mutation was applied.
    #[serde(default = "default_true")]
    pub success: bool,
    /// Optional human-readable detail.
    #[serde(default)]
    pub message: Option<String>,
}

const fn default_true() -> bool {
    true
}

impl Ack {
    /// Treat a `success: false` acknowledgement as an API error.
    pub(crate) fn into_result(self) -> Result<(), super::PlatformApiError> {
        if self.success {
            Ok(())
        } else {
            Err(super::PlatformApiError::Api {
                status: 200,
                message: self
                    .message
                    .unwrap_or_else(|| "backend reported failure".to_string()),
            })
        }
    }
}
