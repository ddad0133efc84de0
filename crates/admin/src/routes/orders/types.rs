//! Type definitions and conversions for order views.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use suriya_core::{
    EffectiveCategory, OrderId, TrackingStatus,
    eligibility::{can_cancel, can_confirm_payment, can_mark_completed, can_update_tracking},
};

use crate::tracking::TrackedOrder;

// =============================================================================
// Query Parameters
// =============================================================================

/// Query parameters for the orders list.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    /// Effective-category filter; absent means all orders.
    pub category: Option<String>,
}

// =============================================================================
// Request Bodies
// =============================================================================

/// Body for `PUT /orders/{id}/tracking`.
#[derive(Debug, Deserialize)]
pub struct TrackingInput {
    /// Thai Post tracking number to assign.
    pub tracking_number: String,
}

/// Body for `POST /orders/{id}/confirm-payment`.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmPaymentInput {
    /// Optional verification note from the admin.
    #[serde(default)]
    pub notes: Option<String>,
}

// =============================================================================
// View Types
// =============================================================================

/// Actions the admin may take on an order, derived server-side.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrderActions {
    pub mark_completed: bool,
    pub confirm_payment: bool,
    pub update_tracking: bool,
    pub cancel: bool,
}

/// Order view for the admin list.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    /// Backend order ID.
    pub order_id: OrderId,
    /// Invoice or quotation number, depending on stage.
    pub reference: String,
    /// Customer display name.
    pub customer_name: String,
    /// Customer email.
    pub customer_email: Option<String>,
    /// Order total.
    pub total_amount: Decimal,
    /// Payment method key.
    pub payment_method: String,
    /// Raw backend status, for display.
    pub order_status: String,
    /// Tracking field as stored.
    pub tracking_number: Option<String>,
    /// Derived tracking status.
    pub tracking_status: Option<TrackingStatus>,
    /// Derived effective category.
    pub category: EffectiveCategory,
    /// Server-derived action eligibility.
    pub actions: OrderActions,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// When the order was last modified.
    pub updated_at: DateTime<Utc>,
}

impl From<&TrackedOrder> for OrderSummary {
    fn from(tracked: &TrackedOrder) -> Self {
        let order = &tracked.order;
        let category = tracked.category();

        Self {
            order_id: order.order_id,
            reference: order.display_reference().to_string(),
            customer_name: order.customer_name(),
            customer_email: order.email.clone(),
            total_amount: order.total_amount,
            payment_method: order.payment_method.clone(),
            order_status: order.order_status.clone(),
            tracking_number: order.tracking_number.clone(),
            tracking_status: tracked.tracking_status,
            category,
            actions: OrderActions {
                mark_completed: can_mark_completed(order, tracked.tracking_status),
                confirm_payment: can_confirm_payment(order),
                update_tracking: can_update_tracking(order, category),
                cancel: can_cancel(category),
            },
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use suriya_core::Order;

    fn tracked(status: &str, tracking: Option<&str>, ts: Option<TrackingStatus>) -> TrackedOrder {
        TrackedOrder {
            order: Order {
                order_id: OrderId::new(7),
                invoice_no: "INV-0007".to_string(),
                quotation_no: Some("QT-0007".to_string()),
                first_name: "Niran".to_string(),
                last_name: "Chai".to_string(),
                email: Some("niran@example.com".to_string()),
                total_amount: Decimal::new(50_000, 2),
                payment_method: "credit_card".to_string(),
                order_status: status.to_string(),
                payment_status: None,
                transaction_status: None,
                tracking_number: tracking.map(ToString::to_string),
                payment_confirmed: false,
                created_at: "2024-06-01T08:00:00Z".parse().expect("timestamp"),
                updated_at: "2024-06-01T08:00:00Z".parse().expect("timestamp"),
            },
            tracking_status: ts,
        }
    }

    #[test]
    fn test_summary_derives_category_and_actions() {
        let t = tracked("Payment accepted", None, None);
        let summary = OrderSummary::from(&t);

        assert_eq!(summary.category, EffectiveCategory::Processing);
        assert_eq!(summary.reference, "INV-0007");
        assert!(summary.actions.confirm_payment);
        assert!(summary.actions.cancel);
        assert!(!summary.actions.mark_completed);
    }

    #[test]
    fn test_summary_for_shipped_order() {
        let t = tracked(
            "Shipped",
            Some("EF582621151TH"),
            Some(TrackingStatus::Pending),
        );
        let summary = OrderSummary::from(&t);

        assert_eq!(summary.category, EffectiveCategory::Shipped);
        assert!(summary.actions.mark_completed);
        assert!(!summary.actions.confirm_payment);
        assert!(!summary.actions.cancel);
    }

    #[test]
    fn test_summary_pending_uses_quotation_reference() {
        let t = tracked("pending", None, None);
        let summary = OrderSummary::from(&t);
        assert_eq!(summary.reference, "QT-0007");
        assert_eq!(summary.category, EffectiveCategory::Pending);
    }
}
