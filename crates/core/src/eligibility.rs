//! Action-eligibility predicates.
//!
//! Each admin action has preconditions derived from the order's raw status
//! and tracking state. The HTTP layer re-checks these server-side before
//! forwarding anything to the backend, so a stale frontend cannot push an
//! order into a state it should not reach.

use crate::types::{EffectiveCategory, Order, TrackingStatus};

/// Order statuses that mean the payment has been accepted.
const PAYMENT_ACCEPTED_STATUSES: [&str; 3] = ["payment accepted", "paid", "remote payment accepted"];

/// Whether an order may be marked as completed.
///
/// Requires a tracking number (nothing untracked gets completed by hand),
/// refuses anything already delivered or completed, and otherwise accepts
/// orders that are demonstrably moving: shipped/preparing statuses, an
/// accepted payment, or a tracking status of shipped/pending.
#[must_use]
pub fn can_mark_completed(order: &Order, tracking: Option<TrackingStatus>) -> bool {
    if !order.has_tracking() {
        return false;
    }

    let status = order.order_status.to_lowercase();

    if tracking == Some(TrackingStatus::Delivered)
        || status == "completed"
        || status == "delivered"
    {
        return false;
    }

    status.contains("shipped")
        || status.contains("preparing")
        || PAYMENT_ACCEPTED_STATUSES.contains(&status.as_str())
        || matches!(
            tracking,
            Some(TrackingStatus::Shipped | TrackingStatus::Pending)
        )
}

/// Whether payment confirmation may be sent for an order.
///
/// Only before fulfilment starts: no tracking number assigned, not already
/// confirmed, and the backend says the payment has been accepted.
#[must_use]
pub fn can_confirm_payment(order: &Order) -> bool {
    if order.has_tracking() || order.payment_confirmed {
        return false;
    }

    let status = order.order_status.to_lowercase();
    PAYMENT_ACCEPTED_STATUSES.contains(&status.as_str())
}

/// Whether an order may be canceled.
///
/// Anything not yet handed to a carrier and not already terminal can be
/// canceled.
#[must_use]
pub const fn can_cancel(category: EffectiveCategory) -> bool {
    !matches!(
        category,
        EffectiveCategory::Completed | EffectiveCategory::Shipped | EffectiveCategory::Canceled
    )
}

/// Whether a tracking number may be assigned or replaced.
///
/// Terminal orders keep their tracking history, and pending orders have
/// nothing to ship yet.
#[must_use]
pub fn can_update_tracking(order: &Order, category: EffectiveCategory) -> bool {
    let status = order.order_status.to_lowercase();
    status != "cancelled"
        && status != "completed"
        && status != "delivered"
        && category != EffectiveCategory::Pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::order::test_support::{order, order_with_tracking};

    #[test]
    fn test_mark_completed_requires_tracking() {
        assert!(!can_mark_completed(&order("Shipped"), None));

        let mut o = order("Shipped");
        o.tracking_number = Some("  ".to_string());
        assert!(!can_mark_completed(&o, None));
    }

    #[test]
    fn test_mark_completed_refuses_already_done() {
        let o = order_with_tracking("Completed", "EF582621151TH");
        assert!(!can_mark_completed(&o, None));

        let o = order_with_tracking("Shipped", "EF582621151TH");
        assert!(!can_mark_completed(&o, Some(TrackingStatus::Delivered)));
    }

    #[test]
    fn test_mark_completed_moving_orders() {
        let o = order_with_tracking("Shipped", "EF582621151TH");
        assert!(can_mark_completed(&o, None));

        let o = order_with_tracking("Preparing the order", "EF582621151TH");
        assert!(can_mark_completed(&o, None));

        let o = order_with_tracking("Payment accepted", "EF582621151TH");
        assert!(can_mark_completed(&o, None));

        // Status unhelpful, but tracking shows movement.
        let o = order_with_tracking("unknown-garbage-value", "EF582621151TH");
        assert!(can_mark_completed(&o, Some(TrackingStatus::Pending)));
        assert!(!can_mark_completed(&o, Some(TrackingStatus::Exception)));
    }

    #[test]
    fn test_confirm_payment_preconditions() {
        let o = order("Payment accepted");
        assert!(can_confirm_payment(&o));

        // Case-insensitive status comparison.
        let o = order("PAID");
        assert!(can_confirm_payment(&o));

        // Tracking assigned: fulfilment already started.
        let o = order_with_tracking("Payment accepted", "EF582621151TH");
        assert!(!can_confirm_payment(&o));

        // Already confirmed by the backend.
        let mut o = order("Payment accepted");
        o.payment_confirmed = true;
        assert!(!can_confirm_payment(&o));

        // Payment not accepted yet.
        let o = order("Awaiting bank wire payment");
        assert!(!can_confirm_payment(&o));
    }

    #[test]
    fn test_update_tracking_gating() {
        let o = order("Payment accepted");
        assert!(can_update_tracking(&o, EffectiveCategory::Processing));

        // Pending orders have nothing to ship.
        let o = order("Awaiting bank wire payment");
        assert!(!can_update_tracking(&o, EffectiveCategory::Pending));

        // Terminal statuses are immutable.
        for status in ["cancelled", "Completed", "Delivered"] {
            let o = order(status);
            assert!(!can_update_tracking(&o, EffectiveCategory::Processing), "{status}");
        }
    }

    #[test]
    fn test_can_cancel_by_category() {
        assert!(can_cancel(EffectiveCategory::Pending));
        assert!(can_cancel(EffectiveCategory::Processing));
        assert!(can_cancel(EffectiveCategory::Error));
        assert!(can_cancel(EffectiveCategory::Unknown));
        assert!(!can_cancel(EffectiveCategory::Shipped));
        assert!(!can_cancel(EffectiveCategory::Completed));
        assert!(!can_cancel(EffectiveCategory::Canceled));
    }
}
