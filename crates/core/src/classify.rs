//! Order and payment status classification.
//!
//! The backend stores order status as free text, and three different admin
//! views used to carry three slightly different copies of the mapping rules.
//! This module is the single source of truth: one table per status source,
//! one precedence chain per view.
//!
//! Both classifiers are total and deterministic - every input combination
//! maps to exactly one category, with `Unknown` as the terminal fallback.

use crate::types::{EffectiveCategory, Order, PaymentCategory, TrackingStatus};

// =============================================================================
// Order classification
// =============================================================================

/// Static status -> category table, keyed by the exact strings the backend
/// emits. Unrecognized statuses fall through to the keyword rules.
fn status_table(status: &str) -> Option<EffectiveCategory> {
    match status {
        "Awaiting check payment"
        | "Awaiting bank wire payment"
        | "Awaiting PayPal payment"
        | "Awaiting Cash-on-delivery payment"
        | "On pre-order (paid)"
        | "On pre-order (not paid)" => Some(EffectiveCategory::Pending),
        "Payment accepted" | "Remote payment accepted" | "Preparing the order" | "paid" => {
            Some(EffectiveCategory::Processing)
        }
        "Shipped" => Some(EffectiveCategory::Shipped),
        "Delivered" | "Completed" => Some(EffectiveCategory::Completed),
        "Canceled" | "Refunded" => Some(EffectiveCategory::Canceled),
        "Payment error" => Some(EffectiveCategory::Error),
        _ => None,
    }
}

/// Keyword fallback for statuses the table does not know.
fn keyword_category(lower_status: &str) -> Option<EffectiveCategory> {
    const GROUPS: [(&[&str], EffectiveCategory); 5] = [
        (
            &["pending", "awaiting", "waiting"],
            EffectiveCategory::Pending,
        ),
        (
            &["processing", "preparing", "accepted"],
            EffectiveCategory::Processing,
        ),
        (&["shipped", "shipping"], EffectiveCategory::Shipped),
        (&["cancel", "refund"], EffectiveCategory::Canceled),
        (&["error", "failed"], EffectiveCategory::Error),
    ];

    GROUPS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower_status.contains(k)))
        .map(|&(_, category)| category)
}

/// Classify an order into its effective category.
///
/// Rules are evaluated in strict precedence, first match wins:
///
/// 1. status says completed/delivered (case-insensitive);
/// 2. tracking says delivered;
/// 3. tracking says shipped or pending (parcel exists, it is on its way);
/// 4. tracking says exception - trust the explicit status if the table knows
///    it, otherwise it is an error;
/// 5. the static status table;
/// 6. keyword matching on the lowercased status;
/// 7. unknown.
///
/// Tracking rules only apply when the order actually has a tracking number;
/// a stale tracking status without one is ignored.
#[must_use]
pub fn classify_order(order: &Order, tracking: Option<TrackingStatus>) -> EffectiveCategory {
    let lower_status = order.order_status.to_lowercase();

    if lower_status == "completed" || lower_status == "delivered" {
        return EffectiveCategory::Completed;
    }

    if order.has_tracking() {
        match tracking {
            Some(TrackingStatus::Delivered) => return EffectiveCategory::Completed,
            Some(TrackingStatus::Shipped | TrackingStatus::Pending) => {
                return EffectiveCategory::Shipped;
            }
            Some(TrackingStatus::Exception) => {
                return status_table(&order.order_status).unwrap_or(EffectiveCategory::Error);
            }
            None => {}
        }
    }

    status_table(&order.order_status)
        .or_else(|| keyword_category(&lower_status))
        .unwrap_or(EffectiveCategory::Unknown)
}

// =============================================================================
// Payment classification
// =============================================================================

/// Which order field decided the payment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusSource {
    /// The gateway's `payment_status` field.
    PaymentStatus,
    /// The gateway's `transaction_status` field.
    TransactionStatus,
    /// The order's own status string.
    OrderStatus,
}

/// Result of classifying an order's payment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PaymentClassification {
    /// Derived payment category.
    pub category: PaymentCategory,
    /// Which field the category came from.
    pub source: StatusSource,
    /// The raw status string that decided it, for display.
    pub display_status: String,
}

/// Gateway `payment_status` vocabulary.
fn payment_status_table(status: &str) -> Option<PaymentCategory> {
    match status {
        "pending" => Some(PaymentCategory::Pending),
        "completed" => Some(PaymentCategory::Confirmed),
        "failed" => Some(PaymentCategory::Failed),
        "cancelled" => Some(PaymentCategory::Canceled),
        "refunded" => Some(PaymentCategory::Refunded),
        "processing" => Some(PaymentCategory::Processing),
        _ => None,
    }
}

/// Gateway `transaction_status` vocabulary. No refunds at this level; a
/// refund is only ever reported through `payment_status`.
fn transaction_status_table(status: &str) -> Option<PaymentCategory> {
    match status {
        "pending" => Some(PaymentCategory::Pending),
        "completed" => Some(PaymentCategory::Confirmed),
        "failed" => Some(PaymentCategory::Failed),
        "cancelled" => Some(PaymentCategory::Canceled),
        "processing" => Some(PaymentCategory::Processing),
        _ => None,
    }
}

/// Order-status vocabulary as seen from the payments side.
fn order_payment_table(status: &str) -> Option<PaymentCategory> {
    match status {
        "Awaiting check payment"
        | "Awaiting bank wire payment"
        | "Awaiting PayPal payment"
        | "Awaiting Cash-on-delivery payment"
        | "On pre-order (not paid)"
        | "pending" => Some(PaymentCategory::Pending),
        "Payment accepted"
        | "Remote payment accepted"
        | "Preparing the order"
        | "Shipped"
        | "Delivered"
        | "On pre-order (paid)"
        | "paid" => Some(PaymentCategory::Confirmed),
        "Canceled" => Some(PaymentCategory::Canceled),
        "Refunded" => Some(PaymentCategory::Refunded),
        "Payment error" => Some(PaymentCategory::Failed),
        _ => None,
    }
}

/// Classify an order's payment.
///
/// Precedence: order cancellation short-circuits everything, then the
/// gateway's `payment_status`, then `transaction_status`, then the order
/// status table, then unknown. Each source only decides when its value is
/// present *and* in its vocabulary; an unrecognized `payment_status` falls
/// through to the next source rather than to unknown.
#[must_use]
pub fn classify_payment(order: &Order) -> PaymentClassification {
    let lower_status = order.order_status.to_lowercase();
    if lower_status == "cancelled" || lower_status == "canceled" {
        return PaymentClassification {
            category: PaymentCategory::Canceled,
            source: StatusSource::OrderStatus,
            display_status: "Cancelled".to_string(),
        };
    }

    if let Some(payment_status) = order.payment_status.as_deref()
        && let Some(category) = payment_status_table(&payment_status.to_lowercase())
    {
        return PaymentClassification {
            category,
            source: StatusSource::PaymentStatus,
            display_status: payment_status.to_string(),
        };
    }

    if let Some(transaction_status) = order.transaction_status.as_deref()
        && let Some(category) = transaction_status_table(&transaction_status.to_lowercase())
    {
        return PaymentClassification {
            category,
            source: StatusSource::TransactionStatus,
            display_status: transaction_status.to_string(),
        };
    }

    if let Some(category) = order_payment_table(&order.order_status) {
        return PaymentClassification {
            category,
            source: StatusSource::OrderStatus,
            display_status: order.order_status.clone(),
        };
    }

    PaymentClassification {
        category: PaymentCategory::Unknown,
        source: StatusSource::OrderStatus,
        display_status: order.order_status.clone(),
    }
}

/// Whether a payment still needs a human to look at it.
///
/// Gateway statuses in flight always do. Manual methods (bank wire, transfer,
/// check) need eyes while the order still says awaiting/pending - nobody
/// verifies a slip automatically.
#[must_use]
pub fn needs_verification(order: &Order) -> bool {
    if let Some(status) = order.payment_status.as_deref() {
        let status = status.to_lowercase();
        if status == "pending" || status == "processing" {
            return true;
        }
    }

    if let Some(status) = order.transaction_status.as_deref() {
        let status = status.to_lowercase();
        if status == "pending" || status == "processing" {
            return true;
        }
    }

    let method = order.payment_method.to_lowercase();
    if method.contains("bank") || method.contains("transfer") || method.contains("check") {
        let status = order.order_status.to_lowercase();
        return status.contains("awaiting") || status.contains("pending");
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::order::test_support::{order, order_with_tracking};

    #[test]
    fn test_completed_status_wins_over_everything() {
        let mut o = order_with_tracking("Completed", "EF123456789TH");
        // Even an exception from tracking cannot un-complete an order.
        assert_eq!(
            classify_order(&o, Some(TrackingStatus::Exception)),
            EffectiveCategory::Completed
        );
        o.order_status = "delivered".to_string();
        assert_eq!(classify_order(&o, None), EffectiveCategory::Completed);
    }

    #[test]
    fn test_tracking_delivered_completes() {
        let o = order_with_tracking("Shipped", "EF123456789TH");
        assert_eq!(
            classify_order(&o, Some(TrackingStatus::Delivered)),
            EffectiveCategory::Completed
        );
    }

    #[test]
    fn test_tracking_in_flight_is_shipped() {
        let o = order_with_tracking("Shipped", "EF123456789TH");
        assert_eq!(
            classify_order(&o, Some(TrackingStatus::Pending)),
            EffectiveCategory::Shipped
        );
        assert_eq!(
            classify_order(&o, Some(TrackingStatus::Shipped)),
            EffectiveCategory::Shipped
        );
    }

    #[test]
    fn test_tracking_exception_prefers_explicit_status() {
        // Known status: the table's category survives the exception.
        let o = order_with_tracking("Preparing the order", "EF123456789TH");
        assert_eq!(
            classify_order(&o, Some(TrackingStatus::Exception)),
            EffectiveCategory::Processing
        );

        // Unknown status: the exception is all we have.
        let o = order_with_tracking("weird backend value", "EF123456789TH");
        assert_eq!(
            classify_order(&o, Some(TrackingStatus::Exception)),
            EffectiveCategory::Error
        );
    }

    #[test]
    fn test_tracking_status_ignored_without_tracking_number() {
        let o = order("Payment accepted");
        assert_eq!(
            classify_order(&o, Some(TrackingStatus::Delivered)),
            EffectiveCategory::Processing
        );
    }

    #[test]
    fn test_status_table_exact_strings() {
        let cases = [
            ("Awaiting bank wire payment", EffectiveCategory::Pending),
            ("On pre-order (not paid)", EffectiveCategory::Pending),
            ("Payment accepted", EffectiveCategory::Processing),
            ("paid", EffectiveCategory::Processing),
            ("Shipped", EffectiveCategory::Shipped),
            ("Delivered", EffectiveCategory::Completed),
            ("Canceled", EffectiveCategory::Canceled),
            ("Refunded", EffectiveCategory::Canceled),
            ("Payment error", EffectiveCategory::Error),
        ];
        for (status, expected) in cases {
            assert_eq!(classify_order(&order(status), None), expected, "{status}");
        }
    }

    #[test]
    fn test_keyword_fallback() {
        let cases = [
            ("still waiting on slip", EffectiveCategory::Pending),
            ("order accepted by shop", EffectiveCategory::Processing),
            ("shipping soon", EffectiveCategory::Shipped),
            ("customer cancelled", EffectiveCategory::Canceled),
            ("refund issued", EffectiveCategory::Canceled),
            ("gateway failed", EffectiveCategory::Error),
        ];
        for (status, expected) in cases {
            assert_eq!(classify_order(&order(status), None), expected, "{status}");
        }
    }

    #[test]
    fn test_garbage_status_is_unknown() {
        assert_eq!(
            classify_order(&order("unknown-garbage-value"), None),
            EffectiveCategory::Unknown
        );
    }

    #[test]
    fn test_classify_order_is_total_and_idempotent() {
        let statuses = [
            "Completed",
            "Shipped",
            "Payment accepted",
            "unknown-garbage-value",
            "",
            "ส่งของแล้ว",
        ];
        let trackings = [
            None,
            Some(TrackingStatus::Pending),
            Some(TrackingStatus::Shipped),
            Some(TrackingStatus::Delivered),
            Some(TrackingStatus::Exception),
        ];
        for status in statuses {
            for tracking in trackings {
                let o = order_with_tracking(status, "EF123456789TH");
                let first = classify_order(&o, tracking);
                let second = classify_order(&o, tracking);
                assert_eq!(first, second);
                assert!(EffectiveCategory::ALL.contains(&first));
            }
        }
    }

    #[test]
    fn test_payment_cancellation_short_circuits() {
        let mut o = order("cancelled");
        o.payment_status = Some("completed".to_string());
        let c = classify_payment(&o);
        assert_eq!(c.category, PaymentCategory::Canceled);
        assert_eq!(c.source, StatusSource::OrderStatus);
    }

    #[test]
    fn test_payment_status_beats_transaction_status() {
        let mut o = order("Awaiting bank wire payment");
        o.payment_status = Some("completed".to_string());
        o.transaction_status = Some("failed".to_string());
        let c = classify_payment(&o);
        assert_eq!(c.category, PaymentCategory::Confirmed);
        assert_eq!(c.source, StatusSource::PaymentStatus);
        assert_eq!(c.display_status, "completed");
    }

    #[test]
    fn test_unrecognized_payment_status_falls_through() {
        let mut o = order("Awaiting bank wire payment");
        o.payment_status = Some("definitely-not-a-status".to_string());
        o.transaction_status = Some("processing".to_string());
        let c = classify_payment(&o);
        assert_eq!(c.category, PaymentCategory::Processing);
        assert_eq!(c.source, StatusSource::TransactionStatus);
    }

    #[test]
    fn test_payment_order_status_table() {
        let c = classify_payment(&order("Awaiting PayPal payment"));
        assert_eq!(c.category, PaymentCategory::Pending);
        assert_eq!(c.source, StatusSource::OrderStatus);

        let c = classify_payment(&order("Shipped"));
        assert_eq!(c.category, PaymentCategory::Confirmed);

        let c = classify_payment(&order("Refunded"));
        assert_eq!(c.category, PaymentCategory::Refunded);

        let c = classify_payment(&order("Payment error"));
        assert_eq!(c.category, PaymentCategory::Failed);
    }

    #[test]
    fn test_payment_unknown_fallback() {
        let c = classify_payment(&order("unknown-garbage-value"));
        assert_eq!(c.category, PaymentCategory::Unknown);
        assert_eq!(c.display_status, "unknown-garbage-value");
    }

    #[test]
    fn test_needs_verification() {
        // In-flight gateway status.
        let mut o = order("Shipped");
        o.payment_status = Some("processing".to_string());
        assert!(needs_verification(&o));

        // Manual method still awaiting payment.
        let o = order("Awaiting bank wire payment");
        assert!(needs_verification(&o));

        // Manual method, already accepted.
        let o = order("Payment accepted");
        assert!(!needs_verification(&o));

        // Card payment awaiting: the gateway will tell us, no human needed.
        let mut o = order("Awaiting check payment");
        o.payment_method = "credit_card".to_string();
        assert!(!needs_verification(&o));
    }
}
