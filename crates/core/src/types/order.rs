//! The order record as the platform backend returns it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OrderId;

/// An order from the platform backend.
///
/// `order_status` is free text owned by the backend; known values are mapped
/// by [`crate::classify`], everything else falls through the keyword rules.
/// `tracking_number` is equally loose - it usually holds a Thai Post barcode
/// but may carry carrier status text, which the tracking inference exploits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Backend-assigned order ID.
    pub order_id: OrderId,
    /// Invoice number, assigned once the order leaves the quotation stage.
    pub invoice_no: String,
    /// Quotation number, the reference while the order is still pending.
    #[serde(default)]
    pub quotation_no: Option<String>,
    /// Customer first name.
    #[serde(default)]
    pub first_name: String,
    /// Customer last name.
    #[serde(default)]
    pub last_name: String,
    /// Customer email.
    #[serde(default)]
    pub email: Option<String>,
    /// Order total.
    pub total_amount: Decimal,
    /// Payment method key (`credit_card`, `bank_transfer`, ...).
    #[serde(default)]
    pub payment_method: String,
    /// Raw order status string.
    pub order_status: String,
    /// Gateway payment status, when the payment service has reported one.
    #[serde(default)]
    pub payment_status: Option<String>,
    /// Gateway transaction status, when a transaction exists.
    #[serde(default)]
    pub transaction_status: Option<String>,
    /// Tracking field; barcode or carrier status text.
    #[serde(default)]
    pub tracking_number: Option<String>,
    /// Whether payment confirmation has already been sent for this order.
    #[serde(default)]
    pub payment_confirmed: bool,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// When the order was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Customer display name: first + last, email as fallback, "Guest" last.
    #[must_use]
    pub fn customer_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string();
        if !name.is_empty() {
            return name;
        }
        self.email.clone().unwrap_or_else(|| "Guest".to_string())
    }

    /// The reference shown to admins for this order.
    ///
    /// Orders still in the `pending` stage are identified by their quotation
    /// number; once payment moves them along, the invoice number takes over.
    #[must_use]
    pub fn display_reference(&self) -> &str {
        if self.order_status.eq_ignore_ascii_case("pending")
            && let Some(quotation) = &self.quotation_no
            && !quotation.is_empty()
        {
            return quotation;
        }
        &self.invoice_no
    }

    /// Whether a non-blank tracking value has been assigned.
    #[must_use]
    pub fn has_tracking(&self) -> bool {
        self.tracking_number
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::order;
    use super::*;

    #[test]
    fn test_customer_name_fallbacks() {
        let mut o = order("pending");
        assert_eq!(o.customer_name(), "Somchai Jaidee");

        o.first_name.clear();
        o.last_name.clear();
        assert_eq!(o.customer_name(), "somchai@example.com");

        o.email = None;
        assert_eq!(o.customer_name(), "Guest");
    }

    #[test]
    fn test_display_reference_by_stage() {
        let o = order("pending");
        assert_eq!(o.display_reference(), "QT-0001");

        let o = order("Payment accepted");
        assert_eq!(o.display_reference(), "INV-0001");

        // Pending order without a quotation still has something to show.
        let mut o = order("pending");
        o.quotation_no = None;
        assert_eq!(o.display_reference(), "INV-0001");
    }

    #[test]
    fn test_has_tracking_ignores_blank() {
        let mut o = order("Shipped");
        assert!(!o.has_tracking());
        o.tracking_number = Some("   ".to_string());
        assert!(!o.has_tracking());
        o.tracking_number = Some("EF582621151TH".to_string());
        assert!(o.has_tracking());
    }

    #[test]
    fn test_order_deserializes_sparse_payload() {
        // The backend omits fields it has no value for.
        let json = r#"{
            "order_id": 42,
            "invoice_no": "INV-0042",
            "total_amount": "990.00",
            "order_status": "Payment accepted",
            "created_at": "2024-05-02T09:30:00Z",
            "updated_at": "2024-05-02T10:00:00Z"
        }"#;
        let o: Order = serde_json::from_str(json).expect("deserialize");
        assert_eq!(o.order_id.as_i64(), 42);
        assert!(o.quotation_no.is_none());
        assert!(o.tracking_number.is_none());
        assert!(!o.payment_confirmed);
    }
}
