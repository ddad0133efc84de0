//! HTTP route handlers for the back office.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (pings the platform API)
//!
//! # Orders
//! GET  /orders                      - Classified order list (?category= filter)
//! GET  /orders/counts               - Per-category order counts
//! PUT  /orders/{id}/tracking        - Assign a Thai Post tracking number
//! POST /orders/{id}/confirm-payment - Send payment confirmation
//! POST /orders/{id}/complete        - Mark a shipped order completed
//! POST /orders/{id}/cancel          - Cancel an order
//!
//! # Payments
//! GET  /payments                    - Payment classification view (?category=)
//! GET  /payments/counts             - Per-category payment counts
//! ```

pub mod orders;
pub mod payments;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Compose all back-office routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Orders
        .route("/orders", get(orders::index))
        .route("/orders/counts", get(orders::counts))
        .route("/orders/{id}/tracking", put(orders::update_tracking))
        .route("/orders/{id}/confirm-payment", post(orders::confirm_payment))
        .route("/orders/{id}/complete", post(orders::mark_completed))
        .route("/orders/{id}/cancel", post(orders::cancel))
        // Payments
        .route("/payments", get(payments::index))
        .route("/payments/counts", get(payments::counts))
}
