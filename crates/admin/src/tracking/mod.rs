//! Tracking-status lookup and enrichment.
//!
//! Orders are enriched with a best-effort tracking status before
//! classification. The remote lookup service is optional and allowed to
//! fail; the keyword heuristic in `suriya-core` is the fallback, and a
//! plain tracking number defaults to "shipped". Nothing in this module ever
//! returns an error to a request handler.
//!
//! Results are cached per tracking number for the session (`moka`, 5-minute
//! TTL) so a screen refresh does not re-query the carrier for every row.

mod enrich;

pub use enrich::TrackedOrder;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use suriya_core::{Order, TrackingStatus};

use crate::config::TrackingApiConfig;

/// Lookup request timeout. Carrier lookups are slow; keep this short enough
/// that a wedged carrier API cannot stall the orders screen.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// How long a looked-up status stays fresh.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Cache capacity; one entry per distinct tracking number on screen.
const CACHE_CAPACITY: u64 = 10_000;

/// Errors from the remote tracking lookup.
///
/// These never leave the module: every failure degrades to the heuristic.
#[derive(Debug, Error)]
pub enum TrackingLookupError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Lookup service answered with a non-success status.
    #[error("Lookup failed with status {0}")]
    Status(u16),

    /// Tracking value cannot form a lookup URL.
    #[error("Invalid lookup URL: {0}")]
    Url(String),
}

/// Payload from `GET /tracking/status/{number}`.
#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    status: Option<String>,
}

/// Tracking-status enrichment service.
///
/// Holds the optional remote lookup client and the per-session cache.
#[derive(Clone)]
pub struct TrackingService {
    inner: Arc<TrackingServiceInner>,
}

struct TrackingServiceInner {
    remote: Option<RemoteLookup>,
    cache: Cache<String, TrackingStatus>,
}

struct RemoteLookup {
    client: reqwest::Client,
    base_url: Url,
}

impl TrackingService {
    /// Create the enrichment service.
    ///
    /// With no tracking API configured, lookups are skipped and the keyword
    /// heuristic does all the work.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn new(config: Option<&TrackingApiConfig>) -> Self {
        let remote = config.map(|c| RemoteLookup {
            client: reqwest::Client::builder()
                .timeout(LOOKUP_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: c.base_url.clone(),
        });

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(TrackingServiceInner { remote, cache }),
        }
    }

    /// Derive the tracking status for one order.
    ///
    /// Rules, in order:
    ///
    /// 1. a completed order is delivered, no lookup;
    /// 2. no tracking number, no status;
    /// 3. remote lookup (cached);
    /// 4. lookup failed or said only "shipped": let the keyword heuristic
    ///    upgrade it to something more specific;
    /// 5. otherwise a tracking number exists, so the parcel is "shipped".
    pub async fn status_for(&self, order: &Order) -> Option<TrackingStatus> {
        if order.order_status.eq_ignore_ascii_case("completed") {
            return Some(TrackingStatus::Delivered);
        }

        let tracking = order.tracking_number.as_deref()?.trim();
        if tracking.is_empty() {
            return None;
        }

        let remote = self.lookup_cached(tracking).await;

        let status = match remote {
            Some(TrackingStatus::Shipped) | None => {
                match TrackingStatus::infer(tracking) {
                    // Heuristic found a stronger signal than the default.
                    Some(inferred) if inferred != TrackingStatus::Shipped => Some(inferred),
                    _ => remote,
                }
            }
            strong => strong,
        };

        Some(status.unwrap_or(TrackingStatus::Shipped))
    }

    /// Remote lookup with session cache; `None` when unavailable or failed.
    async fn lookup_cached(&self, tracking: &str) -> Option<TrackingStatus> {
        let remote = self.inner.remote.as_ref()?;

        if let Some(hit) = self.inner.cache.get(tracking).await {
            return Some(hit);
        }

        match remote.lookup(tracking).await {
            Ok(status) => {
                self.inner
                    .cache
                    .insert(tracking.to_string(), status)
                    .await;
                Some(status)
            }
            Err(e) => {
                // Degrade to the heuristic; the order screen must not care.
                tracing::warn!(tracking, "Tracking lookup failed: {e}");
                None
            }
        }
    }

    /// Enrich a batch of orders concurrently.
    ///
    /// Lookups fan out per order; one failed or slow order never affects the
    /// others beyond the shared timeout.
    pub async fn enrich(&self, orders: Vec<Order>) -> Vec<TrackedOrder> {
        futures::future::join_all(orders.into_iter().map(|order| async move {
            let tracking_status = self.status_for(&order).await;
            TrackedOrder {
                order,
                tracking_status,
            }
        }))
        .await
    }
}

impl RemoteLookup {
    /// `GET {base}/tracking/status/{number}`.
    #[instrument(skip(self))]
    async fn lookup(&self, tracking: &str) -> Result<TrackingStatus, TrackingLookupError> {
        let url = self
            .base_url
            .join(&format!("tracking/status/{}", urlencoding::encode(tracking)))
            .map_err(|e| TrackingLookupError::Url(e.to_string()))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TrackingLookupError::Status(status.as_u16()));
        }

        let payload: LookupResponse = response.json().await?;
        Ok(payload
            .status
            .as_deref()
            .map_or(TrackingStatus::Shipped, TrackingStatus::from_remote))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suriya_core::OrderId;

    fn order(status: &str, tracking: Option<&str>) -> Order {
        Order {
            order_id: OrderId::new(1),
            invoice_no: "INV-0001".to_string(),
            quotation_no: None,
            first_name: "Malee".to_string(),
            last_name: "Srisuk".to_string(),
            email: None,
            total_amount: rust_decimal::Decimal::ZERO,
            payment_method: "credit_card".to_string(),
            order_status: status.to_string(),
            payment_status: None,
            transaction_status: None,
            tracking_number: tracking.map(ToString::to_string),
            payment_confirmed: false,
            created_at: "2024-05-02T09:30:00Z".parse().expect("timestamp"),
            updated_at: "2024-05-02T09:30:00Z".parse().expect("timestamp"),
        }
    }

    /// Heuristic-only service (no remote lookup configured).
    fn service() -> TrackingService {
        TrackingService::new(None)
    }

    #[tokio::test]
    async fn test_completed_order_is_delivered_without_lookup() {
        let s = service();
        let o = order("Completed", None);
        assert_eq!(s.status_for(&o).await, Some(TrackingStatus::Delivered));
    }

    #[tokio::test]
    async fn test_no_tracking_number_no_status() {
        let s = service();
        assert_eq!(s.status_for(&order("Shipped", None)).await, None);
        assert_eq!(s.status_for(&order("Shipped", Some("   "))).await, None);
    }

    #[tokio::test]
    async fn test_plain_barcode_defaults_to_shipped() {
        let s = service();
        let o = order("Shipped", Some("EF582621151TH"));
        assert_eq!(s.status_for(&o).await, Some(TrackingStatus::Shipped));
    }

    #[tokio::test]
    async fn test_heuristic_upgrades_status_text() {
        let s = service();
        let o = order("Shipped", Some("EF582621151TH DELIVERED"));
        assert_eq!(s.status_for(&o).await, Some(TrackingStatus::Delivered));

        let o = order("Shipped", Some("ส่งไม่สำเร็จ"));
        assert_eq!(s.status_for(&o).await, Some(TrackingStatus::Exception));
    }

    #[tokio::test]
    async fn test_enrich_batch_is_per_order() {
        let s = service();
        let enriched = s
            .enrich(vec![
                order("Completed", None),
                order("Shipped", Some("EF582621151TH")),
                order("Payment accepted", None),
            ])
            .await;

        assert_eq!(enriched.len(), 3);
        assert_eq!(
            enriched.first().and_then(|t| t.tracking_status),
            Some(TrackingStatus::Delivered)
        );
        assert_eq!(
            enriched.get(1).and_then(|t| t.tracking_status),
            Some(TrackingStatus::Shipped)
        );
        assert_eq!(enriched.get(2).and_then(|t| t.tracking_status), None);
    }
}
