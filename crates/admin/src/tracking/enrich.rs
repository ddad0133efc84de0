//! Orders paired with their derived tracking status.

use suriya_core::{EffectiveCategory, Order, TrackingStatus, classify_order};

/// An order plus the tracking status derived for this session.
#[derive(Debug, Clone)]
pub struct TrackedOrder {
    /// The order as the backend returned it.
    pub order: Order,
    /// Best-effort tracking status; `None` when no tracking number exists.
    pub tracking_status: Option<TrackingStatus>,
}

impl TrackedOrder {
    /// Effective category of this order.
    #[must_use]
    pub fn category(&self) -> EffectiveCategory {
        classify_order(&self.order, self.tracking_status)
    }
}
