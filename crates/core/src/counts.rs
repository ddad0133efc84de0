//! Category tallies for the admin filter chips.
//!
//! The orders and payments views both render one chip per category with a
//! live count. Buckets cover every category, so the per-category counts
//! always sum to `total`.

use serde::Serialize;

use crate::types::{EffectiveCategory, PaymentCategory};

/// Per-category order counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    /// Number of orders tallied.
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub shipped: usize,
    pub completed: usize,
    pub canceled: usize,
    pub error: usize,
    pub unknown: usize,
}

impl CategoryCounts {
    /// Tally categories into buckets.
    #[must_use]
    pub fn tally(categories: impl IntoIterator<Item = EffectiveCategory>) -> Self {
        let mut counts = Self::default();
        for category in categories {
            counts.total += 1;
            match category {
                EffectiveCategory::Pending => counts.pending += 1,
                EffectiveCategory::Processing => counts.processing += 1,
                EffectiveCategory::Shipped => counts.shipped += 1,
                EffectiveCategory::Completed => counts.completed += 1,
                EffectiveCategory::Canceled => counts.canceled += 1,
                EffectiveCategory::Error => counts.error += 1,
                EffectiveCategory::Unknown => counts.unknown += 1,
            }
        }
        counts
    }

    /// Count for a single category.
    #[must_use]
    pub const fn get(&self, category: EffectiveCategory) -> usize {
        match category {
            EffectiveCategory::Pending => self.pending,
            EffectiveCategory::Processing => self.processing,
            EffectiveCategory::Shipped => self.shipped,
            EffectiveCategory::Completed => self.completed,
            EffectiveCategory::Canceled => self.canceled,
            EffectiveCategory::Error => self.error,
            EffectiveCategory::Unknown => self.unknown,
        }
    }
}

/// Per-category payment counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaymentCounts {
    /// Number of orders tallied.
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub failed: usize,
    pub refunded: usize,
    pub processing: usize,
    pub canceled: usize,
    pub unknown: usize,
}

impl PaymentCounts {
    /// Tally payment categories into buckets.
    #[must_use]
    pub fn tally(categories: impl IntoIterator<Item = PaymentCategory>) -> Self {
        let mut counts = Self::default();
        for category in categories {
            counts.total += 1;
            match category {
                PaymentCategory::Pending => counts.pending += 1,
                PaymentCategory::Confirmed => counts.confirmed += 1,
                PaymentCategory::Failed => counts.failed += 1,
                PaymentCategory::Refunded => counts.refunded += 1,
                PaymentCategory::Processing => counts.processing += 1,
                PaymentCategory::Canceled => counts.canceled += 1,
                PaymentCategory::Unknown => counts.unknown += 1,
            }
        }
        counts
    }

    /// Count for a single category.
    #[must_use]
    pub const fn get(&self, category: PaymentCategory) -> usize {
        match category {
            PaymentCategory::Pending => self.pending,
            PaymentCategory::Confirmed => self.confirmed,
            PaymentCategory::Failed => self.failed,
            PaymentCategory::Refunded => self.refunded,
            PaymentCategory::Processing => self.processing,
            PaymentCategory::Canceled => self.canceled,
            PaymentCategory::Unknown => self.unknown,
        }
    }
}
