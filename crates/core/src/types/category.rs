//! Derived status categories.
//!
//! The backend stores order status as free text; these enums are the coarse
//! buckets the back office actually filters, counts, and gates actions on.
//! Categories are always derived (see [`crate::classify`]), never persisted.

use serde::{Deserialize, Serialize};

/// Effective order category.
///
/// The coarse bucket an order lands in after combining its raw status with
/// tracking information. Every order maps to exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveCategory {
    /// Awaiting payment or otherwise not yet actionable.
    Pending,
    /// Payment accepted, order being prepared.
    Processing,
    /// Handed to the carrier (or tracking says so).
    Shipped,
    /// Delivered or explicitly completed.
    Completed,
    /// Canceled or refunded.
    Canceled,
    /// Payment or delivery failure.
    Error,
    /// Status string not recognized by any rule.
    Unknown,
}

impl EffectiveCategory {
    /// All categories, in the order the admin frontend lists its filters.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Completed,
        Self::Canceled,
        Self::Error,
        Self::Unknown,
    ];

    /// Stable string key used in query parameters and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for EffectiveCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EffectiveCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "completed" => Ok(Self::Completed),
            "canceled" => Ok(Self::Canceled),
            "error" => Ok(Self::Error),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("invalid order category: {s}")),
        }
    }
}

/// Derived payment category.
///
/// Same idea as [`EffectiveCategory`] but for the payments view, which cares
/// about the money rather than the shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentCategory {
    /// Payment not yet received or verified.
    Pending,
    /// Payment received and accepted.
    Confirmed,
    /// Payment attempt failed.
    Failed,
    /// Payment returned to the customer.
    Refunded,
    /// Payment in flight at the gateway.
    Processing,
    /// Order (and therefore payment) canceled.
    Canceled,
    /// No status source recognized.
    Unknown,
}

impl PaymentCategory {
    /// All categories, in the order the payments view lists its filters.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Confirmed,
        Self::Failed,
        Self::Refunded,
        Self::Processing,
        Self::Canceled,
        Self::Unknown,
    ];

    /// Stable string key used in query parameters and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
            Self::Processing => "processing",
            Self::Canceled => "canceled",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PaymentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            "processing" => Ok(Self::Processing),
            "canceled" => Ok(Self::Canceled),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("invalid payment category: {s}")),
        }
    }
}
