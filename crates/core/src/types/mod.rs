//! Core types for the Suriya back office.
//!
//! This module provides the order record as the platform backend returns it,
//! plus the derived status types the classifier produces.

pub mod category;
pub mod id;
pub mod order;
pub mod tracking;

pub use category::{EffectiveCategory, PaymentCategory};
pub use id::*;
pub use order::Order;
pub use tracking::{ThaiPostTracking, TrackingError, TrackingStatus};
