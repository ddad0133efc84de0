//! Shipment tracking types.
//!
//! Tracking status is never authoritative here: it is either looked up from
//! the tracking API by the admin service or inferred locally from whatever
//! text the backend stored in the tracking field. Carriers (and admins) have
//! been known to paste status text into that field, which is exactly what the
//! keyword inference below leans on.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Delivery-lifecycle state of a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStatus {
    /// Label created, parcel not yet moving.
    Pending,
    /// In transit with the carrier.
    Shipped,
    /// Delivered to the customer.
    Delivered,
    /// Delivery failed, returned, or rejected.
    Exception,
}

/// Keywords that mean "delivered", in either language.
const DELIVERED_KEYWORDS: &[&str] = &["DELIVERED", "DLV", "COMPLETED", "SUCCESS"];
const DELIVERED_KEYWORDS_TH: &[&str] = &["จัดส่งสำเร็จ", "ส่งสำเร็จ"];

/// Keywords that mean a failed or returned delivery.
const EXCEPTION_KEYWORDS: &[&str] = &["EXCEPTION", "FAILED", "RETURNED", "ERROR", "REJECTED"];
const EXCEPTION_KEYWORDS_TH: &[&str] = &["ไม่สามารถส่งได้", "ส่งไม่สำเร็จ"];

/// Keywords that mean the parcel has not left yet.
const PENDING_KEYWORDS: &[&str] = &["PENDING", "PROCESSING", "PREPARING"];
const PENDING_KEYWORDS_TH: &[&str] = &["กำลังเตรียม", "รอการจัดส่ง"];

impl TrackingStatus {
    /// Infer a tracking status from the raw tracking field.
    ///
    /// Scans for known English (case-insensitive) and Thai carrier keywords,
    /// delivered before exception before pending. A non-blank value that
    /// matches nothing is optimistically treated as [`Self::Shipped`]: a
    /// tracking number exists, so the parcel is assumed to be on its way.
    /// Blank input yields `None`.
    #[must_use]
    pub fn infer(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let upper = trimmed.to_uppercase();

        if DELIVERED_KEYWORDS.iter().any(|k| upper.contains(k))
            || DELIVERED_KEYWORDS_TH.iter().any(|k| trimmed.contains(k))
        {
            return Some(Self::Delivered);
        }

        if EXCEPTION_KEYWORDS.iter().any(|k| upper.contains(k))
            || EXCEPTION_KEYWORDS_TH.iter().any(|k| trimmed.contains(k))
        {
            return Some(Self::Exception);
        }

        if PENDING_KEYWORDS.iter().any(|k| upper.contains(k))
            || PENDING_KEYWORDS_TH.iter().any(|k| trimmed.contains(k))
        {
            return Some(Self::Pending);
        }

        Some(Self::Shipped)
    }

    /// Map a status string from the tracking API to a tracking status.
    ///
    /// The API vocabulary is wider than ours; unknown values collapse to
    /// [`Self::Shipped`], the same optimistic default the inference uses.
    #[must_use]
    pub fn from_remote(status: &str) -> Self {
        match status.to_lowercase().as_str() {
            "delivered" | "completed" | "success" => Self::Delivered,
            "exception" | "failed" | "returned" | "error" => Self::Exception,
            "pending" | "processing" => Self::Pending,
            _ => Self::Shipped,
        }
    }

    /// Stable string key used in JSON responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Exception => "exception",
        }
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur when parsing a [`ThaiPostTracking`] number.
#[derive(thiserror::Error, Debug, Clone)]
pub enum TrackingError {
    /// The input string is empty or whitespace.
    #[error("tracking number cannot be empty")]
    Empty,
    /// The input does not match the Thai Post format.
    #[error("tracking number must be 13 characters: 2 letters, 9 digits, 2 letters (e.g. EF582621151TH)")]
    InvalidFormat,
}

/// A validated Thai Post tracking number.
///
/// Thai Post barcodes are 13 characters: a two-letter service prefix, a
/// nine-digit serial, and a two-letter country suffix (`EF582621151TH`).
/// The backend's raw tracking field is looser than this; validation applies
/// only when the back office assigns a new number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ThaiPostTracking(String);

impl ThaiPostTracking {
    /// Exact length of a Thai Post tracking number.
    pub const LENGTH: usize = 13;

    /// Parse a `ThaiPostTracking` from a string.
    ///
    /// Leading and trailing whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::Empty`] for blank input and
    /// [`TrackingError::InvalidFormat`] when the trimmed value is not
    /// 2 uppercase letters, 9 digits, then 2 uppercase letters.
    pub fn parse(s: &str) -> Result<Self, TrackingError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TrackingError::Empty);
        }

        if trimmed.len() != Self::LENGTH {
            return Err(TrackingError::InvalidFormat);
        }

        let valid = trimmed.chars().enumerate().all(|(i, c)| match i {
            0 | 1 | 11 | 12 => c.is_ascii_uppercase(),
            _ => c.is_ascii_digit(),
        });

        if !valid {
            return Err(TrackingError::InvalidFormat);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the tracking number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ThaiPostTracking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_blank_is_none() {
        assert_eq!(TrackingStatus::infer(""), None);
        assert_eq!(TrackingStatus::infer("   "), None);
    }

    #[test]
    fn test_infer_delivered_any_case() {
        assert_eq!(
            TrackingStatus::infer("DELIVERED 2024-01-03"),
            Some(TrackingStatus::Delivered)
        );
        assert_eq!(
            TrackingStatus::infer("delivered successfully"),
            Some(TrackingStatus::Delivered)
        );
        assert_eq!(
            TrackingStatus::infer("EF123456789TH จัดส่งสำเร็จ"),
            Some(TrackingStatus::Delivered)
        );
    }

    #[test]
    fn test_infer_exception() {
        assert_eq!(
            TrackingStatus::infer("EXCEPTION at hub"),
            Some(TrackingStatus::Exception)
        );
        assert_eq!(
            TrackingStatus::infer("ส่งไม่สำเร็จ"),
            Some(TrackingStatus::Exception)
        );
    }

    #[test]
    fn test_infer_pending() {
        assert_eq!(
            TrackingStatus::infer("รอการจัดส่ง"),
            Some(TrackingStatus::Pending)
        );
        assert_eq!(
            TrackingStatus::infer("preparing"),
            Some(TrackingStatus::Pending)
        );
    }

    #[test]
    fn test_infer_delivered_wins_over_pending() {
        // Both keyword groups present: delivered is checked first.
        assert_eq!(
            TrackingStatus::infer("preparing -> delivered"),
            Some(TrackingStatus::Delivered)
        );
    }

    #[test]
    fn test_infer_plain_number_defaults_to_shipped() {
        assert_eq!(
            TrackingStatus::infer("EF582621151TH"),
            Some(TrackingStatus::Shipped)
        );
    }

    #[test]
    fn test_from_remote_vocabulary() {
        assert_eq!(
            TrackingStatus::from_remote("Delivered"),
            TrackingStatus::Delivered
        );
        assert_eq!(
            TrackingStatus::from_remote("in_transit"),
            TrackingStatus::Shipped
        );
        assert_eq!(
            TrackingStatus::from_remote("out_for_delivery"),
            TrackingStatus::Shipped
        );
        assert_eq!(
            TrackingStatus::from_remote("returned"),
            TrackingStatus::Exception
        );
        assert_eq!(
            TrackingStatus::from_remote("processing"),
            TrackingStatus::Pending
        );
        // Unknown vocabulary collapses to the optimistic default.
        assert_eq!(
            TrackingStatus::from_remote("somewhere"),
            TrackingStatus::Shipped
        );
    }

    #[test]
    fn test_thai_post_valid() {
        let t = ThaiPostTracking::parse("EF582621151TH").expect("valid");
        assert_eq!(t.as_str(), "EF582621151TH");
        // Surrounding whitespace is tolerated.
        assert!(ThaiPostTracking::parse("  EF582621151TH ").is_ok());
    }

    #[test]
    fn test_thai_post_invalid() {
        assert!(matches!(
            ThaiPostTracking::parse(""),
            Err(TrackingError::Empty)
        ));
        // Wrong length.
        assert!(ThaiPostTracking::parse("EF58262115TH").is_err());
        // Lowercase prefix.
        assert!(ThaiPostTracking::parse("ef582621151th").is_err());
        // Letters where digits belong.
        assert!(ThaiPostTracking::parse("EF5826211A1TH").is_err());
        // Digits where the suffix belongs.
        assert!(ThaiPostTracking::parse("EF58262115112").is_err());
    }
}
