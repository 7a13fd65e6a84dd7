//! Error types for filter construction.

use thiserror::Error;

/// Errors reported while validating filter parameters.
///
/// Every variant is surfaced synchronously by a constructor; `add` and
/// `contains` cannot fail.
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    /// An expected element count of zero cannot size a filter.
    #[error("expected element count must be at least 1, got {0}")]
    InvalidCapacity(u64),

    /// The false positive rate must lie strictly between 0 and 1.
    #[error("false positive rate must be inside (0, 1), got {0}")]
    InvalidRate(f64),

    /// A filter needs at least one bit.
    #[error("bit count must be at least 1, got {0}")]
    InvalidBitCount(u64),

    /// A filter needs at least one hash probe.
    #[error("hash count must be at least 1, got {0}")]
    InvalidHashCount(u32),
}
