//! Typed search errors.
//!
//! `KStarError` represents pre-flight failures only. A target that cannot be
//! reached, or a graph with fewer than k paths, is a normal outcome and is
//! reported through the (possibly short) list of paths.

use thiserror::Error;

/// Typed failure for pre-flight validation.
///
/// These errors are returned before any search work begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KStarError {
    /// The policy has an out-of-range setting.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
}
