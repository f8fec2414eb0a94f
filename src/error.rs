//! Error types for schedule construction

use thiserror::Error;

/// Errors produced when constructing a schedule from loan parameters.
///
/// Numeric overflow is deliberately not guarded: extreme rates or terms may
/// yield `Infinity`/`NaN` in the computed sequences, which are propagated to
/// the caller as ordinary f64 values rather than surfaced as errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// A loan parameter would make the payment formula meaningless
    /// (zero-month term, non-positive principal).
    #[error("invalid loan parameter: {reason}")]
    InvalidParameter {
        /// Human-readable description of the offending parameter
        reason: String,
    },
}

impl ScheduleError {
    /// Convenience constructor for an invalid-parameter error
    pub fn invalid(reason: impl Into<String>) -> Self {
        ScheduleError::InvalidParameter {
            reason: reason.into(),
        }
    }
}
