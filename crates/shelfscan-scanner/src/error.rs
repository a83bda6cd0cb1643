//! Error types for the scan orchestrator

use crate::state_machine::ScanPhase;

/// Scan orchestrator errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// Camera access refused; scanning is unavailable for the session
    #[error("camera permission denied")]
    PermissionDenied,

    /// Permission has not been requested yet
    #[error("camera permission has not been requested")]
    PermissionPending,

    /// Nothing to show or speak
    #[error("no analysis result is stored")]
    NoResult,

    /// Requested transition is not part of the scan flow
    #[error("illegal scan transition: {from} -> {to}")]
    IllegalTransition { from: ScanPhase, to: ScanPhase },
}

impl ScanError {
    /// Check if scanning can continue after this error
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }
}
