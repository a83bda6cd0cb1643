use crate::error::ScanError;
use std::fmt;

/// Observable position of the scanner screen.
///
/// `Idle` is the live-camera state: decode events are accepted whenever the
/// scan lock is clear and nothing is loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScanPhase {
    #[default]
    AwaitingPermission,
    PermissionDenied,
    Idle,
    Analyzing,
    ShowingResult,
    ScanFailed,
}

impl ScanPhase {
    pub const ALL: [ScanPhase; 6] = [
        ScanPhase::AwaitingPermission,
        ScanPhase::PermissionDenied,
        ScanPhase::Idle,
        ScanPhase::Analyzing,
        ScanPhase::ShowingResult,
        ScanPhase::ScanFailed,
    ];

    /// No transition leaves this phase
    #[must_use]
    pub fn is_terminal(self) -> bool {
        allowed_transitions(self).is_empty()
    }
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Validates a phase transition.
///
/// # Errors
/// Returns [`ScanError::IllegalTransition`] when `to` is not reachable from
/// `from` in one step.
pub fn validate_transition(from: ScanPhase, to: ScanPhase) -> Result<(), ScanError> {
    if allowed(from, to) {
        Ok(())
    } else {
        Err(ScanError::IllegalTransition { from, to })
    }
}

/// `ShowingResult -> Analyzing` only happens when the failure auto-unlock
/// fires after a reset and a new successful scan; the feed is live again and
/// the next decode replaces the stored result.
#[must_use]
pub fn allowed_transitions(from: ScanPhase) -> Vec<ScanPhase> {
    use ScanPhase::*;
    match from {
        AwaitingPermission => vec![Idle, PermissionDenied],
        PermissionDenied => vec![],
        Idle => vec![Analyzing],
        Analyzing => vec![ShowingResult, ScanFailed],
        ShowingResult => vec![Idle, Analyzing],
        ScanFailed => vec![Idle],
    }
}

fn allowed(from: ScanPhase, to: ScanPhase) -> bool {
    allowed_transitions(from).into_iter().any(|s| s == to)
}
