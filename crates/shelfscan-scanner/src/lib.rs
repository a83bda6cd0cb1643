//! Shelfscan Scanner
//!
//! The scan-to-verdict flow behind the live scanner screen:
//! - Camera permission acquisition
//! - Scan lock against duplicate decode events
//! - Analysis dispatch and result storage
//! - Spoken verdicts
//! - Failure auto-unlock and manual reset
//!
//! # Example
//!
//! ```rust,ignore
//! use shelfscan_scanner::{Collaborators, ScanOrchestrator};
//! use shelfscan_core::{DecodeEvent, ScanConfig};
//!
//! # async fn example(collaborators: Collaborators) -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = ScanOrchestrator::new(ScanConfig::new(), collaborators);
//! orchestrator.activate().await?;
//!
//! let outcome = orchestrator
//!     .handle_decode(DecodeEvent::new("ean13", "3017620422003"))
//!     .await;
//! println!("{outcome:?}");
//! orchestrator.reset()?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod narrator;
pub mod orchestrator;
pub mod state_machine;

pub use error::ScanError;
pub use narrator::{compose_narration, VoiceNarrator};
pub use orchestrator::{Collaborators, DecodeOutcome, ScanOrchestrator, ScanSnapshot};
pub use state_machine::{allowed_transitions, validate_transition, ScanPhase};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the scanner
    pub use crate::{Collaborators, DecodeOutcome, ScanError, ScanOrchestrator, ScanPhase};
}
