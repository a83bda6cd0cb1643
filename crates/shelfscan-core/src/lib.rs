//! Shelfscan Core
//!
//! Shared foundation for the scan-to-verdict client:
//! - Product analysis data model and the traffic-light status set
//! - User profile records and the profile provider seam
//! - The analysis client contract
//! - Platform collaborator traits (camera, permission, speech, navigation)
//! - Scanner configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use shelfscan_core::{ProfileProvider, StaticProfileProvider, TrafficLightStatus};
//!
//! let provider = StaticProfileProvider::demo();
//! let profile = provider.current_profile();
//! assert_eq!(profile.user_id, "demo_user");
//! assert!(TrafficLightStatus::parse("GREEN").is_green());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod platform;
pub mod profile;
pub mod types;

pub use analysis::AnalysisClient;
pub use config::{ScanConfig, DEFAULT_API_BASE_URL, DEFAULT_UNLOCK_DELAY_MS};
pub use error::{AnalysisFailure, ConfigError, ProfileError};
pub use platform::{
    BarcodeType, CameraFeed, DecodeEvent, Navigator, PermissionProvider, PermissionStatus, Route,
    SpeechOutput, UserNotifier,
};
pub use profile::{FileProfileProvider, ProfileProvider, StaticProfileProvider};
pub use types::{
    round_half_up, AgentVerdict, HealthProfile, ProductAnalysis, TrafficLightStatus, UserProfile,
    ValueProfile,
};

#[cfg(feature = "mocks")]
pub use analysis::MockAnalysisClient;
#[cfg(feature = "mocks")]
pub use platform::{
    MockCameraFeed, MockNavigator, MockPermissionProvider, MockSpeechOutput, MockUserNotifier,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Shelfscan Core
    pub use crate::{
        AgentVerdict, AnalysisClient, AnalysisFailure, DecodeEvent, ProductAnalysis,
        ProfileProvider, ScanConfig, TrafficLightStatus, UserProfile,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
