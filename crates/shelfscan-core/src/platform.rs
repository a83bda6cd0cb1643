//! Platform collaborator seams
//!
//! The scanner never talks to a camera, speaker or screen directly. Each of
//! those is a trait implemented by the host (a mobile shell, a terminal, a
//! test double).

use crate::types::ProductAnalysis;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of a permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    /// Access granted
    Granted,
    /// Access refused
    Denied,
}

/// Platform permission provider
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait PermissionProvider: Send + Sync {
    /// Ask for camera access, once per session
    async fn request_camera_permission(&self) -> PermissionStatus;
}

/// Platform speech output
#[cfg_attr(feature = "mocks", mockall::automock)]
pub trait SpeechOutput: Send + Sync {
    /// Start speaking; returns immediately
    fn speak(&self, text: &str);

    /// Cancel any utterance in progress; safe when silent
    fn stop(&self);
}

/// Screens the scanner can hand off to
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Live scanner with overlay
    Scanner,
    /// Full analysis for one product
    ProductDetails {
        /// The stored analysis, unchanged
        product: ProductAnalysis,
    },
    /// Gamified impact stats
    ImpactGarden,
}

impl Route {
    /// Route name as registered with the navigator
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Route::Scanner => "Scanner",
            Route::ProductDetails { .. } => "ProductDetails",
            Route::ImpactGarden => "ImpactGarden",
        }
    }
}

/// Platform navigation
#[cfg_attr(feature = "mocks", mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Push a screen
    fn navigate(&self, route: Route);

    /// Pop back to the previous screen
    fn go_back(&self);
}

/// User-visible notifications
#[cfg_attr(feature = "mocks", mockall::automock)]
pub trait UserNotifier: Send + Sync {
    /// Show a blocking alert
    fn alert(&self, message: &str);
}

/// Camera feed subscription
#[cfg_attr(feature = "mocks", mockall::automock)]
pub trait CameraFeed: Send + Sync {
    /// Subscribe to (`true`) or unsubscribe from (`false`) decode events
    fn set_listening(&self, listening: bool);
}

/// Barcode symbologies the scanner is configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarcodeType {
    /// QR code
    Qr,
    /// EAN-13
    Ean13,
    /// EAN-8
    Ean8,
    /// UPC-A
    UpcA,
    /// UPC-E
    UpcE,
}

impl BarcodeType {
    /// Default allowlist
    pub const ALL: [BarcodeType; 5] = [
        BarcodeType::Qr,
        BarcodeType::Ean13,
        BarcodeType::Ean8,
        BarcodeType::UpcA,
        BarcodeType::UpcE,
    ];

    /// Camera provider name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BarcodeType::Qr => "qr",
            BarcodeType::Ean13 => "ean13",
            BarcodeType::Ean8 => "ean8",
            BarcodeType::UpcA => "upc_a",
            BarcodeType::UpcE => "upc_e",
        }
    }
}

impl fmt::Display for BarcodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BarcodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BarcodeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unsupported barcode type: {s}"))
    }
}

/// A decoded barcode as delivered by the camera
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeEvent {
    /// Symbology reported by the camera
    pub barcode_type: String,
    /// Raw decoded text, forwarded as-is
    pub data: String,
}

impl DecodeEvent {
    /// Create new decode event
    #[inline]
    #[must_use]
    pub fn new(barcode_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            barcode_type: barcode_type.into(),
            data: data.into(),
        }
    }
}
