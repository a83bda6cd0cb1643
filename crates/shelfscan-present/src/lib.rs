//! Shelfscan Presentation
//!
//! View models and plain-text rendering for the three screens:
//! - Live scanner overlay
//! - Product details
//! - Impact garden

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod details;
pub mod garden;
pub mod overlay;
pub mod palette;

pub use details::{DetailsScreen, VerdictCard};
pub use garden::{Achievement, GardenScreen, ImpactStats};
pub use overlay::{LiveOverlay, OverlayAction, ResultCard, ScannerScreen};
pub use palette::{overlay_color, pastel_color};

use shelfscan_core::Route;

/// Render whatever screen a route points at
#[must_use]
pub fn render_route(route: &Route) -> Option<String> {
    match route {
        Route::Scanner => None,
        Route::ProductDetails { product } => Some(DetailsScreen::new(product).to_string()),
        Route::ImpactGarden => Some(GardenScreen::default().to_string()),
    }
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
