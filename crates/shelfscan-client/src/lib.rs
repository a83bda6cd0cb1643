//! Shelfscan Client
//!
//! HTTP implementation of [`AnalysisClient`]: one `POST {base_url}/analyze`
//! per scan, no retries, response validated before it reaches the scanner.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelfscan_client::HttpAnalysisClient;
//! use shelfscan_core::{AnalysisClient, ScanConfig, UserProfile};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpAnalysisClient::new(&ScanConfig::new())?;
//! let analysis = client.analyze("3017620422003", &UserProfile::demo()).await?;
//! println!("{} -> {}", analysis.display_name(), analysis.overall_status);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod http;
pub mod validation;

pub use http::HttpAnalysisClient;
pub use validation::decode_analysis;
pub use shelfscan_core::AnalysisClient;
