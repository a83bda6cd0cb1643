//! Analysis client contract

use crate::error::AnalysisFailure;
use crate::types::{ProductAnalysis, UserProfile};
use async_trait::async_trait;

/// Converts a barcode and a user profile into a verdict.
///
/// Implementations issue exactly one request per call, never retry, and report
/// every kind of failure as the same [`AnalysisFailure`].
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Analyze one product
    async fn analyze(
        &self,
        barcode: &str,
        profile: &UserProfile,
    ) -> Result<ProductAnalysis, AnalysisFailure>;
}
