//! Response validation at the client boundary
//!
//! A body only becomes a [`ProductAnalysis`] when it has the full shape:
//! typed required fields, finite scores, string statuses. Anything else is
//! reported back as a reason string and folded into an analysis failure by
//! the caller.

use shelfscan_core::ProductAnalysis;

/// Decode and validate a response body
///
/// # Errors
/// Returns a human-readable description of the first shape violation.
pub fn decode_analysis(body: &[u8]) -> Result<ProductAnalysis, String> {
    let analysis: ProductAnalysis =
        serde_json::from_slice(body).map_err(|e| format!("malformed response: {e}"))?;
    analysis
        .validate()
        .map_err(|e| format!("malformed response: {e}"))?;
    Ok(analysis)
}
