//! HTTP analysis client

use crate::validation::decode_analysis;
use async_trait::async_trait;
use serde::Serialize;
use shelfscan_core::{
    AnalysisClient, AnalysisFailure, ConfigError, ProductAnalysis, ScanConfig, UserProfile,
};

/// Request body of `POST /analyze`
#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    barcode: &'a str,
    user_profile: &'a UserProfile,
}

/// Analysis client backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpAnalysisClient {
    /// Create client from scanner configuration
    ///
    /// # Errors
    /// Fails when the HTTP client cannot be initialised.
    pub fn new(config: &ScanConfig) -> Result<Self, ConfigError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ConfigError::Invalid(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http_client,
            endpoint: config.analyze_url(),
        })
    }

    /// Full URL requests are sent to
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn failure(barcode: &str, reason: String) -> AnalysisFailure {
        tracing::error!(barcode, %reason, "Error analyzing product");
        AnalysisFailure::new(barcode, reason)
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        format!("transport error: {err}")
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn analyze(
        &self,
        barcode: &str,
        profile: &UserProfile,
    ) -> Result<ProductAnalysis, AnalysisFailure> {
        tracing::debug!(barcode, endpoint = %self.endpoint, "Sending analysis request");

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&AnalyzeRequest {
                barcode,
                user_profile: profile,
            })
            .send()
            .await
            .map_err(|e| Self::failure(barcode, describe_transport_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::failure(
                barcode,
                format!("service responded with {status}"),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::failure(barcode, describe_transport_error(&e)))?;

        let analysis = decode_analysis(&body).map_err(|reason| Self::failure(barcode, reason))?;
        tracing::info!(
            barcode,
            status = %analysis.overall_status,
            verdicts = analysis.agent_verdicts.len(),
            "Analysis received"
        );
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_comes_from_config() {
        let config = ScanConfig::new().with_api_base_url("http://192.168.1.20:8095/");
        let client = HttpAnalysisClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "http://192.168.1.20:8095/analyze");
    }

    #[test]
    fn request_body_shape() {
        let profile = UserProfile::new("u1").with_allergen("Milk");
        let body = serde_json::to_value(AnalyzeRequest {
            barcode: "012345678905",
            user_profile: &profile,
        })
        .unwrap();
        assert_eq!(body["barcode"], "012345678905");
        assert_eq!(body["user_profile"]["user_id"], "u1");
        assert_eq!(body["user_profile"]["health_profile"]["allergens"][0], "Milk");
    }
}
