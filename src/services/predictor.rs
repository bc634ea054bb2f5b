use crate::config::PredictorSettings;
use crate::models::WellnessScores;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when requesting a prediction
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Wellness predictor client
///
/// Forwards a two-day window of sleep, heart-rate, nutrition and
/// activity measurements to the model inference endpoint and returns
/// the three wellness scores. A score comes back null when the remote
/// model artifact is unavailable; that is not an error here.
pub struct PredictorClient {
    endpoint: String,
    client: Client,
}

impl PredictorClient {
    pub fn new(settings: PredictorSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint: settings.endpoint,
            client,
        }
    }

    pub async fn predict(
        &self,
        user_profile: &Value,
        historical_data: &Value,
    ) -> Result<WellnessScores, PredictorError> {
        let payload = json!({
            "user_profile": user_profile,
            "historical_data": historical_data,
        });

        let response = self.client.post(&self.endpoint).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(PredictorError::ApiError(format!(
                "Predictor returned {}",
                response.status()
            )));
        }

        let scores: WellnessScores = response
            .json()
            .await
            .map_err(|e| PredictorError::InvalidResponse(format!("Failed to parse scores: {}", e)))?;

        tracing::debug!(
            "Predicted scores: energy={:?} recovery={:?} readiness={:?}",
            scores.energy_level,
            scores.recovery_index,
            scores.readiness_score
        );

        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_predict_parses_scores() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/predict")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "Energy Level": 75.0,
                    "Recovery Index": 68.0,
                    "Readiness Score": 80.0
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = PredictorClient::new(PredictorSettings {
            endpoint: format!("{}/predict", server.url()),
            timeout_secs: 5,
        });

        let scores = client
            .predict(&json!({ "user_id": "u1" }), &json!([]))
            .await
            .unwrap();

        assert_eq!(scores.energy_level, Some(75.0));
        assert_eq!(scores.recovery_index, Some(68.0));
        assert_eq!(scores.readiness_score, Some(80.0));
    }

    #[tokio::test]
    async fn test_predict_passes_nulls_through() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/predict")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "Energy Level": null,
                    "Recovery Index": null,
                    "Readiness Score": null
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = PredictorClient::new(PredictorSettings {
            endpoint: format!("{}/predict", server.url()),
            timeout_secs: 5,
        });

        let scores = client.predict(&json!({}), &json!([])).await.unwrap();
        assert!(scores.energy_level.is_none());
        assert!(scores.recovery_index.is_none());
        assert!(scores.readiness_score.is_none());
    }

    #[tokio::test]
    async fn test_predict_surfaces_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/predict")
            .with_status(503)
            .create_async()
            .await;

        let client = PredictorClient::new(PredictorSettings {
            endpoint: format!("{}/predict", server.url()),
            timeout_secs: 5,
        });

        let err = client.predict(&json!({}), &json!([])).await.unwrap_err();
        assert!(matches!(err, PredictorError::ApiError(_)));
    }
}
