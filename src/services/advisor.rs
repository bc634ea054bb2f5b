use crate::config::AdvisorSettings;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when generating advice
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Top-level sections the language model must return
const REQUIRED_SECTIONS: [&str; 5] = [
    "advice_response",
    "data_updates",
    "activity_suggestions",
    "nutrition_plan",
    "behavioral_insights",
];

const POSSIBLE_ACTIVITIES: [&str; 10] = [
    "swimming",
    "running",
    "cycling",
    "strength_training",
    "yoga",
    "pilates",
    "cardio",
    "boxing",
    "hiking",
    "dancing",
];

/// Health advice generator
///
/// Forwards a structured input object to a remote chat-completions API
/// with a system prompt that pins the output schema, then validates the
/// reply: it must be valid JSON carrying all five top-level sections.
pub struct AdvisorClient {
    endpoint: String,
    api_key: String,
    model: String,
    client: Client,
}

impl AdvisorClient {
    pub fn new(settings: AdvisorSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint: settings.endpoint,
            api_key: settings.api_key,
            model: settings.model,
            client,
        }
    }

    /// Generate personalized health advice for the given input
    pub async fn generate_advice(&self, input: &Value) -> Result<Value, AdvisorError> {
        let request_id = uuid::Uuid::new_v4();
        let prompt = build_prompt(input);

        tracing::debug!("Requesting advice, request_id: {}", request_id);

        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AdvisorError::ApiError(format!(
                "Advice API returned {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;

        let content = body
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
            .ok_or_else(|| AdvisorError::InvalidResponse("Missing completion content".into()))?;

        let advice = parse_advice(content)?;

        tracing::debug!("Advice generated, request_id: {}", request_id);

        Ok(advice)
    }
}

/// Parse the model's reply and enforce the fixed output schema
fn parse_advice(content: &str) -> Result<Value, AdvisorError> {
    let advice: Value = serde_json::from_str(content.trim())
        .map_err(|e| AdvisorError::InvalidResponse(format!("Reply is not valid JSON: {}", e)))?;

    for section in REQUIRED_SECTIONS {
        if advice.get(section).is_none() {
            return Err(AdvisorError::InvalidResponse(format!(
                "Reply is missing required section '{}'",
                section
            )));
        }
    }

    Ok(advice)
}

fn build_prompt(input: &Value) -> String {
    format!(
        r#"You are an Intelligent Health Advisor. Provide personalized health advice and daily activity/nutrition recommendations.
When suggesting activities, use only these activity types: {activities:?}.
Always output valid JSON with exactly these top-level sections: "advice_response", "data_updates" (detected_activities, nutrition_intake, health_measurements, mood_indicators), "activity_suggestions" (primary_workout, supplementary_activities, rest_recommendations), "nutrition_plan" (meal_suggestions, hydration_targets, supplement_recommendations), "behavioral_insights" (motivation_message, habit_formation_tip, progress_celebration).
Only use information explicitly provided in the input. Never include fallback, error, or non-JSON text.

Input:
{input}"#,
        activities = POSSIBLE_ACTIVITIES,
        input = serde_json::to_string_pretty(input).unwrap_or_else(|_| "{}".to_string()),
    )
}
