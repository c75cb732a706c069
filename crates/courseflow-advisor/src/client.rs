//! The chat-completions client.

use chrono::{DateTime, Utc};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use courseflow_protocols::plan::{AssignmentsDigest, PlanFocus, StudyPlan};
use courseflow_protocols::AdvisorError;

use crate::prompt::{build_prompt, schema_instruction, strip_code_fences};

const SYSTEM_PROMPT: &str = "You are a helpful academic advisor that analyzes student assignments \
and creates actionable study plans. Always respond with valid JSON only, no markdown formatting \
or explanations outside the JSON structure.";

/// Client for an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct AdvisorClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl AdvisorClient {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            temperature,
        }
    }

    /// Generate a study plan from the digest.
    pub async fn generate_plan(
        &self,
        digest: &AssignmentsDigest,
        focus: PlanFocus,
        now: DateTime<Utc>,
    ) -> Result<StudyPlan, AdvisorError> {
        let prompt = build_prompt(digest, focus, now);
        let instruction = schema_instruction(focus);

        // The sidepanel plan is short; the dashboard's 7-day schedule
        // needs more room.
        let max_tokens = match focus {
            PlanFocus::Dashboard => 3000,
            PlanFocus::Sidepanel => 1500,
        };

        let request = ChatRequest {
            model: self.model.clone(),
            max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("{prompt}\n\n{instruction}"),
                },
            ],
            temperature: self.temperature,
        };

        let response = self
            .http
            .post(&self.api_url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| AdvisorError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AdvisorError::Network(e.to_string()))?;

        if !(200..300).contains(&status) {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(String::from))
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(AdvisorError::Api { status, message });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| AdvisorError::Parse(e.to_string()))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(AdvisorError::MissingContent)?;

        debug!(chars = content.len(), "advisor response received");

        let json_text = strip_code_fences(&content);
        serde_json::from_str(json_text).map_err(|e| AdvisorError::Parse(e.to_string()))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
