//! Rust types for the Gemini `generateContent` API.
//!
//! Serde-serializable to JSON for HTTP calls. Response types are lenient:
//! every level is optional so a missing field surfaces as `None` from
//! [`GenerateContentResponse::first_content`] instead of a decode error.

use serde::{Deserialize, Serialize};

/// Sampling temperature.
pub const TEMPERATURE: f32 = 0.8;
/// Candidate pool size per token.
pub const TOP_K: u32 = 40;
/// Nucleus sampling mass.
pub const TOP_P: f32 = 0.95;
/// Hard cap on response length.
pub const MAX_OUTPUT_TOKENS: u32 = 2048;

/// Request body for `models/<id>:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Single-turn request carrying one text part.
    pub fn from_prompt(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: GenerationConfig::default(),
        }
    }
}

/// A turn of content: a list of parts.
#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Text of the first part, if that part is a text part.
    pub fn first_text(&self) -> Option<&str> {
        self.parts.first()?.text.as_deref()
    }
}

/// One part of a content turn. Only text parts are used here.
#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Sampling parameters. Fixed; see the module constants.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_k: TOP_K,
            top_p: TOP_P,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

/// Success envelope from `generateContent`.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Content of the first candidate, if any.
    pub fn first_content(&self) -> Option<&Content> {
        self.candidates.as_ref()?.first()?.content.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_json() {
        let req = GenerateContentRequest::from_prompt("Hello".into());
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "Hello");
        let config = &json["generationConfig"];
        assert_eq!(config["topK"], 40);
        assert_eq!(config["maxOutputTokens"], 2048);
        // f32 precision: compare through f64 with a tolerance
        assert!((config["temperature"].as_f64().unwrap() - 0.8).abs() < 0.001);
        assert!((config["topP"].as_f64().unwrap() - 0.95).abs() < 0.001);
    }

    #[test]
    fn response_text_extracted() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}], "role": "model"},
                 "finishReason": "STOP"}
            ],
            "usageMetadata": {"promptTokenCount": 10}
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.first_content().and_then(Content::first_text), Some("first"));
    }

    #[test]
    fn missing_candidates_has_no_text() {
        let resp: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        assert!(resp.first_content().is_none());
    }

    #[test]
    fn empty_candidates_has_no_text() {
        let resp: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(resp.first_content().is_none());
    }

    #[test]
    fn candidate_without_content_has_no_text() {
        let resp: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert!(resp.first_content().is_none());
    }

    #[test]
    fn content_without_parts_has_no_text() {
        let resp: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"role": "model"}}]}"#).unwrap();
        let content = resp.first_content().unwrap();
        assert_eq!(content.first_text(), None);
    }
}
