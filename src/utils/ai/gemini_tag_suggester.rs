use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::interfaces::tag_suggester::{PhotoAnalysis, TagSuggesterInterface};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const PROMPT: &str = "Analyze this image. Give 10 short descriptive tags (one or two words each) \
and 3 short catchy captions for a photo sharing site. \
Answer only with JSON of the form {\"tags\": [\"...\"], \"captions\": [\"...\"]}.";

/// Tag and caption suggestions by the Gemini `generateContent` API.
pub struct GeminiTagSuggester {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ContentPart {
    pub text: Option<String>,
}

impl GeminiTagSuggester {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    fn request_body(image: &[u8], content_type: Option<&str>) -> serde_json::Value {
        json!({
            "contents": [{
                "parts": [
                    { "text": PROMPT },
                    {
                        "inline_data": {
                            "mime_type": content_type.unwrap_or("image/jpeg"),
                            "data": STANDARD.encode(image),
                        }
                    }
                ]
            }],
            "generationConfig": { "responseMimeType": "application/json" }
        })
    }
}

/// Joined text of the first candidate.
pub fn response_text(response: &GenerateContentResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect::<Vec<_>>()
        .join("");
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parses the model answer, tolerating markdown code fences around the JSON.
pub fn parse_analysis(text: &str) -> Result<PhotoAnalysis, String> {
    let trimmed = text.trim();
    let json_str = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => return Err(format!("no JSON object in model answer: {trimmed}")),
    };
    let mut analysis: PhotoAnalysis = serde_json::from_str(json_str).map_err(|e| e.to_string())?;
    analysis.tags = analysis
        .tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    analysis.captions = analysis
        .captions
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    Ok(analysis)
}

#[async_trait]
impl TagSuggesterInterface for GeminiTagSuggester {
    async fn analyze(
        &self,
        image: &[u8],
        content_type: Option<&str>,
    ) -> Result<PhotoAnalysis, String> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        debug!("->> gemini request model={}", self.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&Self::request_body(image, content_type))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("->> gemini error status={status} body={body}");
            return Err(format!("Gemini API returned {status}"));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| e.to_string())?;
        let text = response_text(&body).ok_or("Gemini returned no content".to_string())?;
        parse_analysis(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json() {
        let res = parse_analysis(r#"{"tags": ["sunset", " beach "], "captions": ["Golden hour"]}"#)
            .unwrap();
        assert_eq!(res.tags, vec!["sunset", "beach"]);
        assert_eq!(res.captions, vec!["Golden hour"]);
    }

    #[test]
    fn parses_fenced_json_without_captions() {
        let text = "```json\n{\"tags\": [\"city\", \"night\"]}\n```";
        let res = parse_analysis(text).unwrap();
        assert_eq!(res.tags, vec!["city", "night"]);
        assert!(res.captions.is_empty());
    }

    #[test]
    fn rejects_non_json() {
        assert!(parse_analysis("I can not see the image").is_err());
    }

    #[test]
    fn extracts_first_candidate_text() {
        let body: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"tags\": " }, { "text": "[\"art\"]}" }] }
            }]
        }))
        .unwrap();
        let text = response_text(&body).unwrap();
        assert_eq!(parse_analysis(&text).unwrap().tags, vec!["art"]);

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response_text(&empty).is_none());
    }

    #[test]
    fn request_carries_inline_image() {
        let body = GeminiTagSuggester::request_body(b"abc", Some("image/png"));
        let inline = &body["contents"][0]["parts"][1]["inline_data"];
        assert_eq!(inline["mime_type"], "image/png");
        assert_eq!(inline["data"], "YWJj");
    }
}
