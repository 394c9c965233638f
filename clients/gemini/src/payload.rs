use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateRequest {
    pub fn new(prompt: String) -> Self {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: GenerationConfig::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Part {
    pub text: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            temperature: 0.9,
            top_p: 0.8,
            top_k: 40,
            max_output_tokens: 120,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[test]
fn request_json_test() {
    let json = serde_json::to_value(GenerateRequest::new("hi".to_string())).unwrap();
    assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    assert_eq!(json["generationConfig"]["topK"], 40);
    assert_eq!(json["generationConfig"]["maxOutputTokens"], 120);
}

#[test]
fn response_text_test() {
    let response: GenerateResponse = serde_json::from_str(
        r#"{ "candidates": [{ "content": { "parts": [{ "text": " bruh \n" }], "role": "model" } }] }"#,
    )
    .unwrap();
    assert_eq!(response.text(), Some("bruh"));

    let response: GenerateResponse = serde_json::from_str(r#"{ "candidates": [] }"#).unwrap();
    assert_eq!(response.text(), None);

    let response: GenerateResponse = serde_json::from_str(r#"{ "candidates": [{ "finishReason": "SAFETY" }] }"#).unwrap();
    assert_eq!(response.text(), None);
}
