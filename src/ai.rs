use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{AppError, AppResult};

const GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const GROQ_MODEL: &str = "llama-3.3-70b-versatile";

const GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_MODEL: &str = "gemini-2.0-flash-thinking-exp-1219";

/// Returned when a provider answers with an empty candidate list.
pub const NO_RESPONSE: &str = "Maaf, tidak ada respons.";

/// One turn of a conversation as clients submit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Explicitly constructed provider handles carried in AppState; endpoints
/// that need a provider whose key was not supplied get a configuration
/// error instead of a doomed network call.
#[derive(Clone)]
pub struct AiClients {
    groq: Option<GroqClient>,
    gemini: Option<GeminiClient>,
}

impl AiClients {
    pub fn from_env() -> AiClients {
        // The platform default is no timeout at all; a hung provider call
        // must not pin a request forever.
        let http = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap();

        AiClients {
            groq: dotenv::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty()).map(|api_key| {
                GroqClient { http: http.clone(), api_key }
            }),
            gemini: dotenv::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()).map(|api_key| {
                GeminiClient { http: http.clone(), api_key }
            }),
        }
    }

    pub fn groq(&self) -> AppResult<&GroqClient> {
        self.groq
            .as_ref()
            .ok_or(AppError::Config("Groq API key not configured".to_owned()))
    }

    pub fn gemini(&self) -> AppResult<&GeminiClient> {
        self.gemini
            .as_ref()
            .ok_or(AppError::Config("Gemini API key not configured".to_owned()))
    }
}

/// OpenAI-compatible chat completion provider.
#[derive(Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    api_key: String,
}

#[derive(Deserialize)]
struct Completion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

impl GroqClient {
    /// Single-shot completion over an already assembled message list.
    /// Sampling parameters are fixed across the app.
    pub async fn chat(&self, messages: &[ChatMessage], max_tokens: u32) -> AppResult<String> {
        let body: Completion = self
            .http
            .post(GROQ_URL)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "messages": messages,
                "model": GROQ_MODEL,
                "temperature": 0.7,
                "max_tokens": max_tokens,
                "top_p": 1,
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_else(|| NO_RESPONSE.to_owned()))
    }
}

/// Conversational generative-AI provider (Gemini `generateContent`).
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
}

/// One turn in Gemini wire format; roles are `user` / `model`.
#[derive(Debug, Clone, Serialize)]
pub struct GeminiTurn {
    pub role: String,
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeminiPart {
    pub text: String,
}

impl GeminiTurn {
    pub fn new(role: &str, text: &str) -> GeminiTurn {
        GeminiTurn {
            role: role.to_owned(),
            parts: vec![GeminiPart { text: text.to_owned() }],
        }
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Thinking-capable models split an answer across several parts; the
    /// answer is the concatenation of every text part of the first candidate.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

impl GeminiClient {
    /// Multi-turn generation, optionally with a pinned system instruction.
    pub async fn generate(
        &self,
        system_instruction: Option<&str>,
        contents: Vec<GeminiTurn>,
        max_output_tokens: u32,
    ) -> AppResult<String> {
        let url = format!("{GEMINI_URL}/{GEMINI_MODEL}:generateContent?key={}", self.api_key);
        let mut request = json!({
            "contents": contents,
            "generationConfig": {
                "temperature": 0.7,
                "maxOutputTokens": max_output_tokens,
            },
        });
        if let Some(text) = system_instruction {
            request["system_instruction"] = json!({ "parts": [{ "text": text }] });
        }

        let body: GenerateResponse = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text = body.text();
        Ok(if text.is_empty() { NO_RESPONSE.to_owned() } else { text })
    }

    /// One-shot prompt without history, used by the recommender.
    pub async fn generate_text(&self, prompt: &str, max_output_tokens: u32) -> AppResult<String> {
        self.generate(None, vec![GeminiTurn::new("user", prompt)], max_output_tokens)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_text_joins_every_part() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [
                {"text": "Perpustakaan buka "},
                {"text": "pukul 08.00."}
            ]}}]}"#,
        )
        .unwrap();
        assert_eq!(body.text(), "Perpustakaan buka pukul 08.00.");
    }

    #[test]
    fn empty_candidate_list_yields_no_text() {
        let body: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert_eq!(body.text(), "");
    }
}
