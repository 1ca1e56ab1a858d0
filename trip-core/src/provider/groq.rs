use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FetchError;
use crate::model::TripRequest;
use crate::provider::{self, ServiceId};

const CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const MODEL: &str = "llama-3.1-8b-instant";
const TEMPERATURE: f32 = 0.7;

const SYSTEM_PROMPT: &str = "You are a knowledgeable travel advisor. Provide detailed information about the city, including:\n\
    1. A paragraph about the city's cultural and historical significance\n\
    2. Major attractions and must-visit places\n\
    3. Local cuisine recommendations\n\
    4. Best areas to stay\n\
    5. Transportation tips\n\
    6. Cultural etiquette and customs\n\
    Format the response in a clear, organized manner.";

/// Produces the free-text trip narrative. Trait seam so the model backend
/// can be swapped (or canned in tests) without touching callers.
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn trip_narrative(&self, request: &TripRequest) -> Result<String, FetchError>;
}

/// Narrator over the Groq chat-completions endpoint (OpenAI-compatible).
#[derive(Debug, Clone)]
pub struct GroqNarrator {
    api_key: Option<String>,
    http: Client,
}

impl GroqNarrator {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key, http: Client::new() }
    }
}

#[async_trait]
impl Narrator for GroqNarrator {
    async fn trip_narrative(&self, request: &TripRequest) -> Result<String, FetchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(FetchError::MissingCredential { service: ServiceId::Groq })?;

        debug!("requesting trip narrative for '{}'", request.destination);

        let body = ChatRequest {
            model: MODEL,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT.to_string() },
                ChatMessage { role: "user", content: user_prompt(request) },
            ],
        };

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| FetchError::Transport { service: ServiceId::Groq, source })?;

        let parsed: ChatResponse = provider::decode_response(ServiceId::Groq, response).await?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                FetchError::decode(ServiceId::Groq, "chat completion contained no message content")
            })
    }
}

fn user_prompt(request: &TripRequest) -> String {
    format!(
        "Create a {}-day trip plan for {} in {}.",
        request.days, request.destination, request.month
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: &'static str,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Month;

    fn request() -> TripRequest {
        TripRequest::new("Tokyo", 3, Month::April, "London").unwrap()
    }

    #[test]
    fn user_prompt_embeds_days_city_and_month() {
        assert_eq!(user_prompt(&request()), "Create a 3-day trip plan for Tokyo in April.");
    }

    #[test]
    fn system_prompt_fixes_the_six_sections() {
        for needle in [
            "cultural and historical significance",
            "attractions",
            "cuisine",
            "areas to stay",
            "Transportation",
            "etiquette",
        ] {
            assert!(SYSTEM_PROMPT.contains(needle), "missing section: {needle}");
        }
    }

    #[test]
    fn chat_request_serializes_model_and_temperature() {
        let body = ChatRequest {
            model: MODEL,
            temperature: TEMPERATURE,
            messages: vec![ChatMessage { role: "user", content: "hi".to_string() }],
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "llama-3.1-8b-instant");
        assert_eq!(value["messages"][0]["role"], "user");
        assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn chat_response_first_choice_wins() {
        let json = r#"{"choices": [
            {"message": {"role": "assistant", "content": "Day 1: Asakusa"}},
            {"message": {"role": "assistant", "content": "ignored"}}
        ]}"#;

        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        let content = parsed.choices.into_iter().next().and_then(|c| c.message.content);

        assert_eq!(content.as_deref(), Some("Day 1: Asakusa"));
    }
}
