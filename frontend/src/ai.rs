//! AI content generation. Requests go straight from the browser to the
//! selected provider; the API key is attached to that one request and is
//! never sent anywhere else.

use gloo_net::http::Request;
use serde_json::{json, Value};
use std::fmt;

use common::model::{WriteUp, WriteUpSection};

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_MODEL: &str = "gpt-3.5-turbo";
const GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProvider {
    OpenAi,
    Gemini,
}

impl AiProvider {
    pub const ALL: [AiProvider; 2] = [AiProvider::OpenAi, AiProvider::Gemini];

    pub fn label(&self) -> &'static str {
        match self {
            AiProvider::OpenAi => "OpenAI",
            AiProvider::Gemini => "Google Gemini",
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            AiProvider::OpenAi => "openai",
            AiProvider::Gemini => "gemini",
        }
    }

    pub fn from_id(id: &str) -> AiProvider {
        match id {
            "gemini" => AiProvider::Gemini,
            _ => AiProvider::OpenAi,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    MissingKey,
    Request(String),
    /// Non-2xx status with whatever body the provider returned.
    Provider(u16, String),
    UnexpectedShape,
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::MissingKey => write!(f, "an API key is required"),
            AiError::Request(msg) => write!(f, "request failed: {msg}"),
            AiError::Provider(status, body) => {
                write!(f, "provider returned status {status}: {body}")
            }
            AiError::UnexpectedShape => write!(f, "unexpected provider response shape"),
        }
    }
}

impl std::error::Error for AiError {}

pub async fn generate(
    provider: AiProvider,
    api_key: &str,
    prompt: &str,
) -> Result<String, AiError> {
    if api_key.trim().is_empty() {
        return Err(AiError::MissingKey);
    }
    match provider {
        AiProvider::OpenAi => generate_openai(api_key, prompt).await,
        AiProvider::Gemini => generate_gemini(api_key, prompt).await,
    }
}

async fn generate_openai(api_key: &str, prompt: &str) -> Result<String, AiError> {
    let body = json!({
        "model": OPENAI_MODEL,
        "messages": [{ "role": "user", "content": prompt }],
        "temperature": 0.7,
        "max_tokens": 1000,
    });
    let response = Request::post(OPENAI_URL)
        .header("Authorization", &format!("Bearer {}", api_key.trim()))
        .json(&body)
        .map_err(|e| AiError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| AiError::Request(e.to_string()))?;
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AiError::Provider(status, body));
    }
    let value: Value = response
        .json()
        .await
        .map_err(|e| AiError::Request(e.to_string()))?;
    value
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .ok_or(AiError::UnexpectedShape)
}

async fn generate_gemini(api_key: &str, prompt: &str) -> Result<String, AiError> {
    let body = json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
    });
    let url = format!("{}?key={}", GEMINI_URL, api_key.trim());
    let response = Request::post(&url)
        .json(&body)
        .map_err(|e| AiError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| AiError::Request(e.to_string()))?;
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AiError::Provider(status, body));
    }
    let value: Value = response
        .json()
        .await
        .map_err(|e| AiError::Request(e.to_string()))?;
    value
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .ok_or(AiError::UnexpectedShape)
}

/// Default prompt offered when the assist dialog opens, seeded with the
/// document and section context so the user can send it as-is.
pub fn prompt_for(write_up: &WriteUp, section: &WriteUpSection) -> String {
    let machine = if write_up.title.trim().is_empty() {
        "a CTF machine".to_string()
    } else {
        format!("the machine \"{}\"", write_up.title.trim())
    };
    let mut prompt = format!(
        "Write the \"{}\" section ({}) of a CTF write-up about {}. \
         Use Markdown, keep it technical and concise.",
        section.title,
        section.section_type.label(),
        machine,
    );
    if !section.content.trim().is_empty() {
        prompt.push_str("\n\nNotes so far:\n");
        prompt.push_str(section.content.trim());
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::SectionType;

    #[test]
    fn provider_ids_round_trip_with_a_default() {
        for provider in AiProvider::ALL {
            assert_eq!(AiProvider::from_id(provider.id()), provider);
        }
        assert_eq!(AiProvider::from_id("???"), AiProvider::OpenAi);
    }

    #[test]
    fn prompt_carries_section_and_document_context() {
        let mut write_up = common::catalog::default_write_up("2025-06-01");
        write_up.title = "Cap".into();
        let mut section = WriteUpSection::new(SectionType::Step, "Privilege Escalation");
        section.content = "getcap shows python3.8 cap_setuid".into();
        let prompt = prompt_for(&write_up, &section);
        assert!(prompt.contains("Privilege Escalation"));
        assert!(prompt.contains("\"Cap\""));
        assert!(prompt.contains("getcap"));
    }
}
