use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::resolver::{OptionResolver, ResolveError};
use crate::config::GeminiConfig;
use crate::matching::Question;

/// Free-text resolver backed by the Generative Language API. The model is
/// asked to answer with exactly one canonical option value, or `none` when
/// nothing fits. The conversation service re-validates the returned value,
/// so a hallucinated answer degrades into a clarification re-ask.
pub struct GeminiResolver {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiResolver {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn prompt_for(question: &Question, text: &str) -> String {
        let options = question
            .options
            .iter()
            .map(|option| format!("- {} ({})", option.value, option.label))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "A kiosk visitor was asked (in Hebrew): \"{prompt}\"\n\
             The canonical answer options are:\n{options}\n\
             The visitor typed: \"{text}\"\n\
             Reply with exactly one option value from the list, the one closest \
             in meaning to the visitor's text, or with the single word none if \
             no option fits. Reply with the value only, no punctuation.",
            prompt = question.prompt,
        )
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl OptionResolver for GeminiResolver {
    async fn resolve(
        &self,
        question: &Question,
        text: &str,
    ) -> Result<Option<String>, ResolveError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": Self::prompt_for(question, text) }]
            }],
            "generationConfig": { "temperature": 0.0, "maxOutputTokens": 16 }
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| ResolveError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(ResolveError::Transport(format!(
                "generative language API returned {status}: {detail}"
            )));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| ResolveError::Malformed(err.to_string()))?;

        let answer = payload
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.trim().to_ascii_lowercase())
            .ok_or_else(|| {
                ResolveError::Malformed("response carries no candidate text".to_string())
            })?;

        debug!(question = %question.id, %answer, "free-text resolution");

        if answer.is_empty() || answer == "none" {
            return Ok(None);
        }

        Ok(Some(answer))
    }
}
