use crate::config::{GenerationOptions, SafetyOptions};
use crate::core::types::{Role, Turn};
use crate::providers::error::ProviderError;

use super::types::{
    ApiRequest, ApiResponse, Content, GenerationConfig, HarmCategory, Part, SafetySetting,
};

const USER_ROLE: &str = "user";
const MODEL_ROLE: &str = "model";

/// Finish reasons that mean the candidate was withheld by a content filter.
const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

#[must_use]
pub fn user_content(text: &str) -> Content {
    text_content(USER_ROLE, text)
}

#[must_use]
pub fn model_content(text: &str) -> Content {
    text_content(MODEL_ROLE, text)
}

fn text_content(role: &str, text: &str) -> Content {
    Content {
        role: role.to_string(),
        parts: vec![Part {
            text: Some(text.to_string()),
        }],
    }
}

#[must_use]
pub fn to_content(turn: &Turn) -> Option<Content> {
    match turn.role() {
        Role::User => Some(user_content(turn.text())),
        Role::Assistant => Some(model_content(turn.text())),
        Role::Error => None,
    }
}

pub fn history_from_turns(prior: &[Turn]) -> Result<Vec<Content>, ProviderError> {
    let history: Vec<Content> = prior.iter().filter_map(to_content).collect();

    if let Some(first) = history.first()
        && first.role != USER_ROLE
    {
        return Err(ProviderError::InvalidRequest(format!(
            "First content should be with role '{USER_ROLE}', got '{}'",
            first.role
        )));
    }

    Ok(history)
}

#[must_use]
pub fn generation_config(options: &GenerationOptions) -> GenerationConfig {
    GenerationConfig {
        temperature: Some(options.temperature),
        top_k: Some(options.top_k),
        top_p: Some(options.top_p),
        max_output_tokens: Some(options.max_output_tokens),
    }
}

#[must_use]
pub fn safety_settings(options: &SafetyOptions) -> Vec<SafetySetting> {
    HarmCategory::ALL
        .iter()
        .map(|&category| SafetySetting {
            category,
            threshold: options.threshold,
        })
        .collect()
}

#[must_use]
pub fn to_api_request(
    history: &[Content],
    message: &str,
    generation: &GenerationConfig,
    safety: &[SafetySetting],
) -> ApiRequest {
    let mut contents = history.to_vec();
    contents.push(user_content(message));

    ApiRequest {
        contents,
        generation_config: Some(generation.clone()),
        safety_settings: safety.to_vec(),
    }
}

/// Extracts the reply text, turning prompt or candidate blocks into
/// [`ProviderError::Blocked`]. An empty string is a valid reply.
pub fn reply_text(response: &ApiResponse) -> Result<String, ProviderError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
    {
        return Err(ProviderError::blocked(reason));
    }

    let Some(candidate) = response.candidates.first() else {
        return Ok(String::new());
    };

    let text: String = candidate
        .content
        .iter()
        .flat_map(|content| content.parts.iter())
        .filter_map(|part| part.text.as_deref())
        .collect();

    if text.is_empty()
        && let Some(reason) = candidate
            .finish_reason
            .as_deref()
            .filter(|reason| BLOCKING_FINISH_REASONS.contains(reason))
    {
        return Err(ProviderError::blocked(reason));
    }

    Ok(text)
}
