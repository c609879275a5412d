//! Personalization client: personalize, follow up, and analyze replies via the LLM.
//!
//! `personalize` never fails on a malformed model reply: an undecodable reply becomes
//! the fallback result. Transport, status, and configuration failures always propagate.

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::llm_client::{strip_json_fences, CompletionOptions, LlmClient, LlmError};
use crate::outreach::models::{
    OutreachType, PersonalizationRequest, PersonalizationResult, ResponseAnalysis,
};
use crate::outreach::prompts::{
    build_analysis_prompt, build_follow_up_prompt, build_prompt_spec, ANALYSIS_SYSTEM,
    FOLLOW_UP_SYSTEM,
};

/// Used when the model returns valid JSON without a confidence.
pub const DEFAULT_CONFIDENCE: f64 = 0.8;
/// Used when the model reply could not be decoded at all.
pub const FALLBACK_CONFIDENCE: f64 = 0.7;

const PERSONALIZE_OPTIONS: CompletionOptions = CompletionOptions {
    temperature: 0.7,
    max_tokens: 1000,
};

const FOLLOW_UP_OPTIONS: CompletionOptions = CompletionOptions {
    temperature: 0.7,
    max_tokens: 500,
};

const ANALYSIS_OPTIONS: CompletionOptions = CompletionOptions {
    temperature: 0.3,
    max_tokens: 300,
};

/// Shape the model is asked to reply with.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelReply {
    personalized_message: String,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    call_script: Option<String>,
    /// Kept loose: a non-numeric confidence must not sink an otherwise usable reply.
    #[serde(default)]
    confidence: Option<Value>,
}

impl PersonalizationResult {
    /// Strict decode of a model reply. Returns `None` if the text is not the expected JSON object.
    pub fn from_model_reply(raw: &str, outreach_type: OutreachType) -> Option<Self> {
        let reply: ModelReply = serde_json::from_str(strip_json_fences(raw)).ok()?;

        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());

        Some(Self {
            personalized_message: reply.personalized_message,
            subject: match outreach_type {
                OutreachType::Email => non_empty(reply.subject),
                _ => None,
            },
            call_script: match outreach_type {
                OutreachType::Call => non_empty(reply.call_script),
                _ => None,
            },
            confidence: reply
                .confidence
                .as_ref()
                .and_then(Value::as_f64)
                .filter(|c| c.is_finite())
                .map(|c| c.clamp(0.0, 1.0))
                .unwrap_or(DEFAULT_CONFIDENCE),
        })
    }

    /// Degraded result carrying the raw reply text.
    pub fn fallback(raw: &str) -> Self {
        Self {
            personalized_message: raw.to_string(),
            subject: None,
            call_script: None,
            confidence: FALLBACK_CONFIDENCE,
        }
    }

    /// Strict decode, else fallback. Never fails.
    pub fn parse_reply(raw: &str, outreach_type: OutreachType) -> Self {
        Self::from_model_reply(raw, outreach_type).unwrap_or_else(|| {
            warn!("Model reply was not valid personalization JSON; using raw text");
            Self::fallback(raw)
        })
    }
}

/// Personalizes one message template for one contact.
pub async fn personalize(
    llm: &LlmClient,
    request: &PersonalizationRequest,
) -> Result<PersonalizationResult, LlmError> {
    let prompt = build_prompt_spec(request);

    let response = llm
        .call(&prompt.system_prompt, &prompt.user_prompt, PERSONALIZE_OPTIONS)
        .await?;
    // Blank or null content still goes through the fallback; only a choiceless reply fails.
    let reply = response.raw_text().ok_or(LlmError::EmptyContent)?;

    let result = PersonalizationResult::parse_reply(reply, request.outreach_type);
    info!(
        "Personalized {} outreach (confidence {:.2})",
        request.outreach_type.label(),
        result.confidence
    );

    Ok(result)
}

/// Drafts a follow-up to a reply. The model's text is returned as-is.
pub async fn generate_follow_up(
    llm: &LlmClient,
    original_message: &str,
    response_received: &str,
) -> Result<String, LlmError> {
    let prompt = build_follow_up_prompt(original_message, response_received);
    llm.complete(FOLLOW_UP_SYSTEM, &prompt, FOLLOW_UP_OPTIONS)
        .await
}

/// Classifies a prospect's reply. A reply that does not decode is an error, not a default.
pub async fn analyze_response(
    llm: &LlmClient,
    response_text: &str,
) -> Result<ResponseAnalysis, LlmError> {
    let prompt = build_analysis_prompt(response_text);
    llm.complete_json::<ResponseAnalysis>(ANALYSIS_SYSTEM, &prompt, ANALYSIS_OPTIONS)
        .await
}
