//! Axum route handlers for the Outreach API.

use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ApiJson, AppError};
use crate::llm_client::LlmClient;
use crate::outreach::models::{OutreachType, PersonalizationRequest, ResponseAnalysis};
use crate::outreach::personalizer::{analyze_response, generate_follow_up, personalize};
use crate::outreach::validation::{is_valid_email, required};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Body of `POST /api/outreach`. All fields optional on the wire; `validate` enforces presence.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub outreach_type: Option<String>,
    pub company_name: Option<String>,
    pub industry: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachResponseData {
    pub original_message: String,
    pub personalized_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_script: Option<String>,
    pub confidence: f64,
    pub outreach_type: OutreachType,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpRequest {
    pub original_message: Option<String>,
    pub response_received: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpData {
    pub follow_up: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub response_text: Option<String>,
}

/// `{ "success": true, "data": ... }` envelope shared by all outreach endpoints.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

const MISSING_FIELDS: &str = "Missing required fields: name, email, message, type";

impl OutreachRequest {
    /// Checks the caller contract and builds the request the personalizer expects.
    pub fn validate(&self) -> Result<PersonalizationRequest, AppError> {
        let missing = || AppError::Validation(MISSING_FIELDS.to_string());

        let name = required(self.name.as_deref()).ok_or_else(missing)?;
        let email = required(self.email.as_deref()).ok_or_else(missing)?;
        // The template is forwarded untrimmed; only blankness is checked.
        let message = self
            .message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(missing)?;
        let raw_type = required(self.outreach_type.as_deref()).ok_or_else(missing)?;

        if !is_valid_email(email) {
            return Err(AppError::Validation(format!(
                "Invalid email address: {email}"
            )));
        }

        let outreach_type = raw_type
            .parse::<OutreachType>()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(PersonalizationRequest {
            contact_name: name.to_string(),
            contact_email: email.to_string(),
            company_name: required(self.company_name.as_deref()).map(str::to_string),
            industry: required(self.industry.as_deref()).map(str::to_string),
            message_template: message.to_string(),
            outreach_type,
        })
    }
}

fn require_llm(state: &AppState) -> Result<&LlmClient, AppError> {
    state.llm.as_ref().ok_or_else(|| {
        AppError::Configuration(
            "AI service not configured. Please set OPENROUTER_API_KEY environment variable."
                .to_string(),
        )
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/outreach
///
/// Personalizes a message template for one contact. Nothing is stored or sent.
pub async fn handle_personalize(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<OutreachRequest>,
) -> Result<Json<Envelope<OutreachResponseData>>, AppError> {
    let request = body.validate()?;
    let llm = require_llm(&state)?;

    let result = personalize(llm, &request).await?;

    Ok(Envelope::ok(OutreachResponseData {
        original_message: request.message_template,
        personalized_message: result.personalized_message,
        subject: result.subject,
        call_script: result.call_script,
        confidence: result.confidence,
        outreach_type: request.outreach_type,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

/// POST /api/outreach/follow-up
pub async fn handle_follow_up(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<FollowUpRequest>,
) -> Result<Json<Envelope<FollowUpData>>, AppError> {
    let (Some(original), Some(received)) = (
        required(body.original_message.as_deref()),
        required(body.response_received.as_deref()),
    ) else {
        return Err(AppError::Validation(
            "Missing required fields: originalMessage, responseReceived".to_string(),
        ));
    };

    let follow_up = generate_follow_up(require_llm(&state)?, original, received).await?;

    Ok(Envelope::ok(FollowUpData { follow_up }))
}

/// POST /api/outreach/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AnalyzeRequest>,
) -> Result<Json<Envelope<ResponseAnalysis>>, AppError> {
    let response_text = required(body.response_text.as_deref()).ok_or_else(|| {
        AppError::Validation("Missing required field: responseText".to_string())
    })?;

    let analysis = analyze_response(require_llm(&state)?, response_text).await?;

    Ok(Envelope::ok(analysis))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> OutreachRequest {
        OutreachRequest {
            name: Some("Jane Smith".to_string()),
            email: Some("jane@company.com".to_string()),
            message: Some("Hi there".to_string()),
            outreach_type: Some("linkedin".to_string()),
            company_name: Some("  ".to_string()),
            industry: Some("Fintech".to_string()),
        }
    }

    #[test]
    fn test_validate_builds_request() {
        let req = body().validate().unwrap();
        assert_eq!(req.contact_name, "Jane Smith");
        assert_eq!(req.outreach_type, OutreachType::Linkedin);
        assert!(req.company_name.is_none(), "blank company is treated as absent");
        assert_eq!(req.industry.as_deref(), Some("Fintech"));
    }

    #[test]
    fn test_validate_rejects_each_missing_required_field() {
        let cases: [fn(&mut OutreachRequest); 4] = [
            |b| b.name = None,
            |b| b.email = Some(" ".to_string()),
            |b| b.message = Some(String::new()),
            |b| b.outreach_type = None,
        ];
        for clear in cases {
            let mut b = body();
            clear(&mut b);
            match b.validate() {
                Err(AppError::Validation(msg)) => assert_eq!(msg, MISSING_FIELDS),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let mut b = body();
        b.email = Some("not-an-email".to_string());
        assert!(matches!(b.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_type() {
        let mut b = body();
        b.outreach_type = Some("carrier-pigeon".to_string());
        match b.validate() {
            Err(AppError::Validation(msg)) => assert!(msg.contains("carrier-pigeon")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_response_data_serializes_camel_case() {
        let data = OutreachResponseData {
            original_message: "Hi".to_string(),
            personalized_message: "Hi Jane".to_string(),
            subject: Some("Hello".to_string()),
            call_script: None,
            confidence: 0.8,
            outreach_type: OutreachType::Email,
            timestamp: "2024-01-15T10:30:00.000Z".to_string(),
        };
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["originalMessage"], "Hi");
        assert_eq!(value["personalizedMessage"], "Hi Jane");
        assert_eq!(value["outreachType"], "email");
        assert!(value.get("callScript").is_none());
    }
}
