use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Channel an outreach message is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutreachType {
    Email,
    Call,
    Message,
    Linkedin,
}

impl OutreachType {
    pub const ALL: [OutreachType; 4] = [
        OutreachType::Email,
        OutreachType::Call,
        OutreachType::Message,
        OutreachType::Linkedin,
    ];

    /// Wire value, as it appears in requests and prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutreachType::Email => "email",
            OutreachType::Call => "call",
            OutreachType::Message => "message",
            OutreachType::Linkedin => "linkedin",
        }
    }

    /// Human-facing label for dashboards and logs.
    pub fn label(&self) -> &'static str {
        match self {
            OutreachType::Email => "Email",
            OutreachType::Call => "Cold Call",
            OutreachType::Message => "Direct Message",
            OutreachType::Linkedin => "LinkedIn Message",
        }
    }
}

impl fmt::Display for OutreachType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOutreachType(pub String);

impl fmt::Display for UnknownOutreachType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown outreach type '{}' (expected one of: email, call, message, linkedin)",
            self.0
        )
    }
}

impl std::error::Error for UnknownOutreachType {}

impl FromStr for OutreachType {
    type Err = UnknownOutreachType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutreachType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownOutreachType(s.to_string()))
    }
}

/// One personalization attempt. Callers validate required fields before building this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizationRequest {
    pub contact_name: String,
    pub contact_email: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    pub message_template: String,
    pub outreach_type: OutreachType,
}

/// Outcome of one personalization attempt.
///
/// `subject` is only ever set for email, `call_script` only for call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizationResult {
    pub personalized_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_script: Option<String>,
    pub confidence: f64,
}

/// System and user prompt derived from a request. Built per call, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub system_prompt: String,
    pub user_prompt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Interested,
    NotInterested,
    NeedsMoreInfo,
    Objection,
}

/// Classification of a prospect's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseAnalysis {
    pub sentiment: Sentiment,
    pub intent: Intent,
    pub suggested_action: String,
}
