//! Prompt constants and prompt builders for the outreach operations.
//! Pure functions only. Nothing here touches the network.

use crate::outreach::models::{OutreachType, PersonalizationRequest, PromptSpec};

/// Persona shared by every personalization call. Also the fallback for unknown types.
pub const BASE_PERSONA: &str = "You are an expert cold outreach specialist with years of \
    experience in sales and marketing. Your goal is to create highly personalized, \
    engaging messages that get responses.";

const EMAIL_PERSONA: &str = "You specialize in crafting compelling cold emails that stand out \
    in crowded inboxes. Focus on personalization, value proposition, and clear call-to-action.";

const CALL_PERSONA: &str = "You specialize in creating cold call scripts that are \
    conversational, engaging, and handle objections gracefully. Focus on building rapport quickly.";

const LINKEDIN_PERSONA: &str = "You specialize in LinkedIn outreach that feels natural and \
    professional. Focus on connection requests and follow-up messages that leverage mutual \
    connections or shared interests.";

const MESSAGE_PERSONA: &str = "You specialize in direct messages across various platforms. \
    Focus on being concise, personal, and respectful of the platform's communication style.";

/// Substituted for company or industry when the caller left them out.
pub const UNKNOWN_FIELD: &str = "Unknown";

const EMAIL_REQUIREMENT: &str = "6. Provide a compelling subject line";
const CALL_REQUIREMENT: &str = "6. Structure as a conversational script with natural transitions";

pub const FOLLOW_UP_SYSTEM: &str = "You are an expert sales follow-up specialist. Generate a \
    professional and engaging follow-up message based on the original outreach and the \
    response received.";

pub const ANALYSIS_SYSTEM: &str = "You are an expert at analyzing sales responses. Analyze the \
    sentiment, intent, and suggest the best next action. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object.";

/// Returns the system prompt for an outreach type.
pub fn system_prompt(outreach_type: OutreachType) -> String {
    let specialization = match outreach_type {
        OutreachType::Email => EMAIL_PERSONA,
        OutreachType::Call => CALL_PERSONA,
        OutreachType::Linkedin => LINKEDIN_PERSONA,
        OutreachType::Message => MESSAGE_PERSONA,
    };
    format!("{BASE_PERSONA} {specialization}")
}

/// Same as [`system_prompt`] but keyed by the raw wire value.
/// Anything unrecognized gets the bare base persona. Handlers reject unknown
/// types before prompting, so only the typed mapping runs in the server.
#[cfg(test)]
pub fn system_prompt_for(raw_type: &str) -> String {
    raw_type
        .parse::<OutreachType>()
        .map(system_prompt)
        .unwrap_or_else(|_| BASE_PERSONA.to_string())
}

fn or_unknown(value: Option<&str>) -> &str {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_FIELD)
}

/// Renders the user prompt for a personalization request.
pub fn build_user_prompt(request: &PersonalizationRequest) -> String {
    let outreach_type = request.outreach_type;

    let type_requirement = match outreach_type {
        OutreachType::Email => Some(EMAIL_REQUIREMENT),
        OutreachType::Call => Some(CALL_REQUIREMENT),
        OutreachType::Message | OutreachType::Linkedin => None,
    };

    let mut requirements = String::from(
        "1. Personalize the message using the contact details\n\
         2. Make it engaging and professional\n\
         3. Include a clear value proposition\n\
         4. Add a compelling call-to-action\n\
         5. Keep it concise but impactful",
    );
    if let Some(line) = type_requirement {
        requirements.push('\n');
        requirements.push_str(line);
    }

    let mut shape = String::from("{\n  \"personalizedMessage\": \"the personalized message\",\n");
    match outreach_type {
        OutreachType::Email => shape.push_str("  \"subject\": \"email subject line\",\n"),
        OutreachType::Call => shape.push_str("  \"callScript\": \"structured call script\",\n"),
        OutreachType::Message | OutreachType::Linkedin => {}
    }
    shape.push_str("  \"confidence\": 0.95\n}");

    format!(
        "Personalize this message template for cold outreach:

Contact Details:
- Name: {name}
- Email: {email}
- Company: {company}
- Industry: {industry}

Message Template:
{template}

Outreach Type: {outreach_type}

Requirements:
{requirements}

Provide the response in JSON format (confidence is a number between 0 and 1):
{shape}",
        name = request.contact_name,
        email = request.contact_email,
        company = or_unknown(request.company_name.as_deref()),
        industry = or_unknown(request.industry.as_deref()),
        template = request.message_template,
    )
}

/// Builds the full prompt pair for a personalization request.
pub fn build_prompt_spec(request: &PersonalizationRequest) -> PromptSpec {
    PromptSpec {
        system_prompt: system_prompt(request.outreach_type),
        user_prompt: build_user_prompt(request),
    }
}

pub fn build_follow_up_prompt(original_message: &str, response_received: &str) -> String {
    format!(
        "Original message: {original_message}
Response received: {response_received}

Generate a thoughtful follow-up message that:
1. Acknowledges their response
2. Provides additional value
3. Moves the conversation forward
4. Maintains a professional tone"
    )
}

pub fn build_analysis_prompt(response_text: &str) -> String {
    format!(
        r#"Analyze this response: "{response_text}"

Provide analysis in this JSON format:
{{
  "sentiment": "positive|neutral|negative",
  "intent": "interested|not_interested|needs_more_info|objection",
  "suggestedAction": "specific action recommendation"
}}"#
    )
}
