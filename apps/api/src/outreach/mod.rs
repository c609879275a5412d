// Outreach personalization: prompt building, LLM round trip, reply parsing.
// All LLM calls go through llm_client; nothing here talks HTTP to the model directly.

pub mod handlers;
pub mod models;
pub mod personalizer;
pub mod prompts;
pub mod validation;
