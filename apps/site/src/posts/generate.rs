use thiserror::Error;
use tracing::info;

use crate::llm_client::prompts::{build_prompt, JSON_KEYS_ONLY};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::post::{GeneratedFields, RawGeneratedFields};
use crate::posts::fields::{normalize_generated_fields, PostInputError};
use crate::posts::prompts::{GENERATE_KEYS, GENERATE_SYSTEM};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Invalid OpenAI response: {0}")]
    Invalid(#[from] PostInputError),
}

pub fn generate_prompt(content: &str) -> String {
    let mut lines: Vec<&str> = GENERATE_KEYS.to_vec();
    lines.extend([JSON_KEYS_ONLY, "", "Content:", content]);
    build_prompt(&lines)
}

/// Asks the model for title, excerpt, tags and slug, then normalises its answer.
pub async fn generate_fields(
    llm: &LlmClient,
    model: &str,
    content: &str,
) -> Result<GeneratedFields, GenerateError> {
    info!("Generating post metadata with {model}");
    let raw: RawGeneratedFields = llm
        .call_json(model, GENERATE_SYSTEM, &generate_prompt(content))
        .await?;
    Ok(normalize_generated_fields(raw)?)
}
