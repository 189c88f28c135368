use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::llm_client::prompts::{build_prompt, JSON_KEYS_ONLY};
use crate::llm_client::{LlmClient, LlmError};
use crate::resume::prompts::{SUMMARY_KEYS, SUMMARY_SYSTEM};
use crate::resume::summary::{RawSummary, ResumeSummary, SummaryError};

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("OpenAI personalization response is incomplete: {0}")]
    Invalid(#[from] SummaryError),
}

/// Turns resume README text into a validated summary.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Identifier recorded in the summary artifact.
    fn model(&self) -> &str;

    async fn summarize(&self, readme: &str) -> Result<ResumeSummary, SummarizeError>;
}

/// `Summarizer` backed by a chat-completion model.
pub struct LlmSummarizer {
    llm: LlmClient,
    model: String,
}

impl LlmSummarizer {
    pub fn new(llm: LlmClient, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }
}

pub fn summary_prompt(readme: &str) -> String {
    let mut lines: Vec<&str> = SUMMARY_KEYS.iter().copied().collect();
    lines.extend([JSON_KEYS_ONLY, "", "Resume README:", readme]);
    build_prompt(&lines)
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    fn model(&self) -> &str {
        &self.model
    }

    async fn summarize(&self, readme: &str) -> Result<ResumeSummary, SummarizeError> {
        info!("Requesting resume summary from {}", self.model);
        let raw: RawSummary = self
            .llm
            .call_json(&self.model, SUMMARY_SYSTEM, &summary_prompt(readme))
            .await?;
        Ok(ResumeSummary::try_from(raw)?)
    }
}
