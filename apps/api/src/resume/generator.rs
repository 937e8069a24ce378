//! Resume generation: load prompt → render → Gemini call → extract → result.
//!
//! Upstream and parsing failures come back as `ResumeResult::failure`. The only
//! error propagated to the caller is a prompt template that cannot be loaded.

use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::llm_client::response::parse_gemini_response;
use crate::llm_client::{GeminiClient, GeminiError};
use crate::models::resume::ResumeResult;
use crate::resume::template::{missing_placeholders, render, PromptStore, RESUME_PROMPT};

#[derive(Clone)]
pub struct ResumeService {
    prompts: PromptStore,
    llm: GeminiClient,
}

impl ResumeService {
    pub fn new(prompts: PromptStore, llm: GeminiClient) -> Self {
        Self { prompts, llm }
    }

    pub async fn generate_resume(&self, user_description: &str) -> Result<ResumeResult, AppError> {
        let template = self.prompts.load(RESUME_PROMPT).await?;

        let values = [("userDescription", user_description)];
        let missing = missing_placeholders(&template, &values);
        if !missing.is_empty() {
            warn!("Prompt {RESUME_PROMPT} has placeholders with no value: {missing:?}");
        }
        let prompt = render(&template, &values);

        info!(
            "Requesting resume from Gemini (model: {}, prompt: {} chars)",
            self.llm.model(),
            prompt.len()
        );

        match self.llm.generate_content(&prompt).await {
            Ok(raw) => Ok(parse_gemini_response(&raw)),
            Err(e) => Ok(upstream_failure(e)),
        }
    }
}

fn upstream_failure(err: GeminiError) -> ResumeResult {
    match err {
        GeminiError::Api { status, .. } => {
            ResumeResult::failure(format!("API call failed with status: {status}"))
        }
        GeminiError::Http(e) => {
            error!("An unexpected error occurred during Gemini API call: {e}");
            ResumeResult::failure("An unexpected error occurred.")
        }
    }
}
