//! Prompt templates: loading from bundled resources (or a prompt directory) and
//! `{{name}}` placeholder substitution.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::AppError;

/// Resource name of the resume generation prompt.
pub const RESUME_PROMPT: &str = "resume_prompt.txt";

const BUNDLED_PROMPTS: &[(&str, &str)] = &[(
    RESUME_PROMPT,
    include_str!("../../resources/resume_prompt.txt"),
)];

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("Invalid placeholder regex"));

/// Source of prompt templates.
///
/// Without a directory, prompts come from the copies compiled into the binary.
/// With one, `<dir>/<name>` is read on every load so edits apply without a restart.
#[derive(Debug, Clone, Default)]
pub struct PromptStore {
    dir: Option<PathBuf>,
}

impl PromptStore {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub async fn load(&self, name: &str) -> Result<String, AppError> {
        match &self.dir {
            Some(dir) => {
                let path = dir.join(name);
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|e| AppError::ResourceNotFound {
                        name: name.to_string(),
                        reason: format!("{}: {e}", path.display()),
                    })
            }
            None => BUNDLED_PROMPTS
                .iter()
                .find(|(bundled, _)| *bundled == name)
                .map(|(_, content)| content.to_string())
                .ok_or_else(|| AppError::ResourceNotFound {
                    name: name.to_string(),
                    reason: "no bundled prompt with this name".to_string(),
                }),
        }
    }
}

/// Replaces every literal `{{key}}` with its value, in the order given.
/// Placeholders without a value are left as they are.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |rendered, (key, value)| {
            rendered.replace(&format!("{{{{{key}}}}}"), value)
        })
}

/// Placeholders in `template` that `values` does not supply, in order of first appearance.
pub fn missing_placeholders(template: &str, values: &[(&str, &str)]) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_REGEX.captures_iter(template) {
        let name = &caps[1];
        if values.iter().all(|(key, _)| *key != name) && !missing.iter().any(|m| m == name) {
            missing.push(name.to_string());
        }
    }
    missing
}
