use std::path::Path;

use planscout_catalog::{AssistantFilterPayload, Facets};
use tracing::{debug, info};

use crate::provider::{LlmError, LlmProvider, Message};

/// Path to the externalized interpreter system prompt template.
const INTERPRETER_TEMPLATE_PATH: &str = "data/prompts/filter-interpreter-system.md";

/// Placeholder in the template that gets replaced with the facet summary.
const FACETS_PLACEHOLDER: &str = "<<<facets>>>";

/// Converts free-text questions into assistant filter payloads via an LLM.
///
/// The interpreter owns the prompt; the merge into FilterState stays with
/// the caller so a failed interpretation leaves the session untouched.
pub struct FilterInterpreter {
    provider: Box<dyn LlmProvider>,
    temperature: f32,
    max_tokens: u32,
    /// The system prompt template loaded from disk at construction time.
    system_prompt_template: String,
}

impl FilterInterpreter {
    pub fn new(provider: Box<dyn LlmProvider>, temperature: f32, max_tokens: u32) -> Self {
        let system_prompt_template = load_template(INTERPRETER_TEMPLATE_PATH)
            .expect("interpreter system prompt template must exist at startup");
        Self {
            provider,
            temperature,
            max_tokens,
            system_prompt_template,
        }
    }

    /// Build from config, creating the appropriate provider.
    pub fn from_config(
        llm_config: &planscout_core::config::LlmConfig,
        ollama_config: &planscout_core::config::OllamaConfig,
    ) -> Result<Self, LlmError> {
        let provider = crate::providers::create_provider(llm_config, ollama_config)?;
        Ok(Self::new(provider, llm_config.temperature, llm_config.max_tokens))
    }

    /// Interpret a question against the current facet sets.
    ///
    /// The response must contain JSON; fields the model gets wrong are
    /// dropped by the payload's lenient parsing rather than failing the
    /// call.
    pub async fn interpret(
        &self,
        question: &str,
        facets: &Facets,
    ) -> Result<AssistantFilterPayload, InterpretError> {
        let system_prompt = self
            .system_prompt_template
            .replace(FACETS_PLACEHOLDER, &facets.to_system_prompt());
        let user_prompt = format!(
            "Translate this question into filter JSON:\n\n{}\n\nRespond ONLY with a single JSON object, no explanation.",
            question
        );

        info!("Interpreting question: {}", question);

        let messages = vec![Message::system(system_prompt), Message::user(user_prompt)];

        let response = self
            .provider
            .complete(messages, self.temperature, self.max_tokens)
            .await
            .map_err(InterpretError::Llm)?;

        debug!("LLM response: {}", response);

        // Extract JSON from the response (handles markdown code blocks)
        let json_str = extract_json(&response);

        let value: serde_json::Value =
            serde_json::from_str(json_str).map_err(|e| InterpretError::InvalidPayload {
                reason: e.to_string(),
                raw_response: response.clone(),
            })?;

        let payload = AssistantFilterPayload::from_value(value);
        if payload.is_empty() {
            info!("Assistant proposed no applicable filters");
        } else {
            info!("Assistant proposed filters: {:?}", payload);
        }
        Ok(payload)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InterpretError {
    #[error("LLM error: {0}")]
    Llm(LlmError),
    #[error("invalid filter payload: {reason}")]
    InvalidPayload {
        reason: String,
        raw_response: String,
    },
}

/// Load a prompt template from disk, failing eagerly with a clear message.
fn load_template(path: &str) -> Result<String, String> {
    let path = Path::new(path);
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read prompt template at {}: {e}", path.display()))?;

    let count = content.matches(FACETS_PLACEHOLDER).count();
    if count != 1 {
        return Err(format!(
            "prompt template at {} must contain exactly one '{FACETS_PLACEHOLDER}' placeholder, found {count}",
            path.display()
        ));
    }

    Ok(content)
}

/// Extract JSON from an LLM response, handling markdown code blocks.
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    // Handle ```json ... ``` blocks
    if let Some(start) = trimmed.find("```json") {
        let json_start = start + 7;
        if let Some(end) = trimmed[json_start..].find("```") {
            return trimmed[json_start..json_start + end].trim();
        }
    }

    // Handle ``` ... ``` blocks
    if let Some(start) = trimmed.find("```") {
        let json_start = start + 3;
        // Skip past any language identifier on the same line
        let after_tick = &trimmed[json_start..];
        let content_start = after_tick.find('\n').map_or(0, |n| n + 1);
        if let Some(end) = after_tick[content_start..].find("```") {
            return after_tick[content_start..content_start + end].trim();
        }
    }

    // Try raw JSON (starts with {)
    if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            return &trimmed[start..=end];
        }
    }

    trimmed
}
