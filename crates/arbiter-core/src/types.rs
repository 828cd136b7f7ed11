use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Context window assumed for catalog entries that do not report one.
pub const DEFAULT_CONTEXT_WINDOW: u32 = 128_000;
/// Output budget assumed for catalog entries that do not report one.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8_192;

/// Reference to a backend as a `(provider, id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackendRef {
    /// Provider that hosts the backend.
    pub provider: String,
    /// Backend identifier within the provider.
    pub id: String,
}

impl BackendRef {
    /// Creates a reference from its two parts.
    pub fn new<P: Into<String>, I: Into<String>>(provider: P, id: I) -> Self {
        Self {
            provider: provider.into(),
            id: id.into(),
        }
    }

    /// Parses a `provider/id` reference string.
    ///
    /// The first `/` separates provider from id; the id may itself contain
    /// slashes (OpenRouter-style identifiers). Returns `None` when either
    /// part is empty or the separator is missing.
    pub fn parse(reference: &str) -> Option<Self> {
        let (provider, id) = reference.trim().split_once('/')?;
        if provider.is_empty() || id.is_empty() {
            return None;
        }
        Some(Self::new(provider, id))
    }

    /// Lowercased `provider/id` form used by heuristic lookups.
    #[must_use]
    pub fn lookup_key(&self) -> String {
        format!("{}/{}", self.provider, self.id).to_lowercase()
    }
}

impl Display for BackendRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.provider, self.id)
    }
}

/// Input modality a backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// Plain text input.
    Text,
    /// Image input.
    Image,
    /// Audio input.
    Audio,
    /// Video input.
    Video,
    /// Any modality this crate does not model.
    Other,
}

/// Capability and cost metadata for one backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendDescriptor {
    /// Backend identifier within the provider.
    pub id: String,
    /// Provider that hosts the backend.
    pub provider: String,
    /// Context window in tokens.
    pub context_window: u32,
    /// Whether the backend supports extended reasoning.
    pub reasoning: bool,
    /// Input modalities the backend accepts.
    pub input_modalities: Vec<Modality>,
    /// Input cost in dollars per million tokens.
    pub cost_input: f64,
    /// Output cost in dollars per million tokens.
    pub cost_output: f64,
    /// Maximum output tokens per invocation.
    pub max_output_tokens: u32,
}

impl BackendDescriptor {
    /// Creates a descriptor with synthetic defaults for everything but
    /// its identity.
    pub fn new<P: Into<String>, I: Into<String>>(provider: P, id: I) -> Self {
        Self {
            id: id.into(),
            provider: provider.into(),
            context_window: DEFAULT_CONTEXT_WINDOW,
            reasoning: false,
            input_modalities: vec![Modality::Text],
            cost_input: 0.0,
            cost_output: 0.0,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    /// Sets the context window.
    #[must_use]
    pub fn with_context_window(mut self, tokens: u32) -> Self {
        self.context_window = tokens;
        self
    }

    /// Sets the reasoning capability flag.
    #[must_use]
    pub fn with_reasoning(mut self, reasoning: bool) -> Self {
        self.reasoning = reasoning;
        self
    }

    /// Sets the accepted input modalities.
    #[must_use]
    pub fn with_modalities(mut self, modalities: Vec<Modality>) -> Self {
        self.input_modalities = modalities;
        self
    }

    /// Sets input/output cost in dollars per million tokens.
    #[must_use]
    pub fn with_cost(mut self, input: f64, output: f64) -> Self {
        self.cost_input = input;
        self.cost_output = output;
        self
    }

    /// Reference to this backend.
    #[must_use]
    pub fn backend_ref(&self) -> BackendRef {
        BackendRef::new(self.provider.clone(), self.id.clone())
    }
}

/// Partial backend descriptor reported by an external discovery mechanism.
///
/// Catalog entries carry only what discovery could observe; promotion fills
/// the rest with synthetic defaults and zeroed costs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Backend identifier within the provider.
    pub id: String,
    /// Provider that hosts the backend.
    pub provider: String,
    /// Context window in tokens, if reported.
    #[serde(default)]
    pub context_window: Option<u32>,
    /// Reasoning capability, if reported.
    #[serde(default)]
    pub reasoning: Option<bool>,
    /// Input modalities, if reported.
    #[serde(default)]
    pub input_modalities: Option<Vec<Modality>>,
}

impl CatalogEntry {
    /// Creates an entry carrying only its identity.
    pub fn new<P: Into<String>, I: Into<String>>(provider: P, id: I) -> Self {
        Self {
            id: id.into(),
            provider: provider.into(),
            context_window: None,
            reasoning: None,
            input_modalities: None,
        }
    }

    /// Promotes this entry to a full descriptor with synthetic defaults.
    #[must_use]
    pub fn promote(&self) -> BackendDescriptor {
        BackendDescriptor {
            id: self.id.clone(),
            provider: self.provider.clone(),
            context_window: self.context_window.unwrap_or(DEFAULT_CONTEXT_WINDOW),
            reasoning: self.reasoning.unwrap_or(false),
            input_modalities: self
                .input_modalities
                .clone()
                .unwrap_or_else(|| vec![Modality::Text]),
            cost_input: 0.0,
            cost_output: 0.0,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// Generation request handed to a backend invoker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Prompt text.
    pub prompt: String,
    /// Maximum output tokens for this call.
    pub max_output_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl InvocationRequest {
    /// Creates a request with the given prompt and generation limits.
    pub fn new<T: Into<String>>(prompt: T, max_output_tokens: u32, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            max_output_tokens,
            temperature,
        }
    }
}

/// Generated text and accounting returned by a backend invoker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationReply {
    /// Generated text.
    pub text: String,
    /// Token accounting for the call.
    pub tokens_used: TokenUsage,
    /// Wall-clock latency of the call in milliseconds.
    pub latency_ms: u64,
}

/// Token accounting for one invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt.
    pub input: u64,
    /// Tokens generated.
    pub output: u64,
}

impl TokenUsage {
    /// Total tokens consumed by the call.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.input + self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_ref_parse() {
        let parsed = BackendRef::parse("anthropic/claude-sonnet-4-20250514");
        assert_eq!(
            parsed,
            Some(BackendRef::new("anthropic", "claude-sonnet-4-20250514"))
        );

        // OpenRouter-style ids keep their inner slashes
        let parsed = BackendRef::parse("openrouter/deepseek/deepseek-chat");
        assert_eq!(
            parsed,
            Some(BackendRef::new("openrouter", "deepseek/deepseek-chat"))
        );
    }

    #[test]
    fn test_backend_ref_parse_rejects_malformed() {
        assert_eq!(BackendRef::parse("no-separator"), None);
        assert_eq!(BackendRef::parse("/missing-provider"), None);
        assert_eq!(BackendRef::parse("missing-id/"), None);
        assert_eq!(BackendRef::parse(""), None);
    }

    #[test]
    fn test_backend_ref_display_round_trip() {
        let backend = BackendRef::new("openai", "gpt-4o");
        let parsed = BackendRef::parse(&backend.to_string());
        assert_eq!(parsed, Some(backend));
    }

    #[test]
    fn test_catalog_entry_promotion_defaults() {
        let entry = CatalogEntry::new("openai", "gpt-4o-mini");
        let descriptor = entry.promote();

        assert_eq!(descriptor.context_window, DEFAULT_CONTEXT_WINDOW);
        assert!(!descriptor.reasoning);
        assert_eq!(descriptor.input_modalities, vec![Modality::Text]);
        assert!(descriptor.cost_input.abs() < f64::EPSILON);
        assert!(descriptor.cost_output.abs() < f64::EPSILON);
    }

    #[test]
    fn test_catalog_entry_promotion_keeps_reported_fields() {
        let mut entry = CatalogEntry::new("google", "gemini-2.5-pro");
        entry.context_window = Some(1_000_000);
        entry.reasoning = Some(true);
        entry.input_modalities = Some(vec![Modality::Text, Modality::Image]);

        let descriptor = entry.promote();
        assert_eq!(descriptor.context_window, 1_000_000);
        assert!(descriptor.reasoning);
        assert!(descriptor.input_modalities.contains(&Modality::Image));
    }

    #[test]
    fn test_modality_serde_form() {
        let serialized = match serde_json::to_string(&Modality::Image) {
            Ok(json) => json,
            Err(error) => panic!("serialize failed: {error}"),
        };
        assert_eq!(serialized, "\"image\"");
    }

    #[test]
    fn test_token_usage_total() {
        let usage = TokenUsage {
            input: 120,
            output: 10,
        };
        assert_eq!(usage.total(), 130);
    }
}
