//! Routing configuration snapshot and its TOML file lifecycle.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{
    BackendDescriptor, BackendRef, DEFAULT_CONTEXT_WINDOW, DEFAULT_MAX_OUTPUT_TOKENS, Modality,
};

/// How task complexity is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierMode {
    /// Pure pattern-based classification, no network.
    #[default]
    Rules,
    /// Ask a configured backend to classify, falling back to rules.
    Remote,
}

/// Optimization objective used to weight backend scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutePreference {
    /// Prefer cheaper backends.
    Cost,
    /// Balance capability, cost, quality, and latency.
    #[default]
    Balanced,
    /// Prefer higher-quality backends.
    Quality,
}

/// Explicit per-tier backend assignments, each a `provider/id` reference.
///
/// A set override bypasses scoring for that tier; an unparseable value is
/// skipped, not reported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TierOverrides {
    /// Override for the simple tier.
    #[serde(default)]
    pub simple: Option<String>,
    /// Override for the medium tier.
    #[serde(default)]
    pub medium: Option<String>,
    /// Override for the complex tier.
    #[serde(default)]
    pub complex: Option<String>,
    /// Override for the reasoning tier.
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// One backend declared under a provider in the configuration.
///
/// Declared entries are authoritative: when discovery reports the same
/// `(provider, id)`, the declared fields win.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclaredBackend {
    /// Backend identifier within the provider.
    pub id: String,
    /// Context window in tokens.
    #[serde(default = "default_context_window")]
    pub context_window: u32,
    /// Whether the backend supports extended reasoning.
    #[serde(default)]
    pub reasoning: bool,
    /// Input modalities the backend accepts.
    #[serde(default = "default_modalities")]
    pub input_modalities: Vec<Modality>,
    /// Input cost in dollars per million tokens.
    #[serde(default)]
    pub cost_input: f64,
    /// Output cost in dollars per million tokens.
    #[serde(default)]
    pub cost_output: f64,
    /// Maximum output tokens per invocation.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl DeclaredBackend {
    /// Full descriptor for this entry under the given provider.
    #[must_use]
    pub fn to_descriptor(&self, provider: &str) -> BackendDescriptor {
        BackendDescriptor {
            id: self.id.clone(),
            provider: provider.to_owned(),
            context_window: self.context_window,
            reasoning: self.reasoning,
            input_modalities: self.input_modalities.clone(),
            cost_input: self.cost_input,
            cost_output: self.cost_output,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

/// Backends declared for one provider.
///
/// Providers are a list rather than a map so the declared order is
/// preserved end to end; that order is the tie-break for equal scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderBackends {
    /// Provider name.
    pub name: String,
    /// Backends declared for this provider, in declared order.
    #[serde(default)]
    pub backends: Vec<DeclaredBackend>,
}

/// Complete routing configuration snapshot.
///
/// Treated as immutable for the duration of each routing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// How task complexity is classified.
    #[serde(default)]
    pub classifier_mode: ClassifierMode,
    /// Backend used by the remote classifier, as a `provider/id`
    /// reference or the bare id of a declared backend.
    #[serde(default)]
    pub classifier_backend: Option<String>,
    /// Optimization objective for scoring.
    #[serde(default)]
    pub preference: RoutePreference,
    /// Explicit per-tier backend assignments.
    #[serde(default)]
    pub overrides: TierOverrides,
    /// Deadline for the remote classification call in milliseconds.
    #[serde(default = "default_classifier_timeout_ms")]
    pub classifier_timeout_ms: u64,
    /// Whether discovered catalog entries participate in scoring.
    #[serde(default = "default_true")]
    pub auto_discover: bool,
    /// Provider-declared backends, in declared order.
    #[serde(default)]
    pub providers: Vec<ProviderBackends>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            classifier_mode: ClassifierMode::default(),
            classifier_backend: None,
            preference: RoutePreference::default(),
            overrides: TierOverrides::default(),
            classifier_timeout_ms: default_classifier_timeout_ms(),
            auto_discover: true,
            providers: Vec::new(),
        }
    }
}

fn default_classifier_timeout_ms() -> u64 {
    3000
}

fn default_true() -> bool {
    true
}

fn default_context_window() -> u32 {
    DEFAULT_CONTEXT_WINDOW
}

fn default_max_output_tokens() -> u32 {
    DEFAULT_MAX_OUTPUT_TOKENS
}

fn default_modalities() -> Vec<Modality> {
    vec![Modality::Text]
}

impl RouterConfig {
    /// Descriptors for every declared backend, in declared order.
    #[must_use]
    pub fn declared_backends(&self) -> Vec<BackendDescriptor> {
        self.providers
            .iter()
            .flat_map(|provider| {
                provider
                    .backends
                    .iter()
                    .map(|backend| backend.to_descriptor(&provider.name))
            })
            .collect()
    }

    /// Resolves a backend id to a full reference.
    ///
    /// Accepts a `provider/id` reference directly, or a bare id that is
    /// looked up among the declared backends. Returns `None` when neither
    /// form resolves.
    #[must_use]
    pub fn resolve_backend(&self, id: &str) -> Option<BackendRef> {
        if let Some(reference) = BackendRef::parse(id) {
            return Some(reference);
        }
        self.providers.iter().find_map(|provider| {
            provider
                .backends
                .iter()
                .find(|backend| backend.id == id)
                .map(|backend| BackendRef::new(provider.name.clone(), backend.id.clone()))
        })
    }

    /// Get the default config directory path (`~/.arbiter`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_owned()))?;
        Ok(home.join(".arbiter"))
    }

    /// Get the default config file path (`~/.arbiter/config.toml`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from the default location (`~/.arbiter/config.toml`)
    /// If the config doesn't exist, creates it with default values
    ///
    /// # Errors
    /// Returns an error if the config cannot be read or created
    pub fn load_or_create() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            let config = Self::default();
            config.save_to_file(&config_path)?;
            Ok(config)
        }
    }

    /// Load config from a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|error| Error::Config(format!("Failed to read config: {error}")))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|error| Error::Config(format!("Failed to parse config: {error}")))?;

        tracing::debug!(
            "Loaded config from {:?}: mode={:?}, preference={:?}, {} declared providers",
            path,
            config.classifier_mode,
            config.preference,
            config.providers.len()
        );

        Ok(config)
    }

    /// Save config to a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|error| {
                Error::Config(format!("Failed to create config directory: {error}"))
            })?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|error| Error::Config(format!("Failed to serialize config: {error}")))?;

        let header = "# Arbiter Configuration File\n\
                      # This file is automatically generated on first run\n\
                      # Edit this file to customize your settings\n\n";

        fs::write(path, format!("{header}{contents}"))
            .map_err(|error| Error::Config(format!("Failed to write config: {error}")))?;

        Ok(())
    }
}
