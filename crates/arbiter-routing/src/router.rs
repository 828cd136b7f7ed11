//! Decision orchestration: classify, then resolve through override,
//! scoring, and the hardcoded default.

use std::cmp::Ordering;
use std::sync::Arc;

use arbiter_core::{BackendInvoker, BackendRef, CatalogEntry, ClassifierMode, RouterConfig};

use crate::catalog::assemble_candidates;
use crate::classifier::{PatternClassifier, RemoteClassifier};
use crate::scorer::CapabilityScorer;
use crate::types::{ComplexityTier, DecisionSource, RouteDecision, ScoreResult, Task};

/// At most this many scores are reported on a decision.
const MAX_REPORTED_SCORES: usize = 5;

/// Per-tier default backend references, used when no candidate survives.
const DEFAULT_SIMPLE: &str = "anthropic/claude-3-5-haiku-latest";
const DEFAULT_MEDIUM: &str = "anthropic/claude-sonnet-4-20250514";
const DEFAULT_TOP: &str = "anthropic/claude-opus-4-20250514";

/// Routes tasks to backends through a layered resolution chain.
///
/// The chain is total: classification always yields a tier (the remote
/// classifier degrades to the pattern classifier), and selection always
/// yields a backend (override, then scoring, then a hardcoded default).
/// `resolve` therefore never returns an error.
pub struct RouterOrchestrator {
    pattern: PatternClassifier,
    remote: Option<RemoteClassifier>,
}

impl RouterOrchestrator {
    /// Creates an orchestrator with pattern-based classification only.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: PatternClassifier,
            remote: None,
        }
    }

    /// Creates an orchestrator that can also classify remotely through the
    /// given invoker, when the configuration asks for it.
    #[must_use]
    pub fn with_remote_classifier(invoker: Arc<dyn BackendInvoker>) -> Self {
        Self {
            pattern: PatternClassifier,
            remote: Some(RemoteClassifier::new(invoker)),
        }
    }

    /// Resolves a routing decision for the task.
    ///
    /// The configuration and catalog snapshots are treated as immutable
    /// for the duration of the call. Always returns a decision.
    pub async fn resolve(
        &self,
        task: &Task,
        config: &RouterConfig,
        catalog: &[CatalogEntry],
    ) -> RouteDecision {
        let tier = self.classify(task, config).await;

        if let Some(backend) = override_for(config, tier) {
            tracing::info!("🎯 Routing decision: {backend} | Tier: {tier} | Source: override");
            return RouteDecision {
                tier,
                backend,
                scores: Vec::new(),
                source: DecisionSource::Override,
            };
        }

        if config.auto_discover && !catalog.is_empty() {
            let candidates = assemble_candidates(config, catalog);
            let scorer = CapabilityScorer;
            let mut scored: Vec<ScoreResult> = candidates
                .iter()
                .filter_map(|candidate| scorer.score(candidate, tier, config.preference))
                .collect();
            // Stable sort: candidates with equal aggregates keep their
            // declared-then-catalog enumeration order.
            scored.sort_by(|left, right| {
                right
                    .aggregate
                    .partial_cmp(&left.aggregate)
                    .unwrap_or(Ordering::Equal)
            });

            if let Some(top) = scored.first().cloned() {
                scored.truncate(MAX_REPORTED_SCORES);
                tracing::info!(
                    "🎯 Routing decision: {} | Tier: {tier} | Source: scored | Score: {:.3} | Candidates: {}",
                    top.backend,
                    top.aggregate,
                    candidates.len()
                );
                return RouteDecision {
                    tier,
                    backend: top.backend,
                    scores: scored,
                    source: DecisionSource::Scored,
                };
            }
        }

        let backend = default_backend(tier);
        tracing::info!("🎯 Routing decision: {backend} | Tier: {tier} | Source: fallback");
        RouteDecision {
            tier,
            backend,
            scores: Vec::new(),
            source: DecisionSource::Fallback,
        }
    }

    /// Classifies the task, remotely when configured, locally otherwise.
    async fn classify(&self, task: &Task, config: &RouterConfig) -> ComplexityTier {
        if config.classifier_mode == ClassifierMode::Remote {
            if let Some(tier) = self.classify_remote(task, config).await {
                return tier;
            }
        }
        let tier = self
            .pattern
            .classify(&task.text, task.conversation_depth, task.tool_mentions);
        tracing::debug!("classified task as {tier} ({} chars)", task.text.len());
        tier
    }

    async fn classify_remote(&self, task: &Task, config: &RouterConfig) -> Option<ComplexityTier> {
        let remote = self.remote.as_ref()?;
        let configured = config.classifier_backend.as_deref()?;
        let backend = config.resolve_backend(configured)?;
        remote
            .classify(&task.text, &backend, config.classifier_timeout_ms)
            .await
    }
}

impl Default for RouterOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

/// Override reference for the tier, if one is configured and parseable.
///
/// An override that fails to parse is a configuration defect; it is
/// skipped so the chain falls through to scoring.
fn override_for(config: &RouterConfig, tier: ComplexityTier) -> Option<BackendRef> {
    let raw = match tier {
        ComplexityTier::Simple => config.overrides.simple.as_deref(),
        ComplexityTier::Medium => config.overrides.medium.as_deref(),
        ComplexityTier::Complex => config.overrides.complex.as_deref(),
        ComplexityTier::Reasoning => config.overrides.reasoning.as_deref(),
    }?;
    let parsed = BackendRef::parse(raw);
    if parsed.is_none() {
        tracing::debug!("skipping unparseable override for tier {tier}: {raw:?}");
    }
    parsed
}

/// Hardcoded per-tier default backend.
///
/// The default references are constants that parse by construction; the
/// final substitution exists so this stage cannot fail even if one is
/// ever edited into an unparseable form.
fn default_backend(tier: ComplexityTier) -> BackendRef {
    let reference = match tier {
        ComplexityTier::Simple => DEFAULT_SIMPLE,
        ComplexityTier::Medium => DEFAULT_MEDIUM,
        ComplexityTier::Complex | ComplexityTier::Reasoning => DEFAULT_TOP,
    };
    BackendRef::parse(reference)
        .unwrap_or_else(|| BackendRef::new("anthropic", "claude-sonnet-4-20250514"))
}
