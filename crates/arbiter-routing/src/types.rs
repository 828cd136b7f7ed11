use arbiter_core::BackendRef;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Complexity bucket a task is classified into.
///
/// The four tiers are independent buckets, each with its own capability
/// requirement and default backend; there is no intrinsic ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityTier {
    /// Greetings, acknowledgements, trivial lookups.
    Simple,
    /// Everyday requests: explanations, small edits, questions.
    Medium,
    /// Multi-part engineering work: architecture, refactors, deployments.
    Complex,
    /// Mathematically or logically dense work needing deliberate reasoning.
    Reasoning,
}

impl ComplexityTier {
    /// All tiers, in declared order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Simple, Self::Medium, Self::Complex, Self::Reasoning]
    }
}

impl Display for ComplexityTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Medium => write!(f, "medium"),
            Self::Complex => write!(f, "complex"),
            Self::Reasoning => write!(f, "reasoning"),
        }
    }
}

/// One routing request: the task text plus the conversation signals the
/// channel layer extracted for it. Owned by the call in progress, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Natural-language task text.
    pub text: String,
    /// Depth of the conversation this task arrived in.
    pub conversation_depth: u32,
    /// Number of tool mentions detected in the task.
    pub tool_mentions: u32,
}

impl Task {
    /// Creates a task with zeroed conversation signals.
    pub fn new<T: Into<String>>(text: T) -> Self {
        Self {
            text: text.into(),
            conversation_depth: 0,
            tool_mentions: 0,
        }
    }

    /// Sets the conversation depth signal.
    #[must_use]
    pub fn with_conversation_depth(mut self, depth: u32) -> Self {
        self.conversation_depth = depth;
        self
    }

    /// Sets the tool-mention signal.
    #[must_use]
    pub fn with_tool_mentions(mut self, mentions: u32) -> Self {
        self.tool_mentions = mentions;
        self
    }
}

/// Component and aggregate scores for one backend against one tier.
///
/// Ephemeral: recomputed per request, since scoring depends on the tier
/// and preference of the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Backend the scores apply to.
    pub backend: BackendRef,
    /// Preference-weighted sum of the component scores.
    pub aggregate: f64,
    /// Capability fit in `[0, 1]`.
    pub capability: f64,
    /// Cost efficiency in `[0, 1]`; higher means cheaper.
    pub cost_efficiency: f64,
    /// Quality rating in `[0, 1]`.
    pub quality: f64,
    /// Latency estimate in `[0, 1]`; higher means faster.
    pub latency: f64,
}

/// Which stage of the resolution chain produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionSource {
    /// An explicit per-tier override from configuration.
    Override,
    /// The scored candidate ranking.
    Scored,
    /// The hardcoded per-tier default.
    Fallback,
}

/// The routing decision returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDecision {
    /// Tier the task was classified into.
    pub tier: ComplexityTier,
    /// Backend selected to execute the task. Always populated.
    pub backend: BackendRef,
    /// Up to five top-ranked scores, present only on the scored path.
    pub scores: Vec<ScoreResult>,
    /// Stage of the resolution chain that produced the decision.
    pub source: DecisionSource,
}
