//! Task-routing engine: classifies a natural-language task into a
//! complexity tier and selects the backend that should execute it.
//!
//! The pipeline is classify → override → score → default. Every stage
//! degrades into the next, so [`RouterOrchestrator::resolve`] always
//! returns a decision and never an error.

/// Candidate assembly from declared backends and the discovered catalog.
pub mod catalog;
/// Complexity classification, pattern-based and remote.
pub mod classifier;
/// Decision orchestration across the resolution chain.
pub mod router;
/// Capability scoring of backend descriptors.
pub mod scorer;
/// Routing data types.
pub mod types;

pub use catalog::assemble_candidates;
pub use classifier::{PatternClassifier, RemoteClassifier};
pub use router::RouterOrchestrator;
pub use scorer::{CapabilityScorer, TierRequirement, requirement_for};
pub use types::{ComplexityTier, DecisionSource, RouteDecision, ScoreResult, Task};
