//! Task complexity classification.
//!
//! Two classifiers share one output type: the pattern classifier is pure
//! and total, the remote classifier asks a configured backend and degrades
//! to `None` on any failure so the caller can fall back.

/// Pattern-based classifier over the ordered rule banks.
pub mod heuristic;
/// Backend-prompted classifier with deadline and graceful degradation.
pub mod remote;
/// Ordered regex rule banks, one per tier signal.
pub mod rules;

pub use heuristic::PatternClassifier;
pub use remote::RemoteClassifier;
pub use rules::ClassifierRules;
