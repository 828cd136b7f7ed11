//! Capability scoring of backend descriptors against a tier and preference.

use arbiter_core::{BackendDescriptor, Modality, RoutePreference};

use crate::types::{ComplexityTier, ScoreResult};

/// Hard capability requirement for one tier.
#[derive(Debug, Clone, Copy)]
pub struct TierRequirement {
    /// Minimum context window in tokens.
    pub min_context_window: u32,
    /// Whether the tier requires a reasoning-capable backend.
    pub needs_reasoning: bool,
}

/// Static per-tier requirement table.
#[must_use]
pub const fn requirement_for(tier: ComplexityTier) -> TierRequirement {
    match tier {
        ComplexityTier::Simple => TierRequirement {
            min_context_window: 8_000,
            needs_reasoning: false,
        },
        ComplexityTier::Medium => TierRequirement {
            min_context_window: 16_000,
            needs_reasoning: false,
        },
        ComplexityTier::Complex => TierRequirement {
            min_context_window: 64_000,
            needs_reasoning: false,
        },
        ComplexityTier::Reasoning => TierRequirement {
            min_context_window: 32_000,
            needs_reasoning: true,
        },
    }
}

/// Component weights selected by the routing preference.
#[derive(Debug, Clone, Copy)]
struct ScoreWeights {
    capability: f64,
    cost: f64,
    quality: f64,
    latency: f64,
}

const fn weights_for(preference: RoutePreference) -> ScoreWeights {
    match preference {
        RoutePreference::Balanced => ScoreWeights {
            capability: 0.4,
            cost: 0.3,
            quality: 0.2,
            latency: 0.1,
        },
        RoutePreference::Cost => ScoreWeights {
            capability: 0.2,
            cost: 0.5,
            quality: 0.15,
            latency: 0.15,
        },
        RoutePreference::Quality => ScoreWeights {
            capability: 0.3,
            cost: 0.1,
            quality: 0.5,
            latency: 0.1,
        },
    }
}

/// Quality and latency profile for a known backend family.
///
/// Matched by substring against the lowercased `provider/id` key, first
/// entry wins. This is a curated approximation: identifiers are free-form,
/// so family names are the most stable signal available without an
/// authoritative capability feed.
struct BackendProfile {
    /// Substring that identifies the family.
    needle: &'static str,
    /// Substrings that disqualify the match (e.g. the mini variant of a
    /// flagship family).
    exclude: &'static [&'static str],
    /// Quality rating in `[0, 1]`.
    quality: f64,
    /// Latency estimate in `[0, 1]`; higher is faster.
    latency: f64,
}

const PROFILES: &[BackendProfile] = &[
    BackendProfile {
        needle: "opus",
        exclude: &[],
        quality: 1.0,
        latency: 0.3,
    },
    BackendProfile {
        needle: "sonnet",
        exclude: &[],
        quality: 0.8,
        latency: 0.7,
    },
    BackendProfile {
        needle: "gpt-4o",
        exclude: &["mini"],
        quality: 0.85,
        latency: 0.7,
    },
    BackendProfile {
        needle: "gpt-4.1",
        exclude: &["mini", "nano"],
        quality: 0.85,
        latency: 0.5,
    },
    BackendProfile {
        needle: "gemini-2.5-pro",
        exclude: &[],
        quality: 0.85,
        latency: 0.5,
    },
    BackendProfile {
        needle: "haiku",
        exclude: &[],
        quality: 0.5,
        latency: 1.0,
    },
    BackendProfile {
        needle: "mini",
        exclude: &[],
        quality: 0.5,
        latency: 1.0,
    },
    BackendProfile {
        needle: "nano",
        exclude: &[],
        quality: 0.5,
        latency: 1.0,
    },
    BackendProfile {
        needle: "flash",
        exclude: &[],
        quality: 0.55,
        latency: 1.0,
    },
];

/// Profile for backends no entry recognizes.
const UNKNOWN_PROFILE: (f64, f64) = (0.6, 0.5);

fn profile_for(key: &str) -> (f64, f64) {
    PROFILES
        .iter()
        .find(|profile| {
            key.contains(profile.needle)
                && !profile.exclude.iter().any(|excluded| key.contains(excluded))
        })
        .map_or(UNKNOWN_PROFILE, |profile| (profile.quality, profile.latency))
}

/// Scores one backend descriptor against one tier and preference.
#[derive(Debug, Default, Clone, Copy)]
pub struct CapabilityScorer;

impl CapabilityScorer {
    /// Scores the descriptor, or excludes it.
    ///
    /// Returns `None` when the descriptor fails a hard capability filter:
    /// a context window below the tier minimum, or a reasoning tier with a
    /// backend that cannot reason. Exclusion is not an error.
    #[must_use]
    pub fn score(
        &self,
        descriptor: &BackendDescriptor,
        tier: ComplexityTier,
        preference: RoutePreference,
    ) -> Option<ScoreResult> {
        let requirement = requirement_for(tier);
        if descriptor.context_window < requirement.min_context_window {
            return None;
        }
        if requirement.needs_reasoning && !descriptor.reasoning {
            return None;
        }

        let mut capability: f64 = 0.5;
        if descriptor.context_window >= 100_000 {
            capability += 0.2;
        }
        if descriptor.reasoning && tier == ComplexityTier::Reasoning {
            capability += 0.3;
        }
        if descriptor.input_modalities.contains(&Modality::Image) {
            capability += 0.1;
        }
        let capability = capability.clamp(0.0, 1.0);

        let total_cost = descriptor.cost_input + descriptor.cost_output;
        let cost_efficiency = if total_cost > 0.0 {
            1.0 / (1.0 + 0.1 * total_cost)
        } else {
            // Free or unknown-cost backends score maximally efficient
            1.0
        };

        let (quality, latency) = profile_for(&descriptor.backend_ref().lookup_key());

        let weights = weights_for(preference);
        let aggregate = weights.capability * capability
            + weights.cost * cost_efficiency
            + weights.quality * quality
            + weights.latency * latency;

        Some(ScoreResult {
            backend: descriptor.backend_ref(),
            aggregate,
            capability,
            cost_efficiency,
            quality,
            latency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(
        descriptor: &BackendDescriptor,
        tier: ComplexityTier,
        preference: RoutePreference,
    ) -> Option<ScoreResult> {
        CapabilityScorer.score(descriptor, tier, preference)
    }

    #[test]
    fn test_small_context_window_is_excluded_everywhere() {
        let descriptor = BackendDescriptor::new("local", "tiny-llm").with_context_window(4_000);
        for tier in ComplexityTier::all() {
            assert!(
                score(&descriptor, tier, RoutePreference::Balanced).is_none(),
                "tier {tier} accepted a 4k context window"
            );
        }
    }

    #[test]
    fn test_reasoning_tier_requires_reasoning_backend() {
        let descriptor = BackendDescriptor::new("openai", "gpt-4o");
        assert!(score(&descriptor, ComplexityTier::Reasoning, RoutePreference::Balanced).is_none());

        let capable = descriptor.with_reasoning(true);
        assert!(score(&capable, ComplexityTier::Reasoning, RoutePreference::Balanced).is_some());
    }

    #[test]
    fn test_cost_efficiency_is_monotone_in_price() {
        let mut previous = 0.0;
        for total in [40.0, 20.0, 8.0, 1.0, 0.1] {
            let descriptor =
                BackendDescriptor::new("x", "generic").with_cost(total / 2.0, total / 2.0);
            let result = match score(&descriptor, ComplexityTier::Medium, RoutePreference::Cost) {
                Some(result) => result,
                None => panic!("descriptor unexpectedly excluded"),
            };
            assert!(
                result.cost_efficiency >= previous,
                "cheaper backend scored less efficient"
            );
            previous = result.cost_efficiency;
        }
    }

    #[test]
    fn test_free_backend_is_maximally_efficient() {
        let descriptor = BackendDescriptor::new("local", "qwen2.5-coder");
        let result = match score(&descriptor, ComplexityTier::Simple, RoutePreference::Balanced) {
            Some(result) => result,
            None => panic!("descriptor unexpectedly excluded"),
        };
        assert!((result.cost_efficiency - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_profile_lookup_families() {
        assert_eq!(profile_for("anthropic/claude-opus-4-20250514"), (1.0, 0.3));
        assert_eq!(profile_for("anthropic/claude-sonnet-4-20250514"), (0.8, 0.7));
        assert_eq!(profile_for("openai/gpt-4o"), (0.85, 0.7));
        // The mini variant must not inherit the flagship profile
        assert_eq!(profile_for("openai/gpt-4o-mini"), (0.5, 1.0));
        assert_eq!(profile_for("openai/gpt-4.1-nano"), (0.5, 1.0));
        assert_eq!(profile_for("google/gemini-2.5-pro"), (0.85, 0.5));
        assert_eq!(profile_for("google/gemini-2.5-flash"), (0.55, 1.0));
        assert_eq!(profile_for("mystery/unknown-model"), UNKNOWN_PROFILE);
    }

    #[test]
    fn test_capability_is_clamped() {
        let descriptor = BackendDescriptor::new("anthropic", "claude-opus-4-20250514")
            .with_context_window(200_000)
            .with_reasoning(true)
            .with_modalities(vec![Modality::Text, Modality::Image]);
        let result = match score(&descriptor, ComplexityTier::Reasoning, RoutePreference::Quality) {
            Some(result) => result,
            None => panic!("descriptor unexpectedly excluded"),
        };
        // 0.5 + 0.2 + 0.3 + 0.1 exceeds one before clamping
        assert!((result.capability - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_preference_reorders_cheap_and_premium() {
        let cheap = BackendDescriptor::new("openai", "gpt-4o-mini").with_cost(0.15, 0.6);
        let premium =
            BackendDescriptor::new("anthropic", "claude-opus-4-20250514").with_cost(15.0, 75.0);

        let rank = |preference: RoutePreference| {
            let cheap_score = match score(&cheap, ComplexityTier::Medium, preference) {
                Some(result) => result.aggregate,
                None => panic!("cheap descriptor excluded"),
            };
            let premium_score = match score(&premium, ComplexityTier::Medium, preference) {
                Some(result) => result.aggregate,
                None => panic!("premium descriptor excluded"),
            };
            (cheap_score, premium_score)
        };

        let (cheap_cost, premium_cost) = rank(RoutePreference::Cost);
        assert!(cheap_cost > premium_cost);

        let (cheap_quality, premium_quality) = rank(RoutePreference::Quality);
        assert!(premium_quality > cheap_quality);
    }

    #[test]
    fn test_aggregate_uses_balanced_weights() {
        let descriptor = BackendDescriptor::new("anthropic", "claude-sonnet-4-20250514")
            .with_context_window(200_000)
            .with_cost(3.0, 15.0);
        let result = match score(&descriptor, ComplexityTier::Medium, RoutePreference::Balanced) {
            Some(result) => result,
            None => panic!("descriptor unexpectedly excluded"),
        };

        let expected = 0.4 * result.capability
            + 0.3 * result.cost_efficiency
            + 0.2 * result.quality
            + 0.1 * result.latency;
        assert!((result.aggregate - expected).abs() < 1e-12);
    }
}
