//! Candidate assembly from configuration-declared backends and the
//! discovered catalog.

use std::collections::HashSet;

use arbiter_core::{BackendDescriptor, CatalogEntry, RouterConfig};

/// Builds the candidate set for scoring.
///
/// Configuration-declared backends come first, in declared order, followed
/// by catalog entries whose `(provider, id)` is not already declared.
/// Configuration is authoritative: on a duplicate the declared descriptor's
/// fields win and the catalog entry is dropped. The returned order is the
/// tie-break for equal aggregate scores.
#[must_use]
pub fn assemble_candidates(
    config: &RouterConfig,
    catalog: &[CatalogEntry],
) -> Vec<BackendDescriptor> {
    let mut candidates = config.declared_backends();
    let mut seen: HashSet<(String, String)> = candidates
        .iter()
        .map(|descriptor| (descriptor.provider.clone(), descriptor.id.clone()))
        .collect();

    for entry in catalog {
        let key = (entry.provider.clone(), entry.id.clone());
        if seen.contains(&key) {
            continue;
        }
        seen.insert(key);
        candidates.push(entry.promote());
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbiter_core::{DeclaredBackend, Modality, ProviderBackends};

    fn declared(id: &str, cost_input: f64, cost_output: f64) -> DeclaredBackend {
        DeclaredBackend {
            id: id.to_owned(),
            context_window: 200_000,
            reasoning: false,
            input_modalities: vec![Modality::Text],
            cost_input,
            cost_output,
            max_output_tokens: 8_192,
        }
    }

    fn config_with(providers: Vec<ProviderBackends>) -> RouterConfig {
        RouterConfig {
            providers,
            ..RouterConfig::default()
        }
    }

    #[test]
    fn test_declared_backends_come_first() {
        let config = config_with(vec![ProviderBackends {
            name: "anthropic".to_owned(),
            backends: vec![declared("claude-sonnet-4-20250514", 3.0, 15.0)],
        }]);
        let catalog = vec![
            CatalogEntry::new("openai", "gpt-4o"),
            CatalogEntry::new("google", "gemini-2.5-flash"),
        ];

        let candidates = assemble_candidates(&config, &catalog);
        let keys: Vec<String> = candidates
            .iter()
            .map(|descriptor| descriptor.backend_ref().to_string())
            .collect();
        assert_eq!(
            keys,
            vec![
                "anthropic/claude-sonnet-4-20250514",
                "openai/gpt-4o",
                "google/gemini-2.5-flash",
            ]
        );
    }

    #[test]
    fn test_declared_entry_wins_over_catalog_duplicate() {
        let config = config_with(vec![ProviderBackends {
            name: "anthropic".to_owned(),
            backends: vec![declared("claude-sonnet-4-20250514", 3.0, 15.0)],
        }]);
        // Discovery reports the same backend with no cost data
        let catalog = vec![CatalogEntry::new("anthropic", "claude-sonnet-4-20250514")];

        let candidates = assemble_candidates(&config, &catalog);
        assert_eq!(candidates.len(), 1);
        // The declared descriptor's cost fields survive
        assert!((candidates[0].cost_input - 3.0).abs() < f64::EPSILON);
        assert!((candidates[0].cost_output - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_same_id_under_different_provider_is_kept() {
        let config = config_with(vec![ProviderBackends {
            name: "openai".to_owned(),
            backends: vec![declared("gpt-4o", 2.5, 10.0)],
        }]);
        let catalog = vec![CatalogEntry::new("azure", "gpt-4o")];

        let candidates = assemble_candidates(&config, &catalog);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_duplicate_catalog_entries_collapse() {
        let config = config_with(Vec::new());
        let catalog = vec![
            CatalogEntry::new("openai", "gpt-4o"),
            CatalogEntry::new("openai", "gpt-4o"),
        ];

        let candidates = assemble_candidates(&config, &catalog);
        assert_eq!(candidates.len(), 1);
    }
}
