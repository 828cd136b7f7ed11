use std::sync::Arc;
use std::time::Duration;

use arbiter_core::{BackendInvoker, BackendRef, InvocationRequest};
use tokio::time::timeout;

use crate::ComplexityTier;

/// Output budget for the classification call.
const CLASSIFY_MAX_OUTPUT_TOKENS: u32 = 10;
/// Task text beyond this many characters is not embedded in the prompt.
const PROMPT_TEXT_LIMIT: usize = 500;

/// Labels searched for in the response, in declared order.
const LABELS: [(&str, ComplexityTier); 4] = [
    ("SIMPLE", ComplexityTier::Simple),
    ("MEDIUM", ComplexityTier::Medium),
    ("COMPLEX", ComplexityTier::Complex),
    ("REASONING", ComplexityTier::Reasoning),
];

/// Classifier that asks a configured backend for the complexity tier.
///
/// A single timed attempt with a tiny output budget. Every failure mode
/// (invocation error, elapsed deadline, unrecognizable response) yields
/// `None` so the caller can fall back to the pattern classifier; the
/// remote path never surfaces an error.
pub struct RemoteClassifier {
    invoker: Arc<dyn BackendInvoker>,
}

impl RemoteClassifier {
    /// Creates a classifier over the given invoker.
    pub fn new(invoker: Arc<dyn BackendInvoker>) -> Self {
        Self { invoker }
    }

    /// Asks the backend to classify the task text, under a deadline.
    ///
    /// The deadline cancels the in-flight call: once `timeout_ms` elapses
    /// the invocation future is dropped and `None` is returned
    /// immediately, so a late response is discarded, not awaited.
    pub async fn classify(
        &self,
        text: &str,
        backend: &BackendRef,
        timeout_ms: u64,
    ) -> Option<ComplexityTier> {
        let request = InvocationRequest::new(
            build_prompt(text),
            CLASSIFY_MAX_OUTPUT_TOKENS,
            0.0,
        );

        match timeout(
            Duration::from_millis(timeout_ms),
            self.invoker.invoke(backend, &request),
        )
        .await
        {
            Ok(Ok(reply)) => {
                let tier = parse_label(&reply.text);
                if tier.is_none() {
                    tracing::debug!(
                        "remote classifier returned no recognizable label: {:?}",
                        reply.text
                    );
                }
                tier
            }
            Ok(Err(error)) => {
                tracing::debug!("remote classification via {backend} failed: {error}");
                None
            }
            Err(_) => {
                tracing::debug!("remote classification via {backend} timed out after {timeout_ms}ms");
                None
            }
        }
    }
}

/// Fixed classification prompt with the task text embedded.
fn build_prompt(text: &str) -> String {
    format!(
        "Classify the complexity of the following task. Respond with \
         exactly one word: SIMPLE, MEDIUM, COMPLEX, or REASONING.\n\n\
         Task: {}",
        truncate_chars(text, PROMPT_TEXT_LIMIT)
    )
}

/// Char-boundary-safe prefix of at most `limit` characters.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// First label substring found in the uppercased response.
fn parse_label(response: &str) -> Option<ComplexityTier> {
    let upper = response.to_uppercase();
    LABELS
        .iter()
        .find(|(label, _)| upper.contains(label))
        .map(|(_, tier)| *tier)
}
