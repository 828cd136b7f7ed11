//! Mock invoker for testing routing behavior.
//!
//! Allows defining canned responses for specific prompts, enabling
//! end-to-end testing of classification and routing without real API calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use arbiter_core::{
    BackendInvoker, BackendRef, Error, IgnoreLock as _, InvocationReply, InvocationRequest, Result,
    TokenUsage,
};

/// Response storage type
type ResponseMap = Arc<Mutex<HashMap<String, String>>>;

/// Mock invoker that returns pre-defined responses based on prompt patterns.
///
/// Useful for testing classification and routing end-to-end without making
/// real API calls. Can also simulate failures and slow backends.
#[derive(Clone, Default)]
pub struct MockInvoker {
    /// Predefined responses keyed by prompt substring
    responses: ResponseMap,
    /// Default response if no pattern matches
    default_response: Arc<Mutex<Option<String>>>,
    /// Error message returned instead of a reply, when set
    failure: Arc<Mutex<Option<String>>>,
    /// Artificial delay applied before responding
    delay: Arc<Mutex<Option<Duration>>>,
    /// Call history for verification
    call_history: Arc<Mutex<Vec<String>>>,
}

impl MockInvoker {
    /// Create a new mock invoker with no canned responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pattern-based response.
    #[must_use]
    pub fn with_response(self, pattern: impl Into<String>, response: impl Into<String>) -> Self {
        {
            let mut responses = self.responses.lock_ignore_poison();
            responses.insert(pattern.into(), response.into());
        }
        self
    }

    /// Set a default response for prompts that don't match any pattern.
    #[must_use]
    pub fn with_default_response(self, response: impl Into<String>) -> Self {
        {
            let mut default = self.default_response.lock_ignore_poison();
            *default = Some(response.into());
        }
        self
    }

    /// Make every invocation fail with the given message.
    #[must_use]
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        {
            let mut failure = self.failure.lock_ignore_poison();
            *failure = Some(message.into());
        }
        self
    }

    /// Delay every invocation by the given duration before responding.
    #[must_use]
    pub fn with_delay(self, delay: Duration) -> Self {
        {
            let mut slot = self.delay.lock_ignore_poison();
            *slot = Some(delay);
        }
        self
    }

    /// Clear the call history.
    pub fn clear_history(&self) {
        let mut history = self.call_history.lock_ignore_poison();
        history.clear();
    }

    /// Get the call history (list of all prompts invoked).
    #[must_use]
    pub fn call_history(&self) -> Vec<String> {
        let history = self.call_history.lock_ignore_poison();
        history.clone()
    }

    /// Get the number of calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        let history = self.call_history.lock_ignore_poison();
        history.len()
    }

    /// Find a matching response for the given prompt.
    fn find_response(&self, prompt: &str) -> Option<String> {
        let responses = self.responses.lock_ignore_poison();

        // Try exact match first
        if let Some(response) = responses.get(prompt) {
            return Some(response.clone());
        }

        // Then substring match
        responses
            .iter()
            .find(|(pattern, _)| prompt.contains(pattern.as_str()))
            .map(|(_, response)| response.clone())
    }
}

#[async_trait]
impl BackendInvoker for MockInvoker {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn invoke(
        &self,
        _backend: &BackendRef,
        request: &InvocationRequest,
    ) -> Result<InvocationReply> {
        {
            let mut history = self.call_history.lock_ignore_poison();
            history.push(request.prompt.clone());
        }

        let delay = { *self.delay.lock_ignore_poison() };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failure = { self.failure.lock_ignore_poison().clone() };
        if let Some(message) = failure {
            return Err(Error::Invoker(message));
        }

        let text = self.find_response(&request.prompt).unwrap_or_else(|| {
            let default = self.default_response.lock_ignore_poison();
            default
                .clone()
                .unwrap_or_else(|| format!("Mock response for prompt: {}", request.prompt))
        });

        Ok(InvocationReply {
            text,
            tokens_used: TokenUsage {
                input: request.prompt.len() as u64 / 4,
                output: 0,
            },
            latency_ms: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn any_backend() -> BackendRef {
        BackendRef::new("mock", "mock-model")
    }

    #[tokio::test]
    async fn test_mock_invoker_substring_match() {
        let invoker = MockInvoker::new().with_response("classify", "MEDIUM");

        let request = InvocationRequest::new("Please classify the following task", 10, 0.0);
        let reply = match invoker.invoke(&any_backend(), &request).await {
            Ok(reply) => reply,
            Err(error) => panic!("invoke failed: {error}"),
        };
        assert_eq!(reply.text, "MEDIUM");
    }

    #[tokio::test]
    async fn test_mock_invoker_default_response() {
        let invoker = MockInvoker::new().with_default_response("COMPLEX");

        let request = InvocationRequest::new("unmatched prompt", 10, 0.0);
        let reply = match invoker.invoke(&any_backend(), &request).await {
            Ok(reply) => reply,
            Err(error) => panic!("invoke failed: {error}"),
        };
        assert_eq!(reply.text, "COMPLEX");
    }

    #[tokio::test]
    async fn test_mock_invoker_failure_mode() {
        let invoker = MockInvoker::new().with_failure("connection refused");

        let request = InvocationRequest::new("anything", 10, 0.0);
        let result = invoker.invoke(&any_backend(), &request).await;
        assert!(matches!(result, Err(Error::Invoker(_))));
        // Failed calls still appear in the history
        assert_eq!(invoker.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_invoker_call_history() {
        let invoker = MockInvoker::new().with_default_response("ok");

        let first = InvocationRequest::new("first prompt", 10, 0.0);
        let second = InvocationRequest::new("second prompt", 10, 0.0);
        let backend = any_backend();

        assert!(invoker.invoke(&backend, &first).await.is_ok());
        assert!(invoker.invoke(&backend, &second).await.is_ok());

        let history = invoker.call_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], "first prompt");
        assert_eq!(history[1], "second prompt");

        invoker.clear_history();
        assert_eq!(invoker.call_count(), 0);
    }
}
