use async_trait::async_trait;

use crate::{BackendRef, InvocationReply, InvocationRequest, Result};

/// Trait for backend invokers that can run a prompt against a backend.
///
/// This is the single capability the routing engine borrows from the
/// outside world; everything else in the engine is pure computation.
#[async_trait]
pub trait BackendInvoker: Send + Sync {
    /// Returns the unique identifier for this invoker.
    fn name(&self) -> &'static str;

    /// Checks whether this invoker is currently able to reach its backends.
    async fn is_available(&self) -> bool;

    /// Runs the request against the referenced backend and returns the
    /// generated text.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable, the call fails, or
    /// the response cannot be parsed.
    async fn invoke(
        &self,
        backend: &BackendRef,
        request: &InvocationRequest,
    ) -> Result<InvocationReply>;
}
