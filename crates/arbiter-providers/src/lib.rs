//! Backend invoker implementations for the arbiter routing engine.

/// Mock invoker for tests.
pub mod mock;
/// OpenAI-compatible chat-completions invoker.
pub mod openai_compat;

pub use mock::MockInvoker;
pub use openai_compat::OpenAiCompatInvoker;
