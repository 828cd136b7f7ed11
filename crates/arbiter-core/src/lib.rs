//! Core types and traits for the arbiter routing engine.
//!
//! This crate provides the backend descriptors, invocation trait, routing
//! configuration, and error handling shared by the rest of the workspace.

/// Routing configuration snapshot and file helpers.
pub mod config;
/// Error types and result definitions.
pub mod error;
/// Synchronization utilities.
pub mod sync;
/// Trait definitions for backend invokers.
pub mod traits;
/// Backend descriptors, references, and invocation payloads.
pub mod types;

pub use config::{
    ClassifierMode, DeclaredBackend, ProviderBackends, RoutePreference, RouterConfig,
    TierOverrides,
};
pub use error::{Error, Result};
pub use sync::IgnoreLock;
pub use traits::BackendInvoker;
pub use types::{
    BackendDescriptor, BackendRef, CatalogEntry, InvocationReply, InvocationRequest, Modality,
    TokenUsage,
};
