//! Focus-relative data resolution.
//!
//! Callers ask a [`ContextSnapshot`] for the value behind a [`DataKey`] ("the
//! active editor", "the copy handler") without knowing which object holds it.
//! Resolution walks from the snapshot's node to the nearest ancestor exposing a
//! [`DataProvider`], asks it directly, and falls back to a [`DataRule`] that may
//! derive the value from other keys of the same provider.
//!
//! # Flow
//!
//! ```text
//! ContextSnapshot::get(key)
//!   -> stamp check (StalePolicy)
//!   -> ContextResolver::resolve(node, key)
//!        reserved keys: answered from the node itself
//!        otherwise: nearest provider -> direct answer | RuleRegistry rule
//! ```
//!
//! # Modules
//!
//! - [`key`] - plain/injected keys and typed keys
//! - [`keys`] - well-known keys and the values stored under them
//! - [`node`] - hierarchy traits implemented by the host toolkit
//! - [`provider`] - provider capability and its shapes
//! - [`rules`] - derivation rules and their registry
//! - [`resolver`] - the resolution engine
//! - [`snapshot`] - per-interaction handles and the event counter
//! - [`manager`] - snapshot construction entrypoints

pub mod config;
pub mod error;
pub mod key;
pub mod keys;
pub mod manager;
pub mod model;
pub mod node;
pub mod provider;
pub mod resolver;
pub mod rules;
pub mod snapshot;
pub mod stats;
pub mod validate;
pub mod value;

#[cfg(test)]
mod test_fixtures;

#[doc(hidden)]
pub use inventory;

pub use config::{ContextConfig, StalePolicy};
pub use error::{ConfigError, ContextError};
pub use key::{DataKey, TypedKey};
pub use manager::DataManager;
pub use model::{ClipboardAction, ClipboardHandler, Editor, EditorRef, FileEditor, NavigationTarget};
pub use node::{ContextNode, FocusTracker, HasParent, Modality, NodeRef, Size, TabbedNode};
pub use provider::{DataProvider, DataSink, FnProvider, ProviderShape, SharedProvider, TypedDataProvider};
pub use resolver::ContextResolver;
pub use rules::{DataRule, FnRule, RuleDeclaration, RuleRef, RuleRegistry};
pub use snapshot::{ContextSnapshot, EventCounter, EventStamp};
pub use stats::{ResolverStats, StatsSnapshot};
pub use validate::{DataValidator, ValidatorRef};
pub use value::DataValue;
