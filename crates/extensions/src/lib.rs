//! Keyed extension registries.
//!
//! An [`ExtensionRegistry`] maps a string key to an ordered list of instances.
//! Instances come from two places:
//!
//! - explicit registration through [`ExtensionRegistry::add_explicit`], kept in
//!   insertion order;
//! - a [`DynamicSource`] (usually an [`ExtensionPoint`]) that delivers
//!   lazily-instantiated [`ExtensionBean`]s as plugins come and go.
//!
//! The merged list for a key is built on first lookup and cached until a
//! mutation touches that key.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use quill_extensions::{ExtensionBean, ExtensionPoint, ExtensionRegistry};
//!
//! let point: ExtensionPoint<Arc<str>> = ExtensionPoint::new("greetings");
//! let registry = ExtensionRegistry::new("greetings");
//! registry.attach(&point);
//!
//! registry.add_explicit("en", Arc::from("hello"));
//! point.register(ExtensionBean::new("en", || Arc::from("hi")));
//!
//! let all = registry.for_key("en");
//! assert_eq!(all.len(), 2);
//! assert_eq!(&*all[0], "hello");
//! assert_eq!(&*all[1], "hi");
//! ```

mod bean;
mod error;
mod point;
mod registry;

pub use bean::ExtensionBean;
pub use error::{ExtensionError, Result};
pub use point::{DynamicSource, ExtensionListener, ExtensionPoint};
pub use registry::{Extension, ExtensionRegistry};
