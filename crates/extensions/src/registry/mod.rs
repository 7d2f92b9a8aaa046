//! Keyed registry merging explicit and dynamic instances.
//!
//! # Invariants
//!
//! - The list for a key is explicit instances in insertion order followed by
//!   dynamic instances in registration order.
//! - Any mutation of a key evicts only that key's cache entry.
//! - A list built while a mutation races with it is returned but not cached,
//!   so the next lookup rebuilds from current contents.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;

use crate::bean::ExtensionBean;
use crate::point::{DynamicSource, ExtensionListener};


/// Values storable in an [`ExtensionRegistry`].
///
/// Explicit removal matches instances by identity rather than equality.
pub trait Extension: Clone + Send + Sync + 'static {
	/// Returns true when `self` and `other` are the same registered instance.
	fn same_instance(&self, other: &Self) -> bool;
}

impl<T: ?Sized + Send + Sync + 'static> Extension for Arc<T> {
	fn same_instance(&self, other: &Self) -> bool {
		std::ptr::addr_eq(Arc::as_ptr(self), Arc::as_ptr(other))
	}
}

struct Inner<T> {
	label: &'static str,
	explicit: RwLock<HashMap<Box<str>, Vec<T>>>,
	dynamic: RwLock<HashMap<Box<str>, Vec<Arc<ExtensionBean<T>>>>>,
	cache: RwLock<HashMap<Box<str>, Arc<[T]>>>,
	generation: AtomicU64,
}

impl<T: Extension> Inner<T> {
	fn invalidate(&self, key: &str) {
		self.generation.fetch_add(1, Ordering::AcqRel);
		self.cache.write().remove(key);
	}

	fn build(&self, key: &str) -> Arc<[T]> {
		let mut out: Vec<T> = self.explicit.read().get(key).cloned().unwrap_or_default();
		let beans = self.dynamic.read().get(key).cloned().unwrap_or_default();
		out.extend(beans.iter().map(|bean| bean.instance()));
		out.into()
	}
}

impl<T: Extension> ExtensionListener<T> for Inner<T> {
	fn extension_added(&self, bean: &Arc<ExtensionBean<T>>) {
		self.dynamic
			.write()
			.entry(bean.key().into())
			.or_default()
			.push(bean.clone());
		self.invalidate(bean.key());
	}

	fn extension_removed(&self, bean: &Arc<ExtensionBean<T>>) {
		if let Some(beans) = self.dynamic.write().get_mut(bean.key()) {
			beans.retain(|b| !Arc::ptr_eq(b, bean));
		}
		self.invalidate(bean.key());
	}
}

/// Maps string keys to ordered instance lists with per-key caching.
///
/// Cloning is cheap and yields a handle to the same registry.
pub struct ExtensionRegistry<T> {
	inner: Arc<Inner<T>>,
}

impl<T> Clone for ExtensionRegistry<T> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T: Extension> ExtensionRegistry<T> {
	/// Creates an empty registry.
	pub fn new(label: &'static str) -> Self {
		Self {
			inner: Arc::new(Inner {
				label,
				explicit: RwLock::new(HashMap::default()),
				dynamic: RwLock::new(HashMap::default()),
				cache: RwLock::new(HashMap::default()),
				generation: AtomicU64::new(0),
			}),
		}
	}

	/// Returns the label given at construction.
	pub fn label(&self) -> &'static str {
		self.inner.label
	}

	/// Subscribes this registry to a dynamic source.
	pub fn attach(&self, source: &dyn DynamicSource<T>) {
		source.subscribe(self.inner.clone());
	}

	/// Appends an explicit instance for `key`.
	pub fn add_explicit(&self, key: &str, instance: T) {
		self.inner
			.explicit
			.write()
			.entry(key.into())
			.or_default()
			.push(instance);
		self.inner.invalidate(key);
	}

	/// Removes an explicit instance for `key`.
	///
	/// Returns false when the instance was not registered under `key`.
	pub fn remove_explicit(&self, key: &str, instance: &T) -> bool {
		let removed = {
			let mut explicit = self.inner.explicit.write();
			let Some(list) = explicit.get_mut(key) else {
				return false;
			};
			let before = list.len();
			list.retain(|t| !t.same_instance(instance));
			before != list.len()
		};
		self.inner.invalidate(key);
		removed
	}

	/// Returns the merged instance list for `key`.
	///
	/// Unknown keys yield an empty list. Dynamic beans are instantiated on the
	/// first build that includes them.
	pub fn for_key(&self, key: &str) -> Arc<[T]> {
		if let Some(hit) = self.inner.cache.read().get(key) {
			return hit.clone();
		}

		let generation = self.inner.generation.load(Ordering::Acquire);
		let built = self.inner.build(key);

		let mut cache = self.inner.cache.write();
		if self.inner.generation.load(Ordering::Acquire) == generation {
			cache.insert(key.into(), built.clone());
		} else {
			tracing::trace!(registry = self.inner.label, key, "skipped caching racy build");
		}
		built
	}

	/// Returns a counter bumped by every mutation.
	///
	/// Dependents caching data derived from this registry compare generations
	/// to detect changes.
	pub fn generation(&self) -> u64 {
		self.inner.generation.load(Ordering::Acquire)
	}

	/// Returns the sorted keys that currently have at least one instance.
	pub fn keys(&self) -> Vec<Box<str>> {
		let mut keys: Vec<Box<str>> = self
			.inner
			.explicit
			.read()
			.iter()
			.filter(|(_, list)| !list.is_empty())
			.map(|(k, _)| k.clone())
			.collect();
		keys.extend(
			self.inner
				.dynamic
				.read()
				.iter()
				.filter(|(_, list)| !list.is_empty())
				.map(|(k, _)| k.clone()),
		);
		keys.sort_unstable();
		keys.dedup();
		keys
	}
}

impl<T: Extension> ExtensionListener<T> for ExtensionRegistry<T> {
	fn extension_added(&self, bean: &Arc<ExtensionBean<T>>) {
		self.inner.extension_added(bean);
	}

	fn extension_removed(&self, bean: &Arc<ExtensionBean<T>>) {
		self.inner.extension_removed(bean);
	}
}

impl<T> std::fmt::Debug for ExtensionRegistry<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ExtensionRegistry")
			.field("label", &self.inner.label)
			.field("generation", &self.inner.generation.load(Ordering::Relaxed))
			.finish_non_exhaustive()
	}
}
