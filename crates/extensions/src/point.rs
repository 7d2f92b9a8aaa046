//! Dynamic extension sources.
//!
//! An [`ExtensionPoint`] is the declarative side of registration: plugins
//! register [`ExtensionBean`]s against it and every subscribed
//! [`ExtensionListener`] hears about each addition and removal. The bean list
//! is copy-on-write so readers iterate a stable snapshot while plugins load.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::{Mutex, RwLock};

use crate::bean::ExtensionBean;
use crate::error::{ExtensionError, Result};

/// Receives add/remove notifications from a [`DynamicSource`].
pub trait ExtensionListener<T>: Send + Sync {
	/// A bean became available.
	fn extension_added(&self, bean: &Arc<ExtensionBean<T>>);

	/// A previously added bean went away.
	fn extension_removed(&self, bean: &Arc<ExtensionBean<T>>);
}

/// A source of dynamically registered beans.
pub trait DynamicSource<T> {
	/// Subscribes `listener`.
	///
	/// Beans already present are delivered through
	/// [`ExtensionListener::extension_added`] before this returns.
	fn subscribe(&self, listener: Arc<dyn ExtensionListener<T>>);
}

/// A named extension point holding plugin-contributed beans.
pub struct ExtensionPoint<T> {
	label: &'static str,
	beans: ArcSwap<Vec<Arc<ExtensionBean<T>>>>,
	listeners: RwLock<Vec<Arc<dyn ExtensionListener<T>>>>,
	/// Serializes writers so listeners observe registrations in order.
	write: Mutex<()>,
}

impl<T> ExtensionPoint<T> {
	/// Creates an empty extension point.
	pub fn new(label: &'static str) -> Self {
		Self {
			label,
			beans: ArcSwap::from_pointee(Vec::new()),
			listeners: RwLock::new(Vec::new()),
			write: Mutex::new(()),
		}
	}

	/// Returns the label given at construction.
	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Returns the registered beans in registration order.
	pub fn beans(&self) -> Arc<Vec<Arc<ExtensionBean<T>>>> {
		self.beans.load_full()
	}

	/// Registers `bean` and notifies listeners.
	pub fn register(&self, bean: Arc<ExtensionBean<T>>) {
		let _write = self.write.lock();
		let mut next = Vec::clone(&self.beans.load());
		next.push(bean.clone());
		self.beans.store(Arc::new(next));

		tracing::debug!(point = self.label, key = bean.key(), "extension added");
		for listener in self.listeners.read().iter() {
			listener.extension_added(&bean);
		}
	}

	/// Removes `bean` and notifies listeners.
	///
	/// Fails if the bean was never registered here.
	pub fn unregister(&self, bean: &Arc<ExtensionBean<T>>) -> Result<()> {
		let _write = self.write.lock();
		let current = self.beans.load_full();
		let Some(pos) = current.iter().position(|b| Arc::ptr_eq(b, bean)) else {
			let key = bean.key().to_string();
			return Err(if current.iter().any(|b| b.key() == bean.key()) {
				ExtensionError::NotRegistered { point: self.label, key }
			} else {
				ExtensionError::UnknownKey { point: self.label, key }
			});
		};

		let mut next = Vec::clone(&current);
		next.remove(pos);
		self.beans.store(Arc::new(next));

		tracing::debug!(point = self.label, key = bean.key(), "extension removed");
		for listener in self.listeners.read().iter() {
			listener.extension_removed(bean);
		}
		Ok(())
	}
}

impl<T> DynamicSource<T> for ExtensionPoint<T> {
	fn subscribe(&self, listener: Arc<dyn ExtensionListener<T>>) {
		let _write = self.write.lock();
		for bean in self.beans.load().iter() {
			listener.extension_added(bean);
		}
		self.listeners.write().push(listener);
	}
}
