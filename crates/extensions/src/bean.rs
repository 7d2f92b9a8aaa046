use std::fmt;
use std::sync::{Arc, OnceLock};

type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;

/// A lazily-instantiated extension registered under a key.
///
/// The factory runs at most once, on the first call to [`instance`](Self::instance).
/// Beans are compared by identity: two beans built from the same factory are
/// still distinct registrations.
pub struct ExtensionBean<T> {
	key: Box<str>,
	factory: Factory<T>,
	instance: OnceLock<T>,
}

impl<T: Clone> ExtensionBean<T> {
	/// Creates a shared bean for `key` backed by `factory`.
	pub fn new<F>(key: impl Into<Box<str>>, factory: F) -> Arc<Self>
	where
		F: Fn() -> T + Send + Sync + 'static,
	{
		Arc::new(Self {
			key: key.into(),
			factory: Box::new(factory),
			instance: OnceLock::new(),
		})
	}

	/// Returns the instance, creating it on first access.
	pub fn instance(&self) -> T {
		self.instance.get_or_init(|| (self.factory)()).clone()
	}
}

impl<T> ExtensionBean<T> {
	/// Returns the key this bean is registered under.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Returns true once the factory has run.
	pub fn is_instantiated(&self) -> bool {
		self.instance.get().is_some()
	}
}

impl<T> fmt::Debug for ExtensionBean<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ExtensionBean")
			.field("key", &self.key)
			.field("instantiated", &self.instance.get().is_some())
			.finish_non_exhaustive()
	}
}
