use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A type-erased value resolved for a key.
///
/// Cloning shares the underlying allocation. The concrete type name is kept
/// for diagnostics.
#[derive(Clone)]
pub struct DataValue {
	inner: Arc<dyn Any + Send + Sync>,
	type_name: &'static str,
}

impl DataValue {
	/// Wraps `value`.
	pub fn new<T: Any + Send + Sync>(value: T) -> Self {
		Self {
			inner: Arc::new(value),
			type_name: std::any::type_name::<T>(),
		}
	}

	/// Returns a reference to the value if it is a `T`.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.inner.downcast_ref::<T>()
	}

	/// Returns true if the value is a `T`.
	pub fn is<T: Any>(&self) -> bool {
		self.inner.is::<T>()
	}

	/// Returns the concrete type name of the wrapped value.
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	/// Returns true if both handles share one allocation.
	pub fn ptr_eq(a: &Self, b: &Self) -> bool {
		Arc::ptr_eq(&a.inner, &b.inner)
	}
}

impl fmt::Debug for DataValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("DataValue").field(&self.type_name).finish()
	}
}
