//! Data keys.
//!
//! A [`DataKey`] names a semantic value slot. Every key has a plain form and an
//! injected form; the injected form addresses the same slot inside a nested or
//! virtual context and is spelled as the plain name behind
//! [`INJECTED_PREFIX`]. Rules written for the plain form also serve the
//! injected one (see [`RuleRegistry::rule_for`](crate::RuleRegistry::rule_for)).

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::marker::PhantomData;

use crate::provider::DataProvider;
use crate::value::DataValue;


/// Prefix distinguishing injected keys from plain ones.
pub const INJECTED_PREFIX: &str = "$injected$";

/// Opaque identifier of a semantic value slot.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DataKey(Cow<'static, str>);

impl DataKey {
	/// Creates a key from a static name.
	pub const fn from_static(name: &'static str) -> Self {
		Self(Cow::Borrowed(name))
	}

	/// Creates a key from an owned name.
	pub fn new(name: impl Into<String>) -> Self {
		Self(Cow::Owned(name.into()))
	}

	/// Returns the key as a string, including any injection prefix.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns true for the injected form.
	pub fn is_injected(&self) -> bool {
		self.0.starts_with(INJECTED_PREFIX)
	}

	/// Returns the injected form. Already-injected keys are returned unchanged.
	pub fn injected(&self) -> Self {
		if self.is_injected() {
			return self.clone();
		}
		Self::new(format!("{INJECTED_PREFIX}{}", self.0))
	}

	/// Returns the plain form. Plain keys are returned unchanged.
	pub fn uninjected(&self) -> Self {
		match self.0.strip_prefix(INJECTED_PREFIX) {
			Some(plain) => Self::new(plain),
			None => self.clone(),
		}
	}
}

impl Borrow<str> for DataKey {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl From<&'static str> for DataKey {
	fn from(name: &'static str) -> Self {
		Self::from_static(name)
	}
}

impl From<String> for DataKey {
	fn from(name: String) -> Self {
		Self::new(name)
	}
}

impl fmt::Display for DataKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl fmt::Debug for DataKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "DataKey({:?})", &*self.0)
	}
}

/// A [`DataKey`] bound to the Rust type stored under it.
pub struct TypedKey<T> {
	key: DataKey,
	_marker: PhantomData<fn() -> T>,
}

impl<T> TypedKey<T> {
	/// Creates a typed key from a static name.
	pub const fn new(name: &'static str) -> Self {
		Self {
			key: DataKey::from_static(name),
			_marker: PhantomData,
		}
	}

	/// Returns the untyped key.
	pub fn key(&self) -> &DataKey {
		&self.key
	}

	/// Returns the name of the plain key.
	pub fn name(&self) -> &str {
		self.key.as_str()
	}
}

impl<T: Clone + Send + Sync + 'static> TypedKey<T> {
	/// Resolves the key against `source` and downcasts the result.
	///
	/// A value of the wrong type is treated as absent.
	pub fn get<P: DataProvider + ?Sized>(&self, source: &P) -> Option<T> {
		self.of(&source.data(&self.key)?)
	}

	/// Downcasts an already resolved value.
	pub fn of(&self, value: &DataValue) -> Option<T> {
		value.downcast_ref::<T>().cloned()
	}

	/// Wraps `value` for storage under this key.
	pub fn value(&self, value: T) -> DataValue {
		DataValue::new(value)
	}

	/// Returns true when `value` holds this key's type.
	pub fn accepts(&self, value: &DataValue) -> bool {
		value.is::<T>()
	}
}

impl<T> Clone for TypedKey<T> {
	fn clone(&self) -> Self {
		Self {
			key: self.key.clone(),
			_marker: PhantomData,
		}
	}
}

impl<T> fmt::Debug for TypedKey<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypedKey")
			.field("key", &self.key)
			.field("type", &std::any::type_name::<T>())
			.finish()
	}
}
