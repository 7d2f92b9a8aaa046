//! Provider capability and the shapes a node may expose it through.
//!
//! A node answers key queries in one of three ways, detected once per lookup
//! by [`ProviderShape::classify`]:
//!
//! 1. it is a [`DataProvider`] itself;
//! 2. it is a [`TypedDataProvider`], adapted to key/value form through a
//!    [`DataSink`];
//! 3. a provider object was attached to it from outside.

use std::fmt;
use std::sync::Arc;

use crate::key::{DataKey, TypedKey};
use crate::node::ContextNode;
use crate::value::DataValue;

/// Answers key queries directly.
pub trait DataProvider {
	/// Returns the value for `key`, or `None` if this provider has none.
	fn data(&self, key: &DataKey) -> Option<DataValue>;
}

/// A provider shared across threads, as attached to nodes.
pub type SharedProvider = Arc<dyn DataProvider + Send + Sync>;

impl<P: DataProvider + ?Sized> DataProvider for Arc<P> {
	fn data(&self, key: &DataKey) -> Option<DataValue> {
		(**self).data(key)
	}
}

/// Adapts a closure into a [`DataProvider`].
pub struct FnProvider<F>(pub F);

impl<F> DataProvider for FnProvider<F>
where
	F: Fn(&DataKey) -> Option<DataValue>,
{
	fn data(&self, key: &DataKey) -> Option<DataValue> {
		(self.0)(key)
	}
}

/// A provider that publishes values through typed keys.
pub trait TypedDataProvider {
	/// Publishes the value for `key` into `sink`, if there is one.
	fn calc_data(&self, key: &DataKey, sink: &mut DataSink);
}

/// Collects the answer of a [`TypedDataProvider`] for a single requested key.
///
/// Values put under any other key are ignored.
pub struct DataSink {
	requested: DataKey,
	value: Option<DataValue>,
}

impl DataSink {
	/// Creates a sink for `requested`.
	pub fn new(requested: DataKey) -> Self {
		Self {
			requested,
			value: None,
		}
	}

	/// Publishes a typed value.
	pub fn put<T: Send + Sync + 'static>(&mut self, key: &TypedKey<T>, value: T) {
		if *key.key() == self.requested {
			self.value = Some(DataValue::new(value));
		}
	}

	/// Publishes an untyped value.
	pub fn put_value(&mut self, key: &DataKey, value: DataValue) {
		if *key == self.requested {
			self.value = Some(value);
		}
	}

	/// Returns the published value.
	pub fn into_value(self) -> Option<DataValue> {
		self.value
	}
}

/// The way a node exposes its provider.
pub enum ProviderShape<'a> {
	/// The node answers queries itself.
	Direct(&'a dyn DataProvider),
	/// The node publishes typed values and is adapted through a [`DataSink`].
	Typed(&'a dyn TypedDataProvider),
	/// A provider attached to the node from outside.
	Attached(SharedProvider),
}

impl<'a> ProviderShape<'a> {
	/// Returns the provider shape of `node`, if it exposes one.
	pub fn classify(node: &'a dyn ContextNode) -> Option<Self> {
		if let Some(direct) = node.as_data_provider() {
			return Some(Self::Direct(direct));
		}
		if let Some(typed) = node.as_typed_provider() {
			return Some(Self::Typed(typed));
		}
		node.attached_provider().map(Self::Attached)
	}

	/// Short name of the shape, for diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Direct(_) => "direct",
			Self::Typed(_) => "typed",
			Self::Attached(_) => "attached",
		}
	}
}

impl DataProvider for ProviderShape<'_> {
	fn data(&self, key: &DataKey) -> Option<DataValue> {
		match self {
			Self::Direct(provider) => provider.data(key),
			Self::Typed(provider) => {
				let mut sink = DataSink::new(key.clone());
				provider.calc_data(key, &mut sink);
				sink.into_value()
			}
			Self::Attached(provider) => provider.data(key),
		}
	}
}

impl fmt::Debug for ProviderShape<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ProviderShape").field(&self.kind()).finish()
	}
}
