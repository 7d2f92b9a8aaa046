//! Derivation rules.
//!
//! A [`DataRule`] computes a key's value from other keys when no provider
//! answers it directly. The [`RuleRegistry`] finds the rule for a key:
//!
//! 1. built-in rules registered at construction;
//! 2. rules registered explicitly or through the registry's
//!    [`ExtensionPoint`] (plugins, [`data_rule!`](crate::data_rule));
//! 3. for an injected key with no rule of its own, the plain key's rule,
//!    wrapped so every query it issues is re-injected.
//!
//! Lookups from step 2 go through the extension registry's per-key cache, so
//! misses are cached too and registering a rule evicts only its own key.
//! No lock is held while plugin beans are instantiated; a bean factory may
//! itself call [`RuleRegistry::rule_for`].

use std::sync::Arc;

use quill_extensions::{ExtensionBean, ExtensionPoint, ExtensionRegistry};
use rustc_hash::FxHashMap as HashMap;

use crate::key::DataKey;
use crate::provider::DataProvider;
use crate::value::DataValue;

mod builtins;
mod macros;

/// Derives a value from a provider.
pub trait DataRule: Send + Sync {
	/// Returns the derived value, querying `provider` for inputs.
	fn data(&self, provider: &dyn DataProvider) -> Option<DataValue>;
}

/// Shared rule handle.
pub type RuleRef = Arc<dyn DataRule>;

/// Adapts a closure into a [`DataRule`].
pub struct FnRule<F>(pub F);

impl<F> DataRule for FnRule<F>
where
	F: Fn(&dyn DataProvider) -> Option<DataValue> + Send + Sync,
{
	fn data(&self, provider: &dyn DataProvider) -> Option<DataValue> {
		(self.0)(provider)
	}
}

/// A rule declared at link time through [`data_rule!`](crate::data_rule).
pub struct RuleDeclaration {
	pub key: &'static str,
	pub factory: fn() -> RuleRef,
}

impl RuleDeclaration {
	pub const fn new(key: &'static str, factory: fn() -> RuleRef) -> Self {
		Self { key, factory }
	}
}

inventory::collect!(RuleDeclaration);

/// Maps keys to derivation rules.
pub struct RuleRegistry {
	builtins: HashMap<DataKey, RuleRef>,
	extensions: ExtensionRegistry<RuleRef>,
	point: ExtensionPoint<RuleRef>,
}

impl Default for RuleRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl RuleRegistry {
	/// Creates a registry holding the built-in rules.
	pub fn new() -> Self {
		let mut builtins = HashMap::default();
		builtins::register(&mut builtins);
		Self::from_builtins(builtins)
	}

	/// Creates a registry without built-in rules.
	pub fn empty() -> Self {
		Self::from_builtins(HashMap::default())
	}

	fn from_builtins(builtins: HashMap<DataKey, RuleRef>) -> Self {
		let extensions = ExtensionRegistry::new("data_rules");
		let point = ExtensionPoint::new("data_rules");
		extensions.attach(&point);
		Self {
			builtins,
			extensions,
			point,
		}
	}

	/// Registers every rule declared with [`data_rule!`](crate::data_rule).
	pub fn with_declared_rules(self) -> Self {
		for decl in inventory::iter::<RuleDeclaration> {
			tracing::debug!(domain = "rules", key = decl.key, "registering declared rule");
			self.point.register(ExtensionBean::new(decl.key, decl.factory));
		}
		self
	}

	/// Registers `rule` for `key`.
	///
	/// Built-in rules take precedence over registered ones.
	pub fn register_rule(&self, key: &DataKey, rule: RuleRef) {
		self.extensions.add_explicit(key.as_str(), rule);
	}

	/// Removes a rule added by [`register_rule`](Self::register_rule).
	pub fn unregister_rule(&self, key: &DataKey, rule: &RuleRef) -> bool {
		self.extensions.remove_explicit(key.as_str(), rule)
	}

	/// The extension point plugins contribute rule beans to.
	pub fn extension_point(&self) -> &ExtensionPoint<RuleRef> {
		&self.point
	}

	/// Returns true if `key` has a built-in rule.
	pub fn is_builtin(&self, key: &DataKey) -> bool {
		self.builtins.contains_key(key)
	}

	/// Returns the rule for `key`, falling back to the plain key's rule for
	/// injected keys.
	pub fn rule_for(&self, key: &DataKey) -> Option<RuleRef> {
		if let Some(rule) = self.lookup(key) {
			return Some(rule);
		}
		if !key.is_injected() {
			return None;
		}
		let plain = self.lookup(&key.uninjected())?;
		Some(Arc::new(InjectingRule { plain }))
	}

	fn lookup(&self, key: &DataKey) -> Option<RuleRef> {
		if let Some(rule) = self.builtins.get(key) {
			return Some(rule.clone());
		}

		let candidates = self.extensions.for_key(key.as_str());
		if candidates.len() > 1 {
			tracing::debug!(
				domain = "rules",
				key = %key,
				count = candidates.len(),
				"several rules registered; using the last one",
			);
		}
		candidates.last().cloned()
	}
}

/// Runs a plain-key rule on behalf of an injected key.
struct InjectingRule {
	plain: RuleRef,
}

impl DataRule for InjectingRule {
	fn data(&self, provider: &dyn DataProvider) -> Option<DataValue> {
		self.plain.data(&Injecting { inner: provider })
	}
}

struct Injecting<'a> {
	inner: &'a dyn DataProvider,
}

impl DataProvider for Injecting<'_> {
	fn data(&self, key: &DataKey) -> Option<DataValue> {
		self.inner.data(&key.injected())
	}
}
