//! Context resolution engine.
//!
//! # Resolution order
//!
//! 1. Reserved keys (`is_modal_context`, `context_component`,
//!    `modality_state`) are answered from the start node without touching
//!    any provider.
//! 2. Otherwise the walk climbs from the start node to the first node whose
//!    [`ProviderShape`] classifies. Only that provider is consulted; an absent
//!    answer ends the lookup.
//! 3. The provider is asked directly; failing that, the key's [`DataRule`]
//!    runs against a forwarding provider that resolves its queries through
//!    the same call.
//!
//! The `editor` key additionally yields absent while the focus holder carries
//! [`ContextConfig::aux_editor_marker`].
//!
//! # Invariants
//!
//! - A key is in flight at most once per top-level call; re-entry yields
//!   absent instead of recursing.
//! - In-flight markers are cleared on every exit path, including unwinding.
//! - In-flight sets are never shared between top-level calls.
//!
//! [`DataRule`]: crate::DataRule

use std::cell::RefCell;
use std::sync::Arc;

use arc_swap::ArcSwap;
use quill_extensions::ExtensionRegistry;
use rustc_hash::FxHashSet as HashSet;

use crate::config::ContextConfig;
use crate::key::DataKey;
use crate::keys;
use crate::node::{FocusTracker, Modality, NodeRef};
use crate::provider::{DataProvider, ProviderShape};
use crate::rules::RuleRegistry;
use crate::stats::ResolverStats;
use crate::validate::{ValidatorRef, builtin_validators};
use crate::value::DataValue;


/// Resolves keys against a node hierarchy.
pub struct ContextResolver {
	rules: RuleRegistry,
	validators: ExtensionRegistry<ValidatorRef>,
	focus: Option<Arc<dyn FocusTracker>>,
	config: ArcSwap<ContextConfig>,
	stats: ResolverStats,
}

impl Default for ContextResolver {
	fn default() -> Self {
		Self::new(ContextConfig::default())
	}
}

impl ContextResolver {
	/// Creates a resolver with the built-in rules and validators.
	pub fn new(config: ContextConfig) -> Self {
		Self {
			rules: RuleRegistry::new(),
			validators: builtin_validators(),
			focus: None,
			config: ArcSwap::from_pointee(config),
			stats: ResolverStats::default(),
		}
	}

	/// Replaces the rule registry.
	pub fn with_rules(mut self, rules: RuleRegistry) -> Self {
		self.rules = rules;
		self
	}

	/// Sets the focus tracker consulted by the `editor` filter and by
	/// focus-following snapshots.
	pub fn with_focus(mut self, focus: Arc<dyn FocusTracker>) -> Self {
		self.focus = Some(focus);
		self
	}

	pub fn rules(&self) -> &RuleRegistry {
		&self.rules
	}

	pub fn validators(&self) -> &ExtensionRegistry<ValidatorRef> {
		&self.validators
	}

	pub fn stats(&self) -> &ResolverStats {
		&self.stats
	}

	/// Returns the active configuration.
	pub fn config(&self) -> Arc<ContextConfig> {
		self.config.load_full()
	}

	/// Publishes a new configuration; lookups already running keep the old one.
	pub fn set_config(&self, config: ContextConfig) {
		self.config.store(Arc::new(config));
	}

	/// Returns the node currently holding focus.
	pub fn focus_owner(&self) -> Option<NodeRef> {
		self.focus.as_ref()?.focus_owner()
	}

	/// Resolves `key` starting at `start`.
	pub fn resolve(&self, start: &NodeRef, key: &DataKey) -> Option<DataValue> {
		if key == keys::IS_MODAL_CONTEXT.key() {
			return Some(keys::IS_MODAL_CONTEXT.value(Modality::for_node(start).is_modal()));
		}
		if key == keys::CONTEXT_COMPONENT.key() {
			return Some(keys::CONTEXT_COMPONENT.value(start.clone()));
		}
		if key == keys::MODALITY_STATE.key() {
			return Some(keys::MODALITY_STATE.value(Modality::for_node(start)));
		}

		let value = self.resolve_from_hierarchy(start, key)?;
		if key == keys::EDITOR.key() && self.focus_holder_suppresses_editor() {
			tracing::trace!(domain = "context", "editor suppressed by focus holder");
			return None;
		}
		Some(value)
	}

	fn resolve_from_hierarchy(&self, start: &NodeRef, key: &DataKey) -> Option<DataValue> {
		self.stats.record_lookup();
		let mut current = Some(start.clone());
		while let Some(node) = current {
			if let Some(provider) = ProviderShape::classify(&*node) {
				let call = ResolutionCall::new(self);
				return call.resolve_from_provider(&provider, key);
			}
			current = node.parent();
		}
		tracing::trace!(domain = "context", key = %key, "no provider in hierarchy");
		None
	}

	fn focus_holder_suppresses_editor(&self) -> bool {
		let Some(owner) = self.focus_owner() else {
			return false;
		};
		owner.has_marker(&self.config.load().aux_editor_marker)
	}

	fn validated(&self, key: &DataKey, value: DataValue, source: &'static str) -> DataValue {
		if !self.config.load().validate_values {
			return value;
		}
		for validator in self.validators.for_key(key.uninjected().as_str()).iter() {
			if let Some(problem) = validator.find_invalid(key, &value) {
				self.stats.record_invalid();
				tracing::warn!(
					domain = "context",
					key = %key,
					source,
					value_type = value.type_name(),
					problem = %problem,
					"data isn't valid",
				);
			}
		}
		value
	}
}

impl std::fmt::Debug for ContextResolver {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ContextResolver")
			.field("config", &self.config.load_full())
			.field("stats", &self.stats.snapshot())
			.finish_non_exhaustive()
	}
}

/// State of one top-level resolution.
struct ResolutionCall<'r> {
	resolver: &'r ContextResolver,
	in_flight: RefCell<HashSet<DataKey>>,
}

impl<'r> ResolutionCall<'r> {
	fn new(resolver: &'r ContextResolver) -> Self {
		Self {
			resolver,
			in_flight: RefCell::new(HashSet::default()),
		}
	}

	fn resolve_from_provider(&self, provider: &dyn DataProvider, key: &DataKey) -> Option<DataValue> {
		if !self.in_flight.borrow_mut().insert(key.clone()) {
			self.resolver.stats.record_cycle();
			tracing::debug!(domain = "context", key = %key, "resolution cycle; yielding absent");
			return None;
		}
		let _guard = InFlightGuard {
			set: &self.in_flight,
			key,
		};

		if let Some(value) = provider.data(key) {
			self.resolver.stats.record_provider_hit();
			return Some(self.resolver.validated(key, value, "provider"));
		}

		let rule = self.resolver.rules.rule_for(key)?;
		let value = rule.data(&Forwarding { call: self, provider })?;
		self.resolver.stats.record_rule_hit();
		Some(self.resolver.validated(key, value, "rule"))
	}
}

/// Clears a key's in-flight marker when dropped.
struct InFlightGuard<'a> {
	set: &'a RefCell<HashSet<DataKey>>,
	key: &'a DataKey,
}

impl Drop for InFlightGuard<'_> {
	fn drop(&mut self) {
		self.set.borrow_mut().remove(self.key);
	}
}

/// The provider a rule sees: queries go back through the same call.
struct Forwarding<'c, 'r> {
	call: &'c ResolutionCall<'r>,
	provider: &'c dyn DataProvider,
}

impl DataProvider for Forwarding<'_, '_> {
	fn data(&self, key: &DataKey) -> Option<DataValue> {
		self.call.resolve_from_provider(self.provider, key)
	}
}
