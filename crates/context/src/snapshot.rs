//! Per-interaction resolution handles.
//!
//! A [`ContextSnapshot`] is created for one interaction event and bound to a
//! node through a weak handle. Using it after the host's [`EventCounter`] has
//! moved on is a usage bug; the reaction is governed by
//! [`StalePolicy`](crate::StalePolicy).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use crate::config::StalePolicy;
use crate::error::{ContextError, Result};
use crate::key::DataKey;
use crate::node::{ContextNode, NodeRef};
use crate::provider::DataProvider;
use crate::resolver::ContextResolver;
use crate::value::DataValue;

/// Global interaction-event counter advanced by the host event loop.
///
/// Clones share one counter.
#[derive(Debug, Clone, Default)]
pub struct EventCounter(Arc<AtomicU64>);

impl EventCounter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the current event number.
	pub fn current(&self) -> u64 {
		self.0.load(Ordering::Acquire)
	}

	/// Marks the start of a new event and returns its number.
	pub fn advance(&self) -> u64 {
		self.0.fetch_add(1, Ordering::AcqRel) + 1
	}

	/// Returns a stamp for the current event.
	pub fn stamp(&self) -> EventStamp {
		EventStamp::At(self.current())
	}
}

/// Event a snapshot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStamp {
	/// Not tied to an event; staleness is never checked.
	Unstamped,
	/// Created during event `n`.
	At(u64),
}

enum Binding {
	/// Resolves against a fixed node, if it is still alive.
	Node(Option<Weak<dyn ContextNode>>),
	/// Resolves against the focus owner at call time, else the fallback.
	FollowFocus(Option<Weak<dyn ContextNode>>),
}

/// A resolution handle bound to a node and an interaction event.
///
/// Holds no strong reference to its node; once the node is dropped every
/// lookup is absent.
pub struct ContextSnapshot {
	resolver: Arc<ContextResolver>,
	events: EventCounter,
	stamp: EventStamp,
	binding: Binding,
}

impl ContextSnapshot {
	/// Creates a snapshot bound to `node`.
	pub fn new(resolver: Arc<ContextResolver>, events: EventCounter, node: Option<&NodeRef>, stamp: EventStamp) -> Self {
		Self {
			resolver,
			events,
			stamp,
			binding: Binding::Node(node.map(Arc::downgrade)),
		}
	}

	/// Creates an unstamped snapshot that follows focus.
	pub fn following_focus(resolver: Arc<ContextResolver>, events: EventCounter, fallback: Option<&NodeRef>) -> Self {
		Self {
			resolver,
			events,
			stamp: EventStamp::Unstamped,
			binding: Binding::FollowFocus(fallback.map(Arc::downgrade)),
		}
	}

	pub fn stamp(&self) -> EventStamp {
		self.stamp
	}

	/// Rebinds the snapshot to an event, as the event loop does when it hands
	/// a snapshot to event handlers.
	pub fn set_stamp(&mut self, stamp: EventStamp) {
		self.stamp = stamp;
	}

	/// Returns the node lookups currently run against.
	pub fn node(&self) -> Option<NodeRef> {
		match &self.binding {
			Binding::Node(weak) => weak.as_ref()?.upgrade(),
			Binding::FollowFocus(fallback) => self
				.resolver
				.focus_owner()
				.or_else(|| fallback.as_ref()?.upgrade()),
		}
	}

	/// Resolves `key`, failing only when the stale policy rejects the lookup.
	pub fn try_get(&self, key: &DataKey) -> Result<Option<DataValue>> {
		self.check_stamp()?;
		let Some(node) = self.node() else {
			tracing::trace!(domain = "context", key = %key, "snapshot node is gone");
			return Ok(None);
		};
		Ok(self.resolver.resolve(&node, key))
	}

	/// Resolves `key`; a rejected stale lookup is logged and yields `None`.
	pub fn get(&self, key: &DataKey) -> Option<DataValue> {
		match self.try_get(key) {
			Ok(value) => value,
			Err(err) => {
				tracing::error!(domain = "context", key = %key, %err, "snapshot lookup rejected");
				None
			}
		}
	}

	fn check_stamp(&self) -> Result<()> {
		let EventStamp::At(stamped) = self.stamp else {
			return Ok(());
		};
		let current = self.events.current();
		if stamped == current {
			return Ok(());
		}

		match self.resolver.config().stale_snapshot {
			StalePolicy::Ignore => Ok(()),
			StalePolicy::Warn => {
				self.resolver.stats().record_stale();
				tracing::error!(
					domain = "context",
					stamped,
					current,
					"cannot share data context between events",
				);
				Ok(())
			}
			StalePolicy::Reject => {
				self.resolver.stats().record_stale();
				Err(ContextError::StaleSnapshot { stamped, current })
			}
		}
	}
}

impl DataProvider for ContextSnapshot {
	fn data(&self, key: &DataKey) -> Option<DataValue> {
		self.get(key)
	}
}

impl fmt::Debug for ContextSnapshot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mode = match self.binding {
			Binding::Node(_) => "node",
			Binding::FollowFocus(_) => "follow_focus",
		};
		f.debug_struct("ContextSnapshot")
			.field("mode", &mode)
			.field("stamp", &self.stamp)
			.field("node", &self.node())
			.finish_non_exhaustive()
	}
}
