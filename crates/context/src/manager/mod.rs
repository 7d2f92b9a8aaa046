//! Snapshot construction entrypoints.

use std::sync::Arc;

use crate::config::ContextConfig;
use crate::error::{ContextError, Result};
use crate::node::NodeRef;
use crate::resolver::ContextResolver;
use crate::snapshot::{ContextSnapshot, EventCounter, EventStamp};


/// Hands out [`ContextSnapshot`]s sharing one resolver and event counter.
#[derive(Debug, Clone)]
pub struct DataManager {
	resolver: Arc<ContextResolver>,
	events: EventCounter,
}

impl DataManager {
	pub fn new(resolver: ContextResolver, events: EventCounter) -> Self {
		Self {
			resolver: Arc::new(resolver),
			events,
		}
	}

	/// Creates a manager with built-in rules, no focus tracker and `config`.
	pub fn with_config(config: ContextConfig, events: EventCounter) -> Self {
		Self::new(ContextResolver::new(config), events)
	}

	pub fn resolver(&self) -> &Arc<ContextResolver> {
		&self.resolver
	}

	pub fn events(&self) -> &EventCounter {
		&self.events
	}

	/// Publishes a new configuration to the resolver.
	pub fn reload_config(&self, config: ContextConfig) {
		tracing::info!(domain = "context", ?config, "context configuration reloaded");
		self.resolver.set_config(config);
	}

	/// Snapshot for `node`, stamped with the current event.
	pub fn snapshot_for(&self, node: &NodeRef) -> ContextSnapshot {
		ContextSnapshot::new(self.resolver.clone(), self.events.clone(), Some(node), self.events.stamp())
	}

	/// Snapshot for `node` that skips staleness checks.
	pub fn unstamped_snapshot(&self, node: &NodeRef) -> ContextSnapshot {
		ContextSnapshot::new(self.resolver.clone(), self.events.clone(), Some(node), EventStamp::Unstamped)
	}

	/// Snapshot for the point `(x, y)` inside `node`.
	///
	/// Inside a tab container the snapshot is built from the content of the
	/// tab under the point, or from the container when no tab is hit.
	pub fn snapshot_at(&self, node: &NodeRef, x: i32, y: i32) -> Result<ContextSnapshot> {
		let size = node.size();
		if !size.contains(x, y) {
			return Err(ContextError::PointOutOfBounds {
				x,
				y,
				width: size.width,
				height: size.height,
			});
		}

		let Some(tabs) = node.as_tabbed() else {
			return Ok(self.snapshot_for(node));
		};
		match tabs.tab_at(x, y).and_then(|index| tabs.tab_content(index)) {
			Some(content) => Ok(self.snapshot_for(&content)),
			None => Ok(self.snapshot_for(node)),
		}
	}

	/// Snapshot for the node holding focus now.
	///
	/// Without a focus owner the snapshot is bound to nothing and every
	/// lookup is absent.
	pub fn focused_snapshot(&self) -> ContextSnapshot {
		let owner = self.resolver.focus_owner();
		ContextSnapshot::new(self.resolver.clone(), self.events.clone(), owner.as_ref(), self.events.stamp())
	}

	/// Unstamped snapshot that re-resolves against the focus owner on every
	/// lookup, falling back to `node`. For harnesses that run outside a live
	/// event.
	pub fn test_snapshot(&self, node: &NodeRef) -> ContextSnapshot {
		ContextSnapshot::following_focus(self.resolver.clone(), self.events.clone(), Some(node))
	}
}
