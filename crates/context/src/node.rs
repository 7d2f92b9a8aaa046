//! Hierarchy traits implemented by the host toolkit.
//!
//! The resolver depends only on these traits. Nodes are shared as
//! [`NodeRef`]s; snapshots keep [`std::sync::Weak`] handles so they never
//! extend a node's lifetime.

use std::fmt;
use std::sync::Arc;

use crate::provider::{DataProvider, SharedProvider, TypedDataProvider};

/// Shared handle to a hierarchy node.
pub type NodeRef = Arc<dyn ContextNode>;

/// Upward link in the hierarchy.
pub trait HasParent {
	/// Returns the parent node, or `None` at the root.
	fn parent(&self) -> Option<NodeRef>;
}

/// A node of the host UI hierarchy.
///
/// Every method except [`HasParent::parent`] has a default describing a plain
/// node without a provider.
pub trait ContextNode: HasParent + Send + Sync + fmt::Debug {
	/// The node itself as a provider.
	fn as_data_provider(&self) -> Option<&dyn DataProvider> {
		None
	}

	/// The node itself as a typed provider.
	fn as_typed_provider(&self) -> Option<&dyn TypedDataProvider> {
		None
	}

	/// A provider attached to the node from outside.
	fn attached_provider(&self) -> Option<SharedProvider> {
		None
	}

	/// Current bounds of the node.
	fn size(&self) -> Size {
		Size::default()
	}

	/// The node as a tab container.
	fn as_tabbed(&self) -> Option<&dyn TabbedNode> {
		None
	}

	/// Returns true if the node carries the named marker.
	fn has_marker(&self, _marker: &str) -> bool {
		false
	}

	/// Returns true if the node roots a modal scope (a dialog).
	fn is_modal_root(&self) -> bool {
		false
	}
}

/// A container presenting its children as tabs.
pub trait TabbedNode {
	/// Returns the tab index under the point, if any.
	fn tab_at(&self, x: i32, y: i32) -> Option<usize>;

	/// Returns the content node of tab `index`.
	fn tab_content(&self, index: usize) -> Option<NodeRef>;
}

/// Knows which node currently holds input focus.
pub trait FocusTracker: Send + Sync {
	/// Returns the focus owner.
	fn focus_owner(&self) -> Option<NodeRef>;
}

/// Width and height of a node, in the node's own coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
	pub width: i32,
	pub height: i32,
}

impl Size {
	pub const fn new(width: i32, height: i32) -> Self {
		Self { width, height }
	}

	/// Returns true if `(x, y)` lies inside `[0, width) x [0, height)`.
	pub fn contains(self, x: i32, y: i32) -> bool {
		(0..self.width).contains(&x) && (0..self.height).contains(&y)
	}
}

/// Modality classification of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
	/// No modal scope encloses the node.
	NonModal,
	/// The node sits inside `depth` nested modal scopes.
	Modal { depth: usize },
}

impl Modality {
	/// Classifies `node` by counting modal roots among it and its ancestors.
	pub fn for_node(node: &NodeRef) -> Self {
		let mut depth = usize::from(node.is_modal_root());
		let mut current = node.parent();
		while let Some(n) = current {
			depth += usize::from(n.is_modal_root());
			current = n.parent();
		}
		match depth {
			0 => Self::NonModal,
			depth => Self::Modal { depth },
		}
	}

	pub fn is_modal(self) -> bool {
		matches!(self, Self::Modal { .. })
	}
}
