//! Interaction state shared by the resolver, renderer and controller, and
//! the tooltip and modal descriptors derived from it.

use std::collections::HashSet;

use super::geometry::Point;
use crate::data::{Connection, ConnectionKind, Entity, EntityId};

/// Identifies one connection by its source entity and index, plus the
/// resolved target.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EdgeKey {
	/// Entity holding the connection.
	pub source: EntityId,
	/// Connection target.
	pub target: EntityId,
	/// Index into the source's connections.
	pub connection: usize,
}

/// What the pointer is over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverTarget {
	/// A node.
	Node(EntityId),
	/// An edge.
	Edge(EdgeKey),
}

/// Current hover, with the client coordinates it was resolved at.
#[derive(Clone, Debug, PartialEq)]
pub struct Hover {
	/// Resolved target.
	pub target: HoverTarget,
	/// Pointer position in client (viewport) pixels.
	pub client: Point,
}

/// Per-surface interaction state, owned by the controller and borrowed by
/// the renderer and resolver each frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
	/// Transient; overwritten on every pointer move.
	pub hover: Option<Hover>,
	/// Connection shown in the detail modal until dismissed.
	pub pinned: Option<EdgeKey>,
	/// Entities matched by the current search.
	pub highlight: HashSet<EntityId>,
	/// Current search text.
	pub query: String,
}

impl InteractionState {
	/// Whether a search query is in effect.
	pub fn search_active(&self) -> bool {
		!self.query.is_empty()
	}

	/// Whether `id` is in the highlight set.
	pub fn is_highlighted(&self, id: &EntityId) -> bool {
		self.highlight.contains(id)
	}
}

/// Pointer cursor affordance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
	/// Nothing under the pointer.
	#[default]
	Default,
	/// A node or edge is under the pointer.
	Pointer,
}

impl Cursor {
	/// CSS `cursor` value.
	pub fn as_css(self) -> &'static str {
		match self {
			Self::Default => "default",
			Self::Pointer => "pointer",
		}
	}
}

/// Tooltip contents.
#[derive(Clone, Debug, PartialEq)]
pub enum TooltipBody {
	/// Hovering a node.
	Entity {
		/// Display name.
		name: String,
		/// Category.
		category: String,
		/// Years in practice.
		years_experience: u32,
		/// Primary workplace, if any.
		workplace: Option<String>,
	},
	/// Hovering an edge.
	Connection {
		/// Relationship kind.
		kind: ConnectionKind,
		/// Summary text.
		description: String,
		/// Strength in `1..=5`.
		strength: u8,
	},
}

/// Tooltip descriptor: what to show and where the pointer was.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	/// Contents.
	pub body: TooltipBody,
	/// Pointer position in client pixels.
	pub client: Point,
}

/// Resolved tooltip position within the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipPlacement {
	/// Left edge in pixels.
	pub left: f64,
	/// Anchor top in pixels.
	pub top: f64,
	/// Grow upwards from `top` instead of downwards.
	pub above: bool,
}

const TOOLTIP_OFFSET: f64 = 10.0;
const TOOLTIP_WIDTH: f64 = 250.0;
const TOOLTIP_MIN_TOP: f64 = 50.0;

impl Tooltip {
	/// Keep the tooltip inside a `window_width` x `window_height` window.
	pub fn placement(&self, window_width: f64, window_height: f64) -> TooltipPlacement {
		TooltipPlacement {
			left: (self.client.x + TOOLTIP_OFFSET).min(window_width - TOOLTIP_WIDTH),
			top: (self.client.y - TOOLTIP_OFFSET).max(TOOLTIP_MIN_TOP),
			above: self.client.y > window_height / 2.0,
		}
	}
}

/// Owned snapshot of a pinned connection for the detail modal.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionDetail {
	/// The connection itself.
	pub connection: Connection,
	/// Entity holding the connection.
	pub source: Entity,
	/// Connection target.
	pub target: Entity,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tooltip(x: f64, y: f64) -> Tooltip {
		Tooltip {
			body: TooltipBody::Connection {
				kind: ConnectionKind::Mentor,
				description: String::new(),
				strength: 1,
			},
			client: Point::new(x, y),
		}
	}

	#[test]
	fn placement_clamps_to_window() {
		let p = tooltip(900.0, 20.0).placement(1000.0, 800.0);
		assert_eq!(p.left, 750.0);
		assert_eq!(p.top, 50.0);
		assert!(!p.above);

		let p = tooltip(100.0, 600.0).placement(1000.0, 800.0);
		assert_eq!(p.left, 110.0);
		assert_eq!(p.top, 590.0);
		assert!(p.above);
	}

	#[test]
	fn search_is_active_only_with_text() {
		let mut state = InteractionState::default();
		assert!(!state.search_active());
		state.query = "card".into();
		assert!(state.search_active());
	}
}
