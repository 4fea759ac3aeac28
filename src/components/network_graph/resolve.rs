//! Maps pointer coordinates to the node or edge under them.
//!
//! Hover and click both go through [`resolve`], so a click always acts on
//! whatever the hover feedback showed at the same coordinate.

use super::config::GraphConfig;
use super::geometry::{Point, distance_point_to_segment, point_in_node};
use super::layout::{Edge, LayoutFrame};
use super::state::{ConnectionDetail, EdgeKey, Hover, HoverTarget, Tooltip, TooltipBody};

/// Client-space bounding box of the drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceRect {
	/// Left edge in client pixels.
	pub left: f64,
	/// Top edge in client pixels.
	pub top: f64,
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
}

impl SurfaceRect {
	/// Whether `client` falls on the surface.
	pub fn contains(&self, client: Point) -> bool {
		client.x >= self.left
			&& client.x <= self.left + self.width
			&& client.y >= self.top
			&& client.y <= self.top + self.height
	}

	/// Client coordinates to layout space (origin at the surface center).
	pub fn to_logical(&self, client: Point) -> Point {
		Point::new(
			client.x - self.left - self.width / 2.0,
			client.y - self.top - self.height / 2.0,
		)
	}
}

/// Topmost target at logical point `p`: nodes first in frame order, then
/// edges within the pick tolerance.
pub fn resolve(p: Point, frame: &LayoutFrame, config: &GraphConfig) -> Option<HoverTarget> {
	if !(p.x.is_finite() && p.y.is_finite()) {
		return None;
	}

	let node = frame.nodes().find(|(i, _, placement)| {
		let radius = config.node_size(frame.is_focal(*i));
		point_in_node(p, placement.position, radius, config.ring_padding)
	});
	if let Some((_, entity, _)) = node {
		return Some(HoverTarget::Node(entity.id.clone()));
	}

	frame
		.edges()
		.iter()
		.find(|edge| {
			frame
				.endpoints(edge)
				.is_some_and(|(a, b)| distance_point_to_segment(p, a, b) < config.pick_tolerance)
		})
		.and_then(|edge| edge_key(frame, edge))
		.map(HoverTarget::Edge)
}

/// Resolve a client-space pointer against `rect`; off-surface points miss.
pub fn resolve_client(
	client: Point,
	rect: &SurfaceRect,
	frame: &LayoutFrame,
	config: &GraphConfig,
) -> Option<HoverTarget> {
	if !rect.contains(client) {
		return None;
	}
	resolve(rect.to_logical(client), frame, config)
}

fn edge_key(frame: &LayoutFrame, edge: &Edge) -> Option<EdgeKey> {
	let repo = frame.repository();
	Some(EdgeKey {
		source: repo.at(edge.source)?.id.clone(),
		target: repo.at(edge.target)?.id.clone(),
		connection: edge.connection,
	})
}

/// Look up the connection and both endpoints named by `key`.
pub fn connection_detail(frame: &LayoutFrame, key: &EdgeKey) -> Option<ConnectionDetail> {
	let repo = frame.repository();
	let source = repo.get(&key.source)?;
	let target = repo.get(&key.target)?;
	let connection = source
		.connections
		.get(key.connection)
		.filter(|c| c.target == key.target)?;
	Some(ConnectionDetail {
		connection: connection.clone(),
		source: source.clone(),
		target: target.clone(),
	})
}

/// Build the tooltip for the current hover.
pub fn describe(frame: &LayoutFrame, hover: &Hover) -> Option<Tooltip> {
	let body = match &hover.target {
		HoverTarget::Node(id) => {
			let entity = frame.repository().get(id)?;
			TooltipBody::Entity {
				name: entity.name.clone(),
				category: entity.category.clone(),
				years_experience: entity.years_experience,
				workplace: entity.workplaces.first().cloned(),
			}
		}
		HoverTarget::Edge(key) => {
			let detail = connection_detail(frame, key)?;
			TooltipBody::Connection {
				kind: detail.connection.kind,
				description: detail.connection.description,
				strength: detail.connection.strength.get(),
			}
		}
	};
	Some(Tooltip {
		body,
		client: hover.client,
	})
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;
	use crate::components::network_graph::layout::compute_layout;
	use crate::data::{Connection, ConnectionKind, Entity, Repository, Strength};

	fn frame() -> LayoutFrame {
		let mut alice = Entity::new("alice", "Dr. Alice Ames", "Surgeon");
		alice.connections.push(Connection {
			target: "bob".into(),
			kind: ConnectionKind::Mentor,
			description: "mentored".into(),
			strength: Strength::try_from(5).unwrap(),
			details: vec!["weekly".into()],
		});
		let bob = Entity::new("bob", "Dr. Bob Burr", "Radiologist");
		let carol = Entity::new("carol", "Dr. Carol Cruz", "Oncologist");
		let repo = Arc::new(Repository::new(vec![alice, bob, carol]).unwrap());
		compute_layout(&repo, Some(&"alice".into()), &GraphConfig::default())
	}

	#[test]
	fn focal_node_uses_larger_radius() {
		let frame = frame();
		let config = GraphConfig::default();
		assert_eq!(
			resolve(Point::new(0.0, 53.0), &frame, &config),
			Some(HoverTarget::Node("alice".into()))
		);
		// bob sits at (200, 0) with radius 35 + 4
		assert_eq!(
			resolve(Point::new(200.0, 39.0), &frame, &config),
			Some(HoverTarget::Node("bob".into()))
		);
		assert_eq!(resolve(Point::new(200.0, 40.0), &frame, &config), None);
	}

	#[test]
	fn edge_hit_within_tolerance() {
		let frame = frame();
		let config = GraphConfig::default();
		let hit = resolve(Point::new(100.0, 9.0), &frame, &config);
		assert_eq!(
			hit,
			Some(HoverTarget::Edge(EdgeKey {
				source: "alice".into(),
				target: "bob".into(),
				connection: 0,
			}))
		);
		assert_eq!(resolve(Point::new(100.0, 12.0), &frame, &config), None);
	}

	#[test]
	fn edge_tolerance_is_exclusive() {
		let frame = frame();
		let config = GraphConfig::default();
		assert!(resolve(Point::new(100.0, 9.999), &frame, &config).is_some());
		assert_eq!(resolve(Point::new(100.0, 10.0), &frame, &config), None);
	}

	#[test]
	fn overlapping_nodes_resolve_in_frame_order() {
		let config = GraphConfig {
			direct_radius: 30.0,
			..GraphConfig::default()
		};
		let mut alice = Entity::new("alice", "Dr. Alice Ames", "Surgeon");
		alice.connections.push(Connection {
			target: "bob".into(),
			kind: ConnectionKind::Workplace,
			description: String::new(),
			strength: Strength::try_from(1).unwrap(),
			details: Vec::new(),
		});
		let bob = Entity::new("bob", "Dr. Bob Burr", "Radiologist");
		let repo = Arc::new(Repository::new(vec![alice, bob]).unwrap());
		let frame = compute_layout(&repo, Some(&"alice".into()), &config);

		// (20, 0) is inside alice (r 54) and bob at (30, 0) (r 39), and on the edge
		assert_eq!(
			resolve(Point::new(20.0, 0.0), &frame, &config),
			Some(HoverTarget::Node("alice".into()))
		);
		// past alice's disc, still inside bob
		assert_eq!(
			resolve(Point::new(60.0, 0.0), &frame, &config),
			Some(HoverTarget::Node("bob".into()))
		);
	}

	#[test]
	fn detail_rejects_key_whose_index_points_elsewhere() {
		let frame = frame();
		let key = EdgeKey {
			source: "alice".into(),
			target: "carol".into(),
			connection: 0,
		};
		assert!(connection_detail(&frame, &key).is_none());
	}

	#[test]
	fn off_surface_and_nan_miss() {
		let frame = frame();
		let config = GraphConfig::default();
		let rect = SurfaceRect {
			left: 10.0,
			top: 20.0,
			width: 800.0,
			height: 600.0,
		};
		assert_eq!(rect.to_logical(Point::new(410.0, 320.0)), Point::ORIGIN);
		assert!(resolve_client(Point::new(410.0, 320.0), &rect, &frame, &config).is_some());
		assert!(resolve_client(Point::new(5.0, 320.0), &rect, &frame, &config).is_none());
		assert!(resolve(Point::new(f64::NAN, 0.0), &frame, &config).is_none());
	}

	#[test]
	fn describes_hovered_edge() {
		let frame = frame();
		let hover = Hover {
			target: HoverTarget::Edge(EdgeKey {
				source: "alice".into(),
				target: "bob".into(),
				connection: 0,
			}),
			client: Point::new(3.0, 4.0),
		};
		let tip = describe(&frame, &hover).unwrap();
		assert_eq!(tip.client, Point::new(3.0, 4.0));
		assert_eq!(
			tip.body,
			TooltipBody::Connection {
				kind: ConnectionKind::Mentor,
				description: "mentored".into(),
				strength: 5,
			}
		);
	}
}
