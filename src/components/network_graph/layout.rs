//! Radial layout: the focal entity at the origin, its direct connections on
//! an inner ring and everyone else on an outer ring.

use std::collections::HashSet;
use std::f64::consts::PI;
use std::sync::Arc;

use log::{debug, warn};

use super::config::GraphConfig;
use super::geometry::Point;
use crate::data::{Connection, Entity, EntityId, Repository};

/// Which ring an entity was placed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ring {
	/// The origin.
	Focal,
	/// Directly connected to the focal entity.
	Direct,
	/// Everyone else.
	Indirect,
}

/// Where an entity sits in a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
	/// Logical position relative to the surface center.
	pub position: Point,
	/// Ring membership.
	pub ring: Ring,
}

/// An undirected edge between two placed entities. `connection` indexes
/// into the source entity's connection list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	/// Repository index of the entity holding the connection.
	pub source: usize,
	/// Repository index of the connection target.
	pub target: usize,
	/// Index into `source`'s connections.
	pub connection: usize,
}

/// Positions of every entity for one focal entity. Immutable once built.
#[derive(Debug)]
pub struct LayoutFrame {
	repo: Arc<Repository>,
	focal: Option<usize>,
	placements: Vec<Placement>,
	edges: Vec<Edge>,
}

impl LayoutFrame {
	/// The repository this frame was computed from.
	pub fn repository(&self) -> &Arc<Repository> {
		&self.repo
	}

	/// Repository index of the focal entity, `None` for an empty frame.
	pub fn focal(&self) -> Option<usize> {
		self.focal
	}

	/// The focal entity.
	pub fn focal_entity(&self) -> Option<&Entity> {
		self.focal.and_then(|i| self.repo.at(i))
	}

	/// Whether the entity at `index` is the focal entity.
	pub fn is_focal(&self, index: usize) -> bool {
		self.focal == Some(index)
	}

	/// Whether nothing was placed.
	pub fn is_empty(&self) -> bool {
		self.placements.is_empty()
	}

	/// Placement of the entity at repository `index`.
	pub fn placement(&self, index: usize) -> Option<&Placement> {
		self.placements.get(index)
	}

	/// Position of the entity with `id`.
	pub fn position_of(&self, id: &EntityId) -> Option<Point> {
		self.repo
			.index_of(id)
			.and_then(|i| self.placement(i))
			.map(|p| p.position)
	}

	/// Ring of the entity with `id`.
	pub fn ring_of(&self, id: &EntityId) -> Option<Ring> {
		self.repo
			.index_of(id)
			.and_then(|i| self.placement(i))
			.map(|p| p.ring)
	}

	/// Entities with their placement, in repository order.
	pub fn nodes(&self) -> impl Iterator<Item = (usize, &Entity, &Placement)> {
		self.repo
			.entities()
			.iter()
			.zip(&self.placements)
			.enumerate()
			.map(|(i, (entity, placement))| (i, entity, placement))
	}

	/// Deduplicated edges, in repository then connection order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// The connection an edge was built from.
	pub fn connection(&self, edge: &Edge) -> Option<&Connection> {
		self.repo
			.at(edge.source)
			.and_then(|e| e.connections.get(edge.connection))
	}

	/// Source and target positions of an edge.
	pub fn endpoints(&self, edge: &Edge) -> Option<(Point, Point)> {
		let a = self.placement(edge.source)?.position;
		let b = self.placement(edge.target)?.position;
		Some((a, b))
	}

	/// Whether either end of the edge is the focal entity.
	pub fn touches_focal(&self, edge: &Edge) -> bool {
		self.is_focal(edge.source) || self.is_focal(edge.target)
	}
}

/// Lay out `repo` around `focal`.
///
/// An absent or unknown focal id falls back to the first entity; an empty
/// repository yields an empty frame. Rings with no members are skipped.
pub fn compute_layout(
	repo: &Arc<Repository>,
	focal: Option<&EntityId>,
	config: &GraphConfig,
) -> LayoutFrame {
	let focal_index = resolve_focal(repo, focal);
	let mut placements = vec![
		Placement {
			position: Point::ORIGIN,
			ring: Ring::Indirect,
		};
		repo.len()
	];

	if let Some(fi) = focal_index {
		let direct = direct_members(repo, fi);
		let indirect: Vec<usize> = (0..repo.len())
			.filter(|i| *i != fi && !direct.contains(i))
			.collect();

		placements[fi] = Placement {
			position: Point::ORIGIN,
			ring: Ring::Focal,
		};
		place_ring(&mut placements, &direct, config.direct_radius, Ring::Direct);
		place_ring(&mut placements, &indirect, config.indirect_radius, Ring::Indirect);

		debug!(
			"layout around {}: {} direct, {} indirect",
			repo.entities()[fi].id,
			direct.len(),
			indirect.len()
		);
	}

	LayoutFrame {
		edges: collect_edges(repo),
		repo: Arc::clone(repo),
		focal: focal_index,
		placements,
	}
}

fn resolve_focal(repo: &Repository, focal: Option<&EntityId>) -> Option<usize> {
	if repo.is_empty() {
		return None;
	}
	match focal {
		Some(id) => repo.index_of(id).or_else(|| {
			warn!("focal entity {id} not in repository, centering the first entity");
			Some(0)
		}),
		None => Some(0),
	}
}

/// Connection targets of the focal entity, deduplicated, in connection order.
fn direct_members(repo: &Repository, focal: usize) -> Vec<usize> {
	let mut seen = HashSet::new();
	repo.entities()[focal]
		.connections
		.iter()
		.filter_map(|conn| {
			let idx = repo.index_of(&conn.target);
			if idx.is_none() {
				debug!("dropping unresolved connection target {}", conn.target);
			}
			idx
		})
		.filter(|idx| *idx != focal && seen.insert(*idx))
		.collect()
}

fn place_ring(placements: &mut [Placement], members: &[usize], radius: f64, ring: Ring) {
	if members.is_empty() {
		return;
	}
	let n = members.len() as f64;
	for (i, &idx) in members.iter().enumerate() {
		let angle = 2.0 * PI * i as f64 / n;
		placements[idx] = Placement {
			position: Point::polar(radius, angle),
			ring,
		};
	}
}

/// One edge per unordered entity pair; unresolved targets and self loops
/// are dropped.
fn collect_edges(repo: &Repository) -> Vec<Edge> {
	let mut seen = HashSet::new();
	let mut edges = Vec::new();
	for (source, entity) in repo.entities().iter().enumerate() {
		for (connection, conn) in entity.connections.iter().enumerate() {
			let Some(target) = repo.index_of(&conn.target) else {
				continue;
			};
			if target == source || !seen.insert((source.min(target), source.max(target))) {
				continue;
			}
			edges.push(Edge {
				source,
				target,
				connection,
			});
		}
	}
	edges
}

/// Memoizes the last frame by repository identity and focal id.
#[derive(Debug, Default)]
pub struct LayoutCache {
	key: Option<(Arc<Repository>, Option<EntityId>)>,
	frame: Option<Arc<LayoutFrame>>,
}

impl LayoutCache {
	/// The frame for `(repo, focal)`, recomputed only when either changed.
	pub fn frame(
		&mut self,
		repo: &Arc<Repository>,
		focal: Option<&EntityId>,
		config: &GraphConfig,
	) -> Arc<LayoutFrame> {
		let hit = matches!(
			(&self.key, &self.frame),
			(Some((r, f)), Some(_)) if Arc::ptr_eq(r, repo) && f.as_ref() == focal
		);
		if !hit {
			self.frame = Some(Arc::new(compute_layout(repo, focal, config)));
			self.key = Some((Arc::clone(repo), focal.cloned()));
		}
		match &self.frame {
			Some(frame) => Arc::clone(frame),
			None => Arc::new(compute_layout(repo, focal, config)),
		}
	}

	/// Forget the cached frame.
	pub fn invalidate(&mut self) {
		self.key = None;
		self.frame = None;
	}
}
