//! Interaction state machine tying layout, resolution and rendering
//! together. Free of browser types so it can be driven from tests.

use std::sync::Arc;

use log::debug;

use super::config::GraphConfig;
use super::geometry::Point;
use super::layout::{LayoutCache, LayoutFrame};
use super::render;
use super::resolve::{SurfaceRect, connection_detail, describe, resolve_client};
use super::state::{ConnectionDetail, Cursor, EdgeKey, Hover, HoverTarget, InteractionState, Tooltip};
use super::surface::{Surface, Viewport};
use crate::data::{EntityId, Repository};
use crate::error::Result;

/// Where the controller is in its interaction cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
	/// Nothing under the pointer.
	Idle,
	/// The pointer rests on a node or edge.
	Hovering(HoverTarget),
	/// A connection's detail modal is open; only dismissal leaves it.
	ConnectionModalOpen(EdgeKey),
}

/// What a click or tap produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
	/// Nothing was hit, or input is currently ignored.
	Nothing,
	/// A node was clicked; the host should make it focal.
	EntitySelected(EntityId),
	/// An edge was clicked and is now pinned.
	ConnectionOpened(ConnectionDetail),
}

/// Owns the layout frame and interaction state for one drawing surface.
pub struct GraphController {
	config: GraphConfig,
	repo: Arc<Repository>,
	focal: Option<EntityId>,
	cache: LayoutCache,
	frame: Arc<LayoutFrame>,
	state: InteractionState,
	viewport: Option<Viewport>,
	dirty: bool,
}

impl GraphController {
	/// Lay out `repo` around `focal`.
	pub fn new(repo: Arc<Repository>, focal: Option<EntityId>, config: GraphConfig) -> Self {
		let mut cache = LayoutCache::default();
		let frame = cache.frame(&repo, focal.as_ref(), &config);
		Self {
			config,
			repo,
			focal,
			cache,
			frame,
			state: InteractionState::default(),
			viewport: None,
			dirty: true,
		}
	}

	/// Geometry and timing settings.
	pub fn config(&self) -> &GraphConfig {
		&self.config
	}

	/// The frame the next render will draw.
	pub fn frame(&self) -> &Arc<LayoutFrame> {
		&self.frame
	}

	/// Current interaction state.
	pub fn state(&self) -> &InteractionState {
		&self.state
	}

	/// Last measured viewport, if the surface has been sized.
	pub fn viewport(&self) -> Option<Viewport> {
		self.viewport
	}

	/// Current mode, derived from the interaction state.
	pub fn mode(&self) -> Mode {
		match (&self.state.pinned, &self.state.hover) {
			(Some(key), _) => Mode::ConnectionModalOpen(key.clone()),
			(None, Some(hover)) => Mode::Hovering(hover.target.clone()),
			(None, None) => Mode::Idle,
		}
	}

	/// Swap in a repository and/or focal entity. The frame is replaced as a
	/// whole, so no render ever mixes positions from two focal entities.
	pub fn set_data(&mut self, repo: Arc<Repository>, focal: Option<EntityId>) {
		let frame = self.cache.frame(&repo, focal.as_ref(), &self.config);
		self.repo = repo;
		self.focal = focal;
		if Arc::ptr_eq(&frame, &self.frame) {
			return;
		}
		debug!("focal entity now {:?}", frame.focal_entity().map(|e| &e.id));
		self.frame = frame;
		self.state.hover = None;
		let stale = self
			.state
			.pinned
			.as_ref()
			.is_some_and(|key| connection_detail(&self.frame, key).is_none());
		if stale {
			self.state.pinned = None;
		}
		self.dirty = true;
	}

	/// Move the focal entity within the current repository.
	pub fn set_focal(&mut self, focal: Option<EntityId>) {
		self.set_data(Arc::clone(&self.repo), focal);
	}

	/// Replace the search query and its matches.
	pub fn set_search(&mut self, query: String, results: impl IntoIterator<Item = EntityId>) {
		let highlight = results.into_iter().collect();
		if query != self.state.query || highlight != self.state.highlight {
			self.state.query = query;
			self.state.highlight = highlight;
			self.dirty = true;
		}
	}

	/// Record a new surface size. Layout positions are unaffected.
	pub fn resize(&mut self, viewport: Viewport) {
		if self.viewport != Some(viewport) {
			debug!("surface resized to {}x{} @{}", viewport.width, viewport.height, viewport.dpr);
			self.viewport = Some(viewport);
		}
		self.dirty = true;
	}

	/// Update hover for a pointer at `client`; returns the cursor to show.
	pub fn pointer_move(&mut self, client: Point, rect: &SurfaceRect) -> Cursor {
		if self.state.pinned.is_some() {
			return Cursor::Default;
		}
		self.state.hover = resolve_client(client, rect, &self.frame, &self.config)
			.map(|target| Hover { target, client });
		if self.state.hover.is_some() {
			Cursor::Pointer
		} else {
			Cursor::Default
		}
	}

	/// The pointer left the surface.
	pub fn pointer_leave(&mut self) {
		self.state.hover = None;
	}

	/// Click or tap at `client`. Resolves exactly as hover does.
	pub fn click(&mut self, client: Point, rect: &SurfaceRect) -> Outcome {
		if self.state.pinned.is_some() {
			return Outcome::Nothing;
		}
		match resolve_client(client, rect, &self.frame, &self.config) {
			Some(HoverTarget::Node(id)) => Outcome::EntitySelected(id),
			Some(HoverTarget::Edge(key)) => match connection_detail(&self.frame, &key) {
				Some(detail) => {
					self.state.hover = None;
					self.state.pinned = Some(key);
					Outcome::ConnectionOpened(detail)
				}
				None => Outcome::Nothing,
			},
			None => Outcome::Nothing,
		}
	}

	/// Touch start; only single-finger touches act, as a click.
	pub fn touch_start(&mut self, touches: &[Point], rect: &SurfaceRect) -> Outcome {
		match touches {
			[only] => self.click(*only, rect),
			_ => Outcome::Nothing,
		}
	}

	/// Close the connection modal. Returns whether one was open.
	pub fn dismiss_connection(&mut self) -> bool {
		self.state.pinned.take().is_some()
	}

	/// Tooltip for the current hover.
	pub fn tooltip(&self) -> Option<Tooltip> {
		self.state.hover.as_ref().and_then(|hover| describe(&self.frame, hover))
	}

	/// Detail of the pinned connection.
	pub fn pinned_detail(&self) -> Option<ConnectionDetail> {
		self.state
			.pinned
			.as_ref()
			.and_then(|key| connection_detail(&self.frame, key))
	}

	/// Clear and return the pending-redraw flag.
	pub fn take_redraw(&mut self) -> bool {
		std::mem::take(&mut self.dirty)
	}

	/// Draw the current frame. Does nothing until a viewport is known.
	pub fn render<S: Surface + ?Sized>(&self, surface: &S) -> Result<()> {
		match &self.viewport {
			Some(viewport) => render::render(surface, &self.frame, &self.state, viewport, &self.config),
			None => Ok(()),
		}
	}
}
