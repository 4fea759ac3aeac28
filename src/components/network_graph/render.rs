//! Turns a layout frame and the interaction state into draw operations.

use super::config::GraphConfig;
use super::geometry::Point;
use super::layout::LayoutFrame;
use super::palette::{category_color, connection_color};
use super::state::InteractionState;
use super::surface::{DrawOp, Fill, Surface, Viewport};
use crate::error::Result;

const BADGE_WIDTH: f64 = 60.0;
const BADGE_HEIGHT: f64 = 16.0;
const BADGE_FILL: &str = "rgba(255, 255, 255, 0.9)";
const BADGE_TEXT: &str = "#374151";
const SMALL_FONT: &str = "10px Inter, sans-serif";
const NAME_FONT: &str = "bold 12px Inter, sans-serif";
const NAME_COLOR: &str = "#1f2937";
const MUTED: &str = "#6b7280";
const SEARCH_ACCENT: &str = "#fbbf24";
const GLOW: &str = "rgba(59, 130, 246, 0.6)";
const DISC_STOPS: [(f32, &str); 2] = [(0.0, "#f3f4f6"), (1.0, "#d1d5db")];

/// Draw one frame onto `surface`.
pub fn render<S: Surface + ?Sized>(
	surface: &S,
	frame: &LayoutFrame,
	state: &InteractionState,
	viewport: &Viewport,
	config: &GraphConfig,
) -> Result<()> {
	for op in draw_ops(frame, state, viewport, config) {
		surface.apply(&op)?;
	}
	Ok(())
}

/// The ordered operations for one frame: edges, then nodes, then labels
/// for the focal and search-matched entities.
pub fn draw_ops(
	frame: &LayoutFrame,
	state: &InteractionState,
	viewport: &Viewport,
	config: &GraphConfig,
) -> Vec<DrawOp> {
	let mut ops = vec![
		DrawOp::SetScale(viewport.dpr),
		DrawOp::Clear {
			width: viewport.width,
			height: viewport.height,
		},
		DrawOp::Save,
		DrawOp::Translate(viewport.center()),
	];
	draw_edges(&mut ops, frame, config);
	draw_nodes(&mut ops, frame, state, config);
	draw_labels(&mut ops, frame, state, config);
	ops.push(DrawOp::Restore);
	ops
}

fn draw_edges(ops: &mut Vec<DrawOp>, frame: &LayoutFrame, config: &GraphConfig) {
	for edge in frame.edges() {
		let (Some((from, to)), Some(conn)) = (frame.endpoints(edge), frame.connection(edge)) else {
			continue;
		};
		let highlighted = frame.touches_focal(edge);
		ops.push(DrawOp::Line {
			from,
			to,
			color: connection_color(conn.kind),
			width: conn.strength.stroke_width(),
			alpha: if highlighted {
				config.highlighted_edge_alpha
			} else {
				config.edge_alpha
			},
		});

		if highlighted {
			let mid = from.midpoint(to);
			ops.push(DrawOp::Rect {
				origin: Point::new(mid.x - BADGE_WIDTH / 2.0, mid.y - BADGE_HEIGHT / 2.0),
				width: BADGE_WIDTH,
				height: BADGE_HEIGHT,
				color: BADGE_FILL,
			});
			ops.push(text(
				conn.kind.label(),
				Point::new(mid.x, mid.y + 3.0),
				SMALL_FONT,
				BADGE_TEXT,
				"alphabetic",
			));
		}
	}
}

fn draw_nodes(
	ops: &mut Vec<DrawOp>,
	frame: &LayoutFrame,
	state: &InteractionState,
	config: &GraphConfig,
) {
	for (i, entity, placement) in frame.nodes() {
		let focal = frame.is_focal(i);
		let size = config.node_size(focal);
		let center = placement.position;

		if state.search_active() && state.is_highlighted(&entity.id) {
			ops.push(DrawOp::Ring {
				center,
				radius: size + 15.0,
				color: SEARCH_ACCENT,
				width: 4.0,
				dash: Some([5.0, 5.0]),
			});
		}

		ops.push(DrawOp::Circle {
			center,
			radius: size + config.ring_padding,
			fill: Fill::Solid(category_color(&entity.category)),
		});
		ops.push(DrawOp::Circle {
			center,
			radius: size + config.ring_padding / 2.0,
			fill: Fill::Solid("white"),
		});
		ops.push(DrawOp::Circle {
			center,
			radius: size,
			fill: Fill::LinearGradient {
				from: Point::new(center.x - size, center.y - size),
				to: Point::new(center.x + size, center.y + size),
				stops: DISC_STOPS,
			},
		});
		ops.push(DrawOp::Text {
			text: entity.glyph(),
			at: center,
			font: format!("{}px Arial", (size * 0.6).floor()),
			color: MUTED,
			align: "center",
			baseline: "middle",
		});

		if focal {
			ops.push(DrawOp::Ring {
				center,
				radius: size + 10.0,
				color: GLOW,
				width: 6.0,
				dash: None,
			});
		}
	}
}

// Only the focal and search-matched entities get labels; the rest stay
// unlabeled so larger networks remain readable.
fn draw_labels(
	ops: &mut Vec<DrawOp>,
	frame: &LayoutFrame,
	state: &InteractionState,
	config: &GraphConfig,
) {
	for (i, entity, placement) in frame.nodes() {
		let focal = frame.is_focal(i);
		if !focal && !state.is_highlighted(&entity.id) {
			continue;
		}
		let size = config.node_size(focal);
		let Point { x, y } = placement.position;
		let (name_at, category_at) = (
			Point::new(x, y + size + 20.0),
			Point::new(x, y + size + 35.0),
		);
		ops.push(text(entity.short_name(), name_at, NAME_FONT, NAME_COLOR, "middle"));
		ops.push(text(&entity.category, category_at, SMALL_FONT, MUTED, "middle"));
	}
}

fn text(s: &str, at: Point, font: &str, color: &'static str, baseline: &'static str) -> DrawOp {
	DrawOp::Text {
		text: s.to_owned(),
		at,
		font: font.to_owned(),
		color,
		align: "center",
		baseline,
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::sync::Arc;

	use super::*;
	use crate::components::network_graph::layout::compute_layout;
	use crate::data::{Connection, ConnectionKind, Entity, Repository, Strength};

	struct Recorder(RefCell<Vec<DrawOp>>);

	impl Surface for Recorder {
		fn apply(&self, op: &DrawOp) -> Result<()> {
			self.0.borrow_mut().push(op.clone());
			Ok(())
		}
	}

	fn conn(to: &str, kind: ConnectionKind, strength: u8) -> Connection {
		Connection {
			target: to.into(),
			kind,
			description: String::new(),
			strength: Strength::try_from(strength).unwrap(),
			details: Vec::new(),
		}
	}

	fn frame() -> LayoutFrame {
		let mut a = Entity::new("a", "Dr. Ada Park", "Surgeon");
		a.connections = vec![conn("b", ConnectionKind::Referral, 3)];
		let mut b = Entity::new("b", "Dr. Ben Ode", "Neurologist");
		b.connections = vec![conn("c", ConnectionKind::Education, 1), conn("a", ConnectionKind::Referral, 3)];
		let c = Entity::new("c", "Dr. Cal Ray", "Astronaut");
		let repo = Arc::new(Repository::new(vec![a, b, c]).unwrap());
		compute_layout(&repo, Some(&"a".into()), &GraphConfig::default())
	}

	fn viewport() -> Viewport {
		Viewport::measured(800.0, 600.0, 2.0).unwrap()
	}

	fn lines(ops: &[DrawOp]) -> Vec<(f64, f64)> {
		ops.iter()
			.filter_map(|op| match op {
				DrawOp::Line { width, alpha, .. } => Some((*width, *alpha)),
				_ => None,
			})
			.collect()
	}

	#[test]
	fn frame_is_scaled_cleared_and_centered() {
		let ops = draw_ops(&frame(), &InteractionState::default(), &viewport(), &GraphConfig::default());
		assert_eq!(ops[0], DrawOp::SetScale(2.0));
		assert_eq!(ops[1], DrawOp::Clear { width: 800.0, height: 600.0 });
		assert_eq!(ops[3], DrawOp::Translate(Point::new(400.0, 300.0)));
		assert_eq!(ops.last(), Some(&DrawOp::Restore));
	}

	#[test]
	fn edges_drawn_once_and_weighted() {
		let ops = draw_ops(&frame(), &InteractionState::default(), &viewport(), &GraphConfig::default());
		// a-b touches the focal entity, b-c does not; b-a is the same pair
		assert_eq!(lines(&ops), vec![(4.0, 0.8), (2.0, 0.4)]);
		let badges: Vec<_> = ops
			.iter()
			.filter(|op| matches!(op, DrawOp::Text { text, .. } if text == "referral"))
			.collect();
		assert_eq!(badges.len(), 1);
	}

	#[test]
	fn edges_come_before_nodes_and_labels_last() {
		let ops = draw_ops(&frame(), &InteractionState::default(), &viewport(), &GraphConfig::default());
		let last_line = ops.iter().rposition(|op| matches!(op, DrawOp::Line { .. })).unwrap();
		let first_circle = ops.iter().position(|op| matches!(op, DrawOp::Circle { .. })).unwrap();
		let last_circle = ops.iter().rposition(|op| matches!(op, DrawOp::Circle { .. })).unwrap();
		let name = ops
			.iter()
			.position(|op| matches!(op, DrawOp::Text { text, .. } if text == "Ada"))
			.unwrap();
		assert!(last_line < first_circle);
		assert!(last_circle < name);
	}

	#[test]
	fn focal_node_is_larger_and_glows() {
		let ops = draw_ops(&frame(), &InteractionState::default(), &viewport(), &GraphConfig::default());
		assert!(ops.contains(&DrawOp::Circle {
			center: Point::ORIGIN,
			radius: 54.0,
			fill: Fill::Solid("#10b981"),
		}));
		assert!(ops.contains(&DrawOp::Ring {
			center: Point::ORIGIN,
			radius: 60.0,
			color: GLOW,
			width: 6.0,
			dash: None,
		}));
		assert!(ops.contains(&DrawOp::Circle {
			center: Point::new(350.0, 0.0),
			radius: 39.0,
			fill: Fill::Solid("#6b7280"),
		}));
	}

	#[test]
	fn search_highlight_needs_active_query() {
		let frame = frame();
		let mut state = InteractionState::default();
		state.highlight.insert("c".into());
		let dashed = |ops: &[DrawOp]| ops.iter().any(|op| matches!(op, DrawOp::Ring { dash: Some(_), .. }));

		let ops = draw_ops(&frame, &state, &viewport(), &GraphConfig::default());
		assert!(!dashed(&ops));
		// highlighted entities are labeled regardless of the query
		assert!(ops.iter().any(|op| matches!(op, DrawOp::Text { text, .. } if text == "Cal")));

		state.query = "ray".into();
		let ops = draw_ops(&frame, &state, &viewport(), &GraphConfig::default());
		assert!(dashed(&ops));
		assert!(!ops.iter().any(|op| matches!(op, DrawOp::Text { text, .. } if text == "Ben")));
	}

	#[test]
	fn render_replays_ops_on_surface() {
		let recorder = Recorder(RefCell::new(Vec::new()));
		let (frame, state, vp, config) = (frame(), InteractionState::default(), viewport(), GraphConfig::default());
		render(&recorder, &frame, &state, &vp, &config).unwrap();
		assert_eq!(recorder.0.into_inner(), draw_ops(&frame, &state, &vp, &config));
	}
}
