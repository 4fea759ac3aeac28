//! End-to-end checks of layout, hit resolution and the interaction controller
//! on a small three-person network.

use std::sync::Arc;

use peer_network_canvas::components::network_graph::{
	GraphConfig, GraphController, HoverTarget, Mode, Outcome, Point, Ring, SurfaceRect,
	compute_layout, resolve,
};
use peer_network_canvas::data::{Connection, ConnectionKind, Entity, EntityId, Repository, Strength};

fn network() -> Arc<Repository> {
	let mut alice = Entity::new("alice", "Dr. Alice Moreau", "Cardiologist");
	alice.connections.push(Connection {
		target: "bob".into(),
		kind: ConnectionKind::Workplace,
		description: "Same cardiology ward".into(),
		strength: Strength::try_from(4).unwrap(),
		details: vec!["Joint rounds on Tuesdays".into()],
	});
	let bob = Entity::new("bob", "Dr. Bob Ishikawa", "Radiologist");
	let carol = Entity::new("carol", "Dr. Carol Nwosu", "Oncologist");
	Arc::new(Repository::new(vec![alice, bob, carol]).unwrap())
}

fn id(s: &str) -> EntityId {
	EntityId::from(s)
}

fn close(a: Point, b: Point) -> bool {
	a.distance(b) < 1e-9
}

const RECT: SurfaceRect = SurfaceRect {
	left: 20.0,
	top: 40.0,
	width: 1000.0,
	height: 700.0,
};

fn client(logical: Point) -> Point {
	Point::new(logical.x + 520.0, logical.y + 390.0)
}

#[test]
fn focal_rings_are_placed_at_configured_radii() {
	let frame = compute_layout(&network(), Some(&id("alice")), &GraphConfig::default());

	assert_eq!(frame.ring_of(&id("alice")), Some(Ring::Focal));
	assert_eq!(frame.ring_of(&id("bob")), Some(Ring::Direct));
	assert_eq!(frame.ring_of(&id("carol")), Some(Ring::Indirect));
	assert!(close(frame.position_of(&id("alice")).unwrap(), Point::ORIGIN));
	assert!(close(frame.position_of(&id("bob")).unwrap(), Point::new(200.0, 0.0)));
	assert!(close(frame.position_of(&id("carol")).unwrap(), Point::new(350.0, 0.0)));
}

#[test]
fn pointer_on_node_center_resolves_to_that_node() {
	let config = GraphConfig::default();
	let frame = compute_layout(&network(), Some(&id("alice")), &config);
	let bob = frame.position_of(&id("bob")).unwrap();

	assert_eq!(resolve(bob, &frame, &config), Some(HoverTarget::Node(id("bob"))));
}

#[test]
fn pointer_beside_edge_beyond_tolerance_resolves_to_nothing() {
	let config = GraphConfig::default();
	let frame = compute_layout(&network(), Some(&id("alice")), &config);
	let mid = Point::ORIGIN.midpoint(frame.position_of(&id("bob")).unwrap());

	assert_eq!(resolve(Point::new(mid.x, mid.y + 12.0), &frame, &config), None);
	assert!(matches!(
		resolve(Point::new(mid.x, mid.y + 8.0), &frame, &config),
		Some(HoverTarget::Edge(_))
	));
}

#[test]
fn clicking_an_edge_opens_its_connection() {
	let mut controller = GraphController::new(network(), Some(id("alice")), GraphConfig::default());
	let outcome = controller.click(client(Point::new(100.0, 0.0)), &RECT);

	let Outcome::ConnectionOpened(detail) = outcome else {
		panic!("expected the connection to open, got {outcome:?}");
	};
	assert_eq!(detail.source.id, id("alice"));
	assert_eq!(detail.target.id, id("bob"));
	assert_eq!(detail.connection.kind, ConnectionKind::Workplace);
	assert!(matches!(controller.mode(), Mode::ConnectionModalOpen(_)));

	// the modal owns input until dismissed
	let bob = client(Point::new(200.0, 0.0));
	assert_eq!(controller.click(bob, &RECT), Outcome::Nothing);
	assert!(controller.dismiss_connection());
	assert_eq!(controller.click(bob, &RECT), Outcome::EntitySelected(id("bob")));
}

#[test]
fn changing_focal_recomputes_the_layout() {
	let repo = network();
	let mut controller = GraphController::new(Arc::clone(&repo), Some(id("alice")), GraphConfig::default());
	let before = Arc::clone(controller.frame());

	controller.set_focal(Some(id("bob")));
	let frame = controller.frame();

	assert!(!Arc::ptr_eq(&before, frame));
	assert_eq!(frame.ring_of(&id("bob")), Some(Ring::Focal));
	// bob has no outgoing connections, so everyone else is indirect
	assert_eq!(frame.ring_of(&id("alice")), Some(Ring::Indirect));
	assert_eq!(frame.ring_of(&id("carol")), Some(Ring::Indirect));
	assert!((frame.position_of(&id("alice")).unwrap().length() - 350.0).abs() < 1e-9);
	assert!(close(frame.position_of(&id("bob")).unwrap(), Point::ORIGIN));
}
