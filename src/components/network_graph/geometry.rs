//! Pure hit-testing geometry.

/// A point in logical (CSS pixel) units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal offset, growing rightwards.
	pub x: f64,
	/// Vertical offset, growing downwards.
	pub y: f64,
}

impl Point {
	/// The layout origin.
	pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Point at `radius` from the origin in direction `angle` (radians).
	pub fn polar(radius: f64, angle: f64) -> Self {
		Self::new(radius * angle.cos(), radius * angle.sin())
	}

	/// Euclidean distance to `other`.
	pub fn distance(self, other: Point) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}

	/// Distance from the origin.
	pub fn length(self) -> f64 {
		self.x.hypot(self.y)
	}

	/// Midpoint of the segment to `other`.
	pub fn midpoint(self, other: Point) -> Self {
		Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
	}
}

/// Whether `p` lies within a node of `radius` at `center`, outer ring
/// (`padding`) included.
pub fn point_in_node(p: Point, center: Point, radius: f64, padding: f64) -> bool {
	p.distance(center) <= radius + padding
}

/// Shortest distance from `p` to the segment `a`-`b`.
pub fn distance_point_to_segment(p: Point, a: Point, b: Point) -> f64 {
	let (cx, cy) = (b.x - a.x, b.y - a.y);
	let len_sq = cx * cx + cy * cy;
	if len_sq == 0.0 {
		return p.distance(a);
	}
	let t = (((p.x - a.x) * cx + (p.y - a.y) * cy) / len_sq).clamp(0.0, 1.0);
	p.distance(Point::new(a.x + t * cx, a.y + t * cy))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn node_containment_includes_padding() {
		let c = Point::new(10.0, 10.0);
		assert!(point_in_node(c, c, 35.0, 4.0));
		assert!(point_in_node(Point::new(49.0, 10.0), c, 35.0, 4.0));
		assert!(!point_in_node(Point::new(49.5, 10.0), c, 35.0, 4.0));
	}

	#[test]
	fn segment_distance_projects_and_clamps() {
		let (a, b) = (Point::new(0.0, 0.0), Point::new(10.0, 0.0));
		assert_eq!(distance_point_to_segment(Point::new(5.0, 3.0), a, b), 3.0);
		assert_eq!(distance_point_to_segment(Point::new(-4.0, 3.0), a, b), 5.0);
		assert_eq!(distance_point_to_segment(Point::new(13.0, 4.0), a, b), 5.0);
	}

	#[test]
	fn degenerate_segment_is_point_distance() {
		let a = Point::new(1.0, 1.0);
		assert_eq!(distance_point_to_segment(Point::new(4.0, 5.0), a, a), 5.0);
	}
}
