//! Tuning constants for layout, hit-testing, edge styling and resize retries.

/// Geometry and timing knobs for the network diagram.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
	/// Ring radius for entities directly connected to the focal entity.
	pub direct_radius: f64,
	/// Ring radius for every other entity.
	pub indirect_radius: f64,
	/// Node radius for ordinary entities.
	pub node_radius: f64,
	/// Node radius for the focal entity.
	pub focal_node_radius: f64,
	/// Extra hit radius covering the outer category ring.
	pub ring_padding: f64,
	/// Pointer distance from an edge segment below which the edge is hit.
	/// Exclusive: a pointer exactly this far away misses.
	pub pick_tolerance: f64,
	/// Edge opacity when an endpoint is the focal entity.
	pub highlighted_edge_alpha: f64,
	/// Edge opacity otherwise.
	pub edge_alpha: f64,
	/// First delay before re-measuring a zero-sized surface.
	pub resize_retry_ms: u32,
	/// Upper bound on the retry delay.
	pub resize_retry_max_ms: u32,
	/// Retries before giving up until the next resize notification.
	pub resize_retry_limit: u32,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			direct_radius: 200.0,
			indirect_radius: 350.0,
			node_radius: 35.0,
			focal_node_radius: 50.0,
			ring_padding: 4.0,
			pick_tolerance: 10.0,
			highlighted_edge_alpha: 0.8,
			edge_alpha: 0.4,
			resize_retry_ms: 100,
			resize_retry_max_ms: 1000,
			resize_retry_limit: 20,
		}
	}
}

impl GraphConfig {
	/// Drawn radius of a node.
	pub fn node_size(&self, focal: bool) -> f64 {
		if focal {
			self.focal_node_radius
		} else {
			self.node_radius
		}
	}

	/// Delay before retry number `attempt` (0-based), doubling up to the cap.
	pub fn retry_delay(&self, attempt: u32) -> u32 {
		let factor = 1u32.checked_shl(attempt.min(16)).unwrap_or(u32::MAX);
		self.resize_retry_ms
			.saturating_mul(factor)
			.min(self.resize_retry_max_ms)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn retry_backoff_is_capped() {
		let config = GraphConfig::default();
		assert_eq!(config.retry_delay(0), 100);
		assert_eq!(config.retry_delay(1), 200);
		assert_eq!(config.retry_delay(3), 800);
		assert_eq!(config.retry_delay(4), 1000);
		assert_eq!(config.retry_delay(40), 1000);
	}
}
