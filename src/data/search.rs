//! Free-text filtering over entity attributes.

use super::{EntityId, Repository};

/// Maximum number of matches returned.
pub const MAX_RESULTS: usize = 8;

/// Entities whose name, category, workplaces, education or research areas
/// contain `query` (case-insensitive), in repository order.
pub fn search(repo: &Repository, query: &str) -> Vec<EntityId> {
	let needle = query.trim().to_lowercase();
	if needle.is_empty() {
		return Vec::new();
	}
	let hit = |s: &str| s.to_lowercase().contains(&needle);

	repo.entities()
		.iter()
		.filter(|e| {
			hit(&e.name)
				|| hit(&e.category)
				|| hit(&e.education)
				|| e.workplaces.iter().any(|w| hit(w))
				|| e.research_areas.iter().any(|r| hit(r))
		})
		.map(|e| e.id.clone())
		.take(MAX_RESULTS)
		.collect()
}
