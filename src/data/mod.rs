//! Entity repository: the people in the network and how they are related.

mod model;
pub mod search;

use std::sync::Arc;

pub use model::{Connection, ConnectionKind, Entity, EntityId, Repository, Strength};

use crate::error::Result;

const SAMPLE_JSON: &str = include_str!("../../assets/professionals.json");

/// The bundled healthcare professionals dataset.
pub fn sample_repository() -> Result<Arc<Repository>> {
	Repository::from_json(SAMPLE_JSON).map(Arc::new)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_loads_and_references_resolve() {
		let repo = sample_repository().unwrap();
		assert_eq!(repo.len(), 11);
		for entity in repo.entities() {
			for conn in &entity.connections {
				assert!(repo.get(&conn.target).is_some(), "{} -> {}", entity.id, conn.target);
			}
		}
	}
}
