use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Stable identifier of an entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
	/// Borrow the identifier as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for EntityId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for EntityId {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}

/// Kind of relationship an edge represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionKind {
	/// Shared publications.
	CoAuthor,
	/// Same institution.
	Workplace,
	/// Same school or alumni network.
	Education,
	/// Patient referrals.
	Referral,
	/// Mentorship.
	Mentor,
}

impl ConnectionKind {
	/// All kinds, in legend order.
	pub const ALL: [ConnectionKind; 5] = [
		Self::CoAuthor,
		Self::Workplace,
		Self::Education,
		Self::Referral,
		Self::Mentor,
	];

	/// Wire name, also used for the edge badge.
	pub fn label(self) -> &'static str {
		match self {
			Self::CoAuthor => "co-author",
			Self::Workplace => "workplace",
			Self::Education => "education",
			Self::Referral => "referral",
			Self::Mentor => "mentor",
		}
	}

	/// Capitalised name for the legend.
	pub fn title(self) -> &'static str {
		match self {
			Self::CoAuthor => "Co-author",
			Self::Workplace => "Workplace",
			Self::Education => "Education",
			Self::Referral => "Referral",
			Self::Mentor => "Mentor",
		}
	}
}

/// Connection strength, always within `1..=5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Strength(u8);

impl Strength {
	/// Weakest allowed strength.
	pub const MIN: u8 = 1;
	/// Strongest allowed strength.
	pub const MAX: u8 = 5;

	/// Raw value.
	pub fn get(self) -> u8 {
		self.0
	}

	/// Stroke width of an edge with this strength.
	pub fn stroke_width(self) -> f64 {
		f64::from(self.0) + 1.0
	}

	/// Fraction of the maximum strength, for the modal meter.
	pub fn ratio(self) -> f64 {
		f64::from(self.0) / f64::from(Self::MAX)
	}
}

impl TryFrom<u8> for Strength {
	type Error = GraphError;

	fn try_from(value: u8) -> Result<Self> {
		if (Self::MIN..=Self::MAX).contains(&value) {
			Ok(Self(value))
		} else {
			Err(GraphError::InvalidStrength(value))
		}
	}
}

impl From<Strength> for u8 {
	fn from(value: Strength) -> Self {
		value.0
	}
}

/// A directed relationship stored on its source entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Connection {
	/// Target entity.
	#[serde(rename = "id")]
	pub target: EntityId,
	/// Relationship kind.
	#[serde(rename = "type")]
	pub kind: ConnectionKind,
	/// Human readable summary.
	pub description: String,
	/// Strength in `1..=5`.
	pub strength: Strength,
	/// Supporting details, in display order.
	#[serde(default)]
	pub details: Vec<String>,
}

/// A person in the network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
	/// Unique identifier.
	pub id: EntityId,
	/// Display name.
	pub name: String,
	/// Category used for the node color.
	#[serde(rename = "specialty")]
	pub category: String,
	/// Outgoing connections.
	#[serde(default)]
	pub connections: Vec<Connection>,
	/// Glyph drawn inside the node.
	#[serde(default)]
	pub avatar: Option<String>,
	/// School or training institution.
	#[serde(default)]
	pub education: String,
	/// Current workplaces, primary first.
	#[serde(default)]
	pub workplaces: Vec<String>,
	/// Years in practice.
	#[serde(default)]
	pub years_experience: u32,
	/// Research interests, searched alongside the name.
	#[serde(default)]
	pub research_areas: Vec<String>,
}

impl Entity {
	/// Minimal entity with no connections.
	pub fn new(id: &str, name: &str, category: &str) -> Self {
		Self {
			id: id.into(),
			name: name.to_owned(),
			category: category.to_owned(),
			connections: Vec::new(),
			avatar: None,
			education: String::new(),
			workplaces: Vec::new(),
			years_experience: 0,
			research_areas: Vec::new(),
		}
	}

	/// Avatar if present, otherwise the first character of the name.
	pub fn glyph(&self) -> String {
		match &self.avatar {
			Some(avatar) if !avatar.is_empty() => avatar.clone(),
			_ => self.name.chars().next().map(String::from).unwrap_or_default(),
		}
	}

	/// Short label drawn under the node: the second word of the name
	/// ("Dr. Emily Carter" -> "Emily"), or the whole name.
	pub fn short_name(&self) -> &str {
		self.name.split(' ').nth(1).filter(|s| !s.is_empty()).unwrap_or(&self.name)
	}
}

/// Read-only, ordered collection of entities.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Repository {
	entities: Vec<Entity>,
	index: HashMap<EntityId, usize>,
}

impl Repository {
	/// Build a repository, rejecting duplicate identifiers.
	pub fn new(entities: Vec<Entity>) -> Result<Self> {
		let mut index = HashMap::with_capacity(entities.len());
		for (i, entity) in entities.iter().enumerate() {
			if index.insert(entity.id.clone(), i).is_some() {
				return Err(GraphError::DuplicateEntity(entity.id.0.clone()));
			}
		}
		Ok(Self { entities, index })
	}

	/// Parse a JSON array of entities.
	pub fn from_json(json: &str) -> Result<Self> {
		let entities: Vec<Entity> = serde_json::from_str(json)?;
		Self::new(entities)
	}

	/// Entities in repository order.
	pub fn entities(&self) -> &[Entity] {
		&self.entities
	}

	/// Number of entities.
	pub fn len(&self) -> usize {
		self.entities.len()
	}

	/// Whether the repository holds no entities.
	pub fn is_empty(&self) -> bool {
		self.entities.is_empty()
	}

	/// Position of `id` in repository order.
	pub fn index_of(&self, id: &EntityId) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Look up an entity by id.
	pub fn get(&self, id: &EntityId) -> Option<&Entity> {
		self.index_of(id).and_then(|i| self.entities.get(i))
	}

	/// Look up an entity by repository position.
	pub fn at(&self, index: usize) -> Option<&Entity> {
		self.entities.get(index)
	}
}
