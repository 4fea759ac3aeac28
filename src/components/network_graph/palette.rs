//! Node and edge colors.

use crate::data::ConnectionKind;

/// Fallback for categories without a color.
pub const DEFAULT_COLOR: &str = "#6b7280";

/// Outer ring color for a category.
pub fn category_color(category: &str) -> &'static str {
	match category {
		"Cardiologist" => "#f97316",
		"Neurologist" => "#8b5cf6",
		"Pediatrician" => "#06b6d4",
		"Surgeon" => "#10b981",
		"Radiologist" => "#3b82f6",
		"Oncologist" => "#ec4899",
		"Psychiatrist" => "#84cc16",
		"Orthopedist" => "#f59e0b",
		"Dermatologist" => "#ef4444",
		"Ophthalmologist" => "#6366f1",
		"Endocrinologist" => "#14b8a6",
		_ => DEFAULT_COLOR,
	}
}

/// Stroke color for an edge.
pub fn connection_color(kind: ConnectionKind) -> &'static str {
	match kind {
		ConnectionKind::CoAuthor => "#3b82f6",
		ConnectionKind::Workplace => "#10b981",
		ConnectionKind::Education => "#8b5cf6",
		ConnectionKind::Referral => "#f59e0b",
		ConnectionKind::Mentor => "#ef4444",
	}
}
