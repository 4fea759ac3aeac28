//! Error type shared by the data loader and the canvas plumbing.
//!
//! Nothing here is fatal to the application: callers log the error and fall
//! back to a degraded (possibly empty) diagram.

use wasm_bindgen::JsValue;

/// Errors raised while loading entities or acquiring the drawing surface.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
	/// The browser window object is not available.
	#[error("window is not available")]
	NoWindow,

	/// The canvas did not hand out a 2D rendering context.
	#[error("2d rendering context is unavailable")]
	ContextUnavailable,

	/// A connection strength fell outside `1..=5`.
	#[error("connection strength {0} is outside 1..=5")]
	InvalidStrength(u8),

	/// Two entities share the same identifier.
	#[error("duplicate entity id: {0}")]
	DuplicateEntity(String),

	/// The entity JSON could not be parsed.
	#[error("malformed entity data: {0}")]
	MalformedData(#[from] serde_json::Error),

	/// A browser API call returned an exception.
	#[error("browser call failed: {0}")]
	Js(String),
}

impl From<JsValue> for GraphError {
	fn from(value: JsValue) -> Self {
		Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

/// Result alias for fallible graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
