//! Radial peer-network diagram drawn on a canvas.
//!
//! The pure parts (layout, hit resolution, draw-op generation and the
//! interaction controller) live in their own modules and don't touch the DOM,
//! so they are usable from native tests. `component` and `resize` hold the
//! browser glue.

mod component;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod layout;
pub mod palette;
pub mod render;
pub mod resize;
pub mod resolve;
pub mod state;
pub mod surface;

pub use component::NetworkGraphCanvas;
pub use config::GraphConfig;
pub use controller::{GraphController, Mode, Outcome};
pub use geometry::Point;
pub use layout::{LayoutCache, LayoutFrame, Ring, compute_layout};
pub use resolve::{SurfaceRect, resolve};
pub use state::{ConnectionDetail, Cursor, EdgeKey, HoverTarget, Tooltip, TooltipBody};
pub use surface::{DrawOp, Surface, Viewport};
