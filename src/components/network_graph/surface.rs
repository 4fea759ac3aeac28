//! Drawing surface abstraction: the render pipeline emits [`DrawOp`]s and a
//! [`Surface`] executes them. The canvas 2D context is the production
//! surface.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::geometry::Point;
use crate::error::Result;

/// Logical size of the surface plus the device pixel ratio of the display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
	/// Backing pixels per CSS pixel.
	pub dpr: f64,
}

impl Viewport {
	/// A viewport for a measured surface, or `None` while the surface has
	/// no positive size. Invalid pixel ratios fall back to 1.
	pub fn measured(width: f64, height: f64, dpr: f64) -> Option<Self> {
		if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
			return None;
		}
		let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
		Some(Self { width, height, dpr })
	}

	/// Layout origin in surface coordinates.
	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}

	/// Backing store size in device pixels.
	pub fn backing_size(&self) -> (u32, u32) {
		(
			(self.width * self.dpr).round().max(1.0) as u32,
			(self.height * self.dpr).round().max(1.0) as u32,
		)
	}
}

/// Fill for a disc.
#[derive(Clone, Debug, PartialEq)]
pub enum Fill {
	/// Flat color.
	Solid(&'static str),
	/// Two-stop linear gradient from `from` to `to`.
	LinearGradient {
		/// Gradient start.
		from: Point,
		/// Gradient end.
		to: Point,
		/// `(offset, color)` stops.
		stops: [(f32, &'static str); 2],
	},
}

/// One drawing instruction, in logical units.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
	/// Reset the transform to a uniform device-pixel scale.
	SetScale(f64),
	/// Clear a `width` x `height` area at the origin.
	Clear {
		/// Width in logical pixels.
		width: f64,
		/// Height in logical pixels.
		height: f64,
	},
	/// Push drawing state.
	Save,
	/// Pop drawing state.
	Restore,
	/// Move the origin.
	Translate(Point),
	/// Straight stroked segment.
	Line {
		/// Start point.
		from: Point,
		/// End point.
		to: Point,
		/// Stroke color.
		color: &'static str,
		/// Stroke width.
		width: f64,
		/// Global alpha for this stroke only.
		alpha: f64,
	},
	/// Filled rectangle.
	Rect {
		/// Top-left corner.
		origin: Point,
		/// Width.
		width: f64,
		/// Height.
		height: f64,
		/// Fill color.
		color: &'static str,
	},
	/// Filled disc.
	Circle {
		/// Center.
		center: Point,
		/// Radius.
		radius: f64,
		/// Solid or gradient fill.
		fill: Fill,
	},
	/// Stroked circle, optionally dashed `[dash, gap]`.
	Ring {
		/// Center.
		center: Point,
		/// Radius.
		radius: f64,
		/// Stroke color.
		color: &'static str,
		/// Stroke width.
		width: f64,
		/// `[dash, gap]`, or solid when `None`.
		dash: Option<[f64; 2]>,
	},
	/// Filled text.
	Text {
		/// Text to draw.
		text: String,
		/// Anchor point.
		at: Point,
		/// CSS font shorthand.
		font: String,
		/// Fill color.
		color: &'static str,
		/// `textAlign` value.
		align: &'static str,
		/// `textBaseline` value.
		baseline: &'static str,
	},
}

/// Something that can execute draw operations.
pub trait Surface {
	/// Execute one operation.
	fn apply(&self, op: &DrawOp) -> Result<()>;
}

impl Surface for CanvasRenderingContext2d {
	fn apply(&self, op: &DrawOp) -> Result<()> {
		match op {
			DrawOp::SetScale(dpr) => self.set_transform(*dpr, 0.0, 0.0, *dpr, 0.0, 0.0)?,
			DrawOp::Clear { width, height } => self.clear_rect(0.0, 0.0, *width, *height),
			DrawOp::Save => self.save(),
			DrawOp::Restore => self.restore(),
			DrawOp::Translate(p) => self.translate(p.x, p.y)?,
			DrawOp::Line {
				from,
				to,
				color,
				width,
				alpha,
			} => {
				self.set_global_alpha(*alpha);
				self.set_stroke_style_str(color);
				self.set_line_width(*width);
				self.begin_path();
				self.move_to(from.x, from.y);
				self.line_to(to.x, to.y);
				self.stroke();
				self.set_global_alpha(1.0);
			}
			DrawOp::Rect {
				origin,
				width,
				height,
				color,
			} => {
				self.set_fill_style_str(color);
				self.fill_rect(origin.x, origin.y, *width, *height);
			}
			DrawOp::Circle {
				center,
				radius,
				fill,
			} => {
				self.begin_path();
				self.arc(center.x, center.y, *radius, 0.0, std::f64::consts::TAU)?;
				match fill {
					Fill::Solid(color) => self.set_fill_style_str(color),
					Fill::LinearGradient { from, to, stops } => {
						let gradient = self.create_linear_gradient(from.x, from.y, to.x, to.y);
						for (offset, color) in stops {
							gradient.add_color_stop(*offset, color)?;
						}
						#[allow(deprecated)]
						self.set_fill_style(&gradient);
					}
				}
				self.fill();
			}
			DrawOp::Ring {
				center,
				radius,
				color,
				width,
				dash,
			} => {
				self.begin_path();
				self.arc(center.x, center.y, *radius, 0.0, std::f64::consts::TAU)?;
				self.set_stroke_style_str(color);
				self.set_line_width(*width);
				if let Some([on, off]) = dash {
					self.set_line_dash(&js_sys::Array::of2(
						&JsValue::from_f64(*on),
						&JsValue::from_f64(*off),
					))?;
				}
				self.stroke();
				if dash.is_some() {
					self.set_line_dash(&js_sys::Array::new())?;
				}
			}
			DrawOp::Text {
				text,
				at,
				font,
				color,
				align,
				baseline,
			} => {
				self.set_fill_style_str(color);
				self.set_font(font);
				self.set_text_align(align);
				self.set_text_baseline(baseline);
				self.fill_text(text, at.x, at.y)?;
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn non_positive_sizes_are_not_measured() {
		assert!(Viewport::measured(0.0, 600.0, 2.0).is_none());
		assert!(Viewport::measured(800.0, -1.0, 2.0).is_none());
		assert!(Viewport::measured(f64::NAN, 600.0, 2.0).is_none());
	}

	#[test]
	fn backing_store_scales_with_pixel_ratio() {
		let vp = Viewport::measured(800.0, 600.0, 2.0).unwrap();
		assert_eq!(vp.backing_size(), (1600, 1200));
		assert_eq!(vp.center(), Point::new(400.0, 300.0));
		assert_eq!(Viewport::measured(10.0, 10.0, 0.0).unwrap().dpr, 1.0);
	}
}
