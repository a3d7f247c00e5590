//! Drawing surface abstraction and its HTML canvas implementation.
//!
//! The renderer only ever talks to [`Surface`], so frames can be recorded
//! and inspected without a browser.

use std::f64::consts::PI;

use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scale::Viewport;
use super::theme::{BackgroundGradient, Color, GlowStyle};

/// Why a drawing surface could not be acquired.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
	/// Not running in a browser window.
	#[error("no window object")]
	NoWindow,
	/// `getContext("2d")` returned nothing.
	#[error("2d context is unavailable")]
	ContextUnavailable,
	/// `getContext("2d")` returned some other object.
	#[error("context object is not a CanvasRenderingContext2d")]
	WrongContextType,
}

/// Minimal 2D drawing operations used by the starfield.
///
/// All coordinates are logical (CSS) pixels.
pub trait Surface {
	/// Resizes the backing buffer and display size to `viewport`.
	fn resize(&mut self, viewport: &Viewport);

	/// Clears a `width` × `height` region at the origin.
	fn clear(&mut self, width: f64, height: f64);

	/// Fills the region with a vertical top-to-bottom gradient.
	fn fill_vertical_gradient(&mut self, width: f64, height: f64, gradient: &BackgroundGradient);

	/// Fills a circle with `color`, including its alpha.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);

	/// Fills the region with a radial glow fading to transparent.
	fn fill_radial_glow(&mut self, width: f64, height: f64, glow: &GlowStyle);
}

/// [`Surface`] backed by an HTML canvas element.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Acquires the 2D context of `canvas`.
	pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.ok_or(SurfaceError::ContextUnavailable)?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| SurfaceError::WrongContextType)?;
		Ok(Self { canvas, ctx })
	}
}

impl Surface for CanvasSurface {
	fn resize(&mut self, viewport: &Viewport) {
		// Assigning the buffer size also resets the context transform.
		self.canvas.set_width(viewport.buffer_width());
		self.canvas.set_height(viewport.buffer_height());
		let style = self.canvas.style();
		let _ = style.set_property("width", &format!("{}px", viewport.width));
		let _ = style.set_property("height", &format!("{}px", viewport.height));
		let dpr = viewport.device_pixel_ratio;
		let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
	}

	fn clear(&mut self, width: f64, height: f64) {
		self.ctx.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_vertical_gradient(&mut self, width: f64, height: f64, gradient: &BackgroundGradient) {
		let fill = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
		for (offset, color) in gradient.stops() {
			let _ = fill.add_color_stop(offset as f32, &color.to_css());
		}

		#[allow(deprecated)]
		self.ctx.set_fill_style(&fill);
		self.ctx.fill_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, PI * 2.0);
		self.ctx.fill();
	}

	fn fill_radial_glow(&mut self, width: f64, height: f64, glow: &GlowStyle) {
		let (cx, cy) = (width * glow.center_x, height * glow.center_y);
		let radius = width.max(height);
		let Ok(fill) = self.ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, radius) else {
			return;
		};
		let _ = fill.add_color_stop(0.0, &glow.color.to_css());
		let _ = fill.add_color_stop(glow.falloff as f32, &glow.color.with_alpha(0.0).to_css());

		#[allow(deprecated)]
		self.ctx.set_fill_style(&fill);
		self.ctx.fill_rect(0.0, 0.0, width, height);
	}
}
