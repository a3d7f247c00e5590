//! Device-pixel scaling for the starfield surface.
//!
//! # Coordinate Spaces
//!
//! - **Logical space**: CSS pixels. Star positions, the auto star count and
//!   every drawing command live here.
//! - **Buffer space**: physical pixels of the canvas backing store, i.e.
//!   logical size times the device pixel ratio. The surface applies the ratio
//!   as a transform so logical drawing stays crisp on high-density displays.

/// Size of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Logical width in CSS pixels.
	pub width: f64,
	/// Logical height in CSS pixels.
	pub height: f64,
	/// Physical pixels per CSS pixel, always finite and positive.
	pub device_pixel_ratio: f64,
}

impl Viewport {
	/// Builds a viewport, clamping bad sizes to zero and a bad ratio to 1.
	pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
		let sanitize = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
		let device_pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
			device_pixel_ratio
		} else {
			1.0
		};
		Self {
			width: sanitize(width),
			height: sanitize(height),
			device_pixel_ratio,
		}
	}

	/// Reads the window's inner size and pixel ratio.
	pub fn from_window(window: &web_sys::Window) -> Self {
		let dimension = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
			v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
		};
		Self::new(
			dimension(window.inner_width()),
			dimension(window.inner_height()),
			window.device_pixel_ratio(),
		)
	}

	/// Backing-store width in physical pixels.
	pub fn buffer_width(&self) -> u32 {
		(self.width * self.device_pixel_ratio).round() as u32
	}

	/// Backing-store height in physical pixels.
	pub fn buffer_height(&self) -> u32 {
		(self.height * self.device_pixel_ratio).round() as u32
	}

	/// True when nothing can be drawn.
	pub fn is_empty(&self) -> bool {
		self.width <= 0.0 || self.height <= 0.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn buffer_scales_with_pixel_ratio() {
		let vp = Viewport::new(800.0, 600.0, 2.0);
		assert_eq!((vp.buffer_width(), vp.buffer_height()), (1600, 1200));
		let fractional = Viewport::new(1280.0, 720.0, 1.5);
		assert_eq!((fractional.buffer_width(), fractional.buffer_height()), (1920, 1080));
	}

	#[test]
	fn bad_pixel_ratio_falls_back_to_one() {
		assert_eq!(Viewport::new(10.0, 10.0, 0.0).device_pixel_ratio, 1.0);
		assert_eq!(Viewport::new(10.0, 10.0, -2.0).device_pixel_ratio, 1.0);
		assert_eq!(Viewport::new(10.0, 10.0, f64::NAN).device_pixel_ratio, 1.0);
	}

	#[test]
	fn degenerate_sizes_are_empty() {
		assert!(Viewport::new(0.0, 600.0, 1.0).is_empty());
		assert!(Viewport::new(f64::INFINITY, 600.0, 1.0).is_empty());
		assert!(Viewport::new(-5.0, 5.0, 1.0).is_empty());
		assert!(!Viewport::new(1.0, 1.0, 1.0).is_empty());
	}
}
