//! Visual theming for the starfield.
//!
//! Colors, the three-stop backdrop gradient and the horizon glow.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a CSS-ish color string cannot be understood.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ColorParseError {
	/// Blank input.
	#[error("empty color string")]
	Empty,
	/// `#` form that is not six hex digits.
	#[error("invalid hex color `{0}` (expected #rrggbb)")]
	InvalidHex(String),
	/// Wrong number of comma-separated components.
	#[error("expected 3 or 4 components in `{input}`, found {found}")]
	ComponentCount {
		/// The rejected input.
		input: String,
		/// Components found.
		found: usize,
	},
	/// A channel outside `0..=255` or an alpha outside `[0, 1]`.
	#[error("invalid color component `{0}`")]
	InvalidComponent(String),
}

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color, different alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	fn parse_hex(s: &str) -> Result<Self, ColorParseError> {
		let hex = &s[1..];
		if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
			return Err(ColorParseError::InvalidHex(s.to_string()));
		}
		let channel = |range: std::ops::Range<usize>| {
			u8::from_str_radix(&hex[range], 16)
				.map_err(|_| ColorParseError::InvalidHex(s.to_string()))
		};
		Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
	}

	/// Parses `r,g,b`, `r,g,b,a` and the `rgb(...)`/`rgba(...)` forms.
	fn parse_components(s: &str) -> Result<Self, ColorParseError> {
		let inner = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))
			.map(|rest| rest.trim_end_matches(')'))
			.unwrap_or(s);
		let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
		if !(3..=4).contains(&parts.len()) {
			return Err(ColorParseError::ComponentCount {
				input: s.to_string(),
				found: parts.len(),
			});
		}

		let channel = |p: &str| {
			Some(p)
				.filter(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
				.and_then(|p| p.parse::<u8>().ok())
				.ok_or_else(|| ColorParseError::InvalidComponent(p.to_string()))
		};
		let alpha = match parts.get(3) {
			Some(p) => Some(p)
				.filter(|p| p.bytes().any(|b| b.is_ascii_digit()))
				.filter(|p| p.bytes().all(|b| b.is_ascii_digit() || b == b'.'))
				.and_then(|p| p.parse::<f64>().ok())
				.filter(|a| (0.0..=1.0).contains(a))
				.ok_or_else(|| ColorParseError::InvalidComponent(p.to_string()))?,
			None => 1.0,
		};
		Ok(Self::rgba(
			channel(parts[0])?,
			channel(parts[1])?,
			channel(parts[2])?,
			alpha,
		))
	}
}

impl FromStr for Color {
	type Err = ColorParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		if s.is_empty() {
			Err(ColorParseError::Empty)
		} else if s.starts_with('#') {
			Self::parse_hex(s)
		} else {
			Self::parse_components(s)
		}
	}
}

impl TryFrom<String> for Color {
	type Error = ColorParseError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_css())
	}
}

/// Fixed vertical backdrop painted behind the stars, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundGradient {
	/// Color at the top edge.
	pub top: Color,
	/// Color halfway down.
	pub middle: Color,
	/// Color at the bottom edge.
	pub bottom: Color,
}

impl BackgroundGradient {
	/// Gradient from explicit stops.
	pub const fn new(top: Color, middle: Color, bottom: Color) -> Self {
		Self { top, middle, bottom }
	}

	/// Stops as `(offset, color)` pairs.
	pub fn stops(&self) -> [(f64, Color); 3] {
		[(0.0, self.top), (0.5, self.middle), (1.0, self.bottom)]
	}

	/// Windows XP blues.
	pub const fn xp() -> Self {
		Self::new(
			Color::rgb(0x0a, 0x24, 0x6a),
			Color::rgb(0x1e, 0x4d, 0x8c),
			Color::rgb(0x2b, 0x71, 0xc6),
		)
	}
}

impl Default for BackgroundGradient {
	fn default() -> Self {
		Self::xp()
	}
}

impl TryFrom<[String; 3]> for BackgroundGradient {
	type Error = ColorParseError;

	fn try_from([top, middle, bottom]: [String; 3]) -> Result<Self, Self::Error> {
		Ok(Self::new(top.parse()?, middle.parse()?, bottom.parse()?))
	}
}

/// Soft radial glow rising from the bottom edge, drawn over the stars.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowStyle {
	/// Inner color; alpha is the peak intensity.
	pub color: Color,
	/// Horizontal center as a fraction of the surface width.
	pub center_x: f64,
	/// Vertical center as a fraction of the surface height.
	pub center_y: f64,
	/// Fraction of the radius at which the glow reaches full transparency.
	pub falloff: f64,
}

impl Default for GlowStyle {
	fn default() -> Self {
		Self {
			color: Color::rgba(100, 149, 237, 0.1),
			center_x: 0.5,
			center_y: 1.0,
			falloff: 0.7,
		}
	}
}

/// Everything the renderer needs to know about colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
	/// Star color; alpha is replaced per draw.
	pub particle_color: Color,
	/// Backdrop painted first.
	pub background: BackgroundGradient,
	/// Glow painted last, if any.
	pub glow: Option<GlowStyle>,
	/// Opacity of the star layer, applied on top of each star's own alpha.
	pub layer_opacity: f64,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			particle_color: Color::rgb(100, 149, 237),
			background: BackgroundGradient::xp(),
			glow: Some(GlowStyle::default()),
			layer_opacity: 0.6,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_rgb_triple() {
		let c: Color = "100,149,237".parse().unwrap();
		assert_eq!(c, Color::rgb(100, 149, 237));
		let spaced: Color = " 255, 100 , 255 ".parse().unwrap();
		assert_eq!(spaced, Color::rgb(255, 100, 255));
	}

	#[test]
	fn parses_hex_and_functional_forms() {
		assert_eq!("#0a246a".parse::<Color>().unwrap(), Color::rgb(10, 36, 106));
		assert_eq!("rgb(0, 255, 65)".parse::<Color>().unwrap(), Color::rgb(0, 255, 65));
		let c: Color = "rgba(1, 2, 3, 0.5)".parse().unwrap();
		assert!((c.a - 0.5).abs() < 1e-9);
	}

	#[test]
	fn rejects_bad_colors() {
		assert_eq!("".parse::<Color>(), Err(ColorParseError::Empty));
		assert!(matches!("#12345".parse::<Color>(), Err(ColorParseError::InvalidHex(_))));
		assert!(matches!("#gg0000".parse::<Color>(), Err(ColorParseError::InvalidHex(_))));
		assert!(matches!(
			"1,2".parse::<Color>(),
			Err(ColorParseError::ComponentCount { found: 2, .. })
		));
		assert!(matches!(
			"1,2,300".parse::<Color>(),
			Err(ColorParseError::InvalidComponent(_))
		));
	}

	#[test]
	fn rejects_signed_digits() {
		assert!(matches!("#+f+f+f".parse::<Color>(), Err(ColorParseError::InvalidHex(_))));
		assert!(matches!("#-1ffff".parse::<Color>(), Err(ColorParseError::InvalidHex(_))));
		assert_eq!(
			"+1,+2,+3".parse::<Color>(),
			Err(ColorParseError::InvalidComponent("+1".to_string()))
		);
		assert!(matches!(
			"rgba(1, 2, 3, +0.5)".parse::<Color>(),
			Err(ColorParseError::InvalidComponent(_))
		));
		assert!(matches!(
			"1,,3".parse::<Color>(),
			Err(ColorParseError::InvalidComponent(_))
		));
		assert!("rgba(1, 2, 3, .5)".parse::<Color>().is_ok());
	}

	#[test]
	fn css_output_switches_on_alpha() {
		assert_eq!(Color::rgb(10, 36, 106).to_css(), "#0a246a");
		assert_eq!(
			Color::rgb(100, 149, 237).with_alpha(0.25).to_css(),
			"rgba(100, 149, 237, 0.25)"
		);
	}

	#[test]
	fn gradient_stops_run_top_to_bottom() {
		let stops = BackgroundGradient::xp().stops();
		assert_eq!(stops[0], (0.0, Color::rgb(0x0a, 0x24, 0x6a)));
		assert_eq!(stops[1].0, 0.5);
		assert_eq!(stops[2], (1.0, Color::rgb(0x2b, 0x71, 0xc6)));
	}
}
