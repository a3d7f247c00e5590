//! Configuration accepted by the starfield component.
//!
//! The same structure is read from the optional in-page JSON block and from
//! component props. Keys are camelCase to match the JSON form.

use serde::Deserialize;
use thiserror::Error;

use super::theme::{BackgroundGradient, Color, ColorParseError, GlowStyle, Theme};

/// Invalid configuration values.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
	/// Speed is zero, negative or not finite.
	#[error("speed must be a positive number, got {0}")]
	InvalidSpeed(f64),
	/// Opacity lies outside `[0, 1]`.
	#[error("opacity must be within [0, 1], got {0}")]
	InvalidOpacity(f64),
	/// A fixed count of zero.
	#[error("fixed star count must be positive")]
	ZeroCount,
	/// Neither `"auto"` nor an integer in `1..=MAX_FIXED`.
	#[error("invalid star count `{0}` (expected an integer in 1..={max} or \"auto\")", max = StarCount::MAX_FIXED)]
	InvalidCount(String),
	/// A color string that could not be parsed.
	#[error("invalid color: {0}")]
	Color(#[from] ColorParseError),
	/// Not valid JSON, or an unknown key.
	#[error("malformed config: {0}")]
	Json(String),
}

impl From<serde_json::Error> for ConfigError {
	fn from(err: serde_json::Error) -> Self {
		ConfigError::Json(err.to_string())
	}
}

/// How many stars to keep on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawStarCount")]
pub enum StarCount {
	/// One star per [`StarCount::PIXELS_PER_STAR`] square pixels.
	#[default]
	Auto,
	/// Exactly this many stars, at most [`StarCount::MAX_FIXED`].
	Fixed(usize),
}

impl StarCount {
	/// Surface area covered by one star in auto mode.
	pub const PIXELS_PER_STAR: f64 = 8000.0;

	/// Largest accepted fixed count. Keeps a typo from allocating gigabytes.
	pub const MAX_FIXED: usize = 10_000;

	/// Target count for a logical surface of the given size.
	pub fn resolve(self, width: f64, height: f64) -> usize {
		match self {
			StarCount::Fixed(n) => n,
			StarCount::Auto => {
				let area = width.max(0.0) * height.max(0.0);
				(area / Self::PIXELS_PER_STAR).floor() as usize
			}
		}
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStarCount {
	Number(u64),
	Text(String),
}

impl TryFrom<RawStarCount> for StarCount {
	type Error = ConfigError;

	fn try_from(raw: RawStarCount) -> Result<Self, Self::Error> {
		match raw {
			RawStarCount::Number(0) => Err(ConfigError::ZeroCount),
			RawStarCount::Number(n) => usize::try_from(n)
				.ok()
				.filter(|&n| n <= StarCount::MAX_FIXED)
				.map(StarCount::Fixed)
				.ok_or_else(|| ConfigError::InvalidCount(n.to_string())),
			RawStarCount::Text(s) if s.eq_ignore_ascii_case("auto") => Ok(StarCount::Auto),
			RawStarCount::Text(s) => Err(ConfigError::InvalidCount(s)),
		}
	}
}

/// Drift direction shared by every star.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	/// Toward the top edge.
	Up,
	/// Toward the bottom edge.
	Down,
	/// Toward the left edge.
	Left,
	/// Toward the right edge.
	Right,
	/// Down-right drift of the classic screensaver.
	#[default]
	Diagonal,
}

impl Direction {
	/// Per-axis factor for the diagonal drift. Not a unit vector.
	pub const DIAGONAL_FACTOR: f64 = 0.7;

	/// Velocity for a star whose speed magnitude is `base`.
	pub fn velocity(self, base: f64) -> (f64, f64) {
		match self {
			Direction::Up => (0.0, -base),
			Direction::Down => (0.0, base),
			Direction::Left => (-base, 0.0),
			Direction::Right => (base, 0.0),
			Direction::Diagonal => (base * Self::DIAGONAL_FACTOR, base * Self::DIAGONAL_FACTOR),
		}
	}
}

/// How far stars move per animation frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MotionMode {
	/// One velocity step per frame. Faster displays drift faster.
	#[default]
	PerFrame,
	/// Steps scaled by elapsed time against a 60 Hz reference.
	TimeScaled,
}

/// Named configuration bundles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
	/// Classic Windows XP blue.
	#[default]
	Xp,
	/// White stars on black, falling.
	Space,
	/// Magenta stars on purple.
	Cyber,
	/// Terminal green rain.
	Matrix,
}

impl Preset {
	/// Full configuration for this preset.
	pub fn config(self) -> StarfieldConfig {
		let base = StarfieldConfig::default();
		match self {
			Preset::Xp => base,
			Preset::Space => StarfieldConfig {
				particle_color: Color::rgb(255, 255, 255),
				background_gradient: BackgroundGradient::new(
					Color::rgb(0x00, 0x00, 0x00),
					Color::rgb(0x0a, 0x0a, 0x1a),
					Color::rgb(0x1a, 0x1a, 0x2e),
				),
				speed: 0.2,
				direction: Direction::Down,
				opacity: 0.8,
				..base
			},
			Preset::Cyber => StarfieldConfig {
				particle_color: Color::rgb(255, 100, 255),
				background_gradient: BackgroundGradient::new(
					Color::rgb(0x1a, 0x0a, 0x2e),
					Color::rgb(0x2d, 0x1b, 0x4e),
					Color::rgb(0x4a, 0x30, 0x6d),
				),
				speed: 0.4,
				direction: Direction::Diagonal,
				opacity: 0.7,
				..base
			},
			Preset::Matrix => StarfieldConfig {
				particle_color: Color::rgb(0, 255, 65),
				background_gradient: BackgroundGradient::new(
					Color::rgb(0x00, 0x00, 0x00),
					Color::rgb(0x00, 0x11, 0x00),
					Color::rgb(0x00, 0x33, 0x00),
				),
				speed: 0.5,
				direction: Direction::Down,
				opacity: 0.5,
				..base
			},
		}
	}
}

/// Complete starfield configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct StarfieldConfig {
	/// Number of stars.
	pub count: StarCount,
	/// Global velocity multiplier.
	pub speed: f64,
	/// Drift direction.
	pub direction: Direction,
	/// Star color; alpha is ignored.
	pub particle_color: Color,
	/// Backdrop, top to bottom.
	pub background_gradient: BackgroundGradient,
	/// Star layer opacity in `[0, 1]`.
	pub opacity: f64,
	/// Draw the horizon glow over the stars.
	pub glow: bool,
	/// Frame-coupled or time-scaled movement.
	pub motion: MotionMode,
	/// Render one still frame when the user prefers reduced motion.
	pub respect_reduced_motion: bool,
}

impl Default for StarfieldConfig {
	fn default() -> Self {
		Self {
			count: StarCount::Auto,
			speed: 0.3,
			direction: Direction::Diagonal,
			particle_color: Color::rgb(100, 149, 237),
			background_gradient: BackgroundGradient::xp(),
			opacity: 0.6,
			glow: true,
			motion: MotionMode::PerFrame,
			respect_reduced_motion: false,
		}
	}
}

/// Wire form of [`StarfieldConfig`]: every key optional, colors as strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct RawConfig {
	preset: Option<Preset>,
	count: Option<StarCount>,
	speed: Option<f64>,
	direction: Option<Direction>,
	particle_color: Option<String>,
	background_gradient: Option<[String; 3]>,
	opacity: Option<f64>,
	glow: Option<bool>,
	motion: Option<MotionMode>,
	respect_reduced_motion: Option<bool>,
}

impl StarfieldConfig {
	/// Parses a JSON config block. A `preset` is applied first and explicit
	/// keys override it.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let raw: RawConfig = serde_json::from_str(json)?;
		let base = raw.preset.unwrap_or_default().config();

		let config = Self {
			count: raw.count.unwrap_or(base.count),
			speed: raw.speed.unwrap_or(base.speed),
			direction: raw.direction.unwrap_or(base.direction),
			particle_color: match raw.particle_color {
				Some(s) => s.parse()?,
				None => base.particle_color,
			},
			background_gradient: match raw.background_gradient {
				Some(stops) => BackgroundGradient::try_from(stops)?,
				None => base.background_gradient,
			},
			opacity: raw.opacity.unwrap_or(base.opacity),
			glow: raw.glow.unwrap_or(base.glow),
			motion: raw.motion.unwrap_or(base.motion),
			respect_reduced_motion: raw
				.respect_reduced_motion
				.unwrap_or(base.respect_reduced_motion),
		};
		config.validate()?;
		Ok(config)
	}

	/// Checks the values the engine relies on: a finite positive speed, an
	/// opacity in `[0, 1]` and a fixed count in `1..=MAX_FIXED`.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !(self.speed.is_finite() && self.speed > 0.0) {
			return Err(ConfigError::InvalidSpeed(self.speed));
		}
		if !(0.0..=1.0).contains(&self.opacity) {
			return Err(ConfigError::InvalidOpacity(self.opacity));
		}
		match self.count {
			StarCount::Fixed(0) => return Err(ConfigError::ZeroCount),
			StarCount::Fixed(n) if n > StarCount::MAX_FIXED => {
				return Err(ConfigError::InvalidCount(n.to_string()));
			}
			_ => {}
		}
		Ok(())
	}

	/// Colors and layering for the renderer.
	pub fn theme(&self) -> Theme {
		Theme {
			particle_color: self.particle_color,
			background: self.background_gradient,
			glow: self.glow.then(GlowStyle::default),
			layer_opacity: self.opacity,
		}
	}
}
