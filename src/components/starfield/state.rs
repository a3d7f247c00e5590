//! Starfield engine state and lifecycle.
//!
//! The engine is created once when the component mounts and is then driven by
//! the animation loop: [`StarfieldEngine::start`] on mount,
//! [`StarfieldEngine::resize`] on viewport changes, [`StarfieldEngine::frame`]
//! once per display refresh and [`StarfieldEngine::stop`] on unmount.
//!
//! Every frame request is identified by a [`FrameToken`]. Only the token
//! handed out by the most recent `start`/`frame` call is honored, so a
//! callback that fires after teardown, or one that was superseded, draws
//! nothing.

use log::{debug, warn};
use rand::Rng;

use super::particles::ParticleField;
use super::render;
use super::scale::Viewport;
use super::surface::Surface;
use super::theme::Theme;
use super::types::{MotionMode, StarfieldConfig};

/// Frame interval the per-frame speeds were tuned for.
const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;
/// Longest gap a time-scaled step may cover, in reference frames.
const MAX_CATCH_UP_FRAMES: f64 = 4.0;

/// Lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
	/// Created, no surface yet.
	Uninitialized,
	/// Drawing frames.
	Running,
	/// Stopped for good.
	TornDown,
}

/// Identifies one outstanding frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameToken(u64);

/// Owns the stars, the drawing surface and the random source.
pub struct StarfieldEngine<S, R> {
	config: StarfieldConfig,
	theme: Theme,
	rng: R,
	surface: Option<S>,
	field: Option<ParticleField>,
	state: EngineState,
	generation: u64,
	last_timestamp: Option<f64>,
}

impl<S: Surface, R: Rng> StarfieldEngine<S, R> {
	/// Creates an idle engine. An invalid `config` is replaced by the
	/// defaults, since a non-finite speed would push every star off the
	/// surface.
	pub fn new(config: StarfieldConfig, rng: R) -> Self {
		let config = match config.validate() {
			Ok(()) => config,
			Err(e) => {
				warn!("retro-starfield: {}, using default config", e);
				StarfieldConfig::default()
			}
		};
		let theme = config.theme();
		Self {
			config,
			theme,
			rng,
			surface: None,
			field: None,
			state: EngineState::Uninitialized,
			generation: 0,
			last_timestamp: None,
		}
	}

	/// Current lifecycle phase.
	pub fn state(&self) -> EngineState {
		self.state
	}

	/// Configuration in effect.
	pub fn config(&self) -> &StarfieldConfig {
		&self.config
	}

	/// Current stars, if running.
	pub fn field(&self) -> Option<&ParticleField> {
		self.field.as_ref()
	}

	/// Takes ownership of `surface` and seeds the first field.
	///
	/// Without a surface the engine stays uninitialized and nothing is ever
	/// drawn. Returns the token for the first frame request.
	pub fn start(&mut self, surface: Option<S>, viewport: Viewport) -> Option<FrameToken> {
		if self.state != EngineState::Uninitialized {
			debug!("retro-starfield: start ignored in state {:?}", self.state);
			return None;
		}
		let Some(surface) = surface else {
			debug!("retro-starfield: no drawing surface, staying idle");
			return None;
		};

		self.surface = Some(surface);
		self.state = EngineState::Running;
		self.reseed(viewport);
		Some(self.next_token())
	}

	/// Resizes the surface and replaces the whole field.
	///
	/// Ignored unless running.
	pub fn resize(&mut self, viewport: Viewport) {
		if self.state == EngineState::Running {
			self.reseed(viewport);
		}
	}

	/// Draws and advances one frame for the request identified by `token`.
	///
	/// `timestamp_ms` is the host's frame timestamp; it only matters in
	/// [`MotionMode::TimeScaled`]. Returns the token for the next request, or
	/// `None` when the token is stale or the engine is not running.
	pub fn frame(&mut self, token: FrameToken, timestamp_ms: f64) -> Option<FrameToken> {
		if self.state != EngineState::Running || token.0 != self.generation {
			return None;
		}
		let steps = self.steps_for(timestamp_ms);
		if let (Some(field), Some(surface)) = (self.field.as_mut(), self.surface.as_mut()) {
			render::render_frame(field, surface, &self.theme, steps);
		}
		Some(self.next_token())
	}

	/// Tears the engine down. The surface and stars are dropped and every
	/// outstanding token becomes stale. Returns whether it was running.
	pub fn stop(&mut self) -> bool {
		let was_running = self.state == EngineState::Running;
		self.state = EngineState::TornDown;
		self.field = None;
		self.surface = None;
		self.generation = self.generation.wrapping_add(1);
		if was_running {
			debug!("retro-starfield: torn down");
		}
		was_running
	}

	fn reseed(&mut self, viewport: Viewport) {
		if let Some(surface) = self.surface.as_mut() {
			surface.resize(&viewport);
		}
		let field = ParticleField::new(&self.config, viewport.width, viewport.height, &mut self.rng);
		debug!(
			"retro-starfield: seeded {} stars for {}x{} @{}x",
			field.len(),
			viewport.width,
			viewport.height,
			viewport.device_pixel_ratio
		);
		self.field = Some(field);
		self.last_timestamp = None;
	}

	fn next_token(&mut self) -> FrameToken {
		self.generation = self.generation.wrapping_add(1);
		FrameToken(self.generation)
	}

	fn steps_for(&mut self, timestamp_ms: f64) -> f64 {
		match self.config.motion {
			MotionMode::PerFrame => 1.0,
			MotionMode::TimeScaled => {
				let steps = match self.last_timestamp {
					Some(last) if timestamp_ms.is_finite() && timestamp_ms >= last => {
						((timestamp_ms - last) / REFERENCE_FRAME_MS).min(MAX_CATCH_UP_FRAMES)
					}
					_ => 1.0,
				};
				if timestamp_ms.is_finite() {
					self.last_timestamp = Some(timestamp_ms);
				}
				steps
			}
		}
	}
}
