//! Retro animated starfield background.
//!
//! Renders a field of drifting, twinkling stars over a vertical gradient on an
//! HTML canvas, in the style of early-2000s screensavers:
//! - Star count derived from the viewport area, or fixed
//! - Shared drift direction with per-star speed for depth
//! - Re-seeded on every window resize, crisp on high-density displays
//! - Frame loop that stops cleanly when the component unmounts
//!
//! # Example
//!
//! ```ignore
//! use retro_starfield::{Preset, StarfieldBackground};
//!
//! view! {
//!     <StarfieldBackground config=Preset::Space.config() />
//!     <main style="position: relative; z-index: 10;">"Hello"</main>
//! }
//! ```

mod component;
mod particles;
mod render;
pub mod scale;
mod state;
mod surface;
pub mod theme;
mod types;

pub use component::{AnimationLoop, StarfieldBackground};
pub use particles::{Particle, ParticleField};
pub use state::{EngineState, FrameToken, StarfieldEngine};
pub use surface::{CanvasSurface, Surface, SurfaceError};
pub use theme::{BackgroundGradient, Color, ColorParseError, Theme};
pub use types::{ConfigError, Direction, MotionMode, Preset, StarCount, StarfieldConfig};
