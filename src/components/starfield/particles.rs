//! Drifting, twinkling star particles.

use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use rand::Rng;

use super::types::StarfieldConfig;

const DIAMETER: RangeInclusive<f64> = 0.5..=2.5;
const BRIGHTNESS: RangeInclusive<f64> = 0.3..=0.8;
const TWINKLE_RATE: RangeInclusive<f64> = 0.01..=0.03;
const SPEED: RangeInclusive<f64> = 0.1..=0.4;

/// A single star.
///
/// Only `x`, `y` and `phase` change after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position in `[0, width)`.
	pub x: f64,
	/// Vertical position in `[0, height)`.
	pub y: f64,
	/// Horizontal velocity per step.
	pub vx: f64,
	/// Vertical velocity per step.
	pub vy: f64,
	/// Draw radius, half the sampled diameter.
	pub radius: f64,
	/// Base alpha before twinkling.
	pub brightness: f64,
	/// Twinkle phase in radians, kept in `[0, 2π)`.
	pub phase: f64,
	/// Phase advance per step.
	pub twinkle_rate: f64,
}

impl Particle {
	fn spawn<R: Rng>(
		rng: &mut R,
		config: &StarfieldConfig,
		width: f64,
		height: f64,
	) -> Self {
		let x = rng.gen_range(0.0..width);
		let y = rng.gen_range(0.0..height);
		let radius = rng.gen_range(DIAMETER) / 2.0;
		let brightness = rng.gen_range(BRIGHTNESS);
		let twinkle_rate = rng.gen_range(TWINKLE_RATE);
		let phase = rng.gen_range(0.0..TAU);
		// Per-star speed gives a sense of depth.
		let base = rng.gen_range(SPEED) * config.speed;
		let (vx, vy) = config.direction.velocity(base);

		Self {
			x,
			y,
			vx,
			vy,
			radius,
			brightness,
			phase,
			twinkle_rate,
		}
	}

	/// Speed magnitude along the drift direction.
	pub fn speed(&self) -> f64 {
		self.vx.hypot(self.vy)
	}

	/// Twinkle multiplier for the current phase, in `[0.6, 1.0]`.
	pub fn twinkle(&self) -> f64 {
		self.phase.sin() * 0.2 + 0.8
	}

	/// Alpha to draw with, in `[0, brightness]`.
	pub fn alpha(&self) -> f64 {
		self.brightness * self.twinkle()
	}

	/// Advances the twinkle phase by `steps` rate increments.
	pub fn advance_phase(&mut self, steps: f64) {
		self.phase = (self.phase + self.twinkle_rate * steps) % TAU;
	}

	/// Moves by `steps` velocity increments and wraps back onto the surface.
	pub fn advance_position(&mut self, steps: f64, width: f64, height: f64) {
		self.x = wrap(self.x + self.vx * steps, width);
		self.y = wrap(self.y + self.vy * steps, height);
	}
}

/// Wraps a coordinate that left `[0, extent)` back to the opposite edge.
///
/// Past the high edge restarts at zero; below zero restarts just inside the
/// high edge so the coordinate stays strictly below `extent`.
///
/// A non-finite coordinate restarts at zero.
pub fn wrap(value: f64, extent: f64) -> f64 {
	if extent <= 0.0 || !value.is_finite() {
		0.0
	} else if value >= extent {
		0.0
	} else if value < 0.0 {
		extent * (1.0 - f64::EPSILON)
	} else {
		value
	}
}

/// The full set of stars for one surface size.
#[derive(Clone, Debug)]
pub struct ParticleField {
	/// Stars in draw order.
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
}

impl ParticleField {
	/// Seeds a fresh field sized for a `width` × `height` logical surface.
	///
	/// An empty surface gets no stars regardless of the configured count.
	pub fn new<R: Rng>(
		config: &StarfieldConfig,
		width: f64,
		height: f64,
		rng: &mut R,
	) -> Self {
		let count = if width > 0.0 && height > 0.0 {
			config.count.resolve(width, height)
		} else {
			0
		};
		let particles = (0..count)
			.map(|_| Particle::spawn(rng, config, width, height))
			.collect();

		Self {
			particles,
			width,
			height,
		}
	}

	/// Logical width the stars were seeded for.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Logical height the stars were seeded for.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Number of stars.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// True when there are no stars.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Advances every star without drawing.
	pub fn update(&mut self, steps: f64) {
		let (width, height) = (self.width, self.height);
		for p in &mut self.particles {
			p.advance_phase(steps);
			p.advance_position(steps, width, height);
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::components::starfield::types::{Direction, StarCount};

	fn config(count: StarCount, speed: f64, direction: Direction) -> StarfieldConfig {
		StarfieldConfig {
			count,
			speed,
			direction,
			..StarfieldConfig::default()
		}
	}

	#[test]
	fn auto_count_on_800_by_600() {
		let mut rng = SmallRng::seed_from_u64(7);
		let field = ParticleField::new(&StarfieldConfig::default(), 800.0, 600.0, &mut rng);
		assert_eq!(field.len(), 60);
	}

	#[test]
	fn spawned_attributes_fall_in_range() {
		let mut rng = SmallRng::seed_from_u64(11);
		let cfg = config(StarCount::Fixed(500), 0.3, Direction::Diagonal);
		let field = ParticleField::new(&cfg, 640.0, 480.0, &mut rng);
		for p in &field.particles {
			assert!((0.0..640.0).contains(&p.x));
			assert!((0.0..480.0).contains(&p.y));
			assert!((0.25..=1.25).contains(&p.radius));
			assert!((0.3..=0.8).contains(&p.brightness));
			assert!((0.01..=0.03).contains(&p.twinkle_rate));
			assert!((0.0..TAU).contains(&p.phase));
			let base = p.vx / Direction::DIAGONAL_FACTOR;
			assert!(base >= 0.1 * 0.3 - 1e-12 && base <= 0.4 * 0.3 + 1e-12);
		}
	}

	#[test]
	fn left_drift_has_no_vertical_component() {
		let mut rng = SmallRng::seed_from_u64(3);
		let cfg = config(StarCount::Fixed(50), 1.0, Direction::Left);
		let field = ParticleField::new(&cfg, 300.0, 300.0, &mut rng);
		assert!(field.particles.iter().all(|p| p.vy == 0.0 && p.vx < 0.0));
	}

	#[test]
	fn diagonal_drift_is_equal_on_both_axes() {
		let mut rng = SmallRng::seed_from_u64(5);
		let cfg = config(StarCount::Fixed(50), 1.0, Direction::Diagonal);
		let field = ParticleField::new(&cfg, 300.0, 300.0, &mut rng);
		for p in &field.particles {
			assert!(p.vx > 0.0);
			assert_eq!(p.vx, p.vy);
		}
	}

	#[test]
	fn stays_in_bounds_over_many_steps() {
		let mut rng = SmallRng::seed_from_u64(99);
		for direction in [
			Direction::Up,
			Direction::Down,
			Direction::Left,
			Direction::Right,
			Direction::Diagonal,
		] {
			let cfg = config(StarCount::Fixed(40), 25.0, direction);
			let mut field = ParticleField::new(&cfg, 120.0, 90.0, &mut rng);
			for _ in 0..500 {
				field.update(1.0);
				for p in &field.particles {
					assert!(p.x >= 0.0 && p.x < 120.0, "x out of bounds: {}", p.x);
					assert!(p.y >= 0.0 && p.y < 90.0, "y out of bounds: {}", p.y);
				}
			}
		}
	}

	#[test]
	fn wraps_instead_of_clamping() {
		let mut p = Particle {
			x: 99.95,
			y: 10.0,
			vx: 0.3,
			vy: 0.0,
			radius: 1.0,
			brightness: 0.5,
			phase: 0.0,
			twinkle_rate: 0.02,
		};
		p.advance_position(1.0, 100.0, 50.0);
		assert_eq!(p.x, 0.0);
		assert_eq!(p.y, 10.0);

		p.vx = -0.3;
		p.advance_position(1.0, 100.0, 50.0);
		assert!(p.x > 99.0 && p.x < 100.0);
	}

	#[test]
	fn wrap_is_per_axis() {
		assert_eq!(wrap(5.0, 10.0), 5.0);
		assert_eq!(wrap(10.0, 10.0), 0.0);
		assert!(wrap(-0.1, 10.0) < 10.0);
		assert_eq!(wrap(3.0, 0.0), 0.0);
		assert_eq!(wrap(f64::NAN, 10.0), 0.0);
		assert_eq!(wrap(f64::NEG_INFINITY, 10.0), 0.0);
	}

	#[test]
	fn twinkle_alpha_stays_within_brightness() {
		let mut rng = SmallRng::seed_from_u64(21);
		let cfg = config(StarCount::Fixed(30), 0.3, Direction::Diagonal);
		let mut field = ParticleField::new(&cfg, 200.0, 200.0, &mut rng);
		for _ in 0..1000 {
			field.update(1.0);
			for p in &field.particles {
				let t = p.twinkle();
				assert!((0.6 - 1e-12..=1.0 + 1e-12).contains(&t));
				let a = p.alpha();
				assert!(a >= 0.0 && a <= p.brightness + 1e-12);
			}
		}
	}

	#[test]
	fn empty_surface_has_no_stars() {
		let mut rng = SmallRng::seed_from_u64(1);
		let cfg = config(StarCount::Fixed(10), 0.3, Direction::Down);
		assert!(ParticleField::new(&cfg, 0.0, 100.0, &mut rng).is_empty());
	}

	#[test]
	fn seeding_is_reproducible() {
		let cfg = StarfieldConfig::default();
		let a = ParticleField::new(&cfg, 400.0, 400.0, &mut SmallRng::seed_from_u64(42));
		let b = ParticleField::new(&cfg, 400.0, 400.0, &mut SmallRng::seed_from_u64(42));
		assert_eq!(a.particles, b.particles);
	}
}
