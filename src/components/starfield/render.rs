//! Per-frame painting of the starfield.
//!
//! Paint order:
//! 1. Clear, then the vertical backdrop gradient
//! 2. Each star, drawn at its current position before it moves
//! 3. Horizon glow on top

use super::particles::ParticleField;
use super::surface::Surface;
use super::theme::Theme;

/// Draws one frame and advances every star by `steps` velocity increments.
///
/// Stars do not interact, so iteration order has no visual effect.
pub fn render_frame<S: Surface + ?Sized>(
	field: &mut ParticleField,
	surface: &mut S,
	theme: &Theme,
	steps: f64,
) {
	let (width, height) = (field.width(), field.height());

	surface.clear(width, height);
	surface.fill_vertical_gradient(width, height, &theme.background);

	for p in &mut field.particles {
		p.advance_phase(steps);
		let alpha = p.alpha() * theme.layer_opacity;
		surface.fill_circle(p.x, p.y, p.radius, theme.particle_color.with_alpha(alpha));
		p.advance_position(steps, width, height);
	}

	if let Some(glow) = &theme.glow {
		surface.fill_radial_glow(width, height, glow);
	}
}
