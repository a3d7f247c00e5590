//! Leptos component wrapping the starfield canvas.
//!
//! The component creates a fixed, pointer-transparent canvas behind the page
//! and hands it to an [`AnimationLoop`], which drives the engine via
//! `requestAnimationFrame` and re-seeds it on window resize. Unmounting the
//! component cancels the pending frame and removes the resize listener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, Window};

use super::scale::Viewport;
use super::state::{FrameToken, StarfieldEngine};
use super::surface::{CanvasSurface, SurfaceError};
use super::types::StarfieldConfig;

type Engine = StarfieldEngine<CanvasSurface, SmallRng>;

/// State shared between the frame callback, the resize callback and the loop.
struct LoopShared {
	engine: RefCell<Engine>,
	/// Token of the frame the next callback will run.
	token: Cell<Option<FrameToken>>,
	/// Outstanding `requestAnimationFrame` id.
	handle: Cell<Option<i32>>,
	animate: RefCell<Option<Closure<dyn FnMut(f64)>>>,
	/// False when only a still frame is wanted.
	continuous: bool,
}

impl LoopShared {
	fn request_frame(&self) {
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Some(ref cb) = *self.animate.borrow() {
			self.handle
				.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	}
}

/// A running starfield attached to one canvas.
///
/// Owns the frame request and the resize subscription; [`AnimationLoop::stop`]
/// (or dropping the loop) releases both and tears the engine down.
pub struct AnimationLoop {
	shared: Rc<LoopShared>,
	resize_cb: Option<Closure<dyn FnMut()>>,
	window: Window,
}

impl AnimationLoop {
	/// Sizes `canvas` to the window, seeds the stars and schedules the first
	/// frame.
	pub fn start(canvas: HtmlCanvasElement, config: StarfieldConfig) -> Result<Self, SurfaceError> {
		let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
		let surface = CanvasSurface::new(canvas)?;
		let continuous = !(config.respect_reduced_motion && prefers_reduced_motion(&window));

		let mut engine = StarfieldEngine::new(config, SmallRng::seed_from_u64(host_seed()));
		let token = engine.start(Some(surface), Viewport::from_window(&window));

		let shared = Rc::new(LoopShared {
			engine: RefCell::new(engine),
			token: Cell::new(token),
			handle: Cell::new(None),
			animate: RefCell::new(None),
			continuous,
		});

		let shared_anim = shared.clone();
		*shared.animate.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			shared_anim.handle.set(None);
			let Some(token) = shared_anim.token.get() else {
				return;
			};
			let next = shared_anim.engine.borrow_mut().frame(token, timestamp);
			shared_anim.token.set(next);
			if next.is_some() && shared_anim.continuous {
				shared_anim.request_frame();
			}
		}));

		let shared_resize = shared.clone();
		let resize_cb: Closure<dyn FnMut()> = Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			shared_resize
				.engine
				.borrow_mut()
				.resize(Viewport::from_window(&win));
			if !shared_resize.continuous && shared_resize.handle.get().is_none() {
				shared_resize.request_frame();
			}
		});
		let _ = window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());

		shared.request_frame();
		if continuous {
			info!("retro-starfield: animation started");
		} else {
			info!("retro-starfield: reduced motion requested, rendering a still frame");
		}

		Ok(Self {
			shared,
			resize_cb: Some(resize_cb),
			window,
		})
	}

	/// Cancels the pending frame, unsubscribes from resize events and tears
	/// the engine down. Safe to call more than once.
	pub fn stop(&mut self) {
		if let Some(handle) = self.shared.handle.take() {
			let _ = self.window.cancel_animation_frame(handle);
		}
		if let Some(cb) = self.resize_cb.take() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		self.shared.token.set(None);
		if self.shared.engine.borrow_mut().stop() {
			debug!("retro-starfield: animation stopped");
		}
		// Breaks the closure's reference back to `shared`.
		self.shared.animate.borrow_mut().take();
	}
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		self.stop();
	}
}

fn prefers_reduced_motion(window: &Window) -> bool {
	window
		.match_media("(prefers-reduced-motion: reduce)")
		.ok()
		.flatten()
		.is_some_and(|mql| mql.matches())
}

/// Seed for the star layout; varies per page load.
fn host_seed() -> u64 {
	let entropy = (js_sys::Math::random() * u32::MAX as f64) as u64;
	(entropy << 32) ^ js_sys::Date::now() as u64
}

/// Renders the animated starfield as a fixed background layer.
///
/// Without a `config` the default XP look is used. Place page content after
/// the component with a higher `z-index`.
#[component]
pub fn StarfieldBackground(
	/// Look and motion; invalid values fall back to the defaults.
	#[prop(optional)]
	config: Option<StarfieldConfig>,
	/// Extra classes for the wrapper element.
	#[prop(optional, into)]
	class: Option<String>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let config = config.unwrap_or_default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		match AnimationLoop::start(canvas, config.clone()) {
			Ok(animation) => {
				let animation = SendWrapper::new(animation);
				on_cleanup(move || animation.take().stop());
			}
			Err(e) => warn!("retro-starfield: not rendering: {}", e),
		}
	});

	let class = match class {
		Some(extra) => format!("starfield-background {extra}"),
		None => "starfield-background".to_string(),
	};

	view! {
		<div
			class=class
			aria-hidden="true"
			style="position: fixed; inset: 0; pointer-events: none; z-index: 0;"
		>
			<canvas
				node_ref=canvas_ref
				class="starfield-canvas"
				style="position: absolute; inset: 0; display: block; image-rendering: pixelated;"
			/>
		</div>
	}
}
