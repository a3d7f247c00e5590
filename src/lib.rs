//! retro-starfield: XP-era animated starfield background for the web.
//!
//! This crate provides a WASM canvas component that renders a drifting,
//! twinkling starfield behind page content, with named color presets and
//! automatic resizing.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::starfield::{
	Direction, MotionMode, Preset, StarCount, StarfieldBackground, StarfieldConfig,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("retro-starfield: logging initialized");
}

/// Load configuration from a script element with id="starfield-config".
/// Expected format: JSON object, see [`StarfieldConfig::from_json`].
fn load_config() -> Option<StarfieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("starfield-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match StarfieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"retro-starfield: loaded config ({:?}, {:?}, speed {})",
				config.count, config.direction, config.speed
			);
			Some(config)
		}
		Err(e) => {
			warn!("retro-starfield: ignoring starfield-config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads the starfield configuration from the DOM and renders it behind a
/// title overlay.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Retro Starfield" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<StarfieldBackground config=config />
		<main class="starfield-overlay" style="position: relative; z-index: 10;">
			<h1>"Welcome to my corner of the web"</h1>
			<p class="subtitle">"Best viewed at 1024x768."</p>
		</main>
	}
}
