//! Yazım Makinesi core crate.
//!
//! A spinning-wheel spelling game for commonly misspelled Turkish words. The
//! game rules live in [`game`] and run on the host as well as in the browser;
//! [`shell`] wires them to a canvas, the DOM, Web Audio and `localStorage`.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod catalog;
pub mod config;
pub mod error;
pub mod game;
pub mod random;
mod shell;
pub mod spin;
pub mod storage;
pub mod wheel;

pub use catalog::{WORD_PAIRS, WordPair};
pub use config::{Burst, GameConfig};
pub use error::{ConfigError, PlatformError};
pub use game::{Effect, Game, GameSnapshot, Message, MessageTone, Outcome, Phase, PhaseKind};
pub use random::{RandomSource, SequenceRandom, SystemRandom};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // already-installed logger is fine on a second call
    console_log::init_with_level(log::Level::Info).ok();
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Build the game into the page and start the frame loop with default settings.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    shell::start(GameConfig::default())
}

/// Like [`start_game`], with a JSON object overriding any [`GameConfig`] field.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json)?;
    shell::start(config)
}

/// Current game state as JSON, or `undefined` before `start_game`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn game_state_json() -> Option<String> {
    shell::snapshot_json()
}

/// Milliseconds since page load.
pub(crate) fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
