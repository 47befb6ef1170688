//! Browser shell: builds the page, feeds input into the [`Game`], runs the
//! `requestAnimationFrame` loop and executes queued [`Effect`]s.
//!
//! All state lives in one thread-local [`App`]. Event listeners and the frame
//! callback borrow it in turn; JS never re-enters Rust while a borrow is held.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, window};

use crate::audio::{Sfx, WebAudioTones};
use crate::config::{Burst, GameConfig};
use crate::error::PlatformError;
use crate::game::{Effect, Game};
use crate::random::SystemRandom;
use crate::storage::{self, KeyValueStore, LocalStore, MemoryStore};
use crate::wheel::{self, WheelGeometry};

pub mod view;

use view::Action;

#[wasm_bindgen]
extern "C" {
    // canvas-confetti style global; optional on the page
    #[wasm_bindgen(catch, js_name = confetti)]
    fn confetti_js(options: &JsValue) -> Result<JsValue, JsValue>;
}

struct App {
    game: Game<SystemRandom>,
    sfx: Sfx<WebAudioTones>,
    store: Box<dyn KeyValueStore>,
    doc: Document,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    geometry: WheelGeometry,
    // Last markup written per element id; the DOM is only touched on change so
    // buttons under the cursor survive between frames.
    rendered: HashMap<&'static str, String>,
    drawn_highlight: Option<Option<usize>>,
    drawn_rotation: Option<f64>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

pub fn start(config: GameConfig) -> Result<(), JsValue> {
    config.validate()?;
    if APP.with(|cell| cell.borrow().is_some()) {
        log::warn!("game already running; ignoring second start");
        return Ok(());
    }

    let win = window().ok_or(PlatformError::NoWindow)?;
    let doc = win.document().ok_or(PlatformError::NoDocument)?;

    // Create / reuse the root container
    let root: Element = match doc.get_element_by_id(view::ROOT_ID) {
        Some(el) => el,
        None => {
            let el = doc.create_element("div")?;
            el.set_id(view::ROOT_ID);
            let body = doc.body().ok_or(PlatformError::NoDocument)?;
            body.set_attribute("style", view::BODY_STYLE).ok();
            body.append_child(&el)?;
            el
        }
    };
    root.set_attribute("style", view::ROOT_STYLE).ok();
    root.set_inner_html(&view::skeleton_html(config.wheel_size_px));

    let canvas: HtmlCanvasElement = doc
        .get_element_by_id(view::CANVAS_ID)
        .ok_or_else(|| JsValue::from_str("wheel canvas missing"))?
        .dyn_into()?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let store: Box<dyn KeyValueStore> = match LocalStore::open() {
        Ok(s) => Box::new(s),
        Err(err) => {
            log::warn!("high score will not persist: {}", err);
            Box::new(MemoryStore::new())
        }
    };
    let high_score = storage::load_high_score(store.as_ref());
    log::info!("starting, best score so far {}", high_score);

    let geometry = WheelGeometry::for_canvas(config.wheel_size_px, config.segments);
    let app = App {
        game: Game::new(config, high_score, SystemRandom::new()),
        sfx: Sfx::new(WebAudioTones::new()),
        store,
        doc: doc.clone(),
        canvas,
        ctx,
        geometry,
        rendered: HashMap::new(),
        drawn_highlight: None,
        drawn_rotation: None,
    };
    APP.with(|cell| cell.replace(Some(app)));

    // Single delegated click listener for every button in the shell
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let Some(target) = evt.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Ok(Some(button)) = target.closest("[data-action]") else {
                return;
            };
            let action = button.get_attribute("data-action").unwrap_or_default();
            let choice = button.get_attribute("data-choice");
            if let Some(action) = Action::from_attrs(&action, choice.as_deref()) {
                dispatch(action);
            }
        }) as Box<dyn FnMut(_)>);
        root.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Keyboard shortcuts
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if evt.repeat() || evt.ctrl_key() || evt.meta_key() || evt.alt_key() {
                return;
            }
            let tag = evt
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map(|el| el.tag_name())
                .unwrap_or_default();
            if let Some(action) = Action::from_key_on(&evt.key(), &tag) {
                // keeps Space from scrolling the page
                evt.prevent_default();
                dispatch(action);
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_loop();
    Ok(())
}

fn dispatch(action: Action) {
    let now = crate::performance_now();
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            let accepted = match action {
                Action::Spin => app.game.spin(now),
                Action::Choose(slot) => app.game.answer_slot(slot, now),
                Action::Reset => {
                    app.game.reset();
                    true
                }
                Action::ToggleSound => {
                    let on = app.sfx.toggle();
                    log::debug!("sound {}", if on { "on" } else { "off" });
                    true
                }
            };
            if !accepted {
                log::debug!("ignored {:?} in phase {}", action, app.game.phase_kind().as_str());
            }
            // still inside the gesture, where browsers allow audio to start
            app.sfx.wake();
            run_effects(app);
            render(app);
        }
    });
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        APP.with(|cell| {
            if let Some(app) = cell.borrow_mut().as_mut() {
                frame(app, ts);
            }
        });
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(f: &FrameCallback) {
    if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn frame(app: &mut App, now: f64) {
    app.game.tick(now);
    run_effects(app);
    render(app);
}

fn run_effects(app: &mut App) {
    for effect in app.game.drain_effects() {
        match effect {
            Effect::Sound(sound) => app.sfx.play(sound),
            Effect::Celebrate(burst) => celebrate(&burst),
            Effect::SaveHighScore(score) => storage::save_high_score(app.store.as_mut(), score),
        }
    }
}

fn celebrate(burst: &Burst) {
    let opts = js_sys::Object::new();
    let origin = js_sys::Object::new();
    let set = |obj: &js_sys::Object, key: &str, value: JsValue| {
        let _ = js_sys::Reflect::set(obj, &JsValue::from_str(key), &value);
    };
    set(&origin, "y", JsValue::from_f64(burst.origin_y));
    set(&opts, "particleCount", JsValue::from_f64(burst.particle_count as f64));
    set(&opts, "spread", JsValue::from_f64(burst.spread_deg));
    set(&opts, "origin", origin.into());
    if let Err(err) = confetti_js(&opts) {
        log::debug!("confetti unavailable: {:?}", err);
    }
}

fn render(app: &mut App) {
    let snap = app.game.snapshot();

    if app.drawn_highlight != Some(snap.highlighted_segment) {
        wheel::draw_wheel(&app.ctx, &app.geometry, snap.highlighted_segment);
        app.drawn_highlight = Some(snap.highlighted_segment);
    }
    if app.drawn_rotation != Some(snap.rotation) {
        app.canvas
            .set_attribute("style", &view::rotation_style(snap.rotation))
            .ok();
        app.drawn_rotation = Some(snap.rotation);
    }

    let max_lives = app.game.config().max_lives;
    let regions = [
        (view::SOUND_ID, view::sound_html(app.sfx.is_enabled())),
        (view::HEARTS_ID, view::hearts_html(snap.lives, max_lives)),
        (view::TIMER_ID, view::timer_html(snap.time_left)),
        (view::CONTROLS_ID, view::controls_html(&snap)),
        (view::MESSAGE_ID, view::message_html(&snap)),
        (view::SCORE_ID, view::score_html(snap.score)),
        (view::BEST_ID, view::best_html(snap.high_score)),
        (view::RESET_ID, view::reset_html(app.game.is_game_over())),
        (view::OVERLAY_ID, view::overlay_html(&snap)),
    ];
    for (id, html) in regions {
        if app.rendered.get(id) == Some(&html) {
            continue;
        }
        if let Some(el) = app.doc.get_element_by_id(id) {
            el.set_inner_html(&html);
        }
        app.rendered.insert(id, html);
    }
}

/// Current state as JSON, for debugging from the browser console.
#[cfg(feature = "serde_json")]
pub fn snapshot_json() -> Option<String> {
    APP.with(|cell| {
        cell.borrow()
            .as_ref()
            .and_then(|app| serde_json::to_string(&app.game.snapshot()).ok())
    })
}
