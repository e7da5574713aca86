//! Gato Luz entry point
//!
//! Browser host: canvas setup, input adapter, requestAnimationFrame loop,
//! HUD/overlay updates. Native builds get a headless smoke run.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use gato_luz::consts::*;
    use gato_luz::menu;
    use gato_luz::render::CanvasRenderer;
    use gato_luz::sim::{GamePhase, GameState, InputState, advance};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        rng: Pcg32,
        renderer: Option<CanvasRenderer>,
        /// Pending animation-frame handle, for cancellation on teardown
        raf_id: Option<i32>,
        running: bool,
    }

    impl Game {
        fn new(seed: u64, renderer: Option<CanvasRenderer>) -> Self {
            Self {
                state: GameState::new(),
                input: InputState::default(),
                rng: Pcg32::seed_from_u64(seed),
                renderer,
                raf_id: None,
                running: true,
            }
        }

        /// Stop the loop and cancel the pending frame so no timer leaks
        /// when the hosting view goes away.
        fn teardown(&mut self) {
            self.running = false;
            if let Some(id) = self.raf_id.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
            log::info!("game loop cancelled");
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gato Luz starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(GAME_WIDTH as u32);
        canvas.set_height(GAME_HEIGHT as u32);

        // Renderer may be absent if the context is unavailable; frames then
        // skip drawing but the loop still runs.
        let renderer = CanvasRenderer::new(&canvas);
        if renderer.is_none() {
            log::warn!("no 2d context available, running without rendering");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, renderer)));
        log::info!("session initialized with seed {seed}");

        setup_input_handlers(&canvas, game.clone());
        setup_overlay_buttons(&document, game.clone());
        setup_back_button(&document, game.clone());

        schedule_frame(game);

        log::info!("Gato Luz running!");
    }

    fn schedule_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let game_for_frame = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game_for_frame);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => game.borrow_mut().raf_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.raf_id = None;
            if !g.running {
                return;
            }

            let Game {
                state,
                input,
                rng,
                renderer,
                ..
            } = &mut *g;

            // One-shot confirm consumed before the tick; every controller
            // transition also disengages the action flag.
            if input.confirm {
                state.confirm(rng);
                input.scratching = false;
            }
            input.confirm = false;

            advance(state, input, rng);

            if let Some(renderer) = renderer {
                if let Err(e) = renderer.render(state) {
                    log::warn!("render error: {e:?}");
                }
            }

            update_hud(state);
        }

        schedule_frame(game);
    }

    /// Reflect the current state into the DOM overlay/HUD
    fn update_hud(state: &GameState) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(el) = document.get_element_by_id("hud-level") {
            el.set_text_content(Some(&state.level.to_string()));
        }
        if let Some(el) = document.get_element_by_id("progress-fill") {
            let _ = el.set_attribute("style", &format!("width: {:.1}%", state.display_percent()));
        }

        let overlays = [
            ("menu-overlay", GamePhase::Menu),
            ("level-complete-overlay", GamePhase::LevelComplete),
            ("game-over-overlay", GamePhase::GameOver),
        ];
        for (id, phase) in overlays {
            if let Some(el) = document.get_element_by_id(id) {
                let class = if state.phase == phase {
                    "overlay"
                } else {
                    "overlay hidden"
                };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    /// Normalize keyboard and pointer/touch input into the shared
    /// [`InputState`]. Engaging the action flag is gated to Playing; confirm
    /// in the other phases ignores key-repeat so a held key fires once.
    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Space: hold to scratch while Playing, single press to confirm
        // elsewhere
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() != " " {
                    return;
                }
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing {
                    g.input.scratching = true;
                } else if !event.repeat() {
                    g.input.confirm = true;
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == " " {
                    game.borrow_mut().input.scratching = false;
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Press-and-hold on the canvas
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing {
                    g.input.scratching = true;
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        for release_event in ["mouseup", "mouseleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.scratching = false;
            });
            let _ = canvas
                .add_event_listener_with_callback(release_event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing {
                    g.input.scratching = true;
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.scratching = false;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Losing focus releases the flag; holding space across a tab switch
        // must not keep scratching.
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.scratching = false;
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Overlay buttons fire the same one-shot confirm as the keyboard
    fn setup_overlay_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["start-btn", "retry-btn", "next-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().input.confirm = true;
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Inject the back-to-menu overlay and make sure leaving cancels the
    /// pending animation frame before navigation.
    fn setup_back_button(document: &Document, game: Rc<RefCell<Game>>) {
        match menu::inject_back_button(document) {
            Ok(button) => {
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().teardown();
                });
                let _ = button
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
            Err(e) => log::warn!("back button injection failed: {e:?}"),
        }
    }
}

/// The launchable-entries directory for the hosting menu shell
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn game_directory() -> String {
    gato_luz::menu::directory_json()
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gato Luz (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    headless_smoke_run();
}

/// Drive the sim without a canvas: scratch straight through level 1 with the
/// light parked out of reach, then confirm into level 2.
#[cfg(not(target_arch = "wasm32"))]
fn headless_smoke_run() {
    use gato_luz::sim::{GamePhase, GameState, InputState, advance};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    let mut rng = Pcg32::seed_from_u64(2024);
    let mut state = GameState::new();
    let mut input = InputState::default();

    state.start_game(&mut rng);
    state.lights[0].pos = Vec2::new(10.0, 10.0);
    state.lights[0].vel = Vec2::ZERO;

    let mut ticks = 0u32;
    while state.phase == GamePhase::Playing && ticks < 1000 {
        input.scratching = true;
        advance(&mut state, &mut input, &mut rng);
        ticks += 1;
    }

    assert_eq!(state.phase, GamePhase::LevelComplete);
    println!("✓ level 1 complete after {ticks} ticks (threshold {})", state.threshold);

    state.confirm(&mut rng);
    assert_eq!(state.level, 2);
    assert_eq!(state.lights.len(), 2);
    println!("✓ level 2 started with {} lights", state.lights.len());
}
