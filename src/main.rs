//! Tile Runner entry point
//!
//! Handles platform-specific initialization and drives the per-frame loop.
//! The browser build ticks the simulation once per animation frame and maps
//! sim events onto audio and HUD updates; the native build runs a headless
//! demo session for quick balance checks.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent, TouchEvent};

    use tilerunner::audio::{AudioManager, SoundEffect};
    use tilerunner::sim::{death_message, tick, GamePhase, GameState, TickInput};
    use tilerunner::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        tuning: Tuning,
        settings: Settings,
        audio: AudioManager,
        input: TickInput,
        last_frame_time: f64,
        fps: f64,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let tuning = Tuning::default();
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            Self {
                state: GameState::new(seed, &tuning),
                tuning,
                settings,
                audio,
                input: TickInput::default(),
                last_frame_time: 0.0,
                fps: 0.0,
            }
        }

        /// Smoothed frames-per-second from the rAF timestamps
        fn update_fps(&mut self, time: f64) {
            if self.last_frame_time > 0.0 {
                let dt = time - self.last_frame_time;
                if dt > 0.0 {
                    self.fps = self.fps * 0.95 + (1000.0 / dt) * 0.05;
                }
            }
            self.last_frame_time = time;
        }

        /// One animation frame: a single tick, then flush events to the host
        fn frame(&mut self) {
            let input = self.input;
            tick(&mut self.state, &input, &self.tuning);
            // Activate is a one-shot event, not a held flag
            self.input.activate = false;

            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::from_event(event) {
                    self.audio.play(effect);
                }
            }
        }

        /// Update HUD elements in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("message") {
                match self.state.phase {
                    GamePhase::Ready => {
                        el.set_text_content(Some("Tap to run"));
                        let _ = el.set_attribute("class", "");
                    }
                    GamePhase::Running => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                    GamePhase::Dead => {
                        el.set_text_content(Some(death_message(self.state.score)));
                        let _ = el.set_attribute("class", "");
                    }
                }
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    el.set_text_content(Some(&format!("{:.0} fps", self.fps)));
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Day/night crossfade on the background layer
            if !self.settings.reduced_motion {
                if let Some(el) = document.get_element_by_id("bg-night") {
                    let _ = el
                        .set_attribute("style", &format!("opacity: {}", self.state.night_blend));
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("init logger");

        let seed = js_sys::Date::now() as u64;
        log::info!("Tile Runner starting with seed {seed}");

        let game = Rc::new(RefCell::new(Game::new(seed)));

        setup_input(game.clone());
        setup_mute_on_blur(game.clone());
        request_animation_frame(game);
    }

    /// Wire the single "activate" input: click, touch-start, spacebar.
    /// Handlers only set a flag; all mutation happens inside the tick.
    fn setup_input(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.activate = true;
                g.audio.resume();
            });
            let _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                let mut g = game.borrow_mut();
                g.input.activate = true;
                g.audio.resume();
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        let mut g = game.borrow_mut();
                        g.input.activate = true;
                        g.audio.resume();
                    }
                    "KeyF" => {
                        let mut g = game.borrow_mut();
                        g.settings.show_fps = !g.settings.show_fps;
                        g.settings.save();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_mute_on_blur(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// One tick per display refresh; dropping the reschedule stops the loop
    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.frame();
            g.update_fps(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use tilerunner::sim::{death_message, tick, GamePhase, GameState, TickInput};
    use tilerunner::Tuning;

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);
    let tuning = Tuning::default();

    log::info!("Tile Runner headless demo, seed {seed}");

    let mut state = GameState::new(seed, &tuning);
    tick(&mut state, &TickInput { activate: true }, &tuning);

    // Hop at a fixed cadence and see how far the run gets
    let mut ticks = 0u64;
    while state.phase == GamePhase::Running && ticks < 100_000 {
        let input = TickInput {
            activate: ticks % 45 == 0,
        };
        tick(&mut state, &input, &tuning);
        state.drain_events();
        ticks += 1;
    }

    println!(
        "Survived {} ticks at difficulty {} with score {}",
        state.loop_count, state.difficulty, state.score
    );
    println!("{}", death_message(state.score));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main; this only satisfies the compiler
}
