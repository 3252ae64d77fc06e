//! Formula Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! embedding page owns the 3D scene; this shell owns the simulation, the
//! input wiring and the DOM HUD.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, KeyboardEvent, MouseEvent, TouchEvent};

    use formula_rush::audio::{AudioManager, SoundEffect};
    use formula_rush::consts::*;
    use formula_rush::sim::{Session, TickInput, tick};
    use formula_rush::{JoystickPosition, Settings};

    /// Minimum swipe distance in px before a touch counts as a control
    const MIN_SWIPE_DISTANCE: f32 = 30.0;
    /// Virtual joystick knob throw in px
    const JOYSTICK_RADIUS: f32 = 60.0;

    /// Game instance holding all state
    struct Game {
        session: Option<Session>,
        input: TickInput,
        accumulator: f32,
        last_time: f64,
        settings: Settings,
        audio: AudioManager,
        // Swipe tracking
        touch_start: (f32, f32),
        touch_active: bool,
        // Edge detection for sound cues
        was_crashed: bool,
        was_game_over: bool,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_muted(!settings.sound);
            Self {
                session: None,
                input: TickInput::default(),
                accumulator: 0.0,
                last_time: 0.0,
                settings,
                audio,
                touch_start: (0.0, 0.0),
                touch_active: false,
                was_crashed: false,
                was_game_over: false,
            }
        }

        fn start_session(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.session = Some(Session::new(seed));
            self.input = TickInput::default();
            self.accumulator = 0.0;
            self.was_crashed = false;
            self.was_game_over = false;
            // Browsers gate audio on a user gesture; the start click is one
            self.audio.resume();
        }

        /// Dropping the session cancels its pending timers and discards the
        /// particle pool and obstacle field in one move
        fn stop_session(&mut self) {
            self.session = None;
            self.input = TickInput::default();
            log::info!("session stopped");
        }

        /// Run simulation ticks; returns true while a session is live
        fn update(&mut self, dt: f32) -> bool {
            let input = self.input;
            let Some(session) = self.session.as_mut() else {
                return false;
            };

            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut collided = false;
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(session, &input);
                collided |= session.collision_pulse;
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            // Sound cues on state edges
            if collided {
                self.audio.play(SoundEffect::Crash);
            }
            if session.game_over() && !self.was_game_over {
                self.audio.play(SoundEffect::GameOver);
            } else if self.was_crashed && !session.crashed() && !session.game_over() {
                self.audio.play(SoundEffect::Repair);
            }
            self.was_crashed = session.crashed();
            self.was_game_over = session.game_over();

            if session.finished {
                self.stop_session();
                return false;
            }
            true
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let Some(session) = &self.session else { return };
            let frame = session.frame();

            // Health hearts
            if let Some(el) = document.get_element_by_id("health") {
                let hearts: String = (0..STARTING_HEALTH)
                    .map(|i| if i < frame.health { '\u{2665}' } else { '\u{2661}' })
                    .collect();
                el.set_text_content(Some(&hearts));
            }

            // Speedometer with speed-band coloring
            if let Some(el) = document.get_element_by_id("speedometer") {
                let kmh = (frame.speed * SPEED_DISPLAY_SCALE).round() as u32;
                el.set_text_content(Some(&format!("Speed: {kmh} km/h")));
                let class = if kmh > 25 {
                    "speedometer speed-high"
                } else if kmh > 10 {
                    "speedometer speed-mid"
                } else {
                    "speedometer"
                };
                let _ = el.set_attribute("class", class);
            }

            // Crash indicator (2 second window driven by the sim)
            if let Some(el) = document.get_element_by_id("crash-indicator") {
                let _ = el.set_attribute(
                    "class",
                    if frame.collision_flash { "" } else { "hidden" },
                );
            }

            // Game over screen
            if let Some(el) = document.get_element_by_id("game-over") {
                let _ =
                    el.set_attribute("class", if frame.game_over { "" } else { "hidden" });
            }

            // Screen shake on impact (skipped under reduced motion)
            if let Some(body) = document.body() {
                let shaking = frame.collision_flash && !self.settings.reduced_motion;
                let _ = if shaking {
                    body.class_list().add_1("shake")
                } else {
                    body.class_list().remove_1("shake")
                };
            }
        }
    }

    fn document() -> Document {
        web_sys::window()
            .expect("no window")
            .document()
            .expect("no document")
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Formula Rush starting...");

        let document = document();

        // Hide loading indicator
        set_hidden(&document, "loading", true);

        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(settings)));

        // Place the virtual joystick where the player left it
        if let Some(el) = document.get_element_by_id("virtual-controls") {
            let position = game.borrow().settings.joystick_position;
            let _ = el.set_attribute("class", position.as_str());
        }

        setup_keyboard(game.clone());
        setup_touch(game.clone());
        setup_joystick(game.clone());
        setup_session_buttons(game.clone());
        setup_joystick_position_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Formula Rush running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let keyboard = &mut g.input.keyboard;
                match event.key().to_lowercase().as_str() {
                    "w" | "arrowup" => keyboard.accelerate = true,
                    "s" | "arrowdown" => keyboard.brake = true,
                    "a" | "arrowleft" => keyboard.steer_left = true,
                    "d" | "arrowright" => keyboard.steer_right = true,
                    " " => keyboard.handbrake = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let keyboard = &mut g.input.keyboard;
                match event.key().to_lowercase().as_str() {
                    "w" | "arrowup" => keyboard.accelerate = false,
                    "s" | "arrowdown" => keyboard.brake = false,
                    "a" | "arrowleft" => keyboard.steer_left = false,
                    "d" | "arrowright" => keyboard.steer_right = false,
                    " " => keyboard.handbrake = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Swipe controls: vertical swipes throttle/brake, horizontal swipes steer
    fn setup_touch(game: Rc<RefCell<Game>>) {
        let document = document();
        let Some(container) = document.get_element_by_id("game-container") else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    g.touch_start = (touch.client_x() as f32, touch.client_y() as f32);
                    g.touch_active = true;
                }
            });
            let _ = container
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                if !g.touch_active {
                    return;
                }
                event.prevent_default();

                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                let dx = touch.client_x() as f32 - g.touch_start.0;
                let dy = touch.client_y() as f32 - g.touch_start.1;

                let touch_input = &mut g.input.touch;
                *touch_input = Default::default();

                if dy.abs() > dx.abs() {
                    // Vertical swipe: up accelerates, down brakes
                    if dy < -MIN_SWIPE_DISTANCE {
                        touch_input.accelerate = true;
                    } else if dy > MIN_SWIPE_DISTANCE {
                        touch_input.brake = true;
                    }
                } else if dx < -MIN_SWIPE_DISTANCE {
                    touch_input.steer_left = true;
                } else if dx > MIN_SWIPE_DISTANCE {
                    touch_input.steer_right = true;
                }
            });
            let _ = container
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                let mut g = game.borrow_mut();
                g.touch_active = false;
                g.input.touch = Default::default();
            });
            let _ = container
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Virtual joystick: deflection from the pad center, normalized to the
    /// knob throw; the sim applies the deadzone
    fn setup_joystick(game: Rc<RefCell<Game>>) {
        let document = document();
        let Some(pad) = document.get_element_by_id("joystick") else {
            return;
        };

        fn deflection(pad: &Element, touch: &web_sys::Touch) -> (f32, f32) {
            let rect = pad.get_bounding_client_rect();
            let center_x = rect.left() as f32 + rect.width() as f32 / 2.0;
            let center_y = rect.top() as f32 + rect.height() as f32 / 2.0;
            let x = (touch.client_x() as f32 - center_x) / JOYSTICK_RADIUS;
            let y = (touch.client_y() as f32 - center_y) / JOYSTICK_RADIUS;
            (x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0))
        }

        for event_name in ["touchstart", "touchmove"] {
            let game = game.clone();
            let pad_clone = pad.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let (x, y) = deflection(&pad_clone, &touch);
                    let mut g = game.borrow_mut();
                    g.input.joystick.active = true;
                    g.input.joystick.x = x;
                    g.input.joystick.y = y;
                }
            });
            let _ = pad
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for event_name in ["touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.joystick = Default::default();
            });
            let _ = pad
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_session_buttons(game: Rc<RefCell<Game>>) {
        let document = document();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().start_session();
                let document = self::document();
                set_hidden(&document, "menu", true);
                set_hidden(&document, "hud", false);
                set_hidden(&document, "game-over", true);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("back-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().stop_session();
                let document = self::document();
                set_hidden(&document, "menu", false);
                set_hidden(&document, "hud", true);
                set_hidden(&document, "game-over", true);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Joystick placement choices on the menu; persisted across reloads
    fn setup_joystick_position_buttons(game: Rc<RefCell<Game>>) {
        let document = document();

        let options = [
            ("pos-bottom-left", JoystickPosition::BottomLeft),
            ("pos-bottom-center", JoystickPosition::BottomCenter),
            ("pos-bottom-right", JoystickPosition::BottomRight),
        ];

        for (id, position) in options {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.settings.joystick_position = position;
                g.settings.save();

                let document = self::document();
                if let Some(el) = document.get_element_by_id("virtual-controls") {
                    let _ = el.set_attribute("class", position.as_str());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            let document = document();
            let session_ended = !g.update(dt) && g.was_game_over;
            g.update_hud(&document);

            // The game-over exit timer fired: back to the menu
            if session_ended {
                g.was_game_over = false;
                set_hidden(&document, "menu", false);
                set_hidden(&document, "hud", true);
                set_hidden(&document, "game-over", true);
            }
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
    env_logger::init();
    log::info!("Formula Rush (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Smoke run: full throttle into the obstacle field for a simulated minute
    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use formula_rush::sim::{KeyboardState, Session, TickInput, tick};

    let mut session = Session::new(42);
    let input = TickInput {
        keyboard: KeyboardState {
            accelerate: true,
            steer_right: true,
            ..Default::default()
        },
        ..Default::default()
    };

    for _ in 0..3600 {
        tick(&mut session, &input);
        if session.finished {
            break;
        }
    }

    let frame = session.frame();
    println!(
        "after {} ticks: pos=({:.1}, {:.1}) speed={:.2} health={} crashed={} game_over={}",
        session.time_ticks,
        frame.position.x,
        frame.position.y,
        frame.speed,
        frame.health,
        frame.crashed,
        frame.game_over,
    );
}
