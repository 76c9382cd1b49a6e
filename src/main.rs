//! Pendulum Master entry point
//!
//! Handles platform-specific initialization and runs the frame loop. All
//! simulation logic lives in the library; this file only wires DOM controls
//! to session commands and session snapshots to the canvas/HUD.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement};

    use pendulum_master::consts::IMPULSE_DELTA;
    use pendulum_master::render::CanvasRenderer;
    use pendulum_master::settings::Settings;
    use pendulum_master::sim::{CommandInput, GamePhase, Session};

    /// Application state: one session plus the render/input plumbing.
    struct Game {
        settings: Settings,
        session: Session,
        renderer: CanvasRenderer,
        input: CommandInput,
        last_raf: Option<f64>,
        last_phase: GamePhase,
    }

    impl Game {
        fn new(settings: Settings, renderer: CanvasRenderer) -> Self {
            let (params, challenge, theta0) = settings
                .validate()
                .expect("stored settings are validated at load time");
            Self {
                settings,
                session: Session::new(params, challenge, theta0),
                renderer,
                input: CommandInput::default(),
                last_raf: None,
                last_phase: GamePhase::NotStarted,
            }
        }

        /// Rebuild the session from the current settings (on Reset).
        fn rebuild_session(&mut self) -> Result<(), String> {
            match self.settings.validate() {
                Ok((params, challenge, theta0)) => {
                    self.session = Session::new(params, challenge, theta0);
                    self.last_phase = GamePhase::NotStarted;
                    Ok(())
                }
                Err(e) => {
                    log::error!("rejected configuration: {e}");
                    Err(e.to_string())
                }
            }
        }

        /// One animation frame: drain commands, advance, draw, refresh HUD.
        fn frame(&mut self, ts_ms: f64) {
            let frame_dt = match self.last_raf {
                Some(last) => (ts_ms - last) / 1000.0,
                None => 0.0,
            };
            self.last_raf = Some(ts_ms);

            let input = std::mem::take(&mut self.input);
            self.session.apply(&input);
            self.session.advance(frame_dt);

            let snapshot = self.session.snapshot();
            self.renderer.draw(&snapshot, self.session.params().length);
            self.update_hud(&snapshot);

            // Buzz once on the success transition.
            if self.last_phase != snapshot.phase {
                if let GamePhase::Finished(outcome) = snapshot.phase {
                    if outcome.success {
                        if let Some(window) = web_sys::window() {
                            let _ = window.navigator().vibrate_with_duration(150);
                        }
                    }
                }
                self.last_phase = snapshot.phase;
            }
        }

        fn update_hud(&self, snapshot: &pendulum_master::sim::Snapshot) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            set_text(&document, "time", &format!("{:.2}", snapshot.t));
            set_text(&document, "thetaDeg", &format!("{:.1}", snapshot.theta_deg));
            set_text(&document, "omegaVal", &format!("{:.3}", snapshot.omega));
            set_text(&document, "osc-count", &snapshot.oscillations.to_string());

            let message = match snapshot.phase {
                GamePhase::NotStarted => "Press Start",
                GamePhase::Running => "Running...",
                GamePhase::Paused => "Paused",
                GamePhase::Finished(outcome) => {
                    if outcome.success {
                        "Success! Target reached."
                    } else {
                        "Target not reached."
                    }
                }
            };
            set_text(&document, "message", message);

            if let Some(input) = input_element(&document, "finalCode") {
                input.set_value(snapshot.code.as_deref().unwrap_or(""));
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn input_element(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn slider_value(document: &Document, id: &str) -> Option<f64> {
        input_element(document, id)?.value().parse().ok()
    }

    /// Pull the slider values into `settings` and refresh their labels.
    fn read_sliders(document: &Document, settings: &mut Settings) {
        if let Some(v) = slider_value(document, "L") {
            settings.length = v;
        }
        if let Some(v) = slider_value(document, "theta0") {
            settings.initial_angle_deg = v;
        }
        if let Some(v) = slider_value(document, "b") {
            settings.damping = v;
        }
        if let Some(v) = slider_value(document, "g") {
            settings.gravity = v;
        }

        set_text(document, "Lval", &format!("{:.2}", settings.length));
        set_text(
            document,
            "theta0val",
            &format!("{:.0}", settings.initial_angle_deg),
        );
        set_text(document, "bval", &format!("{:.3}", settings.damping));
        set_text(document, "gval", &format!("{:.2}", settings.gravity));
    }

    fn setup_sliders(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["L", "theta0", "b", "g"] {
            let Some(slider) = input_element(document, id) else {
                log::warn!("slider #{id} not found");
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let document = web_sys::window().unwrap().document().unwrap();
                let mut g = game.borrow_mut();
                read_sliders(&document, &mut g.settings);
                // Takes effect at the next Reset; persisted immediately.
                g.settings.save();
            });
            let _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        on_click(document, "startBtn", {
            let game = game.clone();
            move || game.borrow_mut().input.start = true
        });
        on_click(document, "pauseBtn", {
            let game = game.clone();
            move || game.borrow_mut().input.pause = true
        });
        on_click(document, "resetBtn", {
            let game = game.clone();
            move || {
                let document = web_sys::window().unwrap().document().unwrap();
                let mut g = game.borrow_mut();
                read_sliders(&document, &mut g.settings);
                if let Err(msg) = g.rebuild_session() {
                    set_text(&document, "message", &msg);
                }
            }
        });
        on_click(document, "impulseBtn", {
            let game = game.clone();
            move || game.borrow_mut().input.impulse = Some(IMPULSE_DELTA)
        });
        on_click(document, "copyBtn", || {
            let document = web_sys::window().unwrap().document().unwrap();
            if let Some(input) = input_element(&document, "finalCode") {
                input.select();
                let _ = document.exec_command("copy");
            }
        });
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("button #{id} not found");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.session.phase() == GamePhase::Running {
                        g.input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.session.phase() == GamePhase::Running {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let dpr = window_clone.device_pixel_ratio();
            game.borrow_mut().renderer.resize(&canvas, dpr);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pendulum Master starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let mut renderer = CanvasRenderer::new(&canvas).expect("2d context unavailable");
        renderer.resize(&canvas, window.device_pixel_ratio());

        let mut settings = Settings::load();
        read_sliders(&document, &mut settings);
        if let Err(e) = settings.validate() {
            log::warn!("initial slider values invalid ({e}), using defaults");
            settings = Settings::default();
        }
        let game = Rc::new(RefCell::new(Game::new(settings, renderer)));

        setup_sliders(&document, game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(&document, game.clone());
        setup_resize(canvas, game.clone());

        // requestAnimationFrame loop; the closure re-arms itself each frame.
        let raf_closure: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
            Rc::new(RefCell::new(None));
        let raf_starter = raf_closure.clone();
        *raf_starter.borrow_mut() = Some(Closure::new(move |ts: f64| {
            game.borrow_mut().frame(ts);
            let window = web_sys::window().unwrap();
            let _ = window.request_animation_frame(
                raf_closure.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
            );
        }));
        let _ = window.request_animation_frame(
            raf_starter.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
        );
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pendulum_master::consts::SIM_DT;
    use pendulum_master::settings::Settings;
    use pendulum_master::sim::{CommandInput, GamePhase, Session};

    env_logger::init();
    log::info!("Pendulum Master (native) starting headless demo run...");

    let settings = Settings::load();
    let (params, challenge, theta0) = settings.validate().expect("default settings are valid");
    let mut session = Session::new(params, challenge, theta0);

    session.apply(&CommandInput {
        start: true,
        ..CommandInput::default()
    });

    // Synthetic 16 ms frames until the run ends.
    loop {
        session.advance(SIM_DT);
        if let GamePhase::Finished(outcome) = session.phase() {
            let snapshot = session.snapshot();
            log::info!(
                "finished at t={:.2}s: {} ({:?}), {} oscillations, code {}",
                snapshot.t,
                if outcome.success { "success" } else { "failure" },
                outcome.reason,
                snapshot.oscillations,
                snapshot.code.as_deref().unwrap_or("-"),
            );
            break;
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
