//! Strafe Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use strafe_run::config::GameConfig;
    use strafe_run::platform::{Hud, Session};
    use strafe_run::renderer::RenderState;

    type Game = Session<RenderState, DomHud>;

    /// Score, lives and game-over panel in the page
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let classes = el.class_list();
                let _ = if hidden {
                    classes.add_1("hidden")
                } else {
                    classes.remove_1("hidden")
                };
            }
        }
    }

    impl Hud for DomHud {
        fn set_stats(&mut self, score: u64, lives: i32) {
            self.set_text("score", &score.to_string());
            self.set_text("lives", &lives.to_string());
        }

        fn show_game_over(&mut self, final_score: u64) {
            self.set_text("finalScore", &final_score.to_string());
            self.set_hidden("gameOver", false);
        }

        fn hide_game_over(&mut self) {
            self.set_hidden("gameOver", true);
        }
    }

    /// Config JSON may be embedded in the canvas `data-config` attribute
    fn read_config(canvas: &HtmlCanvasElement) -> GameConfig {
        let Some(json) = canvas.get_attribute("data-config") else {
            return GameConfig::default();
        };
        match GameConfig::from_json(&json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring canvas config: {}", e);
                GameConfig::default()
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Strafe Run starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let config = read_config(&canvas);

        // The drawing buffer matches the field; CSS may scale the element
        let width = config.field.width as u32;
        let height = config.field.height as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = match RenderState::new(surface, &adapter, width, height, config.field).await
        {
            Ok(state) => state,
            Err(e) => {
                log::error!("Failed to create renderer: {}", e);
                return;
            }
        };

        let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let hud = DomHud {
            document: document.clone(),
        };
        let game = Rc::new(RefCell::new(Session::new(&config, seed, render_state, hud)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());

        request_animation_frame(game);

        log::info!("Strafe Run running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                // Keep arrows and space from scrolling the page
                if code.starts_with("Arrow") || code == "Space" {
                    event.prevent_default();
                }
                game.borrow_mut().key_down(&code);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (click outside) - releases will not arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().blur();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = game.borrow_mut().frame(time);
        if keep_going {
            request_animation_frame(game);
        } else {
            log::info!("Frame loop stopped");
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let was_over = {
                    let mut g = game.borrow_mut();
                    let was_over = !g.world().is_running();
                    g.restart();
                    was_over
                };
                log::info!("Game restarted");
                // A running loop is still scheduled
                if was_over {
                    request_animation_frame(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;

    use strafe_run::config::GameConfig;
    use strafe_run::platform::{LogHud, Session};
    use strafe_run::renderer::{RenderSink, Scene, shapes};
    use strafe_run::sim::GamePhase;

    /// Tessellates every frame without a surface and keeps totals
    #[derive(Default)]
    struct CountingSink {
        frames: u64,
        vertices: u64,
    }

    impl RenderSink for CountingSink {
        fn present(&mut self, scene: &Scene) {
            self.frames += 1;
            self.vertices += shapes::tessellate(scene).len() as u64;
        }
    }

    #[derive(Debug, Serialize)]
    struct RunSummary {
        seed: u64,
        ticks: u64,
        score: u64,
        lives: i32,
        phase: GamePhase,
        frames_rendered: u64,
        avg_vertices_per_frame: u64,
    }

    /// Hold fire and sweep up and down, switching every two seconds
    fn autopilot<R: RenderSink, H: strafe_run::platform::Hud>(game: &mut Session<R, H>, tick: u64) {
        game.key_down("Space");
        if (tick / 120) % 2 == 0 {
            game.key_up("ArrowDown");
            game.key_down("ArrowUp");
        } else {
            game.key_up("ArrowUp");
            game.key_down("ArrowDown");
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let config = match std::env::args().nth(1) {
            Some(path) => GameConfig::load(std::path::Path::new(&path))?,
            None => GameConfig::default(),
        };

        let seed = config.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        let mut game = Session::new(&config, seed, CountingSink::default(), LogHud);

        let frame_ms = 1000.0 / 60.0;
        let mut tick = 0;
        while tick < config.headless.max_ticks {
            if config.headless.autopilot {
                autopilot(&mut game, tick);
            }
            let running = game.frame(tick as f64 * frame_ms);
            tick += 1;
            if !running {
                break;
            }
        }

        let world = game.world();
        let sink = game.renderer();
        let summary = RunSummary {
            seed,
            ticks: world.time_ticks,
            score: world.score,
            lives: world.display_lives(),
            phase: world.phase,
            frames_rendered: sink.frames,
            avg_vertices_per_frame: sink.vertices.checked_div(sink.frames).unwrap_or(0),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Strafe Run (native) starting headless run...");
    log::info!("Run with `trunk serve` for the web version");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
