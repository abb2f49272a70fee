//! Beat the Owl entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

    use owl_rps::assets::TextureStore;
    use owl_rps::audio::AudioManager;
    use owl_rps::consts::*;
    use owl_rps::render::{Color, Rect, Renderer, TextAnchor};
    use owl_rps::settings::Settings;
    use owl_rps::sim::GameEvent;
    use owl_rps::ui::ViewController;

    /// Canvas 2D implementation of the draw primitives.
    ///
    /// World coordinates are y-up with the origin at the bottom-left; the
    /// canvas is y-down, so every y is flipped on the way out.
    struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
        textures: TextureStore,
    }

    impl CanvasRenderer {
        fn new(ctx: CanvasRenderingContext2d) -> Self {
            Self {
                ctx,
                textures: TextureStore::new(),
            }
        }

        fn flip(y: f32) -> f64 {
            (SCREEN_HEIGHT - y) as f64
        }
    }

    impl Renderer for CanvasRenderer {
        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            self.ctx.set_fill_style_str(&color.css());
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                center.x as f64,
                Self::flip(center.y),
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.fill();
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.ctx.set_fill_style_str(&color.css());
            self.ctx.fill_rect(
                (rect.center.x - rect.width / 2.0) as f64,
                Self::flip(rect.center.y + rect.height / 2.0),
                rect.width as f64,
                rect.height as f64,
            );
        }

        fn draw_text(&mut self, text: &str, pos: Vec2, color: Color, size: f32, anchor: TextAnchor) {
            self.ctx.set_fill_style_str(&color.css());
            self.ctx.set_font(&format!("{size}px sans-serif"));
            self.ctx.set_text_align(match anchor {
                TextAnchor::Left => "left",
                TextAnchor::Center => "center",
                TextAnchor::Right => "right",
            });
            self.ctx.set_text_baseline("middle");
            let _ = self.ctx.fill_text(text, pos.x as f64, Self::flip(pos.y));
        }

        fn draw_sprite(&mut self, texture: &str, center: Vec2, size: Vec2) {
            let x = (center.x - size.x / 2.0) as f64;
            let y = Self::flip(center.y + size.y / 2.0);
            if let Some(image) = self.textures.get(texture) {
                if image.complete() {
                    let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        image,
                        x,
                        y,
                        size.x as f64,
                        size.y as f64,
                    );
                }
            }
        }
    }

    /// Everything the frame loop touches
    struct App {
        view: ViewController,
        renderer: CanvasRenderer,
        audio: AudioManager,
        last_time: f64,
    }

    impl App {
        fn dispatch(&self, events: Vec<GameEvent>) {
            for event in events {
                if let GameEvent::SoundRequested { sound, volume } = event {
                    self.audio.play(sound, volume);
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("{SCREEN_TITLE} starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(SCREEN_WIDTH as u32);
        canvas.set_height(SCREEN_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("get_context failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load();
        let mut audio = AudioManager::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);

        let seed = js_sys::Date::now() as u64;
        log::info!("seed: {seed}");

        let app = Rc::new(RefCell::new(App {
            view: ViewController::new(seed, settings.max_particles()),
            renderer: CanvasRenderer::new(ctx),
            audio,
            last_time: 0.0,
        }));

        setup_input(&canvas, app.clone());
        request_animation_frame(app);

        log::info!("{SCREEN_TITLE} running!");
    }

    fn setup_input(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut a = app.borrow_mut();
            // Canvas y-down to world y-up
            let pos = Vec2::new(
                event.offset_x() as f32,
                SCREEN_HEIGHT - event.offset_y() as f32,
            );
            let events = a.view.handle_click(pos);
            a.dispatch(events);
        });
        let _ = canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                1.0 / 60.0
            };
            a.last_time = time;

            let events = a.view.update(dt.min(0.1));
            a.dispatch(events);

            // Split borrow: draw reads the view, mutates the renderer
            let App { view, renderer, .. } = &mut *a;
            view.draw(renderer);
        }

        request_animation_frame(app);
    }
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
    use owl_rps::sim::{Choice, GameState};

    env_logger::init();
    log::info!("Beat the Owl (native) starting...");
    log::info!("The game targets the browser - run the wasm build for the real thing");

    // Headless demo round
    let seed = 0x5eed;
    let mut state = GameState::new(seed);
    let events = state.play(Choice::Rock);
    println!("You picked: Rock");
    if let Some(line) = state.computer_line() {
        println!("{line}");
    }
    println!("{}", state.result_text());
    println!(
        "{} effect event(s), {} live particle(s)",
        events.len(),
        state.particles.len()
    );
}
