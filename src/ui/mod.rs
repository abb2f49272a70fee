//! Screens and the view controller
//!
//! Exactly one screen is active at a time. The menu hands the shared owl to
//! the game screen on entry; when a finished game's return delay elapses the
//! controller rebuilds a fresh menu (and a fresh owl), dropping the old
//! game state entirely.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::assets;
use crate::consts::*;
use crate::render::{self, Rect, Renderer, TextAnchor};
use crate::sim::{Choice, GameEvent, GameState, OwlExpression};

/// Owl sprite size on screen
const OWL_SIZE: Vec2 = Vec2::new(180.0, 180.0);
/// Logo sprite size on the menu screen
const LOGO_SIZE: Vec2 = Vec2::new(120.0, 120.0);
const BUTTON_WIDTH: f32 = 120.0;
const BUTTON_HEIGHT: f32 = 60.0;

/// The shared visual entity both screens show
///
/// Long-lived relative to the screens: the menu creates it, the game screen
/// mutates its expression, and it is only replaced when a game ends.
#[derive(Debug, Clone)]
pub struct Owl {
    pub pos: Vec2,
    pub expression: OwlExpression,
}

impl Default for Owl {
    fn default() -> Self {
        Self {
            pos: Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
            expression: OwlExpression::Neutral,
        }
    }
}

/// The start screen; any click starts a game
#[derive(Debug, Default)]
pub struct MenuScreen;

impl MenuScreen {
    fn draw(&self, owl: &Owl, r: &mut dyn Renderer) {
        r.fill_rect(
            Rect::new(
                Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
                SCREEN_WIDTH,
                SCREEN_HEIGHT,
            ),
            render::MENU_BG,
        );
        r.draw_sprite(
            assets::LOGO,
            Vec2::new(SCREEN_WIDTH - LOGO_SIZE.x / 2.0, LOGO_SIZE.y / 2.0),
            LOGO_SIZE,
        );
        r.draw_sprite(assets::owl_texture(owl.expression), owl.pos, OWL_SIZE);
        r.draw_text(
            SCREEN_TITLE,
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 150.0),
            render::BLACK,
            40.0,
            TextAnchor::Center,
        );
        r.draw_text(
            "Click anywhere to start!",
            Vec2::new(SCREEN_WIDTH / 2.0, 75.0),
            render::BLACK,
            24.0,
            TextAnchor::Center,
        );
    }
}

/// One choice button on the game screen
#[derive(Debug, Clone, Copy)]
struct ButtonSpec {
    choice: Choice,
    rect: Rect,
}

/// The playing screen; owns the round phase machine
#[derive(Debug)]
pub struct GameScreen {
    pub state: GameState,
    buttons: [ButtonSpec; 3],
}

impl GameScreen {
    pub fn new(seed: u64, particle_cap: usize) -> Self {
        let button = |choice, x| ButtonSpec {
            choice,
            rect: Rect::new(Vec2::new(x, 100.0), BUTTON_WIDTH, BUTTON_HEIGHT),
        };
        Self {
            state: GameState::with_particle_cap(seed, particle_cap),
            buttons: [
                button(Choice::Scissors, SCREEN_WIDTH / 2.0 - 200.0),
                button(Choice::Rock, SCREEN_WIDTH / 2.0),
                button(Choice::Paper, SCREEN_WIDTH / 2.0 + 200.0),
            ],
        }
    }

    /// Route a click to the button under it, if any. Clicks that miss every
    /// button are a no-op.
    fn handle_click(&mut self, pos: Vec2) -> Vec<GameEvent> {
        for button in self.buttons {
            if button.rect.contains(pos) {
                return self.state.play(button.choice);
            }
        }
        Vec::new()
    }

    fn draw(&self, owl: &Owl, r: &mut dyn Renderer) {
        r.fill_rect(
            Rect::new(
                Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
                SCREEN_WIDTH,
                SCREEN_HEIGHT,
            ),
            render::GAME_BG,
        );
        r.draw_text(
            "Rock Paper Scissors",
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 80.0),
            render::BLACK,
            32.0,
            TextAnchor::Center,
        );
        r.draw_text(
            self.state.result_text(),
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0 + 150.0),
            render::BLACK,
            20.0,
            TextAnchor::Center,
        );
        r.draw_sprite(assets::owl_texture(owl.expression), owl.pos, OWL_SIZE);

        for button in &self.buttons {
            r.fill_rect(button.rect, render::BUTTON_FILL);
            r.draw_text(
                button.choice.label(),
                button.rect.center,
                render::BLACK,
                20.0,
                TextAnchor::Center,
            );
        }

        if let Some(line) = self.state.player_line() {
            r.draw_text(
                &line,
                Vec2::new(20.0, SCREEN_HEIGHT / 2.0),
                render::AVOCADO,
                20.0,
                TextAnchor::Left,
            );
        }
        if let Some(line) = self.state.computer_line() {
            r.draw_text(
                &line,
                Vec2::new(SCREEN_WIDTH - 20.0, SCREEN_HEIGHT / 2.0),
                render::BROWN,
                20.0,
                TextAnchor::Right,
            );
        }

        for p in self.state.particles.iter() {
            r.fill_circle(p.pos, p.radius.max(1.0), p.color);
        }
    }
}

/// The closed set of top-level screens
#[derive(Debug)]
pub enum Screen {
    Menu(MenuScreen),
    Game(GameScreen),
}

/// Owns the active screen and the shared owl, and performs the transitions
/// between them
#[derive(Debug)]
pub struct ViewController {
    screen: Screen,
    owl: Owl,
    particle_cap: usize,
    /// Seeds one fresh `GameState` per menu-to-game transition
    rng: Pcg32,
}

impl ViewController {
    pub fn new(seed: u64, particle_cap: usize) -> Self {
        Self {
            screen: Screen::Menu(MenuScreen),
            owl: Owl::default(),
            particle_cap,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn owl(&self) -> &Owl {
        &self.owl
    }

    /// Route a click to the active screen.
    ///
    /// Expression changes are applied to the owl here; sound requests are
    /// passed back for the host to play.
    pub fn handle_click(&mut self, pos: Vec2) -> Vec<GameEvent> {
        match &mut self.screen {
            Screen::Menu(_) => {
                let seed = self.rng.random();
                log::info!("starting game (seed {seed})");
                self.screen = Screen::Game(GameScreen::new(seed, self.particle_cap));
                Vec::new()
            }
            Screen::Game(game) => {
                let events = game.handle_click(pos);
                self.apply(events)
            }
        }
    }

    /// Advance the active screen one frame
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        match &mut self.screen {
            Screen::Menu(_) => Vec::new(),
            Screen::Game(game) => {
                let events = game.state.update(dt);
                self.apply(events)
            }
        }
    }

    pub fn draw(&self, r: &mut dyn Renderer) {
        match &self.screen {
            Screen::Menu(menu) => menu.draw(&self.owl, r),
            Screen::Game(game) => game.draw(&self.owl, r),
        }
    }

    /// Consume the events the controller is responsible for; forward the rest
    fn apply(&mut self, events: Vec<GameEvent>) -> Vec<GameEvent> {
        let mut forwarded = Vec::new();
        for event in events {
            match event {
                GameEvent::ExpressionChanged(expression) => {
                    self.owl.expression = expression;
                }
                GameEvent::ReturnToMenu => {
                    log::info!("returning to menu");
                    self.owl = Owl::default();
                    self.screen = Screen::Menu(MenuScreen);
                }
                GameEvent::SoundRequested { .. } => forwarded.push(event),
            }
        }
        forwarded
    }
}
