//! Round phase machine
//!
//! One `GameState` instance covers one visit to the game screen: it tracks
//! the current round phase, the choices on the table, click gating, and the
//! two pending delays (draw cooldown, return-to-menu). Side effects on the
//! outside world are reported as [`GameEvent`]s for the host to act on.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::particle::ParticleSystem;
use super::round::{Choice, Outcome, resolve};
use crate::consts::*;

/// Current phase of one game-screen visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Waiting for the player to click a choice button
    AwaitingChoice,
    /// A choice pair has just been resolved; settles to `Cooldown` or
    /// `GameOver` before `play` returns
    RoundResolved,
    /// Click-blocked window after a draw
    Cooldown,
    /// A decisive round ended the game; waiting out the return delay
    GameOver,
}

/// Sound effects the host can play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Win,
    Lose,
}

/// The owl's facial expression, swapped on each decisive round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwlExpression {
    #[default]
    Neutral,
    /// The owl won; variant index 1..=4
    Happy(u8),
    /// The owl lost; variant index 1..=4
    Sad(u8),
}

/// Effect requests emitted by the phase machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Swap the owl's texture
    ExpressionChanged(OwlExpression),
    /// Play a sound at the given volume multiplier
    SoundRequested { sound: Sound, volume: f32 },
    /// The return delay elapsed; the view should go back to the menu
    ReturnToMenu,
}

/// State for one game-screen visit
///
/// Created when the game screen is entered and dropped when the view
/// returns to the menu; nothing carries over between games.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: RoundPhase,
    pub player_choice: Option<Choice>,
    pub computer_choice: Option<Choice>,
    pub click_enabled: bool,
    pub particles: ParticleSystem,
    /// Status line shown above the owl
    result_text: String,
    /// Draw cooldown countdown; `Some` while clicks are blocked after a draw
    cooldown_timer: Option<f32>,
    /// Return-to-menu countdown; `Some` while a return is scheduled.
    /// Holding the schedule in an `Option` makes a duplicate unrepresentable.
    return_timer: Option<f32>,
    /// Set once the return has fired so it can never fire twice
    return_fired: bool,
    rng: Pcg32,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self::with_particle_cap(seed, MAX_PARTICLES)
    }

    pub fn with_particle_cap(seed: u64, max_particles: usize) -> Self {
        Self {
            phase: RoundPhase::AwaitingChoice,
            player_choice: None,
            computer_choice: None,
            click_enabled: true,
            particles: ParticleSystem::with_capacity(max_particles),
            result_text: "Click Scissors, Rock, or Paper!".to_string(),
            cooldown_timer: None,
            return_timer: None,
            return_fired: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn result_text(&self) -> &str {
        &self.result_text
    }

    /// "You picked: X" once a round has been played
    pub fn player_line(&self) -> Option<String> {
        self.player_choice.map(|c| format!("You picked: {}", c.label()))
    }

    /// "Owl picked: Y" once a round has been played
    pub fn computer_line(&self) -> Option<String> {
        self.computer_choice
            .map(|c| format!("Owl picked: {}", c.label()))
    }

    /// True while a return to the menu is scheduled but has not fired
    pub fn return_pending(&self) -> bool {
        self.return_timer.is_some()
    }

    /// Play one round with the given player choice.
    ///
    /// Silently ignored unless the machine is awaiting a choice with clicks
    /// enabled. The computer's choice is drawn uniformly; on a draw the
    /// machine enters a short cooldown, on a decisive outcome it enters
    /// `GameOver` and schedules the return to the menu.
    pub fn play(&mut self, choice: Choice) -> Vec<GameEvent> {
        if self.phase != RoundPhase::AwaitingChoice || !self.click_enabled {
            return Vec::new();
        }

        let computer = Choice::random(&mut self.rng);
        self.player_choice = Some(choice);
        self.computer_choice = Some(computer);
        self.phase = RoundPhase::RoundResolved;

        match resolve(choice, computer) {
            Outcome::Draw => {
                self.result_text = "Draw! Pick again.".to_string();
                self.click_enabled = false;
                self.cooldown_timer = Some(DRAW_COOLDOWN_SECS);
                self.phase = RoundPhase::Cooldown;
                Vec::new()
            }
            Outcome::PlayerWin => {
                self.result_text = "You win!".to_string();
                let variant = self.rng.random_range(1..=EXPRESSION_VARIANTS);
                self.spawn_fireworks();
                let events = vec![
                    GameEvent::ExpressionChanged(OwlExpression::Sad(variant)),
                    GameEvent::SoundRequested {
                        sound: Sound::Win,
                        volume: WIN_SOUND_VOLUME,
                    },
                ];
                self.finish_game();
                events
            }
            Outcome::ComputerWin => {
                self.result_text = "The owl wins!".to_string();
                let variant = self.rng.random_range(1..=EXPRESSION_VARIANTS);
                let events = vec![
                    GameEvent::ExpressionChanged(OwlExpression::Happy(variant)),
                    GameEvent::SoundRequested {
                        sound: Sound::Lose,
                        volume: LOSE_SOUND_VOLUME,
                    },
                ];
                self.finish_game();
                events
            }
        }
    }

    /// Two crossing bursts from the bottom corners
    fn spawn_fireworks(&mut self) {
        self.particles.spawn(
            Vec2::new(0.0, 0.0),
            BURST_COUNT,
            LEFT_BURST_ANGLES,
            BURST_SPEED,
            &mut self.rng,
        );
        self.particles.spawn(
            Vec2::new(SCREEN_WIDTH, 0.0),
            BURST_COUNT,
            RIGHT_BURST_ANGLES,
            BURST_SPEED,
            &mut self.rng,
        );
    }

    /// Enter `GameOver` and schedule the return to the menu.
    ///
    /// The schedule is only taken while no return is pending: the first
    /// scheduled countdown is the sole owner of the eventual transition.
    fn finish_game(&mut self) {
        self.phase = RoundPhase::GameOver;
        self.click_enabled = false;
        if self.return_timer.is_none() && !self.return_fired {
            self.return_timer = Some(RETURN_TO_MENU_SECS);
        }
    }

    /// Advance one frame: particles first, then the pending countdowns.
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        self.particles.update(dt);

        let mut events = Vec::new();

        if let Some(t) = self.cooldown_timer.map(|t| t - dt) {
            if t <= 0.0 {
                self.cooldown_timer = None;
                self.click_enabled = true;
                self.phase = RoundPhase::AwaitingChoice;
            } else {
                self.cooldown_timer = Some(t);
            }
        }

        if let Some(t) = self.return_timer.map(|t| t - dt) {
            if t <= 0.0 {
                self.return_timer = None;
                self.return_fired = true;
                events.push(GameEvent::ReturnToMenu);
            } else {
                self.return_timer = Some(t);
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    /// Find a seed whose first computer draw gives `resolve(player, _)` the
    /// wanted outcome, then play that round. The RNG is the single
    /// injectable random source, so steering it by seed is deterministic.
    fn play_round_with_outcome(player: Choice, outcome: Outcome) -> (GameState, Vec<GameEvent>) {
        for seed in 0..1000 {
            let mut probe = GameState::new(seed);
            probe.play(player);
            if resolve(player, probe.computer_choice.unwrap()) == outcome {
                let mut state = GameState::new(seed);
                let events = state.play(player);
                return (state, events);
            }
        }
        panic!("no seed in 0..1000 produced {outcome:?}");
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::new(1);
        assert_eq!(state.phase, RoundPhase::AwaitingChoice);
        assert!(state.click_enabled);
        assert!(state.player_choice.is_none());
        assert!(state.computer_choice.is_none());
        assert!(!state.return_pending());
        assert!(state.particles.is_empty());
    }

    // Scenario: player picks Scissors, computer draws Paper
    #[test]
    fn test_player_win_side_effects() {
        let (state, events) =
            play_round_with_outcome(Choice::Scissors, Outcome::PlayerWin);

        assert_eq!(state.phase, RoundPhase::GameOver);
        assert!(!state.click_enabled);
        assert!(state.return_pending());
        // Two 70-particle bursts
        assert_eq!(state.particles.len(), 140);
        assert_eq!(state.result_text(), "You win!");

        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            GameEvent::ExpressionChanged(OwlExpression::Sad(1..=4))
        ));
        assert!(matches!(
            events[1],
            GameEvent::SoundRequested {
                sound: Sound::Win,
                volume,
            } if volume == 1.5
        ));
    }

    // Scenario: draw blocks clicks for 0.2s, then resumes with no transition
    #[test]
    fn test_draw_cooldown_reenables_clicks() {
        let (mut state, events) = play_round_with_outcome(Choice::Rock, Outcome::Draw);

        assert!(events.is_empty());
        assert_eq!(state.phase, RoundPhase::Cooldown);
        assert!(!state.click_enabled);
        assert!(!state.return_pending());
        assert!(state.particles.is_empty());

        // Clicks stay blocked inside the window
        assert!(state.play(Choice::Paper).is_empty());
        state.update(0.1);
        assert!(!state.click_enabled);

        // ...and come back once it elapses, with no game-over transition
        state.update(0.15);
        assert!(state.click_enabled);
        assert_eq!(state.phase, RoundPhase::AwaitingChoice);
        assert!(!state.return_pending());
    }

    // Scenario: computer wins; no particles; menu return after 3.0s
    #[test]
    fn test_computer_win_then_return_to_menu() {
        let (mut state, events) =
            play_round_with_outcome(Choice::Paper, Outcome::ComputerWin);

        assert_eq!(state.phase, RoundPhase::GameOver);
        assert!(state.particles.is_empty());
        assert_eq!(state.result_text(), "The owl wins!");
        assert!(matches!(
            events[0],
            GameEvent::ExpressionChanged(OwlExpression::Happy(1..=4))
        ));
        assert!(matches!(
            events[1],
            GameEvent::SoundRequested {
                sound: Sound::Lose,
                volume,
            } if volume == 1.0
        ));

        // Not yet...
        let mut fired = Vec::new();
        let mut elapsed = 0.0;
        while elapsed < 2.9 {
            fired.extend(state.update(FRAME));
            elapsed += FRAME;
        }
        assert!(fired.is_empty());

        // ...now
        while elapsed < 3.2 {
            fired.extend(state.update(FRAME));
            elapsed += FRAME;
        }
        assert_eq!(fired, vec![GameEvent::ReturnToMenu]);
        assert!(!state.return_pending());
    }

    // Scenario: duplicate-schedule guard - only one return ever fires
    #[test]
    fn test_return_timer_never_scheduled_twice() {
        let (mut state, _) = play_round_with_outcome(Choice::Scissors, Outcome::PlayerWin);

        // Force a second decisive round inside the game-over window. The
        // play is refused outright...
        assert!(state.play(Choice::Rock).is_empty());

        // ...and even re-running the scheduling path takes no new schedule.
        state.click_enabled = true;
        state.finish_game();

        let mut fired = Vec::new();
        for _ in 0..400 {
            fired.extend(state.update(FRAME));
        }
        let returns = fired
            .iter()
            .filter(|e| matches!(e, GameEvent::ReturnToMenu))
            .count();
        assert_eq!(returns, 1);

        // A fired return can also never be re-armed
        state.finish_game();
        for _ in 0..400 {
            fired.extend(state.update(FRAME));
        }
        let returns = fired
            .iter()
            .filter(|e| matches!(e, GameEvent::ReturnToMenu))
            .count();
        assert_eq!(returns, 1);
    }

    #[test]
    fn test_clicks_ignored_while_blocked() {
        let (mut state, _) = play_round_with_outcome(Choice::Paper, Outcome::ComputerWin);
        let before = state.computer_choice;
        assert!(state.play(Choice::Rock).is_empty());
        assert_eq!(state.computer_choice, before);
    }

    #[test]
    fn test_result_lines_follow_choices() {
        let (state, _) = play_round_with_outcome(Choice::Scissors, Outcome::PlayerWin);
        assert_eq!(state.player_line().unwrap(), "You picked: Scissors");
        assert_eq!(
            state.computer_line().unwrap(),
            "Owl picked: Paper"
        );
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = GameState::new(777);
        let mut b = GameState::new(777);
        let ea = a.play(Choice::Rock);
        let eb = b.play(Choice::Rock);
        assert_eq!(ea, eb);
        assert_eq!(a.computer_choice, b.computer_choice);
        assert_eq!(a.particles.len(), b.particles.len());
    }
}
