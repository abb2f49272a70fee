//! Deterministic game logic
//!
//! All gameplay state lives here. This module must be pure and deterministic:
//! - Advanced only by explicit `play`/`update` calls
//! - Seeded RNG only; every random draw flows through the one `Pcg32`
//! - No rendering or platform dependencies

pub mod particle;
pub mod round;
pub mod state;

pub use particle::{Particle, ParticleSystem};
pub use round::{Choice, Outcome, resolve};
pub use state::{GameEvent, GameState, OwlExpression, RoundPhase, Sound};
