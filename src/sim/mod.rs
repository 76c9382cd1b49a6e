//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable, bit-identical trajectories for identical inputs
//! - No rendering or platform dependencies

pub mod energy;
pub mod game;
pub mod integrator;
pub mod oscillation;
pub mod state;
pub mod tick;

pub use energy::{Energy, mechanical_energy};
pub use game::{Evaluator, FinishReason, GamePhase, Outcome};
pub use integrator::{angular_accel, rk4_step};
pub use oscillation::OscillationDetector;
pub use state::{ChallengeConfig, PendulumState, SimParams, Snapshot};
pub use tick::{CommandInput, Session};
