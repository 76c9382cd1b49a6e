//! Simulation state and core types
//!
//! Everything the session needs to reproduce a run lives here.

use serde::{Deserialize, Serialize};

use super::energy::Energy;
use super::game::GamePhase;

/// Physical parameters of the pendulum.
///
/// Read-only during a run; the configuration boundary (`crate::settings`)
/// guarantees `length > 0`, `gravity > 0`, `mass > 0` and `damping >= 0`
/// before a value ever reaches the integrator. The core never re-checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Rod length L (meters)
    pub length: f64,
    /// Gravitational acceleration g (m/s²)
    pub gravity: f64,
    /// Damping coefficient b (1/s)
    pub damping: f64,
    /// Bob mass m (kg) - scales energy and nothing else
    pub mass: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            length: 1.0,
            gravity: 9.8,
            damping: 0.05,
            mass: 1.0,
        }
    }
}

/// Instantaneous pendulum state.
///
/// `theta` is unbounded (not wrapped to [-π, π]); `t` advances only in fixed
/// increments of the step size and never decreases except through a reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendulumState {
    /// Angular displacement from vertical (radians)
    pub theta: f64,
    /// Angular velocity (radians/second)
    pub omega: f64,
    /// Simulated time (seconds)
    pub t: f64,
}

impl PendulumState {
    /// State at rest, released from `theta0` radians.
    pub fn released_from(theta0: f64) -> Self {
        Self {
            theta: theta0,
            omega: 0.0,
            t: 0.0,
        }
    }
}

/// Challenge goal: complete this many full oscillations within the limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChallengeConfig {
    /// Full oscillations required (> 0)
    pub target_oscillations: u32,
    /// Challenge time limit (seconds of simulated time, > 0)
    pub time_limit: f64,
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            target_oscillations: 5,
            time_limit: 60.0,
        }
    }
}

/// Read-only per-frame view of a session, consumed by the rendering/UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Simulated time (seconds)
    pub t: f64,
    /// Angle (radians)
    pub theta: f64,
    /// Angle (degrees, for display)
    pub theta_deg: f64,
    /// Angular velocity (rad/s)
    pub omega: f64,
    /// Full oscillations completed so far
    pub oscillations: u32,
    /// Challenge target, echoed for HUD display
    pub target_oscillations: u32,
    /// Current game phase
    pub phase: GamePhase,
    /// Energy breakdown at this instant
    pub energy: Energy,
    /// Completion code once Finished (`FAILED` on a failed run)
    pub code: Option<String>,
}
