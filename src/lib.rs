//! Pendulum Master - a damped pendulum oscillation challenge
//!
//! Core modules:
//! - `sim`: Deterministic simulation (RK4 integration, oscillation detection, game state)
//! - `settings`: Validated configuration with LocalStorage persistence
//! - `code`: Completion-code derivation for finished runs
//! - `render`: Canvas 2D drawing (wasm only)

pub mod code;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod render;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Simulation tuning constants
pub mod consts {
    /// Fixed integration step size (seconds)
    pub const SIM_DT: f64 = 0.016;
    /// Frame duration cap: a stalled tab must not force a burst of catch-up steps
    pub const MAX_FRAME_DT: f64 = 0.05;

    /// A zero crossing only counts when the angle is this close to center (radians)
    pub const CROSSING_WINDOW: f64 = 0.12;
    /// Minimum time between accepted crossings (seconds)
    pub const CROSSING_DEBOUNCE: f64 = 0.1;

    /// Total mechanical energy below which the pendulum counts as stopped (joules)
    pub const ENERGY_FLOOR: f64 = 1e-3;
    /// Angle window that must also hold for the stopped check (radians)
    pub const REST_ANGLE_WINDOW: f64 = 0.1;
    /// Grace period before the stopped check may fire (seconds of simulated time)
    pub const REST_GRACE_PERIOD: f64 = 1.0;
    /// Hard backstop on simulated time (seconds)
    pub const SAFETY_TIMEOUT: f64 = 120.0;

    /// Angular velocity bump applied by the Impulse command (rad/s)
    pub const IMPULSE_DELTA: f64 = 0.8;
}

/// Pixel position of the pendulum bob relative to the pivot.
///
/// Screen convention: +y is down, so a hanging pendulum (theta = 0) points
/// straight down from the pivot.
#[inline]
pub fn bob_offset(theta: f64, pixel_length: f32) -> Vec2 {
    Vec2::new(
        pixel_length * theta.sin() as f32,
        pixel_length * theta.cos() as f32,
    )
}
