//! Debounced zero-crossing oscillation detection
//!
//! A lightly damped trajectory can cross zero with high-frequency numerical
//! noise near the equilibrium. Crossings are therefore gated twice: the angle
//! must be close to center, and enough time must have passed since the last
//! accepted crossing. Two accepted half-crossings (one departure plus one
//! return) make one full oscillation.

use crate::consts::{CROSSING_DEBOUNCE, CROSSING_WINDOW};

/// Watches the angle sequence and emits full-oscillation counts.
///
/// Fed once per integration step with the freshly integrated angle.
/// Reset together with the pendulum state.
#[derive(Debug, Clone)]
pub struct OscillationDetector {
    /// Last observed non-zero sign of theta (-1, 0, +1)
    last_sign: i8,
    /// Simulated time of the last accepted crossing
    last_cross_time: f64,
    half_crossings: u32,
    completed: u32,
}

impl OscillationDetector {
    /// Detector primed with the sign of the release angle.
    pub fn new(theta0: f64) -> Self {
        Self {
            last_sign: sign_of(theta0),
            last_cross_time: f64::NEG_INFINITY,
            half_crossings: 0,
            completed: 0,
        }
    }

    /// Full oscillations completed so far.
    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Half-crossings accepted so far.
    pub fn half_crossings(&self) -> u32 {
        self.half_crossings
    }

    /// Observe the angle after one integration step; returns the
    /// full-oscillation delta for this step (0 or 1).
    pub fn observe(&mut self, theta: f64, now: f64) -> u32 {
        let s = sign_of(theta);
        // Exactly zero: no direction to infer, leave everything untouched.
        if s == 0 {
            return 0;
        }
        if s == self.last_sign {
            return 0;
        }

        // Sign tracking updates even when the gates below reject the
        // crossing; otherwise one jittery crossing would desynchronize the
        // tracker and block all future detection.
        self.last_sign = s;

        if theta.abs() < CROSSING_WINDOW && now - self.last_cross_time > CROSSING_DEBOUNCE {
            self.last_cross_time = now;
            self.half_crossings += 1;
            log::trace!("crossing accepted at t={now:.3} ({} halves)", self.half_crossings);
            if self.half_crossings % 2 == 0 {
                self.completed += 1;
                return 1;
            }
        }
        0
    }
}

fn sign_of(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}
