//! Mechanical energy of the pendulum
//!
//! Used for HUD display and as the stopped-pendulum failure signal.

use serde::{Deserialize, Serialize};

use super::state::SimParams;

/// Kinetic/potential breakdown at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Energy {
    /// ½·m·(L·ω)² (joules)
    pub kinetic: f64,
    /// m·g·L·(1 - cos θ), zero at the hanging rest position (joules)
    pub potential: f64,
}

impl Energy {
    #[inline]
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }
}

/// Energy of the state (θ, ω) under `params`. Pure; all inputs are
/// well-formed floats by the configuration boundary's guarantees.
pub fn mechanical_energy(theta: f64, omega: f64, params: &SimParams) -> Energy {
    let v = params.length * omega;
    Energy {
        kinetic: 0.5 * params.mass * v * v,
        potential: params.mass * params.gravity * params.length * (1.0 - theta.cos()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_at_bottom_has_zero_energy() {
        let e = mechanical_energy(0.0, 0.0, &SimParams::default());
        assert_eq!(e.kinetic, 0.0);
        assert_eq!(e.potential, 0.0);
        assert_eq!(e.total(), 0.0);
    }

    #[test]
    fn test_horizontal_release_potential() {
        // At θ = 90°: E_pot = m·g·L·(1 - 0) = 9.8 J for unit mass and length.
        let e = mechanical_energy(std::f64::consts::FRAC_PI_2, 0.0, &SimParams::default());
        assert!((e.potential - 9.8).abs() < 1e-12);
        assert_eq!(e.kinetic, 0.0);
    }

    #[test]
    fn test_kinetic_scales_with_mass() {
        let mut params = SimParams::default();
        let base = mechanical_energy(0.3, 2.0, &params);
        params.mass = 3.0;
        let heavy = mechanical_energy(0.3, 2.0, &params);
        assert!((heavy.total() - 3.0 * base.total()).abs() < 1e-12);
    }
}
