//! Fixed-step RK4 integration of the damped pendulum
//!
//! The equation of motion θ'' = -(g/L)·sin θ - b·ω is integrated as the
//! first-order system θ' = ω, ω' = -(g/L)·sin θ - b·ω with the classic
//! four-stage Runge-Kutta scheme (stages at t, t+h/2, t+h/2, t+h, weights
//! 1/6, 1/3, 1/3, 1/6). Mass cancels out of the angle equation entirely.

use super::state::{PendulumState, SimParams};

/// Angular acceleration at the given state.
///
/// Precondition: `params.length > 0` (guaranteed by the configuration
/// boundary - a zero length is a caller bug, not a recoverable condition).
#[inline]
pub fn angular_accel(theta: f64, omega: f64, params: &SimParams) -> f64 {
    -(params.gravity / params.length) * theta.sin() - params.damping * omega
}

/// Advance (theta, omega) by one fixed step of size `h`.
///
/// Pure and deterministic: identical inputs produce bit-identical outputs,
/// which the trajectory-reproducibility tests rely on. Does not touch `t`;
/// the session advances time alongside each step.
pub fn rk4_step(state: &PendulumState, params: &SimParams, h: f64) -> (f64, f64) {
    let (theta, omega) = (state.theta, state.omega);

    let k1_th = omega;
    let k1_w = angular_accel(theta, omega, params);

    let k2_th = omega + 0.5 * h * k1_w;
    let k2_w = angular_accel(theta + 0.5 * h * k1_th, omega + 0.5 * h * k1_w, params);

    let k3_th = omega + 0.5 * h * k2_w;
    let k3_w = angular_accel(theta + 0.5 * h * k2_th, omega + 0.5 * h * k2_w, params);

    let k4_th = omega + h * k3_w;
    let k4_w = angular_accel(theta + h * k3_th, omega + h * k3_w, params);

    let theta_next = theta + (h / 6.0) * (k1_th + 2.0 * k2_th + 2.0 * k3_th + k4_th);
    let omega_next = omega + (h / 6.0) * (k1_w + 2.0 * k2_w + 2.0 * k3_w + k4_w);

    (theta_next, omega_next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::energy::mechanical_energy;

    fn undamped() -> SimParams {
        SimParams {
            length: 1.0,
            gravity: 9.8,
            damping: 0.0,
            mass: 1.0,
        }
    }

    fn run(mut state: PendulumState, params: &SimParams, steps: usize) -> PendulumState {
        for _ in 0..steps {
            let (theta, omega) = rk4_step(&state, params, SIM_DT);
            state.theta = theta;
            state.omega = omega;
            state.t += SIM_DT;
        }
        state
    }

    #[test]
    fn test_determinism_bit_identical() {
        let params = SimParams {
            damping: 0.05,
            ..undamped()
        };
        let a = run(PendulumState::released_from(0.7), &params, 2000);
        let b = run(PendulumState::released_from(0.7), &params, 2000);
        assert_eq!(a.theta.to_bits(), b.theta.to_bits());
        assert_eq!(a.omega.to_bits(), b.omega.to_bits());
    }

    #[test]
    fn test_small_angle_period() {
        // Small-angle period T = 2π·sqrt(L/g) ≈ 2.007 s for L=1, g=9.8.
        // Released at +5°, omega runs negative for the first half swing and
        // positive for the return; its +→- zero marks one full period.
        let params = undamped();
        let mut state = PendulumState::released_from(5.0_f64.to_radians());
        let expected = 2.0 * std::f64::consts::PI * (1.0_f64 / 9.8).sqrt();

        let mut prev_omega = state.omega;
        let mut period = None;
        for _ in 0..400 {
            let (theta, omega) = rk4_step(&state, &params, SIM_DT);
            state.theta = theta;
            state.omega = omega;
            state.t += SIM_DT;
            if state.t > expected * 0.5 && prev_omega > 0.0 && omega <= 0.0 {
                period = Some(state.t);
                break;
            }
            prev_omega = omega;
        }
        let period = period.expect("pendulum never completed a period");
        assert!(
            (period - expected).abs() < 0.05,
            "period {period} vs expected {expected}"
        );
    }

    #[test]
    fn test_energy_conserved_without_damping() {
        // RK4 truncation error over 10 s at h=0.016 stays well inside the band.
        let params = undamped();
        let mut state = PendulumState::released_from(30.0_f64.to_radians());
        let e0 = mechanical_energy(state.theta, state.omega, &params).total();
        for _ in 0..625 {
            let (theta, omega) = rk4_step(&state, &params, SIM_DT);
            state.theta = theta;
            state.omega = omega;
        }
        let e1 = mechanical_energy(state.theta, state.omega, &params).total();
        assert!(
            (e1 - e0).abs() < 1e-6,
            "energy drifted from {e0} to {e1} over 10s"
        );
    }

    #[test]
    fn test_energy_decays_with_damping() {
        let params = SimParams {
            damping: 0.5,
            ..undamped()
        };
        let mut state = PendulumState::released_from(0.8);
        let mut prev = mechanical_energy(state.theta, state.omega, &params).total();
        for _ in 0..1000 {
            let (theta, omega) = rk4_step(&state, &params, SIM_DT);
            state.theta = theta;
            state.omega = omega;
            let e = mechanical_energy(state.theta, state.omega, &params).total();
            assert!(e <= prev + 1e-6, "energy rose from {prev} to {e}");
            prev = e;
        }
        assert!(prev < 0.1, "heavily damped pendulum kept most of its energy");
    }

    #[test]
    fn test_mass_does_not_affect_trajectory() {
        let light = undamped();
        let heavy = SimParams { mass: 7.5, ..light };
        let a = run(PendulumState::released_from(1.0), &light, 500);
        let b = run(PendulumState::released_from(1.0), &heavy, 500);
        assert_eq!(a.theta.to_bits(), b.theta.to_bits());
        assert_eq!(a.omega.to_bits(), b.omega.to_bits());
    }
}
