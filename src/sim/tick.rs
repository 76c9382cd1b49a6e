//! Session and fixed-timestep stepping
//!
//! A `Session` owns one pendulum run end to end: parameters, pendulum state,
//! oscillation detector, challenge evaluator and the time accumulator that
//! converts irregular frame durations into fixed integration steps. The
//! render/UI layer feeds it commands and frame durations and reads snapshots;
//! it never touches the state directly.

use crate::code::{FAILED_CODE, completion_code};
use crate::consts::{IMPULSE_DELTA, MAX_FRAME_DT, SIM_DT};

use super::energy::mechanical_energy;
use super::game::{Evaluator, GamePhase};
use super::integrator::rk4_step;
use super::oscillation::OscillationDetector;
use super::state::{ChallengeConfig, PendulumState, SimParams, Snapshot};

/// Commands gathered from the UI for one frame.
#[derive(Debug, Clone, Default)]
pub struct CommandInput {
    /// Begin the challenge (restarts the run if already finished)
    pub start: bool,
    /// Toggle pause
    pub pause: bool,
    /// Return to the NotStarted state with fresh counters
    pub reset: bool,
    /// Instantaneous angular-velocity bump (rad/s); `None` leaves ω alone
    pub impulse: Option<f64>,
}

impl CommandInput {
    /// The stock impulse button: +0.8 rad/s.
    pub fn impulse_bump() -> Self {
        Self {
            impulse: Some(IMPULSE_DELTA),
            ..Self::default()
        }
    }
}

/// One simulation session: a single pendulum, detector and challenge.
#[derive(Debug, Clone)]
pub struct Session {
    params: SimParams,
    /// Release angle (radians), reapplied on every reset
    initial_theta: f64,
    state: PendulumState,
    detector: OscillationDetector,
    evaluator: Evaluator,
    accumulator: f64,
}

impl Session {
    /// Build a session from already-validated parameters. The configuration
    /// boundary (`crate::settings`) is responsible for rejecting non-positive
    /// lengths and friends before they get here.
    pub fn new(params: SimParams, challenge: ChallengeConfig, initial_theta: f64) -> Self {
        Self {
            params,
            initial_theta,
            state: PendulumState::released_from(initial_theta),
            detector: OscillationDetector::new(initial_theta),
            evaluator: Evaluator::new(challenge),
            accumulator: 0.0,
        }
    }

    pub fn params(&self) -> SimParams {
        self.params
    }

    pub fn state(&self) -> PendulumState {
        self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.evaluator.phase()
    }

    /// Apply UI commands. Reset wins over everything else in the same frame;
    /// impulse only lands while Running (a pre-start impulse would silently
    /// corrupt the NotStarted state).
    pub fn apply(&mut self, input: &CommandInput) {
        if input.reset {
            self.reset();
            return;
        }
        if input.start {
            if matches!(self.phase(), GamePhase::Finished(_)) {
                self.reset();
            }
            self.evaluator.start(self.state.t);
        }
        if input.pause {
            self.evaluator.toggle_pause();
        }
        if let Some(dw) = input.impulse {
            if self.evaluator.is_running() {
                self.state.omega += dw;
                log::debug!("impulse {dw:+.2} rad/s at t={:.2}", self.state.t);
            }
        }
    }

    /// Return to the NotStarted state: pendulum re-released from the initial
    /// angle, counters and accumulator cleared. Idempotent.
    pub fn reset(&mut self) {
        self.state = PendulumState::released_from(self.initial_theta);
        self.detector = OscillationDetector::new(self.initial_theta);
        self.evaluator = Evaluator::new(self.evaluator.config());
        self.accumulator = 0.0;
    }

    /// Consume one frame of wall-clock time, draining it in fixed steps.
    ///
    /// The frame duration is capped so a stalled tab cannot force a burst of
    /// catch-up steps; the excess real time is dropped, not owed. Nothing
    /// accumulates unless the challenge is Running, so pausing freezes the
    /// clock completely. Reaching Finished mid-frame skips the remaining
    /// queued steps.
    pub fn advance(&mut self, frame_dt: f64) {
        if !self.evaluator.is_running() {
            return;
        }

        self.accumulator += frame_dt.min(MAX_FRAME_DT);

        while self.accumulator >= SIM_DT {
            self.accumulator -= SIM_DT;

            let (theta, omega) = rk4_step(&self.state, &self.params, SIM_DT);
            self.state.theta = theta;
            self.state.omega = omega;
            self.state.t += SIM_DT;

            let osc_delta = self.detector.observe(self.state.theta, self.state.t);
            let energy = mechanical_energy(self.state.theta, self.state.omega, &self.params);
            if self
                .evaluator
                .on_step(self.state.t, osc_delta, energy.total(), self.state.theta)
                .is_some()
            {
                break;
            }
        }
    }

    /// Read-only view for rendering and the HUD, refreshed once per frame.
    pub fn snapshot(&self) -> Snapshot {
        let code = match self.phase() {
            GamePhase::Finished(outcome) if outcome.success => Some(completion_code(
                self.params.length,
                self.initial_theta.to_degrees(),
                self.params.damping,
                self.evaluator.elapsed(self.state.t),
                self.evaluator.oscillations(),
            )),
            GamePhase::Finished(_) => Some(FAILED_CODE.to_string()),
            _ => None,
        };

        Snapshot {
            t: self.state.t,
            theta: self.state.theta,
            theta_deg: self.state.theta.to_degrees(),
            omega: self.state.omega,
            oscillations: self.evaluator.oscillations(),
            target_oscillations: self.evaluator.config().target_oscillations,
            phase: self.phase(),
            energy: mechanical_energy(self.state.theta, self.state.omega, &self.params),
            code,
        }
    }
}
