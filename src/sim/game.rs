//! Challenge lifecycle and finish evaluation
//!
//! A small state machine: NotStarted → Running ⇄ Paused → Finished, with
//! Finished terminal until an explicit reset. Finish conditions are checked
//! once per integration step, success before any failure condition, so a run
//! that reaches its target on the same step the energy floor trips still wins.

use serde::{Deserialize, Serialize};

use crate::consts::{ENERGY_FLOOR, REST_ANGLE_WINDOW, REST_GRACE_PERIOD, SAFETY_TIMEOUT};

use super::state::ChallengeConfig;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    /// Oscillation target reached within the time limit
    TargetReached,
    /// Time limit elapsed with the target unmet
    TimeExpired,
    /// Energy collapsed near the rest position before the target was met
    Stopped,
    /// Hard backstop on simulated time
    SafetyTimeout,
}

/// Terminal result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    pub reason: FinishReason,
}

/// Current phase of the challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first Start
    NotStarted,
    /// Clock and integrator active
    Running,
    /// Frozen mid-run; Resume continues, time does not advance
    Paused,
    /// Terminal until an explicit reset
    Finished(Outcome),
}

/// Watches elapsed time, oscillation count and energy to decide termination.
#[derive(Debug, Clone)]
pub struct Evaluator {
    phase: GamePhase,
    config: ChallengeConfig,
    /// Simulated time at which the challenge began
    start_time: f64,
    oscillations: u32,
}

impl Evaluator {
    pub fn new(config: ChallengeConfig) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            config,
            start_time: 0.0,
            oscillations: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn oscillations(&self) -> u32 {
        self.oscillations
    }

    pub fn config(&self) -> ChallengeConfig {
        self.config
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Challenge time elapsed at simulated time `t`.
    pub fn elapsed(&self, t: f64) -> f64 {
        t - self.start_time
    }

    /// Begin the challenge at simulated time `now`. Valid from NotStarted or
    /// Finished; counters restart, `now` becomes the challenge start.
    pub fn start(&mut self, now: f64) {
        match self.phase {
            GamePhase::NotStarted | GamePhase::Finished(_) => {
                self.start_time = now;
                self.oscillations = 0;
                self.phase = GamePhase::Running;
                log::info!("challenge started (target {})", self.config.target_oscillations);
            }
            GamePhase::Running | GamePhase::Paused => {}
        }
    }

    /// Toggle Running ⇄ Paused. No other state is touched; the stepper must
    /// not be invoked while Paused.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => {
                log::info!("paused");
                GamePhase::Paused
            }
            GamePhase::Paused => {
                log::info!("resumed");
                GamePhase::Running
            }
            other => other,
        };
    }

    /// Per-step termination check. `osc_delta` is the detector's
    /// full-oscillation delta for this step; `t` is simulated time after the
    /// step. Returns the outcome when this step ends the run.
    pub fn on_step(
        &mut self,
        t: f64,
        osc_delta: u32,
        total_energy: f64,
        theta: f64,
    ) -> Option<Outcome> {
        if self.phase != GamePhase::Running {
            return None;
        }

        self.oscillations += osc_delta;
        let elapsed = self.elapsed(t);

        // Success first: reaching the target beats every failure condition
        // that becomes true in the same step.
        if self.oscillations >= self.config.target_oscillations {
            return Some(self.finish(true, FinishReason::TargetReached));
        }

        if elapsed > self.config.time_limit {
            return Some(self.finish(false, FinishReason::TimeExpired));
        }

        // Stopped: energy collapse near center after a grace period. The
        // target is unmet here (checked above), so this is always a failure.
        if total_energy < ENERGY_FLOOR
            && theta.abs() < REST_ANGLE_WINDOW
            && elapsed > REST_GRACE_PERIOD
        {
            return Some(self.finish(false, FinishReason::Stopped));
        }

        // Backstop on simulated time, independent of the challenge timer.
        if t > SAFETY_TIMEOUT {
            return Some(self.finish(false, FinishReason::SafetyTimeout));
        }

        None
    }

    fn finish(&mut self, success: bool, reason: FinishReason) -> Outcome {
        let outcome = Outcome { success, reason };
        self.phase = GamePhase::Finished(outcome);
        log::info!(
            "challenge finished: {} ({reason:?}, {} oscillations)",
            if success { "success" } else { "failure" },
            self.oscillations
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ChallengeConfig {
        ChallengeConfig {
            target_oscillations: 3,
            time_limit: 10.0,
        }
    }

    #[test]
    fn test_start_records_challenge_origin() {
        let mut eval = Evaluator::new(config());
        eval.start(4.0);
        assert_eq!(eval.phase(), GamePhase::Running);
        assert_eq!(eval.elapsed(6.5), 2.5);
    }

    #[test]
    fn test_start_ignored_while_running_or_paused() {
        let mut eval = Evaluator::new(config());
        eval.start(0.0);
        eval.on_step(1.0, 1, 5.0, 0.5);
        eval.start(1.0);
        assert_eq!(eval.oscillations(), 1, "start mid-run must not reset counters");
        eval.toggle_pause();
        eval.start(2.0);
        assert_eq!(eval.phase(), GamePhase::Paused);
    }

    #[test]
    fn test_pause_resume_round_trip() {
        let mut eval = Evaluator::new(config());
        eval.start(0.0);
        eval.toggle_pause();
        assert_eq!(eval.phase(), GamePhase::Paused);
        eval.toggle_pause();
        assert_eq!(eval.phase(), GamePhase::Running);
    }

    #[test]
    fn test_success_on_target() {
        let mut eval = Evaluator::new(config());
        eval.start(0.0);
        assert_eq!(eval.on_step(1.0, 1, 5.0, 0.1), None);
        assert_eq!(eval.on_step(2.0, 1, 5.0, 0.1), None);
        let outcome = eval.on_step(3.0, 1, 5.0, 0.1).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.reason, FinishReason::TargetReached);
    }

    #[test]
    fn test_failure_on_time_limit() {
        let mut eval = Evaluator::new(config());
        eval.start(0.0);
        let outcome = eval.on_step(10.1, 0, 5.0, 0.5).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.reason, FinishReason::TimeExpired);
    }

    #[test]
    fn test_failure_when_stopped() {
        let mut eval = Evaluator::new(config());
        eval.start(0.0);
        // Dead pendulum: negligible energy, hanging near center, past grace.
        let outcome = eval.on_step(2.0, 0, 1e-5, 0.01).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.reason, FinishReason::Stopped);
    }

    #[test]
    fn test_stopped_check_respects_grace_period() {
        let mut eval = Evaluator::new(config());
        eval.start(0.0);
        assert_eq!(eval.on_step(0.5, 0, 1e-5, 0.01), None);
    }

    #[test]
    fn test_success_beats_energy_floor_in_same_step() {
        let mut eval = Evaluator::new(config());
        eval.start(0.0);
        eval.on_step(1.0, 2, 5.0, 0.1);
        // Final oscillation lands on the very step the energy floor trips.
        let outcome = eval.on_step(2.0, 1, 1e-5, 0.01).unwrap();
        assert!(outcome.success);
    }

    #[test]
    fn test_safety_timeout() {
        let mut eval = Evaluator::new(ChallengeConfig {
            target_oscillations: 3,
            time_limit: 1e9,
        });
        eval.start(0.0);
        let outcome = eval.on_step(120.016, 0, 5.0, 0.5).unwrap();
        assert_eq!(outcome.reason, FinishReason::SafetyTimeout);
    }

    #[test]
    fn test_finished_is_terminal() {
        let mut eval = Evaluator::new(config());
        eval.start(0.0);
        eval.on_step(10.1, 0, 5.0, 0.5).unwrap();
        assert_eq!(eval.on_step(11.0, 3, 5.0, 0.5), None);
        assert!(matches!(eval.phase(), GamePhase::Finished(_)));
    }
}
