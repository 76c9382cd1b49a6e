//! User configuration and the validation boundary
//!
//! Slider-shaped values from the UI are collected here and validated before
//! anything reaches the simulation core. The core has no recovery path for a
//! non-positive length or mass, so violations fail loudly at this boundary
//! instead of deep inside an integration step.
//!
//! Persisted separately from any run state in LocalStorage (wasm only).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{ChallengeConfig, SimParams};

/// Rejected configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SettingsError {
    #[error("pendulum length must be positive, got {0}")]
    NonPositiveLength(f64),
    #[error("gravitational acceleration must be positive, got {0}")]
    NonPositiveGravity(f64),
    #[error("damping coefficient must be non-negative, got {0}")]
    NegativeDamping(f64),
    #[error("mass must be positive, got {0}")]
    NonPositiveMass(f64),
    #[error("oscillation target must be at least 1")]
    ZeroTarget,
    #[error("time limit must be positive, got {0}")]
    NonPositiveTimeLimit(f64),
}

/// Everything the control panel exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Rod length (meters)
    pub length: f64,
    /// Release angle (degrees)
    pub initial_angle_deg: f64,
    /// Damping coefficient
    pub damping: f64,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Bob mass (kg) - not slider-exposed, scales energy only
    pub mass: f64,
    /// Full oscillations to complete
    pub target_oscillations: u32,
    /// Challenge time limit (seconds)
    pub time_limit: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            length: 1.0,
            initial_angle_deg: 45.0,
            damping: 0.05,
            gravity: 9.8,
            mass: 1.0,
            target_oscillations: 5,
            time_limit: 60.0,
        }
    }
}

impl Settings {
    /// Validate and split into the core's inputs: physical parameters,
    /// challenge config and the release angle in radians.
    ///
    /// NaN comparisons are false, so a NaN slider value fails the positivity
    /// checks and is rejected like any other bad input.
    pub fn validate(&self) -> Result<(SimParams, ChallengeConfig, f64), SettingsError> {
        if !(self.length > 0.0) {
            return Err(SettingsError::NonPositiveLength(self.length));
        }
        if !(self.gravity > 0.0) {
            return Err(SettingsError::NonPositiveGravity(self.gravity));
        }
        if !(self.damping >= 0.0) {
            return Err(SettingsError::NegativeDamping(self.damping));
        }
        if !(self.mass > 0.0) {
            return Err(SettingsError::NonPositiveMass(self.mass));
        }
        if self.target_oscillations == 0 {
            return Err(SettingsError::ZeroTarget);
        }
        if !(self.time_limit > 0.0) {
            return Err(SettingsError::NonPositiveTimeLimit(self.time_limit));
        }

        let params = SimParams {
            length: self.length,
            gravity: self.gravity,
            damping: self.damping,
            mass: self.mass,
        };
        let challenge = ChallengeConfig {
            target_oscillations: self.target_oscillations,
            time_limit: self.time_limit,
        };
        Ok((params, challenge, self.initial_angle_deg.to_radians()))
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "pendulum_master_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str::<Settings>(&json) {
                    // A stale save with values that no longer validate falls
                    // back to defaults rather than poisoning the core.
                    if settings.validate().is_ok() {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    log::warn!("Stored settings failed validation, using defaults");
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let settings = Settings::default();
        let (params, challenge, theta0) = settings.validate().unwrap();
        assert_eq!(params.length, 1.0);
        assert_eq!(challenge.target_oscillations, 5);
        assert!((theta0 - 45.0_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_zero_length_rejected() {
        let settings = Settings {
            length: 0.0,
            ..Settings::default()
        };
        assert_eq!(
            settings.validate().unwrap_err(),
            SettingsError::NonPositiveLength(0.0)
        );
    }

    #[test]
    fn test_nan_length_rejected() {
        let settings = Settings {
            length: f64::NAN,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate().unwrap_err(),
            SettingsError::NonPositiveLength(_)
        ));
    }

    #[test]
    fn test_negative_damping_rejected() {
        let settings = Settings {
            damping: -0.1,
            ..Settings::default()
        };
        assert_eq!(
            settings.validate().unwrap_err(),
            SettingsError::NegativeDamping(-0.1)
        );
    }

    #[test]
    fn test_zero_damping_allowed() {
        let settings = Settings {
            damping: 0.0,
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_target_rejected() {
        let settings = Settings {
            target_oscillations: 0,
            ..Settings::default()
        };
        assert_eq!(settings.validate().unwrap_err(), SettingsError::ZeroTarget);
    }

    #[test]
    fn test_roundtrip_json() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, back);
    }
}
