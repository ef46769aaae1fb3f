use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::ConfigError;

/// Physical meaning of the shared phase clock driving the forcing term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapMode {
    /// Phase is an angle; the forcing reads cos(θ) and the clock advances
    /// by 2π·dt/T per step.
    Theta,
    /// Phase is elapsed time; the forcing reads cos(ω·t) and the clock
    /// advances by dt per step.
    Time,
}

impl MapMode {
    pub fn as_str(self) -> &'static str {
        match self {
            MapMode::Theta => "theta",
            MapMode::Time => "time",
        }
    }
}

/// Immutable parameter record for one integration run.
///
/// `a` and `b` are the coordinates of the unforced equilibrium point, `e`
/// the amplitude of the periodic perturbation and `k` the forcing period
/// in units of `dt` (which doubles as the stroboscopic stride). The
/// `stroboscopic` and `projection` flags are carried through to the
/// output untouched; they only tell the presenter which overlays to draw.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub orbits: usize,
    pub size: usize,
    pub dt: f64,
    pub a: f64,
    pub b: f64,
    pub e: f64,
    pub k: usize,
    pub seed: u64,
    pub stroboscopic: bool,
    pub modular: bool,
    pub projection: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            orbits: 10,
            size: 10_000,
            dt: 0.01,
            a: 1.0,
            b: 1.0,
            e: 0.1,
            k: 100,
            seed: 1,
            stroboscopic: true,
            modular: false,
            projection: true,
        }
    }
}

impl SimulationConfig {
    /// Checks every bound a run relies on. Called once, before any
    /// allocation or integration happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.orbits < 1 {
            return Err(ConfigError::OrbitCount(self.orbits));
        }
        if self.size < 2 {
            return Err(ConfigError::StepCount(self.size));
        }
        if !(self.dt > 0.0) || !self.dt.is_finite() {
            return Err(ConfigError::TimeStep(self.dt));
        }
        if self.k < 1 || self.k >= self.size {
            return Err(ConfigError::Stride {
                k: self.k,
                size: self.size,
            });
        }
        Ok(())
    }

    /// Forcing period T = k·dt.
    pub fn period(&self) -> f64 {
        self.k as f64 * self.dt
    }

    /// Angular frequency ω = 2π/T of the perturbation.
    pub fn forcing_frequency(&self) -> f64 {
        2.0 * PI / self.period()
    }
}
