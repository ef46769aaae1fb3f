use log::{debug, info};
use serde::Serialize;
use std::f64::consts::PI;

use crate::config::{MapMode, SimulationConfig};
use crate::error::{Component, ConfigError, NumericDomainError};
use crate::phase::floor_mod;
use crate::sampler::StroboscopicSample;
use crate::state::TrajectoryState;

/// Mode-resolved coefficients of the shared update skeleton.
///
/// Both parameterizations advance one step as
///
/// ```text
/// y' = y + gain·(exp(growth·x) − b²)
/// x' = x + gain·(a² − exp(growth·y')) + e·gain·cos(omega·z)
/// z' = (z + phase_step) mod modulus
/// ```
///
/// y first from the old x, then x from the new y and the old z, then the
/// clock. The coupling order changes the numerical trajectory and must
/// not be rearranged.
#[derive(Debug, Clone, Copy)]
struct StepRule {
    gain: f64,
    growth: f64,
    omega: f64,
    phase_step: f64,
    modulus: f64,
}

impl StepRule {
    /// With modular reduction off, the modulus becomes a sentinel instead
    /// of a branch in the step loop: `size·dt` for the time clock (which
    /// gains dt per step and so never reaches it) and `size·2π·dt` for
    /// the angle clock (out of reach whenever the forcing period covers
    /// at least one time unit, the regime the map is driven in).
    fn resolve(mode: MapMode, config: &SimulationConfig) -> Self {
        let dt = config.dt;
        let period = config.period();
        let size = config.size as f64;
        match mode {
            MapMode::Theta => StepRule {
                gain: 2.0 * PI * dt,
                growth: 1.0 / PI,
                omega: 1.0,
                phase_step: 2.0 * PI * dt / period,
                modulus: if config.modular {
                    2.0 * PI
                } else {
                    size * 2.0 * PI * dt
                },
            },
            MapMode::Time => StepRule {
                gain: dt,
                growth: 2.0,
                omega: config.forcing_frequency(),
                phase_step: dt,
                modulus: if config.modular { period } else { size * dt },
            },
        }
    }
}

/// One stroboscopic-map run: a validated configuration plus a freshly
/// seeded state.
///
/// `integrate` consumes the map, so a run has exactly two observable
/// states (unintegrated and integrated) and a solved run can neither be
/// re-entered nor continue from another mode's endpoint. Running both
/// parameterizations of one configuration means building two maps; both
/// start from the same seeded initial row.
#[derive(Debug, Clone)]
pub struct StroboscopicMap {
    config: SimulationConfig,
    state: TrajectoryState,
}

impl StroboscopicMap {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = TrajectoryState::seeded(&config);
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Initial positions of all orbits, before any integration.
    pub fn initial_x(&self) -> &[f64] {
        self.state.x_row(0)
    }

    pub fn initial_y(&self) -> &[f64] {
        self.state.y_row(0)
    }

    /// Advances every orbit through the fixed step budget under the given
    /// parameterization. Aborts with the failing step, orbit and
    /// component as soon as an update leaves the finite domain.
    pub fn integrate(mut self, mode: MapMode) -> Result<MapSolution, NumericDomainError> {
        let rule = StepRule::resolve(mode, &self.config);
        debug!("{} mode: {:?}", mode.as_str(), rule);

        let orbits = self.config.orbits;
        let size = self.config.size;
        let a2 = self.config.a * self.config.a;
        let b2 = self.config.b * self.config.b;
        let e = self.config.e;

        let state = &mut self.state;
        for i in 0..size - 1 {
            let z = state.z[i];
            let forcing = e * rule.gain * (rule.omega * z).cos();
            let row = i * orbits;
            let next = row + orbits;

            for orbit in 0..orbits {
                let x0 = state.x[row + orbit];
                let y0 = state.y[row + orbit];

                let y1 = y0 + rule.gain * ((rule.growth * x0).exp() - b2);
                let x1 = x0 + rule.gain * (a2 - (rule.growth * y1).exp()) + forcing;

                if !y1.is_finite() {
                    info!(
                        "aborting {} mode run: orbit {} diverged at step {}",
                        mode.as_str(),
                        orbit,
                        i + 1
                    );
                    return Err(NumericDomainError {
                        step: i + 1,
                        orbit,
                        component: Component::Y,
                    });
                }
                if !x1.is_finite() {
                    info!(
                        "aborting {} mode run: orbit {} diverged at step {}",
                        mode.as_str(),
                        orbit,
                        i + 1
                    );
                    return Err(NumericDomainError {
                        step: i + 1,
                        orbit,
                        component: Component::X,
                    });
                }

                state.x[next + orbit] = x1;
                state.y[next + orbit] = y1;
            }

            state.z[i + 1] = floor_mod(z + rule.phase_step, rule.modulus);
        }

        info!(
            "integrated {} orbit(s) for {} steps in {} mode",
            orbits,
            size,
            mode.as_str()
        );

        Ok(MapSolution {
            config: self.config,
            mode,
            trajectory: self.state,
        })
    }
}

/// A completed run: the read-only trajectory plus the configuration that
/// produced it, which the presenter reads back for its legend text.
#[derive(Debug, Clone, Serialize)]
pub struct MapSolution {
    pub config: SimulationConfig,
    pub mode: MapMode,
    trajectory: TrajectoryState,
}

impl MapSolution {
    pub fn trajectory(&self) -> &TrajectoryState {
        &self.trajectory
    }

    /// Section points at the configured stride, recomputed on demand.
    pub fn stroboscopic(&self) -> StroboscopicSample {
        StroboscopicSample::from_state(&self.trajectory, self.config.k)
    }
}
