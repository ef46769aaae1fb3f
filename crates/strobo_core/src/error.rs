use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Position component of the planar state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    X,
    Y,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::X => write!(f, "x"),
            Component::Y => write!(f, "y"),
        }
    }
}

/// Rejected `SimulationConfig`, surfaced before any integration work.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("orbit count must be at least 1, got {0}")]
    OrbitCount(usize),
    #[error("step count must be at least 2, got {0}")]
    StepCount(usize),
    #[error("time step must be positive and finite, got {0}")]
    TimeStep(f64),
    #[error("stroboscopic stride must satisfy 1 <= k < size, got k = {k} with size = {size}")]
    Stride { k: usize, size: usize },
}

/// An updated state component left the finite domain, typically through
/// exp() overflow on a diverging orbit. The run aborts at the step
/// boundary instead of filling the remaining arrays with NaN.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{component} became non-finite at step {step} (orbit {orbit})")]
pub struct NumericDomainError {
    pub step: usize,
    pub orbit: usize,
    pub component: Component,
}
