use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::SimulationConfig;

/// Jointly evolved arrays of one integration run.
///
/// `x` and `y` are flat row-major `size x orbits` buffers: row i holds
/// every orbit's position at step i. `z` is the shared phase clock, one
/// value per step; the perturbation phase is a single scalar, not
/// per-orbit. A state is created by seeding a run and owned by that run
/// exclusively; two runs never touch the same buffers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryState {
    pub orbits: usize,
    pub size: usize,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl TrajectoryState {
    /// Allocates the run's arrays and fills step 0 with independent
    /// uniform [0,1) draws, one per orbit. All x draws are taken before
    /// the y draws; the draw order is part of the reproducibility
    /// contract, so a seed always reproduces the same initial picture.
    pub(crate) fn seeded(config: &SimulationConfig) -> Self {
        let orbits = config.orbits;
        let size = config.size;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let mut x = vec![0.0; size * orbits];
        let mut y = vec![0.0; size * orbits];
        let z = vec![0.0; size];

        for value in &mut x[..orbits] {
            *value = rng.gen::<f64>();
        }
        for value in &mut y[..orbits] {
            *value = rng.gen::<f64>();
        }

        Self {
            orbits,
            size,
            x,
            y,
            z,
        }
    }

    /// Every orbit's x position at the given step.
    pub fn x_row(&self, step: usize) -> &[f64] {
        &self.x[step * self.orbits..(step + 1) * self.orbits]
    }

    /// Every orbit's y position at the given step.
    pub fn y_row(&self, step: usize) -> &[f64] {
        &self.y[step * self.orbits..(step + 1) * self.orbits]
    }
}
