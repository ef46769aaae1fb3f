use serde::Serialize;

use crate::state::TrajectoryState;

/// Poincaré-section view of a trajectory: the rows at steps 0, k, 2k, …
/// strictly below the step budget. Derived after integration and never
/// mutated; a trailing partial period is dropped rather than padded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StroboscopicSample {
    pub orbits: usize,
    pub count: usize,
    pub stride: usize,
    pub xp: Vec<f64>,
    pub yp: Vec<f64>,
    pub zp: Vec<f64>,
}

impl StroboscopicSample {
    /// Subsamples every `stride`-th row of the trajectory, starting at
    /// step 0. Pure and idempotent; a stride at or beyond the step budget
    /// degenerates to the single initial row.
    pub fn from_state(state: &TrajectoryState, stride: usize) -> Self {
        assert!(stride >= 1, "stroboscopic stride must be at least 1");

        let orbits = state.orbits;
        let count = (state.size + stride - 1) / stride;

        let mut xp = Vec::with_capacity(count * orbits);
        let mut yp = Vec::with_capacity(count * orbits);
        let mut zp = Vec::with_capacity(count);

        for step in (0..state.size).step_by(stride) {
            xp.extend_from_slice(state.x_row(step));
            yp.extend_from_slice(state.y_row(step));
            zp.push(state.z[step]);
        }

        Self {
            orbits,
            count,
            stride,
            xp,
            yp,
            zp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StroboscopicSample;
    use crate::state::TrajectoryState;

    /// 5 steps x 2 orbits with recognizable values: x[step][orbit] is
    /// 10*step + orbit, y is its negative, z counts steps.
    fn staircase_state() -> TrajectoryState {
        let size = 5;
        let orbits = 2;
        let mut x = Vec::with_capacity(size * orbits);
        for step in 0..size {
            for orbit in 0..orbits {
                x.push((10 * step + orbit) as f64);
            }
        }
        let y: Vec<f64> = x.iter().map(|v| -v).collect();
        let z: Vec<f64> = (0..size).map(|step| step as f64).collect();
        TrajectoryState {
            orbits,
            size,
            x,
            y,
            z,
        }
    }

    #[test]
    fn takes_exactly_the_strided_rows() {
        let state = staircase_state();
        let sample = StroboscopicSample::from_state(&state, 2);
        assert_eq!(sample.count, 3);
        assert_eq!(sample.xp, vec![0.0, 1.0, 20.0, 21.0, 40.0, 41.0]);
        assert_eq!(sample.yp, vec![-0.0, -1.0, -20.0, -21.0, -40.0, -41.0]);
        assert_eq!(sample.zp, vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn stride_one_is_the_identity() {
        let state = staircase_state();
        let sample = StroboscopicSample::from_state(&state, 1);
        assert_eq!(sample.count, state.size);
        assert_eq!(sample.xp, state.x);
        assert_eq!(sample.zp, state.z);
    }

    #[test]
    fn trailing_partial_period_is_dropped() {
        let state = staircase_state();
        // size 5, stride 3: rows 0 and 3; row 6 does not exist.
        let sample = StroboscopicSample::from_state(&state, 3);
        assert_eq!(sample.count, 2);
        assert_eq!(sample.zp, vec![0.0, 3.0]);
    }

    #[test]
    fn boundary_strides_degenerate_cleanly() {
        let state = staircase_state();

        // stride = size - 1: exactly the first and last-but-none rows.
        let sample = StroboscopicSample::from_state(&state, 4);
        assert_eq!(sample.count, 2);
        assert_eq!(sample.zp, vec![0.0, 4.0]);

        // stride >= size: only the initial row survives.
        let sample = StroboscopicSample::from_state(&state, 7);
        assert_eq!(sample.count, 1);
        assert_eq!(sample.xp, vec![0.0, 1.0]);
    }

    #[test]
    fn sampling_is_idempotent_for_unchanged_input() {
        let state = staircase_state();
        let first = StroboscopicSample::from_state(&state, 2);
        let second = StroboscopicSample::from_state(&state, 2);
        assert_eq!(first, second);
    }
}
