use anyhow::{bail, Result};
use nalgebra::DMatrix;
use num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::traits::PlanarFlow;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexNumber {
    pub re: f64,
    pub im: f64,
}

impl From<Complex<f64>> for ComplexNumber {
    fn from(value: Complex<f64>) -> Self {
        Self {
            re: value.re,
            im: value.im,
        }
    }
}

/// Local phase-portrait type at the equilibrium, read off the
/// linearization's eigenvalues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquilibriumKind {
    Center,
    StableSpiral,
    UnstableSpiral,
    StableNode,
    UnstableNode,
    Saddle,
    /// At least one eigenvalue is (numerically) zero; the linearization
    /// does not decide the local picture.
    Degenerate,
}

#[derive(Debug, Clone, Serialize)]
pub struct EquilibriumReport {
    pub state: Vec<f64>,
    /// Drift magnitude at the reported equilibrium; a self-check that
    /// the closed form actually zeroes the field.
    pub residual_norm: f64,
    pub jacobian: Vec<f64>,
    pub eigenvalues: Vec<ComplexNumber>,
    pub kind: EquilibriumKind,
}

/// Evaluates the linearization of `flow` at its closed-form equilibrium.
///
/// The unforced canonical flow linearizes to [[0, −2a²], [2b², 0]] with
/// eigenvalues ±2ab·i, the classical Lotka-Volterra center.
pub fn analyze_equilibrium(flow: &impl PlanarFlow) -> Result<EquilibriumReport> {
    let (x, y) = flow.equilibrium();
    if !x.is_finite() || !y.is_finite() {
        bail!("Equilibrium position is not finite; the chart is degenerate (a = 0 or b = 0).");
    }

    let (u, v) = flow.drift(x, y);
    let residual_norm = u.hypot(v);
    let jacobian = flow.jacobian(x, y);

    let matrix = DMatrix::from_row_slice(2, 2, &jacobian);
    let eigenvalues: Vec<Complex<f64>> = matrix.complex_eigenvalues().iter().copied().collect();
    let kind = classify(&eigenvalues);

    Ok(EquilibriumReport {
        state: vec![x, y],
        residual_norm,
        jacobian: jacobian.to_vec(),
        eigenvalues: eigenvalues.into_iter().map(ComplexNumber::from).collect(),
        kind,
    })
}

fn classify(eigenvalues: &[Complex<f64>]) -> EquilibriumKind {
    let scale = eigenvalues
        .iter()
        .map(|value| value.norm())
        .fold(0.0_f64, f64::max);
    let tol = 1e-9 * scale.max(1.0);

    let complex_pair = eigenvalues.iter().any(|value| value.im.abs() > tol);
    if complex_pair {
        // A real 2x2 matrix yields a conjugate pair; either member
        // carries the shared real part.
        let re = eigenvalues[0].re;
        if re.abs() <= tol {
            EquilibriumKind::Center
        } else if re < 0.0 {
            EquilibriumKind::StableSpiral
        } else {
            EquilibriumKind::UnstableSpiral
        }
    } else if eigenvalues.iter().any(|value| value.re.abs() <= tol) {
        EquilibriumKind::Degenerate
    } else if eigenvalues.iter().all(|value| value.re < 0.0) {
        EquilibriumKind::StableNode
    } else if eigenvalues.iter().all(|value| value.re > 0.0) {
        EquilibriumKind::UnstableNode
    } else {
        EquilibriumKind::Saddle
    }
}

#[cfg(test)]
mod tests {
    use super::{analyze_equilibrium, EquilibriumKind};
    use crate::config::{MapMode, SimulationConfig};
    use crate::flow::{CanonicalFlow, ClassicalLotkaVolterra};
    use crate::traits::PlanarFlow;

    /// Linear field with a prescribed Jacobian and equilibrium at the
    /// origin.
    struct LinearFlow {
        jac: [f64; 4],
    }

    impl PlanarFlow for LinearFlow {
        fn drift(&self, x: f64, y: f64) -> (f64, f64) {
            (
                self.jac[0] * x + self.jac[1] * y,
                self.jac[2] * x + self.jac[3] * y,
            )
        }

        fn equilibrium(&self) -> (f64, f64) {
            (0.0, 0.0)
        }

        fn jacobian(&self, _x: f64, _y: f64) -> [f64; 4] {
            self.jac
        }
    }

    fn assert_err_contains<T: std::fmt::Debug>(result: anyhow::Result<T>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    #[test]
    fn canonical_equilibrium_is_a_center_at_the_origin() {
        let config = SimulationConfig::default();
        for mode in [MapMode::Theta, MapMode::Time] {
            let flow = CanonicalFlow::new(mode, &config);
            let report = analyze_equilibrium(&flow).expect("report should compute");

            assert!(report.state[0].abs() < 1e-15);
            assert!(report.state[1].abs() < 1e-15);
            assert!(report.residual_norm < 1e-12);
            assert_eq!(report.kind, EquilibriumKind::Center);
            for value in &report.eigenvalues {
                assert!(value.re.abs() < 1e-9);
                assert!((value.im.abs() - 2.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn classical_coexistence_point_is_a_center() {
        let flow = ClassicalLotkaVolterra { a: 1.0, b: 2.0 };
        let report = analyze_equilibrium(&flow).expect("report should compute");
        assert_eq!(report.state, vec![2.0, 1.0]);
        assert_eq!(report.residual_norm, 0.0);
        assert_eq!(report.kind, EquilibriumKind::Center);
    }

    #[test]
    fn linearizations_classify_by_eigenvalue_signs() {
        let cases = [
            ([1.0, 0.0, 0.0, -1.0], EquilibriumKind::Saddle),
            ([-1.0, 0.0, 0.0, -2.0], EquilibriumKind::StableNode),
            ([1.0, 0.0, 0.0, 2.0], EquilibriumKind::UnstableNode),
            ([-1.0, 1.0, -1.0, -1.0], EquilibriumKind::StableSpiral),
            ([1.0, 1.0, -1.0, 1.0], EquilibriumKind::UnstableSpiral),
            ([0.0, 0.0, 0.0, 0.0], EquilibriumKind::Degenerate),
        ];
        for (jac, expected) in cases {
            let report = analyze_equilibrium(&LinearFlow { jac }).expect("report should compute");
            assert_eq!(report.kind, expected, "jacobian {jac:?}");
        }
    }

    #[test]
    fn degenerate_chart_parameters_are_rejected() {
        let config = SimulationConfig {
            a: 0.0,
            ..SimulationConfig::default()
        };
        let flow = CanonicalFlow::new(MapMode::Time, &config);
        assert_err_contains(analyze_equilibrium(&flow), "not finite");
    }
}
