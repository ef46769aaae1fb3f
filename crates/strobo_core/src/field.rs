use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::traits::PlanarFlow;

/// One axis of the sampling grid, endpoints included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldAxisSpec {
    pub min: f64,
    pub max: f64,
    pub samples: usize,
}

impl FieldAxisSpec {
    fn validate(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.max <= self.min {
            bail!("{name} axis range must be finite with max > min.");
        }
        if self.samples < 2 {
            bail!("{name} axis needs at least 2 samples.");
        }
        Ok(())
    }

    fn coordinate(&self, index: usize) -> f64 {
        self.min + (self.max - self.min) * index as f64 / (self.samples - 1) as f64
    }
}

/// Velocity grid for the presenter's streamplot.
///
/// `u` and `v` are row-major over the y axis: the value at grid node
/// (i, j) lives at index `j·x.len() + i`, matching a meshgrid of the two
/// coordinate vectors.
#[derive(Debug, Clone, Serialize)]
pub struct FlowField {
    pub t: f64,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub u: Vec<f64>,
    pub v: Vec<f64>,
}

/// Evaluates `flow` on the grid spanned by the two axes, at forcing
/// phase `t`.
pub fn sample_field(
    flow: &impl PlanarFlow,
    t: f64,
    x_axis: FieldAxisSpec,
    y_axis: FieldAxisSpec,
) -> Result<FlowField> {
    if !t.is_finite() {
        bail!("Field phase must be finite.");
    }
    x_axis.validate("x")?;
    y_axis.validate("y")?;

    let x: Vec<f64> = (0..x_axis.samples).map(|i| x_axis.coordinate(i)).collect();
    let y: Vec<f64> = (0..y_axis.samples).map(|j| y_axis.coordinate(j)).collect();

    let mut u = Vec::with_capacity(x.len() * y.len());
    let mut v = Vec::with_capacity(x.len() * y.len());
    for &yj in &y {
        for &xi in &x {
            let (ui, vi) = flow.velocity(t, xi, yj);
            u.push(ui);
            v.push(vi);
        }
    }

    Ok(FlowField { t, x, y, u, v })
}

#[cfg(test)]
mod tests {
    use super::{sample_field, FieldAxisSpec};
    use crate::flow::ClassicalLotkaVolterra;

    fn unit_axis(samples: usize) -> FieldAxisSpec {
        FieldAxisSpec {
            min: 0.0,
            max: 2.0,
            samples,
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
    fn grid_has_meshgrid_shape_and_endpoints() {
        let flow = ClassicalLotkaVolterra { a: 1.0, b: 1.0 };
        let field = sample_field(&flow, 0.0, unit_axis(5), unit_axis(3)).expect("field");
        assert_eq!(field.x.len(), 5);
        assert_eq!(field.y.len(), 3);
        assert_eq!(field.u.len(), 15);
        assert_eq!(field.v.len(), 15);
        assert_eq!(field.x[0], 0.0);
        assert_eq!(field.x[4], 2.0);
        assert_eq!(field.y[2], 2.0);
    }

    #[test]
    fn classical_field_vanishes_at_the_coexistence_point() {
        let flow = ClassicalLotkaVolterra { a: 1.0, b: 1.0 };
        // 3 samples over [0, 2] put a node exactly at (1, 1).
        let field = sample_field(&flow, 0.0, unit_axis(3), unit_axis(3)).expect("field");
        let center = field.x.len() + 1;
        assert_eq!(field.u[center], 0.0);
        assert_eq!(field.v[center], 0.0);
    }

    #[test]
    fn rejects_degenerate_axes() {
        let flow = ClassicalLotkaVolterra { a: 1.0, b: 1.0 };
        assert_err_contains(
            sample_field(&flow, 0.0, unit_axis(1), unit_axis(3)),
            "at least 2 samples",
        );
        assert_err_contains(
            sample_field(
                &flow,
                0.0,
                FieldAxisSpec {
                    min: 1.0,
                    max: 1.0,
                    samples: 3,
                },
                unit_axis(3),
            ),
            "max > min",
        );
        assert_err_contains(
            sample_field(&flow, f64::NAN, unit_axis(3), unit_axis(3)),
            "phase must be finite",
        );
    }
}
