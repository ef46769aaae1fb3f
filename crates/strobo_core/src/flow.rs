use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::config::{MapMode, SimulationConfig};
use crate::traits::PlanarFlow;

/// Predator-prey flow in the classical coordinates:
/// u = x(a − y), v = y(x − b), with the coexistence equilibrium at (b, a).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassicalLotkaVolterra {
    pub a: f64,
    pub b: f64,
}

impl PlanarFlow for ClassicalLotkaVolterra {
    fn drift(&self, x: f64, y: f64) -> (f64, f64) {
        (x * (self.a - y), y * (x - self.b))
    }

    fn equilibrium(&self) -> (f64, f64) {
        (self.b, self.a)
    }

    fn jacobian(&self, x: f64, y: f64) -> [f64; 4] {
        [self.a - y, -x, y, x - self.b]
    }
}

/// The continuous flow each map parameterization discretizes, in the
/// canonical (log) coordinates:
///
/// ```text
/// u = scale·(a² − exp(growth·y)) + e·scale·cos(omega·t)
/// v = scale·(exp(growth·x) − b²)
/// ```
///
/// Theta-mode runs on one angle turn per forcing period (scale 2π,
/// growth 1/π, unit frequency); Time-mode runs in plain time units
/// (scale 1, growth 2, frequency 2π/T).
#[derive(Debug, Clone, Copy)]
pub struct CanonicalFlow {
    a: f64,
    b: f64,
    e: f64,
    scale: f64,
    growth: f64,
    omega: f64,
}

impl CanonicalFlow {
    pub fn new(mode: MapMode, config: &SimulationConfig) -> Self {
        let (scale, growth, omega) = match mode {
            MapMode::Theta => (2.0 * PI, 1.0 / PI, 1.0),
            MapMode::Time => (1.0, 2.0, config.forcing_frequency()),
        };
        Self {
            a: config.a,
            b: config.b,
            e: config.e,
            scale,
            growth,
            omega,
        }
    }
}

impl PlanarFlow for CanonicalFlow {
    fn drift(&self, x: f64, y: f64) -> (f64, f64) {
        let u = self.scale * (self.a * self.a - (self.growth * y).exp());
        let v = self.scale * ((self.growth * x).exp() - self.b * self.b);
        (u, v)
    }

    fn forcing(&self, t: f64) -> f64 {
        self.e * self.scale * (self.omega * t).cos()
    }

    /// Solves exp(growth·x) = b², exp(growth·y) = a². Degenerate for
    /// a = 0 or b = 0, where the log has no finite solution.
    fn equilibrium(&self) -> (f64, f64) {
        (
            (self.b * self.b).ln() / self.growth,
            (self.a * self.a).ln() / self.growth,
        )
    }

    fn jacobian(&self, x: f64, y: f64) -> [f64; 4] {
        let du_dy = -self.scale * self.growth * (self.growth * y).exp();
        let dv_dx = self.scale * self.growth * (self.growth * x).exp();
        [0.0, du_dy, dv_dx, 0.0]
    }
}
