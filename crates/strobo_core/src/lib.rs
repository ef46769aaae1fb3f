//! The `strobo_core` crate computes stroboscopic (Poincaré) maps of a
//! periodically forced planar Lotka-Volterra flow: many independent orbits
//! advanced by a fixed-step, sequentially coupled explicit scheme, driven
//! by one shared phase clock and subsampled once per forcing period.
//!
//! Key components:
//! - **config**: validated `SimulationConfig` plus the `MapMode` tag
//!   selecting the phase variable's meaning (angle vs. elapsed time).
//! - **map**: the batched integrator (`StroboscopicMap` → `MapSolution`).
//! - **sampler**: periodic subsampling into section points.
//! - **traits / flow**: the `PlanarFlow` seam and the concrete charts
//!   (classical and canonical coordinates).
//! - **equilibrium / field**: linearization reports and velocity grids
//!   for an external plotting frontend.
pub mod config;
pub mod equilibrium;
pub mod error;
pub mod field;
pub mod flow;
pub mod map;
pub mod phase;
pub mod sampler;
pub mod state;
pub mod traits;
