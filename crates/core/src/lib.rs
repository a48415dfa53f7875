//! Plume Simulation Core Library
//!
//! A real-time grid solver for incompressible, buoyant gas (smoke and
//! fire-like plumes) on a fixed-resolution 3D voxel grid. Each timestep runs
//! a fixed sequence of data-parallel passes:
//!
//! 1. Impulse injection (continuous emission of density, heat, and momentum)
//! 2. Buoyancy (hot gas rises, dense gas sinks)
//! 3. Vorticity confinement (restores small-scale rotational detail)
//! 4. Divergence, Jacobi pressure solve, and projection (incompressibility)
//! 5. Semi-Lagrangian advection with dissipation
//!
//! The solver produces a velocity field and a density/temperature field that
//! an external renderer consumes after each completed step. Solid voxels are
//! classified once from procedural structure geometry and respected by every
//! pass that touches a boundary.
//!
//! This is a stable, approximate real-time method (Stam-style), not a
//! validated CFD engine.

// Core types and utilities
pub mod core_types;

// Grid storage and sampling
pub mod grid;

// Per-pass solver kernels and the timestep scheduler
pub mod solver;

// Re-export core types
pub use core_types::{Vec2, Vec3};

// Re-export grid types
pub use grid::{Field, FluidGrid, GridSize};

// Re-export solver types
pub use solver::{
    FluidConfig, FluidSimulation, ImpulseConfig, PressureSeed, SolidRegion, StructureConfig,
};
