//! Fluid solver passes and the timestep scheduler.
//!
//! Each submodule implements one data-parallel full-grid pass. Every voxel
//! within a pass is independent; a pass runs to completion before the next
//! one starts, which is the only synchronization the stencils need. The
//! [`FluidSimulation`] scheduler owns the pass ordering and the buffer
//! ping-pong.
//!
//! Pass order per timestep:
//!
//! impulse → buoyancy → vorticity (curl) → confinement → divergence →
//! pressure (N Jacobi iterations) → projection → advection → buffer swap
//!
//! Boundary classification is independent of the loop and runs only when
//! the scene geometry changes.

pub mod advection;
pub mod boundary;
pub mod buoyancy;
pub mod divergence;
pub mod impulse;
pub mod pressure;
pub mod projection;
mod simulation;
pub mod vorticity;

// Re-exports
pub use advection::{apply_advection, AdvectionParams};
pub use boundary::{classify, SolidRegion, StructureConfig};
pub use buoyancy::{apply_buoyancy, BuoyancyParams, AMBIENT_TEMPERATURE};
pub use divergence::{compute_divergence, divergence_norm};
pub use impulse::{apply_impulse, ImpulseConfig};
pub use pressure::pressure_iteration;
pub use projection::apply_projection;
pub use simulation::{FluidConfig, FluidSimulation, PressureSeed};
pub use vorticity::{apply_confinement, compute_vorticity, ConfinementParams};
