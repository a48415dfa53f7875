//! Timestep scheduler for the fluid solver.
//!
//! [`FluidSimulation`] owns the grid and runs the fixed pass sequence once
//! per [`step`](FluidSimulation::step). Every pass is a data-parallel
//! full-grid sweep that returns only when all voxels are done, so the call
//! boundary between passes is the barrier the stencils rely on — no pass
//! ever observes a partially-written field from another pass.

use super::advection::{apply_advection, AdvectionParams};
use super::boundary::{classify, SolidRegion, StructureConfig};
use super::buoyancy::{apply_buoyancy, BuoyancyParams};
use super::divergence::{compute_divergence, divergence_norm};
use super::impulse::{apply_impulse, ImpulseConfig};
use super::pressure::pressure_iteration;
use super::projection::apply_projection;
use super::vorticity::{apply_confinement, compute_vorticity, ConfinementParams};
use crate::core_types::{Vec2, Vec3};
use crate::grid::{Field, FluidGrid, GridSize};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Initial-guess policy for the Jacobi pressure solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureSeed {
    /// Seed each step with the previous step's final iterate. The solve
    /// starts closer to the solution when the flow changes slowly.
    Warm,
    /// Zero the pressure field before each solve.
    Reset,
}

/// Solver configuration supplied by the surrounding application.
///
/// Grid dimensions are fixed for the simulation's lifetime; everything else
/// may be tuned between steps through
/// [`config_mut`](FluidSimulation::config_mut).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FluidConfig {
    /// Grid dimensions in voxels
    pub size: GridSize,
    /// Seconds per simulation step
    pub delta_time: f32,
    /// Per-step density retention, typically in (0, 1]
    pub density_dissipation: f32,
    /// Per-step temperature retention
    pub temperature_dissipation: f32,
    /// Per-step velocity retention
    pub velocity_dissipation: f32,
    /// Upward force per unit of excess temperature
    pub density_buoyancy: f32,
    /// Downward force per unit of smoke density
    pub density_weight: f32,
    /// Strength of the vorticity confinement force
    pub vorticity_strength: f32,
    /// Jacobi iterations per step. Higher counts trade compute for a more
    /// accurate (closer to divergence-free) solve.
    pub pressure_iterations: usize,
    /// Initial-guess policy for the pressure solve
    pub pressure_seed: PressureSeed,
    /// Emission region and amounts
    pub impulse: ImpulseConfig,
    /// Procedural boundary structure extents
    pub structure: StructureConfig,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            size: GridSize::new(128, 128, 128),
            delta_time: 0.1,
            density_dissipation: 0.995,
            temperature_dissipation: 0.98,
            velocity_dissipation: 0.99,
            density_buoyancy: 1.0,
            density_weight: 0.05,
            vorticity_strength: 2.0,
            pressure_iterations: 10,
            pressure_seed: PressureSeed::Warm,
            impulse: ImpulseConfig::default(),
            structure: StructureConfig::default(),
        }
    }
}

/// The per-frame fluid solver: grid state plus the pass scheduler.
pub struct FluidSimulation {
    grid: FluidGrid,
    config: FluidConfig,
    geometry: Vec<SolidRegion>,
    frame: u64,
}

impl FluidSimulation {
    /// Allocate the grid and classify the boundary mask from the
    /// configured structure geometry.
    #[must_use]
    pub fn new(config: FluidConfig) -> Self {
        let mut grid = FluidGrid::new(config.size);
        let geometry = config.structure.regions(config.size);
        classify(&mut grid.boundary, &geometry);

        info!(
            "created {}x{}x{} fluid grid ({} solid regions, {} pressure iterations)",
            config.size.nx,
            config.size.ny,
            config.size.nz,
            geometry.len(),
            config.pressure_iterations
        );

        Self {
            grid,
            config,
            geometry,
            frame: 0,
        }
    }

    /// Replace the boundary geometry and reclassify the mask. Needed only
    /// when the scene changes; the mask is immutable during normal
    /// stepping.
    pub fn set_geometry(&mut self, regions: Vec<SolidRegion>) {
        self.geometry = regions;
        classify(&mut self.grid.boundary, &self.geometry);
        info!("reclassified boundary from {} regions", self.geometry.len());
    }

    /// Advance the fluid state by one timestep.
    pub fn step(&mut self) {
        apply_impulse(
            &mut self.grid.velocity,
            &mut self.grid.density_temperature,
            &self.config.impulse,
        );

        apply_buoyancy(
            &mut self.grid.velocity,
            &self.grid.density_temperature,
            &self.grid.boundary,
            BuoyancyParams {
                dt: self.config.delta_time,
                density_buoyancy: self.config.density_buoyancy,
                density_weight: self.config.density_weight,
            },
        );

        compute_vorticity(&mut self.grid.vorticity, &self.grid.velocity);
        apply_confinement(
            &mut self.grid.velocity,
            &self.grid.vorticity,
            ConfinementParams {
                dt: self.config.delta_time,
                vorticity_strength: self.config.vorticity_strength,
            },
        );

        compute_divergence(
            &mut self.grid.divergence,
            &self.grid.velocity,
            &self.grid.boundary,
        );
        self.solve_pressure();
        apply_projection(
            &mut self.grid.velocity,
            &self.grid.pressure,
            &self.grid.boundary,
        );

        apply_advection(
            &mut self.grid.velocity_back,
            &mut self.grid.density_temperature_back,
            &self.grid.velocity,
            &self.grid.density_temperature,
            &self.grid.boundary,
            AdvectionParams {
                dt: self.config.delta_time,
                density_dissipation: self.config.density_dissipation,
                temperature_dissipation: self.config.temperature_dissipation,
                velocity_dissipation: self.config.velocity_dissipation,
            },
        );
        self.grid.swap_velocity();
        self.grid.swap_density_temperature();

        self.frame += 1;
        debug!("fluid step {} complete", self.frame);
    }

    /// Run the configured number of Jacobi iterations, ping-ponging the
    /// two pressure buffers so an iteration never reads what it writes.
    fn solve_pressure(&mut self) {
        if self.config.pressure_seed == PressureSeed::Reset {
            self.grid.pressure.fill(0.0);
        }
        for _ in 0..self.config.pressure_iterations {
            pressure_iteration(
                &mut self.grid.pressure_back,
                &self.grid.pressure,
                &self.grid.divergence,
                &self.grid.boundary,
            );
            self.grid.swap_pressure();
        }
    }

    /// Zero all dynamic fields, keeping the boundary mask and geometry.
    pub fn reset(&mut self) {
        self.grid.clear_dynamic();
        self.frame = 0;
        info!("fluid state reset");
    }

    /// The grid, including renderer-facing field accessors.
    #[must_use]
    pub fn grid(&self) -> &FluidGrid {
        &self.grid
    }

    /// Current velocity field.
    #[must_use]
    pub fn velocity(&self) -> &Field<Vec3> {
        self.grid.velocity()
    }

    /// Current density/temperature field.
    #[must_use]
    pub fn density_temperature(&self) -> &Field<Vec2> {
        self.grid.density_temperature()
    }

    /// Solid voxel mask.
    #[must_use]
    pub fn boundary(&self) -> &Field<bool> {
        self.grid.boundary()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &FluidConfig {
        &self.config
    }

    /// Mutable configuration for between-step tuning. Grid dimensions must
    /// not be changed through this.
    pub fn config_mut(&mut self) -> &mut FluidConfig {
        &mut self.config
    }

    /// Completed step count.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Sum of squared divergence of the current velocity field, for
    /// convergence monitoring.
    #[must_use]
    pub fn divergence_norm(&self) -> f32 {
        divergence_norm(&self.grid.velocity, &self.grid.boundary)
    }
}
