//! Voxel grid storage for the fluid solver.
//!
//! The grid is a dense, fixed-resolution 3D index space. All per-voxel
//! fields live in flat arrays indexed `iz * ny * nx + iy * nx + ix`, so one
//! z-layer is a contiguous `nx * ny` slice — the unit of layer-parallel
//! iteration used by every solver pass.
//!
//! [`FluidGrid`] owns every field the solver touches. Passes borrow read
//! and/or write access to individual fields for the duration of one pass;
//! nothing retains state between passes beyond the explicit double buffers.

mod field;

pub use field::Field;

use crate::core_types::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::mem;

/// Fixed grid dimensions, set once for the simulation's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    /// Number of voxels along x
    pub nx: usize,
    /// Number of voxels along y (vertical)
    pub ny: usize,
    /// Number of voxels along z
    pub nz: usize,
}

impl GridSize {
    /// Create a grid size.
    ///
    /// # Panics
    ///
    /// Panics if any dimension is zero. A zero-sized grid is a precondition
    /// violation the caller must prevent, not a runtime condition.
    #[must_use]
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        assert!(
            nx > 0 && ny > 0 && nz > 0,
            "grid dimensions must be non-zero"
        );
        Self { nx, ny, nz }
    }

    /// Total number of voxels.
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Length of one z-layer slice (`nx * ny`).
    #[must_use]
    pub fn layer_len(&self) -> usize {
        self.nx * self.ny
    }

    /// Flat array index for a voxel coordinate.
    #[inline]
    #[must_use]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < self.nx && y < self.ny && z < self.nz);
        z * (self.ny * self.nx) + y * self.nx + x
    }

    /// Whether a signed voxel coordinate lies inside the grid.
    #[inline]
    #[must_use]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.nx
            && (y as usize) < self.ny
            && (z as usize) < self.nz
    }

    /// Grid dimensions as a float vector, for normalized-coordinate math.
    #[must_use]
    pub fn as_vec3(&self) -> Vec3 {
        Vec3::new(self.nx as f32, self.ny as f32, self.nz as f32)
    }
}

/// Owner of all per-voxel field storage.
///
/// Velocity and density/temperature are double-buffered so advection can
/// read a fully-settled prior state while writing the next one. Pressure is
/// double-buffered for the Jacobi ping-pong within a single timestep; its
/// last iterate carries over as the next step's initial guess unless the
/// scheduler resets it. Divergence and vorticity are scratch fields,
/// recomputed fresh every step.
pub struct FluidGrid {
    size: GridSize,

    /// Solid voxel mask, `true` = impermeable. Written by boundary
    /// classification only; immutable during the simulation loop.
    pub(crate) boundary: Field<bool>,

    // Ping-pong pairs (read from front, advect into back, then swap)
    pub(crate) velocity: Field<Vec3>,
    pub(crate) velocity_back: Field<Vec3>,
    pub(crate) density_temperature: Field<Vec2>,
    pub(crate) density_temperature_back: Field<Vec2>,
    pub(crate) pressure: Field<f32>,
    pub(crate) pressure_back: Field<f32>,

    // Scratch fields, no persistence across steps
    pub(crate) divergence: Field<f32>,
    pub(crate) vorticity: Field<Vec3>,
}

impl FluidGrid {
    /// Allocate a grid with all fields zeroed and no solid voxels.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            boundary: Field::new(size),
            velocity: Field::new(size),
            velocity_back: Field::new(size),
            density_temperature: Field::new(size),
            density_temperature_back: Field::new(size),
            pressure: Field::new(size),
            pressure_back: Field::new(size),
            divergence: Field::new(size),
            vorticity: Field::new(size),
        }
    }

    /// Grid dimensions.
    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Solid voxel mask.
    #[must_use]
    pub fn boundary(&self) -> &Field<bool> {
        &self.boundary
    }

    /// Current velocity field (the renderer-facing buffer).
    #[must_use]
    pub fn velocity(&self) -> &Field<Vec3> {
        &self.velocity
    }

    /// Current density/temperature field (the renderer-facing buffer).
    #[must_use]
    pub fn density_temperature(&self) -> &Field<Vec2> {
        &self.density_temperature
    }

    /// Current pressure estimate (last Jacobi iterate).
    #[must_use]
    pub fn pressure(&self) -> &Field<f32> {
        &self.pressure
    }

    /// Divergence of velocity as computed by the most recent step.
    #[must_use]
    pub fn divergence(&self) -> &Field<f32> {
        &self.divergence
    }

    pub(crate) fn swap_velocity(&mut self) {
        mem::swap(&mut self.velocity, &mut self.velocity_back);
    }

    pub(crate) fn swap_density_temperature(&mut self) {
        mem::swap(&mut self.density_temperature, &mut self.density_temperature_back);
    }

    pub(crate) fn swap_pressure(&mut self) {
        mem::swap(&mut self.pressure, &mut self.pressure_back);
    }

    /// Zero every dynamic field, leaving the boundary mask intact.
    pub fn clear_dynamic(&mut self) {
        self.velocity.fill(Vec3::zeros());
        self.velocity_back.fill(Vec3::zeros());
        self.density_temperature.fill(Vec2::zeros());
        self.density_temperature_back.fill(Vec2::zeros());
        self.pressure.fill(0.0);
        self.pressure_back.fill(0.0);
        self.divergence.fill(0.0);
        self.vorticity.fill(Vec3::zeros());
    }
}
