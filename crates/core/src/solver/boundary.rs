//! Static classification of solid boundary voxels.
//!
//! Geometry is data, not per-frame branching: an ordered list of
//! axis-aligned [`SolidRegion`] column footprints. For each (x, z) column
//! the last region covering it wins, and a voxel is solid iff `y` is below
//! the winning region's height. [`classify`] is a pure function of the
//! voxel coordinate and the region list — deterministic, idempotent, and
//! re-run only when the scene geometry changes.

use crate::grid::{Field, GridSize};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One axis-aligned solid column region.
///
/// Ranges are half-open in voxel coordinates. Within the (x, z) footprint,
/// voxels with `y < height` are solid. Later regions in the list override
/// earlier ones, so a lower region carved into a taller one is expressed by
/// listing it second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidRegion {
    pub x_min: i32,
    pub x_max: i32,
    pub z_min: i32,
    pub z_max: i32,
    /// Column is solid for `y < height`
    pub height: i32,
}

impl SolidRegion {
    #[inline]
    fn covers(&self, x: i32, z: i32) -> bool {
        x >= self.x_min && x < self.x_max && z >= self.z_min && z < self.z_max
    }
}

/// Integer extents of the default support structure: a raised platform
/// against the far z face of the grid, with a lower recess where the
/// exhaust column passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureConfig {
    /// Platform height in voxels
    pub base_height: i32,
    /// Height of the lowered recess
    pub recess_height: i32,
    /// Platform half-extent along x, centered on the grid
    pub half_width: i32,
    /// Platform extent along z, measured back from the far z face
    pub depth: i32,
    /// Recess half-extent along x, centered on the grid
    pub recess_half_width: i32,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            base_height: 32,
            recess_height: 16,
            half_width: 36,
            depth: 26,
            recess_half_width: 8,
        }
    }
}

impl StructureConfig {
    /// Expand the extents into the declarative region list for a grid.
    #[must_use]
    pub fn regions(&self, size: GridSize) -> Vec<SolidRegion> {
        let cx = size.nx as i32 / 2;
        let nz = size.nz as i32;
        vec![
            SolidRegion {
                x_min: cx - self.half_width,
                x_max: cx + self.half_width,
                z_min: nz - self.depth,
                z_max: nz,
                height: self.base_height,
            },
            // recess carved into the platform, listed second so it wins
            SolidRegion {
                x_min: cx - self.recess_half_width,
                x_max: cx + self.recess_half_width,
                z_min: nz - self.depth,
                z_max: nz,
                height: self.recess_height,
            },
        ]
    }
}

/// Write the solid mask for every voxel from the region list.
///
/// No side effects beyond the mask; an empty region list marks the whole
/// grid as fluid.
pub fn classify(boundary: &mut Field<bool>, regions: &[SolidRegion]) {
    let size = boundary.size();
    let nx = size.nx;
    let ny = size.ny;

    boundary
        .data
        .par_chunks_mut(size.layer_len())
        .enumerate()
        .for_each(|(z, layer)| {
            // Column heights only vary with x within one z-layer
            let heights: Vec<i32> = (0..nx)
                .map(|x| {
                    regions.iter().fold(0, |height, region| {
                        if region.covers(x as i32, z as i32) {
                            region.height
                        } else {
                            height
                        }
                    })
                })
                .collect();

            for y in 0..ny {
                for x in 0..nx {
                    layer[y * nx + x] = (y as i32) < heights[x];
                }
            }
        });
}
