//! Buoyancy force for hot, smoke-laden gas.
//!
//! Voxels hotter than the ambient temperature get an upward velocity kick
//! proportional to their excess temperature, opposed by the weight of the
//! smoke density they carry. The force is purely local — no neighbor reads.

use crate::core_types::{Vec2, Vec3};
use crate::grid::Field;
use rayon::prelude::*;

/// Ambient temperature the gas relaxes toward. Temperatures at or below
/// this produce no buoyant force.
pub const AMBIENT_TEMPERATURE: f32 = 0.0;

/// Parameters for the buoyancy pass.
#[derive(Debug, Clone, Copy)]
pub struct BuoyancyParams {
    /// Timestep in seconds
    pub dt: f32,
    /// Upward force per unit of excess temperature
    pub density_buoyancy: f32,
    /// Downward force per unit of smoke density
    pub density_weight: f32,
}

/// Add the buoyancy force to the vertical velocity of every non-solid
/// voxel. Solid voxels keep the forced-zero velocity the boundary
/// convention maintains for them.
pub fn apply_buoyancy(
    velocity: &mut Field<Vec3>,
    density_temperature: &Field<Vec2>,
    boundary: &Field<bool>,
    params: BuoyancyParams,
) {
    let size = velocity.size();
    let layer_len = size.layer_len();

    velocity
        .data
        .par_chunks_mut(layer_len)
        .enumerate()
        .for_each(|(z, vel_layer)| {
            let offset = z * layer_len;
            for (idx, vel) in vel_layer.iter_mut().enumerate() {
                if boundary.data[offset + idx] {
                    continue;
                }
                let dt_value = density_temperature.data[offset + idx];
                if dt_value.y > AMBIENT_TEMPERATURE {
                    vel.y += params.dt * (dt_value.y - AMBIENT_TEMPERATURE) * params.density_buoyancy
                        - dt_value.x * params.density_weight;
                }
            }
        });
}
