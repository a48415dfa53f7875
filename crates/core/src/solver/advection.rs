//! Semi-Lagrangian advection with dissipation.
//!
//! For each destination voxel, trace backward along the local velocity to
//! find where its contents came from, then trilinear-sample the previous
//! frame's fields there. Unconditionally stable: the sample position is
//! edge-clamped and the blend never amplifies values.
//!
//! This is the one pass that writes the next frame's buffers; the scheduler
//! swaps them afterwards. Solid voxels are forced to zero here, which is
//! what maintains the boundary invariant every other pass relies on.

use crate::core_types::{Vec2, Vec3};
use crate::grid::Field;
use rayon::prelude::*;

/// Parameters for the advection pass.
#[derive(Debug, Clone, Copy)]
pub struct AdvectionParams {
    /// Timestep in seconds
    pub dt: f32,
    /// Per-step density retention factor, typically in (0, 1]
    pub density_dissipation: f32,
    /// Per-step temperature retention factor
    pub temperature_dissipation: f32,
    /// Per-step velocity retention factor
    pub velocity_dissipation: f32,
}

/// Advect velocity and density/temperature from the `*_in` buffers into the
/// `*_out` buffers.
pub fn apply_advection(
    velocity_out: &mut Field<Vec3>,
    density_temperature_out: &mut Field<Vec2>,
    velocity_in: &Field<Vec3>,
    density_temperature_in: &Field<Vec2>,
    boundary: &Field<bool>,
    params: AdvectionParams,
) {
    let size = velocity_out.size();
    let nx = size.nx;
    let ny = size.ny;
    let layer_len = size.layer_len();

    velocity_out
        .data
        .par_chunks_mut(layer_len)
        .zip(density_temperature_out.data.par_chunks_mut(layer_len))
        .enumerate()
        .for_each(|(z, (vel_layer, dt_layer))| {
            let offset = z * layer_len;
            for y in 0..ny {
                for x in 0..nx {
                    let idx = y * nx + x;

                    if boundary.data[offset + idx] {
                        vel_layer[idx] = Vec3::zeros();
                        dt_layer[idx] = Vec2::zeros();
                        continue;
                    }

                    let here = Vec3::new(x as f32, y as f32, z as f32);
                    let source = here - velocity_in.data[offset + idx] * params.dt;

                    let dt_sampled = density_temperature_in.sample(source);
                    dt_layer[idx] = Vec2::new(
                        (dt_sampled.x * params.density_dissipation).max(0.0),
                        (dt_sampled.y * params.temperature_dissipation).max(0.0),
                    );

                    vel_layer[idx] = velocity_in.sample(source) * params.velocity_dissipation;
                }
            }
        });
}
