//! Vorticity computation and confinement.
//!
//! Semi-Lagrangian advection and the coarse grid damp out small-scale
//! rotation that real smoke keeps. Confinement reinjects it: compute the
//! curl of velocity, find where rotation peaks, and push velocity around
//! those peaks.
//!
//! # References
//!
//! - Fedkiw, R., Stam, J., Jensen, H.W. (2001). "Visual Simulation of Smoke."
//!   SIGGRAPH '01.
//!
//! Neighbor samples in both passes clamp to the grid extent only — boundary
//! solidity is deliberately not checked here, matching the divergence-free
//! projection handling walls on its own.

use crate::core_types::Vec3;
use crate::grid::Field;
use rayon::prelude::*;

/// Epsilon added to the vorticity-magnitude gradient before normalization,
/// so a near-zero gradient cannot blow up into a huge direction vector.
pub const ETA_EPSILON: f32 = 0.001;

/// Parameters for the confinement pass.
#[derive(Debug, Clone, Copy)]
pub struct ConfinementParams {
    /// Timestep in seconds
    pub dt: f32,
    /// Strength of the reinjected rotational force
    pub vorticity_strength: f32,
}

/// Compute the discrete curl of velocity into the vorticity field via
/// central differences of the six axis-neighbors.
pub fn compute_vorticity(vorticity: &mut Field<Vec3>, velocity: &Field<Vec3>) {
    let size = vorticity.size();
    let nx = size.nx;
    let ny = size.ny;

    vorticity
        .data
        .par_chunks_mut(size.layer_len())
        .enumerate()
        .for_each(|(z, layer)| {
            let z = z as i32;
            for y in 0..ny {
                for x in 0..nx {
                    let (xi, yi) = (x as i32, y as i32);
                    let left = velocity.at_clamped(xi - 1, yi, z);
                    let right = velocity.at_clamped(xi + 1, yi, z);
                    let bottom = velocity.at_clamped(xi, yi - 1, z);
                    let top = velocity.at_clamped(xi, yi + 1, z);
                    let back = velocity.at_clamped(xi, yi, z - 1);
                    let front = velocity.at_clamped(xi, yi, z + 1);

                    layer[y * nx + x] = Vec3::new(
                        (top.z - bottom.z) - (front.y - back.y),
                        (front.x - back.x) - (right.z - left.z),
                        (right.y - left.y) - (top.x - bottom.x),
                    ) * 0.5;
                }
            }
        });
}

/// Apply the confinement force: the gradient of vorticity magnitude,
/// normalized, crossed with the local vorticity vector.
pub fn apply_confinement(
    velocity: &mut Field<Vec3>,
    vorticity: &Field<Vec3>,
    params: ConfinementParams,
) {
    let size = velocity.size();
    let nx = size.nx;
    let ny = size.ny;
    let layer_len = size.layer_len();
    let scale = params.dt * params.vorticity_strength;

    velocity
        .data
        .par_chunks_mut(layer_len)
        .enumerate()
        .for_each(|(z, vel_layer)| {
            let offset = z * layer_len;
            let z = z as i32;
            for y in 0..ny {
                for x in 0..nx {
                    let (xi, yi) = (x as i32, y as i32);
                    let omega = vorticity.data[offset + y * nx + x];

                    let left = vorticity.at_clamped(xi - 1, yi, z).norm();
                    let right = vorticity.at_clamped(xi + 1, yi, z).norm();
                    let bottom = vorticity.at_clamped(xi, yi - 1, z).norm();
                    let top = vorticity.at_clamped(xi, yi + 1, z).norm();
                    let back = vorticity.at_clamped(xi, yi, z - 1).norm();
                    let front = vorticity.at_clamped(xi, yi, z + 1).norm();

                    let eta = Vec3::new(right - left, top - bottom, front - back) * 0.5;
                    let eta = eta.add_scalar(ETA_EPSILON).normalize();

                    vel_layer[y * nx + x] += eta.cross(&omega) * scale;
                }
            }
        });
}
