//! Discrete divergence of the velocity field.
//!
//! A neighbor beyond the grid or inside a solid voxel contributes zero
//! velocity — solid walls are impermeable, so no flow crosses them. The
//! field is recomputed fresh every timestep; it has no history.

use crate::core_types::Vec3;
use crate::grid::Field;
use rayon::prelude::*;

/// Velocity at a neighbor coordinate for divergence purposes: zero when
/// out-of-grid or solid, the stored value otherwise.
#[inline]
fn neighbor_velocity(
    velocity: &Field<Vec3>,
    boundary: &Field<bool>,
    x: i32,
    y: i32,
    z: i32,
) -> Vec3 {
    let size = velocity.size();
    if !size.contains(x, y, z) {
        return Vec3::zeros();
    }
    let idx = size.index(x as usize, y as usize, z as usize);
    if boundary.data[idx] {
        Vec3::zeros()
    } else {
        velocity.data[idx]
    }
}

/// Compute the central-difference divergence of velocity for every voxel.
pub fn compute_divergence(
    divergence: &mut Field<f32>,
    velocity: &Field<Vec3>,
    boundary: &Field<bool>,
) {
    let size = divergence.size();
    let nx = size.nx;
    let ny = size.ny;

    divergence
        .data
        .par_chunks_mut(size.layer_len())
        .enumerate()
        .for_each(|(z, layer)| {
            let z = z as i32;
            for y in 0..ny {
                for x in 0..nx {
                    let (xi, yi) = (x as i32, y as i32);
                    let left = neighbor_velocity(velocity, boundary, xi - 1, yi, z);
                    let right = neighbor_velocity(velocity, boundary, xi + 1, yi, z);
                    let bottom = neighbor_velocity(velocity, boundary, xi, yi - 1, z);
                    let top = neighbor_velocity(velocity, boundary, xi, yi + 1, z);
                    let back = neighbor_velocity(velocity, boundary, xi, yi, z - 1);
                    let front = neighbor_velocity(velocity, boundary, xi, yi, z + 1);

                    layer[y * nx + x] =
                        0.5 * ((right.x - left.x) + (top.y - bottom.y) + (front.z - back.z));
                }
            }
        });
}

/// Sum of squared divergence over the whole grid — a diagnostic for how far
/// the current velocity field is from divergence-free.
#[must_use]
pub fn divergence_norm(velocity: &Field<Vec3>, boundary: &Field<bool>) -> f32 {
    let size = velocity.size();
    let nx = size.nx;
    let ny = size.ny;

    (0..size.nz)
        .into_par_iter()
        .map(|z| {
            let z = z as i32;
            let mut sum = 0.0;
            for y in 0..ny {
                for x in 0..nx {
                    let (xi, yi) = (x as i32, y as i32);
                    let left = neighbor_velocity(velocity, boundary, xi - 1, yi, z);
                    let right = neighbor_velocity(velocity, boundary, xi + 1, yi, z);
                    let bottom = neighbor_velocity(velocity, boundary, xi, yi - 1, z);
                    let top = neighbor_velocity(velocity, boundary, xi, yi + 1, z);
                    let back = neighbor_velocity(velocity, boundary, xi, yi, z - 1);
                    let front = neighbor_velocity(velocity, boundary, xi, yi, z + 1);

                    let div =
                        0.5 * ((right.x - left.x) + (top.y - bottom.y) + (front.z - back.z));
                    sum += div * div;
                }
            }
            sum
        })
        .sum()
}
