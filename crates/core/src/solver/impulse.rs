//! Impulse injection: continuous emission of density, heat, and momentum.
//!
//! Each step adds the configured amounts to every voxel inside a hard-edged
//! axis-aligned cube around the injection center. Addition (not overwrite)
//! is what makes emission continuous across frames.

use crate::core_types::{Vec2, Vec3};
use crate::grid::Field;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Smallest usable injection radius. Configured radii are clamped up to
/// this so the normalized cube test stays well-defined.
pub const MIN_RADIUS: f32 = 1e-3;

/// Injection region and per-step emission amounts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImpulseConfig {
    /// Region center in normalized grid coordinates (0..1 per axis)
    pub center: Vec3,
    /// Region half-extent in normalized grid coordinates
    pub radius: f32,
    /// Density added per step inside the region
    pub density_amount: f32,
    /// Temperature added per step inside the region
    pub temperature_amount: f32,
    /// Velocity added per step inside the region
    pub velocity_amount: Vec3,
}

impl Default for ImpulseConfig {
    fn default() -> Self {
        Self {
            center: Vec3::new(0.5, 0.12, 0.5),
            radius: 0.08,
            density_amount: 1.0,
            temperature_amount: 4.0,
            velocity_amount: Vec3::zeros(),
        }
    }
}

/// Add the configured amounts to every voxel whose normalized offset from
/// the center is within the unit cube. Voxels outside are untouched.
pub fn apply_impulse(
    velocity: &mut Field<Vec3>,
    density_temperature: &mut Field<Vec2>,
    config: &ImpulseConfig,
) {
    let size = velocity.size();
    let map = size.as_vec3();
    let radius = config.radius.max(MIN_RADIUS);
    let nx = size.nx;
    let ny = size.ny;
    let added = Vec2::new(config.density_amount, config.temperature_amount);

    velocity
        .data
        .par_chunks_mut(size.layer_len())
        .zip(density_temperature.data.par_chunks_mut(size.layer_len()))
        .enumerate()
        .for_each(|(z, (vel_layer, dt_layer))| {
            for y in 0..ny {
                for x in 0..nx {
                    let pos = Vec3::new(x as f32 / map.x, y as f32 / map.y, z as f32 / map.z);
                    let rel = (pos - config.center) / radius;

                    // hard-edged cube region, not a sphere
                    if rel.x.abs() <= 1.0 && rel.y.abs() <= 1.0 && rel.z.abs() <= 1.0 {
                        let idx = y * nx + x;
                        vel_layer[idx] += config.velocity_amount;
                        dt_layer[idx] += added;
                    }
                }
            }
        });
}
