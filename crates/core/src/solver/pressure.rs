//! Jacobi relaxation for the pressure Poisson equation `∇²p = div`.
//!
//! Each call is one iteration: every voxel reads the six neighbor values
//! from the prior iterate only, so all voxels update concurrently with no
//! intra-pass dependency. The caller ping-pongs two buffers between
//! iterations — an iteration never reads the buffer it writes.
//!
//! A neighbor beyond the grid or inside a solid voxel is replaced by the
//! center voxel's own prior pressure (zero-gradient Neumann boundary —
//! pressure does not flow through walls).
//!
//! The method is a fixed-point iteration with a configured count; it is not
//! guaranteed to fully converge, and the residual divergence left after
//! projection is an accepted accuracy trade-off, not an error.

use crate::grid::Field;
use rayon::prelude::*;

/// Prior-iterate pressure at a neighbor, substituting the center value for
/// out-of-grid or solid neighbors.
#[inline]
fn neighbor_pressure(
    pressure_in: &Field<f32>,
    boundary: &Field<bool>,
    x: i32,
    y: i32,
    z: i32,
    center: f32,
) -> f32 {
    let size = pressure_in.size();
    if !size.contains(x, y, z) {
        return center;
    }
    let idx = size.index(x as usize, y as usize, z as usize);
    if boundary.data[idx] {
        center
    } else {
        pressure_in.data[idx]
    }
}

/// Run one Jacobi iteration, reading `pressure_in` and writing
/// `pressure_out`.
pub fn pressure_iteration(
    pressure_out: &mut Field<f32>,
    pressure_in: &Field<f32>,
    divergence: &Field<f32>,
    boundary: &Field<bool>,
) {
    let size = pressure_out.size();
    let nx = size.nx;
    let ny = size.ny;
    let layer_len = size.layer_len();

    pressure_out
        .data
        .par_chunks_mut(layer_len)
        .enumerate()
        .for_each(|(z, layer)| {
            let offset = z * layer_len;
            let z = z as i32;
            for y in 0..ny {
                for x in 0..nx {
                    let (xi, yi) = (x as i32, y as i32);
                    let idx = y * nx + x;
                    let center = pressure_in.data[offset + idx];

                    let left = neighbor_pressure(pressure_in, boundary, xi - 1, yi, z, center);
                    let right = neighbor_pressure(pressure_in, boundary, xi + 1, yi, z, center);
                    let bottom = neighbor_pressure(pressure_in, boundary, xi, yi - 1, z, center);
                    let top = neighbor_pressure(pressure_in, boundary, xi, yi + 1, z, center);
                    let back = neighbor_pressure(pressure_in, boundary, xi, yi, z - 1, center);
                    let front = neighbor_pressure(pressure_in, boundary, xi, yi, z + 1, center);

                    layer[idx] = (left + right + bottom + top + back + front
                        - divergence.data[offset + idx])
                        / 6.0;
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSize;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_pressure_is_a_fixed_point() {
        let size = GridSize::new(4, 4, 4);
        let mut pressure_in: Field<f32> = Field::new(size);
        pressure_in.fill(3.0);
        let divergence: Field<f32> = Field::new(size);
        let boundary: Field<bool> = Field::new(size);
        let mut pressure_out: Field<f32> = Field::new(size);

        pressure_iteration(&mut pressure_out, &pressure_in, &divergence, &boundary);

        // With zero divergence, a constant field stays constant (the grid
        // edges already substitute the center value)
        assert!(pressure_out.data.iter().all(|&p| (p - 3.0).abs() < 1e-6));
    }

    #[test]
    fn test_solid_neighbor_uses_own_pressure() {
        let size = GridSize::new(5, 5, 5);
        let mut pressure_in: Field<f32> = Field::new(size);
        for (i, p) in pressure_in.data.iter_mut().enumerate() {
            *p = i as f32 * 0.01;
        }
        // The solid neighbor's stored pressure is garbage on purpose
        pressure_in.set(3, 2, 2, 1e6);
        let mut boundary: Field<bool> = Field::new(size);
        boundary.set(3, 2, 2, true);
        let divergence: Field<f32> = Field::new(size);

        let mut with_solid: Field<f32> = Field::new(size);
        pressure_iteration(&mut with_solid, &pressure_in, &divergence, &boundary);

        // Reference: replace the solid neighbor's value with the center's
        // own pressure and run with no boundary at all
        let mut reference_in = pressure_in.clone();
        reference_in.set(3, 2, 2, pressure_in.get(2, 2, 2));
        let no_boundary: Field<bool> = Field::new(size);
        let mut reference: Field<f32> = Field::new(size);
        pressure_iteration(&mut reference, &reference_in, &divergence, &no_boundary);

        assert_relative_eq!(with_solid.get(2, 2, 2), reference.get(2, 2, 2));
    }

    #[test]
    fn test_divergence_source_lowers_pressure() {
        let size = GridSize::new(3, 3, 3);
        let pressure_in: Field<f32> = Field::new(size);
        let mut divergence: Field<f32> = Field::new(size);
        divergence.set(1, 1, 1, 6.0);
        let boundary: Field<bool> = Field::new(size);
        let mut pressure_out: Field<f32> = Field::new(size);

        pressure_iteration(&mut pressure_out, &pressure_in, &divergence, &boundary);

        assert_relative_eq!(pressure_out.get(1, 1, 1), -1.0);
    }
}
