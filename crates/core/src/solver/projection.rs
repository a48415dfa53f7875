//! Pressure projection: subtract the pressure gradient from velocity.
//!
//! Removes the divergent part of the field, leaving it approximately
//! divergence-free and consistent with solid boundaries. Along any axis
//! where either neighbor is out-of-grid or solid, the wall-normal velocity
//! component is zeroed outright after the subtraction — flow must not enter
//! a wall, so no substituted gradient value is good enough there.

use crate::core_types::Vec3;
use crate::grid::Field;
use rayon::prelude::*;

/// Pressure at a neighbor, flagging walls: returns the center value and
/// `true` when the neighbor is out-of-grid or solid.
#[inline]
fn neighbor_pressure(
    pressure: &Field<f32>,
    boundary: &Field<bool>,
    x: i32,
    y: i32,
    z: i32,
    center: f32,
) -> (f32, bool) {
    let size = pressure.size();
    if !size.contains(x, y, z) {
        return (center, true);
    }
    let idx = size.index(x as usize, y as usize, z as usize);
    if boundary.data[idx] {
        (center, true)
    } else {
        (pressure.data[idx], false)
    }
}

/// Subtract half the pressure gradient from velocity, zeroing the
/// component along every wall-adjacent axis.
pub fn apply_projection(
    velocity: &mut Field<Vec3>,
    pressure: &Field<f32>,
    boundary: &Field<bool>,
) {
    let size = velocity.size();
    let nx = size.nx;
    let ny = size.ny;
    let layer_len = size.layer_len();

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
                    let idx = y * nx + x;
                    let center = pressure.data[offset + idx];

                    let (left, wall_left) =
                        neighbor_pressure(pressure, boundary, xi - 1, yi, z, center);
                    let (right, wall_right) =
                        neighbor_pressure(pressure, boundary, xi + 1, yi, z, center);
                    let (bottom, wall_bottom) =
                        neighbor_pressure(pressure, boundary, xi, yi - 1, z, center);
                    let (top, wall_top) =
                        neighbor_pressure(pressure, boundary, xi, yi + 1, z, center);
                    let (back, wall_back) =
                        neighbor_pressure(pressure, boundary, xi, yi, z - 1, center);
                    let (front, wall_front) =
                        neighbor_pressure(pressure, boundary, xi, yi, z + 1, center);

                    let mask = Vec3::new(
                        if wall_left || wall_right { 0.0 } else { 1.0 },
                        if wall_bottom || wall_top { 0.0 } else { 1.0 },
                        if wall_back || wall_front { 0.0 } else { 1.0 },
                    );

                    let gradient = Vec3::new(right - left, top - bottom, front - back) * 0.5;
                    vel_layer[idx] = (vel_layer[idx] - gradient).component_mul(&mask);
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
    fn test_gradient_subtraction_in_free_interior() {
        // An 8-wide grid keeps voxel (4,4,4) away from the edge walls
        let size = GridSize::new(8, 8, 8);
        let mut velocity: Field<Vec3> = Field::new(size);
        velocity.set(4, 4, 4, Vec3::new(1.0, 1.0, 1.0));

        let mut pressure: Field<f32> = Field::new(size);
        pressure.set(5, 4, 4, 2.0);
        pressure.set(3, 4, 4, 0.0);
        let boundary: Field<bool> = Field::new(size);

        apply_projection(&mut velocity, &pressure, &boundary);

        let v = velocity.get(4, 4, 4);
        assert_relative_eq!(v.x, 0.0); // 1 - 0.5*(2 - 0)
        assert_relative_eq!(v.y, 1.0);
        assert_relative_eq!(v.z, 1.0);
    }

    #[test]
    fn test_wall_normal_component_zeroed() {
        let size = GridSize::new(8, 8, 8);
        let mut velocity: Field<Vec3> = Field::new(size);
        velocity.set(4, 4, 4, Vec3::new(3.0, -2.0, 1.5));

        let pressure: Field<f32> = Field::new(size);
        let mut boundary: Field<bool> = Field::new(size);
        boundary.set(5, 4, 4, true); // solid wall on +x

        apply_projection(&mut velocity, &pressure, &boundary);

        let v = velocity.get(4, 4, 4);
        assert_eq!(v.x, 0.0, "wall-normal velocity must vanish exactly");
        assert_relative_eq!(v.y, -2.0);
        assert_relative_eq!(v.z, 1.5);
    }

    #[test]
    fn test_grid_edge_acts_as_wall() {
        let size = GridSize::new(4, 4, 4);
        let mut velocity: Field<Vec3> = Field::new(size);
        velocity.fill(Vec3::new(1.0, 1.0, 1.0));
        let pressure: Field<f32> = Field::new(size);
        let boundary: Field<bool> = Field::new(size);

        apply_projection(&mut velocity, &pressure, &boundary);

        // A corner voxel has an out-of-grid neighbor on every axis
        assert_eq!(velocity.get(0, 0, 0), Vec3::zeros());
    }
}
