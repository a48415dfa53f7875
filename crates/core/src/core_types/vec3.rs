//! Vector type alias for 3D positions and directions.

use nalgebra::Vector3;

/// 3D vector type for voxel positions, velocities, and vorticity.
///
/// This is a simple alias for `nalgebra::Vector3<f32>`, used throughout
/// the solver for flow velocities, curl vectors, and sample positions.
pub type Vec3 = Vector3<f32>;
