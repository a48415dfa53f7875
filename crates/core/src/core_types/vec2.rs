//! Two-component value type for the paired density/temperature field.

use nalgebra::Vector2;

/// Per-voxel (density, temperature) pair.
///
/// Alias for `nalgebra::Vector2<f32>`. By convention `x` holds density and
/// `y` holds temperature; the two are stored and advected together because
/// every pass that touches one touches the other.
pub type Vec2 = Vector2<f32>;
