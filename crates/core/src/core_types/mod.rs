//! Core types shared across the solver.

mod vec2;
mod vec3;

pub use vec2::Vec2;
pub use vec3::Vec3;
