//! Math primitives shared by the viewer crates: bounds, Euler angle helpers,
//! easing and damping curves.

pub mod aabb;
pub mod angles;
pub mod easing;

pub use aabb::BoundingBox;
pub use angles::{LookAt, forward_from_angles, rotation_from_angles, vec_to_angles};
pub use easing::{EasingFunction, damp, ease_out, modulo, nearly_equals};
