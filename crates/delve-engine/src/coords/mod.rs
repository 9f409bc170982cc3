//! Integer lattice geometry shared by the world layer.
//!
//! World space:
//! - one unit per cell
//! - `(x, y, z)` addressing, or `(row, col, depth)` relative to a cardinal axis
//!
//! See [`Point`] for the axis rotation rules.

mod axis;
mod point;

pub use axis::{Axis, PC, PD, PR};
pub use point::Point;
