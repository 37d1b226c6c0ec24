//! Grid occupancy model.

pub mod grid;

pub use grid::*;
