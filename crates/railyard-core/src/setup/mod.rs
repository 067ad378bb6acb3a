//! World Setup
//!
//! Grid population and train spawning.

pub mod grid;
pub mod roster;

pub use grid::*;
pub use roster::*;
