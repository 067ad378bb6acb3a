//! ECS Components
//!
//! Train components plus the grid and session resources.

pub mod grid;
pub mod memory;
pub mod session;
pub mod train;

pub use grid::*;
pub use memory::*;
pub use session::*;
pub use train::*;
