//! Layout calculation modules
//!
//! This module handles all the geometric decisions for a booklet:
//! - Slot assignment (which half of which page an image lands on)
//! - Content placement (fit-to-width or fit-to-height, centered)

mod engine;
mod placement;
mod types;

pub use engine::*;
pub use placement::*;
pub use types::*;
