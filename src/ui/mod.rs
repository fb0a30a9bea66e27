//! Interaction layer: hover/click selection and the display notification sink

mod display;
mod selection;

pub use display::*;
pub use selection::*;
