//! Render host boundary
//!
//! Point and orbit records handed to the host, the palette used for selection
//! feedback, and the trait the host implements.

mod host;
mod satellites;

pub use host::*;
pub use satellites::*;
