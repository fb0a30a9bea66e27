//! Catalog data: TLE parsing, the entry store and file loading

mod catalog;
mod loader;
mod tle;

pub use catalog::*;
pub use loader::*;
pub use tle::*;
