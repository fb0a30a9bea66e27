//! satview - satellite dataset engine
//!
//! Turns TLE catalog text into renderable satellite entries (instantaneous
//! position plus the orbit ellipse) and tracks hover/click selection driven by
//! pointer picks. Rendering and UI widgets stay with the host, which talks to
//! the engine through [`renderer::RenderHost`] and [`ui::DisplayBinding`].

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod frames;
pub mod propagation;
pub mod renderer;
pub mod ui;

#[cfg(test)]
mod testing;

pub use config::EngineConfig;
pub use engine::SatelliteEngine;
pub use error::CatalogError;
