//! Snell's law at a planar interface between two media.
//!
//! The crate turns a pair of refractive indices and an incidence angle into
//! an optical outcome (refraction or total internal reflection), a drawing
//! plan for the ray diagram, and a formatted readout. The interactive viewer
//! is available behind the default `visualization` feature.

pub mod geom;
pub mod hold;
pub mod media;
pub mod output;
pub mod readout;
pub mod render;
pub mod scene;
pub mod settings;
pub mod snell;
pub mod state;
#[cfg(feature = "macroquad")]
pub mod viewer;
