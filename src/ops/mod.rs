//! Pure raster transforms applied to decoded pixel buffers
//!
//! Every operation in this module is side-effect free: it takes an
//! [`image::RgbaImage`] plus parameters and produces a new buffer.
//! Session wiring, history pushes, and display-to-native coordinate
//! mapping all live in the controllers.

pub mod draw;
pub mod filters;
pub mod geometry;
pub mod tone;

pub use self::tone::Tone;
