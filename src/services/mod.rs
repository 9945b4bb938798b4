//! Filesystem-facing services
//!
//! File loading and export live here, behind static service structs,
//! so the editor core never touches the filesystem directly.

pub mod export;
pub mod io;

pub use export::ExportService;
pub use io::ImageIOService;
