//! Triangle rasterization
//!
//! This module provides the scanline traversal of integer triangles and the triangle color
//! averaging filter built on top of it.

mod error;
pub use error::RasterError;

/// Points and triangles with integer pixel coordinates.
mod triangle;
pub use triangle::{Point, Triangle, MAX_COORDINATE};

/// Scanline traversal of triangles.
mod scanline;
pub use scanline::TriangleScanline;

/// Color averaging over triangles.
mod average;
pub use average::*;
