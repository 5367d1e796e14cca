#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image filtering module.
pub mod filter;

/// module containing parallization utilities.
pub mod parallel;

/// triangle rasterization and color averaging module.
pub mod raster;
