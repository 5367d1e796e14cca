//! Filter operations
//!
//! This module provides the gaussian blur of images, exact or approximated by box blurs.

/// Filter kernels
pub mod kernels;

mod error;
pub use error::FilterError;

/// Filter operations
mod ops;
pub use ops::*;

/// Separable filter operations
mod separable_filter;
