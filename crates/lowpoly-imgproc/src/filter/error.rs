use lowpoly_image::ImageError;

use crate::parallel::ParallelError;

/// An error type for the filter module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The standard deviation of the blur is not a positive real number.
    #[error("sigma must be a positive real number, got {0}")]
    InvalidSigma(f64),

    /// The source image does not carry red, green and blue channels.
    #[error("expected at least 3 color channels, got {0}")]
    UnsupportedChannels(usize),

    /// The box approximation needs at least one box blur.
    #[error("the box approximation needs at least one pass, got {0}")]
    InvalidBoxPasses(usize),

    /// Error while dispatching the work.
    #[error(transparent)]
    Parallel(#[from] ParallelError),

    /// Error from the underlying image.
    #[error(transparent)]
    Image(#[from] ImageError),
}
