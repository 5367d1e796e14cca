use lowpoly_image::ImageError;

use super::Point;

/// An error type for the raster module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RasterError {
    /// The three vertices lie on a single line.
    #[error("input points {0}, {1}, {2} to triangle_average cannot be collinear")]
    DegenerateTriangle(Point, Point, Point),

    /// A vertex coordinate lies outside `[-MAX_COORDINATE, MAX_COORDINATE]`.
    #[error("input points {0}, {1}, {2} exceed the supported coordinate range")]
    CoordinateOutOfRange(Point, Point, Point),

    /// The triangle does not cover any pixel center inside the image.
    #[error("triangle {0}, {1}, {2} does not cover any pixel of the image")]
    EmptyTriangle(Point, Point, Point),

    /// The source image does not carry red, green and blue channels.
    #[error("expected at least 3 color channels, got {0}")]
    UnsupportedChannels(usize),

    /// Error from the underlying image.
    #[error(transparent)]
    Image(#[from] ImageError),
}
