use lowpoly_image::{Image, ImageError};

use super::{Point, RasterError, Triangle};

/// Running sum of the red, green and blue channels of a set of pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorAccumulator {
    sum: [u64; 3],
    count: u64,
}

impl ColorAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the first three channels of a pixel.
    pub fn add(&mut self, pixel: &[u8]) {
        self.sum
            .iter_mut()
            .zip(pixel.iter())
            .for_each(|(s, &v)| *s += v as u64);
        self.count += 1;
    }

    /// Number of pixels added so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Per channel mean of the pixels added so far, `None` if no pixel was added.
    pub fn mean(&self) -> Option<[u8; 3]> {
        if self.count == 0 {
            return None;
        }
        // each sum is at most 255 * count, the quotient always fits in a u8
        Some(self.sum.map(|s| (s / self.count) as u8))
    }
}

/// Average the color of a triangle of the source image into the target image.
///
/// Every pixel whose center lies inside the triangle or on its boundary is visited twice: once to
/// accumulate the mean red, green and blue values of `src`, and once to paint that mean, fully
/// opaque, into `dst`. The traversal is clipped to the image, so only the pixels of the triangle
/// inside the image are visited.
///
/// # Arguments
///
/// * `src` - The source image with at least three channels (R, G, B, ...).
/// * `dst` - The RGBA target image, of the same size as `src`.
/// * `a`, `b`, `c` - The vertices of the triangle.
///
/// # Returns
///
/// The averaged color.
///
/// # Errors
///
/// * [`RasterError::CoordinateOutOfRange`] if a vertex coordinate exceeds
///   [`MAX_COORDINATE`](super::MAX_COORDINATE) in absolute value.
/// * [`RasterError::DegenerateTriangle`] if the vertices are collinear.
/// * [`RasterError::UnsupportedChannels`] if `src` has fewer than three channels.
/// * [`RasterError::EmptyTriangle`] if no pixel of the triangle lies inside the image.
///
/// No pixel is written when an error is returned.
///
/// # Examples
///
/// ```
/// use lowpoly_image::Image;
/// use lowpoly_imgproc::raster::{triangle_average, Point};
///
/// let src = Image::<u8, 3>::from_size_val([5, 5].into(), 100).unwrap();
/// let mut dst = Image::<u8, 4>::from_size_val([5, 5].into(), 0).unwrap();
///
/// let color = triangle_average(
///     &src,
///     &mut dst,
///     Point::new(0, 0),
///     Point::new(4, 0),
///     Point::new(0, 4),
/// )
/// .unwrap();
///
/// assert_eq!(color, [100, 100, 100]);
/// assert_eq!(dst.pixel(0, 0), Some(&[100u8, 100, 100, 255][..]));
/// assert_eq!(dst.pixel(4, 4), Some(&[0u8, 0, 0, 0][..]));
/// ```
pub fn triangle_average<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, 4>,
    a: Point,
    b: Point,
    c: Point,
) -> Result<[u8; 3], RasterError> {
    let triangle = Triangle::new(a, b, c)?;

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )
        .into());
    }

    let color = mean_color(src, &triangle)?;
    paint(dst, &triangle, color);

    Ok(color)
}

/// Average the color of a triangle of an RGBA image in place.
///
/// Same as [`triangle_average`] with the image being both the source and the target.
pub fn triangle_average_in_place(
    img: &mut Image<u8, 4>,
    a: Point,
    b: Point,
    c: Point,
) -> Result<[u8; 3], RasterError> {
    let triangle = Triangle::new(a, b, c)?;

    let color = mean_color(img, &triangle)?;
    paint(img, &triangle, color);

    Ok(color)
}

// inclusive pixel rectangle of an image, empty for an empty image
fn image_bounds<const C: usize>(img: &Image<u8, C>) -> (Point, Point) {
    (
        Point::new(0, 0),
        Point::new(img.cols() as i64 - 1, img.rows() as i64 - 1),
    )
}

fn mean_color<const C: usize>(
    src: &Image<u8, C>,
    triangle: &Triangle,
) -> Result<[u8; 3], RasterError> {
    if C < 3 {
        return Err(RasterError::UnsupportedChannels(C));
    }

    let (top_left, bottom_right) = image_bounds(src);
    let acc = triangle
        .scanline_within(top_left, bottom_right)
        .filter_map(|p| src.pixel(p.x, p.y))
        .fold(ColorAccumulator::new(), |mut acc, pixel| {
            acc.add(pixel);
            acc
        });

    log::debug!(
        "triangle {:?} covers {} pixels of the image",
        triangle.vertices(),
        acc.count()
    );

    let [a, b, c] = triangle.vertices();
    acc.mean().ok_or(RasterError::EmptyTriangle(a, b, c))
}

fn paint(dst: &mut Image<u8, 4>, triangle: &Triangle, [r, g, b]: [u8; 3]) {
    let (top_left, bottom_right) = image_bounds(dst);
    for p in triangle.scanline_within(top_left, bottom_right) {
        if let Some(pixel) = dst.pixel_mut(p.x, p.y) {
            pixel.copy_from_slice(&[r, g, b, 255]);
        }
    }
}
