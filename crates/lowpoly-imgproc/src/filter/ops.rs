use lowpoly_image::Image;

use super::separable_filter::{
    from_column_major_pixels, to_pixels, transpose, SymmetricSeparableFilter,
};
use super::{kernels, FilterError};
use crate::parallel::{ExecutionStrategy, ParallelError};

/// Number of box blurs used by default to approximate a gaussian blur.
pub const DEFAULT_BOX_PASSES: usize = 3;

/// How a gaussian blur is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlurMode {
    /// Convolve with a sampled gaussian kernel of radius `ceil(3 * sigma)`.
    #[default]
    Exact,

    /// Apply `passes` successive box blurs whose combined variance approximates `sigma²`.
    BoxApproximation {
        /// The number of box blurs.
        passes: usize,
    },
}

/// Blur an image using a gaussian blur filter
///
/// Uses [`BlurMode::Exact`] and [`ExecutionStrategy::Auto`].
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C), C >= 3. Only the first three channels are
///   read.
/// * `sigma` - The standard deviation of the gaussian, in pixels.
///
/// # Returns
///
/// A new opaque RGBA image of the same size.
///
/// # Errors
///
/// Returns [`FilterError::InvalidSigma`] if `sigma` is not a positive real number, and
/// [`FilterError::UnsupportedChannels`] if the image has fewer than three channels.
///
/// # Examples
///
/// ```
/// use lowpoly_image::Image;
/// use lowpoly_imgproc::filter::gaussian_blur;
///
/// let src = Image::<u8, 3>::from_size_val([8, 6].into(), 120).unwrap();
/// let dst = gaussian_blur(&src, 1.5).unwrap();
///
/// assert_eq!(dst.size(), src.size());
/// assert!(dst.as_slice().chunks_exact(4).all(|px| px == [120, 120, 120, 255]));
/// ```
pub fn gaussian_blur<const C: usize>(
    src: &Image<u8, C>,
    sigma: f64,
) -> Result<Image<u8, 4>, FilterError> {
    blur(src, sigma, BlurMode::Exact, ExecutionStrategy::Auto)
}

/// Blur an image using a gaussian blur filter with execution strategy control.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C), C >= 3.
/// * `sigma` - The standard deviation of the gaussian, in pixels.
/// * `strategy` - Execution strategy: `Serial`, `Parallel`, `Auto` or `Fixed`.
pub fn gaussian_blur_with_strategy<const C: usize>(
    src: &Image<u8, C>,
    sigma: f64,
    strategy: ExecutionStrategy,
) -> Result<Image<u8, 4>, FilterError> {
    blur(src, sigma, BlurMode::Exact, strategy)
}

/// Blur an image with a gaussian of standard deviation `sigma`.
///
/// The filter is separable: every row is convolved first, then every column of the row pass
/// result. Each row and each column is an independent task for the execution strategy. Taps
/// falling outside the image are dropped and the remaining weights are rescaled, so that pixels
/// near the borders are not darkened. The result is rounded and clamped to `[0, 255]` and is
/// fully opaque.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C), C >= 3.
/// * `sigma` - The standard deviation of the gaussian, in pixels.
/// * `mode` - Whether to use the exact kernel or the box blur approximation.
/// * `strategy` - Execution strategy: `Serial`, `Parallel`, `Auto` or `Fixed`.
///
/// # Errors
///
/// All the arguments are validated before any pixel is processed:
///
/// * [`FilterError::InvalidSigma`] if `sigma` is not a positive real number.
/// * [`FilterError::InvalidBoxPasses`] if the approximation is asked for zero passes.
/// * [`FilterError::UnsupportedChannels`] if the image has fewer than three channels.
/// * [`FilterError::Parallel`] if a `Fixed` thread pool cannot be built.
pub fn blur<const C: usize>(
    src: &Image<u8, C>,
    sigma: f64,
    mode: BlurMode,
    strategy: ExecutionStrategy,
) -> Result<Image<u8, 4>, FilterError> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(FilterError::InvalidSigma(sigma));
    }

    let filters = match mode {
        BlurMode::Exact => {
            let radius = kernels::gaussian_kernel_radius(sigma);
            log::debug!("gaussian blur with sigma {sigma} and kernel radius {radius}");
            vec![SymmetricSeparableFilter::new(
                kernels::gaussian_kernel_half_1d(radius, sigma),
            )]
        }
        BlurMode::BoxApproximation { passes } => {
            if passes == 0 {
                return Err(FilterError::InvalidBoxPasses(passes));
            }
            let half_sizes = kernels::box_blur_sizes_for_gaussian(sigma, passes);
            log::debug!("box blur approximation with sigma {sigma} and half sizes {half_sizes:?}");
            half_sizes
                .into_iter()
                .filter(|&half_size| half_size > 0)
                .map(|half_size| {
                    SymmetricSeparableFilter::new(kernels::box_blur_kernel_half_1d(half_size))
                })
                .collect()
        }
    };

    match strategy {
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n).into());
            }
            // every pass runs inside the same pool
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;
            pool.install(|| apply_filters(src, &filters, ExecutionStrategy::Parallel))
        }
        _ => apply_filters(src, &filters, strategy),
    }
}

fn apply_filters<const C: usize>(
    src: &Image<u8, C>,
    filters: &[SymmetricSeparableFilter],
    strategy: ExecutionStrategy,
) -> Result<Image<u8, 4>, FilterError> {
    let size = src.size();
    let (rows, cols) = (size.height, size.width);

    // horizontal passes, one task per row
    let mut pixels = to_pixels(src)?;
    for filter in filters {
        pixels = filter.filter_lines(&pixels, cols, strategy)?;
    }

    // vertical passes, one task per column of the row pass result
    let mut pixels = transpose(&pixels, rows, cols, strategy)?;
    for filter in filters {
        pixels = filter.filter_lines(&pixels, rows, strategy)?;
    }

    from_column_major_pixels(&pixels, size, strategy)
}
