use lowpoly_image::{Image, ImageSize};

use super::FilterError;
use crate::parallel::{for_each_line, ExecutionStrategy};

/// A pixel with red, green and blue channels in floating point.
pub(crate) type Pixel = [f64; 3];

/// Rescaling of the convolution near the ends of a line.
///
/// Taps falling outside the line are dropped from the sum, so the weights actually used add up
/// to less than one near the ends. The table stores, for a pixel at distance `d` from an end, the
/// total weight of the taps missing on that side: `k[d + 1] + ... + k[radius]`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BorderCorrection {
    excluded: Vec<f64>,
}

impl BorderCorrection {
    pub(crate) fn new(kernel: &[f64]) -> Self {
        let radius = kernel.len().saturating_sub(1);
        let mut excluded = vec![0.0; radius];

        // accumulate moving outward, each step towards the edge loses one more tap
        let mut sum = 0.0;
        for d in (0..radius).rev() {
            sum += kernel[d + 1];
            excluded[d] = sum;
        }

        Self { excluded }
    }

    fn excluded_at(&self, distance: usize) -> f64 {
        self.excluded.get(distance).copied().unwrap_or(0.0)
    }

    /// Scale factor for the pixel at `pos` in a line of `len` pixels.
    pub(crate) fn factor(&self, pos: usize, len: usize) -> f64 {
        let missing = self.excluded_at(pos) + self.excluded_at(len - 1 - pos);
        1.0 / (1.0 - missing)
    }
}

/// A symmetric separable filter given by one half of its 1-D kernel, center included.
///
/// Rows are filtered first, then columns. Each pass hands out disjoint lines of its destination
/// buffer to the execution strategy; the row pass has fully completed before the column pass
/// starts reading its output.
#[derive(Clone, Debug)]
pub(crate) struct SymmetricSeparableFilter {
    kernel: Vec<f64>,
    correction: BorderCorrection,
}

impl SymmetricSeparableFilter {
    pub(crate) fn new(kernel: Vec<f64>) -> Self {
        let correction = BorderCorrection::new(&kernel);
        Self { kernel, correction }
    }

    /// Convolve one line whose samples are provided by `sample`, writing into `dst`.
    fn convolve_line(&self, dst: &mut [Pixel], sample: impl Fn(usize) -> Pixel) {
        let len = dst.len();

        for (pos, out) in dst.iter_mut().enumerate() {
            let center = sample(pos);
            let mut acc = center.map(|v| v * self.kernel[0]);

            for (i, &k) in self.kernel.iter().enumerate().skip(1) {
                let left = if pos >= i { sample(pos - i) } else { [0.0; 3] };
                let right = if pos + i < len {
                    sample(pos + i)
                } else {
                    [0.0; 3]
                };
                for ch in 0..3 {
                    acc[ch] += (left[ch] + right[ch]) * k;
                }
            }

            let factor = self.correction.factor(pos, len);
            *out = acc.map(|v| v * factor);
        }
    }

    /// Filter every line of a buffer made of consecutive lines of `line_len` pixels.
    pub(crate) fn filter_lines(
        &self,
        src: &[Pixel],
        line_len: usize,
        strategy: ExecutionStrategy,
    ) -> Result<Vec<Pixel>, FilterError> {
        let mut dst = vec![[0.0; 3]; src.len()];
        for_each_line(strategy, &mut dst, line_len, |i, line| {
            let src_line = &src[i * line_len..(i + 1) * line_len];
            self.convolve_line(line, |x| src_line[x]);
        })?;
        Ok(dst)
    }
}

/// Read the red, green and blue channels of an image into a row-major pixel buffer.
pub(crate) fn to_pixels<const C: usize>(src: &Image<u8, C>) -> Result<Vec<Pixel>, FilterError> {
    if C < 3 {
        return Err(FilterError::UnsupportedChannels(C));
    }

    Ok(src
        .as_slice()
        .chunks_exact(C)
        .map(|px| [px[0] as f64, px[1] as f64, px[2] as f64])
        .collect())
}

/// Transpose a buffer of `rows` lines of `cols` pixels into `cols` lines of `rows` pixels.
pub(crate) fn transpose(
    src: &[Pixel],
    rows: usize,
    cols: usize,
    strategy: ExecutionStrategy,
) -> Result<Vec<Pixel>, FilterError> {
    let mut dst = vec![[0.0; 3]; src.len()];
    for_each_line(strategy, &mut dst, rows, |c, line| {
        for (r, out) in line.iter_mut().enumerate() {
            *out = src[r * cols + c];
        }
    })?;
    Ok(dst)
}

/// Build an opaque RGBA image from a column-major pixel buffer.
///
/// Every channel is rounded and clamped to `[0, 255]`.
pub(crate) fn from_column_major_pixels(
    src: &[Pixel],
    size: ImageSize,
    strategy: ExecutionStrategy,
) -> Result<Image<u8, 4>, FilterError> {
    let (rows, cols) = (size.height, size.width);
    let mut dst = Image::<u8, 4>::from_size_val(size, 255)?;

    for_each_line(strategy, dst.as_slice_mut(), cols * 4, |r, line| {
        for (c, out) in line.chunks_exact_mut(4).enumerate() {
            let px = src[c * rows + r];
            for ch in 0..3 {
                out[ch] = px[ch].round().clamp(0.0, 255.0) as u8;
            }
        }
    })?;

    Ok(dst)
}
