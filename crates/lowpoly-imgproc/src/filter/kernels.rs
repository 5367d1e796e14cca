/// Radius of the gaussian kernel covering three standard deviations on each side.
///
/// # Arguments
///
/// * `sigma` - The sigma of the gaussian kernel.
pub fn gaussian_kernel_radius(sigma: f64) -> usize {
    (3.0 * sigma).ceil() as usize
}

/// Create one half of a symmetric gaussian kernel, center included.
///
/// The weight at offset `i` is `exp(-i² / 2σ²) / (σ√2π)`, renormalized so that the full kernel
/// `k[0] + 2 * (k[1] + ... + k[radius])` sums to one.
///
/// # Arguments
///
/// * `radius` - The number of taps on each side of the center.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector with the `radius + 1` weights for the offsets `0..=radius`.
pub fn gaussian_kernel_half_1d(radius: usize, sigma: f64) -> Vec<f64> {
    let denominator = sigma * (2.0 * std::f64::consts::PI).sqrt();
    let exp_denominator = 2.0 * sigma * sigma;

    // compute the kernel
    let mut kernel = (0..=radius)
        .map(|i| {
            let x = i as f64;
            (-(x * x) / exp_denominator).exp() / denominator
        })
        .collect::<Vec<_>>();

    // normalize the kernel, the center tap is shared by both halves
    let norm = 2.0 * kernel.iter().sum::<f64>() - kernel[0];
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// Create one half of a box blur kernel, center included.
///
/// # Arguments
///
/// * `half_size` - The number of taps on each side of the center.
///
/// # Returns
///
/// A vector with `half_size + 1` equal weights of `1 / (2 * half_size + 1)`.
pub fn box_blur_kernel_half_1d(half_size: usize) -> Vec<f64> {
    vec![1.0 / (2 * half_size + 1) as f64; half_size + 1]
}

/// Half sizes of the successive box blurs approximating a gaussian blur.
///
/// The box widths are the two odd integers around the ideal width so that `passes` box blurs
/// have a combined variance as close as possible to `sigma²`.
///
/// # Arguments
///
/// * `sigma` - The sigma of the approximated gaussian.
/// * `passes` - The number of box blurs.
///
/// # Returns
///
/// The half size of each box, in the order they are applied.
pub fn box_blur_sizes_for_gaussian(sigma: f64, passes: usize) -> Vec<usize> {
    if passes == 0 {
        return vec![];
    }

    let n = passes as f64;
    let variance = 12.0 * sigma * sigma;

    let ideal_width = (variance / n + 1.0).sqrt();
    let mut lower = ideal_width.floor() as usize;
    if lower % 2 == 0 {
        lower = lower.saturating_sub(1).max(1);
    }
    let upper = lower + 2;

    let wl = lower as f64;
    let ideal_lower_count = (variance - n * wl * wl - 4.0 * n * wl - 3.0 * n) / (-4.0 * wl - 4.0);
    let lower_count = (ideal_lower_count.round().max(0.0) as usize).min(passes);

    (0..passes)
        .map(|i| if i < lower_count { lower } else { upper })
        .map(|width| (width - 1) / 2)
        .collect()
}
