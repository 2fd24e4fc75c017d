//! Separable Gaussian pre-blur.
//!
//! The kernel radius is `ceil(sigma * sqrt(2 * p * ln 10))` with `p = 3`,
//! i.e. the kernel is truncated where its weight drops below `10^-3` of the
//! peak. Samples outside the image are mirrored (`... 1 0 | 0 1 2 ...`).

use crate::error::{try_filled, Result};
use crate::image::ImageU8;
use crate::threading::for_each_row;

const PRECISION: f64 = 3.0;

fn gaussian_kernel(n: usize, sigma: f64, mean: f64) -> Vec<f32> {
    let mut kernel = Vec::with_capacity(n);
    for i in 0..n {
        let val = ((i as f64) - mean) / sigma;
        kernel.push((-0.5 * val * val).exp());
    }
    let sum: f64 = kernel.iter().sum();
    kernel.iter().map(|x| (x / sum) as f32).collect()
}

/// Symmetric reflection of `i` into `0..n`.
#[inline]
fn mirror(i: isize, n: usize) -> usize {
    let period = 2 * n as isize;
    let mut j = i.rem_euclid(period);
    if j >= n as isize {
        j = period - 1 - j;
    }
    j as usize
}

pub(crate) fn kernel_radius(sigma: f32) -> usize {
    (sigma as f64 * (2.0 * PRECISION * 10f64.ln()).sqrt()).ceil() as usize
}

/// Blurs `image` into a freshly allocated packed `width * height` buffer.
///
/// `sigma` must have passed [`CannyParams::validate`](crate::CannyParams::validate).
pub(crate) fn gaussian_blur(image: &ImageU8<'_>, sigma: f32) -> Result<Vec<u8>> {
    debug_assert!(sigma > 0.0 && sigma <= crate::params::MAX_BLUR_SIGMA);
    let (w, h) = (image.width(), image.height());
    let offset = kernel_radius(sigma);
    let n = 1 + 2 * offset;
    let kernel = gaussian_kernel(n, sigma as f64, offset as f64);

    let mut tmp = try_filled(w * h, 0f32)?;
    for_each_row(&mut tmp, w, |y, row| {
        let src = image.row(y);
        for (x, out) in row.iter_mut().enumerate() {
            let mut val = 0.0;
            for (i, k) in kernel.iter().enumerate() {
                let j = mirror(x as isize - offset as isize + i as isize, w);
                val += src[j] as f32 * k;
            }
            *out = val;
        }
    });

    let mut out = try_filled(w * h, 0u8)?;
    for_each_row(&mut out, w, |y, row| {
        for (x, dst) in row.iter_mut().enumerate() {
            let mut val = 0.0;
            for (i, k) in kernel.iter().enumerate() {
                let j = mirror(y as isize - offset as isize + i as isize, h);
                val += tmp[x + j * w] * k;
            }
            *dst = val.round().clamp(0.0, 255.0) as u8;
        }
    });
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_is_normalized_and_symmetric() {
        let radius = kernel_radius(1.5);
        let kernel = gaussian_kernel(2 * radius + 1, 1.5, radius as f64);
        let sum: f32 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for i in 0..radius {
            assert!((kernel[i] - kernel[kernel.len() - 1 - i]).abs() < 1e-7);
        }
        assert!(kernel[radius] > kernel[radius - 1]);
    }

    #[test]
    fn largest_sigma_has_small_radius() {
        let radius = kernel_radius(crate::params::MAX_BLUR_SIGMA);
        assert!(radius > 3700 && radius < 3720, "radius {radius}");
        let data = vec![50u8; 4 * 3];
        let img = ImageU8::new(4, 3, &data).unwrap();
        let out = gaussian_blur(&img, crate::params::MAX_BLUR_SIGMA).unwrap();
        assert!(out.iter().all(|&v| v == 50));
    }

    #[test]
    fn mirror_reflects_both_sides() {
        assert_eq!(mirror(-1, 5), 0);
        assert_eq!(mirror(-2, 5), 1);
        assert_eq!(mirror(5, 5), 4);
        assert_eq!(mirror(6, 5), 3);
        assert_eq!(mirror(0, 1), 0);
        assert_eq!(mirror(3, 1), 0);
    }

    #[test]
    fn uniform_image_is_unchanged() {
        let data = vec![77u8; 9 * 6];
        let img = ImageU8::new(9, 6, &data).unwrap();
        let out = gaussian_blur(&img, 2.0).unwrap();
        assert!(out.iter().all(|&v| v == 77));
    }

    #[test]
    fn impulse_spreads_but_keeps_peak_at_center() {
        let (w, h) = (11, 11);
        let mut data = vec![0u8; w * h];
        data[5 * w + 5] = 255;
        let img = ImageU8::new(w, h, &data).unwrap();
        let out = gaussian_blur(&img, 1.0).unwrap();
        let peak = out[5 * w + 5];
        assert!(peak < 255 && peak > 0);
        assert!(out[5 * w + 4] > 0 && out[5 * w + 4] < peak);
        assert_eq!(out[5 * w + 4], out[5 * w + 6]);
        assert_eq!(out[4 * w + 5], out[6 * w + 5]);
    }
}
