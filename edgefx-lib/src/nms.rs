//! Non-maximum suppression along the quantized gradient direction.

use crate::error::{try_filled, Result};
use crate::gradient::GradientField;
use crate::threading::for_each_row;

/// Thins gradient ridges to one pixel.
///
/// Returns a magnitude plane where every pixel that is not a local maximum
/// along its gradient direction is zero. A pixel survives when it is strictly
/// greater than the neighbor preceding it in raster order and not smaller than
/// the following one, so a flat two-pixel ridge keeps exactly its first pixel.
/// Neighbors outside the image count as zero.
pub fn suppress_non_maxima(grad: &GradientField) -> Result<Vec<f32>> {
    let w = grad.w;
    let mut thin = try_filled(w * grad.h, 0f32)?;

    for_each_row(&mut thin, w, |y, out| {
        for (x, dst) in out.iter_mut().enumerate() {
            let sample = grad.get(x, y);
            let mag = sample.magnitude;
            if mag <= 0.0 {
                continue;
            }
            let [(bx, by), (ax, ay)] = sample.direction.neighbor_offsets();
            let (x, y) = (x as isize, y as isize);
            let behind = grad.magnitude_or_zero(x + bx, y + by);
            let ahead = grad.magnitude_or_zero(x + ax, y + ay);
            if mag > behind && mag >= ahead {
                *dst = mag;
            }
        }
    });

    Ok(thin)
}
