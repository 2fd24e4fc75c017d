//! 3x3 derivative kernels and the per-pixel gradient field.
//!
//! Borders are handled by clamping indices (replicating the edge pixel), so a
//! constant image has zero gradient everywhere, including the outermost rows
//! and columns.

use crate::error::{try_filled, Result};
use crate::image::ImageU8;
use crate::params::{GradientNorm, GradientOperator};
use crate::threading::for_each_row;

type Kernel3 = [[i32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

const SCHARR_KERNEL_X: Kernel3 = [[-3, 0, 3], [-10, 0, 10], [-3, 0, 3]];
const SCHARR_KERNEL_Y: Kernel3 = [[-3, -10, -3], [0, 0, 0], [3, 10, 3]];

/// Gradient direction quantized to the four principal axes.
///
/// Angles are measured from `+x` toward `+y`, and `y` grows downward, so
/// `Diagonal45` points from top-left to bottom-right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Horizontal,
    Diagonal45,
    Vertical,
    Diagonal135,
}

impl Direction {
    /// Quantizes `atan2(gy, gx)` after folding it into `[0°, 180°)`.
    pub fn quantize(gx: f32, gy: f32) -> Self {
        let mut angle = gy.atan2(gx).to_degrees();
        if angle < 0.0 {
            angle += 180.0;
        }
        if !(22.5..157.5).contains(&angle) {
            Direction::Horizontal
        } else if angle < 67.5 {
            Direction::Diagonal45
        } else if angle < 112.5 {
            Direction::Vertical
        } else {
            Direction::Diagonal135
        }
    }

    /// Offsets of the two neighbors along the gradient. The first one
    /// precedes the pixel in raster order.
    #[inline]
    pub(crate) fn neighbor_offsets(self) -> [(isize, isize); 2] {
        match self {
            Direction::Horizontal => [(-1, 0), (1, 0)],
            Direction::Diagonal45 => [(-1, -1), (1, 1)],
            Direction::Vertical => [(0, -1), (0, 1)],
            Direction::Diagonal135 => [(1, -1), (-1, 1)],
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GradientSample {
    pub magnitude: f32,
    pub direction: Direction,
}

/// Gradient magnitude and direction for every pixel of one frame.
#[derive(Clone, Debug)]
pub struct GradientField {
    pub w: usize,
    pub h: usize,
    pub samples: Vec<GradientSample>,
}

impl GradientField {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> GradientSample {
        self.samples[y * self.w + x]
    }

    /// Magnitude at `(x, y)`, zero outside the image.
    #[inline]
    pub fn magnitude_or_zero(&self, x: isize, y: isize) -> f32 {
        if x < 0 || y < 0 || x as usize >= self.w || y as usize >= self.h {
            return 0.0;
        }
        self.samples[y as usize * self.w + x as usize].magnitude
    }
}

fn kernels(operator: GradientOperator) -> (&'static Kernel3, &'static Kernel3) {
    match operator {
        GradientOperator::Sobel => (&SOBEL_KERNEL_X, &SOBEL_KERNEL_Y),
        GradientOperator::Scharr => (&SCHARR_KERNEL_X, &SCHARR_KERNEL_Y),
    }
}

#[inline]
fn magnitude(gx: i32, gy: i32, norm: GradientNorm) -> f32 {
    match norm {
        GradientNorm::L1 => (gx.abs() + gy.abs()) as f32,
        GradientNorm::L2 => ((gx * gx + gy * gy) as f32).sqrt(),
    }
}

pub fn compute_gradient(
    image: &ImageU8<'_>,
    operator: GradientOperator,
    norm: GradientNorm,
) -> Result<GradientField> {
    let (w, h) = (image.width(), image.height());
    let (kernel_x, kernel_y) = kernels(operator);
    let mut samples = try_filled(w * h, GradientSample::default())?;

    for_each_row(&mut samples, w, |y, out| {
        let rows = [
            image.row(y.saturating_sub(1)),
            image.row(y),
            image.row((y + 1).min(h - 1)),
        ];
        for (x, sample) in out.iter_mut().enumerate() {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];
            let mut gx = 0i32;
            let mut gy = 0i32;
            for (ky, row) in rows.iter().enumerate() {
                for (kx, &xx) in x_idx.iter().enumerate() {
                    let v = row[xx] as i32;
                    gx += v * kernel_x[ky][kx];
                    gy += v * kernel_y[ky][kx];
                }
            }
            let magnitude = magnitude(gx, gy, norm);
            *sample = GradientSample {
                magnitude,
                direction: if magnitude > 0.0 {
                    Direction::quantize(gx as f32, gy as f32)
                } else {
                    Direction::Horizontal
                },
            };
        }
    });

    Ok(GradientField { w, h, samples })
}
