//! Canny edge detection for single-channel camera frames.
//!
//! The detector reads a borrowed grayscale image and writes a binary mask
//! (0 or 255 per pixel) into a caller-provided buffer of the same size:
//!
//! 1. optional Gaussian pre-blur (by default the 3x3 derivative kernel's
//!    own smoothing is used),
//! 2. Sobel or Scharr gradient, magnitude and direction quantized to
//!    0°/45°/90°/135°,
//! 3. non-maximum suppression along the gradient direction,
//! 4. double thresholding (defaults: low 85, high 160),
//! 5. hysteresis tracking of weak pixels 8-connected to strong ones.
//!
//! Every call is stateless. Inputs are validated before any pixel is read,
//! and errors are returned rather than causing out-of-bounds access.
//!
//! ```
//! let (w, h) = (16, 8);
//! let frame: Vec<u8> = (0..w * h).map(|i| if i % w < 8 { 0 } else { 255 }).collect();
//! let mut mask = vec![0u8; w * h];
//! let summary = edgefx::process_frame(&frame, w as i32, h as i32, &mut mask).unwrap();
//! assert_eq!(summary.edges(), h);
//! ```

mod blur;
mod canny;
pub mod error;
pub mod ffi;
pub mod gradient;
mod hysteresis;
pub mod image;
mod nms;
pub mod params;
mod threading;

pub use crate::canny::{canny, detect, detect_with, process_frame, process_frame_with};
pub use crate::error::{EdgeError, InvalidArgument, Result};
pub use crate::hysteresis::EdgeSummary;
pub use crate::image::ImageU8;
pub use crate::params::{
    CannyParams, GradientNorm, GradientOperator, DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD,
    MAX_BLUR_SIGMA,
};
