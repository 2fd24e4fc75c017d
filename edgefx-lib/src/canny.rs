use crate::blur::gaussian_blur;
use crate::error::{InvalidArgument, Result};
use crate::gradient::compute_gradient;
use crate::hysteresis::{track_edges, EdgeSummary};
use crate::image::{checked_area, ImageU8};
use crate::nms::suppress_non_maxima;
use crate::params::CannyParams;

/// Runs the full detector on `image` and writes the binary mask into
/// `out[..width * height]`.
///
/// `out` is borrowed for the duration of the call only; nothing is retained.
/// All preconditions are checked before any pixel is read. When an error is
/// returned the content of `out` is unspecified.
pub fn canny(image: ImageU8<'_>, out: &mut [u8], params: &CannyParams) -> Result<EdgeSummary> {
    params.validate()?;
    let (w, h) = (image.width(), image.height());
    let area = image.area();
    if out.len() < area {
        return Err(InvalidArgument::OutputTooSmall {
            required: area,
            actual: out.len(),
        }
        .into());
    }

    let blurred;
    let source = match params.blur_sigma {
        Some(sigma) => {
            blurred = gaussian_blur(&image, sigma)?;
            ImageU8::new(w, h, &blurred)?
        }
        None => image,
    };
    log::trace!("canny: gradient stage ({w}x{h}, {:?})", params.operator);
    let grad = compute_gradient(&source, params.operator, params.norm)?;
    let thin = suppress_non_maxima(&grad)?;
    drop(grad);
    let summary = track_edges(
        &thin,
        w,
        h,
        params.low_threshold,
        params.high_threshold,
        out,
    )?;

    log::debug!(
        "canny: {}x{} frame, {} edge pixels ({} strong, {} promoted)",
        w,
        h,
        summary.edges(),
        summary.strong,
        summary.promoted
    );
    Ok(summary)
}

/// Detects edges in a packed `width * height` image, returning a new mask.
///
/// Bytes of `image` past `width * height` are ignored.
pub fn detect(
    image: &[u8],
    width: usize,
    height: usize,
    low_threshold: f32,
    high_threshold: f32,
) -> Result<Vec<u8>> {
    let params = CannyParams::new(low_threshold, high_threshold);
    detect_with(image, width, height, &params)
}

/// Same as [`detect`] with full control over the detector parameters.
pub fn detect_with(
    image: &[u8],
    width: usize,
    height: usize,
    params: &CannyParams,
) -> Result<Vec<u8>> {
    params.validate()?;
    let image = ImageU8::new(width, height, image)?;
    let mut out = crate::error::try_filled(checked_area(width, height)?, 0u8)?;
    canny(image, &mut out, params)?;
    Ok(out)
}

/// Frame entry point with the dimension types used by the mobile runtime
/// and the default thresholds.
///
/// `output` must hold at least `width * height` bytes; its first
/// `width * height` bytes are overwritten with 0 or 255.
pub fn process_frame(
    input: &[u8],
    width: i32,
    height: i32,
    output: &mut [u8],
) -> Result<EdgeSummary> {
    process_frame_with(input, width, height, output, &CannyParams::default())
}

pub fn process_frame_with(
    input: &[u8],
    width: i32,
    height: i32,
    output: &mut [u8],
    params: &CannyParams,
) -> Result<EdgeSummary> {
    if width < 0 || height < 0 {
        return Err(InvalidArgument::NegativeDimensions {
            width: width as i64,
            height: height as i64,
        }
        .into());
    }
    let image = ImageU8::new(width as usize, height as usize, input)?;
    canny(image, output, params)
}
