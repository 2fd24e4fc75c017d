//! C ABI used by the mobile runtime bridge.
//!
//! The bridge hands over two byte arrays it keeps alive for the duration of
//! the call. Nothing is retained after return and panics never unwind across
//! the boundary.
//!
//! `include/edgefx.h` is generated from this module with
//! `cargo run -p edgefx --features generate-header --bin generate-ffi-header`.

use std::panic;

use crate::canny::process_frame_with;
use crate::error::{EdgeError, InvalidArgument, Result};
use crate::hysteresis::EdgeSummary;
use crate::params::CannyParams;

pub const EDGEFX_OK: i32 = 0;
pub const EDGEFX_INVALID_ARGUMENT: i32 = 1;
pub const EDGEFX_ALLOCATION_FAILURE: i32 = 2;
pub const EDGEFX_PANIC: i32 = 3;

fn status_code(err: &EdgeError) -> i32 {
    match err {
        EdgeError::InvalidArgument(_) => EDGEFX_INVALID_ARGUMENT,
        EdgeError::AllocationFailure { .. } => EDGEFX_ALLOCATION_FAILURE,
    }
}

/// Runs `f`, turning its outcome (or a panic) into a status code.
fn guarded<F>(f: F) -> i32
where
    F: FnOnce() -> Result<EdgeSummary>,
{
    match panic::catch_unwind(panic::AssertUnwindSafe(f)) {
        Ok(Ok(_)) => EDGEFX_OK,
        Ok(Err(err)) => {
            log::warn!("edgefx_process_frame: {err}");
            status_code(&err)
        }
        Err(_) => {
            log::error!("edgefx_process_frame: panic while processing frame");
            EDGEFX_PANIC
        }
    }
}

/// Converts C thresholds to detector parameters.
///
/// The pair is checked as `f64` first, then narrowed to `f32`. A pair that is
/// valid as `f64` but collapses or overflows in `f32` (e.g. `1.0` and
/// `1.0 + 1e-12`, or `1e300`) is rejected rather than silently reordered.
fn thresholds_from_f64(low: f64, high: f64) -> Result<CannyParams> {
    let (low32, high32) = (low as f32, high as f32);
    let valid = low.is_finite() && high.is_finite() && low >= 0.0 && low < high;
    if !valid || !high32.is_finite() || low32 >= high32 {
        return Err(InvalidArgument::InvalidThresholds {
            low: low32,
            high: high32,
        }
        .into());
    }
    Ok(CannyParams::new(low32, high32))
}

unsafe fn run(
    input: *const u8,
    input_len: usize,
    width: i32,
    height: i32,
    output: *mut u8,
    output_len: usize,
    params: Result<CannyParams>,
) -> i32 {
    if input.is_null() || output.is_null() {
        log::warn!("edgefx_process_frame: {}", InvalidArgument::NullPointer);
        return EDGEFX_INVALID_ARGUMENT;
    }
    // SAFETY: the caller guarantees both regions are valid for the given
    // lengths and do not overlap (documented on the exported functions).
    let input = std::slice::from_raw_parts(input, input_len);
    let output = std::slice::from_raw_parts_mut(output, output_len);

    guarded(|| process_frame_with(input, width, height, output, &params?))
}

/// Detects edges in one grayscale frame with the default thresholds
/// (low 85, high 160).
///
/// Returns `EDGEFX_OK` when `output[..width * height]` holds a complete
/// 0/255 edge mask, or one of the `EDGEFX_*` error codes, in which case the
/// output content must not be used.
///
/// # Safety
///
/// - `input` must be null or valid for reads of `input_len` bytes.
/// - `output` must be null or valid for writes of `output_len` bytes.
/// - The two regions must not overlap and must stay valid until return.
#[no_mangle]
pub unsafe extern "C" fn edgefx_process_frame(
    input: *const u8,
    input_len: usize,
    width: i32,
    height: i32,
    output: *mut u8,
    output_len: usize,
) -> i32 {
    run(
        input,
        input_len,
        width,
        height,
        output,
        output_len,
        Ok(CannyParams::default()),
    )
}

/// Same as [`edgefx_process_frame`] with explicit hysteresis thresholds.
///
/// Thresholds must satisfy `0 <= low < high` as `f64` and are then used as
/// `f32`. Pairs that lose their ordering or overflow in `f32` return
/// `EDGEFX_INVALID_ARGUMENT`.
///
/// # Safety
///
/// Same requirements as [`edgefx_process_frame`].
#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub unsafe extern "C" fn edgefx_process_frame_with_thresholds(
    input: *const u8,
    input_len: usize,
    width: i32,
    height: i32,
    output: *mut u8,
    output_len: usize,
    low_threshold: f64,
    high_threshold: f64,
) -> i32 {
    let params = thresholds_from_f64(low_threshold, high_threshold);
    run(
        input, input_len, width, height, output, output_len, params,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processes_frame_through_c_abi() {
        let (w, h) = (12usize, 6usize);
        let input: Vec<u8> = (0..w * h).map(|i| if i % w < 6 { 0 } else { 255 }).collect();
        let mut output = vec![1u8; w * h];
        let status = unsafe {
            edgefx_process_frame(
                input.as_ptr(),
                input.len(),
                w as i32,
                h as i32,
                output.as_mut_ptr(),
                output.len(),
            )
        };
        assert_eq!(status, EDGEFX_OK);
        assert!(output.iter().all(|&v| v == 0 || v == 255));
        assert_eq!(output.iter().filter(|&&v| v == 255).count(), h);
    }

    #[test]
    fn reports_invalid_arguments() {
        let input = vec![0u8; 16];
        let mut output = vec![0u8; 16];
        let status = unsafe {
            edgefx_process_frame(
                std::ptr::null(),
                0,
                4,
                4,
                output.as_mut_ptr(),
                output.len(),
            )
        };
        assert_eq!(status, EDGEFX_INVALID_ARGUMENT);

        let status = unsafe {
            edgefx_process_frame(input.as_ptr(), input.len(), 8, 4, output.as_mut_ptr(), 16)
        };
        assert_eq!(status, EDGEFX_INVALID_ARGUMENT);

        for (low, high) in [(160.0, 85.0), (1.0, 1.0 + 1e-12), (0.0, 1e300), (-1.0, 5.0)] {
            let status = unsafe {
                edgefx_process_frame_with_thresholds(
                    input.as_ptr(),
                    input.len(),
                    4,
                    4,
                    output.as_mut_ptr(),
                    output.len(),
                    low,
                    high,
                )
            };
            assert_eq!(status, EDGEFX_INVALID_ARGUMENT, "low={low} high={high}");
        }
    }

    #[test]
    fn narrows_valid_thresholds() {
        let params = thresholds_from_f64(85.0, 160.0).unwrap();
        assert_eq!(params, CannyParams::default());
        assert!(thresholds_from_f64(1.0, 1.0 + 1e-12).is_err());
        assert!(thresholds_from_f64(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn maps_every_error_kind_to_its_status() {
        assert_eq!(
            status_code(&InvalidArgument::ZeroDimensions.into()),
            EDGEFX_INVALID_ARGUMENT
        );
        assert_eq!(
            status_code(&EdgeError::AllocationFailure { bytes: 1 << 40 }),
            EDGEFX_ALLOCATION_FAILURE
        );
    }

    #[test]
    fn guard_reports_allocation_failure_and_panics() {
        assert_eq!(guarded(|| Ok(EdgeSummary::default())), EDGEFX_OK);
        assert_eq!(
            guarded(|| Err(EdgeError::AllocationFailure { bytes: 1 << 40 })),
            EDGEFX_ALLOCATION_FAILURE
        );
        assert_eq!(guarded(|| panic!("stage failed")), EDGEFX_PANIC);
        // Allocation errors from the working buffers propagate unchanged.
        let failed = guarded(|| {
            crate::error::try_filled(usize::MAX / 2, 0f32)?;
            Ok(EdgeSummary::default())
        });
        assert_eq!(failed, EDGEFX_ALLOCATION_FAILURE);
    }
}
