use thiserror::Error;

/// Precondition violations detected before any pixel is read.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum InvalidArgument {
    #[error("Width and height must be greater than zero")]
    ZeroDimensions,
    #[error("Width and height must not be negative (got {width}x{height})")]
    NegativeDimensions { width: i64, height: i64 },
    #[error("Image area {width}x{height} overflows usize")]
    DimensionsOverflow { width: usize, height: usize },
    #[error("Row stride {stride} is smaller than image width {width}")]
    StrideTooSmall { stride: usize, width: usize },
    #[error("Size of input buffer is smaller than required ({actual} < {required})")]
    InputTooSmall { required: usize, actual: usize },
    #[error("Size of output buffer is smaller than required ({actual} < {required})")]
    OutputTooSmall { required: usize, actual: usize },
    #[error("Thresholds must satisfy 0 <= low < high (got low={low}, high={high})")]
    InvalidThresholds { low: f32, high: f32 },
    #[error("Gaussian sigma must be in (0, 1000] (got {0})")]
    InvalidSigma(f32),
    #[error("Null buffer pointer")]
    NullPointer,
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum EdgeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
    #[error("Failed to allocate {bytes} bytes of working memory")]
    AllocationFailure { bytes: usize },
}

pub type Result<T> = std::result::Result<T, EdgeError>;

/// Allocates a vector of `len` copies of `value` without aborting on OOM.
pub(crate) fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| EdgeError::AllocationFailure {
            bytes: len.saturating_mul(std::mem::size_of::<T>()),
        })?;
    buf.resize(len, value);
    Ok(buf)
}
