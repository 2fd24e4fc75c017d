use crate::error::{InvalidArgument, Result};

/// Borrowed single-channel 8-bit image.
///
/// Rows start every `stride` bytes; only the first `w` bytes of each row are
/// pixels. Camera Y planes often carry row padding, which a stride lets the
/// detector read in place.
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    w: usize,
    h: usize,
    stride: usize,
    data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Packed image (`stride == width`).
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self> {
        Self::with_stride(width, height, width, data)
    }

    pub fn with_stride(width: usize, height: usize, stride: usize, data: &'a [u8]) -> Result<Self> {
        let area = checked_area(width, height)?;
        if stride < width {
            return Err(InvalidArgument::StrideTooSmall { stride, width }.into());
        }
        // The last row only needs `width` bytes.
        let required = stride
            .checked_mul(height - 1)
            .and_then(|v| v.checked_add(width))
            .ok_or(InvalidArgument::DimensionsOverflow { width, height })?;
        debug_assert!(required >= area);
        if data.len() < required {
            return Err(InvalidArgument::InputTooSmall {
                required,
                actual: data.len(),
            }
            .into());
        }
        Ok(Self {
            w: width,
            h: height,
            stride,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.w * self.h
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }

    /// Contiguous pixels when the image has no row padding.
    pub fn as_slice(&self) -> Option<&'a [u8]> {
        (self.stride == self.w).then(|| &self.data[..self.w * self.h])
    }
}

/// `width * height`, rejecting zero and overflowing dimensions.
pub(crate) fn checked_area(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(InvalidArgument::ZeroDimensions.into());
    }
    width
        .checked_mul(height)
        .ok_or_else(|| InvalidArgument::DimensionsOverflow { width, height }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EdgeError;

    #[test]
    fn packed_image_requires_full_area() {
        let data = vec![0u8; 11];
        let err = ImageU8::new(4, 3, &data).unwrap_err();
        assert_eq!(
            err,
            EdgeError::InvalidArgument(InvalidArgument::InputTooSmall {
                required: 12,
                actual: 11
            })
        );
        assert!(ImageU8::new(4, 3, &vec![0u8; 12]).is_ok());
    }

    #[test]
    fn strided_image_skips_padding_on_last_row() {
        // 3 rows of 4 pixels with 2 bytes of padding, last row unpadded.
        let data: Vec<u8> = (0..16).collect();
        let img = ImageU8::with_stride(4, 3, 6, &data).unwrap();
        assert_eq!(img.row(1), &[6, 7, 8, 9]);
        assert_eq!(img.get(3, 2), 15);
        assert!(img.as_slice().is_none());
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        let data = vec![0u8; 16];
        assert_eq!(
            ImageU8::new(0, 4, &data).unwrap_err(),
            EdgeError::InvalidArgument(InvalidArgument::ZeroDimensions)
        );
        assert!(matches!(
            ImageU8::with_stride(4, 4, 3, &data).unwrap_err(),
            EdgeError::InvalidArgument(InvalidArgument::StrideTooSmall { .. })
        ));
        assert!(matches!(
            ImageU8::new(usize::MAX, 2, &data).unwrap_err(),
            EdgeError::InvalidArgument(InvalidArgument::DimensionsOverflow { .. })
        ));
    }
}
