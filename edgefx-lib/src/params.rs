use crate::error::{InvalidArgument, Result};

/// Low hysteresis threshold used by the camera frame path.
pub const DEFAULT_LOW_THRESHOLD: f32 = 85.0;
/// High hysteresis threshold used by the camera frame path.
pub const DEFAULT_HIGH_THRESHOLD: f32 = 160.0;
/// Largest accepted pre-blur sigma. The kernel radius grows as `3.72 * sigma`.
pub const MAX_BLUR_SIGMA: f32 = 1000.0;

/// 3x3 derivative kernel used to estimate `Gx` and `Gy`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GradientOperator {
    #[default]
    Sobel,
    Scharr,
}

/// How `Gx` and `Gy` are folded into a single magnitude.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GradientNorm {
    /// `|Gx| + |Gy|`
    L1,
    /// `sqrt(Gx² + Gy²)`
    #[default]
    L2,
}

/// Detector configuration.
///
/// Thresholds are on the gradient magnitude scale produced by the chosen
/// operator and norm, not on raw intensity. For a Sobel/L2 gradient a
/// full-range 0/255 step produces a magnitude of 1020.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CannyParams {
    pub low_threshold: f32,
    pub high_threshold: f32,
    /// Sigma of an explicit Gaussian pre-blur. `None` relies on the
    /// smoothing built into the derivative kernel.
    pub blur_sigma: Option<f32>,
    pub operator: GradientOperator,
    pub norm: GradientNorm,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            low_threshold: DEFAULT_LOW_THRESHOLD,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            blur_sigma: None,
            operator: GradientOperator::Sobel,
            norm: GradientNorm::L2,
        }
    }
}

impl CannyParams {
    pub fn new(low_threshold: f32, high_threshold: f32) -> Self {
        Self {
            low_threshold,
            high_threshold,
            ..Default::default()
        }
    }

    pub fn with_thresholds(mut self, low: f32, high: f32) -> Self {
        self.low_threshold = low;
        self.high_threshold = high;
        self
    }

    pub fn with_blur_sigma(mut self, sigma: Option<f32>) -> Self {
        self.blur_sigma = sigma;
        self
    }

    pub fn with_operator(mut self, operator: GradientOperator) -> Self {
        self.operator = operator;
        self
    }

    pub fn with_norm(mut self, norm: GradientNorm) -> Self {
        self.norm = norm;
        self
    }

    /// Checks `0 <= low < high` (both finite) and `0 < sigma <= MAX_BLUR_SIGMA`.
    pub fn validate(&self) -> Result<()> {
        let (low, high) = (self.low_threshold, self.high_threshold);
        if !low.is_finite() || !high.is_finite() || low < 0.0 || low >= high {
            return Err(InvalidArgument::InvalidThresholds { low, high }.into());
        }
        if let Some(sigma) = self.blur_sigma {
            if !sigma.is_finite() || sigma <= 0.0 || sigma > MAX_BLUR_SIGMA {
                return Err(InvalidArgument::InvalidSigma(sigma).into());
            }
        }
        Ok(())
    }
}
