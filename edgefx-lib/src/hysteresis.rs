//! Double thresholding and edge tracking by hysteresis.

use crate::error::{EdgeError, Result};

pub const EDGE: u8 = 255;
pub const NON_EDGE: u8 = 0;
const WEAK: u8 = 1;

const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Counts of the pixels marked as edges by one call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeSummary {
    /// Pixels whose thinned magnitude reached the high threshold.
    pub strong: usize,
    /// Weak pixels connected to a strong pixel.
    pub promoted: usize,
}

impl EdgeSummary {
    /// Number of 255 bytes written to the mask.
    pub fn edges(&self) -> usize {
        self.strong + self.promoted
    }
}

/// Writes the binary mask for the thinned magnitude plane `thin` into
/// `out[..w * h]`.
///
/// Pixels with `thin >= high` are strong edges. Pixels with
/// `low <= thin < high` become edges only when 8-connected, directly or via
/// other weak pixels, to a strong one.
pub fn track_edges(
    thin: &[f32],
    w: usize,
    h: usize,
    low: f32,
    high: f32,
    out: &mut [u8],
) -> Result<EdgeSummary> {
    let area = w * h;
    debug_assert_eq!(thin.len(), area);
    let out = &mut out[..area];

    let mut summary = EdgeSummary::default();
    let mut candidates = 0usize;
    for (dst, &mag) in out.iter_mut().zip(thin) {
        *dst = if mag >= high {
            summary.strong += 1;
            candidates += 1;
            EDGE
        } else if mag >= low && mag > 0.0 {
            candidates += 1;
            WEAK
        } else {
            NON_EDGE
        };
    }

    // Every pixel is pushed at most once, so the stack never reallocates.
    let mut stack: Vec<usize> = Vec::new();
    stack
        .try_reserve_exact(candidates)
        .map_err(|_| EdgeError::AllocationFailure {
            bytes: candidates.saturating_mul(std::mem::size_of::<usize>()),
        })?;
    stack.extend(
        out.iter()
            .enumerate()
            .filter(|(_, &v)| v == EDGE)
            .map(|(i, _)| i),
    );

    while let Some(idx) = stack.pop() {
        let (x, y) = ((idx % w) as isize, (idx / w) as isize);
        for (dx, dy) in NEIGHBORS_8 {
            let (nx, ny) = (x + dx, y + dy);
            if nx < 0 || ny < 0 || nx as usize >= w || ny as usize >= h {
                continue;
            }
            let n = ny as usize * w + nx as usize;
            if out[n] == WEAK {
                out[n] = EDGE;
                summary.promoted += 1;
                stack.push(n);
            }
        }
    }

    for v in out.iter_mut().filter(|v| **v == WEAK) {
        *v = NON_EDGE;
    }

    log::trace!(
        "hysteresis: {} candidates, {} strong, {} promoted",
        candidates,
        summary.strong,
        summary.promoted
    );
    Ok(summary)
}
