//! Row-wise iteration that fans out over the rayon pool when the `rayon`
//! feature is enabled. Every row is computed independently, so the result
//! does not depend on the feature.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "rayon")]
#[inline]
pub(crate) fn for_each_row<T, F>(buf: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    buf.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

#[cfg(not(feature = "rayon"))]
#[inline]
pub(crate) fn for_each_row<T, F>(buf: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    buf.chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}
