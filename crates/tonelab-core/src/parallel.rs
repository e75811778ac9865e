//! Row-partitioned pixel mapping on the rayon pool.
//!
//! Every transform allocates a fresh output raster and fills it one row per
//! task. Workers only ever write their own row, so no synchronization is needed.

use rayon::prelude::*;

use crate::image::{PixelFormat, RasterBuffer};

/// Map every pixel of `src` into a new raster of `out_format`.
///
/// `op` receives the source pixel's channels and the destination pixel's
/// channels (lengths follow the respective formats).
pub fn map_pixels<F>(src: &RasterBuffer, out_format: PixelFormat, op: F) -> RasterBuffer
where
    F: Fn(&[u8], &mut [u8]) + Sync,
{
    let in_ch = src.channels();
    let out_ch = out_format.channels();
    let in_stride = src.row_stride();
    let out_stride = src.width() as usize * out_ch;
    let input = src.as_bytes();

    let mut dst = vec![0u8; out_stride * src.height() as usize];
    dst.par_chunks_mut(out_stride)
        .enumerate()
        .for_each(|(y, row)| {
            let src_row = &input[y * in_stride..(y + 1) * in_stride];
            for (px_in, px_out) in src_row.chunks_exact(in_ch).zip(row.chunks_exact_mut(out_ch)) {
                op(px_in, px_out);
            }
        });

    RasterBuffer::from_parts(src.width(), src.height(), out_format, dst)
}

/// Map every channel byte of `src` through a per-channel function, keeping the format.
///
/// `op` receives the channel index within the pixel and the input value.
pub fn map_channels<F>(src: &RasterBuffer, op: F) -> RasterBuffer
where
    F: Fn(usize, u8) -> u8 + Sync,
{
    map_pixels(src, src.format(), |px_in, px_out| {
        for (c, (o, &v)) in px_out.iter_mut().zip(px_in).enumerate() {
            *o = op(c, v);
        }
    })
}

/// Fold per-row partial results and merge them.
///
/// Each rayon task starts from `init()`, accumulates rows with `fold`, and
/// partial accumulators are combined with `merge`.
pub fn fold_rows<T, I, F, M>(src: &RasterBuffer, init: I, fold: F, merge: M) -> T
where
    T: Send,
    I: Fn() -> T + Sync + Send,
    F: Fn(T, &[u8]) -> T + Sync + Send,
    M: Fn(T, T) -> T + Sync + Send,
{
    src.as_bytes()
        .par_chunks(src.row_stride())
        .fold(&init, &fold)
        .reduce(&init, &merge)
}
