use rayon::prelude::*;

use depthify_image::Image;

/// Apply a function to each pixel in the image in parallel.
///
/// The source and destination images are expected to have the same size; rows
/// are processed in parallel and pixels within a row sequentially.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
{
    let cols = src.cols();
    if cols == 0 {
        return;
    }

    src.as_slice()
        .par_chunks_exact(C1 * cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each pixel of two images in parallel.
pub fn par_iter_rows_two<T1, const C1: usize, T2, const C2: usize, T3, const C3: usize>(
    src1: &Image<T1, C1>,
    src2: &Image<T2, C2>,
    dst: &mut Image<T3, C3>,
    f: impl Fn(&[T1], &[T2], &mut [T3]) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
    T3: Clone + Send + Sync,
{
    let cols = src1.cols();
    if cols == 0 {
        return;
    }

    src1.as_slice()
        .par_chunks_exact(C1 * cols)
        .zip(src2.as_slice().par_chunks_exact(C2 * cols))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C3 * cols))
        .for_each(|((src1_chunk, src2_chunk), dst_chunk)| {
            src1_chunk
                .chunks_exact(C1)
                .zip(src2_chunk.chunks_exact(C2))
                .zip(dst_chunk.chunks_exact_mut(C3))
                .for_each(|((src1_pixel, src2_pixel), dst_pixel)| {
                    f(src1_pixel, src2_pixel, dst_pixel);
                });
        });
}

/// Fill every row of an image in parallel.
///
/// The closure receives the row index and the interleaved pixel data of that row.
pub fn par_fill_rows<T, const C: usize>(
    dst: &mut Image<T, C>,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) where
    T: Send + Sync,
{
    let cols = dst.cols();
    if cols == 0 {
        return;
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .enumerate()
        .for_each(|(row, row_data)| f(row, row_data));
}

#[cfg(test)]
mod tests {
    use super::*;
    use depthify_image::{ImageError, ImageSize};

    #[test]
    fn test_par_iter_rows() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new([2, 2].into(), vec![1, 2, 3, 4])?;
        let mut dst = Image::<u8, 2>::from_size_val(src.size(), 0)?;
        par_iter_rows(&src, &mut dst, |s, d| {
            d[0] = s[0];
            d[1] = s[0] * 2;
        });
        assert_eq!(dst.as_slice(), &[1, 2, 2, 4, 3, 6, 4, 8]);
        Ok(())
    }

    #[test]
    fn test_par_iter_rows_two() -> Result<(), ImageError> {
        let a = Image::<u8, 1>::new([3, 1].into(), vec![1, 2, 3])?;
        let b = Image::<u8, 1>::new([3, 1].into(), vec![10, 20, 30])?;
        let mut dst = Image::<u8, 1>::from_size_val(a.size(), 0)?;
        par_iter_rows_two(&a, &b, &mut dst, |x, y, d| d[0] = x[0] + y[0]);
        assert_eq!(dst.as_slice(), &[11, 22, 33]);
        Ok(())
    }

    #[test]
    fn test_par_fill_rows() -> Result<(), ImageError> {
        let mut dst = Image::<usize, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 3,
            },
            0,
        )?;
        par_fill_rows(&mut dst, |row, data| data.fill(row));
        assert_eq!(dst.as_slice(), &[0, 0, 1, 1, 2, 2]);
        Ok(())
    }

    #[test]
    fn test_empty_image_is_noop() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new([0, 0].into(), vec![])?;
        let mut dst = Image::<u8, 1>::new([0, 0].into(), vec![])?;
        par_iter_rows(&src, &mut dst, |_, _| unreachable!());
        Ok(())
    }
}
