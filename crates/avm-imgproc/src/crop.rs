use avm_image::{Image, ImageError};
use rayon::prelude::*;

/// Copy the region of `src` whose top-left corner is `(x, y)` into `dst`.
///
/// The region has the size of `dst`. The top view uses it to drop the same number of
/// columns from both sides of the canvas.
///
/// # Errors
///
/// Returns [`ImageError::RegionOutOfBounds`] if the region does not fit inside `src`.
///
/// # Example
///
/// ```
/// use avm_image::Image;
/// use avm_imgproc::crop::crop_image;
///
/// #[rustfmt::skip]
/// let canvas = Image::<u8, 1>::new([5, 2].into(), vec![
///     0, 1, 2, 3, 4,
///     5, 6, 7, 8, 9,
/// ]).unwrap();
///
/// // one column off each side
/// let mut cropped = Image::<u8, 1>::from_size_val([3, 2].into(), 0).unwrap();
/// crop_image(&canvas, &mut cropped, 1, 0).unwrap();
///
/// assert_eq!(cropped.as_slice(), &[1, 2, 3, 6, 7, 8]);
/// ```
pub fn crop_image<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    x: usize,
    y: usize,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    let (cols, rows) = (dst.cols(), dst.rows());
    let fits = |start: usize, len: usize, bound: usize| {
        start.checked_add(len).is_some_and(|end| end <= bound)
    };
    if !fits(x, cols, src.cols()) || !fits(y, rows, src.rows()) {
        return Err(ImageError::RegionOutOfBounds(
            x,
            y,
            cols,
            rows,
            src.cols(),
            src.rows(),
        ));
    }
    if cols == 0 || rows == 0 {
        return Ok(());
    }

    let src_stride = src.cols() * C;
    let first = x * C;
    let src_rows = src.as_slice().par_chunks_exact(src_stride).skip(y);

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols * C)
        .zip(src_rows)
        .for_each(|(dst_row, src_row)| {
            dst_row.copy_from_slice(&src_row[first..first + cols * C]);
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::crop_image;
    use avm_image::{Image, ImageError};

    #[test]
    fn crop_both_sides_rgba() -> Result<(), ImageError> {
        // pixel value encodes its column, alpha encodes its row
        let mut data = Vec::new();
        for row in 0..3u8 {
            for col in 0..6u8 {
                data.extend_from_slice(&[col, col, col, row]);
            }
        }
        let canvas = Image::<u8, 4>::new([6, 3].into(), data)?;

        let mut cropped = Image::<u8, 4>::from_size_val([2, 3].into(), 0)?;
        crop_image(&canvas, &mut cropped, 2, 0)?;

        for row in 0..3 {
            assert_eq!(cropped.pixel(0, row)?, &[2, 2, 2, row as u8]);
            assert_eq!(cropped.pixel(1, row)?, &[3, 3, 3, row as u8]);
        }
        Ok(())
    }

    #[test]
    fn crop_lower_rows() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new([3, 4].into(), (0..12).collect())?;
        let mut cropped = Image::<u8, 1>::from_size_val([3, 2].into(), 0)?;
        crop_image(&image, &mut cropped, 0, 2)?;
        assert_eq!(cropped.as_slice(), &[6, 7, 8, 9, 10, 11]);
        Ok(())
    }

    #[test]
    fn crop_out_of_bounds() -> Result<(), ImageError> {
        let image = Image::<u8, 4>::from_size_val([4, 4].into(), 0)?;
        let mut cropped = Image::<u8, 4>::from_size_val([3, 4].into(), 0)?;
        let res = crop_image(&image, &mut cropped, 2, 0);
        assert_eq!(res, Err(ImageError::RegionOutOfBounds(2, 0, 3, 4, 4, 4)));

        let res = crop_image(&image, &mut cropped, 0, usize::MAX);
        assert!(matches!(res, Err(ImageError::RegionOutOfBounds(..))));
        Ok(())
    }
}
