use avm_image::Image;
use rayon::prelude::*;

/// Copy every non-transparent pixel of `src` into `dst` with its top-left corner at `(x, y)`.
///
/// This is a hard overwrite, not alpha blending: a source pixel with non-zero alpha
/// replaces the destination pixel entirely and transparent source pixels leave the
/// destination untouched. Repeated calls therefore follow "last opaque write wins".
///
/// Pixels that fall outside `dst` are skipped.
///
/// # Returns
///
/// The number of opaque source pixels that fell outside `dst`.
///
/// # Example
///
/// ```
/// use avm_image::Image;
/// use avm_imgproc::composite::paste_opaque;
///
/// let src = Image::<u8, 4>::new([2, 1].into(), vec![9, 9, 9, 255, 7, 7, 7, 0]).unwrap();
/// let mut dst = Image::<u8, 4>::from_size_val([3, 1].into(), 1).unwrap();
///
/// let clipped = paste_opaque(&src, &mut dst, 1, 0);
///
/// assert_eq!(clipped, 0);
/// assert_eq!(dst.as_slice(), &[1, 1, 1, 1, 9, 9, 9, 255, 1, 1, 1, 1]);
/// ```
pub fn paste_opaque(src: &Image<u8, 4>, dst: &mut Image<u8, 4>, x: usize, y: usize) -> usize {
    let (src_cols, src_rows) = (src.cols(), src.rows());
    let (dst_cols, dst_rows) = (dst.cols(), dst.rows());

    // visible part of the source in each axis
    let vis_cols = src_cols.min(dst_cols.saturating_sub(x));
    let vis_rows = src_rows.min(dst_rows.saturating_sub(y));

    if vis_cols > 0 && vis_rows > 0 {
        dst.as_slice_mut()
            .par_chunks_exact_mut(dst_cols * 4)
            .skip(y)
            .take(vis_rows)
            .enumerate()
            .for_each(|(r, dst_row)| {
                let src_row = &src.as_slice()[r * src_cols * 4..(r * src_cols + vis_cols) * 4];
                let dst_row = &mut dst_row[x * 4..(x + vis_cols) * 4];
                src_row
                    .chunks_exact(4)
                    .zip(dst_row.chunks_exact_mut(4))
                    .filter(|(src_pixel, _)| src_pixel[3] != 0)
                    .for_each(|(src_pixel, dst_pixel)| dst_pixel.copy_from_slice(src_pixel));
            });
    }

    // opaque pixels that did not fit
    src.as_slice()
        .par_chunks_exact(src_cols.max(1) * 4)
        .enumerate()
        .map(|(r, src_row)| {
            src_row
                .chunks_exact(4)
                .enumerate()
                .filter(|(c, pixel)| pixel[3] != 0 && (r >= vis_rows || *c >= vis_cols))
                .count()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use avm_image::{Image, ImageError};

    #[test]
    fn paste_skips_transparent() -> Result<(), ImageError> {
        let src = Image::<u8, 4>::new([2, 2].into(), {
            let mut v = vec![0u8; 16];
            v[..4].copy_from_slice(&[1, 2, 3, 255]);
            v
        })?;
        let mut dst = Image::<u8, 4>::from_size_val([2, 2].into(), 5)?;
        let clipped = super::paste_opaque(&src, &mut dst, 0, 0);
        assert_eq!(clipped, 0);
        assert_eq!(&dst.as_slice()[..4], &[1, 2, 3, 255]);
        assert!(dst.as_slice()[4..].iter().all(|&v| v == 5));
        Ok(())
    }

    #[test]
    fn paste_last_opaque_write_wins() -> Result<(), ImageError> {
        let a = Image::<u8, 4>::from_size_pixel([2, 2].into(), [10, 10, 10, 255])?;
        let b = Image::<u8, 4>::from_size_pixel([2, 2].into(), [20, 20, 20, 255])?;
        let mut dst = Image::<u8, 4>::from_size_val([3, 3].into(), 0)?;
        super::paste_opaque(&a, &mut dst, 0, 0);
        super::paste_opaque(&b, &mut dst, 1, 1);
        assert_eq!(dst.pixel(0, 0)?, &[10, 10, 10, 255]);
        assert_eq!(dst.pixel(1, 1)?, &[20, 20, 20, 255]);
        assert_eq!(dst.pixel(2, 2)?, &[20, 20, 20, 255]);
        assert_eq!(dst.pixel(2, 0)?, &[0, 0, 0, 0]);
        Ok(())
    }

    #[test]
    fn paste_clips_outside_destination() -> Result<(), ImageError> {
        let src = Image::<u8, 4>::from_size_pixel([3, 2].into(), [1, 1, 1, 255])?;
        let mut dst = Image::<u8, 4>::from_size_val([4, 4].into(), 0)?;
        let clipped = super::paste_opaque(&src, &mut dst, 2, 3);
        // visible: columns 2..4 of row 3
        assert_eq!(clipped, 4);
        assert_eq!(dst.pixel(2, 3)?, &[1, 1, 1, 255]);
        assert_eq!(dst.pixel(3, 3)?, &[1, 1, 1, 255]);
        assert_eq!(crate::alpha::count_opaque(&dst), 2);
        Ok(())
    }

    #[test]
    fn paste_fully_outside() -> Result<(), ImageError> {
        let src = Image::<u8, 4>::from_size_pixel([2, 2].into(), [1, 1, 1, 255])?;
        let mut dst = Image::<u8, 4>::from_size_val([2, 2].into(), 0)?;
        assert_eq!(super::paste_opaque(&src, &mut dst, 5, 0), 4);
        assert!(dst.as_slice().iter().all(|&v| v == 0));
        Ok(())
    }
}
