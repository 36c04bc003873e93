use crate::{
    homography::{inverse_perspective_matrix, transform_point},
    interpolation::bilinear_interpolation,
    parallel,
};

use avm_image::{Image, ImageDtype};

/// Applies a perspective transformation to an image.
///
/// Every destination pixel is mapped back into the source with the inverse of `m` and
/// sampled with bilinear interpolation. Destination pixels whose pre-image falls outside
/// the source image are set to zero (black).
///
/// A singular `m` does not fail: its inverse has non-finite entries, no pre-image lands
/// inside the source and the output is entirely black.
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (height, width, channels).
/// * `m` - The 3x3 perspective transformation matrix src -> dst.
pub fn warp_perspective<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    m: &[f32; 9],
) {
    // inverse perspective matrix to find the source position of each dst pixel
    let inv_m = inverse_perspective_matrix(m);
    let (src_cols, src_rows) = (src.cols() as f32, src.rows() as f32);

    parallel::par_iter_rows_indexed(dst, |x, y, dst_pixel| {
        let (u, v) = transform_point(x as f32, y as f32, &inv_m);
        // NaN coordinates fail every comparison and end up black
        if u >= 0.0 && u < src_cols && v >= 0.0 && v < src_rows {
            let pixel = bilinear_interpolation(src, u, v);
            for (d, p) in dst_pixel.iter_mut().zip(pixel) {
                *d = T::from_f32(p);
            }
        } else {
            dst_pixel.fill(T::default());
        }
    });
}

#[cfg(test)]
mod tests {
    use avm_image::{Image, ImageError, ImageSize};

    #[test]
    fn warp_perspective_identity() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new([3, 2].into(), vec![1, 2, 3, 4, 5, 6])?;

        let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

        let mut image_transformed = Image::from_size_val(image.size(), 0u8)?;
        super::warp_perspective(
            &image,
            &mut image_transformed,
            &m,
        );

        assert_eq!(image_transformed.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn warp_perspective_hflip() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            vec![0u8, 1, 2, 3, 4, 5],
        )?;

        let image_expected = vec![1u8, 0, 3, 2, 5, 4];

        // flip matrix
        let m = [-1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

        let mut image_transformed = Image::<_, 1>::from_size_val(image.size(), 0u8)?;

        super::warp_perspective(
            &image,
            &mut image_transformed,
            &m,
        );

        assert_eq!(image_transformed.as_slice(), image_expected);

        Ok(())
    }

    #[test]
    fn warp_perspective_shift_fills_black() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::<_, 1>::new(
            [4, 4].into(),
            vec![
                1u8, 2, 3, 4,
                5, 6, 7, 8,
                9, 10, 11, 12,
                13, 14, 15, 16,
            ],
        )?;

        // shift left by 1 pixel
        let m = [1.0, 0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

        #[rustfmt::skip]
        let image_expected = vec![
            2u8, 3, 4, 0,
            6, 7, 8, 0,
            10, 11, 12, 0,
            14, 15, 16, 0,
        ];

        // dst starts dirty to check that outside pixels are cleared
        let mut image_transformed = Image::<_, 1>::from_size_val(image.size(), 99u8)?;
        super::warp_perspective(
            &image,
            &mut image_transformed,
            &m,
        );

        assert_eq!(image_transformed.as_slice(), image_expected);

        Ok(())
    }

    #[test]
    fn warp_perspective_output_size_is_dst_size() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val([1920, 1080].into(), 7)?;
        let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        let mut dst = Image::<u8, 3>::from_size_val([640, 480].into(), 0)?;
        super::warp_perspective(&image, &mut dst, &m);
        assert_eq!(dst.size(), [640, 480].into());
        assert!(dst.as_slice().iter().all(|&v| v == 7));
        Ok(())
    }

    #[test]
    fn warp_perspective_singular_is_black() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val([8, 8].into(), 200)?;
        let m = [1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 0.0, 1.0];
        let mut dst = Image::<u8, 3>::from_size_val([8, 8].into(), 1)?;
        super::warp_perspective(&image, &mut dst, &m);
        assert!(dst.as_slice().iter().all(|&v| v == 0));
        Ok(())
    }
}
