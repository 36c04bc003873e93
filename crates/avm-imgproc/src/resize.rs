use crate::interpolation::bilinear_interpolation;
use crate::parallel;
use avm_image::{Image, ImageDtype, ImageError};

/// Resize an image to the size of `dst` with bilinear interpolation.
///
/// Pixel centers are aligned (half-pixel offset), so a pixel at `x` in `dst` samples
/// the source at `(x + 0.5) * src_w / dst_w - 0.5`, clamped to the source bounds.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container, already allocated with the target size.
///
/// # Errors
///
/// Returns an error if the source image is empty.
///
/// # Example
///
/// ```
/// use avm_image::{Image, ImageSize};
/// use avm_imgproc::resize::resize_native;
///
/// let image = Image::<u8, 4>::from_size_pixel([4, 5].into(), [9, 8, 7, 255]).unwrap();
///
/// let mut resized = Image::<u8, 4>::from_size_val(
///     ImageSize {
///         width: 2,
///         height: 3,
///     },
///     0,
/// )
/// .unwrap();
///
/// resize_native(&image, &mut resized).unwrap();
///
/// assert_eq!(resized.pixel(1, 2).unwrap(), &[9, 8, 7, 255]);
/// ```
pub fn resize_native<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
) -> Result<(), ImageError> {
    if src.width() == 0 || src.height() == 0 {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    let scale_x = src.width() as f32 / dst.width().max(1) as f32;
    let scale_y = src.height() as f32 / dst.height().max(1) as f32;
    let (max_u, max_v) = ((src.width() - 1) as f32, (src.height() - 1) as f32);

    parallel::par_iter_rows_indexed(dst, |x, y, dst_pixel| {
        let u = ((x as f32 + 0.5) * scale_x - 0.5).clamp(0.0, max_u);
        let v = ((y as f32 + 0.5) * scale_y - 0.5).clamp(0.0, max_v);
        let pixel = bilinear_interpolation(src, u, v);
        for (d, p) in dst_pixel.iter_mut().zip(pixel) {
            *d = T::from_f32(p);
        }
    });

    Ok(())
}
