use avm_image::{Image, ImageError};

use crate::parallel;

/// Expand a 3-channel image to 4 channels with a constant alpha.
///
/// The color channels are copied in their original order, so a BGR image becomes BGRA
/// and an RGB image becomes RGBA.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, 3).
/// * `dst` - The output image with shape (H, W, 4).
/// * `alpha` - The alpha value written to every pixel.
///
/// # Errors
///
/// Returns an error if `src` and `dst` have different sizes.
pub fn add_alpha_channel(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 4>,
    alpha: u8,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[..3].copy_from_slice(src_pixel);
        dst_pixel[3] = alpha;
    });

    Ok(())
}

/// Make every pixel whose color exactly equals `key` fully transparent.
///
/// The comparison is exact, there is no tolerance. Alpha of the other pixels is left
/// untouched.
///
/// # Example
///
/// ```
/// use avm_image::Image;
/// use avm_imgproc::alpha::chroma_key;
///
/// let mut image = Image::<u8, 4>::new([2, 1].into(), vec![0, 0, 0, 255, 0, 0, 1, 255]).unwrap();
/// chroma_key(&mut image, [0, 0, 0]);
///
/// assert_eq!(image.as_slice(), &[0, 0, 0, 0, 0, 0, 1, 255]);
/// ```
pub fn chroma_key(image: &mut Image<u8, 4>, key: [u8; 3]) {
    parallel::par_iter_rows_indexed(image, |_, _, pixel| {
        if pixel[..3] == key {
            pixel[3] = 0;
        }
    });
}

/// Count the pixels with a non-zero alpha.
pub fn count_opaque(image: &Image<u8, 4>) -> usize {
    image
        .as_slice()
        .chunks_exact(4)
        .filter(|pixel| pixel[3] != 0)
        .count()
}
