use avm_image::{Image, ImageError};

use crate::parallel;

/// A rotation by a multiple of 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Rotation {
    /// Keep the image as is.
    #[default]
    None,
    /// Rotate 90 degrees clockwise.
    Clockwise90,
    /// Rotate 180 degrees.
    Rotate180,
    /// Rotate 90 degrees counter-clockwise.
    CounterClockwise90,
}

impl Rotation {
    /// Number of clockwise quarter turns, in `0..4`.
    pub fn quarter_turns(&self) -> u8 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 1,
            Rotation::Rotate180 => 2,
            Rotation::CounterClockwise90 => 3,
        }
    }

    /// Whether the rotation swaps the image width and height.
    pub fn swaps_axes(&self) -> bool {
        self.quarter_turns() % 2 == 1
    }
}

/// Rotate the input image by a multiple of 90 degrees.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
/// * `rotation` - The rotation to apply.
///
/// # Returns
///
/// The rotated image. Its width and height are swapped for the 90 degree rotations.
///
/// # Example
///
/// ```
/// use avm_image::{Image, ImageSize};
/// use avm_imgproc::rotate::{rotate, Rotation};
///
/// let image = Image::<u8, 1>::new(
///     ImageSize {
///         width: 3,
///         height: 2,
///     },
///     vec![0, 1, 2, 3, 4, 5],
/// )
/// .unwrap();
///
/// let rotated = rotate(&image, Rotation::Clockwise90).unwrap();
///
/// assert_eq!(rotated.size().width, 2);
/// assert_eq!(rotated.size().height, 3);
/// assert_eq!(rotated.as_slice(), &[3, 0, 4, 1, 5, 2]);
/// ```
pub fn rotate<T, const C: usize>(
    src: &Image<T, C>,
    rotation: Rotation,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    if rotation == Rotation::None {
        return Ok(src.clone());
    }

    let (w, h) = (src.width(), src.height());
    let dst_size = if rotation.swaps_axes() {
        src.size().transposed()
    } else {
        src.size()
    };

    let mut dst = Image::from_size_val(dst_size, T::default())?;

    parallel::par_iter_rows_indexed(&mut dst, |x, y, dst_pixel| {
        // source pixel that lands at (x, y)
        let (sx, sy) = match rotation {
            Rotation::None => (x, y),
            Rotation::Clockwise90 => (y, h - 1 - x),
            Rotation::Rotate180 => (w - 1 - x, h - 1 - y),
            Rotation::CounterClockwise90 => (w - 1 - y, x),
        };
        let offset = (sy * w + sx) * C;
        dst_pixel.copy_from_slice(&src.as_slice()[offset..offset + C]);
    });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::{rotate, Rotation};
    use avm_image::{Image, ImageError, ImageSize};

    // applications needed to get back to the original image
    fn turns_to_identity(rotation: Rotation) -> usize {
        match rotation {
            Rotation::None => 1,
            Rotation::Rotate180 => 2,
            Rotation::Clockwise90 | Rotation::CounterClockwise90 => 4,
        }
    }

    fn sample() -> Result<Image<u8, 1>, ImageError> {
        // 0 1 2
        // 3 4 5
        Image::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0, 1, 2, 3, 4, 5],
        )
    }

    #[test]
    fn rotate_180() -> Result<(), ImageError> {
        let rotated = rotate(&sample()?, Rotation::Rotate180)?;
        assert_eq!(rotated.size(), [3, 2].into());
        assert_eq!(rotated.as_slice(), &[5, 4, 3, 2, 1, 0]);
        Ok(())
    }

    #[test]
    fn rotate_ccw() -> Result<(), ImageError> {
        let rotated = rotate(&sample()?, Rotation::CounterClockwise90)?;
        // 2 5
        // 1 4
        // 0 3
        assert_eq!(rotated.size(), [2, 3].into());
        assert_eq!(rotated.as_slice(), &[2, 5, 1, 4, 0, 3]);
        Ok(())
    }

    #[test]
    fn rotate_cw_multichannel() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new([2, 1].into(), vec![1, 2, 3, 4, 5, 6])?;
        let rotated = rotate(&image, Rotation::Clockwise90)?;
        assert_eq!(rotated.size(), [1, 2].into());
        assert_eq!(rotated.as_slice(), &[1, 2, 3, 4, 5, 6]);
        Ok(())
    }

    #[test]
    fn rotate_back_to_identity() -> Result<(), ImageError> {
        let image = sample()?;
        for rotation in [
            Rotation::None,
            Rotation::Clockwise90,
            Rotation::Rotate180,
            Rotation::CounterClockwise90,
        ] {
            let mut rotated = image.clone();
            for _ in 0..turns_to_identity(rotation) {
                rotated = rotate(&rotated, rotation)?;
            }
            assert_eq!(rotated, image, "{rotation:?}");
        }
        Ok(())
    }

    #[test]
    fn rotation_axes() {
        assert_eq!(Rotation::CounterClockwise90.quarter_turns(), 3);
        assert!(Rotation::Clockwise90.swaps_axes());
        assert!(Rotation::CounterClockwise90.swaps_axes());
        assert!(!Rotation::Rotate180.swaps_axes());
    }
}
