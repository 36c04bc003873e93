use avm_image::{Image, ImageError, ImageSize};
use avm_imgproc::{composite::paste_opaque, crop::crop_image};

use crate::{
    config::{check_crop_margin, Placement},
    error::AvmError,
    vehicle::VehicleIcon,
    view::MaskedFrame,
};

/// The 4-channel top-view composite.
///
/// A canvas starts fully transparent and is written in place. Every write copies only
/// the opaque pixels of its source and replaces what was there, so the last opaque
/// write to a pixel wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas(Image<u8, 4>);

impl Canvas {
    /// Create a fully transparent canvas.
    pub fn new(size: ImageSize) -> Result<Self, ImageError> {
        Ok(Self(Image::from_size_val(size, 0)?))
    }

    /// Size of the canvas in pixels.
    pub fn size(&self) -> ImageSize {
        self.0.size()
    }

    /// The composite as a 4-channel image.
    pub fn as_image(&self) -> &Image<u8, 4> {
        &self.0
    }

    /// Consume the canvas and return the composite image.
    pub fn into_image(self) -> Image<u8, 4> {
        self.0
    }

    /// Write the opaque pixels of `view` with its top-left corner at `placement`.
    ///
    /// Pixels falling outside the canvas are dropped. Returns how many opaque pixels
    /// were dropped.
    pub fn place(&mut self, view: &MaskedFrame, placement: Placement) -> usize {
        let clipped = paste_opaque(view.as_image(), &mut self.0, placement.x, placement.y);
        if clipped > 0 {
            log::debug!(
                "{clipped} opaque pixels of a {} view at ({}, {}) fell outside the {} canvas",
                view.size(),
                placement.x,
                placement.y,
                self.size()
            );
        }
        clipped
    }

    /// Draw the vehicle icon, resized to `footprint`, in the center of the canvas.
    ///
    /// Without an icon the canvas is left untouched. An icon that cannot be resized is
    /// skipped with a warning.
    pub fn overlay(&mut self, icon: Option<&VehicleIcon>, footprint: ImageSize) {
        let Some(icon) = icon else {
            return;
        };

        let resized = match icon.resized(footprint) {
            Ok(resized) => resized,
            Err(e) => {
                log::warn!("cannot resize the vehicle icon, skipping overlay: {e}");
                return;
            }
        };

        let x = self.0.width().saturating_sub(footprint.width) / 2;
        let y = self.0.height().saturating_sub(footprint.height) / 2;
        paste_opaque(&resized, &mut self.0, x, y);
    }

    /// Remove `margin` columns from the left and the right of the canvas.
    ///
    /// The height is kept.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::InvalidCropMargin`] if twice the margin is not
    /// smaller than the width.
    ///
    /// # Example
    ///
    /// ```
    /// use avm::Canvas;
    ///
    /// let canvas = Canvas::new([1080, 1090].into()).unwrap();
    /// let cropped = canvas.crop_sides(225).unwrap();
    ///
    /// assert_eq!(cropped.size(), [630, 1090].into());
    /// assert!(canvas.crop_sides(540).is_err());
    /// ```
    pub fn crop_sides(&self, margin: usize) -> Result<Canvas, AvmError> {
        check_crop_margin(margin, self.0.width())?;

        let size = ImageSize {
            width: self.0.width() - 2 * margin,
            height: self.0.height(),
        };
        let mut cropped = Image::from_size_val(size, 0)?;
        crop_image(&self.0, &mut cropped, margin, 0)?;

        Ok(Canvas(cropped))
    }
}

/// Composite masked views onto a fresh transparent canvas of `size`, in iteration order.
pub fn compose<'a>(
    size: ImageSize,
    views: impl IntoIterator<Item = (&'a MaskedFrame, Placement)>,
) -> Result<Canvas, ImageError> {
    let mut canvas = Canvas::new(size)?;
    for (view, placement) in views {
        canvas.place(view, placement);
    }
    Ok(canvas)
}
