use std::path::Path;

use avm_image::{Image, ImageError, ImageSize};
use avm_imgproc::resize::resize_native;
use avm_io::{png::read_image_png_rgba8, IoError};

/// Top-down silhouette of the vehicle drawn in the middle of the composite.
///
/// Pixels with zero alpha are left out when the icon is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleIcon(Image<u8, 4>);

impl VehicleIcon {
    /// Wrap a 4-channel image.
    pub fn new(image: Image<u8, 4>) -> Self {
        Self(image)
    }

    /// Load the icon from a PNG file.
    ///
    /// Images without an alpha channel are loaded fully opaque.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IoError> {
        Ok(Self(read_image_png_rgba8(path)?))
    }

    /// Load the icon, or return `None` with a warning if it cannot be read.
    ///
    /// A missing icon only disables the overlay, so callers decide once here and pass
    /// the result along.
    pub fn load_optional(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(icon) => {
                log::debug!("loaded vehicle icon {} ({})", path.display(), icon.size());
                Some(icon)
            }
            Err(e) => {
                log::warn!("vehicle icon {} not available, skipping overlay: {e}", path.display());
                None
            }
        }
    }

    /// Size of the icon as loaded.
    pub fn size(&self) -> ImageSize {
        self.0.size()
    }

    /// The icon image as loaded.
    pub fn as_image(&self) -> &Image<u8, 4> {
        &self.0
    }

    /// The icon resized to `size` with bilinear interpolation.
    ///
    /// # Errors
    ///
    /// Returns an error if the icon is empty.
    pub fn resized(&self, size: ImageSize) -> Result<Image<u8, 4>, ImageError> {
        if self.0.size() == size {
            return Ok(self.0.clone());
        }
        let mut dst = Image::from_size_val(size, 0)?;
        resize_native(&self.0, &mut dst)?;
        Ok(dst)
    }
}
