use avm_image::{Image, ImageError, ImageSize};
use avm_imgproc::{
    alpha, homography,
    rotate::{self, Rotation},
    warp::warp_perspective,
};

use crate::{
    config::{CameraConfig, Quad},
    frame::Frame,
};

/// Color treated as "no data" by the alpha masker.
pub const TRANSPARENT_KEY: [u8; 3] = [0, 0, 0];

/// A 4-channel view ready to be composited.
///
/// The alpha channel is 0 where the color was exactly black and 255 elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedFrame(Image<u8, 4>);

impl MaskedFrame {
    /// Wrap a 4-channel image whose alpha is already set.
    pub fn from_image(image: Image<u8, 4>) -> Self {
        Self(image)
    }

    /// The underlying 4-channel image.
    pub fn as_image(&self) -> &Image<u8, 4> {
        &self.0
    }

    /// Consume the view and return the underlying image.
    pub fn into_image(self) -> Image<u8, 4> {
        self.0
    }

    /// Size of the view in pixels.
    pub fn size(&self) -> ImageSize {
        self.0.size()
    }
}

/// Project a camera frame onto the ground plane.
///
/// The homography mapping `src` onto `dst` is solved on every call and the frame is
/// warped into an image of `size` with bilinear sampling. Output pixels whose pre-image
/// falls outside the frame are black.
///
/// Degenerate correspondences are logged and the warp goes ahead with whatever matrix
/// the solve produced.
///
/// # Example
///
/// ```
/// use avm::{view::rectify, Frame, RigConfig};
///
/// let config = RigConfig::default();
/// let frame = Frame::from_size_pixel([320, 240].into(), [0, 0, 255]).unwrap();
///
/// let rectified = rectify(&frame, &config.front.src, &config.front.dst, config.rectified_size).unwrap();
///
/// assert_eq!(rectified.size(), config.rectified_size);
/// ```
pub fn rectify(
    frame: &Frame,
    src: &Quad,
    dst: &Quad,
    size: ImageSize,
) -> Result<Frame, ImageError> {
    let m = homography::get_perspective_transform(src.points(), dst.points());
    if homography::is_degenerate(&m) || src.is_degenerate() || dst.is_degenerate() {
        log::warn!("degenerate ground homography {m:?}, warping anyway");
    }

    let mut rectified = Frame::from_size_val(size, 0)?;
    warp_perspective(frame, &mut rectified, &m);

    Ok(rectified)
}

/// Rotate a rectified frame to match the mounting direction of its camera.
pub fn orient(frame: &Frame, rotation: Rotation) -> Result<Frame, ImageError> {
    rotate::rotate(frame, rotation)
}

/// Add an alpha channel that hides the exactly black pixels.
pub fn to_masked(frame: &Frame) -> Result<MaskedFrame, ImageError> {
    let mut masked = Image::from_size_val(frame.size(), 0)?;
    alpha::add_alpha_channel(frame, &mut masked, u8::MAX)?;
    alpha::chroma_key(&mut masked, TRANSPARENT_KEY);
    Ok(MaskedFrame(masked))
}

/// Run rectification, orientation and masking for one camera.
pub fn process_view(
    frame: &Frame,
    camera: &CameraConfig,
    rectified_size: ImageSize,
) -> Result<MaskedFrame, ImageError> {
    let rectified = rectify(frame, &camera.src, &camera.dst, rectified_size)?;
    let oriented = orient(&rectified, camera.rotation)?;
    to_masked(&oriented)
}
