/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the source and destination image sizes are not compatible.
    #[error("Invalid image size ({0}, {1}) for the requested operation ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a region of interest does not fit inside the image.
    #[error("Region at ({0}, {1}) of size {2}x{3} exceeds the image bounds {4}x{5}")]
    RegionOutOfBounds(usize, usize, usize, usize, usize, usize),

    /// Error when the pixel index is out of bounds.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the number of elements of an image overflows.
    #[error("Image size {0}x{1} with {2} channels is too large")]
    SizeOverflow(usize, usize, usize),
}
