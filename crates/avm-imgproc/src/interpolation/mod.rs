//! Pixel interpolation for image transformations.
//!
//! Bilinear interpolation between the four adjacent pixels, used by [`crate::resize`]
//! and [`crate::warp`].

mod bilinear;

pub use bilinear::bilinear_interpolation;
