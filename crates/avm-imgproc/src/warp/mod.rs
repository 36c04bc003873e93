//! Geometric image transformations.
//!
//! - Perspective transformations (homographies)
//!
//! # Examples
//!
//! ```
//! use avm_image::{Image, ImageSize};
//! use avm_imgproc::warp::warp_perspective;
//!
//! let src = Image::<u8, 3>::from_size_pixel([8, 6].into(), [0, 0, 255]).unwrap();
//!
//! // scale down by two
//! let m = [0.5, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0, 1.0];
//!
//! let mut dst = Image::<u8, 3>::from_size_val(ImageSize { width: 4, height: 3 }, 0).unwrap();
//! warp_perspective(&src, &mut dst, &m);
//!
//! assert_eq!(dst.pixel(0, 0).unwrap(), &[0, 0, 255]);
//! ```

mod perspective;

pub use perspective::warp_perspective;
