#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// alpha channel and chroma keying module.
pub mod alpha;

/// image compositing module.
pub mod composite;

/// image cropping module.
pub mod crop;

/// planar homography estimation module.
pub mod homography;

/// utilities for interpolation.
pub mod interpolation;

/// module containing parallization utilities.
pub mod parallel;

/// utility functions for resizing images.
pub mod resize;

/// right-angle image rotations.
pub mod rotate;

/// image geometric transformations module.
pub mod warp;
