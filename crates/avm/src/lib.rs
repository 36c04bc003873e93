#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use avm_image as image;

#[doc(inline)]
pub use avm_imgproc as imgproc;

#[doc(inline)]
pub use avm_io as io;

/// canvas accumulator and side cropping.
pub mod canvas;

/// rig configuration: correspondences, placements and sizes.
pub mod config;

/// error types for the engine.
pub mod error;

/// frame sets and the latest-frame slots.
pub mod frame;

/// per-camera stages: rectification, orientation and alpha masking.
pub mod view;

/// top-view processor running a full compositing pass.
pub mod processor;

/// vehicle silhouette icon.
pub mod vehicle;

pub use crate::canvas::Canvas;
pub use crate::config::{CameraConfig, CameraRole, Placement, Quad, RigConfig};
pub use crate::error::{AvmError, ConfigError};
pub use crate::frame::{Frame, FrameSet, FrameSlots};
pub use crate::processor::TopViewProcessor;
pub use crate::vehicle::VehicleIcon;
pub use crate::view::MaskedFrame;
