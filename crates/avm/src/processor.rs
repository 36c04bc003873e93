use std::{path::Path, time::Instant};

use rayon::prelude::*;

use crate::{
    canvas::Canvas,
    config::{CameraRole, RigConfig},
    error::{AvmError, ConfigError},
    frame::FrameSet,
    vehicle::VehicleIcon,
    view::{self, MaskedFrame},
};

/// Builds the top-view composite from four camera frames.
///
/// The configuration is validated once at construction. A pass never fails because of
/// the geometry or a missing icon, only because of an invalid image.
///
/// # Example
///
/// ```
/// use avm::{Frame, FrameSet, RigConfig, TopViewProcessor};
///
/// let processor = TopViewProcessor::new(RigConfig::default()).unwrap();
/// let frame = Frame::from_size_pixel([640, 480].into(), [0, 0, 255]).unwrap();
/// let frames = FrameSet::new(&frame, &frame, &frame, &frame);
///
/// let canvas = processor.process_frame_set(&frames, None).unwrap();
/// assert_eq!(canvas.size(), [1080, 1090].into());
///
/// let cropped = processor.crop_sides(&canvas, 225).unwrap();
/// assert_eq!(cropped.size(), [630, 1090].into());
/// ```
#[derive(Debug, Clone)]
pub struct TopViewProcessor {
    config: RigConfig,
}

impl TopViewProcessor {
    /// Create a processor for the given rig.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: RigConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The rig configuration.
    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Rectify, orient and mask the frame of one camera.
    pub fn process_view(
        &self,
        role: CameraRole,
        frames: &FrameSet<'_>,
    ) -> Result<MaskedFrame, AvmError> {
        let view = view::process_view(
            frames.get(role),
            self.config.camera(role),
            self.config.rectified_size,
        )?;
        Ok(view)
    }

    /// Composite the four frames and the optional vehicle icon.
    ///
    /// The four cameras are processed in parallel, then written to the canvas in the
    /// order front, rear, left, right, and the icon last. The returned canvas is not
    /// cropped.
    pub fn process_frame_set(
        &self,
        frames: &FrameSet<'_>,
        icon: Option<&VehicleIcon>,
    ) -> Result<Canvas, AvmError> {
        let start = Instant::now();

        let views = CameraRole::ALL
            .par_iter()
            .map(|&role| self.process_view(role, frames))
            .collect::<Result<Vec<_>, _>>()?;

        let mut canvas = Canvas::new(self.config.canvas_size)?;
        for (role, view) in CameraRole::ALL.iter().zip(&views) {
            canvas.place(view, self.config.camera(*role).placement);
        }
        canvas.overlay(icon, self.config.vehicle_size);

        log::debug!(
            "composited {} canvas in {:?}",
            canvas.size(),
            start.elapsed()
        );

        Ok(canvas)
    }

    /// Like [`Self::process_frame_set`], loading the vehicle icon from `icon_path`.
    ///
    /// An icon that cannot be loaded disables the overlay for this pass.
    pub fn process_frame_set_with_icon_path(
        &self,
        frames: &FrameSet<'_>,
        icon_path: Option<&Path>,
    ) -> Result<Canvas, AvmError> {
        let icon = icon_path.and_then(VehicleIcon::load_optional);
        self.process_frame_set(frames, icon.as_ref())
    }

    /// Remove `margin` columns from both sides of `canvas`.
    pub fn crop_sides(&self, canvas: &Canvas, margin: usize) -> Result<Canvas, AvmError> {
        canvas.crop_sides(margin)
    }

    /// Remove the configured margin from both sides of `canvas`.
    pub fn crop(&self, canvas: &Canvas) -> Result<Canvas, AvmError> {
        canvas.crop_sides(self.config.crop_margin)
    }
}
