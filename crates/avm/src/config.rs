use std::{fmt, path::Path};

use avm_image::ImageSize;
use avm_imgproc::{homography, rotate::Rotation};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Mounting position of a camera on the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraRole {
    /// Camera looking ahead of the vehicle.
    Front,
    /// Camera looking behind the vehicle.
    Rear,
    /// Camera on the left side.
    Left,
    /// Camera on the right side.
    Right,
}

impl CameraRole {
    /// All the roles in compositing order. Later roles overwrite earlier ones.
    pub const ALL: [CameraRole; 4] = [
        CameraRole::Front,
        CameraRole::Rear,
        CameraRole::Left,
        CameraRole::Right,
    ];

    /// Lowercase name of the role.
    pub fn name(&self) -> &'static str {
        match self {
            CameraRole::Front => "front",
            CameraRole::Rear => "rear",
            CameraRole::Left => "left",
            CameraRole::Right => "right",
        }
    }
}

impl fmt::Display for CameraRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Four ordered 2D points `(x, y)` in pixel coordinates.
///
/// In JSON a quad is a list of `[x, y]` pairs; any other number of points than four is
/// rejected when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f32; 2]>", into = "Vec<[f32; 2]>")]
pub struct Quad([[f32; 2]; 4]);

impl Quad {
    /// Create a quad from its four points.
    pub const fn new(points: [[f32; 2]; 4]) -> Self {
        Self(points)
    }

    /// The four points of the quad.
    pub fn points(&self) -> &[[f32; 2]; 4] {
        &self.0
    }

    /// Whether three of the points are (nearly) collinear.
    pub fn is_degenerate(&self) -> bool {
        homography::is_degenerate_quad(&self.0)
    }
}

impl TryFrom<Vec<[f32; 2]>> for Quad {
    type Error = ConfigError;

    fn try_from(points: Vec<[f32; 2]>) -> Result<Self, Self::Error> {
        let points: [[f32; 2]; 4] = points
            .try_into()
            .map_err(|points: Vec<[f32; 2]>| ConfigError::InvalidQuad(points.len()))?;
        Ok(Self(points))
    }
}

impl From<Quad> for Vec<[f32; 2]> {
    fn from(quad: Quad) -> Self {
        quad.0.to_vec()
    }
}

/// Top-left corner of a view on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Placement {
    /// Column of the top-left corner.
    pub x: usize,
    /// Row of the top-left corner.
    pub y: usize,
}

impl Placement {
    /// Create a placement at column `x` and row `y`.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Geometry of one camera: its ground correspondence, rotation and canvas placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Points in the camera frame.
    pub src: Quad,
    /// Where `src` lands in the rectified projection.
    pub dst: Quad,
    /// Rotation applied after rectification to match the mounting direction.
    #[serde(default)]
    pub rotation: Rotation,
    /// Offset of the rotated view on the canvas.
    pub placement: Placement,
}

impl CameraConfig {
    /// Size of the view after rotation, given the rectified size.
    pub fn view_size(&self, rectified_size: ImageSize) -> ImageSize {
        if self.rotation.swaps_axes() {
            rectified_size.transposed()
        } else {
            rectified_size
        }
    }
}

const GROUND_SRC: Quad = Quad::new([
    [122.0, 479.0],
    [522.0, 479.0],
    [269.0, 219.0],
    [375.0, 219.0],
]);

const FRONT_REAR_DST: Quad = Quad::new([
    [269.0, 479.0],
    [375.0, 479.0],
    [269.0, 219.0],
    [375.0, 219.0],
]);

const LEFT_RIGHT_DST: Quad = Quad::new([
    [264.0, 479.0],
    [380.0, 479.0],
    [264.0, 219.0],
    [380.0, 219.0],
]);

/// Full description of the camera rig and the output canvas.
///
/// `Default` gives the stock four-camera rig. Missing fields in a JSON file are taken
/// from it, so a file only needs to list what differs.
///
/// # Example
///
/// ```
/// use avm::{CameraRole, RigConfig};
///
/// let config = RigConfig::from_json_str(r#"{ "crop_margin": 100 }"#).unwrap();
///
/// assert_eq!(config.crop_margin, 100);
/// assert_eq!(config.canvas_size.width, 1080);
/// assert_eq!(config.camera(CameraRole::Rear).placement.y, 610);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Size of the composite before cropping.
    pub canvas_size: ImageSize,
    /// Size of every rectified frame, before rotation.
    pub rectified_size: ImageSize,
    /// Size the vehicle icon is resized to.
    pub vehicle_size: ImageSize,
    /// Columns removed from each side of the canvas by the final crop.
    pub crop_margin: usize,
    /// Front camera.
    pub front: CameraConfig,
    /// Rear camera.
    pub rear: CameraConfig,
    /// Left camera.
    pub left: CameraConfig,
    /// Right camera.
    pub right: CameraConfig,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            canvas_size: ImageSize {
                width: 1080,
                height: 1090,
            },
            rectified_size: ImageSize {
                width: 640,
                height: 480,
            },
            vehicle_size: ImageSize {
                width: 150,
                height: 190,
            },
            crop_margin: 225,
            front: CameraConfig {
                src: GROUND_SRC,
                dst: FRONT_REAR_DST,
                rotation: Rotation::None,
                placement: Placement::new(225, 0),
            },
            rear: CameraConfig {
                src: GROUND_SRC,
                dst: FRONT_REAR_DST,
                rotation: Rotation::Rotate180,
                placement: Placement::new(225, 610),
            },
            left: CameraConfig {
                src: GROUND_SRC,
                dst: LEFT_RIGHT_DST,
                rotation: Rotation::CounterClockwise90,
                placement: Placement::new(0, 225),
            },
            right: CameraConfig {
                src: GROUND_SRC,
                dst: LEFT_RIGHT_DST,
                rotation: Rotation::Clockwise90,
                placement: Placement::new(610, 225),
            },
        }
    }
}

impl RigConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RigConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::File(path.to_path_buf(), e))?;
        Self::from_json_str(&json)
    }

    /// Serialize the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The configuration of the camera mounted at `role`.
    pub fn camera(&self, role: CameraRole) -> &CameraConfig {
        match role {
            CameraRole::Front => &self.front,
            CameraRole::Rear => &self.rear,
            CameraRole::Left => &self.left,
            CameraRole::Right => &self.right,
        }
    }

    /// Mutable access to the configuration of the camera mounted at `role`.
    pub fn camera_mut(&mut self, role: CameraRole) -> &mut CameraConfig {
        match role {
            CameraRole::Front => &mut self.front,
            CameraRole::Rear => &mut self.rear,
            CameraRole::Left => &mut self.left,
            CameraRole::Right => &mut self.right,
        }
    }

    /// Check the configuration.
    ///
    /// Empty or unallocatable sizes, out of range placements and a crop margin that would
    /// remove the whole canvas are errors.
    /// Degenerate correspondences and views that stick out of the canvas are only
    /// logged: the warp and the clipped writes still produce an image.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, size) in [
            ("canvas", self.canvas_size),
            ("rectified", self.rectified_size),
            ("vehicle", self.vehicle_size),
        ] {
            if size.width == 0 || size.height == 0 {
                return Err(ConfigError::EmptySize(name, size));
            }
            // every image in a pass has at most 4 channels
            if size.checked_len(4).is_none() {
                return Err(ConfigError::SizeTooLarge(name, size));
            }
        }

        check_crop_margin(self.crop_margin, self.canvas_size.width)?;

        for role in CameraRole::ALL {
            let camera = self.camera(role);
            if camera.src.is_degenerate() || camera.dst.is_degenerate() {
                log::warn!("{role} correspondence has collinear points, the warp may be garbage");
            }

            let view = camera.view_size(self.rectified_size);
            let Placement { x, y } = camera.placement;
            let (Some(right), Some(bottom)) =
                (x.checked_add(view.width), y.checked_add(view.height))
            else {
                return Err(ConfigError::PlacementOverflow(role, x, y));
            };
            if right > self.canvas_size.width || bottom > self.canvas_size.height {
                log::warn!(
                    "{role} view {view} at ({x}, {y}) exceeds the {} canvas and will be clipped",
                    self.canvas_size
                );
            }
        }

        Ok(())
    }
}

/// Check that cropping `margin` columns from each side leaves something of `width`.
pub(crate) fn check_crop_margin(margin: usize, width: usize) -> Result<(), ConfigError> {
    if margin.saturating_mul(2) >= width {
        return Err(ConfigError::InvalidCropMargin { margin, width });
    }
    Ok(())
}
