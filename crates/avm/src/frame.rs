use avm_image::Image;

use crate::config::CameraRole;

/// A decoded 3-channel color frame from one camera.
///
/// The channel order is kept as is through the pipeline.
pub type Frame = Image<u8, 3>;

/// One frame per camera role, borrowed from the caller.
#[derive(Debug, Clone, Copy)]
pub struct FrameSet<'a> {
    /// Frame from the front camera.
    pub front: &'a Frame,
    /// Frame from the rear camera.
    pub rear: &'a Frame,
    /// Frame from the left camera.
    pub left: &'a Frame,
    /// Frame from the right camera.
    pub right: &'a Frame,
}

impl<'a> FrameSet<'a> {
    /// Create a frame set from the four frames.
    pub fn new(front: &'a Frame, rear: &'a Frame, left: &'a Frame, right: &'a Frame) -> Self {
        Self {
            front,
            rear,
            left,
            right,
        }
    }

    /// The frame of the camera mounted at `role`.
    pub fn get(&self, role: CameraRole) -> &'a Frame {
        match role {
            CameraRole::Front => self.front,
            CameraRole::Rear => self.rear,
            CameraRole::Left => self.left,
            CameraRole::Right => self.right,
        }
    }
}

/// Latest frame received for each camera role.
///
/// Cameras deliver frames independently. A frame set is only handed out once every role
/// has delivered at least one frame. Taking a frame set does not empty the slots, so a
/// slow camera keeps contributing its last frame.
///
/// # Example
///
/// ```
/// use avm::{CameraRole, Frame, FrameSlots};
///
/// let mut slots = FrameSlots::default();
/// let frame = Frame::from_size_val([4, 4].into(), 0).unwrap();
///
/// slots.update(CameraRole::Front, frame.clone());
/// assert!(slots.frame_set().is_none());
///
/// for role in [CameraRole::Rear, CameraRole::Left, CameraRole::Right] {
///     slots.update(role, frame.clone());
/// }
/// assert!(slots.frame_set().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FrameSlots {
    front: Option<Frame>,
    rear: Option<Frame>,
    left: Option<Frame>,
    right: Option<Frame>,
}

impl FrameSlots {
    /// Store `frame` as the latest frame of `role`, returning the frame it replaces.
    pub fn update(&mut self, role: CameraRole, frame: Frame) -> Option<Frame> {
        self.slot_mut(role).replace(frame)
    }

    /// The latest frame of `role`, if any.
    pub fn get(&self, role: CameraRole) -> Option<&Frame> {
        match role {
            CameraRole::Front => self.front.as_ref(),
            CameraRole::Rear => self.rear.as_ref(),
            CameraRole::Left => self.left.as_ref(),
            CameraRole::Right => self.right.as_ref(),
        }
    }

    /// Roles that have not delivered a frame yet, in compositing order.
    pub fn missing(&self) -> Vec<CameraRole> {
        CameraRole::ALL
            .into_iter()
            .filter(|role| self.get(*role).is_none())
            .collect()
    }

    /// Borrow the four latest frames, or `None` while a role is still missing.
    pub fn frame_set(&self) -> Option<FrameSet<'_>> {
        Some(FrameSet {
            front: self.front.as_ref()?,
            rear: self.rear.as_ref()?,
            left: self.left.as_ref()?,
            right: self.right.as_ref()?,
        })
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn slot_mut(&mut self, role: CameraRole) -> &mut Option<Frame> {
        match role {
            CameraRole::Front => &mut self.front,
            CameraRole::Rear => &mut self.rear,
            CameraRole::Left => &mut self.left,
            CameraRole::Right => &mut self.right,
        }
    }
}
