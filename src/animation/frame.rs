//! Animation frames
//!
//! A frame is one tick-step of an action: an image index, a hold duration,
//! per-axis move permissions and the hitboxes active at that tick.

use smallvec::SmallVec;

use super::hitbox::{HitboxItem, Role};
use crate::geom::Rect;

/// Axes on which the owning actor may move while this frame is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveAxes {
    /// Horizontal movement allowed
    pub x: bool,
    /// Vertical movement allowed
    pub y: bool,
}

impl Default for MoveAxes {
    fn default() -> Self {
        Self { x: true, y: true }
    }
}

/// One tick-step of an action
#[derive(Debug, Clone)]
pub struct Frame {
    index: usize,
    delay: u32,
    move_axes: MoveAxes,
    items: SmallVec<[HitboxItem; 2]>,
}

impl Frame {
    /// Create a frame from its image index, hold duration and hitboxes
    #[must_use]
    pub fn new(
        index: usize,
        delay: u32,
        move_axes: MoveAxes,
        items: SmallVec<[HitboxItem; 2]>,
    ) -> Self {
        Self {
            index,
            delay,
            move_axes,
            items,
        }
    }

    /// Image index into the owning actor's sprite sheet
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of ticks this frame is held
    #[must_use]
    pub const fn delay(&self) -> u32 {
        self.delay
    }

    /// All hitboxes active in this frame
    #[must_use]
    pub fn items(&self) -> &[HitboxItem] {
        &self.items
    }

    /// The body hitbox, if this frame has one
    #[must_use]
    pub fn body_item(&self) -> Option<&HitboxItem> {
        self.items.iter().find(|item| item.role() == Role::Body)
    }

    /// The attack hitbox, if this frame has one
    #[must_use]
    pub fn attack_item(&self) -> Option<&HitboxItem> {
        self.items.iter().find(|item| item.role() == Role::Attack)
    }

    /// Whether the actor may move horizontally during this frame
    #[must_use]
    pub const fn allow_horizontal_move(&self) -> bool {
        self.move_axes.x
    }

    /// Whether the actor may move vertically during this frame
    #[must_use]
    pub const fn allow_vertical_move(&self) -> bool {
        self.move_axes.y
    }

    /// Align all hitboxes against the actor's body rectangle
    ///
    /// Each item's top-left becomes `body.topleft + offset`. When `mirrored`,
    /// the horizontal offset is reflected about the body's width so the
    /// hitbox tracks a horizontally flipped sprite.
    pub fn align(&mut self, body: &Rect, mirrored: bool) {
        for item in &mut self.items {
            let mut offset_x = item.offset_x();
            if mirrored {
                offset_x = body.width - item.rect.width - item.offset_x();
            }
            item.rect.left = body.left + offset_x;
            item.rect.top = body.top + item.offset_y();
        }
    }

    /// Recompute the body rectangle's position from the body hitbox
    ///
    /// Inverse of [`align`](Self::align): after an external authority moved
    /// the body hitbox, write the implied position back into `body`. No-op
    /// when this frame has no body hitbox.
    pub fn receive(&self, body: &mut Rect, mirrored: bool) {
        let Some(item) = self.body_item() else {
            return;
        };
        let mut offset_x = item.offset_x();
        if mirrored {
            offset_x = body.width - item.rect.width - item.offset_x();
        }
        body.left = item.rect.left - offset_x;
        body.top = item.rect.top - item.offset_y();
    }
}
