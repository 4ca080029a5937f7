//! Role-tagged hitboxes
//!
//! A hitbox is a rectangle declared relative to an action's reference pose.
//! The declared top-left is captured once as an offset and used to re-project
//! the rectangle onto the owning actor's body as it moves.

use serde::{Deserialize, Serialize};

use crate::geom::Rect;

/// What a hitbox rectangle represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// The actor's body extent, used for incoming collisions
    Body,
    /// An attacking extent, used for outgoing collisions
    Attack,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Body => write!(f, "body"),
            Self::Attack => write!(f, "attack"),
        }
    }
}

/// A rectangle with a role and a fixed offset from the reference pose
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitboxItem {
    /// Working rectangle, re-positioned by [`Frame::align`](crate::animation::Frame::align)
    pub rect: Rect,
    role: Role,
    offset: (i32, i32),
}

impl HitboxItem {
    /// Create a hitbox, capturing the declared top-left as its offset
    #[must_use]
    pub const fn new(rect: Rect, role: Role) -> Self {
        Self {
            rect,
            role,
            offset: rect.topleft(),
        }
    }

    /// The hitbox role
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Horizontal offset from the reference pose's left edge
    #[must_use]
    pub const fn offset_x(&self) -> i32 {
        self.offset.0
    }

    /// Vertical offset from the reference pose's top edge
    #[must_use]
    pub const fn offset_y(&self) -> i32 {
        self.offset.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hitbox_captures_offset() {
        let item = HitboxItem::new(Rect::new(3, 4, 16, 15), Role::Body);
        assert_eq!(item.offset_x(), 3);
        assert_eq!(item.offset_y(), 4);
    }

    #[test]
    fn test_hitbox_offset_immutable_after_move() {
        let mut item = HitboxItem::new(Rect::new(3, 4, 16, 15), Role::Attack);
        item.rect.set_topleft((100, 200));
        assert_eq!(item.offset_x(), 3);
        assert_eq!(item.offset_y(), 4);
        assert_eq!(item.role(), Role::Attack);
    }
}
