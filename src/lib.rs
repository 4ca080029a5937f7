//! Headless simulation core for a 2D arcade shooter
//!
//! This crate provides:
//! - Frame-sequenced actions with role-tagged hitboxes
//! - Interruption-gated transitions between named actions
//! - A banked-turn control state machine for the player craft
//! - Seek-with-approach steering driving a Home/Dive enemy cycle
//!
//! Rendering, input decoding and asset loading are external collaborators:
//! the core consumes abstract [`input::Intent`] samples and exposes sprite
//! handles and hitbox rectangles for them to consume.

pub mod actor;
pub mod ai;
pub mod animation;
pub mod geom;
pub mod input;
pub mod stage;

// Re-exports for convenience
pub use glam;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::actor::{Bolt, Craft, CraftState, Enemy, SheetId, Sprite};
    pub use crate::ai::{Behavior, Steering};
    pub use crate::animation::{
        Action, ActionRegistry, ActionSpec, ActionTable, Frame, FrameSpec, Handoff, HitboxItem,
        Role, TableError, Transition,
    };
    pub use crate::geom::Rect;
    pub use crate::input::{Button, Direction, Heading, Intent};
    pub use crate::stage::{Stage, StageConfig, StageError};
    pub use glam::Vec2;
}
