//! Animation and collision state machine
//!
//! Actions are named, possibly looping frame sequences; each frame carries
//! the hitboxes active at that tick. Transitions between actions are gated
//! by the current action's interruption policy.

mod action;
mod frame;
mod hitbox;
mod table;
mod transition;

pub use action::Action;
pub use frame::{Frame, MoveAxes};
pub use hitbox::{HitboxItem, Role};
pub use table::{ActionRegistry, ActionSpec, ActionTable, FrameSpec, TableError};
pub use transition::{Handoff, Transition};
