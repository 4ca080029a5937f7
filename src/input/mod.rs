//! Abstract per-tick intent
//!
//! The input collaborator decodes keyboard or gamepad state into an
//! [`Intent`] sample: an 8-way direction plus an optional, already-debounced
//! button press. A button appears in `pressed` only on the tick it fires;
//! holding it down does not re-fire.

mod intent;

pub use intent::{Button, Direction, Heading, Intent};
