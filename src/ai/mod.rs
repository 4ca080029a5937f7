//! Steering and behavior for autonomous agents
//!
//! Provides seek-with-approach steering and the Home/Dive behavior cycle
//! that drives enemy movement goals.

mod behavior;
mod steering;

pub use behavior::Behavior;
pub use steering::Steering;
