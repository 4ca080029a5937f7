//! Per-tick action arbitration
//!
//! Every tick the active action is weighed against the requested one. A
//! rejected request is simply dropped; it is re-evaluated from fresh inputs
//! on the next tick, never queued.

use super::action::Action;

/// Outcome of arbitrating the active action against a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    /// Keep the active action; the request (if any) is dropped this tick
    Keep,
    /// Replace the active action with the requested one, resetting the old
    Switch,
}

/// Stateless arbiter between the active and the requested action
#[derive(Debug)]
pub struct Transition;

impl Transition {
    /// Decide whether the active action may be replaced this tick
    ///
    /// With no active action the request always wins; with no request the
    /// active action stays. Requesting the active action by name is a no-op.
    /// Otherwise the switch goes through only when the active action can be
    /// interrupted by the request or has completed.
    #[must_use]
    pub fn resolve(current: Option<&Action>, requested: Option<&str>) -> Handoff {
        match (current, requested) {
            (None, Some(_)) => Handoff::Switch,
            (_, None) => Handoff::Keep,
            (Some(current), Some(requested)) => {
                if current.name() == requested {
                    Handoff::Keep
                } else if current.can_interrupt(requested) || current.is_completed() {
                    Handoff::Switch
                } else {
                    Handoff::Keep
                }
            }
        }
    }
}
