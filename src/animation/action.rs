//! Action state machine
//!
//! An action is a named, ordered frame sequence advanced once per simulation
//! tick. Looping actions jump back to their loop index on overrun; one-shot
//! actions clamp on their last frame. Either way `completed` latches at the
//! overrun tick and stays set until the action is externally reset.

use super::frame::Frame;
use super::table::TableError;
use crate::geom::Rect;

/// A named, possibly looping frame sequence with an interruption policy
#[derive(Debug, Clone)]
pub struct Action {
    name: String,
    frames: Vec<Frame>,
    looping: bool,
    loop_index: usize,
    wait: bool,
    interrupt_from: Vec<String>,
    tick: u32,
    cursor: usize,
    completed: bool,
}

impl Action {
    /// Create an action from a non-empty frame list
    ///
    /// # Errors
    ///
    /// Returns [`TableError::EmptyFrames`] when `frames` is empty.
    pub fn new(name: impl Into<String>, frames: Vec<Frame>) -> Result<Self, TableError> {
        let name = name.into();
        if frames.is_empty() {
            return Err(TableError::EmptyFrames(name));
        }
        Ok(Self {
            name,
            frames,
            looping: false,
            loop_index: 0,
            wait: false,
            interrupt_from: Vec::new(),
            tick: 0,
            cursor: 0,
            completed: false,
        })
    }

    /// Enable or disable looping
    #[must_use]
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Set the frame index a looping action jumps back to on overrun
    ///
    /// Clamped to the last frame.
    #[must_use]
    pub fn with_loop_index(mut self, index: usize) -> Self {
        self.loop_index = index.min(self.frames.len() - 1);
        self
    }

    /// Require the action to play out before it can be interrupted
    #[must_use]
    pub fn with_wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    /// Names that may interrupt this action even while it is waiting
    #[must_use]
    pub fn with_interrupt_from(mut self, names: Vec<String>) -> Self {
        self.interrupt_from = names;
        self
    }

    /// The action's name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The frame under the cursor
    #[must_use]
    pub fn current_frame(&self) -> &Frame {
        &self.frames[self.cursor]
    }

    /// Mutable access to the frame under the cursor, for hitbox alignment
    pub fn current_frame_mut(&mut self) -> &mut Frame {
        &mut self.frames[self.cursor]
    }

    /// All frames of the action
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Current cursor position
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the action has overrun its frame list since the last reset
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Advance the action by one simulation tick
    ///
    /// Increments the hold counter; once the current frame's delay has
    /// elapsed, moves the cursor per the overrun policy and resets the
    /// counter. Returns the frame now under the cursor.
    pub fn advance(&mut self) -> &Frame {
        self.tick += 1;
        if self.tick >= self.frames[self.cursor].delay() {
            self.cursor = self.next_index();
            self.tick = 0;
        }
        &self.frames[self.cursor]
    }

    fn next_index(&mut self) -> usize {
        let index = self.cursor + 1;
        if index > self.frames.len() - 1 {
            self.completed = true;
            if self.looping {
                return self.loop_index;
            }
            return self.frames.len() - 1;
        }
        index
    }

    /// Rewind to the first frame and clear the completion latch
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.completed = false;
    }

    /// Whether a candidate state may interrupt this action right now
    ///
    /// False only while the action is waiting to complete and the candidate
    /// is not on its interrupt whitelist.
    #[must_use]
    pub fn can_interrupt(&self, candidate: &str) -> bool {
        !(self.wait && !self.completed && !self.interrupt_from.iter().any(|n| n == candidate))
    }

    /// Align every frame's hitboxes against the given body rectangle
    pub fn align_frames(&mut self, body: &Rect, mirrored: bool) {
        for frame in &mut self.frames {
            frame.align(body, mirrored);
        }
    }
}
