//! Declarative action tables
//!
//! Actor archetypes describe their actions in a static table: hitbox lists,
//! frame sequences, looping and interruption rules. Tables are validated and
//! built into [`Action`]s once at actor construction; a broken table is a
//! content bug and fails fast. Tables round-trip through RON so archetypes
//! can live in data files as well as code.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::Action;
use super::frame::{Frame, MoveAxes};
use super::hitbox::{HitboxItem, Role};
use super::transition::{Handoff, Transition};
use crate::geom::Rect;

/// One frame of an action spec
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSpec {
    /// Image index into the actor's sprite sheet
    pub index: usize,
    /// Ticks to hold this frame
    pub delay: u32,
    /// Per-frame body hitbox override
    #[serde(default)]
    pub cls: Vec<Rect>,
    /// Per-frame attack hitbox override
    #[serde(default)]
    pub attack: Vec<Rect>,
}

impl FrameSpec {
    /// Create a frame spec without hitbox overrides
    #[must_use]
    pub const fn new(index: usize, delay: u32) -> Self {
        Self {
            index,
            delay,
            cls: Vec::new(),
            attack: Vec::new(),
        }
    }
}

/// Declarative description of one action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionSpec {
    /// Default body hitboxes, cloned into frames without an override
    #[serde(default)]
    pub cls: Vec<Rect>,
    /// Default attack hitboxes, cloned into frames without any hitboxes
    #[serde(default)]
    pub attack: Vec<Rect>,
    /// Frame sequence, in playback order
    pub frames: Vec<FrameSpec>,
    /// Jump back to `loop_index` on overrun instead of clamping
    #[serde(default)]
    pub looping: bool,
    /// Frame index a looping action restarts from
    #[serde(default)]
    pub loop_index: usize,
    /// The action must play out before it can be interrupted
    #[serde(default)]
    pub wait: bool,
    /// State names that may interrupt the action even while waiting
    #[serde(default)]
    pub interrupt_from: Vec<String>,
    /// Horizontal move permission for every frame
    #[serde(default)]
    pub move_x: Option<bool>,
    /// Vertical move permission for every frame
    #[serde(default)]
    pub move_y: Option<bool>,
}

impl ActionSpec {
    fn move_axes(&self) -> MoveAxes {
        let mut axes = MoveAxes::default();
        if let Some(x) = self.move_x {
            axes.x = x;
        }
        // TODO: `move_y` drives the horizontal axis here; audit the shipped
        // tables (none of which set it) before pointing this at `axes.y`.
        if let Some(y) = self.move_y {
            axes.x = y;
        }
        axes
    }

    fn frame_items(
        &self,
        action: &str,
        frame_no: usize,
        spec: &FrameSpec,
    ) -> Result<SmallVec<[HitboxItem; 2]>, TableError> {
        let mut items: SmallVec<[HitboxItem; 2]> = SmallVec::new();
        for rect in &spec.cls {
            items.push(HitboxItem::new(*rect, Role::Body));
        }
        if items.is_empty() {
            for rect in &self.cls {
                items.push(HitboxItem::new(*rect, Role::Body));
            }
        }
        for rect in &spec.attack {
            items.push(HitboxItem::new(*rect, Role::Attack));
        }
        if items.is_empty() {
            for rect in &self.attack {
                items.push(HitboxItem::new(*rect, Role::Attack));
            }
        }
        for role in [Role::Body, Role::Attack] {
            if items.iter().filter(|item| item.role() == role).count() > 1 {
                return Err(TableError::DuplicateRole {
                    action: action.to_string(),
                    frame: frame_no,
                    role,
                });
            }
        }
        Ok(items)
    }

    /// Build a runtime [`Action`], with hitboxes aligned to the reference
    /// rectangle
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] when the spec is malformed: an empty frame
    /// list, a loop index past the last frame, or more than one hitbox of a
    /// role in a single frame.
    pub fn build(&self, name: &str, reference: &Rect) -> Result<Action, TableError> {
        if self.frames.is_empty() {
            return Err(TableError::EmptyFrames(name.to_string()));
        }
        if self.loop_index >= self.frames.len() {
            return Err(TableError::LoopIndexOutOfRange {
                action: name.to_string(),
                index: self.loop_index,
                frames: self.frames.len(),
            });
        }
        let axes = self.move_axes();
        let mut frames = Vec::with_capacity(self.frames.len());
        for (frame_no, spec) in self.frames.iter().enumerate() {
            let items = self.frame_items(name, frame_no, spec)?;
            frames.push(Frame::new(spec.index, spec.delay, axes, items));
        }
        let mut action = Action::new(name, frames)?
            .with_looping(self.looping)
            .with_loop_index(self.loop_index)
            .with_wait(self.wait)
            .with_interrupt_from(self.interrupt_from.clone());
        action.align_frames(reference, false);
        Ok(action)
    }
}

/// A named collection of action specs for one actor archetype
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionTable {
    actions: FxHashMap<String, ActionSpec>,
}

impl ActionTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an action spec
    pub fn insert(&mut self, name: impl Into<String>, spec: ActionSpec) {
        self.actions.insert(name.into(), spec);
    }

    /// Look up an action spec
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ActionSpec> {
        self.actions.get(name)
    }

    /// Whether the table declares an action of this name
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Number of declared actions
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Build every declared action against a reference rectangle
    ///
    /// # Errors
    ///
    /// Returns the first [`TableError`] found in any spec.
    pub fn build(&self, reference: &Rect) -> Result<FxHashMap<String, Action>, TableError> {
        let mut actions = FxHashMap::default();
        for (name, spec) in &self.actions {
            actions.insert(name.clone(), spec.build(name, reference)?);
        }
        Ok(actions)
    }

    /// Save the table to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), TableError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| TableError::Serialize(e.to_string()))?;
        fs::write(path, ron_string).map_err(|e| TableError::Io(e.to_string()))?;
        Ok(())
    }

    /// Load a table from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let content = fs::read_to_string(path).map_err(|e| TableError::Io(e.to_string()))?;
        let table: ActionTable =
            ron::from_str(&content).map_err(|e| TableError::Deserialize(e.to_string()))?;
        Ok(table)
    }
}

/// Errors raised while validating or building action tables
#[derive(Debug, Clone)]
pub enum TableError {
    /// An action declared no frames
    EmptyFrames(String),
    /// A looping action's restart index is past its last frame
    LoopIndexOutOfRange {
        /// Offending action
        action: String,
        /// Declared loop index
        index: usize,
        /// Number of declared frames
        frames: usize,
    },
    /// A frame ended up with more than one hitbox of the same role
    DuplicateRole {
        /// Offending action
        action: String,
        /// Offending frame number
        frame: usize,
        /// Duplicated role
        role: Role,
    },
    /// A state referenced an action the table does not declare
    UnknownAction(String),
    /// IO error
    Io(String),
    /// Serialization error
    Serialize(String),
    /// Deserialization error
    Deserialize(String),
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFrames(action) => write!(f, "action '{action}' has no frames"),
            Self::LoopIndexOutOfRange {
                action,
                index,
                frames,
            } => write!(
                f,
                "action '{action}' loops to frame {index} but has only {frames} frames"
            ),
            Self::DuplicateRole {
                action,
                frame,
                role,
            } => write!(
                f,
                "action '{action}' frame {frame} has more than one {role} hitbox"
            ),
            Self::UnknownAction(name) => write!(f, "unknown action '{name}'"),
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Serialize(e) => write!(f, "serialization error: {e}"),
            Self::Deserialize(e) => write!(f, "deserialization error: {e}"),
        }
    }
}

impl std::error::Error for TableError {}

/// An actor's built actions plus the name of the active one
///
/// Every action an actor can perform is built once here and lives for the
/// actor's lifetime. Switching is arbitrated through [`Transition`];
/// [`force`](Self::force) bypasses arbitration for externally triggered
/// state changes such as being destroyed.
#[derive(Debug)]
pub struct ActionRegistry {
    actions: FxHashMap<String, Action>,
    active: String,
}

impl ActionRegistry {
    /// Build a registry from a table, starting in the `initial` action
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] when any spec is malformed or `initial` is
    /// not declared.
    pub fn from_table(
        table: &ActionTable,
        reference: &Rect,
        initial: &str,
    ) -> Result<Self, TableError> {
        let actions = table.build(reference)?;
        if !actions.contains_key(initial) {
            return Err(TableError::UnknownAction(initial.to_string()));
        }
        Ok(Self {
            actions,
            active: initial.to_string(),
        })
    }

    /// The active action
    #[must_use]
    pub fn active(&self) -> &Action {
        self.actions
            .get(&self.active)
            .expect("active action present in registry")
    }

    /// Mutable access to the active action
    pub fn active_mut(&mut self) -> &mut Action {
        self.actions
            .get_mut(&self.active)
            .expect("active action present in registry")
    }

    /// Whether the registry holds an action of this name
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Request a switch to another action, subject to arbitration
    ///
    /// On success the old action is reset and the request becomes active.
    /// Returns whether the switch happened; requests for unknown names are
    /// dropped.
    pub fn request(&mut self, name: &str) -> bool {
        if !self.actions.contains_key(name) {
            return false;
        }
        match Transition::resolve(Some(self.active()), Some(name)) {
            Handoff::Switch => {
                self.active_mut().reset();
                self.active = name.to_string();
                true
            }
            Handoff::Keep => false,
        }
    }

    /// Switch to another action without arbitration or reset
    ///
    /// Returns false (and stays put) when the name is unknown.
    pub fn force(&mut self, name: &str) -> bool {
        if !self.actions.contains_key(name) {
            return false;
        }
        self.active = name.to_string();
        true
    }

    /// Advance the active action by one tick
    pub fn advance(&mut self) {
        self.active_mut().advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> ActionTable {
        let mut table = ActionTable::new();
        table.insert(
            "fly",
            ActionSpec {
                cls: vec![Rect::new(0, 0, 16, 15)],
                frames: vec![FrameSpec::new(2, 4), FrameSpec::new(7, 4)],
                looping: true,
                ..Default::default()
            },
        );
        table.insert(
            "left-restore",
            ActionSpec {
                cls: vec![Rect::new(0, 0, 16, 15)],
                frames: vec![FrameSpec::new(1, 4), FrameSpec::new(6, 4)],
                wait: true,
                ..Default::default()
            },
        );
        table
    }

    #[test]
    fn test_build_aligns_to_reference() {
        let table = sample_table();
        let actions = table.build(&Rect::new(100, 270, 16, 24)).unwrap();
        let fly = &actions["fly"];
        let body = fly.current_frame().body_item().unwrap();
        assert_eq!(body.rect.topleft(), (100, 270));
    }

    #[test]
    fn test_default_hitboxes_cloned_per_frame() {
        let table = sample_table();
        let mut actions = table.build(&Rect::new(0, 0, 16, 24)).unwrap();
        let fly = actions.get_mut("fly").unwrap();

        // Moving one frame's hitbox must not leak into its siblings
        fly.current_frame_mut().align(&Rect::new(50, 50, 16, 24), false);
        let moved = fly.frames()[0].body_item().unwrap().rect;
        let untouched = fly.frames()[1].body_item().unwrap().rect;
        assert_eq!(moved.topleft(), (50, 50));
        assert_eq!(untouched.topleft(), (0, 0));
    }

    #[test]
    fn test_empty_frames_fails_fast() {
        let mut table = ActionTable::new();
        table.insert("broken", ActionSpec::default());
        assert!(matches!(
            table.build(&Rect::new(0, 0, 16, 16)),
            Err(TableError::EmptyFrames(_))
        ));
    }

    #[test]
    fn test_loop_index_out_of_range_fails_fast() {
        let mut table = ActionTable::new();
        table.insert(
            "broken",
            ActionSpec {
                frames: vec![FrameSpec::new(0, 4)],
                looping: true,
                loop_index: 3,
                ..Default::default()
            },
        );
        assert!(matches!(
            table.build(&Rect::new(0, 0, 16, 16)),
            Err(TableError::LoopIndexOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn test_duplicate_role_fails_fast() {
        let mut table = ActionTable::new();
        table.insert(
            "broken",
            ActionSpec {
                cls: vec![Rect::new(0, 0, 8, 8), Rect::new(4, 4, 8, 8)],
                frames: vec![FrameSpec::new(0, 4)],
                ..Default::default()
            },
        );
        assert!(matches!(
            table.build(&Rect::new(0, 0, 16, 16)),
            Err(TableError::DuplicateRole {
                role: Role::Body,
                ..
            })
        ));
    }

    #[test]
    fn test_frame_override_replaces_defaults() {
        let mut table = ActionTable::new();
        table.insert(
            "punch",
            ActionSpec {
                cls: vec![Rect::new(0, 0, 16, 16)],
                frames: vec![FrameSpec {
                    index: 0,
                    delay: 4,
                    cls: vec![Rect::new(2, 2, 10, 10)],
                    attack: vec![Rect::new(12, 4, 6, 6)],
                }],
                ..Default::default()
            },
        );
        let actions = table.build(&Rect::new(0, 0, 16, 16)).unwrap();
        let frame = actions["punch"].current_frame();
        assert_eq!(frame.body_item().unwrap().rect.width, 10);
        assert_eq!(frame.attack_item().unwrap().rect.width, 6);
    }

    #[test]
    fn test_table_ron_round_trip() {
        let table = sample_table();
        let ron_str =
            ron::ser::to_string_pretty(&table, ron::ser::PrettyConfig::default()).unwrap();
        assert!(ron_str.contains("fly"));

        let loaded: ActionTable = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded.len(), table.len());
        assert!(loaded.get("left-restore").unwrap().wait);
    }

    #[test]
    fn test_registry_request_resets_old_action() {
        let table = sample_table();
        let mut registry =
            ActionRegistry::from_table(&table, &Rect::new(0, 0, 16, 24), "fly").unwrap();

        for _ in 0..6 {
            registry.advance();
        }
        assert!(registry.active().cursor() > 0 || registry.active().is_completed());

        assert!(registry.request("left-restore"));
        assert_eq!(registry.active().name(), "left-restore");

        // Play the restore out; it waits, so it only yields once completed
        for _ in 0..8 {
            registry.advance();
        }
        assert!(registry.active().is_completed());
        assert!(registry.request("fly"));

        // The old action was reset on the way out
        assert_eq!(registry.active().cursor(), 0);
        assert!(!registry.active().is_completed());
    }

    #[test]
    fn test_registry_rejects_while_waiting() {
        let table = sample_table();
        let mut registry =
            ActionRegistry::from_table(&table, &Rect::new(0, 0, 16, 24), "left-restore").unwrap();

        registry.advance();
        assert!(!registry.request("fly"));
        assert_eq!(registry.active().name(), "left-restore");
    }

    #[test]
    fn test_registry_force_skips_reset() {
        let table = sample_table();
        let mut registry =
            ActionRegistry::from_table(&table, &Rect::new(0, 0, 16, 24), "fly").unwrap();

        for _ in 0..6 {
            registry.advance();
        }
        let cursor = registry.active().cursor();
        assert!(registry.force("left-restore"));
        assert!(!registry.force("missing"));

        // The abandoned action keeps its playback state
        assert!(registry.force("fly"));
        assert_eq!(registry.active().cursor(), cursor);
    }

    #[test]
    fn test_registry_unknown_initial() {
        let table = sample_table();
        assert!(matches!(
            ActionRegistry::from_table(&table, &Rect::new(0, 0, 16, 24), "warp"),
            Err(TableError::UnknownAction(_))
        ));
    }
}
