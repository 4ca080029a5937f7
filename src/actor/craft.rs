//! The player craft
//!
//! Movement is a banked-turn state machine: committing to a lateral move
//! plays a bank animation, and returning to neutral (or reversing) must pass
//! through that side's restore state so the bank visibly unwinds before the
//! craft levels out.

use glam::IVec2;

use super::bolt::Bolt;
use super::{SheetId, Sprite};
use crate::animation::{Action, ActionRegistry, ActionSpec, ActionTable, FrameSpec, TableError};
use crate::geom::Rect;
use crate::input::{Heading, Intent};

/// The craft's named control states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraftState {
    /// Level flight
    Fly,
    /// Banked left
    Left,
    /// Banked right
    Right,
    /// Unwinding a left bank back to level
    LeftRestore,
    /// Unwinding a right bank back to level
    RightRestore,
    /// Destroyed
    Dead,
    /// Fire request; resolves to shooting, never to an action
    Attack1,
}

impl CraftState {
    /// The action name this state plays
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Fly => "fly",
            Self::Left => "left",
            Self::Right => "right",
            Self::LeftRestore => "left-restore",
            Self::RightRestore => "right-restore",
            Self::Dead => "dead",
            Self::Attack1 => "attack1",
        }
    }

    /// Parse a state back from its action name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fly" => Some(Self::Fly),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "left-restore" => Some(Self::LeftRestore),
            "right-restore" => Some(Self::RightRestore),
            "dead" => Some(Self::Dead),
            "attack1" => Some(Self::Attack1),
            _ => None,
        }
    }

    /// Directly reachable successor states
    ///
    /// States with no successors (dead) are terminal.
    #[must_use]
    pub const fn successors(&self) -> &'static [CraftState] {
        match self {
            Self::Fly => &[Self::Left, Self::Right, Self::Dead],
            Self::Right => &[Self::RightRestore, Self::Dead],
            Self::Left => &[Self::LeftRestore, Self::Dead],
            Self::LeftRestore | Self::RightRestore => &[Self::Fly],
            Self::Dead | Self::Attack1 => &[],
        }
    }

    /// Resolve a requested state against the current one
    ///
    /// A direct successor is accepted when the current action permits the
    /// interruption or has completed. Otherwise a fixed-priority rewrite
    /// list routes the request through the appropriate restore state, so a
    /// committed bank always unwinds before the craft levels out or
    /// reverses. When nothing matches the craft stays put.
    #[must_use]
    pub fn resolve(current: Self, requested: Self, action: &Action) -> Self {
        let successors = current.successors();
        if successors.is_empty() {
            return current;
        }
        if successors.contains(&requested)
            && (action.can_interrupt(requested.name()) || action.is_completed())
        {
            return requested;
        }
        if requested == Self::Fly && matches!(current, Self::Left | Self::Right) {
            return if current == Self::Left {
                Self::LeftRestore
            } else {
                Self::RightRestore
            };
        }
        if matches!(requested, Self::Left | Self::Right)
            && matches!(current, Self::LeftRestore | Self::RightRestore)
        {
            return Self::Fly;
        }
        if requested == Self::Left && current == Self::Right {
            return Self::RightRestore;
        }
        if requested == Self::Right && current == Self::Left {
            return Self::LeftRestore;
        }
        current
    }
}

/// The craft's action table: level flight, banked turns with restore
/// animations, and the death explosion
#[must_use]
pub fn craft_actions() -> ActionTable {
    let body = vec![Rect::new(0, 0, 16, 15)];
    let mut table = ActionTable::new();
    table.insert(
        "fly",
        ActionSpec {
            cls: body.clone(),
            frames: vec![FrameSpec::new(2, 4), FrameSpec::new(7, 4)],
            looping: true,
            ..Default::default()
        },
    );
    table.insert(
        "left",
        ActionSpec {
            cls: body.clone(),
            frames: vec![
                FrameSpec::new(1, 4),
                FrameSpec::new(6, 4),
                FrameSpec::new(0, 4),
                FrameSpec::new(5, 4),
            ],
            looping: true,
            loop_index: 2,
            ..Default::default()
        },
    );
    table.insert(
        "left-restore",
        ActionSpec {
            cls: body.clone(),
            frames: vec![FrameSpec::new(1, 4), FrameSpec::new(6, 4)],
            wait: true,
            ..Default::default()
        },
    );
    table.insert(
        "right",
        ActionSpec {
            cls: body.clone(),
            frames: vec![
                FrameSpec::new(3, 4),
                FrameSpec::new(8, 4),
                FrameSpec::new(4, 4),
                FrameSpec::new(9, 4),
            ],
            looping: true,
            loop_index: 2,
            ..Default::default()
        },
    );
    table.insert(
        "right-restore",
        ActionSpec {
            cls: body,
            frames: vec![FrameSpec::new(3, 2), FrameSpec::new(8, 2)],
            wait: true,
            ..Default::default()
        },
    );
    table.insert(
        "dead",
        ActionSpec {
            frames: vec![
                FrameSpec::new(0, 6),
                FrameSpec::new(1, 6),
                FrameSpec::new(2, 6),
                FrameSpec::new(3, 6),
            ],
            ..Default::default()
        },
    );
    table
}

/// The player craft
#[derive(Debug)]
pub struct Craft {
    rect: Rect,
    spawn: Rect,
    registry: ActionRegistry,
    sheet: SheetId,
    vel: IVec2,
    bolts: Vec<Bolt>,
    alive: bool,
}

impl Craft {
    /// Horizontal speed in pixels per tick
    pub const SPEED: i32 = 2;
    /// Maximum simultaneous live bolts; shooting at the cap is a no-op
    pub const MAX_BOLTS: usize = 3;
    /// Default spawn rectangle
    pub const SPAWN: Rect = Rect::new(100, 270, 16, 24);

    /// Create a craft from an action table, starting in level flight
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] when the table is malformed or missing the
    /// craft's states.
    pub fn new(table: &ActionTable, spawn: Rect) -> Result<Self, TableError> {
        let registry = ActionRegistry::from_table(table, &spawn, CraftState::Fly.name())?;
        log::debug!("craft spawned at {:?}", spawn.topleft());
        Ok(Self {
            rect: spawn,
            spawn,
            registry,
            sheet: SheetId::Ship,
            vel: IVec2::ZERO,
            bolts: Vec::new(),
            alive: true,
        })
    }

    /// Create a craft with the stock action table at the stock spawn
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] when the stock table fails to build.
    pub fn factory() -> Result<Self, TableError> {
        Self::new(&craft_actions(), Self::SPAWN)
    }

    /// The craft's current named state
    #[must_use]
    pub fn state(&self) -> CraftState {
        CraftState::from_name(self.registry.active().name()).unwrap_or(CraftState::Fly)
    }

    /// Whether the death animation has played out
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.registry.active().name() == CraftState::Dead.name()
            && self.registry.active().is_completed()
    }

    /// Whether the craft should still be simulated
    ///
    /// Goes false one tick after the death animation completes.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Advance the craft one simulation tick
    pub fn update(&mut self, intent: &Intent) {
        if self.is_dead() {
            self.alive = false;
        }
        self.vel.x = if self.registry.active().current_frame().allow_horizontal_move() {
            intent.direction.x * Self::SPEED
        } else {
            0
        };
        self.rect.left += self.vel.x;

        let current = self.state();
        let candidate = Self::candidate(intent, current);
        if candidate == CraftState::Attack1 {
            self.shoot();
        }
        let resolved = CraftState::resolve(current, candidate, self.registry.active());
        if resolved != current && self.registry.request(resolved.name()) {
            log::debug!("craft {} -> {}", current.name(), resolved.name());
        }
        self.registry.advance();
        let rect = self.rect;
        self.registry.active_mut().current_frame_mut().align(&rect, false);

        for bolt in &mut self.bolts {
            bolt.update();
        }
        self.bolts.retain(Bolt::is_alive);
    }

    /// Map an intent sample to a candidate state
    fn candidate(intent: &Intent, current: CraftState) -> CraftState {
        if current == CraftState::Dead {
            return CraftState::Dead;
        }
        if intent.pressed.is_some() {
            return CraftState::Attack1;
        }
        match intent.direction.heading() {
            Heading::Left | Heading::UpLeft | Heading::DownLeft => CraftState::Left,
            Heading::Right | Heading::UpRight => CraftState::Right,
            // TODO: down-right maps to the left bank; verify against the
            // intended control layout before changing it.
            Heading::DownRight => CraftState::Left,
            Heading::Neutral | Heading::Up | Heading::Down => CraftState::Fly,
        }
    }

    /// Fire a bolt from the craft's center
    ///
    /// No-op while the bolt cap is reached.
    pub fn shoot(&mut self) {
        if self.bolts.len() >= Self::MAX_BOLTS {
            return;
        }
        let rect = Rect::from_center(self.rect.center(), Bolt::SIZE.0, Bolt::SIZE.1);
        self.bolts.push(Bolt::new(rect));
        log::debug!("craft fired bolt {}", self.bolts.len());
    }

    /// Destroy the craft: switch straight to the death animation
    ///
    /// Bypasses arbitration; being destroyed is not negotiable.
    pub fn destroy(&mut self) {
        self.registry.force(CraftState::Dead.name());
        self.sheet = SheetId::Explosion;
        log::debug!("craft destroyed");
    }

    /// Restore the craft to its spawn state
    pub fn respawn(&mut self) {
        self.rect = self.spawn;
        self.registry.active_mut().reset();
        self.registry.force(CraftState::Fly.name());
        self.registry.active_mut().reset();
        self.sheet = SheetId::Ship;
        self.alive = true;
        self.bolts.clear();
        log::debug!("craft respawned");
    }

    /// Sprite handle for rendering
    #[must_use]
    pub fn sprite(&self) -> Sprite {
        Sprite::new(self.sheet, self.registry.active().current_frame().index())
    }

    /// The craft's body rectangle
    #[must_use]
    pub const fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Mutable access to the body rectangle, for external collision response
    pub const fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }

    /// The current frame's body hitbox rectangle, if present
    #[must_use]
    pub fn body_hitbox(&self) -> Option<Rect> {
        self.registry
            .active()
            .current_frame()
            .body_item()
            .map(|item| item.rect)
    }

    /// Live bolts
    #[must_use]
    pub fn bolts(&self) -> &[Bolt] {
        &self.bolts
    }

    /// Mutable access to live bolts, for the collision sweep
    pub fn bolts_mut(&mut self) -> &mut Vec<Bolt> {
        &mut self.bolts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Button;

    fn craft() -> Craft {
        Craft::factory().unwrap()
    }

    #[test]
    fn test_direct_bank_from_fly() {
        let craft = craft();
        let resolved = CraftState::resolve(
            CraftState::Fly,
            CraftState::Left,
            craft.registry.active(),
        );
        assert_eq!(resolved, CraftState::Left);
    }

    #[test]
    fn test_neutral_from_bank_goes_through_restore() {
        let mut craft = craft();
        craft.update(&Intent::moving(-1, 0));
        assert_eq!(craft.state(), CraftState::Left);

        craft.update(&Intent::neutral());
        assert_eq!(craft.state(), CraftState::LeftRestore);
    }

    #[test]
    fn test_reversal_goes_through_restore() {
        let mut craft = craft();
        craft.update(&Intent::moving(1, 0));
        assert_eq!(craft.state(), CraftState::Right);

        // Requesting the opposite bank routes through the current side's
        // restore state first
        craft.update(&Intent::moving(-1, 0));
        assert_eq!(craft.state(), CraftState::RightRestore);
    }

    #[test]
    fn test_restore_must_play_out() {
        let mut craft = craft();
        craft.update(&Intent::moving(-1, 0));
        craft.update(&Intent::neutral());
        assert_eq!(craft.state(), CraftState::LeftRestore);

        // The restore waits; neutral input cannot cut it short
        craft.update(&Intent::neutral());
        assert_eq!(craft.state(), CraftState::LeftRestore);

        // left-restore holds 2 frames of 4 ticks; play it out
        for _ in 0..8 {
            craft.update(&Intent::neutral());
        }
        assert_eq!(craft.state(), CraftState::Fly);
    }

    #[test]
    fn test_bank_request_during_restore_resolves_to_fly() {
        let craft = craft();
        let restore = craft_actions()
            .get("left-restore")
            .unwrap()
            .build("left-restore", &Craft::SPAWN)
            .unwrap();
        let resolved = CraftState::resolve(CraftState::LeftRestore, CraftState::Right, &restore);
        // The rewrite aims for level flight; the bank has to be re-requested
        // from there, but the restore action still gates the switch
        assert_eq!(resolved, CraftState::Fly);
    }

    #[test]
    fn test_dead_is_terminal() {
        let mut craft = craft();
        craft.destroy();
        assert_eq!(craft.state(), CraftState::Dead);

        craft.update(&Intent::moving(-1, 0));
        assert_eq!(craft.state(), CraftState::Dead);
    }

    #[test]
    fn test_down_right_banks_left() {
        assert_eq!(
            Craft::candidate(&Intent::moving(1, 1), CraftState::Fly),
            CraftState::Left
        );
        assert_eq!(
            Craft::candidate(&Intent::moving(1, -1), CraftState::Fly),
            CraftState::Right
        );
    }

    #[test]
    fn test_horizontal_movement() {
        let mut craft = craft();
        let start = craft.rect().left;
        for _ in 0..5 {
            craft.update(&Intent::moving(1, 0));
        }
        assert_eq!(craft.rect().left, start + 5 * Craft::SPEED);
    }

    #[test]
    fn test_bolt_cap() {
        let mut craft = craft();
        for _ in 0..5 {
            craft.shoot();
        }
        assert_eq!(craft.bolts().len(), Craft::MAX_BOLTS);
    }

    #[test]
    fn test_shoot_on_button_press() {
        let mut craft = craft();
        craft.update(&Intent::neutral().with_pressed(Button::A));
        assert_eq!(craft.bolts().len(), 1);
        // Bolt spawns centered on the craft
        let bolt = &craft.bolts()[0];
        assert_eq!(bolt.rect().width, 5);
        assert_eq!(bolt.rect().height, 13);
    }

    #[test]
    fn test_death_plays_out_then_despawns() {
        let mut craft = craft();
        craft.destroy();
        assert!(!craft.is_dead());

        // dead: 4 frames of 6 ticks
        for _ in 0..24 {
            craft.update(&Intent::neutral());
        }
        assert!(craft.is_dead());
        assert!(craft.is_alive());

        // One more tick and the craft despawns
        craft.update(&Intent::neutral());
        assert!(!craft.is_alive());
    }

    #[test]
    fn test_respawn_restores_spawn_state() {
        let mut craft = craft();
        craft.update(&Intent::moving(1, 0));
        craft.destroy();
        for _ in 0..25 {
            craft.update(&Intent::neutral());
        }
        assert!(!craft.is_alive());

        craft.respawn();
        assert!(craft.is_alive());
        assert!(!craft.is_dead());
        assert_eq!(craft.state(), CraftState::Fly);
        assert_eq!(*craft.rect(), Craft::SPAWN);
        assert_eq!(craft.sprite().sheet, SheetId::Ship);
    }

    #[test]
    fn test_body_hitbox_tracks_rect() {
        let mut craft = craft();
        craft.update(&Intent::moving(1, 0));
        let hitbox = craft.body_hitbox().unwrap();
        assert_eq!(hitbox.topleft(), craft.rect().topleft());
    }
}
