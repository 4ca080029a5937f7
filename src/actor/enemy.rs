//! Enemy squadron members
//!
//! An enemy's motion is owned by its Home/Dive behavior; the animation
//! layer only decides which image and hitboxes are live. Destroyed enemies
//! play the explosion action and despawn when it completes.

use glam::Vec2;
use rand::Rng;

use super::{SheetId, Sprite};
use crate::ai::Behavior;
use crate::animation::{ActionRegistry, ActionSpec, ActionTable, FrameSpec, TableError};
use crate::geom::Rect;

const FLY: &str = "fly";
const EXPLODE: &str = "explode";

/// The enemy action table: a two-frame flight loop and the explosion
#[must_use]
pub fn enemy_actions() -> ActionTable {
    let mut table = ActionTable::new();
    table.insert(
        FLY,
        ActionSpec {
            cls: vec![Rect::new(0, 0, 16, 16)],
            frames: vec![FrameSpec::new(0, 6), FrameSpec::new(1, 6)],
            looping: true,
            ..Default::default()
        },
    );
    table.insert(
        EXPLODE,
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

/// One enemy of the squadron
#[derive(Debug)]
pub struct Enemy {
    rect: Rect,
    registry: ActionRegistry,
    behavior: Behavior,
    vel: Vec2,
    sheet: SheetId,
    alive: bool,
}

impl Enemy {
    /// Offset from the spawn point to the initial home target
    const HOME_OFFSET: Vec2 = Vec2::new(5.0, 0.0);

    /// Create an enemy homing near its spawn rectangle
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] when the table is malformed or missing the
    /// enemy's actions.
    pub fn new(table: &ActionTable, rect: Rect, rng: &mut impl Rng) -> Result<Self, TableError> {
        let registry = ActionRegistry::from_table(table, &rect, FLY)?;
        let source = Vec2::new(rect.left as f32, rect.top as f32);
        log::debug!("enemy spawned at {:?}", rect.topleft());
        Ok(Self {
            rect,
            registry,
            behavior: Behavior::home(source, source + Self::HOME_OFFSET, rng),
            vel: Vec2::ZERO,
            sheet: SheetId::EnemySmall,
            alive: true,
        })
    }

    /// Advance the enemy one simulation tick
    pub fn update(&mut self, rng: &mut impl Rng) {
        self.advance_motion(rng);
        if self.is_exploding() && self.registry.active().is_completed() {
            self.alive = false;
        }
        self.registry.advance();
        let rect = self.rect;
        self.registry.active_mut().current_frame_mut().align(&rect, false);
    }

    fn advance_motion(&mut self, rng: &mut impl Rng) {
        if self.is_exploding() {
            return;
        }
        self.behavior.update();
        self.vel = self.behavior.velocity();
        self.rect.set_center_vec(self.behavior.position());
        if self.behavior.is_completed() {
            self.behavior = self.behavior.next(rng);
            log::debug!(
                "enemy behavior flip at {:?}: diving={}",
                self.rect.center(),
                self.behavior.is_dive()
            );
        }
    }

    /// Destroy the enemy: switch straight to the explosion
    pub fn destroy(&mut self) {
        self.registry.force(EXPLODE);
        self.sheet = SheetId::Explosion;
        log::debug!("enemy destroyed at {:?}", self.rect.center());
    }

    /// Force a premature Home-to-Dive transition
    ///
    /// No-op unless the enemy is currently homing; a dive always runs to
    /// completion.
    pub fn start_dive(&mut self, rng: &mut impl Rng) {
        if self.behavior.is_home() && !self.is_exploding() {
            self.behavior = self.behavior.next(rng);
        }
    }

    /// Whether the enemy should still be simulated
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Whether the explosion action is playing
    #[must_use]
    pub fn is_exploding(&self) -> bool {
        self.registry.active().name() == EXPLODE
    }

    /// Whether the enemy is holding its home point
    #[must_use]
    pub fn is_home(&self) -> bool {
        !self.is_exploding() && self.behavior.is_home()
    }

    /// Whether the enemy is diving
    #[must_use]
    pub fn is_diving(&self) -> bool {
        !self.is_exploding() && self.behavior.is_dive()
    }

    /// Sprite handle for rendering; flipped upside down while ascending
    #[must_use]
    pub fn sprite(&self) -> Sprite {
        Sprite::new(self.sheet, self.registry.active().current_frame().index())
            .flipped_y(self.vel.y < 0.0)
    }

    /// The enemy's body rectangle
    #[must_use]
    pub const fn rect(&self) -> &Rect {
        &self.rect
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
}
