//! The play stage
//!
//! Owns the craft, the enemy squadron and the walls, and steps them in a
//! fixed order every tick: craft (with its bolts), wall clamp, bolt sweep,
//! enemies, then the dive scheduler. Given a fixed tick sequence and seed
//! the whole stage is deterministic.

mod config;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::actor::{Bolt, Craft, Enemy, Sprite, craft_actions, enemy_actions};
use crate::animation::TableError;
use crate::geom::Rect;
use crate::input::Intent;

pub use config::StageConfig;

/// Errors raised while building or persisting a stage
#[derive(Debug, Clone)]
pub enum StageError {
    /// An actor's action table failed to build
    Table(TableError),
    /// IO error
    Io(String),
    /// Serialization error
    Serialize(String),
    /// Deserialization error
    Deserialize(String),
}

impl std::fmt::Display for StageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table(e) => write!(f, "action table error: {e}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Serialize(e) => write!(f, "serialization error: {e}"),
            Self::Deserialize(e) => write!(f, "deserialization error: {e}"),
        }
    }
}

impl std::error::Error for StageError {}

impl From<TableError> for StageError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}

/// The game-state layer driving one play field
#[derive(Debug)]
pub struct Stage {
    config: StageConfig,
    craft: Craft,
    enemies: Vec<Enemy>,
    left_wall: Rect,
    right_wall: Rect,
    rng: SmallRng,
    dive_timer: u32,
    score: u32,
    tick: u64,
}

impl Stage {
    /// Enemy rectangle size in the opening formation
    const ENEMY_SIZE: (i32, i32) = (16, 16);

    /// Build a stage: craft at its spawn, enemies in a formation row
    ///
    /// # Errors
    ///
    /// Returns a [`StageError`] when an action table fails to build.
    pub fn new(config: StageConfig) -> Result<Self, StageError> {
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let craft = Craft::new(&craft_actions(), Craft::SPAWN)?;

        let table = enemy_actions();
        let mut enemies = Vec::with_capacity(config.enemy_count);
        for i in 0..config.enemy_count {
            let rect = Rect::new(
                config.formation_left + i as i32 * config.formation_pitch,
                config.formation_top,
                Self::ENEMY_SIZE.0,
                Self::ENEMY_SIZE.1,
            );
            enemies.push(Enemy::new(&table, rect, &mut rng)?);
        }
        log::info!(
            "stage ready: {} enemies, field {}x{}",
            enemies.len(),
            config.width,
            config.height
        );

        let left_wall = Rect::new(0, 0, config.wall_width, config.height);
        let right_wall = Rect::new(
            config.width - config.wall_width,
            0,
            config.wall_width,
            config.height,
        );
        Ok(Self {
            config,
            craft,
            enemies,
            left_wall,
            right_wall,
            rng,
            dive_timer: 0,
            score: 0,
            tick: 0,
        })
    }

    /// Advance the whole stage one simulation tick
    pub fn step(&mut self, dt_ms: u32, intent: &Intent) {
        self.tick += 1;

        self.craft.update(intent);
        self.clamp_craft_to_walls();

        let kills = sweep_bolts(self.craft.bolts_mut(), &mut self.enemies);
        self.score += kills;

        for enemy in &mut self.enemies {
            enemy.update(&mut self.rng);
        }
        self.enemies.retain(Enemy::is_alive);

        self.dive_timer += dt_ms;
        if self.dive_timer >= self.config.dive_interval_ms {
            self.dive_timer = 0;
            self.launch_dives();
        }
    }

    fn clamp_craft_to_walls(&mut self) {
        let rect = *self.craft.rect();
        if self.left_wall.intersects(&rect) {
            self.craft.rect_mut().left = self.left_wall.right();
        } else if self.right_wall.intersects(&rect) {
            self.craft.rect_mut().set_right(self.right_wall.left);
        }
    }

    fn launch_dives(&mut self) {
        let mut homing: Vec<usize> = self
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| enemy.is_home())
            .map(|(i, _)| i)
            .collect();
        homing.shuffle(&mut self.rng);
        for index in homing.into_iter().take(self.config.max_divers) {
            self.enemies[index].start_dive(&mut self.rng);
            log::debug!("scheduler sent enemy {index} diving");
        }
    }

    /// The render-facing read model: every live sprite with its rectangle
    #[must_use]
    pub fn snapshot(&self) -> Vec<(Sprite, Rect)> {
        let mut sprites = Vec::new();
        if self.craft.is_alive() {
            sprites.push((self.craft.sprite(), *self.craft.rect()));
        }
        for bolt in self.craft.bolts() {
            sprites.push((bolt.sprite(), *bolt.rect()));
        }
        for enemy in &self.enemies {
            sprites.push((enemy.sprite(), *enemy.rect()));
        }
        sprites
    }

    /// The player craft
    #[must_use]
    pub const fn craft(&self) -> &Craft {
        &self.craft
    }

    /// Mutable access to the craft, for externally reported hits
    pub const fn craft_mut(&mut self) -> &mut Craft {
        &mut self.craft
    }

    /// The live enemies
    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Enemies destroyed so far
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Ticks stepped so far
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// The stage's configuration
    #[must_use]
    pub const fn config(&self) -> &StageConfig {
        &self.config
    }
}

/// Collide live bolts against the squadron
///
/// A hit destroys the enemy (starting its explosion) and despawns the bolt.
/// Enemies collide on their body hitbox when the current frame has one,
/// falling back to the actor rectangle. Returns the number of kills.
fn sweep_bolts(bolts: &mut Vec<Bolt>, enemies: &mut [Enemy]) -> u32 {
    let mut kills = 0;
    bolts.retain(|bolt| {
        for enemy in enemies.iter_mut() {
            if !enemy.is_alive() || enemy.is_exploding() {
                continue;
            }
            let target = enemy.body_hitbox().unwrap_or(*enemy.rect());
            if target.intersects(bolt.rect()) {
                enemy.destroy();
                kills += 1;
                return false;
            }
        }
        true
    });
    kills
}
