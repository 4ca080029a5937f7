//! Game actors
//!
//! The player craft, its bolts, and the enemy squadron members. Actors own
//! their action registries and expose abstract sprite handles; image loading
//! and blitting belong to the rendering collaborator.

mod bolt;
mod craft;
mod enemy;

pub use bolt::Bolt;
pub use craft::{Craft, CraftState, craft_actions};
pub use enemy::{Enemy, enemy_actions};

/// Identifies a sprite sheet owned by the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetId {
    /// The player craft sheet
    Ship,
    /// The laser bolt sheet
    Bolt,
    /// The small enemy sheet
    EnemySmall,
    /// The shared explosion sheet
    Explosion,
}

/// An abstract handle to the image a renderer should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    /// Sheet the image lives on
    pub sheet: SheetId,
    /// Image index within the sheet
    pub index: usize,
    /// Mirror horizontally
    pub flip_x: bool,
    /// Mirror vertically
    pub flip_y: bool,
}

impl Sprite {
    /// An unflipped sprite
    #[must_use]
    pub const fn new(sheet: SheetId, index: usize) -> Self {
        Self {
            sheet,
            index,
            flip_x: false,
            flip_y: false,
        }
    }

    /// Mirror the sprite vertically
    #[must_use]
    pub const fn flipped_y(mut self, flip: bool) -> Self {
        self.flip_y = flip;
        self
    }
}
