//! Craft projectiles
//!
//! A bolt climbs the screen at a fixed speed, alternating between its two
//! images every tick, and despawns once it leaves the top edge.

use super::{SheetId, Sprite};
use crate::geom::Rect;

/// Vertical speed in pixels per tick; negative is up
const BOLT_SPEED: i32 = -5;

/// A fired laser bolt
#[derive(Debug, Clone)]
pub struct Bolt {
    rect: Rect,
    image_index: usize,
    alive: bool,
}

impl Bolt {
    /// Bolt rectangle size
    pub const SIZE: (i32, i32) = (5, 13);

    /// Spawn a bolt at the given rectangle
    #[must_use]
    pub const fn new(rect: Rect) -> Self {
        Self {
            rect,
            image_index: 0,
            alive: true,
        }
    }

    /// Advance the bolt one tick
    pub fn update(&mut self) {
        self.rect.top += BOLT_SPEED;
        self.image_index = 1 - self.image_index;
        if self.rect.top < 0 {
            self.alive = false;
        }
    }

    /// Whether the bolt is still on screen
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// The bolt's rectangle
    #[must_use]
    pub const fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Sprite handle for rendering
    #[must_use]
    pub const fn sprite(&self) -> Sprite {
        Sprite::new(SheetId::Bolt, self.image_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bolt_climbs() {
        let mut bolt = Bolt::new(Rect::new(100, 260, 5, 13));
        bolt.update();
        assert_eq!(bolt.rect().top, 255);
        assert!(bolt.is_alive());
    }

    #[test]
    fn test_bolt_flips_image_every_tick() {
        let mut bolt = Bolt::new(Rect::new(100, 260, 5, 13));
        let first = bolt.sprite().index;
        bolt.update();
        assert_ne!(bolt.sprite().index, first);
        bolt.update();
        assert_eq!(bolt.sprite().index, first);
    }

    #[test]
    fn test_bolt_despawns_above_top_edge() {
        let mut bolt = Bolt::new(Rect::new(100, 4, 5, 13));
        bolt.update();
        assert!(!bolt.is_alive());
    }
}
