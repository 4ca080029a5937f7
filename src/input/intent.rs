//! Direction and button intent types

/// Discrete 8-way direction, one unit per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Direction {
    /// Horizontal component, -1 (left), 0 or 1 (right)
    pub x: i32,
    /// Vertical component, -1 (up), 0 or 1 (down)
    pub y: i32,
}

impl Direction {
    /// No direction held
    pub const NEUTRAL: Self = Self { x: 0, y: 0 };

    /// Create a direction, clamping each axis to one unit
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x: x.signum(),
            y: y.signum(),
        }
    }

    /// Classify the direction into one of the eight headings or neutral
    #[must_use]
    pub const fn heading(&self) -> Heading {
        match (self.x.signum(), self.y.signum()) {
            (0, 0) => Heading::Neutral,
            (0, -1) => Heading::Up,
            (0, _) => Heading::Down,
            (-1, 0) => Heading::Left,
            (-1, -1) => Heading::UpLeft,
            (-1, _) => Heading::DownLeft,
            (_, 0) => Heading::Right,
            (_, -1) => Heading::UpRight,
            (_, _) => Heading::DownRight,
        }
    }
}

/// One of the eight compass headings, or neutral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    /// No direction held
    Neutral,
    /// Straight up
    Up,
    /// Straight down
    Down,
    /// Straight left
    Left,
    /// Straight right
    Right,
    /// Up and left
    UpLeft,
    /// Up and right
    UpRight,
    /// Down and left
    DownLeft,
    /// Down and right
    DownRight,
}

/// Gamepad-style action buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// X button
    X,
    /// Y button
    Y,
    /// A button
    A,
    /// B button
    B,
}

/// One tick's worth of player intent
#[derive(Debug, Clone, Copy, Default)]
pub struct Intent {
    /// Direction currently held
    pub direction: Direction,
    /// Button that fired this tick, if any (already debounced upstream)
    pub pressed: Option<Button>,
}

impl Intent {
    /// Neutral intent: no direction, no button
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            direction: Direction::NEUTRAL,
            pressed: None,
        }
    }

    /// Intent with a held direction
    #[must_use]
    pub const fn moving(x: i32, y: i32) -> Self {
        Self {
            direction: Direction::new(x, y),
            pressed: None,
        }
    }

    /// Attach a button press
    #[must_use]
    pub const fn with_pressed(mut self, button: Button) -> Self {
        self.pressed = Some(button);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_clamps_to_unit() {
        let dir = Direction::new(-7, 3);
        assert_eq!(dir.x, -1);
        assert_eq!(dir.y, 1);
    }

    #[test]
    fn test_heading_classification() {
        assert_eq!(Direction::NEUTRAL.heading(), Heading::Neutral);
        assert_eq!(Direction::new(0, -1).heading(), Heading::Up);
        assert_eq!(Direction::new(0, 1).heading(), Heading::Down);
        assert_eq!(Direction::new(-1, 0).heading(), Heading::Left);
        assert_eq!(Direction::new(1, 0).heading(), Heading::Right);
        assert_eq!(Direction::new(-1, -1).heading(), Heading::UpLeft);
        assert_eq!(Direction::new(1, -1).heading(), Heading::UpRight);
        assert_eq!(Direction::new(-1, 1).heading(), Heading::DownLeft);
        assert_eq!(Direction::new(1, 1).heading(), Heading::DownRight);
    }

    #[test]
    fn test_intent_builders() {
        let intent = Intent::moving(1, 0).with_pressed(Button::A);
        assert_eq!(intent.direction.heading(), Heading::Right);
        assert_eq!(intent.pressed, Some(Button::A));
        assert!(Intent::neutral().pressed.is_none());
    }
}
