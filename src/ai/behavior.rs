//! Home/Dive behavior cycle
//!
//! An enemy's long-term movement goal is a two-state cycle: hold a home
//! point, dive at a random target near the bottom of the field, return home.
//! Each transition builds a brand-new behavior seeded from the current
//! position; the old value is discarded, never mutated in place.

use glam::Vec2;
use rand::Rng;

use super::steering::Steering;

/// Horizontal band (inclusive) dive targets are drawn from
const DIVE_BAND: std::ops::RangeInclusive<i32> = 32..=368;
/// Depth dive targets sit at
const DIVE_DEPTH: f32 = 330.0;
/// Squared distance at which a home point counts as reached
const HOME_EPSILON_SQ: f32 = 1e-6;

/// An enemy's current movement goal
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Hold position at a fixed home point
    Home {
        /// Steering unit driving the motion
        steering: Steering,
        /// Position the behavior started from
        source: Vec2,
        /// Home point being held
        target: Vec2,
    },
    /// Dive at a random point near the bottom of the field
    Dive {
        /// Steering unit driving the motion
        steering: Steering,
        /// Position the behavior started from
        source: Vec2,
        /// Randomized dive target
        target: Vec2,
        /// Home point to return to afterwards
        home: Vec2,
    },
}

impl Behavior {
    /// Start holding a home point, launched in a random direction
    #[must_use]
    pub fn home(source: Vec2, target: Vec2, rng: &mut impl Rng) -> Self {
        Self::Home {
            steering: Steering::new(source, rng),
            source,
            target,
        }
    }

    /// Start a dive, remembering the home point for the return leg
    #[must_use]
    pub fn dive(source: Vec2, target: Vec2, home: Vec2, rng: &mut impl Rng) -> Self {
        Self::Dive {
            steering: Steering::new(source, rng),
            source,
            target,
            home,
        }
    }

    /// Advance the behavior one tick towards its target
    pub fn update(&mut self) {
        match self {
            Self::Home {
                steering, target, ..
            }
            | Self::Dive {
                steering, target, ..
            } => {
                let target = *target;
                steering.update(target);
            }
        }
    }

    /// Whether the behavior has reached its goal
    ///
    /// Home completes on (effectively exact) position equality with its
    /// target; a dive completes when the steering residual collapses, since
    /// stepped motion rarely lands exactly on the randomized target.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        match self {
            Self::Home {
                steering, target, ..
            } => (steering.pos - *target).length_squared() < HOME_EPSILON_SQ,
            Self::Dive { steering, .. } => steering.is_settled(),
        }
    }

    /// Build the follow-up behavior, seeded from the current position
    ///
    /// Home yields a dive at a fresh random target inside the dive band,
    /// carrying the home point along; a dive yields the return home.
    #[must_use]
    pub fn next(&self, rng: &mut impl Rng) -> Self {
        match self {
            Self::Home {
                steering, target, ..
            } => {
                let dive_target = Vec2::new(rng.random_range(DIVE_BAND) as f32, DIVE_DEPTH);
                Self::dive(steering.pos, dive_target, *target, rng)
            }
            Self::Dive { steering, home, .. } => Self::home(steering.pos, *home, rng),
        }
    }

    /// Whether the behavior is holding a home point
    #[must_use]
    pub const fn is_home(&self) -> bool {
        matches!(self, Self::Home { .. })
    }

    /// Whether the behavior is diving
    #[must_use]
    pub const fn is_dive(&self) -> bool {
        matches!(self, Self::Dive { .. })
    }

    /// Current position of the underlying steering unit
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.steering().pos
    }

    /// Current velocity of the underlying steering unit
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.steering().vel
    }

    /// The behavior's current target
    #[must_use]
    pub const fn target(&self) -> Vec2 {
        match self {
            Self::Home { target, .. } | Self::Dive { target, .. } => *target,
        }
    }

    /// The underlying steering unit
    #[must_use]
    pub const fn steering(&self) -> &Steering {
        match self {
            Self::Home { steering, .. } | Self::Dive { steering, .. } => steering,
        }
    }

    /// Mutable access to the underlying steering unit
    pub const fn steering_mut(&mut self) -> &mut Steering {
        match self {
            Self::Home { steering, .. } | Self::Dive { steering, .. } => steering,
        }
    }
}
