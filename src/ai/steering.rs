//! Seek-with-approach steering
//!
//! Integrates a bounded steering force into velocity and position once per
//! tick. Outside the approach radius the unit seeks at full speed; inside it
//! the desired speed falls off linearly with distance, which keeps the unit
//! from overshooting and oscillating at the goal.

use glam::Vec2;
use rand::Rng;

/// A moving unit steered towards a target with bounded force and speed
#[derive(Debug, Clone)]
pub struct Steering {
    /// Current position
    pub pos: Vec2,
    /// Current velocity; magnitude never exceeds `max_speed`
    pub vel: Vec2,
    /// Acceleration applied on the last update
    pub acc: Vec2,
    /// Speed cap
    pub max_speed: f32,
    /// Steering force cap; bounds how sharply the unit can turn
    pub max_force: f32,
    /// Radius within which the unit slows down towards its target
    pub approach_radius: f32,
    desired: Option<Vec2>,
}

impl Steering {
    /// Default speed cap
    pub const MAX_SPEED: f32 = 3.0;
    /// Default force cap
    pub const MAX_FORCE: f32 = 0.1;
    /// Default approach radius
    pub const APPROACH_RADIUS: f32 = 30.0;
    /// Residual desired speed below which the unit counts as settled
    pub const SETTLE_THRESHOLD: f32 = 0.5;

    /// Create a unit at a position, launched at full speed in a random
    /// direction
    #[must_use]
    pub fn new(pos: Vec2, rng: &mut impl Rng) -> Self {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        Self {
            pos,
            vel: Vec2::from_angle(angle) * Self::MAX_SPEED,
            acc: Vec2::ZERO,
            max_speed: Self::MAX_SPEED,
            max_force: Self::MAX_FORCE,
            approach_radius: Self::APPROACH_RADIUS,
            desired: None,
        }
    }

    /// Override the initial velocity
    #[must_use]
    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Override the speed cap
    #[must_use]
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Override the force cap
    #[must_use]
    pub fn with_max_force(mut self, max_force: f32) -> Self {
        self.max_force = max_force;
        self
    }

    /// Override the approach radius
    #[must_use]
    pub fn with_approach_radius(mut self, radius: f32) -> Self {
        self.approach_radius = radius;
        self
    }

    /// The desired velocity recorded by the last seek, if any
    #[must_use]
    pub const fn desired(&self) -> Option<Vec2> {
        self.desired
    }

    /// Whether the residual steering error has collapsed
    ///
    /// False until the first update. Inside the approach radius the desired
    /// speed is proportional to the remaining distance, so a near-zero
    /// desired vector means the unit has effectively arrived; exact position
    /// equality is not required.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.desired
            .is_some_and(|d| d.length() < Self::SETTLE_THRESHOLD)
    }

    /// Compute the bounded steering force towards a target
    ///
    /// Records the (approach-scaled) desired velocity for settlement tests.
    /// A zero-distance seek yields a zero force rather than a fault.
    pub fn seek(&mut self, target: Vec2) -> Vec2 {
        let to_target = target - self.pos;
        let dist = to_target.length();
        if dist <= f32::EPSILON {
            self.desired = Some(Vec2::ZERO);
            return Vec2::ZERO;
        }
        let mut desired = to_target / dist * self.max_speed;
        if dist < self.approach_radius {
            desired *= dist / self.approach_radius;
        }
        self.desired = Some(desired);
        (desired - self.vel).clamp_length_max(self.max_force)
    }

    /// Advance the unit one tick towards a target
    pub fn update(&mut self, target: Vec2) {
        self.acc = self.seek(target);
        self.vel = (self.vel + self.acc).clamp_length_max(self.max_speed);
        self.pos += self.vel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn unit_at(pos: Vec2) -> Steering {
        let mut rng = SmallRng::seed_from_u64(42);
        Steering::new(pos, &mut rng)
    }

    #[test]
    fn test_initial_velocity_at_max_speed() {
        let unit = unit_at(Vec2::new(100.0, 50.0));
        assert!((unit.vel.length() - Steering::MAX_SPEED).abs() < 1e-4);
        assert!(unit.desired().is_none());
        assert!(!unit.is_settled());
    }

    #[test]
    fn test_seek_full_speed_outside_radius() {
        let mut unit = unit_at(Vec2::ZERO).with_velocity(Vec2::ZERO);
        unit.seek(Vec2::new(100.0, 0.0));
        let desired = unit.desired().unwrap();
        assert!((desired.length() - Steering::MAX_SPEED).abs() < 1e-4);
        assert!(desired.x > 0.0);
    }

    #[test]
    fn test_approach_slowdown_inside_radius() {
        // Distance 15 with radius 30 and max speed 3 gives desired magnitude
        // 1.5, half speed
        let mut unit = unit_at(Vec2::ZERO).with_velocity(Vec2::ZERO);
        unit.update(Vec2::new(15.0, 0.0));
        let desired = unit.desired().unwrap();
        assert!((desired.length() - 1.5).abs() < 1e-4);
        assert!(unit.vel.length() < Steering::MAX_SPEED);
    }

    #[test]
    fn test_force_is_clamped() {
        let mut unit = unit_at(Vec2::ZERO).with_velocity(Vec2::new(-3.0, 0.0));
        let force = unit.seek(Vec2::new(100.0, 0.0));
        assert!(force.length() <= Steering::MAX_FORCE + 1e-6);
    }

    #[test]
    fn test_velocity_never_exceeds_max_speed() {
        let mut unit = unit_at(Vec2::new(200.0, 200.0));
        for _ in 0..500 {
            unit.update(Vec2::new(50.0, 50.0));
            assert!(unit.vel.length() <= Steering::MAX_SPEED + 1e-4);
        }
    }

    #[test]
    fn test_zero_distance_seek_is_harmless() {
        let mut unit = unit_at(Vec2::new(10.0, 10.0)).with_velocity(Vec2::ZERO);
        let force = unit.seek(Vec2::new(10.0, 10.0));
        assert_eq!(force, Vec2::ZERO);
        assert_eq!(unit.desired(), Some(Vec2::ZERO));
        assert!(unit.is_settled());
    }

    #[test]
    fn test_settles_near_target() {
        let mut unit = unit_at(Vec2::new(100.0, 50.0)).with_velocity(Vec2::ZERO);
        let target = Vec2::new(112.0, 50.0);
        for _ in 0..200 {
            unit.update(target);
        }
        assert!(unit.is_settled());
        assert!((unit.pos - target).length() < Steering::SETTLE_THRESHOLD * 10.0);
    }
}
