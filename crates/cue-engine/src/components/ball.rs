//! Ball state and motion integration.

use glam::Vec2;

use crate::api::config::BallTuning;

/// Speed above which a ball counts as moving.
const MOVING_EPSILON: f32 = 1e-3;

/// Frame rate the friction base is expressed against.
const FRICTION_BASELINE_HZ: f32 = 60.0;

/// RGB color, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl BallColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from RGB u8 values (0-255).
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
}

impl Default for BallColor {
    fn default() -> Self {
        Self::rgb8(200, 200, 255)
    }
}

/// Rolling resistance applied by `Ball::advance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Friction {
    /// Velocity multiplier per 1/60 s.
    pub base: f32,
    /// Below this speed the ball snaps to rest.
    pub min_stop_speed: f32,
}

impl Default for Friction {
    fn default() -> Self {
        Self::from(&BallTuning::default())
    }
}

impl From<&BallTuning> for Friction {
    fn from(tuning: &BallTuning) -> Self {
        Self {
            base: tuning.friction_base,
            min_stop_speed: tuning.min_stop_speed,
        }
    }
}

/// A billiard ball.
///
/// Position and velocity are in table units (pixels) and units per second.
/// The state at construction is kept as a snapshot for `reset_to_initial`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Reserved. Nothing in the simulation reads it.
    pub mass: f32,
    pub color: BallColor,
    pub friction: Friction,
    initial_pos: Vec2,
    initial_vel: Vec2,
}

impl Ball {
    /// Create a ball at rest. `radius` must be positive.
    pub fn new(pos: Vec2, radius: f32, mass: f32) -> Self {
        debug_assert!(radius > 0.0, "ball radius must be positive, got {}", radius);
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            mass,
            color: BallColor::default(),
            friction: Friction::default(),
            initial_pos: pos,
            initial_vel: Vec2::ZERO,
        }
    }

    // -- Builder pattern --

    /// Starting velocity. Also becomes part of the reset snapshot.
    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self.initial_vel = vel;
        self
    }

    pub fn with_color(mut self, color: BallColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_friction(mut self, friction: Friction) -> Self {
        self.friction = friction;
        self
    }

    /// Integrate one step of `dt` seconds.
    ///
    /// Position moves first with the current velocity, then friction decays
    /// the velocity as `base^(dt * 60)` so the result does not depend on frame
    /// rate. A ball left slower than `min_stop_speed` stops exactly.
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;

        let damping = self.friction.base.powf(dt * FRICTION_BASELINE_HZ);
        self.vel *= damping;

        if self.vel.length() < self.friction.min_stop_speed {
            self.vel = Vec2::ZERO;
        }
    }

    /// Launch the ball. The only way outside code changes a ball's velocity.
    pub fn set_velocity(&mut self, vel: Vec2) {
        self.vel = vel;
    }

    /// Restore the position and velocity captured at construction.
    pub fn reset_to_initial(&mut self) {
        self.pos = self.initial_pos;
        self.vel = self.initial_vel;
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn is_moving(&self) -> bool {
        self.speed() > MOVING_EPSILON
    }

    /// Whether `point` lies within `radius + threshold` of the centre.
    pub fn is_near(&self, point: Vec2, threshold: f32) -> bool {
        let reach = self.radius + threshold;
        self.pos.distance_squared(point) <= reach * reach
    }
}
