//! Cue gesture state machine.
//!
//! Press near a resting ball to start aiming, drag to pull the cue back,
//! release to shoot. The ball travels opposite the pull.
//!
//! The controller refers to its ball by `EntityId` only. It never owns the
//! ball; if the ball disappears from the scene while aiming, the release
//! simply cancels.

use glam::Vec2;

use crate::api::config::{AimTuning, PreviewTuning};
use crate::api::types::EntityId;
use crate::components::ball::Ball;
use crate::core::physics::TableBounds;
use crate::core::scene::Scene;
use crate::systems::markers::{place_markers, Marker, MarkerStyle};
use crate::systems::trajectory::Segment;

/// Where the aim gesture currently is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AimState {
    #[default]
    Idle,
    Aiming {
        /// Handle of the ball being aimed.
        ball: EntityId,
        /// Latest pointer position.
        pointer: Vec2,
    },
}

/// Everything the renderer needs to draw the shot preview for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AimPreview {
    pub ball: EntityId,
    /// Ball centre.
    pub origin: Vec2,
    /// Unit vector the ball would travel along.
    pub direction: Vec2,
    pub ball_radius: f32,
    pub segments: Vec<Segment>,
    pub markers: Vec<Marker>,
    /// Clamped pull as a fraction of the maximum pull, 0..=1.
    pub power: f32,
    /// Unclamped distance from the ball centre to the pointer.
    pub pull: f32,
}

pub struct AimController {
    state: AimState,
    tuning: AimTuning,
}

impl AimController {
    pub fn new(tuning: AimTuning) -> Self {
        Self {
            state: AimState::Idle,
            tuning,
        }
    }

    pub fn state(&self) -> AimState {
        self.state
    }

    pub fn tuning(&self) -> &AimTuning {
        &self.tuning
    }

    pub fn set_tuning(&mut self, tuning: AimTuning) {
        self.tuning = tuning;
    }

    pub fn is_aiming(&self) -> bool {
        matches!(self.state, AimState::Aiming { .. })
    }

    /// The ball being aimed, if any.
    pub fn target(&self) -> Option<EntityId> {
        match self.state {
            AimState::Aiming { ball, .. } => Some(ball),
            AimState::Idle => None,
        }
    }

    pub fn pointer(&self) -> Option<Vec2> {
        match self.state {
            AimState::Aiming { pointer, .. } => Some(pointer),
            AimState::Idle => None,
        }
    }

    /// Begin aiming at `target`. Ignored (returns false) when there is no
    /// target or the ball is moving faster than `max_ball_speed_to_aim`.
    /// A new press while already aiming retargets.
    pub fn start_aim(&mut self, target: Option<(EntityId, &Ball)>, pointer: Vec2) -> bool {
        let Some((id, ball)) = target else {
            return false;
        };
        if ball.speed() > self.tuning.max_ball_speed_to_aim {
            log::debug!("aim ignored: {:?} moving at {:.1}", id, ball.speed());
            return false;
        }
        self.state = AimState::Aiming { ball: id, pointer };
        log::debug!("aiming {:?}", id);
        true
    }

    /// Track the pointer while aiming. No-op when idle.
    pub fn update_aim(&mut self, pointer: Vec2) {
        if let AimState::Aiming { pointer: p, .. } = &mut self.state {
            *p = pointer;
        }
    }

    /// Finish the gesture at `pointer`.
    ///
    /// Launches the aimed ball and returns its new velocity when the pull is
    /// long enough. Always leaves the controller idle.
    pub fn release(&mut self, pointer: Vec2, scene: &mut Scene) -> Option<Vec2> {
        let state = std::mem::take(&mut self.state);
        let AimState::Aiming { ball: id, .. } = state else {
            return None;
        };
        let Some(ball) = scene.ball_mut(id) else {
            log::debug!("aim cancelled: {:?} no longer on the table", id);
            return None;
        };

        let pull = pointer - ball.pos;
        match self.launch_velocity(pull) {
            Some(vel) => {
                ball.set_velocity(vel);
                log::debug!("launched {:?} at {:.1} units/s", id, vel.length());
                Some(vel)
            }
            None => {
                log::debug!("aim cancelled: pull {:.1} too short", pull.length());
                None
            }
        }
    }

    /// Abandon the gesture without launching.
    pub fn cancel(&mut self) {
        self.state = AimState::Idle;
    }

    /// Velocity a release with this pull vector would give, or `None` when
    /// the pull is shorter than `min_pull_required`.
    pub fn launch_velocity(&self, pull: Vec2) -> Option<Vec2> {
        let len = pull.length();
        if len < self.tuning.min_pull_required || len <= 0.0 {
            return None;
        }
        let clamped = len.min(self.tuning.max_pull_px);
        let speed = clamped * self.tuning.pull_to_speed * self.tuning.shot_force_multiplier;
        Some(-pull / len * speed)
    }

    /// Pointer minus ball centre while aiming.
    pub fn pull_vector(&self, scene: &Scene) -> Option<Vec2> {
        let AimState::Aiming { ball, pointer } = self.state else {
            return None;
        };
        scene.ball(ball).map(|b| pointer - b.pos)
    }

    /// Clamped pull length as a fraction of `max_pull_px`.
    pub fn power(&self, scene: &Scene) -> f32 {
        match self.pull_vector(scene) {
            Some(pull) if self.tuning.max_pull_px > 0.0 => {
                (pull.length() / self.tuning.max_pull_px).min(1.0)
            }
            _ => 0.0,
        }
    }

    /// Predicted path and shadow markers for the current gesture.
    /// `None` when idle, when the ball is gone, or when the pull is zero.
    pub fn preview(
        &self,
        scene: &Scene,
        bounds: &TableBounds,
        tuning: &PreviewTuning,
    ) -> Option<AimPreview> {
        let id = self.target()?;
        let ball = scene.ball(id)?;
        let pull = self.pull_vector(scene)?;
        let direction = (-pull).try_normalize()?;

        let segments = bounds.reflected_path(
            ball.pos,
            direction,
            ball.radius,
            tuning.max_reflections,
            tuning.max_total_length,
        );
        let markers = place_markers(
            &segments,
            tuning.marker_spacing,
            tuning.max_markers,
            &MarkerStyle::from(tuning),
        );

        Some(AimPreview {
            ball: id,
            origin: ball.pos,
            direction,
            ball_radius: ball.radius,
            segments,
            markers,
            power: self.power(scene),
            pull: pull.length(),
        })
    }
}

impl Default for AimController {
    fn default() -> Self {
        Self::new(AimTuning::default())
    }
}
