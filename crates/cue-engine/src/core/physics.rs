use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::ball::Ball;
use crate::components::entity::Entity;
use crate::systems::trajectory::{compute_reflected_path, Segment};

// ---------------------------------------------------------------------------
// Table rectangle
// ---------------------------------------------------------------------------

/// Axis-aligned playing area. Balls and predicted rays reflect off its edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl TableBounds {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// The screen rectangle inset by `margin` on every side.
    pub fn from_screen(width: f32, height: f32, margin: f32) -> Self {
        Self::new(margin, margin, width - margin, height - margin)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    /// Top-left corner.
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }

    /// Whether `point` lies inside the rectangle (edges included).
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// Reflected shot path for a ball at world position `origin`.
    ///
    /// Runs `compute_reflected_path` in the table's local frame and maps the
    /// segments back to world coordinates.
    pub fn reflected_path(
        &self,
        origin: Vec2,
        direction: Vec2,
        ball_radius: f32,
        max_reflections: u32,
        max_total_length: f32,
    ) -> Vec<Segment> {
        let offset = self.min();
        let mut segments = compute_reflected_path(
            origin - offset,
            direction,
            ball_radius,
            max_reflections,
            max_total_length,
            self.size(),
        );
        for seg in &mut segments {
            seg.start += offset;
            seg.end += offset;
        }
        segments
    }
}

// ---------------------------------------------------------------------------
// Cushion bounces
// ---------------------------------------------------------------------------

/// Which velocity components a bounds correction flipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BounceAxes {
    pub x: bool,
    pub y: bool,
}

impl BounceAxes {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Push one ball back inside `bounds` and reflect the velocity on each axis
/// it crossed. Both axes are checked, so a corner hit flips both components.
pub fn resolve_ball_bounds(ball: &mut Ball, bounds: &TableBounds) -> BounceAxes {
    let mut axes = BounceAxes::default();
    let r = ball.radius;

    if ball.pos.x - r < bounds.left {
        ball.pos.x = bounds.left + r;
        ball.vel.x = -ball.vel.x;
        axes.x = true;
    }
    if ball.pos.x + r > bounds.right {
        ball.pos.x = bounds.right - r;
        ball.vel.x = -ball.vel.x;
        axes.x = true;
    }
    if ball.pos.y - r < bounds.top {
        ball.pos.y = bounds.top + r;
        ball.vel.y = -ball.vel.y;
        axes.y = true;
    }
    if ball.pos.y + r > bounds.bottom {
        ball.pos.y = bounds.bottom - r;
        ball.vel.y = -ball.vel.y;
        axes.y = true;
    }

    axes
}

/// Resolve every active ball against the table edges.
/// Entities that are not balls are skipped.
pub fn resolve_bounds<'a>(entities: impl IntoIterator<Item = &'a mut Entity>, bounds: &TableBounds) {
    resolve_bounds_with(entities, bounds, |_, _| {});
}

/// Like `resolve_bounds`, calling `on_bounce` for each ball that hit a cushion.
pub fn resolve_bounds_with<'a, F>(
    entities: impl IntoIterator<Item = &'a mut Entity>,
    bounds: &TableBounds,
    mut on_bounce: F,
) where
    F: FnMut(EntityId, BounceAxes),
{
    for entity in entities {
        if !entity.active {
            continue;
        }
        let id = entity.id;
        if let Some(ball) = entity.ball_mut() {
            let axes = resolve_ball_bounds(ball, bounds);
            if axes.any() {
                log::trace!("{:?} bounced (x: {}, y: {})", id, axes.x, axes.y);
                on_bounce(id, axes);
            }
        }
    }
}
