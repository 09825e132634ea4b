//! Reflected ray casting for the shot preview.
//!
//! The ray travels inside `[0, w] × [0, h]` and bounces off the walls the way a
//! ball of the given radius would: each wall is pulled inward by the radius on
//! the side the ray is heading toward, so it is the ball's edge that touches.

use glam::Vec2;

/// Direction components smaller than this are treated as parallel to a wall.
const DIR_EPSILON: f32 = 1e-6;

/// Hits closer than this are ignored so a ray never re-hits the wall it is leaving.
const HIT_EPSILON: f32 = 1e-6;

/// One straight piece of a predicted path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Point at arc length `dist` from `start`.
    pub fn point_at(&self, dist: f32) -> Vec2 {
        let len = self.length();
        if len <= 0.0 {
            return self.start;
        }
        self.start.lerp(self.end, dist / len)
    }
}

/// Total Euclidean length of a polyline.
pub fn path_length(segments: &[Segment]) -> f32 {
    segments.iter().map(Segment::length).sum()
}

/// Parametric distance along `dir` to the wall on one axis, or infinity when
/// the wall cannot be reached.
fn wall_distance(pos: f32, dir: f32, radius: f32, extent: f32) -> f32 {
    if dir.abs() < DIR_EPSILON {
        return f32::INFINITY;
    }
    let wall = if dir > 0.0 { extent - radius } else { radius };
    let t = (wall - pos) / dir;
    if t > HIT_EPSILON {
        t
    } else {
        f32::INFINITY
    }
}

/// Cast a ray from `origin` along the unit vector `direction` and reflect it
/// off the table walls.
///
/// The path stops after `max_reflections` bounces or once `max_total_length`
/// has been spent; any budget left after the last bounce is drawn as one more
/// straight segment. When the ray is parallel to both wall pairs (a zero
/// direction) the whole budget is a single segment, which has zero length for
/// a zero direction.
pub fn compute_reflected_path(
    origin: Vec2,
    direction: Vec2,
    ball_radius: f32,
    max_reflections: u32,
    max_total_length: f32,
    table_size: Vec2,
) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(max_reflections as usize + 1);
    let mut pos = origin;
    let mut dir = direction;
    let mut remaining = max_total_length;

    for _ in 0..max_reflections {
        if remaining <= 0.0 {
            break;
        }

        let tx = wall_distance(pos.x, dir.x, ball_radius, table_size.x);
        let ty = wall_distance(pos.y, dir.y, ball_radius, table_size.y);

        if tx.is_infinite() && ty.is_infinite() {
            segments.push(Segment::new(pos, pos + dir * remaining));
            remaining = 0.0;
            break;
        }

        // An exact tie is a corner: both walls are hit at once.
        let hit_vertical = tx <= ty;
        let hit_horizontal = ty <= tx;
        let t_hit = tx.min(ty);
        let seg_len = t_hit.min(remaining);
        let end = pos + dir * seg_len;

        segments.push(Segment::new(pos, end));
        remaining -= seg_len;
        pos = end;

        if seg_len < t_hit {
            break;
        }

        if hit_vertical {
            dir.x = -dir.x;
        }
        if hit_horizontal {
            dir.y = -dir.y;
        }
    }

    if remaining > 0.0 {
        segments.push(Segment::new(pos, pos + dir * remaining));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: Vec2 = Vec2::new(800.0, 600.0);

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    /// Interior vertices where the direction changed.
    fn reflection_count(segments: &[Segment]) -> usize {
        segments
            .windows(2)
            .filter(|w| {
                let a = (w[0].end - w[0].start).normalize_or_zero();
                let b = (w[1].end - w[1].start).normalize_or_zero();
                a != Vec2::ZERO && b != Vec2::ZERO && a.dot(b) < 0.9999
            })
            .count()
    }

    #[test]
    fn single_reflection_then_remaining_budget() {
        let path = compute_reflected_path(Vec2::new(640.0, 360.0), Vec2::X, 0.0, 1, 1000.0, TABLE);

        assert_eq!(path.len(), 2);
        assert!(close(path[0].start, Vec2::new(640.0, 360.0)));
        assert!(close(path[0].end, Vec2::new(800.0, 360.0)));
        assert!(close(path[1].start, Vec2::new(800.0, 360.0)));
        assert!(close(path[1].end, Vec2::new(-40.0, 360.0)), "end was {:?}", path[1].end);
        assert!((path_length(&path) - 1000.0).abs() < 1e-2);
    }

    #[test]
    fn radius_pulls_walls_inward() {
        let path = compute_reflected_path(Vec2::new(400.0, 300.0), Vec2::NEG_Y, 16.0, 1, 300.0, TABLE);
        assert!(close(path[0].end, Vec2::new(400.0, 16.0)), "end was {:?}", path[0].end);
        assert!(close(path[1].end, Vec2::new(400.0, 32.0)));
    }

    #[test]
    fn budget_ends_before_wall_without_reflecting() {
        let path = compute_reflected_path(Vec2::new(100.0, 100.0), Vec2::X, 0.0, 4, 50.0, TABLE);
        assert_eq!(path.len(), 1);
        assert!(close(path[0].end, Vec2::new(150.0, 100.0)));
    }

    #[test]
    fn corner_tie_reflects_both_axes() {
        // From the centre of a square along the diagonal, both walls are equally far.
        let table = Vec2::splat(100.0);
        let dir = Vec2::new(1.0, 1.0).normalize();
        let path = compute_reflected_path(Vec2::splat(50.0), dir, 0.0, 3, 400.0, table);

        let second = (path[1].end - path[1].start).normalize();
        assert!(second.x < 0.0 && second.y < 0.0, "second leg {:?}", second);
        assert!(close(path[1].end, Vec2::ZERO), "second leg ended at {:?}", path[1].end);
        for seg in &path {
            assert!(
                seg.end.cmpge(Vec2::splat(-1e-3)).all() && seg.end.cmple(table + 1e-3).all(),
                "path left the table at {:?}",
                seg.end
            );
        }
        assert!((path_length(&path) - 400.0).abs() < 1e-2);
    }

    #[test]
    fn nearer_wall_wins() {
        let dir = Vec2::new(0.6, 0.8);
        let path = compute_reflected_path(Vec2::new(400.0, 500.0), dir, 0.0, 1, 1000.0, TABLE);
        // Bottom wall (y = 600) is 125 away, right wall is 666 away.
        assert!(close(path[0].end, Vec2::new(475.0, 600.0)), "end was {:?}", path[0].end);
        let second = (path[1].end - path[1].start).normalize();
        assert!(close(second, Vec2::new(0.6, -0.8)));
    }

    #[test]
    fn length_and_reflections_are_capped() {
        let dirs = [
            Vec2::new(0.6, 0.8),
            Vec2::new(-0.28, 0.96),
            Vec2::new(1.0, 0.0),
            Vec2::new(-0.7071068, -0.7071068),
            Vec2::new(0.9987, 0.0509),
        ];
        for &dir in &dirs {
            for max_reflections in [0u32, 1, 3, 8] {
                for max_len in [10.0f32, 400.0, 2500.0, 10000.0] {
                    let path = compute_reflected_path(
                        Vec2::new(300.0, 200.0),
                        dir,
                        12.0,
                        max_reflections,
                        max_len,
                        TABLE,
                    );
                    assert!(!path.is_empty());
                    let total = path_length(&path);
                    assert!(
                        total <= max_len * (1.0 + 1e-5) + 1e-2,
                        "dir {:?}: length {} over budget {}",
                        dir,
                        total,
                        max_len
                    );
                    assert!(
                        reflection_count(&path) <= max_reflections as usize,
                        "dir {:?}: {} reflections, cap {}",
                        dir,
                        reflection_count(&path),
                        max_reflections
                    );
                }
            }
        }
    }

    #[test]
    fn zero_reflections_is_one_straight_segment() {
        let path = compute_reflected_path(Vec2::new(100.0, 100.0), Vec2::X, 0.0, 0, 2000.0, TABLE);
        assert_eq!(path.len(), 1);
        assert!(close(path[0].end, Vec2::new(2100.0, 100.0)));
    }

    #[test]
    fn zero_direction_yields_single_zero_length_segment() {
        let origin = Vec2::new(100.0, 100.0);
        let path = compute_reflected_path(origin, Vec2::ZERO, 10.0, 3, 500.0, TABLE);
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].start, origin);
        assert_eq!(path[0].end, origin);
    }

    #[test]
    fn zero_budget_is_empty() {
        let path = compute_reflected_path(Vec2::new(100.0, 100.0), Vec2::X, 0.0, 3, 0.0, TABLE);
        assert!(path.is_empty());
    }

    #[test]
    fn ray_starting_on_wall_moving_away_does_not_self_hit() {
        // Sitting on the left wall, heading right: the left wall is behind us.
        let path = compute_reflected_path(Vec2::new(0.0, 300.0), Vec2::X, 0.0, 1, 900.0, TABLE);
        assert!(close(path[0].end, Vec2::new(800.0, 300.0)));
    }

    #[test]
    fn segment_point_at() {
        let seg = Segment::new(Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert_eq!(seg.point_at(2.5), Vec2::new(2.5, 0.0));
        let degenerate = Segment::new(Vec2::ONE, Vec2::ONE);
        assert_eq!(degenerate.point_at(1.0), Vec2::ONE);
    }
}
