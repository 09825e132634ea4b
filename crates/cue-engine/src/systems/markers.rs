//! Shadow markers: evenly spaced ghost balls along a predicted path.

use glam::Vec2;

use crate::api::config::PreviewTuning;
use crate::extensions::easing::{ease, Easing};
use crate::systems::trajectory::Segment;

/// One shadow marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub pos: Vec2,
    pub alpha: f32,
}

/// How marker opacity falls off from the first marker to the last.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub alpha_start: f32,
    pub alpha_end: f32,
    pub fade: Easing,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self::from(&PreviewTuning::default())
    }
}

impl From<&PreviewTuning> for MarkerStyle {
    fn from(tuning: &PreviewTuning) -> Self {
        Self {
            alpha_start: tuning.marker_alpha_start,
            alpha_end: tuning.marker_alpha_end,
            fade: tuning.marker_fade,
        }
    }
}

impl MarkerStyle {
    /// Alpha of marker `index` out of `count`. Depends only on the index.
    pub fn alpha(&self, index: usize, count: usize) -> f32 {
        if count <= 1 {
            return self.alpha_start;
        }
        let t = index as f32 / (count - 1) as f32;
        ease(self.alpha_start, self.alpha_end, t, self.fade)
    }
}

/// Walk `segments` and drop a marker every `spacing` units of arc length.
///
/// The first marker sits `spacing` from the start of the path. Leftover
/// distance carries across segment boundaries. At most `max_markers` are
/// produced; a non-positive spacing produces none.
pub fn place_markers(
    segments: &[Segment],
    spacing: f32,
    max_markers: usize,
    style: &MarkerStyle,
) -> Vec<Marker> {
    if spacing <= 0.0 || max_markers == 0 {
        return Vec::new();
    }
    let mut points = Vec::with_capacity(max_markers.min(64));

    // Distance still to walk before the next marker.
    let mut until_next = spacing;

    'walk: for seg in segments {
        let len = seg.length();
        if len <= 0.0 {
            continue;
        }

        let mut along = 0.0;
        while along + until_next <= len {
            along += until_next;
            points.push(seg.point_at(along));
            if points.len() >= max_markers {
                break 'walk;
            }
            until_next = spacing;
        }
        until_next -= len - along;
    }

    let count = points.len();
    points
        .into_iter()
        .enumerate()
        .map(|(i, pos)| Marker {
            pos,
            alpha: style.alpha(i, count),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight(len: f32) -> Vec<Segment> {
        vec![Segment::new(Vec2::ZERO, Vec2::new(len, 0.0))]
    }

    #[test]
    fn markers_every_spacing_units() {
        let markers = place_markers(&straight(100.0), 25.0, 10, &MarkerStyle::default());
        let xs: Vec<f32> = markers.iter().map(|m| m.pos.x).collect();
        assert_eq!(xs, vec![25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn remainder_carries_across_segments() {
        let segments = vec![
            Segment::new(Vec2::ZERO, Vec2::new(30.0, 0.0)),
            Segment::new(Vec2::new(30.0, 0.0), Vec2::new(30.0, 50.0)),
        ];
        let markers = place_markers(&segments, 20.0, 10, &MarkerStyle::default());
        // Arc lengths 20, 40, 60, 80 -> (20,0), (30,10), (30,30), (30,50)
        let expected = [
            Vec2::new(20.0, 0.0),
            Vec2::new(30.0, 10.0),
            Vec2::new(30.0, 30.0),
            Vec2::new(30.0, 50.0),
        ];
        assert_eq!(markers.len(), expected.len());
        for (m, e) in markers.iter().zip(expected) {
            assert!((m.pos - e).length() < 1e-3, "marker {:?} expected {:?}", m.pos, e);
        }
    }

    #[test]
    fn capped_by_max_markers() {
        let markers = place_markers(&straight(1000.0), 10.0, 5, &MarkerStyle::default());
        assert_eq!(markers.len(), 5);
        assert!((markers[4].pos - Vec2::new(50.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn alpha_fades_linearly_by_index() {
        let style = MarkerStyle {
            alpha_start: 1.0,
            alpha_end: 0.0,
            fade: Easing::Linear,
        };
        let markers = place_markers(&straight(50.0), 10.0, 10, &style);
        let alphas: Vec<f32> = markers.iter().map(|m| m.alpha).collect();
        assert_eq!(alphas.len(), 5);
        let expected = [1.0, 0.75, 0.5, 0.25, 0.0];
        for (a, e) in alphas.iter().zip(expected) {
            assert!((a - e).abs() < 1e-6, "alphas {:?}", alphas);
        }
    }

    #[test]
    fn single_marker_gets_start_alpha() {
        let style = MarkerStyle::default();
        let markers = place_markers(&straight(15.0), 10.0, 10, &style);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].alpha, style.alpha_start);
    }

    #[test]
    fn degenerate_inputs_give_no_markers() {
        let style = MarkerStyle::default();
        assert!(place_markers(&straight(100.0), 0.0, 10, &style).is_empty());
        assert!(place_markers(&straight(100.0), -5.0, 10, &style).is_empty());
        assert!(place_markers(&straight(100.0), 10.0, 0, &style).is_empty());
        assert!(place_markers(&[], 10.0, 10, &style).is_empty());
        let zero = [Segment::new(Vec2::ONE, Vec2::ONE)];
        assert!(place_markers(&zero, 10.0, 10, &style).is_empty());
    }
}
