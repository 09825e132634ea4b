use serde::{Deserialize, Serialize};

use crate::extensions::easing::Easing;

/// Ball motion constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallTuning {
    /// Per-frame velocity multiplier at the 60 Hz baseline, in (0, 1).
    pub friction_base: f32,
    /// Speed (units/s) below which a ball snaps to rest.
    pub min_stop_speed: f32,
    /// Radius of the ball placed at the table centre on init.
    pub default_radius: f32,
    /// Radius of balls spawned by clicking on empty felt.
    pub spawn_radius: f32,
    /// Stored on every ball; no collision math reads it.
    pub mass: f32,
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            friction_base: 0.98,
            min_stop_speed: 5.0,
            default_radius: 16.0,
            spawn_radius: 12.0,
            mass: 1.0,
        }
    }
}

/// Cue gesture constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimTuning {
    /// A ball moving faster than this cannot be aimed.
    pub max_ball_speed_to_aim: f32,
    /// Shorter pulls cancel the shot.
    pub min_pull_required: f32,
    /// Pull length is clamped to this before converting to speed.
    pub max_pull_px: f32,
    pub pull_to_speed: f32,
    pub shot_force_multiplier: f32,
    /// How far outside a ball's edge a press still grabs it.
    pub grab_threshold: f32,
}

impl Default for AimTuning {
    fn default() -> Self {
        Self {
            max_ball_speed_to_aim: 8.0,
            min_pull_required: 6.0,
            max_pull_px: 220.0,
            pull_to_speed: 4.0,
            shot_force_multiplier: 1.8,
            grab_threshold: 20.0,
        }
    }
}

/// Shot preview constants (reflected path + shadow markers).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewTuning {
    pub max_reflections: u32,
    pub max_total_length: f32,
    /// Arc length between consecutive shadow markers.
    pub marker_spacing: f32,
    pub max_markers: usize,
    /// Alpha of the first marker.
    pub marker_alpha_start: f32,
    /// Alpha of the last marker.
    pub marker_alpha_end: f32,
    /// Curve applied to the marker index before the alpha lerp. `Linear`
    /// fades evenly from first to last marker; other curves bend that fade
    /// but keep both end alphas.
    pub marker_fade: Easing,
}

impl Default for PreviewTuning {
    fn default() -> Self {
        Self {
            max_reflections: 3,
            max_total_length: 900.0,
            marker_spacing: 40.0,
            max_markers: 16,
            marker_alpha_start: 0.9,
            marker_alpha_end: 0.15,
            marker_fade: Easing::Linear,
        }
    }
}

/// Every tunable constant of the table, loadable from JSON.
///
/// Missing fields fall back to their defaults, so a document may override
/// only the values it cares about:
///
/// ```ignore
/// let tuning = Tuning::from_json(r#"{ "aim": { "max_pull_px": 300.0 } }"#)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub ball: BallTuning,
    pub aim: AimTuning,
    pub preview: PreviewTuning,
}

impl Tuning {
    /// Parse tuning from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize tuning to pretty JSON (for dumping the active values).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
