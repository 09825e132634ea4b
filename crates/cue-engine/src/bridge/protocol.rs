/// SharedArrayBuffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 20 floats]
/// [Balls: max_balls × 8 floats]
/// [Segments: max_segments × 4 floats]
/// [Markers: max_markers × 4 floats]
/// [Cue: 1 × 6 floats]
/// [Sounds: max_sounds × 1 float]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::instance::{BallInstance, CueInstance, MarkerInstance, SegmentInstance};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 20;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_BALLS: usize = 2;
pub const HEADER_BALL_COUNT: usize = 3;
pub const HEADER_MAX_SEGMENTS: usize = 4;
pub const HEADER_SEGMENT_COUNT: usize = 5;
pub const HEADER_MAX_MARKERS: usize = 6;
pub const HEADER_MARKER_COUNT: usize = 7;
pub const HEADER_WORLD_WIDTH: usize = 8;
pub const HEADER_WORLD_HEIGHT: usize = 9;
pub const HEADER_MAX_SOUNDS: usize = 10;
pub const HEADER_SOUND_COUNT: usize = 11;
pub const HEADER_MAX_EVENTS: usize = 12;
pub const HEADER_EVENT_COUNT: usize = 13;
pub const HEADER_PROTOCOL_VERSION: usize = 14;
pub const HEADER_AIMING: usize = 15;
pub const HEADER_CUE_COUNT: usize = 16;
// 17..20 reserved.

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per ball instance (wire format, never changes).
pub const BALL_FLOATS: usize = BallInstance::FLOATS;

/// Floats per preview segment: x0, y0, x1, y1.
pub const SEGMENT_FLOATS: usize = SegmentInstance::FLOATS;

/// Floats per shadow marker: x, y, radius, alpha.
pub const MARKER_FLOATS: usize = MarkerInstance::FLOATS;

/// Floats per cue: tip x/y, butt x/y, power, retract.
pub const CUE_FLOATS: usize = CueInstance::FLOATS;

/// There is at most one cue on the table.
pub const MAX_CUES: usize = 1;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Buffer layout computed from the configured capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_balls: usize,
    pub max_segments: usize,
    pub max_markers: usize,
    pub max_sounds: usize,
    pub max_events: usize,

    /// Offset (in floats) where ball data begins.
    pub ball_data_offset: usize,
    /// Offset (in floats) where segment data begins.
    pub segment_data_offset: usize,
    /// Offset (in floats) where marker data begins.
    pub marker_data_offset: usize,
    /// Offset (in floats) where cue data begins.
    pub cue_data_offset: usize,
    /// Offset (in floats) where sound data begins.
    pub sound_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(
        max_balls: usize,
        max_segments: usize,
        max_markers: usize,
        max_sounds: usize,
        max_events: usize,
    ) -> Self {
        let ball_data_offset = HEADER_FLOATS;
        let segment_data_offset = ball_data_offset + max_balls * BALL_FLOATS;
        let marker_data_offset = segment_data_offset + max_segments * SEGMENT_FLOATS;
        let cue_data_offset = marker_data_offset + max_markers * MARKER_FLOATS;
        let sound_data_offset = cue_data_offset + MAX_CUES * CUE_FLOATS;
        let event_data_offset = sound_data_offset + max_sounds;

        let buffer_total_floats = event_data_offset + max_events * EVENT_FLOATS;

        Self {
            max_balls,
            max_segments,
            max_markers,
            max_sounds,
            max_events,
            ball_data_offset,
            segment_data_offset,
            marker_data_offset,
            cue_data_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_balls,
            config.max_segments,
            config.max_markers,
            config.max_sounds,
            config.max_events,
        )
    }

    /// Header values that never change after init.
    pub fn write_static_header(&self, header: &mut [f32; HEADER_FLOATS], world_width: f32, world_height: f32) {
        header[HEADER_MAX_BALLS] = self.max_balls as f32;
        header[HEADER_MAX_SEGMENTS] = self.max_segments as f32;
        header[HEADER_MAX_MARKERS] = self.max_markers as f32;
        header[HEADER_MAX_SOUNDS] = self.max_sounds as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_WORLD_WIDTH] = world_width;
        header[HEADER_WORLD_HEIGHT] = world_height;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    }
}
