use bytemuck::{Pod, Zeroable};

/// Per-ball draw data written to SharedArrayBuffer for the TypeScript renderer.
/// Must match the TypeScript protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BallInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Color channels in 0.0..=1.0.
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// `ShapeKind` discriminant: 0 = ball, 1 = spot.
    pub kind: f32,
}

impl BallInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// One leg of the shot preview, drawn as a line.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SegmentInstance {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl SegmentInstance {
    pub const FLOATS: usize = 4;
}

/// A shadow marker along the preview path.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MarkerInstance {
    pub x: f32,
    pub y: f32,
    /// Drawn radius, the radius of the aimed ball.
    pub radius: f32,
    pub alpha: f32,
}

impl MarkerInstance {
    pub const FLOATS: usize = 4;
}

/// The cue stick behind the aimed ball, drawn from butt to tip.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CueInstance {
    pub tip_x: f32,
    pub tip_y: f32,
    pub butt_x: f32,
    pub butt_y: f32,
    /// Shot strength in 0.0..=1.0, for tinting.
    pub power: f32,
    /// Distance the tip is drawn back from its resting gap.
    pub retract: f32,
}

impl CueInstance {
    pub const FLOATS: usize = 6;
}

/// Everything the host draws in one frame.
pub struct DrawBuffer {
    pub balls: Vec<BallInstance>,
    pub segments: Vec<SegmentInstance>,
    pub markers: Vec<MarkerInstance>,
    /// Empty when idle, one entry while aiming.
    pub cues: Vec<CueInstance>,
}

impl DrawBuffer {
    pub fn new() -> Self {
        Self {
            balls: Vec::with_capacity(64),
            segments: Vec::with_capacity(32),
            markers: Vec::with_capacity(64),
            cues: Vec::with_capacity(1),
        }
    }

    pub fn clear(&mut self) {
        self.balls.clear();
        self.segments.clear();
        self.markers.clear();
        self.cues.clear();
    }

    pub fn ball_count(&self) -> u32 {
        self.balls.len() as u32
    }

    pub fn segment_count(&self) -> u32 {
        self.segments.len() as u32
    }

    pub fn marker_count(&self) -> u32 {
        self.markers.len() as u32
    }

    pub fn cue_count(&self) -> u32 {
        self.cues.len() as u32
    }

    /// Raw pointer to ball data for SharedArrayBuffer reads.
    pub fn balls_ptr(&self) -> *const f32 {
        self.balls.as_ptr() as *const f32
    }

    pub fn segments_ptr(&self) -> *const f32 {
        self.segments.as_ptr() as *const f32
    }

    pub fn markers_ptr(&self) -> *const f32 {
        self.markers.as_ptr() as *const f32
    }

    pub fn cues_ptr(&self) -> *const f32 {
        self.cues.as_ptr() as *const f32
    }
}

impl Default for DrawBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_strides_match_wire_format() {
        assert_eq!(std::mem::size_of::<BallInstance>(), BallInstance::STRIDE_BYTES);
        assert_eq!(std::mem::size_of::<SegmentInstance>(), SegmentInstance::FLOATS * 4);
        assert_eq!(std::mem::size_of::<MarkerInstance>(), MarkerInstance::FLOATS * 4);
        assert_eq!(std::mem::size_of::<CueInstance>(), CueInstance::FLOATS * 4);
    }

    #[test]
    fn ball_instances_cast_to_floats() {
        let balls = [BallInstance { x: 1.0, y: 2.0, radius: 3.0, alpha: 1.0, ..Default::default() }];
        let floats: &[f32] = bytemuck::cast_slice(&balls);
        assert_eq!(floats.len(), 8);
        assert_eq!(&floats[..3], &[1.0, 2.0, 3.0]);
        assert_eq!(floats[6], 1.0);
    }

    #[test]
    fn clear_empties_all_sections() {
        let mut buf = DrawBuffer::new();
        buf.balls.push(BallInstance::default());
        buf.segments.push(SegmentInstance::default());
        buf.markers.push(MarkerInstance::default());
        buf.cues.push(CueInstance::default());
        assert_eq!((buf.ball_count(), buf.segment_count(), buf.marker_count()), (1, 1, 1));
        assert_eq!(buf.cue_count(), 1);
        buf.clear();
        assert_eq!((buf.ball_count(), buf.segment_count(), buf.marker_count()), (0, 0, 0));
        assert_eq!(buf.cue_count(), 0);
    }
}
