use crate::api::game::GameConfig;
use crate::components::entity::{Actor, Entity, ShapeKind};
use crate::input::aim::AimPreview;
use crate::renderer::instance::{
    BallInstance, CueInstance, DrawBuffer, MarkerInstance, SegmentInstance,
};

/// Gap between the ball edge and the cue tip at zero pull.
pub const CUE_TIP_GAP: f32 = 3.0;
/// Drawn cue length, tip to butt.
pub const CUE_LENGTH: f32 = 180.0;
/// Cue retract per unit of pull distance.
pub const CUE_RETRACT_PER_PULL: f32 = 0.15;
/// Furthest the cue is drawn back.
pub const CUE_MAX_RETRACT: f32 = 60.0;

/// Build the draw buffer from the table objects and the current shot preview.
/// Spots are written before balls so balls draw on top. Each section is
/// truncated to its capacity in `config`.
pub fn build_draw_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    preview: Option<&AimPreview>,
    config: &GameConfig,
    buffer: &mut DrawBuffer,
) {
    buffer.clear();

    let mut spots: Vec<BallInstance> = Vec::new();
    let mut balls: Vec<BallInstance> = Vec::new();

    for entity in entities {
        if !entity.active {
            continue;
        }

        let shape = entity.object.draw_shape();
        let instance = BallInstance {
            x: shape.pos.x,
            y: shape.pos.y,
            radius: shape.radius,
            r: shape.color.r,
            g: shape.color.g,
            b: shape.color.b,
            alpha: shape.alpha,
            kind: shape_kind_code(shape.kind),
        };

        match shape.kind {
            ShapeKind::Spot => spots.push(instance),
            ShapeKind::Ball => balls.push(instance),
        }
    }

    buffer
        .balls
        .extend(spots.into_iter().chain(balls).take(config.max_balls));

    let Some(preview) = preview else {
        return;
    };

    buffer.segments.extend(
        preview
            .segments
            .iter()
            .take(config.max_segments)
            .map(|seg| SegmentInstance {
                x0: seg.start.x,
                y0: seg.start.y,
                x1: seg.end.x,
                y1: seg.end.y,
            }),
    );
    buffer.markers.extend(
        preview
            .markers
            .iter()
            .take(config.max_markers)
            .map(|m| MarkerInstance {
                x: m.pos.x,
                y: m.pos.y,
                radius: preview.ball_radius,
                alpha: m.alpha,
            }),
    );
    buffer.cues.push(cue_instance(preview));
}

/// Cue stick behind the aimed ball, on the pull side, drawn back with the pull.
pub fn cue_instance(preview: &AimPreview) -> CueInstance {
    let retract = (preview.pull * CUE_RETRACT_PER_PULL).min(CUE_MAX_RETRACT);
    let back = -preview.direction;
    let tip = preview.origin + back * (preview.ball_radius + CUE_TIP_GAP + retract);
    let butt = tip + back * CUE_LENGTH;
    CueInstance {
        tip_x: tip.x,
        tip_y: tip.y,
        butt_x: butt.x,
        butt_y: butt.y,
        power: preview.power,
        retract,
    }
}

fn shape_kind_code(kind: ShapeKind) -> f32 {
    match kind {
        ShapeKind::Ball => 0.0,
        ShapeKind::Spot => 1.0,
    }
}
