pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::{AimTuning, BallTuning, PreviewTuning, Tuning};
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, SoundEvent, GameEvent};
pub use components::ball::{Ball, BallColor, Friction};
pub use components::entity::{Actor, DrawShape, Entity, ShapeKind, Spot, TableObject};
pub use crate::core::physics::{resolve_ball_bounds, resolve_bounds, resolve_bounds_with, BounceAxes, TableBounds};
pub use crate::core::scene::Scene;
pub use crate::core::time::FrameClock;
pub use renderer::instance::{BallInstance, CueInstance, DrawBuffer, MarkerInstance, SegmentInstance};
pub use input::aim::{AimController, AimPreview, AimState};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use systems::markers::{place_markers, Marker, MarkerStyle};
pub use systems::trajectory::{compute_reflected_path, path_length, Segment};

pub use extensions::{Easing, lerp, ease};
