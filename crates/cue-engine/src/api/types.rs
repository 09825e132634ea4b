use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity on the table.
/// Also serves as the non-owning handle the aim controller keeps to its ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// A sound event emitted by the game logic.
/// The numeric value maps to a game-defined sound on the JS side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

impl SoundEvent {
    /// A ball bounced off a cushion.
    pub const CUSHION: Self = Self(1);
    /// The cue struck a ball.
    pub const CUE_STRIKE: Self = Self(2);
}

/// A game event communicated from Rust to JS via SharedArrayBuffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// HUD refresh: `a` = ball count, `b` = aim power (0..=1), `c` = 1.0 while aiming.
    pub const HUD: f32 = 1.0;
    /// A shot was taken: `a` = launch speed, `b`/`c` = launch direction.
    pub const SHOT: f32 = 2.0;
    /// The table was reset.
    pub const RESET: f32 = 3.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
    }
}
