use glam::Vec2;

use crate::api::config::Tuning;
use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::components::ball::{Ball, BallColor, Friction};
use crate::components::entity::{Actor, Entity, Spot};
use crate::core::physics::{resolve_bounds_with, TableBounds};
use crate::core::scene::Scene;
use crate::input::aim::{AimController, AimPreview};
use crate::input::queue::InputQueue;
use crate::renderer::instance::DrawBuffer;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Screen width in world units.
    pub screen_width: f32,
    /// Screen height in world units.
    pub screen_height: f32,
    /// Inset of the table rectangle from every screen edge.
    pub table_margin: f32,
    /// Upper bound on the `dt` handed to the simulation (default: 0.1 s).
    pub max_frame_dt: f32,
    /// Maximum number of drawn table objects (default: 64).
    pub max_balls: usize,
    /// Maximum number of preview segments (default: 32).
    pub max_segments: usize,
    /// Maximum number of shadow markers (default: 64).
    pub max_markers: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    pub tuning: Tuning,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 1280.0,
            screen_height: 720.0,
            table_margin: 40.0,
            max_frame_dt: 0.1,
            max_balls: 64,
            max_segments: 32,
            max_markers: 64,
            max_sounds: 32,
            max_events: 32,
            tuning: Tuning::default(),
        }
    }
}

impl GameConfig {
    pub fn table_bounds(&self) -> TableBounds {
        TableBounds::from_screen(self.screen_width, self.screen_height, self.table_margin)
    }
}

/// The contract every table host must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state and place the opening balls.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Consume this frame's input. Motion is stepped by the runner afterwards.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only pass after the draw buffer has been built.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Everything the frame loop mutates, passed explicitly to the game each frame.
pub struct EngineContext {
    pub scene: Scene,
    pub bounds: TableBounds,
    pub aim: AimController,
    pub tuning: Tuning,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    /// Shadow markers the draw buffer can hold.
    marker_capacity: usize,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            bounds: config.table_bounds(),
            aim: AimController::new(config.tuning.aim),
            tuning: config.tuning,
            sounds: Vec::new(),
            events: Vec::new(),
            marker_capacity: config.max_markers,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Replace the tuning. Existing balls keep their friction; the aim
    /// controller and later spawns pick up the new values.
    pub fn set_tuning(&mut self, tuning: Tuning) {
        self.tuning = tuning;
        self.aim.set_tuning(tuning.aim);
    }

    /// Emit a sound event to be forwarded to JS.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to JS.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }

    // -- Table convenience methods --

    /// Place a resting ball using the configured mass and friction.
    pub fn spawn_ball(&mut self, pos: Vec2, radius: f32) -> EntityId {
        self.spawn_ball_with(pos, radius, BallColor::default())
    }

    pub fn spawn_ball_with(&mut self, pos: Vec2, radius: f32, color: BallColor) -> EntityId {
        let id = self.next_id();
        let ball = Ball::new(pos, radius, self.tuning.ball.mass)
            .with_color(color)
            .with_friction(Friction::from(&self.tuning.ball));
        self.scene.spawn(Entity::new(id, ball).with_tag(format!("ball_{}", id.0)));
        log::info!("spawned ball {:?} at ({:.0}, {:.0}) r={}", id, pos.x, pos.y, radius);
        id
    }

    /// Place a static table spot.
    pub fn spawn_spot(&mut self, pos: Vec2, radius: f32, tag: &str) -> EntityId {
        let id = self.next_id();
        self.scene.spawn(Entity::new(id, Spot::new(pos, radius)).with_tag(tag));
        id
    }

    /// Put every ball back where it was created and drop any aim in progress.
    pub fn reset_balls(&mut self) {
        self.aim.cancel();
        for ball in self.scene.balls_mut() {
            ball.reset_to_initial();
        }
        log::info!("table reset ({} balls)", self.scene.ball_count());
    }

    /// Start aiming at the ball under `pointer`, if any is close enough.
    pub fn start_aim_at(&mut self, pointer: Vec2) -> bool {
        let threshold = self.tuning.aim.grab_threshold;
        let target = self
            .scene
            .find_ball_near(pointer, threshold)
            .and_then(|id| self.scene.ball(id).map(|b| (id, b)));
        self.aim.start_aim(target, pointer)
    }

    /// Release the cue at `pointer`. Returns the launch velocity on a shot.
    pub fn release_aim(&mut self, pointer: Vec2) -> Option<Vec2> {
        self.aim.release(pointer, &mut self.scene)
    }

    /// Step all table objects by `dt`, then push balls back inside the table.
    /// Emits one `SoundEvent::CUSHION` per ball that bounced.
    pub fn update(&mut self, dt: f32) {
        for entity in self.scene.iter_mut().filter(|e| e.active) {
            entity.object.advance(dt);
        }

        let mut bounced = 0;
        resolve_bounds_with(self.scene.iter_mut(), &self.bounds, |_, _| bounced += 1);
        for _ in 0..bounced {
            self.emit_sound(SoundEvent::CUSHION);
        }
    }

    /// Shot preview for the current aim, if aiming.
    /// Never places more markers than the draw buffer holds, so the fade
    /// always ends on the last drawn marker.
    pub fn aim_preview(&self) -> Option<AimPreview> {
        let mut tuning = self.tuning.preview;
        tuning.max_markers = tuning.max_markers.min(self.marker_capacity);
        self.aim.preview(&self.scene, &self.bounds, &tuning)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub draw_buffer: &'a mut DrawBuffer,
    pub preview: Option<&'a AimPreview>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn context_uses_configured_table() {
        let ctx = EngineContext::new();
        assert_eq!(ctx.bounds, TableBounds::new(40.0, 40.0, 1240.0, 680.0));
    }

    #[test]
    fn spawn_ball_assigns_unique_ids() {
        let mut ctx = EngineContext::new();
        let a = ctx.spawn_ball(Vec2::new(100.0, 100.0), 12.0);
        let b = ctx.spawn_ball(Vec2::new(200.0, 100.0), 12.0);
        assert_ne!(a, b);
        assert_eq!(ctx.scene.ball_count(), 2);
        assert_eq!(ctx.scene.ball(a).unwrap().mass, 1.0);
    }

    #[test]
    fn update_moves_then_bounces_with_sound() {
        let mut ctx = EngineContext::new();
        let id = ctx.spawn_ball(Vec2::new(60.0, 360.0), 16.0);
        ctx.scene.ball_mut(id).unwrap().set_velocity(Vec2::new(-600.0, 0.0));

        ctx.update(DT);

        let ball = ctx.scene.ball(id).unwrap();
        assert_eq!(ball.pos.x, 56.0);
        assert!(ball.vel.x > 0.0, "velocity should reflect, was {:?}", ball.vel);
        assert_eq!(ctx.sounds, vec![SoundEvent::CUSHION]);
    }

    #[test]
    fn update_leaves_spots_alone() {
        let mut ctx = EngineContext::new();
        let spot = ctx.spawn_spot(Vec2::new(10.0, 10.0), 4.0, "head_spot");
        ctx.update(DT);
        assert_eq!(ctx.scene.get(spot).unwrap().object.pos(), Vec2::new(10.0, 10.0));
        assert!(ctx.sounds.is_empty());
    }

    #[test]
    fn aim_and_release_through_context() {
        let mut ctx = EngineContext::new();
        let id = ctx.spawn_ball(Vec2::new(640.0, 360.0), 16.0);

        assert!(ctx.start_aim_at(Vec2::new(650.0, 360.0)));
        ctx.aim.update_aim(Vec2::new(740.0, 360.0));
        assert!(ctx.aim_preview().is_some());

        let vel = ctx.release_aim(Vec2::new(740.0, 360.0)).unwrap();
        assert!(vel.x < 0.0);
        assert_eq!(ctx.scene.ball(id).unwrap().vel, vel);
        assert!(ctx.aim_preview().is_none());
    }

    #[test]
    fn preview_fade_spans_marker_capacity() {
        let config = GameConfig { max_markers: 5, ..Default::default() };
        let mut ctx = EngineContext::from_config(&config);
        ctx.spawn_ball(Vec2::new(640.0, 360.0), 16.0);
        ctx.start_aim_at(Vec2::new(640.0, 360.0));
        ctx.aim.update_aim(Vec2::new(740.0, 360.0));

        let preview = ctx.aim_preview().unwrap();
        let alphas: Vec<f32> = preview.markers.iter().map(|m| m.alpha).collect();
        assert_eq!(alphas.len(), 5);
        assert_eq!(alphas[0], ctx.tuning.preview.marker_alpha_start);
        let last = alphas[4];
        assert!(
            (last - ctx.tuning.preview.marker_alpha_end).abs() < 1e-6,
            "last drawn marker alpha {} in {:?}",
            last,
            alphas
        );
    }

    #[test]
    fn press_far_from_balls_does_not_aim() {
        let mut ctx = EngineContext::new();
        ctx.spawn_ball(Vec2::new(640.0, 360.0), 16.0);
        assert!(!ctx.start_aim_at(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn reset_restores_balls_and_cancels_aim() {
        let mut ctx = EngineContext::new();
        let id = ctx.spawn_ball(Vec2::new(640.0, 360.0), 16.0);
        ctx.scene.ball_mut(id).unwrap().set_velocity(Vec2::new(300.0, 0.0));
        for _ in 0..10 {
            ctx.update(DT);
        }
        ctx.start_aim_at(Vec2::new(700.0, 360.0));

        ctx.reset_balls();

        let ball = ctx.scene.ball(id).unwrap();
        assert_eq!(ball.pos, Vec2::new(640.0, 360.0));
        assert_eq!(ball.vel, Vec2::ZERO);
        assert!(!ctx.aim.is_aiming());
    }

    #[test]
    fn balls_come_to_rest_inside_table() {
        let mut ctx = EngineContext::new();
        let id = ctx.spawn_ball(Vec2::new(640.0, 360.0), 16.0);
        ctx.scene.ball_mut(id).unwrap().set_velocity(Vec2::new(1584.0, -900.0));
        for _ in 0..3000 {
            ctx.update(DT);
            ctx.clear_frame_data();
        }
        let ball = ctx.scene.ball(id).unwrap();
        assert_eq!(ball.vel, Vec2::ZERO);
        assert!(ctx.bounds.contains(ball.pos));
    }
}
