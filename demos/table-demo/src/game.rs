//! Single-table demo: drag back from a ball and release to shoot it.
//! Clicking empty felt drops another ball; space puts everything back.

use glam::Vec2;
use cue_engine::api::game::GameConfig;
use cue_engine::input::queue::{InputEvent, InputQueue};
use cue_engine::{BallColor, EngineContext, Game, GameEvent, SoundEvent};

const HEAD_SPOT_RADIUS: f32 = 4.0;

pub struct TableDemo {
    config: GameConfig,
    shots: u32,
}

impl TableDemo {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            shots: 0,
        }
    }

    fn on_press(&mut self, ctx: &mut EngineContext, pointer: Vec2) {
        if ctx.start_aim_at(pointer) {
            return;
        }
        if !ctx.bounds.contains(pointer) {
            return;
        }
        if ctx.scene.ball_count() >= self.config.max_balls {
            log::debug!("table full, not spawning");
            return;
        }
        let radius = ctx.tuning.ball.spawn_radius;
        ctx.spawn_ball(pointer, radius);
    }

    fn on_release(&mut self, ctx: &mut EngineContext, pointer: Vec2) {
        let Some(vel) = ctx.release_aim(pointer) else {
            return;
        };
        self.shots += 1;
        let speed = vel.length();
        let dir = vel.normalize_or_zero();
        ctx.emit_sound(SoundEvent::CUE_STRIKE);
        ctx.emit_event(GameEvent {
            kind: GameEvent::SHOT,
            a: speed,
            b: dir.x,
            c: dir.y,
        });
        log::info!("shot {} at speed {:.0}", self.shots, speed);
    }

    fn reset(&mut self, ctx: &mut EngineContext) {
        ctx.reset_balls();
        self.shots = 0;
        ctx.emit_event(GameEvent {
            kind: GameEvent::RESET,
            ..Default::default()
        });
    }

    pub fn shots(&self) -> u32 {
        self.shots
    }
}

impl Default for TableDemo {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for TableDemo {
    fn config(&self) -> GameConfig {
        self.config.clone()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let center = ctx.bounds.center();
        // Head spot sits a quarter of the table in from the left cushion.
        let head = Vec2::new(ctx.bounds.left + ctx.bounds.width() * 0.25, center.y);
        ctx.spawn_spot(head, HEAD_SPOT_RADIUS, "head_spot");
        let radius = ctx.tuning.ball.default_radius;
        ctx.spawn_ball_with(center, radius, BallColor::WHITE);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::KeyDown { key_code } if key_code == InputEvent::KEY_SPACE => {
                    self.reset(ctx);
                }
                InputEvent::PointerDown { x, y, button } if button == InputEvent::BUTTON_LEFT => {
                    self.on_press(ctx, Vec2::new(x, y));
                }
                InputEvent::PointerMove { x, y } => {
                    ctx.aim.update_aim(Vec2::new(x, y));
                }
                InputEvent::PointerUp { x, y, button } if button == InputEvent::BUTTON_LEFT => {
                    self.on_release(ctx, Vec2::new(x, y));
                }
                _ => {}
            }
        }

        let power = ctx.aim.power(&ctx.scene);
        let aiming = if ctx.aim.is_aiming() { 1.0 } else { 0.0 };
        ctx.emit_event(GameEvent {
            kind: GameEvent::HUD,
            a: ctx.scene.ball_count() as f32,
            b: power,
            c: aiming,
        });
    }
}
