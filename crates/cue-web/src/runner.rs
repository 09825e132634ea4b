use cue_engine::{
    DrawBuffer, EngineContext, FrameClock, Game, GameConfig, InputEvent, InputQueue,
    ProtocolLayout, RenderContext, Tuning,
};
use cue_engine::bridge::protocol::{
    HEADER_AIMING, HEADER_BALL_COUNT, HEADER_CUE_COUNT, HEADER_EVENT_COUNT, HEADER_FLOATS,
    HEADER_FRAME_COUNTER, HEADER_MARKER_COUNT, HEADER_SEGMENT_COUNT, HEADER_SOUND_COUNT,
};
use cue_engine::systems::render::build_draw_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete host (e.g., `table-demo`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    draw_buffer: DrawBuffer,
    clock: FrameClock,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    /// Flat buffer of sound event IDs for SharedArrayBuffer reads.
    sound_buffer: Vec<u8>,
    /// Protocol header mirrored for the host; counts refreshed every tick.
    header: [f32; HEADER_FLOATS],
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let clock = FrameClock::new(config.max_frame_dt);
        let layout = ProtocolLayout::from_config(&config);
        let sound_buffer = Vec::with_capacity(config.max_sounds);
        let mut header = [0.0; HEADER_FLOATS];
        layout.write_static_header(&mut header, config.screen_width, config.screen_height);

        Self {
            game,
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            draw_buffer: DrawBuffer::new(),
            clock,
            layout,
            config,
            initialized: false,
            sound_buffer,
            header,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.rebuild_draw_buffer();
        self.write_header();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Replace the tuning from a JSON document. On a parse error the current
    /// tuning stays in place and the error is logged.
    pub fn load_tuning(&mut self, json: &str) -> bool {
        match Tuning::from_json(json) {
            Ok(tuning) => {
                self.config.tuning = tuning;
                self.ctx.set_tuning(tuning);
                log::info!("tuning loaded");
                true
            }
            Err(e) => {
                log::warn!("ignoring tuning: {}", e);
                false
            }
        }
    }

    /// Run one frame: input, motion, preview, draw data, sounds.
    pub fn tick(&mut self, frame_dt: f32) {
        if !self.initialized {
            return;
        }

        let dt = self.clock.tick(frame_dt);

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        self.game.update(&mut self.ctx, &self.input);

        // Drain input after update
        self.input.drain();

        self.ctx.update(dt);

        self.rebuild_draw_buffer();

        // Pack sound events into flat buffer
        self.sound_buffer.clear();
        self.sound_buffer.extend(
            self.ctx
                .sounds
                .iter()
                .take(self.config.max_sounds)
                .map(|s| s.0 as u8),
        );
        self.ctx.events.truncate(self.config.max_events);

        self.write_header();
    }

    fn write_header(&mut self) {
        self.header[HEADER_FRAME_COUNTER] = self.clock.frames() as f32;
        self.header[HEADER_BALL_COUNT] = self.draw_buffer.ball_count() as f32;
        self.header[HEADER_SEGMENT_COUNT] = self.draw_buffer.segment_count() as f32;
        self.header[HEADER_MARKER_COUNT] = self.draw_buffer.marker_count() as f32;
        self.header[HEADER_CUE_COUNT] = self.draw_buffer.cue_count() as f32;
        self.header[HEADER_SOUND_COUNT] = self.sound_buffer.len() as f32;
        self.header[HEADER_EVENT_COUNT] = self.ctx.events.len() as f32;
        self.header[HEADER_AIMING] = if self.ctx.aim.is_aiming() { 1.0 } else { 0.0 };
    }

    fn rebuild_draw_buffer(&mut self) {
        let preview = self.ctx.aim_preview();
        build_draw_buffer(
            self.ctx.scene.iter(),
            preview.as_ref(),
            &self.config,
            &mut self.draw_buffer,
        );

        // Allow game to add custom draw data
        let mut render_ctx = RenderContext {
            draw_buffer: &mut self.draw_buffer,
            preview: preview.as_ref(),
        };
        self.game.render(&mut render_ctx);
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    pub fn is_aiming(&self) -> bool {
        self.ctx.aim.is_aiming()
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn balls_ptr(&self) -> *const f32 {
        self.draw_buffer.balls_ptr()
    }

    pub fn ball_count(&self) -> u32 {
        self.draw_buffer.ball_count()
    }

    pub fn segments_ptr(&self) -> *const f32 {
        self.draw_buffer.segments_ptr()
    }

    pub fn segment_count(&self) -> u32 {
        self.draw_buffer.segment_count()
    }

    pub fn markers_ptr(&self) -> *const f32 {
        self.draw_buffer.markers_ptr()
    }

    pub fn marker_count(&self) -> u32 {
        self.draw_buffer.marker_count()
    }

    pub fn cue_ptr(&self) -> *const f32 {
        self.draw_buffer.cues_ptr()
    }

    pub fn cue_count(&self) -> u32 {
        self.draw_buffer.cue_count()
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.screen_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.screen_height
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_balls(&self) -> u32 {
        self.layout.max_balls as u32
    }

    pub fn max_segments(&self) -> u32 {
        self.layout.max_segments as u32
    }

    pub fn max_markers(&self) -> u32 {
        self.layout.max_markers as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
