pub mod runner;

pub use runner::GameRunner;

/// Install the browser console logger and panic hook.
/// A second call (or any logger already set) is reported on the console.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(level) {
        let msg = format!("cue-web: console logger not installed: {}", e);
        web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(&msg));
    }
}

/// Generate all `#[wasm_bindgen]` exports for a table host.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use cue_engine::*;
///
/// mod game;
/// use game::MyTable;
///
/// cue_web::export_game!(MyTable, "my-table");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The host struct type that implements `cue_engine::Game`
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        /// Run `f` against the runner. Calls before `game_init` are dropped.
        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
                Some(runner) => Some(f(runner)),
                None => {
                    log::warn!("{}: call before game_init() ignored", $game_name);
                    None
                }
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            $crate::init_logging(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32, button: u32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y, button }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32, button: u32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y, button }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        /// Returns false when the JSON was rejected and the old tuning kept.
        #[wasm_bindgen]
        pub fn game_load_tuning(json: &str) -> bool {
            with_runner(|r| r.load_tuning(json)).unwrap_or_default()
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_balls_ptr() -> *const f32 {
            with_runner(|r| r.balls_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_ball_count() -> u32 {
            with_runner(|r| r.ball_count()).unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn get_segments_ptr() -> *const f32 {
            with_runner(|r| r.segments_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_segment_count() -> u32 {
            with_runner(|r| r.segment_count()).unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn get_markers_ptr() -> *const f32 {
            with_runner(|r| r.markers_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_marker_count() -> u32 {
            with_runner(|r| r.marker_count()).unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn get_cue_ptr() -> *const f32 {
            with_runner(|r| r.cue_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_cue_count() -> u32 {
            with_runner(|r| r.cue_count()).unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const u8 {
            with_runner(|r| r.sound_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_runner(|r| r.sound_events_len()).unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len()).unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width()).unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height()).unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn get_is_aiming() -> bool {
            with_runner(|r| r.is_aiming()).unwrap_or_default()
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_balls() -> u32 {
            with_runner(|r| r.max_balls()).unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn get_max_segments() -> u32 {
            with_runner(|r| r.max_segments()).unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn get_max_markers() -> u32 {
            with_runner(|r| r.max_markers()).unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds()).unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events()).unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats()).unwrap_or_default()
        }
    };
}
