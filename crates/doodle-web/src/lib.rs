pub mod canvas;
pub mod host;

pub use canvas::CanvasRenderer;
pub use host::{PerformanceClock, WebHost, WebRunner, HostSlot};

/// Generate the `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the hosted game
/// - `game_start(canvas_id)`, which installs logging and the panic hook,
///   attaches the game to the canvas and starts its loop
/// - `game_quit()` and `game_fps()`
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyGame;
///
/// doodle_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type; it implements `doodle_engine::Game`
///   and has a `new()` constructor
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        thread_local! {
            static HOST: ::std::cell::RefCell<Option<$crate::WebHost<$game_type>>> =
                ::std::cell::RefCell::new(None);
        }

        #[wasm_bindgen]
        pub fn game_start(canvas_id: &str) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            $crate::host::launch(&HOST, <$game_type>::new(), canvas_id)?;
            log::info!("{}: initialized", $game_name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn game_quit() {
            $crate::host::quit(&HOST);
        }

        #[wasm_bindgen]
        pub fn game_fps() -> u32 {
            $crate::host::with_host(&HOST, |host| host.runner().ctx().current_fps()).unwrap_or(0)
        }
    };
}
