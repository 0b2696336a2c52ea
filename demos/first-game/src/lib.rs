use wasm_bindgen::prelude::*;

mod game;
use game::FirstGame;

doodle_web::export_game!(FirstGame, "first-game");
