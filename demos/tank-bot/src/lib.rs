use wasm_bindgen::prelude::*;

mod game;
use game::TankBot;

doodle_web::export_game!(TankBot, "tank-bot");
