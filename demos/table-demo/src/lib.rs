use wasm_bindgen::prelude::*;
use cue_engine::*;

mod game;

use game::TableDemo;

cue_web::export_game!(TableDemo, "table-demo");
