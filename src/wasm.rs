//! Browser bindings over [`Game`].

use std::str::FromStr;

use js_sys::{Array, Math, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::game::{Difficulty, Game};
use crate::layout::{anchor_marker, cell_at, pipe_sprite, Rect};

/// A plain JS object with the given fields.
fn record(fields: &[(&str, JsValue)]) -> Result<JsValue, JsValue> {
    let object = Object::new();
    for (key, value) in fields {
        Reflect::set(&object, &JsValue::from_str(key), value)?;
    }

    Ok(object.into())
}

fn rect_array(rect: &Rect) -> Array {
    [rect.x, rect.y, rect.width, rect.height].into_iter()
        .map(JsValue::from_f64)
        .collect()
}

fn parse_difficulty(name: &str) -> Result<Difficulty, JsValue> {
    Difficulty::from_str(name).map_err(|_| JsValue::from_str(&format!("unknown difficulty {name:?}")))
}

/// A game driven from JavaScript: the host forwards clicks and one tick per second, then redraws from the snapshots.
#[wasm_bindgen]
pub struct PuzzleSession {
    game: Game,
}

#[wasm_bindgen]
impl PuzzleSession {
    /// Start a game at the named difficulty: `easy`, `normal` or `hard`.
    #[wasm_bindgen(constructor)]
    pub fn new(difficulty: &str) -> Result<PuzzleSession, JsValue> {
        let difficulty = parse_difficulty(difficulty)?;
        let seed = (Math::random() * u64::MAX as f64) as u64;

        Ok(Self { game: Game::with_seed(difficulty, seed) })
    }

    /// Turn the cell under canvas pixel `(x, y)`. Returns whether anything turned.
    pub fn click(&mut self, x: f64, y: f64) -> bool {
        let size = self.game.difficulty().grid_size();
        match cell_at(x, y, size) {
            Some(location) => self.game.rotate_at(location),
            None => false,
        }
    }

    /// Turn the cell with `id`. Returns whether anything turned.
    pub fn rotate(&mut self, id: usize) -> bool {
        self.game.rotate(id)
    }

    /// Validate the board; returns a message for the player if it is not connected.
    pub fn check(&mut self) -> Option<String> {
        self.game.check().map(|notice| notice.to_string())
    }

    /// Count down one second.
    pub fn tick(&mut self) {
        self.game.tick();
    }

    /// Deal a new board; returns the message to show.
    pub fn restart(&mut self) -> String {
        self.game.restart().to_string()
    }

    /// Switch presets by name and deal a new board; returns the message to show.
    #[wasm_bindgen(js_name = setDifficulty)]
    pub fn set_difficulty(&mut self, difficulty: &str) -> Result<String, JsValue> {
        let difficulty = parse_difficulty(difficulty)?;
        Ok(self.game.set_difficulty(difficulty).to_string())
    }

    /// `YOU WON` or `You Lost` once the game is over.
    pub fn banner(&self) -> Option<String> {
        self.game.state().banner().map(str::to_owned)
    }

    /// Whole seconds left on the clock.
    #[wasm_bindgen(js_name = timeLeft)]
    pub fn time_left(&self) -> u32 {
        self.game.countdown().remaining().as_secs() as u32
    }

    /// Side length of the board in play.
    #[wasm_bindgen(js_name = gridSize)]
    pub fn grid_size(&self) -> usize {
        self.game.difficulty().grid_size().get()
    }

    /// Switch to the preset for a `size`×`size` board; fails for sizes without one.
    #[wasm_bindgen(js_name = setGridSize)]
    pub fn set_grid_size(&mut self, size: usize) -> Result<String, JsValue> {
        self.game.resize(size)
            .map(|notice| notice.to_string())
            .ok_or_else(|| JsValue::from_str(&format!("no preset for a {size}x{size} grid")))
    }

    /// One `{id, kind, x, y, rotation}` object per cell, in id order.
    pub fn cells(&self) -> Result<Array, JsValue> {
        let cells = Array::new();
        let Some(board) = self.game.board() else {
            return Ok(cells);
        };

        for pipe in board.pipes() {
            let kind: &'static str = pipe.kind().into();
            cells.push(&record(&[
                ("id", JsValue::from_f64(pipe.id() as f64)),
                ("kind", JsValue::from_str(kind)),
                ("x", JsValue::from_f64(pipe.location().0 as f64)),
                ("y", JsValue::from_f64(pipe.location().1 as f64)),
                ("rotation", JsValue::from_f64(f64::from(pipe.rotation().degrees()))),
            ])?);
        }

        Ok(cells)
    }

    /// One `{cx, cy, angle, rects}` object per cell, ready to draw; each rect is `[x, y, width, height]`.
    pub fn sprites(&self) -> Result<Array, JsValue> {
        let sprites = Array::new();
        let Some(board) = self.game.board() else {
            return Ok(sprites);
        };

        for pipe in board.pipes() {
            let sprite = pipe_sprite(pipe, board.size());
            let rects: Array = sprite.rects.iter().map(rect_array).collect();
            sprites.push(&record(&[
                ("cx", JsValue::from_f64(sprite.centre.0)),
                ("cy", JsValue::from_f64(sprite.centre.1)),
                ("angle", JsValue::from_f64(sprite.angle)),
                ("rects", rects.into()),
            ])?);
        }

        Ok(sprites)
    }

    /// The start and end anchors as `{kind, x, y, marker}` objects.
    pub fn anchors(&self) -> Result<Array, JsValue> {
        let anchors = Array::new();
        let Some(board) = self.game.board() else {
            return Ok(anchors);
        };

        for anchor in [board.anchors().start, board.anchors().end] {
            let kind: &'static str = anchor.kind().into();
            anchors.push(&record(&[
                ("kind", JsValue::from_str(kind)),
                ("x", JsValue::from_f64(anchor.location().0 as f64)),
                ("y", JsValue::from_f64(anchor.location().1 as f64)),
                ("marker", rect_array(&anchor_marker(&anchor, board.size())).into()),
            ])?);
        }

        Ok(anchors)
    }
}
