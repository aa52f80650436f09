//! Canvas geometry for hosts that draw the board: where each cell sits, which cell a click lands on,
//! and the rectangles a pipe is drawn with.
//!
//! Everything here is a pure function of the board; hosts keep their own drawing state.

use crate::location::{Coord, Dimension, Location};
use crate::pipe::{Anchor, Pipe, PipeKind};
use crate::shape::Direction;

/// Side length of the square canvas, in pixels.
pub const CANVAS_SIZE: f64 = 950.0;
/// Total width of the frame around the grid; half of it lies on each side.
pub const BORDER_SIZE: f64 = 100.0;
/// Side length of the square marking an anchor.
pub const ANCHOR_MARKER_SIZE: f64 = BORDER_SIZE / 2.0;

/// An axis-aligned rectangle in canvas pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Extent to the right of `x`.
    pub width: f64,
    /// Extent below `y`.
    pub height: f64,
}

/// A pipe ready to draw: translate to `centre`, rotate by `angle`, fill `rects`.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    /// Centre of the cell in canvas pixels.
    pub centre: (f64, f64),
    /// Clockwise, in radians.
    pub angle: f64,
    /// Shapes to fill, relative to `centre` and before rotating.
    pub rects: Vec<Rect>,
}

/// Side length of one cell on a board of `size`×`size`.
pub fn square_size(size: Dimension) -> f64 {
    (CANVAS_SIZE - BORDER_SIZE) / size.get() as f64
}

/// The cell under canvas pixel `(px, py)`, or [`None`] for the frame and anything beyond it.
pub fn cell_at(px: f64, py: f64, size: Dimension) -> Option<Location> {
    if !px.is_finite() || !py.is_finite() {
        return None;
    }

    let square = square_size(size);
    let column = ((px - BORDER_SIZE / 2.0) / square).floor();
    let row = ((py - BORDER_SIZE / 2.0) / square).floor();

    let location = Location(column as Coord, row as Coord);
    location.is_within(size).then_some(location)
}

/// Rectangles for `kind` at 0°, relative to the centre of its cell.
///
/// Anchors are not drawn as pipes; see [`anchor_marker`].
pub fn pipe_rects(kind: PipeKind, square: f64) -> Vec<Rect> {
    let width = square / 4.0;

    match kind {
        PipeKind::Straight => vec![
            Rect { x: -width / 2.0, y: -square / 2.0, width, height: square },
        ],
        PipeKind::Elbow => vec![
            // right arm
            Rect { x: -width / 2.0, y: -width / 2.0, width: square / 2.0 + width / 2.0, height: width },
            // top arm
            Rect { x: -width / 2.0, y: -square / 2.0, width, height: square / 2.0 },
        ],
        PipeKind::Start | PipeKind::End => Vec::new(),
    }
}

/// Where and how to draw `pipe` on a board of `size`×`size`.
pub fn pipe_sprite(pipe: &Pipe, size: Dimension) -> Sprite {
    let square = square_size(size);
    let Location(x, y) = pipe.location();

    Sprite {
        centre: (
            BORDER_SIZE / 2.0 + (x as f64 + 0.5) * square,
            BORDER_SIZE / 2.0 + (y as f64 + 0.5) * square,
        ),
        angle: f64::from(pipe.rotation().degrees()).to_radians(),
        rects: pipe_rects(pipe.kind(), square),
    }
}

/// The square drawn in the frame where `anchor` meets the board.
pub fn anchor_marker(anchor: &Anchor, size: Dimension) -> Rect {
    let square = square_size(size);
    let marker = ANCHOR_MARKER_SIZE;
    let Location(x, y) = anchor.location();
    let (x, y) = (x as f64, y as f64);
    let centred = |c: f64| square * c + (square / 2.0 - marker / 2.0);

    let (left, top) = match anchor.facing(size) {
        // anchor above the board
        Some(Direction::Bottom) | None => (centred(x), square * (y + 1.0) - marker),
        Some(Direction::Top) => (centred(x), square * y),
        Some(Direction::Right) => (square * (x + 1.0) - marker, centred(y)),
        Some(Direction::Left) => (square * x, centred(y)),
    };

    Rect { x: BORDER_SIZE / 2.0 + left, y: BORDER_SIZE / 2.0 + top, width: marker, height: marker }
}
