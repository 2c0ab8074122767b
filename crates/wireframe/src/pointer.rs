//! Mapping terminal pointer positions into canvas pixels.

use ratatui::layout::{Position, Rect};
use wireframe_core::Coordinate;

/// Map a terminal cell into canvas pixel space.
///
/// `area` is the on-screen rectangle of the canvas and `surface` its pixel
/// dimensions. The pointer lands on the centre of the cell. Returns `None` for
/// positions outside the canvas or a degenerate area.
pub fn pointer_to_canvas(column: u16, row: u16, area: Rect, surface: (u32, u32)) -> Option<Coordinate> {
    if area.width == 0 || area.height == 0 || !area.contains(Position::new(column, row)) {
        return None;
    }

    let (width, height) = surface;
    let relative_x = f64::from(column - area.x) + 0.5;
    let relative_y = f64::from(row - area.y) + 0.5;

    Some(Coordinate::new(
        relative_x * f64::from(width) / f64::from(area.width),
        relative_y * f64::from(height) / f64::from(area.height),
    ))
}
