//! Rasterizes a display list onto a Braille canvas.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Line, Painter, Shape},
    },
};
use wireframe_core::Coordinate;

use crate::surface::{DisplayList, DrawCommand, Surface};

/// Sampling step for filling discs, in surface pixels.
const DISC_STEP: f64 = 0.5;

/// Widget that replays a [`DisplayList`] into a Braille canvas.
///
/// One surface pixel maps to one Braille dot, so the list should be sized to
/// `area.width * 2` by `area.height * 4`.
#[derive(Debug, Clone, Copy)]
pub struct WireFrameCanvas<'a> {
    list: &'a DisplayList,
    background: Color,
}

impl<'a> WireFrameCanvas<'a> {
    pub fn new(list: &'a DisplayList) -> Self {
        Self {
            list,
            background: Color::Reset,
        }
    }

    /// Colour painted behind the wireframe.
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }
}

/// Surface pixel dimensions covered by `area` with Braille markers.
pub fn braille_resolution(area: Rect) -> (u32, u32) {
    (u32::from(area.width) * 2, u32::from(area.height) * 4)
}

impl Widget for WireFrameCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = self.list.width() as f64;
        let height = self.list.height() as f64;
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(self.background)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                if width <= 0.0 || height <= 0.0 {
                    return;
                }
                for command in self.list.commands() {
                    match *command {
                        DrawCommand::StrokeLine {
                            from,
                            to,
                            color,
                            width: line_width,
                        } => {
                            for (a, b) in thick_line(flip(from, height), flip(to, height), line_width) {
                                ctx.draw(&Line::new(a.x, a.y, b.x, b.y, color));
                            }
                        }
                        DrawCommand::FillCircle {
                            center,
                            radius,
                            color,
                        } => ctx.draw(&Disc {
                            center: flip(center, height),
                            radius,
                            color,
                        }),
                    }
                }
            });
        canvas.render(area, buf);
    }
}

/// Surface y grows downwards, canvas y grows upwards.
fn flip(point: Coordinate, height: f64) -> Coordinate {
    Coordinate::new(point.x, height - point.y)
}

/// Approximate a wide stroke with parallel one-dot lines along the normal.
fn thick_line(from: Coordinate, to: Coordinate, width: f64) -> Vec<(Coordinate, Coordinate)> {
    let strands = width.round().max(1.0) as usize;
    let length = from.distance_to(to);
    if strands == 1 || length == 0.0 {
        return vec![(from, to)];
    }

    let normal_x = -(to.y - from.y) / length;
    let normal_y = (to.x - from.x) / length;
    let center = (strands - 1) as f64 / 2.0;

    (0..strands)
        .map(|strand| {
            let offset = strand as f64 - center;
            let dx = normal_x * offset;
            let dy = normal_y * offset;
            (
                Coordinate::new(from.x + dx, from.y + dy),
                Coordinate::new(to.x + dx, to.y + dy),
            )
        })
        .collect()
}

/// A filled circle.
#[derive(Debug, Clone, Copy)]
struct Disc {
    center: Coordinate,
    radius: f64,
    color: Color,
}

impl Shape for Disc {
    fn draw(&self, painter: &mut Painter) {
        let radius = self.radius.max(0.0);
        let steps = (radius / DISC_STEP).ceil() as i64;
        for i in -steps..=steps {
            for j in -steps..=steps {
                let dx = i as f64 * DISC_STEP;
                let dy = j as f64 * DISC_STEP;
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                if let Some((x, y)) = painter.get_point(self.center.x + dx, self.center.y + dy) {
                    painter.paint(x, y, self.color);
                }
            }
        }
    }
}
