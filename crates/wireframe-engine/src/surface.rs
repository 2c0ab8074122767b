//! Render surface abstraction and the recording surface used by the stage.

use ratatui::style::Color;
use wireframe_core::Coordinate;

/// A 2D raster surface the engine draws onto.
///
/// Modelled after a canvas 2D context: fill/stroke colours and line width are
/// drawing state, primitives use whatever state is current.
pub trait Surface {
    /// Current width in pixels.
    fn width(&self) -> u32;

    /// Current height in pixels.
    fn height(&self) -> u32;

    /// Clear the entire surface.
    fn clear(&mut self);

    fn set_fill_color(&mut self, color: Color);

    fn set_stroke_color(&mut self, color: Color);

    fn set_line_width(&mut self, width: f64);

    /// Fill a disc of `radius` around `center` with the fill colour.
    fn fill_circle(&mut self, center: Coordinate, radius: f64);

    /// Stroke a straight segment with the stroke colour and line width.
    fn stroke_line(&mut self, from: Coordinate, to: Coordinate);
}

/// A single recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillCircle {
        center: Coordinate,
        radius: f64,
        color: Color,
    },
    StrokeLine {
        from: Coordinate,
        to: Coordinate,
        color: Color,
        width: f64,
    },
}

/// Surface that records draw calls for later replay.
///
/// The stage draws a frame into a display list and hands it to
/// [`WireFrameCanvas`](crate::WireFrameCanvas) for rasterizing.
#[derive(Debug, Clone)]
pub struct DisplayList {
    width: u32,
    height: u32,
    fill_color: Color,
    stroke_color: Color,
    line_width: f64,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    /// Create an empty display list for a `width` x `height` surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fill_color: Color::White,
            stroke_color: Color::White,
            line_width: 1.0,
            commands: Vec::new(),
        }
    }

    /// Change the surface dimensions. Recorded commands are kept.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// All commands recorded since the last clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded line segments as `(from, to, color, width)`.
    pub fn lines(&self) -> impl Iterator<Item = (Coordinate, Coordinate, Color, f64)> + '_ {
        self.commands.iter().filter_map(|cmd| match *cmd {
            DrawCommand::StrokeLine {
                from,
                to,
                color,
                width,
            } => Some((from, to, color, width)),
            DrawCommand::FillCircle { .. } => None,
        })
    }

    /// Recorded discs as `(center, radius, color)`.
    pub fn circles(&self) -> impl Iterator<Item = (Coordinate, f64, Color)> + '_ {
        self.commands.iter().filter_map(|cmd| match *cmd {
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => Some((center, radius, color)),
            DrawCommand::StrokeLine { .. } => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for DisplayList {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn fill_circle(&mut self, center: Coordinate, radius: f64) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color: self.fill_color,
        });
    }

    fn stroke_line(&mut self, from: Coordinate, to: Coordinate) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            color: self.stroke_color,
            width: self.line_width,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_drawing_state() {
        let mut list = DisplayList::new(100, 50);
        list.set_fill_color(Color::Red);
        list.fill_circle(Coordinate::new(10.0, 10.0), 5.0);
        list.set_stroke_color(Color::Blue);
        list.set_line_width(4.0);
        list.stroke_line(Coordinate::new(0.0, 0.0), Coordinate::new(5.0, 5.0));

        assert_eq!(list.commands().len(), 2);
        assert_eq!(
            list.circles().collect::<Vec<_>>(),
            vec![(Coordinate::new(10.0, 10.0), 5.0, Color::Red)]
        );
        let (_, _, color, width) = list.lines().next().unwrap();
        assert_eq!(color, Color::Blue);
        assert_eq!(width, 4.0);
    }

    #[test]
    fn test_clear_and_resize() {
        let mut list = DisplayList::new(100, 50);
        list.fill_circle(Coordinate::new(1.0, 1.0), 1.0);
        list.resize(40, 20);
        assert_eq!((list.width(), list.height()), (40, 20));
        assert!(!list.is_empty());

        list.clear();
        assert!(list.is_empty());
    }
}
