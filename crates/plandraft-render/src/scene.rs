//! Retained draw-command scene.
//!
//! The compositor lowers a session into a flat command list that a backend
//! replays in order (Vello, tiny-skia, an SVG writer). Commands are in
//! world coordinates; the backend applies any viewport transform when
//! replaying.

use kurbo::{BezPath, Stroke};
use peniko::{Color, Fill};

/// One paint operation.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Fill {
        style: Fill,
        color: Color,
        path: BezPath,
    },
    Stroke {
        stroke: Stroke,
        color: Color,
        path: BezPath,
    },
}

/// An ordered list of draw commands for one frame.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all commands.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Append a filled path.
    pub fn fill(&mut self, style: Fill, color: Color, path: BezPath) {
        self.commands.push(DrawCommand::Fill { style, color, path });
    }

    /// Append a stroked path.
    pub fn stroke(&mut self, stroke: Stroke, color: Color, path: BezPath) {
        self.commands.push(DrawCommand::Stroke { stroke, color, path });
    }

    /// The commands in paint order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_commands_keep_paint_order() {
        let mut scene = Scene::new();
        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(10.0, 0.0));

        scene.fill(Fill::NonZero, Color::WHITE, path.clone());
        scene.stroke(Stroke::new(2.0), Color::BLACK, path);

        assert_eq!(scene.len(), 2);
        assert!(matches!(scene.commands()[0], DrawCommand::Fill { .. }));
        assert!(matches!(scene.commands()[1], DrawCommand::Stroke { .. }));
    }

    #[test]
    fn test_reset_clears_commands() {
        let mut scene = Scene::new();
        scene.fill(Fill::NonZero, Color::WHITE, BezPath::new());
        scene.reset();
        assert!(scene.is_empty());
    }
}
