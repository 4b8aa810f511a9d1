//! Multi-pass plan compositor.
//!
//! Lowers a drawing session into a retained [`Scene`]. Committed walls are
//! stroked in two merged passes: every border in one stroke, then every
//! core in one stroke. Stroking walls one at a time would paint a border
//! across every shared endpoint; merging the passes lets connected walls
//! melt together, and the round caps and joins of [`kurbo::Stroke`] close
//! the junctions.

use crate::renderer::{RenderContext, Renderer};
use crate::scene::Scene;
use kurbo::{BezPath, Circle, Point, Rect, Shape as KurboShape, Stroke};
use peniko::{Color, Fill};
use plandraft_core::session::SessionState;
use plandraft_core::shapes::{
    Shape, WALL_BORDER_COLOR, WALL_BORDER_WIDTH, WALL_FILL_COLOR, WALL_FILL_WIDTH,
};
use plandraft_core::snap::ExtensionLine;

/// Selection outline width.
const SELECTION_WIDTH: f64 = 3.0;
/// Outline width around fill previews.
const PREVIEW_OUTLINE_WIDTH: f64 = 2.0;
/// Alpha applied to preview fills.
const PREVIEW_FILL_ALPHA: u8 = 128;
/// Extension guide dash pattern and width.
const GUIDE_DASHES: [f64; 2] = [5.0, 5.0];
const GUIDE_WIDTH: f64 = 2.0;
/// Arm length of the X marking the endpoint a guide extends from.
const GUIDE_MARKER_SIZE: f64 = 4.0;
const GUIDE_MARKER_WIDTH: f64 = 1.5;
/// Radius of the start-point marker.
const START_MARKER_RADIUS: f64 = 5.0;

/// Compositor that builds a retained command list from a session.
pub struct PlanRenderer {
    scene: Scene,
    selection_color: Color,
}

impl Default for PlanRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanRenderer {
    /// Create a new plan renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            selection_color: Color::from_rgba8(0, 0, 255, 255),
        }
    }

    /// Get the built scene for replay.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets the internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Stroke a wall path border-then-core. Used for both the committed
    /// passes and the in-progress preview.
    fn stroke_walls(&mut self, path: BezPath) {
        self.scene.stroke(
            Stroke::new(WALL_BORDER_WIDTH),
            WALL_BORDER_COLOR.into(),
            path.clone(),
        );
        self.scene
            .stroke(Stroke::new(WALL_FILL_WIDTH), WALL_FILL_COLOR.into(), path);
    }

    /// Half-transparent fill plus a thin outline for in-progress areas.
    fn fill_preview(&mut self, ctx: &RenderContext, path: BezPath) {
        if let Some(fill) = ctx.session.active_fill_color() {
            self.scene.fill(
                Fill::NonZero,
                fill.with_alpha(PREVIEW_FILL_ALPHA).into(),
                path.clone(),
            );
        }
        self.scene
            .stroke(Stroke::new(PREVIEW_OUTLINE_WIDTH), Color::BLACK, path);
    }

    fn render_preview(&mut self, ctx: &RenderContext) {
        // Rectangle previews never carry a start marker.
        let start_marker = match ctx.session.state() {
            SessionState::Idle | SessionState::DraggingShape { .. } => return,
            SessionState::DrawingWall { start, current } => {
                let mut path = BezPath::new();
                path.move_to(*start);
                path.line_to(*current);
                self.stroke_walls(path);
                Some(*start)
            }
            SessionState::DrawingWallPolygon { vertices, cursor } => {
                let Some(first) = vertices.first().copied() else {
                    return;
                };
                let mut path = BezPath::new();
                path.move_to(first);
                for vertex in &vertices[1..] {
                    path.line_to(*vertex);
                }
                path.line_to(*cursor);
                self.stroke_walls(path);
                Some(first)
            }
            SessionState::DraggingRectangle { start, current }
            | SessionState::PlacingRectangle { start, current } => {
                let rect = Rect::from_points(*start, *current);
                self.fill_preview(ctx, rect.to_path(0.1));
                None
            }
            SessionState::DrawingPolygon { vertices, cursor } => {
                let Some(first) = vertices.first().copied() else {
                    return;
                };
                let mut path = BezPath::new();
                path.move_to(first);
                for vertex in &vertices[1..] {
                    path.line_to(*vertex);
                }
                path.line_to(*cursor);
                path.close_path();
                self.fill_preview(ctx, path);
                Some(first)
            }
        };

        if ctx.show_start_markers {
            if let Some(point) = start_marker {
                self.render_start_marker(point);
            }
        }
    }

    /// Dashed ray from the wall endpoint to the snapped position, with an
    /// X on the endpoint it extends from. Green while usable, red when a
    /// crossing wall blocks it.
    fn render_extension_guide(&mut self, guide: &ExtensionLine) {
        let color = if guide.blocked {
            Color::from_rgba8(255, 0, 0, 255) // Red
        } else {
            Color::from_rgba8(0x22, 0xC5, 0x5E, 255) // Green
        };

        let mut path = BezPath::new();
        path.move_to(guide.start);
        path.line_to(guide.end);
        let stroke = Stroke::new(GUIDE_WIDTH).with_dashes(0.0, GUIDE_DASHES);
        self.scene.stroke(stroke, color, path);

        let mut marker = BezPath::new();
        marker.move_to(Point::new(
            guide.start.x - GUIDE_MARKER_SIZE,
            guide.start.y - GUIDE_MARKER_SIZE,
        ));
        marker.line_to(Point::new(
            guide.start.x + GUIDE_MARKER_SIZE,
            guide.start.y + GUIDE_MARKER_SIZE,
        ));
        marker.move_to(Point::new(
            guide.start.x + GUIDE_MARKER_SIZE,
            guide.start.y - GUIDE_MARKER_SIZE,
        ));
        marker.line_to(Point::new(
            guide.start.x - GUIDE_MARKER_SIZE,
            guide.start.y + GUIDE_MARKER_SIZE,
        ));
        self.scene
            .stroke(Stroke::new(GUIDE_MARKER_WIDTH), color, marker);
    }

    fn render_start_marker(&mut self, point: Point) {
        let circle = Circle::new(point, START_MARKER_RADIUS);
        self.scene.fill(
            Fill::NonZero,
            Color::from_rgba8(255, 0, 0, 255),
            circle.to_path(0.1),
        );
        self.scene
            .stroke(Stroke::new(1.0), Color::BLACK, circle.to_path(0.1));
    }
}

/// Collect every committed wall segment into one path.
fn wall_path(shapes: &[Shape]) -> BezPath {
    let mut path = BezPath::new();
    for shape in shapes {
        if let Shape::Line(line) = shape {
            path.move_to(line.start);
            path.line_to(line.end);
        }
    }
    path
}

impl Renderer for PlanRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        self.selection_color = ctx.selection_color;

        let session = ctx.session;
        let shapes = session.document().shapes();

        // Room fills first, in insertion order.
        for shape in shapes {
            match shape {
                Shape::Rectangle(rect) => {
                    self.scene
                        .fill(Fill::NonZero, rect.fill_color.into(), shape.to_path());
                }
                Shape::Polygon(polygon) => {
                    self.scene
                        .fill(Fill::NonZero, polygon.fill_color.into(), shape.to_path());
                }
                Shape::Line(_) => {}
            }
        }

        // All wall borders in one stroke, then all wall cores in one.
        let walls = wall_path(shapes);
        if !walls.elements().is_empty() {
            self.stroke_walls(walls);
        }

        // Selection highlight over the committed shapes.
        if let Some(id) = session.selected_shape() {
            if let Some(shape) = session.document().get_shape(id) {
                self.scene.stroke(
                    Stroke::new(SELECTION_WIDTH),
                    self.selection_color,
                    shape.to_path(),
                );
            }
        }

        self.render_preview(ctx);

        // Snap guide on top of everything.
        if let Some(guide) = session.extension_guide() {
            self.render_extension_guide(&guide);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawCommand;
    use kurbo::{PathEl, Size};
    use plandraft_core::document::PlanDocument;
    use plandraft_core::input::{MouseButton, PointerEvent};
    use plandraft_core::session::{DrawingSession, FillKind, ToolKind};
    use plandraft_core::shapes::{SerializableColor, YELLOW_FILL_COLOR};

    fn click(session: &mut DrawingSession, x: f64, y: f64) {
        session.handle_pointer_event(PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        });
        session.handle_pointer_event(PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        });
    }

    fn move_to(session: &mut DrawingSession, x: f64, y: f64) {
        session.handle_pointer_event(PointerEvent::Move {
            position: Point::new(x, y),
        });
    }

    fn build(session: &DrawingSession) -> Scene {
        let mut renderer = PlanRenderer::new();
        let ctx = RenderContext::new(session, Size::new(800.0, 600.0));
        renderer.build_scene(&ctx);
        renderer.take_scene()
    }

    fn stroke_color(command: &DrawCommand) -> SerializableColor {
        match command {
            DrawCommand::Stroke { color, .. } => SerializableColor::from(*color),
            DrawCommand::Fill { .. } => panic!("expected a stroke"),
        }
    }

    fn session_with_plan() -> DrawingSession {
        let mut doc = PlanDocument::new();
        doc.commit_line(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        doc.commit_line(Point::new(100.0, 0.0), Point::new(100.0, 80.0));
        doc.commit_rectangle(
            Point::new(10.0, 10.0),
            Point::new(40.0, 40.0),
            YELLOW_FILL_COLOR,
        );
        DrawingSession::with_document(doc)
    }

    #[test]
    fn test_empty_session_builds_empty_scene() {
        let session = DrawingSession::new();
        let scene = build(&session);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_walls_merge_into_two_strokes() {
        let session = session_with_plan();
        let scene = build(&session);

        // One room fill, one border pass, one core pass.
        assert_eq!(scene.len(), 3);
        assert!(matches!(scene.commands()[0], DrawCommand::Fill { .. }));

        let DrawCommand::Stroke { stroke, path, .. } = &scene.commands()[1] else {
            panic!("expected the border pass");
        };
        assert_eq!(stroke.width, WALL_BORDER_WIDTH);
        let moves = path
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count();
        assert_eq!(moves, 2);
        assert_eq!(stroke_color(&scene.commands()[1]), WALL_BORDER_COLOR);

        let DrawCommand::Stroke { stroke, .. } = &scene.commands()[2] else {
            panic!("expected the core pass");
        };
        assert_eq!(stroke.width, WALL_FILL_WIDTH);
        assert_eq!(stroke_color(&scene.commands()[2]), WALL_FILL_COLOR);
    }

    #[test]
    fn test_selection_paints_last() {
        let mut session = session_with_plan();
        click(&mut session, 20.0, 20.0);
        assert!(session.selected_shape().is_some());

        let scene = build(&session);
        assert_eq!(scene.len(), 4);
        let DrawCommand::Stroke { stroke, .. } = &scene.commands()[3] else {
            panic!("expected the selection stroke");
        };
        assert_eq!(stroke.width, 3.0);
        assert_eq!(
            stroke_color(&scene.commands()[3]),
            SerializableColor::rgb8(0, 0, 255)
        );
    }

    #[test]
    fn test_wall_preview_uses_both_passes() {
        let mut session = DrawingSession::new();
        session.set_tool(ToolKind::Wall);
        click(&mut session, 200.0, 200.0);
        move_to(&mut session, 260.0, 260.0);

        let scene = build(&session);
        assert_eq!(scene.len(), 2);
        let DrawCommand::Stroke { stroke, .. } = &scene.commands()[0] else {
            panic!("expected the preview border");
        };
        assert_eq!(stroke.width, WALL_BORDER_WIDTH);
        let DrawCommand::Stroke { stroke, .. } = &scene.commands()[1] else {
            panic!("expected the preview core");
        };
        assert_eq!(stroke.width, WALL_FILL_WIDTH);
    }

    #[test]
    fn test_rectangle_preview_is_half_transparent() {
        let mut session = DrawingSession::new();
        session.set_tool(ToolKind::Rectangle(FillKind::Green));
        session.handle_pointer_event(PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        move_to(&mut session, 60.0, 50.0);

        let scene = build(&session);
        assert_eq!(scene.len(), 2);
        let DrawCommand::Fill { color, .. } = &scene.commands()[0] else {
            panic!("expected the preview fill");
        };
        let fill = SerializableColor::from(*color);
        assert_eq!(fill.a, 128);
        let DrawCommand::Stroke { stroke, .. } = &scene.commands()[1] else {
            panic!("expected the preview outline");
        };
        assert_eq!(stroke.width, 2.0);
    }

    #[test]
    fn test_polygon_preview_includes_cursor_vertex() {
        let mut session = DrawingSession::new();
        session.set_tool(ToolKind::Polygon(FillKind::Yellow));
        click(&mut session, 0.0, 0.0);
        click(&mut session, 50.0, 0.0);
        click(&mut session, 50.0, 50.0);
        move_to(&mut session, 25.0, 60.0);

        let scene = build(&session);
        assert_eq!(scene.len(), 2);
        let DrawCommand::Fill { style, path, .. } = &scene.commands()[0] else {
            panic!("expected the preview fill");
        };
        assert_eq!(*style, Fill::NonZero);
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(50.0, 0.0)),
                PathEl::LineTo(Point::new(50.0, 50.0)),
                PathEl::LineTo(Point::new(25.0, 60.0)),
                PathEl::ClosePath,
            ]
        );
    }

    #[test]
    fn test_extension_guide_is_dashed_green() {
        let mut doc = PlanDocument::new();
        doc.commit_line(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let mut session = DrawingSession::with_document(doc);
        session.set_tool(ToolKind::Wall);
        click(&mut session, 50.0, 80.0);
        move_to(&mut session, 90.0, 30.0);
        assert!(session.extension_guide().is_some());

        let scene = build(&session);
        // Wall passes, preview passes, guide, marker.
        assert_eq!(scene.len(), 6);

        let DrawCommand::Stroke { stroke, path, .. } = &scene.commands()[4] else {
            panic!("expected the guide stroke");
        };
        assert_eq!(stroke.width, GUIDE_WIDTH);
        assert_eq!(stroke.dash_pattern.as_slice(), &[5.0, 5.0]);
        assert_eq!(
            stroke_color(&scene.commands()[4]),
            SerializableColor::rgb8(0x22, 0xC5, 0x5E)
        );
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(100.0, 0.0)),
                PathEl::LineTo(Point::new(100.0, 17.5)),
            ]
        );

        let DrawCommand::Stroke { stroke, path, .. } = &scene.commands()[5] else {
            panic!("expected the guide marker");
        };
        assert_eq!(stroke.width, GUIDE_MARKER_WIDTH);
        assert_eq!(path.elements().len(), 4);
    }

    #[test]
    fn test_blocked_guide_is_red() {
        let mut doc = PlanDocument::new();
        doc.commit_line(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        doc.commit_line(Point::new(60.0, 70.0), Point::new(60.0, -100.0));
        let mut session = DrawingSession::with_document(doc);
        session.set_tool(ToolKind::Wall);
        click(&mut session, 50.0, 80.0);
        move_to(&mut session, 90.0, 30.0);

        let guide = session.extension_guide().unwrap();
        assert!(guide.blocked);

        let scene = build(&session);
        assert_eq!(scene.len(), 6);
        assert_eq!(
            stroke_color(&scene.commands()[4]),
            SerializableColor::rgb8(255, 0, 0)
        );
    }

    #[test]
    fn test_start_marker_behind_flag() {
        let mut session = DrawingSession::new();
        session.set_tool(ToolKind::Wall);
        click(&mut session, 10.0, 10.0);

        let mut renderer = PlanRenderer::new();
        let ctx = RenderContext::new(&session, Size::new(800.0, 600.0));
        renderer.build_scene(&ctx);
        assert_eq!(renderer.scene().len(), 2);

        let ctx = RenderContext::new(&session, Size::new(800.0, 600.0)).with_start_markers(true);
        renderer.build_scene(&ctx);
        let scene = renderer.take_scene();
        assert_eq!(scene.len(), 4);
        let DrawCommand::Fill { color, .. } = &scene.commands()[2] else {
            panic!("expected the marker fill");
        };
        assert_eq!(SerializableColor::from(*color), SerializableColor::rgb8(255, 0, 0));
    }
}
