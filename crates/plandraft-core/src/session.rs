//! Per-tool drawing session controller.
//!
//! `DrawingSession` owns the document, the pointer state and the snap
//! settings for one editing surface, and drives every tool as an explicit
//! state machine: pointer and key events go in, shape commits and preview
//! state come out. The renderer reads the session; it never mutates it.

use crate::document::PlanDocument;
use crate::hit;
use crate::input::{InputState, Key, MouseButton, PointerEvent};
use crate::shapes::{
    Line, SerializableColor, Shape, ShapeId, GREEN_FILL_COLOR, YELLOW_FILL_COLOR,
};
use crate::snap::{self, ExtensionLine, SnapResult, SnapSettings};
use kurbo::Point;

/// Clicking this close to the first vertex closes a polygon run.
pub const CLOSE_DISTANCE: f64 = 10.0;

/// Fill palette slot used by the rectangle and polygon tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillKind {
    Yellow,
    Green,
}

/// How the rectangle tool commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RectangleMode {
    /// Press, drag, release.
    #[default]
    Drag,
    /// Two separate clicks.
    Click,
}

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Wall,
    WallPolygon,
    Rectangle(FillKind),
    Polygon(FillKind),
}

/// In-progress interaction, one variant per gesture.
///
/// `current` and `cursor` fields hold the already-snapped pointer position
/// the renderer previews; raw positions live in [`InputState`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// Wall tool: first corner placed, waiting for the second click.
    DrawingWall { start: Point, current: Point },
    /// Wall-polygon tool: chained vertices plus the snapped cursor.
    DrawingWallPolygon { vertices: Vec<Point>, cursor: Point },
    /// Rectangle tool in drag mode, button held.
    DraggingRectangle { start: Point, current: Point },
    /// Rectangle tool in click mode, first corner placed.
    PlacingRectangle { start: Point, current: Point },
    /// Fill-polygon tool: collected vertices plus the raw cursor.
    DrawingPolygon { vertices: Vec<Point>, cursor: Point },
    /// Select tool: translating a shape under the pointer.
    DraggingShape { id: ShapeId, last: Point },
}

/// Controller for one editing surface.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    document: PlanDocument,
    input: InputState,
    state: SessionState,
    active_tool: ToolKind,
    rectangle_mode: RectangleMode,
    snap_settings: SnapSettings,
    selected_shape: Option<ShapeId>,
    extension_guide: Option<ExtensionLine>,
    fill_color: SerializableColor,
    green_fill_color: SerializableColor,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self {
            document: PlanDocument::new(),
            input: InputState::new(),
            state: SessionState::Idle,
            active_tool: ToolKind::Select,
            rectangle_mode: RectangleMode::Drag,
            snap_settings: SnapSettings::default(),
            selected_shape: None,
            extension_guide: None,
            fill_color: YELLOW_FILL_COLOR,
            green_fill_color: GREEN_FILL_COLOR,
        }
    }
}

impl DrawingSession {
    /// Create a session over an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session over an existing document.
    pub fn with_document(document: PlanDocument) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// The committed shapes.
    pub fn document(&self) -> &PlanDocument {
        &self.document
    }

    /// The current in-progress interaction.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The active tool.
    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    /// How the rectangle tool commits.
    pub fn rectangle_mode(&self) -> RectangleMode {
        self.rectangle_mode
    }

    /// The active snap rules.
    pub fn snap_settings(&self) -> &SnapSettings {
        &self.snap_settings
    }

    /// Id of the selected shape, if any.
    pub fn selected_shape(&self) -> Option<ShapeId> {
        self.selected_shape
    }

    /// Extension guide produced by the last snap resolution.
    pub fn extension_guide(&self) -> Option<ExtensionLine> {
        self.extension_guide
    }

    /// Whether a drawing gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        !matches!(
            self.state,
            SessionState::Idle | SessionState::DraggingShape { .. }
        )
    }

    /// Fill color the active tool would commit with, if it fills at all.
    pub fn active_fill_color(&self) -> Option<SerializableColor> {
        match self.active_tool {
            ToolKind::Rectangle(kind) | ToolKind::Polygon(kind) => Some(self.fill(kind)),
            _ => None,
        }
    }

    /// Switch tools, aborting any in-progress gesture and dropping the
    /// selection.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.active_tool != tool {
            log::debug!("tool changed to {:?}", tool);
        }
        self.active_tool = tool;
        self.state = SessionState::Idle;
        self.extension_guide = None;
        self.selected_shape = None;
    }

    /// Flip the rectangle tool between drag and click commits.
    pub fn toggle_rectangle_mode(&mut self) {
        self.rectangle_mode = match self.rectangle_mode {
            RectangleMode::Drag => RectangleMode::Click,
            RectangleMode::Click => RectangleMode::Drag,
        };
    }

    /// Set the yellow palette slot.
    pub fn set_fill_color(&mut self, color: SerializableColor) {
        self.fill_color = color;
    }

    /// Set the green palette slot.
    pub fn set_green_fill_color(&mut self, color: SerializableColor) {
        self.green_fill_color = color;
    }

    pub fn toggle_snap_to_endpoints(&mut self) {
        self.snap_settings.snap_to_endpoints = !self.snap_settings.snap_to_endpoints;
    }

    pub fn toggle_snap_to_lines(&mut self) {
        self.snap_settings.snap_to_lines = !self.snap_settings.snap_to_lines;
    }

    pub fn toggle_snap_to_angle(&mut self) {
        self.snap_settings.snap_to_angle = !self.snap_settings.snap_to_angle;
    }

    pub fn toggle_snap_to_extensions(&mut self) {
        self.snap_settings.snap_to_extensions = !self.snap_settings.snap_to_extensions;
    }

    /// Delete the selected shape. Returns whether one was removed.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selected_shape.take() else {
            return false;
        };
        self.state = SessionState::Idle;
        self.document.delete_shape(id)
    }

    /// Remove every shape and reset the interaction.
    pub fn clear_all(&mut self) {
        self.document.clear();
        self.selected_shape = None;
        self.state = SessionState::Idle;
        self.extension_guide = None;
    }

    /// Feed a pointer event into the session.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        self.input.handle_pointer_event(event);
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => self.on_pointer_down(position),
            PointerEvent::Move { position } => self.on_pointer_move(position),
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } => self.on_pointer_up(position),
            _ => {}
        }
    }

    /// Feed a key press into the session.
    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Escape => self.abort_in_progress(),
            Key::Enter => self.commit_in_progress(),
        }
    }

    fn on_pointer_down(&mut self, position: Point) {
        match self.active_tool {
            ToolKind::Select => self.select_at(position),
            ToolKind::Wall => self.wall_click(position),
            ToolKind::WallPolygon => self.wall_polygon_click(position),
            ToolKind::Rectangle(_) => self.rectangle_click(position),
            ToolKind::Polygon(_) => self.polygon_click(position),
        }
    }

    fn on_pointer_move(&mut self, position: Point) {
        // Anchored wall drawing re-runs the snap chain every move; the
        // other gestures track the raw pointer.
        if matches!(
            self.state,
            SessionState::DrawingWall { .. } | SessionState::DrawingWallPolygon { .. }
        ) {
            let anchor = match &self.state {
                SessionState::DrawingWall { start, .. } => Some(*start),
                SessionState::DrawingWallPolygon { vertices, .. } => vertices.last().copied(),
                _ => None,
            };
            let result = self.resolve_snap(position, anchor);
            match &mut self.state {
                SessionState::DrawingWall { current, .. } => *current = result.point,
                SessionState::DrawingWallPolygon { cursor, .. } => *cursor = result.point,
                _ => {}
            }
            return;
        }

        match &mut self.state {
            SessionState::DraggingRectangle { current, .. }
            | SessionState::PlacingRectangle { current, .. } => *current = position,
            SessionState::DrawingPolygon { cursor, .. } => *cursor = position,
            SessionState::DraggingShape { id, last } => {
                let id = *id;
                let delta = position - *last;
                *last = position;
                self.document.translate_shape(id, delta);
            }
            _ => {}
        }
    }

    fn on_pointer_up(&mut self, position: Point) {
        match &self.state {
            SessionState::DraggingRectangle { start, .. } => {
                let start = *start;
                if self.input.moved_since_press {
                    if let ToolKind::Rectangle(kind) = self.active_tool {
                        let fill = self.fill(kind);
                        self.document.commit_rectangle(start, position, fill);
                    }
                }
                self.state = SessionState::Idle;
            }
            SessionState::DraggingShape { .. } => {
                self.state = SessionState::Idle;
            }
            _ => {}
        }
    }

    fn select_at(&mut self, position: Point) {
        match hit::shape_at_point(self.document.shapes(), position) {
            Some(id) => {
                self.selected_shape = Some(id);
                self.state = SessionState::DraggingShape { id, last: position };
            }
            None => {
                self.selected_shape = None;
                self.state = SessionState::Idle;
            }
        }
    }

    fn wall_click(&mut self, position: Point) {
        let started = match &self.state {
            SessionState::DrawingWall { start, .. } => Some(*start),
            _ => None,
        };
        match started {
            Some(start) => {
                let result = self.resolve_snap(position, Some(start));
                self.document.commit_line(start, result.point);
                self.state = SessionState::Idle;
                self.extension_guide = None;
            }
            None => {
                let result = self.resolve_snap(position, None);
                self.state = SessionState::DrawingWall {
                    start: result.point,
                    current: result.point,
                };
            }
        }
    }

    fn wall_polygon_click(&mut self, position: Point) {
        let anchor = match &self.state {
            SessionState::DrawingWallPolygon { vertices, .. } => vertices.last().copied(),
            _ => None,
        };
        let result = self.resolve_snap(position, anchor);
        let point = result.point;

        let SessionState::DrawingWallPolygon { vertices, cursor } = &mut self.state else {
            self.state = SessionState::DrawingWallPolygon {
                vertices: vec![point],
                cursor: point,
            };
            return;
        };
        *cursor = point;

        // Clicking back onto the first vertex closes the run; the snapped
        // closing vertex is appended so the final wall gets committed too.
        let closes = vertices.len() >= 3 && point.distance(vertices[0]) < CLOSE_DISTANCE;
        vertices.push(point);
        if closes {
            let run = std::mem::take(vertices);
            self.document.commit_wall_polygon(&run);
            self.state = SessionState::Idle;
        }
        // The guide belongs to the segment that just ended.
        self.extension_guide = None;
    }

    fn rectangle_click(&mut self, position: Point) {
        match self.rectangle_mode {
            RectangleMode::Drag => {
                self.state = SessionState::DraggingRectangle {
                    start: position,
                    current: position,
                };
            }
            RectangleMode::Click => {
                let placed = match &self.state {
                    SessionState::PlacingRectangle { start, .. } => Some(*start),
                    _ => None,
                };
                match placed {
                    Some(start) => {
                        if let ToolKind::Rectangle(kind) = self.active_tool {
                            let fill = self.fill(kind);
                            self.document.commit_rectangle(start, position, fill);
                        }
                        self.state = SessionState::Idle;
                    }
                    None => {
                        self.state = SessionState::PlacingRectangle {
                            start: position,
                            current: position,
                        };
                    }
                }
            }
        }
    }

    fn polygon_click(&mut self, position: Point) {
        let fill = match self.active_tool {
            ToolKind::Polygon(kind) => self.fill(kind),
            _ => return,
        };
        let SessionState::DrawingPolygon { vertices, cursor } = &mut self.state else {
            self.state = SessionState::DrawingPolygon {
                vertices: vec![position],
                cursor: position,
            };
            return;
        };
        *cursor = position;

        // Closing click: the ring closes implicitly, so the click near the
        // first vertex is not appended.
        if vertices.len() >= 3 && position.distance(vertices[0]) < CLOSE_DISTANCE {
            let ring = std::mem::take(vertices);
            self.document.commit_polygon(ring, fill);
            self.state = SessionState::Idle;
        } else {
            vertices.push(position);
        }
    }

    fn abort_in_progress(&mut self) {
        self.state = SessionState::Idle;
        self.extension_guide = None;
    }

    fn commit_in_progress(&mut self) {
        match std::mem::take(&mut self.state) {
            SessionState::DrawingWallPolygon { vertices, .. } => {
                self.document.commit_wall_polygon(&vertices);
                self.extension_guide = None;
            }
            SessionState::DrawingPolygon { vertices, .. } => {
                if let ToolKind::Polygon(kind) = self.active_tool {
                    let fill = self.fill(kind);
                    self.document.commit_polygon(vertices, fill);
                }
            }
            other => self.state = other,
        }
    }

    fn fill(&self, kind: FillKind) -> SerializableColor {
        match kind {
            FillKind::Yellow => self.fill_color,
            FillKind::Green => self.green_fill_color,
        }
    }

    /// Run the snap chain against the committed shapes plus the synthetic
    /// walls of the in-progress wall-polygon run, and remember the guide.
    fn resolve_snap(&mut self, candidate: Point, anchor: Option<Point>) -> SnapResult {
        let shapes = self.snap_shapes();
        let result = snap::resolve(candidate, anchor, &shapes, false, &self.snap_settings);
        self.extension_guide = result.extension;
        result
    }

    fn snap_shapes(&self) -> Vec<Shape> {
        let mut shapes = self.document.shapes().to_vec();
        if let SessionState::DrawingWallPolygon { vertices, .. } = &self.state {
            for pair in vertices.windows(2) {
                if pair[0] != pair[1] {
                    shapes.push(Shape::Line(Line::new(pair[0], pair[1])));
                }
            }
        }
        shapes
    }
}
