//! PlanDraft Core Library
//!
//! Platform-agnostic data model and interaction logic for the PlanDraft
//! floor-plan editor.

pub mod document;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod session;
pub mod shapes;
pub mod snap;

pub use document::{DocumentError, PlanDocument};
pub use hit::{shape_at_point, LINE_HIT_TOLERANCE};
pub use input::{InputState, Key, MouseButton, PointerEvent};
pub use session::{
    DrawingSession, FillKind, RectangleMode, SessionState, ToolKind, CLOSE_DISTANCE,
};
pub use shapes::{
    Line, Polygon, Rectangle, SerializableColor, Shape, ShapeId, ShapeTrait, GREEN_FILL_COLOR,
    WALL_BORDER_COLOR, WALL_BORDER_WIDTH, WALL_FILL_COLOR, WALL_FILL_WIDTH, YELLOW_FILL_COLOR,
};
pub use snap::{
    resolve, ExtensionLine, SnapResult, SnapSettings, EXTENSION_THRESHOLD, SNAP_DISTANCE,
};
