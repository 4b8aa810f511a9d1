//! Renderer trait abstraction.

use kurbo::Size;
use peniko::Color;
use plandraft_core::session::DrawingSession;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The session to render.
    pub session: &'a DrawingSession,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Background color.
    pub background_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Mark the start point of the active gesture.
    pub show_start_markers: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(session: &'a DrawingSession, viewport_size: Size) -> Self {
        Self {
            session,
            viewport_size,
            background_color: Color::WHITE,
            selection_color: Color::from_rgba8(0, 0, 255, 255), // Blue
            show_start_markers: false,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the selection highlight color.
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    /// Enable start-point markers.
    pub fn with_start_markers(mut self, show: bool) -> Self {
        self.show_start_markers = show;
        self
    }
}

/// Trait for rendering backends.
///
/// Implementations can target Vello, a CPU rasterizer, or a vector export
/// format.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing
    /// commands.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
