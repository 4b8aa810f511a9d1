//! PlanDraft Render Library
//!
//! Renderer abstraction and the multi-pass plan compositor for PlanDraft.
//! The compositor lowers a drawing session into a backend-agnostic command
//! list; replaying it against a surface is the platform layer's job.

mod plan_impl;
mod renderer;
mod scene;

pub use plan_impl::PlanRenderer;
pub use renderer::{RenderContext, Renderer};
pub use scene::{DrawCommand, Scene};
