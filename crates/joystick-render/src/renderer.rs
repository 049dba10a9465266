//! Renderer-side helpers shared by every backend.

use joystick_core::{DrawCommand, Surface};
use kurbo::Affine;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Placement of the joystick surface inside a larger scene.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    /// Transform from surface-local coordinates to scene coordinates.
    pub transform: Affine,
    /// Color painted over the surface area on every clear, if any.
    pub background_color: Option<Color>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            background_color: None,
        }
    }
}

impl RenderContext {
    /// Create a context drawing at the scene origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the surface-to-scene transform.
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }
}

/// Replay a recorded frame onto another surface, clearing it first.
pub fn replay<S: Surface>(target: &mut S, commands: &[DrawCommand]) {
    target.clear();
    for command in commands {
        match command {
            DrawCommand::Stroke { circle, style } => target.stroke_circle(*circle, style),
            DrawCommand::Fill { circle, gradient } => target.fill_circle(*circle, gradient),
        }
    }
}
