//! Vello-based surface implementation.

use crate::renderer::{RenderContext, RenderResult, RendererError};
use joystick_core::{RadialGradient, StrokeStyle, Surface};
use kurbo::{Circle, Rect, Size, Stroke};
use peniko::{ColorStop, Fill, Gradient};
use vello::Scene;

/// Joystick surface that records into a Vello scene.
///
/// `clear` resets the scene, so after each update the scene holds exactly
/// one frame of the joystick.
pub struct VelloSurface {
    /// The Vello scene being built.
    scene: Scene,
    size: Size,
    ctx: RenderContext,
}

impl VelloSurface {
    /// Create a surface of the given size drawing at the scene origin.
    pub fn new(size: Size) -> RenderResult<Self> {
        Self::with_context(size, RenderContext::default())
    }

    /// Create a surface with an explicit placement.
    pub fn with_context(size: Size, ctx: RenderContext) -> RenderResult<Self> {
        if !(size.width.is_finite() && size.height.is_finite()) || size.width <= 0.0 || size.height <= 0.0 {
            return Err(RendererError::Surface(format!(
                "invalid surface size {}x{}",
                size.width, size.height
            )));
        }
        log::debug!("Vello joystick surface {}x{}", size.width, size.height);
        Ok(Self {
            scene: Scene::new(),
            size,
            ctx,
        })
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }
}

impl Surface for VelloSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.scene.reset();
        if let Some(background) = self.ctx.background_color {
            let rect = Rect::from_origin_size((0.0, 0.0), self.size);
            self.scene.fill(Fill::NonZero, self.ctx.transform, background, None, &rect);
        }
    }

    fn stroke_circle(&mut self, circle: Circle, style: &StrokeStyle) {
        let stroke = Stroke::new(style.width);
        self.scene.stroke(&stroke, self.ctx.transform, style.color, None, &circle);
    }

    fn fill_circle(&mut self, circle: Circle, gradient: &RadialGradient) {
        let stops: Vec<ColorStop> = gradient
            .stops
            .iter()
            .map(|stop| ColorStop::from((stop.offset, stop.color)))
            .collect();
        let brush = Gradient::new_two_point_radial(
            gradient.start_center,
            gradient.start_radius as f32,
            gradient.end_center,
            gradient.end_radius as f32,
        )
        .with_stops(stops.as_slice());
        self.scene.fill(Fill::NonZero, self.ctx.transform, &brush, None, &circle);
    }
}
