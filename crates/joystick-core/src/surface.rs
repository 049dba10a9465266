//! Drawing surface abstraction.
//!
//! The widget only ever clears the surface, strokes circles and fills
//! circles with a radial gradient. Backends (canvas 2D, Vello, egui) implement
//! [`Surface`]; [`RecordingSurface`] keeps the commands of the current frame.

use kurbo::{Circle, Point, Size};
use peniko::Color;

/// Stroke parameters for a circle outline.
#[derive(Debug, Clone, Copy)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: Color,
}

impl StrokeStyle {
    pub fn new(width: f64, color: Color) -> Self {
        Self { width, color }
    }
}

/// A color stop of a gradient, offset in [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Two-point radial gradient, as understood by canvas 2D and peniko.
#[derive(Debug, Clone)]
pub struct RadialGradient {
    /// Focal circle center.
    pub start_center: Point,
    pub start_radius: f64,
    /// Outer circle center.
    pub end_center: Point,
    pub end_radius: f64,
    /// Stops in ascending offset order.
    pub stops: Vec<GradientStop>,
}

impl RadialGradient {
    /// Color at parameter `t` along the gradient, interpolated linearly
    /// between the surrounding stops and clamped to the end stops.
    pub fn color_at(&self, t: f32) -> Color {
        let Some(first) = self.stops.first() else {
            return Color::TRANSPARENT;
        };
        if t <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                if span <= f32::EPSILON {
                    return b.color;
                }
                return lerp_color(a.color, b.color, (t - a.offset) / span);
            }
        }
        self.stops.last().map_or(first.color, |s| s.color)
    }
}

fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let mut components = [0.0f32; 4];
    for (i, c) in components.iter_mut().enumerate() {
        *c = a.components[i] + (b.components[i] - a.components[i]) * t;
    }
    Color::new(components)
}

/// A drawing target for the joystick.
pub trait Surface {
    /// Surface size in surface-local units.
    fn size(&self) -> Size;

    /// Erase the whole surface.
    fn clear(&mut self);

    /// Outline a circle.
    fn stroke_circle(&mut self, circle: Circle, style: &StrokeStyle);

    /// Fill a circle with a radial gradient.
    fn fill_circle(&mut self, circle: Circle, gradient: &RadialGradient);
}

/// A recorded drawing operation.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Stroke { circle: Circle, style: StrokeStyle },
    Fill { circle: Circle, gradient: RadialGradient },
}

impl DrawCommand {
    /// The circle the command draws.
    pub fn circle(&self) -> Circle {
        match self {
            DrawCommand::Stroke { circle, .. } | DrawCommand::Fill { circle, .. } => *circle,
        }
    }
}

/// Surface that records the commands drawn since the last clear.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
    clears: usize,
}

impl RecordingSurface {
    /// Create an empty recording surface.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
            clears: 0,
        }
    }

    /// Commands of the current frame, in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of times the surface has been cleared.
    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn stroke_circle(&mut self, circle: Circle, style: &StrokeStyle) {
        self.commands.push(DrawCommand::Stroke { circle, style: *style });
    }

    fn fill_circle(&mut self, circle: Circle, gradient: &RadialGradient) {
        self.commands.push(DrawCommand::Fill {
            circle,
            gradient: gradient.clone(),
        });
    }
}
