//! The joystick widget: engagement state, stick position, rendering and
//! status reporting.

use kurbo::{Circle, Point, Size, Vec2};

use crate::config::JoystickConfig;
use crate::direction::CardinalDirection;
use crate::error::JoystickResult;
use crate::geometry::Geometry;
use crate::input::{InputEvent, InputModality, InputSource};
use crate::status::StickStatus;
use crate::surface::{GradientStop, RadialGradient, StrokeStyle, Surface};

/// Offset of the gradient focal point from the stick center.
const GRADIENT_FOCUS_OFFSET: Vec2 = Vec2::new(20.0, -20.0);
/// Radius of the gradient focal circle.
const GRADIENT_FOCUS_RADIUS: f64 = 5.0;
/// Radius of the gradient outer circle.
const GRADIENT_RADIUS: f64 = 75.0;

/// Consumer callback receiving every status update.
///
/// Runs synchronously inside event handling. A panic propagates to whoever
/// dispatched the event; the widget does not catch it, so the callback must
/// not be used for cancellation or retried work.
pub type UpdateCallback = Box<dyn FnMut(StickStatus)>;

/// On-screen virtual joystick.
///
/// Owns its surface and input source. Every position-changing event clears
/// the surface, redraws both circles and hands a fresh [`StickStatus`] to the
/// callback.
pub struct StickWidget<S: Surface> {
    config: JoystickConfig,
    geometry: Geometry,
    surface: S,
    input: Box<dyn InputSource>,
    on_update: Option<UpdateCallback>,
    pressed: bool,
    position: Point,
    disposed: bool,
}

impl<S: Surface> StickWidget<S> {
    /// Build a widget on `surface` and draw it at rest.
    ///
    /// Fails if the surface is too small to host a stick.
    pub fn new(
        surface: S,
        config: JoystickConfig,
        input: Box<dyn InputSource>,
        on_update: Option<UpdateCallback>,
    ) -> JoystickResult<Self> {
        let geometry = Geometry::new(surface.size())?;
        let position = geometry.center;
        let mut widget = Self {
            config,
            geometry,
            surface,
            input,
            on_update,
            pressed: false,
            position,
            disposed: false,
        };
        widget.redraw();

        log::info!(
            "Joystick '{}' ready: {}x{}, {:?} input",
            widget.config.title,
            widget.geometry.size.width,
            widget.geometry.size.height,
            widget.input.modality()
        );
        Ok(widget)
    }

    /// Process one input event.
    pub fn handle_event(&mut self, event: InputEvent) {
        if self.disposed {
            return;
        }
        match event {
            InputEvent::Press => {
                self.pressed = true;
                log::debug!("Joystick '{}' engaged", self.config.title);
            }
            InputEvent::Move { position, on_surface } => {
                if !self.pressed {
                    return;
                }
                if self.input.modality() == InputModality::Touch && !on_surface {
                    return;
                }
                self.position = self.geometry.clamp(position);
                self.update();
            }
            InputEvent::Release => {
                self.pressed = false;
                if self.config.auto_return_to_center {
                    self.position = self.geometry.center;
                }
                log::debug!("Joystick '{}' released", self.config.title);
                self.update();
            }
        }
    }

    /// Drain the input source, returning the number of events handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while !self.disposed {
            let Some(event) = self.input.poll() else {
                break;
            };
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Release input bindings and the callback. The widget ignores all
    /// further input. Calling it again does nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.input.detach();
        self.on_update = None;
        self.pressed = false;
        self.disposed = true;
        log::info!("Joystick '{}' disposed", self.config.title);
    }

    fn update(&mut self) {
        self.redraw();
        let status = self.status();
        if let Some(callback) = self.on_update.as_mut() {
            callback(status);
        }
    }

    fn redraw(&mut self) {
        self.surface.clear();
        self.draw_outer();
        self.draw_inner();
    }

    fn draw_outer(&mut self) {
        let circle = Circle::new(self.geometry.center, self.geometry.external_radius);
        let style = StrokeStyle::new(self.config.external_line_width, self.config.external_stroke_color);
        self.surface.stroke_circle(circle, &style);
    }

    fn draw_inner(&mut self) {
        // The stick must never be drawn partially off the surface
        self.position = self.geometry.clamp_to_surface(self.position);

        let circle = Circle::new(self.position, self.geometry.internal_radius);
        self.surface.fill_circle(circle, &self.stick_gradient());
        let style = StrokeStyle::new(self.config.internal_line_width, self.config.internal_stroke_color);
        self.surface.stroke_circle(circle, &style);
    }

    fn stick_gradient(&self) -> RadialGradient {
        let mut stops = Vec::with_capacity(self.config.gradient_stops.len() + 2);
        stops.push(GradientStop::new(0.0, self.config.internal_fill_color));
        stops.extend(self.config.gradient_stops.iter().copied());
        stops.push(GradientStop::new(1.0, self.config.internal_stroke_color));
        RadialGradient {
            start_center: self.position + GRADIENT_FOCUS_OFFSET,
            start_radius: GRADIENT_FOCUS_RADIUS,
            end_center: self.position,
            end_radius: GRADIENT_RADIUS,
            stops,
        }
    }


    /// Surface width.
    pub fn width(&self) -> f64 {
        self.geometry.size.width
    }

    /// Surface height.
    pub fn height(&self) -> f64 {
        self.geometry.size.height
    }

    /// Surface size.
    pub fn size(&self) -> Size {
        self.geometry.size
    }

    /// Stick center in surface-local coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn pos_x(&self) -> f64 {
        self.position.x
    }

    pub fn pos_y(&self) -> f64 {
        self.position.y
    }

    /// Normalized horizontal value in [-100, 100].
    pub fn x(&self) -> i32 {
        self.geometry.normalize(self.position).0
    }

    /// Normalized vertical value in [-100, 100], positive is up.
    pub fn y(&self) -> i32 {
        self.geometry.normalize(self.position).1
    }

    /// Current compass direction, recomputed from the position.
    pub fn direction(&self) -> CardinalDirection {
        self.geometry.direction(self.position)
    }

    /// Status of the stick at its current position.
    pub fn status(&self) -> StickStatus {
        let (x, y) = self.geometry.normalize(self.position);
        StickStatus {
            x_position: self.position.x,
            y_position: self.position.y,
            x,
            y,
            cardinal_direction: self.direction(),
        }
    }

    /// Whether a press is currently held.
    pub fn is_engaged(&self) -> bool {
        self.pressed
    }

    /// Whether `dispose` has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn modality(&self) -> InputModality {
        self.input.modality()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn config(&self) -> &JoystickConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: Surface> Drop for StickWidget<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
