//! Interactive joystick pad for egui.

use egui::{Pos2, Response, Sense, Ui, vec2};
use joystick_core::{
    InputEvent, InputModality, InputSource, JoystickConfig, JoystickResult, RecordingSurface,
    StickStatus, StickWidget, UpdateCallback,
};
use kurbo::{Point, Size};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::paint::paint_commands;

/// Default pad size when the configuration leaves it open.
pub const DEFAULT_PAD_SIZE: f64 = 200.0;

#[derive(Debug, Default)]
struct EguiInputState {
    queue: VecDeque<InputEvent>,
    detached: bool,
}

/// Input source fed from egui pointer responses.
///
/// egui reports mouse and touch through the same pointer, so the modality is
/// always [`InputModality::Mouse`]. Pointer capture keeps drags alive
/// outside the pad, matching document-wide move tracking.
#[derive(Debug, Clone, Default)]
pub struct EguiInput {
    state: Rc<RefCell<EguiInputState>>,
}

impl EguiInput {
    fn push(&self, event: InputEvent) {
        let mut state = self.state.borrow_mut();
        if state.detached {
            log::trace!("Dropping {:?} on detached pad", event);
            return;
        }
        state.queue.push_back(event);
    }

    /// Translate one frame of pointer interaction on `rect_min`-anchored pad.
    fn feed(&self, response: &Response, rect_min: Pos2) {
        if response.drag_started() {
            self.push(InputEvent::Press);
        }
        if response.dragged() {
            if let Some(pointer) = response.interact_pointer_pos() {
                self.push(InputEvent::Move {
                    position: pointer_to_local(rect_min, pointer),
                    on_surface: true,
                });
            }
        }
        if response.drag_stopped() {
            self.push(InputEvent::Release);
        }
    }
}

impl InputSource for EguiInput {
    fn modality(&self) -> InputModality {
        InputModality::Mouse
    }

    fn poll(&mut self) -> Option<InputEvent> {
        self.state.borrow_mut().queue.pop_front()
    }

    fn detach(&mut self) {
        let mut state = self.state.borrow_mut();
        state.detached = true;
        state.queue.clear();
    }

    fn is_attached(&self) -> bool {
        !self.state.borrow().detached
    }
}

/// Convert a screen-space pointer position into pad-local coordinates.
pub fn pointer_to_local(rect_min: Pos2, pointer: Pos2) -> Point {
    Point::new((pointer.x - rect_min.x) as f64, (pointer.y - rect_min.y) as f64)
}

/// A joystick pad: owns the widget and paints it every frame.
pub struct JoystickView {
    widget: StickWidget<RecordingSurface>,
    input: EguiInput,
}

impl JoystickView {
    /// Build a pad. Without explicit dimensions the pad is
    /// [`DEFAULT_PAD_SIZE`] square.
    pub fn new(config: JoystickConfig, on_update: Option<UpdateCallback>) -> JoystickResult<Self> {
        let size = config.resolve_size(Size::new(DEFAULT_PAD_SIZE, DEFAULT_PAD_SIZE));
        let input = EguiInput::default();
        let widget = StickWidget::new(
            RecordingSurface::new(size),
            config,
            Box::new(input.clone()),
            on_update,
        )?;
        Ok(Self { widget, input })
    }

    /// Lay out the pad, apply this frame's pointer input and paint it.
    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let size = vec2(self.widget.width() as f32, self.widget.height() as f32);
        let (rect, response) = ui.allocate_exact_size(size, Sense::drag());

        self.input.feed(&response, rect.min);
        if self.widget.pump() > 0 {
            ui.ctx().request_repaint();
        }

        if ui.is_rect_visible(rect) {
            paint_commands(&ui.painter_at(rect), rect.min, self.widget.surface().commands());
        }
        response
    }

    /// Current status of the stick.
    pub fn status(&self) -> StickStatus {
        self.widget.status()
    }

    /// The wrapped widget.
    pub fn widget(&self) -> &StickWidget<RecordingSurface> {
        &self.widget
    }

    /// Stop reacting to input.
    pub fn dispose(&mut self) {
        self.widget.dispose();
    }
}
