//! WebAssembly entry point and browser binding.
//!
//! `new JoyStick(containerId, options, callback)` creates a `<canvas>` inside
//! the container and wires DOM mouse or touch listeners into a
//! [`StickWidget`].

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use joystick_core::{
    InputEvent, InputModality, InputSource, JoystickConfig, JoystickError, JoystickParams,
    JoystickResult, RadialGradient, StickStatus, StickWidget, StrokeStyle, Surface,
    to_surface_local,
};
use kurbo::{Circle, Point, Size, Vec2};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Event, EventTarget, HtmlCanvasElement, HtmlElement,
    MouseEvent, TouchEvent,
};

use crate::css::css_color;
use crate::relay::{CallbackFailure, drain};

/// Canvas 2D drawing surface.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap a canvas, acquiring its 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> JoystickResult<Self> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| JoystickError::SurfaceUnavailable("2d context".to_string()))?;
        Ok(Self { canvas, context })
    }

    fn trace_circle(&self, circle: Circle) -> bool {
        self.context.begin_path();
        match self.context.arc(
            circle.center.x,
            circle.center.y,
            circle.radius,
            0.0,
            std::f64::consts::TAU,
        ) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to trace circle: {:?}", e);
                false
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Size {
        Size::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) {
        let size = self.size();
        self.context.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn stroke_circle(&mut self, circle: Circle, style: &StrokeStyle) {
        if !self.trace_circle(circle) {
            return;
        }
        self.context.set_line_width(style.width);
        self.context.set_stroke_style_str(&css_color(style.color));
        self.context.stroke();
    }

    fn fill_circle(&mut self, circle: Circle, gradient: &RadialGradient) {
        if !self.trace_circle(circle) {
            return;
        }
        let brush = match self.context.create_radial_gradient(
            gradient.start_center.x,
            gradient.start_center.y,
            gradient.start_radius,
            gradient.end_center.x,
            gradient.end_center.y,
            gradient.end_radius,
        ) {
            Ok(brush) => brush,
            Err(e) => {
                log::warn!("Failed to create gradient: {:?}", e);
                return;
            }
        };
        for stop in &gradient.stops {
            if let Err(e) = brush.add_color_stop(stop.offset, &css_color(stop.color)) {
                log::warn!("Rejected gradient stop at {}: {:?}", stop.offset, e);
            }
        }
        self.context.set_fill_style_canvas_gradient(&brush);
        self.context.fill();
    }
}

/// Callback invoked after events are queued. An error it returns is thrown
/// to the event dispatcher.
type Waker = Rc<RefCell<Option<Rc<dyn Fn() -> Result<(), JsValue>>>>>;
type Handler = dyn FnMut(Event) -> Result<(), JsValue>;
type EventQueue = Rc<RefCell<VecDeque<InputEvent>>>;

/// A registered DOM listener.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<Handler>,
}

impl Listener {
    fn bind(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) -> Result<(), JsValue> + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<Handler>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    fn unbind(&self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to remove {} listener: {:?}", self.kind, e);
        }
    }
}

/// Whether the page advertises touch support.
fn detect_modality(document: &Document) -> InputModality {
    let touch = document
        .document_element()
        .map(|root| js_sys::Reflect::has(root.as_ref(), &JsValue::from_str("ontouchstart")).unwrap_or(false))
        .unwrap_or(false);
    if touch { InputModality::Touch } else { InputModality::Mouse }
}

/// Offset of the canvas from its positioned ancestor, or from the body when
/// the canvas sits directly in it.
fn surface_offset(canvas: &HtmlCanvasElement) -> Vec2 {
    let own = Vec2::new(canvas.offset_left() as f64, canvas.offset_top() as f64);
    match canvas.offset_parent() {
        Some(parent) if !parent.tag_name().eq_ignore_ascii_case("BODY") => parent
            .dyn_into::<HtmlElement>()
            .map(|p| Vec2::new(p.offset_left() as f64, p.offset_top() as f64))
            .unwrap_or(own),
        _ => own,
    }
}

fn mouse_move(canvas: &HtmlCanvasElement, event: Event) -> Option<InputEvent> {
    let event: MouseEvent = event.dyn_into().ok()?;
    let page = Point::new(event.page_x() as f64, event.page_y() as f64);
    Some(InputEvent::Move {
        position: to_surface_local(page, surface_offset(canvas)),
        on_surface: true,
    })
}

fn touch_move(canvas: &HtmlCanvasElement, event: Event) -> Option<InputEvent> {
    let event: TouchEvent = event.dyn_into().ok()?;
    let touch = event.target_touches().get(0)?;
    let canvas_value: &JsValue = canvas.as_ref();
    let on_surface = touch
        .target()
        .is_some_and(|target| AsRef::<JsValue>::as_ref(&target) == canvas_value);
    let page = Point::new(touch.page_x() as f64, touch.page_y() as f64);
    Some(InputEvent::Move {
        position: to_surface_local(page, surface_offset(canvas)),
        on_surface,
    })
}

fn deliver(queue: &EventQueue, waker: &Waker, event: InputEvent) -> Result<(), JsValue> {
    queue.borrow_mut().push_back(event);
    let wake = waker.borrow().clone();
    match wake {
        Some(wake) => wake(),
        None => Ok(()),
    }
}

/// Input source backed by DOM listeners.
///
/// Start events are bound on the canvas; move and end events on the whole
/// document so drags leaving the canvas keep tracking.
pub struct DomInputSource {
    modality: InputModality,
    queue: EventQueue,
    waker: Waker,
    listeners: Vec<Listener>,
    /// Unbound listeners whose closures may still be on the call stack.
    retired: Vec<Listener>,
}

impl DomInputSource {
    /// Bind listeners for the modality the page supports.
    pub fn attach(canvas: &HtmlCanvasElement, document: &Document) -> Result<Self, JsValue> {
        let modality = detect_modality(document);
        let (start, motion, end) = match modality {
            InputModality::Touch => ("touchstart", "touchmove", "touchend"),
            InputModality::Mouse => ("mousedown", "mousemove", "mouseup"),
        };

        let mut source = Self {
            modality,
            queue: Rc::new(RefCell::new(VecDeque::new())),
            waker: Rc::new(RefCell::new(None)),
            listeners: Vec::with_capacity(3),
            retired: Vec::new(),
        };

        let (queue, waker) = (source.queue.clone(), source.waker.clone());
        source.listeners.push(Listener::bind(canvas.as_ref(), start, move |_| {
            deliver(&queue, &waker, InputEvent::Press)
        })?);

        let (queue, waker) = (source.queue.clone(), source.waker.clone());
        let tracked = canvas.clone();
        source.listeners.push(Listener::bind(document.as_ref(), motion, move |event| {
            let translated = match modality {
                InputModality::Touch => touch_move(&tracked, event),
                InputModality::Mouse => mouse_move(&tracked, event),
            };
            match translated {
                Some(translated) => deliver(&queue, &waker, translated),
                None => Ok(()),
            }
        })?);

        let (queue, waker) = (source.queue.clone(), source.waker.clone());
        source.listeners.push(Listener::bind(document.as_ref(), end, move |_| {
            deliver(&queue, &waker, InputEvent::Release)
        })?);

        log::debug!("Bound {:?} listeners", modality);
        Ok(source)
    }

    /// Slot for the function that drains the queue into the widget.
    fn waker(&self) -> Waker {
        self.waker.clone()
    }
}

impl InputSource for DomInputSource {
    fn modality(&self) -> InputModality {
        self.modality
    }

    fn poll(&mut self) -> Option<InputEvent> {
        self.queue.borrow_mut().pop_front()
    }

    fn detach(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.unbind();
            self.retired.push(listener);
        }
        self.waker.borrow_mut().take();
        self.queue.borrow_mut().clear();
    }

    fn is_attached(&self) -> bool {
        !self.listeners.is_empty()
    }
}

impl Drop for DomInputSource {
    fn drop(&mut self) {
        self.detach();
    }
}

fn js_error(err: JoystickError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Browser joystick bound to a container element.
#[wasm_bindgen]
pub struct JoyStick {
    widget: Rc<RefCell<StickWidget<CanvasSurface>>>,
    /// Last reported status, read only while the widget is busy.
    status: Rc<Cell<StickStatus>>,
    dispose_requested: Rc<Cell<bool>>,
    width: f64,
    height: f64,
}

#[wasm_bindgen]
impl JoyStick {
    /// Create a joystick inside the element with id `container`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: &str,
        parameters: JsValue,
        callback: Option<js_sys::Function>,
    ) -> Result<JoyStick, JsValue> {
        let params: JoystickParams = if parameters.is_undefined() || parameters.is_null() {
            JoystickParams::default()
        } else {
            serde_wasm_bindgen::from_value(parameters)?
        };
        let config = JoystickConfig::from_params(params)
            .map_err(|e| js_error(e.into()))?;
        Self::build(container, config, callback).map_err(js_error)
    }

    fn build(
        container_id: &str,
        config: JoystickConfig,
        callback: Option<js_sys::Function>,
    ) -> JoystickResult<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JoystickError::SurfaceUnavailable("no document".to_string()))?;
        let container: HtmlElement = document
            .get_element_by_id(container_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| JoystickError::ContainerNotFound(container_id.to_string()))?;

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(|| JoystickError::SurfaceUnavailable("cannot create canvas".to_string()))?;
        canvas.set_id(&config.title);
        let size = config.resolve_size(Size::new(
            container.client_width() as f64,
            container.client_height() as f64,
        ));
        canvas.set_width(size.width as u32);
        canvas.set_height(size.height as u32);

        let surface = CanvasSurface::new(canvas.clone())?;
        let source = DomInputSource::attach(&canvas, &document)
            .map_err(|e| JoystickError::SurfaceUnavailable(format!("listener binding failed: {:?}", e)))?;
        let waker = source.waker();

        let status = Rc::new(Cell::new(StickStatus::default()));
        let reported = status.clone();
        let failure: CallbackFailure<JsValue> = CallbackFailure::new();
        let thrown = failure.clone();
        let on_update = Box::new(move |update: StickStatus| {
            reported.set(update);
            let Some(callback) = callback.as_ref() else {
                return;
            };
            let outcome = serde_wasm_bindgen::to_value(&update)
                .map_err(JsValue::from)
                .and_then(|value| callback.call1(&JsValue::NULL, &value));
            // Thrown from the listener once the widget is released
            if let Err(e) = outcome {
                thrown.record(e);
            }
        });

        let widget = StickWidget::new(surface, config, Box::new(source), Some(on_update))?;
        status.set(widget.status());
        let (width, height) = (widget.width(), widget.height());

        // Only touch the page once nothing else can fail
        container
            .append_child(&canvas)
            .map_err(|e| JoystickError::SurfaceUnavailable(format!("append failed: {:?}", e)))?;
        if let Err(e) = container.style().set_property("touch-action", "none") {
            log::warn!("Failed to disable touch gestures: {:?}", e);
        }

        let widget = Rc::new(RefCell::new(widget));
        let dispose_requested = Rc::new(Cell::new(false));
        let weak = Rc::downgrade(&widget);
        let pending_dispose = dispose_requested.clone();
        *waker.borrow_mut() = Some(Rc::new(move || {
            let Some(widget) = weak.upgrade() else {
                return Ok(());
            };
            // Already pumping: the running loop drains the new event
            let Ok(mut widget) = widget.try_borrow_mut() else {
                return Ok(());
            };
            drain(&mut *widget, &failure, &pending_dispose).map(|_| ())
        }));

        Ok(Self {
            widget,
            status,
            dispose_requested,
            width,
            height,
        })
    }

    #[wasm_bindgen(js_name = getWidth)]
    pub fn get_width(&self) -> f64 {
        self.width
    }

    #[wasm_bindgen(js_name = getHeight)]
    pub fn get_height(&self) -> f64 {
        self.height
    }

    /// Status recomputed from the widget, or the one being reported when
    /// called from inside the update callback.
    fn current(&self) -> StickStatus {
        match self.widget.try_borrow() {
            Ok(widget) => widget.status(),
            Err(_) => self.status.get(),
        }
    }

    #[wasm_bindgen(js_name = getPosX)]
    pub fn get_pos_x(&self) -> f64 {
        self.current().x_position
    }

    #[wasm_bindgen(js_name = getPosY)]
    pub fn get_pos_y(&self) -> f64 {
        self.current().y_position
    }

    #[wasm_bindgen(js_name = getX)]
    pub fn get_x(&self) -> i32 {
        self.current().x
    }

    #[wasm_bindgen(js_name = getY)]
    pub fn get_y(&self) -> i32 {
        self.current().y
    }

    #[wasm_bindgen(js_name = getDir)]
    pub fn get_dir(&self) -> String {
        self.current().cardinal_direction.to_string()
    }

    /// Current status as a plain object.
    #[wasm_bindgen(js_name = getStatus)]
    pub fn get_status(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.current())?)
    }

    /// Remove every listener; the joystick stops reacting to input.
    pub fn dispose(&self) {
        match self.widget.try_borrow_mut() {
            Ok(mut widget) => widget.dispose(),
            // Called from inside the update callback
            Err(_) => self.dispose_requested.set(true),
        }
    }
}

/// Initialize logging when the module loads.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Joystick module loaded");
}
