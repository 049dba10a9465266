//! Input events and input sources for mouse/touch engagement.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Which device family drives the widget. Fixed for the widget's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputModality {
    Touch,
    Mouse,
}

/// Input event in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer pressed or touch started on the surface.
    Press,
    /// Pointer or touch moved anywhere in the document.
    Move {
        position: Point,
        /// Whether the active contact targets the surface. Only consulted
        /// for touch input.
        on_surface: bool,
    },
    /// Pointer released or touch ended anywhere in the document.
    Release,
}

/// Strategy delivering [`InputEvent`]s to a widget.
///
/// A source is selected once at construction. Sources bound to a host
/// (DOM listeners, for example) queue events and release their bindings in
/// [`InputSource::detach`].
pub trait InputSource {
    /// Modality this source produces.
    fn modality(&self) -> InputModality;

    /// Next pending event, if any.
    fn poll(&mut self) -> Option<InputEvent>;

    /// Release every host binding. Further events are not delivered.
    fn detach(&mut self);

    /// Whether the source is still bound.
    fn is_attached(&self) -> bool;
}

/// Translate raw page coordinates into surface-local coordinates.
///
/// `surface_offset` is the surface's offset from its nearest positioned
/// ancestor (or from the document body).
pub fn to_surface_local(page: Point, surface_offset: Vec2) -> Point {
    page - surface_offset
}

#[derive(Debug)]
struct FakeInputInner {
    queue: VecDeque<InputEvent>,
    attached: bool,
    detach_count: usize,
}

/// Scripted input source emitting synthetic press/move/release events.
///
/// Clones share the same queue, so a test can keep one handle while the
/// widget owns another.
#[derive(Debug, Clone)]
pub struct FakeInputSource {
    modality: InputModality,
    inner: Rc<RefCell<FakeInputInner>>,
}

impl FakeInputSource {
    /// Create an attached source with an empty queue.
    pub fn new(modality: InputModality) -> Self {
        Self {
            modality,
            inner: Rc::new(RefCell::new(FakeInputInner {
                queue: VecDeque::new(),
                attached: true,
                detach_count: 0,
            })),
        }
    }

    /// Shorthand for a mouse source.
    pub fn mouse() -> Self {
        Self::new(InputModality::Mouse)
    }

    /// Shorthand for a touch source.
    pub fn touch() -> Self {
        Self::new(InputModality::Touch)
    }

    /// Queue an arbitrary event. Ignored once detached.
    pub fn push(&self, event: InputEvent) {
        let mut inner = self.inner.borrow_mut();
        if inner.attached {
            inner.queue.push_back(event);
        }
    }

    /// Queue an engagement start.
    pub fn press(&self) {
        self.push(InputEvent::Press);
    }

    /// Queue a move whose contact targets the surface.
    pub fn move_to(&self, x: f64, y: f64) {
        self.push(InputEvent::Move {
            position: Point::new(x, y),
            on_surface: true,
        });
    }

    /// Queue a move whose contact targets another element.
    pub fn move_elsewhere(&self, x: f64, y: f64) {
        self.push(InputEvent::Move {
            position: Point::new(x, y),
            on_surface: false,
        });
    }

    /// Queue an engagement end.
    pub fn release(&self) {
        self.push(InputEvent::Release);
    }

    /// Queue a press, a move to the given point and nothing else.
    pub fn drag_to(&self, x: f64, y: f64) {
        self.press();
        self.move_to(x, y);
    }

    /// Number of events not yet delivered.
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// How many times `detach` was called.
    pub fn detach_count(&self) -> usize {
        self.inner.borrow().detach_count
    }
}

impl InputSource for FakeInputSource {
    fn modality(&self) -> InputModality {
        self.modality
    }

    fn poll(&mut self) -> Option<InputEvent> {
        self.inner.borrow_mut().queue.pop_front()
    }

    fn detach(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.attached = false;
        inner.detach_count += 1;
        inner.queue.clear();
    }

    fn is_attached(&self) -> bool {
        self.inner.borrow().attached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_source_fifo() {
        let handle = FakeInputSource::mouse();
        let mut source = handle.clone();

        handle.press();
        handle.move_to(10.0, 20.0);
        handle.release();
        assert_eq!(handle.pending(), 3);

        assert_eq!(source.poll(), Some(InputEvent::Press));
        assert_eq!(
            source.poll(),
            Some(InputEvent::Move {
                position: Point::new(10.0, 20.0),
                on_surface: true,
            })
        );
        assert_eq!(source.poll(), Some(InputEvent::Release));
        assert_eq!(source.poll(), None);
    }

    #[test]
    fn test_detach_drops_pending_and_future_events() {
        let handle = FakeInputSource::touch();
        let mut source = handle.clone();

        handle.press();
        source.detach();
        assert!(!source.is_attached());
        assert_eq!(source.poll(), None);

        handle.move_to(1.0, 1.0);
        assert_eq!(handle.pending(), 0);
        assert_eq!(handle.detach_count(), 1);
    }

    #[test]
    fn test_modality() {
        assert_eq!(FakeInputSource::touch().modality(), InputModality::Touch);
        assert_eq!(FakeInputSource::mouse().modality(), InputModality::Mouse);
    }

    #[test]
    fn test_to_surface_local() {
        let local = to_surface_local(Point::new(250.0, 180.0), Vec2::new(100.0, 80.0));
        assert_eq!(local, Point::new(150.0, 100.0));
    }
}
