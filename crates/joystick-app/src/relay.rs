//! Raising update-callback failures once the widget is free again.
//!
//! The callback runs while the host holds the widget mutably, so a failure
//! cannot be raised from inside it. It is parked in a [`CallbackFailure`] and
//! returned by [`drain`] after the pump completes.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use joystick_core::{StickWidget, Surface};

/// Shared slot holding the first error raised by the update callback.
#[derive(Debug)]
pub struct CallbackFailure<E> {
    slot: Rc<RefCell<Option<E>>>,
}

impl<E> Clone for CallbackFailure<E> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<E> Default for CallbackFailure<E> {
    fn default() -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
        }
    }
}

impl<E> CallbackFailure<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park `error` unless an earlier one is still waiting.
    pub fn record(&self, error: E) {
        let mut slot = self.slot.borrow_mut();
        if slot.is_none() {
            *slot = Some(error);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Hand back the parked error and clear the slot.
    pub fn take(&self) -> Result<(), E> {
        match self.slot.borrow_mut().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Pump every queued event, run a dispose requested during the pump, then
/// raise the first callback failure.
pub fn drain<S: Surface, E>(
    widget: &mut StickWidget<S>,
    failure: &CallbackFailure<E>,
    dispose_requested: &Cell<bool>,
) -> Result<usize, E> {
    let handled = widget.pump();
    if dispose_requested.get() {
        widget.dispose();
    }
    failure.take()?;
    Ok(handled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use joystick_core::{
        CardinalDirection, FakeInputSource, JoystickConfig, RecordingSurface, StickStatus,
    };
    use kurbo::Size;

    fn failing_widget(
        input: &FakeInputSource,
        failure: &CallbackFailure<String>,
    ) -> StickWidget<RecordingSurface> {
        let sink = failure.clone();
        let mut calls = 0;
        StickWidget::new(
            RecordingSurface::new(Size::new(200.0, 200.0)),
            JoystickConfig::default(),
            Box::new(input.clone()),
            Some(Box::new(move |status: StickStatus| {
                calls += 1;
                sink.record(format!("update {} at {}", calls, status.cardinal_direction));
            })),
        )
        .unwrap()
    }

    #[test]
    fn test_first_failure_raised_after_pump() {
        let input = FakeInputSource::mouse();
        let failure = CallbackFailure::new();
        let mut widget = failing_widget(&input, &failure);

        input.drag_to(150.0, 100.0);
        input.release();
        let result = drain(&mut widget, &failure, &Cell::new(false));

        assert_eq!(result, Err("update 1 at E".to_string()));
        // Every queued event was still handled
        assert_eq!(input.pending(), 0);
        assert_eq!(widget.status().cardinal_direction, CardinalDirection::C);
        assert!(!failure.is_pending());
    }

    #[test]
    fn test_clean_pump_reports_handled_count() {
        let input = FakeInputSource::mouse();
        let failure: CallbackFailure<String> = CallbackFailure::new();
        let mut widget = StickWidget::new(
            RecordingSurface::new(Size::new(200.0, 200.0)),
            JoystickConfig::default(),
            Box::new(input.clone()),
            None,
        )
        .unwrap();

        input.drag_to(100.0, 60.0);
        assert_eq!(drain(&mut widget, &failure, &Cell::new(false)), Ok(2));
        assert_eq!(widget.direction(), CardinalDirection::N);
    }

    #[test]
    fn test_deferred_dispose_runs_before_raising() {
        let input = FakeInputSource::mouse();
        let failure = CallbackFailure::new();
        let mut widget = failing_widget(&input, &failure);

        input.drag_to(60.0, 100.0);
        let result = drain(&mut widget, &failure, &Cell::new(true));

        assert!(result.is_err());
        assert!(widget.is_disposed());
        assert_eq!(input.detach_count(), 1);
    }
}
