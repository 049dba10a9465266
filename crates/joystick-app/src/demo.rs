//! Scripted demo: drives a joystick with synthetic input and collects every
//! reported status.

use joystick_core::{
    FakeInputSource, JoystickConfig, JoystickResult, RecordingSurface, StickStatus, StickWidget,
};
use kurbo::{Size, Vec2};
use std::cell::RefCell;
use std::rc::Rc;

/// Options of the bundled demo page.
pub const DEMO_CONFIG: &str = include_str!("../assets/joy-config.json");

/// Container size used when the configuration does not set one.
pub const DEMO_CONTAINER: Size = Size::new(200.0, 200.0);

/// Compass points visited by the gesture, clockwise from east (y grows down).
const SWEEP_STEPS: usize = 8;

/// Press, sweep once around the ring past the travel limit, release.
pub fn queue_sweep(input: &FakeInputSource, center: kurbo::Point, reach: f64) {
    input.press();
    for step in 0..SWEEP_STEPS {
        let angle = step as f64 * std::f64::consts::TAU / SWEEP_STEPS as f64;
        let target = center + Vec2::from_angle(angle) * reach;
        input.move_to(target.x, target.y);
    }
    input.release();
}

/// Run the sweep gesture against a widget built from `config`.
pub fn run_demo(config: JoystickConfig) -> JoystickResult<Vec<StickStatus>> {
    let size = config.resolve_size(DEMO_CONTAINER);
    let statuses = Rc::new(RefCell::new(Vec::new()));
    let sink = statuses.clone();
    let input = FakeInputSource::mouse();

    let mut widget = StickWidget::new(
        RecordingSurface::new(size),
        config,
        Box::new(input.clone()),
        Some(Box::new(move |status| sink.borrow_mut().push(status))),
    )?;

    let geometry = *widget.geometry();
    queue_sweep(&input, geometry.center, geometry.max_move_stick * 1.5);
    let handled = widget.pump();
    log::debug!("Demo handled {} events", handled);
    widget.dispose();

    let collected = statuses.borrow().clone();
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use joystick_core::CardinalDirection;

    #[test]
    fn test_demo_config_parses() {
        let config = JoystickConfig::from_json(DEMO_CONFIG).unwrap();
        assert_eq!(config.title, "MainJoyStick");
        assert_eq!(config.gradient_stops.len(), 2);
    }

    #[test]
    fn test_sweep_visits_every_direction() {
        let config = JoystickConfig::from_json(DEMO_CONFIG).unwrap();
        let statuses = run_demo(config).unwrap();
        assert_eq!(statuses.len(), SWEEP_STEPS + 1);

        let directions: Vec<CardinalDirection> =
            statuses.iter().map(|s| s.cardinal_direction).collect();
        use CardinalDirection::*;
        assert_eq!(directions, vec![E, SE, S, SW, W, NW, N, NE, C]);

        // First step is pinned to the travel limit
        assert_eq!(statuses[0].x, 100);
        assert_eq!(statuses[0].y, 0);
        let last = statuses.last().unwrap();
        assert_eq!((last.x, last.y), (0, 0));
    }

    #[test]
    fn test_demo_without_auto_return_holds_last_point() {
        let config = JoystickConfig::default().with_auto_return(false);
        let statuses = run_demo(config).unwrap();
        let last = statuses[statuses.len() - 1];
        let before = statuses[statuses.len() - 2];
        assert_eq!(last, before);
        assert_eq!(last.cardinal_direction, CardinalDirection::NE);
    }
}
