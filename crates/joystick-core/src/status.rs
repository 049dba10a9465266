//! Output record handed to consumers on every stick update.

use crate::direction::CardinalDirection;
use serde::{Deserialize, Serialize};

/// Snapshot of the stick as seen by a consumer.
///
/// Each widget owns its own status; the record is passed to the update
/// callback by value so consumers never observe later mutation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickStatus {
    /// Surface-local x of the stick center.
    pub x_position: f64,
    /// Surface-local y of the stick center.
    pub y_position: f64,
    /// Normalized horizontal offset in [-100, 100].
    pub x: i32,
    /// Normalized vertical offset in [-100, 100], positive is up.
    pub y: i32,
    pub cardinal_direction: CardinalDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let status = StickStatus {
            x_position: 150.0,
            y_position: 100.0,
            x: 100,
            y: 0,
            cardinal_direction: CardinalDirection::E,
        };
        let value = serde_json::to_value(status).unwrap();
        assert_eq!(value["xPosition"], 150.0);
        assert_eq!(value["yPosition"], 100.0);
        assert_eq!(value["x"], 100);
        assert_eq!(value["y"], 0);
        assert_eq!(value["cardinalDirection"], "E");
    }

    #[test]
    fn test_default_is_centered() {
        let status = StickStatus::default();
        assert_eq!(status.x, 0);
        assert_eq!(status.y, 0);
        assert_eq!(status.cardinal_direction, CardinalDirection::C);
    }
}
