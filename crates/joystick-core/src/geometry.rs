//! Fixed measurements derived from the surface size.

use kurbo::{Point, Size, Vec2};
use thiserror::Error;

use crate::direction::CardinalDirection;

/// Gap between the stick edge and half the surface width.
const INTERNAL_MARGIN: f64 = 10.0;
/// Extra travel allowed beyond the stick radius.
const TRAVEL_MARGIN: f64 = 5.0;
/// Outer ring radius beyond the stick radius.
const EXTERNAL_MARGIN: f64 = 30.0;
/// Direction thresholds as a fraction of the surface size.
const DIRECTION_THRESHOLD_FRACTION: f64 = 0.1;

/// Geometry errors.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
}

/// Derived widget geometry. Computed once, immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Surface size the geometry was derived from.
    pub size: Size,
    /// Surface center, the stick rest position.
    pub center: Point,
    /// Radius of the stick.
    pub internal_radius: f64,
    /// Radius of the outer ring.
    pub external_radius: f64,
    /// Maximum distance the stick center may travel from `center`.
    pub max_move_stick: f64,
    /// Horizontal half-width of the dead band.
    pub horizontal_limit: f64,
    /// Vertical half-height of the dead band.
    pub vertical_limit: f64,
}

impl Geometry {
    /// Derive geometry from a surface size.
    pub fn new(size: Size) -> Result<Self, GeometryError> {
        if !(size.width.is_finite() && size.height.is_finite()) || size.width <= 0.0 || size.height <= 0.0 {
            return Err(GeometryError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }

        let internal_radius = (size.width - (size.width / 2.0 + INTERNAL_MARGIN)) / 2.0;
        let max_move_stick = internal_radius + TRAVEL_MARGIN;
        // Surfaces 20 units wide or narrower leave no room for the stick
        if internal_radius <= 0.0 {
            return Err(GeometryError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }

        Ok(Self {
            size,
            center: Point::new(size.width / 2.0, size.height / 2.0),
            internal_radius,
            external_radius: internal_radius + EXTERNAL_MARGIN,
            max_move_stick,
            horizontal_limit: size.width * DIRECTION_THRESHOLD_FRACTION,
            vertical_limit: size.height * DIRECTION_THRESHOLD_FRACTION,
        })
    }

    /// Offset of a point from the center.
    pub fn offset(&self, point: Point) -> Vec2 {
        point - self.center
    }

    /// Pull a point back onto the travel circle if it lies outside it.
    pub fn clamp_travel(&self, point: Point) -> Point {
        let offset = self.offset(point);
        let distance = offset.hypot();
        if distance > self.max_move_stick {
            self.center + offset * (self.max_move_stick / distance)
        } else {
            point
        }
    }

    /// Keep the stick center far enough from the edges that it is drawn
    /// entirely inside the surface.
    ///
    /// The lower bound is applied before the upper bound, so on a surface
    /// too small to satisfy both the upper bound wins.
    pub fn clamp_to_surface(&self, point: Point) -> Point {
        let margin = self.max_move_stick;
        let mut x = point.x;
        let mut y = point.y;
        if x < margin {
            x = margin;
        }
        if x + margin > self.size.width {
            x = self.size.width - margin;
        }
        if y < margin {
            y = margin;
        }
        if y + margin > self.size.height {
            y = self.size.height - margin;
        }
        Point::new(x, y)
    }

    /// The single clamp applied to every stick position: travel radius first,
    /// then surface edges. The result is what gets stored, drawn and reported.
    pub fn clamp(&self, point: Point) -> Point {
        self.clamp_to_surface(self.clamp_travel(point))
    }

    /// Normalized offset in [-100, 100], y inverted so that up is positive.
    pub fn normalize(&self, point: Point) -> (i32, i32) {
        let offset = self.offset(point);
        let x = (100.0 * (offset.x / self.max_move_stick)).round();
        let y = (100.0 * (offset.y / self.max_move_stick)).round() * -1.0;
        (x as i32, y as i32)
    }

    /// Compass direction of a point relative to the center.
    pub fn direction(&self, point: Point) -> CardinalDirection {
        let offset = self.offset(point);
        CardinalDirection::classify(offset.x, offset.y, self.horizontal_limit, self.vertical_limit)
    }
}
