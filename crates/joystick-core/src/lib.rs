//! Joystick Core Library
//!
//! Platform-agnostic state, geometry and input handling for an on-screen
//! virtual joystick. Rendering goes through the [`Surface`] trait and input
//! arrives through an [`InputSource`] strategy.

pub mod config;
pub mod direction;
pub mod error;
pub mod geometry;
pub mod input;
pub mod status;
pub mod surface;
pub mod widget;

pub use config::{ConfigError, JoystickConfig, JoystickParams};
pub use direction::CardinalDirection;
pub use error::{JoystickError, JoystickResult};
pub use geometry::{Geometry, GeometryError};
pub use input::{FakeInputSource, InputEvent, InputModality, InputSource, to_surface_local};
pub use status::StickStatus;
pub use surface::{DrawCommand, GradientStop, RadialGradient, RecordingSurface, StrokeStyle, Surface};
pub use widget::{StickWidget, UpdateCallback};
