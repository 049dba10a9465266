//! Joystick application layer.
//!
//! Hosts the browser binding (wasm32) and the scripted native demo.

pub mod css;
pub mod demo;
pub mod relay;

pub use demo::{DEMO_CONFIG, run_demo};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{CanvasSurface, DomInputSource, JoyStick, run_wasm};
