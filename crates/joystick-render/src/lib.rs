//! Joystick Render Library
//!
//! Rendering backends for the joystick widget.
//! The default implementation records into a Vello scene for GPU rendering.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{RenderContext, RenderResult, RendererError, replay};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloSurface;
