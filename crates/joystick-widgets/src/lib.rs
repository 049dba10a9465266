//! egui integration for the virtual joystick.
//!
//! - **Pad**: [`JoystickView`], an interactive pad driving a `StickWidget`
//! - **Paint**: replaying recorded joystick frames on an egui painter
//! - **Layout**: section labels and a status readout

pub mod layout;
pub mod pad;
pub mod paint;

pub use layout::{section_label, separator, status_readout, status_rows};
pub use pad::{DEFAULT_PAD_SIZE, EguiInput, JoystickView, pointer_to_local};
pub use paint::{GRADIENT_STEPS, GradientRing, gradient_rings, paint_commands, to_color32, to_pos2};

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
}
