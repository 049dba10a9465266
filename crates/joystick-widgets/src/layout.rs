//! Layout helpers: section labels and the status readout.

use egui::{Color32, Stroke, Ui};
use joystick_core::StickStatus;

use crate::theme;

/// Draw a horizontal separator line.
pub fn separator(ui: &mut Ui) {
    let rect = ui.available_rect_before_wrap();
    let y = rect.top() + 4.0;
    ui.painter().line_segment(
        [
            egui::Pos2::new(rect.left(), y),
            egui::Pos2::new(rect.right(), y),
        ],
        Stroke::new(1.0, Color32::from_gray(230)),
    );
    ui.add_space(8.0);
}

/// Draw a section label (small, muted text).
pub fn section_label(ui: &mut Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .size(10.0)
            .color(theme::TEXT_MUTED),
    );
}

/// Rows shown by [`status_readout`], label then value.
pub fn status_rows(status: &StickStatus) -> [(&'static str, String); 5] {
    [
        ("PosX", format!("{}", status.x_position)),
        ("PosY", format!("{}", status.y_position)),
        ("Direction", status.cardinal_direction.to_string()),
        ("X", status.x.to_string()),
        ("Y", status.y.to_string()),
    ]
}

/// Mirror a status into labelled fields.
pub fn status_readout(ui: &mut Ui, status: &StickStatus) {
    section_label(ui, "Stick");
    egui::Grid::new("joystick_status").num_columns(2).show(ui, |ui| {
        for (label, value) in status_rows(status) {
            ui.label(egui::RichText::new(label).color(theme::TEXT_MUTED));
            ui.label(egui::RichText::new(value).color(theme::TEXT).monospace());
            ui.end_row();
        }
    });
    separator(ui);
}

#[cfg(test)]
mod tests {
    use super::*;
    use joystick_core::CardinalDirection;

    #[test]
    fn test_status_rows() {
        let status = StickStatus {
            x_position: 150.0,
            y_position: 100.0,
            x: 100,
            y: 0,
            cardinal_direction: CardinalDirection::E,
        };
        let rows = status_rows(&status);
        assert_eq!(rows[0], ("PosX", "150".to_string()));
        assert_eq!(rows[2], ("Direction", "E".to_string()));
        assert_eq!(rows[3], ("X", "100".to_string()));
        assert_eq!(rows[4], ("Y", "0".to_string()));
    }
}
