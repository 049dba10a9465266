//! Replaying recorded joystick frames on an egui painter.
//!
//! egui has no radial gradient brush, so gradient fills are approximated by
//! concentric filled circles sampled from the gradient.

use egui::{Color32, Painter, Pos2, Stroke, pos2};
use joystick_core::{DrawCommand, RadialGradient};
use kurbo::{Circle, Point};
use peniko::Color;

/// Number of rings used to approximate a radial gradient.
pub const GRADIENT_STEPS: usize = 24;

/// Convert a peniko color to an egui color.
pub fn to_color32(color: Color) -> Color32 {
    let c = color.to_rgba8();
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Map a surface-local point into screen space.
pub fn to_pos2(origin: Pos2, point: Point) -> Pos2 {
    pos2(origin.x + point.x as f32, origin.y + point.y as f32)
}

/// A filled disc of the gradient approximation.
#[derive(Debug, Clone, Copy)]
pub struct GradientRing {
    pub center: Point,
    pub radius: f64,
    pub color: Color,
}

/// Discs approximating `gradient` clipped to `circle`, back to front.
///
/// Each disc follows the gradient's circle at parameter `t` (interpolating
/// between the end and focal circles) and is shrunk where needed so it
/// stays inside `circle`.
pub fn gradient_rings(circle: Circle, gradient: &RadialGradient, steps: usize) -> Vec<GradientRing> {
    let steps = steps.max(1);
    let span = gradient.end_radius - gradient.start_radius;
    // Parameter at which the gradient circle reaches the shape edge
    let t_edge = if span.abs() > f64::EPSILON {
        ((circle.radius - gradient.start_radius) / span).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let mut rings = Vec::with_capacity(steps + 1);
    rings.push(GradientRing {
        center: circle.center,
        radius: circle.radius,
        color: gradient.color_at(t_edge as f32),
    });
    for i in (0..steps).rev() {
        let t = t_edge * i as f64 / steps as f64;
        let center = gradient.start_center.lerp(gradient.end_center, t);
        let offset = (center - circle.center).hypot();
        let radius = (gradient.start_radius + span * t).min(circle.radius - offset);
        if radius <= 0.0 {
            continue;
        }
        rings.push(GradientRing {
            center,
            radius,
            color: gradient.color_at(t as f32),
        });
    }
    rings
}

/// Paint recorded commands with `origin` as the surface's top-left corner.
pub fn paint_commands(painter: &Painter, origin: Pos2, commands: &[DrawCommand]) {
    for command in commands {
        match command {
            DrawCommand::Stroke { circle, style } => {
                painter.circle_stroke(
                    to_pos2(origin, circle.center),
                    circle.radius as f32,
                    Stroke::new(style.width as f32, to_color32(style.color)),
                );
            }
            DrawCommand::Fill { circle, gradient } => {
                for ring in gradient_rings(*circle, gradient, GRADIENT_STEPS) {
                    painter.circle_filled(
                        to_pos2(origin, ring.center),
                        ring.radius as f32,
                        to_color32(ring.color),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use joystick_core::GradientStop;
    use kurbo::Vec2;

    fn stick_gradient(center: Point) -> RadialGradient {
        RadialGradient {
            start_center: center + Vec2::new(20.0, -20.0),
            start_radius: 5.0,
            end_center: center,
            end_radius: 75.0,
            stops: vec![
                GradientStop::new(0.0, Color::WHITE),
                GradientStop::new(1.0, Color::BLACK),
            ],
        }
    }

    #[test]
    fn test_to_color32() {
        let color = Color::from_rgba8(0x00, 0xAA, 0x00, 0xFF);
        assert_eq!(to_color32(color), Color32::from_rgb(0x00, 0xAA, 0x00));
    }

    #[test]
    fn test_to_pos2_offsets_origin() {
        let p = to_pos2(pos2(10.0, 20.0), Point::new(5.0, 7.5));
        assert_eq!(p, pos2(15.0, 27.5));
    }

    #[test]
    fn test_rings_stay_inside_circle() {
        let center = Point::new(100.0, 100.0);
        let circle = Circle::new(center, 45.0);
        let rings = gradient_rings(circle, &stick_gradient(center), GRADIENT_STEPS);

        assert!(rings.len() > 1);
        assert_eq!(rings[0].center, center);
        assert!((rings[0].radius - 45.0).abs() < f64::EPSILON);
        for ring in &rings {
            let reach = (ring.center - center).hypot() + ring.radius;
            assert!(reach <= 45.0 + 1e-9);
        }
    }

    #[test]
    fn test_rings_end_at_focal_color() {
        let center = Point::new(100.0, 100.0);
        let circle = Circle::new(center, 45.0);
        let rings = gradient_rings(circle, &stick_gradient(center), 8);
        let last = rings.last().unwrap();
        assert_eq!(last.color.components, Color::WHITE.components);
        assert_eq!(last.center, center + Vec2::new(20.0, -20.0));
    }
}
