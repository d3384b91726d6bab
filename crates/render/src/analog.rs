//! Analog Renderer
//!
//! Repaints a complete clock face onto a [`Surface`] from resolved time
//! components. Every call starts by clearing the surface, so a face is
//! never drawn on top of a stale one.
//!
//! ```text
//!            0 rad (12 o'clock)
//!                  │
//!   -π/2 ───────── c ───────── π/2      offset(a, L) = (L·sin a, -L·cos a)
//!                  │
//!                  π
//! ```

use std::f64::consts::PI;
use tzclock_core::{Font, LineCap, Point, ResolvedTime, Rgba, Stroke, TextAlign};
use tzclock_ports::Surface;

const FACE_RADIUS: f64 = 0.92;
const FACE_COLOR: Rgba = Rgba::black(0.35);
const TICK_COLOR: Rgba = Rgba::black(0.45);
const TICK_OUTER: f64 = 0.95;
const HOUR_TICK_INNER: f64 = 0.82;
const MINUTE_TICK_INNER: f64 = 0.87;
const PIN_COLOR: Rgba = Rgba::black(0.7);
const ERROR_COLOR: Rgba = Rgba::black(0.75);
const ERROR_FONT_PX: f64 = 14.0;
const ERROR_FONT_FAMILY: &str = "system-ui, -apple-system, Segoe UI, Roboto, Arial";

/// Length (fraction of the face radius), minimum width, width factor, color
struct HandStyle {
    length: f64,
    min_width: f64,
    width_factor: f64,
    color: Rgba,
}

const HOUR_HAND: HandStyle = HandStyle {
    length: 0.55,
    min_width: 3.0,
    width_factor: 0.035,
    color: Rgba::black(0.75),
};

const MINUTE_HAND: HandStyle = HandStyle {
    length: 0.75,
    min_width: 2.0,
    width_factor: 0.025,
    color: Rgba::black(0.65),
};

const SECOND_HAND: HandStyle = HandStyle {
    length: 0.82,
    min_width: 1.0,
    width_factor: 0.012,
    color: Rgba::new(200, 0, 0, 0.75),
};

/// Hand angles in radians, 0 at 12 o'clock, clockwise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl HandAngles {
    /// Angles for a reading
    ///
    /// The minute hand carries the fractional minute and the hour hand
    /// the fractional hour, so both sweep regardless of `smooth`; only
    /// the second hand switches between continuous and whole steps.
    pub fn from_time(time: &ResolvedTime, smooth: bool) -> Self {
        let sec = time.seconds_value(smooth);
        let min = time.minute as f64 + sec / 60.0;
        let hour = (time.hour % 12) as f64 + min / 60.0;

        Self {
            hour: hour * PI / 6.0,
            minute: min * PI / 30.0,
            second: sec * PI / 30.0,
        }
    }
}

/// Face geometry for a square surface of `size` pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceGeometry {
    pub size: f64,
    pub center: Point,
    pub radius: f64,
}

impl FaceGeometry {
    pub fn new(size: f64) -> Self {
        let cx = size / 2.0;
        let cy = size / 2.0;
        Self {
            size,
            center: Point::new(cx, cy),
            radius: cx.min(cy) * FACE_RADIUS,
        }
    }

    /// Outline width of the face and of the hour ticks
    pub fn face_width(&self) -> f64 {
        (self.size * 0.02).max(2.0)
    }

    pub fn minute_tick_width(&self) -> f64 {
        (self.size * 0.01).max(1.0)
    }

    pub fn pin_radius(&self) -> f64 {
        (self.size * 0.02).max(3.0)
    }

    /// Inner and outer end of tick `index` (0..60)
    pub fn tick(&self, index: u32) -> (Point, Point) {
        let angle = index as f64 * PI / 30.0;
        let inner = if index % 5 == 0 {
            HOUR_TICK_INNER
        } else {
            MINUTE_TICK_INNER
        };
        (
            self.center.along(angle, self.radius * inner),
            self.center.along(angle, self.radius * TICK_OUTER),
        )
    }

    fn hand_stroke(&self, style: &HandStyle) -> Stroke {
        Stroke::new((self.size * style.width_factor).max(style.min_width), style.color)
            .with_cap(LineCap::Round)
    }

    fn hand_tip(&self, style: &HandStyle, angle: f64) -> Point {
        self.center.along(angle, self.radius * style.length)
    }
}

/// Draws analog faces for one widget
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalogRenderer {
    smooth: bool,
}

impl AnalogRenderer {
    pub fn new(smooth: bool) -> Self {
        Self { smooth }
    }

    /// Repaint the whole face for `time`
    pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S, size: f64, time: &ResolvedTime) {
        let face = FaceGeometry::new(size);

        surface.clear();

        surface.stroke_circle(
            face.center,
            face.radius,
            Stroke::new(face.face_width(), FACE_COLOR),
        );

        for i in 0..60 {
            let width = if i % 5 == 0 {
                face.face_width()
            } else {
                face.minute_tick_width()
            };
            let (inner, outer) = face.tick(i);
            surface.stroke_line(inner, outer, Stroke::new(width, TICK_COLOR));
        }

        let angles = HandAngles::from_time(time, self.smooth);
        for (style, angle) in [
            (&HOUR_HAND, angles.hour),
            (&MINUTE_HAND, angles.minute),
            (&SECOND_HAND, angles.second),
        ] {
            surface.stroke_line(
                face.center,
                face.hand_tip(style, angle),
                face.hand_stroke(style),
            );
        }

        surface.fill_circle(face.center, face.pin_radius(), PIN_COLOR);
    }

    /// Replace the face with a centered message
    pub fn paint_error<S: Surface + ?Sized>(&self, surface: &mut S, message: &str) {
        surface.clear();
        let at = Point::new(surface.width() / 2.0, surface.height() / 2.0);
        surface.fill_text(
            message,
            at,
            &Font::new(ERROR_FONT_PX, ERROR_FONT_FAMILY),
            ERROR_COLOR,
            TextAlign::Center,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_list::{DisplayList, DrawOp};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_geometry() {
        let face = FaceGeometry::new(200.0);
        assert_eq!(face.center, Point::new(100.0, 100.0));
        assert!(close(face.radius, 92.0));
        assert!(close(face.face_width(), 4.0));
        assert!(close(face.minute_tick_width(), 2.0));
        assert!(close(face.pin_radius(), 4.0));

        let small = FaceGeometry::new(80.0);
        assert_eq!(small.face_width(), 2.0);
        assert_eq!(small.minute_tick_width(), 1.0);
        assert_eq!(small.pin_radius(), 3.0);
    }

    #[test]
    fn test_tick_lengths() {
        let face = FaceGeometry::new(200.0);
        let (inner, outer) = face.tick(0);
        assert!(close(inner.y, 100.0 - 92.0 * 0.82));
        assert!(close(outer.y, 100.0 - 92.0 * 0.95));

        let (inner, _) = face.tick(1);
        let dist = ((inner.x - 100.0).powi(2) + (inner.y - 100.0).powi(2)).sqrt();
        assert!(close(dist, 92.0 * 0.87));
    }

    #[test]
    fn test_angles_at_three_thirty() {
        let a = HandAngles::from_time(&ResolvedTime::new(15, 30, 0, 0), false);
        assert!(close(a.hour, 3.5 * PI / 6.0));
        assert!(close(a.minute, PI));
        assert!(close(a.second, 0.0));
    }

    #[test]
    fn test_smooth_only_changes_second_hand_fraction() {
        let t = ResolvedTime::new(10, 10, 10, 500);
        let stepped = HandAngles::from_time(&t, false);
        let smooth = HandAngles::from_time(&t, true);
        assert!(close(stepped.second, 10.0 * PI / 30.0));
        assert!(close(smooth.second, 10.5 * PI / 30.0));
        assert!(smooth.minute > stepped.minute);
    }

    #[test]
    fn test_angles_monotonic_through_the_day() {
        for smooth in [false, true] {
            let mut prev: Option<HandAngles> = None;
            for ms_total in (0..86_400_000u64).step_by(250) {
                let secs = ms_total / 1000;
                let t = ResolvedTime::new(
                    (secs / 3600) as u32,
                    ((secs / 60) % 60) as u32,
                    (secs % 60) as u32,
                    (ms_total % 1000) as u32,
                );
                let a = HandAngles::from_time(&t, smooth);
                if let Some(p) = prev {
                    // Within the same minute / hour / half-day nothing moves backwards
                    if t.second != 0 || t.millisecond != 0 {
                        assert!(a.second >= p.second);
                    }
                    if !(t.minute == 0 && t.second == 0 && t.millisecond == 0) {
                        assert!(a.minute >= p.minute);
                    }
                    if !(t.hour % 12 == 0 && t.minute == 0 && t.second == 0 && t.millisecond == 0)
                    {
                        assert!(a.hour >= p.hour);
                    }
                }
                prev = Some(a);
            }
        }
    }

    #[test]
    fn test_stepped_second_hand_ignores_milliseconds() {
        let base = HandAngles::from_time(&ResolvedTime::new(9, 0, 41, 0), false);
        for ms in [1, 250, 999] {
            let a = HandAngles::from_time(&ResolvedTime::new(9, 0, 41, ms), false);
            assert_eq!(a.second, base.second);
        }
    }

    #[test]
    fn test_paint_draw_order() {
        let mut surface = DisplayList::new(200.0, 200.0);
        AnalogRenderer::new(false).paint(&mut surface, 200.0, &ResolvedTime::new(3, 0, 0, 0));

        let ops = surface.ops();
        // face + 60 ticks + 3 hands + pin
        assert_eq!(ops.len(), 65);
        assert!(matches!(ops[0], DrawOp::StrokeCircle { .. }));
        assert!(matches!(ops[64], DrawOp::FillCircle { .. }));

        // Hour hand at 3 o'clock points right
        match &ops[61] {
            DrawOp::Line { to, stroke, .. } => {
                assert!(close(to.x, 100.0 + 92.0 * 0.55));
                assert!(close(to.y, 100.0));
                assert!(close(stroke.width, 7.0));
                assert_eq!(stroke.cap, LineCap::Round);
            }
            other => panic!("expected hour hand, got {:?}", other),
        }
        match &ops[63] {
            DrawOp::Line { stroke, .. } => assert_eq!(stroke.color, SECOND_HAND.color),
            other => panic!("expected second hand, got {:?}", other),
        }
    }

    #[test]
    fn test_repaint_replaces_previous_face() {
        let mut surface = DisplayList::new(160.0, 160.0);
        let renderer = AnalogRenderer::new(true);
        renderer.paint(&mut surface, 160.0, &ResolvedTime::new(1, 2, 3, 4));
        renderer.paint(&mut surface, 160.0, &ResolvedTime::new(1, 2, 4, 4));
        assert_eq!(surface.ops().len(), 65);
        assert_eq!(surface.clears(), 2);
    }

    #[test]
    fn test_error_painting_replaces_face() {
        let mut surface = DisplayList::new(160.0, 160.0);
        let renderer = AnalogRenderer::new(false);
        renderer.paint(&mut surface, 160.0, &ResolvedTime::new(1, 2, 3, 4));
        renderer.paint_error(&mut surface, "Invalid timezone");

        assert_eq!(surface.ops().len(), 1);
        match &surface.ops()[0] {
            DrawOp::Text { text, at, align, .. } => {
                assert_eq!(text, "Invalid timezone");
                assert_eq!(*at, Point::new(80.0, 80.0));
                assert_eq!(*align, TextAlign::Center);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }
}
