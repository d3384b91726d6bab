use std::fmt;

/// Point on a drawing surface, in pixels, y pointing down
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `length` from `self` along a clock angle
    ///
    /// Angle 0 points to 12 o'clock and grows clockwise.
    pub fn along(&self, angle: f64, length: f64) -> Self {
        Self {
            x: self.x + length * angle.sin(),
            y: self.y - length * angle.cos(),
        }
    }
}

/// Straight RGBA color, alpha in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Translucent black
    pub const fn black(a: f64) -> Self {
        Self::new(0, 0, 0, a)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

impl LineCap {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
        }
    }
}

/// Stroke parameters for lines and outlines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub color: Rgba,
    pub cap: LineCap,
}

impl Stroke {
    pub fn new(width: f64, color: Rgba) -> Self {
        Self {
            width,
            color,
            cap: LineCap::Butt,
        }
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Start,
    #[default]
    Center,
    End,
}

/// Font used for text painted on a surface
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub size_px: f64,
    pub family: String,
}

impl Font {
    pub fn new(size_px: f64, family: impl Into<String>) -> Self {
        Self {
            size_px,
            family: family.into(),
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_along_follows_clock_convention() {
        let c = Point::new(100.0, 100.0);

        let up = c.along(0.0, 10.0);
        assert!(close(up.x, 100.0) && close(up.y, 90.0));

        let right = c.along(std::f64::consts::FRAC_PI_2, 10.0);
        assert!(close(right.x, 110.0) && close(right.y, 100.0));

        let down = c.along(std::f64::consts::PI, 10.0);
        assert!(close(down.x, 100.0) && close(down.y, 110.0));
    }

    #[test]
    fn test_rgba_display() {
        assert_eq!(Rgba::new(200, 0, 0, 0.75).to_string(), "rgba(200,0,0,0.75)");
    }
}
