use tzclock_core::{Font, Point, Rgba, Stroke, TextAlign};

/// Port for a square 2D drawing target
///
/// Mirrors the small subset of an immediate-mode canvas that the analog
/// renderer needs. Every repaint starts with [`Surface::clear`], so
/// implementations never have to reconcile partial frames.
pub trait Surface {
    /// Width in pixels
    fn width(&self) -> f64;

    /// Height in pixels
    fn height(&self) -> f64;

    /// Erase everything drawn so far
    fn clear(&mut self);

    /// Outline a circle
    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke);

    /// Fill a circle
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    /// Draw a straight segment
    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke);

    /// Draw a single line of text anchored at `at` (baseline, horizontal alignment per `align`)
    fn fill_text(&mut self, text: &str, at: Point, font: &Font, color: Rgba, align: TextAlign);
}
