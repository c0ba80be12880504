use serde::{Deserialize, Serialize};

pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;
pub const MIN_STROKE_WIDTH: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Integer pixel this point falls into. Shared by the rasterizer and the
    /// live scene so both place segment endpoints on the same pixel.
    pub fn pixel(self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Scale 16-bit-per-channel components down to 8 bits by keeping the
    /// high byte of each channel.
    pub const fn from_rgba16(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self {
            r: (r >> 8) as u8,
            g: (g >> 8) as u8,
            b: (b >> 8) as u8,
            a: (a >> 8) as u8,
        }
    }

    pub fn to_rgba_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Pen colors offered by the settings form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PenColor {
    #[default]
    Black,
    Red,
    Blue,
    Green,
}

impl PenColor {
    pub const ALL: [PenColor; 4] = [
        PenColor::Black,
        PenColor::Red,
        PenColor::Blue,
        PenColor::Green,
    ];

    pub fn color(self) -> Color {
        match self {
            PenColor::Black => Color::BLACK,
            PenColor::Red => Color::rgba(255, 0, 0, 255),
            PenColor::Blue => Color::rgba(0, 0, 255, 255),
            PenColor::Green => Color::rgba(0, 255, 0, 255),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PenColor::Black => "Black",
            PenColor::Red => "Red",
            PenColor::Blue => "Blue",
            PenColor::Green => "Green",
        }
    }
}

impl std::fmt::Display for PenColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Clamp a requested pen width to the supported minimum. NaN and infinite
/// input fall back to the default width.
pub fn clamp_stroke_width(width: f32) -> f32 {
    if !width.is_finite() {
        return DEFAULT_STROKE_WIDTH;
    }
    width.max(MIN_STROKE_WIDTH)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: DEFAULT_STROKE_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub style: StrokeStyle,
}

impl Stroke {
    pub fn begin(point: Point, style: StrokeStyle) -> Self {
        Self {
            points: vec![point],
            style,
        }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs. Empty for strokes with fewer than two points.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Copy of the canvas taken under the lock, safe to render without it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanvasSnapshot {
    pub committed: Vec<Stroke>,
    pub active: Option<Stroke>,
    pub revision: u64,
}

impl CanvasSnapshot {
    /// Strokes in z-order: committed first, then the in-progress stroke.
    pub fn strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.committed.iter().chain(self.active.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_bit_components_keep_high_byte() {
        assert_eq!(
            Color::from_rgba16(0xffff, 0x8000, 0x00ff, 0xffff),
            Color::rgba(255, 128, 0, 255)
        );
    }

    #[test]
    fn width_clamps_to_minimum() {
        assert_eq!(clamp_stroke_width(0.0), 1.0);
        assert_eq!(clamp_stroke_width(-3.0), 1.0);
        assert_eq!(clamp_stroke_width(4.5), 4.5);
        assert_eq!(clamp_stroke_width(f32::NAN), DEFAULT_STROKE_WIDTH);
        assert_eq!(clamp_stroke_width(f32::INFINITY), DEFAULT_STROKE_WIDTH);
        assert_eq!(clamp_stroke_width(f32::NEG_INFINITY), DEFAULT_STROKE_WIDTH);
        assert_eq!(clamp_stroke_width(1.0e5), 1.0e5);
    }

    #[test]
    fn single_point_stroke_has_no_segments() {
        let stroke = Stroke::begin(Point::new(1.0, 1.0), StrokeStyle::default());
        assert_eq!(stroke.segments().count(), 0);
    }

    #[test]
    fn pixel_floors_coordinates() {
        assert_eq!(Point::new(10.9, 3.2).pixel(), (10, 3));
        assert_eq!(Point::new(-0.5, 0.0).pixel(), (-1, 0));
    }

    #[test]
    fn snapshot_orders_active_stroke_last() {
        let first = Stroke::begin(Point::new(0.0, 0.0), StrokeStyle::default());
        let active = Stroke::begin(Point::new(5.0, 5.0), StrokeStyle::default());
        let snapshot = CanvasSnapshot {
            committed: vec![first.clone()],
            active: Some(active.clone()),
            revision: 2,
        };
        let strokes: Vec<_> = snapshot.strokes().collect();
        assert_eq!(strokes, vec![&first, &active]);
    }
}
