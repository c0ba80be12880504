use crate::board::model::{CanvasSnapshot, Color, Point, Stroke};
use crate::error::{Result, WhiteboardError};

pub const BACKGROUND: Color = Color::WHITE;

/// Largest disc radius the brush stamps. Squared distances stay well inside
/// `i64` at this size.
pub const MAX_BRUSH_RADIUS: i64 = 1 << 30;

/// Opaque RGBA pixel grid produced for every export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, fill: Color) -> Result<Self> {
        let len = pixel_len(width, height)?;
        let mut pixels = vec![0u8; len];
        for chunk in pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&fill.to_rgba_array());
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Color at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} bitmap",
            self.width,
            self.height
        );
        let idx = self.index(x as usize, y as usize);
        Color::rgba(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }

    fn index(&self, x: usize, y: usize) -> usize {
        (y * self.width as usize + x) * 4
    }

    fn set_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let idx = self.index(x as usize, y as usize);
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_rgba_array());
    }
}

fn pixel_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(WhiteboardError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or(WhiteboardError::InvalidDimensions { width, height })
}

/// Rasterize every stroke of `snapshot` in z-order onto a fresh white bitmap.
pub fn render_snapshot(snapshot: &CanvasSnapshot, width: u32, height: u32) -> Result<Bitmap> {
    let mut bitmap = Bitmap::new(width, height, BACKGROUND)?;
    for stroke in snapshot.strokes() {
        draw_stroke(&mut bitmap, stroke);
    }
    Ok(bitmap)
}

/// Disc radius used to stamp a stroke of the given width.
pub fn brush_radius(width: f32) -> i64 {
    ((width / 2.0).floor() as i64).clamp(1, MAX_BRUSH_RADIUS)
}

pub fn draw_stroke(bitmap: &mut Bitmap, stroke: &Stroke) {
    if stroke.points.len() < 2 {
        return;
    }
    let radius = brush_radius(stroke.style.width);
    for (start, end) in stroke.segments() {
        if draw_segment(bitmap, start, end, stroke.style.color, radius) {
            // The bitmap is a single color now; later stamps change nothing.
            break;
        }
    }
}

fn to_i64((x, y): (i32, i32)) -> (i64, i64) {
    (i64::from(x), i64::from(y))
}

/// Returns `true` once a stamp has covered the whole bitmap.
fn draw_segment(bitmap: &mut Bitmap, start: Point, end: Point, color: Color, radius: i64) -> bool {
    let from = to_i64(start.pixel());
    let to = to_i64(end.pixel());
    let Some(((mut x0, mut y0), (x1, y1))) = clip_to_reach(bitmap, from, to, radius) else {
        return false;
    };

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if stamp_disc(bitmap, (x0, y0), radius, color) {
            return true;
        }
        if x0 == x1 && y0 == y1 {
            return false;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Clip a centerline to the area where a stamp of `radius` can still touch
/// the bitmap. Segments already inside that area are returned unchanged so
/// their Bresenham walk is exact; clipped ends are rounded to the nearest
/// pixel.
fn clip_to_reach(
    bitmap: &Bitmap,
    from: (i64, i64),
    to: (i64, i64),
    radius: i64,
) -> Option<((i64, i64), (i64, i64))> {
    let (min_x, min_y) = (-radius, -radius);
    let max_x = i64::from(bitmap.width) - 1 + radius;
    let max_y = i64::from(bitmap.height) - 1 + radius;
    let reachable =
        |(x, y): (i64, i64)| (min_x..=max_x).contains(&x) && (min_y..=max_y).contains(&y);
    if reachable(from) && reachable(to) {
        return Some((from, to));
    }

    // Liang-Barsky
    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let (dx, dy) = (to.0 as f64 - x0, to.1 as f64 - y0);
    let mut t_enter = 0.0_f64;
    let mut t_exit = 1.0_f64;
    for (p, q) in [
        (-dx, x0 - min_x as f64),
        (dx, max_x as f64 - x0),
        (-dy, y0 - min_y as f64),
        (dy, max_y as f64 - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t_enter = t_enter.max(t);
        } else {
            t_exit = t_exit.min(t);
        }
        if t_enter > t_exit {
            return None;
        }
    }
    let at = |t: f64| ((x0 + t * dx).round() as i64, (y0 + t * dy).round() as i64);
    Some((at(t_enter), at(t_exit)))
}

/// Stamp a filled disc, visiting only the rows and columns that fall inside
/// the bitmap. Returns `true` when the disc covers every pixel.
fn stamp_disc(bitmap: &mut Bitmap, center: (i64, i64), radius: i64, color: Color) -> bool {
    let (cx, cy) = center;
    let left = (cx - radius).max(0);
    let right = (cx + radius).min(i64::from(bitmap.width) - 1);
    let top = (cy - radius).max(0);
    let bottom = (cy + radius).min(i64::from(bitmap.height) - 1);
    if left > right || top > bottom {
        return false;
    }

    // |dx|, |dy| <= radius here, so the squares cannot overflow.
    let radius_sq = radius * radius;
    for y in top..=bottom {
        let dy = y - cy;
        for x in left..=right {
            let dx = x - cx;
            if dx * dx + dy * dy <= radius_sq {
                bitmap.set_pixel(x, y, color);
            }
        }
    }

    let far_x = cx.abs().max((i64::from(bitmap.width) - 1 - cx).abs());
    let far_y = cy.abs().max((i64::from(bitmap.height) - 1 - cy).abs());
    far_x <= radius && far_y <= radius && far_x * far_x + far_y * far_y <= radius_sq
}
