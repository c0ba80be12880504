use crate::board::model::{CanvasSnapshot, Color, Point};

/// One displayable line piece of a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSegment {
    pub start: Point,
    pub end: Point,
    pub color: Color,
    pub width: f32,
}

/// Centre of the pixel the rasterizer uses for `point`.
pub fn snap_to_pixel_center(point: Point) -> Point {
    let (x, y) = point.pixel();
    Point::new(x as f32 + 0.5, y as f32 + 0.5)
}

/// Flatten every stroke in z-order into pixel-snapped segments.
pub fn build_scene(snapshot: &CanvasSnapshot) -> Vec<SceneSegment> {
    let mut segments = Vec::new();
    for stroke in snapshot.strokes() {
        for (start, end) in stroke.segments() {
            segments.push(SceneSegment {
                start: snap_to_pixel_center(start),
                end: snap_to_pixel_center(end),
                color: stroke.style.color,
                width: stroke.style.width,
            });
        }
    }
    segments
}

/// Live display projection, rebuilt in full whenever the canvas revision
/// moves.
#[derive(Debug, Default)]
pub struct SceneCache {
    segments: Vec<SceneSegment>,
    revision: Option<u64>,
    #[cfg(test)]
    rebuild_count: usize,
}

impl SceneCache {
    pub fn is_stale(&self, revision: u64) -> bool {
        self.revision != Some(revision)
    }

    /// Rebuild from `snapshot` if it is newer than the cached scene.
    pub fn refresh(&mut self, snapshot: &CanvasSnapshot) -> &[SceneSegment] {
        if self.is_stale(snapshot.revision) {
            self.segments = build_scene(snapshot);
            self.revision = Some(snapshot.revision);
            tracing::debug!(
                revision = snapshot.revision,
                segments = self.segments.len(),
                "scene rebuilt"
            );
            #[cfg(test)]
            {
                self.rebuild_count += 1;
            }
        }
        &self.segments
    }

    pub fn segments(&self) -> &[SceneSegment] {
        &self.segments
    }

    #[cfg(test)]
    pub fn rebuild_count(&self) -> usize {
        self.rebuild_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::input::StrokeCapture;
    use crate::board::model::StrokeStyle;
    use crate::board::render::render_snapshot;

    fn drawn(points: &[(f32, f32)]) -> StrokeCapture {
        let mut capture = StrokeCapture::new(StrokeStyle {
            color: Color::rgba(0, 0, 255, 255),
            width: 3.0,
        });
        let mut iter = points.iter();
        if let Some(&(x, y)) = iter.next() {
            capture.pointer_down(Point::new(x, y));
        }
        for &(x, y) in iter {
            capture.pointer_move(Point::new(x, y));
        }
        capture.pointer_up();
        capture
    }

    #[test]
    fn segments_pair_consecutive_points() {
        let capture = drawn(&[(1.0, 1.0), (5.0, 1.0), (5.0, 9.0)]);
        let scene = build_scene(&capture.snapshot());

        assert_eq!(scene.len(), 2);
        assert_eq!(scene[0].start, Point::new(1.5, 1.5));
        assert_eq!(scene[0].end, Point::new(5.5, 1.5));
        assert_eq!(scene[1].end, Point::new(5.5, 9.5));
        assert_eq!(scene[1].color, Color::rgba(0, 0, 255, 255));
        assert_eq!(scene[1].width, 3.0);
    }

    #[test]
    fn single_point_strokes_produce_no_segments() {
        let capture = drawn(&[(4.0, 4.0)]);
        assert!(build_scene(&capture.snapshot()).is_empty());
    }

    #[test]
    fn in_progress_stroke_is_projected_last() {
        let mut capture = drawn(&[(0.0, 0.0), (2.0, 0.0)]);
        capture.set_color(Color::rgba(255, 0, 0, 255));
        capture.pointer_down(Point::new(0.0, 4.0));
        capture.pointer_move(Point::new(3.0, 4.0));

        let scene = build_scene(&capture.snapshot());
        assert_eq!(scene.len(), 2);
        assert_eq!(scene[1].color, Color::rgba(255, 0, 0, 255));
    }

    #[test]
    fn cache_rebuilds_only_when_revision_moves() {
        let mut capture = drawn(&[(0.0, 0.0), (2.0, 0.0)]);
        let mut cache = SceneCache::default();

        assert_eq!(cache.refresh(&capture.snapshot()).len(), 1);
        cache.refresh(&capture.snapshot());
        assert_eq!(cache.rebuild_count(), 1);

        capture.clear();
        assert!(cache.is_stale(capture.revision()));
        assert!(cache.refresh(&capture.snapshot()).is_empty());
        assert_eq!(cache.rebuild_count(), 2);
    }

    #[test]
    fn scene_endpoints_land_on_rasterized_pixels() {
        let capture = drawn(&[(10.7, 20.2), (40.1, 33.9), (70.5, 5.5)]);
        let snapshot = capture.snapshot();
        let bitmap = render_snapshot(&snapshot, 80, 40).expect("render");

        for segment in build_scene(&snapshot) {
            for end in [segment.start, segment.end] {
                let x = (end.x - 0.5) as u32;
                let y = (end.y - 0.5) as u32;
                assert_eq!(bitmap.pixel(x, y), segment.color);
            }
        }
    }
}
