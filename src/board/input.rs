use crate::board::model::{
    clamp_stroke_width, CanvasSnapshot, Color, Point, Stroke, StrokeStyle,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Drawing,
}

/// Pointer-driven stroke capture. Owns the committed stroke list and the
/// single in-progress stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeCapture {
    style: StrokeStyle,
    active: Option<Stroke>,
    committed: Vec<Stroke>,
    revision: u64,
}

impl Default for StrokeCapture {
    fn default() -> Self {
        Self::new(StrokeStyle::default())
    }
}

impl StrokeCapture {
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            style: StrokeStyle {
                color: style.color,
                width: clamp_stroke_width(style.width),
            },
            active: None,
            committed: Vec::new(),
            revision: 0,
        }
    }

    pub fn state(&self) -> CaptureState {
        if self.active.is_some() {
            CaptureState::Drawing
        } else {
            CaptureState::Idle
        }
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn committed(&self) -> &[Stroke] {
        &self.committed
    }

    pub fn active(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_color(&mut self, color: Color) {
        self.style.color = color;
    }

    pub fn set_width(&mut self, width: f32) {
        self.style.width = clamp_stroke_width(width);
    }

    /// Start a stroke at `point`. Ignored while a stroke is already active.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(Stroke::begin(point, self.style));
        self.bump();
        true
    }

    /// Extend the active stroke. Returns `true` when the display must be
    /// re-derived.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        let Some(stroke) = self.active.as_mut() else {
            return false;
        };
        stroke.push(point);
        self.bump();
        true
    }

    pub fn pointer_up(&mut self) -> bool {
        let Some(stroke) = self.active.take() else {
            return false;
        };
        if !stroke.is_empty() {
            tracing::debug!(
                points = stroke.points.len(),
                width = stroke.style.width,
                "committing stroke"
            );
            self.committed.push(stroke);
        }
        self.bump();
        true
    }

    /// Drop every committed stroke and any stroke in flight. Pen style is
    /// kept.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.active = None;
        self.bump();
    }

    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            committed: self.committed.clone(),
            active: self.active.clone(),
            revision: self.revision,
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
