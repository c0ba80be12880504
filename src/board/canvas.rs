use crate::board::input::{CaptureState, StrokeCapture};
use crate::board::model::{CanvasSnapshot, Color, Point, StrokeStyle};
use std::sync::{Arc, Mutex, MutexGuard};

/// Thread-safe handle to the whiteboard's stroke state.
///
/// Every operation takes the lock for its own duration only. Rendering and
/// export work on a [`CanvasSnapshot`] so the lock is never held during pixel
/// work or network calls.
#[derive(Debug, Clone, Default)]
pub struct SharedCanvas {
    inner: Arc<Mutex<StrokeCapture>>,
}

impl SharedCanvas {
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StrokeCapture::new(style))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StrokeCapture> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("canvas lock poisoned; recovering stroke state");
                poisoned.into_inner()
            }
        }
    }

    pub fn pointer_down(&self, point: Point) -> bool {
        self.lock().pointer_down(point)
    }

    pub fn pointer_move(&self, point: Point) -> bool {
        self.lock().pointer_move(point)
    }

    pub fn pointer_up(&self) -> bool {
        self.lock().pointer_up()
    }

    pub fn clear(&self) {
        self.lock().clear();
        tracing::debug!("canvas cleared");
    }

    pub fn set_color(&self, color: Color) {
        self.lock().set_color(color);
    }

    pub fn set_width(&self, width: f32) {
        self.lock().set_width(width);
    }

    pub fn style(&self) -> StrokeStyle {
        self.lock().style()
    }

    pub fn state(&self) -> CaptureState {
        self.lock().state()
    }

    pub fn revision(&self) -> u64 {
        self.lock().revision()
    }

    pub fn committed_len(&self) -> usize {
        self.lock().committed().len()
    }

    pub fn snapshot(&self) -> CanvasSnapshot {
        self.lock().snapshot()
    }
}
