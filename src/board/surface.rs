use crate::board::canvas::SharedCanvas;
use crate::board::model::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCursor {
    Default,
    Crosshair,
}

/// Pointer capabilities a drawing surface reacts to.
///
/// Press/move/release return `true` when the surface changed and the view
/// must be refreshed. Hover callbacks default to no-ops.
pub trait PointerSurface {
    fn pointer_press(&self, point: Point) -> bool;
    fn pointer_move(&self, point: Point) -> bool;
    fn pointer_release(&self) -> bool;

    fn hover_enter(&self, _point: Point) {}
    fn hover_exit(&self) {}

    fn cursor(&self) -> SurfaceCursor {
        SurfaceCursor::Default
    }
}

impl PointerSurface for SharedCanvas {
    fn pointer_press(&self, point: Point) -> bool {
        self.pointer_down(point)
    }

    fn pointer_move(&self, point: Point) -> bool {
        SharedCanvas::pointer_move(self, point)
    }

    fn pointer_release(&self) -> bool {
        self.pointer_up()
    }

    fn hover_enter(&self, point: Point) {
        tracing::trace!(x = point.x, y = point.y, "pointer entered canvas");
    }

    fn hover_exit(&self) {
        tracing::trace!("pointer left canvas");
    }

    fn cursor(&self) -> SurfaceCursor {
        SurfaceCursor::Crosshair
    }
}

/// Tracks hover transitions so enter/exit fire once per crossing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HoverTracker {
    inside: bool,
}

impl HoverTracker {
    pub fn update(&mut self, surface: &dyn PointerSurface, hovered_at: Option<Point>) {
        match (self.inside, hovered_at) {
            (false, Some(point)) => {
                self.inside = true;
                surface.hover_enter(point);
            }
            (true, None) => {
                self.inside = false;
                surface.hover_exit();
            }
            _ => {}
        }
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }
}

/// Pointer events observed during one UI frame, in canvas coordinates.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerFrame {
    /// Where the primary button went down on the surface.
    pub press: Option<Point>,
    /// Latest pointer position while the button is held.
    pub motion: Option<Point>,
    pub release: bool,
}

impl PointerFrame {
    /// Deliver the frame in press, move, release order. A press and release
    /// in the same frame still yields a one-point stroke.
    pub fn dispatch(&self, surface: &dyn PointerSurface) -> bool {
        let mut changed = false;
        if let Some(point) = self.press {
            changed |= surface.pointer_press(point);
        }
        if let Some(point) = self.motion {
            changed |= surface.pointer_move(point);
        }
        if self.release {
            changed |= surface.pointer_release();
        }
        changed
    }
}
