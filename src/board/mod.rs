pub mod canvas;
pub mod export;
pub mod input;
pub mod model;
pub mod render;
pub mod scene;
pub mod surface;

pub use canvas::SharedCanvas;
pub use export::{export_canvas, export_png, save_canvas, save_png};
pub use model::{CanvasSnapshot, Color, PenColor, Point, Stroke, StrokeStyle};
pub use surface::{PointerFrame, PointerSurface, SurfaceCursor};
