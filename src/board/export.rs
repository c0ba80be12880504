use crate::board::canvas::SharedCanvas;
use crate::board::model::CanvasSnapshot;
use crate::board::render::{render_snapshot, Bitmap};
use crate::error::{Result, WhiteboardError};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use std::fs;
use std::path::Path;

pub const DEFAULT_SNAPSHOT_FILE: &str = "whiteboard.png";

pub fn encode_png(bitmap: &Bitmap) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            bitmap.pixels(),
            bitmap.width(),
            bitmap.height(),
            ColorType::Rgba8,
        )
        .map_err(|e| WhiteboardError::Encode(e.to_string()))?;
    Ok(out)
}

/// Rasterize `snapshot` and return the PNG bytes.
pub fn export_png(snapshot: &CanvasSnapshot, width: u32, height: u32) -> Result<Vec<u8>> {
    let bitmap = render_snapshot(snapshot, width, height)?;
    encode_png(&bitmap)
}

/// Snapshot the live canvas and export it. The canvas lock is released
/// before rasterization starts.
pub fn export_canvas(canvas: &SharedCanvas, width: u32, height: u32) -> Result<Vec<u8>> {
    let snapshot = canvas.snapshot();
    let bytes = export_png(&snapshot, width, height)?;
    tracing::info!(
        width,
        height,
        strokes = snapshot.committed.len(),
        bytes = bytes.len(),
        "exported canvas"
    );
    Ok(bytes)
}

/// Export to `path`. Nothing is written when the dimensions are invalid.
pub fn save_png(snapshot: &CanvasSnapshot, path: &Path, width: u32, height: u32) -> Result<()> {
    let bytes = export_png(snapshot, width, height)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &bytes)?;
    tracing::info!(path = %path.display(), width, height, "saved snapshot");
    Ok(())
}

pub fn save_canvas(canvas: &SharedCanvas, path: &Path, width: u32, height: u32) -> Result<()> {
    save_png(&canvas.snapshot(), path, width, height)
}

pub fn load_png_bytes(path: &Path) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::model::{Color, Point};
    use tempfile::tempdir;

    fn sketched_canvas() -> SharedCanvas {
        let canvas = SharedCanvas::default();
        canvas.pointer_down(Point::new(10.0, 50.0));
        canvas.pointer_move(Point::new(90.0, 50.0));
        canvas.pointer_up();
        canvas
    }

    #[test]
    fn exported_png_decodes_to_same_pixels() {
        let canvas = sketched_canvas();
        let bytes = export_canvas(&canvas, 100, 100).expect("export");
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).expect("decode").to_rgba8();
        assert_eq!(decoded.dimensions(), (100, 100));
        assert_eq!(decoded.get_pixel(50, 50).0, Color::BLACK.to_rgba_array());
        assert_eq!(decoded.get_pixel(50, 10).0, [255, 255, 255, 255]);
    }

    #[test]
    fn repeated_exports_are_byte_identical() {
        let canvas = sketched_canvas();
        let first = export_canvas(&canvas, 64, 64).expect("first");
        let second = export_canvas(&canvas, 64, 64).expect("second");
        assert_eq!(first, second);
    }

    #[test]
    fn save_writes_file_and_reload_returns_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(DEFAULT_SNAPSHOT_FILE);
        let canvas = sketched_canvas();

        save_canvas(&canvas, &path, 100, 100).expect("save");
        let bytes = load_png_bytes(&path).expect("reload");
        assert_eq!(bytes, export_canvas(&canvas, 100, 100).unwrap());
    }

    #[test]
    fn invalid_dimensions_write_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SNAPSHOT_FILE);

        let err = save_canvas(&sketched_canvas(), &path, 0, 100).unwrap_err();
        assert!(matches!(err, WhiteboardError::InvalidDimensions { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn missing_file_reports_io_error() {
        let dir = tempdir().unwrap();
        let err = load_png_bytes(&dir.path().join("absent.png")).unwrap_err();
        assert!(matches!(err, WhiteboardError::Io(_)));
    }
}
