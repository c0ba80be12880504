use whiteboard::board::input::CaptureState;
use whiteboard::board::render::{render_snapshot, BACKGROUND};
use whiteboard::board::{Color, PenColor, Point, PointerSurface, SharedCanvas, StrokeStyle};

fn drag(surface: &dyn PointerSurface, points: &[(f32, f32)]) {
    let mut iter = points.iter();
    if let Some(&(x, y)) = iter.next() {
        surface.pointer_press(Point::new(x, y));
    }
    for &(x, y) in iter {
        surface.pointer_move(Point::new(x, y));
    }
    surface.pointer_release();
}

#[test]
fn drag_through_surface_commits_and_renders() {
    let canvas = SharedCanvas::new(StrokeStyle::default());
    drag(&canvas, &[(10.0, 10.0), (30.0, 10.0), (30.0, 30.0)]);

    assert_eq!(canvas.state(), CaptureState::Idle);
    assert_eq!(canvas.committed_len(), 1);
    let snapshot = canvas.snapshot();
    assert_eq!(snapshot.committed[0].points.len(), 3);

    let bitmap = render_snapshot(&snapshot, 40, 40).unwrap();
    assert_eq!(bitmap.pixel(20, 10), Color::BLACK);
    assert_eq!(bitmap.pixel(30, 20), Color::BLACK);
    assert_eq!(bitmap.pixel(15, 25), BACKGROUND);
}

#[test]
fn color_change_mid_session_keeps_earlier_strokes() {
    let canvas = SharedCanvas::new(StrokeStyle::default());
    drag(&canvas, &[(2.0, 5.0), (18.0, 5.0)]);
    canvas.set_color(PenColor::Red.color());
    drag(&canvas, &[(2.0, 15.0), (18.0, 15.0)]);

    let bitmap = render_snapshot(&canvas.snapshot(), 20, 20).unwrap();
    assert_eq!(bitmap.pixel(10, 5), Color::BLACK);
    assert_eq!(bitmap.pixel(10, 15), PenColor::Red.color());
}

#[test]
fn clear_from_another_handle_empties_the_board() {
    let canvas = SharedCanvas::new(StrokeStyle::default());
    let other = canvas.clone();
    drag(&canvas, &[(1.0, 1.0), (9.0, 9.0)]);
    other.clear();

    let bitmap = render_snapshot(&canvas.snapshot(), 10, 10).unwrap();
    assert!(bitmap
        .pixels()
        .chunks(4)
        .all(|px| px == BACKGROUND.to_rgba_array()));
}
