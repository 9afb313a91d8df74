use quire_core::render::{DrawOp, RecordingSurface};
use quire_core::tool::{Pen, PenTool, PointerButton, PointerEvent};

fn down(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Down {
        x,
        y,
        button: PointerButton::Primary,
    }
}

fn tool_with_size(size: f64) -> PenTool {
    PenTool::new(Pen::new("#000", size).unwrap())
}

#[test]
fn slow_drag_keeps_both_endpoints() {
    let mut tool = tool_with_size(4.0);
    let mut surface = RecordingSurface::new(200, 200);

    assert!(tool.handle(down(10.0, 10.0), &mut surface).is_none());
    // Hardware repeats the press coordinate; identical points never extend
    // the path.
    assert!(tool
        .handle(PointerEvent::Move { x: 10.0, y: 10.0 }, &mut surface)
        .is_none());
    assert!(tool
        .handle(PointerEvent::Move { x: 20.0, y: 10.0 }, &mut surface)
        .is_none());
    let finished = tool
        .handle(PointerEvent::Up { x: 20.0, y: 10.0 }, &mut surface)
        .unwrap();

    assert_eq!(finished.points, vec![10.0, 10.0, 20.0, 10.0]);
    assert_eq!(finished.color, "#000");
    assert_eq!(finished.width, 4.0);
    assert!(!tool.is_drawing());
}

#[test]
fn first_move_is_accepted_regardless_of_distance() {
    let mut tool = tool_with_size(8.0);
    let mut surface = RecordingSurface::new(200, 200);

    tool.handle(down(0.0, 0.0), &mut surface);
    // Distance 1 is far below size/2 = 4, but the first move seeds the
    // direction of the stroke.
    tool.handle(PointerEvent::Move { x: 1.0, y: 0.0 }, &mut surface);

    assert_eq!(tool.points().unwrap(), &[0.0, 0.0, 1.0, 0.0]);
}

#[test]
fn moves_within_half_size_are_dropped_after_the_first() {
    let mut tool = tool_with_size(4.0);
    let mut surface = RecordingSurface::new(200, 200);

    tool.handle(down(0.0, 0.0), &mut surface);
    tool.handle(PointerEvent::Move { x: 10.0, y: 0.0 }, &mut surface);
    // dSq = 1 and dSq = 4 are both within (size/2)^2 = 4; the comparison
    // is strict.
    tool.handle(PointerEvent::Move { x: 11.0, y: 0.0 }, &mut surface);
    tool.handle(PointerEvent::Move { x: 12.0, y: 0.0 }, &mut surface);
    tool.handle(PointerEvent::Move { x: 13.0, y: 0.0 }, &mut surface);

    assert_eq!(tool.points().unwrap(), &[0.0, 0.0, 10.0, 0.0, 13.0, 0.0]);
}

#[test]
fn capture_draws_incrementally_without_clearing() {
    let mut tool = tool_with_size(4.0);
    let mut surface = RecordingSurface::new(200, 200);

    tool.handle(down(10.0, 10.0), &mut surface);
    tool.handle(PointerEvent::Move { x: 20.0, y: 10.0 }, &mut surface);
    tool.handle(PointerEvent::Move { x: 30.0, y: 20.0 }, &mut surface);

    assert_eq!(
        surface.ops(),
        &[
            DrawOp::FillRect {
                x: 8.0,
                y: 8.0,
                width: 4.0,
                height: 4.0,
                color: "#000".to_string(),
            },
            DrawOp::Segment {
                from: (10.0, 10.0),
                to: (20.0, 10.0),
                color: "#000".to_string(),
                width: 4.0,
            },
            DrawOp::Segment {
                from: (20.0, 10.0),
                to: (30.0, 20.0),
                color: "#000".to_string(),
                width: 4.0,
            },
        ]
    );
}

#[test]
fn leave_finishes_without_adding_a_point() {
    let mut tool = tool_with_size(4.0);
    let mut surface = RecordingSurface::new(200, 200);

    tool.handle(down(5.0, 5.0), &mut surface);
    tool.handle(PointerEvent::Move { x: 15.0, y: 5.0 }, &mut surface);
    let finished = tool.handle(PointerEvent::Leave, &mut surface).unwrap();

    assert_eq!(finished.points, vec![5.0, 5.0, 15.0, 5.0]);
}

#[test]
fn single_click_produces_a_one_point_stroke() {
    let mut tool = tool_with_size(4.0);
    let mut surface = RecordingSurface::new(200, 200);

    tool.handle(down(42.0, 17.0), &mut surface);
    let finished = tool
        .handle(PointerEvent::Up { x: 42.0, y: 17.0 }, &mut surface)
        .unwrap();

    assert_eq!(finished.points, vec![42.0, 17.0]);
}

#[test]
fn non_primary_button_does_not_start_a_stroke() {
    let mut tool = tool_with_size(4.0);
    let mut surface = RecordingSurface::new(200, 200);

    for button in [PointerButton::Secondary, PointerButton::Auxiliary] {
        tool.handle(
            PointerEvent::Down {
                x: 1.0,
                y: 1.0,
                button,
            },
            &mut surface,
        );
        assert!(!tool.is_drawing());
    }
    assert!(surface.ops().is_empty());
}

#[test]
fn down_while_drawing_is_ignored() {
    let mut tool = tool_with_size(4.0);
    let mut surface = RecordingSurface::new(200, 200);

    tool.handle(down(0.0, 0.0), &mut surface);
    tool.handle(down(50.0, 50.0), &mut surface);

    assert_eq!(tool.points().unwrap(), &[0.0, 0.0]);
}

#[test]
fn events_while_idle_do_nothing() {
    let mut tool = tool_with_size(4.0);
    let mut surface = RecordingSurface::new(200, 200);

    assert!(tool
        .handle(PointerEvent::Move { x: 1.0, y: 1.0 }, &mut surface)
        .is_none());
    assert!(tool
        .handle(PointerEvent::Up { x: 1.0, y: 1.0 }, &mut surface)
        .is_none());
    assert!(tool.handle(PointerEvent::Leave, &mut surface).is_none());
    assert!(surface.ops().is_empty());
    assert!(tool.points().is_err());
}

#[test]
fn cancel_discards_the_path() {
    let mut tool = tool_with_size(4.0);
    let mut surface = RecordingSurface::new(200, 200);

    tool.handle(down(0.0, 0.0), &mut surface);
    tool.cancel();

    assert!(!tool.is_drawing());
    assert!(tool.handle(PointerEvent::Leave, &mut surface).is_none());
}

#[test]
fn disabling_mid_stroke_cancels_it() {
    let mut tool = tool_with_size(4.0);
    let mut surface = RecordingSurface::new(200, 200);

    tool.handle(down(0.0, 0.0), &mut surface);
    tool.set_enabled(false);
    assert!(!tool.is_drawing());

    // Still disabled, so a new press is refused.
    tool.handle(down(5.0, 5.0), &mut surface);
    assert!(!tool.is_drawing());

    tool.set_enabled(true);
    tool.handle(down(5.0, 5.0), &mut surface);
    assert!(tool.is_drawing());
}
