use super::*;

fn default_box() -> TextBox {
    TextBox {
        x: 0.08,
        y: 0.62,
        width: 0.84,
        height: 0.34,
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn move_shifts_by_screen_fraction() {
    let mut g = BoxGesture::new();
    g.begin(
        DragMode::Move,
        Point::new(100.0, 100.0),
        Size::new(500.0, 500.0),
        default_box(),
    )
    .unwrap();
    assert_eq!(g.phase(), GesturePhase::Dragging);
    let b = g.update(Point::new(75.0, 50.0)).unwrap();
    assert!(close(b.x, 0.03) && close(b.y, 0.52), "{b:?}");
    assert!(close(b.width, 0.84) && close(b.height, 0.34));
}

#[test]
fn move_past_the_edge_shrinks_instead_of_leaving_the_canvas() {
    let mut g = BoxGesture::new();
    g.begin(
        DragMode::Move,
        Point::ZERO,
        Size::new(100.0, 100.0),
        default_box(),
    )
    .unwrap();
    let b = g.drop_at(Point::new(50.0, 50.0)).unwrap();
    assert!(close(b.x, 0.58) && close(b.width, 0.42), "{b:?}");
    assert!(close(b.y, 1.0 - MIN_BOX_HEIGHT) && close(b.height, MIN_BOX_HEIGHT), "{b:?}");
    assert_eq!(g.phase(), GesturePhase::Dropped);
    assert!(g.update(Point::ZERO).is_none());
}

#[test]
fn corner_drag_respects_minimum_size() {
    let mut g = BoxGesture::new();
    g.begin(
        DragMode::Se,
        Point::ZERO,
        Size::new(100.0, 100.0),
        default_box(),
    )
    .unwrap();
    let b = g.update(Point::new(-90.0, -90.0)).unwrap();
    assert!(close(b.width, MIN_BOX_WIDTH) && close(b.height, MIN_BOX_HEIGHT), "{b:?}");

    let mut g = BoxGesture::new();
    g.begin(
        DragMode::Nw,
        Point::ZERO,
        Size::new(100.0, 100.0),
        default_box(),
    )
    .unwrap();
    let b = g.update(Point::new(-20.0, -10.0)).unwrap();
    assert!(close(b.x, 0.0) && close(b.width, 1.0), "{b:?}");
    assert!(close(b.y, 0.52) && close(b.height, 0.44), "{b:?}");
}

#[test]
fn cancel_restores_the_original_box() {
    let mut g = BoxGesture::new();
    g.begin(
        DragMode::Ne,
        Point::ZERO,
        Size::new(10.0, 10.0),
        default_box(),
    )
    .unwrap();
    g.update(Point::new(3.0, 3.0));
    assert_eq!(g.cancel(), Some(default_box()));
    assert_eq!(g.phase(), GesturePhase::Cancelled);
    assert_eq!(g.cancel(), None);
}

#[test]
fn zero_sized_view_is_rejected() {
    let mut g = BoxGesture::new();
    assert!(
        g.begin(DragMode::Move, Point::ZERO, Size::ZERO, default_box())
            .is_err()
    );
    assert_eq!(g.phase(), GesturePhase::Idle);
}

#[test]
fn reorder_drop_reports_the_move() {
    let mut g = ReorderGesture::new();
    g.begin(0);
    g.hover(0);
    assert_eq!(g.drop_target(), None);
    g.hover(2);
    assert_eq!(g.drop_target(), Some(2));
    assert_eq!(g.drop_on(2), Some((0, 2)));
    assert_eq!(g.phase(), GesturePhase::Dropped);
    assert_eq!(g.dragged(), None);
}

#[test]
fn reorder_onto_itself_or_after_cancel_is_a_no_op() {
    let mut g = ReorderGesture::new();
    g.begin(1);
    assert_eq!(g.drop_on(1), None);
    g.begin(1);
    g.cancel();
    assert_eq!(g.phase(), GesturePhase::Cancelled);
    assert_eq!(g.drop_on(0), None);
}

#[test]
fn move_item_splices() {
    let mut v = vec!['a', 'b', 'c', 'd'];
    move_item(&mut v, 0, 2).unwrap();
    assert_eq!(v, ['b', 'c', 'a', 'd']);
    move_item(&mut v, 3, 0).unwrap();
    assert_eq!(v, ['d', 'b', 'c', 'a']);
    assert!(move_item(&mut v, 4, 0).is_err());
}
