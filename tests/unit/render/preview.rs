use super::*;

fn frame(tag: u8) -> FrameRGBA {
    FrameRGBA {
        width: 1,
        height: 1,
        data: vec![tag, tag, tag, 255],
        premultiplied: true,
    }
}

#[test]
fn newest_render_wins() {
    let mut p = PreviewTarget::new();
    let old = p.begin();
    let new = p.begin();
    assert!(p.complete(new, frame(2)));
    assert!(!p.complete(old, frame(1)));
    assert_eq!(p.frame().unwrap().data[0], 2);
}

#[test]
fn stale_completion_leaves_nothing_shown() {
    let mut p = PreviewTarget::new();
    let old = p.begin();
    let _newer = p.begin();
    assert!(!p.is_current(old));
    assert!(!p.complete(old, frame(1)));
    assert!(p.frame().is_none());
}
