use super::*;

#[test]
fn stop_alphas_match_the_wash_definitions() {
    // 0.05, 0.35, 0.6 and 0, 0.45, 0.75 of 255, rounded.
    assert_eq!(BASE_WASH.map(|s| s.color.a), [13, 89, 153]);
    assert_eq!(OVERLAY_WASH.map(|s| s.color.a), [0, 115, 191]);
}

#[test]
fn sample_hits_stops_and_interpolates_between() {
    assert_eq!(sample(&OVERLAY_WASH, 0.0).a, 0);
    assert_eq!(sample(&OVERLAY_WASH, 0.65).a, 115);
    assert_eq!(sample(&OVERLAY_WASH, 1.0).a, 191);
    let mid = sample(&OVERLAY_WASH, 0.325).a;
    assert!((57..=58).contains(&mid), "{mid}");
    assert_eq!(sample(&BASE_WASH, -1.0), BASE_WASH[0].color);
    assert_eq!(sample(&BASE_WASH, 2.0), BASE_WASH[2].color);
    assert_eq!(sample(&[], 0.5), Rgba8::default());
}

#[test]
fn gradient_paint_has_requested_size() {
    let img = gradient_paint(&BASE_WASH, 5, 9).unwrap();
    let vello_cpu::ImageSource::Pixmap(p) = &img.image else {
        panic!("expected pixmap paint");
    };
    assert_eq!((p.width(), p.height()), (5, 9));
}

#[test]
fn pixmap_length_mismatch_is_rejected() {
    assert!(premul_bytes_to_pixmap(&[0u8; 12], 2, 2).is_err());
}
