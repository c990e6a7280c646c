use super::*;

#[test]
fn default_matches_base_preset_and_validates() {
    let s = StyleConfiguration::default();
    s.validate().unwrap();
    assert_eq!(s.font_family, "Inter");
    assert_eq!(s.font_weight, 500);
    assert_eq!(s.text_align, TextAlign::Center);
    assert!(s.overlay_enabled);
    assert!(s.background().is_none());
    assert!(s.stroke().is_none());
    assert_eq!(s.text_box().width, 0.84);
}

#[test]
fn json_uses_control_layer_keys_and_aliases() {
    let s = StyleConfiguration::from_json_str(
        r##"{
            "fontFamily": "Lora",
            "fontWeight": 700,
            "textAlign": "left",
            "backgroundEnabled": true,
            "backgroundColor": "#112233",
            "backgroundOpacity": 0.4
        }"##,
    )
    .unwrap();
    assert_eq!(s.font_family, "Lora");
    assert_eq!(s.text_align, TextAlign::Start);
    let bg = s.background().unwrap();
    assert_eq!(bg.color, Rgba8::rgb(0x11, 0x22, 0x33));
    assert_eq!(bg.opacity, 0.4);
    // Missing keys take the base preset values.
    assert_eq!(s.max_font_size, 96.0);

    let out = serde_json::to_value(&s).unwrap();
    assert_eq!(out["textAlign"], "start");
    assert_eq!(out["textBoxWidth"], 0.84);
}

#[test]
fn validate_rejects_broken_invariants() {
    let bad_box = StyleConfiguration {
        text_box_x: 0.5,
        text_box_width: 0.6,
        ..StyleConfiguration::default()
    };
    assert!(bad_box.validate().is_err());

    let narrow = StyleConfiguration {
        text_box_width: 0.1,
        ..StyleConfiguration::default()
    };
    assert!(narrow.validate().is_err());

    let inverted = StyleConfiguration {
        min_font_size: 100.0,
        ..StyleConfiguration::default()
    };
    assert!(inverted.validate().is_err());

    let odd_weight = StyleConfiguration {
        font_weight: 450,
        ..StyleConfiguration::default()
    };
    assert!(odd_weight.validate().is_err());

    let nan = StyleConfiguration {
        line_height: f32::NAN,
        ..StyleConfiguration::default()
    };
    assert!(nan.validate().is_err());
}

#[test]
fn sanitized_repairs_into_domain() {
    let wild = StyleConfiguration {
        font_family: "  ".to_owned(),
        font_weight: 940,
        background_opacity: 2.0,
        stroke_width: 0.0,
        padding_ratio: f64::NAN,
        line_height: 9.0,
        max_font_size: 20.0,
        min_font_size: 40.0,
        text_box_x: 0.9,
        text_box_y: -1.0,
        text_box_width: 0.5,
        text_box_height: 0.05,
        ..StyleConfiguration::default()
    };
    let s = wild.sanitized();
    s.validate().unwrap();
    assert_eq!(s.font_family, "Inter");
    assert_eq!(s.font_weight, 700);
    assert_eq!(s.background_opacity, 0.95);
    assert_eq!(s.stroke_width, 1.0);
    assert_eq!(s.padding_ratio, 0.08);
    assert_eq!(s.line_height, 1.6);
    assert_eq!((s.min_font_size, s.max_font_size), (20.0, 40.0));
    assert_eq!(s.text_box_width, 0.5);
    assert_eq!(s.text_box_height, MIN_BOX_HEIGHT);
    assert_eq!(s.text_box_x, 0.5);
    assert_eq!(s.text_box_y, 0.0);
}

#[test]
fn validate_enforces_control_ranges() {
    let cases = [
        StyleConfiguration {
            background_opacity: 1.0,
            ..StyleConfiguration::default()
        },
        StyleConfiguration {
            line_height: 2.0,
            ..StyleConfiguration::default()
        },
        StyleConfiguration {
            stroke_width: 0.0,
            ..StyleConfiguration::default()
        },
        StyleConfiguration {
            padding_ratio: 0.3,
            ..StyleConfiguration::default()
        },
    ];
    for s in cases {
        assert!(s.validate().is_err(), "{s:?}");
    }
}

#[test]
fn sanitized_leaves_accepted_styles_untouched() {
    let styles = [
        StyleConfiguration::default(),
        StyleConfiguration {
            font_family: " Lora ".to_owned(),
            font_weight: 400,
            background_enabled: true,
            background_opacity: 0.95,
            stroke_enabled: true,
            stroke_width: 12.0,
            padding_ratio: 0.04,
            line_height: 1.6,
            min_font_size: 0.5,
            max_font_size: 0.5,
            ..StyleConfiguration::default()
        },
        StyleConfiguration {
            background_opacity: 0.1,
            stroke_width: 1.0,
            padding_ratio: 0.2,
            line_height: 1.0,
            text_align: TextAlign::End,
            // Slider noise just past the right edge.
            text_box_x: 0.3,
            text_box_width: 0.7 + 1e-12,
            ..StyleConfiguration::default()
        },
    ];
    for s in styles {
        s.validate().unwrap();
        assert_eq!(s.sanitized(), s);
    }
}

#[test]
fn patch_replaces_only_given_fields() {
    let base = StyleConfiguration::default();
    let next = base.patched(&StylePatch {
        font_weight: Some(640),
        stroke_enabled: Some(true),
        ..StylePatch::default()
    });
    assert_eq!(next.font_weight, 600);
    assert!(next.stroke().is_some());
    assert_eq!(next.font_family, base.font_family);
    assert_eq!(next.text_box(), base.text_box());
}

#[test]
fn box_patch_clamps_size_then_position() {
    let base = StyleConfiguration::default();
    let next = base.patched(&StylePatch {
        text_box_x: Some(0.95),
        text_box_width: Some(0.1),
        ..StylePatch::default()
    });
    assert_eq!(next.text_box_width, MIN_BOX_WIDTH);
    assert!((next.text_box_x - 0.8).abs() < 1e-12);
    next.validate().unwrap();

    let moved = base.patched(&StylePatch::text_box(TextBox {
        x: 0.0,
        y: 0.9,
        width: 1.0,
        height: 0.3,
    }));
    assert!((moved.text_box_y - 0.7).abs() < 1e-12);
    assert_eq!(moved.text_box_width, 1.0);
}
