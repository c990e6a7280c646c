use super::*;
use crate::foundation::core::Aspect;
use crate::layout::region::resolve_text_region;
use crate::style::config::StyleConfiguration;

/// Monospace stand-in: every char advances half the font size.
fn mono(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

fn params(max_width: f32, max_height: f32) -> FitParams {
    FitParams {
        max_width,
        max_height,
        min_font_size: 28.0,
        max_font_size: 96.0,
        line_height: 1.18,
    }
}

#[test]
fn blank_caption_has_no_layout() {
    let mut m = mono;
    assert!(shrink_to_fit("", params(500.0, 500.0), &mut m).is_none());
    assert!(shrink_to_fit("  \n\t ", params(500.0, 500.0), &mut m).is_none());
}

#[test]
fn wraps_greedily_at_word_boundaries() {
    let mut m = mono;
    // 10 px per char at size 20, so 60 px fits six chars.
    let lines = wrap_lines("aa bb cc dd", 60.0, 20.0, &mut m);
    assert_eq!(lines, vec!["aa bb", "cc dd"]);
}

#[test]
fn overlong_word_sits_alone_unsplit() {
    let mut m = mono;
    let lines = wrap_lines("hi supercalifragilistic yo", 60.0, 20.0, &mut m);
    assert_eq!(lines, vec!["hi", "supercalifragilistic", "yo"]);
    let lines = wrap_lines("supercalifragilistic", 60.0, 20.0, &mut m);
    assert_eq!(lines, vec!["supercalifragilistic"]);
}

#[test]
fn explicit_breaks_and_blank_paragraphs_are_kept() {
    let mut m = mono;
    let lines = wrap_lines("one\n\ntwo\r\n   \nthree", 1000.0, 20.0, &mut m);
    assert_eq!(lines, vec!["one", "", "two", "", "three"]);
}

#[test]
fn whitespace_runs_collapse_inside_a_line() {
    let mut m = mono;
    let lines = wrap_lines("  a   b\tc  ", 1000.0, 20.0, &mut m);
    assert_eq!(lines, vec!["a b c"]);
}

#[test]
fn keeps_max_size_when_text_fits() {
    let mut m = mono;
    let r = shrink_to_fit("short", params(1000.0, 1000.0), &mut m).unwrap();
    assert_eq!(r.font_size, 96.0);
    assert_eq!(r.lines, vec!["short"]);
    assert!((r.block_height() - 96.0 * 1.18).abs() < 1e-3);
}

#[test]
fn shrinks_in_two_pixel_steps_until_it_fits() {
    let mut m = mono;
    // Three lines need 3 * size * 1.18 <= 300, i.e. size <= 84.7.
    let r = shrink_to_fit("a\nb\nc", params(1000.0, 300.0), &mut m).unwrap();
    assert_eq!(r.font_size, 84.0);
    assert!(r.block_height() <= 300.0);
}

#[test]
fn accepts_minimum_even_when_overflowing() {
    let mut m = mono;
    let text = "x\n".repeat(40);
    let r = shrink_to_fit(&text, params(1000.0, 100.0), &mut m).unwrap();
    assert_eq!(r.font_size, 28.0);
    assert_eq!(r.lines.len(), 40);
    assert!(r.block_height() > 100.0);
}

#[test]
fn odd_range_never_undershoots_minimum() {
    let mut m = mono;
    let p = FitParams {
        min_font_size: 28.0,
        max_font_size: 95.0,
        ..params(10.0, 1.0)
    };
    let r = shrink_to_fit("a b c d e f", p, &mut m).unwrap();
    assert_eq!(r.font_size, 28.0);
}

#[test]
fn font_size_always_within_bounds_and_idempotent() {
    let captions = [
        "One",
        "Tell a story for this frame: highlight the insight, add the benefit and close with a call to action.",
        "line one\nline two\n\nline four",
        "Pneumonoultramicroscopicsilicovolcanoconiosis",
    ];
    for caption in captions {
        for (w, h) in [(100.0, 50.0), (760.0, 320.0), (2000.0, 2000.0)] {
            let mut m = mono;
            let a = shrink_to_fit(caption, params(w, h), &mut m).unwrap();
            let b = shrink_to_fit(caption, params(w, h), &mut m).unwrap();
            assert_eq!(a, b);
            assert!((28.0..=96.0).contains(&a.font_size));
            for line in &a.lines {
                for word in line.split(' ') {
                    assert!(caption.contains(word), "word {word:?} was split");
                }
            }
        }
    }
}

#[test]
fn base_style_scenario_wraps_forty_chars() {
    let style = StyleConfiguration::default();
    let region = resolve_text_region(style.text_box(), Aspect::Square.canvas(), style.padding_ratio);
    let caption = "Every slide should tell one clear story!";
    assert_eq!(caption.chars().count(), 40);

    let p = FitParams {
        max_width: region.max_width() as f32,
        max_height: region.max_height() as f32,
        min_font_size: style.min_font_size,
        max_font_size: style.max_font_size,
        line_height: style.line_height,
    };
    let mut m = mono;
    let r = shrink_to_fit(caption, p, &mut m).unwrap();
    assert!(r.lines.len() >= 2);
    assert!(r.font_size <= 96.0 && r.font_size >= 28.0);
    assert!(r.block_height() <= region.max_height() as f32);
}

#[test]
fn unusable_bounds_produce_no_layout() {
    let mut m = mono;
    let broken = [
        FitParams {
            min_font_size: f32::NAN,
            ..params(500.0, 500.0)
        },
        FitParams {
            max_font_size: f32::INFINITY,
            ..params(500.0, 500.0)
        },
        FitParams {
            min_font_size: -4.0,
            ..params(500.0, 500.0)
        },
        FitParams {
            line_height: 0.0,
            ..params(500.0, 500.0)
        },
    ];
    for p in broken {
        assert!(shrink_to_fit("Hello there", p, &mut m).is_none(), "{p:?}");
    }
}

#[test]
fn huge_maximum_still_terminates_at_the_minimum() {
    let mut m = mono;
    let p = FitParams {
        max_font_size: 1.0e9,
        ..params(100.0, 10.0)
    };
    let layout = shrink_to_fit("Hello there", p, &mut m).unwrap();
    assert_eq!(layout.font_size, 28.0);
}
