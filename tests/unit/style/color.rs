use super::*;

#[test]
fn parses_short_long_and_alpha_forms() {
    assert_eq!(
        "#f8fafc".parse::<HexColor>().unwrap(),
        HexColor::rgb(0xf8, 0xfa, 0xfc)
    );
    assert_eq!("#FFF".parse::<HexColor>().unwrap(), HexColor::rgb(255, 255, 255));
    assert_eq!("0a0".parse::<HexColor>().unwrap(), HexColor::rgb(0, 0xaa, 0));
    let c = "#02061780".parse::<HexColor>().unwrap();
    assert_eq!(c.rgba8().a, 0x80);
}

#[test]
fn rejects_malformed_input() {
    assert!("#12".parse::<HexColor>().is_err());
    assert!("#zzzzzz".parse::<HexColor>().is_err());
    assert!("#ééé".parse::<HexColor>().is_err());
}

#[test]
fn serde_uses_hex_strings() {
    let c: HexColor = serde_json::from_str("\"#020617\"").unwrap();
    assert_eq!(c, HexColor::rgb(2, 6, 23));
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#020617\"");

    let translucent = HexColor(crate::foundation::core::Rgba8 {
        r: 1,
        g: 2,
        b: 3,
        a: 4,
    });
    assert_eq!(translucent.to_string(), "#01020304");
    assert!(serde_json::from_str::<HexColor>("\"nope\"").is_err());
}
