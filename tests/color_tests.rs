// Host-side tests for hex parsing, shading and rgba formatting.

use liquid_core::color::{hex_to_rgba, shade, ColorError, Rgb};

#[test]
fn parses_six_and_three_digit_hex() {
    assert_eq!(Rgb::parse_hex("#7a0a10"), Ok(Rgb { r: 122, g: 10, b: 16 }));
    assert_eq!(Rgb::parse_hex("#FFF"), Ok(Rgb { r: 255, g: 255, b: 255 }));
    assert_eq!(Rgb::parse_hex("1a2"), Ok(Rgb { r: 0x11, g: 0xaa, b: 0x22 }));
}

#[test]
fn rejects_malformed_hex() {
    assert!(matches!(Rgb::parse_hex("#12345"), Err(ColorError::Length(_))));
    assert!(matches!(Rgb::parse_hex("#zzzzzz"), Err(ColorError::Digits(_))));
    assert!(matches!(Rgb::parse_hex("red"), Err(ColorError::Digits(_))));
    assert!(matches!(Rgb::parse_hex(""), Err(ColorError::Length(_))));
}

#[test]
fn unparsable_colors_fall_back_to_black() {
    assert_eq!(Rgb::from_hex_lossy("rebeccapurple"), Rgb::BLACK);
    assert_eq!(shade("not a color", 0.5), "#000000");
    assert_eq!(hex_to_rgba("", 0.3), "rgba(0,0,0,0.3)");
}

#[test]
fn shade_scales_and_clamps_channels() {
    assert_eq!(shade("#7a0a10", 0.4), "#aa0e16");
    assert_eq!(shade("#7a0a10", -0.25), "#5b070c");
    assert_eq!(shade("#c8c8c8", 0.5), "#ffffff");
    assert_eq!(shade("#808080", -2.0), "#000000");
    assert_eq!(shade("#123456", 0.0), "#123456");
}

#[test]
fn rgba_uses_decimal_channels() {
    assert_eq!(hex_to_rgba("#ffffff", 0.5), "rgba(255,255,255,0.5)");
    assert_eq!(hex_to_rgba("#0a0", 1.0), "rgba(0,170,0,1)");
}

#[test]
fn errors_name_the_input() {
    let err = Rgb::parse_hex("#12").unwrap_err();
    assert!(err.to_string().contains("#12"));
}
