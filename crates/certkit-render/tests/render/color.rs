use certkit_render::parse_color;

#[test]
fn test_six_digit_hex() {
    let color = parse_color("#ff0000", 100.0).unwrap();
    assert_eq!(color.red(), 1.0);
    assert_eq!(color.green(), 0.0);
    assert_eq!(color.blue(), 0.0);
    assert_eq!(color.alpha(), 1.0);
}

#[test]
fn test_short_hex_expands() {
    let short = parse_color("#f80", 100.0).unwrap();
    let long = parse_color("#ff8800", 100.0).unwrap();
    assert_eq!(short.red(), long.red());
    assert_eq!(short.green(), long.green());
    assert_eq!(short.blue(), long.blue());
}

#[test]
fn test_opacity_folds_into_alpha() {
    let color = parse_color("#ff0000", 50.0).unwrap();
    assert!((color.alpha() - 0.5).abs() < 0.01);

    // An 8-digit alpha multiplies with the object opacity.
    let color = parse_color("#ff000080", 50.0).unwrap();
    assert!((color.alpha() - 0.25).abs() < 0.01);
}

#[test]
fn test_transparent_and_malformed_are_none() {
    assert!(parse_color("transparent", 100.0).is_none());
    assert!(parse_color("Transparent", 100.0).is_none());
    assert!(parse_color("red", 100.0).is_none());
    assert!(parse_color("#12345", 100.0).is_none());
    assert!(parse_color("#gggggg", 100.0).is_none());
    assert!(parse_color("", 100.0).is_none());
}
