use certkit_render::parse_svg_path;

#[test]
fn test_square_path_bounds() {
    let path = parse_svg_path("M0 0 L10 0 L10 10 L0 10 Z").unwrap();
    let bounds = path.bounds();
    assert_eq!(
        (bounds.left(), bounds.top(), bounds.right(), bounds.bottom()),
        (0.0, 0.0, 10.0, 10.0)
    );
}

#[test]
fn test_compact_negative_coordinates() {
    // A minus sign separates numbers without whitespace or commas.
    let path = parse_svg_path("M10-5l-2-2").unwrap();
    let bounds = path.bounds();
    assert_eq!((bounds.left(), bounds.top()), (8.0, -7.0));
    assert_eq!((bounds.right(), bounds.bottom()), (10.0, -5.0));
}

#[test]
fn test_relative_and_shorthand_commands() {
    let path = parse_svg_path("M5,5 h10 v10 h-10 z").unwrap();
    let bounds = path.bounds();
    assert_eq!(
        (bounds.left(), bounds.top(), bounds.right(), bounds.bottom()),
        (5.0, 5.0, 15.0, 15.0)
    );
}

#[test]
fn test_curves_extend_bounds() {
    let path = parse_svg_path("M0 0 C0 20 40 20 40 0").unwrap();
    let bounds = path.bounds();
    assert_eq!((bounds.left(), bounds.right()), (0.0, 40.0));
    assert!(bounds.bottom() > 0.0);

    assert!(parse_svg_path("M0 0 Q10 10 20 0").is_some());
}

#[test]
fn test_repeated_coordinate_pairs() {
    // "L" keeps consuming pairs until the next command letter.
    let path = parse_svg_path("M0 0 L10 0 20 5 30 0").unwrap();
    let bounds = path.bounds();
    assert_eq!((bounds.right(), bounds.bottom()), (30.0, 5.0));
}

#[test]
fn test_garbage_is_none() {
    assert!(parse_svg_path("").is_none());
    assert!(parse_svg_path("abc").is_none());
    assert!(parse_svg_path("10 20 30").is_none());
    assert!(parse_svg_path("Z").is_none());
}

#[test]
fn test_unsupported_commands_are_skipped() {
    // Arcs are not supported; their parameters are ignored but the
    // commands around them still build a path.
    let path = parse_svg_path("M0 0 L10 0 A5 5 0 0 1 20 10 L10 10").unwrap();
    let bounds = path.bounds();
    assert!(bounds.right() >= 10.0);
}
