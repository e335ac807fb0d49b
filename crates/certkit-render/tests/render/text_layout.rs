use tiny_skia::Pixmap;

use certkit_core::{FontSpec, ScrollPosition, TextAlignHorizontal, TextAlignVertical};
use certkit_render::font_manager::get_font_for;
use certkit_render::{draw_text_block, TextBlock};

fn painted_extent(pixmap: &Pixmap) -> Option<(u32, u32)> {
    let mut min_x = None;
    let mut max_x = None;
    for y in 0..pixmap.height() {
        for x in 0..pixmap.width() {
            if pixmap.pixel(x, y).map(|p| p.alpha()).unwrap_or(0) > 0 {
                min_x = Some(min_x.map_or(x, |m: u32| m.min(x)));
                max_x = Some(max_x.map_or(x, |m: u32| m.max(x)));
            }
        }
    }
    Some((min_x?, max_x?))
}

#[test]
fn test_right_aligned_text_ends_at_the_box_edge() {
    let font = FontSpec::default();
    if get_font_for(&font).is_none() {
        // No system fonts on this machine; nothing to measure.
        return;
    }

    let block = TextBlock {
        text: "Wavelength",
        x: 50.0,
        y: 50.0,
        width: 300.0,
        height: 100.0,
        font: &font,
        align_horizontal: TextAlignHorizontal::Right,
        align_vertical: TextAlignVertical::Top,
        justify: false,
        opacity: 100.0,
    };
    let mut pixmap = Pixmap::new(500, 200).unwrap();
    draw_text_block(&mut pixmap, &block, 1.0, ScrollPosition::default());

    let (min_x, max_x) = painted_extent(&pixmap).unwrap();
    // Measurement and paint share one layout pass, so a right-aligned word
    // cannot drift past the box edge (x = 350); glyph overhang gets a couple
    // of pixels of slack.
    assert!(max_x <= 352, "text painted out to x = {max_x}");
    assert!(max_x >= 330, "text ended early at x = {max_x}");
    assert!(min_x >= 50, "text started left of the box at x = {min_x}");
}
