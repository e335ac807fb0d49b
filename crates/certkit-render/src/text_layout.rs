//! Text layout and glyph painting.
//!
//! Implements the word-wrapping, alignment and justification semantics the
//! editor's text boxes use, then rasterizes glyphs straight into the pixmap.
//! tiny-skia has no text support, so glyph coverage is alpha-blended into the
//! premultiplied pixel buffer directly.

use rusttype::{point as rt_point, Font, Scale};
use tiny_skia::Pixmap;
use tracing::warn;

use certkit_core::{FontSpec, ScrollPosition, TextAlignHorizontal, TextAlignVertical};

use crate::color::parse_color;
use crate::font_manager;

/// A text box to lay out and paint, in design-space coordinates.
#[derive(Debug, Clone, Copy)]
pub struct TextBlock<'a> {
    pub text: &'a str,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub font: &'a FontSpec,
    pub align_horizontal: TextAlignHorizontal,
    pub align_vertical: TextAlignVertical,
    pub justify: bool,
    /// Object opacity percentage, folded into the glyph color.
    pub opacity: f64,
}

struct Word {
    text: String,
    width: f32,
}

/// Lays out and paints a text block.
///
/// `scale` is the zoom factor (zoom / 100) and `scroll` the screen-space pan;
/// glyphs are rasterized at final screen resolution rather than scaled as
/// pixels, so text stays crisp at any zoom. Missing fonts and unparsable
/// colors skip the paint for this frame.
pub fn draw_text_block(pixmap: &mut Pixmap, block: &TextBlock, scale: f64, scroll: ScrollPosition) {
    if block.text.is_empty() || block.width <= 0.0 || block.height <= 0.0 {
        return;
    }
    let Some(font) = font_manager::get_font_for(block.font) else {
        return;
    };
    let Some(color) = parse_color(&block.font.font_color_hex, block.opacity) else {
        return;
    };

    let font_scale = Scale::uniform((block.font.font_size * scale) as f32);
    let line_height = (block.font.font_size * block.font.font_line_height_ratio * scale) as f32;
    if !line_height.is_finite() || line_height <= 0.0 {
        warn!("non-positive line height, skipping text block");
        return;
    }

    let box_x = (block.x * scale + scroll.x) as f32;
    let box_y = (block.y * scale + scroll.y) as f32;
    let box_width = (block.width * scale) as f32;
    let box_height = (block.height * scale) as f32;

    let space_width = advance_width(font, font_scale, ' ');

    // Wrap each paragraph (explicit newline) independently; justification
    // never stretches a paragraph's last line.
    let mut lines: Vec<(Vec<Word>, bool)> = Vec::new();
    for paragraph in block.text.split('\n') {
        let words: Vec<Word> = paragraph
            .split_whitespace()
            .map(|w| Word {
                text: w.to_string(),
                width: measure_word(font, font_scale, w),
            })
            .collect();
        if words.is_empty() {
            lines.push((Vec::new(), true));
            continue;
        }

        let mut current: Vec<Word> = Vec::new();
        let mut current_width = 0.0f32;
        for word in words {
            let extra = if current.is_empty() {
                word.width
            } else {
                space_width + word.width
            };
            if !current.is_empty() && current_width + extra > box_width {
                lines.push((std::mem::take(&mut current), false));
                current_width = word.width;
                current.push(word);
            } else {
                current_width += extra;
                current.push(word);
            }
        }
        lines.push((current, true));
    }

    let v_metrics = font.v_metrics(font_scale);
    let glyph_extent = v_metrics.ascent - v_metrics.descent;
    let block_height = lines.len() as f32 * line_height;
    let top = match block.align_vertical {
        TextAlignVertical::Top => box_y,
        TextAlignVertical::Middle => box_y + (box_height - block_height) / 2.0,
        TextAlignVertical::Bottom => box_y + box_height - block_height,
    };

    for (index, (words, ends_paragraph)) in lines.iter().enumerate() {
        if words.is_empty() {
            continue;
        }
        let natural: f32 = words.iter().map(|w| w.width).sum::<f32>()
            + space_width * (words.len() - 1) as f32;

        let (start_x, gap) = if block.justify && !ends_paragraph && words.len() > 1 {
            let slack = (box_width - natural).max(0.0);
            (box_x, space_width + slack / (words.len() - 1) as f32)
        } else {
            let start = match block.align_horizontal {
                TextAlignHorizontal::Left => box_x,
                TextAlignHorizontal::Center => box_x + (box_width - natural) / 2.0,
                TextAlignHorizontal::Right => box_x + box_width - natural,
            };
            (start, space_width)
        };

        let line_top = top + index as f32 * line_height;
        let baseline = line_top + (line_height - glyph_extent) / 2.0 + v_metrics.ascent;

        let mut pen_x = start_x;
        for word in words {
            paint_word(pixmap, font, font_scale, &word.text, pen_x, baseline, color);
            pen_x += word.width + gap;
        }
    }
}

fn advance_width(font: &Font<'_>, scale: Scale, ch: char) -> f32 {
    font.glyph(ch).scaled(scale).h_metrics().advance_width
}

/// Measures through the same `layout` pass painting uses, so pair kerning
/// affects measurement and paint identically.
fn measure_word(font: &Font<'_>, scale: Scale, word: &str) -> f32 {
    font.layout(word, scale, rt_point(0.0, 0.0))
        .last()
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

fn paint_word(
    pixmap: &mut Pixmap,
    font: &Font<'_>,
    scale: Scale,
    word: &str,
    x: f32,
    baseline: f32,
    color: tiny_skia::Color,
) {
    let width = pixmap.width();
    let height = pixmap.height();
    let red = color.red();
    let green = color.green();
    let blue = color.blue();
    let alpha = color.alpha();
    let data = pixmap.data_mut();

    for glyph in font.layout(word, scale, rt_point(x, baseline)) {
        let Some(bounding_box) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = gx as i32 + bounding_box.min.x;
            let py = gy as i32 + bounding_box.min.y;
            if px < 0 || px >= width as i32 || py < 0 || py >= height as i32 {
                return;
            }
            let src_alpha = coverage * alpha;
            if src_alpha <= 0.0 {
                return;
            }
            // Source-over in premultiplied space.
            let idx = ((py as u32 * width + px as u32) * 4) as usize;
            let pixel = &mut data[idx..idx + 4];
            let inv = 1.0 - src_alpha;
            pixel[0] = (red * src_alpha * 255.0 + pixel[0] as f32 * inv) as u8;
            pixel[1] = (green * src_alpha * 255.0 + pixel[1] as f32 * inv) as u8;
            pixel[2] = (blue * src_alpha * 255.0 + pixel[2] as f32 * inv) as u8;
            pixel[3] = (src_alpha * 255.0 + pixel[3] as f32 * inv) as u8;
        });
    }
}
