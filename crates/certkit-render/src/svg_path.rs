//! SVG path-data parsing for icon objects.
//!
//! Icons carry their geometry as an SVG `d` attribute string. This parser
//! supports the M/L/H/V/C/Q/Z commands (absolute and relative) that icon sets
//! emit, producing a `tiny_skia::Path` in the path's own coordinate space;
//! the renderer fits that into the icon's box.

use tiny_skia::{Path, PathBuilder};

/// Parses SVG path data. Returns `None` when the data yields no segments;
/// unknown commands are skipped, malformed numbers read as 0.
pub fn parse_svg_path(data: &str) -> Option<Path> {
    let mut builder = PathBuilder::new();
    let mut current_x = 0.0f32;
    let mut current_y = 0.0f32;
    let mut start_x = 0.0f32;
    let mut start_y = 0.0f32;
    let mut subpath_active = false;

    let tokens = tokenize(data);
    let mut i = 0;

    let number = |token: &String| token.parse::<f32>().unwrap_or(0.0);
    let is_number = |token: &String| token.parse::<f32>().is_ok();

    while i < tokens.len() {
        let cmd = tokens[i].as_str();
        match cmd {
            "M" | "m" => {
                if i + 2 < tokens.len() {
                    let x = number(&tokens[i + 1]);
                    let y = number(&tokens[i + 2]);
                    if cmd == "m" {
                        current_x += x;
                        current_y += y;
                    } else {
                        current_x = x;
                        current_y = y;
                    }
                    start_x = current_x;
                    start_y = current_y;
                    builder.move_to(current_x, current_y);
                    subpath_active = true;
                    i += 3;
                } else {
                    i += 1;
                }
            }
            "L" | "l" => {
                let mut j = i + 1;
                while j + 1 < tokens.len() && is_number(&tokens[j]) && is_number(&tokens[j + 1]) {
                    let x = number(&tokens[j]);
                    let y = number(&tokens[j + 1]);
                    if cmd == "l" {
                        current_x += x;
                        current_y += y;
                    } else {
                        current_x = x;
                        current_y = y;
                    }
                    line_to(&mut builder, &mut subpath_active, current_x, current_y);
                    j += 2;
                }
                i = j.max(i + 1);
            }
            "H" | "h" => {
                if i + 1 < tokens.len() {
                    let x = number(&tokens[i + 1]);
                    if cmd == "h" {
                        current_x += x;
                    } else {
                        current_x = x;
                    }
                    line_to(&mut builder, &mut subpath_active, current_x, current_y);
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "V" | "v" => {
                if i + 1 < tokens.len() {
                    let y = number(&tokens[i + 1]);
                    if cmd == "v" {
                        current_y += y;
                    } else {
                        current_y = y;
                    }
                    line_to(&mut builder, &mut subpath_active, current_x, current_y);
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "C" | "c" => {
                let mut j = i + 1;
                while j + 5 < tokens.len() && (j..=j + 5).all(|k| is_number(&tokens[k])) {
                    let mut cp1_x = number(&tokens[j]);
                    let mut cp1_y = number(&tokens[j + 1]);
                    let mut cp2_x = number(&tokens[j + 2]);
                    let mut cp2_y = number(&tokens[j + 3]);
                    let mut end_x = number(&tokens[j + 4]);
                    let mut end_y = number(&tokens[j + 5]);
                    if cmd == "c" {
                        cp1_x += current_x;
                        cp1_y += current_y;
                        cp2_x += current_x;
                        cp2_y += current_y;
                        end_x += current_x;
                        end_y += current_y;
                    }
                    if !subpath_active {
                        builder.move_to(current_x, current_y);
                        subpath_active = true;
                    }
                    builder.cubic_to(cp1_x, cp1_y, cp2_x, cp2_y, end_x, end_y);
                    current_x = end_x;
                    current_y = end_y;
                    j += 6;
                }
                i = j.max(i + 1);
            }
            "Q" | "q" => {
                let mut j = i + 1;
                while j + 3 < tokens.len() && (j..=j + 3).all(|k| is_number(&tokens[k])) {
                    let mut cp_x = number(&tokens[j]);
                    let mut cp_y = number(&tokens[j + 1]);
                    let mut end_x = number(&tokens[j + 2]);
                    let mut end_y = number(&tokens[j + 3]);
                    if cmd == "q" {
                        cp_x += current_x;
                        cp_y += current_y;
                        end_x += current_x;
                        end_y += current_y;
                    }
                    if !subpath_active {
                        builder.move_to(current_x, current_y);
                        subpath_active = true;
                    }
                    builder.quad_to(cp_x, cp_y, end_x, end_y);
                    current_x = end_x;
                    current_y = end_y;
                    j += 4;
                }
                i = j.max(i + 1);
            }
            "Z" | "z" => {
                if subpath_active {
                    builder.close();
                    subpath_active = false;
                }
                current_x = start_x;
                current_y = start_y;
                i += 1;
            }
            _ => i += 1,
        }
    }

    builder.finish()
}

fn line_to(builder: &mut PathBuilder, subpath_active: &mut bool, x: f32, y: f32) {
    if !*subpath_active {
        builder.move_to(x, y);
        *subpath_active = true;
    } else {
        builder.line_to(x, y);
    }
}

/// Splits path data into command letters and number literals. A `-` starts a
/// new number unless it follows an exponent marker, so compact icon data like
/// `M10-5l-2-2` tokenizes correctly.
fn tokenize(data: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in data.chars() {
        match ch {
            'M' | 'm' | 'L' | 'l' | 'H' | 'h' | 'V' | 'v' | 'C' | 'c' | 'S' | 's' | 'Q' | 'q'
            | 'T' | 't' | 'A' | 'a' | 'Z' | 'z' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(ch.to_string());
            }
            ' ' | ',' | '\n' | '\r' | '\t' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            '-' => {
                if !current.is_empty() && !current.ends_with('e') && !current.ends_with('E') {
                    tokens.push(std::mem::take(&mut current));
                }
                current.push('-');
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
