//! System font lookup.
//!
//! Maps a [`FontSpec`] to a rusttype font through the system font database.
//! Fonts are loaded once and leaked; the cache hands out `'static` references
//! so layout code never deals with lifetimes.

use std::{
    collections::HashMap,
    fs,
    sync::{Mutex, OnceLock},
};

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::Font;
use tracing::warn;

use certkit_core::{FontSpec, FontStyle};

#[derive(Clone, Eq, PartialEq, Hash)]
struct FontKey {
    family: String,
    weight: u16,
    style: u8,
}

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// Resolves the font for a spec, consulting the system database once per
/// distinct (family, weight, style) and caching the outcome.
///
/// Returns `None` when neither the requested family nor the sans-serif
/// fallback resolves; callers skip the text paint for that frame. Small-caps
/// has no rusttype support and renders as the normal variant.
pub fn get_font_for(spec: &FontSpec) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<HashMap<FontKey, Option<&'static Font<'static>>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let key = FontKey {
        family: spec.font_family.trim().to_ascii_lowercase(),
        weight: spec.font_weight.to_number(),
        style: spec.font_style as u8,
    };

    if let Some(cached) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&key) {
        return *cached;
    }

    let loaded = load_font_from_system(spec).map(|font| {
        let font_ref: &'static Font<'static> = Box::leak(Box::new(font));
        font_ref
    });
    if loaded.is_none() {
        warn!(family = %spec.font_family, "no system font resolves, text will be skipped");
    }

    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(key, loaded);
    loaded
}

fn load_font_from_system(spec: &FontSpec) -> Option<Font<'static>> {
    let families = match spec.font_family.trim().to_ascii_lowercase().as_str() {
        "" | "sans-serif" => vec![Family::SansSerif],
        "serif" => vec![Family::Serif],
        "monospace" => vec![Family::Monospace],
        "cursive" => vec![Family::Cursive],
        "fantasy" => vec![Family::Fantasy],
        _ => vec![Family::Name(spec.font_family.trim()), Family::SansSerif],
    };

    let query = Query {
        families: &families,
        weight: Weight(spec.font_weight.to_number()),
        stretch: Stretch::Normal,
        style: match spec.font_style {
            FontStyle::Normal => Style::Normal,
            FontStyle::Italic => Style::Italic,
            FontStyle::Oblique => Style::Oblique,
        },
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}
