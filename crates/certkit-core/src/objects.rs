//! Canvas object model.
//!
//! [`CanvasObject`] is a tagged union over the nine element kinds a
//! certificate template can contain. The serde representation matches the
//! persisted template documents: one flat JSON object per element, camelCase
//! field names, and a kebab-case `type` discriminator (`"free-draw"` etc.),
//! so existing documents load unchanged.

use std::sync::Arc;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::geometry::{ObjectDimensions, Point};

/// Discriminator for the nine object kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Rectangle,
    Ellipse,
    FreeDraw,
    Line,
    Arrow,
    Text,
    Icon,
    Image,
    Attribute,
}

impl ObjectKind {
    /// The serialized `type` tag for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Rectangle => "rectangle",
            ObjectKind::Ellipse => "ellipse",
            ObjectKind::FreeDraw => "free-draw",
            ObjectKind::Line => "line",
            ObjectKind::Arrow => "arrow",
            ObjectKind::Text => "text",
            ObjectKind::Icon => "icon",
            ObjectKind::Image => "image",
            ObjectKind::Attribute => "attribute",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_opacity() -> f64 {
    100.0
}

/// Fields shared by every object kind.
///
/// `width`/`height` are always >= 0; lines and arrows encode direction through
/// their endpoint derivation, not through negative extents. `opacity` is a
/// percentage in 0..=100.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectCommon {
    /// Uuid string. Empty until the store assigns one on append.
    #[serde(default)]
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl ObjectCommon {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: String::new(),
            x,
            y,
            width,
            height,
            opacity: 100.0,
        }
    }

    fn clamp(&mut self) {
        self.width = self.width.max(0.0);
        self.height = self.height.max(0.0);
        self.opacity = self.opacity.clamp(0.0, 100.0);
    }
}

/// Font styling shared by text and attribute objects. Flattened into the
/// element JSON (`fontColorHex`, `fontSize`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    pub font_color_hex: String,
    pub font_size: f64,
    pub font_family: String,
    pub font_style: FontStyle,
    pub font_variant: FontVariant,
    pub font_weight: FontWeight,
    /// Line height as a multiple of the font size.
    pub font_line_height_ratio: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            font_color_hex: "#000000".to_string(),
            font_size: 32.0,
            font_family: "sans-serif".to_string(),
            font_style: FontStyle::Normal,
            font_variant: FontVariant::Normal,
            font_weight: FontWeight::Normal,
            font_line_height_ratio: 1.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontVariant {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "small-caps")]
    SmallCaps,
}

/// CSS-style weight keywords plus the nine numeric classes, serialized as the
/// strings the original documents carry (`"bold"`, `"300"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "bold")]
    Bold,
    #[serde(rename = "bolder")]
    Bolder,
    #[serde(rename = "lighter")]
    Lighter,
    #[serde(rename = "100")]
    W100,
    #[serde(rename = "200")]
    W200,
    #[serde(rename = "300")]
    W300,
    #[serde(rename = "400")]
    W400,
    #[serde(rename = "500")]
    W500,
    #[serde(rename = "600")]
    W600,
    #[serde(rename = "700")]
    W700,
    #[serde(rename = "800")]
    W800,
    #[serde(rename = "900")]
    W900,
}

impl FontWeight {
    /// Numeric OpenType weight class for font matching.
    pub fn to_number(self) -> u16 {
        match self {
            FontWeight::Normal | FontWeight::W400 => 400,
            FontWeight::Bold | FontWeight::W700 => 700,
            FontWeight::Bolder | FontWeight::W800 => 800,
            FontWeight::Lighter | FontWeight::W300 => 300,
            FontWeight::W100 => 100,
            FontWeight::W200 => 200,
            FontWeight::W500 => 500,
            FontWeight::W600 => 600,
            FontWeight::W900 => 900,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignHorizontal {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignVertical {
    #[default]
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleObject {
    #[serde(flatten)]
    pub common: ObjectCommon,
    pub background_color_hex: String,
    pub stroke_color_hex: String,
    pub stroke_width: f64,
    pub border_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EllipseObject {
    #[serde(flatten)]
    pub common: ObjectCommon,
    pub background_color_hex: String,
    pub stroke_color_hex: String,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeDrawObject {
    #[serde(flatten)]
    pub common: ObjectCommon,
    pub stroke_color_hex: String,
    pub stroke_width: f64,
    /// Design-space stroke points, in draw order.
    pub free_draw_points: Vec<Point>,
}

/// Straight segment from `(x, y)` to `(x + width, y + height)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineObject {
    #[serde(flatten)]
    pub common: ObjectCommon,
    pub stroke_color_hex: String,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowObject {
    #[serde(flatten)]
    pub common: ObjectCommon,
    pub stroke_color_hex: String,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextObject {
    #[serde(flatten)]
    pub common: ObjectCommon,
    pub text: String,
    #[serde(default)]
    pub text_justify: bool,
    #[serde(default)]
    pub text_align_horizontal: TextAlignHorizontal,
    #[serde(default)]
    pub text_align_vertical: TextAlignVertical,
    #[serde(flatten)]
    pub font: FontSpec,
}

/// Placeholder bound to an attendee property at generation time; `text` holds
/// the property key while designing and the resolved literal once bound.
/// Always rendered center/middle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeObject {
    #[serde(flatten)]
    pub common: ObjectCommon,
    pub text: String,
    #[serde(flatten)]
    pub font: FontSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconObject {
    #[serde(flatten)]
    pub common: ObjectCommon,
    pub background_color_hex: String,
    /// SVG path data, fitted to the object's box at render time.
    pub svg_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageObject {
    #[serde(flatten)]
    pub common: ObjectCommon,
    pub image_url: String,
    /// Decoded pixels; `None` until an out-of-band decode completes.
    /// Never serialized.
    #[serde(skip)]
    pub bitmap: Option<Arc<RgbaImage>>,
}

/// A single canvas element. Discriminated by the `type` field in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CanvasObject {
    #[serde(rename = "rectangle")]
    Rectangle(RectangleObject),
    #[serde(rename = "ellipse")]
    Ellipse(EllipseObject),
    #[serde(rename = "free-draw")]
    FreeDraw(FreeDrawObject),
    #[serde(rename = "line")]
    Line(LineObject),
    #[serde(rename = "arrow")]
    Arrow(ArrowObject),
    #[serde(rename = "text")]
    Text(TextObject),
    #[serde(rename = "icon")]
    Icon(IconObject),
    #[serde(rename = "image")]
    Image(ImageObject),
    #[serde(rename = "attribute")]
    Attribute(AttributeObject),
}

impl CanvasObject {
    /// Creates a zero-size object of `kind` at a design-space point, with the
    /// editor's default styling. Used as the provisional object when a draw
    /// gesture starts.
    pub fn new_at(kind: ObjectKind, x: f64, y: f64) -> Self {
        let common = ObjectCommon::new(x, y, 0.0, 0.0);
        match kind {
            ObjectKind::Rectangle => CanvasObject::Rectangle(RectangleObject {
                common,
                background_color_hex: "#000000".to_string(),
                stroke_color_hex: "transparent".to_string(),
                stroke_width: 0.0,
                border_radius: 0.0,
            }),
            ObjectKind::Ellipse => CanvasObject::Ellipse(EllipseObject {
                common,
                background_color_hex: "#000000".to_string(),
                stroke_color_hex: "transparent".to_string(),
                stroke_width: 0.0,
            }),
            ObjectKind::FreeDraw => CanvasObject::FreeDraw(FreeDrawObject {
                common,
                stroke_color_hex: "#000000".to_string(),
                stroke_width: 2.0,
                free_draw_points: vec![Point::new(x, y)],
            }),
            ObjectKind::Line => CanvasObject::Line(LineObject {
                common,
                stroke_color_hex: "#000000".to_string(),
                stroke_width: 2.0,
            }),
            ObjectKind::Arrow => CanvasObject::Arrow(ArrowObject {
                common,
                stroke_color_hex: "#000000".to_string(),
                stroke_width: 2.0,
            }),
            ObjectKind::Text => CanvasObject::Text(TextObject {
                common,
                text: String::new(),
                text_justify: false,
                text_align_horizontal: TextAlignHorizontal::Left,
                text_align_vertical: TextAlignVertical::Top,
                font: FontSpec::default(),
            }),
            ObjectKind::Icon => CanvasObject::Icon(IconObject {
                common,
                background_color_hex: "#000000".to_string(),
                svg_path: String::new(),
            }),
            ObjectKind::Image => CanvasObject::Image(ImageObject {
                common,
                image_url: String::new(),
                bitmap: None,
            }),
            ObjectKind::Attribute => CanvasObject::Attribute(AttributeObject {
                common,
                text: String::new(),
                font: FontSpec::default(),
            }),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            CanvasObject::Rectangle(_) => ObjectKind::Rectangle,
            CanvasObject::Ellipse(_) => ObjectKind::Ellipse,
            CanvasObject::FreeDraw(_) => ObjectKind::FreeDraw,
            CanvasObject::Line(_) => ObjectKind::Line,
            CanvasObject::Arrow(_) => ObjectKind::Arrow,
            CanvasObject::Text(_) => ObjectKind::Text,
            CanvasObject::Icon(_) => ObjectKind::Icon,
            CanvasObject::Image(_) => ObjectKind::Image,
            CanvasObject::Attribute(_) => ObjectKind::Attribute,
        }
    }

    pub fn common(&self) -> &ObjectCommon {
        match self {
            CanvasObject::Rectangle(o) => &o.common,
            CanvasObject::Ellipse(o) => &o.common,
            CanvasObject::FreeDraw(o) => &o.common,
            CanvasObject::Line(o) => &o.common,
            CanvasObject::Arrow(o) => &o.common,
            CanvasObject::Text(o) => &o.common,
            CanvasObject::Icon(o) => &o.common,
            CanvasObject::Image(o) => &o.common,
            CanvasObject::Attribute(o) => &o.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut ObjectCommon {
        match self {
            CanvasObject::Rectangle(o) => &mut o.common,
            CanvasObject::Ellipse(o) => &mut o.common,
            CanvasObject::FreeDraw(o) => &mut o.common,
            CanvasObject::Line(o) => &mut o.common,
            CanvasObject::Arrow(o) => &mut o.common,
            CanvasObject::Text(o) => &mut o.common,
            CanvasObject::Icon(o) => &mut o.common,
            CanvasObject::Image(o) => &mut o.common,
            CanvasObject::Attribute(o) => &mut o.common,
        }
    }

    pub fn id(&self) -> &str {
        &self.common().id
    }

    pub fn dimensions(&self) -> ObjectDimensions {
        let c = self.common();
        ObjectDimensions::new(c.x, c.y, c.width, c.height)
    }

    /// Whether double-clicking this object opens inline text editing.
    pub fn is_editable_text(&self) -> bool {
        matches!(self, CanvasObject::Text(_) | CanvasObject::Attribute(_))
    }

    /// The editable text content, for text and attribute objects.
    pub fn text(&self) -> Option<&str> {
        match self {
            CanvasObject::Text(o) => Some(&o.text),
            CanvasObject::Attribute(o) => Some(&o.text),
            _ => None,
        }
    }

    /// Re-establishes the numeric invariants after construction or a patch.
    pub fn clamp_invariants(&mut self) {
        self.common_mut().clamp();
        match self {
            CanvasObject::Rectangle(o) => {
                o.stroke_width = o.stroke_width.max(0.0);
                o.border_radius = o.border_radius.max(0.0);
            }
            CanvasObject::Ellipse(o) => o.stroke_width = o.stroke_width.max(0.0),
            CanvasObject::FreeDraw(o) => o.stroke_width = o.stroke_width.max(0.0),
            CanvasObject::Line(o) => o.stroke_width = o.stroke_width.max(0.0),
            CanvasObject::Arrow(o) => o.stroke_width = o.stroke_width.max(0.0),
            CanvasObject::Text(o) => o.font.font_size = o.font.font_size.max(1.0),
            CanvasObject::Attribute(o) => o.font.font_size = o.font.font_size.max(1.0),
            CanvasObject::Icon(_) | CanvasObject::Image(_) => {}
        }
    }

    /// Shallow-merges a patch into this object.
    ///
    /// Fields the target variant does not carry are ignored, mirroring the
    /// wide update interface the property panels use. Returns `true` when at
    /// least one field applied.
    pub fn apply_patch(&mut self, patch: &CanvasObjectPatch) -> bool {
        let mut applied = false;

        {
            let common = self.common_mut();
            if let Some(x) = patch.x {
                common.x = x;
                applied = true;
            }
            if let Some(y) = patch.y {
                common.y = y;
                applied = true;
            }
            if let Some(width) = patch.width {
                common.width = width;
                applied = true;
            }
            if let Some(height) = patch.height {
                common.height = height;
                applied = true;
            }
            if let Some(opacity) = patch.opacity {
                common.opacity = opacity;
                applied = true;
            }
        }

        macro_rules! set {
            ($target:expr, $field:ident) => {
                if let Some(value) = &patch.$field {
                    $target = value.clone();
                    applied = true;
                }
            };
        }
        macro_rules! set_copy {
            ($target:expr, $field:ident) => {
                if let Some(value) = patch.$field {
                    $target = value;
                    applied = true;
                }
            };
        }
        macro_rules! set_font {
            ($font:expr) => {
                set!($font.font_color_hex, font_color_hex);
                set_copy!($font.font_size, font_size);
                set!($font.font_family, font_family);
                set_copy!($font.font_style, font_style);
                set_copy!($font.font_variant, font_variant);
                set_copy!($font.font_weight, font_weight);
                set_copy!($font.font_line_height_ratio, font_line_height_ratio);
            };
        }

        match self {
            CanvasObject::Rectangle(o) => {
                set!(o.background_color_hex, background_color_hex);
                set!(o.stroke_color_hex, stroke_color_hex);
                set_copy!(o.stroke_width, stroke_width);
                set_copy!(o.border_radius, border_radius);
            }
            CanvasObject::Ellipse(o) => {
                set!(o.background_color_hex, background_color_hex);
                set!(o.stroke_color_hex, stroke_color_hex);
                set_copy!(o.stroke_width, stroke_width);
            }
            CanvasObject::FreeDraw(o) => {
                set!(o.stroke_color_hex, stroke_color_hex);
                set_copy!(o.stroke_width, stroke_width);
                set!(o.free_draw_points, free_draw_points);
            }
            CanvasObject::Line(o) => {
                set!(o.stroke_color_hex, stroke_color_hex);
                set_copy!(o.stroke_width, stroke_width);
            }
            CanvasObject::Arrow(o) => {
                set!(o.stroke_color_hex, stroke_color_hex);
                set_copy!(o.stroke_width, stroke_width);
            }
            CanvasObject::Text(o) => {
                set!(o.text, text);
                set_copy!(o.text_justify, text_justify);
                set_copy!(o.text_align_horizontal, text_align_horizontal);
                set_copy!(o.text_align_vertical, text_align_vertical);
                set_font!(o.font);
            }
            CanvasObject::Attribute(o) => {
                set!(o.text, text);
                set_font!(o.font);
            }
            CanvasObject::Icon(o) => {
                set!(o.background_color_hex, background_color_hex);
                set!(o.svg_path, svg_path);
            }
            CanvasObject::Image(o) => {
                set!(o.image_url, image_url);
                if let Some(bitmap) = &patch.bitmap {
                    o.bitmap = Some(Arc::clone(bitmap));
                    applied = true;
                }
            }
        }

        if applied {
            self.clamp_invariants();
        }
        applied
    }
}

/// All-optional shallow-merge patch for [`CanvasObject::apply_patch`].
///
/// One wide struct rather than per-variant patches: the property panels and
/// the interaction machine both talk in terms of "set these fields on the
/// active object" without caring about its kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasObjectPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub opacity: Option<f64>,
    pub background_color_hex: Option<String>,
    pub stroke_color_hex: Option<String>,
    pub stroke_width: Option<f64>,
    pub border_radius: Option<f64>,
    pub free_draw_points: Option<Vec<Point>>,
    pub text: Option<String>,
    pub text_justify: Option<bool>,
    pub text_align_horizontal: Option<TextAlignHorizontal>,
    pub text_align_vertical: Option<TextAlignVertical>,
    pub font_color_hex: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub font_style: Option<FontStyle>,
    pub font_variant: Option<FontVariant>,
    pub font_weight: Option<FontWeight>,
    pub font_line_height_ratio: Option<f64>,
    pub svg_path: Option<String>,
    pub image_url: Option<String>,
    pub bitmap: Option<Arc<RgbaImage>>,
}

impl CanvasObjectPatch {
    /// A patch with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field is set; applying it is a no-op.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn bounds(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }
}
