use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

use crate::config::hex_color;

/// Largest font size a text box accepts.
pub const MAX_FONT_SIZE: u32 = 500;

/// Identifier of a text box, unique within its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextBoxId(pub(crate) u64);

impl TextBoxId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TextBoxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The fixed set of fonts a text box can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontFace {
    #[default]
    Arial,
    #[serde(rename = "Times New Roman")]
    TimesNewRoman,
    #[serde(rename = "Courier New")]
    CourierNew,
    Verdana,
}

impl FontFace {
    /// Name shown in the font dropdown.
    pub fn name(&self) -> &'static str {
        match self {
            FontFace::Arial => "Arial",
            FontFace::TimesNewRoman => "Times New Roman",
            FontFace::CourierNew => "Courier New",
            FontFace::Verdana => "Verdana",
        }
    }

    pub fn all() -> &'static [FontFace] {
        &[
            FontFace::Arial,
            FontFace::TimesNewRoman,
            FontFace::CourierNew,
            FontFace::Verdana,
        ]
    }

    /// The egui family used to draw this face.
    ///
    /// egui only bundles a proportional and a monospace font, so the
    /// fixed-pitch face gets the monospace family and the rest share the
    /// proportional one.
    pub fn egui_family(&self) -> egui::FontFamily {
        match self {
            FontFace::CourierNew => egui::FontFamily::Monospace,
            _ => egui::FontFamily::Proportional,
        }
    }
}

/// Everything the render surface needs to lay out a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub face: FontFace,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

impl FontSpec {
    pub fn font_id(&self) -> egui::FontId {
        egui::FontId::new(self.size, self.face.egui_family())
    }
}

/// One of the three independent style toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFlag {
    Bold,
    Italic,
    Underline,
}

/// A placed, styled text label on the canvas.
///
/// `position` is the left edge of the text at its baseline, so the glyphs
/// extend upwards from `position.y` by roughly `font_size` pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    id: TextBoxId,
    pub position: Pos2,
    pub text: String,
    pub font_size: u32,
    pub color: Color32,
    pub bold: bool,
    pub italic: bool,
    pub underlined: bool,
    pub font: FontFace,
}

impl TextBox {
    pub(crate) fn from_template(id: TextBoxId, template: &TextBoxTemplate) -> Self {
        Self {
            id,
            position: template.position,
            text: template.text.clone(),
            font_size: template.font_size,
            color: template.color,
            bold: template.bold,
            italic: template.italic,
            underlined: template.underlined,
            font: template.font,
        }
    }

    pub fn id(&self) -> TextBoxId {
        self.id
    }

    pub fn font_spec(&self) -> FontSpec {
        FontSpec {
            face: self.font,
            size: self.font_size as f32,
            bold: self.bold,
            italic: self.italic,
        }
    }

    pub fn style(&self, flag: StyleFlag) -> bool {
        match flag {
            StyleFlag::Bold => self.bold,
            StyleFlag::Italic => self.italic,
            StyleFlag::Underline => self.underlined,
        }
    }

    /// Apply a partial update. Returns true if any field actually changed.
    pub(crate) fn apply(&mut self, patch: &TextBoxPatch) -> bool {
        let before = self.clone();

        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(text) = &patch.text {
            self.text.clone_from(text);
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(bold) = patch.bold {
            self.bold = bold;
        }
        if let Some(italic) = patch.italic {
            self.italic = italic;
        }
        if let Some(underlined) = patch.underlined {
            self.underlined = underlined;
        }
        if let Some(font) = patch.font {
            self.font = font;
        }

        *self != before
    }

    /// Whether applying `patch` would leave the text box untouched.
    pub fn is_unchanged_by(&self, patch: &TextBoxPatch) -> bool {
        let mut probe = self.clone();
        !probe.apply(patch)
    }
}

/// Field values for a freshly added text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextBoxTemplate {
    pub position: Pos2,
    pub text: String,
    pub font_size: u32,
    #[serde(with = "hex_color")]
    pub color: Color32,
    pub bold: bool,
    pub italic: bool,
    pub underlined: bool,
    pub font: FontFace,
}

impl Default for TextBoxTemplate {
    fn default() -> Self {
        Self {
            position: Pos2::new(50.0, 50.0),
            text: "New Text".to_owned(),
            font_size: 20,
            color: Color32::BLACK,
            bold: false,
            italic: false,
            underlined: false,
            font: FontFace::Arial,
        }
    }
}

/// A partial update to a text box; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBoxPatch {
    pub position: Option<Pos2>,
    pub text: Option<String>,
    pub font_size: Option<u32>,
    pub color: Option<Color32>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underlined: Option<bool>,
    pub font: Option<FontFace>,
}

impl TextBoxPatch {
    pub fn position(position: Pos2) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn style(flag: StyleFlag, value: bool) -> Self {
        let mut patch = Self::default();
        match flag {
            StyleFlag::Bold => patch.bold = Some(value),
            StyleFlag::Italic => patch.italic = Some(value),
            StyleFlag::Underline => patch.underlined = Some(value),
        }
        patch
    }
}

/// A single attribute edit coming from one of the side panel widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Text(String),
    FontSize(u32),
    Color(Color32),
    Font(FontFace),
}

impl From<FieldChange> for TextBoxPatch {
    fn from(change: FieldChange) -> Self {
        let mut patch = TextBoxPatch::default();
        match change {
            FieldChange::Text(text) => patch.text = Some(text),
            FieldChange::FontSize(size) => patch.font_size = Some(size),
            FieldChange::Color(color) => patch.color = Some(color),
            FieldChange::Font(font) => patch.font = Some(font),
        }
        patch
    }
}
