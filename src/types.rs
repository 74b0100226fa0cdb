use chrono::NaiveDateTime;
use serde::Deserialize;

/// A value placed in a single cell.
///
/// Numeric variants are written literally into the sheet; everything else
/// goes through the shared string table using its display text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Number(f64),
    Text(String),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// NaN and infinities have no numeric literal in the sheet format, so
    /// they are stored as text.
    pub fn is_numeric(&self) -> bool {
        match self {
            CellValue::Integer(_) => true,
            CellValue::Number(n) => n.is_finite(),
            _ => false,
        }
    }

    /// Text as it appears in the cell. Also the basis for auto-width.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Integer(i) => itoa::Buffer::new().format(*i).to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Integral floats are written without a fractional part.
pub(crate) fn format_number(n: f64) -> String {
    let abs = n.abs();
    if n.fract() == 0.0 && abs < 9007199254740992.0 {
        itoa::Buffer::new().format(n as i64).to_string()
    } else {
        ryu::Buffer::new().format(n).to_string()
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&String> for CellValue {
    fn from(s: &String) -> Self {
        CellValue::Text(s.clone())
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for CellValue {
            fn from(v: $t) -> Self {
                CellValue::Integer(v as i64)
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_int {
    ($($t:ty),*) => {
        $(impl From<$t> for CellValue {
            fn from(v: $t) -> Self {
                match i64::try_from(v) {
                    Ok(i) => CellValue::Integer(i),
                    Err(_) => CellValue::Number(v as f64),
                }
            }
        })*
    };
}

impl_from_wide_int!(u64, usize, isize, i128, u128);

impl From<f32> for CellValue {
    fn from(v: f32) -> Self {
        CellValue::Number(v as f64)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    Top,
    #[serde(alias = "center")]
    Middle,
    #[default]
    Bottom,
}

impl VerticalAlignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalAlignment::Top => "top",
            VerticalAlignment::Middle => "center",
            VerticalAlignment::Bottom => "bottom",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "top" => Some(VerticalAlignment::Top),
            "middle" | "center" => Some(VerticalAlignment::Middle),
            "bottom" => Some(VerticalAlignment::Bottom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl HorizontalAlignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            HorizontalAlignment::Left => "left",
            HorizontalAlignment::Center => "center",
            HorizontalAlignment::Right => "right",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(HorizontalAlignment::Left),
            "center" => Some(HorizontalAlignment::Center),
            "right" => Some(HorizontalAlignment::Right),
            _ => None,
        }
    }
}

/// A partial style. Unset fields fall back to the registry defaults when the
/// patch is resolved to a composite style id.
///
/// Deserializes from camelCase maps such as
/// `{"bold": true, "bg": "00CC00", "formatId": 164}`; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StylePatch {
    pub font: Option<String>,
    pub size: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    #[serde(alias = "under")]
    pub underline: Option<bool>,
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub format_id: Option<u32>,
    pub format_code: Option<String>,
    pub valign: Option<VerticalAlignment>,
    pub halign: Option<HorizontalAlignment>,
}

impl StylePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn underline(mut self, underline: bool) -> Self {
        self.underline = Some(underline);
        self
    }

    pub fn font(mut self, family: impl Into<String>) -> Self {
        self.font = Some(family.into());
        self
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn fg(mut self, rgb: impl Into<String>) -> Self {
        self.fg = Some(rgb.into());
        self
    }

    pub fn bg(mut self, rgb: impl Into<String>) -> Self {
        self.bg = Some(rgb.into());
        self
    }

    pub fn format(mut self, id: u32, code: Option<&str>) -> Self {
        self.format_id = Some(id);
        self.format_code = code.map(str::to_string);
        self
    }

    pub fn valign(mut self, valign: VerticalAlignment) -> Self {
        self.valign = Some(valign);
        self
    }

    pub fn halign(mut self, halign: HorizontalAlignment) -> Self {
        self.halign = Some(halign);
        self
    }

    /// Overwrite every field that is set in `other`.
    pub fn merge(&mut self, other: &StylePatch) {
        fn take<T: Clone>(dst: &mut Option<T>, src: &Option<T>) {
            if let Some(v) = src {
                *dst = Some(v.clone());
            }
        }

        take(&mut self.font, &other.font);
        take(&mut self.size, &other.size);
        take(&mut self.bold, &other.bold);
        take(&mut self.italic, &other.italic);
        take(&mut self.underline, &other.underline);
        take(&mut self.fg, &other.fg);
        take(&mut self.bg, &other.bg);
        take(&mut self.format_id, &other.format_id);
        take(&mut self.format_code, &other.format_code);
        take(&mut self.valign, &other.valign);
        take(&mut self.halign, &other.halign);
    }

    pub fn merged(&self, other: &StylePatch) -> StylePatch {
        let mut out = self.clone();
        out.merge(other);
        out
    }

    /// Build a patch from loose key/value pairs. Unknown keys and values that
    /// do not parse are skipped.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut patch = StylePatch::default();
        for (key, value) in pairs {
            match key {
                "font" => patch.font = Some(value.to_string()),
                "size" => patch.size = Some(value.to_string()),
                "bold" => patch.bold = parse_flag(value),
                "italic" => patch.italic = parse_flag(value),
                "under" | "underline" => patch.underline = parse_flag(value),
                "fg" => patch.fg = Some(value.to_string()),
                "bg" => patch.bg = Some(value.to_string()),
                "formatId" | "format_id" => patch.format_id = value.trim().parse().ok(),
                "formatCode" | "format_code" => patch.format_code = Some(value.to_string()),
                "valign" => patch.valign = VerticalAlignment::parse(value),
                "halign" => patch.halign = HorizontalAlignment::parse(value),
                _ => {}
            }
        }
        patch
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Style argument for a single cell: either an already resolved composite
/// style id, or a patch merged onto the sheet's sticky style.
#[derive(Debug, Clone, PartialEq)]
pub enum CellStyle {
    Id(u32),
    Patch(StylePatch),
}

impl From<u32> for CellStyle {
    fn from(id: u32) -> Self {
        CellStyle::Id(id)
    }
}

impl From<StylePatch> for CellStyle {
    fn from(patch: StylePatch) -> Self {
        CellStyle::Patch(patch)
    }
}

/// Options for a new table region.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableOptions {
    pub name: Option<String>,
    pub style: String,
    pub show_first_column: bool,
    pub show_last_column: bool,
    pub show_row_stripes: bool,
    pub show_column_stripes: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            name: None,
            style: "TableStyleMedium9".to_string(),
            show_first_column: false,
            show_last_column: false,
            show_row_stripes: true,
            show_column_stripes: false,
        }
    }
}

impl TableOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("column index {index} exceeds the addressable column range")]
    ColumnCapacity { index: usize },

    #[error("cell added while no row is open")]
    RowNotOpen,

    #[error("invalid sheet name: {0}")]
    InvalidSheetName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
