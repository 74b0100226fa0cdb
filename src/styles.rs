use crate::intern::InternTable;
use crate::types::{HorizontalAlignment, StylePatch, VerticalAlignment};
use crate::xml::{escape_attr, XML_HEADER};

pub const DEFAULT_FONT: &str = "Calibri";
pub const DEFAULT_FONT_SIZE: &str = "11";
/// Generic two-decimal number format registered with every workbook.
pub const GENERIC_NUMBER_FORMAT_ID: u32 = 164;
/// Background of the filler entry that occupies fill slot 1.
const PLACEHOLDER_FILL_BG: &str = "010101";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormatSpec {
    pub format_id: u32,
    pub format_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontSpec {
    pub family: String,
    pub size: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FillSpec {
    pub bg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleSpec {
    pub font_id: u32,
    pub fill_id: u32,
    pub format_id: u32,
    pub valign: VerticalAlignment,
    pub halign: HorizontalAlignment,
}

impl StyleSpec {
    fn has_alignment(&self) -> bool {
        self.valign != VerticalAlignment::Bottom || self.halign != HorizontalAlignment::Left
    }
}

/// Document-wide deduplicating tables for strings and every style component.
///
/// Resolving a composite style always registers (or reuses) its font, fill
/// and number format first, so sub-component ids exist before the `xf` that
/// points at them.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    strings: InternTable<String>,
    formats: InternTable<FormatSpec>,
    fonts: InternTable<FontSpec>,
    fills: InternTable<FillSpec>,
    styles: InternTable<StyleSpec>,
}

impl StyleRegistry {
    pub fn new(default_style: &StylePatch) -> Self {
        let mut registry = Self {
            strings: InternTable::new(),
            formats: InternTable::new(),
            fonts: InternTable::new(),
            fills: InternTable::new(),
            styles: InternTable::new(),
        };

        registry.intern_format(
            &StylePatch::new().format(GENERIC_NUMBER_FORMAT_ID, Some("0.00")),
        );
        registry.intern_style(default_style);
        // Readers resolve custom fills only once a second fill entry exists.
        registry.intern_fill(&StylePatch::new().bg(PLACEHOLDER_FILL_BG));
        registry
    }

    pub fn intern_string(&mut self, value: &str) -> u32 {
        self.strings.get_or_assign(value.to_string(), None)
    }

    pub fn intern_format(&mut self, patch: &StylePatch) -> u32 {
        let format_id = patch.format_id.unwrap_or(0);
        let spec = FormatSpec {
            format_id,
            format_code: patch.format_code.clone(),
        };
        let before = self.formats.len();
        let id = self.formats.get_or_assign(spec, Some(format_id));
        if self.formats.len() > before {
            log::trace!("registered number format {}", id);
        }
        id
    }

    pub fn intern_font(&mut self, patch: &StylePatch) -> u32 {
        let spec = FontSpec {
            family: patch.font.clone().unwrap_or_else(|| DEFAULT_FONT.to_string()),
            size: patch.size.clone().unwrap_or_else(|| DEFAULT_FONT_SIZE.to_string()),
            bold: patch.bold.unwrap_or(false),
            italic: patch.italic.unwrap_or(false),
            underline: patch.underline.unwrap_or(false),
            color: patch.fg.clone(),
        };
        let before = self.fonts.len();
        let id = self.fonts.get_or_assign(spec, None);
        if self.fonts.len() > before {
            log::trace!("registered font {}", id);
        }
        id
    }

    pub fn intern_fill(&mut self, patch: &StylePatch) -> u32 {
        let before = self.fills.len();
        let id = self.fills.get_or_assign(FillSpec { bg: patch.bg.clone() }, None);
        if self.fills.len() > before {
            log::trace!("registered fill {}", id);
        }
        id
    }

    pub fn intern_style(&mut self, patch: &StylePatch) -> u32 {
        let spec = StyleSpec {
            font_id: self.intern_font(patch),
            fill_id: self.intern_fill(patch),
            format_id: self.intern_format(patch),
            valign: patch.valign.unwrap_or_default(),
            halign: patch.halign.unwrap_or_default(),
        };
        let before = self.styles.len();
        let id = self.styles.get_or_assign(spec, None);
        if self.styles.len() > before {
            log::trace!("registered composite style {}", id);
        }
        id
    }

    pub fn strings(&self) -> &InternTable<String> {
        &self.strings
    }

    pub fn formats(&self) -> &InternTable<FormatSpec> {
        &self.formats
    }

    pub fn fonts(&self) -> &InternTable<FontSpec> {
        &self.fonts
    }

    pub fn fills(&self) -> &InternTable<FillSpec> {
        &self.fills
    }

    pub fn styles(&self) -> &InternTable<StyleSpec> {
        &self.styles
    }
}

/// Six-digit RGB values get an opaque alpha prefix.
fn argb(color: &str) -> String {
    if color.len() == 6 {
        format!("FF{}", color)
    } else {
        color.to_string()
    }
}

pub fn generate_styles_xml(registry: &StyleRegistry) -> String {
    let mut xml = String::with_capacity(1000 + registry.styles.len() * 120);

    xml.push_str(XML_HEADER);
    xml.push_str("<styleSheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">");

    let coded: Vec<&FormatSpec> = registry
        .formats
        .ordered_values()
        .into_iter()
        .filter(|f| f.format_code.is_some())
        .collect();
    if !coded.is_empty() {
        xml.push_str(&format!("<numFmts count=\"{}\">", coded.len()));
        for fmt in coded {
            xml.push_str(&format!(
                "<numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                fmt.format_id,
                escape_attr(fmt.format_code.as_deref().unwrap_or_default())
            ));
        }
        xml.push_str("</numFmts>");
    }

    xml.push_str(&format!("<fonts count=\"{}\">", registry.fonts.len()));
    for font in registry.fonts.ordered_values() {
        xml.push_str("<font>");
        if font.bold { xml.push_str("<b/>"); }
        if font.italic { xml.push_str("<i/>"); }
        if font.underline { xml.push_str("<u/>"); }
        xml.push_str(&format!("<sz val=\"{}\"/>", escape_attr(&font.size)));
        if let Some(ref color) = font.color {
            xml.push_str(&format!("<color rgb=\"{}\"/>", escape_attr(&argb(color))));
        }
        xml.push_str(&format!("<name val=\"{}\"/>", escape_attr(&font.family)));
        xml.push_str("</font>");
    }
    xml.push_str("</fonts>");

    xml.push_str(&format!("<fills count=\"{}\">", registry.fills.len()));
    for fill in registry.fills.ordered_values() {
        xml.push_str("<fill>");
        match fill.bg {
            Some(ref bg) => {
                xml.push_str("<patternFill patternType=\"solid\">");
                xml.push_str(&format!("<fgColor rgb=\"{}\"/>", escape_attr(&argb(bg))));
                xml.push_str("<bgColor indexed=\"64\"/>");
                xml.push_str("</patternFill>");
            }
            None => xml.push_str("<patternFill patternType=\"none\"/>"),
        }
        xml.push_str("</fill>");
    }
    xml.push_str("</fills>");

    xml.push_str("<borders count=\"1\"><border><left/><right/><top/><bottom/><diagonal/></border></borders>");
    xml.push_str("<cellStyleXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellStyleXfs>");

    xml.push_str(&format!("<cellXfs count=\"{}\">", registry.styles.len()));
    for xf in registry.styles.ordered_values() {
        xml.push_str(&format!(
            "<xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"0\" xfId=\"0\"",
            xf.format_id, xf.font_id, xf.fill_id
        ));

        if xf.font_id > 0 { xml.push_str(" applyFont=\"1\""); }
        if xf.fill_id > 0 { xml.push_str(" applyFill=\"1\""); }
        if xf.format_id > 0 { xml.push_str(" applyNumberFormat=\"1\""); }

        if xf.has_alignment() {
            xml.push_str(" applyAlignment=\"1\">");
            xml.push_str(&format!(
                "<alignment vertical=\"{}\" horizontal=\"{}\"/>",
                xf.valign.as_str(),
                xf.halign.as_str()
            ));
            xml.push_str("</xf>");
        } else {
            xml.push_str("/>");
        }
    }
    xml.push_str("</cellXfs>");

    xml.push_str("<cellStyles count=\"1\"><cellStyle name=\"Normal\" xfId=\"0\" builtinId=\"0\"/></cellStyles>");
    xml.push_str("</styleSheet>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preregistered_entries() {
        let registry = StyleRegistry::new(&StylePatch::default());

        assert_eq!(registry.formats().len(), 2);
        assert_eq!(registry.fonts().len(), 1);
        assert_eq!(registry.fills().len(), 2);
        assert_eq!(registry.styles().len(), 1);
        assert!(registry.strings().is_empty());

        let fills = registry.fills().ordered_values();
        assert_eq!(fills[0].bg, None);
        assert_eq!(fills[1].bg.as_deref(), Some(PLACEHOLDER_FILL_BG));

        let formats = registry.formats().ordered_values();
        assert_eq!(formats[0].format_id, 0);
        assert_eq!(formats[1].format_id, GENERIC_NUMBER_FORMAT_ID);
    }

    #[test]
    fn test_default_patch_with_background_keeps_placeholder_second() {
        let registry = StyleRegistry::new(&StylePatch::new().bg("FFFF00"));
        let fills = registry.fills().ordered_values();
        assert_eq!(fills[0].bg.as_deref(), Some("FFFF00"));
        assert_eq!(fills[1].bg.as_deref(), Some(PLACEHOLDER_FILL_BG));
    }

    #[test]
    fn test_style_resolution_reuses_components() {
        let mut registry = StyleRegistry::new(&StylePatch::default());
        let bold = registry.intern_style(&StylePatch::new().bold(true));
        let bold_green = registry.intern_style(&StylePatch::new().bold(true).bg("00CC00"));
        assert_eq!(registry.intern_style(&StylePatch::new().bold(true)), bold);
        assert_ne!(bold, bold_green);

        // default font, bold font
        assert_eq!(registry.fonts().len(), 2);
        // none, placeholder, green
        assert_eq!(registry.fills().len(), 3);
        assert_eq!(registry.intern_style(&StylePatch::default()), 0);
    }

    #[test]
    fn test_format_ids_are_caller_controlled() {
        let mut registry = StyleRegistry::new(&StylePatch::default());
        let id = registry.intern_format(&StylePatch::new().format(22, Some("m/d/yy h:mm")));
        assert_eq!(id, 22);
        assert_eq!(registry.intern_format(&StylePatch::new().format(164, Some("0.00"))), 164);
        assert_eq!(registry.formats().len(), 3);
    }

    #[test]
    fn test_intern_string_dedup() {
        let mut registry = StyleRegistry::new(&StylePatch::default());
        assert_eq!(registry.intern_string("Composer"), 0);
        assert_eq!(registry.intern_string("Programmer"), 1);
        assert_eq!(registry.intern_string("Composer"), 0);
        assert_eq!(registry.strings().len(), 2);
    }

    #[test]
    fn test_styles_xml() {
        let mut registry = StyleRegistry::new(&StylePatch::default());
        registry.intern_style(
            &StylePatch::new()
                .bold(true)
                .fg("AABBCC")
                .valign(VerticalAlignment::Middle),
        );
        let xml = generate_styles_xml(&registry);

        assert!(xml.contains("<numFmts count=\"1\"><numFmt numFmtId=\"164\" formatCode=\"0.00\"/></numFmts>"));
        assert!(xml.contains("<fonts count=\"2\">"));
        assert!(xml.contains("<font><b/><sz val=\"11\"/><color rgb=\"FFAABBCC\"/><name val=\"Calibri\"/></font>"));
        assert!(xml.contains("<fills count=\"2\">"));
        assert!(xml.contains("<fgColor rgb=\"FF010101\"/>"));
        assert!(xml.contains("<cellXfs count=\"2\">"));
        assert!(xml.contains("<xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/>"));
        assert!(xml.contains(
            "<xf numFmtId=\"0\" fontId=\"1\" fillId=\"0\" borderId=\"0\" xfId=\"0\" applyFont=\"1\" applyAlignment=\"1\"><alignment vertical=\"center\" horizontal=\"left\"/></xf>"
        ));
    }
}
