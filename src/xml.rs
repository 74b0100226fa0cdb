use crate::intern::InternTable;
use crate::types::{Error, Result};
use crate::worksheet::{TableDescriptor, Worksheet};
use chrono::{DateTime, SecondsFormat, Utc};
use std::borrow::Cow;
use std::sync::OnceLock;

pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Number of labels in the column-name table: A-Z, AA-ZZ, AAA-ZZZ.
pub const MAX_COLUMNS: usize = 26 + 26 * 26 + 26 * 26 * 26;

fn column_names() -> &'static [String] {
    static NAMES: OnceLock<Vec<String>> = OnceLock::new();
    NAMES.get_or_init(|| {
        let mut names = Vec::with_capacity(MAX_COLUMNS);
        for width in 1..=3u32 {
            for n in 0..26usize.pow(width) {
                let mut label = vec![b'A'; width as usize];
                let mut rest = n;
                for slot in label.iter_mut().rev() {
                    *slot = b'A' + (rest % 26) as u8;
                    rest /= 26;
                }
                names.push(String::from_utf8_lossy(&label).into_owned());
            }
        }
        names
    })
}

/// Column label for a zero-based column index.
pub fn column_name(index: usize) -> Result<&'static str> {
    column_names()
        .get(index)
        .map(String::as_str)
        .ok_or(Error::ColumnCapacity { index })
}

/// Escape text for element content or attribute values.
#[inline(always)]
pub fn xml_escape_simd(input: &[u8], output: &mut Vec<u8>) {
    let needs_escape = memchr::memchr3(b'&', b'<', b'>', input).is_some()
        || memchr::memchr2(b'"', b'\'', input).is_some();

    if !needs_escape {
        output.extend_from_slice(input);
        return;
    }

    let mut last = 0;
    for (pos, byte) in input.iter().enumerate() {
        let escape: &[u8] = match *byte {
            b'&' => b"&amp;",
            b'<' => b"&lt;",
            b'>' => b"&gt;",
            b'"' => b"&quot;",
            b'\'' => b"&apos;",
            _ => continue,
        };
        output.extend_from_slice(&input[last..pos]);
        output.extend_from_slice(escape);
        last = pos + 1;
    }

    if last < input.len() {
        output.extend_from_slice(&input[last..]);
    }
}

pub fn escape_attr(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    if memchr::memchr3(b'&', b'<', b'>', bytes).is_none()
        && memchr::memchr2(b'"', b'\'', bytes).is_none()
    {
        return Cow::Borrowed(input);
    }
    let mut out = Vec::with_capacity(input.len() + 16);
    xml_escape_simd(bytes, &mut out);
    Cow::Owned(String::from_utf8_lossy(&out).into_owned())
}

pub fn generate_content_types(sheets: &[Worksheet]) -> String {
    let mut xml = String::with_capacity(1200 + sheets.len() * 150);
    xml.push_str(XML_HEADER);
    xml.push_str(
        "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
<Default Extension=\"xml\" ContentType=\"application/xml\"/>\
<Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>\
<Override PartName=\"/docProps/app.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.extended-properties+xml\"/>\
<Override PartName=\"/docProps/core.xml\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>",
    );

    for (idx, sheet) in sheets.iter().enumerate() {
        xml.push_str("<Override PartName=\"/xl/worksheets/sheet");
        xml.push_str(&(idx + 1).to_string());
        xml.push_str(".xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>");

        for table in sheet.tables() {
            xml.push_str("<Override PartName=\"/xl/tables/table");
            xml.push_str(&table.id.to_string());
            xml.push_str(".xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.table+xml\"/>");
        }
    }

    xml.push_str(
        "<Override PartName=\"/xl/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml\"/>\
<Override PartName=\"/xl/sharedstrings.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml\"/>\
</Types>",
    );
    xml
}

pub fn generate_rels() -> String {
    format!(
        "{}<Relationships xmlns=\"{}\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"xl/workbook.xml\"/>\
<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties\" Target=\"docProps/core.xml\"/>\
<Relationship Id=\"rId3\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties\" Target=\"docProps/app.xml\"/>\
</Relationships>",
        XML_HEADER, NS_PKG_REL
    )
}

pub fn generate_core_xml(creator: &str, created: &DateTime<Utc>) -> String {
    let stamp = created.to_rfc3339_opts(SecondsFormat::Secs, true);
    format!(
        "{}<cp:coreProperties xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
xmlns:dcmitype=\"http://purl.org/dc/dcmitype/\" \
xmlns:dcterms=\"http://purl.org/dc/terms/\" \
xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
<dc:creator>{creator}</dc:creator>\
<cp:lastModifiedBy>{creator}</cp:lastModifiedBy>\
<dcterms:created xsi:type=\"dcterms:W3CDTF\">{stamp}</dcterms:created>\
<dcterms:modified xsi:type=\"dcterms:W3CDTF\">{stamp}</dcterms:modified>\
</cp:coreProperties>",
        XML_HEADER,
        creator = escape_attr(creator),
        stamp = stamp,
    )
}

pub fn generate_app_xml(sheet_names: &[&str]) -> String {
    format!(
        "{}<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\" \
xmlns:vt=\"http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes\">\
<HeadingPairs><vt:vector size=\"2\" baseType=\"variant\">\
<vt:variant><vt:lpstr>Worksheets</vt:lpstr></vt:variant>\
<vt:variant><vt:i4>{}</vt:i4></vt:variant>\
</vt:vector></HeadingPairs>\
<TitlesOfParts><vt:vector size=\"{}\" baseType=\"lpstr\">{}</vt:vector></TitlesOfParts>\
</Properties>",
        XML_HEADER,
        sheet_names.len(),
        sheet_names.len(),
        sheet_names
            .iter()
            .map(|n| format!("<vt:lpstr>{}</vt:lpstr>", escape_attr(n)))
            .collect::<Vec<_>>()
            .join("")
    )
}

pub fn generate_shared_strings(strings: &InternTable<String>) -> Vec<u8> {
    let mut buf = Vec::with_capacity(200 + strings.len() * 32);
    buf.extend_from_slice(XML_HEADER.as_bytes());
    buf.extend_from_slice(b"<sst xmlns=\"");
    buf.extend_from_slice(NS_MAIN.as_bytes());
    buf.extend_from_slice(b"\" count=\"");
    buf.extend_from_slice(itoa::Buffer::new().format(strings.len()).as_bytes());
    buf.extend_from_slice(b"\" uniqueCount=\"");
    buf.extend_from_slice(itoa::Buffer::new().format(strings.len()).as_bytes());
    buf.extend_from_slice(b"\">");

    for s in strings.ordered_values() {
        if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
            buf.extend_from_slice(b"<si><t xml:space=\"preserve\">");
        } else {
            buf.extend_from_slice(b"<si><t>");
        }
        xml_escape_simd(s.as_bytes(), &mut buf);
        buf.extend_from_slice(b"</t></si>");
    }

    buf.extend_from_slice(b"</sst>");
    buf
}

pub fn generate_workbook(sheet_names: &[&str]) -> String {
    let mut xml = String::with_capacity(500 + sheet_names.len() * 80);
    xml.push_str(XML_HEADER);
    xml.push_str("<workbook xmlns=\"");
    xml.push_str(NS_MAIN);
    xml.push_str("\" xmlns:r=\"");
    xml.push_str(NS_REL);
    xml.push_str(
        "\"><workbookPr date1904=\"0\"/>\
<bookViews><workbookView xWindow=\"0\" yWindow=\"0\" windowWidth=\"22667\" windowHeight=\"17000\" tabRatio=\"500\"/></bookViews>\
<sheets>",
    );

    for (i, name) in sheet_names.iter().enumerate() {
        xml.push_str("<sheet name=\"");
        xml.push_str(&escape_attr(name));
        xml.push_str("\" sheetId=\"");
        xml.push_str(&(i + 1).to_string());
        xml.push_str("\" r:id=\"rId");
        xml.push_str(&sheet_rel_id(i).to_string());
        xml.push_str("\"/>");
    }

    xml.push_str("</sheets></workbook>");
    xml
}

/// Workbook relationship id of the sheet at `index`; rId0 and rId1 are
/// taken by the shared strings and styles parts.
fn sheet_rel_id(index: usize) -> usize {
    index + 2
}

pub fn generate_workbook_rels(num_sheets: usize) -> String {
    let mut xml = String::with_capacity(400 + num_sheets * 150);
    xml.push_str(XML_HEADER);
    xml.push_str("<Relationships xmlns=\"");
    xml.push_str(NS_PKG_REL);
    xml.push_str(
        "\">\
<Relationship Id=\"rId0\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings\" Target=\"sharedstrings.xml\"/>\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>",
    );

    for i in 0..num_sheets {
        xml.push_str("<Relationship Id=\"rId");
        xml.push_str(&sheet_rel_id(i).to_string());
        xml.push_str("\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet");
        xml.push_str(&(i + 1).to_string());
        xml.push_str(".xml\"/>");
    }

    xml.push_str("</Relationships>");
    xml
}

/// Element order: sheetViews → cols → sheetData → pageMargins → tableParts
pub fn generate_sheet_xml(sheet: &Worksheet) -> Vec<u8> {
    let mut buf = Vec::with_capacity(600 + sheet.body_len());
    let mut ryu_buf = ryu::Buffer::new();

    buf.extend_from_slice(XML_HEADER.as_bytes());
    buf.extend_from_slice(b"<worksheet xmlns=\"");
    buf.extend_from_slice(NS_MAIN.as_bytes());
    buf.extend_from_slice(b"\" xmlns:r=\"");
    buf.extend_from_slice(NS_REL.as_bytes());
    buf.extend_from_slice(b"\">");

    buf.extend_from_slice(b"<sheetViews><sheetView workbookViewId=\"0\"/></sheetViews>");

    if !sheet.widths().is_empty() {
        buf.extend_from_slice(b"<cols>");
        for (idx, width) in sheet.widths().iter().enumerate() {
            let col = itoa::Buffer::new().format(idx + 1).to_string();
            buf.extend_from_slice(b"<col min=\"");
            buf.extend_from_slice(col.as_bytes());
            buf.extend_from_slice(b"\" max=\"");
            buf.extend_from_slice(col.as_bytes());
            buf.extend_from_slice(b"\" width=\"");
            buf.extend_from_slice(ryu_buf.format(*width).as_bytes());
            buf.extend_from_slice(b"\" bestFit=\"1\" customWidth=\"1\"/>");
        }
        buf.extend_from_slice(b"</cols>");
    }

    sheet.render_sheet_data(&mut buf);

    buf.extend_from_slice(
        b"<pageMargins left=\"0.7\" right=\"0.7\" top=\"0.75\" bottom=\"0.75\" header=\"0.3\" footer=\"0.3\"/>",
    );

    if !sheet.tables().is_empty() {
        buf.extend_from_slice(b"<tableParts count=\"");
        buf.extend_from_slice(itoa::Buffer::new().format(sheet.tables().len()).as_bytes());
        buf.extend_from_slice(b"\">");
        for idx in 0..sheet.tables().len() {
            buf.extend_from_slice(b"<tablePart r:id=\"rId");
            buf.extend_from_slice(itoa::Buffer::new().format(idx + 1).as_bytes());
            buf.extend_from_slice(b"\"/>");
        }
        buf.extend_from_slice(b"</tableParts>");
    }

    buf.extend_from_slice(b"</worksheet>");
    buf
}

/// Worksheet relationships, only needed when the sheet owns tables.
pub fn generate_worksheet_rels(tables: &[TableDescriptor]) -> Option<String> {
    if tables.is_empty() {
        return None;
    }

    let mut xml = String::with_capacity(300 + tables.len() * 150);
    xml.push_str(XML_HEADER);
    xml.push_str("<Relationships xmlns=\"");
    xml.push_str(NS_PKG_REL);
    xml.push_str("\">");

    for (idx, table) in tables.iter().enumerate() {
        xml.push_str("<Relationship Id=\"rId");
        xml.push_str(&(idx + 1).to_string());
        xml.push_str("\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/table\" Target=\"../tables/table");
        xml.push_str(&table.id.to_string());
        xml.push_str(".xml\"/>");
    }

    xml.push_str("</Relationships>");
    Some(xml)
}

pub fn generate_table_xml(table: &TableDescriptor) -> String {
    let name = escape_attr(&table.name);
    let flag = |b: bool| if b { "1" } else { "0" };

    let mut xml = String::with_capacity(500 + table.header.len() * 60);
    xml.push_str(XML_HEADER);
    xml.push_str(&format!(
        "<table xmlns=\"{}\" id=\"{}\" name=\"{}\" displayName=\"{}\" ref=\"{}\" totalsRowShown=\"0\">",
        NS_MAIN, table.id, name, name, table.range
    ));
    xml.push_str(&format!("<autoFilter ref=\"{}\"/>", table.range));

    xml.push_str(&format!("<tableColumns count=\"{}\">", table.header.len()));
    for (idx, label) in table.header.iter().enumerate() {
        xml.push_str(&format!(
            "<tableColumn id=\"{}\" name=\"{}\"/>",
            idx + 1,
            escape_attr(label)
        ));
    }
    xml.push_str("</tableColumns>");

    let opts = &table.options;
    xml.push_str(&format!(
        "<tableStyleInfo name=\"{}\" showFirstColumn=\"{}\" showLastColumn=\"{}\" showRowStripes=\"{}\" showColumnStripes=\"{}\"/>",
        escape_attr(&opts.style),
        flag(opts.show_first_column),
        flag(opts.show_last_column),
        flag(opts.show_row_stripes),
        flag(opts.show_column_stripes),
    ));
    xml.push_str("</table>");
    xml
}
