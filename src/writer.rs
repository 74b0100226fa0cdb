use crate::styles::generate_styles_xml;
use crate::types::Result;
use crate::validation::write_file_atomic;
use crate::workbook::Workbook;
use crate::xml;
use mtzip::{level::CompressionLevel, ZipArchive};
use std::fs::File;
use std::path::Path;

/// One named file inside the archive.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: String,
    pub data: Vec<u8>,
}

impl Part {
    fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

/// Render every archive part of an already finalized workbook.
pub fn build_parts(workbook: &Workbook) -> Vec<Part> {
    let sheets = workbook.sheets();
    let sheet_names: Vec<&str> = sheets.iter().map(|s| s.name()).collect();
    let registry = workbook.registry();

    let mut parts = Vec::with_capacity(8 + sheets.len() * 3);
    parts.push(Part::new("[Content_Types].xml", xml::generate_content_types(sheets)));
    parts.push(Part::new("_rels/.rels", xml::generate_rels()));
    parts.push(Part::new(
        "docProps/core.xml",
        xml::generate_core_xml(workbook.creator(), workbook.created()),
    ));
    parts.push(Part::new("docProps/app.xml", xml::generate_app_xml(&sheet_names)));
    parts.push(Part::new(
        "xl/sharedstrings.xml",
        xml::generate_shared_strings(registry.strings()),
    ));
    parts.push(Part::new("xl/styles.xml", generate_styles_xml(registry)));
    parts.push(Part::new("xl/workbook.xml", xml::generate_workbook(&sheet_names)));
    parts.push(Part::new(
        "xl/_rels/workbook.xml.rels",
        xml::generate_workbook_rels(sheets.len()),
    ));

    for (idx, sheet) in sheets.iter().enumerate() {
        parts.push(Part::new(
            format!("xl/worksheets/sheet{}.xml", idx + 1),
            xml::generate_sheet_xml(sheet),
        ));

        if let Some(rels_xml) = xml::generate_worksheet_rels(sheet.tables()) {
            parts.push(Part::new(
                format!("xl/worksheets/_rels/sheet{}.xml.rels", idx + 1),
                rels_xml,
            ));
        }

        for table in sheet.tables() {
            parts.push(Part::new(
                format!("xl/tables/table{}.xml", table.id),
                xml::generate_table_xml(table),
            ));
        }
    }

    parts
}

/// Zip `parts` into `path`. The target only appears once the archive is
/// complete and synced.
pub fn write_parts(parts: Vec<Part>, path: &Path) -> Result<()> {
    let count = parts.len();
    let mut zipper = ZipArchive::new();
    for part in parts {
        zipper
            .add_file_from_memory(part.data, part.name)
            .compression_level(CompressionLevel::fast())
            .done();
    }

    write_file_atomic(path, |file| write_zip_to_file(zipper, file))?;
    log::debug!("wrote {} parts to {}", count, path.display());
    Ok(())
}

/// Compression runs on the current rayon pool.
fn write_zip_to_file(mut zipper: ZipArchive, file: &mut File) -> Result<()> {
    zipper.write_with_rayon(file)?;
    Ok(())
}
