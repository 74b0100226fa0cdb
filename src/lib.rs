//! Incremental xlsx workbook builder.
//!
//! Cells are written row by row into per-sheet buffers. Strings, number
//! formats, fonts, fills and cell styles are deduplicated across the whole
//! workbook, and tables are declared inline while their header row is being
//! written.
//!
//! ```no_run
//! use tabxl::{cells, StylePatch, TableOptions, Workbook};
//!
//! # fn main() -> tabxl::Result<()> {
//! let mut workbook = Workbook::new(StylePatch::default());
//! let mut sheet = workbook.worksheet(Some("People"))?;
//! sheet.open_row();
//! sheet.open_table(TableOptions::default())?;
//! sheet.cells(["Name", "Birth", "Death", "Occupation"])?;
//! sheet.row(cells!["Wolfgang Mozart", 1756, 1791, "Composer"])?;
//! sheet.row(cells!["Sigmund Freud", 1856, 1939, "Psychoanalyst"])?;
//! workbook.write("people.xlsx")?;
//! # Ok(())
//! # }
//! ```

mod intern;
mod styles;
mod types;
mod validation;
mod workbook;
mod worksheet;
mod writer;
mod xml;

pub use intern::InternTable;
pub use styles::{
    generate_styles_xml, FillSpec, FontSpec, FormatSpec, StyleRegistry, StyleSpec,
    DEFAULT_FONT, DEFAULT_FONT_SIZE, GENERIC_NUMBER_FORMAT_ID,
};
pub use types::{
    CellStyle, CellValue, Error, HorizontalAlignment, Result, StylePatch, TableOptions,
    VerticalAlignment,
};
pub use validation::validate_sheet_name;
pub use workbook::{Workbook, WorkbookOptions};
pub use worksheet::{SheetBuilder, TableDescriptor, Worksheet};
pub use writer::Part;
pub use xml::{column_name, MAX_COLUMNS};

/// Build a `Vec<CellValue>` from mixed values, for rows that combine text
/// and numbers.
///
/// ```
/// let row = tabxl::cells!["Sigmund Freud", 1856, 1939];
/// assert_eq!(row.len(), 3);
/// ```
#[macro_export]
macro_rules! cells {
    () => {
        ::std::vec::Vec::<$crate::CellValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::CellValue::from($value)),+]
    };
}
