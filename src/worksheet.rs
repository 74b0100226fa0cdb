use crate::styles::StyleRegistry;
use crate::types::{CellStyle, CellValue, Error, Result, StylePatch, TableOptions};
use crate::xml::column_name;

/// A named, header-labelled table region on one worksheet.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDescriptor {
    /// Workbook-wide id, also used for the `tableN.xml` part name.
    pub id: u32,
    pub name: String,
    pub header: Vec<String>,
    /// `A1:D3` form. The top-left corner is written when the table opens,
    /// the end column when its header closes and the end row when it closes.
    pub range: String,
    pub options: TableOptions,
    start_col: usize,
}

/// Per-sheet accumulated markup and builder state.
///
/// Mutation goes through [`SheetBuilder`], which pairs a sheet with the
/// workbook's registries. The close operations need no registry access and
/// live here so the workbook can finalize sheets at write time.
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    rows: u32,
    widths: Vec<f64>,
    auto_width: bool,
    current_cell: Option<usize>,
    row_open: bool,
    header_open: bool,
    table_open: bool,
    sticky: StylePatch,
    sticky_id: u32,
    style_stack: Vec<(StylePatch, u32)>,
    tables: Vec<TableDescriptor>,
    body: Vec<u8>,
}

impl Worksheet {
    pub(crate) fn new(name: String, default_style: StylePatch) -> Self {
        Self {
            name,
            rows: 0,
            widths: Vec::new(),
            auto_width: true,
            current_cell: None,
            row_open: false,
            header_open: false,
            table_open: false,
            sticky: default_style,
            sticky_id: 0,
            style_stack: Vec::new(),
            tables: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows started so far (the current row number).
    pub fn row_count(&self) -> u32 {
        self.rows
    }

    /// Zero-based index of the last cell written in the current row.
    pub fn current_cell(&self) -> Option<usize> {
        self.current_cell
    }

    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    pub fn auto_width(&self) -> bool {
        self.auto_width
    }

    pub fn tables(&self) -> &[TableDescriptor] {
        &self.tables
    }

    pub fn sticky_style(&self) -> &StylePatch {
        &self.sticky
    }

    pub fn sticky_style_id(&self) -> u32 {
        self.sticky_id
    }

    pub fn is_row_open(&self) -> bool {
        self.row_open
    }

    pub fn is_header_open(&self) -> bool {
        self.header_open
    }

    pub fn is_table_open(&self) -> bool {
        self.table_open
    }

    pub(crate) fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Stop adding cells to the current table's header.
    pub fn close_header(&mut self) {
        if !self.header_open {
            return;
        }
        let current = self.current_cell;
        if let Some(table) = self.tables.last_mut() {
            let col = match current {
                Some(c) if c >= table.start_col => c,
                _ => table.start_col,
            };
            // Indices were checked against the column table when written.
            if let Ok(label) = column_name(col) {
                table.range.push_str(label);
            }
        }
        self.header_open = false;
    }

    /// Close the current table at the current row. Also closes its header.
    pub fn close_table(&mut self) {
        self.close_header();
        if !self.table_open {
            return;
        }
        if let Some(table) = self.tables.last_mut() {
            table.range.push_str(itoa::Buffer::new().format(self.rows));
            log::debug!("closed table {} ({}) on sheet {}", table.id, table.range, self.name);
        }
        self.table_open = false;
    }

    /// Close the current row. A header never outlives the row it started in.
    pub fn close_row(&mut self) {
        self.close_header();
        if !self.row_open {
            return;
        }
        self.body.extend_from_slice(b"</row>");
        self.row_open = false;
    }

    /// Close whatever is still open. Safe to call repeatedly.
    pub fn finalize(&mut self) {
        self.close_row();
        self.close_table();
    }

    /// Append the `<sheetData>` element holding every row written so far.
    pub fn render_sheet_data(&self, out: &mut Vec<u8>) {
        if self.body.is_empty() {
            out.extend_from_slice(b"<sheetData/>");
            return;
        }
        out.extend_from_slice(b"<sheetData>");
        out.extend_from_slice(&self.body);
        if self.row_open {
            out.extend_from_slice(b"</row>");
        }
        out.extend_from_slice(b"</sheetData>");
    }
}

/// Mutable handle on one worksheet plus the workbook state it draws ids from.
pub struct SheetBuilder<'a> {
    sheet: &'a mut Worksheet,
    registry: &'a mut StyleRegistry,
    next_table_id: &'a mut u32,
}

impl<'a> SheetBuilder<'a> {
    pub(crate) fn new(
        sheet: &'a mut Worksheet,
        registry: &'a mut StyleRegistry,
        next_table_id: &'a mut u32,
    ) -> Self {
        Self {
            sheet,
            registry,
            next_table_id,
        }
    }

    pub fn sheet(&self) -> &Worksheet {
        &*self.sheet
    }

    pub fn registry(&self) -> &StyleRegistry {
        &*self.registry
    }

    /// Start a new row, closing the previous one.
    pub fn open_row(&mut self) -> &mut Self {
        self.sheet.close_row();
        self.sheet.rows += 1;
        self.sheet.body.extend_from_slice(b"<row r=\"");
        self.sheet
            .body
            .extend_from_slice(itoa::Buffer::new().format(self.sheet.rows).as_bytes());
        self.sheet.body.extend_from_slice(b"\">");
        self.sheet.row_open = true;
        self.sheet.current_cell = None;
        self
    }

    /// Start a new row and fill it with `values` in the sticky style.
    pub fn row<I, V>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.open_row();
        self.cells(values)
    }

    /// Like [`row`](Self::row), then runs `f` and closes the row afterwards.
    pub fn row_with<I, V, F>(&mut self, values: I, f: F) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let filled = self.row(values).map(|_| ());
        let result = filled.and_then(|_| f(self));
        self.sheet.close_row();
        result.map(|_| self)
    }

    /// One row per inner sequence.
    pub fn rows<R, I, V>(&mut self, rows: R) -> Result<&mut Self>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        for values in rows {
            self.row(values)?;
        }
        Ok(self)
    }

    pub fn close_row(&mut self) -> &mut Self {
        self.sheet.close_row();
        self
    }

    /// Add a cell in the sticky style to the open row.
    pub fn cell(&mut self, value: impl Into<CellValue>) -> Result<&mut Self> {
        self.add_cell(value.into(), None)
    }

    /// Add a cell with a one-off style. A patch is merged onto the sticky
    /// style for this cell only; an id is used as is.
    pub fn cell_styled(
        &mut self,
        value: impl Into<CellValue>,
        style: impl Into<CellStyle>,
    ) -> Result<&mut Self> {
        self.add_cell(value.into(), Some(style.into()))
    }

    pub fn cells<I, V>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        for value in values {
            self.add_cell(value.into(), None)?;
        }
        Ok(self)
    }

    fn add_cell(&mut self, value: CellValue, style: Option<CellStyle>) -> Result<&mut Self> {
        if !self.sheet.row_open {
            return Err(Error::RowNotOpen);
        }

        let idx = self.sheet.current_cell.map_or(0, |c| c + 1);
        let label = column_name(idx)?;
        self.sheet.current_cell = Some(idx);

        let text = value.display_text();

        if self.sheet.auto_width {
            let width = text.chars().count() as f64 + 1.0;
            if self.sheet.widths.len() <= idx {
                self.sheet.widths.resize(idx + 1, 0.0);
            }
            if width > self.sheet.widths[idx] {
                self.sheet.widths[idx] = width;
            }
        }

        if self.sheet.header_open {
            if let Some(table) = self.sheet.tables.last_mut() {
                table.header.push(text.clone());
            }
        }

        let style_id = match style {
            None => self.sheet.sticky_id,
            Some(CellStyle::Id(id)) => id,
            Some(CellStyle::Patch(patch)) => {
                self.registry.intern_style(&self.sheet.sticky.merged(&patch))
            }
        };

        let body = &mut self.sheet.body;
        body.extend_from_slice(b"<c r=\"");
        body.extend_from_slice(label.as_bytes());
        body.extend_from_slice(itoa::Buffer::new().format(self.sheet.rows).as_bytes());
        body.extend_from_slice(b"\" s=\"");
        body.extend_from_slice(itoa::Buffer::new().format(style_id).as_bytes());
        if value.is_numeric() {
            body.extend_from_slice(b"\"><v>");
            body.extend_from_slice(text.as_bytes());
        } else {
            let string_id = self.registry.intern_string(&text);
            body.extend_from_slice(b"\" t=\"s\"><v>");
            body.extend_from_slice(itoa::Buffer::new().format(string_id).as_bytes());
        }
        body.extend_from_slice(b"</v></c>");

        Ok(self)
    }

    /// Merge `patch` into the sticky style for every following cell.
    pub fn style(&mut self, patch: &StylePatch) -> &mut Self {
        self.sheet.sticky.merge(patch);
        self.sheet.sticky_id = self.registry.intern_style(&self.sheet.sticky);
        self
    }

    /// Replace the sticky style outright.
    pub fn replace_style(&mut self, patch: StylePatch) -> &mut Self {
        self.sheet.sticky_id = self.registry.intern_style(&patch);
        self.sheet.sticky = patch;
        self
    }

    /// Merge `patch` into the sticky style while `f` runs; the previous sticky
    /// style is restored afterwards, whether `f` succeeded or not.
    pub fn with_style<F>(&mut self, patch: &StylePatch, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.push_style();
        self.style(patch);
        let result = f(self);
        self.pop_style();
        result.map(|_| self)
    }

    /// Scoped form of [`replace_style`](Self::replace_style).
    pub fn with_style_replaced<F>(&mut self, patch: StylePatch, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.push_style();
        self.replace_style(patch);
        let result = f(self);
        self.pop_style();
        result.map(|_| self)
    }

    fn push_style(&mut self) {
        self.sheet
            .style_stack
            .push((self.sheet.sticky.clone(), self.sheet.sticky_id));
    }

    fn pop_style(&mut self) {
        if let Some((patch, id)) = self.sheet.style_stack.pop() {
            self.sheet.sticky = patch;
            self.sheet.sticky_id = id;
        }
    }

    /// Fix the column widths. Automatic widths are off from here on.
    pub fn set_widths(&mut self, widths: &[f64]) -> &mut Self {
        self.sheet.auto_width = false;
        self.sheet.widths = widths.to_vec();
        self
    }

    pub fn widths(&self) -> &[f64] {
        &self.sheet.widths
    }

    /// Open a table whose top-left corner is the next cell of the current row.
    /// Cells added before the row closes become its header labels.
    pub fn open_table(&mut self, options: TableOptions) -> Result<&mut Self> {
        let start_col = self.sheet.current_cell.map_or(0, |c| c + 1);
        let start_label = column_name(start_col)?;

        self.sheet.close_table();
        self.sheet.header_open = true;
        self.sheet.table_open = true;

        *self.next_table_id += 1;
        let id = *self.next_table_id;
        let name = options
            .name
            .clone()
            .unwrap_or_else(|| format!("Table{}", id));

        let mut range = String::with_capacity(16);
        range.push_str(start_label);
        range.push_str(itoa::Buffer::new().format(self.sheet.rows));
        range.push(':');

        log::debug!("opened table {} ({}) on sheet {}", id, name, self.sheet.name);
        self.sheet.tables.push(TableDescriptor {
            id,
            name,
            header: Vec::new(),
            range,
            options,
            start_col,
        });
        Ok(self)
    }

    /// Open a table, run `f`, then close the table.
    pub fn table_with<F>(&mut self, options: TableOptions, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.open_table(options)?;
        let result = f(self);
        self.sheet.close_table();
        result.map(|_| self)
    }

    pub fn close_header(&mut self) -> &mut Self {
        self.sheet.close_header();
        self
    }

    pub fn close_table(&mut self) -> &mut Self {
        self.sheet.close_table();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HorizontalAlignment;
    use crate::xml::MAX_COLUMNS;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    struct Fixture {
        sheet: Worksheet,
        registry: StyleRegistry,
        next_table_id: u32,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                sheet: Worksheet::new("Sheet1".to_string(), StylePatch::default()),
                registry: StyleRegistry::new(&StylePatch::default()),
                next_table_id: 0,
            }
        }

        fn builder(&mut self) -> SheetBuilder<'_> {
            SheetBuilder::new(&mut self.sheet, &mut self.registry, &mut self.next_table_id)
        }

        fn body(&self) -> String {
            String::from_utf8(self.sheet.body.clone()).unwrap()
        }
    }

    #[test]
    fn test_cell_requires_open_row() {
        let mut fx = Fixture::new();
        assert!(matches!(fx.builder().cell("x"), Err(Error::RowNotOpen)));
        assert!(fx.sheet.body.is_empty());
    }

    #[test]
    fn test_cell_markup() {
        let mut fx = Fixture::new();
        fx.builder().open_row().cell("Mark").unwrap().cell(1979).unwrap();
        assert_eq!(
            fx.body(),
            "<row r=\"1\"><c r=\"A1\" s=\"0\" t=\"s\"><v>0</v></c><c r=\"B1\" s=\"0\"><v>1979</v></c>"
        );
        fx.sheet.finalize();
        assert!(fx.body().ends_with("</c></row>"));
    }

    #[test]
    fn test_non_finite_number_cells_use_shared_strings() {
        let mut fx = Fixture::new();
        fx.builder().row([f64::NAN, f64::INFINITY, 0.5]).unwrap();
        assert_eq!(
            fx.body(),
            "<row r=\"1\"><c r=\"A1\" s=\"0\" t=\"s\"><v>0</v></c><c r=\"B1\" s=\"0\" t=\"s\"><v>1</v></c><c r=\"C1\" s=\"0\"><v>0.5</v></c>"
        );
        let strings: Vec<&String> = fx.registry.strings().ordered_values();
        assert_eq!(strings, vec!["NaN", "inf"]);
    }

    #[test]
    fn test_cell_index_resets_per_row() {
        let mut fx = Fixture::new();
        let mut ws = fx.builder();
        ws.row(["a", "b", "c"]).unwrap();
        assert_eq!(ws.sheet().current_cell(), Some(2));
        ws.open_row();
        assert_eq!(ws.sheet().current_cell(), None);
        ws.cell("d").unwrap();
        assert_eq!(ws.sheet().current_cell(), Some(0));
        assert_eq!(ws.sheet().row_count(), 2);
        assert!(fx.body().contains("<c r=\"A2\""));
    }

    #[test]
    fn test_table_scenario() {
        let mut fx = Fixture::new();
        {
            let mut ws = fx.builder();
            ws.open_row();
            ws.open_table(TableOptions::default()).unwrap();
            ws.cells(["Name", "Birth", "Death", "Occupation"]).unwrap();
            ws.row(crate::cells!["Wolfgang Mozart", 1756, 1791, "Composer"]).unwrap();
            ws.row(crate::cells!["Sigmund Freud", 1856, 1939, "Psychoanalyst"]).unwrap();
        }
        fx.sheet.finalize();

        let table = &fx.sheet.tables()[0];
        assert_eq!(table.id, 1);
        assert_eq!(table.name, "Table1");
        assert_eq!(table.range, "A1:D3");
        assert_eq!(table.header, vec!["Name", "Birth", "Death", "Occupation"]);
        assert!(!fx.sheet.is_table_open());
    }

    #[test]
    fn test_header_closes_with_row() {
        let mut fx = Fixture::new();
        let mut ws = fx.builder();
        ws.open_row();
        ws.cell("before").unwrap();
        ws.open_table(TableOptions::named("People")).unwrap();
        ws.cells(["x", "y"]).unwrap();
        ws.open_row();
        ws.cells(["1", "2", "3", "4"]).unwrap();
        let sheet = ws.sheet();
        assert!(!sheet.is_header_open());
        assert!(sheet.is_table_open());
        assert_eq!(sheet.tables()[0].range, "B1:C");
        assert_eq!(sheet.tables()[0].header, vec!["x", "y"]);
    }

    #[test]
    fn test_open_table_closes_previous() {
        let mut fx = Fixture::new();
        let mut ws = fx.builder();
        ws.open_row();
        ws.open_table(TableOptions::default()).unwrap();
        ws.cells(["a", "b"]).unwrap();
        ws.row(["1", "2"]).unwrap();
        ws.open_row();
        ws.open_table(TableOptions::default()).unwrap();
        ws.cell("c").unwrap();
        ws.close_table();

        let tables = ws.sheet().tables();
        assert_eq!(tables[0].range, "A1:B3");
        assert_eq!(tables[1].range, "A3:A3");
        assert_eq!(tables[1].id, 2);
    }

    #[test]
    fn test_header_without_cells_uses_start_column() {
        let mut fx = Fixture::new();
        let mut ws = fx.builder();
        ws.open_row();
        ws.cells(["a", "b"]).unwrap();
        ws.open_table(TableOptions::default()).unwrap();
        ws.close_table();
        assert_eq!(ws.sheet().tables()[0].range, "C1:C1");
    }

    #[test]
    fn test_close_operations_idempotent() {
        let mut fx = Fixture::new();
        {
            let mut ws = fx.builder();
            ws.open_row();
            ws.open_table(TableOptions::default()).unwrap();
            ws.cell("h").unwrap();
        }
        fx.sheet.finalize();
        let body = fx.sheet.body.clone();
        let tables = fx.sheet.tables.clone();

        fx.sheet.finalize();
        fx.sheet.close_row();
        fx.sheet.close_header();
        fx.sheet.close_table();

        assert_eq!(fx.sheet.body, body);
        assert_eq!(fx.sheet.tables, tables);
    }

    #[test]
    fn test_scoped_style_restores_sticky() {
        let mut fx = Fixture::new();
        let mut ws = fx.builder();
        ws.open_row();
        ws.with_style(&StylePatch::new().bold(true), |ws| {
            ws.cell("bold")?;
            Ok(())
        })
        .unwrap();
        ws.cell("plain").unwrap();

        assert_eq!(ws.sheet().sticky_style_id(), 0);
        assert_eq!(ws.sheet().sticky_style(), &StylePatch::default());
        assert!(fx.body().contains("<c r=\"A1\" s=\"1\" t=\"s\">"));
        assert!(fx.body().contains("<c r=\"B1\" s=\"0\" t=\"s\">"));
    }

    #[test]
    fn test_scoped_style_restored_on_error() {
        let mut fx = Fixture::new();
        let mut ws = fx.builder();
        let result = ws.with_style(&StylePatch::new().italic(true), |ws| {
            ws.cell("no row")?;
            Ok(())
        });
        assert!(matches!(result, Err(Error::RowNotOpen)));
        assert_eq!(ws.sheet().sticky_style_id(), 0);
    }

    #[test]
    fn test_sticky_style_merges() {
        let mut fx = Fixture::new();
        let mut ws = fx.builder();
        ws.open_row();
        ws.style(&StylePatch::new().bold(true));
        ws.cell("Mark McConnell").unwrap();
        ws.cell_styled(1979, StylePatch::new().bg("00CC00")).unwrap();
        ws.cell("Isn't!").unwrap();
        ws.style(&StylePatch::new().bold(false));
        ws.cell("Programmer").unwrap();

        let body = fx.body();
        assert!(body.contains("<c r=\"A1\" s=\"1\" t=\"s\">"));
        assert!(body.contains("<c r=\"B1\" s=\"2\"><v>1979</v>"));
        assert!(body.contains("<c r=\"C1\" s=\"1\" t=\"s\">"));
        assert!(body.contains("<c r=\"D1\" s=\"0\" t=\"s\">"));
    }

    #[test]
    fn test_replace_style() {
        let mut fx = Fixture::new();
        let mut ws = fx.builder();
        ws.style(&StylePatch::new().bold(true));
        ws.replace_style(StylePatch::new().halign(HorizontalAlignment::Right));
        assert_eq!(ws.sheet().sticky_style().bold, None);
        ws.with_style_replaced(StylePatch::default(), |ws| {
            assert_eq!(ws.sheet().sticky_style_id(), 0);
            Ok(())
        })
        .unwrap();
        assert_eq!(
            ws.sheet().sticky_style().halign,
            Some(HorizontalAlignment::Right)
        );
    }

    #[test]
    fn test_explicit_style_id_is_not_reinterned() {
        let mut fx = Fixture::new();
        let mut ws = fx.builder();
        ws.open_row();
        ws.cell_styled("x", 42u32).unwrap();
        assert_eq!(ws.registry().styles().len(), 1);
        assert!(fx.body().contains("s=\"42\""));
    }

    #[test]
    fn test_auto_width() {
        let mut fx = Fixture::new();
        let mut ws = fx.builder();
        ws.row(["Name", "Occupation"]).unwrap();
        ws.row(crate::cells!["Wolfgang Mozart", 1756]).unwrap();
        assert_eq!(ws.widths(), &[16.0, 11.0]);

        ws.set_widths(&[30.0]);
        ws.row(["a much longer value than thirty characters wide"]).unwrap();
        assert_eq!(ws.widths(), &[30.0]);
        assert!(!ws.sheet().auto_width());
    }

    #[test]
    fn test_row_with_closes_row() {
        let mut fx = Fixture::new();
        let mut ws = fx.builder();
        ws.row_with(["Sigmund Freud"], |ws| {
            ws.cells([1856, 1939])?;
            ws.cell("Psychoanalyst")?;
            Ok(())
        })
        .unwrap();
        assert!(!ws.sheet().is_row_open());
        assert!(fx.body().ends_with("</row>"));
    }

    #[test]
    fn test_table_with_closes_table() {
        let mut fx = Fixture::new();
        let mut ws = fx.builder();
        ws.open_row();
        ws.table_with(TableOptions::default(), |ws| {
            ws.cells(["a", "b"])?;
            ws.row(["1", "2"])?;
            Ok(())
        })
        .unwrap();
        assert!(!ws.sheet().is_table_open());
        assert_eq!(ws.sheet().tables()[0].range, "A1:B2");
    }

    #[test]
    fn test_column_capacity_error_leaves_row_intact() {
        let mut fx = Fixture::new();
        let mut ws = fx.builder();
        ws.open_row();
        ws.cells(std::iter::repeat(1).take(MAX_COLUMNS)).unwrap();
        assert!(matches!(
            ws.cell(1),
            Err(Error::ColumnCapacity { index }) if index == MAX_COLUMNS
        ));
        assert_eq!(ws.sheet().current_cell(), Some(MAX_COLUMNS - 1));
        assert!(fx.body().contains("<c r=\"ZZZ1\""));
    }

    #[test]
    fn test_render_sheet_data() {
        let mut fx = Fixture::new();
        let mut out = Vec::new();
        fx.sheet.render_sheet_data(&mut out);
        assert_eq!(out, b"<sheetData/>");

        fx.builder().row([7]).unwrap();
        let mut out = Vec::new();
        fx.sheet.render_sheet_data(&mut out);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<sheetData><row r=\"1\"><c r=\"A1\" s=\"0\"><v>7</v></c></row></sheetData>"
        );
    }

    proptest! {
        #[test]
        fn prop_auto_width_never_shrinks(rows in proptest::collection::vec(
            proptest::collection::vec("[a-z]{0,12}", 1..6), 1..20)
        ) {
            let mut fx = Fixture::new();
            let mut ws = fx.builder();
            let mut previous: Vec<f64> = Vec::new();
            for row in rows {
                ws.row(row).unwrap();
                let now = ws.widths().to_vec();
                for (i, w) in previous.iter().enumerate() {
                    prop_assert!(now[i] >= *w);
                }
                previous = now;
            }
        }
    }
}
