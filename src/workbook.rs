use crate::styles::StyleRegistry;
use crate::types::{Result, StylePatch};
use crate::validation::check_new_sheet_name;
use crate::worksheet::{SheetBuilder, Worksheet};
use crate::writer::{self, Part};
use chrono::{DateTime, Utc};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct WorkbookOptions {
    /// Style of every cell that names no other; each sheet starts with it as
    /// its sticky style.
    pub default_style: StylePatch,
    /// Recorded as creator and last editor in the document properties.
    pub creator: String,
}

impl Default for WorkbookOptions {
    fn default() -> Self {
        Self {
            default_style: Default::default(),
            creator: "tabxl".to_string(),
        }
    }
}

/// A document under construction: the shared registries, the worksheets in
/// creation order and the table-id counter shared by all of them.
#[derive(Debug, Clone)]
pub struct Workbook {
    registry: StyleRegistry,
    sheets: Vec<Worksheet>,
    next_table_id: u32,
    options: WorkbookOptions,
    created: DateTime<Utc>,
}

impl Workbook {
    pub fn new(default_style: StylePatch) -> Self {
        Self::with_options(WorkbookOptions {
            default_style,
            ..WorkbookOptions::default()
        })
    }

    pub fn with_options(options: WorkbookOptions) -> Self {
        Self {
            registry: StyleRegistry::new(&options.default_style),
            sheets: Vec::new(),
            next_table_id: 0,
            options,
            created: Utc::now(),
        }
    }

    /// Build a workbook inside `f` and write it to `path` in one go.
    pub fn write_with<P, F>(path: P, default_style: StylePatch, f: F) -> Result<Workbook>
    where
        P: AsRef<Path>,
        F: FnOnce(&mut Workbook) -> Result<()>,
    {
        let mut workbook = Workbook::new(default_style);
        f(&mut workbook)?;
        workbook.write(path)?;
        Ok(workbook)
    }

    /// Add a worksheet and return a builder for it. Without a name the sheet
    /// is called `Sheet<n>`, n starting at its 1-based position and skipping
    /// names already taken.
    pub fn worksheet(&mut self, name: Option<&str>) -> Result<SheetBuilder<'_>> {
        let name = match name {
            Some(n) => {
                check_new_sheet_name(n, self.sheets.iter().map(|s| s.name()))?;
                n.to_string()
            }
            None => self.unused_default_name(),
        };

        log::debug!("adding worksheet {} ({})", self.sheets.len() + 1, name);
        self.sheets
            .push(Worksheet::new(name, self.options.default_style.clone()));
        let idx = self.sheets.len() - 1;
        Ok(SheetBuilder::new(
            &mut self.sheets[idx],
            &mut self.registry,
            &mut self.next_table_id,
        ))
    }

    fn unused_default_name(&self) -> String {
        let mut n = self.sheets.len() + 1;
        loop {
            let candidate = format!("Sheet{}", n);
            let lower = candidate.to_lowercase();
            if !self.sheets.iter().any(|s| s.name().to_lowercase() == lower) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Builder for an existing worksheet, by creation index.
    pub fn sheet(&mut self, index: usize) -> Option<SheetBuilder<'_>> {
        let sheet = self.sheets.get_mut(index)?;
        Some(SheetBuilder::new(
            sheet,
            &mut self.registry,
            &mut self.next_table_id,
        ))
    }

    pub fn sheets(&self) -> &[Worksheet] {
        &self.sheets
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    pub fn creator(&self) -> &str {
        &self.options.creator
    }

    pub fn created(&self) -> &DateTime<Utc> {
        &self.created
    }

    /// Close every open row, header and table, in sheet order.
    pub fn finalize(&mut self) {
        for sheet in &mut self.sheets {
            sheet.finalize();
        }
    }

    /// Finalize and render every archive part without touching the disk.
    pub fn to_parts(&mut self) -> Vec<Part> {
        self.finalize();
        writer::build_parts(self)
    }

    /// Finalize and write the archive to `path`.
    pub fn write(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let parts = self.to_parts();
        writer::write_parts(parts, path.as_ref())?;
        Ok(self)
    }
}
