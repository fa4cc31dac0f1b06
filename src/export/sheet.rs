//! Sink-neutral description of a report workbook
//!
//! Sections carry semantic cell types and row style tags only. Colors,
//! borders and number formats are decided by the [`super::SpreadsheetSink`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

/// The four report sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKind {
    Detail,
    Monthly,
    Summary,
    Chart,
}

impl SectionKind {
    /// Build order
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Detail,
        SectionKind::Monthly,
        SectionKind::Summary,
        SectionKind::Chart,
    ];

    /// Order of the sheets in the finished workbook
    pub const WORKBOOK_ORDER: [SectionKind; 4] = [
        SectionKind::Summary,
        SectionKind::Monthly,
        SectionKind::Detail,
        SectionKind::Chart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Detail => "detail",
            SectionKind::Monthly => "monthly",
            SectionKind::Summary => "summary",
            SectionKind::Chart => "chart",
        }
    }

    /// Sheet name shown in the workbook
    pub fn sheet_name(&self) -> &'static str {
        match self {
            SectionKind::Detail => "Data Harian",
            SectionKind::Monthly => "Data Bulanan",
            SectionKind::Summary => "Ringkasan",
            SectionKind::Chart => "Grafik",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic row style; the sink maps these to visual styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Header,
    Subheader,
    Body,
    Alternate,
    Total,
}

impl RowStyle {
    /// Body or alternate background by zero-based data row index
    pub fn striped(index: usize) -> Self {
        if index % 2 == 0 {
            RowStyle::Body
        } else {
            RowStyle::Alternate
        }
    }

    pub fn is_data(&self) -> bool {
        matches!(self, RowStyle::Body | RowStyle::Alternate)
    }
}

/// Typed cell value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Empty,
    /// Row label or heading text
    Label(String),
    /// Free text such as notes
    Text(String),
    Money(Decimal),
    /// Percentage value, 28.71 meaning 28.71%
    Percentage(Decimal),
    Count(u64),
    Date(NaiveDate),
}

impl Cell {
    pub fn label(s: impl Into<String>) -> Self {
        Cell::Label(s.into())
    }

    pub fn as_money(&self) -> Option<Decimal> {
        match self {
            Cell::Money(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            _ => None,
        }
    }
}

/// One styled row. A banner row spans the full section width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub style: RowStyle,
    pub cells: Vec<Cell>,
    pub banner: bool,
}

impl Row {
    pub fn new(style: RowStyle, cells: Vec<Cell>) -> Self {
        Self {
            style,
            cells,
            banner: false,
        }
    }

    pub fn banner(style: RowStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            cells: vec![Cell::Label(text.into())],
            banner: true,
        }
    }

    pub fn blank() -> Self {
        Self::new(RowStyle::Body, Vec::new())
    }

    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }
}

/// Column header and display width in characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub width: u16,
}

impl Column {
    pub const fn new(header: &'static str, width: u16) -> Self {
        Self { header, width }
    }
}

/// A named, fully-built report section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Section {
    pub fn new(kind: SectionKind, columns: Vec<Column>) -> Self {
        Self {
            kind,
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// The header row listing every column title
    pub fn push_column_headers(&mut self) {
        let cells = self.columns.iter().map(|c| Cell::label(c.header)).collect();
        self.rows.push(Row::new(RowStyle::Header, cells));
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Body and alternate rows only
    pub fn data_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| r.style.is_data() && !r.cells.is_empty())
    }
}

/// Everything a sink needs to produce one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookLayout {
    pub author: String,
    pub sections: Vec<Section>,
}

impl WorkbookLayout {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}
