//! Excel workbook sink backed by rust_xlsxwriter

use chrono::Datelike;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{
    DocProperties, ExcelDateTime, Format, FormatAlign, FormatBorder, Workbook, Worksheet,
    XlsxError,
};
use tracing::debug;

use super::sheet::{Cell, Row, RowStyle, Section, SectionKind, WorkbookLayout};
use crate::error::SinkError;

/// Turns a built workbook description into document bytes
pub trait SpreadsheetSink: Send + Sync {
    /// File extension of the produced document, without the dot
    fn extension(&self) -> &'static str;

    fn render(&self, workbook: &WorkbookLayout) -> Result<Vec<u8>, SinkError>;
}

const HEADER_FILL: u32 = 0x1F497D;
const SUBHEADER_FILL: u32 = 0xDCE6F1;
const ALTERNATE_FILL: u32 = 0xF2F2F2;
const TOTAL_FILL: u32 = 0xE2EFDA;

const MONEY_FORMAT: &str = "\"Rp\" #,##0.00";
const PERCENT_FORMAT: &str = "0.00%";
const COUNT_FORMAT: &str = "0";
const DATE_FORMAT: &str = "dd/mm/yyyy";

/// Formats for one row style, one per cell kind
struct StyleSet {
    text: Format,
    label: Format,
    money: Format,
    percent: Format,
    count: Format,
    date: Format,
}

impl StyleSet {
    fn for_row(style: RowStyle) -> Self {
        let base = match style {
            RowStyle::Header => Format::new()
                .set_bold()
                .set_font_color(0xFFFFFF)
                .set_background_color(HEADER_FILL)
                .set_align(FormatAlign::Center)
                .set_border(FormatBorder::Thin),
            RowStyle::Subheader => Format::new()
                .set_bold()
                .set_background_color(SUBHEADER_FILL)
                .set_border(FormatBorder::Thin),
            RowStyle::Body => Format::new().set_border(FormatBorder::Thin),
            RowStyle::Alternate => Format::new()
                .set_background_color(ALTERNATE_FILL)
                .set_border(FormatBorder::Thin),
            RowStyle::Total => Format::new()
                .set_bold()
                .set_background_color(TOTAL_FILL)
                .set_border(FormatBorder::Thin)
                .set_border_top(FormatBorder::Double),
        };

        Self {
            label: base.clone().set_bold(),
            money: base.clone().set_num_format(MONEY_FORMAT),
            percent: base.clone().set_num_format(PERCENT_FORMAT),
            count: base
                .clone()
                .set_num_format(COUNT_FORMAT)
                .set_align(FormatAlign::Center),
            date: base
                .clone()
                .set_num_format(DATE_FORMAT)
                .set_align(FormatAlign::Center),
            text: base,
        }
    }
}

struct Styles {
    header: StyleSet,
    subheader: StyleSet,
    body: StyleSet,
    alternate: StyleSet,
    total: StyleSet,
    banner_title: Format,
}

impl Styles {
    fn new() -> Self {
        Self {
            header: StyleSet::for_row(RowStyle::Header),
            subheader: StyleSet::for_row(RowStyle::Subheader),
            body: StyleSet::for_row(RowStyle::Body),
            alternate: StyleSet::for_row(RowStyle::Alternate),
            total: StyleSet::for_row(RowStyle::Total),
            banner_title: StyleSet::for_row(RowStyle::Header)
                .text
                .set_font_size(14)
                .set_align(FormatAlign::VerticalCenter),
        }
    }

    fn get(&self, style: RowStyle) -> &StyleSet {
        match style {
            RowStyle::Header => &self.header,
            RowStyle::Subheader => &self.subheader,
            RowStyle::Body => &self.body,
            RowStyle::Alternate => &self.alternate,
            RowStyle::Total => &self.total,
        }
    }
}

/// Writes `.xlsx` workbooks: one worksheet per section
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxSink;

impl SpreadsheetSink for XlsxSink {
    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn render(&self, layout: &WorkbookLayout) -> Result<Vec<u8>, SinkError> {
        let mut workbook = Workbook::new();
        let properties = DocProperties::new()
            .set_author(&layout.author)
            .set_title("Laporan FB Ads");
        workbook.set_properties(&properties);

        let styles = Styles::new();
        for kind in SectionKind::WORKBOOK_ORDER {
            if let Some(section) = layout.section(kind) {
                let sheet = workbook.add_worksheet();
                write_section(sheet, section, &styles)?;
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}

fn write_section(sheet: &mut Worksheet, section: &Section, styles: &Styles) -> Result<(), XlsxError> {
    sheet.set_name(section.kind.sheet_name())?;

    for (col, column) in section.columns.iter().enumerate() {
        sheet.set_column_width(col as u16, column.width)?;
    }

    let last_col = section.width().saturating_sub(1) as u16;
    for (row_idx, row) in section.rows.iter().enumerate() {
        let row_num = row_idx as u32;
        if row.banner {
            write_banner(sheet, row_num, last_col, row, styles)?;
        } else if !row.cells.is_empty() {
            write_row(sheet, row_num, section.width(), row, styles.get(row.style))?;
        }
    }

    debug!(
        "Wrote sheet '{}' with {} rows",
        section.kind.sheet_name(),
        section.rows.len()
    );
    Ok(())
}

fn write_banner(
    sheet: &mut Worksheet,
    row: u32,
    last_col: u16,
    banner: &Row,
    styles: &Styles,
) -> Result<(), XlsxError> {
    let text = match banner.cells.first() {
        Some(Cell::Label(s)) | Some(Cell::Text(s)) => s.as_str(),
        _ => "",
    };
    let format = if banner.style == RowStyle::Header {
        sheet.set_row_height(row, 24)?;
        &styles.banner_title
    } else {
        &styles.get(banner.style).label
    };

    if last_col > 0 {
        sheet.merge_range(row, 0, row, last_col, text, format)?;
    } else {
        sheet.write_string_with_format(row, 0, text, format)?;
    }
    Ok(())
}

fn write_row(
    sheet: &mut Worksheet,
    row: u32,
    width: usize,
    cells: &Row,
    styles: &StyleSet,
) -> Result<(), XlsxError> {
    // Short rows are padded with styled blanks so fills span the table
    for col in 0..width.max(cells.cells.len()) {
        let col_num = col as u16;
        match cells.cells.get(col).unwrap_or(&Cell::Empty) {
            Cell::Empty => {
                sheet.write_blank(row, col_num, &styles.text)?;
            }
            Cell::Label(s) => {
                sheet.write_string_with_format(row, col_num, s, &styles.label)?;
            }
            Cell::Text(s) => {
                sheet.write_string_with_format(row, col_num, s, &styles.text)?;
            }
            Cell::Money(v) => {
                sheet.write_number_with_format(row, col_num, to_f64(*v), &styles.money)?;
            }
            Cell::Percentage(p) => {
                let fraction = p.checked_div(Decimal::ONE_HUNDRED).unwrap_or(Decimal::ZERO);
                sheet.write_number_with_format(row, col_num, to_f64(fraction), &styles.percent)?;
            }
            Cell::Count(n) => {
                sheet.write_number_with_format(row, col_num, *n as f64, &styles.count)?;
            }
            Cell::Date(d) => {
                let date = ExcelDateTime::from_ymd(d.year() as u16, d.month() as u8, d.day() as u8)?;
                sheet.write_datetime_with_format(row, col_num, &date, &styles.date)?;
            }
        }
    }
    Ok(())
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::sheet::Column;
    use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    fn sample_layout() -> WorkbookLayout {
        let mut chart = Section::new(
            SectionKind::Chart,
            vec![Column::new("Tanggal", 15), Column::new("Modal", 20)],
        );
        chart.push(Row::banner(RowStyle::Header, "GRAFIK"));
        chart.push_column_headers();
        chart.push(Row::new(
            RowStyle::Body,
            vec![
                Cell::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()),
                Cell::Money(dec!(1500.25)),
            ],
        ));

        let mut summary = Section::new(
            SectionKind::Summary,
            vec![Column::new("Metrik", 25), Column::new("Nilai", 22)],
        );
        summary.push(Row::banner(RowStyle::Header, "RINGKASAN"));
        summary.push(Row::blank());
        summary.push(Row::new(
            RowStyle::Total,
            vec![Cell::label("Profit Rate"), Cell::Percentage(dec!(28.70))],
        ));
        summary.push(Row::new(RowStyle::Body, vec![Cell::label("Jumlah"), Cell::Count(7)]));

        WorkbookLayout {
            author: "Tester".to_string(),
            sections: vec![chart, summary],
        }
    }

    fn open(bytes: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
        open_workbook_from_rs(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn test_sheets_follow_workbook_order() {
        let bytes = XlsxSink.render(&sample_layout()).unwrap();
        let workbook = open(bytes);
        assert_eq!(workbook.sheet_names(), vec!["Ringkasan", "Grafik"]);
    }

    #[test]
    fn test_cells_keep_numeric_types() {
        let bytes = XlsxSink.render(&sample_layout()).unwrap();
        let mut workbook = open(bytes);

        let chart = workbook.worksheet_range("Grafik").unwrap();
        assert_eq!(
            chart.get_value((0, 0)),
            Some(&Data::String("GRAFIK".to_string()))
        );
        assert_eq!(
            chart.get_value((1, 1)),
            Some(&Data::String("Modal".to_string()))
        );
        assert_eq!(chart.get_value((2, 1)), Some(&Data::Float(1500.25)));
        assert!(matches!(chart.get_value((2, 0)), Some(Data::DateTime(_))));

        let summary = workbook.worksheet_range("Ringkasan").unwrap();
        match summary.get_value((2, 1)) {
            Some(Data::Float(f)) => assert!((f - 0.287).abs() < 1e-9),
            other => panic!("expected fraction, got {:?}", other),
        }
        assert_eq!(summary.get_value((3, 1)), Some(&Data::Float(7.0)));
    }

    #[test]
    fn test_extension() {
        assert_eq!(XlsxSink.extension(), "xlsx");
    }
}
