// Export module - report sections, spreadsheet sink and the export run

pub mod sections;
pub mod sheet;
pub mod xlsx;

pub use sections::{build_section, chart_points, ChartPoint, ReportInput, CHART_WINDOW};
pub use sheet::{Cell, Column, Row, RowStyle, Section, SectionKind, WorkbookLayout};
pub use xlsx::{SpreadsheetSink, XlsxSink};

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ExportConfig;
use crate::db::DailyRecord;
use crate::error::{ExportError, SectionBuildError, SectionFailure};

/// Naming and metadata for one export run
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub file_prefix: String,
    pub author: String,
    /// Date stamped into the file name
    pub today: NaiveDate,
}

impl ExportOptions {
    pub fn from_config(config: &ExportConfig, today: NaiveDate) -> Self {
        Self {
            file_prefix: config.file_prefix.clone(),
            author: config.author.clone(),
            today,
        }
    }

    /// `<prefix>_<label>_<YYYY-MM-DD>.<extension>`
    pub fn file_name(&self, account_label: &str, extension: &str) -> String {
        let label: String = account_label
            .trim()
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        format!(
            "{}_{}_{}.{}",
            self.file_prefix,
            label,
            self.today.format("%Y-%m-%d"),
            extension
        )
    }
}

/// A finished export, not yet written anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    /// Write the document into `dir`, returning the full path
    pub fn save_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Build all four report sections concurrently and render one document.
///
/// Sections run as independent blocking tasks over a shared snapshot of
/// `records`. Every failing section is reported, never just the first, and
/// no partial document is produced.
pub async fn export_report(
    account_label: &str,
    records: Vec<DailyRecord>,
    sink: &dyn SpreadsheetSink,
    options: &ExportOptions,
) -> Result<Document, ExportError> {
    if records.is_empty() {
        warn!("Nothing to export for '{}'", account_label);
        return Err(ExportError::EmptyExport);
    }

    info!(
        "Exporting {} record(s) for '{}'",
        records.len(),
        account_label
    );

    let input = Arc::new(ReportInput {
        account_label: account_label.to_string(),
        records,
    });

    let handles: Vec<_> = SectionKind::ALL
        .into_iter()
        .map(|kind| {
            let input = Arc::clone(&input);
            let handle = tokio::task::spawn_blocking(move || build_section(kind, &input));
            (kind, handle)
        })
        .collect();

    let mut sections = Vec::with_capacity(handles.len());
    let mut failures = Vec::new();
    for (kind, handle) in handles {
        let outcome = match handle.await {
            Ok(result) => result.map_err(SectionFailure::from),
            Err(join_err) => Err(SectionFailure::Aborted(join_err.to_string())),
        };
        match outcome {
            Ok(section) => {
                debug!("Built {} section ({} rows)", kind, section.rows.len());
                sections.push(section);
            }
            Err(source) => {
                warn!("Section {} failed: {}", kind, source);
                failures.push(SectionBuildError {
                    section: kind,
                    source,
                });
            }
        }
    }

    if !failures.is_empty() {
        return Err(ExportError::Sections(failures));
    }

    let layout = WorkbookLayout {
        author: options.author.clone(),
        sections,
    };
    let bytes = sink.render(&layout)?;
    let file_name = options.file_name(account_label, sink.extension());

    info!("Rendered {} ({} bytes)", file_name, bytes.len());
    Ok(Document { file_name, bytes })
}
