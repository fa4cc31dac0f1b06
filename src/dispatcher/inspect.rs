use anyhow::{Context, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use colored::Colorize;
use std::path::Path;

/// Print the sheets of a workbook, optionally with every non-empty cell
pub async fn dispatch_inspect(file_path: &Path, full: bool) -> Result<()> {
    println!(
        "{} Inspecting file: {}\n",
        "📊".cyan().bold(),
        file_path.display().to_string().green()
    );

    let mut workbook: Xlsx<_> = open_workbook(file_path).context("Failed to open Excel file")?;

    let sheet_names = workbook.sheet_names().to_vec();
    println!(
        "{} Found {} sheet(s):",
        "📄".cyan().bold(),
        sheet_names.len()
    );
    for name in &sheet_names {
        println!("  • {}", name.yellow());
    }
    println!();

    for sheet_name in sheet_names {
        let range = match workbook.worksheet_range(&sheet_name) {
            Ok(range) => range,
            Err(err) => {
                eprintln!(
                    "{} Failed to read sheet {}: {}",
                    "⚠️".yellow(),
                    sheet_name.yellow(),
                    err
                );
                continue;
            }
        };

        println!(
            "{} Sheet: {}",
            "📌".cyan().bold(),
            sheet_name.yellow().bold()
        );
        println!("  Rows: {}", range.height());
        println!("  Columns: {}\n", range.width());

        if full {
            for (row_idx, row) in range.rows().enumerate() {
                let cells: Vec<String> = row
                    .iter()
                    .enumerate()
                    .filter(|(_, cell)| *cell != &Data::Empty)
                    .map(|(col_idx, cell)| format!("{}={}", col_idx + 1, cell))
                    .collect();
                if !cells.is_empty() {
                    println!("  Row {}: {}", row_idx + 1, cells.join(" | "));
                }
            }
            println!();
        }
    }

    if !full {
        println!("{}", "Tip: Use --full to see all data".blue());
    }

    Ok(())
}
