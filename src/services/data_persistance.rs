use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use rust_xlsxwriter::Workbook;

use crate::{
    configuration::OutputSettings,
    domain::product::{ProductRecord, COLUMNS},
};

const SHEET_NAME: &str = "Sheet1";

/// Writes the same records as CSV, JSON lines and XLSX. Returns the paths in
/// that order.
///
/// Each file is written under a `.part` name first and only renamed once all
/// three succeeded, so a failed write leaves none of them behind.
pub fn persist_products(
    products: &[ProductRecord],
    output: &OutputSettings,
) -> anyhow::Result<Vec<PathBuf>> {
    let files = vec![
        output.file_path("csv"),
        output.file_path("json"),
        output.file_path("xlsx"),
    ];
    let staged: Vec<PathBuf> = files.iter().map(|f| staging_path(f)).collect();

    if let Err(e) = write_staged(products, &files, &staged) {
        for part in &staged {
            _ = fs::remove_file(part);
        }
        return Err(e);
    }

    for (part, file) in staged.iter().zip(files.iter()) {
        fs::rename(part, file)
            .with_context(|| format!("Failed to move {} into place", file.display()))?;
    }

    Ok(files)
}

fn write_staged(
    products: &[ProductRecord],
    files: &[PathBuf],
    staged: &[PathBuf],
) -> anyhow::Result<()> {
    write_csv(products, &staged[0])
        .with_context(|| format!("Failed to write CSV file {}", files[0].display()))?;
    write_json_lines(products, &staged[1])
        .with_context(|| format!("Failed to write JSON file {}", files[1].display()))?;
    write_xlsx(products, &staged[2])
        .with_context(|| format!("Failed to write XLSX file {}", files[2].display()))?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_os_string();
    staged.push(".part");
    PathBuf::from(staged)
}

fn write_csv(products: &[ProductRecord], path: &Path) -> anyhow::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    // Written by hand so an empty slice still gets a header.
    csv_writer.write_record(COLUMNS)?;
    for product in products {
        csv_writer.write_record(product.row())?;
    }
    csv_writer.flush()?;

    Ok(())
}

fn write_json_lines(products: &[ProductRecord], path: &Path) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    for product in products {
        serde_json::to_writer(&mut writer, product)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    Ok(())
}

fn write_xlsx(products: &[ProductRecord], path: &Path) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (i, product) in products.iter().enumerate() {
        let row = i as u32 + 1;
        for (col, value) in product.row().iter().enumerate() {
            worksheet.write_string(row, col as u16, *value)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Hands each file to the platform's default application. Failures are only
/// logged.
pub fn open_saved_files(files: &[PathBuf]) {
    for file in files {
        if let Err(e) = open::that(file) {
            log::error!("Could not open {}: {:?}", file.display(), e);
        }
    }
}
