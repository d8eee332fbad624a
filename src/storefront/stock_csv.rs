//! Fixed-layout stock CSV: `ID,Nom,Prix,Stock`.

use crate::errors::ServiceError;
use crate::models::StockView;

pub const STOCK_CSV_HEADER: [&str; 4] = ["ID", "Nom", "Prix", "Stock"];

/// Renders the export: header plus one row per product.
pub fn render(rows: &[StockView]) -> Result<String, ServiceError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(STOCK_CSV_HEADER)
        .map_err(|e| ServiceError::SerializationError(format!("CSV export: {e}")))?;
    for row in rows {
        writer
            .write_record([
                row.id.to_string(),
                row.label.clone(),
                row.price.to_string(),
                row.stock.to_string(),
            ])
            .map_err(|e| ServiceError::SerializationError(format!("CSV export: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ServiceError::SerializationError(format!("CSV export: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| ServiceError::SerializationError(format!("CSV export: {e}")))
}

/// One import row: only the id and the stock columns matter.
#[derive(Debug, Clone, PartialEq)]
pub struct StockCsvRow {
    pub id: i64,
    pub stock: f64,
}

/// Parses an import file. Row 0 is the header; short or malformed rows are
/// skipped rather than failing the whole import.
pub fn parse(data: &str) -> Vec<StockCsvRow> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_bytes());

    reader
        .records()
        .filter_map(|record| record.ok())
        .filter_map(|record| {
            if record.len() < 4 {
                return None;
            }
            let id = record.get(0)?.trim().parse().ok()?;
            let stock = record.get(3)?.trim().parse().ok()?;
            Some(StockCsvRow { id, stock })
        })
        .collect()
}
