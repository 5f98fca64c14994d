//! CSV payload encoding for workbook sheets.

use crate::error::FormatError;
use crate::schema::Row;

/// Encode one table as CSV text with a header row.
pub fn encode(columns: &[&str], rows: &[Row]) -> Result<String, FormatError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(columns)
        .map_err(|error| FormatError::SerializationError(error.to_string()))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|error| FormatError::SerializationError(error.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|error| FormatError::SerializationError(error.to_string()))?;
    String::from_utf8(bytes).map_err(|error| FormatError::SerializationError(error.to_string()))
}

/// Decode one sheet's CSV text into data rows. The header row is consumed;
/// ragged rows are kept as written and read blank-padded downstream.
pub fn decode(content: &str) -> Result<Vec<Row>, FormatError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| FormatError::ParseError(error.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
