use super::ImportError;
use std::io::Read;

pub const NAME_COLUMN: &str = "Name";

/// Reads the `Name` column of one CSV sheet.
///
/// Cells are returned verbatim (no trimming) because duplicate detection is
/// byte-exact; short rows yield an empty name.
pub(crate) fn parse_names<R: Read>(reader: R) -> Result<Vec<String>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let column = name_column(csv_reader.headers()?).ok_or(ImportError::MissingNameColumn)?;

    let mut names = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        names.push(record.get(column).unwrap_or_default().to_string());
    }

    Ok(names)
}

fn name_column(headers: &csv::StringRecord) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim_start_matches('\u{feff}').trim() == NAME_COLUMN)
}

#[cfg(test)]
pub(crate) fn name_column_for_tests(header_line: &str) -> Option<usize> {
    let mut reader = csv::ReaderBuilder::new().from_reader(header_line.as_bytes());
    let headers = reader.headers().ok()?.clone();
    name_column(&headers)
}
