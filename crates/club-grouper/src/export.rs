use crate::grouping::report::{ReportRow, DUPLICATE_HEADERS, GROUPED_HEADERS};
use crate::grouping::GroupingOutcome;
use std::io::Write;

fn write_sheet<W: Write>(
    writer: &mut csv::Writer<W>,
    headers: [&str; 3],
    rows: &[ReportRow],
) -> Result<(), csv::Error> {
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row.fields())?;
    }
    Ok(())
}

/// Writes the grouped sheet as CSV.
pub fn write_grouped_report<W: Write>(
    writer: W,
    outcome: &GroupingOutcome,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    write_sheet(&mut csv_writer, GROUPED_HEADERS, &outcome.grouped_rows())?;
    csv_writer.flush()?;
    Ok(())
}

/// Writes the duplicates sheet. Returns `false` without writing anything
/// when there are no duplicates.
pub fn write_duplicate_report<W: Write>(
    writer: W,
    outcome: &GroupingOutcome,
) -> Result<bool, csv::Error> {
    let Some(rows) = outcome.duplicate_rows() else {
        return Ok(false);
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    write_sheet(&mut csv_writer, DUPLICATE_HEADERS, &rows)?;
    csv_writer.flush()?;
    Ok(true)
}

/// Both sheets in one CSV document, separated by a blank row. Used for the
/// single-file download.
pub fn write_workbook<W: Write>(writer: W, outcome: &GroupingOutcome) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    write_sheet(&mut csv_writer, GROUPED_HEADERS, &outcome.grouped_rows())?;

    if let Some(rows) = outcome.duplicate_rows() {
        csv_writer.write_record(["", "", ""])?;
        write_sheet(&mut csv_writer, DUPLICATE_HEADERS, &rows)?;
    }

    csv_writer.flush()?;
    Ok(())
}
