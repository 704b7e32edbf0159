use super::GroupingOutcome;
use serde::Serialize;

pub const GROUPED_HEADERS: [&str; 3] = ["Club (Category)", "Team Count", "Teams"];
pub const DUPLICATE_HEADERS: [&str; 3] = ["Name", "Occurrences", "Duplicate_Count"];

/// One line of a tabular report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub label: String,
    pub count: String,
    pub detail: String,
}

impl ReportRow {
    fn new(label: impl Into<String>, count: impl ToString, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            count: count.to_string(),
            detail: detail.into(),
        }
    }

    fn blank() -> Self {
        Self::new("", "", "")
    }

    pub fn is_blank(&self) -> bool {
        self.label.is_empty() && self.count.is_empty() && self.detail.is_empty()
    }

    pub fn fields(&self) -> [&str; 3] {
        [&self.label, &self.count, &self.detail]
    }
}

impl GroupingOutcome {
    /// Group rows, then `TOTAL`, a blank separator and the `CHECK` line.
    pub fn grouped_rows(&self) -> Vec<ReportRow> {
        let check = self.check();
        let mut rows: Vec<ReportRow> = self
            .groups
            .iter()
            .map(|group| ReportRow::new(group.key(), group.team_count(), group.members.join(", ")))
            .collect();

        rows.push(ReportRow::new("TOTAL", check.grouped_total, ""));
        rows.push(ReportRow::blank());
        rows.push(ReportRow::new(
            "CHECK (Grouped + Duplicates)",
            check.summary(),
            format!("Original = {}", check.original_team_count),
        ));
        rows
    }

    /// `None` when no name repeats; the duplicates sheet is then omitted.
    pub fn duplicate_rows(&self) -> Option<Vec<ReportRow>> {
        if !self.duplicates.has_duplicates() {
            return None;
        }

        let mut rows: Vec<ReportRow> = self
            .duplicates
            .records
            .iter()
            .map(|record| {
                ReportRow::new(
                    record.name.as_str(),
                    record.occurrences,
                    record.duplicate_count.to_string(),
                )
            })
            .collect();
        rows.push(ReportRow::blank());
        rows.push(ReportRow::new(
            "TOTAL DUPLICATES",
            self.duplicates.total_duplicates,
            "",
        ));
        Some(rows)
    }
}
