use imap_query::QueryResult;
use tabled::{Table, Tabled, settings::Style};

/// Pipe-delimited table with a header row.
pub fn markdown_table<T: Tabled, I: IntoIterator<Item = T>>(data: I) -> Table {
    let mut table = Table::new(data);
    table.with(Style::markdown());
    table
}

#[derive(Tabled)]
struct ResultRow<'a> {
    #[tabled(rename = "Instrument")]
    instrument: &'a str,
    #[tabled(rename = "Data Level")]
    data_level: &'a str,
    #[tabled(rename = "Descriptor")]
    descriptor: &'a str,
    #[tabled(rename = "Start Date")]
    start_date: &'a str,
    #[tabled(rename = "Repointing")]
    repointing: String,
    #[tabled(rename = "Version")]
    version: &'a str,
    #[tabled(rename = "Filename")]
    filename: &'a str,
}

impl<'a> From<&'a QueryResult> for ResultRow<'a> {
    fn from(result: &'a QueryResult) -> Self {
        Self {
            instrument: &result.instrument,
            data_level: &result.data_level,
            descriptor: &result.descriptor,
            start_date: &result.start_date,
            repointing: result.repointing.as_ref().map(ToString::to_string).unwrap_or_default(),
            version: &result.version,
            filename: result.filename(),
        }
    }
}

/// Match count line, followed by one row per file when there are any.
pub fn results_table(results: &[QueryResult]) -> String {
    let summary = format!("Found [{}] matching files", results.len());
    if results.is_empty() {
        return summary;
    }

    let table = markdown_table(results.iter().map(ResultRow::from));
    format!("{summary}\n{table}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(version: &str, repointing: serde_json::Value) -> QueryResult {
        serde_json::from_value(serde_json::json!({
            "instrument": "mag",
            "data_level": "l0",
            "descriptor": "raw",
            "start_date": "20250101",
            "repointing": repointing,
            "version": version,
            "extension": "pkts",
            "file_path": format!("imap/mag/l0/2025/01/imap_mag_l0_raw_20250101_{version}.pkts"),
        }))
        .unwrap()
    }

    #[test]
    fn test_empty_results_print_only_the_count() {
        assert_eq!(results_table(&[]), "Found [0] matching files");
    }

    #[test]
    fn test_rows_carry_filename_not_full_path() {
        let rendered = results_table(&[result("v001", serde_json::Value::Null), result("v002", serde_json::json!(7))]);
        let mut lines = rendered.lines();

        assert_eq!(lines.next(), Some("Found [2] matching files"));
        let header = lines.next().unwrap();
        for column in ["Instrument", "Data Level", "Descriptor", "Start Date", "Repointing", "Version", "Filename"] {
            assert!(header.contains(column), "missing column {column}");
        }
        assert!(rendered.contains("imap_mag_l0_raw_20250101_v002.pkts"));
        assert!(!rendered.contains("imap/mag/l0/2025/01"));
        assert!(rendered.contains("| 7 "));
    }

    #[test]
    fn test_repointing_label_is_shown_verbatim() {
        let rendered = results_table(&[result("v001", serde_json::json!("repoint00001"))]);
        assert!(rendered.contains("| repoint00001 "));
    }
}
