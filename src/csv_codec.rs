//! CSV import and export
//!
//! File format: UTF-8, comma separated, header row
//! `name,achievement,fun,impact,ease`, one row per objective, numbers as
//! decimal text.
//!
//! Import locates columns by header name, so column order does not matter.
//! Missing columns and values that are not finite numbers in [0, 1] become 0;
//! a missing name becomes the empty string. Import never fails as a whole:
//! unreadable records are skipped and counted.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use thiserror::Error;

use crate::objective::{parse_objective_number, Axis, Objective};

/// Header row written on export, in column order
pub const CSV_HEADER: [&str; 5] = ["name", "achievement", "fun", "impact", "ease"];

/// Download name used when none is configured
pub const DEFAULT_EXPORT_FILENAME: &str = "objectives.csv";

const NAME_COLUMN: &str = "name";

/// What export does with commas inside objective names
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NameCommaPolicy {
    /// Remove them. Lossy: `"Read, write"` exports as `"Read write"`.
    #[default]
    Strip,
    /// Keep them and quote the field
    Quote,
}

/// CSV export errors
#[derive(Error, Debug)]
pub enum CsvError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Exported text is not UTF-8: {0}")]
    Encoding(String),
}

/// Result type alias for CSV operations
pub type CsvResult<T> = Result<T, CsvError>;

/// Outcome of an import
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CsvImport {
    /// Objectives in file order
    pub objectives: Vec<Objective>,
    /// Data rows that produced an objective
    pub rows_read: usize,
    /// Data rows that could not be read at all
    pub rows_skipped: usize,
    /// Expected columns absent from the header
    pub missing_columns: Vec<String>,
}

fn export_name(name: &str, policy: NameCommaPolicy) -> String {
    match policy {
        NameCommaPolicy::Strip => name.replace(',', ""),
        NameCommaPolicy::Quote => name.to_string(),
    }
}

/// Write objectives as CSV into `writer`
pub fn write_csv<W: Write>(
    writer: W,
    objectives: &[Objective],
    policy: NameCommaPolicy,
) -> CsvResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    for objective in objectives {
        csv_writer.write_record([
            export_name(&objective.name, policy),
            objective.achievement.to_string(),
            objective.fun.to_string(),
            objective.impact.to_string(),
            objective.ease.to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Serialize objectives to CSV text
pub fn export_csv(objectives: &[Objective], policy: NameCommaPolicy) -> CsvResult<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, objectives, policy)?;
    String::from_utf8(buffer).map_err(|e| CsvError::Encoding(e.to_string()))
}

/// Column positions found in the header row
struct ColumnMap {
    name: Option<usize>,
    axes: Vec<(Axis, Option<usize>)>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |wanted: &str| headers.iter().position(|h| h == wanted);
        Self {
            name: find(NAME_COLUMN),
            axes: Axis::all().iter().map(|axis| (*axis, find(axis.as_str()))).collect(),
        }
    }

    fn missing(&self) -> Vec<String> {
        CSV_HEADER
            .iter()
            .filter(|column| match **column {
                NAME_COLUMN => self.name.is_none(),
                other => self
                    .axes
                    .iter()
                    .any(|(axis, idx)| axis.as_str() == other && idx.is_none()),
            })
            .map(|c| c.to_string())
            .collect()
    }

    fn objective(&self, record: &csv::StringRecord) -> Objective {
        let name = self
            .name
            .and_then(|idx| record.get(idx))
            .unwrap_or_default()
            .to_string();

        let mut objective = Objective::new(name, 0.0, 0.0, 0.0, 0.0);
        for (axis, idx) in &self.axes {
            let raw = idx.and_then(|i| record.get(i));
            objective.set_axis(*axis, parse_objective_number(raw));
        }
        objective
    }
}

/// Parse CSV from a reader
pub fn import_reader<R: Read>(reader: R) -> CsvImport {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = match csv_reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable CSV header, importing nothing");
            return CsvImport {
                missing_columns: CSV_HEADER.iter().map(|c| c.to_string()).collect(),
                ..Default::default()
            };
        }
    };

    let columns = ColumnMap::from_headers(&headers);
    let mut result = CsvImport {
        missing_columns: columns.missing(),
        ..Default::default()
    };

    for (line, record) in csv_reader.records().enumerate() {
        match record {
            Ok(record) => {
                result.objectives.push(columns.objective(&record));
                result.rows_read += 1;
            }
            Err(e) => {
                tracing::debug!(line = line + 2, error = %e, "Skipping unreadable CSV row");
                result.rows_skipped += 1;
            }
        }
    }

    if !result.missing_columns.is_empty() {
        tracing::debug!(missing = ?result.missing_columns, "CSV import without some columns");
    }

    result
}

/// Parse CSV text
pub fn import_csv(text: &str) -> CsvImport {
    import_reader(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format() {
        let objectives = vec![
            Objective::new("A", 0.2, 0.8, 0.5, 0.25),
            Objective::new("Read, write", 1.0, 0.0, 0.1, 0.3),
        ];

        let text = export_csv(&objectives, NameCommaPolicy::Strip).unwrap();

        assert_eq!(
            text,
            "name,achievement,fun,impact,ease\nA,0.8,0.2,0.25,0.5\nRead write,0,1,0.3,0.1\n"
        );
    }

    #[test]
    fn test_export_quote_policy_keeps_commas() {
        let objectives = vec![Objective::new("Read, write", 0.5, 0.5, 0.5, 0.5)];

        let text = export_csv(&objectives, NameCommaPolicy::Quote).unwrap();

        assert!(text.contains("\"Read, write\""));
        assert_eq!(import_csv(&text).objectives, objectives);
    }

    #[test]
    fn test_import_out_of_range_and_garbage() {
        let result = import_csv("name,achievement,fun,impact,ease\nX,2,0.5,-1,abc");

        assert_eq!(result.rows_read, 1);
        assert_eq!(
            result.objectives,
            vec![Objective {
                name: "X".to_string(),
                achievement: 0.0,
                fun: 0.5,
                impact: 0.0,
                ease: 0.0,
            }]
        );
    }

    #[test]
    fn test_import_is_column_order_independent() {
        let result = import_csv("ease,name,impact,fun,achievement\n0.1,B,0.2,0.3,0.4\n");

        assert_eq!(
            result.objectives,
            vec![Objective::new("B", 0.3, 0.4, 0.1, 0.2)]
        );
        assert!(result.missing_columns.is_empty());
    }

    #[test]
    fn test_import_missing_columns() {
        let result = import_csv("fun,impact\n0.5,0.6\n");

        assert_eq!(
            result.objectives,
            vec![Objective::new("", 0.5, 0.0, 0.0, 0.6)]
        );
        assert_eq!(result.missing_columns, vec!["name", "achievement", "ease"]);
    }

    #[test]
    fn test_import_short_rows() {
        let result = import_csv("name,achievement,fun,impact,ease\nOnly name\n");

        assert_eq!(
            result.objectives,
            vec![Objective::new("Only name", 0.0, 0.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn test_import_empty_text() {
        let result = import_csv("");

        assert!(result.objectives.is_empty());
        assert_eq!(result.rows_read, 0);
    }

    #[test]
    fn test_round_trip() {
        let objectives = vec![
            Objective::new("Write a book", 0.9, 0.7, 0.1, 0.4),
            Objective::new("Learn piano", 0.1 + 0.2, 1.0, 0.0, 0.333),
            Objective::new_default(2),
        ];

        let text = export_csv(&objectives, NameCommaPolicy::Strip).unwrap();

        assert_eq!(import_csv(&text).objectives, objectives);
    }
}
