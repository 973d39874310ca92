use crate::error::ConvertResult;
use crate::record_loader::load_records;
use crate::result_writer::write_statement;
use crate::sql_converter::{DEFAULT_TABLE, QuoteStyle, assemble_insert, row_to_sql};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub table: String,
    pub quote_style: QuoteStyle,
    pub show_progress: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            quote_style: QuoteStyle::Literal,
            show_progress: false,
        }
    }
}

#[derive(Debug)]
pub struct ConversionSummary {
    pub records: usize,
    pub output: PathBuf,
}

/// Load records from `input`, render one INSERT statement and write it to `output`.
///
/// Every record is validated and rendered before `output` is touched, so any
/// error leaves an existing output file unchanged.
pub fn convert(input: &Path, output: &Path, options: &ConvertOptions) -> ConvertResult<ConversionSummary> {
    let records = load_records(input)?;
    info!(count = records.len(), input = %input.display(), "loaded records");

    if records.is_empty() {
        warn!("input has no records, the statement will contain no rows");
    }

    let pb = if options.show_progress {
        let pb = ProgressBar::new(records.len() as u64);
        pb.set_style(progress_style());
        pb.set_message("Formatting rows...");
        pb
    } else {
        ProgressBar::hidden()
    };

    let rows: Vec<String> = records
        .iter()
        .map(|record| {
            let row = row_to_sql(record, options.quote_style);
            pb.inc(1);
            row
        })
        .collect();
    pb.finish_and_clear();

    let sql = assemble_insert(&options.table, &rows);
    write_statement(output, &sql)?;

    Ok(ConversionSummary {
        records: rows.len(),
        output: output.to_path_buf(),
    })
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use std::fs;
    use tempfile::TempDir;

    fn setup(input: &str) -> (TempDir, PathBuf, PathBuf) {
        let dir = TempDir::new().unwrap();
        let input_path = dir.path().join("videos.json");
        fs::write(&input_path, input).unwrap();
        let output_path = dir.path().join("videos.sql");
        (dir, input_path, output_path)
    }

    #[test]
    fn test_convert_single_record() {
        let (_dir, input, output) = setup(r#"[{"id":1,"path":"a.mp4","correctSign":"HELLO"}]"#);
        let summary = convert(&input, &output, &ConvertOptions::default()).unwrap();
        assert_eq!(summary.records, 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "INSERT INTO videos (id, path, correctSign) VALUES \n('1', 'a.mp4', 'HELLO');"
        );
    }

    #[test]
    fn test_convert_many_records_in_order() {
        let records: Vec<String> = (0..25)
            .map(|i| format!(r#"{{"id":{i},"path":"clips/{i}.mp4","correctSign":"SIGN{i}"}}"#))
            .collect();
        let (_dir, input, output) = setup(&format!("[{}]", records.join(",")));

        let options = ConvertOptions {
            show_progress: true,
            ..ConvertOptions::default()
        };
        let summary = convert(&input, &output, &options).unwrap();
        assert_eq!(summary.records, 25);

        let sql = fs::read_to_string(&output).unwrap();
        assert!(sql.ends_with(';'));
        let rows: Vec<&str> = sql.lines().skip(1).collect();
        assert_eq!(rows.len(), 25);
        for (i, row) in rows.iter().enumerate() {
            let expected = format!("('{i}', 'clips/{i}.mp4', 'SIGN{i}')");
            assert!(row.starts_with(&expected), "row {i} was {row}");
        }
    }

    #[test]
    fn test_convert_empty_array() {
        let (_dir, input, output) = setup("[]");
        let summary = convert(&input, &output, &ConvertOptions::default()).unwrap();
        assert_eq!(summary.records, 0);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "INSERT INTO videos (id, path, correctSign) VALUES \n;"
        );
    }

    #[test]
    fn test_missing_field_writes_nothing() {
        let (_dir, input, output) = setup(
            r#"[{"id":1,"path":"a.mp4","correctSign":"A"},{"id":2,"path":"b.mp4"}]"#,
        );
        let err = convert(&input, &output, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::FieldMissing { index: 1, field: "correctSign" }));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_field_keeps_previous_output() {
        let (_dir, input, output) = setup(r#"[{"id":1,"path":"a.mp4"}]"#);
        fs::write(&output, "previous run").unwrap();
        assert!(convert(&input, &output, &ConvertOptions::default()).is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous run");
    }

    #[test]
    fn test_malformed_json_writes_nothing() {
        let (_dir, input, output) = setup(r#"[{"id":1,"path":"a.mp4","correctSign":"A"},]"#);
        let err = convert(&input, &output, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Parse { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_custom_table_and_escaping() {
        let (_dir, input, output) = setup(r#"[{"id":"x1","path":"it's.mp4","correctSign":"DON'T"}]"#);
        let options = ConvertOptions {
            table: "sign_videos".to_string(),
            quote_style: QuoteStyle::Escaped,
            show_progress: false,
        };
        convert(&input, &output, &options).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "INSERT INTO sign_videos (id, path, correctSign) VALUES \n('x1', 'it''s.mp4', 'DON''T');"
        );
    }
}
