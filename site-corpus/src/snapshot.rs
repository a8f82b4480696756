//! JSONL snapshot reader.
//!
//! One JSON object per line:
//!
//! ```text
//! {"url": "...", "page_title": "...", "text_summary": "...", "embedding": [0.01, ...]}
//! ```
//!
//! Blank lines are skipped. Any malformed row fails the whole load: a partial
//! corpus would silently change retrieval results.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::{debug, info};

use crate::errors::CorpusError;
use crate::record::CorpusRecord;

/// Reads and validates a snapshot file.
///
/// # Errors
/// - [`CorpusError::Io`] if the file cannot be opened or read.
/// - [`CorpusError::Parse`] on a malformed row (1-based line number).
/// - [`CorpusError::DimensionMismatch`] if embeddings differ in length.
/// - [`CorpusError::Empty`] if there are no rows or the embeddings are empty.
pub fn read_snapshot(path: impl AsRef<Path>) -> Result<Vec<CorpusRecord>, CorpusError> {
    let path = path.as_ref();
    info!("Reading corpus snapshot: {:?}", path);

    let file = File::open(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_snapshot(BufReader::new(file)).map_err(|e| match e {
        CorpusError::Io { source, .. } => CorpusError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    debug!("Loaded {} corpus records", records.len());
    Ok(records)
}

/// Parses snapshot rows from any reader.
///
/// # Errors
/// Same as [`read_snapshot`]; I/O errors carry an empty path.
pub fn parse_snapshot<R: Read>(reader: BufReader<R>) -> Result<Vec<CorpusRecord>, CorpusError> {
    let mut out: Vec<CorpusRecord> = Vec::new();
    let mut dim: Option<usize> = None;

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CorpusError::Io {
            path: Default::default(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let row: CorpusRecord = serde_json::from_str(&line)
            .map_err(|source| CorpusError::Parse { line: i + 1, source })?;

        let want = *dim.get_or_insert(row.embedding.len());
        if row.embedding.len() != want {
            return Err(CorpusError::DimensionMismatch {
                line: i + 1,
                got: row.embedding.len(),
                want,
            });
        }

        out.push(row);
    }

    match dim {
        None => Err(CorpusError::Empty("no rows".into())),
        Some(0) => Err(CorpusError::Empty("embeddings have zero dimensions".into())),
        Some(_) => Ok(out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(s: &str) -> Result<Vec<CorpusRecord>, CorpusError> {
        parse_snapshot(BufReader::new(Cursor::new(s.to_string())))
    }

    #[test]
    fn parses_rows_and_skips_blank_lines() {
        let src = r#"{"url":"https://a","page_title":"A","text_summary":"alpha","embedding":[1.0,0.0]}

{"url":"https://b","page_title":"B","text_summary":"beta","embedding":[0.0,1.0]}
"#;
        let rows = parse(src).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].page_title, "B");
        assert_eq!(rows[1].embedding, vec![0.0, 1.0]);
    }

    #[test]
    fn reports_malformed_line_number() {
        let src = "{\"url\":\"u\",\"page_title\":\"t\",\"text_summary\":\"s\",\"embedding\":[1.0]}\n{oops}\n";
        match parse(src) {
            Err(CorpusError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rejects_inconsistent_dimensions() {
        let src = concat!(
            r#"{"url":"u","page_title":"t","text_summary":"s","embedding":[1.0,2.0]}"#,
            "\n",
            r#"{"url":"u","page_title":"t","text_summary":"s","embedding":[1.0]}"#,
        );
        match parse(src) {
            Err(CorpusError::DimensionMismatch { line, got, want }) => {
                assert_eq!((line, got, want), (2, 1, 2));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_snapshot() {
        assert!(matches!(parse("\n\n"), Err(CorpusError::Empty(_))));
        assert!(matches!(
            parse(r#"{"url":"u","page_title":"t","text_summary":"s","embedding":[]}"#),
            Err(CorpusError::Empty(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("site-corpus-does-not-exist.jsonl");
        assert!(matches!(read_snapshot(&path), Err(CorpusError::Io { .. })));
    }
}
