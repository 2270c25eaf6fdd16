//! Loading detector results.
//!
//! A results file is a filled-in test-set CSV: a header row, then one row per
//! tested abstract with the 0/1 `is_rewritten` label in column 3 and the
//! detector's score in column 4 (both 0-based).

use std::io::Read;
use std::path::Path;

use crate::csv;
use crate::error::{Error, Result};
use crate::evaluation::LabeledScore;

const LABEL_COLUMN: usize = 3;
const SCORE_COLUMN: usize = 4;

/// Parse results CSV text into labelled scores, skipping the header row and
/// blank lines.
pub fn parse_results<R: Read>(mut reader: R) -> Result<Vec<LabeledScore>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let records = csv::parse(&text).map_err(|(line, message)| Error::results(line, message))?;

    let mut scores = Vec::with_capacity(records.len().saturating_sub(1));
    for record in records.into_iter().skip(1) {
        if record.fields.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let line = record.line;
        let field = |col: usize, name: &'static str| {
            record
                .fields
                .get(col)
                .map(|f| f.trim())
                .ok_or_else(|| Error::results(line, format!("missing {name} column")))
        };

        let label_str = field(LABEL_COLUMN, "is_rewritten")?;
        let label: u8 = match label_str {
            "0" => 0,
            "1" => 1,
            other => {
                return Err(Error::results(
                    line,
                    format!("is_rewritten must be 0 or 1, got {other:?}"),
                ));
            }
        };

        let score_str = field(SCORE_COLUMN, "score")?;
        let score: f64 = score_str.parse().map_err(|_| {
            Error::results(line, format!("score {score_str:?} is not a number"))
        })?;

        let labeled = LabeledScore::new(label, score).map_err(|e| match e {
            Error::InvalidArgument(message) => Error::results(line, message),
            other => other,
        })?;
        scores.push(labeled);
    }

    log::debug!("parsed {} result rows", scores.len());
    Ok(scores)
}

/// Read and parse a results file.
pub fn load_results(path: impl AsRef<Path>) -> Result<Vec<LabeledScore>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let scores = parse_results(std::io::BufReader::new(file))?;
    log::info!("{}: {} results", path.display(), scores.len());
    Ok(scores)
}
