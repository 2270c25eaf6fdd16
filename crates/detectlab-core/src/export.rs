//! Flat-file exports for the experimenters.
//!
//! - prompt file: every original abstract wrapped in the rewriting prompt
//! - test-set text file: the sampled abstracts, ready to paste into a detector
//! - test-set CSV: the same selection with a blank score column to fill in

use std::io::Write;

use crate::csv;
use crate::error::{Error, Result};
use crate::sampler::SampleAssignment;
use crate::store::AbstractRecord;

/// Instruction prepended to each abstract when asking the model to rewrite it.
pub const PROMPT_PREFIX: &str =
    "Rewrite the following abstract, while retaining all information in the original:\n\n";

/// Header row of the test-set CSV. Column 3 is the label, column 4 the score.
pub const TEST_CSV_HEADER: [&str; 5] = ["doi", "pub_date", "text", "is_rewritten", "detection_score"];

/// Prompt text for one abstract.
pub fn prompt_for(record: &AbstractRecord) -> String {
    format!("{PROMPT_PREFIX}{}", record.original_text)
}

/// Write the prompt file. Returns the number of prompts written.
pub fn write_prompts<W: Write>(records: &[AbstractRecord], mut out: W) -> Result<usize> {
    for record in records {
        writeln!(out, "{}, {}", record.doi, record.pub_date)?;
        writeln!(out, "{}", prompt_for(record))?;
        write!(out, "\n\n")?;
    }
    out.flush()?;
    Ok(records.len())
}

/// Write the sampled test set as plain text, one block per abstract.
pub fn write_test_text<W: Write>(
    records: &[AbstractRecord],
    assignments: &[SampleAssignment],
    mut out: W,
) -> Result<usize> {
    for (record, assignment, text) in selected(records, assignments)? {
        writeln!(out, "{}, {},", record.doi, record.pub_date)?;
        write!(out, "{}\n\n{}", assignment.variant.heading(), text)?;
        write!(out, "\n\n\n\n\n")?;
    }
    out.flush()?;
    Ok(assignments.len())
}

/// Write the sampled test set as CSV with an empty `detection_score` column.
pub fn write_test_csv<W: Write>(
    records: &[AbstractRecord],
    assignments: &[SampleAssignment],
    mut out: W,
) -> Result<usize> {
    let rows = selected(records, assignments)?;
    writeln!(out, "{}", csv::join_row(&TEST_CSV_HEADER))?;
    for (record, assignment, text) in rows {
        let label = assignment.variant.is_rewritten().to_string();
        let row = [
            record.doi.as_str(),
            record.pub_date.as_str(),
            text,
            label.as_str(),
            "",
        ];
        writeln!(out, "{}", csv::join_row(&row))?;
    }
    out.flush()?;
    Ok(assignments.len())
}

/// Resolve every assignment to its record and chosen text before anything is
/// written, so a bad selection never leaves a half-written file.
fn selected<'a>(
    records: &'a [AbstractRecord],
    assignments: &'a [SampleAssignment],
) -> Result<Vec<(&'a AbstractRecord, &'a SampleAssignment, &'a str)>> {
    assignments
        .iter()
        .map(|a| {
            let record = records.get(a.index).ok_or_else(|| {
                Error::invalid(format!(
                    "assignment index {} out of range for {} abstracts",
                    a.index,
                    records.len()
                ))
            })?;
            let text = record.text(a.variant).ok_or_else(|| Error::MissingRewrite {
                doi: record.doi.clone(),
            })?;
            Ok((record, a, text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::Variant;

    fn records() -> Vec<AbstractRecord> {
        vec![
            AbstractRecord {
                doi: "10.1/a".into(),
                pub_date: "2024-01-01".into(),
                original_text: "Alpha study, with commas.".into(),
                rewritten_text: Some("Alpha rewritten \"quoted\".".into()),
            },
            AbstractRecord {
                doi: "10.1/b".into(),
                pub_date: "2024-02-02".into(),
                original_text: "Beta study.".into(),
                rewritten_text: None,
            },
        ]
    }

    fn assign(index: usize, variant: Variant) -> SampleAssignment {
        SampleAssignment { index, variant }
    }

    #[test]
    fn test_write_prompts_layout() {
        let mut buf = Vec::new();
        let n = write_prompts(&records()[..1], &mut buf).unwrap();
        assert_eq!(n, 1);
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "10.1/a, 2024-01-01\n\
             Rewrite the following abstract, while retaining all information in the original:\n\n\
             Alpha study, with commas.\n\n\n"
        );
    }

    #[test]
    fn test_write_test_text_layout() {
        let mut buf = Vec::new();
        write_test_text(
            &records(),
            &[assign(0, Variant::Rewritten), assign(1, Variant::Original)],
            &mut buf,
        )
        .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(
            "10.1/a, 2024-01-01,\nREWRITTEN ABSTRACT\n\nAlpha rewritten \"quoted\".\n\n\n\n\n"
        ));
        assert!(text.ends_with("10.1/b, 2024-02-02,\nORIGINAL ABSTRACT\n\nBeta study.\n\n\n\n\n"));
    }

    #[test]
    fn test_write_test_csv_rows() {
        let mut buf = Vec::new();
        write_test_csv(
            &records(),
            &[assign(1, Variant::Original), assign(0, Variant::Rewritten)],
            &mut buf,
        )
        .unwrap();
        let text = String::from_utf8(buf).unwrap();
        let recs = csv::parse(&text).unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].fields, TEST_CSV_HEADER.to_vec());
        assert_eq!(recs[1].fields, vec!["10.1/b", "2024-02-02", "Beta study.", "0", ""]);
        assert_eq!(recs[2].fields[2], "Alpha rewritten \"quoted\".");
        assert_eq!(recs[2].fields[3], "1");
    }

    #[test]
    fn test_missing_rewrite_fails_before_writing() {
        let mut buf = Vec::new();
        let err = write_test_csv(
            &records(),
            &[assign(0, Variant::Original), assign(1, Variant::Rewritten)],
            &mut buf,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingRewrite { ref doi } if doi == "10.1/b"));
        assert!(buf.is_empty());

        let mut buf = Vec::new();
        assert!(write_test_text(&records(), &[assign(1, Variant::Rewritten)], &mut buf).is_err());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_out_of_range_index() {
        let mut buf = Vec::new();
        let err = write_test_text(&records(), &[assign(5, Variant::Original)], &mut buf).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
