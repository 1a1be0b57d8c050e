//! Survey Loader Module
//! Reads the two-header tab-delimited survey export into a
//! column-restricted table of coerced values.

use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::data::coerce::{coerce, CellValue};
use crate::data::{ID_COLUMN, ROW_WIDTH, TRACKED_QUESTIONS};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Survey file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to parse survey file: {0}")]
    Csv(#[from] csv::Error),
    #[error("Expected two header rows")]
    MissingHeader,
    #[error("Row {row} has {found} fields after padding, expected {expected}")]
    RowWidth {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("Tracked question {0:?} missing from column header")]
    MissingColumn(String),
}

/// One participant's row, restricted to the identifier and the tracked
/// questions in fixed question order.
#[derive(Debug, Clone)]
pub struct Respondent {
    /// Raw identifier text, exactly as the file held it.
    pub id: String,
    pub answers: Vec<CellValue>,
}

/// One fully loaded survey administration.
#[derive(Debug, Clone)]
pub struct Survey {
    pub respondents: Vec<Respondent>,
    /// Column identifier -> position in the raw 79-column layout.
    pub column_index: HashMap<String, usize>,
    /// Tracked question identifier -> human-readable question text.
    pub question_text: HashMap<String, String>,
}

/// Load a survey export: one column-id header row, one question-text header
/// row, then tab-delimited respondent rows. A row one field short of the
/// fixed width gets a single empty field appended (exports omit the trailing
/// tab when the last answer is blank); any other width is a data-integrity
/// fault.
pub fn load_survey(path: &Path) -> Result<Survey, LoaderError> {
    if !path.exists() {
        return Err(LoaderError::FileNotFound(path.to_path_buf()));
    }

    // The export format has no quoting; fields are exactly what sits
    // between tabs.
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_path(path)?;
    let mut records = reader.records();

    let id_header = records.next().ok_or(LoaderError::MissingHeader)??;
    let mut column_index = HashMap::new();
    let last = id_header.len().saturating_sub(1);
    for (index, id) in id_header.iter().enumerate() {
        let id = if index == last { id.trim_end() } else { id };
        column_index.insert(id.to_string(), index);
    }
    debug!("column header: {:?}", id_header);

    let text_header = records.next().ok_or(LoaderError::MissingHeader)??;
    debug!("question header: {:?}", text_header);

    let mut question_positions = Vec::with_capacity(TRACKED_QUESTIONS.len());
    let mut question_text = HashMap::new();
    for question in TRACKED_QUESTIONS {
        let position = *column_index
            .get(question)
            .ok_or_else(|| LoaderError::MissingColumn(question.to_string()))?;
        question_positions.push(position);
        let text = text_header.get(position).unwrap_or("").to_string();
        question_text.insert(question.to_string(), text);
    }

    let mut respondents = Vec::new();
    for (data_row, record) in records.enumerate() {
        let record = record?;
        let mut fields: Vec<&str> = record.iter().collect();
        if fields.len() == ROW_WIDTH - 1 {
            fields.push("");
        }
        if fields.len() != ROW_WIDTH {
            return Err(LoaderError::RowWidth {
                // +3: two header rows, 1-based line numbers
                row: data_row + 3,
                found: fields.len(),
                expected: ROW_WIDTH,
            });
        }

        let cells: Vec<CellValue> = fields.iter().map(|field| coerce(field)).collect();
        respondents.push(Respondent {
            id: fields[ID_COLUMN].to_string(),
            answers: question_positions
                .iter()
                .map(|&position| cells[position].clone())
                .collect(),
        });
    }

    info!(
        "loaded {} respondents from {}",
        respondents.len(),
        path.display()
    );

    Ok(Survey {
        respondents,
        column_index,
        question_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Column-id header with the tracked questions at positions 10..=20 and
    /// the identifier at its fixed raw position.
    fn header_ids() -> Vec<String> {
        let mut ids: Vec<String> = (0..ROW_WIDTH).map(|i| format!("C{i}")).collect();
        for (offset, question) in TRACKED_QUESTIONS.iter().enumerate() {
            ids[10 + offset] = question.to_string();
        }
        ids
    }

    fn header_texts() -> Vec<String> {
        (0..ROW_WIDTH)
            .map(|i| format!("Question text {i}"))
            .collect()
    }

    /// One data row: identifier at the fixed position, `answer` in every
    /// tracked question column, `filler` everywhere else.
    fn data_row(id: &str, answer: &str, filler: &str) -> Vec<String> {
        let mut fields: Vec<String> = (0..ROW_WIDTH).map(|_| filler.to_string()).collect();
        fields[ID_COLUMN] = id.to_string();
        for offset in 0..TRACKED_QUESTIONS.len() {
            fields[10 + offset] = answer.to_string();
        }
        fields
    }

    fn write_survey(rows: &[Vec<String>]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "{}", header_ids().join("\t")).unwrap();
        writeln!(file, "{}", header_texts().join("\t")).unwrap();
        for row in rows {
            writeln!(file, "{}", row.join("\t")).unwrap();
        }
        file
    }

    #[test]
    fn loads_and_restricts_to_tracked_columns() {
        let file = write_survey(&[
            data_row("R1", "Strongly agree", "noise"),
            data_row("R2", "3", "noise"),
        ]);
        let survey = load_survey(file.path()).expect("load");

        assert_eq!(survey.respondents.len(), 2);
        assert_eq!(survey.respondents[0].id, "R1");
        assert_eq!(
            survey.respondents[0].answers,
            vec![CellValue::Number(2.0); TRACKED_QUESTIONS.len()]
        );
        assert_eq!(
            survey.respondents[1].answers,
            vec![CellValue::Number(3.0); TRACKED_QUESTIONS.len()]
        );
        assert_eq!(survey.column_index["Q24_1"], 10);
        assert_eq!(survey.question_text["Q24_1"], "Question text 10");
    }

    #[test]
    fn short_row_is_padded_with_an_absent_field() {
        // put a tracked question in the final column so the padded field is
        // observable through the restricted output
        let mut ids = header_ids();
        ids[10] = "C10".to_string();
        ids[ROW_WIDTH - 1] = "Q24_1".to_string();

        let mut row = data_row("R1", "1", "x");
        row[10] = "x".to_string();
        row.pop(); // 78 fields: trailing tab omitted because the answer is blank

        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "{}", ids.join("\t")).unwrap();
        writeln!(file, "{}", header_texts().join("\t")).unwrap();
        writeln!(file, "{}", row.join("\t")).unwrap();

        let survey = load_survey(file.path()).expect("load");
        assert_eq!(survey.respondents[0].answers[0], CellValue::Absent);
    }

    #[test]
    fn wrong_width_after_padding_is_surfaced() {
        let mut row = data_row("R1", "1", "x");
        row.truncate(ROW_WIDTH - 2);
        let file = write_survey(&[row]);

        match load_survey(file.path()) {
            Err(LoaderError::RowWidth {
                row,
                found,
                expected,
            }) => {
                assert_eq!(row, 3);
                assert_eq!(found, ROW_WIDTH - 2);
                assert_eq!(expected, ROW_WIDTH);
            }
            other => panic!("expected RowWidth error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_distinguished() {
        let err = load_survey(Path::new("data/does-not-exist.tsv")).unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
    }

    #[test]
    fn missing_tracked_question_is_a_header_fault() {
        let mut ids = header_ids();
        ids[10] = "C10".to_string(); // drop Q24_1
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "{}", ids.join("\t")).unwrap();
        writeln!(file, "{}", header_texts().join("\t")).unwrap();

        let err = load_survey(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(q) if q == "Q24_1"));
    }
}
