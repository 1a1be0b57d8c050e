//! Statistics Calculator Module
//! Per-question aggregate statistics over a loaded survey.

use thiserror::Error;

use crate::data::{CellValue, Survey, TRACKED_QUESTIONS};

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Question {question} holds non-numeric value {value:?}")]
    NonNumeric { question: String, value: String },
    #[error("No respondents loaded")]
    Empty,
}

/// Mean response for a single tracked question.
#[derive(Debug, Clone)]
pub struct QuestionAverage {
    pub question: String,
    pub mean: f64,
}

/// Numeric view of one tracked question column across all respondents.
/// Empty cells count as zero; free text in a tracked column is a contract
/// violation and is surfaced with the offending question.
pub fn question_column(survey: &Survey, question_index: usize) -> Result<Vec<f64>, StatsError> {
    let question = TRACKED_QUESTIONS[question_index];
    survey
        .respondents
        .iter()
        .map(|respondent| match &respondent.answers[question_index] {
            CellValue::Absent => Ok(0.0),
            CellValue::Number(n) => Ok(*n),
            CellValue::Text(text) => Err(StatsError::NonNumeric {
                question: question.to_string(),
                value: text.clone(),
            }),
        })
        .collect()
}

/// Arithmetic mean of every tracked question, in question order.
pub fn question_averages(survey: &Survey) -> Result<Vec<QuestionAverage>, StatsError> {
    if survey.respondents.is_empty() {
        return Err(StatsError::Empty);
    }

    let mut averages = Vec::with_capacity(TRACKED_QUESTIONS.len());
    for (question_index, question) in TRACKED_QUESTIONS.iter().enumerate() {
        let values = question_column(survey, question_index)?;
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        averages.push(QuestionAverage {
            question: question.to_string(),
            mean,
        });
    }
    Ok(averages)
}
