//! Respondent Matcher Module
//! Pairs pre and post rows by identifier and computes per-question deltas.

use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::data::{CellValue, Respondent, Survey, TRACKED_QUESTIONS};

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Question {question} holds non-numeric value {value:?} for respondent {id:?}")]
    NonNumeric {
        id: String,
        question: String,
        value: String,
    },
}

/// Result of joining two survey administrations by identifier.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub matched_count: usize,
    /// Rows = matched pairs in pre-dataset order, columns = tracked
    /// questions; each entry is post minus pre.
    pub deltas: Vec<Vec<f64>>,
    /// Pre identifiers with no counterpart in the post dataset.
    pub unmatched_pre: Vec<String>,
    /// Post identifiers that went unmatched (one entry per row).
    pub unmatched_post: Vec<String>,
}

impl MatchOutcome {
    /// Per-question mean shift across matched pairs; all zeros when nothing
    /// matched.
    pub fn mean_deltas(&self) -> Vec<f64> {
        let mut totals = vec![0.0; TRACKED_QUESTIONS.len()];
        if self.matched_count == 0 {
            return totals;
        }
        for row in &self.deltas {
            for (total, delta) in totals.iter_mut().zip(row) {
                *total += delta;
            }
        }
        for total in &mut totals {
            *total /= self.matched_count as f64;
        }
        totals
    }
}

fn numeric(cell: &CellValue, id: &str, question: &str) -> Result<f64, MatchError> {
    match cell {
        CellValue::Absent => Ok(0.0),
        CellValue::Number(n) => Ok(*n),
        CellValue::Text(text) => Err(MatchError::NonNumeric {
            id: id.to_string(),
            question: question.to_string(),
            value: text.clone(),
        }),
    }
}

/// Join pre and post respondents on the identifier column. Each identifier
/// matches at most once: the first pre row with an identifier pairs with the
/// first post row carrying the same identifier, later duplicates on either
/// side are skipped. Unmatched rows are reported, not errors.
pub fn match_surveys(pre: &Survey, post: &Survey) -> Result<MatchOutcome, MatchError> {
    // identifier -> first post row; later occurrences never win
    let mut post_by_id: HashMap<&str, &Respondent> = HashMap::new();
    for respondent in &post.respondents {
        post_by_id.entry(respondent.id.as_str()).or_insert(respondent);
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut deltas = Vec::new();
    let mut unmatched_pre = Vec::new();

    for pre_respondent in &pre.respondents {
        if seen.contains(pre_respondent.id.as_str()) {
            continue;
        }
        let Some(post_respondent) = post_by_id.get(pre_respondent.id.as_str()) else {
            unmatched_pre.push(pre_respondent.id.clone());
            continue;
        };
        seen.insert(pre_respondent.id.as_str());

        let mut row = Vec::with_capacity(TRACKED_QUESTIONS.len());
        for (question_index, question) in TRACKED_QUESTIONS.iter().enumerate() {
            let post_value = numeric(
                &post_respondent.answers[question_index],
                &post_respondent.id,
                question,
            )?;
            let pre_value = numeric(
                &pre_respondent.answers[question_index],
                &pre_respondent.id,
                question,
            )?;
            row.push(post_value - pre_value);
        }
        deltas.push(row);
    }

    let unmatched_post = post
        .respondents
        .iter()
        .filter(|respondent| !seen.contains(respondent.id.as_str()))
        .map(|respondent| respondent.id.clone())
        .collect();

    let matched_count = deltas.len();
    Ok(MatchOutcome {
        matched_count,
        deltas,
        unmatched_pre,
        unmatched_post,
    })
}
