//! prepost - Paired Pre/Post Survey Analysis & Histogram Plotter
//!
//! Loads two survey administrations, reports per-question averages, matches
//! respondents across the runs by identifier, and renders one histogram per
//! tracked question for the pre, post, and delta distributions.

mod charts;
mod data;
mod matching;
mod stats;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use charts::{HistogramRenderer, QuestionSeries};
use data::{load_survey, Survey, TRACKED_QUESTIONS};
use matching::{match_surveys, MatchOutcome};
use stats::{question_averages, question_column};

const PRETEST_FILE: &str = "data/pretest.tsv";
const POSTTEST_FILE: &str = "data/posttest.tsv";
const PLOTS_DIR: &str = "plots";

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let pre = load_survey(Path::new(PRETEST_FILE))
        .with_context(|| format!("loading {PRETEST_FILE}"))?;
    let post = load_survey(Path::new(POSTTEST_FILE))
        .with_context(|| format!("loading {POSTTEST_FILE}"))?;

    report_averages("pre", &pre)?;
    report_averages("post", &post)?;

    let outcome = match_surveys(&pre, &post).context("matching respondents")?;
    report_matches(&outcome);

    for variant in ["pre", "post", "delta"] {
        fs::create_dir_all(Path::new(PLOTS_DIR).join(variant))
            .with_context(|| format!("creating {PLOTS_DIR}/{variant}"))?;
    }

    HistogramRenderer::render_series(&survey_series(&pre)?, &Path::new(PLOTS_DIR).join("pre"))
        .context("rendering pre histograms")?;
    HistogramRenderer::render_series(&survey_series(&post)?, &Path::new(PLOTS_DIR).join("post"))
        .context("rendering post histograms")?;

    if outcome.matched_count == 0 {
        warn!("no matched respondents, skipping delta histograms");
    } else {
        HistogramRenderer::render_series(
            &delta_series(&outcome, &pre),
            &Path::new(PLOTS_DIR).join("delta"),
        )
        .context("rendering delta histograms")?;
    }

    info!("histograms written to {PLOTS_DIR}/");
    Ok(())
}

fn report_averages(label: &str, survey: &Survey) -> Result<()> {
    for average in question_averages(survey).with_context(|| format!("averaging {label} dataset"))?
    {
        let text = survey
            .question_text
            .get(&average.question)
            .map(String::as_str)
            .unwrap_or("");
        info!("[{label}] {} {text:?} average: {}", average.question, average.mean);
    }
    Ok(())
}

fn report_matches(outcome: &MatchOutcome) {
    info!(
        "{} matched respondents across pre and post datasets",
        outcome.matched_count
    );
    for id in &outcome.unmatched_pre {
        info!("unmatched pre identifier {id:?}");
    }
    for id in &outcome.unmatched_post {
        info!("unmatched post identifier {id:?}");
    }
    if outcome.matched_count == 0 {
        info!("no matches found; mean deltas are trivially zero");
    }
    for (question, delta) in TRACKED_QUESTIONS.iter().zip(outcome.mean_deltas()) {
        info!("{question} mean delta: {delta}");
    }
}

/// Numeric columns for one administration, one series per tracked question.
fn survey_series(survey: &Survey) -> Result<Vec<QuestionSeries>> {
    TRACKED_QUESTIONS
        .iter()
        .enumerate()
        .map(|(question_index, question)| {
            Ok(QuestionSeries {
                question: question.to_string(),
                title: survey
                    .question_text
                    .get(*question)
                    .cloned()
                    .unwrap_or_else(|| question.to_string()),
                values: question_column(survey, question_index)
                    .with_context(|| format!("extracting {question}"))?,
            })
        })
        .collect()
}

/// Delta columns across matched pairs, one series per tracked question.
fn delta_series(outcome: &MatchOutcome, pre: &Survey) -> Vec<QuestionSeries> {
    TRACKED_QUESTIONS
        .iter()
        .enumerate()
        .map(|(question_index, question)| {
            let text = pre
                .question_text
                .get(*question)
                .cloned()
                .unwrap_or_else(|| question.to_string());
            QuestionSeries {
                question: question.to_string(),
                title: format!("{text} (post - pre delta)"),
                values: outcome.deltas.iter().map(|row| row[question_index]).collect(),
            }
        })
        .collect()
}
