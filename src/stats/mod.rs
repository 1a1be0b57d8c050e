//! Stats module - per-question aggregates

mod calculator;

pub use calculator::{question_averages, question_column, QuestionAverage, StatsError};
