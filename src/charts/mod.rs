//! Charts module - histogram rendering

mod renderer;

pub use renderer::{ChartError, HistogramRenderer, QuestionSeries};
