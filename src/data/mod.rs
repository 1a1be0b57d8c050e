//! Data module - survey loading and value coercion

mod coerce;
mod loader;

pub use coerce::{coerce, CellValue, AGREEMENT_SCALE, TIME_SCALE};
pub use loader::{load_survey, LoaderError, Respondent, Survey};

/// The survey columns whose responses are aggregated, plotted, and deltaed,
/// in reporting order.
pub const TRACKED_QUESTIONS: [&str; 11] = [
    "Q24_1", "Q24_2", "Q24_3", "Q24_4", "Q24_5", "Q25_1", "Q26_1", "Q27_1", "Q28_1", "Q29", "Q30",
];

/// Raw column position of the respondent identifier (0-indexed).
pub const ID_COLUMN: usize = 6;

/// Fixed field count of an export row after padding.
pub const ROW_WIDTH: usize = 79;
