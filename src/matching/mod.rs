//! Matching module - identifier join across administrations

mod matcher;

pub use matcher::{match_surveys, MatchError, MatchOutcome};
