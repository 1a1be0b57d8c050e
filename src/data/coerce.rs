//! Value Coercion Module
//! Maps heterogeneous survey cells onto a uniform numeric representation.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Five-level agreement scale used by the Likert-style questions.
pub static AGREEMENT_SCALE: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("Strongly disagree", -2.0),
        ("Somewhat disagree", -1.0),
        ("Neither agree nor disagree", 0.0),
        ("Somewhat agree", 1.0),
        ("Strongly agree", 2.0),
    ])
});

/// Five-level frequency scale used by the time questions.
pub static TIME_SCALE: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("Never", 0.0),
        ("Sometimes", 1.0),
        ("About half the time", 2.0),
        ("Most of the time", 3.0),
        ("Always", 4.0),
    ])
});

/// A single survey cell after coercion.
///
/// `Absent` marks an empty cell. It is not collapsed to zero here; the
/// averaging and delta paths count it as zero, other consumers see it as
/// missing.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Absent,
    Number(f64),
    Text(String),
}

/// Coerce a raw cell, trying in strict order: agreement scale, time scale,
/// float parse, text fallback. Scale lookup is exact-match; the float parse
/// tolerates surrounding whitespace.
pub fn coerce(raw: &str) -> CellValue {
    if raw.is_empty() {
        return CellValue::Absent;
    }
    if let Some(&value) = AGREEMENT_SCALE.get(raw) {
        return CellValue::Number(value);
    }
    if let Some(&value) = TIME_SCALE.get(raw) {
        return CellValue::Number(value);
    }
    match raw.trim().parse::<f64>() {
        Ok(value) => CellValue::Number(value),
        Err(_) => CellValue::Text(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agreement_scale_maps_every_level() {
        assert_eq!(coerce("Strongly disagree"), CellValue::Number(-2.0));
        assert_eq!(coerce("Somewhat disagree"), CellValue::Number(-1.0));
        assert_eq!(
            coerce("Neither agree nor disagree"),
            CellValue::Number(0.0)
        );
        assert_eq!(coerce("Somewhat agree"), CellValue::Number(1.0));
        assert_eq!(coerce("Strongly agree"), CellValue::Number(2.0));
    }

    #[test]
    fn time_scale_maps_every_level() {
        assert_eq!(coerce("Never"), CellValue::Number(0.0));
        assert_eq!(coerce("Sometimes"), CellValue::Number(1.0));
        assert_eq!(coerce("About half the time"), CellValue::Number(2.0));
        assert_eq!(coerce("Most of the time"), CellValue::Number(3.0));
        assert_eq!(coerce("Always"), CellValue::Number(4.0));
    }

    #[test]
    fn numeric_text_parses_as_float() {
        assert_eq!(coerce("3"), CellValue::Number(3.0));
        assert_eq!(coerce("-1.5"), CellValue::Number(-1.5));
        assert_eq!(coerce("2.5e1"), CellValue::Number(25.0));
        assert_eq!(coerce("+0.25"), CellValue::Number(0.25));
    }

    #[test]
    fn non_numeric_text_passes_through_unchanged() {
        assert_eq!(
            coerce("prefer not to say"),
            CellValue::Text("prefer not to say".to_string())
        );
        // scale lookup is exact-match, so near-misses fall through
        assert_eq!(
            coerce("strongly agree"),
            CellValue::Text("strongly agree".to_string())
        );
    }

    #[test]
    fn empty_cell_is_absent() {
        assert_eq!(coerce(""), CellValue::Absent);
        assert_eq!(coerce(" "), CellValue::Text(" ".to_string()));
    }
}
