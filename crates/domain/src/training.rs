use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use derive_more::{Display, Into};

use crate::EntryID;

/// One recorded set of an exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingEntry {
    pub id: EntryID,
    pub performed_at: DateTime<Utc>,
    pub loads: Vec<f64>,
    pub repetitions: Repetitions,
    pub unit: WeightUnit,
}

impl TrainingEntry {
    /// Sum of all finite loads, or `None` if the entry carries no usable load.
    #[must_use]
    pub fn total_load(&self) -> Option<f64> {
        self.loads
            .iter()
            .filter(|load| load.is_finite())
            .fold(None, |total, load| Some(total.unwrap_or(0.0) + load))
    }
}

/// Order entries newest first. Entries with equal timestamps keep their relative order.
pub fn sort_entries(entries: &mut [TrainingEntry]) {
    entries.sort_by(|a, b| b.performed_at.cmp(&a.performed_at));
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Repetitions(u32);

impl Repetitions {
    pub fn new(value: u32) -> Result<Self, RepetitionsError> {
        if value == 0 {
            return Err(RepetitionsError::NotPositive);
        }

        Ok(Self(value))
    }
}

impl TryFrom<f64> for Repetitions {
    type Error = RepetitionsError;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(RepetitionsError::ParseError);
        }

        let truncated = value.trunc();

        if truncated < 1.0 {
            return Err(RepetitionsError::NotPositive);
        }

        if truncated > f64::from(u32::MAX) {
            return Err(RepetitionsError::OutOfRange);
        }

        Repetitions::new(truncated as u32)
    }
}

impl TryFrom<&str> for Repetitions {
    type Error = RepetitionsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.replace(',', ".").trim().parse::<f64>() {
            Ok(parsed_value) => Repetitions::try_from(parsed_value),
            Err(_) => Err(RepetitionsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepetitionsError {
    #[error("Repetitions must be a positive integer")]
    NotPositive,
    #[error("Repetitions are out of range")]
    OutOfRange,
    #[error("Repetitions must be a number")]
    ParseError,
}

#[derive(
    strum::AsRefStr,
    strum::Display,
    strum::EnumString,
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
)]
#[strum(serialize_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl WeightUnit {
    /// Interpret a stored unit tag, falling back to kilograms for anything unknown.
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        tag.and_then(|t| t.parse().ok()).unwrap_or_default()
    }
}

/// Validate a load value and round it to two decimal places.
pub fn normalize_load(value: f64) -> Result<f64, LoadError> {
    if !value.is_finite() {
        return Err(LoadError::ParseError);
    }

    if value < 0.0 {
        return Err(LoadError::Negative);
    }

    let rounded = (value * 100.0).round() / 100.0;

    if !rounded.is_finite() {
        return Err(LoadError::ParseError);
    }

    Ok(rounded)
}

/// Parse a load entered with either a comma or a dot as decimal separator.
pub fn parse_load(value: &str) -> Result<f64, LoadError> {
    match value.replace(',', ".").trim().parse::<f64>() {
        Ok(parsed_value) => normalize_load(parsed_value),
        Err(_) => Err(LoadError::ParseError),
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum LoadError {
    #[error("Load must not be negative")]
    Negative,
    #[error("Load must be a decimal number")]
    ParseError,
}

/// Render loads as `40 / 52.5`, dropping non-finite values.
#[must_use]
pub fn format_loads(loads: &[f64]) -> String {
    loads
        .iter()
        .filter(|load| load.is_finite())
        .map(|load| {
            let formatted = format!("{load:.2}");
            formatted
                .trim_end_matches('0')
                .trim_end_matches('.')
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 and RFC 2822 timestamps as well as date-times and dates without an offset,
/// which are interpreted as UTC.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if value.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc2822(value) {
        return Some(timestamp.with_timezone(&Utc));
    }

    if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(timestamp.and_utc());
    }

    if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Some(timestamp.and_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|timestamp| timestamp.and_utc())
}
