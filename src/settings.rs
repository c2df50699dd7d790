//! Settings model: five typed fields with declared bounds, defaults, and
//! whole-or-nothing validation.
//!
//! `validate` is the single entry point for untrusted settings data
//! (decoded tokens, config-file values). Absent fields take their default;
//! a present field that violates its bound or enum fails the whole
//! validation with a structured error — no silent clamping.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Which asset theme drives the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "pizza_12p")]
    Pizza12p,
    #[serde(rename = "circular")]
    Circular,
}

impl Theme {
    /// Wire name, also used as the manifest file stem (`<name>.json`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Pizza12p => "pizza_12p",
            Theme::Circular => "circular",
        }
    }
}

/// Where the time readout is placed over the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockTextPosition {
    CircularBottomRight,
    Center,
}

/// The complete user-facing settings value.
///
/// Immutable value type: updates replace the whole value rather than
/// mutating shared state. The serialized form uses camelCase field names,
/// which is the shape carried inside share tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: Theme,
    pub clock_text_position: ClockTextPosition,
    pub font_size: f64,
    pub letter_spacing: f64,
    pub seconds_indicator_line_width: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Pizza12p,
            clock_text_position: ClockTextPosition::CircularBottomRight,
            font_size: 30.0,
            letter_spacing: 5.0,
            seconds_indicator_line_width: 0.0,
        }
    }
}

/// A field failed its schema constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid settings field `{field}`: expected {expected}, got {actual}")]
pub struct ValidationError {
    pub field: &'static str,
    pub expected: &'static str,
    pub actual: String,
}

impl ValidationError {
    fn new(field: &'static str, expected: &'static str, actual: &Value) -> Self {
        Self {
            field,
            expected,
            actual: actual.to_string(),
        }
    }
}

/// Validate a raw JSON value against the settings schema.
///
/// Unknown fields are ignored (tokens from newer schema versions stay
/// decodable); known fields must satisfy their bound/enum exactly.
pub fn validate(raw: &Value) -> Result<Settings, ValidationError> {
    let obj = raw.as_object().ok_or_else(|| {
        ValidationError::new("(root)", "a settings object", raw)
    })?;

    let mut settings = Settings::default();

    if let Some(v) = obj.get("theme") {
        settings.theme = match v.as_str() {
            Some("pizza_12p") => Theme::Pizza12p,
            Some("circular") => Theme::Circular,
            _ => {
                return Err(ValidationError::new(
                    "theme",
                    "one of `pizza_12p`, `circular`",
                    v,
                ));
            }
        };
    }

    if let Some(v) = obj.get("clockTextPosition") {
        settings.clock_text_position = match v.as_str() {
            Some("circular_bottom_right") => ClockTextPosition::CircularBottomRight,
            Some("center") => ClockTextPosition::Center,
            _ => {
                return Err(ValidationError::new(
                    "clockTextPosition",
                    "one of `circular_bottom_right`, `center`",
                    v,
                ));
            }
        };
    }

    settings.font_size = number_field(
        obj,
        "fontSize",
        10.0..=100.0,
        "a number in 10..=100",
        settings.font_size,
    )?;
    settings.letter_spacing = number_field(
        obj,
        "letterSpacing",
        0.0..=20.0,
        "a number in 0..=20",
        settings.letter_spacing,
    )?;
    settings.seconds_indicator_line_width = number_field(
        obj,
        "secondsIndicatorLineWidth",
        0.0..=10.0,
        "a number in 0..=10",
        settings.seconds_indicator_line_width,
    )?;

    Ok(settings)
}

fn number_field(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
    range: std::ops::RangeInclusive<f64>,
    expected: &'static str,
    default: f64,
) -> Result<f64, ValidationError> {
    match obj.get(field) {
        None => Ok(default),
        Some(v) => {
            let n = v
                .as_f64()
                .ok_or_else(|| ValidationError::new(field, expected, v))?;
            if range.contains(&n) {
                Ok(n)
            } else {
                Err(ValidationError::new(field, expected, v))
            }
        }
    }
}
