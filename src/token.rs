//! Share-token codec: Settings ⇄ URL-fragment-safe text.
//!
//! The token is the JSON-serialized settings, base64-encoded with the
//! URL-safe alphabet (no padding), so it can live verbatim in a URL
//! fragment. `decode` only reverses the text transform — callers must
//! re-run `settings::validate` on the result, and on any failure the
//! policy is to discard the token and keep current settings.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD as BASE64};
use serde_json::Value;
use thiserror::Error;

use crate::settings::Settings;

/// The token is not reversible back to a JSON value.
///
/// Distinct from `settings::ValidationError`: a token that decodes fine
/// can still fail validation.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode settings into a URL-fragment-safe token.
pub fn encode(settings: &Settings) -> String {
    // Settings has no map keys or non-finite-float fields, so JSON
    // serialization cannot fail.
    let json = serde_json::to_string(settings)
        .expect("Settings serializes to JSON infallibly");
    BASE64.encode(json.as_bytes())
}

/// Decode a token back to its raw JSON value. Does not validate.
pub fn decode(token: &str) -> Result<Value, DecodeError> {
    let bytes = BASE64.decode(token.trim())?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Render the shareable link form: `{base}#{token}`.
pub fn share_link(base: &str, settings: &Settings) -> String {
    format!("{base}#{}", encode(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{self, ClockTextPosition, Theme};

    #[test]
    fn round_trip_defaults() {
        let s = Settings::default();
        let raw = decode(&encode(&s)).unwrap();
        assert_eq!(settings::validate(&raw).unwrap(), s);
    }

    #[test]
    fn round_trip_non_default() {
        let s = Settings {
            theme: Theme::Circular,
            clock_text_position: ClockTextPosition::Center,
            font_size: 72.0,
            letter_spacing: 0.0,
            seconds_indicator_line_width: 4.0,
        };
        let raw = decode(&encode(&s)).unwrap();
        assert_eq!(settings::validate(&raw).unwrap(), s);
    }

    #[test]
    fn token_is_fragment_safe() {
        let token = encode(&Settings {
            theme: Theme::Pizza12p,
            clock_text_position: ClockTextPosition::Center,
            font_size: 99.5,
            letter_spacing: 19.0,
            seconds_indicator_line_width: 10.0,
        });
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "token contains unsafe characters: {token}"
        );
    }

    #[test]
    fn malformed_token_is_decode_error() {
        assert!(matches!(
            decode("not-valid-token"),
            Err(DecodeError::Base64(_) | DecodeError::Json(_))
        ));
    }

    #[test]
    fn valid_base64_invalid_json_is_json_error() {
        let token = BASE64.encode(b"{not json");
        assert!(matches!(decode(&token), Err(DecodeError::Json(_))));
    }

    #[test]
    fn decode_does_not_validate() {
        // Out-of-range settings still decode; validation is the caller's job
        let token = BASE64.encode(br#"{"fontSize": 9999}"#);
        let raw = decode(&token).unwrap();
        assert_eq!(raw["fontSize"], 9999);
        assert!(settings::validate(&raw).is_err());
    }

    #[test]
    fn share_link_format() {
        let link = share_link("https://clock.example/", &Settings::default());
        let (base, token) = link.split_once('#').unwrap();
        assert_eq!(base, "https://clock.example/");
        assert!(decode(token).is_ok());
    }
}
