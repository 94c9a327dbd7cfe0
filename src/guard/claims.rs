use base64ct::{Base64UrlUnpadded, Encoding};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("invalid token format")]
    TokenFormat,
    #[error("invalid base64 encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("missing numeric exp claim")]
    MissingExp,
}

/// Reads the `exp` claim (seconds since epoch) without verifying the signature.
///
/// # Errors
/// Returns an error unless the token has exactly three segments and the middle one is
/// base64 JSON carrying a numeric `exp`.
pub fn token_expiry(token: &str) -> Result<f64, ClaimsError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(claims), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ClaimsError::TokenFormat);
    };

    let bytes = decode_segment(claims)?;
    let payload: Value = serde_json::from_slice(&bytes)?;

    payload
        .get("exp")
        .and_then(Value::as_f64)
        .ok_or(ClaimsError::MissingExp)
}

/// Accepts both base64 alphabets, with or without padding.
fn decode_segment(segment: &str) -> Result<Vec<u8>, ClaimsError> {
    let normalized: String = segment
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    if normalized.is_empty() {
        return Err(ClaimsError::Base64);
    }

    Base64UrlUnpadded::decode_vec(&normalized).map_err(|_| ClaimsError::Base64)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn segment(json: &str) -> String {
        Base64UrlUnpadded::encode_string(json.as_bytes())
    }

    #[test]
    fn reads_integer_and_fractional_exp() {
        let token = format!("h.{}.s", segment(r#"{"sub":"alex@bitva.io","exp":1700000000}"#));
        assert!((token_expiry(&token).unwrap() - 1_700_000_000.0).abs() < f64::EPSILON);

        let token = format!("h.{}.s", segment(r#"{"exp":1700000000.5}"#));
        assert!((token_expiry(&token).unwrap() - 1_700_000_000.5).abs() < f64::EPSILON);
    }

    #[test]
    fn accepts_padded_standard_alphabet() {
        let json = r#"{"exp":1,"x":">>?"}"#;
        let standard = base64ct::Base64::encode_string(json.as_bytes());
        assert!(standard.contains('+') || standard.contains('/') || standard.ends_with('='));

        let token = format!("h.{standard}.s");
        assert!((token_expiry(&token).unwrap() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_wrong_segment_count() {
        for token in ["", "abc", "a.b", "a.b.c.d", "abc.def.ghi.jkl"] {
            assert!(matches!(token_expiry(token), Err(ClaimsError::TokenFormat)), "{token}");
        }
    }

    #[test]
    fn rejects_bad_encoding_and_json() {
        assert!(matches!(token_expiry("h.!!!.s"), Err(ClaimsError::Base64)));
        assert!(matches!(token_expiry("h..s"), Err(ClaimsError::Base64)));

        let token = format!("h.{}.s", segment("not json"));
        assert!(matches!(token_expiry(&token), Err(ClaimsError::Json(_))));
    }

    #[test]
    fn rejects_missing_or_non_numeric_exp() {
        for json in [
            r#"{"sub":"x"}"#,
            r#"{"exp":"1700000000"}"#,
            r#"{"exp":null}"#,
            "[1,2]",
            "42",
        ] {
            let token = format!("h.{}.s", segment(json));
            assert!(matches!(token_expiry(&token), Err(ClaimsError::MissingExp)), "{json}");
        }
    }
}
