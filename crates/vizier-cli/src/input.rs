//! Description decoding at the transport boundary.
//!
//! The engine trusts the in-memory [`DiagramDescription`] shape; this module
//! owns the JSON decode, including the degraded path: a syntactically valid
//! document with an unrecognized (or missing) `type` tag becomes the
//! [`DiagramDescription::Unknown`] variant carrying a pretty-printed dump,
//! which the engine routes to the raw-data preview renderer instead of
//! failing.

use serde_json::Value;

use vizier_core::description::{DiagramDescription, KNOWN_TAGS};

/// Decodes a JSON description.
///
/// # Errors
///
/// Returns the underlying `serde_json` error for syntactically invalid JSON
/// or a recognized tag whose payload does not match its schema. An
/// unrecognized tag is not an error.
pub fn decode(json: &str) -> Result<DiagramDescription, serde_json::Error> {
    let value: Value = serde_json::from_str(json)?;
    let tag = value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    if KNOWN_TAGS.contains(&tag.as_str()) {
        serde_json::from_value(value)
    } else {
        let body = serde_json::to_string_pretty(&value).unwrap_or_else(|_| json.to_string());
        Ok(DiagramDescription::unknown(&tag, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tag_decodes_typed() {
        let description = decode(
            r#"{"type": "timeline", "events": [
                {"date": "2020", "title": "Start", "description": ""}
            ]}"#,
        )
        .unwrap();
        assert!(matches!(description, DiagramDescription::Timeline(_)));
    }

    #[test]
    fn test_unknown_tag_degrades() {
        let description = decode(r#"{"type": "wordcloud", "words": ["a"]}"#).unwrap();
        match description {
            DiagramDescription::Unknown(unknown) => {
                assert_eq!(unknown.tag, "wordcloud");
                assert!(unknown.body.contains("words"));
            }
            other => panic!("expected the degraded variant, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_tag_degrades() {
        let description = decode(r#"{"title": "untyped"}"#).unwrap();
        assert!(matches!(description, DiagramDescription::Unknown(_)));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(decode("{not json").is_err());
    }

    #[test]
    fn test_known_tag_with_bad_payload_is_an_error() {
        // Recognized tag, missing required events array.
        assert!(decode(r#"{"type": "timeline"}"#).is_err());
    }
}
