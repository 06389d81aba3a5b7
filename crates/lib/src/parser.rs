//! # Model Response Parsing
//!
//! Pulls the JSON object out of a completion and validates it as an
//! [`AssetRecord`]. A response is either accepted whole or rejected; there is
//! no partial acceptance.

use crate::{
    errors::{ParseError, ResponseError, ValidationError},
    types::AssetRecord,
};
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

/// The keys every response object must carry, in wire order.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "asset_classification",
    "manufacturer",
    "model_number",
    "product_line",
    "summary",
];

/// Returns the slice from the first `{` to the last `}`, inclusive.
pub fn extract_json_object(text: &str) -> Result<&str, ParseError> {
    let start = text.find('{').ok_or(ParseError::NoJsonObject)?;
    let end = text.rfind('}').ok_or(ParseError::NoJsonObject)?;
    if end < start {
        return Err(ParseError::NoJsonObject);
    }
    Ok(&text[start..=end])
}

/// Parses raw model text into an [`AssetRecord`].
///
/// Surrounding prose is ignored. Null fields become empty strings. The
/// classification and model number must be non-empty; whitespace is kept
/// as the model returned it.
pub fn parse_asset_record(raw: &str) -> Result<AssetRecord, ResponseError> {
    debug!("Raw response before extraction: {:?}", truncate_for_log(raw));

    let json_text = match extract_json_object(raw) {
        Ok(json_text) => json_text,
        Err(e) => {
            error!("No JSON brackets found in response");
            return Err(e.into());
        }
    };

    let value: Value = serde_json::from_str(json_text).map_err(|e| {
        error!("JSON decode error: {e}");
        error!("Response was: {json_text}");
        ParseError::MalformedJson(e)
    })?;

    let Value::Object(mut object) = value else {
        return Err(ParseError::NotAnObject.into());
    };

    let record = AssetRecord {
        classification: take_field(&mut object, "asset_classification")?,
        manufacturer: take_field(&mut object, "manufacturer")?,
        model_number: take_field(&mut object, "model_number")?,
        product_line: take_field(&mut object, "product_line")?,
        summary: take_field(&mut object, "summary")?,
    };

    for (name, value) in [
        ("model_number", &record.model_number),
        ("asset_classification", &record.classification),
    ] {
        if value.is_empty() {
            warn!("Model number and asset classification must be non-empty");
            return Err(ValidationError::EmptyField(name.to_string()).into());
        }
    }

    info!("Successfully parsed asset record");
    Ok(record)
}

fn take_field(object: &mut Map<String, Value>, name: &str) -> Result<String, ValidationError> {
    match object.remove(name) {
        None => {
            warn!("Missing field: {name}");
            Err(ValidationError::MissingField(name.to_string()))
        }
        Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(other) => {
            warn!("Field {name} is not a string: {other}");
            Err(ValidationError::NotAString(name.to_string()))
        }
    }
}

fn truncate_for_log(text: &str) -> &str {
    match text.char_indices().nth(200) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_json_object_spans_first_open_to_last_close() {
        let text = r#"prefix {"a": {"b": 1}} suffix"#;
        assert_eq!(extract_json_object(text).unwrap(), r#"{"a": {"b": 1}}"#);
    }

    #[test]
    fn extract_json_object_requires_both_braces() {
        assert!(matches!(
            extract_json_object("no braces here"),
            Err(ParseError::NoJsonObject)
        ));
        assert!(matches!(
            extract_json_object("only { open"),
            Err(ParseError::NoJsonObject)
        ));
        assert!(matches!(
            extract_json_object("} reversed {"),
            Err(ParseError::NoJsonObject)
        ));
    }
}
