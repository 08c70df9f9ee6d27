use serde_json::Value;

use crate::error::RelayError;

/// Aliases accepted for the input text in query strings and form bodies,
/// in priority order.
const QUERY_ALIASES: [&str; 4] = ["text", "inputText", "input", "prompt"];

/// JSON bodies accept two extra aliases.
const JSON_ALIASES: [&str; 6] = ["text", "inputText", "input", "prompt", "content", "data"];

/// Extract the input text from a GET query string.
pub fn decode_query(query: Option<&str>) -> Result<String, RelayError> {
    let pairs: Vec<(String, String)> = match query {
        Some(query) if !query.is_empty() => serde_urlencoded::from_str(query)
            .map_err(|err| RelayError::InvalidBody(err.to_string()))?,
        _ => Vec::new(),
    };
    non_empty(first_alias(&pairs, &QUERY_ALIASES).unwrap_or_default())
}

/// Extract the input text from a POST body, branching on the declared
/// content type. Unknown or missing content types try JSON first and fall
/// back to treating the raw body as plain text.
pub fn decode_body(content_type: Option<&str>, body: &[u8]) -> Result<String, RelayError> {
    let content_type = content_type.unwrap_or("").to_ascii_lowercase();
    let text = if content_type.contains("application/json") {
        from_json(body)?
    } else if content_type.contains("application/x-www-form-urlencoded") {
        from_form(body)?
    } else if content_type.contains("text/plain") {
        String::from_utf8_lossy(body).into_owned()
    } else {
        match from_json(body) {
            Ok(text) => text,
            Err(_) => String::from_utf8_lossy(body).into_owned(),
        }
    };
    non_empty(text)
}

fn from_json(body: &[u8]) -> Result<String, RelayError> {
    // An empty body decodes like an empty object: no alias, no text.
    if body.is_empty() {
        return Ok(String::new());
    }
    let value: Value =
        serde_json::from_slice(body).map_err(|err| RelayError::InvalidBody(err.to_string()))?;
    Ok(pick_text(&value))
}

/// First present alias wins. String values pass through; other scalars are
/// stringified; null, arrays and objects count as absent.
fn pick_text(value: &Value) -> String {
    let Value::Object(map) = value else {
        return String::new();
    };
    for alias in JSON_ALIASES {
        match map.get(alias) {
            None | Some(Value::Null) => continue,
            Some(Value::String(text)) => return text.clone(),
            Some(Value::Number(number)) => return number.to_string(),
            Some(Value::Bool(flag)) => return flag.to_string(),
            Some(_) => continue,
        }
    }
    String::new()
}

fn from_form(body: &[u8]) -> Result<String, RelayError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
        .map_err(|err| RelayError::InvalidBody(err.to_string()))?;
    Ok(first_alias(&pairs, &QUERY_ALIASES).unwrap_or_default())
}

fn first_alias(pairs: &[(String, String)], aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| {
        pairs
            .iter()
            .find(|(key, _)| key == alias)
            .map(|(_, value)| value.clone())
    })
}

fn non_empty(text: String) -> Result<String, RelayError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(RelayError::EmptyInput)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_aliases_in_priority_order() {
        let text = decode_query(Some("inputText=second&text=first")).unwrap();
        assert_eq!(text, "first");
        let text = decode_query(Some("prompt=ola+mundo")).unwrap();
        assert_eq!(text, "ola mundo");
    }

    #[test]
    fn empty_query_is_empty_input() {
        assert!(matches!(decode_query(None), Err(RelayError::EmptyInput)));
        assert!(matches!(
            decode_query(Some("other=x")),
            Err(RelayError::EmptyInput)
        ));
    }

    #[test]
    fn json_body_first_alias_wins() {
        let body = br#"{"content":"later","inputText":"earlier"}"#;
        let text = decode_body(Some("application/json"), body).unwrap();
        assert_eq!(text, "earlier");
    }

    #[test]
    fn json_scalars_are_stringified_and_composites_skipped() {
        let body = br#"{"text":{"nested":true},"input":41}"#;
        let text = decode_body(Some("application/json"), body).unwrap();
        assert_eq!(text, "41");
    }

    #[test]
    fn json_null_counts_as_absent() {
        let body = br#"{"text":null,"prompt":"fallback"}"#;
        let text = decode_body(Some("application/json"), body).unwrap();
        assert_eq!(text, "fallback");
    }

    #[test]
    fn malformed_json_is_invalid_body_not_empty_input() {
        let result = decode_body(Some("application/json"), b"{not json");
        assert!(matches!(result, Err(RelayError::InvalidBody(_))));
    }

    #[test]
    fn empty_json_object_is_empty_input() {
        let result = decode_body(Some("application/json"), b"{}");
        assert!(matches!(result, Err(RelayError::EmptyInput)));
        let result = decode_body(Some("application/json"), b"");
        assert!(matches!(result, Err(RelayError::EmptyInput)));
    }

    #[test]
    fn form_body_uses_query_aliases() {
        let body = b"input=forma+recente&other=1";
        let text = decode_body(Some("application/x-www-form-urlencoded"), body).unwrap();
        assert_eq!(text, "forma recente");
    }

    #[test]
    fn plain_text_body_is_taken_whole() {
        let text = decode_body(Some("text/plain"), b"  Team A vs Team B  ").unwrap();
        assert_eq!(text, "Team A vs Team B");
    }

    #[test]
    fn unknown_content_type_tries_json_then_raw() {
        let text = decode_body(None, br#"{"text":"from json"}"#).unwrap();
        assert_eq!(text, "from json");
        let text = decode_body(Some("application/octet-stream"), b"raw notes").unwrap();
        assert_eq!(text, "raw notes");
    }

    #[test]
    fn whitespace_only_input_is_empty() {
        let result = decode_body(Some("text/plain"), b"   \n\t ");
        assert!(matches!(result, Err(RelayError::EmptyInput)));
    }
}
