//! Recovering JSON from free-text LLM replies.

use serde_json::{json, Map, Value};

/// Outcome of scraping an LLM reply for a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub enum AiReply {
    /// The first balanced `{...}` in the reply parsed as a JSON object.
    Parsed(Map<String, Value>),
    /// No usable object; carries the whole reply.
    Unparsed(String),
}

impl AiReply {
    pub fn is_parsed(&self) -> bool {
        matches!(self, AiReply::Parsed(_))
    }

    /// Wire form: the parsed object, or `{"summary": <raw reply>}`.
    pub fn into_json(self) -> Value {
        match self {
            AiReply::Parsed(map) => Value::Object(map),
            AiReply::Unparsed(raw) => json!({ "summary": raw }),
        }
    }
}

/// Byte range of the first balanced `{...}` in `text`. Braces inside JSON
/// string literals (including escaped quotes) do not count.
pub fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Scrapes the first JSON object out of an LLM reply.
pub fn parse_ai_response(text: &str) -> AiReply {
    match first_balanced_object(text).map(serde_json::from_str::<Value>) {
        Some(Ok(Value::Object(map))) => AiReply::Parsed(map),
        _ => AiReply::Unparsed(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_reply_is_parsed() {
        let reply = parse_ai_response(r#"Here is the result: {"summary":"ok"}"#);
        assert_eq!(reply.into_json(), json!({"summary": "ok"}));
    }

    #[test]
    fn test_no_json_wraps_raw_reply() {
        let raw = "Sorry, I could not read that CV.";
        let reply = parse_ai_response(raw);
        assert!(!reply.is_parsed());
        assert_eq!(reply.into_json(), json!({"summary": raw}));
    }

    #[test]
    fn test_code_fenced_reply() {
        let raw = "```json\n{\"header\": {\"fullName\": \"Ada\"}}\n```";
        let reply = parse_ai_response(raw);
        assert_eq!(reply.into_json(), json!({"header": {"fullName": "Ada"}}));
    }

    #[test]
    fn test_nested_and_trailing_text() {
        let raw = r#"{"a": {"b": [1, {"c": 2}]}} and then {"second": true}"#;
        assert_eq!(
            first_balanced_object(raw),
            Some(r#"{"a": {"b": [1, {"c": 2}]}}"#)
        );
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let raw = r#"Result: {"summary": "uses { and } and \"quotes\"", "n": 1} done"#;
        let reply = parse_ai_response(raw);
        assert_eq!(
            reply.into_json(),
            json!({"summary": "uses { and } and \"quotes\"", "n": 1})
        );
    }

    #[test]
    fn test_unbalanced_is_unparsed() {
        let raw = r#"{"summary": "cut off"#;
        assert_eq!(first_balanced_object(raw), None);
        assert_eq!(parse_ai_response(raw), AiReply::Unparsed(raw.to_string()));
    }

    #[test]
    fn test_balanced_but_invalid_json_is_unparsed() {
        let raw = "{summary: ok}";
        assert!(!parse_ai_response(raw).is_parsed());
    }
}
