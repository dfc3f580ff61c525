//! TypeScript literal formatting for JSON values.

use serde_json::Value;
use typeforge_core::domain::is_identifier;

/// Joined inline arrays must stay below this many characters.
const INLINE_ARRAY_LIMIT: usize = 80;

/// Single-quoted string literal.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Property key, quoted unless it only uses `[A-Za-z0-9_$]`.
pub fn property_key(key: &str) -> String {
    let plain = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if plain { key.to_string() } else { quote(key) }
}

/// Interface member name; also quoted when it starts with a digit.
pub fn member_name(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

/// Format `value` as a TypeScript expression nested `indent` levels deep.
pub fn format_value(value: &Value, indent: usize) -> String {
    let indentation = "  ".repeat(indent);

    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) if items.is_empty() => "[]".into(),
        Value::Array(items) => {
            let formatted: Vec<String> = items
                .iter()
                .map(|item| format_value(item, indent + 1))
                .collect();

            let all_primitive = items
                .iter()
                .all(|item| !matches!(item, Value::Array(_) | Value::Object(_)));
            let inline = formatted.join(", ");
            if all_primitive && inline.len() < INLINE_ARRAY_LIMIT {
                return format!("[{inline}]");
            }

            let separator = format!(",\n{indentation}  ");
            format!(
                "[\n{indentation}  {},\n{indentation}]",
                formatted.join(&separator)
            )
        }
        Value::Object(map) if map.is_empty() => "{}".into(),
        Value::Object(map) => {
            let properties: Vec<String> = map
                .iter()
                .map(|(key, child)| {
                    format!(
                        "{indentation}  {}: {}",
                        property_key(key),
                        format_value(child, indent + 1)
                    )
                })
                .collect();
            format!("{{\n{},\n{indentation}}}", properties.join(",\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn strings_are_escaped() {
        assert_eq!(quote("it's \\ a\n\tb\r"), r"'it\'s \\ a\n\tb\r'");
    }

    #[test]
    fn scalars() {
        assert_eq!(format_value(&json!(null), 0), "null");
        assert_eq!(format_value(&json!(true), 0), "true");
        assert_eq!(format_value(&json!(42), 0), "42");
        assert_eq!(format_value(&json!(1.5), 0), "1.5");
        assert_eq!(format_value(&json!([]), 0), "[]");
        assert_eq!(format_value(&json!({}), 0), "{}");
    }

    #[test]
    fn short_primitive_arrays_are_inline() {
        assert_eq!(format_value(&json!(["a", 1, null]), 0), "['a', 1, null]");
    }

    #[test]
    fn long_arrays_break_per_item() {
        let long = "x".repeat(40);
        let value = json!([long, long]);
        let expected = format!("[\n  '{long}',\n  '{long}',\n]");
        assert_eq!(format_value(&value, 0), expected);
    }

    #[test]
    fn objects_nest_with_two_space_indent() {
        let value = json!({
            "id": 1,
            "user-name": "a",
            "tags": [{"k": "v"}]
        });
        let expected = "\
{
  id: 1,
  'user-name': 'a',
  tags: [
    {
      k: 'v',
    },
  ],
}";
        assert_eq!(format_value(&value, 0), expected);
    }

    #[test]
    fn member_names_follow_identifier_rules() {
        assert_eq!(member_name("userId"), "userId");
        assert_eq!(member_name("2fa"), "'2fa'");
        assert_eq!(member_name("content-type"), "'content-type'");
        assert_eq!(property_key("2fa"), "2fa");
    }
}
