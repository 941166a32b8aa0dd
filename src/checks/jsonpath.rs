//! Minimal JSONPath evaluation over `serde_json::Value`.
//!
//! Supports the subset of JSONPath that definition files actually use:
//!
//! - root `$`
//! - dot member access: `$.version`, `$.scripts.build`
//! - bracket member access: `$['version']`, `$["scripts"]`
//! - array indexing with negative offsets: `$[0]`, `$.deps[-1]`
//! - wildcards: `$.*`, `$[*]`
//! - recursive descent: `$..name`, `$..*`
//!
//! Evaluation returns every matching value; callers decide between a
//! presence check and a structural-equality comparison.

use serde_json::Value;
use thiserror::Error;

/// A JSONPath expression that failed to parse.
#[derive(Debug, Error)]
#[error("invalid JSONPath: {0}")]
pub struct JsonPathError(String);

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Name(String),
    Index(i64),
    Wildcard,
    DescentName(String),
    DescentWildcard,
}

/// Evaluate `path` against `root`, returning all matching values.
pub fn evaluate<'a>(path: &str, root: &'a Value) -> Result<Vec<&'a Value>, JsonPathError> {
    let segments = parse(path)?;
    let mut current = vec![root];

    for segment in &segments {
        let mut next = Vec::new();
        for node in current {
            match segment {
                Segment::Name(name) => {
                    if let Value::Object(map) = node {
                        if let Some(v) = map.get(name) {
                            next.push(v);
                        }
                    }
                }
                Segment::Index(idx) => {
                    if let Value::Array(items) = node {
                        if let Some(v) = resolve_index(items, *idx) {
                            next.push(v);
                        }
                    }
                }
                Segment::Wildcard => collect_children(node, &mut next),
                Segment::DescentName(name) => {
                    for descendant in descendants(node) {
                        if let Value::Object(map) = descendant {
                            if let Some(v) = map.get(name) {
                                next.push(v);
                            }
                        }
                    }
                }
                Segment::DescentWildcard => {
                    for descendant in descendants(node) {
                        collect_children(descendant, &mut next);
                    }
                }
            }
        }
        current = next;
    }

    Ok(current)
}

fn resolve_index(items: &[Value], idx: i64) -> Option<&Value> {
    let len = items.len() as i64;
    let effective = if idx < 0 { len + idx } else { idx };
    if (0..len).contains(&effective) {
        items.get(effective as usize)
    } else {
        None
    }
}

fn collect_children<'a>(node: &'a Value, out: &mut Vec<&'a Value>) {
    match node {
        Value::Object(map) => out.extend(map.values()),
        Value::Array(items) => out.extend(items.iter()),
        _ => {}
    }
}

/// The node itself plus all transitive children, depth-first.
fn descendants(node: &Value) -> Vec<&Value> {
    let mut out = Vec::new();
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        out.push(current);
        match current {
            Value::Object(map) => stack.extend(map.values()),
            Value::Array(items) => stack.extend(items.iter()),
            _ => {}
        }
    }
    out
}

fn parse(path: &str) -> Result<Vec<Segment>, JsonPathError> {
    let mut chars = path.chars().peekable();
    if chars.next() != Some('$') {
        return Err(JsonPathError(format!("'{path}' must start with '$'")));
    }

    let mut segments = Vec::new();
    while let Some(&ch) = chars.peek() {
        match ch {
            '.' => {
                chars.next();
                if chars.peek() == Some(&'.') {
                    chars.next();
                    if chars.peek() == Some(&'*') {
                        chars.next();
                        segments.push(Segment::DescentWildcard);
                    } else {
                        let name = parse_identifier(&mut chars, path)?;
                        segments.push(Segment::DescentName(name));
                    }
                } else if chars.peek() == Some(&'*') {
                    chars.next();
                    segments.push(Segment::Wildcard);
                } else {
                    let name = parse_identifier(&mut chars, path)?;
                    segments.push(Segment::Name(name));
                }
            }
            '[' => {
                chars.next();
                segments.push(parse_bracket(&mut chars, path)?);
            }
            other => {
                return Err(JsonPathError(format!(
                    "'{path}': unexpected character '{other}'"
                )));
            }
        }
    }
    Ok(segments)
}

fn parse_identifier(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    path: &str,
) -> Result<String, JsonPathError> {
    let mut name = String::new();
    while let Some(&ch) = chars.peek() {
        if ch.is_alphanumeric() || matches!(ch, '_' | '-' | '$') {
            name.push(ch);
            chars.next();
        } else {
            break;
        }
    }
    if name.is_empty() {
        return Err(JsonPathError(format!("'{path}': expected a member name")));
    }
    Ok(name)
}

fn parse_bracket(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    path: &str,
) -> Result<Segment, JsonPathError> {
    while chars.peek() == Some(&' ') {
        chars.next();
    }

    let segment = match chars.peek() {
        Some(&quote @ ('\'' | '"')) => {
            chars.next();
            let mut name = String::new();
            loop {
                match chars.next() {
                    Some(ch) if ch == quote => break,
                    Some(ch) => name.push(ch),
                    None => {
                        return Err(JsonPathError(format!("'{path}': unterminated string")));
                    }
                }
            }
            Segment::Name(name)
        }
        Some(&'*') => {
            chars.next();
            Segment::Wildcard
        }
        _ => {
            let mut digits = String::new();
            if chars.peek() == Some(&'-') {
                digits.push('-');
                chars.next();
            }
            while let Some(&ch) = chars.peek() {
                if ch.is_ascii_digit() {
                    digits.push(ch);
                    chars.next();
                } else {
                    break;
                }
            }
            let idx: i64 = digits
                .parse()
                .map_err(|_| JsonPathError(format!("'{path}': expected an array index")))?;
            Segment::Index(idx)
        }
    };

    while chars.peek() == Some(&' ') {
        chars.next();
    }
    match chars.next() {
        Some(']') => Ok(segment),
        _ => Err(JsonPathError(format!("'{path}': expected ']'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_returns_document() {
        let doc = json!({"a": 1});
        let results = evaluate("$", &doc).unwrap();
        assert_eq!(results, vec![&doc]);
    }

    #[test]
    fn dot_member_access() {
        let doc = json!({"version": "1.0.0"});
        let results = evaluate("$.version", &doc).unwrap();
        assert_eq!(results, vec![&json!("1.0.0")]);
    }

    #[test]
    fn nested_dot_access() {
        let doc = json!({"scripts": {"build": "cargo build"}});
        let results = evaluate("$.scripts.build", &doc).unwrap();
        assert_eq!(results, vec![&json!("cargo build")]);
    }

    #[test]
    fn bracket_member_access() {
        let doc = json!({"dev-deps": {"serde": "1"}});
        assert_eq!(
            evaluate("$['dev-deps'].serde", &doc).unwrap(),
            vec![&json!("1")]
        );
        assert_eq!(
            evaluate("$[\"dev-deps\"][\"serde\"]", &doc).unwrap(),
            vec![&json!("1")]
        );
    }

    #[test]
    fn array_indexing() {
        let doc = json!({"items": ["a", "b", "c"]});
        assert_eq!(evaluate("$.items[0]", &doc).unwrap(), vec![&json!("a")]);
        assert_eq!(evaluate("$.items[-1]", &doc).unwrap(), vec![&json!("c")]);
        assert!(evaluate("$.items[9]", &doc).unwrap().is_empty());
    }

    #[test]
    fn wildcard_over_object_and_array() {
        let doc = json!({"a": 1, "b": 2});
        assert_eq!(evaluate("$.*", &doc).unwrap().len(), 2);
        let doc = json!([1, 2, 3]);
        assert_eq!(evaluate("$[*]", &doc).unwrap().len(), 3);
    }

    #[test]
    fn recursive_descent_finds_deep_members() {
        let doc = json!({
            "a": {"name": "first"},
            "b": {"c": {"name": "second"}}
        });
        let mut names: Vec<&str> = evaluate("$..name", &doc)
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        names.sort_unstable();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn missing_member_yields_empty() {
        let doc = json!({"a": 1});
        assert!(evaluate("$.b", &doc).unwrap().is_empty());
    }

    #[test]
    fn member_access_on_non_object_yields_empty() {
        let doc = json!(["a", "b"]);
        assert!(evaluate("$.a", &doc).unwrap().is_empty());
    }

    #[test]
    fn rejects_path_without_root() {
        assert!(evaluate("version", &json!({})).is_err());
    }

    #[test]
    fn rejects_unterminated_bracket() {
        assert!(evaluate("$['a'", &json!({})).is_err());
        assert!(evaluate("$['a", &json!({})).is_err());
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(evaluate("$.a!", &json!({})).is_err());
    }
}
