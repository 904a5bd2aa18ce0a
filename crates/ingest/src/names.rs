//! Best-effort decoding of the embedded name lists in catalog cells.
//!
//! The `production_companies`, `cast` and `crew` columns hold Python-literal
//! lists of objects (`[{'id': 6194, 'name': 'Warner Bros.'}, ...]`) with
//! single quotes and `None`. They are repaired by literal substitution and
//! then decoded one element at a time, so a bad element only truncates the
//! list instead of losing the row.
use serde_json::{Deserializer, Value};

/// Extract the non-empty `name` values from an embedded object list.
///
/// Decoding stops at the first element that fails to parse; names gathered
/// before that point are kept.
///
/// ```rust
/// use ingest::decode_names;
///
/// let cell = "[{'id': 2, 'name': 'Pixar Animation Studios'}, {'name': None}]";
/// assert_eq!(decode_names(cell), vec!["Pixar Animation Studios"]);
/// ```
pub fn decode_names(cell: &str) -> Vec<String> {
    let repaired = cell.replace('\'', "\"").replace("None", "\"\"");
    let mut names = Vec::new();

    let trimmed = repaired.trim_start();
    let mut rest = trimmed.strip_prefix('[').unwrap_or(trimmed);

    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        if rest.is_empty() || rest.starts_with(']') {
            break;
        }

        let mut stream = Deserializer::from_str(rest).into_iter::<Value>();
        match stream.next() {
            Some(Ok(value)) => {
                collect_name(&value, &mut names);
                rest = &rest[stream.byte_offset()..];
            }
            _ => break,
        }
    }

    names
}

fn collect_name(value: &Value, names: &mut Vec<String>) {
    if let Some(name) = value.get("name").and_then(Value::as_str) {
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
}
