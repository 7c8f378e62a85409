//! Parse backend output into a merged record

use crate::error::MergeError;
use serde_json::{Map, Value};
use termbase_domain::consolidated::{MERGE_CONFIDENCE_COLUMN, SOURCES_MERGED_COLUMN};
use termbase_domain::{
    ColumnNames, ConsolidatedRecord, MergeConfidence, MergeMethod, MergeProvenance,
};

/// Parse a backend response into a service-assisted [`ConsolidatedRecord`]
///
/// `group_size` is used for `sources_merged` when the response does not carry
/// a usable number.
pub fn parse_merge_response(
    response: &str,
    columns: &ColumnNames,
    group_size: usize,
) -> Result<ConsolidatedRecord, MergeError> {
    let json_str = extract_json(response)?;
    let json: Value = serde_json::from_str(json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| MergeError::Response("Expected a JSON object".to_string()))?;

    let term = text_field(obj, &columns.term);
    if term.trim().is_empty() {
        return Err(MergeError::Response(format!(
            "Missing or empty '{}'",
            columns.term
        )));
    }

    let confidence = obj
        .get(MERGE_CONFIDENCE_COLUMN)
        .and_then(Value::as_str)
        .and_then(MergeConfidence::parse)
        .ok_or_else(|| {
            MergeError::Response(format!(
                "Missing or invalid '{}'",
                MERGE_CONFIDENCE_COLUMN
            ))
        })?;

    let sources_merged = obj
        .get(SOURCES_MERGED_COLUMN)
        .and_then(count_value)
        .unwrap_or(group_size);

    let fields = vec![
        (columns.term.clone(), term),
        (columns.definition.clone(), text_field(obj, &columns.definition)),
        (columns.url.clone(), text_field(obj, &columns.url)),
    ];

    Ok(ConsolidatedRecord::merged(
        fields,
        MergeProvenance {
            sources_merged,
            method: MergeMethod::Assisted(confidence),
        },
    ))
}

/// Slice the text between the first `{` and the last `}`, inclusive
///
/// Backends sometimes wrap the object in prose or code fences.
fn extract_json(response: &str) -> Result<&str, MergeError> {
    match (response.find('{'), response.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&response[start..=end]),
        _ => Err(MergeError::Response(
            "No valid JSON found in response".to_string(),
        )),
    }
}

/// Read a column as text; scalars are stringified, null or missing is empty
fn text_field(obj: &Map<String, Value>, column: &str) -> String {
    match obj.get(column) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => other.to_string(),
    }
}

fn count_value(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
