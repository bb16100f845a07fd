/// Render a scalar JSON field (barcode, category) as plain text.
///
/// Catalog entries are not consistent about whether barcodes are numbers or
/// strings, so both end up as the same text. Containers collapse to an empty
/// string rather than leaking JSON into a display field.
pub fn value_to_short_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) | serde_json::Value::Null => String::new(),
    }
}
