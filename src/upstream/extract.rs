use serde_json::Value;

/// Pulls the generated text out of a Responses API payload.
///
/// The top-level `output_text` convenience field wins when it holds non-blank text. Otherwise
/// the first non-blank `text` found in `output[*].content[*]` is used. Any other shape yields an
/// empty string, which the caller reports as non-JSON model output.
pub(crate) fn extract_output_text(payload: &Value) -> String {
    if let Some(text) = non_blank(payload.get("output_text")) {
        return text.to_string();
    }

    payload
        .get("output")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .find_map(|part| non_blank(part.get("text")))
        .unwrap_or_default()
        .to_string()
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
}
