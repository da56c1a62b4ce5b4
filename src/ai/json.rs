/// Cut the outermost JSON object out of a model reply.
///
/// Returns the span from the first `{` to the last `}` inclusive, so prose
/// around the object is dropped. Text missing either brace is returned
/// unchanged and left for the JSON parser to reject. When the last `}` comes
/// before the first `{` the result is empty.
pub fn clean_json_string(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start <= end => &text[start..=end],
        (Some(_), Some(_)) => "",
        _ => text,
    }
}
