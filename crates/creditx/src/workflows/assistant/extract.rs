use serde::de::DeserializeOwned;

use super::error::AssistantError;

const EXCERPT_CHARS: usize = 120;

/// Returns the first balanced top-level `{...}` block in free-form model output.
///
/// Braces inside JSON string literals are ignored, so prose before or after the object
/// and code fences around it do not matter.
pub fn extract_json_object(text: &str) -> Option<&str> {
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

/// Extracts and deserializes the JSON object embedded in a model reply.
pub fn parse_model_json<T: DeserializeOwned>(text: &str) -> Result<T, AssistantError> {
    let object = extract_json_object(text).ok_or_else(|| AssistantError::MalformedOutput {
        excerpt: text.trim().chars().take(EXCERPT_CHARS).collect(),
    })?;
    serde_json::from_str(object).map_err(AssistantError::from)
}
