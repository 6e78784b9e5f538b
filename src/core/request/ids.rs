//! Resource id normalisation and id-list parsing

use crate::utils::error::{PurgeError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static STATUS_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:www\.|mobile\.)?(?:twitter|x)\.com/[^/]+/status(?:es)?/(\d+)")
        .expect("status URL pattern is valid")
});

/// Reduce a status URL to its numeric id; anything else is returned trimmed
pub fn resource_id(input: &str) -> String {
    let input = input.trim();
    STATUS_URL
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| input.to_string())
}

/// Parse an id list
///
/// Accepts a JSON array (of strings, numbers, or objects with an `id` field)
/// or plain text with one or more ids per line separated by commas or
/// whitespace. Blank lines and `#` comments are ignored.
pub fn parse_id_list(text: &str) -> Result<Vec<String>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        parse_json_ids(trimmed)
    } else {
        Ok(parse_text_ids(text))
    }
}

fn parse_text_ids(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|token| !token.is_empty())
        .map(resource_id)
        .collect()
}

fn parse_json_ids(text: &str) -> Result<Vec<String>> {
    let values: Vec<Value> = serde_json::from_str(text)?;

    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let raw = match value {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Object(map) => match map.get("id_str").or_else(|| map.get("id")) {
                    Some(Value::String(s)) => Some(s.clone()),
                    Some(Value::Number(n)) => Some(n.to_string()),
                    _ => None,
                },
                _ => None,
            };

            raw.map(|r| resource_id(&r)).ok_or_else(|| {
                PurgeError::parsing(format!("entry {} has no usable id: {}", index, value))
            })
        })
        .collect()
}
