use regex::Regex;
use serde_json::{json, Value};

use crate::services::recovery_service::RecoveryFailure;
use crate::services::trace::RecoveryTrace;

/// Field names an AI-truncated `link` value tends to run into when the model
/// drops the closing brace between two activities.
const RUN_ON_FIELDS: [&str; 8] = [
    "time",
    "title",
    "description",
    "location",
    "cost",
    "pricePerPerson",
    "currency",
    "category",
];

const REPAIRED_LINK: &str = "https://example.com";

type Strategy = fn(&str) -> Option<Value>;

/// Repair strategies in the order they are attempted. Cheap, targeted
/// repairs come first so aggressive rewrites never corrupt text a lighter
/// pass could have parsed; the lenient parser is the final catch-all.
const STRATEGIES: [(&str, Strategy); 9] = [
    ("as-is", parse_as_is),
    ("repaired", parse_repaired),
    ("repaired-twice", parse_repaired_twice),
    ("ascii-only", parse_ascii_only),
    ("days-region", parse_days_region),
    ("days-region-twice", parse_days_region_twice),
    ("bare-array", parse_bare_array),
    ("day-objects", parse_day_objects),
    ("lenient", parse_lenient),
];

/// Run the raw model text through the ordered strategy chain and return the
/// first value that parses.
pub fn parse_model_text(raw: &str, trace: &dyn RecoveryTrace) -> Result<Value, RecoveryFailure> {
    let extracted = match extract_bracketed(raw) {
        Some(region) => region,
        None => {
            trace.event("no bracketed region in model text");
            return Err(RecoveryFailure::NoBracketedRegion);
        }
    };

    for (name, strategy) in STRATEGIES {
        match strategy(extracted) {
            Some(value) => {
                trace.event(&format!("parse strategy '{}' succeeded", name));
                return Ok(value);
            }
            None => trace.event(&format!("parse strategy '{}' failed", name)),
        }
    }

    Err(RecoveryFailure::NoParseableStructure)
}

/// Greedy bracket-to-bracket extraction: from the first `{` or `[` through
/// the last `}` or `]`. Returns None when the text holds no bracketed region.
pub fn extract_bracketed(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let end = text.rfind(['}', ']'])?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// One pass of syntactic repair over almost-JSON model output.
///
/// The transformations mirror the failure modes seen in real completions:
/// escaped quotes around the whole document, `link` URLs that swallow the
/// following object boundary, unquoted keys, single-quoted strings, trailing
/// or missing commas, and prose wrapped around the structure.
pub fn repair_json(input: &str) -> String {
    let mut repaired = input.replace("\\\"", "\"");

    // A truncated link value that runs straight into the next field name is
    // missing the `}, {` between two activities. Restore it, defaulting the
    // time field the reopened object lost.
    for field in RUN_ON_FIELDS {
        let pattern = format!(r#""link":\s*"[^"]*"[^}}]*?"{field}":"#);
        let replacement = if field == "time" {
            format!(r#""link": "{REPAIRED_LINK}"}}, {{"time":"#)
        } else {
            format!(r#""link": "{REPAIRED_LINK}"}}, {{"time": "12:00", "{field}":"#)
        };
        repaired = Regex::new(&pattern)
            .unwrap()
            .replace_all(&repaired, replacement.as_str())
            .into_owned();
    }

    // Quote unquoted object keys.
    repaired = Regex::new(r"([{,]\s*)([A-Za-z_][A-Za-z0-9_]*)\s*:")
        .unwrap()
        .replace_all(&repaired, r#"${1}"${2}":"#)
        .into_owned();

    // Single-quoted strings.
    repaired = repaired.replace('\'', "\"");

    // Trailing commas before a closing brace or bracket.
    repaired = Regex::new(r",(\s*[}\]])")
        .unwrap()
        .replace_all(&repaired, "${1}")
        .into_owned();

    // Missing commas between adjacent objects or arrays.
    repaired = Regex::new(r"\}(\s*)\{")
        .unwrap()
        .replace_all(&repaired, "},${1}{")
        .into_owned();
    repaired = Regex::new(r"\](\s*)\[")
        .unwrap()
        .replace_all(&repaired, "],${1}[")
        .into_owned();

    // A link value sitting right before a delimiter lost whatever the model
    // meant to write; swap in the placeholder so the URL cannot hold stray
    // structural characters.
    repaired = Regex::new(r#""link":\s*"[^"]*"(\s*)([,\]}])"#)
        .unwrap()
        .replace_all(&repaired, format!(r#""link": "{REPAIRED_LINK}"${{1}}${{2}}"#).as_str())
        .into_owned();

    // Drop prose outside the outermost structure.
    repaired = Regex::new(r"^[^\[{]*")
        .unwrap()
        .replace(&repaired, "")
        .into_owned();
    repaired = Regex::new(r"[^}\]]*$")
        .unwrap()
        .replace(&repaired, "")
        .into_owned();

    // Collapse whitespace.
    repaired = Regex::new(r"\s+")
        .unwrap()
        .replace_all(&repaired, " ")
        .into_owned();

    repaired.trim().to_string()
}

/// Keep only printable ASCII, dropping the smart quotes and stray unicode
/// some models interleave with otherwise valid JSON.
pub fn strip_non_printable(input: &str) -> String {
    input.chars().filter(|c| (' '..='~').contains(c)).collect()
}

fn parse_as_is(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

fn parse_repaired(text: &str) -> Option<Value> {
    serde_json::from_str(&repair_json(text)).ok()
}

fn parse_repaired_twice(text: &str) -> Option<Value> {
    serde_json::from_str(&repair_json(&repair_json(text))).ok()
}

fn parse_ascii_only(text: &str) -> Option<Value> {
    serde_json::from_str(&strip_non_printable(text)).ok()
}

fn parse_days_region(text: &str) -> Option<Value> {
    let wrapped = days_region(&repair_json(text))?;
    serde_json::from_str(&wrapped).ok()
}

fn parse_days_region_twice(text: &str) -> Option<Value> {
    let wrapped = days_region(&repair_json(&repair_json(text)))?;
    serde_json::from_str(&wrapped).ok()
}

fn parse_bare_array(text: &str) -> Option<Value> {
    if !text.trim_start().starts_with('[') {
        return None;
    }
    let value: Value = serde_json::from_str(&repair_json(text)).ok()?;
    if value.is_array() {
        Some(json!({ "days": value }))
    } else {
        None
    }
}

fn parse_day_objects(text: &str) -> Option<Value> {
    let repaired = repair_json(text);
    let days = collect_day_objects(&repaired);
    if days.is_empty() {
        None
    } else {
        Some(json!({ "days": days }))
    }
}

fn parse_lenient(text: &str) -> Option<Value> {
    json5::from_str(text).ok()
}

/// Slice out the `"days": [...]` array of `text`, matched by bracket depth,
/// and rewrap it as a standalone object.
fn days_region(text: &str) -> Option<String> {
    let marker = Regex::new(r#""days"\s*:\s*\["#).unwrap();
    let found = marker.find(text)?;
    let array = balanced_slice(text, found.end() - 1, b'[', b']')?;
    Some(format!("{{\"days\": {}}}", array))
}

/// Salvage pass: pull out every balanced `{...}` block mentioning a `"day"`
/// key and repair-parse each in isolation.
fn collect_day_objects(text: &str) -> Vec<Value> {
    let mut days = Vec::new();
    let mut cursor = 0;
    while let Some(offset) = text[cursor..].find('{') {
        let open = cursor + offset;
        if let Some(block) = balanced_slice(text, open, b'{', b'}') {
            if block.contains("\"day\"") {
                if let Ok(Value::Object(obj)) = serde_json::from_str(&repair_json(block)) {
                    days.push(Value::Object(obj));
                    cursor = open + block.len();
                    continue;
                }
            }
        }
        cursor = open + 1;
    }
    days
}

/// Substring from the opening bracket at `open_idx` through its matching
/// close, tracking string literals so brackets inside values do not count.
fn balanced_slice(text: &str, open_idx: usize, open: u8, close: u8) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, &byte) in bytes.iter().enumerate().skip(open_idx) {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        if byte == b'"' {
            in_string = true;
        } else if byte == open {
            depth += 1;
        } else if byte == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(&text[open_idx..=i]);
            }
        }
    }
    None
}
