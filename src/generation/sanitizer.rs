/*!
 * Removal of conversational framing from generated text.
 *
 * Models often wrap the requested document in code fences, open with a
 * "Here's a realistic ..." sentence or close with "This document provides ...".
 * The sanitizer strips those with pattern matching, never parses the content
 * and never fails: the worst case is the input returned trimmed.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::OutputFormat;

/// First fenced block, optionally tagged json
static JSON_FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?i:json)?(.*?)```").unwrap()
});

/// Fence markers around Markdown content
static MARKDOWN_FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```markdown|```md|```").unwrap()
});

/// Leading "Here's a realistic/sample ...:" that may span lines
static MARKDOWN_PREAMBLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^Here(?:'|’)s a (?:realistic|sample) .*?:\s*").unwrap()
});

/// Leading "Here's a simulated/sample ...:" that may span lines
static TEXT_PREAMBLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^Here(?:'|’)s a (?:simulated|sample) .*?:\s*").unwrap()
});

/// Leading "Here's a realistic/sample ...:" on the first line
static GENERAL_PREAMBLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^Here(?:'|’)s a (?:realistic|sample) .*?:\s*").unwrap()
});

/// Trailing "This JSON/document/content provides ..." up to the end of the text
static TRAILING_EXPLANATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\nThis (?:JSON|document|content) provides.*$").unwrap()
});

/// Strip conversational framing from generated text
///
/// The rule pass is repeated until the text stops changing. Every rule either
/// shortens the text or leaves it as is, so this terminates and the result is
/// a fixed point: `sanitize(sanitize(x, f), f) == sanitize(x, f)`.
pub fn sanitize(raw_text: &str, format: OutputFormat) -> String {
    let mut current = sanitize_pass(raw_text, format);
    loop {
        let next = sanitize_pass(&current, format);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn sanitize_pass(content: &str, format: OutputFormat) -> String {
    let content = match format {
        OutputFormat::Json => extract_json(content),
        OutputFormat::Markdown => {
            let unfenced = MARKDOWN_FENCE_REGEX.replace_all(content, "");
            MARKDOWN_PREAMBLE_REGEX.replace(&unfenced, "").into_owned()
        }
        OutputFormat::Text => TEXT_PREAMBLE_REGEX.replace(content, "").into_owned(),
    };

    let content = GENERAL_PREAMBLE_REGEX.replace(&content, "");
    let content = TRAILING_EXPLANATION_REGEX.replace(&content, "");

    content.trim().to_string()
}

fn extract_json(content: &str) -> String {
    if let Some(inner) = JSON_FENCE_REGEX.captures(content).and_then(|c| c.get(1)) {
        return inner.as_str().trim().to_string();
    }

    let trimmed = content.trim();
    if is_delimited(trimmed, '[', ']') || is_delimited(trimmed, '{', '}') {
        return trimmed.to_string();
    }

    match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start < end => content[start..=end].to_string(),
        _ => content.to_string(),
    }
}

fn is_delimited(text: &str, open: char, close: char) -> bool {
    text.starts_with(open) && text.ends_with(close)
}
