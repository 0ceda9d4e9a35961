use regex::Regex;

use crate::engine::EngineError;
use crate::model::RenderError;

/// Converts a raw engine failure into a structured, user-facing
/// [`RenderError`].
///
/// Known failure categories are mapped to a human-readable message and a
/// tailored suggestion; anything unmatched passes the raw message through
/// with a generic reference suggestion. Never fails: an empty raw message
/// falls back to a default message/suggestion pair.
pub fn translate_engine_error(raw: &EngineError, source: &str) -> RenderError {
    let raw_message = raw.message.trim();
    if raw_message.is_empty() {
        return RenderError {
            message: "Unknown render error".to_string(),
            line: None,
            column: None,
            suggestion: Some("Check that the diagram source is valid".to_string()),
        };
    }

    RenderError {
        message: humanize(raw_message),
        line: extract_line(raw_message),
        column: extract_column(raw_message),
        suggestion: Some(suggestion_for(raw_message, source)),
    }
}

/// Error shape for failures that escape the normal engine error path, e.g. a
/// panic unwinding out of the engine future.
pub fn internal_render_error() -> RenderError {
    RenderError {
        message: "Unexpected error while rendering the diagram".to_string(),
        line: None,
        column: None,
        suggestion: Some(
            "Check the diagram source, or contact support if the problem persists".to_string(),
        ),
    }
}

fn humanize(raw: &str) -> String {
    if raw.contains("Parse error") {
        return "Parse error: the diagram source is not valid".to_string();
    }
    if raw.contains("Unsupported diagram type") {
        return "Unsupported diagram type".to_string();
    }
    if raw.contains("undefined") {
        return "A referenced node or link is not defined".to_string();
    }
    if raw.contains("syntax") {
        return "Syntax error: check the source formatting".to_string();
    }
    raw.to_string()
}

fn suggestion_for(raw: &str, source: &str) -> String {
    if raw.contains("Parse error") {
        return "Check the diagram syntax: every node and link must be fully defined".to_string();
    }
    if raw.contains("Unsupported") {
        return "This diagram type is not supported; see the list of supported types".to_string();
    }
    if raw.contains("undefined") {
        return "Declare every referenced node before using it".to_string();
    }
    if raw.contains("syntax") {
        let lines = source.lines().count().max(1);
        return format!("Check the formatting, especially lines 1-{}", lines.min(10));
    }
    "Check the source against the diagram syntax reference".to_string()
}

fn extract_line(message: &str) -> Option<u32> {
    let caps = Regex::new(r"(?i)line (\d+)").unwrap().captures(message)?;
    caps.get(1)?.as_str().parse().ok().filter(|&n| n > 0)
}

fn extract_column(message: &str) -> Option<u32> {
    let caps = Regex::new(r"(?i)column (\d+)").unwrap().captures(message)?;
    caps.get(1)?.as_str().parse().ok().filter(|&n| n > 0)
}
