use crate::engine::EngineError;
use crate::error::{internal_render_error, translate_engine_error};

#[test]
fn parse_errors_are_categorized_with_line_number() {
    let raw = EngineError::new("Parse error on line 2:\nA --> ");
    let err = translate_engine_error(&raw, "graph TD\nA --> ");

    assert_eq!(err.message, "Parse error: the diagram source is not valid");
    assert_eq!(err.line, Some(2));
    assert_eq!(err.column, None);
    assert!(err.suggestion.unwrap().contains("node and link"));
}

#[test]
fn line_extraction_is_case_insensitive() {
    let raw = EngineError::new("Parse error on Line 14: unexpected token");
    let err = translate_engine_error(&raw, "graph TD");
    assert_eq!(err.line, Some(14));
}

#[test]
fn column_is_extracted_when_present() {
    let raw = EngineError::new("Parse error on line 4, column 7: bad token");
    let err = translate_engine_error(&raw, "graph TD");
    assert_eq!(err.line, Some(4));
    assert_eq!(err.column, Some(7));
}

#[test]
fn unsupported_type_failures_get_a_tailored_suggestion() {
    let raw = EngineError::new("Unsupported diagram type: unknown");
    let err = translate_engine_error(&raw, "wat\n");

    assert_eq!(err.message, "Unsupported diagram type");
    assert!(err.suggestion.unwrap().contains("not supported"));
}

#[test]
fn undefined_reference_failures_suggest_declaring_nodes() {
    let raw = EngineError::new("Cannot read properties of undefined");
    let err = translate_engine_error(&raw, "graph TD\nA --> B");

    assert_eq!(err.message, "A referenced node or link is not defined");
    assert!(err.suggestion.unwrap().contains("Declare"));
}

#[test]
fn syntax_failures_name_a_bounded_line_range() {
    let raw = EngineError::new("Invalid syntax near token");

    let short = translate_engine_error(&raw, "graph TD\nA --> B\nB --> C");
    assert_eq!(
        short.suggestion.as_deref(),
        Some("Check the formatting, especially lines 1-3")
    );

    let long_source = "graph TD\n".repeat(30);
    let long = translate_engine_error(&raw, &long_source);
    assert_eq!(
        long.suggestion.as_deref(),
        Some("Check the formatting, especially lines 1-10")
    );
}

#[test]
fn unmatched_messages_pass_through_with_generic_suggestion() {
    let raw = EngineError::new("something exploded in a novel way");
    let err = translate_engine_error(&raw, "graph TD");

    assert_eq!(err.message, "something exploded in a novel way");
    assert!(err.suggestion.unwrap().contains("syntax reference"));
}

#[test]
fn empty_message_falls_back_to_defaults() {
    let raw = EngineError::new("");
    let err = translate_engine_error(&raw, "graph TD");

    assert_eq!(err.message, "Unknown render error");
    assert_eq!(err.line, None);
    assert!(err.suggestion.is_some());
}

#[test]
fn internal_errors_point_at_support() {
    let err = internal_render_error();
    assert!(err.message.contains("Unexpected"));
    assert!(err.suggestion.unwrap().contains("support"));
}
