use crate::*;

#[test]
fn detects_each_supported_type() {
    assert_eq!(detect_chart_type("graph TD\n  A --> B"), ChartType::Graph);
    assert_eq!(
        detect_chart_type("flowchart LR\n  A --> B"),
        ChartType::Flowchart
    );
    assert_eq!(
        detect_chart_type("sequenceDiagram\n  Alice->>Bob: Hello"),
        ChartType::SequenceDiagram
    );
    assert_eq!(
        detect_chart_type("classDiagram\n  class Animal"),
        ChartType::ClassDiagram
    );
    assert_eq!(
        detect_chart_type("stateDiagram-v2\n  [*] --> State1"),
        ChartType::StateDiagram
    );
    assert_eq!(
        detect_chart_type("journey\n  title My Journey"),
        ChartType::Journey
    );
    assert_eq!(detect_chart_type("gitGraph\n  commit"), ChartType::GitGraph);
}

#[test]
fn unrecognized_keyword_is_unknown() {
    assert_eq!(detect_chart_type("unknownType\n  test"), ChartType::Unknown);
}

#[test]
fn detection_is_case_insensitive() {
    assert_eq!(detect_chart_type("GRAPH TD\n  A --> B"), ChartType::Graph);
    assert_eq!(detect_chart_type("GitGraph\n  commit"), ChartType::GitGraph);
    assert_eq!(
        detect_chart_type("SEQUENCEDIAGRAM\n  Alice->>Bob: hi"),
        ChartType::SequenceDiagram
    );
}

#[test]
fn specific_keywords_win_over_generic_graph() {
    // "gitgraph" contains the substring "graph"; the ordered detector table
    // must classify it as gitGraph, never as the generic fallback.
    assert_eq!(detect_chart_type("gitGraph\ncommit"), ChartType::GitGraph);
    assert_eq!(detect_chart_type("flowchart LR\nA-->B"), ChartType::Flowchart);
    // Both keywords on the first line: the specific one wins.
    assert_eq!(
        detect_chart_type("flowchart TD %% like graph but better"),
        ChartType::Flowchart
    );
}

#[test]
fn only_the_first_line_is_inspected() {
    let source = "sequenceDiagram\n%% see the call graph below\nAlice->>Bob: hi";
    assert_eq!(detect_chart_type(source), ChartType::SequenceDiagram);
}

#[test]
fn leading_blank_lines_are_skipped() {
    let source = "\n\n   \n  graph TD\n  A --> B\n  B --> C\n";
    assert_eq!(detect_chart_type(source), ChartType::Graph);
}

#[test]
fn empty_or_whitespace_source_is_unknown() {
    assert_eq!(detect_chart_type(""), ChartType::Unknown);
    assert_eq!(detect_chart_type("   "), ChartType::Unknown);
    assert_eq!(detect_chart_type("\n\n"), ChartType::Unknown);
}

#[test]
fn supported_subset_excludes_unknown() {
    for chart_type in SUPPORTED_CHART_TYPES {
        assert!(chart_type.is_supported());
    }
    assert!(!ChartType::Unknown.is_supported());
    assert!(!SUPPORTED_CHART_TYPES.contains(&ChartType::Unknown));
}
