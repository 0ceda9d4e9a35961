use crate::model::ChartType;

// The detector order is significant: specific keywords are checked before the
// generic `graph` fallback, so a first line like `gitGraph` (which contains
// the substring "graph") still classifies as its specific type.
const DETECTORS: &[(&str, ChartType)] = &[
    ("gitgraph", ChartType::GitGraph),
    ("flowchart", ChartType::Flowchart),
    ("sequencediagram", ChartType::SequenceDiagram),
    ("classdiagram", ChartType::ClassDiagram),
    ("statediagram", ChartType::StateDiagram),
    ("journey", ChartType::Journey),
    ("graph", ChartType::Graph),
];

/// Classifies diagram source by its first non-empty line, case-insensitively.
///
/// Only the leading line is inspected; keywords appearing later in the source
/// (say, "graph" inside a sequence-diagram comment) never influence the
/// result. Empty or whitespace-only source classifies as
/// [`ChartType::Unknown`].
pub fn detect_chart_type(source: &str) -> ChartType {
    let Some(first_line) = source.trim().lines().next() else {
        return ChartType::Unknown;
    };
    let first_line = first_line.to_lowercase();

    for (keyword, chart_type) in DETECTORS {
        if first_line.contains(keyword) {
            return *chart_type;
        }
    }

    ChartType::Unknown
}
