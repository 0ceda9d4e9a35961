use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a render session: `Idle → Loading → {Success, Error}`,
/// cycling back to `Loading` on each new request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Diagram grammar variant, inferred from the source's leading keyword.
///
/// The tag set is closed; [`ChartType::Unknown`] is never in the supported
/// subset. Serialized spelling follows Mermaid (`sequenceDiagram`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    Graph,
    Flowchart,
    SequenceDiagram,
    ClassDiagram,
    StateDiagram,
    Journey,
    GitGraph,
    Unknown,
}

/// Chart types the render pipeline will hand to the engine.
pub const SUPPORTED_CHART_TYPES: &[ChartType] = &[
    ChartType::Graph,
    ChartType::Flowchart,
    ChartType::SequenceDiagram,
    ChartType::ClassDiagram,
    ChartType::StateDiagram,
    ChartType::Journey,
    ChartType::GitGraph,
];

impl ChartType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartType::Graph => "graph",
            ChartType::Flowchart => "flowchart",
            ChartType::SequenceDiagram => "sequenceDiagram",
            ChartType::ClassDiagram => "classDiagram",
            ChartType::StateDiagram => "stateDiagram",
            ChartType::Journey => "journey",
            ChartType::GitGraph => "gitGraph",
            ChartType::Unknown => "unknown",
        }
    }

    pub fn is_supported(self) -> bool {
        SUPPORTED_CHART_TYPES.contains(&self)
    }

    /// Human-readable name for UI surfaces (toolbars, error panes).
    pub fn display_name(self) -> &'static str {
        match self {
            ChartType::Graph | ChartType::Flowchart => "Flowchart",
            ChartType::SequenceDiagram => "Sequence diagram",
            ChartType::ClassDiagram => "Class diagram",
            ChartType::StateDiagram => "State diagram",
            ChartType::Journey => "User journey",
            ChartType::GitGraph => "Git graph",
            ChartType::Unknown => "Unknown diagram type",
        }
    }
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied knobs for a single render request.
///
/// Two option sets are equal iff their serialized JSON forms are equal;
/// unset fields are omitted from serialization so `RenderOptions::default()`
/// serializes to `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Overrides the rendered element's identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Palette name, forwarded to engine initialization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// CSS color injected onto the rendered output's root element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

/// Facts about a completed render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderMetadata {
    pub chart_type: ChartType,
    /// Wall-clock engine time in milliseconds.
    pub render_time_ms: f64,
    /// Best-effort count of node-tagged markers in the output.
    pub node_count: usize,
    /// Best-effort count of edge-tagged markers in the output.
    pub edge_count: usize,
}

impl RenderMetadata {
    /// Metadata attached to failed requests.
    pub fn empty() -> Self {
        Self {
            chart_type: ChartType::Unknown,
            render_time_ms: 0.0,
            node_count: 0,
            edge_count: 0,
        }
    }
}

/// Structured, user-facing render failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Outcome of a render request.
///
/// Invariant: for a non-trivial request exactly one of `output` non-empty /
/// `error` present holds, and `success` reflects which.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResult {
    pub success: bool,
    pub output: String,
    pub metadata: RenderMetadata,
    pub from_cache: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RenderError>,
}

/// Deterministic cache key over (trimmed source, serialized options).
///
/// Both halves are base64-encoded before joining, so the key is injective:
/// identical inputs always collide, distinct option values never do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(source: &str, options: &RenderOptions) -> Self {
        let options_json =
            serde_json::to_string(options).expect("render options serialize to JSON");
        Self(format!(
            "{}-{}",
            BASE64.encode(source.trim()),
            BASE64.encode(&options_json)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
