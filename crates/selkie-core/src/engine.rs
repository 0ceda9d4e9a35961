use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Raw failure surfaced by the external rendering engine.
///
/// The engine's error payload is implementation-defined; the pipeline relies
/// only on the message text, which [`crate::error::translate_engine_error`]
/// normalizes into a structured [`crate::model::RenderError`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct EngineError {
    pub message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Raw output of a successful engine call.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub output: String,
}

/// Configuration handed to [`DiagramEngine::initialize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    pub start_on_load: bool,
    pub theme: String,
    pub security_level: String,
    pub log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    /// Palette overrides, forwarded to the engine verbatim.
    pub theme_variables: Value,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            start_on_load: false,
            theme: "default".to_string(),
            security_level: "loose".to_string(),
            log_level: "error".to_string(),
            font_family: None,
            font_size: None,
            theme_variables: Value::Object(serde_json::Map::new()),
        }
    }
}

/// Built-in editor palettes.
///
/// Switching palettes re-initializes the engine; every cached render is
/// invalidated at that point because cached output is theme-specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePalette {
    Light,
    Dark,
    Neutral,
}

impl ThemePalette {
    /// The engine configuration for this palette, including its color map.
    pub fn engine_config(self) -> EngineConfig {
        let (theme, theme_variables) = match self {
            ThemePalette::Light => (
                "default",
                json!({
                    "primaryColor": "#0066cc",
                    "primaryTextColor": "#000000",
                    "primaryBorderColor": "#0066cc",
                    "lineColor": "#666666",
                    "sectionBkgColor": "#ffffff",
                    "altSectionBkgColor": "#f9f9f9",
                    "gridColor": "#cccccc",
                    "textColor": "#000000",
                }),
            ),
            ThemePalette::Dark => (
                "dark",
                json!({
                    "primaryColor": "#3b82f6",
                    "primaryTextColor": "#ffffff",
                    "primaryBorderColor": "#1e40af",
                    "lineColor": "#6b7280",
                    "sectionBkgColor": "#1f2937",
                    "altSectionBkgColor": "#374151",
                    "gridColor": "#4b5563",
                    "textColor": "#f9fafb",
                }),
            ),
            ThemePalette::Neutral => (
                "neutral",
                json!({
                    "primaryColor": "#6b7280",
                    "primaryTextColor": "#000000",
                    "primaryBorderColor": "#6b7280",
                    "lineColor": "#9ca3af",
                    "sectionBkgColor": "#f3f4f6",
                    "altSectionBkgColor": "#e5e7eb",
                    "gridColor": "#d1d5db",
                    "textColor": "#111827",
                }),
            ),
        };

        EngineConfig {
            theme: theme.to_string(),
            font_family: Some("Inter, system-ui, sans-serif".to_string()),
            font_size: Some(14),
            theme_variables,
            ..EngineConfig::default()
        }
    }
}

/// The external rendering engine seam.
///
/// Implementations turn diagram source into markup; the pipeline treats them
/// as a black box and never inspects grammar itself. `render_diagram` is the
/// pipeline's only suspension point and must not block the calling thread.
pub trait DiagramEngine {
    /// One-time engine setup.
    ///
    /// The orchestrator guarantees at most one implicit call per instance
    /// (plus explicit re-initialization on theme switches), so
    /// implementations may treat this as idempotent configuration.
    fn initialize(&self, config: &EngineConfig) -> Result<(), EngineError>;

    /// Renders `source` into markup rooted at `element_id`.
    ///
    /// May fail with an implementation-defined message; the pipeline
    /// normalizes it, so implementations should not pre-format user-facing
    /// text.
    fn render_diagram(
        &self,
        element_id: &str,
        source: &str,
    ) -> impl Future<Output = Result<EngineOutput, EngineError>>;
}
