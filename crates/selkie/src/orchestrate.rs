use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use futures::FutureExt;
use regex::Regex;
use uuid::Uuid;

use selkie_core::cache::{CacheStats, ResultCache};
use selkie_core::detect::detect_chart_type;
use selkie_core::engine::{DiagramEngine, EngineConfig, EngineError, ThemePalette};
use selkie_core::error::{internal_render_error, translate_engine_error};
use selkie_core::model::{CacheKey, RenderMetadata, RenderOptions, RenderResult};

/// Composes the render pipeline: chart-type detection, the result cache, the
/// external engine, and error normalization.
///
/// The cache is an explicitly constructed, orchestrator-owned instance with
/// the orchestrator's lifecycle; there is no ambient global state. Engine
/// initialization is lazy and happens at most once per instance — a failed
/// attempt is still marked attempted so render calls do not retry it
/// forever, and failures surface per call instead.
pub struct RenderOrchestrator<E> {
    engine: E,
    cache: Mutex<ResultCache>,
    engine_config: Mutex<EngineConfig>,
    initialized: AtomicBool,
}

impl<E: DiagramEngine> RenderOrchestrator<E> {
    pub fn new(engine: E) -> Self {
        Self::with_engine_config(engine, EngineConfig::default())
    }

    pub fn with_engine_config(engine: E, config: EngineConfig) -> Self {
        Self {
            engine,
            cache: Mutex::new(ResultCache::new()),
            engine_config: Mutex::new(config),
            initialized: AtomicBool::new(false),
        }
    }

    /// Replaces the default cache, e.g. to tune capacity or TTL.
    pub fn with_cache(mut self, cache: ResultCache) -> Self {
        self.cache = Mutex::new(cache);
        self
    }

    /// Renders `source`, consulting the cache first.
    ///
    /// Never returns an error: every failure — an unsupported chart type, an
    /// engine error, even a panic unwinding out of the engine future — is
    /// captured into [`RenderResult::error`]. Callers are expected to gate
    /// trivial (empty/whitespace) input; see
    /// [`crate::session::RenderSession::render`].
    pub async fn render(&self, source: &str, options: &RenderOptions) -> RenderResult {
        self.ensure_initialized();

        let key = CacheKey::new(source, options);
        if let Some(entry) = self.cache().get(&key) {
            tracing::debug!(chart_type = %entry.metadata.chart_type, "render served from cache");
            return RenderResult {
                success: true,
                output: entry.output,
                metadata: entry.metadata,
                from_cache: true,
                error: None,
            };
        }

        match self.render_uncached(source, options).await {
            Ok((output, metadata)) => {
                self.cache().set(key, output.clone(), metadata.clone());
                RenderResult {
                    success: true,
                    output,
                    metadata,
                    from_cache: false,
                    error: None,
                }
            }
            Err(failure) => {
                let error = match failure {
                    RenderFailure::Engine(raw) => {
                        tracing::warn!(error = %raw, "diagram render failed");
                        translate_engine_error(&raw, source)
                    }
                    RenderFailure::Internal(detail) => {
                        tracing::warn!(detail = %detail, "engine panicked during render");
                        internal_render_error()
                    }
                };
                RenderResult {
                    success: false,
                    output: String::new(),
                    metadata: RenderMetadata::empty(),
                    from_cache: false,
                    error: Some(error),
                }
            }
        }
    }

    async fn render_uncached(
        &self,
        source: &str,
        options: &RenderOptions,
    ) -> Result<(String, RenderMetadata), RenderFailure> {
        let chart_type = detect_chart_type(source);
        if !chart_type.is_supported() {
            return Err(RenderFailure::Engine(EngineError::new(format!(
                "Unsupported diagram type: {chart_type}"
            ))));
        }

        let caller_id = options.id.as_deref().map(sanitize_element_id);
        let element_id = caller_id
            .clone()
            .unwrap_or_else(|| format!("selkie-{}", Uuid::new_v4()));

        let started = Instant::now();
        let rendered = AssertUnwindSafe(self.engine.render_diagram(&element_id, source))
            .catch_unwind()
            .await
            .map_err(|panic| RenderFailure::Internal(panic_detail(panic)))?
            .map_err(RenderFailure::Engine)?;
        let render_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        let output = postprocess_output(&rendered.output, caller_id.as_deref(), options);
        let metadata = RenderMetadata {
            chart_type,
            render_time_ms,
            node_count: count_nodes(&output),
            edge_count: count_edges(&output),
        };
        Ok((output, metadata))
    }

    /// Switches the engine to `palette` and clears the cache; cached output
    /// is theme-specific.
    pub fn set_theme(&self, palette: ThemePalette) {
        let config = palette.engine_config();
        if let Err(err) = self.engine.initialize(&config) {
            tracing::warn!(error = %err, "engine re-initialization failed");
        }
        *self.config() = config;
        self.initialized.store(true, Ordering::SeqCst);
        self.cache().clear();
    }

    pub fn clear_cache(&self) {
        self.cache().clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache().stats()
    }

    /// Drops the cached result for one (source, options) pair.
    ///
    /// Retry is "invalidate, then re-issue the same request" — an error
    /// result is never silently reused.
    pub fn invalidate(&self, source: &str, options: &RenderOptions) -> bool {
        self.cache().remove(&CacheKey::new(source, options))
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn ensure_initialized(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return;
        }
        let config = self.config().clone();
        if let Err(err) = self.engine.initialize(&config) {
            tracing::warn!(error = %err, "engine initialization failed");
        }
    }

    fn cache(&self) -> MutexGuard<'_, ResultCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn config(&self) -> MutexGuard<'_, EngineConfig> {
        self.engine_config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

enum RenderFailure {
    Engine(EngineError),
    /// A panic unwound out of the engine future; carries the panic payload
    /// text for logging only.
    Internal(String),
}

fn panic_detail(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        return (*s).to_string();
    }
    if let Some(s) = panic.downcast_ref::<String>() {
        return s.clone();
    }
    "non-string panic payload".to_string()
}

/// Converts an arbitrary caller-supplied string into a conservative markup
/// `id` token.
///
/// Rendered output derives internal ids (marker definitions, title anchors)
/// from the root id, and those collide when two diagrams in the same UI tree
/// share one. Unsupported characters become `-` and the id must start with
/// an ASCII letter.
pub fn sanitize_element_id(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') {
                ch
            } else {
                '-'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('-');

    if cleaned.is_empty() {
        return "selkie-diagram".to_string();
    }
    if cleaned.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        cleaned.to_string()
    } else {
        format!("d-{cleaned}")
    }
}

/// Deterministic post-processing applied to raw engine output before caching.
fn postprocess_output(raw: &str, caller_id: Option<&str>, options: &RenderOptions) -> String {
    let mut processed = raw.to_string();

    if let Some(id) = caller_id {
        processed = Regex::new(r#"id="[^"]*""#)
            .unwrap()
            .replace_all(&processed, |_: &regex::Captures| format!(r#"id="{id}""#))
            .to_string();
    }

    // Tag injected style blocks as generated output.
    processed = processed.replace("<style>", "<style>/* selkie generated */");

    if let Some(background) = options.background.as_deref() {
        processed = Regex::new(r"<svg([^>]*)>")
            .unwrap()
            .replace(&processed, |caps: &regex::Captures| {
                format!(
                    r#"<svg{} style="background-color: {background};">"#,
                    &caps[1]
                )
            })
            .to_string();
    }

    // Outputs without explicit sizing metadata get a viewBox derived from the
    // width/height attributes already present.
    if !processed.contains("viewBox") {
        processed = Regex::new(r#"<svg([^>]*)width="(\d+)"([^>]*)height="(\d+)"([^>]*)>"#)
            .unwrap()
            .replace(
                &processed,
                r#"<svg$1$3$5 viewBox="0 0 $2 $4" width="$2" height="$4">"#,
            )
            .to_string();
    }

    processed
}

/// Best-effort node count: `<g>` elements carrying a `node` class.
fn count_nodes(output: &str) -> usize {
    Regex::new(r#"<g[^>]*class="[^"]*node[^"]*"[^>]*>"#)
        .unwrap()
        .find_iter(output)
        .count()
}

/// Best-effort edge count: edge-tagged `<g>` groups plus half the `<path>`
/// elements (most edge shapes emit a line and an arrowhead pair).
fn count_edges(output: &str) -> usize {
    let groups = Regex::new(r#"<g[^>]*class="[^"]*edge[^"]*"[^>]*>"#)
        .unwrap()
        .find_iter(output)
        .count();
    let paths = Regex::new(r"<path[^>]*>").unwrap().find_iter(output).count();
    groups + paths / 2
}
