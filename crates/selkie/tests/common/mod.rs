#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use selkie::{DiagramEngine, EngineConfig, EngineError, EngineOutput};

pub const DEFAULT_SVG: &str = r#"<svg id="mermaid-1"><g class="node">A</g><g class="node">B</g><g class="edge">A-B</g><path d="M0 0"/><path d="M1 1"/></svg>"#;

/// What the scripted engine replays on the next render call.
#[derive(Clone)]
pub enum Response {
    Output(String),
    Error(String),
    Panic(String),
}

/// Scripted stand-in for the external rendering engine: counts calls and
/// replays a configurable response.
pub struct ScriptedEngine {
    init_calls: AtomicUsize,
    render_calls: AtomicUsize,
    fail_init: bool,
    response: Mutex<Response>,
}

impl ScriptedEngine {
    pub fn ok() -> Self {
        Self::with_response(Response::Output(DEFAULT_SVG.to_string()))
    }

    pub fn with_response(response: Response) -> Self {
        Self {
            init_calls: AtomicUsize::new(0),
            render_calls: AtomicUsize::new(0),
            fail_init: false,
            response: Mutex::new(response),
        }
    }

    pub fn failing_init() -> Self {
        Self {
            fail_init: true,
            ..Self::ok()
        }
    }

    pub fn set_response(&self, response: Response) {
        *self.response.lock().unwrap_or_else(PoisonError::into_inner) = response;
    }

    pub fn render_count(&self) -> usize {
        self.render_calls.load(Ordering::SeqCst)
    }

    pub fn init_count(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }
}

impl DiagramEngine for ScriptedEngine {
    fn initialize(&self, _config: &EngineConfig) -> Result<(), EngineError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_init {
            return Err(EngineError::new("engine refused to start"));
        }
        Ok(())
    }

    async fn render_diagram(
        &self,
        _element_id: &str,
        _source: &str,
    ) -> Result<EngineOutput, EngineError> {
        self.render_calls.fetch_add(1, Ordering::SeqCst);
        let response = self
            .response
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match response {
            Response::Output(output) => Ok(EngineOutput { output }),
            Response::Error(message) => Err(EngineError::new(message)),
            Response::Panic(message) => panic!("{message}"),
        }
    }
}
