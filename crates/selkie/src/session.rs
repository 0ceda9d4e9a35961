use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use selkie_core::cache::CacheStats;
use selkie_core::engine::{DiagramEngine, ThemePalette};
use selkie_core::model::{RenderOptions, RenderResult, RenderState};

use crate::orchestrate::RenderOrchestrator;

/// The concurrency boundary consumed by the UI.
///
/// A session sequences successive render requests and exposes a single
/// observable lifecycle state: `Idle → Loading → {Success, Error}`, cycling
/// back to `Loading` on each new request. Cancellation is cooperative and
/// represented as an explicit generation token: every request captures the
/// generation current at issue time and commits its result only if that
/// token is still current after the orchestrator resumes. A slow request
/// finishing after a newer one is discarded regardless of completion order —
/// only the most-recently-issued request's result is ever committed.
pub struct RenderSession<E> {
    inner: Arc<SessionInner<E>>,
}

struct SessionInner<E> {
    orchestrator: RenderOrchestrator<E>,
    generation: AtomicU64,
    observed: Mutex<Observed>,
}

struct Observed {
    state: RenderState,
    result: Option<RenderResult>,
}

impl<E> SessionInner<E> {
    fn observed(&self) -> MutexGuard<'_, Observed> {
        self.observed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: DiagramEngine + 'static> RenderSession<E> {
    pub fn new(orchestrator: RenderOrchestrator<E>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                orchestrator,
                generation: AtomicU64::new(0),
                observed: Mutex::new(Observed {
                    state: RenderState::Idle,
                    result: None,
                }),
            }),
        }
    }

    /// Issues a render request.
    ///
    /// The token grab and the state transition happen synchronously, so
    /// request order is call order; the returned future performs the actual
    /// render and the commit check. It owns its session handle and can be
    /// spawned fire-and-forget on any executor — a completion that arrives
    /// after the session was superseded or disposed is discarded silently.
    ///
    /// Empty or whitespace-only source means "no diagram": the session goes
    /// `Idle` with a `None` result, any in-flight request is superseded, and
    /// the orchestrator is not invoked.
    pub fn render(
        &self,
        source: impl Into<String>,
        options: RenderOptions,
    ) -> impl Future<Output = ()> + 'static {
        let inner = Arc::clone(&self.inner);
        let source = source.into();

        let trivial = source.trim().is_empty();
        let token = inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut observed = inner.observed();
            if trivial {
                observed.state = RenderState::Idle;
                observed.result = None;
            } else {
                observed.state = RenderState::Loading;
            }
        }

        async move {
            if trivial {
                return;
            }

            let result = inner.orchestrator.render(&source, &options).await;

            if inner.generation.load(Ordering::SeqCst) != token {
                tracing::debug!("discarding superseded render result");
                return;
            }

            let mut observed = inner.observed();
            observed.state = if result.success {
                RenderState::Success
            } else {
                RenderState::Error
            };
            observed.result = Some(result);
        }
    }

    /// Clears the cached result for this request, then re-issues it.
    ///
    /// This is the retry contract: a failed render is re-attempted from
    /// scratch rather than reusing a stale cached outcome.
    pub fn retry(
        &self,
        source: impl Into<String>,
        options: RenderOptions,
    ) -> impl Future<Output = ()> + 'static {
        let source = source.into();
        self.inner.orchestrator.invalidate(&source, &options);
        self.render(source, options)
    }

    pub fn state(&self) -> RenderState {
        self.inner.observed().state
    }

    pub fn result(&self) -> Option<RenderResult> {
        self.inner.observed().result.clone()
    }

    pub fn clear_cache(&self) {
        self.inner.orchestrator.clear_cache();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.inner.orchestrator.cache_stats()
    }

    /// Switches the engine palette; every cached render is invalidated.
    pub fn set_theme(&self, palette: ThemePalette) {
        self.inner.orchestrator.set_theme(palette);
    }

    pub fn orchestrator(&self) -> &RenderOrchestrator<E> {
        &self.inner.orchestrator
    }

    /// Invalidates the current token.
    ///
    /// Any outstanding request's completion is discarded afterwards, so a
    /// disposed session's observers are never mutated. Dropping the session
    /// does the same.
    pub fn dispose(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl<E> Drop for RenderSession<E> {
    fn drop(&mut self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
    }
}
