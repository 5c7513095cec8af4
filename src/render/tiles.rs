use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::foundation::error::{StampError, StampResult};

/// Cooperative cancellation signal, polled once per scanline.
pub trait CancelSignal: Sync {
    /// `true` once the caller wants the current render pass abandoned.
    fn is_cancelled(&self) -> bool;
}

impl CancelSignal for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

/// Signal that never fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverCancel;

impl CancelSignal for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Shareable cancellation flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Fresh, not-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; every clone observes it.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Clear a previous request before the next pass.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CancelSignal for CancelToken {
    fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }
}

/// How a single tile render ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileOutcome {
    /// Every row of the tile was written.
    Completed,
    /// Cancellation was observed; only the first `rows_written` rows were written.
    Cancelled {
        /// Rows written before the signal was seen.
        rows_written: u32,
    },
}

/// Tile-level parallelism options.
#[derive(Clone, Debug, Default)]
pub struct RenderThreading {
    /// Render tiles on a rayon pool.
    pub parallel: bool,
    /// Override the number of worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Summary of a multi-tile render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Tiles requested.
    pub tiles_total: u64,
    /// Tiles fully written.
    pub tiles_completed: u64,
    /// Tiles stopped early by cancellation (including ones never started).
    pub tiles_cancelled: u64,
}

impl RenderStats {
    pub(crate) fn record(&mut self, outcome: TileOutcome) {
        self.tiles_total += 1;
        match outcome {
            TileOutcome::Completed => self.tiles_completed += 1,
            TileOutcome::Cancelled { .. } => self.tiles_cancelled += 1,
        }
    }

    /// `true` when any tile stopped early.
    pub fn was_cancelled(&self) -> bool {
        self.tiles_cancelled > 0
    }
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> StampResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(StampError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| StampError::render(format!("failed to build rayon thread pool: {e}")))
}

/// Rayon pool reused across render calls while the requested thread count stays the same.
#[derive(Debug, Default)]
pub(crate) struct ThreadPoolCache {
    slot: Mutex<Option<(Option<usize>, Arc<rayon::ThreadPool>)>>,
}

impl ThreadPoolCache {
    /// Pool for `threads`, built on first use and rebuilt when `threads` changes.
    pub(crate) fn get(&self, threads: Option<usize>) -> StampResult<Arc<rayon::ThreadPool>> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StampError::render("thread pool cache lock poisoned"))?;
        if let Some((cached_threads, pool)) = slot.as_ref()
            && *cached_threads == threads
        {
            return Ok(Arc::clone(pool));
        }
        let pool = Arc::new(build_thread_pool(threads)?);
        tracing::debug!(?threads, "built render thread pool");
        *slot = Some((threads, Arc::clone(&pool)));
        Ok(pool)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/tiles.rs"]
mod tests;
