//! Whole-entity indexing runs.
//!
//! The runner probes the id space, splits it into windows, and drives an
//! [`EntityIndex`] over every window. With more than one worker the windows
//! are processed on a rayon pool; every worker opens its own source
//! connection through the `connect` callback, and all workers share one sink.
//!
//! The sink is committed only when every window succeeded.

use std::time::{Duration, Instant};

use mbsearch_core::{EntityKind, Error, IndexConfig, Result};
use mbsearch_fts::{DocumentSink, TantivySink};
use rayon::prelude::*;
use serde::Serialize;

use crate::driver::{EntityIndex, WindowStats};
use crate::metadata::IndexMetadata;
use crate::source::RelationalSource;
use crate::window::BatchWindow;

/// Statistics about an indexing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Indexed entity.
    pub entity: EntityKind,
    /// Highest parent id found by the probe.
    pub max_id: i64,
    /// Parent rows counted by the probe.
    pub row_count: i64,
    /// Number of windows processed.
    pub windows: usize,
    /// Parent rows read across all windows.
    pub parent_rows: usize,
    /// Documents handed to the sink.
    pub documents: usize,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Runs entity indexing according to an [`IndexConfig`].
#[derive(Debug, Clone)]
pub struct IndexRunner {
    config: IndexConfig,
}

impl IndexRunner {
    /// Create a runner from a validated configuration.
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The runner's configuration.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Index every window of one entity into `sink`, then commit it.
    ///
    /// `connect` opens a source connection; it is called once for the probes
    /// and again by every parallel worker.
    pub fn run<S, F>(
        &self,
        index: &EntityIndex,
        connect: F,
        sink: &dyn DocumentSink,
    ) -> Result<IndexStats>
    where
        S: RelationalSource,
        F: Fn() -> Result<S> + Send + Sync,
    {
        let started = Instant::now();
        let entity = index.kind();

        let probe = connect()?;
        let max_id = index.max_id(&probe)?;
        let row_count = index.row_count(&probe, max_id)?;
        let windows = BatchWindow::split(max_id, self.config.window_size)?;
        log::info!(
            "Indexing {row_count} {entity} rows up to id {max_id} in {} windows",
            windows.len()
        );

        let window_stats = if self.config.workers <= 1 || windows.len() <= 1 {
            windows
                .iter()
                .map(|window| index.index_window(&probe, *window, sink))
                .collect::<Result<Vec<_>>>()?
        } else {
            drop(probe);
            self.run_parallel(index, &windows, &connect, sink)?
        };

        sink.commit()?;

        let stats = IndexStats {
            entity,
            max_id,
            row_count,
            windows: window_stats.len(),
            parent_rows: window_stats.iter().map(|w| w.parent_rows).sum(),
            documents: window_stats.iter().map(|w| w.documents).sum(),
            elapsed: started.elapsed(),
        };
        log::info!(
            "Indexed {} {entity} documents in {:?}",
            stats.documents,
            stats.elapsed
        );
        Ok(stats)
    }

    fn run_parallel<S, F>(
        &self,
        index: &EntityIndex,
        windows: &[BatchWindow],
        connect: &F,
        sink: &dyn DocumentSink,
    ) -> Result<Vec<WindowStats>>
    where
        S: RelationalSource,
        F: Fn() -> Result<S> + Send + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("mbsearch-worker-{i}"))
            .build()
            .map_err(|e| Error::config(format!("failed to start worker pool: {e}")))?;

        pool.install(|| {
            windows
                .par_iter()
                .map_init(connect, |source, window| match source {
                    Ok(source) => index.index_window(source, *window, sink),
                    Err(e) => Err(Error::source_query(format!(
                        "worker could not connect for window {window}: {e}"
                    ))),
                })
                .collect::<Result<Vec<_>>>()
        })
    }

    /// Build the on-disk index of every configured entity.
    ///
    /// Each index is cleared, rebuilt, committed, and stamped with
    /// [`IndexMetadata`]. Clearing only takes effect with the run's final
    /// commit, so an entity whose run fails keeps its previous index.
    pub fn build_all<S, F>(&self, connect: F) -> Result<Vec<IndexStats>>
    where
        S: RelationalSource,
        F: Fn() -> Result<S> + Send + Sync,
    {
        let mut all = Vec::with_capacity(self.config.entities.len());
        for &kind in &self.config.entities {
            let dir = self.config.entity_index_dir(kind);
            let index = EntityIndex::for_kind(kind)?;

            let sink = TantivySink::create_in_dir(&dir, kind, self.config.writer_memory_bytes)?;
            sink.clear()?;
            let stats = self.run(&index, &connect, &sink)?;
            sink.close()?;

            IndexMetadata::from_stats(&stats).save(&dir)?;
            all.push(stats);
        }
        Ok(all)
    }
}
