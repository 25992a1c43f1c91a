//! Parallel classification of independent seeds.
//!
//! Jobs are fed to a fixed pool of scoped worker threads over a
//! crossbeam channel. Each worker loops `recv job → classify → send
//! result` until the job channel closes. Results are reassembled in job
//! order, so the output does not depend on scheduling.

use std::thread;

use ndlife_space::SparseState;
use tracing::debug;

use crate::error::SearchError;
use crate::result::{CanonicalizationMode, SearchResult};
use crate::search::StructureSearch;

/// One seed to classify in a batch.
#[derive(Clone, Debug)]
pub struct SearchJob {
    /// Initial pattern.
    pub seed: SparseState,
    /// Step budget for this job.
    pub max_iterations: u64,
    /// State comparison mode for this job.
    pub mode: CanonicalizationMode,
}

impl StructureSearch {
    /// Classify every job on up to `workers` threads.
    ///
    /// The returned vector has one entry per job, in job order. A failing
    /// job does not stop the others. The search's cancel token is shared
    /// by all jobs, so tripping it ends every remaining job as
    /// `Unclassified`. A `workers` value of 0 is treated as 1.
    pub fn classify_batch(
        &self,
        jobs: Vec<SearchJob>,
        workers: usize,
    ) -> Vec<Result<SearchResult, SearchError>> {
        let total = jobs.len();
        if total == 0 {
            return Vec::new();
        }
        let workers = workers.clamp(1, total);

        let (job_tx, job_rx) = crossbeam_channel::unbounded::<(usize, SearchJob)>();
        let (result_tx, result_rx) = crossbeam_channel::unbounded();
        for pair in jobs.into_iter().enumerate() {
            // The receiver lives until the scope below ends.
            let _ = job_tx.send(pair);
        }
        drop(job_tx);

        thread::scope(|s| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                s.spawn(move || {
                    while let Ok((idx, job)) = job_rx.recv() {
                        let result = self.classify(&job.seed, job.max_iterations, job.mode);
                        if result_tx.send((idx, result)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(result_tx);

        let mut results: Vec<(usize, Result<SearchResult, SearchError>)> =
            result_rx.try_iter().collect();
        results.sort_by_key(|(idx, _)| *idx);
        debug!(jobs = total, workers, "batch search finished");
        results.into_iter().map(|(_, r)| r).collect()
    }
}
