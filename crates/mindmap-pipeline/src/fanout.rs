//! Concurrent per-chunk dispatch with index-ordered collection
//!
//! Calls may finish in any order; results are slotted back by chunk index
//! so the caller can fold them deterministically.

use crate::error::PipelineError;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

/// Run `task` once per chunk with at most `max_concurrent` in flight
///
/// Returns results in chunk-index order. The first failure aborts every
/// task still running and is returned as-is.
pub async fn fan_out<T, F, Fut>(
    chunks: &[String],
    max_concurrent: usize,
    task: F,
) -> Result<Vec<T>, PipelineError>
where
    T: Send + 'static,
    F: Fn(usize, String) -> Fut,
    Fut: Future<Output = Result<T, PipelineError>> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut set = JoinSet::new();

    for (index, chunk) in chunks.iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let work = task(index, chunk.clone());
        set.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| PipelineError::Task(format!("Semaphore closed: {}", e)))?;
            work.await.map(|value| (index, value))
        });
    }

    let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(chunks.len()).collect();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(Ok((index, value))) => {
                debug!(chunk = index, "chunk finished");
                slots[index] = Some(value);
            }
            Ok(Err(e)) => {
                set.abort_all();
                return Err(e);
            }
            Err(e) => {
                set.abort_all();
                return Err(PipelineError::Task(format!("Task join error: {}", e)));
            }
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| PipelineError::Task(format!("chunk {} produced no result", index)))
        })
        .collect()
}
