use tracing::{info, trace, warn};
use crate::core::error::{Error, Result};
use crate::core::types::DocId;

pub const DEFAULT_BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Insertions performed before yielding to the runtime.
    pub batch_size: usize,
}

impl BatchOptions {
    pub fn new(batch_size: usize) -> Result<Self> {
        let options = BatchOptions { batch_size };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        BatchOptions {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// Identifiers in input order.
    pub ids: Vec<DocId>,
    /// Number of documents inserted at each yield point.
    pub yields: Vec<usize>,
}

/// Drives single-document insertions over a sequence, yielding to the tokio
/// scheduler every `batch_size` insertions.
///
/// A failing document stops the batch. Everything inserted before it stays
/// committed; there is no batch-wide rollback. The same holds when the
/// future is dropped at a yield point.
#[derive(Debug)]
pub struct BatchScheduler {
    batch_size: usize,
    inserted: usize,
    since_yield: usize,
    yields: Vec<usize>,
}

impl BatchScheduler {
    pub fn new(options: BatchOptions) -> Result<Self> {
        options.validate()?;
        Ok(BatchScheduler {
            batch_size: options.batch_size,
            inserted: 0,
            since_yield: 0,
            yields: Vec::new(),
        })
    }

    /// Feed every item to `insert`, in order.
    ///
    /// The next item is pulled from `items` only after the yield, so a batch
    /// dropped at a yield point leaves the rest of a borrowed iterator intact.
    /// A yield follows every full `batch_size` run, the last one included.
    ///
    /// Errors come back as [`Error::Batch`] carrying the zero-based position
    /// of the failing item.
    pub async fn run<T, I, F>(mut self, items: I, mut insert: F) -> Result<BatchOutcome>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(T) -> Result<DocId>,
    {
        let items = items.into_iter();
        let mut ids = Vec::with_capacity(items.size_hint().0);

        for item in items {
            let position = self.inserted;
            let id = insert(item).map_err(|err| {
                warn!(position, error = %err, "batch insertion aborted");
                err.in_batch(position)
            })?;

            ids.push(id);
            self.inserted += 1;
            self.since_yield += 1;

            if self.since_yield >= self.batch_size {
                self.since_yield = 0;
                self.yields.push(self.inserted);
                trace!(inserted = self.inserted, "yielding to scheduler");
                tokio::task::yield_now().await;
            }
        }

        info!(inserted = self.inserted, yields = self.yields.len(), "batch insertion complete");
        Ok(BatchOutcome {
            ids,
            yields: self.yields,
        })
    }
}
